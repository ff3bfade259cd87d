use chrono::{Duration, Utc};
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;
use schoolmis_db::DocumentStore;
use schoolmis_models::rules::GENDERS;
use schoolmis_models::students::{CreateStudentDto, Student};
use std::time::Instant;

use super::{batch_tag, insert_all};

pub fn generate_students(school_ids: &[String], per_school: usize) -> Vec<CreateStudentDto> {
    let tag = batch_tag();

    school_ids
        .par_iter()
        .enumerate()
        .flat_map_iter(|(school_idx, school)| {
            let tag = tag.clone();
            (0..per_school).map(move |i| {
                let age_days = (13 * 365..19 * 365).fake::<i64>();
                CreateStudentDto {
                    first_name: Some(FirstName().fake()),
                    last_name: Some(LastName().fake()),
                    admission_number: Some(format!("ADM{}{:02}{:04}", tag, school_idx, i)),
                    date_of_birth: Some(Utc::now() - Duration::days(age_days)),
                    gender: Some(GENDERS[i % 2].to_string()),
                    school: Some(school.clone()),
                    ..CreateStudentDto::default()
                }
            })
        })
        .collect()
}

pub async fn seed_students(
    store: &dyn DocumentStore,
    school_ids: &[String],
    per_school: usize,
) -> anyhow::Result<Vec<String>> {
    let start_time = Instant::now();
    println!("🧑‍🎓 Seeding {} students per school...", per_school);

    let ids = insert_all::<Student, _>(store, generate_students(school_ids, per_school)).await?;

    println!(
        "   ✓ Inserted {} students in {:?}",
        ids.len(),
        start_time.elapsed()
    );
    Ok(ids)
}
