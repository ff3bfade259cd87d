use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use rayon::prelude::*;
use schoolmis_db::DocumentStore;
use schoolmis_models::teachers::{CreateTeacherDto, Teacher};
use std::time::Instant;

use super::{batch_tag, insert_all};

const DEPARTMENTS: [&str; 5] = ["Sciences", "Mathematics", "Languages", "Humanities", "Arts"];
const QUALIFICATIONS: [&str; 3] = ["B.Ed", "M.Ed", "PhD"];

pub fn generate_teachers(school_ids: &[String], per_school: usize) -> Vec<CreateTeacherDto> {
    let tag = batch_tag();

    school_ids
        .par_iter()
        .enumerate()
        .flat_map_iter(|(school_idx, school)| {
            let tag = tag.clone();
            (0..per_school).map(move |i| {
                let first: String = FirstName().fake();
                let last: String = LastName().fake();
                CreateTeacherDto {
                    email: Some(format!(
                        "{}.{}.{}{}@staff.example.org",
                        mailbox(&first),
                        mailbox(&last),
                        school_idx,
                        i
                    )),
                    first_name: Some(first),
                    last_name: Some(last),
                    phone: Some(PhoneNumber().fake()),
                    employee_id: Some(format!("EMP{}{:02}{:03}", tag, school_idx, i)),
                    department: Some(DEPARTMENTS[i % DEPARTMENTS.len()].to_string()),
                    qualification: Some(QUALIFICATIONS[i % QUALIFICATIONS.len()].to_string()),
                    school: Some(school.clone()),
                    courses: None,
                }
            })
        })
        .collect()
}

fn mailbox(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

pub async fn seed_teachers(
    store: &dyn DocumentStore,
    school_ids: &[String],
    per_school: usize,
) -> anyhow::Result<Vec<String>> {
    let start_time = Instant::now();
    println!("👩‍🏫 Seeding {} teachers per school...", per_school);

    let ids = insert_all::<Teacher, _>(store, generate_teachers(school_ids, per_school)).await?;

    println!(
        "   ✓ Inserted {} teachers in {:?}",
        ids.len(),
        start_time.elapsed()
    );
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_employee_ids_are_unique_across_schools() {
        let schools = vec!["s1".to_string(), "s2".to_string()];
        let teachers = generate_teachers(&schools, 3);

        let ids: HashSet<_> = teachers.iter().filter_map(|t| t.employee_id.clone()).collect();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_mailbox_keeps_only_plain_characters() {
        assert_eq!(mailbox("O'Keefe"), "okeefe");
    }
}
