use rayon::prelude::*;
use schoolmis_db::DocumentStore;
use schoolmis_models::courses::{Course, CreateCourseDto};
use std::time::Instant;

use super::insert_all;
use super::levels::SeededLevel;

const SUBJECTS: [(&str, &str, i64); 4] = [
    ("Mathematics", "MAT", 4),
    ("Physics", "PHY", 3),
    ("English", "ENG", 3),
    ("History", "HIS", 2),
];

pub fn generate_courses(levels: &[SeededLevel]) -> Vec<CreateCourseDto> {
    levels
        .par_iter()
        .flat_map_iter(|level| {
            let number = level.name.rsplit(' ').next().unwrap_or_default().to_string();
            SUBJECTS.iter().map(move |(name, prefix, credits)| CreateCourseDto {
                name: Some(name.to_string()),
                code: Some(format!("{}{}01", prefix, number)),
                description: Some(format!("{} for {}", name, level.name)),
                level: Some(level.id.clone()),
                school: Some(level.school.clone()),
                teacher: None,
                credits: Some(*credits),
            })
        })
        .collect()
}

pub async fn seed_courses(
    store: &dyn DocumentStore,
    levels: &[SeededLevel],
) -> anyhow::Result<Vec<String>> {
    let start_time = Instant::now();
    println!("📖 Seeding courses for {} levels...", levels.len());

    let ids = insert_all::<Course, _>(store, generate_courses(levels)).await?;

    println!(
        "   ✓ Inserted {} courses in {:?}",
        ids.len(),
        start_time.elapsed()
    );
    Ok(ids)
}
