use rayon::prelude::*;
use schoolmis_db::DocumentStore;
use schoolmis_models::classes::{CreateClassDto, SchoolClass};
use std::time::Instant;

use super::insert_all;
use super::levels::SeededLevel;

const STREAMS: [&str; 2] = ["A", "B"];

/// Two streams per level, named after the level's number, e.g. `S4A`.
pub fn generate_classes(levels: &[SeededLevel]) -> Vec<CreateClassDto> {
    levels
        .par_iter()
        .flat_map_iter(|level| {
            let number = level.name.rsplit(' ').next().unwrap_or_default().to_string();
            STREAMS.iter().map(move |stream| CreateClassDto {
                name: Some(format!("S{}{}", number, stream)),
                level: Some(level.id.clone()),
                school: Some(level.school.clone()),
                class_teacher: None,
                capacity: Some(40),
            })
        })
        .collect()
}

pub async fn seed_classes(
    store: &dyn DocumentStore,
    levels: &[SeededLevel],
) -> anyhow::Result<Vec<String>> {
    let start_time = Instant::now();
    println!("🏫 Seeding classes for {} levels...", levels.len());

    let ids = insert_all::<SchoolClass, _>(store, generate_classes(levels)).await?;

    println!(
        "   ✓ Inserted {} classes in {:?}",
        ids.len(),
        start_time.elapsed()
    );
    Ok(ids)
}
