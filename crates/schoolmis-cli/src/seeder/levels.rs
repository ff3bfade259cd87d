use rayon::prelude::*;
use schoolmis_db::DocumentStore;
use schoolmis_models::levels::{CreateLevelDto, Level};
use schoolmis_models::rules::LEVEL_NAMES;
use std::time::Instant;

use super::insert_all;

/// A seeded level together with the school it belongs to.
#[derive(Debug, Clone)]
pub struct SeededLevel {
    pub id: String,
    pub name: String,
    pub school: String,
}

/// One level per allowed level name in every school.
pub fn generate_levels(school_ids: &[String]) -> Vec<CreateLevelDto> {
    school_ids
        .par_iter()
        .flat_map_iter(|school| {
            LEVEL_NAMES.iter().map(move |name| CreateLevelDto {
                name: Some(name.to_string()),
                description: Some(format!("{} stream", name)),
                school: Some(school.clone()),
            })
        })
        .collect()
}

pub async fn seed_levels(
    store: &dyn DocumentStore,
    school_ids: &[String],
) -> anyhow::Result<Vec<SeededLevel>> {
    let start_time = Instant::now();
    println!("🎓 Seeding levels for {} schools...", school_ids.len());

    let dtos = generate_levels(school_ids);
    let refs: Vec<(String, String)> = dtos
        .iter()
        .map(|dto| {
            (
                dto.name.clone().unwrap_or_default(),
                dto.school.clone().unwrap_or_default(),
            )
        })
        .collect();
    let ids = insert_all::<Level, _>(store, dtos).await?;

    println!(
        "   ✓ Inserted {} levels in {:?}",
        ids.len(),
        start_time.elapsed()
    );
    Ok(ids
        .into_iter()
        .zip(refs)
        .map(|(id, (name, school))| SeededLevel { id, name, school })
        .collect())
}
