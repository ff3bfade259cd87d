//! Demo data and the default administrator.
//!
//! A full seed writes schools, then for each school the three senior
//! levels, two classes and four courses per level, teachers and students.
//! Generation runs in parallel with Rayon; inserts go through
//! [`schoolmis_db::Repository`] one record at a time so the uniqueness checks
//! the API applies hold for seeded data too.

pub mod classes;
pub mod courses;
pub mod levels;
pub mod schools;
pub mod students;
pub mod teachers;
pub mod users;

use schoolmis_core::{AppError, Normalize};
use schoolmis_db::{Collection, DocumentStore, Repository, Resource};
use serde_json::Value;
use std::time::Instant;
use validator::Validate;

pub use users::{AdminAccount, SeedAdminOutcome, seed_admin};

/// Tag mixed into generated identifiers so repeated runs do not collide on
/// unique fields.
pub(crate) fn batch_tag() -> String {
    format!("{:05}", chrono::Utc::now().timestamp() % 100_000)
}

/// How much demo data [`seed_all`] writes.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub schools: usize,
    pub students_per_school: usize,
    pub teachers_per_school: usize,
}

impl SeedConfig {
    pub fn new(schools: usize) -> Self {
        Self {
            schools,
            ..Self::default()
        }
    }

    pub fn with_students(mut self, per_school: usize) -> Self {
        self.students_per_school = per_school;
        self
    }

    pub fn with_teachers(mut self, per_school: usize) -> Self {
        self.teachers_per_school = per_school;
        self
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            schools: 3,
            students_per_school: 20,
            teachers_per_school: 4,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub schools: usize,
    pub levels: usize,
    pub classes: usize,
    pub courses: usize,
    pub teachers: usize,
    pub students: usize,
}

/// Seeds schools, then everything that hangs off them.
pub async fn seed_all(store: &dyn DocumentStore, config: &SeedConfig) -> anyhow::Result<SeedReport> {
    let start_time = Instant::now();
    println!("🌱 Seeding {} schools into {}...", config.schools, store.source());

    let school_ids = schools::seed_schools(store, config.schools).await?;
    let seeded_levels = levels::seed_levels(store, &school_ids).await?;
    let class_ids = classes::seed_classes(store, &seeded_levels).await?;
    let course_ids = courses::seed_courses(store, &seeded_levels).await?;
    let teacher_ids =
        teachers::seed_teachers(store, &school_ids, config.teachers_per_school).await?;
    let student_ids =
        students::seed_students(store, &school_ids, config.students_per_school).await?;

    let report = SeedReport {
        schools: school_ids.len(),
        levels: seeded_levels.len(),
        classes: class_ids.len(),
        courses: course_ids.len(),
        teachers: teacher_ids.len(),
        students: student_ids.len(),
    };
    println!("✅ Seeding finished in {:?}", start_time.elapsed());
    Ok(report)
}

/// Empties every collection except `users`.
pub async fn clear_all(store: &dyn DocumentStore) -> anyhow::Result<u64> {
    let mut total = 0;
    for collection in Collection::ALL {
        if collection == Collection::Users {
            continue;
        }
        let removed = store.clear(collection).await?;
        println!("   ✓ Deleted {} {}", removed, collection);
        total += removed;
    }
    Ok(total)
}

/// Document counts per collection, in [`Collection::ALL`] order.
pub async fn collection_counts(
    store: &dyn DocumentStore,
) -> anyhow::Result<Vec<(Collection, u64)>> {
    let mut counts = Vec::with_capacity(Collection::ALL.len());
    for collection in Collection::ALL {
        counts.push((collection, store.count(collection).await?));
    }
    Ok(counts)
}

/// Normalizes, validates and inserts each DTO, returning the new ids.
pub(crate) async fn insert_all<R, D>(
    store: &dyn DocumentStore,
    dtos: Vec<D>,
) -> anyhow::Result<Vec<String>>
where
    R: Resource + serde::Serialize,
    D: serde::Serialize + Validate + Normalize + Sync,
{
    let repo = Repository::<R>::new(store);
    let mut ids = Vec::with_capacity(dtos.len());

    for mut dto in dtos {
        dto.normalize();
        dto.validate()
            .map_err(|e| AppError::from_validation(&e).error)?;
        let record = repo.create(&dto).await?;
        ids.push(record_id(&record)?);
    }
    Ok(ids)
}

fn record_id<R: serde::Serialize>(record: &R) -> anyhow::Result<String> {
    match serde_json::to_value(record)? {
        Value::Object(map) => map
            .get("_id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("record has no _id")),
        _ => anyhow::bail!("record is not an object"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolmis_db::MemoryStore;

    #[tokio::test]
    async fn test_seed_all_fills_every_resource() {
        let store = MemoryStore::new();
        let config = SeedConfig::new(2).with_students(5).with_teachers(2);

        let report = seed_all(&store, &config).await.unwrap();

        assert_eq!(
            report,
            SeedReport {
                schools: 2,
                levels: 6,
                classes: 12,
                courses: 24,
                teachers: 4,
                students: 10,
            }
        );
        assert_eq!(store.len(Collection::Students), 10);
    }

    #[tokio::test]
    async fn test_clear_all_keeps_users() {
        let store = MemoryStore::with_fallback_account("admin", "admin123", "admin");
        seed_all(&store, &SeedConfig::new(1).with_students(3)).await.unwrap();

        clear_all(&store).await.unwrap();

        let counts = collection_counts(&store).await.unwrap();
        for (collection, count) in counts {
            let expected = if collection == Collection::Users { 1 } else { 0 };
            assert_eq!(count, expected, "{collection}");
        }
    }
}
