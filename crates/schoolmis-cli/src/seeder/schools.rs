use fake::Fake;
use fake::faker::address::en::{BuildingNumber, CityName, StateAbbr, StreetName, ZipCode};
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use rayon::prelude::*;
use schoolmis_db::DocumentStore;
use schoolmis_models::schools::{CreateSchoolDto, School};
use std::time::Instant;

use super::insert_all;

const KINDS: [&str; 4] = ["High School", "Academy", "Secondary School", "College"];

pub fn generate_schools(count: usize) -> Vec<CreateSchoolDto> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let city: String = CityName().fake();
            let street: String = StreetName().fake();
            let building: String = BuildingNumber().fake();
            let state: String = StateAbbr().fake();
            let zip: String = ZipCode().fake();
            let principal = format!(
                "{} {}",
                FirstName().fake::<String>(),
                LastName().fake::<String>()
            );

            CreateSchoolDto {
                name: Some(format!("{} {}", city, KINDS[i % KINDS.len()])),
                address: Some(format!("{} {}, {}, {} {}", building, street, city, state, zip)),
                phone: Some(PhoneNumber().fake()),
                email: Some(format!("office{}@school.example.org", i + 1)),
                principal_name: Some(principal),
                established_year: Some((1950..2020).fake::<i64>()),
            }
        })
        .collect()
}

pub async fn seed_schools(store: &dyn DocumentStore, count: usize) -> anyhow::Result<Vec<String>> {
    let start_time = Instant::now();
    println!("📚 Seeding {} schools...", count);

    let ids = insert_all::<School, _>(store, generate_schools(count)).await?;

    println!(
        "   ✓ Inserted {} schools in {:?}",
        ids.len(),
        start_time.elapsed()
    );
    Ok(ids)
}
