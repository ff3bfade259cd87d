pub mod controller;
pub mod router;

pub use router::init_schools_router;
