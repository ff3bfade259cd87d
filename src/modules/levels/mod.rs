pub mod controller;
pub mod router;

pub use router::init_levels_router;
