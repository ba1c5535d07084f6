//! SQLite-backed NAV lookup.

mod model;
mod repository;

pub use model::MutualFundPriceDB;
pub use repository::PriceRepository;
