//! Pricing module - the NAV lookup consumed by SIP execution.
//!
//! Prices are sourced elsewhere; this crate only reads them through
//! [`PriceProviderTrait`].

mod pricing_model;
mod pricing_traits;

pub use pricing_model::PriceQuote;
pub use pricing_traits::PriceProviderTrait;
