//! Request-level operations over an injected store
//!
//! Each workflow borrows a store capability for the duration of one request,
//! performs its read-validate-write-derive sequence, and reports a single
//! `Error` on failure. Nothing is retried or rolled back.

pub mod accounts;
pub mod analytics;
pub mod catalog;
pub mod orders;
pub mod reviews;

pub use accounts::Accounts;
pub use analytics::Collector;
pub use catalog::Catalog;
pub use orders::OrderPricing;
pub use reviews::ReviewAggregation;
