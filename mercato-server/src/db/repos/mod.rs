//! Repository implementations for database access
//!
//! Each repository borrows the pool, maps rows into domain types, and
//! reports `StoreError`. Absence is `Option`, not an error; callers decide
//! whether that is a 404 or a broken reference.

pub mod analytics;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod users;

pub use analytics::AnalyticsRepo;
pub use orders::OrderRepo;
pub use products::ProductRepo;
pub use reviews::ReviewRepo;
pub use users::UserRepo;
