//! Route handlers organized by resource

pub mod analytics;
pub mod health;
pub mod openapi;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod users;
