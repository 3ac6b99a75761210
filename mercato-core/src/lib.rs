//! mercato-core: domain types for the marketplace and analytics services
//!
//! Everything here is plain data plus validation. Storage and transport
//! live in `mercato-server`.

pub mod analytics;
pub mod fields;
pub mod money;
pub mod order;
pub mod password;
pub mod product;
pub mod rating;
pub mod review;
pub mod user;
pub mod validation;

pub use analytics::{AnalyticsRecord, GoalDetails, NewRecord, RecordKind};
pub use fields::Email;
pub use money::{order_total, Money};
pub use order::{NewOrder, Order, OrderChanges, OrderId, OrderPatch, OrderView, PricedProducts};
pub use password::PasswordDigest;
pub use product::{NewProduct, Product, ProductDetail, ProductFilter, ProductId};
pub use rating::{average_score, Score};
pub use review::{NewReview, Review, ReviewId};
pub use user::{NewUser, PublicUser, User, UserId, UserPatch};
pub use validation::ValidationError;
