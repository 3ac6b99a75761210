//! mercato-server: marketplace, analytics, and SOAP services
//!
//! Storage sits behind the capability traits in [`store`]; the request
//! workflows in [`workflows`] only ever see those traits. The HTTP and SOAP
//! layers translate requests into workflow calls and errors into responses.

pub mod db;
pub mod error;
pub mod http;
pub mod soap;
pub mod store;
pub mod workflows;

pub use error::{Error, Result, StoreError};
pub use http::{analytics_app, market_app, run_server, soap_app, ServerConfig};
pub use store::{AnalyticsStore, MarketStore, MemoryAnalyticsStore, MemoryStore, PgStore};
