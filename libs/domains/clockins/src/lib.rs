//! Clock-In Domain
//!
//! Domain implementation for employee clock-in records stored in MongoDB.
//!
//! Follows the same layering as the items domain: handlers over a service
//! over a repository trait with a MongoDB implementation. Clock-in records
//! differ from items in two ways: the record timestamp is always assigned
//! by the server, and updates are partial merges rather than full replaces.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_clockins::{handlers, mongodb::MongoClockInRepository, service::ClockInService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("mydb");
//!
//! let repository = MongoClockInRepository::new(db);
//! let service = ClockInService::new(repository);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ClockInError, ClockInResult};
pub use handlers::ApiDoc;
pub use models::{ClockIn, ClockInDocument, ClockInFilter, CreateClockIn, UpdateClockIn};
pub use mongodb::MongoClockInRepository;
pub use repository::ClockInRepository;
pub use service::ClockInService;
