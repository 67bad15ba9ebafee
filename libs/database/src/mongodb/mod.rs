//! MongoDB database connector and utilities
//!
//! Provides connection management and MongoDB-specific helpers. There is no
//! connection retry: a failed connect at startup is surfaced to the caller,
//! which treats it as fatal.

mod config;
mod connector;
mod health;

pub use config::MongoConfig;
pub use connector::{connect, connect_from_config};
pub use health::{check_health, check_health_detailed, HealthStatus};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
