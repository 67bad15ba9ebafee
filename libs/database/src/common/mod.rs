//! Common utilities shared across database code

pub mod error;

pub use error::{DatabaseError, DatabaseResult};
