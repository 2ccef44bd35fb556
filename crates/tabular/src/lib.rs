//! Turns nested GraphQL payloads into flat tables.
//!
//! Payloads are plain [`serde_json::Value`] trees. [`replicate`] un-nests an array field into one
//! record per element, [`flatten`] maps every record to delimiter-joined paths of scalar leaves,
//! and the resulting [`Table`] feeds the analytical helpers such as [`cumulative_count`].

#![cfg_attr(test, allow(unused_crate_dependencies))]

mod aggregate;
mod flatten;
mod replicate;
mod scalar;
mod table;

pub use aggregate::{cumulative_count, value_counts, COUNT_COLUMN};
pub use flatten::{flatten, flatten_record, DEFAULT_DELIMITER, VALUE_COLUMN};
pub use replicate::replicate;
pub use scalar::Scalar;
pub use table::{Record, Table};

/// The raw, arbitrarily nested shape returned by a GraphQL server.
pub type Payload = serde_json::Value;
