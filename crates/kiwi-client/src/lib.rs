//! Client for the GraphQL API of a Kiwi activity registration site.
//!
//! A [`Client`] is built from an [`EndpointConfig`]. Without a session token it runs anonymously
//! and can only read public data such as the current activities and their registrations. With a
//! token it may also read the user's groups, registrations and the list of all groups. Every
//! fetch issues one fixed query, validated against the schema the server reported when the
//! client connected, and shapes the response into a [`Table`].

#![cfg_attr(test, allow(unused_crate_dependencies))]

mod client;
mod consts;
mod endpoint;
mod error;
mod query;
mod schema;

pub use client::Client;
pub use consts::{columns, GRAPHQL_PATH, SESSION_COOKIE};
pub use endpoint::EndpointConfig;
pub use error::{Error, SchemaError};
pub use kiwi_tabular::{Record, Scalar, Table};
pub use schema::SchemaIndex;
