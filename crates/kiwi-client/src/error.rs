use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// returned if the GraphQL endpoint could not be reached
    #[error("could not reach the GraphQL endpoint\nCaused by: {0}")]
    Transport(#[from] reqwest::Error),

    /// returned if the GraphQL endpoint answered with an unsuccessful status code
    #[error("the GraphQL endpoint answered with status {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },

    /// returned if the introspected schema is unusable or a query does not match it
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// returned if the server reported errors while executing a query
    #[error("the GraphQL endpoint rejected the query: {}", .0.join("; "))]
    Graphql(Vec<String>),

    /// returned if an operation needing a session token is called on an anonymous client
    #[error("'{operation}' requires a session token, but the source has none")]
    Unauthorized { operation: &'static str },

    /// returned if the base URL of a source can not be turned into a GraphQL endpoint
    #[error("'{0}' is not a valid URL")]
    InvalidUrl(String),

    /// returned if the session token can not be sent as a cookie
    #[error("the session token contains characters that can not be sent in a cookie")]
    InvalidCredential,
}

#[derive(Error, Debug)]
pub enum SchemaError {
    /// returned if the introspection response could not be turned into a schema
    #[error("could not read the introspected schema: {0}")]
    Introspection(#[from] cynic_introspection::SchemaError),

    /// returned if the introspection response had no data
    #[error("the introspection response contained no schema")]
    MissingData,

    /// returned if a query selects a field the server does not know about
    #[error("the server schema has no field '{field}' on type '{type_name}'")]
    UnknownField { type_name: String, field: String },

    /// returned if one of the fixed query documents can not be parsed
    #[error("the '{operation}' query is not valid GraphQL: {message}")]
    InvalidQuery { operation: &'static str, message: String },

    /// returned if a query selects sub-fields of a type the server does not describe as an object
    #[error("the server schema has no object type '{0}'")]
    UnknownType(String),
}
