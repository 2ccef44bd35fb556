/// Appended to the base URL of a Kiwi site to reach its GraphQL endpoint.
pub const GRAPHQL_PATH: &str = "/api/graphql/";
/// The cookie carrying the session token of an authenticated user.
pub const SESSION_COOKIE: &str = "KIWI_PHPSESSID";
pub(crate) const USER_AGENT: &str = concat!("kiwi-analysis/", env!("CARGO_PKG_VERSION"));

/// Column names of the shaped tables.
pub mod columns {
    pub const NAME: &str = "name";
    pub const REGISTRATION_CREATED: &str = "registrations.created";
    pub const REGISTRATION_DELETED: &str = "registrations.deleted";
    pub const ACTIVITY_START: &str = "activity.start";
}
