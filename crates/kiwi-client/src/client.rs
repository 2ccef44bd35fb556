use cynic::{GraphQlError, QueryBuilder};
use cynic_introspection::IntrospectionQuery;
use kiwi_tabular::{cumulative_count, flatten, replicate, Scalar, Table, DEFAULT_DELIMITER};
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::{
    consts::{columns, SESSION_COOKIE, USER_AGENT},
    query::{self, Query},
    EndpointConfig, Error, SchemaError, SchemaIndex,
};

/// A GraphQL response body. Unlike [`cynic::GraphQlResponse`] it accepts `data: null` without
/// errors, which Kiwi answers when a root field resolves to nothing.
#[derive(Debug, Deserialize)]
struct Response<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

/// A connection to the GraphQL API of one Kiwi site.
///
/// Whether the client is authenticated is decided once, by the presence of a session token in
/// the [`EndpointConfig`] it was connected with.
#[derive(Debug, Clone)]
pub struct Client {
    name: String,
    endpoint: Url,
    authenticated: bool,
    http: reqwest::Client,
    schema: SchemaIndex,
}

impl Client {
    /// Connects to the source and introspects its schema.
    ///
    /// The session token, if any, is sent as a cookie with every request from here on.
    #[tracing::instrument(skip_all, fields(source = %config.name))]
    pub async fn connect(config: &EndpointConfig) -> Result<Self, Error> {
        let endpoint = config.graphql_url()?;

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = config.credential() {
            let mut cookie =
                HeaderValue::from_str(&format!("{SESSION_COOKIE}={token}")).map_err(|_| Error::InvalidCredential)?;
            cookie.set_sensitive(true);
            headers.insert(header::COOKIE, cookie);
        }

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        let schema = introspect(&http, &endpoint).await?;

        tracing::info!(%endpoint, authenticated = config.is_authenticated(), "connected to Kiwi source");

        Ok(Self {
            name: config.name.clone(),
            endpoint,
            authenticated: config.is_authenticated(),
            http,
            schema,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The GraphQL endpoint every query is posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn schema(&self) -> &SchemaIndex {
        &self.schema
    }

    /// The current activities with their description, author and location.
    #[tracing::instrument(skip(self), fields(source = %self.name))]
    pub async fn fetch_activities(&self) -> Result<Table, Error> {
        let mut data = self.execute(query::ACTIVITIES).await?;

        Ok(flatten(&list_at(&mut data, "/current"), DEFAULT_DELIMITER))
    }

    /// One row per live registration of a current activity, with the columns
    /// [`columns::NAME`] and [`columns::REGISTRATION_CREATED`].
    ///
    /// Registrations carrying a `deleted` marker are left out.
    #[tracing::instrument(skip(self), fields(source = %self.name))]
    pub async fn fetch_registrations(&self) -> Result<Table, Error> {
        let mut data = self.execute(query::REGISTRATIONS).await?;
        let registrations = replicate(list_at(&mut data, "/current"), "registrations");

        let table = flatten(&registrations, DEFAULT_DELIMITER)
            .filter(|row| row.get(columns::REGISTRATION_DELETED).map_or(true, Scalar::is_null))
            .select(&[columns::NAME, columns::REGISTRATION_CREATED])
            .parse_timestamps(columns::REGISTRATION_CREATED);

        tracing::debug!(rows = table.len(), "shaped registrations");

        Ok(table)
    }

    /// The live registrations ordered by creation time, with a running count per activity in
    /// [`kiwi_tabular::COUNT_COLUMN`].
    pub async fn registration_totals(&self) -> Result<Table, Error> {
        let registrations = self.fetch_registrations().await?;

        Ok(cumulative_count(
            &registrations,
            columns::NAME,
            columns::REGISTRATION_CREATED,
        ))
    }

    /// The groups the logged-in user is related to.
    #[tracing::instrument(skip(self), fields(source = %self.name))]
    pub async fn fetch_user_relations(&self) -> Result<Table, Error> {
        self.require_authentication("user relations")?;

        let mut data = self.execute(query::USER_RELATIONS).await?;

        Ok(flatten(&list_at(&mut data, "/user/relations"), DEFAULT_DELIMITER))
    }

    /// The registrations of the logged-in user, with the activity and the price paid.
    #[tracing::instrument(skip(self), fields(source = %self.name))]
    pub async fn fetch_user_registrations(&self) -> Result<Table, Error> {
        self.require_authentication("user registrations")?;

        let mut data = self.execute(query::USER_REGISTRATIONS).await?;
        let table = flatten(&list_at(&mut data, "/user/registrations"), DEFAULT_DELIMITER)
            .parse_timestamps(columns::ACTIVITY_START);

        Ok(table)
    }

    /// Whether the logged-in user is an administrator.
    ///
    /// An anonymous client answers `false` without asking the server.
    #[tracing::instrument(skip(self), fields(source = %self.name))]
    pub async fn fetch_admin_flag(&self) -> Result<bool, Error> {
        if !self.authenticated {
            return Ok(false);
        }

        let data = self.execute(query::ADMIN_FLAG).await?;

        Ok(data.pointer("/user/isAdmin").and_then(Value::as_bool).unwrap_or(false))
    }

    /// All groups known to the site.
    #[tracing::instrument(skip(self), fields(source = %self.name))]
    pub async fn fetch_groups(&self) -> Result<Table, Error> {
        self.require_authentication("groups")?;

        let mut data = self.execute(query::GROUPS).await?;

        Ok(flatten(&list_at(&mut data, "/groups"), DEFAULT_DELIMITER))
    }

    fn require_authentication(&self, operation: &'static str) -> Result<(), Error> {
        if self.authenticated {
            Ok(())
        } else {
            Err(Error::Unauthorized { operation })
        }
    }

    /// Runs one of the fixed queries. A response without data reads as `null`.
    async fn execute(&self, query: Query) -> Result<Value, Error> {
        self.schema.validate(&query)?;

        tracing::debug!(operation = query.operation_name, "sending query");

        let data = post::<Value>(&self.http, &self.endpoint, &query.operation()).await?;

        Ok(data.unwrap_or(Value::Null))
    }
}

async fn introspect(http: &reqwest::Client, endpoint: &Url) -> Result<SchemaIndex, Error> {
    let data = post::<IntrospectionQuery>(http, endpoint, &IntrospectionQuery::build(()))
        .await?
        .ok_or(SchemaError::MissingData)?;

    let schema = data.into_schema().map_err(SchemaError::from)?;

    Ok(schema.into())
}

/// Posts an operation and decodes the response, failing on unsuccessful statuses and on
/// GraphQL errors.
async fn post<T: DeserializeOwned>(
    http: &reqwest::Client,
    endpoint: &Url,
    operation: &impl Serialize,
) -> Result<Option<T>, Error> {
    let response = http.post(endpoint.clone()).json(operation).send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await?;
        return Err(Error::HttpStatus { status, body });
    }

    let Response { data, errors } = response.json::<Response<T>>().await?;

    if let Some(errors) = errors.filter(|errors| !errors.is_empty()) {
        return Err(Error::Graphql(messages(errors)));
    }

    Ok(data)
}

/// Takes the list found at `pointer`. Anything missing or not a list reads as an empty list.
fn list_at(data: &mut Value, pointer: &str) -> Vec<Value> {
    match data.pointer_mut(pointer).map(Value::take) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

fn messages(errors: Vec<GraphQlError>) -> Vec<String> {
    errors.into_iter().map(|error| error.message).collect()
}
