use std::fmt;

use url::Url;

use crate::{consts::GRAPHQL_PATH, Error};

/// A named Kiwi site, optionally with the session token of a logged-in user.
#[derive(Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Label shown to the user
    pub name: String,
    /// Base URL of the site, without the GraphQL path
    pub url: Url,
    credential: Option<String>,
}

impl EndpointConfig {
    /// An empty token is treated as no token at all.
    pub fn new(name: impl Into<String>, url: Url, credential: Option<String>) -> Self {
        Self {
            name: name.into(),
            url,
            credential: credential.filter(|token| !token.is_empty()),
        }
    }

    /// Parses the base URL first, e.g. as typed in a form.
    pub fn parse(name: impl Into<String>, url: &str, credential: Option<String>) -> Result<Self, Error> {
        let url = Url::parse(url).map_err(|_| Error::InvalidUrl(url.to_owned()))?;

        Ok(Self::new(name, url, credential))
    }

    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    /// The base URL with [`GRAPHQL_PATH`] appended.
    pub fn graphql_url(&self) -> Result<Url, Error> {
        let base = self.url.as_str().trim_end_matches('/');

        Url::parse(&format!("{base}{GRAPHQL_PATH}")).map_err(|_| Error::InvalidUrl(self.url.to_string()))
    }
}

impl fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("name", &self.name)
            .field("url", &self.url.as_str())
            .field("credential", &self.credential.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
