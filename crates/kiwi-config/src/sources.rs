use indexmap::IndexMap;
use kiwi_client::EndpointConfig;

use crate::{Config, SourceError};

/// The saved endpoints of one dashboard session, by name.
///
/// Sources only live as long as the process. Nothing is written back to the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sources {
    entries: IndexMap<String, EndpointConfig>,
}

impl Sources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves a source, replacing any source with the same name.
    pub fn add(&mut self, source: EndpointConfig) {
        if let Some(previous) = self.entries.insert(source.name.clone(), source) {
            tracing::debug!(source = %previous.name, "replaced saved source");
        }
    }

    /// Removes a source, keeping the order of the others.
    pub fn remove(&mut self, name: &str) -> Option<EndpointConfig> {
        self.entries.shift_remove(name)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&EndpointConfig> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EndpointConfig> + '_ {
        self.entries.values()
    }

    /// Picks the source to show.
    ///
    /// A name must match a saved source. Without a name, a single saved source is picked on its
    /// own, no source gives `None` and more than one is ambiguous.
    pub fn select(&self, name: Option<&str>) -> Result<Option<&EndpointConfig>, SourceError> {
        if let Some(name) = name {
            return self
                .get(name)
                .map(Some)
                .ok_or_else(|| SourceError::Unknown(name.to_owned()));
        }

        match self.entries.len() {
            0 => Ok(None),
            1 => Ok(self.entries.values().next()),
            _ => Err(SourceError::Ambiguous(self.names().map(str::to_owned).collect())),
        }
    }
}

impl From<&Config> for Sources {
    fn from(config: &Config) -> Self {
        let mut sources = Self::new();

        for (name, source) in &config.sources {
            sources.add(EndpointConfig::new(name.clone(), source.url.clone(), source.token.clone()));
        }

        sources
    }
}
