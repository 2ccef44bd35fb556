use kiwi_client::{columns, Client};
use kiwi_tabular::{cumulative_count, value_counts, Table};
use serde::Serialize;

use crate::{cli_input::OutputFormat, errors::CliError, output::report};

/// Everything the dashboard shows for one source.
#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub source: String,
    pub endpoint: String,
    pub registrations: Table,
    pub registrations_per_activity: Table,
    pub running_totals: Table,
    /// Only read for an authenticated source
    pub groups: Option<Table>,
}

impl Dashboard {
    /// Fetches the registrations, and the groups if the client is authenticated.
    #[tracing::instrument(skip_all, fields(source = client.name()))]
    pub async fn fetch(client: &Client) -> Result<Self, CliError> {
        let registrations = client.fetch_registrations().await?;

        let groups = if client.is_authenticated() {
            Some(client.fetch_groups().await?)
        } else {
            None
        };

        Ok(Self::new(client, registrations, groups))
    }

    fn new(client: &Client, registrations: Table, groups: Option<Table>) -> Self {
        let registrations_per_activity = value_counts(&registrations, columns::NAME);
        let running_totals = cumulative_count(&registrations, columns::NAME, columns::REGISTRATION_CREATED);

        Self {
            source: client.name().to_owned(),
            endpoint: client.endpoint().to_string(),
            registrations,
            registrations_per_activity,
            running_totals,
            groups,
        }
    }
}

/// Fetches fresh data and renders the whole dashboard once.
pub async fn render(client: &Client, format: OutputFormat) -> Result<(), CliError> {
    let dashboard = Dashboard::fetch(client).await?;

    match format {
        OutputFormat::Json => report::json(&dashboard),
        OutputFormat::Table => {
            report::header(client.name(), client.endpoint());

            report::section("Registrations");
            report::table(&dashboard.registrations)?;

            report::section("Registrations per activity");
            report::histogram(&dashboard.registrations_per_activity, columns::NAME);

            report::section("Registrations over time");
            report::table(&dashboard.running_totals)?;

            if let Some(groups) = &dashboard.groups {
                report::section("Groups");
                report::table(groups)?;
            }

            Ok(())
        }
    }
}
