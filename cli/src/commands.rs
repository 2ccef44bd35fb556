use kiwi_client::Client;
use kiwi_config::Sources;
use kiwi_tabular::Table;

use crate::{
    cli_input::{OutputFormat, RegistrationsCommand, SubCommand},
    dashboard,
    errors::CliError,
    output::report,
};

/// Runs a command that reads from `client`.
pub async fn run(command: SubCommand, client: &Client, format: OutputFormat) -> Result<(), CliError> {
    let table = match command {
        SubCommand::Dashboard => return dashboard::render(client, format).await,
        SubCommand::Admin => {
            let is_admin = client.fetch_admin_flag().await?;

            return match format {
                OutputFormat::Json => report::json(&serde_json::json!({ "is_admin": is_admin })),
                OutputFormat::Table => {
                    report::admin(is_admin);
                    Ok(())
                }
            };
        }
        SubCommand::Activities => client.fetch_activities().await?,
        SubCommand::Registrations(RegistrationsCommand { cumulative: false }) => client.fetch_registrations().await?,
        SubCommand::Registrations(RegistrationsCommand { cumulative: true }) => client.registration_totals().await?,
        SubCommand::Relations => client.fetch_user_relations().await?,
        SubCommand::MyRegistrations => client.fetch_user_registrations().await?,
        SubCommand::Groups => client.fetch_groups().await?,
        // listed without connecting
        SubCommand::Sources => return Ok(()),
    };

    print_table(&table, format)
}

pub fn sources(sources: &Sources, format: OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => report::sources_json(sources),
        OutputFormat::Table => Ok(report::sources(sources)?),
    }
}

fn print_table(table: &Table, format: OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => report::json(table),
        OutputFormat::Table => Ok(report::table(table)?),
    }
}
