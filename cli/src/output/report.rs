use std::io;

use chrono::{DateTime, Local};
use cli_table::{Cell, Style, Table as _};
use colored::Colorize;
use kiwi_client::EndpointConfig;
use kiwi_config::Sources;
use kiwi_tabular::{Table, COUNT_COLUMN};
use serde::Serialize;
use url::Url;

use crate::errors::CliError;

/// Width of the longest histogram bar, in characters.
const BAR_WIDTH: u64 = 40;

pub fn source_header(name: &str, endpoint: &Url, at: DateTime<Local>) -> String {
    format!(
        "Source: {name} - {} - API address: {endpoint}",
        at.format("%d-%m-%Y %H:%M:%S")
    )
}

/// reports to stdout which source is shown
pub fn header(name: &str, endpoint: &Url) {
    println!("{}\n", source_header(name, endpoint, Local::now()).dimmed());
}

pub fn section(title: &str) {
    println!("{}", title.bold());
}

/// reports an error to stderr
pub fn error(error: &CliError) {
    eprintln!("{}", format!("Error: {error}").bright_red());

    if let Some(hint) = error.to_hint() {
        eprintln!("{}", format!("Hint: {hint}").bright_blue());
    }
}

pub fn render_table(table: &Table) -> io::Result<String> {
    let rows = table
        .rows()
        .iter()
        .map(|row| row.values().map(|value| value.to_string().cell()).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    let title = table.columns().iter().map(|column| column.cell().bold(true));

    Ok(rows.table().title(title).display()?.to_string())
}

pub fn table(table: &Table) -> io::Result<()> {
    if table.is_empty() {
        println!("{}\n", "nothing to show".dimmed());
        return Ok(());
    }

    println!("{}\n", render_table(table)?);

    Ok(())
}

/// One line per row of a [`kiwi_tabular::value_counts`] table: the label, a bar scaled to the
/// largest count and the count itself.
pub fn histogram_lines(counts: &Table, label: &str) -> Vec<(String, String, u64)> {
    let bars = counts
        .rows()
        .iter()
        .map(|row| {
            let label = row.get(label).map(ToString::to_string).unwrap_or_default();
            let count = row.get(COUNT_COLUMN).and_then(|count| count.as_u64()).unwrap_or(0);
            (label, count)
        })
        .collect::<Vec<_>>();

    let max = bars.iter().map(|(_, count)| *count).max().unwrap_or(0);

    bars.into_iter()
        .map(|(label, count)| {
            let width = match max {
                0 => 0,
                max => (count * BAR_WIDTH / max).max(u64::from(count > 0)),
            };
            let bar = "█".repeat(usize::try_from(width).unwrap_or(0));

            (label, bar, count)
        })
        .collect()
}

pub fn histogram(counts: &Table, label: &str) {
    let lines = histogram_lines(counts, label);

    if lines.is_empty() {
        println!("{}\n", "nothing to show".dimmed());
        return;
    }

    let label_width = lines.iter().map(|(label, _, _)| label.chars().count()).max().unwrap_or(0);

    for (label, bar, count) in lines {
        println!("{label:<label_width$}  {} {count}", bar.cyan());
    }

    println!();
}

pub fn admin(is_admin: bool) {
    if is_admin {
        println!("{}", "the logged-in user is an administrator".green());
    } else {
        println!("the logged-in user is not an administrator");
    }
}

#[derive(Serialize)]
struct SourceSummary<'a> {
    name: &'a str,
    url: &'a str,
    authenticated: bool,
}

impl<'a> From<&'a EndpointConfig> for SourceSummary<'a> {
    fn from(source: &'a EndpointConfig) -> Self {
        Self {
            name: &source.name,
            url: source.url.as_str(),
            authenticated: source.is_authenticated(),
        }
    }
}

pub fn sources(sources: &Sources) -> io::Result<()> {
    if sources.is_empty() {
        println!("{}", "no sources are configured".dimmed());
        return Ok(());
    }

    let rows = sources
        .iter()
        .map(|source| {
            let authenticated = if source.is_authenticated() { "yes" } else { "no" };
            vec![source.name.clone().cell(), source.url.to_string().cell(), authenticated.cell()]
        })
        .collect::<Vec<_>>();

    let title = ["name", "url", "session token"].map(|title| title.cell().bold(true));

    println!("{}", rows.table().title(title).display()?);

    Ok(())
}

pub fn sources_json(sources: &Sources) -> Result<(), CliError> {
    json(&sources.iter().map(SourceSummary::from).collect::<Vec<_>>())
}

pub fn json(value: &impl Serialize) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use kiwi_tabular::{value_counts, Record, Scalar};

    use super::*;

    fn names(names: &[&str]) -> Table {
        let rows = names
            .iter()
            .map(|name| Record::from([("name".to_owned(), Scalar::from(*name))]))
            .collect();

        Table::from_records(rows)
    }

    #[test]
    fn header_names_source_time_and_address() {
        let at = Local.with_ymd_and_hms(2021, 9, 1, 9, 5, 3).unwrap();
        let endpoint = Url::parse("https://kiwi.website.com/api/graphql/").unwrap();

        assert_eq!(
            source_header("Website", &endpoint, at),
            "Source: Website - 01-09-2021 09:05:03 - API address: https://kiwi.website.com/api/graphql/"
        );
    }

    #[test]
    fn bars_scale_to_the_largest_count() {
        let counts = value_counts(&names(&["Yoga", "Run", "Yoga", "Yoga", "Yoga"]), "name");

        let lines = histogram_lines(&counts, "name");

        assert_eq!(lines[0], ("Yoga".to_owned(), "█".repeat(40), 4));
        assert_eq!(lines[1], ("Run".to_owned(), "█".repeat(10), 1));
    }

    #[test]
    fn small_counts_still_get_a_bar() {
        let mut activities = vec!["Yoga"; 100];
        activities.push("Chess");

        let lines = histogram_lines(&value_counts(&names(&activities), "name"), "name");

        assert_eq!(lines[1].1, "█");
    }

    #[test]
    fn tables_render_every_column() {
        let rendered = render_table(&names(&["Yoga", "Run"])).unwrap();

        assert!(rendered.contains("name"));
        assert!(rendered.contains("Yoga"));
        assert!(rendered.contains("Run"));
    }
}
