//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OrderArg, OutputFormat};
use crate::config::LogglyConfig;
use crate::error::{Error, Result};
use crate::search::{EventPayload, LogglyClient, SearchQuery};
use crate::types::{EventRecord, Record};
use futures::StreamExt;
use std::io::{BufWriter, Write};
use std::time::Instant;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Search {
                query,
                from,
                until,
                order,
                size,
                max_records,
            } => {
                let query = build_query(query, from.as_deref(), until.as_deref(), *order, *size);
                self.search(query, *max_records).await
            }
            Commands::Send {
                message,
                tags,
                json,
            } => self.send(message, tags, *json).await,
        }
    }

    /// Load configuration from the file (if any) and the environment
    fn load_config(&self) -> Result<LogglyConfig> {
        match &self.cli.config {
            Some(path) => LogglyConfig::from_file(path)?.merge_env(),
            None => LogglyConfig::from_env(),
        }
    }

    async fn search(&self, query: SearchQuery, max_records: Option<usize>) -> Result<()> {
        let client = LogglyClient::new(self.load_config()?)?;
        let start = Instant::now();

        let pager = client.search(query).await?;
        let total = pager.count();
        info!("Search matched {} records", total);

        let mut stream = Box::pin(pager.into_stream().take(max_records.unwrap_or(usize::MAX)));
        let mut out = BufWriter::new(std::io::stdout());

        let mut printed = 0usize;
        while let Some(record) = stream.next().await {
            let record = record?;
            writeln!(out, "{}", format_record(&record, self.cli.format)?)?;
            printed += 1;
        }
        out.flush()?;

        eprintln!(
            "{printed} of {total} records in {:.2}s",
            start.elapsed().as_secs_f64()
        );
        Ok(())
    }

    async fn send(&self, message: &str, tags: &[String], json: bool) -> Result<()> {
        let client = LogglyClient::new(self.load_config()?)?;

        let payload = if json {
            EventPayload::Json(serde_json::from_str(message)?)
        } else {
            EventPayload::from(message)
        };
        let tags: Vec<&str> = tags.iter().map(String::as_str).collect();

        client.send_event(payload, &tags).await?;
        eprintln!("Event sent");
        Ok(())
    }
}

fn build_query(
    q: &str,
    from: Option<&str>,
    until: Option<&str>,
    order: Option<OrderArg>,
    size: Option<u32>,
) -> SearchQuery {
    let mut query = SearchQuery::new(q);
    if let Some(from) = from {
        query = query.from(from);
    }
    if let Some(until) = until {
        query = query.until(until);
    }
    if let Some(order) = order {
        query = query.order(order.into());
    }
    if let Some(size) = size {
        query = query.size(size);
    }
    query
}

/// Render one record for output
pub fn format_record(record: &Record, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string(record).map_err(Error::from),
        OutputFormat::Pretty => {
            let event = EventRecord::from_record(record);
            Ok(format!(
                "{:<25} {:<20} [{}] {}",
                event.timestamp().unwrap_or("-"),
                event.host().unwrap_or("-"),
                event.tags.join(","),
                event.logmsg.as_deref().unwrap_or("")
            ))
        }
    }
}
