//! Legacy search command line.
//!
//! Reads a JSON criterion tree, translates it for one of the search gateways
//! and prints the SQL with its parameters. With `--execute` the query is
//! run against the database and the matching ids are printed as well.

mod config;

use std::io::Read;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};

use ibexa_legacy_search::backends::sqlite::{
    ContentSearchGateway, ContentTypeGateway, LocationSearchGateway, SearchHits, SqliteDatabase,
};
use ibexa_legacy_search::{ContentTypeCriterion, Criterion, SearchConfig, SqlFragment, SqlParam};

use crate::config::{CliConfig, Family};

#[derive(Debug, Serialize)]
struct Output {
    sql: String,
    params: Vec<SqlParam>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ids: Option<Vec<i64>>,
}

impl Output {
    fn new(fragment: SqlFragment, hits: Option<SearchHits>) -> Self {
        let (total_count, ids) = match hits {
            Some(hits) => (Some(hits.total_count), Some(hits.ids)),
            None => (None, None),
        };
        Self {
            sql: fragment.sql,
            params: fragment.params,
            total_count,
            ids,
        }
    }
}

fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("ibexa_legacy_search={0},legacy_search={0}", level))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn open_database(config: &CliConfig, search: &SearchConfig) -> anyhow::Result<SqliteDatabase> {
    if config.is_memory_database() {
        debug!("Using empty in-memory database");
        return Ok(SqliteDatabase::in_memory()?);
    }

    info!(database = %config.database, "Opening legacy database read-only");
    let db = SqliteDatabase::open_read_only(&config.database, search.database.clone())
        .with_context(|| format!("failed to open database '{}'", config.database))?;
    Ok(db)
}

fn read_criterion(config: &CliConfig) -> anyhow::Result<String> {
    match &config.criterion {
        Some(path) if !config.reads_stdin() => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read criterion file '{}'", path.display())),
        _ => {
            let mut json = String::new();
            std::io::stdin()
                .read_to_string(&mut json)
                .context("failed to read criterion from stdin")?;
            Ok(json)
        }
    }
}

fn parse_criterion(json: &str) -> anyhow::Result<Criterion> {
    let criterion = serde_json::from_str(json).context("invalid criterion")?;
    Ok(criterion)
}

fn run(config: &CliConfig) -> anyhow::Result<Output> {
    let search = match &config.config {
        Some(path) => SearchConfig::from_path(path)?,
        None => SearchConfig::default(),
    };
    let settings = config.language_settings(&search);
    let db = open_database(config, &search)?;
    let json = read_criterion(config)?;

    debug!(family = %config.family, languages = ?settings.languages, "Translating criterion");

    let (fragment, hits) = match config.family {
        Family::ContentType => {
            let criterion: ContentTypeCriterion =
                serde_json::from_str(&json).context("invalid content type criterion")?;
            let gateway = ContentTypeGateway::new(db);
            let fragment = gateway.build(&criterion)?;
            let hits = if config.execute {
                Some(gateway.find(&criterion)?)
            } else {
                None
            };
            (fragment, hits)
        }
        Family::Content => {
            let criterion = parse_criterion(&json)?;
            let context = db.search_context();
            let gateway = ContentSearchGateway::new(db, context);
            let fragment = gateway.build(&criterion, &settings, config.offset, config.limit)?;
            let hits = if config.execute {
                Some(gateway.find(&criterion, &settings, config.offset, config.limit)?)
            } else {
                None
            };
            (fragment, hits)
        }
        Family::Location | Family::Trash => {
            let criterion = parse_criterion(&json)?;
            let context = db.search_context();
            let gateway = if config.family == Family::Trash {
                LocationSearchGateway::trash(db, context)
            } else {
                LocationSearchGateway::new(db, context)
            };
            let fragment = gateway.build(&criterion, &settings, config.offset, config.limit)?;
            let hits = if config.execute {
                Some(gateway.find(&criterion, &settings, config.offset, config.limit)?)
            } else {
                None
            };
            (fragment, hits)
        }
    };

    Ok(Output::new(fragment, hits))
}

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(2);
    }

    let output = run(&config)?;
    if let Some(total_count) = output.total_count {
        info!(total_count, "Search executed");
    }
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
