mod error;
mod paths;
mod print;
mod settings;

use std::fs;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use log::info;
use rbac_lib::AdminClient;
use rbac_lib::RetryConfig;
use rbac_lib::api::Direction;
use rbac_lib::config::TableConfig;
use rbac_lib::export::DirectorySink;
use rbac_lib::export::ExportTarget;
use rbac_lib::model::RecordId;
use rbac_lib::presets;
use rbac_lib::render::NO_RESULTS;
use rbac_lib::render::render_headers;
use rbac_lib::render::render_rows;
use rbac_lib::table::DataTable;
use rbac_lib::table::FetchOutcome;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

use crate::error::Error;
use crate::settings::Settings;

/// Browse and export the users, roles and permissions of an RBAC admin panel.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Resource to list: users, roles or permissions.
    #[arg(default_value = "users")]
    resource: String,

    /// Admin panel root URL.
    #[arg(short = 'u', long)]
    base_url: Option<String>,

    /// Bearer token sent with every request.
    #[arg(long)]
    token: Option<String>,

    #[arg(short, long, default_value_t = 1)]
    page: u32,

    #[arg(short = 'n', long)]
    per_page: Option<u32>,

    /// Global search text.
    #[arg(short, long)]
    search: Option<String>,

    /// Ordering as `column:asc` or `column:desc`.
    #[arg(long)]
    sort: Option<String>,

    /// Ids to select for export, comma separated.
    #[arg(long, value_delimiter = ',')]
    select: Vec<String>,

    /// Select every row of the page.
    #[arg(long)]
    select_all: bool,

    /// Export the selection: copy, pdf, excel or csv.
    #[arg(short, long)]
    export: Option<ExportTarget>,

    /// Directory for exported files.
    #[arg(short, long)]
    out: Option<PathBuf>,

    #[arg(long)]
    log_level: Option<LevelFilter>,

    /// Settings file; defaults to settings.json in the config directory.
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn init_logging(level: LevelFilter) -> Result<(), Error> {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| Error::Logging(e.to_string()))?;
    }
    let file = File::create(&path).map_err(|e| Error::Logging(e.to_string()))?;
    WriteLogger::init(level, Config::default(), file).map_err(|e| Error::Logging(e.to_string()))
}

fn parse_sort(sort: &str) -> Result<(&str, Direction), Error> {
    let invalid = || Error::InvalidSort(sort.to_string());
    let (column, direction) = sort.split_once(':').ok_or_else(invalid)?;
    let direction: Direction = direction.parse().map_err(|_| invalid())?;
    if column.is_empty() {
        return Err(invalid());
    }
    Ok((column, direction))
}

fn parse_id(raw: &str) -> RecordId {
    raw.parse::<i64>().map(RecordId::Int).unwrap_or_else(|_| RecordId::from(raw))
}

/// Outer bound for one fetch: every attempt may run to the request timeout,
/// plus the backoff between attempts.
fn fetch_budget(request_timeout: Duration, retry: &RetryConfig) -> Duration {
    (0..retry.max_retries).fold(request_timeout, |total, attempt| {
        total + request_timeout + retry.backoff(attempt)
    })
}

fn check(outcome: FetchOutcome) -> Result<(), Error> {
    match outcome {
        FetchOutcome::Failed(e) => Err(e.into()),
        _ => Ok(()),
    }
}

async fn load(table: &DataTable, args: &Args) -> Result<(), Error> {
    let mut fetched = false;
    if let Some(sort) = &args.sort {
        let (column, direction) = parse_sort(sort)?;
        check(table.set_sort(column, direction).await?)?;
        fetched = true;
    }
    if let Some(search) = &args.search {
        check(table.set_global_filter(search.as_str()).await)?;
        fetched = true;
    }
    if !fetched {
        check(table.fetch().await)?;
    }
    // The page is clamped against the loaded total, so it goes last.
    if args.page > 1 {
        check(table.set_page(args.page).await)?;
    }
    Ok(())
}

async fn run() -> Result<(), Error> {
    let args = Args::parse();

    let settings_path = args.settings.clone().or_else(paths::settings_file);
    let settings = match &settings_path {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let level = args
        .log_level
        .or_else(|| settings.log_level.parse().ok())
        .unwrap_or(LevelFilter::Info);
    init_logging(level)?;

    let base_url = args.base_url.clone().or(settings.base_url.clone()).ok_or_else(|| {
        let shown = settings_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "settings.json".to_string());
        Error::MissingBaseUrl(shown)
    })?;

    let timeout = Duration::from_secs(settings.timeout_secs);
    let retry = RetryConfig::default();
    let fetch_timeout = fetch_budget(timeout, &retry);
    let mut builder = AdminClient::builder().url(base_url).timeout(timeout).retry(retry);
    if let Some(token) = args.token.clone().or(settings.token.clone()) {
        builder = builder.bearer_token(token);
    }
    let client = builder.build()?;

    let preset = presets::by_name(&args.resource).ok_or_else(|| Error::UnknownResource(args.resource.clone()))?;
    let config = TableConfig::default()
        .with_per_page(args.per_page.unwrap_or(settings.per_page))
        .with_fetch_timeout(fetch_timeout);
    let endpoint = Arc::new(preset.endpoint(client));
    let (table, parts) = preset.into_table(endpoint, config);

    info!("listing {} page {}", parts.resource.name(), args.page);
    load(&table, &args).await?;

    if args.select_all {
        table.toggle_all_page(true);
    }
    for raw in &args.select {
        let id = parse_id(raw);
        if !table.set_row_selected(&id, true) && !table.snapshot().selection.is_selected(&id) {
            eprintln!("Id {} is not on this page", id);
        }
    }

    let snapshot = table.snapshot();
    let headers = render_headers(&snapshot, table.columns());
    let rows = render_rows(&snapshot, table.columns(), &parts.resource);
    print!("{}", print::table(&headers, &rows, NO_RESULTS));
    println!("{}", table.controls().info);

    if let Some(target) = args.export {
        let dir = args
            .out
            .clone()
            .or(settings.export_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));
        let mut sink = DirectorySink::new(dir);
        let result = table.export(target, parts.formatter.as_ref(), parts.resource.name(), &mut sink);
        for path in sink.written() {
            println!("Wrote {}", path.display());
        }
        for notice in table.take_notices() {
            println!("{}", notice);
        }
        result?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
