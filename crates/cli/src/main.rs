use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

use api_client::{ClientConfig, HttpCandidateClient};
use candidate_model::{
    CategoryCatalog, CategoryKey, FilterUpdate, Filters, PaginationCursor, SelectionSet, SortBy,
    SortOrder,
};
use listing::{ListSession, ListViewState, ListingConfig, LoadOutcome, LoadRequest, Paginator, ResultLoader, UserAction};
use query::build_query;

mod commands;
mod render;

use commands::{Command, HELP, parse_command};

/// Candidates - terminal client for a candidate applications endpoint
#[derive(Parser)]
#[command(name = "candidates")]
#[command(about = "Browse, filter and page through candidate applications", long_about = None)]
struct Cli {
    /// Base URL of the candidates service
    #[arg(long, env = "CANDIDATES_BASE_URL", default_value = "http://localhost:8000", global = true)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "5", global = true)]
    timeout_secs: u64,

    /// JSON file with filter categories (built-in catalog if omitted)
    #[arg(long, global = true)]
    categories: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive listing driven by line commands on stdin
    Browse {
        /// Quiet period before typed search text is applied
        #[arg(long, default_value = "300")]
        debounce_ms: u64,

        /// Go back to page 1 whenever a filter changes
        #[arg(long)]
        reset_page_on_filter_change: bool,
    },

    /// Fetch and print one page of candidates
    List(FilterArgs),

    /// Print the query string a listing would send
    Query(FilterArgs),
}

#[derive(Args)]
struct FilterArgs {
    /// Search by name, position or company
    #[arg(long, default_value = "")]
    search: String,

    #[arg(long = "application-type")]
    application_type: Vec<String>,

    #[arg(long)]
    source: Vec<String>,

    #[arg(long)]
    responsibility: Vec<String>,

    #[arg(long = "pipeline-task")]
    pipeline_tasks: Vec<String>,

    #[arg(long)]
    education: Vec<String>,

    /// Exact job id
    #[arg(long)]
    job_id: Option<String>,

    #[arg(long, value_enum, default_value = "last-activity")]
    sort_by: SortField,

    #[arg(long, value_enum, default_value = "desc")]
    sort_order: Direction,

    /// Page number, starting at 1
    #[arg(long, default_value = "1")]
    page: u32,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortField {
    LastActivity,
    Name,
}

#[derive(Clone, Copy, ValueEnum)]
enum Direction {
    Asc,
    Desc,
}

impl FilterArgs {
    /// Filters for these flags. Options missing from the catalog are sent
    /// anyway; the service decides what they match.
    fn to_filters(&self, catalog: &CategoryCatalog) -> Filters {
        let selections = [
            (CategoryKey::ApplicationType, &self.application_type),
            (CategoryKey::Source, &self.source),
            (CategoryKey::Responsibility, &self.responsibility),
            (CategoryKey::PipelineTasks, &self.pipeline_tasks),
            (CategoryKey::Education, &self.education),
        ];

        let mut filters = Filters::default()
            .apply(FilterUpdate::Search(self.search.clone()))
            .apply(FilterUpdate::JobId(self.job_id.clone()))
            .apply(FilterUpdate::SortBy(match self.sort_by {
                SortField::LastActivity => SortBy::LastActivity,
                SortField::Name => SortBy::Name,
            }))
            .apply(FilterUpdate::SortOrder(match self.sort_order {
                Direction::Asc => SortOrder::Asc,
                Direction::Desc => SortOrder::Desc,
            }));

        for (key, values) in selections {
            if let Some(category) = catalog.get(key) {
                for value in values.iter().filter(|v| !category.options.contains(v)) {
                    warn!("{:?} is not a known {} option", value, category.title);
                }
            }
            let set: SelectionSet = values.iter().cloned().collect();
            filters = filters.apply(FilterUpdate::selection(key, set));
        }

        filters
    }

    fn to_request(&self, catalog: &CategoryCatalog) -> LoadRequest {
        LoadRequest {
            filters: self.to_filters(catalog),
            cursor: PaginationCursor::new(self.page),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr so listings on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let catalog = match &cli.categories {
        Some(path) => CategoryCatalog::load(path)
            .with_context(|| format!("Failed to load categories from {}", path.display()))?,
        None => CategoryCatalog::builtin().context("Built-in category catalog is invalid")?,
    };

    let client_config = ClientConfig {
        base_url: cli.base_url.clone(),
        timeout: Duration::from_secs(cli.timeout_secs),
    };

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Browse {
            debounce_ms,
            reset_page_on_filter_change,
        } => {
            let listing_config = ListingConfig {
                debounce: Duration::from_millis(debounce_ms),
                reset_page_on_filter_change,
            };
            handle_browse(&client_config, &listing_config, catalog).await?
        }
        Commands::List(args) => handle_list(&client_config, &catalog, &args).await?,
        Commands::Query(args) => handle_query(&catalog, &args),
    }

    Ok(())
}

/// Handle the 'browse' command
async fn handle_browse(
    client_config: &ClientConfig,
    listing_config: &ListingConfig,
    catalog: CategoryCatalog,
) -> Result<()> {
    let client = HttpCandidateClient::new(client_config).context("Failed to create HTTP client")?;
    info!("Browsing candidates at {}", client.endpoint());
    println!("{}", HELP.dimmed());

    let (tx, rx) = mpsc::channel(64);
    let input = tokio::spawn(read_commands(tx, catalog));

    let session = ListSession::new(client, listing_config);
    session.run(rx, |view| render::print_session(view)).await;

    input.await.context("Command reader stopped unexpectedly")?
}

/// Read stdin line by line and forward actions until `quit` or EOF.
async fn read_commands(tx: mpsc::Sender<UserAction>, catalog: CategoryCatalog) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("Failed to read from stdin")? {
        match parse_command(&line, &catalog) {
            Ok(Command::Actions(actions)) => {
                for action in actions {
                    if tx.send(action).await.is_err() {
                        return Ok(());
                    }
                }
            }
            Ok(Command::Categories) => render::print_catalog(&catalog),
            Ok(Command::Help) => println!("{}", HELP),
            Ok(Command::Quit) => break,
            Ok(Command::Nothing) => {}
            Err(e) => println!("{} {:#}", "✗".red(), e),
        }
    }

    Ok(())
}

/// Handle the 'list' command
async fn handle_list(client_config: &ClientConfig, catalog: &CategoryCatalog, args: &FilterArgs) -> Result<()> {
    let client = HttpCandidateClient::new(client_config).context("Failed to create HTTP client")?;
    let request = args.to_request(catalog);

    let mut loader = ResultLoader::new();
    loader.load(&client, &request).await;

    if let Some(LoadOutcome::Failed(e)) = loader.last_outcome() {
        return Err(e.clone()).with_context(|| format!("Failed to load candidates from {}", client.endpoint()));
    }

    let snapshot = loader.snapshot();
    let paginator = Paginator::new(request.cursor.current_page(), snapshot.total_pages);
    render::print_listing(&request.filters, snapshot, ListViewState::derive(snapshot), &paginator);

    Ok(())
}

/// Handle the 'query' command
fn handle_query(catalog: &CategoryCatalog, args: &FilterArgs) {
    let request = args.to_request(catalog);
    println!("{}", build_query(&request.filters, &request.cursor).to_query_string());
}
