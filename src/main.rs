use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use moodtube::{
    config::Config,
    models::{Selection, SelectionOptions},
    routes::{create_router, AppState},
    services::{
        client::INCOMPLETE_SELECTION_MESSAGE, proxy::ResultLimits, SearchClient, SearchOutcome,
        SearchSession,
    },
};

/// moodtube - music video search by mood, activity and genre
#[derive(Parser)]
#[command(name = "moodtube")]
#[command(about = "Find music playlists on YouTube that fit your mood", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the search proxy (default)
    Serve,

    /// Search through a running proxy and list the results
    Search {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Number of results to request
        #[arg(long)]
        max: Option<u32>,

        /// Proxy endpoint, overrides PROXY_URL
        #[arg(long)]
        proxy_url: Option<String>,
    },

    /// Print the search query for a selection
    Query {
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// List the known moods, activities and genres
    Options,
}

#[derive(clap::Args)]
struct SelectionArgs {
    /// Mood key, e.g. senang
    #[arg(long)]
    mood: String,

    /// Activity key, e.g. belajar
    #[arg(long)]
    activity: String,

    /// Optional genre key, e.g. lofi
    #[arg(long, default_value = "")]
    genre: String,
}

impl SelectionArgs {
    fn into_selection(self) -> Result<Selection> {
        let selection = Selection::new(self.mood, self.activity, self.genre);
        if !selection.is_complete() {
            bail!(INCOMPLETE_SELECTION_MESSAGE);
        }
        Ok(selection)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new("moodtube=info,tower_http=info")
                }),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Search {
            selection,
            max,
            proxy_url,
        } => search(config, selection.into_selection()?, max, proxy_url).await,
        Commands::Query { selection } => {
            println!("{}", selection.into_selection()?.query());
            Ok(())
        }
        Commands::Options => {
            print_options(&SelectionOptions::known());
            Ok(())
        }
    }
}

async fn serve(config: Config) -> Result<()> {
    if config.api_key().is_none() {
        tracing::warn!("youtube_API is not set; searches will fail until it is provisioned");
    }

    let addr = config.bind_addr();
    let state = AppState::from_config(config).context("Failed to build HTTP client")?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(addr = %addr, "Search proxy listening");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn search(
    config: Config,
    selection: Selection,
    max: Option<u32>,
    proxy_url: Option<String>,
) -> Result<()> {
    let limits = ResultLimits {
        default: config.default_max_results,
        cap: config.max_results_cap,
    };
    let mut client = SearchClient::new(proxy_url.unwrap_or(config.proxy_url.clone()), limits);
    if let Some(timeout) = config.upstream_timeout() {
        client = client.with_timeout(timeout)?;
    }
    tracing::debug!(proxy_url = %client.proxy_url(), "Using search proxy");
    let session = SearchSession::new(client, max.unwrap_or(limits.default));

    println!("Searching: \"{}\" ...", selection.query());
    match session.submit(&selection).await {
        Some(outcome) => render(&outcome),
        None => tracing::debug!("Search superseded"),
    }
    Ok(())
}

fn render(outcome: &SearchOutcome) {
    println!("{}", outcome.status_line());
    for (i, item) in outcome.items().iter().enumerate() {
        println!("{}. {}", i + 1, item.title);
        if !item.channel_title.is_empty() {
            println!("   {}", item.channel_title);
        }
        println!("   {}", item.embed_url());
    }
}

fn print_options(options: &SelectionOptions) {
    println!("moods:      {}", options.moods.join(", "));
    println!("activities: {}", options.activities.join(", "));
    println!("genres:     {}", options.genres.join(", "));
}
