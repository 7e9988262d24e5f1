use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use flightboard_core::EnrichmentConfig;
use flightboard_http::{create_router, AppState};
use flightboard_provider::{DisabledProvider, OpenSkyProvider, RouteProvider};
use flightboard_service::{EnrichmentService, ManualRouteService, RouteResolver};
use flightboard_store::RouteStore;

#[derive(Parser)]
#[command(name = "flightboard")]
#[command(about = "Flight-position enrichment server with a persistent route cache", long_about = None)]
struct Cli {
    /// Path to the route file (defaults to the user data directory).
    #[arg(long)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP enrichment server.
    Serve {
        #[arg(short, long, default_value = "8400")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// List all cached routes.
    Routes,
    /// Insert or replace a manual route.
    AddRoute {
        flight_id: String,
        origin: String,
        destination: String,
    },
}

fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flightboard")
        .join("routes.json")
}

fn build_provider(config: &EnrichmentConfig) -> Result<Arc<dyn RouteProvider>> {
    if !config.provider_enabled {
        tracing::info!("automatic route discovery disabled by configuration");
        return Ok(Arc::new(DisabledProvider));
    }
    let credentials = config.credentials();
    if credentials.is_none() {
        tracing::info!("no OpenSky credentials set, using anonymous call quota");
    }
    let provider = OpenSkyProvider::new(credentials)
        .map_err(|e| anyhow::anyhow!("failed to build OpenSky client: {e}"))?;
    Ok(Arc::new(provider))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let config = EnrichmentConfig::from_env();
    let store_path = cli.store.unwrap_or_else(default_store_path);
    let store = Arc::new(RouteStore::open(&store_path));

    match cli.command {
        Commands::Serve { port, host } => {
            let provider = build_provider(&config)?;
            let resolver = Arc::new(RouteResolver::new(Arc::clone(&store), provider, &config));
            let state = Arc::new(AppState {
                enrichment: EnrichmentService::new(resolver),
                manual: ManualRouteService::new(Arc::clone(&store)),
            });
            let router = create_router(state);
            let addr = format!("{}:{}", host, port);
            tracing::info!(
                store = %store_path.display(),
                routes = store.len(),
                "starting HTTP server on {}",
                addr
            );
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            axum::serve(listener, router).await?;
        }
        Commands::Routes => {
            let routes = ManualRouteService::new(store).list_all();
            println!("{}", serde_json::to_string_pretty(&routes)?);
        }
        Commands::AddRoute { flight_id, origin, destination } => {
            let record = ManualRouteService::new(store)
                .add_or_replace(&flight_id, &origin, &destination)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }

    Ok(())
}
