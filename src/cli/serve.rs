//! Serve command implementation

use crate::agent::create_agent;
use crate::api::{create_router, AppState};
use crate::catalog::Catalog;
use crate::cli::ServeArgs;
use crate::config::{DishpickConfig, LogFormat};
use crate::recommend::Recommender;
use crate::resolver::IntentResolver;
use crate::selector::RuleSelector;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Load configuration from a file (if present) plus environment overrides.
pub fn load_config(path: &Path) -> Result<DishpickConfig, Box<dyn std::error::Error>> {
    let config = if path.exists() {
        DishpickConfig::load(Some(path))?
    } else {
        tracing::debug!("Config file not found, using defaults");
        DishpickConfig::default()
    };
    Ok(config.with_env_overrides())
}

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(
    args: &ServeArgs,
) -> Result<DishpickConfig, Box<dyn std::error::Error>> {
    let mut config = load_config(&args.config)?;

    // Apply CLI overrides (highest priority)
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }
    if args.no_llm {
        config.llm.enabled = false;
    }

    Ok(config)
}

/// Initialize tracing based on configuration
pub fn init_tracing(
    config: &crate::config::LoggingConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter_str = crate::logging::build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    if config.enable_content_logging {
        eprintln!("WARNING: Content logging is enabled. Guest queries will be logged.");
        eprintln!("         This may include sensitive data. Use only for debugging.");
    }

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?;
        }
    }

    Ok(())
}

/// Build the recommendation pipeline described by the configuration.
///
/// The resolver is only wired in when the model is enabled and its API key
/// is present; otherwise every query is answered from the rules.
pub fn build_recommender(
    config: &DishpickConfig,
) -> Result<Recommender, Box<dyn std::error::Error>> {
    let catalog = Catalog::load_or_builtin(config.catalog.path.as_deref())?;
    tracing::info!(
        dishes = catalog.len(),
        source = %config
            .catalog
            .path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in".to_string()),
        "Loaded catalog"
    );

    let selector = RuleSelector::default();
    let resolver = build_resolver(config, &selector)?;

    let mut recommender = Recommender::new(Arc::new(catalog), selector, resolver);
    if config.logging.enable_content_logging {
        recommender = recommender.with_query_logging(config.logging.query_preview_chars);
    }
    Ok(recommender)
}

fn build_resolver(
    config: &DishpickConfig,
    selector: &RuleSelector,
) -> Result<Option<IntentResolver>, Box<dyn std::error::Error>> {
    if !config.llm.enabled {
        tracing::info!("Language model disabled, answering from rules");
        return Ok(None);
    }

    let Some(api_key) = config.llm.api_key() else {
        tracing::warn!(
            env = %config.llm.api_key_env,
            "API key not set, answering from rules"
        );
        return Ok(None);
    };

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.server.request_timeout_seconds))
        .pool_max_idle_per_host(10)
        .build()?;
    let agent = create_agent(&config.llm, api_key, Arc::new(client))?;

    tracing::info!(agent = %agent.name(), "Language model enabled");
    Ok(Some(IntentResolver::from_config(
        agent,
        &config.llm,
        *selector.thresholds(),
    )))
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }

    cancel_token.cancel();
}

/// Main serve command handler
pub async fn run_serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load and merge configuration
    let config = load_config_with_overrides(&args)?;
    config.validate()?;

    // 2. Initialize tracing
    init_tracing(&config.logging)?;

    tracing::info!("Starting Dishpick server");
    tracing::debug!(?config, "Loaded configuration");

    // 3. Build the pipeline; a broken catalog is fatal here, never per request
    let recommender = Arc::new(build_recommender(&config)?);

    // 4. Build API router
    let app_state = Arc::new(AppState::new(recommender, Arc::new(config.clone())));
    let app = create_router(app_state);

    // 5. Bind and serve
    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!(addr = %addr, "Dishpick API server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let cancel_token = CancellationToken::new();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel_token.clone()))
        .await?;

    tracing::info!("Dishpick server stopped");
    Ok(())
}
