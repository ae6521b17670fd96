//! itemdeck server entry point.

#![forbid(unsafe_code)]

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use itemdeck_api::{AppState, Cli, Command, Config, build_router, logging};
use itemdeck_auth::{JwtAuth, PasswordHasher};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.config).context("failed to initialize logging")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(cli.config).await,
        Command::HashPassword { password, cost } => {
            let hasher = cost.map_or_else(PasswordHasher::new, PasswordHasher::with_cost);
            println!("{}", hasher.hash(&password)?);
            Ok(())
        }
        Command::IssueToken { user } => {
            let user: serde_json::Value =
                serde_json::from_str(&user).context("user must be a JSON value")?;
            println!("{}", signer(&cli.config)?.issue_token(user)?);
            Ok(())
        }
        Command::VerifyToken { token } => {
            let user = signer(&cli.config)?.verify_token(&token)?;
            println!("{}", serde_json::to_string_pretty(&user)?);
            Ok(())
        }
    }
}

fn signer(config: &Config) -> Result<JwtAuth> {
    let secret = config
        .secret()
        .context("JWT_SECRET must be set to sign or verify tokens")?;
    Ok(JwtAuth::new(secret))
}

async fn serve(config: Config) -> Result<()> {
    let state = AppState::from_config(&config).context("invalid configuration")?;
    let router = build_router(state);

    tracing::info!(
        api_name = %config.api_name,
        prefix = %config.api_prefix(),
        data_file = %config.data_file.display(),
        production = config.is_production,
        auth_enabled = config.auth_enabled,
        rate_limit = config.rate_limit_per_minute,
        "API started"
    );
    tracing::info!("Localhost Server URL: {:?}", config.localhost_server_url);
    tracing::info!("Development Server URL: {:?}", config.development_server_url);
    tracing::info!("Production Server URL: {:?}", config.production_server_url);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "listening");

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    tracing::info!("API shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
