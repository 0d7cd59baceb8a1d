use std::path::Path;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use relay_provider::{DynDelivery, LogDelivery};
use relay_server::binder::{BindReport, RouteBinder};
use relay_server::config::RelayConfig;
use relay_slack::{SlackConfig, SlackWebhookClient};

/// Relays GLPI ticket notifications to Slack incoming webhooks.
#[derive(Parser, Debug)]
#[command(name = "glpi-relay", version, about)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "relay.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate the configuration, print the routes it would serve, then exit.
    Check,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_found = Path::new(&cli.config).exists();
    let config = if config_found {
        RelayConfig::from_file(&cli.config)?
    } else {
        RelayConfig::default()
    };

    let telemetry_guard = relay_server::telemetry::init(&config.telemetry);

    if !config_found {
        info!(path = %cli.config, "config file not found, using defaults");
    }

    let bindings = config.list_bindings();
    let delivery: Arc<dyn DynDelivery> = if config.delivery.dry_run {
        warn!("dry run enabled, notifications are logged and not sent");
        Arc::new(LogDelivery::default())
    } else {
        let slack_config = SlackConfig::default().with_timeout_secs(config.delivery.timeout_seconds);
        Arc::new(SlackWebhookClient::new(slack_config)?)
    };
    let binder = RouteBinder::new(delivery, config.render.ticket_base_url.clone());
    let (app, report) = relay_server::api::router(&binder, &bindings);

    if let Some(Commands::Check) = cli.command {
        print_report(&report);
        telemetry_guard.shutdown();
        return if report.skipped.is_empty() {
            Ok(())
        } else {
            Err(format!("{} webhook binding(s) rejected", report.skipped.len()).into())
        };
    }

    if report.registered.is_empty() {
        warn!("no webhook bindings registered, only /health is served");
    }

    let host = cli.host.unwrap_or(config.server.host);
    let port = cli.port.unwrap_or(config.server.port);
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        address = %addr,
        routes = report.registered.len(),
        "glpi-relay listening"
    );

    // In-flight requests finish before `serve` returns.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    telemetry_guard.shutdown();
    info!("glpi-relay shut down");
    Ok(())
}

fn print_report(report: &BindReport) {
    for (endpoint, route) in &report.registered {
        println!("POST {endpoint} -> {route}");
    }
    for skipped in &report.skipped {
        println!("skipped {}: {}", skipped.name, skipped.reason);
    }
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM, then return to trigger graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
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
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("received SIGINT"); }
        () = terminate => { info!("received SIGTERM"); }
    }
}
