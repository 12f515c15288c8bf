// src/main.rs

use assessment_core::config::{Config, DEFAULT_RECENT_RESULTS};
use assessment_core::models::admin::AdminSeed;
use assessment_core::services::stats;
use assessment_core::store::Store;
use dotenvy::dotenv;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Startup failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open_dir(&config.data_dir).await?;
    tracing::info!("Collection store opened at {}", config.data_dir.display());

    if config.uses_default_admin_password() {
        tracing::warn!("ADMIN_PASSWORD not set, seeding admin with the default password");
    }

    let seed = AdminSeed {
        username: config.admin_username.clone(),
        password: config.admin_password.clone(),
    };
    store.initialize_defaults(&seed).await?;
    tracing::info!("Collections initialized.");

    let dashboard = stats::dashboard_stats(&store).await;
    tracing::info!(
        "{} tests ({} active), {} users, {} submissions, average score {}",
        dashboard.total_tests,
        dashboard.active_tests,
        dashboard.total_users,
        dashboard.total_submissions,
        dashboard.average_score
    );

    for recent in stats::recent_results(&store, DEFAULT_RECENT_RESULTS).await {
        tracing::info!(
            "{} | {} | {} | {:.1}",
            recent.record.submitted_at.format("%Y-%m-%d %H:%M"),
            recent.user_name,
            recent.test_title,
            recent.record.score
        );
    }

    Ok(())
}
