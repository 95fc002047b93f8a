//! Bite Storefront - order intake service.
//!
//! Serves the intake API and the static frontend on port 5000.
//!
//! # Architecture
//!
//! - `POST /api/customer` and `POST /api/order` write to `PostgreSQL`
//! - Every other path serves the static frontend, falling back to the entry
//!   page (`login.html`)
//! - Errors go to Sentry when `SENTRY_DSN` is set
//!
//! Migrations are not run on startup: `cargo run -p bite-cli -- migrate`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::borrow::Cow;
use std::sync::Arc;

use bite_storefront::config::StorefrontConfig;
use bite_storefront::db::{self, PgIntakeStore};
use bite_storefront::routes;
use bite_storefront::state::AppState;
use sentry::integrations::tracing::{self as sentry_tracing, EventFilter};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "bite_storefront=info,tower_http=debug";

/// Start Sentry when a DSN is configured. The guard must outlive the server.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_deref()?;

    let options = sentry::ClientOptions {
        release: sentry::release_name!(),
        environment: config.sentry_environment.clone().map(Cow::Owned),
        sample_rate: config.sentry_sample_rate,
        traces_sample_rate: config.sentry_traces_sample_rate,
        attach_stacktrace: true,
        ..Default::default()
    };

    Some(sentry::init((dsn, options)))
}

/// Warnings and errors become Sentry events; info and debug become breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> EventFilter {
    let level = *metadata.level();
    if level <= tracing::Level::WARN {
        EventFilter::Event
    } else if level <= tracing::Level::DEBUG {
        EventFilter::Breadcrumb
    } else {
        EventFilter::Ignore
    }
}

/// Install the global subscriber: `RUST_LOG` filter, fmt output, Sentry layer.
fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Sentry first so the tracing layer has a client to report to
    let sentry_guard = init_sentry(&config);
    init_tracing();
    if sentry_guard.is_some() {
        tracing::info!("Sentry initialized");
    }

    let pool = db::create_pool(&config.database_url, config.db_max_connections)
        .await
        .expect("Failed to create database pool");
    tracing::info!(
        max_connections = config.db_max_connections,
        "Database pool created"
    );

    let store = Arc::new(PgIntakeStore::new(pool));
    let app = routes::app(AppState::new(config.site.clone(), store))
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    tracing::info!(
        %addr,
        public_dir = %config.site.public_dir.display(),
        entry_page = %config.site.entry_page,
        "storefront listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("storefront stopped");
}

/// Resolve on Ctrl+C, or on SIGTERM where available.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut terminate =
            signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result.expect("Failed to listen for Ctrl+C");
                tracing::info!(signal = "SIGINT", "shutting down");
            }
            _ = terminate.recv() => {
                tracing::info!(signal = "SIGTERM", "shutting down");
            }
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        tracing::info!(signal = "ctrl-c", "shutting down");
    }
}
