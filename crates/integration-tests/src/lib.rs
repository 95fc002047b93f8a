//! Integration tests for the Bite storefront.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process tests (no database needed)
//! cargo test -p bite-integration-tests
//!
//! # Including the PostgreSQL tests
//! STOREFRONT_DATABASE_URL=postgres://localhost/bite_test \
//!     cargo test -p bite-integration-tests -- --include-ignored
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Cart client against a live intake server (in-memory store)
//! - `postgres_intake` - Intake service against `PostgreSQL` (ignored by default)

use std::net::SocketAddr;
use std::sync::Arc;

use url::Url;

use bite_storefront::config::SiteConfig;
use bite_storefront::db::IntakeStore;
use bite_storefront::routes;
use bite_storefront::state::AppState;

/// A storefront server running on an ephemeral local port.
pub struct TestServer {
    addr: SocketAddr,
    task: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Serve the full storefront app over `store`.
    pub async fn start(store: Arc<dyn IntakeStore>) -> Self {
        Self::start_with_site(store, SiteConfig::default()).await
    }

    /// Serve the full storefront app over `store` with a custom static site.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start_with_site(store: Arc<dyn IntakeStore>, site: SiteConfig) -> Self {
        let app = routes::app(AppState::new(site, store));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, task }
    }

    /// Base URL of the server.
    ///
    /// # Panics
    ///
    /// Never in practice: a socket address always forms a valid URL.
    #[must_use]
    pub fn url(&self) -> Url {
        format!("http://{}", self.addr)
            .parse()
            .expect("Socket address is a valid URL")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
