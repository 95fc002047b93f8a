//! Static site serving.
//!
//! Files under the public directory are served as-is. Any other path falls
//! back to the entry page so client-side navigation keeps working after a
//! reload.

use tower_http::services::{ServeDir, ServeFile};

use crate::config::SiteConfig;

/// Service serving the entry page itself.
#[must_use]
pub fn entry_page(site: &SiteConfig) -> ServeFile {
    ServeFile::new(site.entry_path())
}

/// Service serving the public directory, falling back to the entry page.
#[must_use]
pub fn site_service(site: &SiteConfig) -> ServeDir<ServeFile> {
    ServeDir::new(&site.public_dir)
        .append_index_html_on_directories(false)
        .fallback(entry_page(site))
}
