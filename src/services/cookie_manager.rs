//! Cookie Manager for the per-tab cookie inspector.
//!
//! Pass-through to the host session's cookie store: list cookies for a URL,
//! remove a selection, decide whether the toolbar indicator is visible and
//! split cookies into first and third party for display.

use std::collections::HashMap;

use tracing::{debug, warn};
use url::Url;

use crate::types::cookie::{Cookie, CookieBreakdown, CookieRemoval, RemoveCookiesResult};
use crate::types::errors::CookieError;

/// Session partition used when a tab does not name one.
pub const DEFAULT_PARTITION: &str = "";

/// Cookie capability of the host runtime. `partition` selects the session.
pub trait CookieStore {
    fn get(&self, url: &str, partition: &str) -> Result<Vec<Cookie>, CookieError>;
    /// Every cookie held by the partition, whatever its domain.
    fn all(&self, partition: &str) -> Result<Vec<Cookie>, CookieError>;
    fn remove(&mut self, partition: &str, url: &str, name: &str) -> Result<(), CookieError>;
}

/// In-memory [`CookieStore`], keyed by partition.
#[derive(Debug, Default)]
pub struct MemoryCookieStore {
    partitions: HashMap<String, Vec<Cookie>>,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, partition: &str, cookie: Cookie) {
        let jar = self.partitions.entry(partition.to_string()).or_default();
        jar.retain(|c| !(c.name == cookie.name && c.domain == cookie.domain && c.path == cookie.path));
        jar.push(cookie);
    }
}

impl CookieStore for MemoryCookieStore {
    fn get(&self, url: &str, partition: &str) -> Result<Vec<Cookie>, CookieError> {
        let host = host_of(url)?;
        Ok(self
            .partitions
            .get(partition)
            .map(|jar| jar.iter().filter(|c| domain_matches(&host, &c.domain)).cloned().collect())
            .unwrap_or_default())
    }

    fn all(&self, partition: &str) -> Result<Vec<Cookie>, CookieError> {
        Ok(self.partitions.get(partition).cloned().unwrap_or_default())
    }

    fn remove(&mut self, partition: &str, url: &str, name: &str) -> Result<(), CookieError> {
        let host = host_of(url)?;
        if let Some(jar) = self.partitions.get_mut(partition) {
            jar.retain(|c| !(c.name == name && domain_matches(&host, &c.domain)));
        }
        Ok(())
    }
}

fn host_of(url: &str) -> Result<String, CookieError> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
        .ok_or_else(|| CookieError::InvalidUrl(url.to_string()))
}

/// Whether a cookie for `cookie_domain` is sent to `host`.
fn domain_matches(host: &str, cookie_domain: &str) -> bool {
    let domain = cookie_domain.trim_start_matches('.').to_ascii_lowercase();
    host == domain || host.ends_with(&format!(".{}", domain))
}

/// Cookie inspector operations over a host [`CookieStore`].
pub struct CookieManager<S: CookieStore> {
    store: S,
}

impl<S: CookieStore> CookieManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Cookies visible to `url`. Store failures and empty URLs yield an empty list.
    pub fn get_cookies_for_url(&self, url: &str, partition: Option<&str>) -> Vec<Cookie> {
        if url.is_empty() {
            return Vec::new();
        }
        match self.store.get(url, partition.unwrap_or(DEFAULT_PARTITION)) {
            Ok(cookies) => cookies,
            Err(e) => {
                warn!(url, error = %e, "error fetching cookies");
                Vec::new()
            }
        }
    }

    /// Removes the given cookies. Entries lacking a url or name are skipped;
    /// any store failure reports `{success: false, count: 0}`.
    pub fn remove_cookies(&mut self, partition: Option<&str>, cookies: &[CookieRemoval]) -> RemoveCookiesResult {
        let partition = partition.unwrap_or(DEFAULT_PARTITION);
        let mut count = 0;
        for cookie in cookies {
            let (Some(url), Some(name)) = (cookie.url.as_deref(), cookie.name.as_deref()) else {
                continue;
            };
            if let Err(e) = self.store.remove(partition, url, name) {
                warn!(url, name, error = %e, "error removing cookies");
                return RemoveCookiesResult { success: false, count: 0 };
            }
            count += 1;
        }
        debug!(partition, count, "cookies removed");
        RemoveCookiesResult { success: true, count }
    }

    /// The partition's cookies split into first and third party relative to
    /// `page_url`. Store failures yield an empty breakdown.
    pub fn breakdown(&self, page_url: &str, partition: Option<&str>) -> CookieBreakdown {
        match self.store.all(partition.unwrap_or(DEFAULT_PARTITION)) {
            Ok(cookies) => split_by_party(page_url, cookies),
            Err(e) => {
                warn!(page_url, error = %e, "error listing cookies");
                CookieBreakdown { first_party: Vec::new(), third_party: Vec::new() }
            }
        }
    }

    /// Whether the toolbar cookie button should be shown for a tab.
    pub fn indicator_visible(&self, tab_url: &str, partition: Option<&str>) -> bool {
        if tab_url.starts_with("min://") || tab_url.starts_with("about:") {
            return false;
        }
        !self.get_cookies_for_url(tab_url, partition).is_empty()
    }
}

/// Splits cookies by whether their domain is the page's host or a parent of it.
pub fn split_by_party(page_url: &str, cookies: Vec<Cookie>) -> CookieBreakdown {
    let host = host_of(page_url).unwrap_or_default();
    let (first_party, third_party) = cookies
        .into_iter()
        .partition(|c| !host.is_empty() && domain_matches(&host, &c.domain));
    CookieBreakdown { first_party, third_party }
}
