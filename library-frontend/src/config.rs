use crate::error::{CatalogError, Result};
use crate::services::catalog::DEFAULT_BASE_URL;
use crate::state::SyncPolicy;
use crate::views::list::PAGE_SIZE;

pub const API_URL_VAR: &str = "LIBRARY_API_URL";
pub const PAGE_SIZE_VAR: &str = "LIBRARY_PAGE_SIZE";
pub const SYNC_VAR: &str = "LIBRARY_SYNC";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub page_size: usize,
    pub sync: SyncPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: PAGE_SIZE,
            sync: SyncPolicy::default(),
        }
    }
}

fn check_page_size(page_size: usize) -> Result<usize> {
    if page_size == 0 {
        return Err(CatalogError::Config("page size must be at least 1".to_string()));
    }
    Ok(page_size)
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup(API_URL_VAR).filter(|v| !v.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(PAGE_SIZE_VAR) {
            let page_size = raw.trim().parse::<usize>().map_err(|e| {
                CatalogError::Config(format!("{}={:?}: {}", PAGE_SIZE_VAR, raw, e))
            })?;
            config.page_size = check_page_size(page_size)?;
        }
        if let Some(raw) = lookup(SYNC_VAR) {
            config.sync = raw
                .parse()
                .map_err(|e| CatalogError::Config(format!("{}: {}", SYNC_VAR, e)))?;
        }

        Ok(config)
    }

    /// Command-line flags win over the environment.
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        page_size: Option<usize>,
        sync: Option<SyncPolicy>,
    ) -> Result<Self> {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(page_size) = page_size {
            self.page_size = check_page_size(page_size)?;
        }
        if let Some(sync) = sync {
            self.sync = sync;
        }
        Ok(self)
    }
}
