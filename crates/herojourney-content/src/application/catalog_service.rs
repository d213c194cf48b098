//! Session-owned catalog cache.
//!
//! The loaded catalog is cached with a staleness window measured by the
//! injected `Clock`. A stale or invalidated cache is refilled on the next
//! call; a failed load yields the fallback catalog, which is never cached so
//! the next call retries the real source.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, TimeDelta, Utc};
use herojourney_core::clock::Clock;
use herojourney_core::config::EngineConfig;
use herojourney_core::error::DomainError;
use tracing::{debug, info, warn};

use super::loader::load_catalog;
use crate::domain::catalog::ContentCatalog;

#[derive(Debug)]
struct CachedCatalog {
    catalog: Arc<ContentCatalog>,
    loaded_at: DateTime<Utc>,
}

/// Loads and caches the content catalog for one session.
pub struct CatalogService {
    path: PathBuf,
    ttl: Option<TimeDelta>,
    clock: Arc<dyn Clock>,
    cached: Mutex<Option<CachedCatalog>>,
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService")
            .field("path", &self.path)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl CatalogService {
    /// Creates a service reading `path`. A `ttl_secs` of 0 disables caching.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, ttl_secs: u64, clock: Arc<dyn Clock>) -> Self {
        let ttl = (ttl_secs > 0).then(|| {
            i64::try_from(ttl_secs)
                .ok()
                .and_then(TimeDelta::try_seconds)
                .unwrap_or(TimeDelta::MAX)
        });
        Self {
            path: path.into(),
            ttl,
            clock,
            cached: Mutex::new(None),
        }
    }

    /// Creates a service from the engine configuration.
    #[must_use]
    pub fn from_config(config: &EngineConfig, clock: Arc<dyn Clock>) -> Self {
        Self::new(config.content_path.clone(), config.catalog_ttl_secs, clock)
    }

    /// Path of the content document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the cached catalog while fresh, otherwise loads it. Never
    /// fails: an unreadable source yields the fallback catalog.
    pub fn catalog(&self) -> Arc<ContentCatalog> {
        let now = self.clock.now();
        if let Some(ttl) = self.ttl {
            if let Some(entry) = self.lock().as_ref() {
                if now - entry.loaded_at < ttl {
                    debug!("serving cached content catalog");
                    return Arc::clone(&entry.catalog);
                }
            }
        }
        self.reload()
    }

    /// Forces a fresh load, bypassing the cache.
    pub fn reload(&self) -> Arc<ContentCatalog> {
        match self.try_load() {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "using fallback content catalog");
                Arc::new(ContentCatalog::fallback())
            }
        }
    }

    /// Loads the catalog from its source and caches it, without falling
    /// back.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ContentLoad` if the source is missing,
    /// malformed, or holds no valid nodes.
    pub fn try_load(&self) -> Result<Arc<ContentCatalog>, DomainError> {
        let report = load_catalog(&self.path)?;
        if report.catalog.is_empty() {
            return Err(DomainError::ContentLoad(format!(
                "{} contains no valid nodes",
                self.path.display()
            )));
        }

        let catalog = Arc::new(report.catalog);
        if self.ttl.is_some() {
            *self.lock() = Some(CachedCatalog {
                catalog: Arc::clone(&catalog),
                loaded_at: self.clock.now(),
            });
        }
        info!(nodes = catalog.len(), fingerprint = %catalog.fingerprint(), "content catalog ready");
        Ok(catalog)
    }

    /// Drops the cached catalog so the next call reloads.
    pub fn invalidate(&self) {
        *self.lock() = None;
        debug!("content catalog cache invalidated");
    }

    // A poisoned cache holds nothing that can be half-written, so keep using it.
    fn lock(&self) -> MutexGuard<'_, Option<CachedCatalog>> {
        self.cached.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
