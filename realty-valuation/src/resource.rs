//! One-time loading of read-only collaborators (price model, listings dataset).
//!
//! A [`ResourceSlot`] loads its resource at most once. The outcome, success
//! or failure, is cached for the lifetime of the slot; a failed load is
//! never retried and is reported to callers as [`Availability::Unavailable`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::sync::OnceCell;

/// Loader invoked on the blocking pool with the configured path.
pub type Loader<T> = fn(&Path) -> realty_common::Result<T>;

/// Cached outcome of a load.
#[derive(Debug, Clone)]
pub enum Availability<T> {
    Available(T),
    Unavailable(String),
}

impl<T> Availability<T> {
    pub fn available(&self) -> Option<&T> {
        match self {
            Self::Available(value) => Some(value),
            Self::Unavailable(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// Why the resource is unavailable, if it is.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Available(_) => None,
            Self::Unavailable(reason) => Some(reason),
        }
    }
}

/// Load state reported by health checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    /// No path configured and nothing injected
    NotConfigured,
    /// Configured but not loaded yet
    Pending,
    Loaded,
    Unavailable,
}

/// Lazily loaded, immutable handle to a collaborator.
pub struct ResourceSlot<T> {
    name: &'static str,
    source: Option<PathBuf>,
    loader: Loader<T>,
    cell: OnceCell<Availability<T>>,
    loaded_at: OnceCell<DateTime<Utc>>,
}

impl<T> std::fmt::Debug for ResourceSlot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceSlot")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("status", &self.status())
            .finish()
    }
}

impl<T> ResourceSlot<T> {
    /// Slot that loads from `source` on first use.
    pub fn new(name: &'static str, source: Option<PathBuf>, loader: Loader<T>) -> Self {
        Self {
            name,
            source,
            loader,
            cell: OnceCell::new(),
            loaded_at: OnceCell::new(),
        }
    }

    /// Slot pre-populated with an already loaded value.
    pub fn ready(name: &'static str, value: T, loader: Loader<T>) -> Self {
        Self {
            name,
            source: None,
            loader,
            cell: OnceCell::new_with(Some(Availability::Available(value))),
            loaded_at: OnceCell::new_with(Some(Utc::now())),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// When the resource was loaded, if it has been.
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at.get().copied()
    }

    pub fn status(&self) -> SlotStatus {
        match self.cell.get() {
            Some(Availability::Available(_)) => SlotStatus::Loaded,
            _ if self.source.is_none() => SlotStatus::NotConfigured,
            Some(Availability::Unavailable(_)) => SlotStatus::Unavailable,
            None => SlotStatus::Pending,
        }
    }
}

impl<T: Send + Sync + 'static> ResourceSlot<T> {
    /// Return the cached outcome, loading it first if needed.
    ///
    /// Concurrent first callers wait on the same load.
    pub async fn get(&self) -> &Availability<T> {
        self.cell.get_or_init(|| self.load()).await
    }

    async fn load(&self) -> Availability<T> {
        let Some(path) = self.source.clone() else {
            return Availability::Unavailable(format!("no {} configured", self.name));
        };

        let loader = self.loader;
        let shown = path.display().to_string();
        let result = tokio::task::spawn_blocking(move || loader(&path)).await;

        match result {
            Ok(Ok(value)) => {
                let _ = self.loaded_at.set(Utc::now());
                tracing::info!(resource = self.name, path = %shown, "Resource loaded");
                Availability::Available(value)
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    resource = self.name,
                    path = %shown,
                    error = %e,
                    "Resource unavailable"
                );
                Availability::Unavailable(e.to_string())
            }
            Err(e) => {
                tracing::error!(resource = self.name, error = %e, "Resource loader panicked");
                Availability::Unavailable(format!("{} loader failed: {e}", self.name))
            }
        }
    }
}
