// Adapters layer: concrete implementations of the domain ports.

pub mod realtime_db;
pub mod render;
pub mod snapshot;

pub use realtime_db::RealtimeDbClient;
pub use snapshot::SnapshotFile;

use crate::config::cli::LocalStorage;
use crate::config::settings::SourceSettings;
use crate::domain::ports::{FavoritesStore, NannySource};
use std::sync::Arc;

/// The collection source and the favorites store, both backed by the same
/// database or export.
#[derive(Clone)]
pub struct Backend {
    pub nannies: Arc<dyn NannySource>,
    pub favorites: Arc<dyn FavoritesStore>,
}

impl Backend {
    pub fn connect(source: &SourceSettings) -> Self {
        match source {
            SourceSettings::Database {
                url,
                read_token,
                timeout,
            } => {
                let mut client = RealtimeDbClient::new(url.clone()).with_read_token(read_token.clone());
                if let Some(timeout) = timeout {
                    client = client.with_timeout(*timeout);
                }
                tracing::debug!("Using realtime database at {}", url);
                let client = Arc::new(client);
                Self {
                    nannies: client.clone(),
                    favorites: client,
                }
            }
            SourceSettings::Snapshot { path } => {
                tracing::debug!("Using snapshot file {}", path);
                let snapshot = Arc::new(SnapshotFile::new(LocalStorage::new(".".to_string()), path.clone()));
                Self {
                    nannies: snapshot.clone(),
                    favorites: snapshot,
                }
            }
        }
    }
}
