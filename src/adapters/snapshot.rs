use crate::domain::model::{
    collection_from_snapshot, favorites_from_snapshot, FavoriteSet, Nanny, Session,
};
use crate::domain::ports::{FavoritesStore, NannySource, Storage};
use crate::utils::error::{DirectoryError, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

/// A JSON export of the database kept in a `Storage` backend. The root is
/// either the whole tree (`{"nannies": .., "users": ..}`) or just the
/// nannies node.
pub struct SnapshotFile<S: Storage> {
    storage: S,
    file: String,
    // serialises read-modify-write cycles on the export
    write_lock: Mutex<()>,
}

impl<S: Storage> SnapshotFile<S> {
    pub fn new(storage: S, file: impl Into<String>) -> Self {
        Self {
            storage,
            file: file.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn read_root(&self) -> Result<Value> {
        let bytes = self.storage.read_file(&self.file).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn is_full_tree(root: &Value) -> bool {
        root.as_object()
            .is_some_and(|obj| obj.contains_key("nannies") || obj.contains_key("users"))
    }
}

#[async_trait]
impl<S: Storage> NannySource for SnapshotFile<S> {
    async fn fetch_nannies(&self) -> Result<Vec<Nanny>> {
        let root = self.read_root().await?;
        let node = if Self::is_full_tree(&root) {
            root.get("nannies").cloned().unwrap_or(Value::Null)
        } else {
            root
        };
        let nannies = collection_from_snapshot(&node);
        tracing::info!("Loaded {} nannies from {}", nannies.len(), self.file);
        Ok(nannies)
    }
}

#[async_trait]
impl<S: Storage> FavoritesStore for SnapshotFile<S> {
    async fn favorite_ids(&self, session: &Session) -> Result<FavoriteSet> {
        let root = self.read_root().await?;
        let node = root
            .pointer(&format!("/users/{}/favorites", escape_pointer(&session.uid)))
            .cloned()
            .unwrap_or(Value::Null);
        Ok(favorites_from_snapshot(&node))
    }

    async fn set_favorite(&self, session: &Session, nanny_id: &str, favorite: bool) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut root = self.read_root().await?;

        if !root.is_null() && !Self::is_full_tree(&root) {
            return Err(DirectoryError::config(format!(
                "{} only holds the nannies node; favorites need a full export",
                self.file
            )));
        }
        if root.is_null() {
            root = Value::Object(Map::new());
        }

        let favorites = root
            .as_object_mut()
            .and_then(|root| child_object(root, "users"))
            .and_then(|users| child_object(users, &session.uid))
            .and_then(|user| child_object(user, "favorites"))
            .ok_or_else(|| DirectoryError::config(format!("{} has a malformed users node", self.file)))?;

        if favorite {
            favorites.insert(nanny_id.to_string(), Value::Bool(true));
        } else {
            favorites.remove(nanny_id);
        }

        let bytes = serde_json::to_vec_pretty(&root)?;
        self.storage.write_file(&self.file, &bytes).await
    }
}

fn child_object<'a>(
    parent: &'a mut Map<String, Value>,
    key: &str,
) -> Option<&'a mut Map<String, Value>> {
    let child = parent
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if child.is_null() {
        *child = Value::Object(Map::new());
    }
    child.as_object_mut()
}

fn escape_pointer(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}
