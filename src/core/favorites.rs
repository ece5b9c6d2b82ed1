use crate::domain::model::{FavoriteSet, Nanny, Session};
use crate::domain::ports::{FavoritesStore, NannySource};
use crate::utils::error::{DirectoryError, Result};
use crate::utils::validation::validate_key;

/// Nannies marked as favorite, in collection order.
pub fn favorites_view(nannies: &[Nanny], favorite_ids: &FavoriteSet) -> Vec<Nanny> {
    nannies
        .iter()
        .filter(|n| favorite_ids.contains(&n.id))
        .cloned()
        .collect()
}

/// The signed-in user, if there is one. The uid becomes a database path
/// segment, so it has to be a valid key.
pub fn require_session(session: Option<&Session>) -> Result<&Session> {
    let session = session.ok_or(DirectoryError::Unauthorized)?;
    validate_key("uid", &session.uid)?;
    Ok(session)
}

async fn ensure_listed(source: &dyn NannySource, nanny_id: &str) -> Result<()> {
    validate_key("nanny_id", nanny_id)?;
    let nannies = source.fetch_nannies().await?;
    if nannies.iter().any(|n| n.id == nanny_id) {
        Ok(())
    } else {
        Err(DirectoryError::NannyNotFound {
            id: nanny_id.to_string(),
        })
    }
}

/// Flips the favorite mark for `nanny_id` and returns the new state.
pub async fn toggle_favorite<F: FavoritesStore + ?Sized>(
    source: &dyn NannySource,
    store: &F,
    session: Option<&Session>,
    nanny_id: &str,
) -> Result<bool> {
    let session = require_session(session)?;
    ensure_listed(source, nanny_id).await?;

    let current = store.favorite_ids(session).await?;
    let marked = !current.contains(nanny_id);
    store.set_favorite(session, nanny_id, marked).await?;

    tracing::info!(
        "{} nanny {} for user {}",
        if marked { "Favorited" } else { "Unfavorited" },
        nanny_id,
        session.uid
    );
    Ok(marked)
}

/// Sets the mark explicitly. Returns whether anything changed.
pub async fn set_favorite<F: FavoritesStore + ?Sized>(
    source: &dyn NannySource,
    store: &F,
    session: Option<&Session>,
    nanny_id: &str,
    favorite: bool,
) -> Result<bool> {
    let session = require_session(session)?;
    ensure_listed(source, nanny_id).await?;

    let current = store.favorite_ids(session).await?;
    if current.contains(nanny_id) == favorite {
        tracing::debug!("Nanny {} already in requested state", nanny_id);
        return Ok(false);
    }
    store.set_favorite(session, nanny_id, favorite).await?;
    Ok(true)
}
