use crate::adapters::render::OutputFormat;
use crate::domain::model::{FavoriteSet, Nanny, Session, SortOption};
use crate::domain::views::DirectoryPage;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn sort_option(&self) -> SortOption;
    fn pages(&self) -> usize;
    fn favorites_only(&self) -> bool;
    fn session(&self) -> Option<&Session>;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[OutputFormat];
}

/// Where the nanny collection comes from.
#[async_trait]
pub trait NannySource: Send + Sync {
    async fn fetch_nannies(&self) -> Result<Vec<Nanny>>;
}

/// Per-user favorite ids. Every call needs the caller's session.
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    async fn favorite_ids(&self, session: &Session) -> Result<FavoriteSet>;
    async fn set_favorite(&self, session: &Session, nanny_id: &str, favorite: bool) -> Result<()>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Nanny>>;
    async fn transform(&self, data: Vec<Nanny>) -> Result<DirectoryPage>;
    /// Writes the page to every configured output and returns the paths.
    async fn load(&self, page: &DirectoryPage) -> Result<Vec<String>>;
}
