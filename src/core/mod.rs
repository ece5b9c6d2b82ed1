pub mod age;
pub mod booking;
pub mod directory;
pub mod favorites;
pub mod filter;
pub mod pagination;

pub use crate::domain::model::{Nanny, Review, Session, SortOption};
pub use crate::domain::ports::{ConfigProvider, FavoritesStore, NannySource, Pipeline, Storage};
pub use crate::utils::error::Result;
