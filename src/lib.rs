pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, Settings};

pub use adapters::{Backend, RealtimeDbClient, SnapshotFile};
pub use self::core::age::age_on;
pub use self::core::directory::{DirectoryEngine, DirectoryPipeline, RunReport};
pub use self::core::favorites::favorites_view;
pub use self::core::filter::derive_list;
pub use self::core::pagination::paginate;
pub use domain::model::{Nanny, Review, Session, SortOption};
pub use utils::error::{DirectoryError, Result};
