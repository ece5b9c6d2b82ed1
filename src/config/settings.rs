use crate::adapters::render::OutputFormat;
use crate::domain::model::{Session, SortOption};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DirectoryError, Result};
use crate::core::pagination::MAX_PAGES;
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
use std::time::Duration;

pub const DEFAULT_OUTPUT_PATH: &str = "./output";

/// Where the nanny collection is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSettings {
    Database {
        url: String,
        read_token: Option<String>,
        timeout: Option<Duration>,
    },
    Snapshot {
        path: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSettings {
    pub sort: SortOption,
    pub pages: usize,
    pub favorites_only: bool,
    pub format: OutputFormat,
    pub save: Vec<OutputFormat>,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            sort: SortOption::All,
            pages: 1,
            favorites_only: false,
            format: OutputFormat::Text,
            save: Vec::new(),
        }
    }
}

/// Fully resolved configuration: file values overlaid by command line flags.
#[derive(Debug, Clone)]
pub struct Settings {
    pub source: SourceSettings,
    pub session: Option<Session>,
    pub output_path: String,
    pub view: ViewSettings,
}

impl Settings {
    pub fn new(source: SourceSettings) -> Self {
        Self {
            source,
            session: None,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            view: ViewSettings::default(),
        }
    }

    pub fn with_session(mut self, session: Option<Session>) -> Self {
        self.session = session;
        self
    }

    pub fn with_view(mut self, view: ViewSettings) -> Self {
        self.view = view;
        self
    }

    pub fn with_output_path(mut self, path: impl Into<String>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Picks the source: an explicit snapshot wins over a database URL.
    pub fn source_from(
        url: Option<String>,
        snapshot: Option<String>,
        read_token: Option<String>,
        timeout_seconds: Option<u64>,
    ) -> Result<SourceSettings> {
        match (snapshot, url) {
            (Some(path), _) => Ok(SourceSettings::Snapshot { path }),
            (None, Some(url)) => Ok(SourceSettings::Database {
                url,
                read_token,
                timeout: timeout_seconds.map(Duration::from_secs),
            }),
            (None, None) => Err(DirectoryError::MissingConfigError {
                field: "database.url or database.snapshot".to_string(),
            }),
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        match &self.source {
            SourceSettings::Database { url, .. } => validate_url("database_url", url)?,
            SourceSettings::Snapshot { path } => validate_path("snapshot", path)?,
        }
        validate_path("output_path", &self.output_path)?;
        validate_range("pages", self.view.pages, 1, MAX_PAGES)?;
        if self.view.favorites_only && self.session.is_none() {
            return Err(DirectoryError::Unauthorized);
        }
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn sort_option(&self) -> SortOption {
        self.view.sort
    }

    fn pages(&self) -> usize {
        self.view.pages
    }

    fn favorites_only(&self) -> bool {
        self.view.favorites_only
    }

    fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.view.save
    }
}
