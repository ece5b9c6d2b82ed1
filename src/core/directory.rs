use crate::adapters::render::render;
use crate::core::favorites::{favorites_view, require_session};
use crate::core::filter::derive_list;
use crate::core::pagination::{paginate, Paginator};
use crate::domain::model::Nanny;
use crate::domain::ports::{ConfigProvider, FavoritesStore, NannySource, Pipeline, Storage};
use crate::domain::views::DirectoryPage;
use crate::utils::error::Result;
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use std::time::Instant;

/// Fetch → derive → paginate → write, for one view of the directory.
pub struct DirectoryPipeline<S: Storage, C: ConfigProvider> {
    source: Arc<dyn NannySource>,
    favorites: Arc<dyn FavoritesStore>,
    storage: S,
    config: C,
    today: NaiveDate,
}

impl<S: Storage, C: ConfigProvider> DirectoryPipeline<S, C> {
    pub fn new(
        source: Arc<dyn NannySource>,
        favorites: Arc<dyn FavoritesStore>,
        storage: S,
        config: C,
    ) -> Self {
        Self {
            source,
            favorites,
            storage,
            config,
            today: Local::now().date_naive(),
        }
    }

    /// Pins the date used for ages in rendered output.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for DirectoryPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Nanny>> {
        if !self.config.favorites_only() {
            return self.source.fetch_nannies().await;
        }

        let session = require_session(self.config.session())?;
        let (all, favorite_ids) = tokio::try_join!(
            self.source.fetch_nannies(),
            self.favorites.favorite_ids(session)
        )?;

        tracing::debug!(
            "User {} has {} favorites among {} nannies",
            session.uid,
            favorite_ids.len(),
            all.len()
        );
        Ok(favorites_view(&all, &favorite_ids))
    }

    async fn transform(&self, data: Vec<Nanny>) -> Result<DirectoryPage> {
        let option = self.config.sort_option();
        let derived = derive_list(&data, option);
        let pages = self.config.pages();
        let pager = Paginator::with_pages(pages);

        tracing::debug!(
            "{} kept {} of {} nannies",
            option,
            derived.len(),
            data.len()
        );

        Ok(DirectoryPage {
            option,
            favorites_only: self.config.favorites_only(),
            visible: pager.visible(),
            total: derived.len(),
            has_more: pager.has_more(derived.len()),
            nannies: paginate(&derived, pages).to_vec(),
        })
    }

    async fn load(&self, page: &DirectoryPage) -> Result<Vec<String>> {
        let mut written = Vec::new();

        for format in self.config.output_formats() {
            let content = render(page, *format, self.today)?;
            let file_name = format.file_name();
            self.storage.write_file(file_name, content.as_bytes()).await?;

            let full_path = std::path::Path::new(self.config.output_path())
                .join(file_name)
                .display()
                .to_string();
            tracing::info!("Saved {:?} output to {}", format, full_path);
            written.push(full_path);
        }

        Ok(written)
    }
}

/// Result of one engine run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub page: DirectoryPage,
    pub outputs: Vec<String>,
}

pub struct DirectoryEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> DirectoryEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunReport> {
        let started = Instant::now();
        tracing::info!("Loading nanny directory");

        let nannies = self.pipeline.extract().await?;
        tracing::info!("Extracted {} nannies", nannies.len());

        let page = self.pipeline.transform(nannies).await?;
        tracing::info!(
            "Showing {} of {} nannies ({})",
            page.nannies.len(),
            page.total,
            page.option.label()
        );

        let outputs = self.pipeline.load(&page).await?;
        tracing::debug!("Directory run finished in {:?}", started.elapsed());

        Ok(RunReport { page, outputs })
    }
}
