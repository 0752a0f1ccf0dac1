//! # Import Module
//!
//! Moves library items from a [`SourceCatalog`] into a [`DestinationCatalog`].
//!
//! ```text
//! Importer (run order, ignore list, report)
//!     ↓
//! Category drivers (likes, playlists, albums, artists, JSON file)
//!     ↓
//! Pipeline (reverse, resolve, batch of 50, save)
//!     ↓
//! Resolver (query, first hit, first-artist fallback)
//!     ↓
//! RetryPolicy (429 backoff, read timeout cap)
//!     ↓
//! DestinationCatalog
//! ```
//!
//! Partial success is the normal outcome. Items that cannot be matched are
//! collected in per-section lists and printed at the end of the run; only a
//! failed bulk write, playlist creation or cover upload aborts a category.

mod categories;
pub mod item;
pub mod json;
pub mod pipeline;
pub mod report;
pub mod resolver;
pub mod retry;

pub use item::{MatchQuery, SourceItem};
pub use json::{JSON_PLAYLIST_NAME, JsonTrack};
pub use pipeline::{BATCH_SIZE, IngestOutcome, Pipeline};
pub use report::{ImportSection, Report};
pub use resolver::Resolver;
pub use retry::RetryPolicy;

use crate::{
    catalog::{DestinationCatalog, SourceCatalog},
    config::{Category, Settings},
    errors::ImportError,
    info, warning,
};

/// Runs one import pass and owns the not-imported report.
pub struct Importer<'a, D: DestinationCatalog + ?Sized> {
    destination: &'a D,
    settings: Settings,
    retry: RetryPolicy,
    user: String,
    report: Report,
}

impl<'a, D: DestinationCatalog + ?Sized> Importer<'a, D> {
    /// Looks up the destination account the run writes to.
    pub async fn new(destination: &'a D, settings: Settings) -> Result<Self, ImportError> {
        Self::with_retry_policy(destination, settings, RetryPolicy::default()).await
    }

    pub async fn with_retry_policy(
        destination: &'a D,
        settings: Settings,
        retry: RetryPolicy,
    ) -> Result<Self, ImportError> {
        let user = retry.run(|| destination.current_user()).await?;
        info!("User ID: {}", user);

        Ok(Self {
            destination,
            settings,
            retry,
            user,
            report: Report::new(),
        })
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Categories this importer will run, in order.
    pub fn categories(&self) -> Vec<Category> {
        self.settings.categories()
    }

    fn pipeline(&self) -> Pipeline<'a, D> {
        Pipeline::new(Resolver::new(
            self.destination,
            self.retry,
            self.settings.strict_search,
        ))
    }

    pub async fn import_category<S>(
        &mut self,
        category: Category,
        source: &S,
    ) -> Result<(), ImportError>
    where
        S: SourceCatalog + ?Sized,
    {
        match category {
            Category::Likes => self.import_likes(source).await,
            Category::Playlists => self.import_playlists(source).await,
            Category::Albums => self.import_albums(source).await,
            Category::Artists => self.import_artists(source).await,
        }
    }

    /// Imports every category that is not ignored, then prints the report.
    ///
    /// A failing category stops the run: the report gathered so far is still
    /// printed and the error is returned.
    pub async fn import_all<S>(&mut self, source: &S) -> Result<(), ImportError>
    where
        S: SourceCatalog + ?Sized,
    {
        for category in self.categories() {
            if let Err(e) = self.import_category(category, source).await {
                warning!("Importing {} failed: {}", category, e);
                self.report.print();
                return Err(e);
            }
        }

        self.report.print();
        Ok(())
    }
}
