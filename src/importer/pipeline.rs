use std::future::Future;

use crate::{
    catalog::DestinationCatalog,
    errors::{ApiError, ImportError, ResolveError},
    importer::{item::SourceItem, report::ImportSection, resolver::Resolver},
    success, utils, warning,
};

/// Maximum ids per bulk write call.
pub const BATCH_SIZE: usize = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestOutcome {
    pub resolved: usize,
    pub batches: usize,
}

/// Drives source items through the resolver and writes the hits in batches.
pub struct Pipeline<'a, D: DestinationCatalog + ?Sized> {
    resolver: Resolver<'a, D>,
}

impl<'a, D: DestinationCatalog + ?Sized> Pipeline<'a, D> {
    pub fn new(resolver: Resolver<'a, D>) -> Self {
        Self { resolver }
    }

    /// Resolves `items` newest-last and hands the ids to `save_batch` in
    /// chunks of [`BATCH_SIZE`].
    ///
    /// Items are processed in reverse, so a newest-first source list is
    /// appended to the destination oldest-first. Unavailable items are skipped.
    /// A miss or a failed search is recorded in `section` and the run goes on;
    /// an exhausted timeout or a failed `save_batch` aborts the ingest.
    pub async fn ingest<F, Fut>(
        &self,
        mut items: Vec<SourceItem>,
        section: &mut ImportSection,
        save_batch: F,
    ) -> Result<IngestOutcome, ImportError>
    where
        F: FnMut(Vec<String>) -> Fut,
        Fut: Future<Output = Result<(), ApiError>>,
    {
        items.reverse();
        let ids = self.resolve_all(&items, section).await?;
        self.save_in_batches(ids, save_batch).await
    }

    /// Resolves `items` in the given order, recording misses in `section`.
    pub async fn resolve_all(
        &self,
        items: &[SourceItem],
        section: &mut ImportSection,
    ) -> Result<Vec<String>, ImportError> {
        let mut ids: Vec<String> = Vec::new();
        for item in items.iter().filter(|item| item.is_available()) {
            match self.resolver.resolve(item).await {
                Ok(id) => {
                    success!("OK");
                    ids.push(id);
                }
                Err(ResolveError::NotFound(name)) => {
                    warning!("NO");
                    section.push(name);
                }
                Err(ResolveError::Api(e)) if e.is_timeout() => return Err(e.into()),
                Err(ResolveError::Api(e)) => {
                    warning!("NO ({})", e);
                    section.push(item.raw_name());
                }
            }
        }

        Ok(ids)
    }

    /// Calls `save_batch` once per chunk of at most [`BATCH_SIZE`] ids, in order.
    /// The first failing chunk stops the remaining ones.
    pub async fn save_in_batches<F, Fut>(
        &self,
        ids: Vec<String>,
        mut save_batch: F,
    ) -> Result<IngestOutcome, ImportError>
    where
        F: FnMut(Vec<String>) -> Fut,
        Fut: Future<Output = Result<(), ApiError>>,
    {
        let batches = utils::batch_count(ids.len(), BATCH_SIZE);
        if batches == 0 {
            return Ok(IngestOutcome::default());
        }

        // save_batch and the retry policy log per batch
        for chunk in ids.chunks(BATCH_SIZE) {
            save_batch(chunk.to_vec()).await?;
        }

        success!("Saved {} items in {} batches", ids.len(), batches);

        Ok(IngestOutcome {
            resolved: ids.len(),
            batches,
        })
    }
}
