use crate::{
    catalog::{DestinationCatalog, ItemKind},
    errors::{ApiError, ResolveError},
    importer::{item::SourceItem, retry::RetryPolicy},
    info, warning,
};

/// Maps one source item to a destination id via search.
///
/// The destination's own ranking is trusted: the first hit wins. When nothing
/// is found for a multi-artist track or album, one more search with only the
/// first artist is tried unless strict matching is on.
pub struct Resolver<'a, D: DestinationCatalog + ?Sized> {
    destination: &'a D,
    retry: RetryPolicy,
    strict: bool,
}

impl<'a, D: DestinationCatalog + ?Sized> Resolver<'a, D> {
    pub fn new(destination: &'a D, retry: RetryPolicy, strict: bool) -> Self {
        Self {
            destination,
            retry,
            strict,
        }
    }

    pub async fn resolve(&self, item: &SourceItem) -> Result<String, ResolveError> {
        let query = item.match_query();
        if query.truncated {
            warning!(
                "Name too long... Trimming to 100 characters. May affect search accuracy"
            );
        }

        info!("Importing {}: {}...", query.kind, query.display_name);
        let mut hit = self.first_hit(&query.query, query.kind).await?;

        if hit.is_none() && !self.strict {
            if let Some(fallback) = item.fallback_query() {
                info!("Searching \"{}\"...", fallback);
                hit = self.first_hit(&fallback, query.kind).await?;
            }
        }

        hit.ok_or(ResolveError::NotFound(query.display_name))
    }

    async fn first_hit(&self, query: &str, kind: ItemKind) -> Result<Option<String>, ApiError> {
        let hits = self
            .retry
            .run(|| self.destination.search(query, kind))
            .await?;
        Ok(hits.into_iter().next().map(|hit| hit.id))
    }
}
