use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    catalog::DestinationCatalog,
    errors::ImportError,
    importer::{Importer, item::SourceItem, report::ImportSection},
    info,
};

/// Name of the playlist a JSON import creates.
pub const JSON_PLAYLIST_NAME: &str = "Imported from JSON";

/// One entry of the import file: `[{"artist": "...", "track": "..."}]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonTrack {
    pub artist: String,
    pub track: String,
}

impl From<JsonTrack> for SourceItem {
    fn from(t: JsonTrack) -> Self {
        SourceItem::RawQuery {
            artist: t.artist,
            track: t.track,
        }
    }
}

pub async fn read_tracks(path: &Path) -> Result<Vec<JsonTrack>, ImportError> {
    let content = async_fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

impl<'a, D: DestinationCatalog + ?Sized> Importer<'a, D> {
    /// Reads `path` and imports its tracks, see [`Importer::import_tracks`].
    pub async fn import_from_json(&mut self, path: &Path) -> Result<(), ImportError> {
        let tracks = read_tracks(path).await?;
        info!("Loaded {} tracks from {}", tracks.len(), path.display());
        self.import_tracks(tracks).await
    }

    /// Resolves every pair in file order, creates one playlist named
    /// [`JSON_PLAYLIST_NAME`] and fills it in batches. Misses are reported
    /// under a section of the same name.
    pub async fn import_tracks(&mut self, tracks: Vec<JsonTrack>) -> Result<(), ImportError> {
        let mut section = ImportSection::new(JSON_PLAYLIST_NAME);
        let result = self.save_json_tracks(tracks, &mut section).await;
        self.report.add(section);
        self.report.print();
        result
    }

    async fn save_json_tracks(
        &self,
        tracks: Vec<JsonTrack>,
        section: &mut ImportSection,
    ) -> Result<(), ImportError> {
        let items: Vec<SourceItem> = tracks.into_iter().map(SourceItem::from).collect();
        let pipeline = self.pipeline();
        let ids = pipeline.resolve_all(&items, section).await?;

        let (destination, retry) = (self.destination, self.retry);
        let user = self.user.as_str();
        let playlist = retry
            .run(|| destination.create_playlist(user, JSON_PLAYLIST_NAME))
            .await?;
        let playlist_id = playlist.id.as_str();

        pipeline
            .save_in_batches(ids, |chunk| async move {
                info!("Saving {} tracks...", chunk.len());
                retry
                    .run(|| destination.add_tracks_to_playlist(user, playlist_id, &chunk))
                    .await
            })
            .await?;

        Ok(())
    }
}
