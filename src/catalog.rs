//! Capability interfaces of the two catalogs.
//!
//! The import pipeline only talks to these traits. [`crate::yandex::YandexClient`]
//! and [`crate::spotify::SpotifyClient`] are the HTTP implementations; tests plug
//! in in-memory stubs.

use std::fmt;

use async_trait::async_trait;

use crate::errors::ApiError;

/// Kind of destination object a search is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Track,
    Album,
    Artist,
}

impl ItemKind {
    /// Value of the `type` search parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Track => "track",
            ItemKind::Album => "album",
            ItemKind::Artist => "artist",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A track or album as known to the source catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub id: String,
    pub title: String,
    pub artists: Vec<String>,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistRef {
    pub id: String,
    pub name: String,
    pub available: bool,
}

/// Entry of the liked-tracks list. Only carries ids; full metadata comes from
/// [`SourceCatalog::fetch_full_tracks`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRef {
    pub id: String,
    pub album_id: Option<String>,
}

impl TrackRef {
    /// `"{id}:{album_id}"` when the album is known, the bare id otherwise.
    pub fn full_id(&self) -> String {
        match &self.album_id {
            Some(album_id) => format!("{}:{}", self.id, album_id),
            None => self.id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverKind {
    /// A single uploaded picture.
    Picture,
    /// Mosaic or any other generated cover.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cover {
    pub kind: CoverKind,
    pub uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePlaylist {
    pub owner: String,
    pub kind: String,
    pub title: String,
    pub collaborative: bool,
    pub cover: Option<Cover>,
}

impl SourcePlaylist {
    pub fn has_picture_cover(&self) -> bool {
        matches!(
            self.cover,
            Some(Cover {
                kind: CoverKind::Picture,
                ..
            })
        )
    }
}

/// One row of a source playlist. `track` is filled in when the playlist
/// endpoint embeds the full object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    pub track_ref: TrackRef,
    pub track: Option<Release>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPlaylist {
    pub id: String,
}

#[async_trait]
pub trait SourceCatalog: Send + Sync {
    async fn liked_tracks(&self) -> Result<Vec<TrackRef>, ApiError>;

    async fn playlists(&self) -> Result<Vec<SourcePlaylist>, ApiError>;

    async fn liked_albums(&self) -> Result<Vec<Release>, ApiError>;

    async fn liked_artists(&self) -> Result<Vec<ArtistRef>, ApiError>;

    /// `ids` are in the `"{track}:{album}"` form of [`TrackRef::full_id`].
    async fn fetch_full_tracks(&self, ids: &[String]) -> Result<Vec<Release>, ApiError>;

    async fn playlist_tracks(&self, playlist: &SourcePlaylist)
    -> Result<Vec<PlaylistEntry>, ApiError>;

    /// Raw bytes of the playlist cover at `size` (e.g. `"400x400"`).
    async fn download_cover(
        &self,
        playlist: &SourcePlaylist,
        size: &str,
    ) -> Result<Vec<u8>, ApiError>;
}

#[async_trait]
pub trait DestinationCatalog: Send + Sync {
    async fn current_user(&self) -> Result<String, ApiError>;

    /// Ranked hits for `query`, best first.
    async fn search(&self, query: &str, kind: ItemKind) -> Result<Vec<SearchHit>, ApiError>;

    async fn add_saved_tracks(&self, ids: &[String]) -> Result<(), ApiError>;

    async fn add_saved_albums(&self, ids: &[String]) -> Result<(), ApiError>;

    async fn follow_artists(&self, ids: &[String]) -> Result<(), ApiError>;

    async fn create_playlist(&self, user: &str, title: &str) -> Result<CreatedPlaylist, ApiError>;

    async fn add_tracks_to_playlist(
        &self,
        user: &str,
        playlist_id: &str,
        ids: &[String],
    ) -> Result<(), ApiError>;

    async fn set_playlist_cover_image(
        &self,
        playlist_id: &str,
        jpeg_base64: &str,
    ) -> Result<(), ApiError>;
}
