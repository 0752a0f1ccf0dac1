#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use yandex2spotify::{
    catalog::{
        ArtistRef, CreatedPlaylist, DestinationCatalog, ItemKind, PlaylistEntry, Release,
        SearchHit, SourceCatalog, SourcePlaylist, TrackRef,
    },
    errors::ApiError,
};

type SearchFn = dyn Fn(&str, ItemKind) -> Result<Vec<SearchHit>, ApiError> + Send + Sync;

pub fn release(id: &str, title: &str, artists: &[&str]) -> Release {
    Release {
        id: id.to_string(),
        title: title.to_string(),
        artists: artists.iter().map(|a| a.to_string()).collect(),
        available: true,
    }
}

pub fn artist(id: &str, name: &str) -> ArtistRef {
    ArtistRef {
        id: id.to_string(),
        name: name.to_string(),
        available: true,
    }
}

pub fn hit(id: &str) -> SearchHit {
    SearchHit { id: id.to_string() }
}

/// Destination catalog that answers searches through a closure and records
/// every write.
pub struct StubDestination {
    search_fn: Box<SearchFn>,
    write_error: Option<u16>,
    create_error: Option<u16>,
    write_retry_after: Option<u64>,
    write_limited: Mutex<bool>,
    pub searches: Mutex<Vec<(String, ItemKind)>>,
    pub saved_tracks: Mutex<Vec<Vec<String>>>,
    pub saved_albums: Mutex<Vec<Vec<String>>>,
    pub followed: Mutex<Vec<Vec<String>>>,
    pub created_playlists: Mutex<Vec<(String, String)>>,
    pub playlist_adds: Mutex<Vec<(String, Vec<String>)>>,
    pub covers: Mutex<Vec<(String, String)>>,
}

impl StubDestination {
    pub fn new<F>(search_fn: F) -> Self
    where
        F: Fn(&str, ItemKind) -> Result<Vec<SearchHit>, ApiError> + Send + Sync + 'static,
    {
        Self {
            search_fn: Box::new(search_fn),
            write_error: None,
            create_error: None,
            write_retry_after: None,
            write_limited: Mutex::new(false),
            searches: Mutex::new(Vec::new()),
            saved_tracks: Mutex::new(Vec::new()),
            saved_albums: Mutex::new(Vec::new()),
            followed: Mutex::new(Vec::new()),
            created_playlists: Mutex::new(Vec::new()),
            playlist_adds: Mutex::new(Vec::new()),
            covers: Mutex::new(Vec::new()),
        }
    }

    /// Every query finds exactly one hit whose id is the query itself.
    pub fn echo() -> Self {
        Self::new(|query, _| Ok(vec![hit(query)]))
    }

    /// Only the listed queries find a hit.
    pub fn with_hits(pairs: &[(&str, &str)]) -> Self {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(q, id)| (q.to_string(), id.to_string()))
            .collect();
        Self::new(move |query, _| {
            Ok(pairs
                .iter()
                .filter(|(q, _)| q == query)
                .map(|(_, id)| hit(id))
                .collect())
        })
    }

    /// Bulk writes fail with `status`.
    pub fn failing_writes(mut self, status: u16) -> Self {
        self.write_error = Some(status);
        self
    }

    /// Playlist creation fails with `status`.
    pub fn failing_playlist_creation(mut self, status: u16) -> Self {
        self.create_error = Some(status);
        self
    }

    /// Every bulk write is answered with one 429 before it goes through.
    pub fn rate_limited_writes(mut self, retry_after: u64) -> Self {
        self.write_retry_after = Some(retry_after);
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.searches
            .lock()
            .unwrap()
            .iter()
            .map(|(q, _)| q.clone())
            .collect()
    }

    fn write_result(&self) -> Result<(), ApiError> {
        if let Some(retry_after) = self.write_retry_after {
            let mut limited = self.write_limited.lock().unwrap();
            *limited = !*limited;
            if *limited {
                return Err(ApiError::RateLimited { retry_after });
            }
        }

        match self.write_error {
            Some(status) => Err(ApiError::Status {
                status,
                message: "stubbed write failure".to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DestinationCatalog for StubDestination {
    async fn current_user(&self) -> Result<String, ApiError> {
        Ok("user-1".to_string())
    }

    async fn search(&self, query: &str, kind: ItemKind) -> Result<Vec<SearchHit>, ApiError> {
        self.searches
            .lock()
            .unwrap()
            .push((query.to_string(), kind));
        (self.search_fn)(query, kind)
    }

    async fn add_saved_tracks(&self, ids: &[String]) -> Result<(), ApiError> {
        self.write_result()?;
        self.saved_tracks.lock().unwrap().push(ids.to_vec());
        Ok(())
    }

    async fn add_saved_albums(&self, ids: &[String]) -> Result<(), ApiError> {
        self.write_result()?;
        self.saved_albums.lock().unwrap().push(ids.to_vec());
        Ok(())
    }

    async fn follow_artists(&self, ids: &[String]) -> Result<(), ApiError> {
        self.write_result()?;
        self.followed.lock().unwrap().push(ids.to_vec());
        Ok(())
    }

    async fn create_playlist(&self, user: &str, title: &str) -> Result<CreatedPlaylist, ApiError> {
        if let Some(status) = self.create_error {
            return Err(ApiError::Status {
                status,
                message: "stubbed create failure".to_string(),
            });
        }
        let mut created = self.created_playlists.lock().unwrap();
        created.push((user.to_string(), title.to_string()));
        Ok(CreatedPlaylist {
            id: format!("pl-{}", created.len()),
        })
    }

    async fn add_tracks_to_playlist(
        &self,
        _user: &str,
        playlist_id: &str,
        ids: &[String],
    ) -> Result<(), ApiError> {
        self.write_result()?;
        self.playlist_adds
            .lock()
            .unwrap()
            .push((playlist_id.to_string(), ids.to_vec()));
        Ok(())
    }

    async fn set_playlist_cover_image(
        &self,
        playlist_id: &str,
        jpeg_base64: &str,
    ) -> Result<(), ApiError> {
        self.covers
            .lock()
            .unwrap()
            .push((playlist_id.to_string(), jpeg_base64.to_string()));
        Ok(())
    }
}

/// Source catalog backed by plain vectors. Records the name of every call.
#[derive(Default)]
pub struct StubSource {
    pub liked: Vec<TrackRef>,
    /// Looked up by `fetch_full_tracks`.
    pub tracks: Vec<Release>,
    pub playlists: Vec<(SourcePlaylist, Vec<PlaylistEntry>)>,
    pub albums: Vec<Release>,
    pub artists: Vec<ArtistRef>,
    pub cover: Vec<u8>,
    pub calls: Mutex<Vec<String>>,
    pub fetched_ids: Mutex<Vec<Vec<String>>>,
}

impl StubSource {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

#[async_trait]
impl SourceCatalog for StubSource {
    async fn liked_tracks(&self) -> Result<Vec<TrackRef>, ApiError> {
        self.record("liked_tracks");
        Ok(self.liked.clone())
    }

    async fn playlists(&self) -> Result<Vec<SourcePlaylist>, ApiError> {
        self.record("playlists");
        Ok(self.playlists.iter().map(|(p, _)| p.clone()).collect())
    }

    async fn liked_albums(&self) -> Result<Vec<Release>, ApiError> {
        self.record("liked_albums");
        Ok(self.albums.clone())
    }

    async fn liked_artists(&self) -> Result<Vec<ArtistRef>, ApiError> {
        self.record("liked_artists");
        Ok(self.artists.clone())
    }

    async fn fetch_full_tracks(&self, ids: &[String]) -> Result<Vec<Release>, ApiError> {
        self.record("fetch_full_tracks");
        self.fetched_ids.lock().unwrap().push(ids.to_vec());
        Ok(ids
            .iter()
            .filter_map(|full_id| {
                let id = full_id.split(':').next().unwrap_or_default();
                self.tracks.iter().find(|t| t.id == id).cloned()
            })
            .collect())
    }

    async fn playlist_tracks(
        &self,
        playlist: &SourcePlaylist,
    ) -> Result<Vec<PlaylistEntry>, ApiError> {
        self.record("playlist_tracks");
        Ok(self
            .playlists
            .iter()
            .find(|(p, _)| p.kind == playlist.kind)
            .map(|(_, entries)| entries.clone())
            .unwrap_or_default())
    }

    async fn download_cover(
        &self,
        _playlist: &SourcePlaylist,
        size: &str,
    ) -> Result<Vec<u8>, ApiError> {
        self.record(&format!("download_cover {}", size));
        Ok(self.cover.clone())
    }
}
