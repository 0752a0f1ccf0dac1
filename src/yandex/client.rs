use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client, RequestBuilder,
    header::{self, HeaderMap, HeaderValue},
};
use serde::de::DeserializeOwned;

use crate::{
    catalog::{
        ArtistRef, Cover, CoverKind, PlaylistEntry, Release, SourceCatalog, SourcePlaylist,
        TrackRef,
    },
    config,
    errors::{ApiError, ImportError, check_status},
    info,
    types::{
        AccountStatus, LikedAlbum, LikedArtist, LikedTracksResult, YandexAlbum, YandexArtist,
        YandexCover, YandexPlaylist, YandexResponse, YandexTrack, YandexTrackShort,
    },
};

/// Yandex Music API implementation of [`SourceCatalog`] for one account.
pub struct YandexClient {
    http: Client,
    base_url: String,
    uid: String,
}

impl YandexClient {
    /// Builds an authenticated client and looks up the account id.
    pub async fn connect(token: &str, timeout: Duration) -> Result<Self, ImportError> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("OAuth {}", token))
            .map_err(|_| ImportError::Config("token contains invalid characters".to_string()))?;
        headers.insert(header::AUTHORIZATION, auth);

        let http = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(ApiError::from)?;

        let mut client = Self {
            http,
            base_url: config::yandex_apiurl(),
            uid: String::new(),
        };

        let status: AccountStatus = client.fetch(client.get("/account/status")).await?;
        client.uid = status.account.uid;
        info!("Yandex account: {}", client.uid);

        Ok(client)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(format!("{}{}", self.base_url, path))
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = check_status(request.send().await?).await?;
        let json = response.json::<YandexResponse<T>>().await?;
        Ok(json.result)
    }
}

fn artist_names(artists: &[YandexArtist]) -> Vec<String> {
    artists.iter().map(|a| a.name.clone()).collect()
}

fn track_release(track: YandexTrack) -> Release {
    Release {
        artists: artist_names(&track.artists),
        id: track.id,
        title: track.title,
        available: track.available,
    }
}

fn album_release(album: YandexAlbum) -> Release {
    Release {
        artists: artist_names(&album.artists),
        id: album.id,
        title: album.title,
        available: album.available,
    }
}

fn artist_ref(artist: YandexArtist) -> ArtistRef {
    ArtistRef {
        id: artist.id.unwrap_or_default(),
        name: artist.name,
        // liked artists omit the flag when the artist is available
        available: artist.available.unwrap_or(true),
    }
}

fn track_ref(short: &YandexTrackShort) -> TrackRef {
    TrackRef {
        id: short.id.clone(),
        album_id: short.album_id.clone(),
    }
}

fn cover(cover: YandexCover) -> Cover {
    Cover {
        kind: match cover.kind.as_deref() {
            Some("pic") => CoverKind::Picture,
            _ => CoverKind::Other,
        },
        uri: cover.uri,
    }
}

fn source_playlist(playlist: YandexPlaylist) -> SourcePlaylist {
    SourcePlaylist {
        owner: playlist.uid,
        kind: playlist.kind,
        title: playlist.title,
        collaborative: playlist.collective,
        cover: playlist.cover.map(cover),
    }
}

/// `avatars.yandex.net/get-yapic/.../%%` -> `https://avatars.yandex.net/get-yapic/.../400x400`
fn cover_url(uri: &str, size: &str) -> String {
    format!("https://{}", uri.replace("%%", size))
}

#[async_trait]
impl SourceCatalog for YandexClient {
    async fn liked_tracks(&self) -> Result<Vec<TrackRef>, ApiError> {
        let path = format!("/users/{}/likes/tracks", self.uid);
        let result: LikedTracksResult = self.fetch(self.get(&path)).await?;
        Ok(result.library.tracks.iter().map(track_ref).collect())
    }

    async fn playlists(&self) -> Result<Vec<SourcePlaylist>, ApiError> {
        let path = format!("/users/{}/playlists/list", self.uid);
        let playlists: Vec<YandexPlaylist> = self.fetch(self.get(&path)).await?;
        Ok(playlists.into_iter().map(source_playlist).collect())
    }

    async fn liked_albums(&self) -> Result<Vec<Release>, ApiError> {
        let path = format!("/users/{}/likes/albums", self.uid);
        let request = self.get(&path).query(&[("rich", "true")]);
        let liked: Vec<LikedAlbum> = self.fetch(request).await?;
        Ok(liked
            .into_iter()
            .filter_map(|l| l.album)
            .map(album_release)
            .collect())
    }

    async fn liked_artists(&self) -> Result<Vec<ArtistRef>, ApiError> {
        let path = format!("/users/{}/likes/artists", self.uid);
        let request = self.get(&path).query(&[("with-timestamps", "true")]);
        let liked: Vec<LikedArtist> = self.fetch(request).await?;
        Ok(liked
            .into_iter()
            .filter_map(|l| l.artist)
            .map(artist_ref)
            .collect())
    }

    async fn fetch_full_tracks(&self, ids: &[String]) -> Result<Vec<Release>, ApiError> {
        let request = self
            .http
            .post(format!("{}/tracks", self.base_url))
            .form(&[("track-ids", ids.join(",")), ("with-positions", "false".to_string())]);
        let tracks: Vec<YandexTrack> = self.fetch(request).await?;
        Ok(tracks.into_iter().map(track_release).collect())
    }

    async fn playlist_tracks(
        &self,
        playlist: &SourcePlaylist,
    ) -> Result<Vec<PlaylistEntry>, ApiError> {
        let path = format!("/users/{}/playlists/{}", playlist.owner, playlist.kind);
        let full: YandexPlaylist = self.fetch(self.get(&path)).await?;
        Ok(full
            .tracks
            .into_iter()
            .map(|short| PlaylistEntry {
                track_ref: track_ref(&short),
                track: short.track.map(track_release),
            })
            .collect())
    }

    async fn download_cover(
        &self,
        playlist: &SourcePlaylist,
        size: &str,
    ) -> Result<Vec<u8>, ApiError> {
        let uri = playlist
            .cover
            .as_ref()
            .and_then(|c| c.uri.as_deref())
            .ok_or_else(|| ApiError::Decode(format!("playlist {} has no cover uri", playlist.title)))?;

        let response = self.http.get(cover_url(uri, size)).send().await?;
        let bytes = check_status(response).await?.bytes().await?;
        Ok(bytes.to_vec())
    }
}
