use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, header};
use tokio::sync::Mutex;

use crate::{
    catalog::{CreatedPlaylist, DestinationCatalog, ItemKind, SearchHit},
    config,
    errors::{ApiError, check_status},
    management::TokenManager,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, CurrentUserResponse, IdsRequest, SearchResponse,
    },
};

/// Hits requested per search.
const SEARCH_LIMIT: u32 = 10;

/// Spotify Web API implementation of [`DestinationCatalog`].
///
/// Each request takes a fresh access token from the [`TokenManager`], which
/// refreshes it shortly before it expires. Responses are mapped to
/// [`ApiError`]: `429` becomes `RateLimited` with the `Retry-After` value,
/// request timeouts become `Timeout`, and every other non-2xx status becomes
/// `Status`. Retrying is left to the caller.
pub struct SpotifyClient {
    http: Client,
    base_url: String,
    token_mgr: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(token_mgr: TokenManager, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: config::spotify_apiurl(),
            token_mgr: Mutex::new(token_mgr),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let token = self.token_mgr.lock().await.get_valid_token().await;
        let response = request.bearer_auth(token).send().await?;
        check_status(response).await
    }
}

fn track_uri(id: &str) -> String {
    format!("spotify:track:{}", id)
}

#[async_trait]
impl DestinationCatalog for SpotifyClient {
    async fn current_user(&self) -> Result<String, ApiError> {
        let response = self.send(self.http.get(self.url("/me"))).await?;
        let me = response.json::<CurrentUserResponse>().await?;
        Ok(me.id)
    }

    async fn search(&self, query: &str, kind: ItemKind) -> Result<Vec<SearchHit>, ApiError> {
        let limit = SEARCH_LIMIT.to_string();
        let request = self.http.get(self.url("/search")).query(&[
            ("q", query),
            ("type", kind.as_str()),
            ("limit", limit.as_str()),
        ]);
        let response = self.send(request).await?;
        let json = response.json::<SearchResponse>().await?;

        let page = match kind {
            ItemKind::Track => json.tracks,
            ItemKind::Album => json.albums,
            ItemKind::Artist => json.artists,
        };

        Ok(page
            .map(|p| p.items)
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .map(|item| SearchHit { id: item.id })
            .collect())
    }

    async fn add_saved_tracks(&self, ids: &[String]) -> Result<(), ApiError> {
        let body = IdsRequest { ids: ids.to_vec() };
        self.send(self.http.put(self.url("/me/tracks")).json(&body))
            .await?;
        Ok(())
    }

    async fn add_saved_albums(&self, ids: &[String]) -> Result<(), ApiError> {
        let body = IdsRequest { ids: ids.to_vec() };
        self.send(self.http.put(self.url("/me/albums")).json(&body))
            .await?;
        Ok(())
    }

    async fn follow_artists(&self, ids: &[String]) -> Result<(), ApiError> {
        let body = IdsRequest { ids: ids.to_vec() };
        let request = self
            .http
            .put(self.url("/me/following"))
            .query(&[("type", "artist")])
            .json(&body);
        self.send(request).await?;
        Ok(())
    }

    async fn create_playlist(&self, user: &str, title: &str) -> Result<CreatedPlaylist, ApiError> {
        let body = CreatePlaylistRequest {
            name: title.to_string(),
            description: String::new(),
            public: true,
        };
        let request = self
            .http
            .post(self.url(&format!("/users/{}/playlists", user)))
            .json(&body);
        let response = self.send(request).await?;
        let playlist = response.json::<CreatePlaylistResponse>().await?;
        Ok(CreatedPlaylist { id: playlist.id })
    }

    async fn add_tracks_to_playlist(
        &self,
        _user: &str,
        playlist_id: &str,
        ids: &[String],
    ) -> Result<(), ApiError> {
        let body = AddTrackToPlaylistRequest {
            uris: ids.iter().map(|id| track_uri(id)).collect(),
        };
        let request = self
            .http
            .post(self.url(&format!("/playlists/{}/tracks", playlist_id)))
            .json(&body);
        let response = self.send(request).await?;
        response.json::<AddTrackToPlaylistResponse>().await?;
        Ok(())
    }

    async fn set_playlist_cover_image(
        &self,
        playlist_id: &str,
        jpeg_base64: &str,
    ) -> Result<(), ApiError> {
        let request = self
            .http
            .put(self.url(&format!("/playlists/{}/images", playlist_id)))
            .header(header::CONTENT_TYPE, "image/jpeg")
            .body(jpeg_base64.to_string());
        self.send(request).await?;
        Ok(())
    }
}
