use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Client credentials of the Spotify app the user registered.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// State shared between the auth flow and the callback handler.
#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    /// Opaque value echoed back by the callback.
    pub state: String,
    pub credentials: ClientCredentials,
    pub token: Option<Token>,
}

#[derive(Tabled)]
pub struct NotImportedRow {
    pub section: String,
    pub item: String,
}

// Spotify

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: Option<SearchPage>,
    pub albums: Option<SearchPage>,
    pub artists: Option<SearchPage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub items: Vec<Option<SearchItem>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchItem {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdsRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
    pub expires_in: u64,
}

// Yandex Music

#[derive(Debug, Clone, Deserialize)]
pub struct YandexResponse<T> {
    pub result: T,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountStatus {
    pub account: Account,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    #[serde(deserialize_with = "id_string")]
    pub uid: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LikedTracksResult {
    pub library: LikedTracksLibrary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LikedTracksLibrary {
    #[serde(default)]
    pub tracks: Vec<YandexTrackShort>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YandexTrackShort {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub album_id: Option<String>,
    pub track: Option<YandexTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YandexTrack {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub artists: Vec<YandexArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YandexArtist {
    #[serde(default, deserialize_with = "opt_id_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    pub available: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YandexAlbum {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub artists: Vec<YandexArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LikedAlbum {
    pub album: Option<YandexAlbum>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LikedArtist {
    pub artist: Option<YandexArtist>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YandexPlaylist {
    #[serde(deserialize_with = "id_string")]
    pub uid: String,
    #[serde(deserialize_with = "id_string")]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub collective: bool,
    pub cover: Option<YandexCover>,
    #[serde(default)]
    pub tracks: Vec<YandexTrackShort>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YandexCover {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub uri: Option<String>,
}

/// Yandex mixes numeric and string ids across endpoints.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

fn opt_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}
