//! Configuration management for the importer.
//!
//! Endpoint and OAuth settings come from environment variables, optionally
//! loaded from a `.env` file in the local data directory. Every variable has
//! a default pointing at the public services, so a fresh install only needs
//! the command-line arguments.
//!
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Built-in defaults
//!
//! Run settings (ignored categories, strict matching, request timeout) and the
//! run mode are built from the command line in `main` and validated here.

use std::{env, fmt, path::PathBuf, time::Duration};

use clap::ValueEnum;

use crate::errors::ImportError;

pub const APP_DIR: &str = "yandex2spotify";

const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_SPOTIFY_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
const DEFAULT_SPOTIFY_SCOPE: &str =
    "playlist-modify-public user-library-modify user-follow-modify ugc-image-upload";
const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
const DEFAULT_YANDEX_API_URL: &str = "https://api.music.yandex.net";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives under `yandex2spotify/.env` in the platform data directory:
/// - Linux: `~/.local/share/yandex2spotify/.env`
/// - macOS: `~/Library/Application Support/yandex2spotify/.env`
/// - Windows: `%LOCALAPPDATA%/yandex2spotify/.env`
///
/// A missing file is fine, all settings have defaults. A file that exists but
/// cannot be parsed is reported as an error.
pub async fn load_env() -> Result<(), String> {
    let mut path = data_dir();
    path.push(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Root of everything the importer stores locally.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Address the local OAuth callback server binds to (`SERVER_ADDRESS`).
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Redirect URI registered in the Spotify app settings (`SPOTIFY_API_REDIRECT_URI`).
///
/// Must point at [`server_addr`] with the `/callback` path.
pub fn spotify_redirect_uri() -> String {
    var_or("SPOTIFY_API_REDIRECT_URI", DEFAULT_SPOTIFY_REDIRECT_URI)
}

/// Scopes requested during authorization (`SPOTIFY_API_AUTH_SCOPE`).
pub fn spotify_scope() -> String {
    var_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SPOTIFY_SCOPE)
}

pub fn spotify_apiauth_url() -> String {
    var_or("SPOTIFY_API_AUTH_URL", DEFAULT_SPOTIFY_AUTH_URL)
}

/// Spotify Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)
}

pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL)
}

/// Yandex Music API base URL (`YANDEX_API_URL`).
pub fn yandex_apiurl() -> String {
    var_or("YANDEX_API_URL", DEFAULT_YANDEX_API_URL)
}

/// Library categories that can be imported, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Category {
    Likes,
    Playlists,
    Albums,
    Artists,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Likes,
        Category::Playlists,
        Category::Albums,
        Category::Artists,
    ];

    /// Report section for single-section categories. Playlists get one
    /// section per playlist title instead.
    pub fn section_name(&self) -> &'static str {
        match self {
            Category::Likes => "Likes",
            Category::Playlists => "Playlists",
            Category::Albums => "Albums",
            Category::Artists => "Artists",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Likes => "likes",
            Category::Playlists => "playlists",
            Category::Albums => "albums",
            Category::Artists => "artists",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub ignore: Vec<Category>,
    /// Disables the first-artist fallback search.
    pub strict_search: bool,
    /// Per-request timeout of the Spotify client.
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ignore: Vec::new(),
            strict_search: false,
            timeout: Duration::from_secs(10),
        }
    }
}

impl Settings {
    pub fn new(ignore: Vec<Category>, strict_search: bool, timeout_secs: f64) -> Result<Self, ImportError> {
        if !timeout_secs.is_finite() || timeout_secs <= 0.0 {
            return Err(ImportError::Config(format!(
                "timeout must be a positive number of seconds, got {}",
                timeout_secs
            )));
        }

        let timeout = Duration::try_from_secs_f64(timeout_secs).map_err(|e| {
            ImportError::Config(format!("timeout of {} seconds is out of range: {}", timeout_secs, e))
        })?;

        Ok(Self {
            ignore,
            strict_search,
            timeout,
        })
    }

    /// Categories left after applying the ignore list, in run order.
    pub fn categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| !self.ignore.contains(c))
            .collect()
    }
}

/// What a single invocation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Import the Yandex library authorised by `token`.
    Library { token: String },
    /// Import `{artist, track}` pairs from a JSON file into a new playlist.
    Json { path: PathBuf },
}

impl RunMode {
    /// Exactly one of `token` and `json_path` has to be given.
    pub fn from_options(
        token: Option<String>,
        json_path: Option<PathBuf>,
    ) -> Result<Self, ImportError> {
        match (token, json_path) {
            (Some(token), None) => Ok(RunMode::Library { token }),
            (None, Some(path)) => Ok(RunMode::Json { path }),
            (None, None) => Err(ImportError::Config(
                "either the -t (token) or -j (json_path) argument must be specified".to_string(),
            )),
            (Some(_), Some(_)) => Err(ImportError::Config(
                "the -t (token) and -j (json_path) arguments cannot be used together".to_string(),
            )),
        }
    }
}
