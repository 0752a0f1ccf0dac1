use std::path::PathBuf;

use chrono::Utc;

use crate::{
    config, spotify,
    types::{ClientCredentials, Token},
    warning,
};

/// Seconds before expiry at which the access token is refreshed.
const REFRESH_MARGIN_SECS: u64 = 240;

/// Holds the Spotify token of one account and keeps it fresh.
pub struct TokenManager {
    user: String,
    credentials: ClientCredentials,
    token: Token,
}

impl TokenManager {
    pub fn new(user: &str, credentials: ClientCredentials, token: Token) -> Self {
        TokenManager {
            user: user.to_string(),
            credentials,
            token,
        }
    }

    /// Loads the cached token of `user`.
    pub async fn load(user: &str, credentials: ClientCredentials) -> Result<Self, String> {
        let path = Self::token_path(user);
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self::new(user, credentials, token))
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path(&self.user);
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Current access token, refreshed first if it is about to expire.
    ///
    /// A failed refresh keeps the old token; the next API call then fails
    /// with a 401 that is reported like any other error.
    pub async fn get_valid_token(&mut self) -> String {
        if self.is_expired() {
            match spotify::auth::refresh_token(&self.credentials, &self.token.refresh_token).await
            {
                Ok(new_token) => {
                    self.token = new_token;
                    if let Err(e) = self.persist().await {
                        warning!("Failed to save refreshed token: {}", e);
                    }
                }
                Err(e) => warning!("Failed to refresh Spotify token: {}", e),
            }
        }

        self.token.access_token.clone()
    }

    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + REFRESH_MARGIN_SECS >= self.token.obtained_at + self.token.expires_in
    }

    fn token_path(user: &str) -> PathBuf {
        let mut path = config::data_dir();
        let file: String = user
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        path.push(format!("cache/token-{}.json", file));
        path
    }
}
