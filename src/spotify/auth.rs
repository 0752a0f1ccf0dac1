use std::{sync::Arc, time::Duration};

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    config,
    errors::{ImportError, check_status},
    info,
    management::TokenManager,
    server::start_api_server,
    success,
    types::{ClientCredentials, PkceToken, Token, TokenResponse},
    utils, warning,
};

/// Seconds to wait for the user to finish authorising in the browser.
const AUTH_TIMEOUT_SECS: u64 = 120;

/// Returns a token manager for `user`, authorising in the browser if needed.
///
/// A cached token for the same user is reused (and refreshed on demand by the
/// manager). Otherwise the authorization code flow with PKCE is run:
///
/// 1. **PKCE Setup**: a random code verifier and its SHA256 challenge
/// 2. **Server Start**: the local callback server is spawned
/// 3. **Browser Launch**: the authorization URL is opened
/// 4. **Callback Handling**: the callback exchanges the code for a token
/// 5. **Token Persistence**: the token is cached for the next run
pub async fn authorize(
    user: &str,
    credentials: ClientCredentials,
) -> Result<TokenManager, ImportError> {
    if let Ok(token_mgr) = TokenManager::load(user, credentials.clone()).await {
        info!("Using cached Spotify token for {}", user);
        return Ok(token_mgr);
    }

    let shared_state: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
    let token = auth(Arc::clone(&shared_state), credentials.clone())
        .await
        .ok_or_else(|| ImportError::Auth("authentication failed or timed out".to_string()))?;

    let token_mgr = TokenManager::new(user, credentials, token);
    if let Err(e) = token_mgr.persist().await {
        warning!("Failed to save token to cache: {}", e);
    }

    success!("Authentication successful!");
    Ok(token_mgr)
}

/// Runs the browser part of the flow and waits for the callback to deliver a token.
async fn auth(
    shared_state: Arc<Mutex<Option<PkceToken>>>,
    credentials: ClientCredentials,
) -> Option<Token> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);
    let state = utils::generate_code_verifier()[..16].to_string();

    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        start_api_server(server_state).await;
    });

    let auth_url = reqwest::Url::parse_with_params(
        &config::spotify_apiauth_url(),
        &[
            ("client_id", credentials.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config::spotify_redirect_uri().as_str()),
            ("code_challenge", code_challenge.as_str()),
            ("code_challenge_method", "S256"),
            ("state", state.as_str()),
            ("scope", config::spotify_scope().as_str()),
        ],
    );
    let auth_url = match auth_url {
        Ok(url) => url,
        Err(e) => {
            warning!("Invalid authorization URL: {}", e);
            return None;
        }
    };

    // Store verifier in shared state before redirect
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            state,
            credentials,
            token: None,
        });
    }

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    wait_for_token(shared_state).await
}

/// Polls the shared state once a second until the callback stored a token.
async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(AUTH_TIMEOUT_SECS);
    let start = Instant::now();

    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message("Waiting for authorization in the browser...");

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|p| p.token.clone()) {
            pb.finish_and_clear();
            return Some(token);
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    pb.finish_and_clear();
    None
}

/// Exchanges a refresh token for a new access token.
///
/// Spotify may or may not rotate the refresh token; the old one is kept when
/// the response does not carry a new one.
pub async fn refresh_token(
    credentials: &ClientCredentials,
    refresh_token: &str,
) -> Result<Token, String> {
    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .send()
        .await
        .map_err(|e| e.to_string())?;
    let res = check_status(res).await.map_err(|e| e.to_string())?;

    let json = res.json::<TokenResponse>().await.map_err(|e| e.to_string())?;
    Ok(into_token(json, Some(refresh_token)))
}

/// Exchanges the authorization code from the callback for a token.
pub async fn exchange_code_pkce(
    credentials: &ClientCredentials,
    code: &str,
    verifier: &str,
) -> Result<Token, String> {
    let redirect_uri = config::spotify_redirect_uri();

    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await
        .map_err(|e| e.to_string())?;
    let res = check_status(res).await.map_err(|e| e.to_string())?;

    let json = res.json::<TokenResponse>().await.map_err(|e| e.to_string())?;
    match json.refresh_token {
        Some(_) => Ok(into_token(json, None)),
        None => Err("token response carries no refresh token".to_string()),
    }
}

fn into_token(json: TokenResponse, previous_refresh: Option<&str>) -> Token {
    let refresh_token = json
        .refresh_token
        .or_else(|| previous_refresh.map(str::to_string))
        .unwrap_or_default();

    Token {
        access_token: json.access_token,
        refresh_token,
        scope: json.scope,
        expires_in: json.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    }
}
