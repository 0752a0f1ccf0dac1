//! # Spotify Integration Module
//!
//! Destination side of the import: a [`DestinationCatalog`](crate::catalog::DestinationCatalog)
//! backed by the Spotify Web API, plus the OAuth flow that produces its token.
//!
//! ```text
//! Importer
//!     ↓
//! SpotifyClient (search, library writes, playlists)
//!     ↓
//! TokenManager (cached token, refresh)
//!     ↓
//! Spotify Web API
//! ```
//!
//! ## Authentication
//!
//! [`auth`] runs the authorization code flow with PKCE. The app's client
//! secret is sent with the token exchange, the verifier protects the code. A
//! local axum server receives the redirect; the resulting token is cached per
//! username so later runs skip the browser.
//!
//! ## Endpoints used
//!
//! - `GET /me` - user id for playlist creation
//! - `GET /search` - track, album and artist matching
//! - `PUT /me/tracks`, `PUT /me/albums` - saving tracks and albums
//! - `PUT /me/following?type=artist` - following artists
//! - `POST /users/{user_id}/playlists` - creating playlists
//! - `POST /playlists/{playlist_id}/tracks` - adding tracks
//! - `PUT /playlists/{playlist_id}/images` - uploading covers
//!
//! ## Errors
//!
//! Calls never retry on their own. A `429` is returned as
//! [`ApiError::RateLimited`](crate::errors::ApiError::RateLimited) with the
//! `Retry-After` seconds so [`RetryPolicy`](crate::importer::RetryPolicy) can
//! wait and try again.

pub mod auth;
pub mod client;

pub use client::SpotifyClient;
