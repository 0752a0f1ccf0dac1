//! # API Module
//!
//! HTTP endpoints of the local server that receives the Spotify OAuth
//! redirect while the importer authorises a new account.
//!
//! - [`callback`] - exchanges the authorization code for a token and hands it
//!   to the waiting auth flow through the shared state
//! - [`health`] - reports that the server is up, with the crate version
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use yandex2spotify::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
