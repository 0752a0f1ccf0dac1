//! # Yandex Music Integration Module
//!
//! Source side of the import: a [`SourceCatalog`](crate::catalog::SourceCatalog)
//! backed by the Yandex Music mobile API. Requests authenticate with the
//! account token passed on the command line (`Authorization: OAuth <token>`).
//!
//! Wire objects from [`crate::types`] are mapped to the catalog's own types
//! here, so nothing past this module sees Yandex field names.

pub mod client;

pub use client::YandexClient;
