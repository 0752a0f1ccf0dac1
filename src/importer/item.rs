use crate::catalog::{ArtistRef, ItemKind, Release};

/// Longest display name used for searching; longer names make the search endpoint fail.
pub const MAX_NAME_CHARS: usize = 100;

/// Anything the resolver can look up in the destination catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceItem {
    Track(Release),
    Album(Release),
    Artist(ArtistRef),
    /// A free-form `{artist, track}` pair from a JSON import file.
    RawQuery { artist: String, track: String },
}

/// Search string and target kind derived from a [`SourceItem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchQuery {
    pub query: String,
    pub kind: ItemKind,
    /// Name reported when the item is not found.
    pub display_name: String,
    /// Whether the display name had to be cut to [`MAX_NAME_CHARS`].
    pub truncated: bool,
}

impl SourceItem {
    pub fn kind(&self) -> ItemKind {
        match self {
            SourceItem::Track(_) | SourceItem::RawQuery { .. } => ItemKind::Track,
            SourceItem::Album(_) => ItemKind::Album,
            SourceItem::Artist(_) => ItemKind::Artist,
        }
    }

    pub fn is_available(&self) -> bool {
        match self {
            SourceItem::Track(release) | SourceItem::Album(release) => release.available,
            SourceItem::Artist(artist) => artist.available,
            SourceItem::RawQuery { .. } => true,
        }
    }

    /// Bare title or name, recorded when a lookup fails with an API error.
    pub fn raw_name(&self) -> String {
        match self {
            SourceItem::Track(release) | SourceItem::Album(release) => release.title.clone(),
            SourceItem::Artist(artist) => artist.name.clone(),
            SourceItem::RawQuery { artist, track } => format!("{} {}", artist, track),
        }
    }

    pub fn match_query(&self) -> MatchQuery {
        match self {
            SourceItem::RawQuery { artist, track } => {
                let query = format!("{} {}", artist, track);
                MatchQuery {
                    display_name: query.clone(),
                    query,
                    kind: ItemKind::Track,
                    truncated: false,
                }
            }
            SourceItem::Artist(artist) => MatchQuery {
                query: artist.name.clone(),
                kind: ItemKind::Artist,
                display_name: artist.name.clone(),
                truncated: false,
            },
            SourceItem::Track(release) | SourceItem::Album(release) => {
                let full_name = format!("{} - {}", release.artists.join(", "), release.title);
                let (display_name, truncated) =
                    match crate::utils::truncate_chars(&full_name, MAX_NAME_CHARS) {
                        Some(cut) => (cut, true),
                        None => (full_name, false),
                    };

                MatchQuery {
                    // "- " separators confuse the search ranking
                    query: display_name.replace("- ", ""),
                    kind: self.kind(),
                    display_name,
                    truncated,
                }
            }
        }
    }

    /// `"{first artist} {title}"`, only for multi-artist tracks and albums.
    pub fn fallback_query(&self) -> Option<String> {
        match self {
            SourceItem::Track(release) | SourceItem::Album(release)
                if release.artists.len() > 1 =>
            {
                Some(format!("{} {}", release.artists[0], release.title))
            }
            _ => None,
        }
    }
}
