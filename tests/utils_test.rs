use std::{io::Cursor, path::PathBuf};

use base64::{Engine, engine::general_purpose::STANDARD};
use image::{ImageFormat, Rgba, RgbaImage};
use yandex2spotify::{
    catalog::{ArtistRef, ItemKind, Release, TrackRef},
    config::{Category, RunMode, Settings},
    errors::ImportError,
    importer::{JsonTrack, SourceItem, item::MAX_NAME_CHARS},
    utils::*,
};

fn png_bytes() -> Vec<u8> {
    let img = RgbaImage::from_pixel(4, 4, Rgba([200, 40, 40, 128]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

fn track(title: &str, artists: &[&str]) -> Release {
    Release {
        id: "1".to_string(),
        title: title.to_string(),
        artists: artists.iter().map(|a| a.to_string()).collect(),
        available: true,
    }
}

#[test]
fn test_generate_code_verifier_length_and_charset() {
    let verifier = generate_code_verifier();
    assert_eq!(verifier.len(), 128);
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(verifier, generate_code_verifier());
}

#[test]
fn test_generate_code_challenge() {
    // RFC 7636 appendix B
    let challenge = generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");
    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
}

#[test]
fn test_truncate_chars() {
    assert_eq!(truncate_chars("short", 100), None);
    assert_eq!(truncate_chars("abcdef", 6), None);
    assert_eq!(truncate_chars("abcdef", 3), Some("abc".to_string()));
    // counts characters, not bytes
    assert_eq!(truncate_chars("привет", 3), Some("при".to_string()));
}

#[test]
fn test_batch_count() {
    assert_eq!(batch_count(0, 50), 0);
    assert_eq!(batch_count(1, 50), 1);
    assert_eq!(batch_count(50, 50), 1);
    assert_eq!(batch_count(51, 50), 2);
    assert_eq!(batch_count(130, 50), 3);
}

#[test]
fn test_encode_cover_converts_png_to_jpeg() {
    let encoded = encode_cover_jpeg_base64(&png_bytes()).unwrap();
    let decoded = STANDARD.decode(encoded).unwrap();
    assert_eq!(image::guess_format(&decoded).unwrap(), ImageFormat::Jpeg);
}

#[test]
fn test_encode_cover_rejects_garbage() {
    let result = encode_cover_jpeg_base64(b"not an image");
    assert!(matches!(result, Err(ImportError::Cover(_))));
}

#[test]
fn test_track_query_drops_dash_separator() {
    let item = SourceItem::Track(track("Song", &["Y", "Z"]));
    let query = item.match_query();
    assert_eq!(query.display_name, "Y, Z - Song");
    assert_eq!(query.query, "Y, Z Song");
    assert_eq!(query.kind, ItemKind::Track);
    assert!(!query.truncated);
    assert_eq!(item.fallback_query(), Some("Y Song".to_string()));
}

#[test]
fn test_long_names_are_truncated() {
    let title = "T".repeat(150);
    let item = SourceItem::Album(track(&title, &["X"]));
    let query = item.match_query();
    assert!(query.truncated);
    assert_eq!(query.display_name.chars().count(), MAX_NAME_CHARS);
    assert!(query.display_name.starts_with("X - T"));
    assert_eq!(query.query, query.display_name.replace("- ", ""));
    assert_eq!(query.kind, ItemKind::Album);
}

#[test]
fn test_single_artist_and_artists_have_no_fallback() {
    let single = SourceItem::Track(track("Song", &["X"]));
    assert_eq!(single.fallback_query(), None);

    let artist = SourceItem::Artist(ArtistRef {
        id: "7".to_string(),
        name: "Boards of Canada".to_string(),
        available: true,
    });
    let query = artist.match_query();
    assert_eq!(query.query, "Boards of Canada");
    assert_eq!(query.kind, ItemKind::Artist);
    assert_eq!(artist.fallback_query(), None);
}

#[test]
fn test_json_track_becomes_raw_query() {
    let item: SourceItem = JsonTrack {
        artist: "Muse".to_string(),
        track: "Uprising".to_string(),
    }
    .into();
    assert!(item.is_available());
    assert_eq!(item.match_query().query, "Muse Uprising");
    assert_eq!(item.raw_name(), "Muse Uprising");
    assert_eq!(item.kind(), ItemKind::Track);
}

#[test]
fn test_track_ref_full_id() {
    let with_album = TrackRef {
        id: "10".to_string(),
        album_id: Some("20".to_string()),
    };
    let bare = TrackRef {
        id: "10".to_string(),
        album_id: None,
    };
    assert_eq!(with_album.full_id(), "10:20");
    assert_eq!(bare.full_id(), "10");
}

#[test]
fn test_categories_follow_ignore_list() {
    let all = Settings::default().categories();
    assert_eq!(all, Category::ALL.to_vec());

    let settings = Settings {
        ignore: vec![Category::Artists, Category::Albums],
        ..Settings::default()
    };
    assert_eq!(
        settings.categories(),
        vec![Category::Likes, Category::Playlists]
    );
}

#[test]
fn test_settings_reject_bad_timeout() {
    assert!(Settings::new(Vec::new(), false, 0.0).is_err());
    assert!(Settings::new(Vec::new(), false, -1.0).is_err());
    assert!(Settings::new(Vec::new(), false, f64::NAN).is_err());
    assert!(matches!(
        Settings::new(Vec::new(), false, 1e30),
        Err(ImportError::Config(_))
    ));

    let settings = Settings::new(vec![Category::Likes], true, 2.5).unwrap();
    assert!(settings.strict_search);
    assert_eq!(settings.timeout.as_millis(), 2500);
}

#[test]
fn test_run_mode_requires_exactly_one_source() {
    assert_eq!(
        RunMode::from_options(Some("tok".to_string()), None).unwrap(),
        RunMode::Library {
            token: "tok".to_string()
        }
    );
    assert_eq!(
        RunMode::from_options(None, Some(PathBuf::from("tracks.json"))).unwrap(),
        RunMode::Json {
            path: PathBuf::from("tracks.json")
        }
    );
    assert!(matches!(
        RunMode::from_options(None, None),
        Err(ImportError::Config(_))
    ));
    assert!(matches!(
        RunMode::from_options(Some("tok".to_string()), Some(PathBuf::from("a.json"))),
        Err(ImportError::Config(_))
    ));
}

#[test]
fn test_category_display_and_sections() {
    assert_eq!(Category::Likes.to_string(), "likes");
    assert_eq!(Category::Albums.section_name(), "Albums");
    assert_eq!(Category::Artists.section_name(), "Artists");
}
