//! Build script for the Yandex Music to Spotify importer.
//!
//! Copies `.env.example` from the crate root into the local data directory,
//! next to where `config::load_env` looks for `.env`, so users find a
//! template with every supported variable:
//! - Linux: `~/.local/share/yandex2spotify/.env.example`
//! - macOS: `~/Library/Application Support/yandex2spotify/.env.example`
//! - Windows: `%LOCALAPPDATA%/yandex2spotify/.env.example`
//!
//! A missing template only produces a cargo warning.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("yandex2spotify");

    if env_example_path.is_file() {
        // a read-only data dir (sandboxed builds) must not break the build
        if let Err(e) = fs::create_dir_all(&out_dir)
            .and_then(|_| fs::copy(&env_example_path, out_dir.join(".env.example")))
        {
            println!(
                "cargo:warning=could not copy .env.example to {}: {}",
                out_dir.display(),
                e
            );
        }
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
