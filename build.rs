//! Build script for the CICK Playlister service.
//!
//! Copies the `.env.example` template into the user's local data directory, next
//! to where the service looks for its `.env` file:
//! - Linux: `~/.local/share/cick-playlister/.env.example`
//! - macOS: `~/Library/Application Support/cick-playlister/.env.example`
//! - Windows: `%LOCALAPPDATA%/cick-playlister/.env.example`
//!
//! A missing template or an unwritable data directory only produces a cargo warning.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("cick-playlister");

    if env_example_path.is_file() {
        // the data directory may be read-only in sandboxed builds
        if let Err(e) = fs::create_dir_all(&out_dir)
            .and_then(|_| fs::copy(&env_example_path, out_dir.join(".env.example")))
        {
            println!(
                "cargo:warning=cannot copy .env.example to {}: {}",
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
