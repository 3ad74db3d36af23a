//! Build script for storefront crate.
//!
//! Static assets get content-based hashes in their filenames so the CDN can
//! cache them immutably. The hashes land in `CSS_HASH` / `JS_HASH` env vars
//! for `env!` access from the template filters.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

fn main() {
    let manifest_dir: PathBuf = env::var("CARGO_MANIFEST_DIR")
        .expect("CARGO_MANIFEST_DIR must be set by Cargo")
        .into();

    hash_asset(&manifest_dir, "static/css/main.css", "CSS_HASH");
    hash_asset(&manifest_dir, "static/js/storefront.js", "JS_HASH");
}

/// Hash one asset and copy it into its `derived/` sibling directory with the
/// hash in the filename. Missing assets produce an empty hash so a fresh
/// checkout still builds.
fn hash_asset(manifest_dir: &Path, relative: &str, env_var: &str) {
    let source = manifest_dir.join(relative);
    println!("cargo:rerun-if-changed={}", source.display());

    let Ok(content) = fs::read(&source) else {
        println!("cargo:warning=Could not read {relative}");
        println!("cargo:rustc-env={env_var}=");
        return;
    };

    let digest = format!("{:x}", Sha256::digest(&content));
    let short_hash = digest.get(..8).unwrap_or_default();
    println!("cargo:rustc-env={env_var}={short_hash}");

    let parent = source.parent().expect("asset path has a parent directory");
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .expect("asset filename is valid UTF-8");
    let extension = source
        .extension()
        .and_then(|s| s.to_str())
        .expect("asset filename has an extension");

    let derived_dir = parent.join("derived");
    fs::create_dir_all(&derived_dir).expect("Failed to create derived asset directory");
    fs::copy(&source, derived_dir.join(format!("{stem}.{short_hash}.{extension}")))
        .expect("Failed to copy asset to derived directory");
}
