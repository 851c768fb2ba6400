//! Shared fiddle source blocks for integration tests.
//!
//! Fixtures live under the repository-level `fixtures/` directory and are
//! addressed by the short names listed in `fixtures/manifest.json`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    fiddles: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

/// Names of all available fiddle fixtures, sorted.
pub fn fiddle_names() -> Vec<String> {
    let mut names: Vec<String> = MANIFEST.fiddles.keys().cloned().collect();
    names.sort();
    names
}

/// Load a fiddle source block by manifest name.
pub fn load_fiddle(name: &str) -> Result<String> {
    let rel = MANIFEST
        .fiddles
        .get(name)
        .ok_or_else(|| anyhow!("unknown fiddle fixture '{name}'"))?;
    let path = fixtures_root().join(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}
