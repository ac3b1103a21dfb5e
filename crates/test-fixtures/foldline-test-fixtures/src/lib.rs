//! JSON fixtures under the repo-root `fixtures/` directory, indexed by
//! `fixtures/manifest.json`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Fixture name -> path relative to `fixtures/`, per kind.
#[derive(Debug, Deserialize)]
struct Manifest {
    layouts: BTreeMap<String, String>,
    classifications: BTreeMap<String, String>,
}

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../../../fixtures/manifest.json"))
        .expect("fixtures/manifest.json is valid")
});

/// One kind of fixture listed in the manifest.
#[derive(Copy, Clone, Debug)]
pub struct FixtureSet {
    kind: &'static str,
    entries: fn(&'static Manifest) -> &'static BTreeMap<String, String>,
}

/// Layout snapshots (container box, viewport height, anchor boxes).
pub fn layouts() -> FixtureSet {
    FixtureSet {
        kind: "layout",
        entries: |m| &m.layouts,
    }
}

/// Ranked classifier outputs (`[{ label, confidence }]`).
pub fn classifications() -> FixtureSet {
    FixtureSet {
        kind: "classification",
        entries: |m| &m.classifications,
    }
}

impl FixtureSet {
    /// Fixture names, sorted.
    pub fn keys(&self) -> Vec<String> {
        (self.entries)(&MANIFEST).keys().cloned().collect()
    }

    pub fn path(&self, name: &str) -> Result<PathBuf> {
        let rel = (self.entries)(&MANIFEST)
            .get(name)
            .ok_or_else(|| anyhow!("unknown {} fixture '{name}'", self.kind))?;
        Ok(Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(rel))
    }

    pub fn json(&self, name: &str) -> Result<String> {
        let path = self.path(name)?;
        fs::read_to_string(&path)
            .with_context(|| format!("reading {} fixture {}", self.kind, path.display()))
    }

    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        serde_json::from_str(&self.json(name)?)
            .with_context(|| format!("parsing {} fixture '{name}'", self.kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_manifest_entry_exists() {
        for set in [layouts(), classifications()] {
            for key in set.keys() {
                assert!(set.path(&key).unwrap().exists(), "missing fixture {key}");
            }
        }
    }

    #[test]
    fn unknown_fixture_is_an_error() {
        let err = layouts().json("nope").unwrap_err();
        assert!(err.to_string().contains("unknown layout fixture"));
    }

    #[test]
    fn malformed_target_type_reports_context() {
        let err = classifications().load::<Vec<u32>>("apple").unwrap_err();
        assert!(format!("{err:#}").contains("classification fixture 'apple'"));
    }
}
