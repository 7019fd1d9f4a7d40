//! Property overlay loading.
//!
//! An overlay file carries configuration overrides merged into the script
//! config ahead of generation. The format is an array of `[[property]]`
//! tables, each with a `name` and a `value`:
//!
//! ```toml
//! [[property]]
//! name = "audit.table_suffix"
//! value = "_hist"
//! ```
//!
//! A missing or malformed overlay is a recoverable condition: generation
//! proceeds with an empty overlay. This is the only swallowed failure in
//! the pipeline.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

/// Flat mapping of configuration overrides. Keys are unique; later
/// duplicates in the source overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyOverlay {
    entries: BTreeMap<String, String>,
}

impl PropertyOverlay {
    /// Creates an empty overlay.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sets an override, replacing an earlier value for the same key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Looks up an override.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of overrides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the overlay carries no overrides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over overrides in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug, Deserialize)]
struct OverlayFile {
    #[serde(default)]
    property: Vec<OverlayEntry>,
}

#[derive(Debug, Deserialize)]
struct OverlayEntry {
    name: Option<String>,
    value: Option<String>,
}

/// Loads the overlay from an optional source file.
///
/// No source, a missing file, unreadable content, malformed TOML, and an
/// absent `[[property]]` array all degrade to an empty overlay; the
/// degraded cases are logged, never propagated.
#[must_use]
pub fn load(source: Option<&Path>) -> PropertyOverlay {
    let Some(path) = source else {
        return PropertyOverlay::empty();
    };

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            warn!(
                path = %path.display(),
                %err,
                "cannot read property overlay, proceeding without overrides"
            );
            return PropertyOverlay::empty();
        }
    };

    let parsed: OverlayFile = match toml::from_str(&text) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(
                path = %path.display(),
                %err,
                "malformed property overlay, proceeding without overrides"
            );
            return PropertyOverlay::empty();
        }
    };

    let mut overlay = PropertyOverlay::empty();
    for entry in parsed.property {
        match (entry.name, entry.value) {
            (Some(name), Some(value)) if !name.is_empty() && !value.is_empty() => {
                overlay.set(name, value);
            }
            (name, _) => {
                debug!(?name, "skipping overlay entry without name or value");
            }
        }
    }

    debug!(
        path = %path.display(),
        entries = overlay.len(),
        "loaded property overlay"
    );
    overlay
}
