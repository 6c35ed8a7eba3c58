// Resonator catalog loading (resonators.json).
//
// The catalog is static: loaded once at startup and shared read-only by the
// app loop and the view projection.

use serde::{Deserialize, Deserializer};
use std::collections::{BTreeSet, HashSet};
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("validation error: {0}")]
    Validation(String),
}

/// A draftable character.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Resonator {
    pub id: String,
    pub name: String,
    /// Element tags. The file may hold a single string or a list.
    #[serde(rename = "element", deserialize_with = "one_or_many")]
    pub elements: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_button: Option<String>,
    #[serde(default)]
    pub image_pick: Option<String>,
}

impl Resonator {
    pub fn has_element(&self, element: &str) -> bool {
        self.elements.iter().any(|e| e == element)
    }

    /// Short element text for grid cells, e.g. "Havoc/Spectro".
    pub fn element_label(&self) -> String {
        self.elements.join("/")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<String>, D::Error> {
    Ok(match OneOrMany::deserialize(de)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}

/// The loaded roster, in file order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    resonators: Vec<Resonator>,
}

impl Catalog {
    pub fn new(resonators: Vec<Resonator>) -> Self {
        Catalog { resonators }
    }

    pub fn resonators(&self) -> &[Resonator] {
        &self.resonators
    }

    pub fn len(&self) -> usize {
        self.resonators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resonators.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Resonator> {
        self.resonators.iter().find(|r| r.id == id)
    }

    /// Distinct element tags, sorted.
    pub fn elements(&self) -> Vec<String> {
        self.resonators
            .iter()
            .flat_map(|r| r.elements.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

fn load_from_reader<R: Read>(rdr: R) -> Result<Vec<Resonator>, serde_json::Error> {
    let raw: Vec<Resonator> = serde_json::from_reader(rdr)?;
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(raw.len());
    for r in raw {
        if r.id.trim().is_empty() {
            warn!("skipping resonator '{}': empty id", r.name);
            continue;
        }
        if !seen.insert(r.id.clone()) {
            warn!("duplicate resonator id '{}', keeping the first entry", r.id);
            continue;
        }
        out.push(r);
    }
    Ok(out)
}

/// Load the catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let file = std::fs::File::open(path).map_err(|e| CatalogError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let resonators = load_from_reader(std::io::BufReader::new(file)).map_err(|e| {
        CatalogError::Json {
            path: path.display().to_string(),
            source: e,
        }
    })?;
    if resonators.is_empty() {
        return Err(CatalogError::Validation(format!(
            "{} contains no resonators",
            path.display()
        )));
    }
    Ok(Catalog::new(resonators))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
