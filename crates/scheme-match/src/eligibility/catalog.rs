use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use super::domain::{Scheme, SchemeId};

const STANDARD_CATALOG: &str = include_str!("../../data/standard_schemes.json");

/// Errors raised while loading scheme reference data.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read scheme catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid scheme catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("scheme at position {index} has an empty id")]
    EmptyId { index: usize },
    #[error("duplicate scheme id '{0}'")]
    DuplicateId(SchemeId),
}

/// Immutable, cheaply clonable list of schemes shared by every evaluation.
#[derive(Debug, Clone)]
pub struct SchemeCatalog {
    schemes: Arc<[Scheme]>,
}

impl SchemeCatalog {
    /// Build a catalog, rejecting empty or duplicate ids.
    pub fn new(schemes: Vec<Scheme>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(schemes.len());
        for (index, scheme) in schemes.iter().enumerate() {
            if scheme.id.as_str().trim().is_empty() {
                return Err(CatalogError::EmptyId { index });
            }
            if !seen.insert(&scheme.id) {
                return Err(CatalogError::DuplicateId(scheme.id.clone()));
            }
            if scheme.eligibility.is_none() {
                debug!(scheme_id = %scheme.id, "scheme has no eligibility criteria");
            }
        }

        Ok(Self {
            schemes: schemes.into(),
        })
    }

    /// Built-in catalog of central and state welfare schemes.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::from_json_str(STANDARD_CATALOG)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let schemes: Vec<Scheme> = serde_json::from_str(raw)?;
        Self::new(schemes)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let schemes: Vec<Scheme> = serde_json::from_reader(reader)?;
        Self::new(schemes)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let catalog = Self::from_reader(std::io::BufReader::new(file))?;
        info!(path = %path.display(), schemes = catalog.len(), "loaded scheme catalog");
        Ok(catalog)
    }

    /// Load from `path` when given, otherwise fall back to [`SchemeCatalog::standard`].
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::standard(),
        }
    }

    pub fn get(&self, id: &SchemeId) -> Option<&Scheme> {
        self.schemes.iter().find(|scheme| &scheme.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Scheme> {
        self.schemes.iter()
    }

    pub fn schemes(&self) -> &[Scheme] {
        &self.schemes
    }

    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }
}

impl<'a> IntoIterator for &'a SchemeCatalog {
    type Item = &'a Scheme;
    type IntoIter = std::slice::Iter<'a, Scheme>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
