//! Static portfolio catalog: the profile plus the four browsable collections.
//!
//! The catalog is compiled into the binary as JSON and parsed once at
//! startup. A replacement file can be supplied through `data.catalog_path`
//! in the config; it must follow the same layout.

pub mod filter;
mod models;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub use models::{
    Achievement, Certificate, Education, Highlight, Milestone, Profile, Project, Skill,
    SocialLink,
};

/// Stable identifier of an entry within its collection.
pub type EntryId = u32;

/// The catalog shipped with the binary.
const EMBEDDED_CATALOG: &str = include_str!("portfolio.json");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate {collection} id {id}")]
    DuplicateId {
        collection: &'static str,
        id: EntryId,
    },
}

/// An immutable, build-time record shown in one of the browsable sections.
///
/// The filter engine only talks to entries through this trait, so the same
/// search/category/modal machinery serves projects, skills, education and
/// certificates alike.
pub trait CatalogEntry {
    /// Collection name used in logs and error messages.
    const COLLECTION: &'static str;

    /// Category chips offered for this collection as `(value, label)` pairs,
    /// not including the `all` sentinel.
    const CATEGORIES: &'static [(&'static str, &'static str)];

    fn id(&self) -> EntryId;

    /// Title or name, always searchable.
    fn title(&self) -> &str;

    fn category(&self) -> &str;

    fn tags(&self) -> &[String];

    /// Searchable fields beyond the title and tags (institution, issuer...).
    fn secondary_fields(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Every field the free-text query is matched against.
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title()];
        fields.extend(self.secondary_fields());
        fields.extend(self.tags().iter().map(String::as_str));
        fields
    }

    /// Whether the entry belongs to the given category slot.
    ///
    /// Category buttons and tag clicks share one slot, so a match on either
    /// the category or any tag counts.
    fn matches_category(&self, category: &str) -> bool {
        category == filter::ALL
            || self.category() == category
            || self.tags().iter().any(|tag| tag == category)
    }
}

/// Everything the portfolio displays.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    pub profile: Profile,
    pub projects: Vec<Project>,
    pub skills: Vec<Skill>,
    pub education: Vec<Education>,
    pub certificates: Vec<Certificate>,
}

impl Catalog {
    /// Parse the catalog compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load a catalog override from disk.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&contents)?;
        log::info!("Loaded catalog override from {}", path.display());
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        check_unique_ids(&catalog.projects)?;
        check_unique_ids(&catalog.skills)?;
        check_unique_ids(&catalog.education)?;
        check_unique_ids(&catalog.certificates)?;
        Ok(catalog)
    }

    /// Look up a project by id.
    pub fn project(&self, id: EntryId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }
}

fn check_unique_ids<T: CatalogEntry>(entries: &[T]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(entry.id()) {
            return Err(CatalogError::DuplicateId {
                collection: T::COLLECTION,
                id: entry.id(),
            });
        }
    }
    Ok(())
}
