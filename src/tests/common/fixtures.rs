//! Test Fixtures
//!
//! Provides a small catalog entry type independent of the shipped portfolio
//! data, plus contact form builders.

use crate::core::catalog::{CatalogEntry, EntryId};
use crate::core::contact::ContactFields;

// =============================================================================
// Catalog Fixtures
// =============================================================================

/// A bare catalog entry with three fixed categories.
#[derive(Debug, Clone, PartialEq)]
pub struct TestEntry {
    pub id: EntryId,
    pub title: String,
    pub category: String,
    pub tags: Vec<String>,
}

impl CatalogEntry for TestEntry {
    const COLLECTION: &'static str = "test entry";
    const CATEGORIES: &'static [(&'static str, &'static str)] =
        &[("web", "Web"), ("mobile", "Mobile"), ("design", "Design")];

    fn id(&self) -> EntryId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// Create a test entry.
pub fn create_test_entry(id: EntryId, title: &str, category: &str, tags: &[&str]) -> TestEntry {
    TestEntry {
        id,
        title: title.to_string(),
        category: category.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

/// A handful of entries covering every category and a shared tag.
pub fn create_test_entries() -> Vec<TestEntry> {
    vec![
        create_test_entry(1, "Storefront", "web", &["react", "api"]),
        create_test_entry(2, "Fitness Tracker", "mobile", &["flutter"]),
        create_test_entry(3, "Brand Refresh", "design", &["figma"]),
        create_test_entry(4, "Admin Dashboard", "web", &["react", "charts"]),
        create_test_entry(5, "Travel Planner", "mobile", &["react", "maps"]),
    ]
}

// =============================================================================
// Contact Fixtures
// =============================================================================

/// Contact form inputs that pass validation.
pub fn create_valid_fields() -> ContactFields {
    ContactFields {
        name: "Asha Rao".to_string(),
        email: "asha@example.com".to_string(),
        subject: "Collaboration".to_string(),
        message: "Would love to work together on a project.".to_string(),
    }
}
