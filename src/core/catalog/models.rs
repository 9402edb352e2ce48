use chrono::NaiveDate;
use serde::Deserialize;

use super::{CatalogEntry, EntryId};

// ── Profile ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub name: String,
    /// Rotating titles shown under the name in the hero section.
    pub roles: Vec<String>,
    pub tagline: String,
    /// About paragraphs.
    pub bio: Vec<String>,
    pub location: String,
    pub email: String,
    pub portfolio_url: String,
    pub socials: Vec<SocialLink>,
    pub highlights: Vec<Highlight>,
    pub achievements: Vec<Achievement>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Highlight {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Achievement {
    pub title: String,
    pub description: String,
}

// ── Projects ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct Milestone {
    pub date: NaiveDate,
    pub milestone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub id: EntryId,
    pub title: String,
    pub description: String,
    pub long_description: String,
    pub what_i_did: Vec<String>,
    pub tags: Vec<String>,
    pub github: Option<String>,
    pub demo: Option<String>,
    #[serde(default)]
    pub featured: bool,
    pub category: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub timeline: Vec<Milestone>,
}

impl Project {
    /// Chip value selecting featured projects.
    pub const FEATURED: &'static str = "featured";
}

impl CatalogEntry for Project {
    const COLLECTION: &'static str = "project";
    const CATEGORIES: &'static [(&'static str, &'static str)] =
        &[(Project::FEATURED, "Featured"), ("web", "Web"), ("ui", "UI")];

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

    fn matches_category(&self, category: &str) -> bool {
        (category == Self::FEATURED && self.featured)
            || category == super::filter::ALL
            || self.category == category
            || self.tags.iter().any(|tag| tag == category)
    }
}

// ── Skills ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct Skill {
    pub id: EntryId,
    pub name: String,
    pub category: String,
    pub description: String,
    /// Brand color as `#RRGGBB`.
    pub color: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Titles of projects that used this skill.
    #[serde(default)]
    pub projects: Vec<String>,
}

impl CatalogEntry for Skill {
    const COLLECTION: &'static str = "skill";
    const CATEGORIES: &'static [(&'static str, &'static str)] = &[
        ("design", "Design Tools"),
        ("frontend", "Frontend Development"),
        ("backend", "Backend Development"),
    ];

    fn id(&self) -> EntryId {
        self.id
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

// ── Education ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct Education {
    pub id: EntryId,
    pub degree: String,
    pub institution: String,
    pub duration: String,
    pub grade: String,
    pub category: String,
    pub details: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CatalogEntry for Education {
    const COLLECTION: &'static str = "education";
    const CATEGORIES: &'static [(&'static str, &'static str)] = &[("college", "College")];

    fn id(&self) -> EntryId {
        self.id
    }

    fn title(&self) -> &str {
        &self.degree
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn secondary_fields(&self) -> Vec<&str> {
        vec![self.institution.as_str()]
    }
}

// ── Certificates ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct Certificate {
    pub id: EntryId,
    pub name: String,
    pub issuer: String,
    pub description: String,
    pub link: String,
    #[serde(default)]
    pub verified: bool,
    pub date: NaiveDate,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Certificate {
    /// Text used when sharing the certificate on social platforms.
    pub fn share_text(&self) -> String {
        format!(
            "Check out my {} certification from {}! {}",
            self.name, self.issuer, self.link
        )
    }
}

impl CatalogEntry for Certificate {
    const COLLECTION: &'static str = "certificate";
    const CATEGORIES: &'static [(&'static str, &'static str)] =
        &[("design", "Design"), ("development", "Development")];

    fn id(&self) -> EntryId {
        self.id
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn secondary_fields(&self) -> Vec<&str> {
        vec![self.issuer.as_str()]
    }
}
