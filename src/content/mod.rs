/*!
 * Content Module
 * Page documents, their sections, and the tools that edit, preview and check them
 */
pub mod editor;
pub mod form;
pub mod preview;
pub mod rules;
pub mod section;
pub mod sections;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use form::FormValues;
pub use section::{Section, SectionKind};
pub use sections::{Direction, Sections};

/// Ordered sections of a page, stored as `{"sections": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    #[serde(default)]
    pub sections: Sections,
}

/// Persisted page document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub meta_description: Option<String>,
    pub published: bool,
    pub content: PageContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Page list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub published: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<&Page> for PageSummary {
    fn from(page: &Page) -> Self {
        Self {
            id: page.id,
            slug: page.slug.clone(),
            title: page.title.clone(),
            published: page.published,
            updated_at: page.updated_at,
        }
    }
}

/// Body of create and update calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInput {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub content: PageContent,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub published: bool,
}

impl PageInput {
    pub fn new(form: &FormValues, content: PageContent) -> Self {
        Self {
            slug: form.slug.clone(),
            title: form.title.clone(),
            content,
            meta_description: Some(form.meta_description.clone()).filter(|m| !m.is_empty()),
            published: form.published,
        }
    }

    /// Metadata view used to run the form schema on incoming requests
    pub fn form_values(&self) -> FormValues {
        FormValues {
            title: self.title.clone(),
            slug: self.slug.clone(),
            meta_description: self.meta_description.clone().unwrap_or_default(),
            published: self.published,
        }
    }

    /// Copy with every section body passed through `ammonia`
    pub fn sanitized(&self) -> Self {
        let sections = self
            .content
            .sections
            .iter()
            .map(|s| s.map_content(ammonia::clean))
            .collect();
        Self {
            content: PageContent { sections },
            ..self.clone()
        }
    }
}

/// Issue lists from one validation run, never merged with earlier runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssues {
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub seo_suggestions: Vec<String>,
}

impl ValidationIssues {
    pub fn has_problems(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }
}

/// Validation endpoint response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    #[serde(flatten)]
    pub issues: ValidationIssues,
    pub is_valid: bool,
}

impl From<ValidationIssues> for ValidationReport {
    fn from(issues: ValidationIssues) -> Self {
        Self {
            is_valid: issues.errors.is_empty(),
            issues,
        }
    }
}
