//! Page form schema - metadata checks that run before a page is saved.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Longest meta description search engines display in full
pub const META_DESCRIPTION_MAX: usize = 160;

lazy_static::lazy_static! {
    /// Lowercase letters, numbers, and hyphens
    static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9-]+$").unwrap();
}

/// First rule `slug` breaks, if any
pub fn slug_error(slug: &str) -> Option<&'static str> {
    if slug.is_empty() {
        Some("Slug is required")
    } else if !SLUG_REGEX.is_match(slug) {
        Some("Slug must contain only lowercase letters, numbers, and hyphens")
    } else if slug.starts_with('-') || slug.ends_with('-') {
        Some("Slug cannot start or end with a hyphen")
    } else {
        None
    }
}

/// URL-safe slug: lowercase letters, numbers and inner hyphens
pub fn is_valid_slug(slug: &str) -> bool {
    slug_error(slug).is_none()
}

/// Editable page metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValues {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub published: bool,
}

/// Field name -> messages, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors(BTreeMap<&'static str, Vec<String>>);

impl FormErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .flat_map(|(field, messages)| messages.iter().map(move |m| format!("{}: {}", field, m)))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for FormErrors {}

impl FormValues {
    /// Checks every field and reports all violations at once.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();

        if self.title.trim().is_empty() {
            errors.push("title", "Title is required");
        }

        if let Some(message) = slug_error(&self.slug) {
            errors.push("slug", message);
        }

        if self.meta_description.chars().count() > META_DESCRIPTION_MAX {
            errors.push(
                "metaDescription",
                format!(
                    "Meta description must be {} characters or less",
                    META_DESCRIPTION_MAX
                ),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
