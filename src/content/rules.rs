//! Content rule checker backing the validation endpoint.
//!
//! Errors mark content that will publish badly, warnings mark likely
//! mistakes, SEO suggestions are advisory. None of them block a save.

use super::section::Section;
use super::{PageContent, ValidationIssues};

/// Slugs longer than this get truncated in search results
const SLUG_SEO_MAX: usize = 60;

/// Fewer words than this reads as a thin page
const THIN_PAGE_WORDS: usize = 50;

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Runs every rule against `content` published under `slug`.
pub fn check(content: &PageContent, slug: &str) -> ValidationIssues {
    let mut issues = ValidationIssues::default();
    let sections = &content.sections;

    if sections.is_empty() {
        issues.errors.push("Page has no sections".to_string());
        return issues;
    }

    let heroes = sections
        .iter()
        .filter(|s| matches!(s, Section::Hero(_)))
        .count();
    if heroes == 0 {
        issues
            .errors
            .push("Missing H1: add a hero section with a title".to_string());
    } else if heroes > 1 {
        issues
            .warnings
            .push(format!("Page has {} hero sections; only one H1 is recommended", heroes));
    }

    let mut words = 0;
    for (i, section) in sections.iter().enumerate() {
        let n = i + 1;
        words += word_count(section.title()) + word_count(section.content());

        match section {
            Section::Hero(s) => {
                if s.title.trim().is_empty() {
                    issues
                        .errors
                        .push(format!("Section {}: hero section is missing a title", n));
                }
                if s.button_text.is_some() && s.button_url.is_none() {
                    issues
                        .warnings
                        .push(format!("Section {}: hero button has no URL", n));
                }
            }
            Section::Content(s) => {
                if s.content.trim().is_empty() {
                    issues
                        .warnings
                        .push(format!("Section {}: text section has no content", n));
                }
            }
            Section::Cards(s) => {
                if s.items.is_empty() {
                    issues
                        .warnings
                        .push(format!("Section {}: card grid has no cards", n));
                }
                for (j, item) in s.items.iter().enumerate() {
                    words += word_count(&item.title) + word_count(&item.content);
                    if item.title.trim().is_empty() {
                        issues
                            .warnings
                            .push(format!("Section {}: card {} has no title", n, j + 1));
                    }
                }
            }
            Section::ImageText(s) => {
                if s.image_url.is_none() {
                    issues
                        .errors
                        .push(format!("Section {}: image-text section has no image", n));
                } else if s.title.trim().is_empty() && s.content.trim().is_empty() {
                    issues.seo_suggestions.push(format!(
                        "Section {}: add text next to the image so it can be indexed",
                        n
                    ));
                }
            }
            Section::Cta(s) => {
                if s.button_url.as_deref().map_or(true, |u| u.trim().is_empty()) {
                    issues
                        .errors
                        .push(format!("Section {}: call to action has no button URL", n));
                }
            }
        }
    }

    if slug.len() > SLUG_SEO_MAX {
        issues.seo_suggestions.push(format!(
            "Shorten the slug to {} characters or less",
            SLUG_SEO_MAX
        ));
    }

    if words < THIN_PAGE_WORDS {
        issues.seo_suggestions.push(format!(
            "Page has {} words; aim for at least {} so search engines can index it",
            words, THIN_PAGE_WORDS
        ));
    }

    issues
}
