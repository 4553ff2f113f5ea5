//! Section model - the typed content blocks a page is built from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Variant Fields
// ============================================================================

/// Horizontal text alignment for hero and text sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub const OPTIONS: &'static [&'static str] = &["left", "center", "right"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

impl FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Alignment::Left),
            "center" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Right),
            other => Err(other.to_string()),
        }
    }
}

/// Side of the text an image-text section puts its image on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImagePosition {
    #[default]
    Left,
    Right,
}

impl ImagePosition {
    pub const OPTIONS: &'static [&'static str] = &["left", "right"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImagePosition::Left => "left",
            ImagePosition::Right => "right",
        }
    }
}

impl FromStr for ImagePosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(ImagePosition::Left),
            "right" => Ok(ImagePosition::Right),
            other => Err(other.to_string()),
        }
    }
}

/// One card inside a `cards` section
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSection {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSection {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardsSection {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub items: Vec<CardItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageTextSection {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_position: Option<ImagePosition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CtaSection {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
}

// ============================================================================
// Section
// ============================================================================

/// A content block of a page, tagged on the wire by `type`.
///
/// Decoding a `type` outside the five known kinds fails with serde's
/// "unknown variant" error, which names the offending tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Section {
    Hero(HeroSection),
    Content(TextSection),
    Cards(CardsSection),
    ImageText(ImageTextSection),
    Cta(CtaSection),
}

/// The five section kinds, without their payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    Hero,
    Content,
    Cards,
    ImageText,
    Cta,
}

impl SectionKind {
    pub const ALL: [SectionKind; 5] = [
        SectionKind::Hero,
        SectionKind::Content,
        SectionKind::Cards,
        SectionKind::ImageText,
        SectionKind::Cta,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Hero => "hero",
            SectionKind::Content => "content",
            SectionKind::Cards => "cards",
            SectionKind::ImageText => "image-text",
            SectionKind::Cta => "cta",
        }
    }

    /// Human label used by the section picker
    pub fn label(&self) -> &'static str {
        match self {
            SectionKind::Hero => "Hero",
            SectionKind::Content => "Text Content",
            SectionKind::Cards => "Card Grid",
            SectionKind::ImageText => "Image + Text",
            SectionKind::Cta => "Call to Action",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown section type: {}", s))
    }
}

impl Section {
    /// A section of `kind` with empty title and content
    pub fn empty(kind: SectionKind) -> Self {
        match kind {
            SectionKind::Hero => Section::Hero(HeroSection::default()),
            SectionKind::Content => Section::Content(TextSection::default()),
            SectionKind::Cards => Section::Cards(CardsSection::default()),
            SectionKind::ImageText => Section::ImageText(ImageTextSection::default()),
            SectionKind::Cta => Section::Cta(CtaSection::default()),
        }
    }

    pub fn kind(&self) -> SectionKind {
        match self {
            Section::Hero(_) => SectionKind::Hero,
            Section::Content(_) => SectionKind::Content,
            Section::Cards(_) => SectionKind::Cards,
            Section::ImageText(_) => SectionKind::ImageText,
            Section::Cta(_) => SectionKind::Cta,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Section::Hero(s) => &s.title,
            Section::Content(s) => &s.title,
            Section::Cards(s) => &s.title,
            Section::ImageText(s) => &s.title,
            Section::Cta(s) => &s.title,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Section::Hero(s) => &s.content,
            Section::Content(s) => &s.content,
            Section::Cards(s) => &s.content,
            Section::ImageText(s) => &s.content,
            Section::Cta(s) => &s.content,
        }
    }

    pub fn image_url(&self) -> Option<&str> {
        match self {
            Section::Hero(s) => s.image_url.as_deref(),
            Section::ImageText(s) => s.image_url.as_deref(),
            _ => None,
        }
    }

    /// Returns a copy with every rich-text `content` body passed through `clean`.
    ///
    /// Titles and button labels are plain text and stay as typed.
    pub fn map_content<F>(&self, clean: F) -> Section
    where
        F: Fn(&str) -> String,
    {
        let mut out = self.clone();
        match &mut out {
            Section::Hero(s) => s.content = clean(&s.content),
            Section::Content(s) => s.content = clean(&s.content),
            Section::Cards(s) => {
                s.content = clean(&s.content);
                for item in &mut s.items {
                    item.content = clean(&item.content);
                }
            }
            Section::ImageText(s) => s.content = clean(&s.content),
            Section::Cta(s) => s.content = clean(&s.content),
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_section_tag_names() {
        let names: Vec<String> = SectionKind::ALL
            .iter()
            .map(|kind| {
                let value = serde_json::to_value(Section::empty(*kind)).unwrap();
                value["type"].as_str().unwrap().to_string()
            })
            .collect();
        assert_eq!(names, ["hero", "content", "cards", "image-text", "cta"]);
    }

    #[test]
    fn test_decode_image_text_with_camel_case_fields() {
        let section: Section = serde_json::from_value(json!({
            "type": "image-text",
            "title": "Our lab",
            "imageUrl": "https://cdn.example.com/lab.png",
            "imagePosition": "right"
        }))
        .unwrap();

        match section {
            Section::ImageText(s) => {
                assert_eq!(s.title, "Our lab");
                assert_eq!(s.content, "");
                assert_eq!(s.image_url.as_deref(), Some("https://cdn.example.com/lab.png"));
                assert_eq!(s.image_position, Some(ImagePosition::Right));
            }
            other => panic!("unexpected section {:?}", other),
        }
    }

    #[test]
    fn test_decode_unknown_type_names_the_type() {
        let err = serde_json::from_value::<Section>(json!({ "type": "carousel" })).unwrap_err();
        assert!(err.to_string().contains("carousel"));
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("image-text".parse::<SectionKind>(), Ok(SectionKind::ImageText));
        assert_eq!(
            "video".parse::<SectionKind>(),
            Err("Unknown section type: video".to_string())
        );
    }

    #[test]
    fn test_empty_section_has_blank_text() {
        for kind in SectionKind::ALL {
            let section = Section::empty(kind);
            assert_eq!(section.kind(), kind);
            assert!(section.title().is_empty());
            assert!(section.content().is_empty());
        }
    }

    #[test]
    fn test_map_content_touches_cards() {
        let section = Section::Cards(CardsSection {
            title: "a".into(),
            content: "b".into(),
            items: vec![CardItem {
                title: "c".into(),
                content: "d".into(),
                image_url: Some("e".into()),
            }],
        });
        let upper = section.map_content(|s| s.to_uppercase());
        match upper {
            Section::Cards(s) => {
                assert_eq!(s.title, "a");
                assert_eq!(s.content, "B");
                assert_eq!(s.items[0].title, "c");
                assert_eq!(s.items[0].content, "D");
                assert_eq!(s.items[0].image_url.as_deref(), Some("e"));
            }
            other => panic!("unexpected section {:?}", other),
        }
    }
}
