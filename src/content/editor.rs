//! Section editor - type-specific fields and immutable edits of one section.

use thiserror::Error;

use super::section::{Alignment, CardItem, ImagePosition, Section};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("field '{field}' does not apply to {kind} sections")]
    NotApplicable { field: &'static str, kind: &'static str },

    #[error("'{value}' is not a valid option for '{field}'")]
    InvalidOption { field: &'static str, value: String },

    #[error("card {index} out of range (len {len})")]
    CardOutOfRange { index: usize, len: usize },
}

/// Editable section fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionField {
    Title,
    Content,
    ImageUrl,
    ButtonText,
    ButtonUrl,
    Alignment,
    ImagePosition,
    BgColor,
}

impl SectionField {
    pub fn name(&self) -> &'static str {
        match self {
            SectionField::Title => "title",
            SectionField::Content => "content",
            SectionField::ImageUrl => "imageUrl",
            SectionField::ButtonText => "buttonText",
            SectionField::ButtonUrl => "buttonUrl",
            SectionField::Alignment => "alignment",
            SectionField::ImagePosition => "imagePosition",
            SectionField::BgColor => "bgColor",
        }
    }
}

/// Editable card fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    Title,
    Content,
    ImageUrl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Url,
    Select(&'static [&'static str]),
}

/// One input the editor renders for a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub field: SectionField,
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: String,
}

/// A single change to a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionEdit {
    Set(SectionField, String),
    AddCard,
    RemoveCard(usize),
    EditCard(usize, CardField, String),
}

fn descriptor(field: SectionField, label: &'static str, kind: FieldKind, value: &str) -> FieldDescriptor {
    FieldDescriptor {
        field,
        label,
        kind,
        value: value.to_string(),
    }
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// Lists the inputs to render for `section`, in display order.
pub fn fields(section: &Section) -> Vec<FieldDescriptor> {
    use SectionField as F;

    let mut out = vec![
        descriptor(F::Title, "Title", FieldKind::Text, section.title()),
        descriptor(F::Content, "Content", FieldKind::TextArea, section.content()),
    ];

    match section {
        Section::Hero(s) => {
            out.push(descriptor(F::ImageUrl, "Background Image URL", FieldKind::Url, opt(&s.image_url)));
            out.push(descriptor(F::ButtonText, "Button Text", FieldKind::Text, opt(&s.button_text)));
            out.push(descriptor(F::ButtonUrl, "Button URL", FieldKind::Url, opt(&s.button_url)));
            out.push(descriptor(
                F::Alignment,
                "Alignment",
                FieldKind::Select(Alignment::OPTIONS),
                s.alignment.map(|a| a.as_str()).unwrap_or(""),
            ));
        }
        Section::Content(s) => {
            out.push(descriptor(
                F::Alignment,
                "Alignment",
                FieldKind::Select(Alignment::OPTIONS),
                s.alignment.map(|a| a.as_str()).unwrap_or(""),
            ));
        }
        // card items are edited through SectionEdit::EditCard
        Section::Cards(_) => {}
        Section::ImageText(s) => {
            out.push(descriptor(F::ImageUrl, "Image URL", FieldKind::Url, opt(&s.image_url)));
            out.push(descriptor(
                F::ImagePosition,
                "Image Position",
                FieldKind::Select(ImagePosition::OPTIONS),
                s.image_position.map(|p| p.as_str()).unwrap_or(""),
            ));
        }
        Section::Cta(s) => {
            out.push(descriptor(F::ButtonText, "Button Text", FieldKind::Text, opt(&s.button_text)));
            out.push(descriptor(F::ButtonUrl, "Button URL", FieldKind::Url, opt(&s.button_url)));
            out.push(descriptor(F::BgColor, "Background Color", FieldKind::Text, opt(&s.bg_color)));
        }
    }

    out
}

/// Empty input clears an optional field
fn optional(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn parse_alignment(value: String) -> Result<Option<Alignment>, EditError> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|value| EditError::InvalidOption {
            field: SectionField::Alignment.name(),
            value,
        })
}

fn parse_image_position(value: String) -> Result<Option<ImagePosition>, EditError> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|value| EditError::InvalidOption {
            field: SectionField::ImagePosition.name(),
            value,
        })
}

/// Returns a copy of `section` with `edit` applied.
///
/// `section` itself is left untouched; card edits rebuild the items vector.
pub fn apply(section: &Section, edit: SectionEdit) -> Result<Section, EditError> {
    let kind = section.kind().as_str();
    let mut next = section.clone();

    match edit {
        SectionEdit::Set(field, value) => set_field(&mut next, field, value)?,
        SectionEdit::AddCard => {
            let items = card_items(&mut next, kind)?;
            *items = items.iter().cloned().chain([CardItem::default()]).collect();
        }
        SectionEdit::RemoveCard(index) => {
            let items = card_items(&mut next, kind)?;
            check_card(items, index)?;
            *items = items
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, item)| item.clone())
                .collect();
        }
        SectionEdit::EditCard(index, field, value) => {
            let items = card_items(&mut next, kind)?;
            check_card(items, index)?;
            let mut updated = items[index].clone();
            match field {
                CardField::Title => updated.title = value,
                CardField::Content => updated.content = value,
                CardField::ImageUrl => updated.image_url = optional(value),
            }
            *items = items
                .iter()
                .enumerate()
                .map(|(i, item)| if i == index { updated.clone() } else { item.clone() })
                .collect();
        }
    }

    Ok(next)
}

fn card_items<'a>(section: &'a mut Section, kind: &'static str) -> Result<&'a mut Vec<CardItem>, EditError> {
    match section {
        Section::Cards(s) => Ok(&mut s.items),
        _ => Err(EditError::NotApplicable { field: "items", kind }),
    }
}

fn check_card(items: &[CardItem], index: usize) -> Result<(), EditError> {
    if index < items.len() {
        Ok(())
    } else {
        Err(EditError::CardOutOfRange {
            index,
            len: items.len(),
        })
    }
}

fn set_field(section: &mut Section, field: SectionField, value: String) -> Result<(), EditError> {
    use SectionField as F;

    let kind = section.kind().as_str();
    let not_applicable = || EditError::NotApplicable {
        field: field.name(),
        kind,
    };

    match (section, field) {
        (Section::Hero(s), F::Title) => s.title = value,
        (Section::Content(s), F::Title) => s.title = value,
        (Section::Cards(s), F::Title) => s.title = value,
        (Section::ImageText(s), F::Title) => s.title = value,
        (Section::Cta(s), F::Title) => s.title = value,

        (Section::Hero(s), F::Content) => s.content = value,
        (Section::Content(s), F::Content) => s.content = value,
        (Section::Cards(s), F::Content) => s.content = value,
        (Section::ImageText(s), F::Content) => s.content = value,
        (Section::Cta(s), F::Content) => s.content = value,

        (Section::Hero(s), F::ImageUrl) => s.image_url = optional(value),
        (Section::ImageText(s), F::ImageUrl) => s.image_url = optional(value),

        (Section::Hero(s), F::ButtonText) => s.button_text = optional(value),
        (Section::Cta(s), F::ButtonText) => s.button_text = optional(value),
        (Section::Hero(s), F::ButtonUrl) => s.button_url = optional(value),
        (Section::Cta(s), F::ButtonUrl) => s.button_url = optional(value),

        (Section::Hero(s), F::Alignment) => s.alignment = parse_alignment(value)?,
        (Section::Content(s), F::Alignment) => s.alignment = parse_alignment(value)?,

        (Section::ImageText(s), F::ImagePosition) => s.image_position = parse_image_position(value)?,

        (Section::Cta(s), F::BgColor) => s.bg_color = optional(value),

        _ => return Err(not_applicable()),
    }

    Ok(())
}
