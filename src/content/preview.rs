//! Page preview - an approximate, read-only rendering of title + sections.

use serde::Serialize;

use super::section::{ImagePosition, Section};
use super::sections::Sections;

/// Label for call-to-action buttons without text
pub const DEFAULT_BUTTON_LABEL: &str = "Learn More";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlexDirection {
    Row,
    RowReverse,
}

impl FlexDirection {
    fn css(&self) -> &'static str {
        match self {
            FlexDirection::Row => "row",
            FlexDirection::RowReverse => "row-reverse",
        }
    }
}

impl From<ImagePosition> for FlexDirection {
    fn from(position: ImagePosition) -> Self {
        match position {
            ImagePosition::Left => FlexDirection::Row,
            ImagePosition::Right => FlexDirection::RowReverse,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node", rename_all = "camelCase")]
pub enum PreviewNode {
    Heading { level: u8, text: String },
    /// Section body, a rich-text HTML fragment
    RichText { html: String },
    Image { src: String, alt: String },
    Row { direction: FlexDirection, children: Vec<PreviewNode> },
    Grid { children: Vec<PreviewNode> },
    Block { class: String, children: Vec<PreviewNode> },
    Button { label: String, disabled: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewDocument {
    pub title: String,
    pub body: Vec<PreviewNode>,
}

fn text_nodes(title: &str, content: &str, level: u8) -> Vec<PreviewNode> {
    let mut nodes = Vec::new();
    if !title.is_empty() {
        nodes.push(PreviewNode::Heading {
            level,
            text: title.to_string(),
        });
    }
    if !content.is_empty() {
        nodes.push(PreviewNode::RichText {
            html: content.to_string(),
        });
    }
    nodes
}

fn render_section(section: &Section) -> PreviewNode {
    let class = format!("section section-{}", section.kind());
    let children = match section {
        Section::Hero(s) => text_nodes(&s.title, &s.content, 1),
        Section::Content(s) => text_nodes(&s.title, &s.content, 2),
        Section::Cards(s) => {
            let mut nodes = text_nodes(&s.title, &s.content, 2);
            let cards = s
                .items
                .iter()
                .map(|item| {
                    let mut card = Vec::new();
                    if let Some(src) = &item.image_url {
                        card.push(PreviewNode::Image {
                            src: src.clone(),
                            alt: item.title.clone(),
                        });
                    }
                    card.extend(text_nodes(&item.title, &item.content, 3));
                    PreviewNode::Block {
                        class: "card".to_string(),
                        children: card,
                    }
                })
                .collect::<Vec<_>>();
            if !cards.is_empty() {
                nodes.push(PreviewNode::Grid { children: cards });
            }
            nodes
        }
        Section::ImageText(s) => {
            let text = text_nodes(&s.title, &s.content, 2);
            match &s.image_url {
                Some(src) => vec![PreviewNode::Row {
                    direction: s.image_position.unwrap_or_default().into(),
                    children: vec![
                        PreviewNode::Image {
                            src: src.clone(),
                            alt: s.title.clone(),
                        },
                        PreviewNode::Block {
                            class: "text".to_string(),
                            children: text,
                        },
                    ],
                }],
                None => text,
            }
        }
        Section::Cta(s) => {
            let mut nodes = text_nodes(&s.title, &s.content, 2);
            nodes.push(PreviewNode::Button {
                label: s
                    .button_text
                    .clone()
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| DEFAULT_BUTTON_LABEL.to_string()),
                disabled: true,
            });
            nodes
        }
    };
    PreviewNode::Block { class, children }
}

/// Renders `title` and `sections` into a preview tree.
pub fn render(title: &str, sections: &Sections) -> PreviewDocument {
    PreviewDocument {
        title: title.to_string(),
        body: sections.iter().map(render_section).collect(),
    }
}

pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn write_node(node: &PreviewNode, out: &mut String) {
    match node {
        PreviewNode::Heading { level, text } => {
            out.push_str(&format!("<h{0}>{1}</h{0}>", level, escape_html(text)));
        }
        PreviewNode::RichText { html } => {
            // Bodies are stored sanitized; cleaning again covers unsaved drafts
            out.push_str(&format!("<div class=\"rich-text\">{}</div>", ammonia::clean(html)));
        }
        PreviewNode::Image { src, alt } => {
            out.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\">",
                escape_html(src),
                escape_html(alt)
            ));
        }
        PreviewNode::Row { direction, children } => {
            out.push_str(&format!(
                "<div class=\"row\" style=\"display:flex;flex-direction:{}\">",
                direction.css()
            ));
            children.iter().for_each(|c| write_node(c, out));
            out.push_str("</div>");
        }
        PreviewNode::Grid { children } => {
            out.push_str("<div class=\"grid\">");
            children.iter().for_each(|c| write_node(c, out));
            out.push_str("</div>");
        }
        PreviewNode::Block { class, children } => {
            out.push_str(&format!("<div class=\"{}\">", escape_html(class)));
            children.iter().for_each(|c| write_node(c, out));
            out.push_str("</div>");
        }
        PreviewNode::Button { label, disabled } => {
            let attr = if *disabled { " disabled" } else { "" };
            out.push_str(&format!("<button{}>{}</button>", attr, escape_html(label)));
        }
    }
}

impl PreviewDocument {
    /// Standalone HTML page for the preview endpoint
    pub fn to_html(&self) -> String {
        let mut body = String::new();
        self.body.iter().for_each(|node| write_node(node, &mut body));
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{0}</title>\n</head>\n<body>\n<main class=\"preview\">\
             <h1 class=\"page-title\">{0}</h1>{1}</main>\n</body>\n</html>\n",
            escape_html(&self.title),
            body
        )
    }
}
