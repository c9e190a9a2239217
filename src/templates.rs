//! Page templates for the dashboard
//!
//! A template is plain HTML with `{{.}}` placeholders. Rendering substitutes
//! the single data value, HTML-escaped, at every placeholder.
//!
//! Escaping is context-free: the same entity escaping applies inside text and
//! attribute values, and URLs are not rewritten or filtered.

use anyhow::{Context, Result};
use std::fmt;
use std::path::Path;

pub const AVAILABLE_TEMPLATE: &str = "available.html";
pub const AWAY_TEMPLATE: &str = "away.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// `{{` without a matching `}}`
    Unterminated { name: String, offset: usize },

    /// `{{...}}` action other than `{{.}}`
    UnknownAction { name: String, action: String },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::Unterminated { name, offset } => {
                write!(f, "template {}: unterminated action at byte {}", name, offset)
            }
            TemplateError::UnknownAction { name, action } => {
                write!(f, "template {}: unsupported action {{{{{}}}}}", name, action)
            }
        }
    }
}

impl std::error::Error for TemplateError {}

#[derive(Debug, Clone)]
enum Segment {
    Text(String),
    Value,
}

/// A parsed page template
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(name: &str, source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                segments.push(Segment::Text(rest[..start].to_string()));
            }
            let after = &rest[start + 2..];
            let end = after.find("}}").ok_or_else(|| TemplateError::Unterminated {
                name: name.to_string(),
                offset: offset + start,
            })?;

            let action = after[..end].trim();
            if action != "." {
                return Err(TemplateError::UnknownAction {
                    name: name.to_string(),
                    action: action.to_string(),
                });
            }
            segments.push(Segment::Value);

            let consumed = start + 2 + end + 2;
            offset += consumed;
            rest = &rest[consumed..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            segments,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render with `value` escaped into every placeholder
    pub fn render(&self, value: &str) -> String {
        let escaped = escape_html(value);
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Value => out.push_str(&escaped),
            }
        }
        out
    }
}

/// The two dashboard pages
#[derive(Debug, Clone)]
pub struct Templates {
    pub available: Template,
    pub away: Template,
}

impl Templates {
    /// Load `available.html` and `away.html` from the static directory
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        Ok(Self {
            available: load_template(dir, AVAILABLE_TEMPLATE)?,
            away: load_template(dir, AWAY_TEMPLATE)?,
        })
    }
}

fn load_template(dir: &Path, name: &str) -> Result<Template> {
    let path = dir.join(name);
    let source = std::fs::read_to_string(&path)
        .with_context(|| format!("Could not find {} template at {}", name, path.display()))?;

    Template::parse(name, &source).with_context(|| format!("Failed to parse {}", name))
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            '+' => out.push_str("&#43;"),
            '\0' => out.push('\u{FFFD}'),
            _ => out.push(c),
        }
    }
    out
}
