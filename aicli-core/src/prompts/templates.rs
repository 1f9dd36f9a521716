//! `{{.Field}}` prompt templates.
//!
//! Templates are parsed once into literal and field segments. Rendering looks
//! each field up in a JSON object so any `Serialize` context works; arrays
//! render one element per line.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("unclosed action starting at byte {0}")]
    Unclosed(usize),
    #[error("unsupported action '{{{{{0}}}}}': only {{{{.Field}}}} placeholders are allowed")]
    UnsupportedAction(String),
    #[error("template references unknown field '{0}'")]
    UnknownField(String),
    #[error("template context must serialize to an object: {0}")]
    Context(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Field(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    segments: Vec<Segment>,
}

impl PromptTemplate {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                segments.push(Segment::Text(rest[..start].to_string()));
            }
            let after_open = &rest[start + 2..];
            let Some(end) = after_open.find("}}") else {
                return Err(TemplateError::Unclosed(offset + start));
            };

            let action = after_open[..end].trim();
            let field = action
                .strip_prefix('.')
                .filter(|name| is_identifier(name))
                .ok_or_else(|| TemplateError::UnsupportedAction(action.to_string()))?;
            segments.push(Segment::Field(field.to_string()));

            let consumed = start + 2 + end + 2;
            offset += consumed;
            rest = &rest[consumed..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }

        Ok(Self { segments })
    }

    /// Names of the fields the template references, in order of appearance.
    pub fn fields(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Field(name) => Some(name.as_str()),
                Segment::Text(_) => None,
            })
            .collect()
    }

    pub fn render<T: Serialize>(&self, context: &T) -> Result<String, TemplateError> {
        let value =
            serde_json::to_value(context).map_err(|err| TemplateError::Context(err.to_string()))?;
        let object = match value {
            Value::Object(map) => map,
            Value::Null => serde_json::Map::new(),
            other => return Err(TemplateError::Context(format!("got {other}"))),
        };

        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Field(name) => {
                    let value = object
                        .get(name)
                        .ok_or_else(|| TemplateError::UnknownField(name.clone()))?;
                    out.push_str(&value_to_text(value));
                }
            }
        }
        Ok(out)
    }

    /// Render with plain string pairs.
    pub fn render_pairs(&self, pairs: &[(&str, &str)]) -> Result<String, TemplateError> {
        let map: serde_json::Map<String, Value> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect();
        self.render(&map)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(value_to_text)
            .collect::<Vec<_>>()
            .join("\n"),
        other => other.to_string(),
    }
}
