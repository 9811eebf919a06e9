//! Declarative page templates.
//!
//! A template maps fields of the navigation context (addressed by dotted
//! paths such as `product.name`) to named slots of a page surface. Text slots
//! hold a single string; repeated slots produce one row per element of a
//! context array, each row mapping its own field paths.

use super::page::Surface;
use serde_json::Value;
use std::collections::BTreeMap;

/// One row of a repeated slot: row field name -> text
pub type Row = BTreeMap<String, String>;

/// Rendered content of a surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Content {
    text: BTreeMap<String, String>,
    lists: BTreeMap<String, Vec<Row>>,
}

impl Content {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of a slot, empty if the slot was never rendered
    pub fn text(&self, slot: &str) -> &str {
        self.text.get(slot).map_or("", String::as_str)
    }

    /// Rows of a repeated slot
    pub fn list(&self, slot: &str) -> &[Row] {
        self.lists.get(slot).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.lists.is_empty()
    }

    pub fn set_text(&mut self, slot: impl Into<String>, text: impl Into<String>) {
        self.text.insert(slot.into(), text.into());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Directive {
    Text {
        slot: String,
        path: String,
    },
    Repeat {
        slot: String,
        path: String,
        fields: Vec<(String, String)>,
    },
}

/// Compiled set of slot bindings for one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    directives: Vec<Directive>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a text slot to a context path
    pub fn text(mut self, slot: &str, path: &str) -> Self {
        self.directives.push(Directive::Text {
            slot: slot.to_string(),
            path: path.to_string(),
        });
        self
    }

    /// Bind a repeated slot to a context array; `fields` maps row field
    /// names to paths relative to each array element.
    pub fn repeat(mut self, slot: &str, path: &str, fields: &[(&str, &str)]) -> Self {
        self.directives.push(Directive::Repeat {
            slot: slot.to_string(),
            path: path.to_string(),
            fields: fields
                .iter()
                .map(|(name, path)| ((*name).to_string(), (*path).to_string()))
                .collect(),
        });
        self
    }

    /// Produce fresh content from a context value.
    pub fn apply(&self, context: &Value) -> Content {
        let mut content = Content::new();

        for directive in &self.directives {
            match directive {
                Directive::Text { slot, path } => {
                    content
                        .text
                        .insert(slot.clone(), to_text(lookup(context, path)));
                }
                Directive::Repeat { slot, path, fields } => {
                    let rows = lookup(context, path)
                        .and_then(Value::as_array)
                        .map(|items| {
                            items
                                .iter()
                                .map(|item| {
                                    fields
                                        .iter()
                                        .map(|(name, path)| {
                                            (name.clone(), to_text(lookup(item, path)))
                                        })
                                        .collect::<Row>()
                                })
                                .collect()
                        })
                        .unwrap_or_default();
                    content.lists.insert(slot.clone(), rows);
                }
            }
        }

        content
    }
}

/// Renders a context into a surface using a template.
pub trait Renderer {
    fn render(&mut self, surface: &mut Surface, template: &Template, context: &Value);
}

/// Default renderer: replaces the surface content with the template output.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateRenderer;

impl Renderer for TemplateRenderer {
    fn render(&mut self, surface: &mut Surface, template: &Template, context: &Value) {
        surface.set_content(template.apply(context));
    }
}

/// Resolve a dotted path (`a.b.0.c`) inside a JSON value.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }

    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Text at `path` inside a JSON value; empty when absent or null.
pub fn lookup_text(value: &Value, path: &str) -> String {
    to_text(lookup(value, path))
}

fn to_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
