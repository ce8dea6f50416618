//! Core data types for message templates
//!
//! - `Template`: a named message body with its derived placeholder names
//! - `RenderContext`: name-to-value bindings supplied at render time
//! - `Preview`: the result of rendering a stored template

use crate::template::engine;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named message template
///
/// `variables` is always the extraction of `message`; construct templates
/// through [`Template::new`] so the two cannot drift apart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Template {
    /// Opaque unique identifier
    pub id: String,
    /// Display name
    pub title: String,
    /// Message body containing `{{name}}` placeholders
    pub message: String,
    /// Placeholder names in order of appearance, duplicates preserved
    #[serde(default)]
    pub variables: Vec<String>,
}

impl Template {
    /// Create a template, deriving its variables from `message`
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let message = message.into();
        let variables = engine::extract_variables(&message);
        Self {
            id: id.into(),
            title: title.into(),
            message,
            variables,
        }
    }

    /// Re-derive `variables` from `message`.
    ///
    /// Returns `true` if the stored list was out of date.
    pub fn refresh_variables(&mut self) -> bool {
        let derived = engine::extract_variables(&self.message);
        if derived == self.variables {
            false
        } else {
            self.variables = derived;
            true
        }
    }

    /// Render this template's message against `values`
    pub fn render(&self, values: &RenderContext) -> String {
        engine::render(&self.message, values)
    }

    /// Distinct variable names, first appearance wins
    pub fn distinct_variables(&self) -> Vec<String> {
        engine::distinct_variables(&self.message)
    }
}

/// Values bound to placeholder names for one render call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderContext {
    values: HashMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind every distinct variable of `template` to an empty value
    ///
    /// This is the initial state of a preview form: rendering it returns the
    /// message unchanged.
    pub fn blank_for(template: &Template) -> Self {
        template
            .distinct_variables()
            .into_iter()
            .map(|name| (name, String::new()))
            .collect()
    }

    /// Builder: bind `name` to `value`
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Bind `name` to `value`, replacing any previous binding
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Value bound to `name`, possibly empty
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over all bindings in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<HashMap<String, String>> for RenderContext {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RenderContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Rendered output of a stored template
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Preview {
    pub template_id: String,
    pub title: String,
    pub rendered: String,
    /// Distinct names left as literal placeholders
    pub unresolved: Vec<String>,
}
