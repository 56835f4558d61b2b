//! Document-level style declarations matched by class name or component id.

use crate::parsers::StyleParseError;
use crate::style::Style;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stylesheet {
    /// Styles applied to components carrying the class name.
    pub classes: HashMap<String, Style>,
    /// Styles applied to the component with the given id.
    pub ids: HashMap<String, Style>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, StyleParseError> {
        serde_json::from_str(json).map_err(|e| StyleParseError::Parse(e.to_string()))
    }

    pub fn add_class(&mut self, name: impl Into<String>, style: Style) {
        self.classes.insert(name.into(), style);
    }

    pub fn add_id(&mut self, id: impl Into<String>, style: Style) {
        self.ids.insert(id.into(), style);
    }

    /// Looks up a style by its class name.
    pub fn get_style_by_class_name(&self, class_name: &str) -> Option<&Style> {
        self.classes.get(class_name)
    }

    pub fn get_style_by_id(&self, id: &str) -> Option<&Style> {
        self.ids.get(id)
    }

    /// Styles that apply to a component, lowest priority first: each class in
    /// the order given (whitespace separated), then the id style.
    pub fn matching(&self, class_list: Option<&str>, id: &str) -> Vec<&Style> {
        let mut matched: Vec<&Style> = class_list
            .into_iter()
            .flat_map(str::split_whitespace)
            .filter_map(|name| self.get_style_by_class_name(name))
            .collect();
        matched.extend(self.get_style_by_id(id));
        matched
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.ids.is_empty()
    }
}
