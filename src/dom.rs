//! Headless stand-in for the handful of DOM features the widget touches.

use crate::errors::WidgetError;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Inline `style.display` of an element. Only the two values the page uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Display {
    #[default]
    Shown,
    Hidden,
}

impl Display {
    pub fn from_visible(visible: bool) -> Self {
        if visible { Self::Shown } else { Self::Hidden }
    }

    pub fn is_visible(self) -> bool {
        self == Self::Shown
    }
}

/// Element id of the form `<base>-<reading_id>`, or a bare base for
/// page-level elements.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn scoped(base: &str, suffix: impl fmt::Display) -> Self {
        Self(format!("{base}-{suffix}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Element {
    pub id: String,
    pub display: Display,
    pub text: String,
    pub value: String,
    pub attributes: BTreeMap<String, String>,
    pub classes: BTreeSet<String>,
    pub disabled: bool,
}

impl Element {
    pub fn new(id: &ElementId) -> Self {
        Self {
            id: id.as_str().to_string(),
            ..Self::default()
        }
    }

    pub fn hidden(mut self) -> Self {
        self.display = Display::Hidden;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_attr(mut self, name: &str, value: impl fmt::Display) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// `data-*` lookup, `name` given without the prefix.
    pub fn data(&self, name: &str) -> Option<&str> {
        self.attr(&format!("data-{name}"))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn swap_class(&mut self, remove: &str, add: &str) {
        self.classes.remove(remove);
        self.classes.insert(add.to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Document {
    elements: BTreeMap<String, Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, element: Element) {
        self.elements.insert(element.id.clone(), element);
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.elements.contains_key(id.as_str())
    }

    pub fn get(&self, id: &ElementId) -> Result<&Element, WidgetError> {
        self.elements
            .get(id.as_str())
            .ok_or_else(|| WidgetError::missing_element(id.as_str()))
    }

    pub fn get_mut(&mut self, id: &ElementId) -> Result<&mut Element, WidgetError> {
        self.elements
            .get_mut(id.as_str())
            .ok_or_else(|| WidgetError::missing_element(id.as_str()))
    }

    pub fn set_display(&mut self, id: &ElementId, display: Display) -> Result<(), WidgetError> {
        self.get_mut(id)?.display = display;
        Ok(())
    }

    pub fn set_text(&mut self, id: &ElementId, text: impl Into<String>) -> Result<(), WidgetError> {
        self.get_mut(id)?.text = text.into();
        Ok(())
    }

    pub fn set_value(&mut self, id: &ElementId, value: impl Into<String>) -> Result<(), WidgetError> {
        self.get_mut(id)?.value = value.into();
        Ok(())
    }
}
