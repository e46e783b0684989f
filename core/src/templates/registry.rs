#![deny(missing_docs)]

//! # Template Registry
//!
//! Maps each architecture style to its template set. Adding a style means
//! registering one more `TemplateSet`; generators never branch on the style.

use crate::error::{AppError, AppResult};
use crate::schema::ArchitectureStyle;
use crate::templates::{flat, layered, TemplateSet};
use indexmap::IndexMap;

/// Style-keyed template sets.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    sets: IndexMap<ArchitectureStyle, TemplateSet>,
}

impl TemplateRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in flat and layered sets.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(flat::template_set());
        registry.register(layered::template_set());
        registry
    }

    /// Adds or replaces the set for its style.
    pub fn register(&mut self, set: TemplateSet) {
        self.sets.insert(set.style, set);
    }

    /// Returns the set for `style`.
    pub fn select(&self, style: ArchitectureStyle) -> AppResult<&TemplateSet> {
        self.sets.get(&style).ok_or_else(|| {
            AppError::Render(format!("No templates registered for the {} style", style))
        })
    }
}
