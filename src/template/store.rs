//! Read-only store of the compiled-in mail templates

use std::collections::HashMap;

use crate::incident::Language;

use super::substitution::substitute_placeholders;
use super::types::{TemplateError, TemplateParams, TemplateResult};

macro_rules! template {
    ($name:literal, $lang:ident, $file:literal) => {
        (
            $name,
            Language::$lang,
            include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/", $file)),
        )
    };
}

const BUILTIN_TEMPLATES: &[(&str, Language, &str)] = &[
    template!("created", Es, "created.es.txt"),
    template!("created", Pt, "created.pt.txt"),
    template!("updated", Es, "updated.es.txt"),
    template!("updated", Pt, "updated.pt.txt"),
    template!("closed", Es, "closed.es.txt"),
    template!("closed", Pt, "closed.pt.txt"),
    template!("iaresponse", Es, "iaresponse.es.txt"),
    template!("iaresponse", Pt, "iaresponse.pt.txt"),
    template!("urgent", Es, "urgent.es.txt"),
    template!("urgent", Pt, "urgent.pt.txt"),
    template!("updaterisk", Es, "updaterisk.es.txt"),
    template!("updaterisk", Pt, "updaterisk.pt.txt"),
];

/// Template bodies keyed by `(name, language)`.
///
/// Content never changes at runtime, so a store can be shared freely
/// between requests.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    templates: HashMap<(String, Language), String>,
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateStore {
    /// Create a store holding the built-in templates
    pub fn new() -> Self {
        Self::from_entries(
            BUILTIN_TEMPLATES
                .iter()
                .map(|(name, language, body)| (*name, *language, *body)),
        )
    }

    /// Create a store from arbitrary `(name, language, body)` entries
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, Language, &'a str)>) -> Self {
        let templates = entries
            .into_iter()
            .map(|(name, language, body)| ((name.to_string(), language), body.to_string()))
            .collect();

        Self { templates }
    }

    /// Raw body of a template
    pub fn get(&self, name: &str, language: Language) -> TemplateResult<&str> {
        self.templates
            .get(&(name.to_string(), language))
            .map(String::as_str)
            .ok_or_else(|| TemplateError::NotFound {
                name: name.to_string(),
                language: language.to_string(),
            })
    }

    /// Check if a template exists
    pub fn exists(&self, name: &str, language: Language) -> bool {
        self.templates.contains_key(&(name.to_string(), language))
    }

    /// Get the number of templates
    pub fn count(&self) -> usize {
        self.templates.len()
    }

    /// Render a template with the given parameters
    pub fn render(
        &self,
        name: &str,
        language: Language,
        params: &TemplateParams,
    ) -> TemplateResult<String> {
        let body = self.get(name, language)?;
        substitute_placeholders(name, body, params)
    }
}
