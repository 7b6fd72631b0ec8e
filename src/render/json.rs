//! JSON renderer: machine-readable API for tooling integration.
//!
//! Serializes the model with serde. Modules named in the exclusion list are
//! left out of every JSON artifact.

use crate::catalog::Catalog;
use crate::model::*;
use crate::render::{Renderer, SiteConfig};
use serde::ser::{Serialize, SerializeMap, Serializer};

pub struct JsonRenderer {
    excluded: Vec<String>,
}

impl JsonRenderer {
    pub fn new(excluded: Vec<String>) -> Self {
        Self { excluded }
    }

    fn is_excluded(&self, module: &Module) -> bool {
        self.excluded.iter().any(|name| *name == module.name)
    }
}

/// `{"modules": {...}, "programs": {...}}` keyed by name in catalog order.
#[derive(serde::Serialize)]
struct Api<'a> {
    modules: KeyedBy<'a, Module>,
    programs: KeyedBy<'a, Program>,
}

/// Serializes records as a map from name to record, preserving order.
struct KeyedBy<'a, T>(Vec<(&'a str, &'a T)>);

impl<T: Serialize> Serialize for KeyedBy<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, record) in &self.0 {
            map.serialize_entry(name, record)?;
        }
        map.end()
    }
}

impl Renderer for JsonRenderer {
    fn render_module(&self, module: &Module, _site: &SiteConfig) -> Option<String> {
        if self.is_excluded(module) {
            tracing::debug!(module = %module.name, "excluded from JSON output");
            return None;
        }
        Some(to_json(module))
    }

    fn render_program(&self, program: &Program, _site: &SiteConfig) -> String {
        to_json(program)
    }

    fn render_index(&self, catalog: &Catalog, _site: &SiteConfig) -> String {
        let api = Api {
            modules: KeyedBy(
                catalog
                    .modules
                    .iter()
                    .filter(|m| !self.is_excluded(m))
                    .map(|m| (m.name.as_str(), m))
                    .collect(),
            ),
            programs: KeyedBy(
                catalog
                    .programs
                    .iter()
                    .map(|p| (p.name.as_str(), p))
                    .collect(),
            ),
        };
        to_json(&api)
    }

    fn file_extension(&self) -> &str {
        "json"
    }

    fn index_file_name(&self) -> String {
        "api.json".to_string()
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    // Serializing plain structs with string keys cannot fail
    let mut out = serde_json::to_string_pretty(value).unwrap_or_default();
    out.push('\n');
    out
}
