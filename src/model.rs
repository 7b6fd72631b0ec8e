//! Data model for extracted documentation: format-agnostic.

use serde::{Deserialize, Serialize};

/// Documentation for a single Lua source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// File stem, e.g. "cache" for `cache.lua`
    pub name: String,
    /// Source path relative to its input directory
    pub path: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Required module names in first-seen order, never including `name`
    pub dependencies: Vec<String>,
    /// `@usage` blocks, verbatim
    pub examples: Vec<String>,
    pub functions: Vec<Function>,
    pub classes: Vec<Class>,
}

/// A documented function or method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    /// Qualified name as written (`cache.get`, `Cache:set`)
    pub name: String,
    pub params: Vec<Param>,
    /// Text of the last `@return` tag
    pub returns: String,
    pub description: String,
    /// 1-based line of the `function` keyword
    #[serde(rename = "line")]
    pub source_line: usize,
}

impl Function {
    /// Comma-separated parameter names for signatures.
    pub fn signature(&self) -> String {
        let names: Vec<&str> = self.params.iter().map(|p| p.name.as_str()).collect();
        format!("{}({})", self.name, names.join(", "))
    }
}

/// A `@param` or `@field` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Name, including a trailing `?` when optional
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub description: String,
}

impl Param {
    pub fn is_optional(&self) -> bool {
        self.name.ends_with('?')
    }
}

/// `@field` entries share the `@param` shape.
pub type Field = Param;

/// A documented `@class`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub name: String,
    pub description: String,
    pub fields: Vec<Field>,
}

/// Documentation for a multi-file program, read from its README.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Directory name
    pub name: String,
    /// First top-level heading
    pub title: String,
    pub description: String,
    pub features: Vec<String>,
    pub components: Vec<String>,
    pub requirements: Vec<String>,
    /// Run-style install command, e.g. `wget run https://...`
    pub installation: String,
    /// Full README text
    pub content: String,
}

impl Program {
    /// Title when present, otherwise the directory name.
    pub fn display_name(&self) -> &str {
        if self.title.is_empty() {
            &self.name
        } else {
            &self.title
        }
    }
}
