//! Parser module: builds Module and Program records from raw text.

pub mod deps;
pub mod line;
pub mod lua;
pub mod readme;
pub mod tag;

use crate::model::{Module, Program};
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;

/// File extensions recognized as Lua sources.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["lua"];

/// Extraction settings shared by every file in a run.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Prefixes stripped from `require` targets, e.g. `/lib/`
    pub library_prefixes: Vec<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            library_prefixes: vec!["/lib/".to_string(), "lib/".to_string()],
        }
    }
}

/// Extract a Module from Lua source text.
pub fn parse_module(name: &str, path: &str, input: &str, options: &ParseOptions) -> Module {
    Module {
        name: name.to_string(),
        path: path.to_string(),
        description: lua::module_description(input),
        version: deps::version(input),
        dependencies: deps::dependencies(input, name, &options.library_prefixes),
        examples: lua::examples(input),
        functions: lua::functions(input),
        classes: lua::classes(input),
    }
}

/// Parse a source file into a Module named after its file stem.
pub fn parse_file(path: &Path, content: &str, options: &ParseOptions) -> Result<Module> {
    let ext = path.extension().and_then(|e| e.to_str());
    if !ext.is_some_and(|e| SUPPORTED_EXTENSIONS.contains(&e)) {
        return Err(anyhow!("unsupported file type: {}", path.display()));
    }
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .with_context(|| format!("no file name: {}", path.display()))?;
    let rel = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| name.clone());

    let module = parse_module(&name, &rel, content, options);
    tracing::debug!(
        module = %module.name,
        functions = module.functions.len(),
        classes = module.classes.len(),
        examples = module.examples.len(),
        "parsed module"
    );
    Ok(module)
}

/// Read `<dir>/README.md` into a Program named after the directory.
///
/// Returns `Ok(None)` when the directory has no README.
pub fn load_program(dir: &Path) -> Result<Option<Program>> {
    let readme = dir.join(readme::README_FILE);
    if !readme.is_file() {
        tracing::debug!(dir = %dir.display(), "no {} found, skipping", readme::README_FILE);
        return Ok(None);
    }
    let content = fs::read_to_string(&readme)
        .with_context(|| format!("failed to read {}", readme.display()))?;
    let name = dir
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| dir.display().to_string());
    Ok(Some(readme::parse(&name, &content)))
}
