//! Renderer module: trait-based format dispatch.

pub mod html;
pub mod json;
pub mod markdown;

use crate::catalog::Catalog;
use crate::model::{Module, Program};
use anyhow::{anyhow, Result};

/// Site-wide settings used by the renderers.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub title: String,
    pub tagline: Option<String>,
    /// Browsable source base, e.g. `https://github.com/o/r/blob/main/util`
    pub repo_url: Option<String>,
    /// Raw file base used for `wget` install commands
    pub raw_url: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Lua Documentation".to_string(),
            tagline: None,
            repo_url: None,
            raw_url: None,
        }
    }
}

impl SiteConfig {
    /// Link to a module's source, optionally at a line.
    pub fn source_url(&self, module: &Module, line: Option<usize>) -> Option<String> {
        let base = self.repo_url.as_deref()?.trim_end_matches('/');
        Some(match line {
            Some(line) => format!("{}/{}#L{}", base, module.path, line),
            None => format!("{}/{}", base, module.path),
        })
    }

    /// `wget` command that installs a module's file.
    pub fn install_command(&self, module: &Module) -> Option<String> {
        let base = self.raw_url.as_deref()?.trim_end_matches('/');
        Some(format!("wget {}/{} {}", base, module.path, module.path))
    }
}

/// Trait for rendering catalog records into a specific output format.
pub trait Renderer {
    /// Page for one module. `None` skips the module in this format.
    fn render_module(&self, module: &Module, site: &SiteConfig) -> Option<String>;
    fn render_program(&self, program: &Program, site: &SiteConfig) -> String;
    fn render_index(&self, catalog: &Catalog, site: &SiteConfig) -> String;
    fn file_extension(&self) -> &str;

    fn index_file_name(&self) -> String {
        format!("index.{}", self.file_extension())
    }
}

/// Create a renderer for the given format name.
///
/// `excluded` names modules kept out of machine-readable output.
pub fn create_renderer(format: &str, excluded: &[String]) -> Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "html" => Ok(Box::new(html::HtmlRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer::new(excluded.to_vec()))),
        _ => Err(anyhow!(
            "unknown format: {}. Use markdown, html, or json",
            format
        )),
    }
}
