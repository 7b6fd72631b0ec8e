//! GitHub-flavored markdown renderer.

use crate::catalog::Catalog;
use crate::model::*;
use crate::render::{Renderer, SiteConfig};
use crate::toc;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render_module(&self, module: &Module, site: &SiteConfig) -> Option<String> {
        let mut lines: Vec<String> = Vec::new();

        lines.push(format!("# {}\n", module.name));

        if !module.description.is_empty() {
            lines.push(format!("{}\n", module.description));
        }

        if let Some(ref version) = module.version {
            lines.push(format!("**Version:** {}\n", version));
        }

        if !module.dependencies.is_empty() {
            let links: Vec<String> = module
                .dependencies
                .iter()
                .map(|d| format!("[{}]({}.md)", d, d))
                .collect();
            lines.push(format!("**Dependencies:** {}\n", links.join(", ")));
        }

        if let Some(cmd) = site.install_command(module) {
            lines.push("## Installation\n".to_string());
            lines.push(format!("```sh\n{}\n```\n", cmd));
        }

        // Examples
        if !module.examples.is_empty() {
            lines.push("## Examples\n".to_string());
            for example in &module.examples {
                lines.push(format!("```lua\n{}\n```\n", example));
            }
        }

        // Classes
        if !module.classes.is_empty() {
            lines.push("## Classes\n".to_string());
            for class in &module.classes {
                lines.push(render_class(class));
            }
        }

        // Functions
        if !module.functions.is_empty() {
            lines.push("## Functions\n".to_string());
            for func in &module.functions {
                lines.push(toc::render_toc_item(&func.name, &func.signature()));
            }
            lines.push(String::new());
            for func in &module.functions {
                lines.push(render_function(func, module, site));
            }
        }

        Some(lines.join("\n"))
    }

    fn render_program(&self, program: &Program, _site: &SiteConfig) -> String {
        let mut out = program.content.clone();
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out
    }

    fn render_index(&self, catalog: &Catalog, site: &SiteConfig) -> String {
        let mut lines: Vec<String> = Vec::new();
        lines.push(format!("# {}\n", site.title));
        if let Some(ref tagline) = site.tagline {
            lines.push(format!("{}\n", tagline));
        }

        if !catalog.modules.is_empty() {
            lines.push("## Modules\n".to_string());
            for module in &catalog.modules {
                lines.push(index_entry(&module.name, &format!("{}.md", module.name), &module.description));
            }
            lines.push(String::new());
        }

        if !catalog.programs.is_empty() {
            lines.push("## Programs\n".to_string());
            for program in &catalog.programs {
                let href = format!("programs/{}.md", program.name);
                lines.push(index_entry(program.display_name(), &href, &program.description));
            }
            lines.push(String::new());
        }

        lines.join("\n")
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

fn index_entry(label: &str, href: &str, description: &str) -> String {
    if description.is_empty() {
        format!("- [{}]({})", label, href)
    } else {
        format!("- [{}]({}): {}", label, href, description)
    }
}

fn render_class(class: &Class) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("### {}\n", class.name));
    if !class.description.is_empty() {
        lines.push(format!("{}\n", class.description));
    }
    if !class.fields.is_empty() {
        lines.push("**Fields:**\n".to_string());
        for field in &class.fields {
            lines.push(render_entry(field));
        }
        lines.push(String::new());
    }
    lines.join("\n")
}

fn render_function(func: &Function, module: &Module, site: &SiteConfig) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("### `{}`\n", func.signature()));

    if !func.description.is_empty() {
        lines.push(format!("{}\n", func.description));
    }

    if !func.params.is_empty() {
        lines.push("**Parameters:**\n".to_string());
        for param in &func.params {
            lines.push(render_entry(param));
        }
        lines.push(String::new());
    }

    if !func.returns.is_empty() {
        lines.push(format!("**Returns:** {}\n", func.returns));
    }

    if let Some(url) = site.source_url(module, Some(func.source_line)) {
        lines.push(format!("[View source]({})\n", url));
    }

    lines.join("\n")
}

/// `- `name` (type) *(optional)*: description`
fn render_entry(entry: &Param) -> String {
    let mut out = format!("- `{}` ({})", entry.name, entry.ty);
    if entry.is_optional() {
        out.push_str(" *(optional)*");
    }
    if !entry.description.is_empty() {
        out.push_str(": ");
        out.push_str(&entry.description);
    }
    out
}
