//! HTML renderer: standalone pages sharing one stylesheet.

use crate::catalog::Catalog;
use crate::model::*;
use crate::render::{Renderer, SiteConfig};
use crate::toc::github_slug;

pub struct HtmlRenderer;

/// Index descriptions are cut to this many characters.
const SUMMARY_LIMIT: usize = 200;

const PRISM: &str = "https://cdnjs.cloudflare.com/ajax/libs/prism/1.29.0";

const COPY_SCRIPT: &str = "\
<script>
function copyInstallCommand(btn) {
  const cmd = document.getElementById('install-cmd').textContent;
  navigator.clipboard.writeText(cmd).then(() => {
    btn.textContent = 'Copied!';
    btn.classList.add('copied');
    setTimeout(() => {
      btn.textContent = 'Copy Command';
      btn.classList.remove('copied');
    }, 2000);
  }).catch(() => {
    btn.textContent = 'Failed';
    setTimeout(() => { btn.textContent = 'Copy Command'; }, 2000);
  });
}
</script>
";

const STYLE: &str = "\
:root { --bg: #ffffff; --text: #1a1a1a; --link: #0066cc; --border: #e0e0e0; --code-bg: #f5f5f5; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #1a1a1a; --text: #e0e0e0; --link: #4d9fff; --border: #333333; --code-bg: #2a2a2a; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: var(--text); background: var(--bg); max-width: 1200px; margin: 0 auto; padding: 2rem; }
a { color: var(--link); text-decoration: none; }
a:hover { text-decoration: underline; }
h2 { margin-top: 2.5rem; padding-bottom: 0.5rem; border-bottom: 1px solid var(--border); }
code { background: var(--code-bg); padding: 0.2rem 0.4rem; border-radius: 3px; font-family: 'Monaco', 'Courier New', monospace; font-size: 0.9em; }
pre { background: var(--code-bg); padding: 1rem; border-radius: 4px; overflow-x: auto; border: 1px solid var(--border); }
pre code { background: none; padding: 0; }
.header { border-bottom: 2px solid var(--border); padding-bottom: 1.5rem; margin-bottom: 2rem; }
.meta { opacity: 0.8; font-size: 0.95em; }
.card, .function { padding: 1.25rem; margin: 1rem 0; border: 1px solid var(--border); border-radius: 6px; }
.card h3, .function h3 { margin-top: 0; }
.params ul { list-style: none; padding-left: 0; }
.params li { padding: 0.25rem 0 0.25rem 1rem; border-left: 3px solid var(--border); margin: 0.25rem 0; }
.optional { font-style: italic; opacity: 0.7; }
.source { font-size: 0.85em; opacity: 0.7; }
.copy-btn { background: transparent; color: var(--link); border: 1px solid var(--link); padding: 0.5rem 1rem; border-radius: 4px; cursor: pointer; font-family: inherit; }
.copy-btn:hover { background: var(--link); color: white; }
.copy-btn.copied { background: #28a745; border-color: #28a745; color: white; }
.install-cmd { background: var(--bg); border: 1px solid var(--border); padding: 0.75rem; border-radius: 4px; font-family: 'Monaco', 'Courier New', monospace; word-break: break-all; }
";

impl Renderer for HtmlRenderer {
    fn render_module(&self, module: &Module, site: &SiteConfig) -> Option<String> {
        let highlight = !module.examples.is_empty();
        let mut out = page_head(&format!("{} - {}", module.name, site.title), highlight);

        out.push_str("<div class=\"back-link\"><a href=\"index.html\">&larr; Back to index</a></div>\n");
        out.push_str("<div class=\"header\">\n");
        out.push_str(&format!("<h1>{}</h1>\n", html_escape(&module.name)));
        if !module.description.is_empty() {
            out.push_str(&format!("<p>{}</p>\n", html_escape(&module.description)));
        }
        out.push_str(&render_meta(module));
        out.push_str("</div>\n");

        if let Some(cmd) = site.install_command(module) {
            out.push_str(&render_install(&cmd, site.source_url(module, None).as_deref()));
        }

        // Examples
        if !module.examples.is_empty() {
            out.push_str("<h2>Examples</h2>\n");
            for example in &module.examples {
                out.push_str(&format!(
                    "<pre><code class=\"language-lua\">{}</code></pre>\n",
                    html_escape(example)
                ));
            }
        }

        // Classes
        if !module.classes.is_empty() {
            out.push_str("<h2>Classes</h2>\n");
            for class in &module.classes {
                out.push_str(&render_class_html(class));
            }
        }

        // Functions
        if !module.functions.is_empty() {
            out.push_str("<h2>Functions</h2>\n<ul>\n");
            for func in &module.functions {
                out.push_str(&format!(
                    "  <li><a href=\"#{}\">{}</a></li>\n",
                    github_slug(&func.signature()),
                    html_escape(&func.name)
                ));
            }
            out.push_str("</ul>\n");
            for func in &module.functions {
                out.push_str(&render_function_html(func, module, site));
            }
        }

        if highlight {
            out.push_str(&format!("<script src=\"{}/prism.min.js\"></script>\n", PRISM));
            out.push_str(&format!(
                "<script src=\"{}/components/prism-lua.min.js\"></script>\n",
                PRISM
            ));
        }
        out.push_str("</body>\n</html>\n");
        Some(out)
    }

    fn render_program(&self, program: &Program, _site: &SiteConfig) -> String {
        let mut out = page_head(program.display_name(), false);

        out.push_str("<div class=\"back-link\"><a href=\"../index.html\">&larr; Back to index</a></div>\n");
        out.push_str("<div class=\"header\">\n");
        out.push_str(&format!("<h1>{}</h1>\n", html_escape(program.display_name())));
        if !program.description.is_empty() {
            out.push_str(&format!("<p>{}</p>\n", html_escape(&program.description)));
        }
        out.push_str("</div>\n");

        if !program.installation.is_empty() {
            out.push_str(&render_install(&program.installation, None));
        }

        render_list(&mut out, "Features", &program.features);
        render_list(&mut out, "Components", &program.components);
        render_list(&mut out, "Requirements", &program.requirements);

        out.push_str("<h2>README</h2>\n");
        out.push_str(&format!(
            "<pre class=\"readme\">{}</pre>\n",
            html_escape(&program.content)
        ));

        out.push_str("</body>\n</html>\n");
        out
    }

    fn render_index(&self, catalog: &Catalog, site: &SiteConfig) -> String {
        let mut out = page_head(&site.title, false);

        out.push_str(&format!("<h1>{}</h1>\n", html_escape(&site.title)));
        if let Some(ref tagline) = site.tagline {
            out.push_str(&format!("<p>{}</p>\n", html_escape(tagline)));
        }

        if !catalog.modules.is_empty() {
            out.push_str("<h2>Modules</h2>\n<div class=\"modules\">\n");
            for module in &catalog.modules {
                out.push_str(&render_card(
                    &format!("{}.html", module.name),
                    &module.name,
                    &module.description,
                ));
            }
            out.push_str("</div>\n");
        }

        if !catalog.programs.is_empty() {
            out.push_str("<h2>Programs</h2>\n<div class=\"programs\">\n");
            for program in &catalog.programs {
                out.push_str(&render_card(
                    &format!("programs/{}.html", program.name),
                    program.display_name(),
                    &program.description,
                ));
            }
            out.push_str("</div>\n");
        }

        out.push_str("</body>\n</html>\n");
        out
    }

    fn file_extension(&self) -> &str {
        "html"
    }
}

fn page_head(title: &str, highlight: bool) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    out.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    if highlight {
        out.push_str(&format!(
            "<link href=\"{}/themes/prism-tomorrow.min.css\" rel=\"stylesheet\">\n",
            PRISM
        ));
    }
    out.push_str("<style>\n");
    out.push_str(STYLE);
    out.push_str("</style>\n");
    out.push_str("</head>\n<body>\n");
    out
}

fn render_meta(module: &Module) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(ref version) = module.version {
        parts.push(format!("Version {}", html_escape(version)));
    }
    if !module.dependencies.is_empty() {
        let links: Vec<String> = module
            .dependencies
            .iter()
            .map(|d| format!("<a href=\"{0}.html\">{0}</a>", html_escape(d)))
            .collect();
        parts.push(format!("Depends on {}", links.join(", ")));
    }
    if parts.is_empty() {
        return String::new();
    }
    format!("<p class=\"meta\">{}</p>\n", parts.join(" &middot; "))
}

fn render_install(cmd: &str, repo_link: Option<&str>) -> String {
    let mut out = String::new();
    out.push_str("<div class=\"install-section\">\n<h2>Installation</h2>\n");
    out.push_str(&format!(
        "<div class=\"install-cmd\" id=\"install-cmd\">{}</div>\n",
        html_escape(cmd)
    ));
    out.push_str("<p>\n<button class=\"copy-btn\" onclick=\"copyInstallCommand(this)\">Copy Command</button>\n");
    if let Some(url) = repo_link {
        out.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\">View on GitHub &rarr;</a>\n",
            html_escape(url)
        ));
    }
    out.push_str("</p>\n</div>\n");
    out.push_str(COPY_SCRIPT);
    out
}

fn render_card(href: &str, label: &str, description: &str) -> String {
    format!(
        "<div class=\"card\">\n<h3><a href=\"{}\">{}</a></h3>\n<p>{}</p>\n</div>\n",
        html_escape(href),
        html_escape(label),
        html_escape(&summary(description))
    )
}

fn render_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("<h2>{}</h2>\n<ul>\n", title));
    for item in items {
        out.push_str(&format!("  <li>{}</li>\n", html_escape(item)));
    }
    out.push_str("</ul>\n");
}

fn render_entries(title: &str, entries: &[Param]) -> String {
    let mut out = String::new();
    out.push_str(&format!("<div class=\"params\">\n<strong>{}:</strong>\n<ul>\n", title));
    for entry in entries {
        out.push_str(&format!(
            "  <li><code>{}</code> ({})",
            html_escape(&entry.name),
            html_escape(&entry.ty)
        ));
        if entry.is_optional() {
            out.push_str(" <span class=\"optional\">optional</span>");
        }
        if !entry.description.is_empty() {
            out.push_str(&format!(": {}", html_escape(&entry.description)));
        }
        out.push_str("</li>\n");
    }
    out.push_str("</ul>\n</div>\n");
    out
}

fn render_class_html(class: &Class) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "<div class=\"function\">\n<h3 id=\"{}\">{}</h3>\n",
        github_slug(&class.name),
        html_escape(&class.name)
    ));
    if !class.description.is_empty() {
        out.push_str(&format!("<p>{}</p>\n", html_escape(&class.description)));
    }
    if !class.fields.is_empty() {
        out.push_str(&render_entries("Fields", &class.fields));
    }
    out.push_str("</div>\n");
    out
}

fn render_function_html(func: &Function, module: &Module, site: &SiteConfig) -> String {
    let mut out = String::new();
    let signature = func.signature();

    out.push_str(&format!(
        "<div class=\"function\">\n<h3 id=\"{}\"><code>{}</code></h3>\n",
        github_slug(&signature),
        html_escape(&signature)
    ));
    if let Some(url) = site.source_url(module, Some(func.source_line)) {
        out.push_str(&format!(
            "<a class=\"source\" href=\"{}\" target=\"_blank\">View source</a>\n",
            html_escape(&url)
        ));
    }
    if !func.description.is_empty() {
        out.push_str(&format!("<p>{}</p>\n", html_escape(&func.description)));
    }
    if !func.params.is_empty() {
        out.push_str(&render_entries("Parameters", &func.params));
    }
    if !func.returns.is_empty() {
        out.push_str(&format!(
            "<div class=\"returns\"><strong>Returns:</strong> {}</div>\n",
            html_escape(&func.returns)
        ));
    }
    out.push_str("</div>\n");
    out
}

/// First `SUMMARY_LIMIT` characters, with `...` when cut.
fn summary(text: &str) -> String {
    match text.char_indices().nth(SUMMARY_LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
