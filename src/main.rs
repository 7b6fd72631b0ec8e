//! luadoc: generate documentation from EmmyLua-annotated Lua sources.
//!
//! Supports two modes:
//!
//! - **stdin mode**: `luadoc --name cache < cache.lua` prints one module page
//! - **file mode**: `luadoc -o docs util/ --program miner` writes Markdown,
//!   HTML and JSON for every module plus an index per format

use anyhow::{Context, Result};
use clap::Parser;
use luadoc::catalog::Catalog;
use luadoc::model::{Module, Program};
use luadoc::parser::{self, ParseOptions, SUPPORTED_EXTENSIONS};
use luadoc::render::{self, Renderer, SiteConfig};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "luadoc",
    about = "Generate documentation from EmmyLua-annotated Lua sources and program READMEs"
)]
struct Cli {
    /// Input files, directories or glob patterns. If omitted, reads from stdin.
    inputs: Vec<String>,

    /// Output directory (required when inputs are given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output formats: markdown, html, json. Repeatable or comma-separated.
    #[arg(
        short = 'f',
        long = "format",
        value_delimiter = ',',
        default_values = ["markdown", "html", "json"]
    )]
    formats: Vec<String>,

    /// Module name used in stdin mode
    #[arg(long, default_value = "stdin")]
    name: String,

    /// Program directory to probe for a README.md (repeatable)
    #[arg(long = "program")]
    programs: Vec<String>,

    /// Directory containing the program directories [default: first input directory]
    #[arg(long)]
    programs_root: Option<PathBuf>,

    /// Module left out of the JSON output (repeatable)
    #[arg(long = "exclude-api")]
    exclude_api: Vec<String>,

    /// Prefix stripped from require() targets (repeatable)
    #[arg(long = "library-prefix", default_values = ["/lib/", "lib/"])]
    library_prefixes: Vec<String>,

    /// Title of the index pages
    #[arg(long, default_value = "Lua Documentation")]
    title: String,

    /// Subtitle shown under the index title
    #[arg(long)]
    tagline: Option<String>,

    /// Base URL for source links, e.g. https://github.com/owner/repo/blob/main/util
    #[arg(long)]
    repo_url: Option<String>,

    /// Base URL for raw files, used in wget install commands
    #[arg(long)]
    raw_url: Option<String>,

    /// More logging (-v debug, -vv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            library_prefixes: self.library_prefixes.clone(),
        }
    }

    fn site_config(&self) -> SiteConfig {
        SiteConfig {
            title: self.title.clone(),
            tagline: self.tagline.clone(),
            repo_url: self.repo_url.clone(),
            raw_url: self.raw_url.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if cli.inputs.is_empty() {
        return stdin_mode(&cli);
    }

    file_mode(&cli)
}

/// Install the stderr subscriber. `RUST_LOG` overrides the flags.
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// stdin mode: read one module from stdin, write the first format to stdout.
fn stdin_mode(cli: &Cli) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let path = format!("{}.lua", cli.name);
    let module = parser::parse_module(&cli.name, &path, &input, &cli.parse_options());
    let format = cli.formats.first().map(String::as_str).unwrap_or("markdown");
    let renderer = render::create_renderer(format, &cli.exclude_api)?;
    if let Some(page) = renderer.render_module(&module, &cli.site_config()) {
        print!("{}", page);
    }
    Ok(())
}

/// file mode: parse every input, build the catalog, write every format.
fn file_mode(cli: &Cli) -> Result<()> {
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when inputs are given")?;

    // Fail on bad formats before doing any work
    let renderers = cli
        .formats
        .iter()
        .map(|f| render::create_renderer(f, &cli.exclude_api))
        .collect::<Result<Vec<_>>>()?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    let options = cli.parse_options();
    let input_files = expand_inputs(&cli.inputs)?;

    let mut modules: Vec<Module> = Vec::new();
    for path in &input_files {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        match parser::parse_file(path, &content, &options) {
            Ok(module) => modules.push(module),
            Err(e) => tracing::warn!("skipping {}: {}", path.display(), e),
        }
    }

    let programs_root = cli
        .programs_root
        .clone()
        .or_else(|| first_input_dir(&cli.inputs));
    let programs = load_programs(programs_root.as_deref(), &cli.programs)?;

    let catalog = Catalog::new(modules, programs);
    if catalog.is_empty() {
        tracing::warn!("no modules or programs found");
    }
    let site = cli.site_config();

    for renderer in &renderers {
        write_format(renderer.as_ref(), &catalog, &site, output_dir)?;
    }

    tracing::info!(
        modules = catalog.modules.len(),
        programs = catalog.programs.len(),
        "generated documentation in {}",
        output_dir.display()
    );
    Ok(())
}

/// Write every page and the index for one format.
fn write_format(
    renderer: &dyn Renderer,
    catalog: &Catalog,
    site: &SiteConfig,
    output_dir: &Path,
) -> Result<()> {
    let ext = renderer.file_extension();

    for module in &catalog.modules {
        let Some(page) = renderer.render_module(module, site) else {
            continue;
        };
        write_file(&output_dir.join(format!("{}.{}", module.name, ext)), &page)?;
    }

    if !catalog.programs.is_empty() {
        let program_dir = output_dir.join("programs");
        fs::create_dir_all(&program_dir)
            .with_context(|| format!("failed to create {}", program_dir.display()))?;
        for program in &catalog.programs {
            let page = renderer.render_program(program, site);
            write_file(&program_dir.join(format!("{}.{}", program.name, ext)), &page)?;
        }
    }

    let index = renderer.render_index(catalog, site);
    write_file(&output_dir.join(renderer.index_file_name()), &index)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    tracing::debug!(path = %path.display(), "writing");
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

/// Probe `<root>/<name>/README.md` for each program name.
fn load_programs(root: Option<&Path>, names: &[String]) -> Result<Vec<Program>> {
    let mut programs = Vec::new();
    for name in names {
        let dir = match root {
            Some(root) => root.join(name),
            None => PathBuf::from(name),
        };
        if let Some(program) = parser::load_program(&dir)? {
            programs.push(program);
        }
    }
    Ok(programs)
}

fn first_input_dir(inputs: &[String]) -> Option<PathBuf> {
    inputs
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_dir())
}

/// Expand inputs into a sorted, de-duplicated list of source files.
/// Directories are scanned (non-recursively) for supported extensions.
fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && has_supported_extension(&p) {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            tracing::warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SUPPORTED_EXTENSIONS.contains(&e))
}
