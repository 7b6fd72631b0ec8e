//! README section extractor: line-by-line state machine.
//!
//! Segments a program README into title, lead description, the Features /
//! Components / Requirements lists and an install command.

use crate::model::Program;

/// File probed inside each program directory.
pub const README_FILE: &str = "README.md";

/// Commands that mark a code block as the install one-liner.
const RUN_COMMANDS: &[&str] = &["wget run", "pastebin run"];

const FENCE: &str = "```";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Section {
    #[default]
    None,
    Description,
    Features,
    Components,
    Requirements,
}

#[derive(Default)]
struct ParserState {
    section: Section,
    title: Option<String>,
    description: Vec<String>,
    features: Vec<String>,
    components: Vec<String>,
    requirements: Vec<String>,
}

impl ParserState {
    /// Apply one line and move to the next state.
    fn step(&mut self, line: &str) {
        let trimmed = line.trim();

        if self.title.is_none() {
            if let Some(title) = trimmed.strip_prefix("# ") {
                self.title = Some(title.trim().to_string());
                self.section = Section::Description;
                return;
            }
        }

        // Boundary lines end the description and are processed below
        if self.section == Section::Description && ends_description(trimmed) {
            self.section = Section::None;
        }

        if trimmed.starts_with('#') {
            if let Some(section) = list_section(trimmed) {
                self.section = section;
                return;
            }
            if trimmed.starts_with("## ") {
                self.section = Section::None;
                return;
            }
        }

        match self.section {
            Section::None => {}
            Section::Description => {
                if !trimmed.is_empty() {
                    self.description.push(trimmed.to_string());
                }
            }
            Section::Features => push_bullet(&mut self.features, trimmed),
            Section::Components => push_bullet(&mut self.components, trimmed),
            Section::Requirements => push_bullet(&mut self.requirements, trimmed),
        }
    }
}

/// Parse a README into a Program named after its directory.
pub fn parse(name: &str, input: &str) -> Program {
    let mut state = ParserState::default();
    for line in input.lines() {
        state.step(line);
    }

    Program {
        name: name.to_string(),
        title: state.title.unwrap_or_default(),
        description: state.description.join(" "),
        features: state.features,
        components: state.components,
        requirements: state.requirements,
        installation: installation(input),
        content: input.to_string(),
    }
}

/// First fenced block whose content starts with a run-style command.
pub fn installation(input: &str) -> String {
    let mut block: Option<Vec<&str>> = None;
    for line in input.lines() {
        if !line.trim().starts_with(FENCE) {
            if let Some(lines) = block.as_mut() {
                lines.push(line);
            }
            continue;
        }
        match block.take() {
            None => block = Some(Vec::new()),
            Some(lines) => {
                let content = lines.join("\n");
                let content = content.trim();
                if RUN_COMMANDS.iter().any(|cmd| content.starts_with(cmd)) {
                    return content.to_string();
                }
            }
        }
    }
    String::new()
}

fn ends_description(trimmed: &str) -> bool {
    trimmed.starts_with('#')
        || trimmed.starts_with("- **")
        || trimmed.starts_with("* **")
        || trimmed.starts_with(FENCE)
        || trimmed.to_lowercase().starts_with("install")
}

fn list_section(heading: &str) -> Option<Section> {
    let lower = heading.to_lowercase();
    if lower.contains("features") {
        Some(Section::Features)
    } else if lower.contains("components") {
        Some(Section::Components)
    } else if lower.contains("requirements") {
        Some(Section::Requirements)
    } else {
        None
    }
}

fn push_bullet(items: &mut Vec<String>, trimmed: &str) {
    let Some(item) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
    else {
        return;
    };
    let item = item.replace("**", "");
    let item = item.trim();
    if !item.is_empty() {
        items.push(item.to_string());
    }
}
