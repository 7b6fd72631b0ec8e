//! Version and dependency inference.

use super::line::doc_content;
use super::tag::{parse_tag, Tag};
use regex::Regex;
use std::sync::LazyLock;

// `VERSION = "1.2.3"`, `M._VERSION = '0.4'`, `local version = "v2"`
static RE_VERSION_CONST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b_?(?:VERSION|version)[ \t]*=[ \t]*["'](v?[0-9][^"'\s]*)["']"#).unwrap()
});

// `require("x")` or `require 'x'`; long-bracket strings are not matched
static RE_REQUIRE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\brequire[ \t]*\(?[ \t]*["']([^"'\n]+)["']"#).unwrap());

/// Module version: a version constant takes precedence over a `@version` tag.
pub fn version(input: &str) -> Option<String> {
    if let Some(caps) = RE_VERSION_CONST.captures(input) {
        return Some(caps[1].to_string());
    }
    input
        .lines()
        .filter_map(doc_content)
        .find_map(|content| match parse_tag(content) {
            Some(Tag::Version(v)) => Some(v),
            _ => None,
        })
}

/// Modules named by `require` calls, in first-seen order.
///
/// Library prefixes and a `.lua` suffix are stripped. The module's own name
/// and repeats are skipped.
pub fn dependencies(input: &str, self_name: &str, library_prefixes: &[String]) -> Vec<String> {
    let mut deps: Vec<String> = Vec::new();
    for caps in RE_REQUIRE.captures_iter(input) {
        let name = normalize(&caps[1], library_prefixes);
        if name.is_empty() || name == self_name || deps.iter().any(|d| d == name) {
            continue;
        }
        deps.push(name.to_string());
    }
    deps
}

fn normalize<'a>(target: &'a str, library_prefixes: &[String]) -> &'a str {
    let target = target.trim();
    let target = library_prefixes
        .iter()
        .find_map(|prefix| target.strip_prefix(prefix.as_str()))
        .unwrap_or(target);
    target.strip_suffix(".lua").unwrap_or(target)
}
