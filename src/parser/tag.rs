//! `@` tag parsing for doc-comment content.

use crate::model::Param;
use regex::Regex;
use std::sync::LazyLock;

// Parameter / field names: identifiers with an optional `?`, or varargs.
static RE_ENTRY_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[A-Za-z_][A-Za-z0-9_]*\??|\.\.\.)$").unwrap());

static RE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z_][\w.]*)\s*(?::\s*\S.*)?$").unwrap());

/// A recognized tag and its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    Param(Param),
    Field(Param),
    Return(String),
    Class(String),
    Usage,
    Version(String),
    /// A known tag whose payload is missing required tokens
    Malformed(&'static str),
    /// Any other `@` keyword
    Other,
}

/// Parse doc-comment content as a tag line. `None` when the content is not a
/// tag (description or example text).
pub fn parse_tag(content: &str) -> Option<Tag> {
    let rest = content.trim().strip_prefix('@')?;
    let (keyword, payload) = match rest.find(char::is_whitespace) {
        Some(i) => (&rest[..i], rest[i..].trim()),
        None => (rest, ""),
    };

    let tag = match keyword {
        "param" => parse_entry(payload).map_or(Tag::Malformed("param"), Tag::Param),
        "field" => parse_entry(payload).map_or(Tag::Malformed("field"), Tag::Field),
        "return" | "returns" => Tag::Return(payload.to_string()),
        "class" => match RE_CLASS.captures(payload) {
            Some(caps) => Tag::Class(caps[1].to_string()),
            None => Tag::Malformed("class"),
        },
        "usage" if payload.is_empty() => Tag::Usage,
        "version" if !payload.is_empty() => Tag::Version(payload.to_string()),
        "version" => Tag::Malformed("version"),
        _ => Tag::Other,
    };
    Some(tag)
}

/// Parse `name type [description]`.
///
/// The type token may contain spaces inside brackets, e.g.
/// `table<string, number>` or `fun(x: number): boolean`.
fn parse_entry(payload: &str) -> Option<Param> {
    let (name, rest) = split_word(payload);
    if !RE_ENTRY_NAME.is_match(name) {
        return None;
    }
    let (ty, description) = split_type(rest.trim_start());
    if ty.is_empty() {
        return None;
    }
    Some(Param {
        name: name.to_string(),
        ty: ty.to_string(),
        description: description.trim().to_string(),
    })
}

fn split_word(text: &str) -> (&str, &str) {
    match text.find(char::is_whitespace) {
        Some(i) => (&text[..i], &text[i..]),
        None => (text, ""),
    }
}

/// Split a type expression from the rest of the line, treating whitespace
/// inside `<>`, `()`, `{}` and `[]` as part of the type.
fn split_type(text: &str) -> (&str, &str) {
    let mut depth = 0usize;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '<' | '(' | '{' | '[' => depth += 1,
            '>' | ')' | '}' | ']' => depth = depth.saturating_sub(1),
            // `fun(x): ret` keeps its return type attached
            ':' if depth == 0 && text[..i].ends_with(')') => {
                while chars.peek().is_some_and(|(_, c)| c.is_whitespace()) {
                    chars.next();
                }
            }
            c if c.is_whitespace() && depth == 0 => return (&text[..i], &text[i..]),
            _ => {}
        }
    }
    (text, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(name: &str, ty: &str, description: &str) -> Param {
        Param {
            name: name.to_string(),
            ty: ty.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn non_tag_content() {
        assert_eq!(parse_tag("Adds two numbers."), None);
        assert_eq!(parse_tag(""), None);
    }

    #[test]
    fn param_with_description() {
        assert_eq!(
            parse_tag("@param a number first addend"),
            Some(Tag::Param(param("a", "number", "first addend")))
        );
    }

    #[test]
    fn param_without_description() {
        assert_eq!(
            parse_tag("@param key string"),
            Some(Tag::Param(param("key", "string", "")))
        );
    }

    #[test]
    fn optional_marker_is_kept() {
        assert_eq!(
            parse_tag("@param ttl? number seconds to live"),
            Some(Tag::Param(param("ttl?", "number", "seconds to live")))
        );
    }

    #[test]
    fn varargs_param() {
        assert_eq!(
            parse_tag("@param ... any values"),
            Some(Tag::Param(param("...", "any", "values")))
        );
    }

    #[test]
    fn bracketed_types_keep_spaces() {
        assert_eq!(
            parse_tag("@param map table<string, number> lookup"),
            Some(Tag::Param(param("map", "table<string, number>", "lookup")))
        );
        assert_eq!(
            parse_tag("@param cb fun(x: number): boolean predicate"),
            Some(Tag::Param(param("cb", "fun(x: number): boolean", "predicate")))
        );
    }

    #[test]
    fn malformed_param() {
        assert_eq!(parse_tag("@param"), Some(Tag::Malformed("param")));
        assert_eq!(parse_tag("@param onlyname"), Some(Tag::Malformed("param")));
        assert_eq!(parse_tag("@param 1bad number"), Some(Tag::Malformed("param")));
    }

    #[test]
    fn field_parses_like_param() {
        assert_eq!(
            parse_tag("@field size number entry count"),
            Some(Tag::Field(param("size", "number", "entry count")))
        );
    }

    #[test]
    fn malformed_field() {
        assert_eq!(parse_tag("@field onlyname"), Some(Tag::Malformed("field")));
        assert_eq!(parse_tag("@field"), Some(Tag::Malformed("field")));
    }

    #[test]
    fn return_keeps_remainder() {
        assert_eq!(
            parse_tag("@return number the sum"),
            Some(Tag::Return("number the sum".to_string()))
        );
        assert_eq!(parse_tag("@return"), Some(Tag::Return(String::new())));
    }

    #[test]
    fn class_name_and_parent() {
        assert_eq!(parse_tag("@class Cache"), Some(Tag::Class("Cache".to_string())));
        assert_eq!(
            parse_tag("@class LruCache : Cache"),
            Some(Tag::Class("LruCache".to_string()))
        );
        assert_eq!(parse_tag("@class"), Some(Tag::Malformed("class")));
    }

    #[test]
    fn usage_must_stand_alone() {
        assert_eq!(parse_tag("@usage"), Some(Tag::Usage));
        assert_eq!(parse_tag("@usage   "), Some(Tag::Usage));
        assert_eq!(parse_tag("@usage see below"), Some(Tag::Other));
    }

    #[test]
    fn version_tag() {
        assert_eq!(
            parse_tag("@version 1.2.0"),
            Some(Tag::Version("1.2.0".to_string()))
        );
        assert_eq!(parse_tag("@version"), Some(Tag::Malformed("version")));
    }

    #[test]
    fn unknown_tags() {
        assert_eq!(parse_tag("@see other"), Some(Tag::Other));
        assert_eq!(parse_tag("@deprecated"), Some(Tag::Other));
    }
}
