//! Doc-comment line classification.

/// Prefix that marks a documentation comment.
pub const DOC_MARKER: &str = "---";

/// Content of a doc-comment line: the marker and at most one following space
/// removed. `None` when the line is not a doc comment.
///
/// Only one space is stripped so that indentation inside `@usage` code
/// survives: `---     indented()` keeps four spaces.
pub fn doc_content(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(DOC_MARKER)?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

/// Like [`doc_content`], but accepts leading indentation before the marker.
pub fn indented_doc_content(line: &str) -> Option<&str> {
    doc_content(line.trim_start_matches([' ', '\t']))
}

/// True when the content starts with a `@` tag keyword.
pub fn is_tag(content: &str) -> bool {
    content.trim_start().starts_with('@')
}

/// Collect the contents of consecutive doc-comment lines from `start`.
///
/// Stops before the first line that is not a doc comment, or whose content
/// satisfies `stop`. Returns the contents and the index one past the run.
pub fn take_run<'a>(
    lines: &[&'a str],
    start: usize,
    indented: bool,
    stop: impl Fn(&str) -> bool,
) -> (Vec<&'a str>, usize) {
    let classify: fn(&str) -> Option<&str> = if indented {
        indented_doc_content
    } else {
        doc_content
    };
    let mut run = Vec::new();
    let mut end = start;
    while let Some(content) = lines.get(end).copied().and_then(classify) {
        if stop(content) {
            break;
        }
        run.push(content);
        end += 1;
    }
    (run, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_marker_and_one_space() {
        assert_eq!(doc_content("--- hello"), Some("hello"));
        assert_eq!(doc_content("---hello"), Some("hello"));
        assert_eq!(doc_content("---     indented()"), Some("    indented()"));
        assert_eq!(doc_content("---"), Some(""));
    }

    #[test]
    fn rejects_plain_comments_and_code() {
        assert_eq!(doc_content("-- plain comment"), None);
        assert_eq!(doc_content("local x = 1"), None);
        assert_eq!(doc_content("  --- indented"), None);
    }

    #[test]
    fn indented_variant() {
        assert_eq!(indented_doc_content("    --- method doc"), Some("method doc"));
        assert_eq!(indented_doc_content("\t---@param x number"), Some("@param x number"));
    }

    #[test]
    fn tag_detection() {
        assert!(is_tag("@param x"));
        assert!(is_tag("  @usage"));
        assert!(!is_tag("email me @ home"));
    }

    #[test]
    fn run_stops_on_predicate_and_code() {
        let lines = ["--- a", "--- b", "---@class X", "--- c", "code()"];
        let (run, end) = take_run(&lines, 0, false, is_tag);
        assert_eq!(run, vec!["a", "b"]);
        assert_eq!(end, 2);

        let (run, end) = take_run(&lines, 3, false, |_| false);
        assert_eq!(run, vec!["c"]);
        assert_eq!(end, 4);
    }
}
