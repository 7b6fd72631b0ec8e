//! Block extractors for EmmyLua-style annotations.
//!
//! Each extractor is a pure pass over the whole source text. They share the
//! run collector in [`super::line`] and the block reader below, and differ
//! only in what anchors a block and where a run stops.

use super::line::{doc_content, is_tag, take_run};
use super::tag::{parse_tag, Tag};
use crate::model::{Class, Function, Param};
use regex::Regex;
use std::sync::LazyLock;

// Function declaration, optionally `local`, at the start of a line
static RE_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*(local[ \t]+)?function[ \t]+([\w.:]+)[ \t]*\(").unwrap()
});

// -- Doc block reader ---------------------------------------------------------

/// Classified contents of one doc block.
#[derive(Debug, Default)]
struct DocBlock {
    description: Vec<String>,
    params: Vec<Param>,
    fields: Vec<Param>,
    returns: String,
}

impl DocBlock {
    /// Classify each line of a run as description or tag.
    fn read(contents: &[&str]) -> Self {
        let mut block = DocBlock::default();

        for content in contents {
            let text = content.trim();
            match parse_tag(text) {
                None => {
                    if !text.is_empty() {
                        block.description.push(text.to_string());
                    }
                }
                Some(Tag::Param(p)) => block.params.push(p),
                Some(Tag::Field(f)) => block.fields.push(f),
                // last @return wins
                Some(Tag::Return(r)) => block.returns = r,
                Some(Tag::Malformed(name)) => {
                    tracing::debug!(tag = name, line = text, "skipping malformed tag");
                }
                Some(_) => {}
            }
        }
        block
    }

    fn description(&self) -> String {
        self.description.join(" ")
    }
}

// -- Module description -------------------------------------------------------

/// Leading description of the file.
///
/// Collects doc-comment lines until the first tag, or until code follows
/// collected text. Code before the first doc comment is skipped.
pub fn module_description(input: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for line in input.lines() {
        match doc_content(line) {
            Some(content) => {
                let text = content.trim();
                if text.starts_with('@') {
                    break;
                }
                if !text.is_empty() {
                    lines.push(text);
                }
            }
            None if !lines.is_empty() => break,
            None => {}
        }
    }
    lines.join(" ")
}

// -- Usage examples -----------------------------------------------------------

/// Verbatim `@usage` blocks in source order.
pub fn examples(input: &str) -> Vec<String> {
    let lines: Vec<&str> = input.lines().collect();
    let mut examples = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let is_anchor = doc_content(lines[i])
            .and_then(parse_tag)
            .is_some_and(|tag| tag == Tag::Usage);
        if !is_anchor {
            i += 1;
            continue;
        }

        let (run, end) = take_run(&lines, i + 1, false, |c| parse_tag(c) == Some(Tag::Usage));
        // Other tag lines inside the run are not part of the example
        let run: Vec<&str> = run.into_iter().filter(|c| !is_tag(c)).collect();
        let first = run.iter().position(|l| !l.trim().is_empty());
        let last = run.iter().rposition(|l| !l.trim().is_empty());
        if let (Some(first), Some(last)) = (first, last) {
            examples.push(run[first..=last].join("\n"));
        }
        i = end.max(i + 1);
    }
    examples
}

// -- Functions ----------------------------------------------------------------

/// Documented function and method declarations in source order.
pub fn functions(input: &str) -> Vec<Function> {
    let lines: Vec<&str> = input.lines().collect();
    let mut functions = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let (run, end) = take_run(&lines, i, true, |_| false);
        if run.is_empty() {
            i += 1;
            continue;
        }
        i = end;

        let Some(caps) = lines.get(end).and_then(|l| RE_FUNCTION.captures(l)) else {
            continue;
        };
        let is_local = caps.get(1).is_some();
        let name = &caps[2];
        i = end + 1;

        // Unqualified local helpers are private
        if is_local && !name.contains(['.', ':']) {
            continue;
        }

        let block = DocBlock::read(&run);
        if block.description.is_empty() && block.params.is_empty() && block.returns.is_empty() {
            continue;
        }

        functions.push(Function {
            name: name.to_string(),
            description: block.description(),
            params: block.params,
            returns: block.returns,
            source_line: end + 1,
        });
    }
    functions
}

// -- Classes ------------------------------------------------------------------

/// Documented `@class` declarations in source order.
///
/// A run of doc lines yields at most one class, anchored on its last `@class`
/// line. The class takes every doc line before the anchor plus any `@field`
/// lines that directly follow it.
pub fn classes(input: &str) -> Vec<Class> {
    let lines: Vec<&str> = input.lines().collect();
    let mut classes = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let (run, end) = take_run(&lines, i, false, |_| false);
        if run.is_empty() {
            i += 1;
            continue;
        }
        i = end;

        let anchor = run.iter().enumerate().rev().find_map(|(at, c)| match parse_tag(c) {
            Some(Tag::Class(name)) => Some((at, name)),
            _ => None,
        });
        let Some((at, name)) = anchor else {
            continue;
        };

        let mut block: Vec<&str> = run[..at].to_vec();
        block.extend(run[at + 1..].iter().take_while(|c| {
            matches!(parse_tag(c), Some(Tag::Field(_) | Tag::Malformed("field")))
        }));

        let block = DocBlock::read(&block);
        if block.description.is_empty() && block.fields.is_empty() {
            continue;
        }
        classes.push(Class {
            name,
            description: block.description(),
            fields: block.fields,
        });
    }
    classes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_from_preamble() {
        let input = "--- A tiny cache.\n--- Keeps values in memory.\n---@usage\n--- x()\nlocal M = {}\n";
        assert_eq!(module_description(input), "A tiny cache. Keeps values in memory.");
    }

    #[test]
    fn description_stops_at_code() {
        let input = "--- First block.\nlocal x = 1\n--- Function doc.\nfunction x.f() end\n";
        assert_eq!(module_description(input), "First block.");
    }

    #[test]
    fn description_skips_leading_code_and_blank_doc_lines() {
        let input = "#!/usr/bin/lua\n---\n--- Late start.\n---\n--- Continues.\n";
        assert_eq!(module_description(input), "Late start. Continues.");
    }

    #[test]
    fn description_empty_when_tag_first() {
        let input = "---@class Foo\n--- After tag.\n";
        assert_eq!(module_description(input), "");
    }

    #[test]
    fn usage_preserves_indent_and_blank_lines() {
        let input = "---@usage\n--- local t = {}\n--- for i = 1, 3 do\n---     t[i] = i\n--- end\n---\n--- print(#t)\n---@class Foo\n";
        let examples = examples(input);
        assert_eq!(examples.len(), 1);
        assert_eq!(
            examples[0],
            "local t = {}\nfor i = 1, 3 do\n    t[i] = i\nend\n\nprint(#t)"
        );
    }

    #[test]
    fn usage_trims_edge_blank_lines() {
        let input = "--- @usage\n---\n--- run()\n---\n\nlocal x\n";
        assert_eq!(examples(input), vec!["run()".to_string()]);
    }

    #[test]
    fn empty_usage_is_dropped() {
        let input = "---@usage\n---\n---@param x number\nfunction f(x) end\n";
        assert!(examples(input).is_empty());
    }

    #[test]
    fn multiple_usage_blocks_in_order() {
        let input = "---@usage\n--- first()\n\n---@usage\n--- second()\n";
        assert_eq!(examples(input), vec!["first()".to_string(), "second()".to_string()]);
    }

    #[test]
    fn usage_skips_tag_lines_and_continues() {
        let input = "---@usage\n--- a()\n--- @see other\n--- b()\n";
        assert_eq!(examples(input), vec!["a()\nb()".to_string()]);
    }

    #[test]
    fn next_usage_starts_new_example() {
        let input = "---@usage\n--- one()\n---@usage\n--- two()\n";
        assert_eq!(examples(input), vec!["one()".to_string(), "two()".to_string()]);
    }

    #[test]
    fn usage_with_trailing_text_is_not_an_anchor() {
        let input = "---@usage see README\n--- not_code()\n";
        assert!(examples(input).is_empty());
    }

    #[test]
    fn function_block() {
        let input = "\
--- Adds two numbers.
--- @param a number first addend
--- @param b number second addend
--- @return number the sum
function math.add(a, b)
  return a + b
end
";
        let funcs = functions(input);
        assert_eq!(funcs.len(), 1);
        let f = &funcs[0];
        assert_eq!(f.name, "math.add");
        assert_eq!(f.description, "Adds two numbers.");
        assert_eq!(f.params.len(), 2);
        assert_eq!(f.params[0].name, "a");
        assert_eq!(f.params[0].ty, "number");
        assert_eq!(f.params[0].description, "first addend");
        assert_eq!(f.params[1].description, "second addend");
        assert_eq!(f.returns, "number the sum");
        assert_eq!(f.source_line, 5);
    }

    #[test]
    fn last_return_wins() {
        let input = "---@return string first\n---@return number second\nfunction m.f() end\n";
        assert_eq!(functions(input)[0].returns, "number second");
    }

    #[test]
    fn unqualified_local_is_skipped() {
        let input = "--- Helper.\n---@param x number\nlocal function helper(x) end\n";
        assert!(functions(input).is_empty());
    }

    #[test]
    fn qualified_local_is_kept() {
        let input = "--- Method.\nlocal function M.helper() end\n--- Colon.\nlocal function M:run() end\n";
        let names: Vec<String> = functions(input).into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["M.helper", "M:run"]);
    }

    #[test]
    fn undocumented_function_is_dropped() {
        let input = "---\n---@see other\nfunction m.bare() end\n";
        assert!(functions(input).is_empty());
    }

    #[test]
    fn function_without_doc_block_is_ignored() {
        let input = "function m.plain() end\n-- regular comment\nfunction m.other() end\n";
        assert!(functions(input).is_empty());
    }

    #[test]
    fn indented_method_docs() {
        let input = "do\n    --- Inner method.\n    function Obj:inner() end\nend\n";
        let funcs = functions(input);
        assert_eq!(funcs.len(), 1);
        assert_eq!(funcs[0].name, "Obj:inner");
        assert_eq!(funcs[0].source_line, 3);
    }

    #[test]
    fn malformed_param_is_skipped() {
        let input = "--- Doc.\n---@param broken\n---@param ok string fine\nfunction m.f(ok) end\n";
        let funcs = functions(input);
        assert_eq!(funcs[0].params.len(), 1);
        assert_eq!(funcs[0].params[0].name, "ok");
    }

    #[test]
    fn functions_keep_source_order_across_code() {
        let input = "--- One.\nfunction m.one() end\nlocal x = 1\n\n--- Two.\nfunction m.two() end\n";
        let funcs = functions(input);
        assert_eq!(funcs.len(), 2);
        assert_eq!(funcs[0].name, "m.one");
        assert_eq!(funcs[0].source_line, 2);
        assert_eq!(funcs[1].name, "m.two");
        assert_eq!(funcs[1].source_line, 6);
    }

    #[test]
    fn usage_lines_join_function_description() {
        let input = "--- Make one.\n---@usage\n--- local x = M.new()\n---@return table obj\nfunction M.new() end\n";
        let funcs = functions(input);
        assert_eq!(funcs[0].description, "Make one. local x = M.new()");
        assert_eq!(funcs[0].returns, "table obj");
        assert_eq!(examples(input), vec!["local x = M.new()".to_string()]);
    }

    #[test]
    fn class_with_fields_before_anchor() {
        let input = "--- A cache entry.\n---@field key string lookup key\n---@field ttl? number\n---@class Entry\nlocal Entry = {}\n";
        let cls = classes(input);
        assert_eq!(cls.len(), 1);
        assert_eq!(cls[0].name, "Entry");
        assert_eq!(cls[0].description, "A cache entry.");
        assert_eq!(cls[0].fields.len(), 2);
        assert_eq!(cls[0].fields[1].name, "ttl?");
        assert_eq!(cls[0].fields[1].description, "");
    }

    #[test]
    fn class_with_trailing_fields() {
        let input = "--- A queue.\n---@class Queue\n---@field items table\n---@field size number count\nlocal Queue = {}\n";
        let cls = classes(input);
        assert_eq!(cls.len(), 1);
        assert_eq!(cls[0].fields.len(), 2);
        assert_eq!(cls[0].fields[1].description, "count");
    }

    #[test]
    fn last_class_in_run_takes_whole_block() {
        let input = "--- First.\n---@class A\n--- Second.\n---@class B\nlocal x\n";
        let cls = classes(input);
        assert_eq!(cls.len(), 1);
        assert_eq!(cls[0].name, "B");
        assert_eq!(cls[0].description, "First. Second.");
    }

    #[test]
    fn separate_runs_give_separate_classes() {
        let input = "--- First.\n---@class A\n\n--- Second.\n---@class B\n";
        let names: Vec<String> = classes(input).into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn malformed_field_is_skipped() {
        let input = "---@class T\n---@field broken\n---@field ok number\nlocal T = {}\n";
        let cls = classes(input);
        assert_eq!(cls.len(), 1);
        assert_eq!(cls[0].name, "T");
        assert_eq!(cls[0].fields.len(), 1);
        assert_eq!(cls[0].fields[0].name, "ok");
    }

    #[test]
    fn bare_class_is_dropped() {
        let input = "---@class Empty\nlocal Empty = {}\n";
        assert!(classes(input).is_empty());
    }

    #[test]
    fn no_doc_comments_yields_nothing() {
        let input = "local M = {}\n-- plain\nfunction M.f() end\nreturn M\n";
        assert_eq!(module_description(input), "");
        assert!(examples(input).is_empty());
        assert!(functions(input).is_empty());
        assert!(classes(input).is_empty());
    }
}
