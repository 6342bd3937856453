// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Line patterns for the structural scanner.
//!
//! All functions take a line with its diff marker stripped and surrounding
//! whitespace trimmed.

use std::sync::LazyLock;

use regex::Regex;

use crate::stats::FilterReason;

#[cfg(test)]
#[path = "patterns_tests.rs"]
mod tests;

#[allow(clippy::expect_used)]
static INTERFACE_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^type\s+[A-Za-z_]\w*(?:\[[^\]]*\])?\s+interface\s*\{").expect("valid regex")
});

#[allow(clippy::expect_used)]
static STRUCT_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^type\s+[A-Za-z_]\w*(?:\[[^\]]*\])?\s+struct\s*\{").expect("valid regex")
});

/// `package`, `import`, `type`, `const` and `var` lines.
#[allow(clippy::expect_used)]
static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:package|import|type|const|var)\b").expect("valid regex")
});

/// Import specs inside an `import ( ... )` block: `"fmt"` or `alias "path"`.
#[allow(clippy::expect_used)]
static IMPORT_SPEC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:[A-Za-z_.]\w*\s+)?"[^"]*"$"#).expect("valid regex")
});

/// Statements that only occur in function bodies.
#[allow(clippy::expect_used)]
static STATEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:func|return|if|else|for|switch|case|default|go|defer|break|continue|fallthrough|select|goto|panic)\b",
    )
    .expect("valid regex")
});

/// Assignments (`x := y`, `x = y`, `x += y`).
#[allow(clippy::expect_used)]
static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?::=|\s(?:=|\+=|-=|\*=|/=|\|=|&=)\s)").expect("valid regex")
});

/// Calls through a receiver or package: `m.SetOwner(value)`.
#[allow(clippy::expect_used)]
static SELECTOR_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][\w.]*\.[A-Za-z_]\w*\(.*\)$").expect("valid regex")
});

/// A bare type reference: `Entity`, `*Entity`, `pkg.Entity`, `*pkg.Entity`.
#[allow(clippy::expect_used)]
static EMBEDDED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\*?(?:[A-Za-z_]\w*\.)?[A-Za-z_]\w*)\s*(?://.*)?$").expect("valid regex")
});

/// Method head: `Name(`.
#[allow(clippy::expect_used)]
static METHOD_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z_]\w*)\(").expect("valid regex"));

/// Struct field: `Name Type` with an optional tag and trailing comment.
#[allow(clippy::expect_used)]
static FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_]\w*)\s+([^\s`]+)(?:\s+`[^`]*`)?\s*(?://.*)?$").expect("valid regex")
});

/// A method signature split into parts.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct MethodParts<'a> {
    pub name: &'a str,
    pub parameters: &'a str,
    pub return_type: &'a str,
}

/// A field declaration split into parts.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct FieldParts<'a> {
    pub name: &'a str,
    pub field_type: &'a str,
}

pub(crate) fn is_interface_decl(line: &str) -> bool {
    INTERFACE_DECL.is_match(line)
}

pub(crate) fn is_struct_decl(line: &str) -> bool {
    STRUCT_DECL.is_match(line)
}

/// Exported names start with an upper-case letter.
pub(crate) fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Reason a line is excluded before structural matching, if any.
pub(crate) fn exclusion_reason(line: &str) -> Option<FilterReason> {
    if is_comment(line) {
        return Some(FilterReason::Comment);
    }
    if is_brace_only(line) {
        return Some(FilterReason::BraceOnly);
    }
    if DECLARATION.is_match(line) || IMPORT_SPEC.is_match(line) {
        return Some(FilterReason::Declaration);
    }
    if is_implementation(line) {
        return Some(FilterReason::Implementation);
    }
    None
}

fn is_comment(line: &str) -> bool {
    line.starts_with("//")
        || line.starts_with("/*")
        || line.starts_with("*/")
        || line == "*"
        || line.starts_with("* ")
}

fn is_brace_only(line: &str) -> bool {
    !line.is_empty()
        && line
            .chars()
            .all(|c| matches!(c, '{' | '}' | '(' | ')' | '[' | ']' | ';' | ',') || c.is_whitespace())
}

fn is_implementation(line: &str) -> bool {
    STATEMENT.is_match(line)
        || line.starts_with('}')
        || line.ends_with('{')
        || ASSIGNMENT.is_match(line)
        || SELECTOR_CALL.is_match(line)
}

/// Match a bare type reference, returning the type name.
pub(crate) fn match_embedded(line: &str) -> Option<&str> {
    EMBEDDED
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Match `Name(parameters) returnType`.
///
/// Parameters are read up to the balancing parenthesis so function-typed
/// parameters stay intact.
pub(crate) fn match_method(line: &str) -> Option<MethodParts<'_>> {
    let caps = METHOD_HEAD.captures(line)?;
    let name = caps.get(1)?.as_str();
    let open = caps.get(0)?.end();

    let mut depth = 1usize;
    let mut close = None;
    for (offset, ch) in line[open..].char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(open + offset);
                    break;
                }
            }
            _ => {}
        }
    }
    let close = close?;

    let return_type = strip_trailing_comment(&line[close + 1..]).trim();
    Some(MethodParts {
        name,
        parameters: line[open..close].trim(),
        return_type,
    })
}

/// Match `Name Type [tag]`.
pub(crate) fn match_field(line: &str) -> Option<FieldParts<'_>> {
    let caps = FIELD.captures(line)?;
    Some(FieldParts {
        name: caps.get(1)?.as_str(),
        field_type: caps.get(2)?.as_str(),
    })
}

fn strip_trailing_comment(text: &str) -> &str {
    match text.find("//") {
        Some(idx) => &text[..idx],
        None => text,
    }
}
