//! Directive-prologue scanning for JS/TS modules.
//!
//! Only the leading run of string-literal statements counts, so a
//! `"use client"` further down the file is ignored.

use std::path::Path;

/// Script extensions the bundler treats as modules
const SCRIPT_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs", "mts", "cts"];

/// Rendering boundary a module declares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    /// No boundary directive; rendered on the server
    Server,
    /// `"use client"`
    Client,
    /// `"use server"`; server actions callable from the client
    Action,
}

impl ModuleKind {
    /// Whether changing this module changes server-rendered output
    pub fn affects_server_output(self) -> bool {
        !matches!(self, Self::Client)
    }
}

pub fn is_script_module(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SCRIPT_EXTENSIONS.contains(&ext))
}

/// Classify a module by its directive prologue.
pub fn classify_source(source: &str) -> ModuleKind {
    for directive in directives(source) {
        match directive {
            "use client" => return ModuleKind::Client,
            "use server" => return ModuleKind::Action,
            _ => {}
        }
    }
    ModuleKind::Server
}

/// String contents of the directive prologue, in order.
///
/// Skips a byte-order mark, a hashbang line, whitespace and comments. Stops
/// at the first statement that is not a plain string literal.
pub fn directives(source: &str) -> Vec<&str> {
    let mut rest = source.strip_prefix('\u{feff}').unwrap_or(source);
    if rest.starts_with("#!") {
        rest = rest.find('\n').map_or("", |i| &rest[i..]);
    }

    let mut found = Vec::new();
    loop {
        let (statement, _) = skip_trivia(rest);
        let Some(quote) = statement.chars().next().filter(|c| matches!(c, '"' | '\'')) else {
            break;
        };

        let body = &statement[1..];
        let Some(end) = body.find([quote, '\n', '\\']) else {
            break;
        };
        if !body[end..].starts_with(quote) {
            break;
        }

        let literal = &body[..end];
        let (after, crossed_newline) = skip_trivia(&body[end + 1..]);

        if let Some(next) = after.strip_prefix(';') {
            found.push(literal);
            rest = next;
        } else if crossed_newline || after.is_empty() {
            found.push(literal);
            rest = after;
        } else {
            // `"use client".length` and friends are expressions, not directives
            break;
        }
    }
    found
}

/// Skip whitespace and comments; reports whether a line break was crossed.
fn skip_trivia(mut source: &str) -> (&str, bool) {
    let mut crossed_newline = false;

    loop {
        let trimmed = source.trim_start();
        crossed_newline |= source[..source.len() - trimmed.len()].contains('\n');
        source = trimmed;

        if let Some(comment) = source.strip_prefix("//") {
            match comment.find('\n') {
                Some(i) => source = &comment[i..],
                None => return ("", crossed_newline),
            }
        } else if let Some(comment) = source.strip_prefix("/*") {
            match comment.find("*/") {
                Some(i) => {
                    crossed_newline |= comment[..i].contains('\n');
                    source = &comment[i + 2..];
                }
                None => return ("", crossed_newline),
            }
        } else {
            return (source, crossed_newline);
        }
    }
}
