//! Locates translation call sites in raw file content.

use std::ops::Range;

use regex::bytes::Regex;

use super::call::{Nesting, Step};
use crate::error::{Error, Result};

/// Finds calls of the configured translation functions, e.g. `__(` and `$_(`.
#[derive(Debug, Clone)]
pub struct CallScanner {
    pattern: Regex,
}

/// Raw text of one call site, from the function name to the closing paren.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCall<'a> {
    /// Byte offset of the function name.
    pub offset: usize,
    pub text: &'a [u8],
    /// Inside a `//`, `/* */`, `{{-- --}}` or `<!-- -->` comment. Such calls
    /// are clipped at the end of the comment.
    pub in_comment: bool,
}

/// A call whose closing parenthesis was never found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnterminatedCall {
    pub offset: usize,
}

const BLOCK_COMMENTS: [(&str, &str); 3] = [("{{--", "--}}"), ("<!--", "-->"), ("/*", "*/")];

impl CallScanner {
    pub fn new<S: AsRef<str>>(functions: &[S]) -> Result<Self> {
        if functions.is_empty() {
            return Err(Error::Config(
                "at least one translation function is required".to_string(),
            ));
        }

        let names: Vec<String> = functions
            .iter()
            .map(|f| regex::escape(f.as_ref()))
            .collect();
        let pattern = format!(r"(?:{})\s*\(", names.join("|"));
        let pattern = Regex::new(&pattern)
            .map_err(|e| Error::Config(format!("invalid translation function name: {}", e)))?;

        Ok(Self { pattern })
    }

    /// Every call site in `content`, in order of appearance.
    ///
    /// Scanning continues inside each call's arguments, so nested calls are
    /// found too. Text inside the string literals of an enclosing call is
    /// skipped.
    pub fn scan<'a>(
        &self,
        content: &'a [u8],
    ) -> std::result::Result<Vec<RawCall<'a>>, UnterminatedCall> {
        let comments = comment_ranges(content);
        let mut quoted: Vec<Range<usize>> = Vec::new();
        let mut calls = Vec::new();
        let mut pos = 0;

        while let Some(m) = self.pattern.find_at(content, pos) {
            let start = m.start();
            pos = start + 1;

            // The name must not continue an identifier: `foo__(` and `$$_(` are not calls.
            if start > 0 && is_identifier_byte(content[start - 1]) {
                continue;
            }
            if quoted.iter().any(|r| r.contains(&start)) {
                continue;
            }

            let comment = comments.iter().find(|r| r.contains(&start));
            let limit = comment.map_or(content.len(), |r| r.end);
            let open = m.end() - 1;

            match find_call_end(&content[..limit], open) {
                Some(span) => {
                    quoted.extend(span.strings);
                    calls.push(RawCall {
                        offset: start,
                        text: &content[start..span.end],
                        in_comment: comment.is_some(),
                    });
                }
                None if comment.is_some() => calls.push(RawCall {
                    offset: start,
                    text: &content[start..limit],
                    in_comment: true,
                }),
                None => return Err(UnterminatedCall { offset: start }),
            }
        }

        Ok(calls)
    }
}

fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

struct CallSpan {
    /// Index just past the closing paren.
    end: usize,
    /// String literals among the arguments, quotes included.
    strings: Vec<Range<usize>>,
}

/// Span of the call whose opening paren is at `open`.
fn find_call_end(content: &[u8], open: usize) -> Option<CallSpan> {
    let mut nesting = Nesting::default();
    let mut strings = Vec::new();
    let mut string_start = 0;

    for (i, &b) in content.iter().enumerate().skip(open) {
        let was_in_string = nesting.in_string();
        let step = nesting.step(b);
        match (was_in_string, nesting.in_string()) {
            (false, true) => string_start = i,
            (true, false) => strings.push(string_start..i + 1),
            _ => {}
        }
        if step == Step::Close && nesting.depth() == 0 {
            return Some(CallSpan {
                end: i + 1,
                strings,
            });
        }
    }
    None
}

/// Byte ranges of line and block comments.
///
/// Purely lexical: comment markers inside string literals are not told
/// apart, and `//` directly after `:` is taken as part of a URL.
fn comment_ranges(content: &[u8]) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut i = 0;

    'outer: while i < content.len() {
        let rest = &content[i..];

        for (open, close) in BLOCK_COMMENTS {
            if rest.starts_with(open.as_bytes()) {
                let body = &rest[open.len()..];
                let end = body
                    .windows(close.len())
                    .position(|w| w == close.as_bytes())
                    .map_or(content.len(), |p| i + open.len() + p + close.len());
                ranges.push(i..end);
                i = end;
                continue 'outer;
            }
        }

        if rest.starts_with(b"//") && (i == 0 || content[i - 1] != b':') {
            let end = rest
                .iter()
                .position(|&b| b == b'\n')
                .map_or(content.len(), |p| i + p);
            ranges.push(i..end);
            i = end;
            continue;
        }

        i += 1;
    }

    ranges
}
