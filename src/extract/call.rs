//! Grammar of a single translation call.
//!
//! ```text
//! call     := NAME "(" args? ")"
//! args     := key ("," value)? ("," trailing)* ","?
//! key      := string
//! value    := string | object | array
//! trailing := any balanced expression
//! string   := '...' | "..." | `...`
//! ```
//!
//! The quote of each string argument only delimits that argument, so
//! `$_("a.b", 'Hello')` and `` $_('a.b', `Hello`) `` are equivalent.

use thiserror::Error;

/// Outcome of decomposing one raw call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCall {
    /// Literal key with an optional explicit value.
    Literal { key: String, value: Option<String> },
    /// The key is an expression (`__($name)`), nothing can be extracted.
    Dynamic { expression: String },
    /// The key contains a variable, or the value is a template with
    /// `${...}` placeholders.
    Interpolated { key: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct GrammarError(pub String);

impl GrammarError {
    fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Split a raw call such as `$_('a.b', "Hello", n, { count })` into its key
/// and optional value.
pub fn extract_key_and_value(raw: &str) -> Result<ParsedCall, GrammarError> {
    let open = raw
        .find('(')
        .ok_or_else(|| GrammarError::new("missing opening parenthesis"))?;
    let inner = raw[open + 1..]
        .trim_end()
        .strip_suffix(')')
        .ok_or_else(|| GrammarError::new("unterminated call"))?;

    let mut args = split_arguments(inner)?;
    // `fn('a', 'b',)` leaves an empty trailing argument.
    if args.len() > 1 && args.last().is_some_and(|a| a.is_empty()) {
        args.pop();
    }

    let first = args[0];
    if first.is_empty() {
        return Err(GrammarError::new("missing translation key"));
    }
    if let Some(pos) = args.iter().position(|a| a.is_empty()) {
        return Err(GrammarError::new(format!("argument {} is empty", pos + 1)));
    }

    let Some(key) = parse_string_literal(first)? else {
        return Ok(ParsedCall::Dynamic {
            expression: first.to_string(),
        });
    };
    if key.text.is_empty() {
        return Err(GrammarError::new("translation key is empty"));
    }

    let value = match args.get(1) {
        None => None,
        Some(arg) => match parse_string_literal(arg)? {
            Some(literal) => Some(literal),
            // Replacement parameters: `__('a', ['name' => $n])`, `$_('a', { n })`.
            None if arg.starts_with('{') || arg.starts_with('[') => None,
            None => {
                return Err(GrammarError::new(format!(
                    "second argument must be a quoted string or an object literal, found `{}`",
                    arg
                )));
            }
        },
    };

    if key.text.contains('$') || value.as_ref().is_some_and(Literal::is_template) {
        return Ok(ParsedCall::Interpolated { key: key.text });
    }

    Ok(ParsedCall::Literal {
        key: key.text,
        value: value.map(|v| v.text),
    })
}

/// A quoted string argument with escapes resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Literal {
    text: String,
    quote: char,
}

impl Literal {
    fn is_template(&self) -> bool {
        self.quote == '`' && self.text.contains("${")
    }
}

/// Parse an argument that consists of exactly one string literal.
///
/// Returns `Ok(None)` when the argument is anything else, including a
/// literal followed by more tokens (`'a.' . $b`).
fn parse_string_literal(arg: &str) -> Result<Option<Literal>, GrammarError> {
    let mut chars = arg.char_indices();
    let quote = match chars.next() {
        Some((_, q @ ('\'' | '"' | '`'))) => q,
        _ => return Ok(None),
    };

    let mut text = String::new();
    let mut escaped = false;
    for (i, c) in chars {
        if escaped {
            if c != quote && c != '\\' {
                text.push('\\');
            }
            text.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            let rest = arg[i + c.len_utf8()..].trim();
            return Ok(rest.is_empty().then_some(Literal { text, quote }));
        } else {
            text.push(c);
        }
    }

    Err(GrammarError::new(format!("unterminated string in `{}`", arg)))
}

/// Split the text between the call parentheses on top-level commas.
/// Arguments are returned trimmed.
fn split_arguments(inner: &str) -> Result<Vec<&str>, GrammarError> {
    let mut args = Vec::new();
    let mut nesting = Nesting::default();
    let mut start = 0;

    for (i, b) in inner.bytes().enumerate() {
        match nesting.step(b) {
            Step::Separator => {
                args.push(inner[start..i].trim());
                start = i + 1;
            }
            Step::Unbalanced => {
                return Err(GrammarError::new(format!(
                    "unbalanced '{}' in arguments",
                    b as char
                )));
            }
            _ => {}
        }
    }

    if nesting.in_string() {
        return Err(GrammarError::new("unterminated string"));
    }
    if nesting.depth() > 0 {
        return Err(GrammarError::new("unbalanced brackets in arguments"));
    }
    args.push(inner[start..].trim());

    Ok(args)
}

/// What a byte did to the nesting state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Text,
    Open,
    Close,
    /// Top-level comma.
    Separator,
    /// Closing bracket without a matching opener.
    Unbalanced,
}

/// Tracks quotes and bracket depth over ASCII delimiters.
///
/// Works on raw bytes: UTF-8 continuation bytes never collide with the
/// ASCII delimiters, so multi-byte text passes through as [`Step::Text`].
#[derive(Debug, Default)]
pub(crate) struct Nesting {
    quote: Option<u8>,
    escaped: bool,
    depth: usize,
}

impl Nesting {
    pub(crate) fn step(&mut self, b: u8) -> Step {
        if let Some(quote) = self.quote {
            if self.escaped {
                self.escaped = false;
            } else if b == b'\\' {
                self.escaped = true;
            } else if b == quote {
                self.quote = None;
            }
            return Step::Text;
        }

        match b {
            b'\'' | b'"' | b'`' => {
                self.quote = Some(b);
                Step::Text
            }
            b'(' | b'[' | b'{' => {
                self.depth += 1;
                Step::Open
            }
            b')' | b']' | b'}' => {
                if self.depth == 0 {
                    Step::Unbalanced
                } else {
                    self.depth -= 1;
                    Step::Close
                }
            }
            b',' if self.depth == 0 => Step::Separator,
            _ => Step::Text,
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn in_string(&self) -> bool {
        self.quote.is_some()
    }
}
