//! Splits tag-expression text into an ordered sequence of raw parts.
//!
//! Whitespace separates parts and is never emitted. `(` and `)` always form
//! parts of their own. A backslash escapes the next character into the
//! current part, but only `(`, `)`, `\`, and whitespace may be escaped.

use crate::errors::TagExpressionError;

/// Tokenise `text` into operand and keyword parts.
///
/// # Errors
///
/// Returns [`TagExpressionError::IllegalEscape`] when a backslash precedes any
/// other character or ends the input.
///
/// # Examples
///
/// ```
/// use tag_expressions::tokenize;
///
/// let parts = tokenize(r"x\(1\) or(y)").unwrap();
/// assert_eq!(parts, ["x(1)", "or", "(", "y", ")"]);
/// ```
pub fn tokenize(text: &str) -> Result<Vec<String>, TagExpressionError> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut escaped = false;

    let flush = |current: &mut String, parts: &mut Vec<String>| {
        if !current.is_empty() {
            parts.push(std::mem::take(current));
        }
    };

    for ch in text.chars() {
        if escaped {
            if !is_escapable(ch) {
                return Err(illegal_escape(text, parts.len(), Some(ch)));
            }
            current.push(ch);
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '(' | ')' => {
                flush(&mut current, &mut parts);
                parts.push(ch.to_string());
            }
            c if c.is_whitespace() => flush(&mut current, &mut parts),
            _ => current.push(ch),
        }
    }

    if escaped {
        return Err(illegal_escape(text, parts.len(), None));
    }
    flush(&mut current, &mut parts);
    Ok(parts)
}

/// Characters a backslash may precede.
pub(crate) fn is_escapable(ch: char) -> bool {
    matches!(ch, '(' | ')' | '\\') || ch.is_whitespace()
}

fn illegal_escape(text: &str, index: usize, found: Option<char>) -> TagExpressionError {
    TagExpressionError::IllegalEscape {
        expression: text.to_string(),
        index,
        found,
    }
}
