//! Positional diagnostics pointing at the offending part of an expression.

use std::fmt;

const LABEL: &str = "Expression: ";

/// Two-line rendering of a tokenised expression with a caret under the part
/// where parsing stopped.
///
/// # Examples
///
/// ```
/// use tag_expressions::Diagnostic;
///
/// let parts = ["a", "and", "or"].map(String::from);
/// let diagnostic = Diagnostic::locate(&parts, 2);
/// assert_eq!(
///     diagnostic.to_string(),
///     "Expression: a and or\n__________________^ (HERE)"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    expression: String,
    caret: usize,
}

impl Diagnostic {
    /// Build a diagnostic for `parts[index]`.
    ///
    /// The caret column is the label width plus the width of the preceding
    /// parts joined by single spaces, plus one. It therefore sits under the
    /// first character of any part after the first, and one column into the
    /// first part. An `index` past the end is clamped to `parts.len()`.
    #[must_use]
    pub fn locate(parts: &[String], index: usize) -> Self {
        let index = index.min(parts.len());
        let preceding = parts.get(..index).unwrap_or(parts).join(" ");
        Self {
            expression: parts.join(" "),
            caret: LABEL.len() + preceding.chars().count() + 1,
        }
    }

    /// Space-joined parts as they appear on the first line.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Column of the caret on the second line, in characters.
    #[must_use]
    pub const fn caret(&self) -> usize {
        self.caret
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{LABEL}{}", self.expression)?;
        write!(f, "{}^ (HERE)", "_".repeat(self.caret))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| (*item).to_string()).collect()
    }

    #[test]
    fn offsets_first_part_by_one_column() {
        let diagnostic = Diagnostic::locate(&parts(&["and", "a"]), 0);
        assert_eq!(diagnostic.caret(), 13);
        assert_eq!(
            diagnostic.to_string(),
            "Expression: and a\n_____________^ (HERE)"
        );
    }

    #[test]
    fn skips_preceding_parts_and_separators() {
        let diagnostic = Diagnostic::locate(&parts(&["(", "a", "and", "b", ")", ")"]), 5);
        assert_eq!(diagnostic.expression(), "( a and b ) )");
        assert_eq!(diagnostic.caret(), 12 + "( a and b ) ".len());
    }

    #[test]
    fn clamps_index_past_the_end() {
        let clamped = Diagnostic::locate(&parts(&["a", "b"]), 9);
        let at_end = Diagnostic::locate(&parts(&["a", "b"]), 2);
        assert_eq!(clamped, at_end);
        assert_eq!(clamped.caret(), 12 + "a b ".len());
    }

    #[test]
    fn measures_width_in_characters() {
        let diagnostic = Diagnostic::locate(&parts(&["été", "ü"]), 1);
        assert_eq!(diagnostic.caret(), 12 + 4);
    }
}
