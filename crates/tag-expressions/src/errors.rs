//! Error types surfaced by tokenising and parsing tag expressions.

use std::fmt;

use thiserror::Error;

use crate::diagnostic::Diagnostic;
use crate::token::{Fixity, TokenKind};

/// Fieldless mirror of [`TagExpressionError`] for callers that only need to
/// branch on the failure category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A backslash precedes a character that cannot be escaped.
    IllegalEscape,
    /// An operand appeared where an operator was expected, or vice versa.
    UnexpectedTokenType,
    /// A `)` without a matching `(`.
    UnbalancedCloseParen,
    /// A `(` still open at the end of the input.
    UnbalancedOpenParen,
    /// An operator was reduced without enough operands.
    TooFewOperands,
    /// Parsing finished with other than one root expression.
    InvalidExpression,
    /// A token that never builds a node reached the reducer.
    UnexpectedToken,
}

/// Errors raised while turning text into an [`Expression`](crate::Expression).
///
/// Every variant aborts the parse; no partial tree is ever returned.
///
/// # Examples
///
/// ```
/// use tag_expressions::{parse, ErrorKind};
///
/// let err = parse("a b").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::UnexpectedTokenType);
/// assert_eq!(err.index(), Some(1));
/// assert!(err.to_string().starts_with("Syntax error. Expected operator after a"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TagExpressionError {
    /// A backslash precedes a character other than `(`, `)`, `\`, or
    /// whitespace, or ends the input.
    #[error(
        "Tag expression \"{expression}\" could not be parsed because of syntax error: \
         Illegal escape before {}.",
        EscapeTarget(.found)
    )]
    IllegalEscape {
        /// Raw input text.
        expression: String,
        /// Index of the part being accumulated when the escape was read.
        index: usize,
        /// Character following the backslash, if any.
        found: Option<char>,
    },
    /// The operand/operator alternation was broken.
    #[error("Syntax error. Expected {expected} after {previous}\n{diagnostic}")]
    UnexpectedTokenType {
        /// Token category the parser was waiting for.
        expected: Fixity,
        /// Previously accepted part, or `BEGIN` at the start.
        previous: String,
        /// Index of the rejected part.
        index: usize,
        /// Caret rendering of the rejected part.
        diagnostic: Diagnostic,
    },
    /// A close parenthesis found no open parenthesis on the operator stack.
    #[error("Missing '(': Too few open-parens in: {expression}\n{diagnostic}")]
    UnbalancedCloseParen {
        /// Raw input text.
        expression: String,
        /// Index of the unmatched `)`.
        index: usize,
        /// Caret rendering of the unmatched `)`.
        diagnostic: Diagnostic,
    },
    /// An open parenthesis was never closed.
    #[error("Unclosed '(': Too many open-parens in: {expression}\n{diagnostic}")]
    UnbalancedOpenParen {
        /// Raw input text.
        expression: String,
        /// Index of the unmatched `(`.
        index: usize,
        /// Caret rendering of the unmatched `(`.
        diagnostic: Diagnostic,
    },
    /// The expression stack held fewer operands than the operator needs.
    #[error("{operator}: Too few operands (need {needed}, have {available})")]
    TooFewOperands {
        /// Operator being reduced.
        operator: TokenKind,
        /// Operands the operator consumes.
        needed: usize,
        /// Operands left on the stack.
        available: usize,
    },
    /// Parsing left zero or several expressions on the stack.
    #[error("Invalid expression: Expected exactly one result, found {count}")]
    InvalidExpression {
        /// Number of expressions remaining.
        count: usize,
    },
    /// A parenthesis was handed to the reducer.
    #[error("Unexpected token: {token}")]
    UnexpectedToken {
        /// Token that cannot be reduced.
        token: TokenKind,
    },
}

impl TagExpressionError {
    /// Category of the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::IllegalEscape { .. } => ErrorKind::IllegalEscape,
            Self::UnexpectedTokenType { .. } => ErrorKind::UnexpectedTokenType,
            Self::UnbalancedCloseParen { .. } => ErrorKind::UnbalancedCloseParen,
            Self::UnbalancedOpenParen { .. } => ErrorKind::UnbalancedOpenParen,
            Self::TooFewOperands { .. } => ErrorKind::TooFewOperands,
            Self::InvalidExpression { .. } => ErrorKind::InvalidExpression,
            Self::UnexpectedToken { .. } => ErrorKind::UnexpectedToken,
        }
    }

    /// Index of the offending part, when the failure is tied to one.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        match self {
            Self::IllegalEscape { index, .. }
            | Self::UnexpectedTokenType { index, .. }
            | Self::UnbalancedCloseParen { index, .. }
            | Self::UnbalancedOpenParen { index, .. } => Some(*index),
            Self::TooFewOperands { .. }
            | Self::InvalidExpression { .. }
            | Self::UnexpectedToken { .. } => None,
        }
    }

    /// Positional rendering of the failure, when one exists.
    #[must_use]
    pub const fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Self::UnexpectedTokenType { diagnostic, .. }
            | Self::UnbalancedCloseParen { diagnostic, .. }
            | Self::UnbalancedOpenParen { diagnostic, .. } => Some(diagnostic),
            Self::IllegalEscape { .. }
            | Self::TooFewOperands { .. }
            | Self::InvalidExpression { .. }
            | Self::UnexpectedToken { .. } => None,
        }
    }
}

struct EscapeTarget<'a>(&'a Option<char>);

impl fmt::Display for EscapeTarget<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self.0 {
            Some(ch) => write!(f, "\"{ch}\""),
            None => f.write_str("end of input"),
        }
    }
}
