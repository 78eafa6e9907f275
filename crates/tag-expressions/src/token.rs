//! Classifies lexical parts into operator tokens.
//!
//! Every keyword carries a fixed [`TokenInfo`] row describing its precedence,
//! associativity, and fixity. Parentheses are given synthetic precedences
//! below every real operator so they never trigger a reduction outside the
//! close-parenthesis handler.

use std::fmt;

/// How operators of equal precedence group in the absence of parentheses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Associativity {
    /// `a and b and c` groups as `(a and b) and c`.
    Left,
    /// `not not a` groups as `not (not a)`.
    Right,
}

/// Whether a token occupies a value position or an operator position.
///
/// The parser reuses this type for the token kind it expects next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fixity {
    /// Literals and parentheses.
    Operand,
    /// `and`, `or`, and `not`.
    Operator,
}

impl fmt::Display for Fixity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Operand => "operand",
            Self::Operator => "operator",
        })
    }
}

/// Static metadata attached to a [`TokenKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenInfo {
    /// Text that selects the token.
    pub keyword: &'static str,
    /// Binding strength; larger binds tighter.
    pub precedence: i8,
    /// Grouping for equal precedence.
    pub associativity: Associativity,
    /// Value-position or operator-position token.
    pub fixity: Fixity,
}

impl TokenInfo {
    const fn new(
        keyword: &'static str,
        precedence: i8,
        associativity: Associativity,
        fixity: Fixity,
    ) -> Self {
        Self {
            keyword,
            precedence,
            associativity,
            fixity,
        }
    }

    /// Returns `true` for `and`, `or`, and `not`.
    #[must_use]
    pub const fn is_operation(&self) -> bool {
        matches!(self.fixity, Fixity::Operator)
    }

    /// Decide whether an incoming token must wait for `other` to be reduced
    /// first.
    ///
    /// # Examples
    ///
    /// ```
    /// use tag_expressions::TokenKind;
    ///
    /// let and = TokenKind::And.info();
    /// let or = TokenKind::Or.info();
    /// assert!(or.has_lower_precedence_than(&and));
    /// assert!(and.has_lower_precedence_than(&and));
    /// assert!(!and.has_lower_precedence_than(&or));
    /// ```
    #[must_use]
    pub const fn has_lower_precedence_than(&self, other: &Self) -> bool {
        match self.associativity {
            Associativity::Left => self.precedence <= other.precedence,
            Associativity::Right => self.precedence < other.precedence,
        }
    }
}

/// Keyword tokens recognised by the parser.
///
/// Any part that does not match one of these keywords is a literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// Binary disjunction.
    Or,
    /// Binary conjunction.
    And,
    /// Unary prefix negation.
    Not,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
}

const KEYWORDS: [TokenKind; 5] = [
    TokenKind::Or,
    TokenKind::And,
    TokenKind::Not,
    TokenKind::OpenParen,
    TokenKind::CloseParen,
];

impl TokenKind {
    /// Select the token whose keyword equals `part`.
    ///
    /// Keywords are case-sensitive, so `AND` is an ordinary literal.
    ///
    /// # Examples
    ///
    /// ```
    /// use tag_expressions::TokenKind;
    ///
    /// assert_eq!(TokenKind::classify("and"), Some(TokenKind::And));
    /// assert_eq!(TokenKind::classify("AND"), None);
    /// assert_eq!(TokenKind::classify("@wip"), None);
    /// ```
    #[must_use]
    pub fn classify(part: &str) -> Option<Self> {
        KEYWORDS
            .into_iter()
            .find(|kind| kind.info().keyword == part)
    }

    /// Static metadata for this token.
    #[must_use]
    pub const fn info(self) -> TokenInfo {
        match self {
            Self::Or => TokenInfo::new("or", 0, Associativity::Left, Fixity::Operator),
            Self::And => TokenInfo::new("and", 1, Associativity::Left, Fixity::Operator),
            Self::Not => TokenInfo::new("not", 2, Associativity::Right, Fixity::Operator),
            Self::OpenParen => TokenInfo::new("(", -2, Associativity::Left, Fixity::Operand),
            Self::CloseParen => TokenInfo::new(")", -1, Associativity::Left, Fixity::Operand),
        }
    }

    /// Number of operands consumed when the token is reduced.
    ///
    /// Parentheses are never reduced and report zero.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Or | Self::And => 2,
            Self::Not => 1,
            Self::OpenParen | Self::CloseParen => 0,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().keyword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("or", TokenKind::Or)]
    #[case("and", TokenKind::And)]
    #[case("not", TokenKind::Not)]
    #[case("(", TokenKind::OpenParen)]
    #[case(")", TokenKind::CloseParen)]
    fn classifies_keywords(#[case] part: &str, #[case] expected: TokenKind) {
        assert_eq!(TokenKind::classify(part), Some(expected));
        assert_eq!(expected.info().keyword, part);
    }

    #[rstest]
    #[case("Or")]
    #[case("NOT")]
    #[case("andx")]
    #[case("x(1)")]
    #[case("")]
    fn treats_other_text_as_literal(#[case] part: &str) {
        assert_eq!(TokenKind::classify(part), None);
    }

    #[test]
    fn parentheses_rank_below_every_operator() {
        let operators = [TokenKind::Or, TokenKind::And, TokenKind::Not];
        for paren in [TokenKind::OpenParen, TokenKind::CloseParen] {
            for op in operators {
                assert!(paren.info().precedence < op.info().precedence);
            }
            assert!(!paren.info().is_operation());
        }
    }

    #[test]
    fn not_is_right_associative() {
        let not = TokenKind::Not.info();
        assert_eq!(not.associativity, Associativity::Right);
        assert!(!not.has_lower_precedence_than(&not));
    }

    #[test]
    fn fixity_displays_lowercase() {
        assert_eq!(Fixity::Operand.to_string(), "operand");
        assert_eq!(Fixity::Operator.to_string(), "operator");
    }
}
