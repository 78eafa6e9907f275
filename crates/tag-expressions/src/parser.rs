//! Operator-precedence (shunting-yard) parser building an [`Expression`].
//!
//! The parser keeps two stacks: pending operators (with the index of the part
//! that introduced them) and finished expressions. A single [`Fixity`] flag
//! records whether the next part must be an operand or an operator, which is
//! what rejects sequences such as `a b`, `and a`, or `a and or`.
//!
//! Transitions:
//!
//! | part        | requires   | then expects |
//! |-------------|------------|--------------|
//! | literal     | `Operand`  | `Operator`   |
//! | `not`, `(`  | `Operand`  | `Operand`    |
//! | `and`, `or` | `Operator` | `Operand`    |
//! | `)`         | `Operator` | `Operator`   |

use crate::ast::{Expression, Terms};
use crate::diagnostic::Diagnostic;
use crate::errors::TagExpressionError;
use crate::lexer::tokenize;
use crate::token::{Fixity, TokenKind};

const BEGIN: &str = "BEGIN";

/// Parse a tag expression into its expression tree.
///
/// Empty or whitespace-only input yields [`Expression::True`].
///
/// # Errors
///
/// Returns [`TagExpressionError`] when the text contains an illegal escape,
/// breaks the operand/operator alternation, or has unbalanced parentheses.
///
/// # Examples
///
/// ```
/// use tag_expressions::parse;
///
/// let expr = parse("not a or b and not c").unwrap();
/// assert_eq!(expr.to_string(), "( not ( a ) or ( b and not ( c ) ) )");
/// assert!(expr.matches(["b"]));
/// assert!(!expr.matches(["a", "c"]));
/// ```
pub fn parse(text: &str) -> Result<Expression, TagExpressionError> {
    let parts = tokenize(text).inspect_err(|err| log::debug!("rejected tag expression: {err}"))?;
    if parts.is_empty() {
        log::debug!("empty tag expression `{text}` matches every tag set");
        return Ok(Expression::True);
    }

    ParseState::new(text, &parts)
        .run()
        .inspect(|expression| log::debug!("parsed tag expression `{text}` as `{expression}`"))
        .inspect_err(|err| log::debug!("rejected tag expression: {err}"))
}

struct ParseState<'a> {
    text: &'a str,
    parts: &'a [String],
    operators: Vec<(TokenKind, usize)>,
    expressions: Vec<Expression>,
    expected: Fixity,
    last_part: &'a str,
}

impl<'a> ParseState<'a> {
    fn new(text: &'a str, parts: &'a [String]) -> Self {
        Self {
            text,
            parts,
            operators: Vec::new(),
            expressions: Vec::new(),
            expected: Fixity::Operand,
            last_part: BEGIN,
        }
    }

    fn run(mut self) -> Result<Expression, TagExpressionError> {
        let parts = self.parts;
        for (index, part) in parts.iter().enumerate() {
            match TokenKind::classify(part) {
                None => self.accept_literal(part, index)?,
                Some(kind @ (TokenKind::Not | TokenKind::OpenParen)) => {
                    self.accept_prefix(kind, index)?;
                }
                Some(kind @ (TokenKind::And | TokenKind::Or)) => {
                    self.accept_binary(kind, index)?;
                }
                Some(TokenKind::CloseParen) => self.accept_close_paren(index)?,
            }
            self.last_part = part.as_str();
        }
        self.finish()
    }

    fn expect(&self, actual: Fixity, index: usize) -> Result<(), TagExpressionError> {
        if self.expected == actual {
            return Ok(());
        }
        Err(TagExpressionError::UnexpectedTokenType {
            expected: self.expected,
            previous: self.last_part.to_string(),
            index,
            diagnostic: Diagnostic::locate(self.parts, index),
        })
    }

    fn accept_literal(&mut self, part: &str, index: usize) -> Result<(), TagExpressionError> {
        self.expect(Fixity::Operand, index)?;
        self.expressions.push(Expression::literal(part));
        self.expected = Fixity::Operator;
        Ok(())
    }

    /// `not` and `(` both open a new operand position.
    fn accept_prefix(&mut self, kind: TokenKind, index: usize) -> Result<(), TagExpressionError> {
        self.expect(Fixity::Operand, index)?;
        self.operators.push((kind, index));
        self.expected = Fixity::Operand;
        Ok(())
    }

    fn accept_binary(&mut self, kind: TokenKind, index: usize) -> Result<(), TagExpressionError> {
        self.expect(Fixity::Operator, index)?;
        let incoming = kind.info();
        while let Some(&(top, _)) = self.operators.last() {
            let pending = top.info();
            if !(pending.is_operation() && incoming.has_lower_precedence_than(&pending)) {
                break;
            }
            self.operators.pop();
            self.reduce(top)?;
        }
        self.operators.push((kind, index));
        self.expected = Fixity::Operand;
        Ok(())
    }

    fn accept_close_paren(&mut self, index: usize) -> Result<(), TagExpressionError> {
        self.expect(Fixity::Operator, index)?;
        loop {
            match self.operators.pop() {
                Some((TokenKind::OpenParen, _)) => break,
                Some((op, _)) => self.reduce(op)?,
                None => {
                    return Err(TagExpressionError::UnbalancedCloseParen {
                        expression: self.text.to_string(),
                        index,
                        diagnostic: Diagnostic::locate(self.parts, index),
                    });
                }
            }
        }
        self.expected = Fixity::Operator;
        Ok(())
    }

    fn finish(mut self) -> Result<Expression, TagExpressionError> {
        while let Some((op, index)) = self.operators.pop() {
            if op == TokenKind::OpenParen {
                return Err(TagExpressionError::UnbalancedOpenParen {
                    expression: self.text.to_string(),
                    index,
                    diagnostic: Diagnostic::locate(self.parts, index),
                });
            }
            self.reduce(op)?;
        }

        let count = self.expressions.len();
        self.expressions
            .pop()
            .filter(|_| count == 1)
            .ok_or(TagExpressionError::InvalidExpression { count })
    }

    /// Replace the top `op.arity()` expressions with the node `op` builds.
    fn reduce(&mut self, op: TokenKind) -> Result<(), TagExpressionError> {
        let node = match op {
            TokenKind::And => Expression::And(self.pop_terms(op)?),
            TokenKind::Or => Expression::Or(self.pop_terms(op)?),
            TokenKind::Not => {
                let term = self.expressions.pop().ok_or_else(|| self.too_few(op))?;
                Expression::not(term)
            }
            // The close-paren handler and `finish` consume parentheses
            // without reducing them.
            TokenKind::OpenParen | TokenKind::CloseParen => {
                return Err(TagExpressionError::UnexpectedToken { token: op });
            }
        };
        self.expressions.push(node);
        log::trace!(
            "reduced `{op}`, {} expression(s) pending",
            self.expressions.len()
        );
        Ok(())
    }

    fn pop_terms(&mut self, op: TokenKind) -> Result<Terms, TagExpressionError> {
        let start = self
            .expressions
            .len()
            .checked_sub(op.arity())
            .ok_or_else(|| self.too_few(op))?;
        Terms::try_from(self.expressions.split_off(start)).map_err(|_| self.too_few(op))
    }

    fn too_few(&self, op: TokenKind) -> TagExpressionError {
        TagExpressionError::TooFewOperands {
            operator: op,
            needed: op.arity(),
            available: self.expressions.len(),
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests exercise parser fallibility")]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn fresh_state(parts: &[String]) -> ParseState<'_> {
        ParseState::new("", parts)
    }

    #[test]
    fn empty_input_is_true() {
        assert_eq!(parse("").unwrap(), Expression::True);
        assert_eq!(parse(" \t ").unwrap(), Expression::True);
    }

    #[test]
    fn builds_binary_nodes_left_to_right() {
        let expr = parse("a and b and c").unwrap();
        assert_eq!(
            expr,
            Expression::and(
                Expression::and(Expression::literal("a"), Expression::literal("b")),
                Expression::literal("c"),
            )
        );
    }

    #[test]
    fn stacks_repeated_negation() {
        let expr = parse("not not a").unwrap();
        assert_eq!(
            expr,
            Expression::not(Expression::not(Expression::literal("a")))
        );
    }

    #[test]
    fn reports_previous_part_in_alternation_errors() {
        let err = parse("a and or").unwrap_err();
        match err {
            TagExpressionError::UnexpectedTokenType {
                expected,
                previous,
                index,
                ..
            } => {
                assert_eq!(expected, Fixity::Operand);
                assert_eq!(previous, "and");
                assert_eq!(index, 2);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn reports_begin_before_first_part() {
        let err = parse("or a").unwrap_err();
        assert!(
            err.to_string()
                .starts_with("Syntax error. Expected operand after BEGIN\n")
        );
    }

    #[test]
    fn locates_unclosed_parenthesis() {
        let err = parse("a and ( ( b or c )").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnbalancedOpenParen);
        assert_eq!(err.index(), Some(2));
    }

    #[test]
    fn reduce_rejects_missing_operands() {
        let parts: Vec<String> = Vec::new();
        let mut state = fresh_state(&parts);
        state.expressions.push(Expression::literal("a"));
        let err = state.reduce(TokenKind::Or).unwrap_err();
        assert_eq!(
            err,
            TagExpressionError::TooFewOperands {
                operator: TokenKind::Or,
                needed: 2,
                available: 1,
            }
        );
        assert_eq!(state.expressions, [Expression::literal("a")]);
    }

    #[test]
    fn reduce_rejects_parentheses() {
        let parts: Vec<String> = Vec::new();
        let mut state = fresh_state(&parts);
        state.expressions.push(Expression::literal("a"));
        for paren in [TokenKind::OpenParen, TokenKind::CloseParen] {
            let err = state.reduce(paren).unwrap_err();
            assert_eq!(err, TagExpressionError::UnexpectedToken { token: paren });
            assert_eq!(err.kind(), ErrorKind::UnexpectedToken);
        }
        assert_eq!(state.expressions, [Expression::literal("a")]);
    }

    #[test]
    fn reduce_rejects_negation_without_operand() {
        let parts: Vec<String> = Vec::new();
        let mut state = fresh_state(&parts);
        assert_eq!(
            state.reduce(TokenKind::Not).unwrap_err(),
            TagExpressionError::TooFewOperands {
                operator: TokenKind::Not,
                needed: 1,
                available: 0,
            }
        );
    }

    #[test]
    fn parses_deeply_nested_input() {
        let depth = 100_000;
        let negated = parse(&format!("{}x", "not ".repeat(depth))).unwrap();
        assert!(negated.matches(["x"]));
        assert!(!negated.matches(["y"]));
        drop(negated);

        let nested = format!("{}x{}", "a and (".repeat(depth), ")".repeat(depth));
        let expr = parse(&nested).unwrap();
        assert!(expr.matches(["a", "x"]));
        assert!(!expr.matches(["a"]));
        let rendered = expr.to_string();
        assert!(rendered.starts_with("( a and ( a and "));
        assert!(rendered.ends_with("( a and x ) ) )"));
    }

    #[test]
    fn finish_requires_single_root() {
        let parts: Vec<String> = Vec::new();
        let mut state = fresh_state(&parts);
        state.expressions.push(Expression::literal("a"));
        state.expressions.push(Expression::literal("b"));
        assert_eq!(
            state.finish().unwrap_err(),
            TagExpressionError::InvalidExpression { count: 2 }
        );
        assert_eq!(
            fresh_state(&parts).finish().unwrap_err(),
            TagExpressionError::InvalidExpression { count: 0 }
        );
    }
}
