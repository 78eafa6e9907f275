//! Expression tree produced by the parser.
//!
//! The tree is a closed sum type: literals test tag membership, `And`/`Or`
//! combine two or more [`Terms`], `Not` negates one term, and `True` stands
//! for the empty expression. Evaluation short-circuits left to right.
//!
//! [`Display`](fmt::Display) renders a canonical form that always
//! parenthesises binary operations and re-escapes literal text, so feeding it
//! back to [`parse`](crate::parse) yields an equivalent tree.
//!
//! Evaluation, rendering and dropping walk the tree with an explicit stack,
//! so nesting depth is bounded by memory rather than by the thread's stack.

use std::collections::HashSet;
use std::fmt;
use std::slice;
use std::str::FromStr;

use crate::errors::TagExpressionError;
use crate::lexer::is_escapable;
use crate::tags::TagSet;

/// Parsed representation of a tag expression.
///
/// Children are owned by their parent and never shared, so a tree can be
/// evaluated from several threads at once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expression {
    /// Matches a tag exactly equal to the unescaped name.
    Literal(String),
    /// Conjunction of every term.
    And(Terms),
    /// Disjunction of every term.
    Or(Terms),
    /// Negation of a single term.
    Not(Box<Expression>),
    /// The empty expression; matches every tag set.
    True,
}

/// Operands of an `and` or `or` node, in order.
///
/// Always holds at least two expressions.
///
/// # Examples
///
/// ```
/// use tag_expressions::{Expression, Terms};
///
/// let terms = Terms::try_from(vec![
///     Expression::literal("a"),
///     Expression::literal("b"),
///     Expression::literal("c"),
/// ])
/// .unwrap();
/// assert_eq!(Expression::Or(terms).to_string(), "( a or b or c )");
///
/// assert!(Terms::try_from(vec![Expression::literal("a")]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Terms(Vec<Expression>);

impl Terms {
    /// Two operands in order.
    #[must_use]
    pub fn pair(lhs: Expression, rhs: Expression) -> Self {
        Self(vec![lhs, rhs])
    }

    /// Operands as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Expression] {
        &self.0
    }

    /// Iterate over the operands in order.
    #[must_use]
    pub fn iter(&self) -> slice::Iter<'_, Expression> {
        self.0.iter()
    }
}

impl TryFrom<Vec<Expression>> for Terms {
    type Error = Vec<Expression>;

    /// Accepts two or more operands and hands shorter lists back unchanged.
    fn try_from(terms: Vec<Expression>) -> Result<Self, Self::Error> {
        if terms.len() < 2 {
            return Err(terms);
        }
        Ok(Self(terms))
    }
}

impl<'a> IntoIterator for &'a Terms {
    type Item = &'a Expression;
    type IntoIter = slice::Iter<'a, Expression>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Combinator waiting for the value of its current child.
enum Pending<'e> {
    Not,
    All(slice::Iter<'e, Expression>),
    Any(slice::Iter<'e, Expression>),
}

/// Unit of output still to be written by `Display`.
enum Step<'e> {
    Node(&'e Expression),
    Text(&'static str),
}

impl Expression {
    /// Leaf testing for `name`.
    #[must_use]
    pub fn literal(name: impl Into<String>) -> Self {
        Self::Literal(name.into())
    }

    /// Binary conjunction.
    #[must_use]
    pub fn and(lhs: Self, rhs: Self) -> Self {
        Self::And(Terms::pair(lhs, rhs))
    }

    /// Binary disjunction.
    #[must_use]
    pub fn or(lhs: Self, rhs: Self) -> Self {
        Self::Or(Terms::pair(lhs, rhs))
    }

    /// Negation of `term`.
    #[must_use]
    pub fn not(term: Self) -> Self {
        Self::Not(Box::new(term))
    }

    /// Evaluate the expression against a tag set.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashSet;
    /// use tag_expressions::parse;
    ///
    /// let expr = parse("@fast and not @wip").unwrap();
    /// let tags: HashSet<&str> = ["@fast"].into_iter().collect();
    /// assert!(expr.evaluate(&tags));
    /// assert!(!expr.evaluate(&["@fast", "@wip"]));
    /// ```
    #[must_use]
    pub fn evaluate<T: TagSet + ?Sized>(&self, tags: &T) -> bool {
        let mut pending = Vec::new();
        let mut node = self;
        loop {
            let mut value = match node {
                Self::Literal(name) => tags.contains_tag(name),
                Self::True => true,
                Self::Not(term) => {
                    pending.push(Pending::Not);
                    node = term.as_ref();
                    continue;
                }
                // Start from the identity so the first term is pulled below.
                Self::And(terms) => {
                    pending.push(Pending::All(terms.iter()));
                    true
                }
                Self::Or(terms) => {
                    pending.push(Pending::Any(terms.iter()));
                    false
                }
            };

            loop {
                match pending.last_mut() {
                    None => return value,
                    Some(Pending::Not) => {
                        pending.pop();
                        value = !value;
                    }
                    Some(Pending::All(rest)) => {
                        if let Some(next) = rest.next().filter(|_| value) {
                            node = next;
                            break;
                        }
                        pending.pop();
                    }
                    Some(Pending::Any(rest)) => {
                        if let Some(next) = rest.next().filter(|_| !value) {
                            node = next;
                            break;
                        }
                        pending.pop();
                    }
                }
            }
        }
    }

    /// Collect `tags` into a set and evaluate against it.
    ///
    /// # Examples
    ///
    /// ```
    /// use tag_expressions::parse;
    ///
    /// let expr = parse("a or b").unwrap();
    /// assert!(expr.matches(["b", "c"]));
    /// assert!(!expr.matches(std::iter::empty()));
    /// ```
    #[must_use]
    pub fn matches<'a, I>(&self, tags: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let set: HashSet<&'a str> = tags.into_iter().collect();
        self.evaluate(&set)
    }

    /// Move the direct children of `self` onto `out`.
    fn detach_children(&mut self, out: &mut Vec<Self>) {
        match self {
            Self::And(terms) | Self::Or(terms) => out.append(&mut terms.0),
            Self::Not(term) => out.push(std::mem::replace(term.as_mut(), Self::True)),
            Self::Literal(_) | Self::True => {}
        }
    }
}

impl Drop for Expression {
    fn drop(&mut self) {
        let mut orphans = Vec::new();
        self.detach_children(&mut orphans);
        while let Some(mut node) = orphans.pop() {
            node.detach_children(&mut orphans);
        }
    }
}

fn write_literal(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    for ch in name.chars() {
        if is_escapable(ch) {
            f.write_str("\\")?;
        }
        write!(f, "{ch}")?;
    }
    Ok(())
}

fn push_terms<'e>(steps: &mut Vec<Step<'e>>, terms: &'e Terms, separator: &'static str) {
    steps.push(Step::Text(" )"));
    for (index, term) in terms.iter().enumerate().rev() {
        steps.push(Step::Node(term));
        if index > 0 {
            steps.push(Step::Text(separator));
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut steps = vec![Step::Node(self)];
        while let Some(step) = steps.pop() {
            let node = match step {
                Step::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Step::Node(node) => node,
            };
            match node {
                Self::Literal(name) => write_literal(f, name)?,
                Self::And(terms) => {
                    f.write_str("( ")?;
                    push_terms(&mut steps, terms, " and ");
                }
                Self::Or(terms) => {
                    f.write_str("( ")?;
                    push_terms(&mut steps, terms, " or ");
                }
                // Binary operations already carry their own parentheses.
                Self::Not(term) => match term.as_ref() {
                    Self::And(_) | Self::Or(_) => {
                        f.write_str("not ")?;
                        steps.push(Step::Node(term));
                    }
                    _ => {
                        f.write_str("not ( ")?;
                        steps.push(Step::Text(" )"));
                        steps.push(Step::Node(term));
                    }
                },
                Self::True => {}
            }
        }
        Ok(())
    }
}

impl FromStr for Expression {
    type Err = TagExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse(s)
    }
}
