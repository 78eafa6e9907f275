//! Boolean tag expressions for selecting scenarios by their tags.
//!
//! An expression such as `@fast and not (@wip or @flaky)` is tokenised,
//! parsed with an operator-precedence parser into an [`Expression`] tree, and
//! evaluated against any [`TagSet`]. `not` binds tighter than `and`, which
//! binds tighter than `or`; binary operators associate to the left. Keywords
//! are case-sensitive, and a backslash escapes `(`, `)`, `\`, or whitespace
//! inside a tag.
//!
//! ```
//! use tag_expressions::parse;
//!
//! let expr = parse("@fast and not (@wip or @flaky)").unwrap();
//! assert!(expr.matches(["@fast"]));
//! assert!(!expr.matches(["@fast", "@wip"]));
//! assert_eq!(expr.to_string(), "( @fast and not ( @wip or @flaky ) )");
//! ```
//!
//! Malformed input is rejected with a message that points at the offending
//! part:
//!
//! ```
//! use tag_expressions::parse;
//!
//! let err = parse("a and or").unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Syntax error. Expected operand after and\n\
//!      Expression: a and or\n\
//!      __________________^ (HERE)"
//! );
//! ```

mod ast;
mod diagnostic;
mod errors;
mod lexer;
mod parser;
mod tags;
mod token;

pub use ast::{Expression, Terms};
pub use diagnostic::Diagnostic;
pub use errors::{ErrorKind, TagExpressionError};
pub use lexer::tokenize;
pub use parser::parse;
pub use tags::TagSet;
pub use token::{Associativity, Fixity, TokenInfo, TokenKind};
