//! HRML Lexer
//!
//! Tokenizes HRML markup into a stream of tokens.
//! Words are classified by shape (opening tag, closing tag, attribute name
//! and its operands); bracket and quote stripping lives in [`normalize`].
//!
//! # Example
//!
//! ```
//! use hrml_lexer::{Scanner, TokenKind};
//!
//! let tokens = Scanner::tokenize("<a> </a>");
//! assert_eq!(tokens[0].kind, TokenKind::OpenTag("<a>".into()));
//! assert_eq!(hrml_lexer::normalize::tag_name(tokens[0].kind.text()), "a");
//! ```

pub mod normalize;
pub mod scanner;
pub mod token;

pub use scanner::Scanner;
pub use token::{Span, Token, TokenKind};
