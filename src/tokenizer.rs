//! # Tokenizer/ Lexer
//!
//! Scans JSON source text into a lazy stream of located tokens.
pub mod lexer;
pub mod token;

// Re-exports
pub use lexer::{LexError, Lexer, Tokens, tokenize};
pub use token::{Kind, LexicalError, Location, Token};
