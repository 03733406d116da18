/*!
# `jsonlex` Library

A zero-copy lexical scanner for JSON text. [`tokenizer::Lexer`] hands out
one located [`tokenizer::Token`] per call and reports malformed input as
error tokens rather than failing.
*/

pub mod commands;
pub mod tokenizer;
pub mod utils;
