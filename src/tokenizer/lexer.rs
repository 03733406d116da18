//! # JSON Lexer
//!
//! Scans JSON source text into [`Token`]s one at a time. The lexer keeps a
//! cursor into the fed text together with its line/column position, and
//! reports malformed input as [`Kind::Error`] tokens instead of failing.
//!
//! ```rust
//! use jsonlex::tokenizer::{Kind, Lexer};
//!
//! let mut lexer = Lexer::with_source(r#"{"id": 7}"#);
//! let kinds: Vec<Kind> = lexer.tokens().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [
//!         Kind::OpenBrace,
//!         Kind::String,
//!         Kind::Colon,
//!         Kind::Number,
//!         Kind::CloseBrace,
//!         Kind::EndOfText
//!     ]
//! );
//! ```
use log::{debug, trace};
use std::error::Error;
use std::fmt;
use std::iter::FusedIterator;

use crate::tokenizer::{Kind, LexicalError, Location, Token};

/// A lexer producing tokens from a borrowed JSON text.
///
/// Calling [`Lexer::get`] past the end keeps returning
/// [`Kind::EndOfText`] tokens.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /// The text being scanned
    source: &'a str,
    /// Byte offset of the next unconsumed character
    head: usize,
    /// Byte offset of the first character of the current lexeme
    start: usize,
    /// Line of `head`
    line: u32,
    /// Column of `head`
    column: u32,
    /// Location of `start`
    location: Location,
}

impl Default for Lexer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> From<&'a str> for Lexer<'a> {
    fn from(source: &'a str) -> Self {
        Self::with_source(source)
    }
}

impl<'a> Lexer<'a> {
    /// Create a lexer over an empty text.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            source: "",
            head: 0,
            start: 0,
            line: Location::START.line,
            column: Location::START.column,
            location: Location::START,
        }
    }

    /// Create a lexer positioned at the beginning of `source`.
    #[must_use]
    pub fn with_source(source: &'a str) -> Self {
        let mut lexer = Self::new();
        lexer.feed(source);
        lexer
    }

    /// Drop the current text and move the position back to `1:0`.
    pub fn reset(&mut self) {
        self.source = "";
        self.head = 0;
        self.start = 0;
        self.line = Location::START.line;
        self.column = Location::START.column;
        self.location = Location::START;
    }

    /// Replace the text being scanned.
    ///
    /// The cursor moves to the beginning of `source` but the line/column
    /// counters carry over, so consecutive chunks of one document keep
    /// reporting positions relative to the whole document. Call
    /// [`Lexer::reset`] first to start counting from `1:0` again.
    pub const fn feed(&mut self, source: &'a str) {
        self.source = source;
        self.head = 0;
        self.start = 0;
    }

    /// Position of the next unconsumed character.
    #[must_use]
    pub const fn cursor(&self) -> Location {
        Location {
            line: self.line,
            column: self.column,
        }
    }

    /// Returns the next token of the text.
    pub fn get(&mut self) -> Token<'a> {
        self.skip_whitespace();

        let Some(c) = self.peek() else {
            return self.make_token(Kind::EndOfText);
        };

        let token = match c {
            '{' => self.make_ctoken(Kind::OpenBrace),
            '}' => self.make_ctoken(Kind::CloseBrace),
            '[' => self.make_ctoken(Kind::OpenBracket),
            ']' => self.make_ctoken(Kind::CloseBracket),
            ':' => self.make_ctoken(Kind::Colon),
            ',' => self.make_ctoken(Kind::Comma),
            '"' => self.read_string(),
            c if c.is_ascii_digit() => self.read_number(),
            c if c.is_ascii_alphanumeric() => self.read_name(),
            _ => {
                self.advance();
                self.make_etoken(LexicalError::UnexpectedCharacter)
            }
        };

        match token.error {
            Some(error) => debug!(
                "lexical error at {}: {error} ('{}')",
                token.location, token.content
            ),
            None => trace!("{token}"),
        }

        token
    }

    /// Iterate over the remaining tokens, up to and including the first
    /// [`Kind::EndOfText`]. Error tokens are yielded and scanning continues
    /// after them.
    pub const fn tokens(&mut self) -> Tokens<'_, 'a> {
        Tokens {
            lexer: self,
            finished: false,
        }
    }

    /// Next unconsumed character, if any.
    fn peek(&self) -> Option<char> {
        self.source[self.head..].chars().next()
    }

    /// Consume one character, updating the line/column counters.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.head += c.len_utf8();
        if c == '\n' {
            self.line = self.line.saturating_add(1);
            self.column = 0;
        } else {
            self.column = self.column.saturating_add(1);
        }
        Some(c)
    }

    /// Consume the next character only if it is `expected`.
    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Start the next lexeme at the cursor.
    const fn consume(&mut self) {
        self.location = self.cursor();
        self.start = self.head;
    }

    /// Discard a run of whitespace in front of the next lexeme.
    fn skip_whitespace(&mut self) {
        while self.match_char('\t')
            || self.match_char('\n')
            || self.match_char(' ')
        {}
        self.consume();
    }

    /// The lexeme matched so far.
    fn lexeme(&self) -> &'a str {
        &self.source[self.start..self.head]
    }

    fn make_token(&mut self, kind: Kind) -> Token<'a> {
        let token = Token::new(kind, self.location, self.lexeme());
        self.consume();
        token
    }

    /// Consume a single character and make a token of it.
    fn make_ctoken(&mut self, kind: Kind) -> Token<'a> {
        self.advance();
        self.make_token(kind)
    }

    // The cursor stays right after the offending lexeme; the next call to
    // `get` starts from there.
    fn make_etoken(&self, error: LexicalError) -> Token<'a> {
        Token::error(error, self.location, self.lexeme())
    }

    /// Reads a double quoted string. Escape sequences are not interpreted,
    /// the first `"` after the opening one closes the string.
    fn read_string(&mut self) -> Token<'a> {
        // opening quote
        self.advance();
        while let Some(c) = self.advance() {
            match c {
                '"' => return self.make_token(Kind::String),
                '\n' => return self.make_etoken(LexicalError::MultilineString),
                _ => {}
            }
        }
        self.make_etoken(LexicalError::UnterminatedString)
    }

    /// Reads a run of ASCII digits.
    fn read_number(&mut self) -> Token<'a> {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        self.make_token(Kind::Number)
    }

    /// Reads a bare word, which must be one of `true`, `false` or `null`.
    fn read_name(&mut self) -> Token<'a> {
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }
        match self.lexeme() {
            "true" => self.make_token(Kind::True),
            "false" => self.make_token(Kind::False),
            "null" => self.make_token(Kind::Null),
            _ => self.make_etoken(LexicalError::UnexpectedName),
        }
    }
}

/// Iterator returned by [`Lexer::tokens`].
#[derive(Debug)]
pub struct Tokens<'l, 'a> {
    lexer: &'l mut Lexer<'a>,
    finished: bool,
}

impl<'a> Iterator for Tokens<'_, 'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.lexer.get();
        self.finished = token.is_end();
        Some(token)
    }
}

impl FusedIterator for Tokens<'_, '_> {}

/// The first lexical error of a text, detached from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// What went wrong
    pub error: LexicalError,
    /// Where the offending lexeme starts
    pub location: Location,
    /// The offending lexeme
    pub lexeme: String,
}

impl Error for LexError {}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} (near '{}')", self.location, self.error, self.lexeme)
    }
}

/// Tokenize a whole JSON text, returning every token through
/// [`Kind::EndOfText`].
///
/// # Errors
///
/// Returns a [`LexError`] describing the first error token encountered.
pub fn tokenize(text: &str) -> Result<Vec<Token<'_>>, LexError> {
    let mut lexer = Lexer::with_source(text);
    let mut tokens: Vec<Token> = vec![];

    for token in lexer.tokens() {
        if let Some(error) = token.error {
            return Err(LexError {
                error,
                location: token.location,
                lexeme: token.content.to_owned(),
            });
        }
        tokens.push(token);
    }

    Ok(tokens)
}
