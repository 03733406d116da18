//! # JSON Token
//!
//! Defines the tokens produced while scanning a JSON document. A [`Token`]
//! borrows its lexeme from the scanned source, so producing one never
//! allocates.
use serde::{Serialize, Serializer};
use std::fmt::{self, Display};

/// Classification of a scanned lexeme.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize)]
pub enum Kind {
    /* Delimiters */
    /// Opening curly brace
    OpenBrace,

    /// Closing curly brace
    CloseBrace,

    /// Opening square bracket
    OpenBracket,

    /// Closing square bracket
    CloseBracket,

    /// Colon character
    Colon,

    /// Comma character
    Comma,

    /* Values */
    /// Double quoted string, quotes included in the lexeme
    String,

    /// Unsigned run of ASCII digits
    Number,

    /// `true` literal
    True,

    /// `false` literal
    False,

    /// `null` literal
    Null,

    /* Reserved */
    /// Lexical error, see [`LexicalError`]
    Error,

    /// End of the fed text
    EndOfText,
}

impl Kind {
    /// Canonical diagnostic name of the kind, e.g. `Kind_OpenBrace`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::OpenBrace => "Kind_OpenBrace",
            Self::CloseBrace => "Kind_CloseBrace",
            Self::OpenBracket => "Kind_OpenBracket",
            Self::CloseBracket => "Kind_CloseBracket",
            Self::Colon => "Kind_Colon",
            Self::Comma => "Kind_Comma",
            Self::String => "Kind_String",
            Self::Number => "Kind_Number",
            Self::True => "Kind_True",
            Self::False => "Kind_False",
            Self::Null => "Kind_Null",
            Self::Error => "Kind_Error",
            Self::EndOfText => "Kind_EndOfText",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position of the first character of a lexeme.
///
/// Lines start at 1, columns at 0. Columns count characters, not bytes.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize)]
pub struct Location {
    /// 1-based line
    pub line: u32,
    /// 0-based column
    pub column: u32,
}

impl Location {
    /// Location of the very first character of a text.
    pub const START: Self = Self { line: 1, column: 0 };
}

impl Default for Location {
    fn default() -> Self {
        Self::START
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Reason attached to a [`Kind::Error`] token.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum LexicalError {
    /// Character that starts no token
    UnexpectedCharacter,
    /// String literal crossed a newline before its closing quote
    MultilineString,
    /// String literal ran into the end of the text
    UnterminatedString,
    /// Bare word other than `true`, `false` or `null`
    UnexpectedName,
}

impl LexicalError {
    /// Human readable diagnostic for the error.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::UnexpectedCharacter => "Unexpected character.",
            Self::MultilineString => {
                "Multiline strings are not supported. String Unterminated."
            }
            Self::UnterminatedString => "Unterminated string.",
            Self::UnexpectedName => {
                "Unexpected name token, expected true, null or false."
            }
        }
    }
}

impl Display for LexicalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

// NOTE: serialized as the message so JSON consumers see the same text as the
// debug form.
impl Serialize for LexicalError {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// A classified, located lexeme.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub struct Token<'a> {
    /// What was scanned
    pub kind: Kind,
    /// Where the lexeme starts
    pub location: Location,
    /// The lexeme itself, a slice of the scanned source
    pub content: &'a str,
    /// Present iff `kind` is [`Kind::Error`]
    pub error: Option<LexicalError>,
}

impl<'a> Token<'a> {
    /// Create a non-error token.
    #[must_use]
    pub const fn new(kind: Kind, location: Location, content: &'a str) -> Self {
        Self {
            kind,
            location,
            content,
            error: None,
        }
    }

    /// Create an error token.
    #[must_use]
    pub const fn error(
        error: LexicalError,
        location: Location,
        content: &'a str,
    ) -> Self {
        Self {
            kind: Kind::Error,
            location,
            content,
            error: Some(error),
        }
    }

    /// Whether this token reports a lexical error.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.kind, Kind::Error)
    }

    /// Whether this token marks the end of the text.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        matches!(self.kind, Kind::EndOfText)
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({}, '{}', {}", self.kind, self.content, self.location)?;
        if let Some(error) = self.error {
            write!(f, ", cause='{error}'")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(Kind::OpenBrace.name(), "Kind_OpenBrace");
        assert_eq!(Kind::EndOfText.to_string(), "Kind_EndOfText");
        assert_eq!(Kind::Null.to_string(), "Kind_Null");
    }

    #[test]
    fn test_display_plain() {
        let token =
            Token::new(Kind::String, Location { line: 3, column: 7 }, "\"a\"");
        assert_eq!(token.to_string(), "Token(Kind_String, '\"a\"', 3:7)");
    }

    #[test]
    fn test_display_with_cause() {
        let token = Token::error(
            LexicalError::UnexpectedCharacter,
            Location::START,
            ".",
        );
        assert_eq!(
            token.to_string(),
            "Token(Kind_Error, '.', 1:0, cause='Unexpected character.')"
        );
    }

    #[test]
    fn test_serialize_error_as_message() {
        let token = Token::error(
            LexicalError::UnterminatedString,
            Location { line: 2, column: 1 },
            "\"ab",
        );
        let json = serde_json::to_value(token).expect("token serializes");
        assert_eq!(json["kind"], "Error");
        assert_eq!(json["content"], "\"ab");
        assert_eq!(json["location"]["line"], 2);
        assert_eq!(json["error"], "Unterminated string.");

        let ok = Token::new(Kind::Comma, Location::START, ",");
        let json = serde_json::to_value(ok).expect("token serializes");
        assert!(json["error"].is_null());
    }
}
