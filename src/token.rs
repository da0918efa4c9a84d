use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of lexical error an error token reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    UnrecognizedCharacter,
    OversizedIdentifier,
    InvalidNumber,
    MistypedOperator,
    InvalidOperatorPair,
    UnsupportedOperator,
    InvalidOperator,
    UnterminatedString,
    TrailingEscape,
    UnterminatedBlockComment,
}

/// The syntactic category of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenCategory {
    ReservedWord,
    Identifier,
    NaturalNumber,
    RealNumber,
    Operator,
    Delimiter,
    String,
    LineComment,
    BlockComment,
    Error(ErrorCategory),
}

impl ErrorCategory {
    pub const ALL: [ErrorCategory; 10] = [
        ErrorCategory::UnrecognizedCharacter,
        ErrorCategory::OversizedIdentifier,
        ErrorCategory::InvalidNumber,
        ErrorCategory::MistypedOperator,
        ErrorCategory::InvalidOperatorPair,
        ErrorCategory::UnsupportedOperator,
        ErrorCategory::InvalidOperator,
        ErrorCategory::UnterminatedString,
        ErrorCategory::TrailingEscape,
        ErrorCategory::UnterminatedBlockComment,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ErrorCategory::UnrecognizedCharacter => "UNRECOGNIZED_CHARACTER",
            ErrorCategory::OversizedIdentifier => "OVERSIZED_IDENTIFIER",
            ErrorCategory::InvalidNumber => "INVALID_NUMBER",
            ErrorCategory::MistypedOperator => "MISTYPED_OPERATOR",
            ErrorCategory::InvalidOperatorPair => "INVALID_OPERATOR_PAIR",
            ErrorCategory::UnsupportedOperator => "UNSUPPORTED_OPERATOR",
            ErrorCategory::InvalidOperator => "INVALID_OPERATOR",
            ErrorCategory::UnterminatedString => "UNTERMINATED_STRING",
            ErrorCategory::TrailingEscape => "TRAILING_ESCAPE",
            ErrorCategory::UnterminatedBlockComment => "UNTERMINATED_BLOCK_COMMENT",
        }
    }
}

impl TokenCategory {
    /// Every category except the error kinds, in listing order
    pub const VALID: [TokenCategory; 9] = [
        TokenCategory::ReservedWord,
        TokenCategory::Identifier,
        TokenCategory::NaturalNumber,
        TokenCategory::RealNumber,
        TokenCategory::Operator,
        TokenCategory::Delimiter,
        TokenCategory::String,
        TokenCategory::LineComment,
        TokenCategory::BlockComment,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TokenCategory::ReservedWord => "RESERVED_WORD",
            TokenCategory::Identifier => "IDENTIFIER",
            TokenCategory::NaturalNumber => "NATURAL_NUMBER",
            TokenCategory::RealNumber => "REAL_NUMBER",
            TokenCategory::Operator => "OPERATOR",
            TokenCategory::Delimiter => "DELIMITER",
            TokenCategory::String => "STRING",
            TokenCategory::LineComment => "LINE_COMMENT",
            TokenCategory::BlockComment => "BLOCK_COMMENT",
            TokenCategory::Error(kind) => kind.name(),
        }
    }

    /// Look a category up by its name, ignoring case. `ERROR` matches no single category.
    pub fn from_name(name: &str) -> Option<TokenCategory> {
        TokenCategory::VALID
            .into_iter()
            .chain(ErrorCategory::ALL.into_iter().map(TokenCategory::Error))
            .find(|category| category.name().eq_ignore_ascii_case(name))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, TokenCategory::Error(_))
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// A lexical unit found in the source. For error tokens the lexeme is the diagnostic
/// message rather than source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    lexeme: String,
    category: TokenCategory,
    line: usize,
    column: usize,
}

impl Token {
    pub fn new(lexeme: String, category: TokenCategory, line: usize, column: usize) -> Self {
        Token {
            lexeme,
            category,
            line,
            column,
        }
    }
    /// Get the matched text, or the diagnostic message of an error token
    pub fn get_lexeme(&self) -> &str {
        &self.lexeme
    }
    /// Get the syntactic category to which the token belongs to
    pub fn get_category(&self) -> TokenCategory {
        self.category
    }
    /// 1-based line of the token's first character
    pub fn get_line(&self) -> usize {
        self.line
    }
    /// 1-based column of the token's first character
    pub fn get_column(&self) -> usize {
        self.column
    }

    pub fn is_error(&self) -> bool {
        self.category.is_error()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token(lexeme='{}', category={}, pos=({}, {}))",
            self.lexeme, self.category, self.line, self.column
        )
    }
}

#[cfg(test)]
mod token_tests {
    use super::*;

    #[test]
    fn test_token_display() {
        let token = Token::new("x1".to_string(), TokenCategory::Identifier, 3, 7);
        assert_eq!(
            token.to_string(),
            "Token(lexeme='x1', category=IDENTIFIER, pos=(3, 7))"
        );
    }

    #[test]
    fn test_category_display_honours_width() {
        assert_eq!(format!("{:<28}", TokenCategory::Operator).len(), 28);
        assert_eq!(format!("[{:>10}]", TokenCategory::String), "[    STRING]");
        assert_eq!(
            format!("{:<5}", TokenCategory::Error(ErrorCategory::InvalidNumber)),
            "INVALID_NUMBER"
        );
    }

    #[test]
    fn test_category_names_round_trip() {
        for category in TokenCategory::VALID {
            assert_eq!(TokenCategory::from_name(category.name()), Some(category));
        }
        for kind in ErrorCategory::ALL {
            let category = TokenCategory::Error(kind);
            assert!(category.is_error());
            assert_eq!(TokenCategory::from_name(category.name()), Some(category));
        }
        assert_eq!(
            TokenCategory::from_name("line_comment"),
            Some(TokenCategory::LineComment)
        );
        assert_eq!(TokenCategory::from_name("ERROR"), None);
    }

    #[test]
    fn test_token_json_shape() {
        let token = Token::new("10.5".to_string(), TokenCategory::RealNumber, 1, 10);
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["lexeme"], "10.5");
        assert_eq!(json["category"], "REAL_NUMBER");
        assert_eq!(json["line"], 1);
        assert_eq!(json["column"], 10);

        let error = Token::new(
            "unterminated string literal".to_string(),
            TokenCategory::Error(ErrorCategory::UnterminatedString),
            2,
            1,
        );
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["category"]["ERROR"], "UNTERMINATED_STRING");

        let back: Token = serde_json::from_value(json).unwrap();
        assert_eq!(back, error);
    }
}
