/* Single pass dispatch scanner. Identifiers and numbers are recognised by walking the DFAs
 * obtained from their NFAs by subset construction; operators, delimiters, strings and
 * comments are recognised by hand coded rules. Lexical errors never stop the scan, they are
 * reported as error tokens in source order. */

use crate::dfa::{construct_dfa, DFA};
use crate::grammar::{
    identifier_nfa, is_delimiter, is_digit, is_identifier_start, is_operator, is_reserved_word,
    number_nfa, DECIMAL_POINT, ESCAPE, INVALID_OPERATOR_PAIRS, MAX_IDENTIFIER_LEN,
    MISTYPED_OPERATORS, STRING_QUOTE, TWO_CHAR_OPERATORS, UNSUPPORTED_OPERATORS,
};
use crate::token::{ErrorCategory, Token, TokenCategory};
use color_eyre::eyre::{Result, WrapErr};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

/// List of lexical errors the scanner reports in-stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexicalError {
    /// A character that starts no token
    UnrecognizedCharacter(char),
    /// An identifier longer than the allowed maximum
    OversizedIdentifier(String),
    /// A digit run the number DFA does not accept, such as `123.`
    InvalidNumber(String),
    /// A common operator typo
    MistypedOperator { found: String, expected: String },
    /// Two operators that may not abut
    InvalidOperatorPair(String),
    /// An operator that looks valid but does not exist in the language
    UnsupportedOperator(String),
    InvalidOperator(char),
    UnterminatedString,
    /// A string whose escape character is the last character of the input
    TrailingEscape,
    UnterminatedBlockComment,
}

impl fmt::Display for LexicalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexicalError::UnrecognizedCharacter(ch) => {
                write!(f, "Error: Unrecognized character '{}'", ch.escape_debug())
            }
            LexicalError::OversizedIdentifier(identifier) => write!(
                f,
                "Error: Identifier '{}' exceeds the limit of {} characters",
                identifier, MAX_IDENTIFIER_LEN
            ),
            LexicalError::InvalidNumber(number) => {
                write!(f, "Error: Invalid number '{}'", number)
            }
            LexicalError::MistypedOperator { found, expected } => write!(
                f,
                "Error: Invalid operator '{}', did you mean '{}'?",
                found, expected
            ),
            LexicalError::InvalidOperatorPair(pair) => {
                write!(f, "Error: Invalid adjacent operators '{}'", pair)
            }
            LexicalError::UnsupportedOperator(operator) => {
                write!(f, "Error: Operator '{}' does not exist in the language", operator)
            }
            LexicalError::InvalidOperator(ch) => {
                write!(f, "Error: Invalid operator '{}'", ch.escape_debug())
            }
            LexicalError::UnterminatedString => write!(f, "Error: Unterminated string literal"),
            LexicalError::TrailingEscape => {
                write!(f, "Error: Escape character at the end of the input")
            }
            LexicalError::UnterminatedBlockComment => {
                write!(f, "Error: Unterminated block comment")
            }
        }
    }
}

impl std::error::Error for LexicalError {}

impl LexicalError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LexicalError::UnrecognizedCharacter(_) => ErrorCategory::UnrecognizedCharacter,
            LexicalError::OversizedIdentifier(_) => ErrorCategory::OversizedIdentifier,
            LexicalError::InvalidNumber(_) => ErrorCategory::InvalidNumber,
            LexicalError::MistypedOperator { .. } => ErrorCategory::MistypedOperator,
            LexicalError::InvalidOperatorPair(_) => ErrorCategory::InvalidOperatorPair,
            LexicalError::UnsupportedOperator(_) => ErrorCategory::UnsupportedOperator,
            LexicalError::InvalidOperator(_) => ErrorCategory::InvalidOperator,
            LexicalError::UnterminatedString => ErrorCategory::UnterminatedString,
            LexicalError::TrailingEscape => ErrorCategory::TrailingEscape,
            LexicalError::UnterminatedBlockComment => ErrorCategory::UnterminatedBlockComment,
        }
    }
}

/// The scanner owns the compiled identifier and number DFAs. It holds no per-input state,
/// so a single scanner can analyse any number of inputs, from any number of threads.
#[derive(Debug, Clone)]
pub struct Scanner {
    identifier_dfa: DFA,
    number_dfa: DFA,
}

impl Default for Scanner {
    fn default() -> Self {
        construct_scanner()
    }
}

impl Scanner {
    pub fn get_identifier_dfa(&self) -> &DFA {
        &self.identifier_dfa
    }

    pub fn get_number_dfa(&self) -> &DFA {
        &self.number_dfa
    }

    /// Tokenize `source`. Whitespace produces no tokens; every lexical error produces an
    /// error token in place and scanning carries on after it.
    pub fn analyze(&self, source: &str) -> Vec<Token> {
        let mut session = Session::new(self, source);
        session.run();

        let tokens = session.tokens;

        debug!(
            tokens = tokens.len(),
            errors = tokens.iter().filter(|token| token.is_error()).count(),
            "lexical analysis finished"
        );

        tokens
    }

    /// Read the source file and tokenize its contents
    pub fn scan_file<P: AsRef<Path>>(&self, source_file: P) -> Result<Vec<Token>> {
        let source_file = source_file.as_ref();

        let source = fs::read_to_string(source_file).wrap_err_with(|| {
            format!("Error: Failed to read the source file {}", source_file.display())
        })?;

        Ok(self.analyze(&source))
    }
}

/// Build the identifier and number NFAs and reduce them to the DFAs the scanner walks
pub fn construct_scanner() -> Scanner {
    Scanner {
        identifier_dfa: construct_dfa(&identifier_nfa()),
        number_dfa: construct_dfa(&number_nfa()),
    }
}

/// Per-call scanning state
struct Session<'a> {
    scanner: &'a Scanner,
    source: Vec<char>,
    cursor: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl<'a> Session<'a> {
    fn new(scanner: &'a Scanner, source: &str) -> Self {
        Session {
            scanner,
            source: source.chars().collect(),
            cursor: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    fn run(&mut self) {
        while let Some(ch) = self.peek(0) {
            let before = self.cursor;
            self.next_token(ch);
            debug_assert!(self.cursor > before, "scanner made no progress");
        }
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.source.get(self.cursor + offset).copied()
    }

    fn starts_with(&self, pattern: &str) -> bool {
        pattern
            .chars()
            .enumerate()
            .all(|(offset, ch)| self.peek(offset) == Some(ch))
    }

    fn match_table(&self, table: &[&'static str]) -> Option<&'static str> {
        table.iter().copied().find(|pattern| self.starts_with(pattern))
    }

    /// The cursor, line and column at the start of a token
    fn mark(&self) -> (usize, usize, usize) {
        (self.cursor, self.line, self.column)
    }

    fn bump(&mut self) {
        if let Some(ch) = self.peek(0) {
            self.cursor += 1;
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn bump_n(&mut self, amount: usize) {
        for _ in 0..amount {
            self.bump();
        }
    }

    fn lexeme_from(&self, start: usize) -> String {
        self.source[start..self.cursor].iter().collect()
    }

    fn emit(&mut self, lexeme: String, category: TokenCategory, line: usize, column: usize) {
        trace!(%category, line, column, lexeme = %lexeme, "token");
        self.tokens.push(Token::new(lexeme, category, line, column));
    }

    fn emit_error(&mut self, error: LexicalError, line: usize, column: usize) {
        self.emit(
            error.to_string(),
            TokenCategory::Error(error.category()),
            line,
            column,
        );
    }

    fn next_token(&mut self, ch: char) {
        if ch.is_whitespace() {
            self.bump();
            return;
        }

        // Comments have to be checked before operators
        if ch == '/' && matches!(self.peek(1), Some('/') | Some('*')) {
            self.scan_comment();
        } else if is_identifier_start(ch) {
            self.scan_identifier();
        } else if is_digit(ch) {
            self.scan_number();
        } else if is_operator(ch) {
            self.scan_operator();
        } else if is_delimiter(ch) {
            self.scan_delimiter();
        } else if ch == STRING_QUOTE {
            self.scan_string();
        } else {
            let (_, line, column) = self.mark();
            self.bump();
            self.emit_error(LexicalError::UnrecognizedCharacter(ch), line, column);
        }
    }

    fn scan_identifier(&mut self) {
        let (start, line, column) = self.mark();
        let scanner = self.scanner;

        let run = scanner.identifier_dfa.walk(&self.source[self.cursor..]);
        self.bump_n(run.consumed);

        let lexeme = self.lexeme_from(start);

        if run.consumed > MAX_IDENTIFIER_LEN {
            self.emit_error(LexicalError::OversizedIdentifier(lexeme), line, column);
            return;
        }

        let category = if is_reserved_word(&lexeme) {
            TokenCategory::ReservedWord
        } else {
            TokenCategory::Identifier
        };

        self.emit(lexeme, category, line, column);
    }

    fn scan_number(&mut self) {
        let (start, line, column) = self.mark();
        let scanner = self.scanner;

        let run = scanner.number_dfa.walk(&self.source[self.cursor..]);
        self.bump_n(run.consumed);

        let lexeme = self.lexeme_from(start);

        if !run.accepted {
            self.emit_error(LexicalError::InvalidNumber(lexeme), line, column);
            return;
        }

        let category = if lexeme.contains(DECIMAL_POINT) {
            TokenCategory::RealNumber
        } else {
            TokenCategory::NaturalNumber
        };

        self.emit(lexeme, category, line, column);
    }

    /// Longest match first: the diagnosed sequences win over the valid two character
    /// operators, which win over single characters.
    fn scan_operator(&mut self) {
        let (start, line, column) = self.mark();

        if let Some((found, expected)) = MISTYPED_OPERATORS
            .iter()
            .copied()
            .find(|(found, _)| self.starts_with(found))
        {
            self.bump_n(found.chars().count());
            let error = LexicalError::MistypedOperator {
                found: found.to_string(),
                expected: expected.to_string(),
            };
            self.emit_error(error, line, column);
        } else if let Some(pair) = self.match_table(&INVALID_OPERATOR_PAIRS) {
            self.bump_n(pair.chars().count());
            self.emit_error(LexicalError::InvalidOperatorPair(pair.to_string()), line, column);
        } else if let Some(operator) = self.match_table(&UNSUPPORTED_OPERATORS) {
            self.bump_n(operator.chars().count());
            let error = LexicalError::UnsupportedOperator(operator.to_string());
            self.emit_error(error, line, column);
        } else if let Some(operator) = self.match_table(&TWO_CHAR_OPERATORS) {
            self.bump_n(operator.chars().count());
            self.emit(operator.to_string(), TokenCategory::Operator, line, column);
        } else if let Some(ch) = self.peek(0) {
            self.bump();

            // The dispatcher only sends operator characters here, the error arm covers
            // callers that do not
            if is_operator(ch) {
                let lexeme = self.lexeme_from(start);
                self.emit(lexeme, TokenCategory::Operator, line, column);
            } else {
                self.emit_error(LexicalError::InvalidOperator(ch), line, column);
            }
        }
    }

    fn scan_delimiter(&mut self) {
        let (start, line, column) = self.mark();
        self.bump();
        let lexeme = self.lexeme_from(start);
        self.emit(lexeme, TokenCategory::Delimiter, line, column);
    }

    fn scan_string(&mut self) {
        let (start, line, column) = self.mark();
        self.bump(); // Skip the opening quote

        while let Some(ch) = self.peek(0) {
            match ch {
                ESCAPE => {
                    if self.peek(1).is_none() {
                        self.bump();
                        self.emit_error(LexicalError::TrailingEscape, line, column);
                        return;
                    }
                    self.bump_n(2);
                }
                STRING_QUOTE => {
                    self.bump();
                    let lexeme = self.lexeme_from(start);
                    self.emit(lexeme, TokenCategory::String, line, column);
                    return;
                }
                // The newline is left for the whitespace rule to count
                '\n' => {
                    self.emit_error(LexicalError::UnterminatedString, line, column);
                    return;
                }
                _ => self.bump(),
            }
        }

        self.emit_error(LexicalError::UnterminatedString, line, column);
    }

    fn scan_comment(&mut self) {
        let (start, line, column) = self.mark();

        if self.peek(1) == Some('/') {
            self.bump_n(2);

            while let Some(ch) = self.peek(0) {
                if ch == '\n' {
                    break;
                }
                self.bump();
            }

            let lexeme = self.lexeme_from(start);
            self.emit(lexeme, TokenCategory::LineComment, line, column);
            return;
        }

        self.bump_n(2);

        while self.peek(0).is_some() {
            if self.starts_with("*/") {
                self.bump_n(2);
                let lexeme = self.lexeme_from(start);
                self.emit(lexeme, TokenCategory::BlockComment, line, column);
                return;
            }
            self.bump();
        }

        // The cursor is at the end of the input, nothing after the opening is tokenized
        self.emit_error(LexicalError::UnterminatedBlockComment, line, column);
    }
}


#[cfg(test)]
mod scanner_tests {
    use super::scanner_test_helpers::{categories, error, lex, lexemes};
    use super::*;
    use proptest::prelude::*;
    use crate::token::TokenCategory::*;

    #[test]
    fn test_declaration() {
        let tokens = lex("val x1 = 10.5;");
        let expected = vec![
            Token::new("val".to_string(), ReservedWord, 1, 1),
            Token::new("x1".to_string(), Identifier, 1, 5),
            Token::new("=".to_string(), Operator, 1, 8),
            Token::new("10.5".to_string(), RealNumber, 1, 10),
            Token::new(";".to_string(), Delimiter, 1, 14),
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(lex("").is_empty());
        assert!(lex(" \t\r\n\n  ").is_empty());
    }

    #[test]
    fn test_reserved_words() {
        let tokens = lex("fun val var if else when Int Double String return");
        assert_eq!(tokens.len(), 10);
        assert!(tokens.iter().all(|token| token.get_category() == ReservedWord));

        assert_eq!(categories("function int _val"), vec![Identifier; 3]);
    }

    #[test]
    fn test_identifier_length_limit() {
        assert_eq!(categories("abcdefghij"), vec![Identifier]);

        let tokens = lex("abcdefghijk");
        assert_eq!(tokens.len(), 1);
        assert_eq!(
            tokens[0].get_category(),
            error(ErrorCategory::OversizedIdentifier)
        );
        assert!(tokens[0].get_lexeme().contains("abcdefghijk"));
        assert_eq!((tokens[0].get_line(), tokens[0].get_column()), (1, 1));

        // Nothing of the oversized identifier leaks into the following tokens
        assert_eq!(
            categories("este_identificador = 1"),
            vec![error(ErrorCategory::OversizedIdentifier), Operator, NaturalNumber]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(categories("0 42 3.14"), vec![NaturalNumber, NaturalNumber, RealNumber]);
        assert_eq!(lexemes("007"), vec!["007"]);
    }

    #[test]
    fn test_number_maximal_run() {
        let tokens = lex("12.34.56");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].get_lexeme(), "12.34");
        assert_eq!(tokens[0].get_category(), RealNumber);
        assert_eq!(
            tokens[1].get_category(),
            error(ErrorCategory::UnrecognizedCharacter)
        );
        assert_eq!(tokens[1].get_column(), 6);
        assert_eq!(tokens[2].get_lexeme(), "56");
        assert_eq!(tokens[2].get_category(), NaturalNumber);
        assert_eq!(tokens[2].get_column(), 7);
    }

    #[test]
    fn test_invalid_numbers() {
        let tokens = lex("123.");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].get_category(), error(ErrorCategory::InvalidNumber));
        assert!(tokens[0].get_lexeme().contains("123."));

        // The character that stopped the walk starts the next token
        assert_eq!(
            categories("1.a"),
            vec![error(ErrorCategory::InvalidNumber), Identifier]
        );
        assert_eq!(
            categories("1..2"),
            vec![
                error(ErrorCategory::InvalidNumber),
                error(ErrorCategory::UnrecognizedCharacter),
                NaturalNumber
            ]
        );
        assert_eq!(
            categories(".123"),
            vec![error(ErrorCategory::UnrecognizedCharacter), NaturalNumber]
        );
    }

    #[test]
    fn test_number_followed_by_identifier() {
        assert_eq!(lexemes("12abc"), vec!["12", "abc"]);
    }

    #[test]
    fn test_operators() {
        let source = "== != <= >= && || ++ --";
        assert_eq!(lexemes(source), source.split(' ').collect::<Vec<_>>());
        assert_eq!(categories(source), vec![Operator; 8]);

        let source = "+ - * / % = < > ! & |";
        assert_eq!(lexemes(source), source.split(' ').collect::<Vec<_>>());
        assert_eq!(categories(source), vec![Operator; 11]);

        assert_eq!(lexemes("->"), vec!["-", ">"]);
        assert_eq!(lexemes(">>"), vec![">", ">"]);
        assert_eq!(lexemes("==="), vec!["==", "="]);
    }

    #[test]
    fn test_mistyped_operator() {
        let tokens = lex("=<");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].get_category(), error(ErrorCategory::MistypedOperator));
        assert!(tokens[0].get_lexeme().contains("<="));

        let tokens = lex("a =< b");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[2].get_lexeme(), "b");
        assert_eq!(tokens[2].get_column(), 6);
    }

    #[test]
    fn test_invalid_operator_pairs() {
        for pair in ["+*", "*+", "+-", "-+"] {
            let tokens = lex(pair);
            assert_eq!(tokens.len(), 1, "{pair}");
            assert_eq!(
                tokens[0].get_category(),
                error(ErrorCategory::InvalidOperatorPair)
            );
        }

        assert_eq!(
            categories("a+-1"),
            vec![
                Identifier,
                error(ErrorCategory::InvalidOperatorPair),
                NaturalNumber
            ]
        );
        assert_eq!(lexemes("a-*b"), vec!["a", "-", "*", "b"]);
    }

    #[test]
    fn test_operator_rule_rejects_other_characters() {
        let scanner = construct_scanner();
        let mut session = Session::new(&scanner, "^=");
        session.scan_operator();

        assert_eq!(session.cursor, 1);
        assert_eq!(session.tokens.len(), 1);
        assert_eq!(
            session.tokens[0].get_category(),
            error(ErrorCategory::InvalidOperator)
        );
        assert_eq!(
            session.tokens[0].get_lexeme(),
            LexicalError::InvalidOperator('^').to_string()
        );
    }

    #[test]
    fn test_unsupported_operator() {
        let tokens = lex("a >>> b");
        assert_eq!(tokens.len(), 3);
        assert_eq!(
            tokens[1].get_category(),
            error(ErrorCategory::UnsupportedOperator)
        );
        assert_eq!(tokens[2].get_column(), 7);

        assert_eq!(
            categories(">>>>"),
            vec![error(ErrorCategory::UnsupportedOperator), Operator]
        );
    }

    #[test]
    fn test_delimiters() {
        let source = "( ) { } , ; :";
        assert_eq!(lexemes(source), source.split(' ').collect::<Vec<_>>());
        assert_eq!(categories(source), vec![Delimiter; 7]);
    }

    #[test]
    fn test_strings() {
        let tokens = lex(r#"val s = "Hola \"Mundo\"""#);
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[3].get_category(), String);
        assert_eq!(tokens[3].get_lexeme(), r#""Hola \"Mundo\"""#);
        assert_eq!(tokens[3].get_column(), 9);

        assert_eq!(lexemes(r#""a\\n""#), vec![r#""a\\n""#]);
        assert_eq!(categories("\"Línea\""), vec![String]);
        assert_eq!(categories("\"\""), vec![String]);
    }

    #[test]
    fn test_unterminated_string() {
        let tokens = lex("\"abc");
        assert_eq!(tokens.len(), 1);
        assert_eq!(
            tokens[0].get_category(),
            error(ErrorCategory::UnterminatedString)
        );
        assert_eq!((tokens[0].get_line(), tokens[0].get_column()), (1, 1));
    }

    #[test]
    fn test_string_broken_by_newline() {
        let tokens = lex("x = \"abc\nval");
        assert_eq!(
            tokens.iter().map(Token::get_category).collect::<Vec<_>>(),
            vec![
                Identifier,
                Operator,
                error(ErrorCategory::UnterminatedString),
                ReservedWord
            ]
        );
        assert_eq!((tokens[3].get_line(), tokens[3].get_column()), (2, 1));
    }

    #[test]
    fn test_trailing_escape() {
        let tokens = lex("\"abc\\");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].get_category(), error(ErrorCategory::TrailingEscape));

        // An escaped quote does not close the string
        assert_eq!(
            categories("\"abc\\\"\n"),
            vec![error(ErrorCategory::UnterminatedString)]
        );
    }

    #[test]
    fn test_line_comment() {
        let tokens = lex("// hi there\nx");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].get_category(), LineComment);
        assert_eq!(tokens[0].get_lexeme(), "// hi there");
        assert_eq!((tokens[1].get_line(), tokens[1].get_column()), (2, 1));

        assert_eq!(lexemes("a // b"), vec!["a", "// b"]);
        assert_eq!(categories("//"), vec![LineComment]);
    }

    #[test]
    fn test_block_comment() {
        let tokens = lex("/* a\n b */ y");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].get_category(), BlockComment);
        assert_eq!(tokens[0].get_lexeme(), "/* a\n b */");
        assert_eq!((tokens[1].get_line(), tokens[1].get_column()), (2, 7));

        assert_eq!(categories("/**/"), vec![BlockComment]);
        assert_eq!(categories("/* // */ z"), vec![BlockComment, Identifier]);
    }

    #[test]
    fn test_unterminated_block_comment() {
        let tokens = lex("x\n/* never closed\nval y = 10");
        assert_eq!(tokens.len(), 2);
        assert_eq!(
            tokens[1].get_category(),
            error(ErrorCategory::UnterminatedBlockComment)
        );
        assert_eq!((tokens[1].get_line(), tokens[1].get_column()), (2, 1));

        assert_eq!(
            categories("/*/"),
            vec![error(ErrorCategory::UnterminatedBlockComment)]
        );
    }

    #[test]
    fn test_bare_slash_is_division() {
        assert_eq!(lexemes("x / y"), vec!["x", "/", "y"]);
        assert_eq!(categories("/"), vec![Operator]);
        assert_eq!(categories("a/"), vec![Identifier, Operator]);
    }

    #[test]
    fn test_unrecognized_characters() {
        let tokens = lex("@#$");
        assert_eq!(tokens.len(), 3);
        for (index, token) in tokens.iter().enumerate() {
            assert_eq!(
                token.get_category(),
                error(ErrorCategory::UnrecognizedCharacter)
            );
            assert_eq!(token.get_column(), index + 1);
        }

        assert_eq!(
            categories("é"),
            vec![error(ErrorCategory::UnrecognizedCharacter)]
        );
        assert_eq!(
            lexemes("numero@"),
            vec![
                "numero".to_string(),
                LexicalError::UnrecognizedCharacter('@').to_string()
            ]
        );
    }

    #[test]
    fn test_position_accounting() {
        let tokens = lex("a\n\nb\n  c\td");
        let positions: Vec<(usize, usize)> = tokens
            .iter()
            .map(|token| (token.get_line(), token.get_column()))
            .collect();
        assert_eq!(positions, vec![(1, 1), (3, 1), (4, 3), (4, 5)]);
    }

    #[test]
    fn test_lexical_error_messages() {
        let error = LexicalError::MistypedOperator {
            found: "=<".to_string(),
            expected: "<=".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Error: Invalid operator '=<', did you mean '<='?"
        );
        assert_eq!(error.category(), ErrorCategory::MistypedOperator);

        assert_eq!(
            LexicalError::OversizedIdentifier("abcdefghijk".to_string()).to_string(),
            "Error: Identifier 'abcdefghijk' exceeds the limit of 10 characters"
        );
    }

    #[test]
    fn test_scanner_reuse() {
        let scanner = construct_scanner();
        let first = scanner.analyze("val a = 1");
        let second = scanner.analyze("val a = 1");
        assert_eq!(first, second);
        assert_eq!(first[0].get_line(), 1);
    }

    #[test]
    fn test_scanner_shared_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Scanner>();

        let scanner = construct_scanner();
        std::thread::scope(|scope| {
            let left = scope.spawn(|| scanner.analyze("x = 1"));
            let right = scope.spawn(|| scanner.analyze("y = 2.5"));
            assert_eq!(left.join().unwrap().len(), 3);
            assert_eq!(right.join().unwrap()[2].get_category(), RealNumber);
        });
    }

    proptest! {
        #[test]
        fn test_tokens_follow_source_order(source in "[a-z0-9 .\"/*+=<>\n@_-]{0,40}") {
            let tokens = lex(&source);
            let positions: Vec<(usize, usize)> = tokens
                .iter()
                .map(|token| (token.get_line(), token.get_column()))
                .collect();

            prop_assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

            let lines = source.matches('\n').count() + 1;
            prop_assert!(positions.iter().all(|(line, column)| *line >= 1 && *line <= lines && *column >= 1));

            if source.trim().is_empty() {
                prop_assert!(tokens.is_empty());
            } else {
                prop_assert!(!tokens.is_empty());
            }
        }
    }
}
