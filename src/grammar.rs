/* The fixed lexical grammar of the language: character classes, reserved words, operator
 * tables, and the two patterns (identifiers and numbers) that are compiled into automata. */

use crate::fa::Symbol;
use crate::nfa::NFA;

/// Identifiers longer than this are reported as errors
pub const MAX_IDENTIFIER_LEN: usize = 10;

pub const RESERVED_WORDS: [&str; 10] = [
    "fun", "val", "var", "if", "else", "when", "Int", "Double", "String", "return",
];

pub const OPERATORS: [char; 11] = ['+', '-', '*', '/', '%', '=', '<', '>', '!', '&', '|'];

pub const DELIMITERS: [char; 7] = ['(', ')', '{', '}', ',', ';', ':'];

pub const TWO_CHAR_OPERATORS: [&str; 8] = ["==", "!=", "<=", ">=", "&&", "||", "++", "--"];

/// Common typos, paired with the operator that was most likely meant
pub const MISTYPED_OPERATORS: [(&str, &str); 1] = [("=<", "<=")];

/// Arithmetic operators that may never directly abut each other in these orders
pub const INVALID_OPERATOR_PAIRS: [&str; 4] = ["+*", "*+", "+-", "-+"];

/// Sequences that look like operators but do not exist in the language
pub const UNSUPPORTED_OPERATORS: [&str; 1] = [">>>"];

pub const STRING_QUOTE: char = '"';
pub const ESCAPE: char = '\\';
pub const DECIMAL_POINT: char = '.';

pub fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

pub fn is_identifier_start(ch: char) -> bool {
    is_letter(ch) || ch == '_'
}

pub fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch) || is_digit(ch)
}

pub fn is_operator(ch: char) -> bool {
    OPERATORS.contains(&ch)
}

pub fn is_delimiter(ch: char) -> bool {
    DELIMITERS.contains(&ch)
}

pub fn is_reserved_word(word: &str) -> bool {
    RESERVED_WORDS.contains(&word)
}

fn letters() -> impl Iterator<Item = char> {
    ('a'..='z').chain('A'..='Z')
}

fn digits() -> impl Iterator<Item = char> {
    '0'..='9'
}

/// (letter|_)(letter|digit|_)*
///
/// q0 is the start state and q1 the only accepting state.
pub fn identifier_nfa() -> NFA {
    let mut nfa = NFA::new();
    nfa.set_start_state("q0");
    nfa.add_accept_state("q1");

    for ch in letters().chain(['_']) {
        nfa.add_transition("q0", Symbol::Char(ch), "q1");
    }

    for ch in letters().chain(digits()).chain(['_']) {
        nfa.add_transition("q1", Symbol::Char(ch), "q1");
    }

    nfa
}

/// digit+(.digit+)?
///
/// q1 accepts natural numbers, q2 is the state right after the decimal point and q3 accepts
/// real numbers.
pub fn number_nfa() -> NFA {
    let mut nfa = NFA::new();
    nfa.set_start_state("q0");
    nfa.add_accept_state("q1");
    nfa.add_accept_state("q3");

    for digit in digits() {
        nfa.add_transition("q0", Symbol::Char(digit), "q1");
        nfa.add_transition("q1", Symbol::Char(digit), "q1");
    }

    nfa.add_transition("q1", Symbol::Char(DECIMAL_POINT), "q2");

    for digit in digits() {
        nfa.add_transition("q2", Symbol::Char(digit), "q3");
        nfa.add_transition("q3", Symbol::Char(digit), "q3");
    }

    nfa
}
