//! Crate-wide error taxonomy.
//!
//! Every fallible operation in this crate — parsing, serialization, and the
//! alphabet-sensitive combinators on [Dfa](crate::dfa::Dfa)/[Nfa](crate::nfa::Nfa) —
//! reports through [AutomatonError].

use crate::dfa::parse::DfaParseError;
use crate::nfa::parse::NfaParseError;
use thiserror::Error;

/// The error type shared across construction, parsing and serialization.
#[derive(Debug, Error)]
pub enum AutomatonError {
    /// The alphabet contains the reserved epsilon symbol, or is otherwise ill-formed.
    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(String),

    /// A binary operation (union, intersection, concat, difference) was attempted
    /// between two automata with different alphabets.
    #[error("alphabets differ, cannot combine these automata")]
    AlphabetMismatch,

    /// The input failed to parse as a table-format or JSON-format automaton.
    #[error("parse error: {0}")]
    ParseError(String),

    /// An I/O error occurred while loading or dumping an automaton.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A caller-supplied resource bound (e.g. maximum subset-construction states)
    /// was exceeded.
    #[error("resource limit exceeded: {0}")]
    ResourceLimit(String),
}

impl From<DfaParseError<'_>> for AutomatonError {
    fn from(value: DfaParseError<'_>) -> Self {
        AutomatonError::ParseError(value.to_string())
    }
}

impl From<NfaParseError<'_>> for AutomatonError {
    fn from(value: NfaParseError<'_>) -> Self {
        AutomatonError::ParseError(value.to_string())
    }
}

impl From<serde_json::Error> for AutomatonError {
    fn from(value: serde_json::Error) -> Self {
        AutomatonError::ParseError(value.to_string())
    }
}
