//! # automata
//!
//! `automata` is a Rust library for constructing, transforming and evaluating deterministic and
//! nondeterministic finite automata, with a portable JSON serialization format and a
//! human-writable transition-table format for quick experimentation.
//!
//! ## Usage
//!
//! ```rust
//! use automata::dfa::Dfa;
//!
//! let raw_dfa = "
//!        a  b  c
//! → * s₀ s₁ s₀ s₂
//!     s₁ s₂ s₁ s₁
//!   * s₂ s₂ s₂ s₂
//! ";
//! // First pass parses without checking validity of the DFA
//! let parsed_dfa = automata::parser::dfa(raw_dfa).unwrap();
//! // Second step checks the existence of all mentioned states and the existence of an
//! // initial state
//! let dfa: Dfa = parsed_dfa.try_into().unwrap();
//! assert!(dfa.accepts(&["a", "b", "c", "c", "a"]));
//! assert!(dfa.accepts(&["c", "b", "a"]));
//! assert!(!dfa.accepts(&["a", "b", "b", "c"]));
//!
//! let equivalent_dfa = "
//!     a b c
//! → * x z x y
//!   * y y y y
//!     z y w z
//!     w y z w
//! ";
//! let dfa2 = automata::parser::dfa(equivalent_dfa).unwrap().try_into().unwrap();
//! assert!(dfa.equivalent_to(&dfa2));
//! ```
//!
//! ## Partiality
//!
//! A [Dfa](dfa::Dfa)'s transition function is genuinely partial: [Dfa::create](dfa::Dfa::create)
//! and [crate::serialize::load_dfa] both accept a transition list that need not cover every
//! `(state, symbol)` pair. A missing pair means "no transition defined", and evaluating a string
//! that walks off the edge of the automaton simply rejects. [Dfa::complete](dfa::Dfa::complete)
//! totalizes a DFA by adding a single error/sink state.
//!
//! ## Table format
//!
//! [parser::dfa] and [parser::nfa] parse the human-writable transition-table format, which is
//! more or less just the transition table written out directly. The first row (the header)
//! should include the whole alphabet, and then the rest of the rows should consist of the
//! states, one row for each state. The row should start with the state name and then, for each
//! element of the alphabet, the transition from that state upon seeing that element. Before the
//! state name, either `->` or `→` should be used to denote the initial state, and `*` to denote
//! that the state is accepting.
//!
//! ```text
//!        a  b  c
//! → * s₀ s₁ s₀ s₂
//!     s₁ s₂ s₁ s₁
//!   * s₂ s₂ s₂ s₂
//! ```
//!
//! Whitespace should be used for delimiters between `→`, `*`, the state name and the transition
//! entries. Lines containing only whitespace are ignored, and comments may be added using `#`,
//! ignoring the rest of the row. To be a correctly denoted DFA in this format, there must be a
//! transition from each state for each alphabet element (the table format always describes
//! *total* DFAs — partiality only arises via [dfa::Dfa::create] or [crate::serialize::load_dfa]).
//! There must be exactly one initial state, and no duplicate elements of the alphabet.
//!
//! The format for NFAs (with or without epsilon moves) is very similar. For each state
//! transition, a set of target states is denoted by `{`, then the states in a whitespace-separated
//! list, and `}`. To define epsilon transitions, the `ε` character (or `eps`) should be added to
//! the alphabet.
//!
//! ```text
//!      ε    a       b
//! → s₀ {}   {s₁}    {s₀ s₂}
//!   s₁ {s₂} {s₄}    {s₃}
//!   s₂ {}   {s₁ s₄} {s₃}
//!   s₃ {s₅} {s₄ s₅} {}
//!   s₄ {s₃} {}      {s₅}
//! * s₅ {}   {s₅}    {s₅}
//! ```
//!
//! ## Operations
//!
//! This library supports:
//!
//! * [Parsing](parser::dfa) and [validating](dfa::parse) DFAs; [parsing](parser::nfa) and
//!   [validating](nfa::parse) NFAs (with and without epsilon moves); building either directly
//!   with [Dfa::create](dfa::Dfa::create)/[Nfa::create](nfa::Nfa::create).
//! * Loading and dumping the portable [JSON format](serialize).
//! * Generating a table suitable for re-parsing of [DFAs](dfa::Dfa::to_table) and
//!   [NFAs](nfa::Nfa::to_table).
//! * Converting [DFAs to NFAs](dfa::Dfa::to_nfa) and [NFAs to DFAs](nfa::Nfa::to_dfa) via the
//!   subset construction.
//! * [Checking string acceptance](dfa::Dfa::accepts) and
//!   [step-by-step evaluation](dfa::Dfa::evaluator).
//! * [Totalizing](dfa::Dfa::complete) and [complementing](dfa::Dfa::complement) automata.
//! * [Union](dfa::Dfa::union), [intersection](dfa::Dfa::intersection),
//!   [difference](dfa::Dfa::difference) and [concatenation](dfa::Dfa::concat) of automata.
//! * [Identifying and removing unreachable states](dfa::Dfa::unreachable_states),
//!   [identifying and merging non-distinguishable states](dfa::Dfa::state_equivalence_classes),
//!   and [minimizing a DFA](dfa::Dfa::minimize) (by doing both, then re-completing).
//! * [Checking language equivalence](dfa::Dfa::equivalent_to) of two DFAs or two NFAs.
//! * Reducing an automaton to a pure [graph description](graph::GraphDescription) for external
//!   visualization.

pub mod dfa;
pub mod error;
pub mod graph;
pub mod nfa;
pub mod parser;
pub mod serialize;
mod table;
mod util;

#[cfg(test)]
mod tests;

#[cfg(test)]
mod integration_test {
    use crate::dfa::Dfa;
    use crate::nfa::Nfa;

    #[test]
    fn subset_construction_matches_equivalent_dfa() {
        let dfa_source = "
               a  b
            -> s0 s1 s0
             * s1 s1 s1
        ";
        let dfa: Dfa = super::parser::dfa(dfa_source).unwrap().try_into().unwrap();

        let nfa_source = "
                 a    b    eps
            -> q0 {q1} {q0} {}
             * q1 {q1} {q1} {}
        ";
        let nfa: Nfa = super::parser::nfa(nfa_source).unwrap().try_into().unwrap();

        assert!(dfa.equivalent_to(&nfa.to_dfa()));
    }
}
