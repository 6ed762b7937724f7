use crate::dfa::{Dfa, DfaState};
use std::collections::HashMap;
use std::iter;

/// Tracks the current state while evaluating a string against a [Dfa]. Since a DFA's
/// transition function is partial, a [DfaEvaluator] may fall off the automaton
/// entirely — either by stepping on a symbol outside the alphabet, or by stepping on
/// an undefined `(state, symbol)` pair. Once that happens it stays off forever, and
/// [DfaEvaluator::is_accepting] reports `false` rather than panicking.
#[derive(Debug, Clone)]
pub struct DfaEvaluator<'a> {
    dfa: &'a Dfa,
    rev_map: HashMap<&'a str, usize>,
    current_state: Option<usize>,
}

impl<'a> DfaEvaluator<'a> {
    pub fn is_accepting(&self) -> bool {
        self.current_state().map_or(false, DfaState::is_accepting)
    }

    pub fn current_state(&self) -> Option<&DfaState> {
        self.current_state.map(|idx| &self.dfa.states[idx])
    }

    pub fn current_state_idx(&self) -> Option<usize> {
        self.current_state
    }

    pub fn step_all(&self) -> Vec<DfaEvaluator<'a>> {
        iter::repeat(self.clone())
            .zip(self.dfa.alphabet())
            .map(|(mut eval, elem)| {
                eval.step(elem);
                eval
            })
            .collect()
    }

    pub fn step(&mut self, elem: &str) -> Option<&DfaState> {
        match self.rev_map.get(elem) {
            Some(&idx) => {
                self.current_state = self
                    .current_state
                    .and_then(|state| self.dfa.states[state].transitions[idx]);
            }
            None => self.current_state = None,
        }
        self.current_state()
    }

    pub fn step_multiple(&mut self, elems: &[&str]) -> Option<&DfaState> {
        for e in elems {
            self.step(e)?;
        }
        self.current_state()
    }
}

impl<'a> From<&'a Dfa> for DfaEvaluator<'a> {
    fn from(value: &'a Dfa) -> Self {
        let map = value
            .alphabet
            .iter()
            .enumerate()
            .map(|(idx, c)| (c as &str, idx))
            .collect();
        Self {
            dfa: value,
            rev_map: map,
            current_state: Some(value.initial_state),
        }
    }
}
