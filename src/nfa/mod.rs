//! # Nondeterministic Finite Automaton
//! The NFA module includes the [Nfa] struct, representing a
//! [Nondeterministic finite automaton](https://en.wikipedia.org/wiki/Nondeterministic_finite_automaton)
//! with epsilon moves. A [Nfa] can be built directly with [Nfa::create], by converting a
//! [Dfa](crate::dfa::Dfa) with [Dfa::to_nfa](crate::dfa::Dfa::to_nfa), or by parsing a transition
//! table in text form.
//!
//! ## Example
//! ```
//! use automata::nfa::Nfa;
//!
//! let input = "
//!          a b &
//!     -> 1 1 - 2
//!        2 - 2 -
//!      * 3 - - -
//! ";
//! let nfa: Nfa = automata::parser::nfa(input).unwrap().try_into().unwrap();
//! assert!(nfa.accepts_graphemes("aab"));
//!
//! let dfa = nfa.to_dfa();
//! assert!(dfa.accepts_graphemes("aab"));
//! ```
//!
//! ## Operations
//! * [Nfa::accepts]/[Nfa::accepts_graphemes] check word acceptance via epsilon closure.
//! * [Nfa::remove_epsilon_transitions] eliminates epsilon moves, keeping a one-to-one
//!   correspondence between old and new states (no dead-state pruning, no new initial state).
//! * [Nfa::to_dfa]/[Nfa::to_dfa_bounded] determinize via the subset construction.
//! * [Nfa::union], [Nfa::concat], [Nfa::intersection] and [Nfa::difference] combine two NFAs.
//! * [Nfa::complement] removes epsilon moves, completes, then flips acceptance — in that order,
//!   so the completion step can't be fooled by an epsilon detour back into the source language.
//! * [Nfa::remove_unreachable_states] prunes states unreachable from the initial state, kept as
//!   a separate step from epsilon elimination so each transform stays a single pure operation.

use crate::dfa::{Dfa, DfaState};
use crate::error::AutomatonError;
use crate::util::alphabet_equal;
pub use eval::NfaEvaluator;
pub use parse::NfaParseError;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use unicode_segmentation::UnicodeSegmentation;

pub mod eval;
pub mod parse;

/// A [Nondeterministic finite automaton](https://en.wikipedia.org/wiki/Nondeterministic_finite_automaton)
/// with epsilon moves, defined by its *alphabet*, a *set of states*, one state being the
/// *initial state*, a subset of states being *final states*, and a *transition relation* mapping
/// each state and alphabet symbol to a (possibly empty) set of states, plus a separate relation of
/// epsilon moves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nfa {
    pub(crate) alphabet: Rc<[Rc<str>]>,
    pub(crate) states: Vec<NfaState>,
    pub(crate) initial_state: usize,
}

/// A state in an NFA, consisting of its name, whether it is initial, whether it is accepting, the
/// transitions for each element of the alphabet, and the epsilon transitions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NfaState {
    pub(crate) name: Rc<str>,
    pub(crate) initial: bool,
    pub(crate) accepting: bool,
    pub(crate) transitions: Vec<Vec<usize>>,
    pub(crate) epsilon_transitions: Vec<usize>,
}

impl NfaState {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_initial(&self) -> bool {
        self.initial
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    pub fn transitions(&self) -> &[Vec<usize>] {
        self.transitions.as_slice()
    }

    pub fn epsilon_transitions(&self) -> &[usize] {
        self.epsilon_transitions.as_slice()
    }
}

impl Nfa {
    /// Builds an NFA from an initial state name, a transition relation given as
    /// `((from, symbol_or_epsilon), targets)` pairs — use the literal `"ε"` as the symbol for an
    /// epsilon move — and a set of accepting state names. The alphabet and state set are derived
    /// from every name mentioned anywhere in the input.
    pub fn create<'a>(
        initial: &'a str,
        transitions: impl IntoIterator<Item = ((&'a str, &'a str), Vec<&'a str>)>,
        final_states: impl IntoIterator<Item = &'a str>,
    ) -> Result<Nfa, AutomatonError> {
        let transitions: Vec<((&str, &str), Vec<&str>)> = transitions
            .into_iter()
            .filter(|(_, targets)| !targets.is_empty())
            .collect();
        let final_states: HashSet<&str> = final_states.into_iter().collect();

        let mut state_order: Vec<&str> = Vec::new();
        let mut state_index: HashMap<&str, usize> = HashMap::new();
        let mut intern_state = |name: &'a str| -> usize {
            *state_index.entry(name).or_insert_with(|| {
                state_order.push(name);
                state_order.len() - 1
            })
        };

        intern_state(initial);
        for ((from, _), targets) in &transitions {
            intern_state(from);
            for &to in targets {
                intern_state(to);
            }
        }
        for &f in &final_states {
            intern_state(f);
        }

        let mut alphabet_order: Vec<&str> = Vec::new();
        let mut alphabet_index: HashMap<&str, usize> = HashMap::new();
        for ((_, symbol), _) in &transitions {
            if *symbol == "ε" || alphabet_index.contains_key(symbol) {
                continue;
            }
            alphabet_index.insert(symbol, alphabet_order.len());
            alphabet_order.push(symbol);
        }

        let mut table = vec![vec![Vec::new(); alphabet_order.len()]; state_order.len()];
        let mut eps = vec![Vec::new(); state_order.len()];
        for ((from, symbol), targets) in &transitions {
            let from_idx = state_index[from];
            let target_idxs = targets.iter().map(|t| state_index[t]);
            if *symbol == "ε" {
                eps[from_idx].extend(target_idxs);
            } else {
                let sym_idx = alphabet_index[symbol];
                table[from_idx][sym_idx].extend(target_idxs);
            }
        }

        let initial_idx = state_index[initial];
        let states = state_order
            .into_iter()
            .enumerate()
            .map(|(idx, name)| NfaState {
                name: Rc::from(name),
                initial: idx == initial_idx,
                accepting: final_states.contains(name),
                transitions: std::mem::take(&mut table[idx]),
                epsilon_transitions: std::mem::take(&mut eps[idx]),
            })
            .collect();

        Ok(Nfa {
            alphabet: alphabet_order.into_iter().map(Rc::from).collect(),
            states,
            initial_state: initial_idx,
        })
    }

    /// Checks if this automaton accepts the given string of alphabet elements.
    pub fn accepts(&self, string: &[&str]) -> bool {
        let mut eval = self.evaluator();
        eval.step_multiple(string);
        eval.is_accepting()
    }

    /// Checks if this automaton accepts the given string, split into single grapheme clusters. See
    /// [Nfa::graphemes_only].
    pub fn accepts_graphemes(&self, string: &str) -> bool {
        let graphemes = string.graphemes(true).collect::<Vec<_>>();
        let mut eval = self.evaluator();
        eval.step_multiple(&graphemes);
        eval.is_accepting()
    }

    /// Checks if the alphabet of this automaton consists of only single graphemes.
    pub fn graphemes_only(&self) -> bool {
        self.alphabet
            .iter()
            .all(|str| str.graphemes(true).count() == 1)
    }

    /// Gets an evaluator for stepping through this automaton symbol by symbol.
    pub fn evaluator(&self) -> NfaEvaluator<'_> {
        self.into()
    }

    /// Computes the epsilon closure of a set of state indices: the set itself plus every state
    /// reachable by following zero or more epsilon moves.
    pub fn epsilon_closure(&self, states: impl IntoIterator<Item = usize>) -> HashSet<usize> {
        let mut closure: HashSet<usize> = states.into_iter().collect();
        let mut frontier: Vec<usize> = closure.iter().copied().collect();
        while let Some(state) = frontier.pop() {
            for &next in &self.states[state].epsilon_transitions {
                if closure.insert(next) {
                    frontier.push(next);
                }
            }
        }
        closure
    }

    /// Eliminates epsilon moves, in place: for each state `q` and each symbol `a`, the new
    /// transition set is the epsilon closure of every state reachable from `q`'s epsilon closure
    /// by `a`, and `q` becomes accepting if its epsilon closure contains an accepting state. Every
    /// original state survives one-to-one — no state is removed and no new initial state is
    /// synthesized, which keeps this a single pure step; pruning the states this can leave
    /// unreachable or dead is a separate concern, handled by [Nfa::remove_unreachable_states].
    pub fn remove_epsilon_transitions(&self) -> Self {
        let states = (0..self.states.len())
            .map(|q| {
                let closure = self.epsilon_closure([q]);
                let accepting = closure.iter().any(|&s| self.states[s].accepting);
                let transitions = (0..self.alphabet.len())
                    .map(|a| {
                        let mut targets: Vec<usize> = closure
                            .iter()
                            .flat_map(|&s| self.states[s].transitions[a].iter().copied())
                            .collect();
                        targets.sort_unstable();
                        targets.dedup();
                        targets
                    })
                    .collect();
                NfaState {
                    name: self.states[q].name.clone(),
                    initial: self.states[q].initial,
                    accepting,
                    transitions,
                    epsilon_transitions: vec![],
                }
            })
            .collect();

        Nfa {
            alphabet: self.alphabet.clone(),
            states,
            initial_state: self.initial_state,
        }
    }

    /// Totalizes this automaton with respect to determinization: adds a fresh, non-accepting sink
    /// state with a self-loop on every symbol, and routes every `(state, symbol)` pair that
    /// currently has no target to the sink. A no-op if every `(state, symbol)` pair already has at
    /// least one target.
    pub fn complete(&self) -> Self {
        if self
            .states
            .iter()
            .all(|s| s.transitions.iter().all(|t| !t.is_empty()))
        {
            return self.clone();
        }

        let sink_idx = self.states.len();
        let mut states: Vec<NfaState> = self
            .states
            .iter()
            .map(|s| NfaState {
                name: s.name.clone(),
                initial: s.initial,
                accepting: s.accepting,
                transitions: s
                    .transitions
                    .iter()
                    .map(|t| {
                        if t.is_empty() {
                            vec![sink_idx]
                        } else {
                            t.clone()
                        }
                    })
                    .collect(),
                epsilon_transitions: s.epsilon_transitions.clone(),
            })
            .collect();
        states.push(NfaState {
            name: self.fresh_name("qerr"),
            initial: false,
            accepting: false,
            transitions: vec![vec![sink_idx]; self.alphabet.len()],
            epsilon_transitions: vec![],
        });

        Nfa {
            alphabet: self.alphabet.clone(),
            states,
            initial_state: self.initial_state,
        }
    }

    /// Complements this automaton's language. Epsilon moves are eliminated first, then the result
    /// is completed, then every state's acceptance is flipped. Eliminating epsilon moves before
    /// completing matters: completing first and flipping afterwards can leave strings accepted by
    /// `self` (via an epsilon detour into an accepting state) also accepted by the "complement".
    pub fn complement(&self) -> Self {
        let mut complete = self.remove_epsilon_transitions().complete();
        complete
            .states
            .iter_mut()
            .for_each(|s| s.accepting = !s.accepting);
        complete
    }

    /// Constructs the union of two NFAs: a fresh initial state with epsilon moves to both
    /// original initial states, the two state sets otherwise kept disjoint via a `_0`/`_1` suffix
    /// tag, then canonicalized to fresh sequential numeric names.
    pub fn union(self, other: Self) -> Result<Self, AutomatonError> {
        if !alphabet_equal(&self.alphabet, &other.alphabet) {
            return Err(AutomatonError::AlphabetMismatch);
        }
        let other = other.realign_alphabet(&self.alphabet);
        let (a, b) = Self::disjoint_pair(self, other);
        let alphabet = a.alphabet.clone();
        let n = a.states.len();

        let mut states = a.states;
        states.extend(b.states);
        states.push(NfaState {
            name: Rc::from("q0"),
            initial: true,
            accepting: false,
            transitions: vec![Vec::new(); alphabet.len()],
            epsilon_transitions: vec![a.initial_state, n + b.initial_state],
        });
        let initial_state = states.len() - 1;

        Ok(Self::canonicalize(Nfa {
            alphabet,
            states,
            initial_state,
        }))
    }

    /// Constructs the concatenation of two NFAs: the two state sets kept disjoint via a `_0`/`_1`
    /// suffix tag, with an epsilon move from each final state of the first to the initial state of
    /// the second. The combined automaton's initial state is the first automaton's initial state,
    /// and its accepting states are exactly the second automaton's accepting states (the first
    /// automaton's own final states stop being accepting, since acceptance is only reached by
    /// continuing into the second automaton).
    pub fn concat(self, other: Self) -> Result<Self, AutomatonError> {
        if !alphabet_equal(&self.alphabet, &other.alphabet) {
            return Err(AutomatonError::AlphabetMismatch);
        }
        let other = other.realign_alphabet(&self.alphabet);
        let (a, b) = Self::disjoint_pair(self, other);
        let alphabet = a.alphabet.clone();
        let n = a.states.len();
        let b_initial = n + b.initial_state;

        let mut states: Vec<NfaState> = a
            .states
            .into_iter()
            .map(|mut s| {
                if s.accepting {
                    s.accepting = false;
                    s.epsilon_transitions.push(b_initial);
                }
                s
            })
            .collect();
        states.extend(b.states);

        Ok(Self::canonicalize(Nfa {
            alphabet,
            states,
            initial_state: a.initial_state,
        }))
    }

    /// Constructs the intersection of two NFAs via the product construction over epsilon-closed
    /// states: `self` and `other` are converted to DFAs first (so the product has a single,
    /// unambiguous transition per pair), intersected there, then converted back to an NFA.
    pub fn intersection(self, other: Self) -> Result<Self, AutomatonError> {
        if !alphabet_equal(&self.alphabet, &other.alphabet) {
            return Err(AutomatonError::AlphabetMismatch);
        }
        let d1 = self.to_dfa();
        let d2 = other.to_dfa();
        let combined = d1.product_construction(&d2, |s1, s2| {
            s1.is_some_and(DfaState::is_accepting) && s2.is_some_and(DfaState::is_accepting)
        })?;
        Ok(combined.to_nfa())
    }

    /// Constructs the difference of two NFAs: the strings accepted by `self` but not by `other`,
    /// computed as `self` intersected with `other`'s complement.
    pub fn difference(self, other: Self) -> Result<Self, AutomatonError> {
        if !alphabet_equal(&self.alphabet, &other.alphabet) {
            return Err(AutomatonError::AlphabetMismatch);
        }
        let not_other = other.complement();
        self.intersection(not_other)
    }

    /// Reorders this NFA's per-symbol transition columns to match `target`'s alphabet ordering.
    /// Required before structurally merging two NFAs' state vectors (as [Nfa::union] and
    /// [Nfa::concat] do): each state's `transitions` is a plain `Vec` indexed positionally by
    /// alphabet order, so two automata with the same symbol set in a different order cannot be
    /// merged without first bringing both to a shared ordering.
    fn realign_alphabet(mut self, target: &Rc<[Rc<str>]>) -> Self {
        let same_order = self
            .alphabet
            .iter()
            .map(AsRef::as_ref)
            .eq(target.iter().map(AsRef::as_ref));
        if same_order {
            self.alphabet = target.clone();
            return self;
        }

        let index: HashMap<&str, usize> = self
            .alphabet
            .iter()
            .enumerate()
            .map(|(i, s)| (s.as_ref(), i))
            .collect();
        for state in &mut self.states {
            let old = std::mem::take(&mut state.transitions);
            state.transitions = target.iter().map(|sym| old[index[sym.as_ref()]].clone()).collect();
        }
        self.alphabet = target.clone();
        self
    }

    /// Renames `a`'s states to append `_0` and `b`'s states to append `_1`, so the two state sets
    /// cannot collide, resolving repeated collisions by adding extra digits.
    fn disjoint_pair(a: Self, b: Self) -> (Self, Self) {
        (a.suffix_tag("_0"), b.suffix_tag("_1"))
    }

    fn suffix_tag(self, suffix: &str) -> Self {
        let Nfa {
            alphabet,
            mut states,
            initial_state,
        } = self;
        let existing: HashSet<&str> = states.iter().map(|s| s.name.as_ref()).collect();
        let existing: HashSet<String> = existing.into_iter().map(String::from).collect();
        states.iter_mut().for_each(|s| {
            let mut candidate = format!("{}{}", s.name, suffix);
            while existing.contains(&candidate) {
                candidate.push('_');
            }
            s.name = Rc::from(candidate);
        });
        Nfa {
            alphabet,
            states,
            initial_state,
        }
    }

    /// Replaces every state name with a fresh, ordered `q0`, `q1`, ... numbering, so that repeated
    /// combinator application never accumulates multi-layered suffixes.
    fn canonicalize(mut nfa: Self) -> Self {
        nfa.states
            .iter_mut()
            .enumerate()
            .for_each(|(idx, s)| s.name = Rc::from(format!("q{idx}")));
        nfa
    }

    fn fresh_name(&self, wanted: &str) -> Rc<str> {
        if self.states.iter().all(|s| s.name.as_ref() != wanted) {
            Rc::from(wanted)
        } else {
            (0..)
                .map(|i| format!("{wanted}{i}"))
                .find(|n| self.states.iter().all(|s| s.name.as_ref() != n))
                .map(|n| Rc::from(n.as_str()))
                .unwrap()
        }
    }

    /// Removes the unreachable states of this automaton (following both ordinary and epsilon
    /// transitions), leaving only states actually reachable from the initial state.
    pub fn remove_unreachable_states(&mut self) {
        let reachable = self.reachable_state_idx();
        let mut to_remove: Vec<usize> = (0..self.states.len())
            .filter(|s| !reachable.contains(s))
            .collect();
        to_remove.sort_unstable();

        let mut old_state_idx: Vec<usize> = (0..self.states.len()).collect();
        to_remove.iter().rev().for_each(|&idx| {
            self.states.remove(idx);
            old_state_idx.remove(idx);
        });

        let map = |idx: usize| old_state_idx.binary_search(&idx).ok();
        self.states.iter_mut().for_each(|s| {
            s.transitions.iter_mut().for_each(|t| {
                t.retain_mut(|i| match map(*i) {
                    Some(new) => {
                        *i = new;
                        true
                    }
                    None => false,
                })
            });
            s.epsilon_transitions.retain_mut(|i| match map(*i) {
                Some(new) => {
                    *i = new;
                    true
                }
                None => false,
            });
        });
        self.initial_state = map(self.initial_state).expect("initial state is always reachable");
    }

    /// Finds the states reachable from the initial state, by their indices, following both
    /// ordinary and epsilon transitions.
    pub fn reachable_state_idx(&self) -> HashSet<usize> {
        let mut reachable = HashSet::from([self.initial_state]);
        let mut frontier: Vec<usize> = vec![self.initial_state];
        while let Some(state) = frontier.pop() {
            let next = self.states[state]
                .transitions
                .iter()
                .flatten()
                .copied()
                .chain(self.states[state].epsilon_transitions.iter().copied());
            for n in next {
                if reachable.insert(n) {
                    frontier.push(n);
                }
            }
        }
        reachable
    }

    /// Converts this NFA to an equivalent [Dfa] via the subset construction: each DFA state
    /// corresponds to an epsilon-closed set of NFA states, closing over epsilon moves eagerly at
    /// every step. Determinization always terminates and always succeeds for a finite NFA.
    pub fn to_dfa(&self) -> Dfa {
        self.to_dfa_impl(None).expect("unbounded to_dfa never fails")
    }

    /// As [Nfa::to_dfa], but fails with [AutomatonError::ResourceLimit] if the number of distinct
    /// reachable subsets would exceed `max_states`.
    pub fn to_dfa_bounded(&self, max_states: usize) -> Result<Dfa, AutomatonError> {
        self.to_dfa_impl(Some(max_states))
    }

    fn to_dfa_impl(&self, max_states: Option<usize>) -> Result<Dfa, AutomatonError> {
        let initial: Vec<usize> = {
            let mut v: Vec<usize> = self.epsilon_closure([self.initial_state]).into_iter().collect();
            v.sort_unstable();
            v
        };

        let mut subset_idx: HashMap<Vec<usize>, usize> = HashMap::new();
        subset_idx.insert(initial.clone(), 0);
        let mut to_explore = vec![initial];
        let mut transitions: HashMap<usize, Vec<Option<usize>>> = HashMap::new();

        while let Some(subset) = to_explore.pop() {
            let from_idx = subset_idx[&subset];
            let mut row = Vec::with_capacity(self.alphabet.len());
            for a in 0..self.alphabet.len() {
                let mut next: Vec<usize> = self
                    .epsilon_closure(
                        subset
                            .iter()
                            .flat_map(|&s| self.states[s].transitions[a].iter().copied()),
                    )
                    .into_iter()
                    .collect();
                next.sort_unstable();
                if next.is_empty() {
                    row.push(None);
                    continue;
                }
                let next_idx = match subset_idx.get(&next) {
                    Some(&idx) => idx,
                    None => {
                        let idx = subset_idx.len();
                        if let Some(limit) = max_states {
                            if idx >= limit {
                                return Err(AutomatonError::ResourceLimit(format!(
                                    "subset construction exceeded {limit} states"
                                )));
                            }
                        }
                        subset_idx.insert(next.clone(), idx);
                        to_explore.push(next.clone());
                        idx
                    }
                };
                row.push(Some(next_idx));
            }
            transitions.insert(from_idx, row);
        }

        let mut ordered: Vec<(Vec<usize>, usize)> = subset_idx.into_iter().collect();
        ordered.sort_by_key(|(_, idx)| *idx);

        let states = ordered
            .into_iter()
            .map(|(subset, idx)| DfaState {
                name: Rc::from(format!("q{idx}")),
                initial: idx == 0,
                accepting: subset.iter().any(|&s| self.states[s].accepting),
                transitions: transitions.remove(&idx).unwrap_or_default(),
            })
            .collect();

        Ok(Dfa {
            alphabet: self.alphabet.clone(),
            states,
            initial_state: 0,
        })
    }

    /// Checks if this NFA is equivalent to another, i.e. if they accept the same language, by
    /// determinizing both and checking DFA equivalence.
    pub fn equivalent_to(&self, other: &Nfa) -> bool {
        if !alphabet_equal(&self.alphabet, &other.alphabet) {
            return false;
        }
        self.to_dfa().equivalent_to(&other.to_dfa())
    }

    /// Gets the alphabet of this NFA
    pub fn alphabet(&self) -> &[Rc<str>] {
        &self.alphabet
    }

    /// Gets the states of this NFA
    pub fn states(&self) -> &[NfaState] {
        self.states.as_slice()
    }

    /// Gets the initial state of this NFA
    pub fn initial_state(&self) -> &NfaState {
        &self.states[self.initial_state]
    }

    /// Gets the index of the initial state of this NFA
    pub fn initial_state_index(&self) -> usize {
        self.initial_state
    }
}
