//! # Deterministic Finite Automaton
//! The DFA module includes the [Dfa] struct, representing a
//! [Deterministic finite automaton](https://en.wikipedia.org/wiki/Deterministic_finite_automaton)
//! whose transition function is genuinely *partial*: a missing `(state, symbol)` entry means no
//! transition is defined, and evaluating such a string simply rejects rather than panicking or
//! implicitly routing anywhere. A [Dfa] can be built directly with [Dfa::create], by converting a
//! [Nfa](crate::nfa::Nfa) with [Nfa::to_dfa](crate::nfa::Nfa::to_dfa), or by parsing a transition
//! table in text form.
//!
//! ## Example
//! ```
//! use automata::dfa::parse::DfaParseError;
//! use automata::dfa::{parse, Dfa};
//!
//! // A DFA with initial state s1, two accepting states s2 and s4,
//! // accepting all strings with an odd number of a:s
//! let input = "
//!            a  b
//!     ->  s1 s2 s1
//!       * s2 s3 s2
//!         s3 s4 s3
//!       * s4 s1 s4
//! ";
//! let parsed_dfa = automata::parser::dfa(input).unwrap();
//! let mut dfa: Dfa = parsed_dfa.try_into().unwrap();
//! assert!(dfa.accepts_graphemes("abb"));  // odd number of a:s
//! assert!(!dfa.accepts_graphemes("aab")); // even number of a:s
//!
//! // States s1 and s3 are non-distinguishable, and so are s2 and s4.
//! // Minimizing this DFA results in a DFA with two states.
//! let dfa = dfa.minimize();
//! assert_eq!(dfa.states().len(), 2);
//!
//! let dfa_without_initial_state = "
//!         a b
//!     * x y x
//!       y x y
//! ";
//! let parsed_dfa = automata::parser::dfa(dfa_without_initial_state).unwrap();
//! let validation: Result<Dfa, DfaParseError<'_>> = parsed_dfa.try_into();
//! assert_eq!(validation.unwrap_err(), DfaParseError::MissingInitialState);
//! ```
//!
//! ## Syntax
//! The table-format text file for a DFA is an UTF-8 encoded transition table. It requires every
//! transition to be present (the table format always describes *total* DFAs); partiality only
//! arises from [Dfa::create] or from loading a JSON document (see
//! [crate::serialize]) whose transition list omits some `(state, symbol)` pairs.
//!
//! ## Operations
//! * [Dfa::accepts]/[Dfa::accepts_graphemes] check word acceptance.
//! * [Dfa::complete] totalizes the transition function by adding a single error/sink state.
//! * [Dfa::complement] complements the language (complete, then flip every state's acceptance).
//! * [Dfa::union], [Dfa::intersection], [Dfa::difference] and [Dfa::concat] combine two DFAs.
//!   All four are implemented by bridging through [Nfa](crate::nfa::Nfa): the DFAs are converted
//!   to NFAs, combined there (where union and concatenation are naturally nondeterministic
//!   operations), and the result is determinized again with [Nfa::to_dfa](crate::nfa::Nfa::to_dfa).
//!   Keeping one implementation of each operation, rather than a parallel direct-product version,
//!   reduces bug surface.
//! * [Dfa::minimize] removes unreachable states, merges non-distinguishable states, and finally
//!   re-completes the result (in that order — completing before merging would prevent some
//!   non-distinguishable states, that only differ in which symbols are undefined, from merging).
//! * [Dfa::equivalent_to] checks language equivalence without constructing any new automaton.
//! * [Dfa::to_nfa] views this DFA as a (trivially deterministic) NFA.
//! * [Dfa::to_table]/[Dfa::ascii_table] render a parseable transition table (only meaningful for
//!   total DFAs, since the table format has no notation for an absent transition).

use crate::error::AutomatonError;
use crate::nfa::{Nfa, NfaState};
use crate::table::Table;
use crate::util::alphabet_equal;
pub use eval::DfaEvaluator;
pub use parse::DfaParseError;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use unicode_segmentation::UnicodeSegmentation;

pub mod eval;
pub mod parse;

/// A [Deterministic finite automaton](https://en.wikipedia.org/wiki/Deterministic_finite_automaton),
/// defined by its *alphabet*, a *set of states*, one of the states being its *initial state*, a
/// subset of its states being *final states*, and a possibly-partial *transition function* from
/// each state upon seeing each element of the alphabet to at most one state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dfa {
    pub(crate) alphabet: Rc<[Rc<str>]>,
    pub(crate) states: Vec<DfaState>,
    pub(crate) initial_state: usize,
}

/// A state in a DFA, consisting of its name, whether it is initial, whether it is accepting, and
/// the (possibly undefined) transition for each element of the alphabet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DfaState {
    pub(crate) name: Rc<str>,
    pub(crate) initial: bool,
    pub(crate) accepting: bool,
    pub(crate) transitions: Vec<Option<usize>>,
}

impl DfaState {
    /// Gets the name of this state
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Checks if this state is the initial state
    pub fn is_initial(&self) -> bool {
        self.initial
    }

    /// Checks if this state is accepting
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// Gets the transitions of this state, as an optional state index for each element of the
    /// alphabet (in the alphabet's ordering); `None` means the transition is undefined.
    pub fn transitions(&self) -> &[Option<usize>] {
        self.transitions.as_slice()
    }
}

impl From<DfaState> for NfaState {
    fn from(value: DfaState) -> Self {
        let DfaState {
            name,
            initial,
            accepting,
            transitions,
        } = value;
        NfaState {
            name,
            initial,
            accepting,
            epsilon_transitions: vec![],
            transitions: transitions
                .into_iter()
                .map(|t| t.into_iter().collect())
                .collect(),
        }
    }
}

impl From<Dfa> for Nfa {
    fn from(value: Dfa) -> Self {
        value.to_nfa()
    }
}

impl Dfa {
    /// Builds a DFA from an initial state name, a partial transition function given as
    /// `((from, symbol), to)` triples, and a set of accepting state names. The alphabet and state
    /// set are derived from the union of every name mentioned in `initial`, `transitions` and
    /// `final_states`. Transitions need not cover every `(state, symbol)` pair — an uncovered pair
    /// is simply undefined.
    ///
    /// Fails with [AutomatonError::InvalidAlphabet] if the reserved epsilon token `"ε"` is used as
    /// a symbol.
    pub fn create<'a>(
        initial: &'a str,
        transitions: impl IntoIterator<Item = ((&'a str, &'a str), &'a str)>,
        final_states: impl IntoIterator<Item = &'a str>,
    ) -> Result<Dfa, AutomatonError> {
        let transitions: Vec<((&str, &str), &str)> = transitions.into_iter().collect();
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
        for ((from, _), to) in &transitions {
            intern_state(from);
            intern_state(to);
        }
        for &f in &final_states {
            intern_state(f);
        }

        let mut alphabet_order: Vec<&str> = Vec::new();
        let mut alphabet_index: HashMap<&str, usize> = HashMap::new();
        for ((_, symbol), _) in &transitions {
            if *symbol == "ε" {
                return Err(AutomatonError::InvalidAlphabet(
                    "ε is reserved and cannot be used as a symbol".into(),
                ));
            }
            if !alphabet_index.contains_key(symbol) {
                alphabet_index.insert(symbol, alphabet_order.len());
                alphabet_order.push(symbol);
            }
        }

        let mut table = vec![vec![None; alphabet_order.len()]; state_order.len()];
        for ((from, symbol), to) in &transitions {
            let from_idx = state_index[from];
            let sym_idx = alphabet_index[symbol];
            let to_idx = state_index[to];
            table[from_idx][sym_idx] = Some(to_idx);
        }

        let initial_idx = state_index[initial];
        let states = state_order
            .into_iter()
            .enumerate()
            .map(|(idx, name)| DfaState {
                name: Rc::from(name),
                initial: idx == initial_idx,
                accepting: final_states.contains(name),
                transitions: std::mem::take(&mut table[idx]),
            })
            .collect();

        Ok(Dfa {
            alphabet: alphabet_order.into_iter().map(Rc::from).collect(),
            states,
            initial_state: initial_idx,
        })
    }

    /// Totalizes this DFA's transition function by adding a single fresh error/sink state, to
    /// which every previously-undefined transition (from any state, including the sink itself)
    /// now points. The sink is never accepting. Calling this on an already-total DFA is a no-op
    /// that still returns an equivalent (but possibly differently-named) automaton.
    ///
    /// ```
    /// use automata::dfa::Dfa;
    ///
    /// let dfa = Dfa::create("q0", [(("q0", "a"), "q1")], ["q1"]).unwrap();
    /// let complete = dfa.complete();
    /// assert!(complete.states().iter().all(|s| s.transitions().iter().all(Option::is_some)));
    /// ```
    pub fn complete(&self) -> Self {
        if self
            .states
            .iter()
            .all(|s| s.transitions.iter().all(Option::is_some))
        {
            return self.clone();
        }

        let sink_name = self.fresh_name("qerr");
        let sink_idx = self.states.len();

        let mut states: Vec<DfaState> = self
            .states
            .iter()
            .map(|s| DfaState {
                name: s.name.clone(),
                initial: s.initial,
                accepting: s.accepting,
                transitions: s
                    .transitions
                    .iter()
                    .map(|t| Some(t.unwrap_or(sink_idx)))
                    .collect(),
            })
            .collect();
        states.push(DfaState {
            name: sink_name,
            initial: false,
            accepting: false,
            transitions: vec![Some(sink_idx); self.alphabet.len()],
        });

        Dfa {
            alphabet: self.alphabet.clone(),
            states,
            initial_state: self.initial_state,
        }
    }

    /// Complements this DFA's language: first [completes](Dfa::complete) the automaton (so every
    /// transition is defined and "falling off" is impossible), then flips every state's
    /// acceptance. The result accepts exactly the strings over this alphabet that `self` rejects.
    ///
    /// ```
    /// use automata::dfa::Dfa;
    ///
    /// let contains_a = Dfa::create(
    ///     "n",
    ///     [(("n", "a"), "y"), (("n", "b"), "n"), (("y", "a"), "y"), (("y", "b"), "y")],
    ///     ["y"],
    /// ).unwrap();
    /// let not_contains_a = contains_a.complement();
    /// assert!(not_contains_a.accepts_graphemes("bbb"));
    /// assert!(!not_contains_a.accepts_graphemes("bab"));
    /// ```
    pub fn complement(&self) -> Self {
        let mut complete = self.complete();
        complete
            .states
            .iter_mut()
            .for_each(|s| s.accepting = !s.accepting);
        complete
    }

    /// Constructs the union of two DFAs: a new DFA accepting exactly the strings accepted by
    /// either (or both). Implemented via the NFA bridge (see the [module docs](self)).
    pub fn union(&self, other: &Self) -> Result<Self, AutomatonError> {
        self.via_nfa_bridge(other, Nfa::union)
    }

    /// Constructs the intersection of two DFAs: a new DFA accepting exactly the strings accepted
    /// by both. Implemented via the NFA bridge (see the [module docs](self)).
    pub fn intersection(&self, other: &Self) -> Result<Self, AutomatonError> {
        self.via_nfa_bridge(other, Nfa::intersection)
    }

    /// Constructs the difference of two DFAs: a new DFA accepting exactly the strings accepted by
    /// `self` but not by `other`. Implemented via the NFA bridge (see the [module docs](self)).
    pub fn difference(&self, other: &Self) -> Result<Self, AutomatonError> {
        self.via_nfa_bridge(other, Nfa::difference)
    }

    /// Constructs the concatenation of two DFAs: a new DFA accepting exactly the strings formed by
    /// concatenating a string accepted by `self` with a string accepted by `other`. Implemented via
    /// the NFA bridge (see the [module docs](self)).
    pub fn concat(&self, other: &Self) -> Result<Self, AutomatonError> {
        self.via_nfa_bridge(other, Nfa::concat)
    }

    fn via_nfa_bridge(
        &self,
        other: &Self,
        op: impl FnOnce(Nfa, Nfa) -> Result<Nfa, AutomatonError>,
    ) -> Result<Self, AutomatonError> {
        if !alphabet_equal(&self.alphabet, &other.alphabet) {
            return Err(AutomatonError::AlphabetMismatch);
        }
        let nfa = op(self.clone().to_nfa(), other.clone().to_nfa())?;
        Ok(nfa.to_dfa())
    }

    /// Constructs a new DFA from two DFAs using the product construction: a new DFA with states
    /// corresponding to pairs of states the two DFAs would be in simultaneously, only including
    /// pairs reachable from the pair of initial states. Whether a pair-state is accepting is given
    /// by `combinator`. Returns [AutomatonError::AlphabetMismatch] if the alphabets differ.
    ///
    /// This is a lower-level building block, kept available for custom accept-combinators and
    /// diagnostics; [Dfa::union]/[Dfa::intersection]/[Dfa::difference]/[Dfa::concat] are defined via
    /// the NFA bridge instead (see the [module docs](self)).
    pub fn product_construction(
        &self,
        other: &Self,
        mut combinator: impl FnMut(Option<&DfaState>, Option<&DfaState>) -> bool,
    ) -> Result<Self, AutomatonError> {
        if !alphabet_equal(&self.alphabet, &other.alphabet) {
            return Err(AutomatonError::AlphabetMismatch);
        }

        let q1 = Some(self.initial_state);
        let q2 = Some(other.initial_state);
        let mut to_explore = vec![(self.evaluator(), other.evaluator())];
        let mut explored_states = HashSet::new();
        explored_states.insert((q1, q2));
        let mut state_data = vec![];

        while let Some((s1, s2)) = to_explore.pop() {
            let mut transition_list = Vec::with_capacity(self.alphabet.len());
            for elem in self.alphabet.iter() {
                let mut d1 = s1.clone();
                d1.step(elem);
                let mut d2 = s2.clone();
                d2.step(elem);
                let states = (d1.current_state_idx(), d2.current_state_idx());
                transition_list.push(states);
                if explored_states.insert(states) {
                    to_explore.push((d1, d2));
                }
            }

            state_data.push((
                (s1.current_state_idx(), s2.current_state_idx()),
                combinator(s1.current_state(), s2.current_state()),
                transition_list,
            ));
        }

        let names: HashMap<(Option<usize>, Option<usize>), Rc<str>> = {
            let mut seen = HashSet::new();
            let pretty: Vec<_> = explored_states
                .iter()
                .map(|&(s1, s2)| {
                    let combined: Rc<str> = Rc::from(format!(
                        "({},{})",
                        s1.map_or("-", |s| self.states[s].name.as_ref()),
                        s2.map_or("-", |s| other.states[s].name.as_ref())
                    ));
                    ((s1, s2), combined)
                })
                .collect();
            let all_unique = pretty.iter().all(|(_, name)| seen.insert(name.clone()));
            if all_unique {
                pretty.into_iter().collect()
            } else {
                explored_states
                    .iter()
                    .enumerate()
                    .map(|(idx, &(s1, s2))| ((s1, s2), Rc::from(format!("q{idx}"))))
                    .collect()
            }
        };

        let rev_state_idx_map = state_data
            .iter()
            .enumerate()
            .map(|(idx, &((s1, s2), _, _))| ((s1, s2), idx))
            .collect::<HashMap<_, _>>();
        let initial_state = *rev_state_idx_map
            .get(&(q1, q2))
            .expect("initial pair should have an index");

        let states = state_data
            .into_iter()
            .map(|(states, accepting, transitions)| DfaState {
                name: names.get(&states).expect("every state has a name").clone(),
                initial: states == (q1, q2),
                accepting,
                transitions: transitions
                    .into_iter()
                    .map(|pair| {
                        if pair == (None, None) {
                            None
                        } else {
                            Some(
                                *rev_state_idx_map
                                    .get(&pair)
                                    .expect("explored pair should have an index"),
                            )
                        }
                    })
                    .collect(),
            })
            .collect::<Vec<_>>();

        Ok(Dfa {
            alphabet: self.alphabet.clone(),
            states,
            initial_state,
        })
    }

    /// Minimizes this DFA: removes unreachable states, merges non-distinguishable states, then
    /// totalizes the result with [Dfa::complete]. The minimization up to isomorphism is unique.
    ///
    /// ```
    /// use automata::parser;
    /// use automata::dfa::Dfa;
    ///
    /// let accepts_everything = "
    ///        a b c
    /// -> * y y y y
    ///      a b c d
    ///      b c d a
    ///    * c a b c
    ///      d d d c
    /// ";
    /// let dfa: Dfa = parser::dfa(accepts_everything).unwrap().try_into().unwrap();
    /// let dfa = dfa.minimize();
    /// assert_eq!(dfa.states().len(), 1);
    /// ```
    pub fn minimize(&self) -> Self {
        let mut dfa = self.clone();
        dfa.remove_unreachable_states();
        dfa.merge_nondistinguishable_states();
        dfa.complete()
    }

    /// Merges the non-distinguishable states of this DFA, such that every set of mutually
    /// non-distinguishable states becomes just one. The surviving representative of each
    /// equivalence class is chosen deterministically: the class's minimum state index, so
    /// that the result is reproducible given the same input.
    pub fn merge_nondistinguishable_states(&mut self) {
        let mapper = self
            .state_equivalence_classes_idx()
            .into_iter()
            .flat_map(|set| {
                let mut sorted: Vec<usize> = set.into_iter().collect();
                sorted.sort_unstable();
                let mut iter = sorted.into_iter();
                let survivor = iter.next().expect("non-empty equivalence class");
                iter.map(move |old| (old, survivor))
            })
            .collect::<HashMap<_, _>>();
        let map = |idx| mapper.get(&idx).copied();
        self.remap_transitions(map);
        if let Some(new_initial) = map(self.initial_state) {
            self.initial_state = new_initial;
            self.states[new_initial].initial = true;
        }
        let to_remove = mapper.into_keys().collect();
        self.remove_states(to_remove);
    }

    /// Gives the equivalence classes of the states of this DFA, that is, the sets of mutually
    /// non-distinguishable states.
    pub fn state_equivalence_classes(&self) -> Vec<Vec<&DfaState>> {
        self.state_equivalence_classes_idx()
            .into_iter()
            .map(|class| class.into_iter().map(|s| &self.states[s]).collect())
            .collect()
    }

    /// Gives the equivalence classes of the states of this DFA by their indices. An undefined
    /// transition is treated as its own distinguishing value during refinement: two states only
    /// end up in the same class if, for every symbol, either both transition into the same class
    /// or both leave the transition undefined. This is done by running Hopcroft's algorithm over
    /// the real states plus one virtual "sink" index (standing in for "undefined"), then dropping
    /// the sink from the resulting classes.
    pub fn state_equivalence_classes_idx(&self) -> Vec<HashSet<usize>> {
        let sink = self.states.len();
        let effective = |q: usize, c: usize| -> usize {
            if q == sink {
                sink
            } else {
                self.states[q].transitions[c].unwrap_or(sink)
            }
        };

        let finals: HashSet<usize> = (0..self.states.len())
            .filter(|&i| self.states[i].accepting)
            .collect();
        let mut nonfinals: HashSet<usize> = (0..self.states.len())
            .filter(|&i| !self.states[i].accepting)
            .collect();
        nonfinals.insert(sink);

        let mut p = vec![finals, nonfinals];
        let mut w = p.clone();

        while let Some(a) = w.pop() {
            for c in 0..self.alphabet.len() {
                let x: HashSet<usize> = (0..=sink).filter(|&q| a.contains(&effective(q, c))).collect();
                p = p
                    .into_iter()
                    .map(|y| {
                        (
                            x.intersection(&y).copied().collect::<HashSet<_>>(),
                            y.difference(&x).copied().collect::<HashSet<_>>(),
                            y,
                        )
                    })
                    .flat_map(|(inters, diff, y)| {
                        if !inters.is_empty() && !diff.is_empty() {
                            if let Some(idx) = w.iter().position(|hs| hs == &y) {
                                w.swap_remove(idx);
                                w.push(inters.clone());
                                w.push(diff.clone());
                            } else if inters.len() <= diff.len() {
                                w.push(inters.clone());
                            } else {
                                w.push(diff.clone());
                            }
                            vec![inters, diff].into_iter()
                        } else {
                            vec![y].into_iter()
                        }
                    })
                    .collect()
            }
        }

        p.into_iter()
            .filter_map(|mut set| {
                set.remove(&sink);
                (!set.is_empty()).then_some(set)
            })
            .collect()
    }

    /// Removes the unreachable states of this automaton, leaving only states actually reachable
    /// from the initial state.
    pub fn remove_unreachable_states(&mut self) {
        let states = self.unreachable_state_idx().into_iter().collect();
        self.remove_states(states);
    }

    /// Finds the unreachable states of this automaton.
    pub fn unreachable_states(&self) -> Vec<&DfaState> {
        self.unreachable_state_idx()
            .into_iter()
            .map(|idx| &self.states[idx])
            .collect()
    }

    /// Finds the unreachable states of this automaton, by their indices.
    pub fn unreachable_state_idx(&self) -> HashSet<usize> {
        let reachables = self.reachable_state_idx();
        (0..self.states.len())
            .filter(|x| !reachables.contains(x))
            .collect()
    }

    /// Checks if this DFA has a reachable accepting state, i.e. if it accepts at least one string.
    pub fn has_reachable_accepting_state(&self) -> bool {
        self.reachable_state_idx()
            .iter()
            .any(|idx| self.states[*idx].accepting)
    }

    /// Finds the reachable states of this automaton.
    pub fn reachable_states(&self) -> Vec<&DfaState> {
        self.reachable_state_idx()
            .into_iter()
            .map(|idx| &self.states[idx])
            .collect()
    }

    /// Finds the reachable states of this automaton, by their indices.
    pub fn reachable_state_idx(&self) -> HashSet<usize> {
        let mut reachables = HashSet::from([self.initial_state]);
        let mut new_states = reachables.clone();
        while !new_states.is_empty() {
            new_states = new_states
                .drain()
                .flat_map(|state| self.states[state].transitions.iter().flatten().copied())
                .filter(|&state| reachables.insert(state))
                .collect();
        }
        reachables
    }

    fn remap_transitions(&mut self, mapper: impl Fn(usize) -> Option<usize>) {
        self.states.iter_mut().for_each(|state| {
            state.transitions.iter_mut().for_each(|trans| {
                if let Some(t) = trans {
                    *trans = Some(mapper(*t).unwrap_or(*t));
                }
            })
        })
    }

    /// Removes the states with the given indices, remapping the transitions of the remaining
    /// states. There must be no transitions into a removed state from a surviving state; under
    /// `debug_assertions` such a dangling transition panics here, otherwise behavior is undefined
    /// at a later stage. The initial state cannot be removed.
    fn remove_states(&mut self, mut to_remove: Vec<usize>) {
        let mut old_state_idx = (0..self.states.len()).collect::<Vec<_>>();

        to_remove.sort();
        to_remove.dedup();
        if let Err(less_than) = to_remove.binary_search(&self.initial_state) {
            self.initial_state -= less_than;
        } else {
            panic!("cannot remove initial state");
        }

        to_remove.iter().rev().for_each(|&idx| {
            self.states.remove(idx);
            old_state_idx.remove(idx);
        });

        let map = |idx| {
            let res = old_state_idx.binary_search(&idx);
            if cfg!(debug_assertions) {
                Some(res.expect("no transitions to removed state"))
            } else {
                res.ok()
            }
        };
        self.remap_transitions(map);
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

    /// Converts this DFA to a [Nfa], by converting each state one-to-one. Cheap: no strings are
    /// cloned, only the per-symbol `Vec`s a NFA's transition table requires are allocated.
    pub fn to_nfa(self) -> Nfa {
        let Dfa {
            alphabet,
            states,
            initial_state,
        } = self;
        let states = states.into_iter().map(DfaState::into).collect();
        Nfa {
            alphabet,
            states,
            initial_state,
        }
    }

    /// Checks if this automaton accepts the given string of alphabet elements.
    pub fn accepts(&self, string: &[&str]) -> bool {
        let mut eval = self.evaluator();
        eval.step_multiple(string);
        eval.is_accepting()
    }

    /// Checks if this automaton accepts the given string, split into single grapheme clusters. See
    /// [Dfa::graphemes_only].
    pub fn accepts_graphemes(&self, string: &str) -> bool {
        let graphemes = string.graphemes(true).collect::<Vec<_>>();
        let mut eval = self.evaluator();
        eval.step_multiple(&graphemes);
        eval.is_accepting()
    }

    /// Checks if the alphabet of this automaton consists of only single graphemes, in which case
    /// [Dfa::accepts_graphemes] may be used.
    pub fn graphemes_only(&self) -> bool {
        self.alphabet
            .iter()
            .all(|str| str.graphemes(true).count() == 1)
    }

    /// Gets an evaluator for stepping through this automaton symbol by symbol.
    pub fn evaluator(&self) -> DfaEvaluator<'_> {
        self.into()
    }

    /// Generates a parseable table of this DFA.
    pub fn to_table(&self) -> String {
        self.gen_table("→")
    }

    /// Generates a parseable table of this DFA, using "->" for the initial-state arrow.
    pub fn ascii_table(&self) -> String {
        self.gen_table("->")
    }

    fn gen_table(&self, arrow: &str) -> String {
        let mut table = Table::default();

        let mut alph = vec!["", "", ""];
        alph.extend(self.alphabet.iter().map(|s| s as &str));
        table.push_row(alph);

        let sink_name: Rc<str> = Rc::from("-");
        for DfaState {
            name,
            initial,
            accepting,
            transitions,
        } in &self.states
        {
            let mut state = vec![
                if *initial { arrow } else { "" },
                if *accepting { "*" } else { "" },
                name,
            ];
            transitions.iter().for_each(|c| {
                state.push(match c {
                    Some(c) => &self.states[*c].name,
                    None => &sink_name,
                })
            });
            table.push_row(state);
        }
        table.to_string(" ")
    }

    /// Checks if this DFA is equivalent to another, i.e. if they accept the same language. DFAs
    /// with different alphabets are never equivalent; the order of the alphabet, the number of
    /// states, and the exact transitions otherwise don't matter. Explores pairs of reachable
    /// states directly rather than constructing the symmetric difference, which is considerably
    /// cheaper for most automata.
    pub fn equivalent_to(&self, other: &Dfa) -> bool {
        if !alphabet_equal(&self.alphabet, &other.alphabet) {
            return false;
        }

        let mut to_explore = vec![(self.evaluator(), other.evaluator())];
        let mut explored_states = HashSet::new();
        explored_states.insert((
            to_explore[0].0.current_state_idx(),
            to_explore[0].1.current_state_idx(),
        ));

        while let Some((s1, s2)) = to_explore.pop() {
            if s1.is_accepting() != s2.is_accepting() {
                return false;
            }
            for elem in self.alphabet.iter() {
                let mut d1 = s1.clone();
                d1.step(elem);
                let mut d2 = s2.clone();
                d2.step(elem);
                if explored_states.insert((d1.current_state_idx(), d2.current_state_idx())) {
                    to_explore.push((d1, d2));
                }
            }
        }
        true
    }

    /// Gets the alphabet of this DFA
    pub fn alphabet(&self) -> &[Rc<str>] {
        &self.alphabet
    }

    /// Gets the states of this DFA
    pub fn states(&self) -> &[DfaState] {
        self.states.as_slice()
    }

    /// Gets the initial state of this DFA
    pub fn initial_state(&self) -> &DfaState {
        &self.states[self.initial_state]
    }

    /// Get the index of the initial state of this DFA
    pub fn initial_state_index(&self) -> usize {
        self.initial_state
    }
}
