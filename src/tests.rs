use crate::dfa::{Dfa, DfaState};
use crate::nfa::Nfa;
use crate::parser;
use crate::serialize;
use proptest::prelude::*;
use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::rc::Rc;

#[test]
fn subset_construction_matches_equivalent_dfa() {
    let dfa = Dfa::create(
        "q0",
        [(("q0", "a"), "q1"), (("q1", "a"), "q1")],
        ["q1"],
    )
    .unwrap();
    let nfa = Nfa::create(
        "p0",
        [
            (("p0", "ε"), vec!["p1"]),
            (("p1", "a"), vec!["p1"]),
        ],
        ["p1"],
    )
    .unwrap();
    assert!(dfa.equivalent_to(&nfa.to_dfa()));
}

#[test]
fn undefined_transition_rejects_rather_than_panics() {
    let dfa = Dfa::create("q0", [(("q0", "a"), "q1")], ["q1"]).unwrap();
    assert!(!dfa.accepts(&["b"]));
    assert!(!dfa.accepts(&["a", "a"]));
    assert!(dfa.accepts(&["a"]));
}

#[test]
fn complete_routes_undefined_transitions_to_sink() {
    let dfa = Dfa::create("q0", [(("q0", "a"), "q1")], ["q1"]).unwrap();
    let complete = dfa.complete();
    assert!(complete
        .states()
        .iter()
        .all(|s| s.transitions().iter().all(Option::is_some)));
    assert_eq!(dfa.accepts(&["b"]), complete.accepts(&["b"]));
    assert_eq!(dfa.accepts(&["a"]), complete.accepts(&["a"]));
}

#[test]
fn complement_is_involutive_up_to_equivalence() {
    let dfa = Dfa::create(
        "n",
        [
            (("n", "a"), "y"),
            (("n", "b"), "n"),
            (("y", "a"), "y"),
            (("y", "b"), "y"),
        ],
        ["y"],
    )
    .unwrap();
    let double_complement = dfa.complement().complement();
    assert!(dfa.complete().equivalent_to(&double_complement));
}

#[test]
fn de_morgan_union_via_complement_and_intersection() {
    let a = Dfa::create("a0", [(("a0", "x"), "a1"), (("a1", "x"), "a1")], ["a1"]).unwrap();
    let b = Dfa::create("b0", [(("b0", "x"), "b1"), (("b1", "x"), "b0")], ["b1"]).unwrap();

    let union = a.union(&b).unwrap();
    let de_morgan = a.complement().intersection(&b.complement()).unwrap().complement();
    assert!(union.equivalent_to(&de_morgan));
}

#[test]
fn difference_accepts_left_but_not_right() {
    let contains_a = Dfa::create(
        "n",
        [
            (("n", "a"), "y"),
            (("n", "b"), "n"),
            (("y", "a"), "y"),
            (("y", "b"), "y"),
        ],
        ["y"],
    )
    .unwrap();
    let contains_b = Dfa::create(
        "n",
        [
            (("n", "a"), "n"),
            (("n", "b"), "y"),
            (("y", "a"), "y"),
            (("y", "b"), "y"),
        ],
        ["y"],
    )
    .unwrap();
    let diff = contains_a.difference(&contains_b).unwrap();
    assert!(diff.accepts_graphemes("aaa"));
    assert!(!diff.accepts_graphemes("ab"));
    assert!(!diff.accepts_graphemes("bbb"));
}

#[test]
fn concat_requires_both_halves() {
    let a_star = Dfa::create("s", [(("s", "a"), "s")], ["s"]).unwrap();
    let single_b = Nfa::create("p0", [(("p0", "b"), vec!["p1"])], ["p1"]).unwrap().to_dfa();
    let concatenated = a_star.concat(&single_b).unwrap();
    assert!(concatenated.accepts_graphemes("aaab"));
    assert!(concatenated.accepts_graphemes("b"));
    assert!(!concatenated.accepts_graphemes("ba"));
    assert!(!concatenated.accepts_graphemes("aa"));
}

#[test]
fn dfa_accepts_strings_ending_in_one() {
    let dfa = Dfa::create(
        "q0",
        [(("q0", "0"), "q0"), (("q0", "1"), "q1")],
        ["q1"],
    )
    .unwrap();
    assert!(!dfa.accepts(&[]));
    assert!(dfa.accepts(&["1"]));
    assert!(dfa.accepts(&["0", "0", "0", "1"]));
    assert!(!dfa.accepts(&["1", "0"]));
}

#[test]
fn union_of_single_letter_languages_accepts_exactly_both() {
    let accepts_a = Dfa::create("n", [(("n", "a"), "y")], ["y"]).unwrap();
    let accepts_b = Dfa::create("n", [(("n", "b"), "y")], ["y"]).unwrap();
    let union = accepts_a.union(&accepts_b).unwrap();
    assert!(union.accepts_graphemes("a"));
    assert!(union.accepts_graphemes("b"));
    assert!(!union.accepts_graphemes(""));
    assert!(!union.accepts_graphemes("ab"));
    assert!(!union.accepts_graphemes("aa"));
}

#[test]
fn minimizing_the_bloated_zero_star_one_zero_star_dfa_yields_three_states() {
    // The standard six-state DFA for 0*10*, with c, d and e all accepting and f an
    // absorbing non-accepting trap reached once a second '1' is seen.
    let dfa = Dfa::create(
        "a",
        [
            (("a", "0"), "b"),
            (("a", "1"), "c"),
            (("b", "0"), "a"),
            (("b", "1"), "d"),
            (("c", "0"), "e"),
            (("c", "1"), "f"),
            (("d", "0"), "e"),
            (("d", "1"), "f"),
            (("e", "0"), "e"),
            (("e", "1"), "f"),
            (("f", "0"), "f"),
            (("f", "1"), "f"),
        ],
        ["c", "d", "e"],
    )
    .unwrap();
    let minimized = dfa.minimize();
    assert_eq!(minimized.states().len(), 3);
    assert_eq!(
        minimized.states().iter().filter(|s| s.is_accepting()).count(),
        1
    );
    assert!(dfa.equivalent_to(&minimized));
    for word in ["", "0", "1", "01", "10", "010", "11", "0110"] {
        let split: Vec<&str> = word.split("").filter(|s| !s.is_empty()).collect();
        assert_eq!(dfa.accepts(&split), minimized.accepts(&split));
    }
}

#[test]
fn ullman_epsilon_elimination_example_matches_expected_transitions() {
    let nfa = Nfa::create(
        "q0",
        [
            (("q0", "0"), vec!["q2"]),
            (("q0", "1"), vec!["q1"]),
            (("q1", "0"), vec!["q0"]),
            (("q1", "ε"), vec!["q2"]),
            (("q2", "1"), vec!["q0"]),
            (("q2", "ε"), vec!["q1"]),
        ],
        ["q2"],
    )
    .unwrap();
    let without_eps = nfa.remove_epsilon_transitions();
    assert!(without_eps
        .states()
        .iter()
        .all(|s| s.epsilon_transitions().is_empty()));

    let finals: HashSet<&str> = without_eps
        .states()
        .iter()
        .filter(|s| s.accepting)
        .map(|s| s.name.as_ref())
        .collect();
    assert_eq!(finals, HashSet::from(["q1", "q2"]));

    let mut eval = without_eps.evaluator();
    eval.step("0");
    assert!(eval.current_states_idx().iter().any(|&idx| without_eps
        .states()
        .get(idx)
        .map(|s| s.name.as_ref() == "q2")
        .unwrap_or(false)));

    for word in ["", "0", "1", "00", "01", "10", "11", "001", "0101"] {
        let split: Vec<&str> = word.split("").filter(|s| !s.is_empty()).collect();
        assert_eq!(
            nfa.accepts(&split),
            without_eps.accepts(&split),
            "mismatch for {word:?}"
        );
    }
}

#[test]
fn subset_construction_of_a_star_b_star_yields_two_final_states() {
    let nfa = Nfa::create(
        "q0",
        [
            (("q0", "a"), vec!["q0"]),
            (("q0", "ε"), vec!["q1"]),
            (("q1", "b"), vec!["q1"]),
        ],
        ["q1"],
    )
    .unwrap();
    let dfa = nfa.to_dfa();
    assert_eq!(dfa.states().len(), 2);
    assert!(dfa.states().iter().all(|s| s.is_accepting()));
    assert!(dfa.accepts(&[]));
    assert!(dfa.accepts(&["a", "a", "a"]));
    assert!(dfa.accepts(&["a", "b", "b"]));
    assert!(!dfa.accepts(&["b", "a"]));
}

#[test]
fn minimize_preserves_language_and_shrinks_redundant_states() {
    let input = "
           a  b
    ->  s1 s2 s1
      * s2 s3 s2
        s3 s4 s3
      * s4 s1 s4
    ";
    let dfa: Dfa = parser::dfa(input).unwrap().try_into().unwrap();
    let minimized = dfa.minimize();
    assert_eq!(minimized.states().len(), 2);
    assert!(dfa.equivalent_to(&minimized));
}

#[test]
fn remove_unreachable_states_is_idempotent() {
    let mut dfa = Dfa::create(
        "q0",
        [(("q0", "a"), "q0"), (("dead", "a"), "dead")],
        ["dead"],
    )
    .unwrap();
    dfa.remove_unreachable_states();
    let before = dfa.states().len();
    dfa.remove_unreachable_states();
    assert_eq!(before, dfa.states().len());
    assert_eq!(dfa.states().len(), 1);
}

#[test]
fn json_round_trip_preserves_dfa_language() {
    let dfa = Dfa::create(
        "q0",
        [(("q0", "a"), "q1"), (("q1", "a"), "q1")],
        ["q1"],
    )
    .unwrap();
    let mut buf = Vec::new();
    serialize::dump_dfa(&mut buf, &dfa).unwrap();
    let loaded = serialize::load_dfa(buf.as_slice()).unwrap();
    assert!(dfa.equivalent_to(&loaded));
}

#[test]
fn json_round_trip_preserves_nfa_language_and_epsilon() {
    let nfa = Nfa::create(
        "q0",
        [(("q0", "ε"), vec!["q1"]), (("q1", "a"), vec!["q1"])],
        ["q1"],
    )
    .unwrap();
    let mut buf = Vec::new();
    serialize::dump_nfa(&mut buf, &nfa).unwrap();
    let text = String::from_utf8(buf.clone()).unwrap();
    assert!(text.contains("\"&\""));
    let loaded = serialize::load_nfa(buf.as_slice()).unwrap();
    assert!(nfa.equivalent_to(&loaded));
}

#[test]
fn invalid_alphabet_rejects_epsilon_in_dfa() {
    let err = Dfa::create("q0", [(("q0", "ε"), "q0")], []).unwrap_err();
    assert!(matches!(err, crate::error::AutomatonError::InvalidAlphabet(_)));
}

#[test]
fn alphabet_mismatch_rejects_binary_combination() {
    let a = Dfa::create("q0", [(("q0", "a"), "q0")], []).unwrap();
    let b = Dfa::create("q0", [(("q0", "b"), "q0")], []).unwrap();
    let err = a.union(&b).unwrap_err();
    assert!(matches!(err, crate::error::AutomatonError::AlphabetMismatch));
}

#[test]
fn to_dfa_bounded_reports_resource_limit() {
    let nfa = Nfa::create(
        "q0",
        [
            (("q0", "a"), vec!["q0", "q1"]),
            (("q1", "a"), vec!["q1", "q2"]),
            (("q2", "a"), vec!["q2", "q3"]),
        ],
        ["q3"],
    )
    .unwrap();
    let result = nfa.to_dfa_bounded(2);
    assert!(matches!(
        result,
        Err(crate::error::AutomatonError::ResourceLimit(_))
    ));
}

#[test]
fn graph_description_reflects_states_and_edges() {
    let dfa = Dfa::create("q0", [(("q0", "a"), "q1")], ["q1"]).unwrap();
    let graph = dfa.to_graph();
    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.edges.len(), 1);
    assert!(graph.nodes.iter().any(|n| n.initial));
    assert!(graph.nodes.iter().any(|n| n.accepting));
}

proptest! {
    /// A DFA can be turned into a table with to_table() and parsed back to the *very same* DFA.
    #[test]
    fn dfa_table_reparse(dfa in total_dfa(30, 10)) {
        let parsed_dfa: Dfa = parser::dfa(&dfa.to_table()).unwrap().try_into().unwrap();
        assert_eq!(dfa, parsed_dfa);
    }

    /// Minimizing a DFA preserves its language.
    #[test]
    fn dfa_minimize_eq(dfa in total_dfa(25, 10)) {
        let minimized = dfa.minimize();
        assert!(minimized.equivalent_to(&dfa));
    }

    /// A DFA converted to an NFA and back is equivalent to the original.
    #[test]
    fn dfa_to_nfa_to_dfa(dfa in total_dfa(30, 10)) {
        let converted = dfa.clone().to_nfa().to_dfa();
        assert!(dfa.equivalent_to(&converted));
    }

    /// NFA union/intersection/difference agree pointwise with the evaluator on each operand.
    #[test]
    fn binary_dfa_ops_agree_pointwise(
        dfa1 in fixed_alphabet_dfa(15, 'a'..='d'),
        dfa2 in fixed_alphabet_dfa(15, 'a'..='d'),
        tests in prop::collection::vec("[a-d]{0,6}", 40)
    ) {
        let intersection = dfa1.intersection(&dfa2).unwrap();
        let union = dfa1.union(&dfa2).unwrap();
        let difference = dfa1.difference(&dfa2).unwrap();
        for test in &tests {
            let r1 = dfa1.accepts_graphemes(test);
            let r2 = dfa2.accepts_graphemes(test);
            assert_eq!(intersection.accepts_graphemes(test), r1 && r2);
            assert_eq!(union.accepts_graphemes(test), r1 || r2);
            assert_eq!(difference.accepts_graphemes(test), r1 && !r2);
        }
    }

    /// A DFA unioned with its own complement accepts everything; intersected, accepts nothing.
    #[test]
    fn dfa_complement_tautologies(
        dfa in fixed_alphabet_dfa(15, 'a'..='d'),
        tests in prop::collection::vec("[a-d]{0,6}", 40)
    ) {
        let not_dfa = dfa.complement();
        let union = dfa.union(&not_dfa).unwrap();
        let intersection = dfa.intersection(&not_dfa).unwrap();
        for test in &tests {
            assert!(union.accepts_graphemes(test));
            assert!(!intersection.accepts_graphemes(test));
        }
    }
}

prop_compose! {
    fn total_dfa(max_states: usize, max_alphabet_size: usize)
        (num_states in 1..max_states, alphabet_size in 1..max_alphabet_size)
        (
            states in state_names(num_states),
            alphabet in alphabet_elems(alphabet_size),
            initial_state in 0..num_states,
            accepting_states in prop::collection::vec(any::<bool>(), num_states..=num_states),
            transitions in prop::collection::vec(dfa_transitions(num_states, alphabet_size), num_states..=num_states)
        )
    -> Dfa {
        let states = states.into_iter().zip(
            accepting_states.into_iter().zip(transitions.into_iter())
        ).enumerate().map(|(idx, (state_name, (accepting, transitions)))|
            DfaState {
                name: Rc::from(state_name.as_str()),
                initial: idx == initial_state,
                accepting,
                transitions,
            }
        ).collect();

        Dfa {
            alphabet: alphabet.iter().map(|entry| Rc::from(entry.as_str())).collect(),
            states,
            initial_state,
        }
    }
}

prop_compose! {
    fn fixed_alphabet_dfa(max_states: usize, alphabet: RangeInclusive<char>)
        (num_states in 1..max_states)
        (
            states in state_names(num_states),
            initial_state in 0..num_states,
            accepting_states in prop::collection::vec(any::<bool>(), num_states..=num_states),
            transitions in prop::collection::vec(dfa_transitions(num_states, alphabet.clone().count()), num_states..=num_states),
            alphabet in Just(alphabet.clone().map(|c| Rc::from(c.to_string())).collect::<Vec<Rc<str>>>())
        )
    -> Dfa {
        let states = states.into_iter().zip(
            accepting_states.into_iter().zip(transitions.into_iter())
        ).enumerate().map(|(idx, (state_name, (accepting, transitions)))|
            DfaState {
                name: Rc::from(state_name.as_str()),
                initial: idx == initial_state,
                accepting,
                transitions,
            }
        ).collect();

        Dfa {
            alphabet: Rc::from(alphabet),
            states,
            initial_state,
        }
    }
}

prop_compose! {
    fn dfa_transitions(states: usize, alphabet_size: usize)
        (transitions in prop::collection::vec(0..states, alphabet_size..=alphabet_size))
    -> Vec<Option<usize>> {
        transitions.into_iter().map(Some).collect()
    }
}

prop_compose! {
    fn state_names(count: usize)
        (names in filtered_set(count, r"[^\s#{}]+", &["ε", "eps", "→", "->", "*"]))
    -> HashSet<String> {
        names
    }
}

prop_compose! {
    fn alphabet_elems(count: usize)
        (names in filtered_set(count, r"[^\s#{}]+", &["ε", "eps", "→", "->", "*"]))
    -> HashSet<String> {
        names
    }
}

prop_compose! {
    fn filtered_set(count: usize, regex: &'static str, deny: &'static [&'static str])
        (names in prop::collection::hash_set(
            regex.prop_filter(
                "name should not be reserved",
                |s| !deny.contains(&s.as_str()) && !s.contains(|c: char| c.is_whitespace())
            ),
            count..=count
        ))
    -> HashSet<String> {
        names
    }
}
