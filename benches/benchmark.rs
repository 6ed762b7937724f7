use automata::dfa::Dfa;
use automata::nfa::Nfa;
use automata::parser;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// A DFA over `{a, b}` accepting strings with an even number of `a`s and an even number of `b`s.
fn even_even_dfa() -> Dfa {
    let table = "
           a  b
    -> * s00 s10 s01
         s10 s00 s11
         s01 s11 s00
         s11 s01 s10
    ";
    parser::dfa(table).unwrap().try_into().unwrap()
}

/// A DFA over `{a, b}` accepting strings ending in `ab`.
fn ends_in_ab_dfa() -> Dfa {
    let table = "
         a  b
    -> p p2 p
       p2 p2 q
     * q  p2 p
    ";
    parser::dfa(table).unwrap().try_into().unwrap()
}

/// A deliberately nondeterministic NFA over `{a, b}`: `(a|b)*abb`.
fn abb_suffix_nfa() -> Nfa {
    let table = "
         a        b
    -> q0 {q0 q1} {q0}
       q1 {}      {q2}
       q2 {}      {q3}
     * q3 {}      {}
    ";
    parser::nfa(table).unwrap().try_into().unwrap()
}

pub fn powerset_ops(c: &mut Criterion) {
    let dfa1 = even_even_dfa();
    let dfa2 = ends_in_ab_dfa();
    c.bench_function("union", |b| b.iter(|| dfa1.union(black_box(&dfa2))));
    c.bench_function("intersection", |b| {
        b.iter(|| dfa1.intersection(black_box(&dfa2)))
    });
    c.bench_function("difference", |b| {
        b.iter(|| dfa1.difference(black_box(&dfa2)))
    });
    c.bench_function("concat", |b| b.iter(|| dfa1.concat(black_box(&dfa2))));
}

pub fn equivalence_check(c: &mut Criterion) {
    let dfa1 = even_even_dfa();
    let dfa2 = even_even_dfa();
    c.bench_function("equivalence check", |b| {
        b.iter(|| dfa1.equivalent_to(black_box(&dfa2)))
    });
}

pub fn minimize(c: &mut Criterion) {
    let dfa = even_even_dfa();
    c.bench_function("minimize", |b| b.iter(|| black_box(&dfa).minimize()));
}

pub fn subset_construction(c: &mut Criterion) {
    let nfa = abb_suffix_nfa();
    c.bench_function("nfa to dfa", |b| b.iter(|| black_box(&nfa).to_dfa()));
    c.bench_function("epsilon elimination", |b| {
        b.iter(|| black_box(&nfa).remove_epsilon_transitions())
    });
}

pub fn string_acceptance(c: &mut Criterion) {
    let dfa = even_even_dfa();
    let long_input: Vec<&str> = std::iter::repeat("a").take(1000).collect();
    c.bench_function("accepts (1000 symbols)", |b| {
        b.iter(|| dfa.accepts(black_box(&long_input)))
    });
}

criterion_group!(
    benches,
    equivalence_check,
    powerset_ops,
    minimize,
    subset_construction,
    string_acceptance
);
criterion_main!(benches);
