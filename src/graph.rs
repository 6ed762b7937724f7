//! A pure, serializable graph-description view of a [Dfa] or [Nfa], with no rendering attached.
//! Any canvas, terminal or GUI front end can consume a [GraphDescription] to draw an automaton
//! without depending on `dfa`/`nfa` internals.

use crate::dfa::Dfa;
use crate::nfa::Nfa;
use serde::Serialize;

/// One state of an automaton, reduced to what a drawer needs.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub id: usize,
    pub label: String,
    pub initial: bool,
    pub accepting: bool,
}

/// One transition of an automaton, reduced to what a drawer needs. Multiple symbols between the
/// same pair of states are reported as separate edges; a drawer that wants a single label per
/// pair can group them by `(source, target)`.
#[derive(Debug, Clone, Serialize)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub label: String,
}

/// A pure graph description: nodes and edges, with no layout or styling information.
#[derive(Debug, Clone, Serialize)]
pub struct GraphDescription {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Dfa {
    /// Reduces this DFA to a [GraphDescription] for external visualization.
    pub fn to_graph(&self) -> GraphDescription {
        let nodes = self
            .states()
            .iter()
            .enumerate()
            .map(|(id, s)| Node {
                id,
                label: s.name().to_owned(),
                initial: s.is_initial(),
                accepting: s.is_accepting(),
            })
            .collect();

        let edges = self
            .states()
            .iter()
            .enumerate()
            .flat_map(|(source, s)| {
                s.transitions()
                    .iter()
                    .enumerate()
                    .filter_map(move |(sym_idx, target)| {
                        target.map(|target| Edge {
                            source,
                            target,
                            label: self.alphabet()[sym_idx].to_string(),
                        })
                    })
            })
            .collect();

        GraphDescription { nodes, edges }
    }
}

impl Nfa {
    /// Reduces this NFA to a [GraphDescription] for external visualization. Epsilon moves are
    /// reported with the label `"ε"`.
    pub fn to_graph(&self) -> GraphDescription {
        let nodes = self
            .states()
            .iter()
            .enumerate()
            .map(|(id, s)| Node {
                id,
                label: s.name().to_owned(),
                initial: s.is_initial(),
                accepting: s.is_accepting(),
            })
            .collect();

        let mut edges = Vec::new();
        for (source, s) in self.states().iter().enumerate() {
            for (sym_idx, targets) in s.transitions().iter().enumerate() {
                for &target in targets {
                    edges.push(Edge {
                        source,
                        target,
                        label: self.alphabet()[sym_idx].to_string(),
                    });
                }
            }
            for &target in s.epsilon_transitions() {
                edges.push(Edge {
                    source,
                    target,
                    label: "ε".to_owned(),
                });
            }
        }

        GraphDescription { nodes, edges }
    }
}
