//! Portable JSON serialization for [Dfa] and [Nfa], independent of the table-format parser.
//!
//! The wire format is `{"initial_state": <string>, "transitions": [[state, symbol,
//! target-or-list], ...], "final_states": [...]}`. Internally this crate uses the literal
//! string `"ε"` for epsilon; on the wire, epsilon is the literal `"&"`, matching the format's
//! origin (`load_dfa`/`dump_dfa`/`load_nfa`/`dump_nfa` of the Python implementation this format
//! was carried over from).

use crate::dfa::Dfa;
use crate::error::AutomatonError;
use crate::nfa::Nfa;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

const WIRE_EPSILON: &str = "&";
const INTERNAL_EPSILON: &str = "ε";

#[derive(Debug, Serialize, Deserialize)]
struct DfaDoc {
    initial_state: String,
    transitions: Vec<(String, String, String)>,
    final_states: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum NfaTargets {
    One(String),
    Many(Vec<String>),
}

impl NfaTargets {
    fn into_vec(self) -> Vec<String> {
        match self {
            NfaTargets::One(s) => vec![s],
            NfaTargets::Many(v) => v,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct NfaDoc {
    initial_state: String,
    transitions: Vec<(String, String, NfaTargets)>,
    final_states: Vec<String>,
}

/// Loads a [Dfa] from a reader containing the JSON format described in the [module docs](self).
pub fn load_dfa(mut reader: impl Read) -> Result<Dfa, AutomatonError> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    let doc: DfaDoc = serde_json::from_str(&content)?;
    let transitions: Vec<((&str, &str), &str)> = doc
        .transitions
        .iter()
        .map(|(from, symbol, to)| ((from.as_str(), symbol.as_str()), to.as_str()))
        .collect();
    let final_states: Vec<&str> = doc.final_states.iter().map(String::as_str).collect();
    Dfa::create(&doc.initial_state, transitions, final_states)
}

/// Dumps `dfa` to a writer as the JSON format described in the [module docs](self).
pub fn dump_dfa(mut writer: impl Write, dfa: &Dfa) -> Result<(), AutomatonError> {
    let transitions = dfa
        .states()
        .iter()
        .flat_map(|state| {
            state
                .transitions()
                .iter()
                .enumerate()
                .filter_map(move |(sym_idx, target)| {
                    target.map(|t| {
                        (
                            state.name().to_owned(),
                            dfa.alphabet()[sym_idx].to_string(),
                            dfa.states()[t].name().to_owned(),
                        )
                    })
                })
        })
        .collect();
    let doc = DfaDoc {
        initial_state: dfa.initial_state().name().to_owned(),
        transitions,
        final_states: dfa
            .states()
            .iter()
            .filter(|s| s.is_accepting())
            .map(|s| s.name().to_owned())
            .collect(),
    };
    serde_json::to_writer_pretty(&mut writer, &doc).map_err(AutomatonError::from)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Loads a [Nfa] from a reader containing the JSON format described in the [module docs](self).
/// The wire literal `"&"` is read back as the internal epsilon sentinel `"ε"`.
pub fn load_nfa(mut reader: impl Read) -> Result<Nfa, AutomatonError> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    let doc: NfaDoc = serde_json::from_str(&content)?;
    let mut transitions: Vec<((String, String), Vec<String>)> = Vec::new();
    for (from, symbol, targets) in doc.transitions {
        let symbol = if symbol == WIRE_EPSILON {
            INTERNAL_EPSILON.to_owned()
        } else {
            symbol
        };
        transitions.push(((from, symbol), targets.into_vec()));
    }
    let transitions: Vec<((&str, &str), Vec<&str>)> = transitions
        .iter()
        .map(|((from, symbol), targets)| {
            (
                (from.as_str(), symbol.as_str()),
                targets.iter().map(String::as_str).collect(),
            )
        })
        .collect();
    let final_states: Vec<&str> = doc.final_states.iter().map(String::as_str).collect();
    Nfa::create(&doc.initial_state, transitions, final_states)
}

/// Dumps `nfa` to a writer as the JSON format described in the [module docs](self). The internal
/// epsilon sentinel `"ε"` is written as the wire literal `"&"`.
pub fn dump_nfa(mut writer: impl Write, nfa: &Nfa) -> Result<(), AutomatonError> {
    let mut transitions: Vec<(String, String, NfaTargets)> = Vec::new();
    for state in nfa.states() {
        for (sym_idx, targets) in state.transitions().iter().enumerate() {
            if targets.is_empty() {
                continue;
            }
            let names = targets
                .iter()
                .map(|&t| nfa.states()[t].name().to_owned())
                .collect();
            transitions.push((
                state.name().to_owned(),
                nfa.alphabet()[sym_idx].to_string(),
                NfaTargets::Many(names),
            ));
        }
        if !state.epsilon_transitions().is_empty() {
            let names = state
                .epsilon_transitions()
                .iter()
                .map(|&t| nfa.states()[t].name().to_owned())
                .collect();
            transitions.push((
                state.name().to_owned(),
                WIRE_EPSILON.to_owned(),
                NfaTargets::Many(names),
            ));
        }
    }
    let doc = NfaDoc {
        initial_state: nfa.initial_state().name().to_owned(),
        transitions,
        final_states: nfa
            .states()
            .iter()
            .filter(|s| s.is_accepting())
            .map(|s| s.name().to_owned())
            .collect(),
    };
    serde_json::to_writer_pretty(&mut writer, &doc).map_err(AutomatonError::from)?;
    writer.write_all(b"\n")?;
    Ok(())
}
