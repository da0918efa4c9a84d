/* Perform subset construction to convert an NFA into a DFA. Each DFA state stands for the
 * set of NFA states the NFA could be in, and is identified by that set's content. */

use crate::fa::{StateSet, Symbol, FA};
use crate::nfa::NFA;
use bitvec::prelude::*;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, trace};

#[derive(Debug, Clone)]
pub struct DFA {
    states: Vec<DFAState>,
    start_state: usize,
    accept_states: BitVec<u8>,
    alphabet: HashSet<char>,
    state_index: HashMap<StateSet, usize>, // Mapping from nfa state set to DFA state
}

#[derive(Debug, Clone)]
pub struct DFAState {
    nfa_states: StateSet,
    label: String,
    transitions: HashMap<char, usize>,
}

/// Where a walk over the DFA stopped: how many characters were consumed before the first
/// missing transition, and the state reached at that point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DfaRun {
    pub consumed: usize,
    pub state: usize,
    pub accepted: bool,
}

impl FA for DFA {
    fn get_num_states(&self) -> usize {
        self.states.len()
    }

    fn get_start_state(&self) -> Option<usize> {
        Some(self.start_state)
    }

    fn get_alphabet(&self) -> &HashSet<char> {
        &self.alphabet
    }

    fn get_acceptor_states(&self) -> &BitVec<u8> {
        &self.accept_states
    }

    fn get_state_label(&self, state_id: usize) -> String {
        match self.states.get(state_id) {
            Some(state) => state.label.clone(),
            None => format!("#{state_id}"),
        }
    }

    fn get_state_transitions(&self, state_id: usize) -> Vec<(Symbol, usize)> {
        let mut transition_list: Vec<(Symbol, usize)> = Vec::new();

        if let Some(state) = self.states.get(state_id) {
            for (ch, target) in &state.transitions {
                transition_list.push((Symbol::Char(*ch), *target));
            }
        }

        transition_list.sort();
        transition_list
    }
}

impl DFAState {
    fn new(nfa_states: StateSet, label: String) -> Self {
        DFAState {
            nfa_states,
            label,
            transitions: HashMap::new(),
        }
    }

    /// The set of NFA states this DFA state stands for
    pub fn get_nfa_states(&self) -> &StateSet {
        &self.nfa_states
    }

    pub fn get_label(&self) -> &str {
        &self.label
    }

    /// Get a list of all outgoing transitions for the given state
    pub fn get_transitions(&self) -> &HashMap<char, usize> {
        &self.transitions
    }
}

impl DFA {
    fn new() -> Self {
        DFA {
            states: Vec::new(),
            start_state: 0,
            accept_states: BitVec::new(),
            alphabet: HashSet::new(),
            state_index: HashMap::new(),
        }
    }

    fn add_state(&mut self, nfa_states: StateSet, label: String, accepting: bool) -> usize {
        let state_id = self.states.len();
        self.state_index.insert(nfa_states.clone(), state_id);
        self.states.push(DFAState::new(nfa_states, label));
        self.accept_states.push(accepting);
        state_id
    }

    /// Returns a reference to the DFA state whose id is provided
    pub fn get_state(&self, id: usize) -> Option<&DFAState> {
        self.states.get(id)
    }

    /// Find the DFA state standing for exactly this set of NFA states
    pub fn find_state(&self, nfa_states: &StateSet) -> Option<usize> {
        self.state_index.get(nfa_states).copied()
    }

    pub fn is_accepting(&self, state_id: usize) -> bool {
        self.accept_states.get(state_id).is_some_and(|bit| *bit)
    }

    /// The transition out of `state_id` on `ch`. `None` means the DFA rejects.
    pub fn next_state(&self, state_id: usize, ch: char) -> Option<usize> {
        self.states
            .get(state_id)
            .and_then(|state| state.transitions.get(&ch))
            .copied()
    }

    /// Follow transitions from the start state over `input` for as long as they are defined.
    pub fn walk(&self, input: &[char]) -> DfaRun {
        let mut state = self.start_state;
        let mut consumed = 0;

        for &ch in input {
            match self.next_state(state, ch) {
                Some(next) => {
                    state = next;
                    consumed += 1;
                }
                None => break,
            }
        }

        DfaRun {
            consumed,
            state,
            accepted: self.is_accepting(state),
        }
    }

    /// Check whether the whole of `input` is in the language of this DFA
    pub fn accepts(&self, input: &str) -> bool {
        let mut state = self.start_state;

        for ch in input.chars() {
            match self.next_state(state, ch) {
                Some(next) => state = next,
                None => return false,
            }
        }

        self.is_accepting(state)
    }
}

fn subset_label(nfa: &NFA, nfa_states: &StateSet) -> String {
    let labels: Vec<String> = nfa_states
        .iter()
        .map(|state_id| nfa.get_state_label(state_id))
        .collect();

    format!("{{{}}}", labels.join(", "))
}

///  Apply the subset construction algorithm on an NFA to build a DFA. The alphabet is visited
///  in sorted order, so the numbering of DFA states is deterministic.
pub fn construct_dfa(nfa: &NFA) -> DFA {
    let mut result = DFA::new(); // Create new DFA
    result.alphabet = nfa.get_alphabet().clone(); // DFA has same alphabet as NFA

    let mut alphabet: Vec<char> = nfa.get_alphabet().iter().copied().collect();
    alphabet.sort();

    let nfa_accepts = nfa.get_acceptor_states();

    let q0 = match nfa.get_start_state() {
        Some(n0) => nfa.epsilon_closure(n0),
        None => StateSet::empty(),
    };

    let label = subset_label(nfa, &q0);
    let accepting = q0.intersects(nfa_accepts);
    let d0 = result.add_state(q0, label, accepting);
    result.start_state = d0;

    let mut work_list: VecDeque<usize> = VecDeque::new();
    work_list.push_back(d0);

    while let Some(dq) = work_list.pop_front() {
        let q = result.states[dq].nfa_states.clone();

        for &c in &alphabet {
            let end_states = nfa.delta(&q, Symbol::Char(c));
            if end_states.is_empty() {
                continue;
            }

            let t = nfa.epsilon_closure(end_states);

            let dt = match result.find_state(&t) {
                Some(existing) => existing,
                None => {
                    let label = subset_label(nfa, &t);
                    let accepting = t.intersects(nfa_accepts);
                    trace!(state = %label, accepting, "discovered dfa state");

                    let dt = result.add_state(t, label, accepting);
                    work_list.push_back(dt);
                    dt
                }
            };

            result.states[dq].transitions.insert(c, dt);
        }
    }

    debug!(
        nfa_states = nfa.get_num_states(),
        dfa_states = result.get_num_states(),
        accepting = result.accept_states.count_ones(),
        "subset construction finished"
    );

    result
}
