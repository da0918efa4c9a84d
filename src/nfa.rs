use bitvec::prelude::*;
use std::collections::{HashMap, HashSet, VecDeque};

use crate::fa::{StateSet, Symbol, FA};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NFAState {
    id: usize,
    label: String,
    transitions: HashMap<Symbol, HashSet<usize>>,
}

/// A nondeterministic automaton whose states are registered under arbitrary labels.
///
/// Every label is interned to a dense id the first time it is seen, whether through
/// [`NFA::add_state`], [`NFA::set_start_state`], [`NFA::add_accept_state`] or either end of
/// [`NFA::add_transition`]. None of the builder operations can fail.
#[derive(Debug, Clone, Default)]
pub struct NFA {
    states: Vec<NFAState>,
    state_ids: HashMap<String, usize>,
    start_state: Option<usize>,
    accept_states: BitVec<u8>,
    alphabet: HashSet<char>,
}

impl FA for NFA {
    fn get_num_states(&self) -> usize {
        self.states.len()
    }

    fn get_start_state(&self) -> Option<usize> {
        self.start_state
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
            for (symbol, targets) in &state.transitions {
                for target in targets {
                    transition_list.push((*symbol, *target));
                }
            }
        }

        transition_list.sort();
        transition_list
    }
}

impl NFAState {
    fn new(id: usize, label: String) -> Self {
        NFAState {
            id,
            label,
            transitions: HashMap::new(),
        }
    }

    fn add_transition(&mut self, symbol: Symbol, to: usize) {
        self.transitions.entry(symbol).or_default().insert(to);
    }

    pub fn get_id(&self) -> usize {
        self.id
    }

    pub fn get_label(&self) -> &str {
        &self.label
    }

    pub fn get_transitions(&self) -> &HashMap<Symbol, HashSet<usize>> {
        &self.transitions
    }
}

impl NFA {
    pub fn new() -> Self {
        NFA::default()
    }

    /// Register a state under `label`, returning its id. Registering a label twice returns
    /// the id it was first given.
    pub fn add_state(&mut self, label: &str) -> usize {
        if let Some(&state_id) = self.state_ids.get(label) {
            return state_id;
        }

        let state_id = self.states.len();
        self.states.push(NFAState::new(state_id, label.to_string()));
        self.state_ids.insert(label.to_string(), state_id);
        self.accept_states.push(false);
        state_id
    }

    /// Add a symbol to the alphabet. Epsilon is never added.
    pub fn add_symbol(&mut self, symbol: Symbol) {
        if let Symbol::Char(ch) = symbol {
            self.alphabet.insert(ch);
        }
    }

    pub fn set_start_state(&mut self, label: &str) -> usize {
        let state_id = self.add_state(label);
        self.start_state = Some(state_id);
        state_id
    }

    pub fn add_accept_state(&mut self, label: &str) -> usize {
        let state_id = self.add_state(label);
        self.accept_states.set(state_id, true);
        state_id
    }

    pub fn add_transition(&mut self, from: &str, symbol: Symbol, to: &str) {
        self.add_symbol(symbol);

        let from = self.add_state(from);
        let to = self.add_state(to);

        self.states[from].add_transition(symbol, to);
    }

    pub fn get_state(&self, id: usize) -> Option<&NFAState> {
        self.states.get(id)
    }

    /// Look up the id a label was registered under
    pub fn get_state_id(&self, label: &str) -> Option<usize> {
        self.state_ids.get(label).copied()
    }

    pub fn is_accept_state(&self, state_id: usize) -> bool {
        self.accept_states.get(state_id).is_some_and(|bit| *bit)
    }

    /// Smallest superset of `states` closed under epsilon transitions. Takes a single state
    /// id or a whole [`StateSet`].
    pub fn epsilon_closure(&self, states: impl Into<StateSet>) -> StateSet {
        let states = states.into();

        let width = self.states.len().max(states.as_bits().len());
        let mut closure: BitVec<u8> = BitVec::repeat(false, width);
        let mut work_list: VecDeque<usize> = VecDeque::new();

        for state_id in states.iter() {
            closure.set(state_id, true);
            work_list.push_back(state_id);
        }

        while let Some(state_id) = work_list.pop_front() {
            let Some(state) = self.states.get(state_id) else {
                continue;
            };

            if let Some(targets) = state.transitions.get(&Symbol::Epsilon) {
                for &target in targets {
                    if !closure[target] {
                        closure.set(target, true);
                        work_list.push_back(target);
                    }
                }
            }
        }

        StateSet::new(closure)
    }

    /// The move operation: every state reachable from a member of `states` by exactly one
    /// `symbol` edge. Epsilon edges are not followed afterwards.
    pub fn delta(&self, states: &StateSet, symbol: Symbol) -> StateSet {
        let mut result: BitVec<u8> = BitVec::repeat(false, self.states.len());

        for state_id in states.iter() {
            let Some(state) = self.states.get(state_id) else {
                continue;
            };

            if let Some(targets) = state.transitions.get(&symbol) {
                for &target in targets {
                    result.set(target, true);
                }
            }
        }

        StateSet::new(result)
    }

    /// Simulate the automaton on `input` by tracking the whole set of live states
    pub fn accepts(&self, input: &str) -> bool {
        let Some(start_state) = self.start_state else {
            return false;
        };

        let mut current = self.epsilon_closure(start_state);

        for ch in input.chars() {
            current = self.epsilon_closure(self.delta(&current, Symbol::Char(ch)));
            if current.is_empty() {
                return false;
            }
        }

        current.intersects(&self.accept_states)
    }
}
