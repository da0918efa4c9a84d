use bitvec::prelude::*;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};

/// An edge label. `Epsilon` is reserved and never part of an alphabet.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub enum Symbol {
    Epsilon,
    Char(char),
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Epsilon => write!(f, "ε"),
            Symbol::Char(ch) => write!(f, "{}", ch.escape_debug()),
        }
    }
}

/// An immutable set of NFA state ids, stored as a bitvec with its hash computed once.
///
/// Trailing zero bits are trimmed on construction, so two sets holding the same ids are
/// equal and hash the same no matter how large the automaton was when they were built.
/// This is what gives DFA states their identity during subset construction.
#[derive(Clone)]
pub struct StateSet {
    bv: BitVec<u8>,
    hash: u64,
}

impl StateSet {
    pub fn new(mut bv: BitVec<u8>) -> Self {
        let len = bv.last_one().map_or(0, |last| last + 1);
        bv.truncate(len);

        let mut hasher = DefaultHasher::new();
        bv.hash(&mut hasher);
        let hash = hasher.finish();

        Self { bv, hash }
    }

    pub fn empty() -> Self {
        Self::new(BitVec::new())
    }

    pub fn contains(&self, state_id: usize) -> bool {
        self.bv.get(state_id).is_some_and(|bit| *bit)
    }

    pub fn len(&self) -> usize {
        self.bv.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.bv.not_any()
    }

    /// Iterate over the member ids in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bv.iter_ones()
    }

    /// Returns true if any member of this set is marked in `states`
    pub fn intersects(&self, states: &BitSlice<u8>) -> bool {
        self.iter()
            .any(|state_id| states.get(state_id).is_some_and(|bit| *bit))
    }

    pub fn as_bits(&self) -> &BitSlice<u8> {
        &self.bv
    }
}

impl Default for StateSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl Hash for StateSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl PartialEq for StateSet {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.bv == other.bv
    }
}

impl Eq for StateSet {}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl From<usize> for StateSet {
    fn from(state_id: usize) -> Self {
        let mut bv = BitVec::repeat(false, state_id + 1);
        bv.set(state_id, true);
        Self::new(bv)
    }
}

impl From<&StateSet> for StateSet {
    fn from(set: &StateSet) -> Self {
        set.clone()
    }
}

impl FromIterator<usize> for StateSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut bv: BitVec<u8> = BitVec::new();

        for state_id in iter {
            if state_id >= bv.len() {
                bv.resize(state_id + 1, false);
            }
            bv.set(state_id, true);
        }

        Self::new(bv)
    }
}

impl Serialize for StateSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for state_id in self.iter() {
            seq.serialize_element(&state_id)?;
        }
        seq.end()
    }
}

/// Read-only view shared by the NFA and the DFA, used for inspection and export.
pub trait FA {
    fn get_num_states(&self) -> usize;
    fn get_start_state(&self) -> Option<usize>;
    fn get_alphabet(&self) -> &HashSet<char>;
    fn get_acceptor_states(&self) -> &BitVec<u8>;
    /// Human readable name of a state
    fn get_state_label(&self, state_id: usize) -> String;
    /// All outgoing edges of a state, sorted by symbol and then target
    fn get_state_transitions(&self, state_id: usize) -> Vec<(Symbol, usize)>;
}
