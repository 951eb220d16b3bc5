//! Priority frontier with update-key semantics.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use crate::domain::SearchState;

#[derive(Debug, Clone, Copy)]
struct Entry {
    priority: f64,
    /// Position of the key's first insertion; breaks priority ties.
    seq: u64,
    state: SearchState,
}

// Sequence numbers are unique, so (priority, seq) identifies an entry.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// States awaiting expansion, each with exactly one priority.
///
/// Pushing a state that is already queued replaces its priority instead of
/// adding a second entry, so the frontier never holds a stale priority.
/// Both `push` and `pop` are `O(log n)`.
///
/// Among equal priorities, states pop in the order they were first pushed.
/// Updating a queued state keeps its place in that order; a state that was
/// popped and pushed again joins at the back.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    queue: BTreeSet<Entry>,
    index: HashMap<SearchState, (f64, u64)>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a state, or overwrite its priority if it is already queued.
    pub fn push(&mut self, state: SearchState, priority: f64) {
        let seq = match self.index.get(&state) {
            Some(&(old, seq)) => {
                self.queue.remove(&Entry {
                    priority: old,
                    seq,
                    state,
                });
                seq
            }
            None => {
                let seq = self.next_seq;
                self.next_seq += 1;
                seq
            }
        };

        self.queue.insert(Entry {
            priority,
            seq,
            state,
        });
        self.index.insert(state, (priority, seq));
    }

    /// Remove and return the state with the lowest priority.
    pub fn pop(&mut self) -> Option<SearchState> {
        self.pop_with_priority().map(|(state, _)| state)
    }

    /// Like [`pop`](Self::pop), also returning the priority.
    pub fn pop_with_priority(&mut self) -> Option<(SearchState, f64)> {
        let entry = self.queue.pop_first()?;
        self.index.remove(&entry.state);
        Some((entry.state, entry.priority))
    }

    /// The lowest-priority state, without removing it.
    pub fn peek(&self) -> Option<(SearchState, f64)> {
        self.queue.first().map(|e| (e.state, e.priority))
    }

    /// Current priority of a queued state.
    pub fn priority_of(&self, state: &SearchState) -> Option<f64> {
        self.index.get(state).map(|&(priority, _)| priority)
    }

    pub fn contains(&self, state: &SearchState) -> bool {
        self.index.contains_key(state)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Queued states with their priorities, in pop order.
    pub fn iter(&self) -> impl Iterator<Item = (SearchState, f64)> + '_ {
        self.queue.iter().map(|e| (e.state, e.priority))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{LineId, StationId};
    use proptest::prelude::*;

    /// Insertion-ordered map scanned for the minimum: the simplest possible
    /// frontier, used as a model.
    #[derive(Default)]
    struct LinearFrontier {
        entries: Vec<(SearchState, f64)>,
    }

    impl LinearFrontier {
        fn push(&mut self, state: SearchState, priority: f64) {
            match self.entries.iter_mut().find(|(s, _)| *s == state) {
                Some(entry) => entry.1 = priority,
                None => self.entries.push((state, priority)),
            }
        }

        fn pop(&mut self) -> Option<SearchState> {
            let mut best: Option<usize> = None;
            for (i, (_, p)) in self.entries.iter().enumerate() {
                if best.is_none_or(|b| *p < self.entries[b].1) {
                    best = Some(i);
                }
            }
            best.map(|i| self.entries.remove(i).0)
        }
    }

    #[derive(Debug, Clone)]
    enum Op {
        Push(u16, usize, u8),
        Pop,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (1u16..6, 0usize..3, 0u8..8).prop_map(|(s, l, p)| Op::Push(s, l, p)),
            1 => Just(Op::Pop),
        ]
    }

    proptest! {
        /// Same pop sequence as the linear model, ties included.
        #[test]
        fn matches_linear_model(ops in prop::collection::vec(op(), 0..60)) {
            let mut frontier = Frontier::new();
            let mut model = LinearFrontier::default();

            for op in ops {
                match op {
                    Op::Push(s, l, p) => {
                        let station = StationId::new(s).unwrap();
                        let state = SearchState::new(station, LineId::from_index(l));
                        frontier.push(state, f64::from(p));
                        model.push(state, f64::from(p));
                    }
                    Op::Pop => {
                        prop_assert_eq!(frontier.pop(), model.pop());
                    }
                }
                prop_assert_eq!(frontier.len(), model.entries.len());
            }

            while let Some(expected) = model.pop() {
                prop_assert_eq!(frontier.pop(), Some(expected));
            }
            prop_assert!(frontier.is_empty());
        }
    }
}
