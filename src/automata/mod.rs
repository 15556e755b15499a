//! # Finite automata over sparse transition maps
//!
//! Deterministic transitions are `state -> symbol -> state`; a missing entry
//! is an implicit sink and the run "crashes" (no final state). Weighted and
//! probabilistic transitions are `state -> symbol -> {state: weight}`, and a
//! weighted state set is a [`SparseVector`].
//!
//! Inputs are any iterator of symbols. Sparse time-indexed inputs
//! (`{time: symbol}`) are replayed in time order through [`timeline`].

use std::borrow::Borrow;
use std::collections::HashMap;

use crate::semiring::{Semiring, Standard};
use crate::sparse::{SparseKey, SparseVector};

pub type DfaTransitions<Q, A> = HashMap<Q, HashMap<A, Q>>;

pub type NfaTransitions<Q, A, W = f64> = HashMap<Q, HashMap<A, HashMap<Q, W>>>;

/// One deterministic transition. `None` when `δ(state, symbol)` is undefined.
pub fn dfa_step<Q, A>(state: &Q, symbol: &A, transitions: &DfaTransitions<Q, A>) -> Option<Q>
where
    Q: SparseKey,
    A: SparseKey,
{
    transitions.get(state)?.get(symbol).cloned()
}

/// One probabilistic transition: weights multiply along edges and add up at
/// each target state.
pub fn nfa_step<Q, A>(
    states: &SparseVector<Q, f64>,
    symbol: &A,
    transitions: &NfaTransitions<Q, A>,
) -> SparseVector<Q, f64>
where
    Q: SparseKey,
    A: SparseKey,
{
    weighted_step(states, symbol, transitions, &Standard)
}

/// [`nfa_step`] over an arbitrary semiring, e.g. [`Viterbi`](crate::semiring::Viterbi)
/// for the most likely path or [`Boolean`](crate::semiring::Boolean) for plain
/// nondeterminism.
pub fn weighted_step<Q, A, S>(
    states: &SparseVector<Q, S::Value>,
    symbol: &A,
    transitions: &NfaTransitions<Q, A, S::Value>,
    semiring: &S,
) -> SparseVector<Q, S::Value>
where
    Q: SparseKey,
    A: SparseKey,
    S: Semiring,
{
    let mut next: SparseVector<Q, S::Value> = HashMap::new();
    for (state, weight) in states.iter() {
        let Some(targets) = transitions.get(state).and_then(|by_symbol| by_symbol.get(symbol))
        else {
            continue;
        };
        for (target, edge) in targets.iter() {
            let term = semiring.mul(weight, edge);
            match next.get_mut(target) {
                Some(total) => *total = semiring.add(total, &term),
                None => {
                    next.insert(target.clone(), term);
                }
            }
        }
    }
    next.retain(|_, weight| !semiring.is_zero(weight));
    next
}

/// Runs a DFA to completion. `None` if any transition was undefined.
pub fn simulate_dfa<Q, A, I>(start: Q, input: I, transitions: &DfaTransitions<Q, A>) -> Option<Q>
where
    Q: SparseKey,
    A: SparseKey,
    I: IntoIterator,
    I::Item: Borrow<A>,
{
    input
        .into_iter()
        .try_fold(start, |state, symbol| dfa_step(&state, symbol.borrow(), transitions))
}

/// Runs a probabilistic automaton, stopping early once no state carries weight.
pub fn simulate_nfa<Q, A, I>(
    start: SparseVector<Q, f64>,
    input: I,
    transitions: &NfaTransitions<Q, A>,
) -> SparseVector<Q, f64>
where
    Q: SparseKey,
    A: SparseKey,
    I: IntoIterator,
    I::Item: Borrow<A>,
{
    simulate_weighted(start, input, transitions, &Standard)
}

pub fn simulate_weighted<Q, A, S, I>(
    start: SparseVector<Q, S::Value>,
    input: I,
    transitions: &NfaTransitions<Q, A, S::Value>,
    semiring: &S,
) -> SparseVector<Q, S::Value>
where
    Q: SparseKey,
    A: SparseKey,
    S: Semiring,
    I: IntoIterator,
    I::Item: Borrow<A>,
{
    let mut current = start;
    for symbol in input {
        if current.is_empty() {
            break;
        }
        current = weighted_step(&current, symbol.borrow(), transitions, semiring);
    }
    current
}

/// Symbols of a time-indexed input in time order. The iterator is cheap to
/// clone, so a timeline can be replayed.
pub fn timeline<T: Ord, A>(sequence: &HashMap<T, A>) -> impl Iterator<Item = &A> + Clone {
    let mut entries: Vec<(&T, &A)> = sequence.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries.into_iter().map(|(_, symbol)| symbol)
}

/// Step-by-step DFA execution, yielding the start state and then every state
/// reached. Iteration ends when the input is exhausted or the machine crashes;
/// [`DfaRun::crashed`] tells the two apart.
pub struct DfaRun<'a, Q, A, I> {
    transitions: &'a DfaTransitions<Q, A>,
    input: I,
    state: Option<Q>,
    started: bool,
    crashed: bool,
}

impl<'a, Q, A, I> DfaRun<'a, Q, A, I>
where
    I: Iterator,
{
    pub fn new<T>(start: Q, input: T, transitions: &'a DfaTransitions<Q, A>) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            transitions,
            input: input.into_iter(),
            state: Some(start),
            started: false,
            crashed: false,
        }
    }

    pub fn crashed(&self) -> bool {
        self.crashed
    }
}

impl<Q, A, I> Iterator for DfaRun<'_, Q, A, I>
where
    Q: SparseKey,
    A: SparseKey,
    I: Iterator,
    I::Item: Borrow<A>,
{
    type Item = Q;

    fn next(&mut self) -> Option<Q> {
        if !self.started {
            self.started = true;
            return self.state.clone();
        }
        let current = self.state.as_ref()?;
        let symbol = self.input.next()?;
        let next = dfa_step(current, symbol.borrow(), self.transitions);
        self.crashed = next.is_none();
        self.state = next.clone();
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semiring::{Boolean, Viterbi};
    use approx::assert_relative_eq;

    /// Binary numbers read most significant bit first; state = value mod 3.
    fn mod_three() -> DfaTransitions<u8, char> {
        HashMap::from([
            (0, HashMap::from([('0', 0), ('1', 1)])),
            (1, HashMap::from([('0', 2), ('1', 0)])),
            (2, HashMap::from([('0', 1), ('1', 2)])),
        ])
    }

    #[test]
    fn test_dfa_step() {
        let dfa = mod_three();
        assert_eq!(dfa_step(&1, &'0', &dfa), Some(2));
        assert_eq!(dfa_step(&1, &'x', &dfa), None);
        assert_eq!(dfa_step(&9, &'0', &dfa), None);
    }

    #[test]
    fn test_simulate_dfa() {
        let dfa = mod_three();
        // 110 = 6
        assert_eq!(simulate_dfa(0, "110".chars(), &dfa), Some(0));
        // 1011 = 11
        assert_eq!(simulate_dfa(0, "1011".chars(), &dfa), Some(2));
        assert_eq!(simulate_dfa(0, "".chars(), &dfa), Some(0));
        assert_eq!(simulate_dfa(0, ['1', '2', '1'].iter(), &dfa), None);
    }

    #[test]
    fn test_simulate_dfa_on_timeline() {
        let dfa = mod_three();
        let sparse_input = HashMap::from([(30, '1'), (10, '1'), (20, '0')]);
        let replay = timeline(&sparse_input);
        // 1 0 1 = 5
        assert_eq!(simulate_dfa(0, replay.clone(), &dfa), Some(2));
        assert_eq!(replay.copied().collect::<String>(), "101");
    }

    #[test]
    fn test_dfa_run_trace() {
        let dfa = mod_three();
        let mut run = DfaRun::new(0, "101".chars(), &dfa);
        let visited: Vec<u8> = run.by_ref().collect();
        assert_eq!(visited, vec![0, 1, 2, 2]);
        assert!(!run.crashed());

        let mut broken = DfaRun::new(0, "1x1".chars(), &dfa);
        let visited: Vec<u8> = broken.by_ref().collect();
        assert_eq!(visited, vec![0, 1]);
        assert!(broken.crashed());
    }

    fn noisy_channel() -> NfaTransitions<&'static str, char> {
        HashMap::from([
            (
                "s",
                HashMap::from([('a', HashMap::from([("s", 0.5), ("t", 0.5)]))]),
            ),
            ("t", HashMap::from([('a', HashMap::from([("t", 1.0)]))])),
        ])
    }

    #[test]
    fn test_nfa_step_accumulates() {
        let nfa = noisy_channel();
        let start = HashMap::from([("s", 1.0)]);
        let one = nfa_step(&start, &'a', &nfa);
        assert_relative_eq!(one["s"], 0.5);
        assert_relative_eq!(one["t"], 0.5);
        let two = nfa_step(&one, &'a', &nfa);
        assert_relative_eq!(two["s"], 0.25);
        assert_relative_eq!(two["t"], 0.75);
    }

    #[test]
    fn test_simulate_nfa_early_exit() {
        let nfa = noisy_channel();
        let start = HashMap::from([("s", 1.0)]);
        let end = simulate_nfa(start.clone(), "aaa".chars(), &nfa);
        assert_relative_eq!(end["t"], 0.875);

        let dead = simulate_nfa(start, "ba".chars(), &nfa);
        assert!(dead.is_empty());
    }

    #[test]
    fn test_weighted_step_viterbi_and_boolean() {
        let nfa = noisy_channel();
        let start = HashMap::from([("s", 1.0)]);
        let best = simulate_weighted(start, "aa".chars(), &nfa, &Viterbi);
        // most likely path into t has probability 0.5
        assert_relative_eq!(best["t"], 0.5);
        assert_relative_eq!(best["s"], 0.25);

        let reachable: NfaTransitions<u8, char, bool> = HashMap::from([
            (0, HashMap::from([('x', HashMap::from([(1, true), (2, true)]))])),
            (1, HashMap::from([('x', HashMap::from([(3, true)]))])),
        ]);
        let start = HashMap::from([(0, true)]);
        let after = simulate_weighted(start, "xx".chars(), &reachable, &Boolean);
        assert_eq!(after, HashMap::from([(3, true)]));
    }
}
