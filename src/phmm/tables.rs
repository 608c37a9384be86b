use crate::{
    data::Alphabet,
    phmm::{MatchEmissions, PhmmState, PhmmStateArray, StateLabel, TransitionProbabilities},
};
use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

/// Converts a probability to natural log space. Probability zero becomes
/// negative infinity, so the corresponding transition or emission never wins
/// a maximization.
#[inline]
#[must_use]
pub(crate) fn log_prob(prob: f64) -> f64 {
    if prob > 0.0 { prob.ln() } else { f64::NEG_INFINITY }
}

/// The state pairs whose transition weights are needed to fill the cells of
/// one model position, arranged as `[into][from]`:
/// ```text
/// [[pM->M, pI->M, pD->M]
///  [ M->I,  I->I,  D->I]
///  [pM->D, pI->D, pD->D]]
/// ```
/// where `p` denotes the previous position. The previous position of position
/// 1 is position N, whose insert slot is the random state. The insert slot of
/// position N is also the random state.
pub(crate) fn column_edges(position: usize, model_size: usize) -> [[(StateLabel, StateLabel); 3]; 3] {
    use StateLabel::*;

    let (prev_m, prev_i, prev_d) = if position == 1 {
        (Match(model_size), Random, Delete(model_size))
    } else {
        (Match(position - 1), Insert(position - 1), Delete(position - 1))
    };
    let (m, i, d) = (
        Match(position),
        if position == model_size { Random } else { Insert(position) },
        Delete(position),
    );

    [
        [(prev_m, m), (prev_i, m), (prev_d, m)],
        [(m, i), (i, i), (d, i)],
        [(prev_m, d), (prev_i, d), (prev_d, d)],
    ]
}

/// Whether the decoder ever reads the transition `from -> to` in a model with
/// `model_size` positions. Both states must exist in the model.
pub(crate) fn is_supported_edge(from: StateLabel, to: StateLabel, model_size: usize) -> bool {
    // Delete(1) is only entered from the random state of the same column
    if to == StateLabel::Delete(1) && from != StateLabel::Random {
        return false;
    }

    // The random state fills the insert slot of the last position
    let position = to.position().unwrap_or(model_size);

    column_edges(position, model_size)
        .iter()
        .flatten()
        .any(|&(f, t)| f == from && t == to)
}

/// The natural-log transition weights used to fill the cells of a single
/// model position.
///
/// See [`ColumnParams::entering_match`] and its siblings for the order of the
/// predecessors. For the last position, the insert slot is the random state.
#[derive(Clone, PartialEq, Debug)]
pub struct ColumnParams {
    weights: [[f64; 3]; 3],
}

impl ColumnParams {
    /// Builds the weights of `position` (1-based) from the raw transition
    /// probabilities. Absent and zero entries become negative infinity.
    #[must_use]
    pub fn build(transitions: &TransitionProbabilities, position: usize, model_size: usize) -> Self {
        let edges = column_edges(position, model_size);
        Self {
            weights: edges.map(|row| row.map(|(from, to)| log_prob(transitions.get(from, to)))),
        }
    }

    /// Weights for entering the match state from the previous position's
    /// match, insert (or random, for position 1) and delete states.
    #[inline]
    #[must_use]
    pub fn entering_match(&self) -> [f64; 3] {
        self.weights[usize::from(PhmmState::Match)]
    }

    /// Weights for entering the insert state (the random state, for the last
    /// position) from this position's match, insert and delete states.
    #[inline]
    #[must_use]
    pub fn entering_insert(&self) -> [f64; 3] {
        self.weights[usize::from(PhmmState::Insert)]
    }

    /// Weights for entering the delete state from the previous position's
    /// match, insert (or random, for position 1) and delete states.
    #[inline]
    #[must_use]
    pub fn entering_delete(&self) -> [f64; 3] {
        self.weights[usize::from(PhmmState::Delete)]
    }

    /// The weight of the transition from slot `from` into slot `to`.
    #[inline]
    #[must_use]
    pub(crate) fn get(&self, from: PhmmState, to: PhmmState) -> f64 {
        self.weights[usize::from(to)][usize::from(from)]
    }

    /// The weights into slot `to` as an array indexed by the source slot.
    #[inline]
    #[must_use]
    pub(crate) fn entering(&self, to: PhmmState) -> PhmmStateArray<f64> {
        PhmmStateArray::new(self.weights[usize::from(to)])
    }
}

/// Log-odds emission scores of the match states for the symbols of one query
/// alphabet.
///
/// The score of symbol `s` in `Match(p)` is `ln(P(s | Match(p)) / (1/K))`
/// where `K` is the number of symbols in the alphabet. A symbol that the match
/// state never emits scores negative infinity.
#[derive(Clone, PartialEq, Debug)]
pub struct EmissionScores {
    alphabet:   Alphabet,
    model_size: usize,
    /// One row per symbol, one column per position
    scores:     Vec<f64>,
}

impl EmissionScores {
    /// Computes the scores of every match state for every symbol in
    /// `alphabet`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn build(emissions: &MatchEmissions, alphabet: Alphabet) -> Self {
        let model_size = emissions.len();
        let background = 1.0 / alphabet.len() as f64;

        let mut scores = Vec::with_capacity(alphabet.len() * model_size);
        for &symbol in alphabet.symbols() {
            scores.extend((1..=model_size).map(|p| log_prob(emissions.get(p, symbol) / background)));
        }

        Self {
            alphabet,
            model_size,
            scores,
        }
    }

    /// The alphabet these scores were computed for.
    #[inline]
    #[must_use]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The score of `symbol` in `Match(position)`, or `None` if the symbol is
    /// not in the alphabet or the position is not in the model.
    #[must_use]
    pub fn score(&self, position: usize, symbol: u8) -> Option<f64> {
        if !self.alphabet.contains(symbol) || !(1..=self.model_size).contains(&position) {
            return None;
        }
        Some(self.for_symbol_index(self.alphabet.to_index(symbol))[position - 1])
    }

    /// The scores of every match state, in position order, for the symbol with
    /// rank `index` in the alphabet.
    #[inline]
    #[must_use]
    pub(crate) fn for_symbol_index(&self, index: usize) -> &[f64] {
        let start = index * self.model_size;
        &self.scores[start..start + self.model_size]
    }
}

/// The number of alphabets a model caches emission scores for by default.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// A read-mostly cache of [`EmissionScores`] keyed by alphabet. Entries are
/// never modified once inserted.
///
/// The cache holds at most `capacity` alphabets. Inserting into a full cache
/// drops every existing entry first, and a capacity of 0 disables caching.
pub(crate) struct EmissionCache {
    map:      RwLock<HashMap<Alphabet, Arc<EmissionScores>>>,
    capacity: usize,
}

impl EmissionCache {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            map: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Retrieves the scores for `alphabet`, building and storing them first if
    /// needed.
    pub(crate) fn get_or_build(&self, emissions: &MatchEmissions, alphabet: &Alphabet) -> Arc<EmissionScores> {
        // Entries are complete once inserted, so poisoning is ignored
        if let Some(scores) = self.map.read().unwrap_or_else(PoisonError::into_inner).get(alphabet) {
            tracing::trace!(symbols = alphabet.len(), "emission score cache hit");
            return Arc::clone(scores);
        }

        tracing::debug!(symbols = alphabet.len(), "emission score cache miss");
        let scores = Arc::new(EmissionScores::build(emissions, alphabet.clone()));
        if self.capacity == 0 {
            return scores;
        }

        let mut cache = self.map.write().unwrap_or_else(PoisonError::into_inner);
        if cache.len() >= self.capacity && !cache.contains_key(alphabet) {
            tracing::debug!(evicted = cache.len(), "emission score cache full");
            cache.clear();
        }
        Arc::clone(cache.entry(alphabet.clone()).or_insert(scores))
    }

    /// The number of alphabets with cached scores.
    pub(crate) fn len(&self) -> usize {
        self.map.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub(crate) fn clear(&self) {
        self.map.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl Default for EmissionCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl std::fmt::Debug for EmissionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmissionCache")
            .field("alphabets", &self.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
