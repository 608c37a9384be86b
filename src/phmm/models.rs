use crate::{
    data::Alphabet,
    phmm::{
        ColumnParams, EmissionScores, ModelError, PhmmError, StateLabel,
        tables::{EmissionCache, is_supported_edge},
    },
};
use std::{collections::BTreeMap, sync::Arc};

/// The emission probabilities of the match states, keyed by position and then
/// by symbol.
///
/// Symbols are stored in upper case, matching cleaned query sequences. A
/// symbol with no entry has probability zero. The insert, delete and random
/// states do not have emission tables: they emit uniformly over the query
/// alphabet.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchEmissions(BTreeMap<usize, BTreeMap<u8, f64>>);

impl MatchEmissions {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the probability that `Match(position)` emits `symbol`, returning
    /// the previous value if there was one.
    #[inline]
    pub fn insert(&mut self, position: usize, symbol: u8, prob: f64) -> Option<f64> {
        self.0
            .entry(position)
            .or_default()
            .insert(symbol.to_ascii_uppercase(), prob)
    }

    /// Builder form of [`insert`](MatchEmissions::insert).
    #[inline]
    #[must_use]
    pub fn with(mut self, position: usize, symbol: u8, prob: f64) -> Self {
        self.insert(position, symbol, prob);
        self
    }

    /// Adds a row for `position` holding the given emissions. A row may be
    /// empty, in which case the match state never emits anything.
    pub fn insert_row(&mut self, position: usize, row: impl IntoIterator<Item = (u8, f64)>) {
        let entry = self.0.entry(position).or_default();
        for (symbol, prob) in row {
            entry.insert(symbol.to_ascii_uppercase(), prob);
        }
    }

    /// The probability that `Match(position)` emits `symbol`. Lookups are
    /// exact: a lower case symbol never matches a stored upper case entry.
    #[inline]
    #[must_use]
    pub fn get(&self, position: usize, symbol: u8) -> f64 {
        self.0
            .get(&position)
            .and_then(|row| row.get(&symbol))
            .copied()
            .unwrap_or(0.0)
    }

    /// The emission row of `Match(position)`, if present.
    #[inline]
    #[must_use]
    pub fn row(&self, position: usize) -> Option<&BTreeMap<u8, f64>> {
        self.0.get(&position)
    }

    /// The number of emission rows, which is the size of the model.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the rows in position order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (usize, &BTreeMap<u8, f64>)> {
        self.0.iter().map(|(&p, row)| (p, row))
    }
}

impl FromIterator<(usize, u8, f64)> for MatchEmissions {
    fn from_iter<I: IntoIterator<Item = (usize, u8, f64)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (position, symbol, prob) in iter {
            out.insert(position, symbol, prob);
        }
        out
    }
}

/// The transition probabilities of the model, keyed by source state and then
/// by destination state.
///
/// Rows need not sum to one. An absent entry has probability zero and the
/// transition is never taken.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionProbabilities(BTreeMap<StateLabel, BTreeMap<StateLabel, f64>>);

impl TransitionProbabilities {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the probability of `from -> to`, returning the previous value if
    /// there was one.
    #[inline]
    pub fn insert(&mut self, from: StateLabel, to: StateLabel, prob: f64) -> Option<f64> {
        self.0.entry(from).or_default().insert(to, prob)
    }

    /// Builder form of [`insert`](TransitionProbabilities::insert).
    #[inline]
    #[must_use]
    pub fn with(mut self, from: StateLabel, to: StateLabel, prob: f64) -> Self {
        self.insert(from, to, prob);
        self
    }

    /// Builds a table from textual labels such as `("R", "M1", 0.05)`.
    ///
    /// ## Errors
    ///
    /// Returns [`ModelError::InvalidLabel`] for the first label that does not
    /// parse.
    pub fn parse_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str, f64)>) -> Result<Self, PhmmError> {
        let mut out = Self::new();
        for (from, to, prob) in entries {
            out.insert(from.parse()?, to.parse()?, prob);
        }
        Ok(out)
    }

    /// The probability of `from -> to`, or zero if it is absent.
    #[inline]
    #[must_use]
    pub fn get(&self, from: StateLabel, to: StateLabel) -> f64 {
        self.0
            .get(&from)
            .and_then(|row| row.get(&to))
            .copied()
            .unwrap_or(0.0)
    }

    /// The transitions out of `from`, if any were given.
    #[inline]
    #[must_use]
    pub fn row(&self, from: StateLabel) -> Option<&BTreeMap<StateLabel, f64>> {
        self.0.get(&from)
    }

    /// Iterates over every entry as `(from, to, prob)`.
    pub fn iter(&self) -> impl Iterator<Item = (StateLabel, StateLabel, f64)> + '_ {
        self.0
            .iter()
            .flat_map(|(&from, row)| row.iter().map(move |(&to, &prob)| (from, to, prob)))
    }

    /// The number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<(StateLabel, StateLabel, f64)> for TransitionProbabilities {
    fn from_iter<I: IntoIterator<Item = (StateLabel, StateLabel, f64)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (from, to, prob) in iter {
            out.insert(from, to, prob);
        }
        out
    }
}

/// A validated profile HMM.
///
/// The model holds the raw probability tables it was built from, the
/// log-space transition weights of every position and a cache of emission
/// scores keyed by query alphabet. It is immutable apart from that cache, so
/// one model may be shared between threads and used to decode any number of
/// sequences.
pub struct ProfileModel {
    emissions:   MatchEmissions,
    transitions: TransitionProbabilities,
    columns:     Vec<ColumnParams>,
    cache:       EmissionCache,
}

impl ProfileModel {
    /// Validates the tables and builds a model. The model size is the number
    /// of match emission rows.
    ///
    /// ## Errors
    ///
    /// Returns [`PhmmError::InvalidModel`] if:
    /// - there are fewer than two positions, or the positions are not exactly
    ///   `1..=N`
    /// - a probability is not a number in `[0, 1]`
    /// - there are no transitions out of the random state
    /// - a transition names a state that does not exist, or has nonzero
    ///   probability but is not part of the model topology
    pub fn new(emissions: MatchEmissions, transitions: TransitionProbabilities) -> Result<Self, PhmmError> {
        let model_size = validate(&emissions, &transitions)?;

        let columns = (1..=model_size)
            .map(|p| ColumnParams::build(&transitions, p, model_size))
            .collect();

        tracing::debug!(model_size, transitions = transitions.len(), "built profile HMM");

        Ok(Self {
            emissions,
            transitions,
            columns,
            cache: EmissionCache::default(),
        })
    }

    /// The number of positions `N`.
    #[inline]
    #[must_use]
    pub fn model_size(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    #[must_use]
    pub fn emissions(&self) -> &MatchEmissions {
        &self.emissions
    }

    #[inline]
    #[must_use]
    pub fn transitions(&self) -> &TransitionProbabilities {
        &self.transitions
    }

    /// The log-space transition weights, one entry per position.
    #[inline]
    #[must_use]
    pub fn column_params(&self) -> &[ColumnParams] {
        &self.columns
    }

    /// The emission scores for queries over `alphabet`. Scores are computed on
    /// first use and cached for later calls with an equal alphabet.
    #[must_use]
    pub fn emission_scores(&self, alphabet: &Alphabet) -> Arc<EmissionScores> {
        self.cache.get_or_build(&self.emissions, alphabet)
    }

    /// The number of alphabets whose emission scores are currently cached.
    #[inline]
    #[must_use]
    pub fn cached_alphabets(&self) -> usize {
        self.cache.len()
    }

    /// Drops all cached emission scores.
    #[inline]
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// The most alphabets the model keeps emission scores for. Defaults to
    /// [`DEFAULT_CACHE_CAPACITY`](crate::phmm::DEFAULT_CACHE_CAPACITY).
    #[inline]
    #[must_use]
    pub fn cache_capacity(&self) -> usize {
        self.cache.capacity()
    }

    /// Replaces the emission cache with an empty one holding at most
    /// `capacity` alphabets. When a new alphabet arrives and the cache is
    /// full, every cached entry is dropped. A capacity of 0 turns caching off.
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache = EmissionCache::new(capacity);
        self
    }

    /// The minimum number of match states a segment needs to be reported when
    /// no threshold is given: half the model size, rounded down.
    #[inline]
    #[must_use]
    pub fn default_minimum_matches(&self) -> usize {
        self.model_size() / 2
    }
}

impl Clone for ProfileModel {
    /// Clones the model tables. The clone starts with an empty emission cache
    /// of the same capacity.
    fn clone(&self) -> Self {
        Self {
            emissions:   self.emissions.clone(),
            transitions: self.transitions.clone(),
            columns:     self.columns.clone(),
            cache:       EmissionCache::new(self.cache.capacity()),
        }
    }
}

impl std::fmt::Debug for ProfileModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileModel")
            .field("model_size", &self.model_size())
            .field("emissions", &self.emissions)
            .field("transitions", &self.transitions)
            .field("cache", &self.cache)
            .finish()
    }
}

#[inline]
fn is_probability(prob: f64) -> bool {
    (0.0..=1.0).contains(&prob)
}

/// Checks the raw tables and returns the model size.
fn validate(emissions: &MatchEmissions, transitions: &TransitionProbabilities) -> Result<usize, ModelError> {
    let model_size = emissions.len();
    if model_size < 2 {
        return Err(ModelError::TooFewPositions(model_size));
    }

    if let Some(position) = (1..=model_size).find(|&p| emissions.row(p).is_none()) {
        return Err(ModelError::MissingEmissions(position));
    }

    for (position, row) in emissions.iter() {
        if let Some((&symbol, &prob)) = row.iter().find(|(_, prob)| !is_probability(**prob)) {
            return Err(ModelError::InvalidEmission { position, symbol, prob });
        }
    }

    if transitions.row(StateLabel::Random).is_none() {
        return Err(ModelError::MissingRandomTransitions);
    }

    for (from, to, prob) in transitions.iter() {
        if let Some(state) = [from, to].into_iter().find(|state| !state.exists_in(model_size)) {
            return Err(ModelError::UnknownState(state));
        }
        if !is_probability(prob) {
            return Err(ModelError::InvalidTransition { from, to, prob });
        }
        if prob > 0.0 && !is_supported_edge(from, to, model_size) {
            return Err(ModelError::UnsupportedTransition { from, to });
        }
    }

    Ok(model_size)
}
