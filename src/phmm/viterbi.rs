use crate::{
    data::{Alphabet, clean_if_needed},
    phmm::{ColumnParams, DecodeConfig, PhmmError, PhmmState, PhmmStateArray, ProfileModel, StateLabel},
};
use std::{borrow::Cow, fmt, ops::Index};

/// How many rows of the dynamic programming table are filled between checks
/// of the deadline and cancel flag.
const CANCEL_CHECK_INTERVAL: usize = 64;

/// A traceback matrix for Viterbi decoding.
///
/// The rows are the query indices `0..=L` and the columns are the model
/// positions `1..=N`, stored in row-major order. Each cell records, for the
/// match, insert (or random) and delete slots of that position, the slot of
/// the predecessor from which the best score was reached.
pub(crate) struct ViterbiTraceback<T> {
    data: Vec<T>,
    cols: usize,
}

impl<T: Clone> ViterbiTraceback<T> {
    #[inline]
    #[must_use]
    pub(crate) fn new(default: T, query_len: usize, model_size: usize) -> Self {
        Self {
            data: vec![default; (query_len + 1) * model_size],
            cols: model_size,
        }
    }
}

impl<T> ViterbiTraceback<T> {
    /// Retrieves the cell for query index `i` (where `0` means no symbols
    /// consumed) and the 0-based position index `p`.
    #[inline]
    #[must_use]
    pub(crate) fn get(&self, i: usize, p: usize) -> &T {
        &self.data[self.cols * i + p]
    }

    /// Retrieves the full row for query index `i`.
    #[inline]
    #[must_use]
    pub(crate) fn row_mut(&mut self, i: usize) -> &mut [T] {
        let start = self.cols * i;
        &mut self.data[start..start + self.cols]
    }
}

/// Adds the transition weights into one slot to the scores of its three
/// predecessors, and returns the best predecessor with its score.
#[inline]
#[must_use]
fn best_entry(mut vals: PhmmStateArray<f64>, weights: PhmmStateArray<f64>) -> (PhmmState, f64) {
    use PhmmState::*;

    vals[Match] += weights[Match];
    vals[Insert] += weights[Insert];
    vals[Delete] += weights[Delete];

    vals.locate_max()
}

/// The scores of the row for query index 0, before any symbol is consumed.
/// Only the random state and the states entered directly from it are
/// reachable.
fn initial_row(columns: &[ColumnParams]) -> Vec<PhmmStateArray<f64>> {
    use PhmmState::*;

    let last = columns.len() - 1;
    let mut row = vec![PhmmStateArray::IMPOSSIBLE; columns.len()];

    row[last][Insert] = columns[last].get(Insert, Insert);
    row[0][Match] = columns[0].get(Insert, Match);
    row[0][Delete] = columns[0].get(Insert, Delete);

    row
}

/// Fills one row of the dynamic programming table.
///
/// `prev` holds the scores for the previous query index, `match_scores` the
/// emission scores of the current symbol at every position. The scores of the
/// current row are written to `cur` and the chosen predecessors to `ptrs`.
///
/// The random state (the insert slot of the last position) is computed first,
/// since the delete state of position 1 is entered from it within the same
/// row.
#[cfg_attr(feature = "multiversion", multiversion::multiversion(targets = "simd"))]
fn fill_row(
    columns: &[ColumnParams], match_scores: &[f64], prev: &[PhmmStateArray<f64>], cur: &mut [PhmmStateArray<f64>],
    ptrs: &mut [PhmmStateArray<PhmmState>],
) {
    use PhmmState::*;

    let last = columns.len() - 1;

    let (ptr, best) = best_entry(prev[last], columns[last].entering(Insert));
    cur[last][Insert] = best;
    ptrs[last][Insert] = ptr;

    for (p, column) in columns.iter().enumerate() {
        // Position 1 follows position N, whose insert slot is the random state
        let before = if p == 0 { last } else { p - 1 };

        let (ptr, best) = best_entry(prev[before], column.entering(Match));
        cur[p][Match] = best + match_scores[p];
        ptrs[p][Match] = ptr;

        if p != last {
            let (ptr, best) = best_entry(prev[p], column.entering(Insert));
            cur[p][Insert] = best;
            ptrs[p][Insert] = ptr;
        }

        let from = if p == 0 {
            PhmmStateArray::new([f64::NEG_INFINITY, cur[last][Insert], f64::NEG_INFINITY])
        } else {
            cur[before]
        };
        let (ptr, best) = best_entry(from, column.entering(Delete));
        cur[p][Delete] = best;
        ptrs[p][Delete] = ptr;
    }
}

/// Finds the best cell of the final row. Positions are scanned in order and,
/// within a position, the slots in the order match, insert, delete. The first
/// strict maximum wins.
fn locate_end(row: &[PhmmStateArray<f64>]) -> (usize, PhmmState, f64) {
    let mut best = (0, PhmmState::Match, f64::NEG_INFINITY);
    for (p, cell) in row.iter().enumerate() {
        let (state, score) = cell.locate_max();
        if score > best.2 {
            best = (p, state, score);
        }
    }
    best
}

/// Walks the traceback matrix from the end cell back to query index 0 and
/// returns one label per query symbol, in order.
fn traceback(
    ptrs: &ViterbiTraceback<PhmmStateArray<PhmmState>>, query_len: usize, model_size: usize, mut p: usize,
    mut state: PhmmState,
) -> Vec<StateLabel> {
    let last = model_size - 1;
    let before = |p: usize| if p == 0 { last } else { p - 1 };

    let mut i = query_len;
    let mut states = Vec::with_capacity(query_len);

    while i > 0 {
        let next_state = ptrs.get(i, p)[state];
        match state {
            PhmmState::Match => {
                states.push(StateLabel::Match(p + 1));
                i -= 1;
                p = before(p);
            }
            PhmmState::Insert => {
                states.push(if p == last {
                    StateLabel::Random
                } else {
                    StateLabel::Insert(p + 1)
                });
                i -= 1;
            }
            PhmmState::Delete => {
                p = before(p);
            }
        }
        state = next_state;
    }

    states.reverse();
    states
}

impl ProfileModel {
    /// Decodes the most probable state path for `seq` with the default
    /// [`DecodeConfig`]: the sequence is cleaned first.
    ///
    /// ## Errors
    ///
    /// Returns [`PhmmError::NoViablePath`] if no state path has nonzero
    /// probability.
    #[inline]
    pub fn decode<Q: AsRef<[u8]>>(&self, seq: Q) -> Result<ViterbiPath, PhmmError> {
        self.decode_with(seq, &DecodeConfig::default())
    }

    /// Decodes the most probable state path for `seq` using the Viterbi
    /// algorithm. The path has one label per symbol of the (cleaned, unless
    /// [`DecodeConfig::raw_input`] was used) sequence. An empty sequence gives
    /// an empty path.
    ///
    /// ## Errors
    ///
    /// Returns [`PhmmError::NoViablePath`] if no state path has nonzero
    /// probability, or [`PhmmError::Cancelled`] if the deadline or cancel flag
    /// in `config` fired.
    pub fn decode_with<Q: AsRef<[u8]>>(&self, seq: Q, config: &DecodeConfig) -> Result<ViterbiPath, PhmmError> {
        let query = prepare_query(seq.as_ref(), config);
        self.viterbi(&query, config)
    }

    /// Runs the Viterbi algorithm on a query which is already prepared.
    pub(crate) fn viterbi(&self, query: &[u8], config: &DecodeConfig) -> Result<ViterbiPath, PhmmError> {
        let columns = self.column_params();
        let model_size = columns.len();

        let _span = tracing::debug_span!("viterbi", model_size, query_len = query.len()).entered();

        if query.is_empty() {
            return Ok(ViterbiPath::default());
        }

        let alphabet = Alphabet::from_sequence(query);
        let emissions = self.emission_scores(&alphabet);

        let mut ptrs = ViterbiTraceback::new(PhmmStateArray::new([PhmmState::Match; 3]), query.len(), model_size);
        let mut prev = initial_row(columns);
        let mut cur = vec![PhmmStateArray::IMPOSSIBLE; model_size];

        for (i, &symbol) in query.iter().enumerate() {
            if i % CANCEL_CHECK_INTERVAL == 0 && config.should_stop() {
                tracing::warn!(row = i, "decode cancelled");
                return Err(PhmmError::Cancelled);
            }

            let match_scores = emissions.for_symbol_index(alphabet.to_index(symbol));
            fill_row(columns, match_scores, &prev, &mut cur, ptrs.row_mut(i + 1));
            std::mem::swap(&mut prev, &mut cur);
        }

        let (p, state, score) = locate_end(&prev);
        // Necessary, otherwise the traceback would follow meaningless pointers
        if score == f64::NEG_INFINITY {
            return Err(PhmmError::NoViablePath);
        }

        let states = traceback(&ptrs, query.len(), model_size, p, state);
        tracing::trace!(score, "decoded path");

        Ok(ViterbiPath { states, score })
    }
}

/// Cleans the query unless the configuration asks for raw input.
pub(crate) fn prepare_query<'a>(seq: &'a [u8], config: &DecodeConfig) -> Cow<'a, [u8]> {
    if config.clean_input {
        clean_if_needed(seq)
    } else {
        Cow::Borrowed(seq)
    }
}

/// The most probable state path for a query, with one label per query symbol,
/// along with its log-probability.
///
/// Delete states consume no symbol and so never appear in a path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViterbiPath {
    states: Vec<StateLabel>,
    score:  f64,
}

impl ViterbiPath {
    /// The labels, one per query symbol.
    #[inline]
    #[must_use]
    pub fn states(&self) -> &[StateLabel] {
        &self.states
    }

    /// The natural-log score of the path: the transition weights plus the
    /// emission log-odds of the match states. It is 0.0 for the empty path.
    #[inline]
    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, StateLabel> {
        self.states.iter()
    }

    /// The single-letter state codes of the path, such as `RRMMIMR`.
    #[must_use]
    pub fn to_codes(&self) -> Vec<u8> {
        self.states.iter().map(|s| s.code()).collect()
    }

    #[inline]
    #[must_use]
    pub fn into_states(self) -> Vec<StateLabel> {
        self.states
    }
}

impl Index<usize> for ViterbiPath {
    type Output = StateLabel;

    #[inline]
    fn index(&self, index: usize) -> &StateLabel {
        &self.states[index]
    }
}

impl<'a> IntoIterator for &'a ViterbiPath {
    type Item = &'a StateLabel;
    type IntoIter = std::slice::Iter<'a, StateLabel>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

impl AsRef<[StateLabel]> for ViterbiPath {
    #[inline]
    fn as_ref(&self) -> &[StateLabel] {
        &self.states
    }
}

/// Displays the labels separated by spaces, such as `R R M1 M2 R`.
impl fmt::Display for ViterbiPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut labels = self.states.iter();
        if let Some(first) = labels.next() {
            write!(f, "{first}")?;
            for label in labels {
                write!(f, " {label}")?;
            }
        }
        Ok(())
    }
}
