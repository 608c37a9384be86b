use crate::phmm::{DecodeConfig, PhmmError, ProfileModel, StateLabel, viterbi::prepare_query};

/// A contiguous stretch of a decoded path that contains no random state, and
/// the query symbols it covers.
///
/// Symbols emitted by insert states are stored in lower case so they stand out
/// from the consensus columns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternMatch {
    start:   usize,
    symbols: Vec<u8>,
    states:  Vec<StateLabel>,
}

impl PatternMatch {
    /// The index of the first symbol of the match within the decoded (cleaned)
    /// query.
    #[inline]
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// One past the index of the last symbol of the match.
    #[inline]
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.symbols.len()
    }

    #[inline]
    #[must_use]
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    #[inline]
    #[must_use]
    pub fn states(&self) -> &[StateLabel] {
        &self.states
    }

    /// The number of symbols explained by match states.
    #[inline]
    #[must_use]
    pub fn match_count(&self) -> usize {
        self.states.iter().filter(|s| s.is_match()).count()
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

    /// Splits the match into its state sub-path and its `(start, symbols)`
    /// pair.
    #[inline]
    #[must_use]
    pub fn into_parts(self) -> (Vec<StateLabel>, (usize, Vec<u8>)) {
        (self.states, (self.start, self.symbols))
    }
}

/// Splits a list of matches into two order-aligned lists: the state sub-paths,
/// and the `(start, symbols)` pairs. Element `i` of each describes the same
/// match.
#[must_use]
pub fn unzip_matches(matches: Vec<PatternMatch>) -> (Vec<Vec<StateLabel>>, Vec<(usize, Vec<u8>)>) {
    matches.into_iter().map(PatternMatch::into_parts).unzip()
}

/// Cuts a decoded path into the stretches between random states and keeps
/// those with at least `minimum_matches` match states.
///
/// `path` and `seq` are aligned one to one; if their lengths differ, the
/// excess of the longer one is ignored.
#[must_use]
pub fn segment_path(path: &[StateLabel], seq: &[u8], minimum_matches: usize) -> Vec<PatternMatch> {
    let mut matches = Vec::new();
    let mut open: Option<PatternMatch> = None;

    let mut close = |open: &mut Option<PatternMatch>| {
        if let Some(m) = open.take()
            && m.match_count() >= minimum_matches
        {
            matches.push(m);
        }
    };

    for (i, (&state, &symbol)) in path.iter().zip(seq).enumerate() {
        if state.is_random() {
            close(&mut open);
            continue;
        }

        let current = open.get_or_insert_with(|| PatternMatch {
            start:   i,
            symbols: Vec::new(),
            states:  Vec::new(),
        });

        current.symbols.push(match state {
            StateLabel::Insert(_) => symbol.to_ascii_lowercase(),
            _ => symbol,
        });
        current.states.push(state);
    }
    close(&mut open);

    matches
}

impl ProfileModel {
    /// Decodes `seq` with the default [`DecodeConfig`] and returns the
    /// segments containing at least half as many match states as the model
    /// has positions.
    ///
    /// ## Errors
    ///
    /// Fails under the same conditions as [`ProfileModel::decode`].
    #[inline]
    pub fn find_matches<Q: AsRef<[u8]>>(&self, seq: Q) -> Result<Vec<PatternMatch>, PhmmError> {
        self.find_matches_with(seq, &DecodeConfig::default())
    }

    /// Decodes `seq` and returns the segments of the path that contain at
    /// least [`DecodeConfig::minimum_matches`] match states. The start of each
    /// match indexes the query after any cleaning.
    ///
    /// ## Errors
    ///
    /// Fails under the same conditions as [`ProfileModel::decode_with`].
    pub fn find_matches_with<Q: AsRef<[u8]>>(
        &self, seq: Q, config: &DecodeConfig,
    ) -> Result<Vec<PatternMatch>, PhmmError> {
        let query = prepare_query(seq.as_ref(), config);
        let path = self.viterbi(&query, config)?;

        let minimum_matches = config.minimum_matches_for(self.model_size());
        let matches = segment_path(path.states(), &query, minimum_matches);

        tracing::debug!(minimum_matches, found = matches.len(), "segmented decoded path");
        Ok(matches)
    }
}
