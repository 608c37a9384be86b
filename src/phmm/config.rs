use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

/// Per-call options for [`ProfileModel::decode_with`] and
/// [`ProfileModel::find_matches_with`].
///
/// The default configuration cleans the input, uses the model's default match
/// threshold and never stops early.
///
/// Decoding costs time proportional to the model size times the sequence
/// length. A deadline or a shared cancel flag lets a caller stop a long decode
/// cooperatively: both are polled between rows of the dynamic programming
/// table, and the decode returns [`PhmmError::Cancelled`] once either fires.
///
/// [`ProfileModel::decode_with`]: crate::phmm::ProfileModel::decode_with
/// [`ProfileModel::find_matches_with`]:
///     crate::phmm::ProfileModel::find_matches_with
/// [`PhmmError::Cancelled`]: crate::phmm::PhmmError::Cancelled
#[derive(Clone, Debug)]
pub struct DecodeConfig {
    /// Whether to drop non-alphanumeric bytes and convert letters to upper
    /// case before decoding
    pub clean_input:     bool,
    /// The smallest number of match states a reported segment must contain.
    /// `None` or `Some(0)` selects half the model size.
    pub minimum_matches: Option<usize>,
    deadline:            Option<Instant>,
    cancel_flag:         Option<Arc<AtomicBool>>,
}

impl Default for DecodeConfig {
    #[inline]
    fn default() -> Self {
        Self {
            clean_input:     true,
            minimum_matches: None,
            deadline:        None,
            cancel_flag:     None,
        }
    }
}

impl DecodeConfig {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the sequence exactly as given, without cleaning it.
    #[inline]
    #[must_use]
    pub fn raw_input(mut self) -> Self {
        self.clean_input = false;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_minimum_matches(mut self, minimum_matches: usize) -> Self {
        self.minimum_matches = Some(minimum_matches);
        self
    }

    /// Stop decoding once `timeout` has elapsed, measured from now.
    #[inline]
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        // An unrepresentable deadline is as good as none
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Stop decoding once `flag` is set to `true`. The flag may be shared with
    /// other threads.
    #[inline]
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel_flag = Some(flag);
        self
    }

    #[inline]
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether a running decode should stop now.
    #[inline]
    #[must_use]
    pub fn should_stop(&self) -> bool {
        self.cancel_flag.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed))
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Resolves the match threshold against a model of `model_size`
    /// positions.
    #[inline]
    #[must_use]
    pub(crate) fn minimum_matches_for(&self, model_size: usize) -> usize {
        match self.minimum_matches {
            None | Some(0) => model_size / 2,
            Some(n) => n,
        }
    }
}
