use crate::phmm::{ModelError, PhmmError};
use std::{
    fmt::{self, Write},
    marker::PhantomData,
    ops::{Index, IndexMut},
    str::FromStr,
};

/// The identity of a state in the profile HMM.
///
/// Positions are 1-based, so `Match(1)` is the first match state. The last
/// position has no insert state: the [`Random`](StateLabel::Random) state takes
/// its place.
///
/// The textual form used by [`Display`](fmt::Display) and [`FromStr`] is `M3`,
/// `I3`, `D3` and `R`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StateLabel {
    Match(usize),
    Insert(usize),
    Delete(usize),
    Random,
}

impl StateLabel {
    /// The model position of the state, or `None` for the random state.
    #[inline]
    #[must_use]
    pub fn position(self) -> Option<usize> {
        match self {
            StateLabel::Match(p) | StateLabel::Insert(p) | StateLabel::Delete(p) => Some(p),
            StateLabel::Random => None,
        }
    }

    /// The single-letter code of the state kind: `M`, `I`, `D` or `R`.
    #[inline]
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            StateLabel::Match(_) => b'M',
            StateLabel::Insert(_) => b'I',
            StateLabel::Delete(_) => b'D',
            StateLabel::Random => b'R',
        }
    }

    #[inline]
    #[must_use]
    pub fn is_match(self) -> bool {
        matches!(self, StateLabel::Match(_))
    }

    #[inline]
    #[must_use]
    pub fn is_random(self) -> bool {
        self == StateLabel::Random
    }

    /// Whether the state exists in a model with `model_size` positions.
    #[inline]
    #[must_use]
    pub fn exists_in(self, model_size: usize) -> bool {
        match self {
            StateLabel::Match(p) | StateLabel::Delete(p) => (1..=model_size).contains(&p),
            StateLabel::Insert(p) => (1..model_size).contains(&p),
            StateLabel::Random => true,
        }
    }
}

impl fmt::Display for StateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(char::from(self.code()))?;
        if let Some(p) = self.position() {
            let mut buff = itoa::Buffer::new();
            f.write_str(buff.format(p))?;
        }
        Ok(())
    }
}

impl FromStr for StateLabel {
    type Err = PhmmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PhmmError::InvalidModel(ModelError::InvalidLabel(s.to_string()));

        if s == "R" {
            return Ok(StateLabel::Random);
        }

        let (kind, position) = s.split_at_checked(1).ok_or_else(invalid)?;
        if position.is_empty() || !position.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let position = position.parse::<usize>().map_err(|_| invalid())?;

        match kind {
            "M" => Ok(StateLabel::Match(position)),
            "I" => Ok(StateLabel::Insert(position)),
            "D" => Ok(StateLabel::Delete(position)),
            _ => Err(invalid()),
        }
    }
}

/// The three slots stored for each model position in the dynamic programming
/// tables. The order of the variants is the tie-breaking precedence used when
/// several predecessors share the best score.
///
/// For the last position, the `Insert` slot holds the random state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub(crate) enum PhmmState {
    #[default]
    Match  = 0,
    Insert = 1,
    Delete = 2,
}

impl From<usize> for PhmmState {
    #[inline]
    fn from(value: usize) -> Self {
        // WARNING: enum order must be maintained
        [Self::Match, Self::Insert, Self::Delete][value]
    }
}

impl From<PhmmState> for usize {
    #[inline]
    fn from(value: PhmmState) -> Self {
        value as usize
    }
}

/// An array of type `[T; N]` indexed by an enum `E`. This is useful for
/// readability.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct EnumArray<T, E, const N: usize> {
    pub(crate) inner: [T; N],
    phantom:          PhantomData<E>,
}

impl<T, E, const N: usize> EnumArray<T, E, N> {
    #[inline]
    #[must_use]
    pub(crate) const fn new(inner: [T; N]) -> Self {
        Self {
            inner,
            phantom: PhantomData,
        }
    }
}

impl<T: PartialOrd + Copy, E: From<usize>, const N: usize> EnumArray<T, E, N> {
    /// Locate the maximum value in the array and the corresponding enum
    /// variant. Ties go to the earliest variant.
    #[inline]
    pub(crate) fn locate_max(&self) -> (E, T) {
        let mut argmax = 0;
        let mut max = self.inner[0];

        for i in 1..N {
            if self.inner[i] > max {
                argmax = i;
                max = self.inner[i];
            }
        }

        (E::from(argmax), max)
    }
}

impl<T, E: Into<usize>, const N: usize> Index<E> for EnumArray<T, E, N> {
    type Output = T;

    #[inline]
    fn index(&self, index: E) -> &Self::Output {
        &self.inner[index.into()]
    }
}

impl<T, E: Into<usize>, const N: usize> IndexMut<E> for EnumArray<T, E, N> {
    #[inline]
    fn index_mut(&mut self, index: E) -> &mut Self::Output {
        &mut self.inner[index.into()]
    }
}

/// An array holding values of type `T`, indexed by the variants in
/// [`PhmmState`]
pub(crate) type PhmmStateArray<T> = EnumArray<T, PhmmState, 3>;

impl PhmmStateArray<f64> {
    /// All three slots unreachable.
    pub(crate) const IMPOSSIBLE: Self = Self::new([f64::NEG_INFINITY; 3]);
}
