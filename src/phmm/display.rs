use crate::phmm::{PatternMatch, StateLabel};
use std::fmt::{self, Write};

/// The default number of columns per line used by [`AlignedPath`].
pub const DEFAULT_PRINT_WIDTH: usize = 80;

/// Displays a sequence above its decoded state codes, wrapped into blocks of
/// [`width`](AlignedPath::width) columns separated by blank lines.
///
/// Random states are shown as `r` so that the match states stand out.
///
/// ```
/// # use motif_hmm::phmm::{AlignedPath, ProfileModel};
/// let model = ProfileModel::from_consensus(b"ACGT").unwrap();
/// let path = model.decode(b"TTACGTTT").unwrap();
/// let shown = AlignedPath::new(b"TTACGTTT", path.states()).width(4).to_string();
/// assert_eq!(shown, "TTAC\nrrMM\n\nGTTT\nMMrr\n\n");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct AlignedPath<'a> {
    seq:   &'a [u8],
    path:  &'a [StateLabel],
    start: Option<usize>,
    width: usize,
}

impl<'a> AlignedPath<'a> {
    /// Aligns `seq` with `path`. If the lengths differ, the excess of the
    /// longer one is not shown.
    #[inline]
    #[must_use]
    pub fn new(seq: &'a [u8], path: &'a [StateLabel]) -> Self {
        Self {
            seq,
            path,
            start: None,
            width: DEFAULT_PRINT_WIDTH,
        }
    }

    /// Aligns the symbols of a match with its states. The first line is
    /// prefixed with the start index in parentheses and insert states are
    /// shown in lower case.
    #[inline]
    #[must_use]
    pub fn of_match(m: &'a PatternMatch) -> Self {
        Self {
            seq:   m.symbols(),
            path:  m.states(),
            start: Some(m.start()),
            width: DEFAULT_PRINT_WIDTH,
        }
    }

    /// Sets the number of columns per line. A width of zero disables
    /// wrapping.
    #[inline]
    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    fn code(&self, state: StateLabel) -> u8 {
        match state {
            StateLabel::Random => b'r',
            StateLabel::Insert(_) if self.start.is_some() => b'i',
            other => other.code(),
        }
    }
}

impl fmt::Display for AlignedPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.seq.len().min(self.path.len());

        let mut top = Vec::with_capacity(len + 8);
        let mut bottom = Vec::with_capacity(len + 8);

        if let Some(start) = self.start {
            let mut buff = itoa::Buffer::new();
            let index = buff.format(start);
            top.push(b'(');
            top.extend_from_slice(index.as_bytes());
            top.push(b')');
            bottom.resize(top.len(), b' ');
        }

        top.extend_from_slice(&self.seq[..len]);
        bottom.extend(self.path[..len].iter().map(|&s| self.code(s)));

        let width = if self.width == 0 { top.len().max(1) } else { self.width };
        for (upper, lower) in top.chunks(width).zip(bottom.chunks(width)) {
            for &b in upper {
                f.write_char(char::from(b))?;
            }
            f.write_char('\n')?;
            for &b in lower {
                f.write_char(char::from(b))?;
            }
            f.write_str("\n\n")?;
        }

        Ok(())
    }
}

/// Shows the start index in parentheses followed by the symbols, above the
/// state codes, in blocks of [`DEFAULT_PRINT_WIDTH`] columns.
impl fmt::Display for PatternMatch {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&AlignedPath::of_match(self), f)
    }
}
