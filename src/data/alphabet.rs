use std::ops::Index;

/// The set of distinct symbols present in a query sequence, along with a
/// mapping from each symbol to its rank in sorted order.
///
/// This is the runtime counterpart of a fixed byte-to-index map: the alphabet
/// of a profile search is not known in advance, since the background
/// distribution is uniform over whatever symbols the query contains. Two
/// alphabets are equal exactly when they contain the same symbols, so an
/// [`Alphabet`] can be used as a cache key.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Alphabet {
    members:   [u64; 4],
    index_map: [u8; 256],
    symbols:   Vec<u8>,
}

impl Alphabet {
    /// Collects the distinct symbols in `seq`. The symbols are ordered by byte
    /// value.
    #[must_use]
    pub fn from_sequence(seq: &[u8]) -> Self {
        let mut members = [0u64; 4];
        for &b in seq {
            members[usize::from(b >> 6)] |= 1u64 << (b & 63);
        }
        Self::from_members(members)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_members(members: [u64; 4]) -> Self {
        let mut index_map = [0u8; 256];
        let mut symbols = Vec::new();

        for b in 0..=u8::MAX {
            if members[usize::from(b >> 6)] & (1u64 << (b & 63)) != 0 {
                // At most 256 symbols, so the rank fits in a u8
                index_map[usize::from(b)] = symbols.len() as u8;
                symbols.push(b);
            }
        }

        Self {
            members,
            index_map,
            symbols,
        }
    }

    /// Whether `symbol` is a member of the alphabet.
    #[inline]
    #[must_use]
    pub fn contains(&self, symbol: u8) -> bool {
        self.members[usize::from(symbol >> 6)] & (1u64 << (symbol & 63)) != 0
    }

    /// The rank of `symbol` within the alphabet.
    ///
    /// Symbols which are not members map to index 0, so callers should only
    /// pass symbols from the sequence the alphabet was built from.
    #[inline]
    #[must_use]
    pub fn to_index(&self, symbol: u8) -> usize {
        usize::from(self.index_map[usize::from(symbol)])
    }

    /// The symbols in the alphabet, in increasing byte order.
    #[inline]
    #[must_use]
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// The number of distinct symbols.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the alphabet has no symbols (it was built from an empty
    /// sequence).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Index<u8> for Alphabet {
    type Output = u8;

    #[inline]
    fn index(&self, symbol: u8) -> &u8 {
        &self.index_map[usize::from(symbol)]
    }
}

impl std::fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Alphabet").field(&String::from_utf8_lossy(&self.symbols)).finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn symbols_are_sorted_and_distinct() {
        let alphabet = Alphabet::from_sequence(b"XXABXX");
        assert_eq!(alphabet.symbols(), b"ABX");
        assert_eq!(alphabet.len(), 3);
        assert_eq!(alphabet.to_index(b'A'), 0);
        assert_eq!(alphabet.to_index(b'B'), 1);
        assert_eq!(alphabet.to_index(b'X'), 2);
        assert_eq!(alphabet[b'X'], 2);
    }

    #[test]
    fn membership() {
        let alphabet = Alphabet::from_sequence(&[0, 63, 64, 200, 255]);
        for b in [0, 63, 64, 200, 255] {
            assert!(alphabet.contains(b));
        }
        assert!(!alphabet.contains(1));
        assert!(!alphabet.contains(b'A'));
        assert_eq!(alphabet.to_index(255), 4);
    }

    #[test]
    fn equality_ignores_order_and_repeats() {
        assert_eq!(Alphabet::from_sequence(b"CAB"), Alphabet::from_sequence(b"ABCCBA"));
        assert_ne!(Alphabet::from_sequence(b"AB"), Alphabet::from_sequence(b"ABC"));
    }

    #[test]
    fn empty() {
        let alphabet = Alphabet::from_sequence(b"");
        assert!(alphabet.is_empty());
        assert_eq!(alphabet.len(), 0);
    }
}
