use crate::data::mappings::{IS_CLEAN_SYMBOL, TO_ALPHANUMERIC_UC};
use std::borrow::Cow;

/// Provides methods for validating and transforming query sequences using byte
/// mappings.
pub trait RetainSequence {
    /// Retains and transforms bytes using the transformation mapping, removing
    /// any that map to 0.
    fn retain_by_recoding(&mut self, transformation_mapping: &'static [u8; 256]);
}

impl RetainSequence for Vec<u8> {
    #[inline]
    fn retain_by_recoding(&mut self, transformation_mapping: &'static [u8; 256]) {
        self.retain_mut(|b| {
            *b = transformation_mapping[*b as usize];
            *b > 0
        });
    }
}

/// Cleans a query sequence: only ASCII alphanumeric symbols are retained, they
/// are converted to uppercase, and their order is preserved.
///
/// ```
/// # use motif_hmm::data::clean_sequence;
/// assert_eq!(clean_sequence(b"ac-g t\n12x"), b"ACGT12X");
/// ```
#[inline]
#[must_use]
pub fn clean_sequence(seq: &[u8]) -> Vec<u8> {
    let mut out = seq.to_vec();
    out.retain_by_recoding(&TO_ALPHANUMERIC_UC);
    out
}

/// Cleans `seq` only if it is not already clean, avoiding the copy otherwise.
#[inline]
#[must_use]
pub(crate) fn clean_if_needed(seq: &[u8]) -> Cow<'_, [u8]> {
    if is_clean(seq) {
        Cow::Borrowed(seq)
    } else {
        Cow::Owned(clean_sequence(seq))
    }
}

/// Whether every byte of `seq` is an uppercase ASCII letter or a digit.
#[inline]
#[must_use]
pub fn is_clean(seq: &[u8]) -> bool {
    seq.iter().all(|&b| IS_CLEAN_SYMBOL[b as usize])
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cleaning_keeps_order_and_uppercases() {
        assert_eq!(clean_sequence(b"xxAbxx"), b"XXABXX");
        assert_eq!(clean_sequence(b"  a1-b2\tc3 "), b"A1B2C3");
    }

    #[test]
    fn cleaning_can_empty_a_sequence() {
        assert!(clean_sequence(b"--..  \n").is_empty());
        assert!(clean_sequence(b"").is_empty());
    }

    #[test]
    fn non_ascii_bytes_are_removed() {
        assert_eq!(clean_sequence("aé-z".as_bytes()), b"AZ");
    }

    #[test]
    fn clean_input_is_borrowed() {
        assert!(is_clean(b"ACGT09"));
        assert!(!is_clean(b"ACGt"));
        assert!(matches!(clean_if_needed(b"ACGT"), Cow::Borrowed(_)));
        assert!(matches!(clean_if_needed(b"acgt"), Cow::Owned(_)));
    }
}
