/// Used to clean query sequences: ASCII letters are converted to uppercase,
/// digits are kept, and every other byte maps to 0. The 0-byte is used for
/// filtering out unwanted patterns.
#[allow(clippy::cast_possible_truncation)]
pub(crate) const TO_ALPHANUMERIC_UC: [u8; 256] = {
    let mut v = [0u8; 256];
    let mut i = 0;

    while i < v.len() {
        // usize cannot be greater than bound
        let b = i as u8;
        if b.is_ascii_alphanumeric() {
            v[i] = b.to_ascii_uppercase();
        }
        i += 1;
    }
    v
};

/// A boolean mapping of the bytes that survive cleaning unchanged.
#[allow(clippy::cast_possible_truncation)]
pub(crate) const IS_CLEAN_SYMBOL: [bool; 256] = {
    let mut v = [false; 256];
    let mut i = 0;

    while i < v.len() {
        v[i] = TO_ALPHANUMERIC_UC[i] == i as u8 && TO_ALPHANUMERIC_UC[i] > 0;
        i += 1;
    }
    v
};
