//! Random sequences for tests, benchmarks and demos.

use rand_xoshiro::{
    Xoshiro256PlusPlus,
    rand_core::{RngCore, SeedableRng},
};

/// Generates a sequence of `length` symbols drawn uniformly from `alpha`.
///
/// The output is reproducible for a given `seed`. `alpha` must not be empty
/// unless `length` is zero.
#[must_use]
pub fn rand_sequence(alpha: &[u8], length: usize, seed: u64) -> Vec<u8> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    (0..length).map(|_| pick(&mut rng, alpha)).collect()
}

/// Generates a random background sequence over `alpha` and plants `copies`
/// copies of `motif` in it, returning the sequence and the start index of each
/// copy in increasing order.
///
/// The sequence is split into `copies` equal segments and each copy is placed
/// at a random offset inside its own segment, leaving at least one background
/// symbol after it. If the segments are too short for that, fewer copies are
/// planted.
#[must_use]
pub fn rand_sequence_with_motifs(
    alpha: &[u8], motif: &[u8], length: usize, copies: usize, seed: u64,
) -> (Vec<u8>, Vec<usize>) {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut seq: Vec<u8> = (0..length).map(|_| pick(&mut rng, alpha)).collect();

    if copies == 0 || motif.is_empty() {
        return (seq, Vec::new());
    }

    let segment = length / copies;
    if segment <= motif.len() {
        return (seq, Vec::new());
    }

    let starts: Vec<usize> = (0..copies)
        .map(|c| c * segment + below(&mut rng, segment - motif.len()))
        .collect();
    for &start in &starts {
        seq[start..start + motif.len()].copy_from_slice(motif);
    }

    (seq, starts)
}

#[inline]
fn pick(rng: &mut Xoshiro256PlusPlus, alpha: &[u8]) -> u8 {
    alpha[below(rng, alpha.len())]
}

/// A random integer in `0..bound`.
#[inline]
#[allow(clippy::cast_possible_truncation)]
fn below(rng: &mut Xoshiro256PlusPlus, bound: usize) -> usize {
    (rng.next_u64() % bound as u64) as usize
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rand_test() {
        const LEN: usize = 10_000;

        let random_sequence = rand_sequence(b"ATGC", LEN, 42);
        assert_eq!(LEN, random_sequence.len());

        let (a, c, g, t) = random_sequence.iter().fold((0, 0, 0, 0), |(a, c, g, t), &b| match b {
            b'A' => (a + 1, c, g, t),
            b'C' => (a, c + 1, g, t),
            b'G' => (a, c, g + 1, t),
            b'T' => (a, c, g, t + 1),
            _ => (a, c, g, t),
        });

        assert!(a > 0);
        assert!(c > 0);
        assert!(g > 0);
        assert!(t > 0);
        assert_eq!(rand_sequence(b"ATGC", LEN, 42), random_sequence);
    }

    #[test]
    fn planted_motifs() {
        let (seq, starts) = rand_sequence_with_motifs(b"ACGT", b"KLMNPQRS", 300, 4, 7);
        assert_eq!(seq.len(), 300);
        assert_eq!(starts.len(), 4);

        for (c, &start) in starts.iter().enumerate() {
            assert!(start >= c * 75 && start + 8 < (c + 1) * 75);
            assert_eq!(&seq[start..start + 8], b"KLMNPQRS");
        }
        assert!(starts.windows(2).all(|w| w[0] + 8 < w[1]));
    }

    #[test]
    fn too_short_for_motifs() {
        let (seq, starts) = rand_sequence_with_motifs(b"ACGT", b"KLMNPQRS", 20, 4, 7);
        assert_eq!(seq.len(), 20);
        assert!(starts.is_empty());
        assert!(seq.iter().all(|b| b"ACGT".contains(b)));
    }
}
