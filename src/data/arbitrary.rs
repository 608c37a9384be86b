//! Implementations of
//! [`Arbitrary`](https://docs.rs/arbitrary/latest/arbitrary/trait.Arbitrary.html)
//! that only produce well-formed values, for fuzzing the decoder.
//!
//! <div class="warning note">
//!
//! **Note**
//!
//! You must enable the *fuzzing* feature in your `Cargo.toml` to use these
//! functions.
//!
//! </div>

use crate::phmm::{ConsensusTemplate, ProfileModel, StateLabel};
use arbitrary::{Arbitrary, Error, Result, Unstructured};

/// The symbols used for arbitrary consensus and query sequences.
const SYMBOLS: &[u8] = b"ACGTNRYKMSW";

/// The largest model generated.
const MAX_MODEL_SIZE: usize = 24;

/// A probability in `[0, 1]` with 255 steps.
#[inline]
fn probability(u: &mut Unstructured<'_>) -> Result<f64> {
    Ok(f64::from(u8::arbitrary(u)?) / 255.0)
}

impl<'a> Arbitrary<'a> for StateLabel {
    #[inline]
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        let position = usize::arbitrary(u)?;
        Ok(match u.int_in_range(0..=3)? {
            0 => StateLabel::Match(position),
            1 => StateLabel::Insert(position),
            2 => StateLabel::Delete(position),
            _ => StateLabel::Random,
        })
    }
}

impl<'a> Arbitrary<'a> for ConsensusTemplate {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        Ok(ConsensusTemplate {
            random_to_random:      probability(u)?,
            random_to_match:       probability(u)?,
            random_to_delete:      probability(u)?,
            match_to_insert:       probability(u)?,
            match_to_match:        probability(u)?,
            match_to_delete:       probability(u)?,
            insert_to_insert:      probability(u)?,
            insert_to_match:       probability(u)?,
            insert_to_delete:      probability(u)?,
            delete_to_match:       probability(u)?,
            delete_to_delete:      probability(u)?,
            last_match_to_random:  probability(u)?,
            last_match_to_first:   probability(u)?,
            last_delete_to_random: probability(u)?,
        })
    }
}

/// Generates a model from an arbitrary [`ConsensusTemplate`] and an arbitrary
/// consensus of 2 to 24 symbols, so every generated model passes validation.
impl<'a> Arbitrary<'a> for ProfileModel {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        let template = ConsensusTemplate::arbitrary(u)?;
        let size = u.int_in_range(2..=MAX_MODEL_SIZE)?;
        let consensus = (0..size)
            .map(|_| u.choose(SYMBOLS).copied())
            .collect::<Result<Vec<_>>>()?;
        template.build(&consensus).map_err(|_| Error::IncorrectFormat)
    }
}

/// A wrapper around a query sequence whose
/// [`Arbitrary`](https://docs.rs/arbitrary/latest/arbitrary/trait.Arbitrary.html)
/// implementation only generates symbols that arbitrary models emit, so that
/// decoding it exercises the match states.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MotifQuery(pub Vec<u8>);

impl<'a> Arbitrary<'a> for MotifQuery {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        let len = u.arbitrary_len::<u8>()?;
        let seq = (0..len)
            .map(|_| u.choose(SYMBOLS).copied())
            .collect::<Result<Vec<_>>>()?;
        Ok(MotifQuery(seq))
    }
}

impl AsRef<[u8]> for MotifQuery {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn arbitrary_models_decode() {
        let data: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        let mut u = Unstructured::new(&data);

        for _ in 0..8 {
            let Ok(model) = ProfileModel::arbitrary(&mut u) else { break };
            let Ok(query) = MotifQuery::arbitrary(&mut u) else { break };
            assert!((2..=MAX_MODEL_SIZE).contains(&model.model_size()));
            if let Ok(path) = model.decode(&query) {
                assert_eq!(path.len(), query.0.len());
            }
        }
    }
}
