use motif_hmm::prelude::*;
use proptest::prelude::*;

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn distinct_consensus(sizes: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = Vec<u8>> {
    proptest::sample::subsequence(LETTERS.to_vec(), sizes).prop_shuffle()
}

fn all_matches(n: usize) -> Vec<StateLabel> {
    (1..=n).map(StateLabel::Match).collect()
}

proptest! {
    #[test]
    fn consensus_decodes_to_match_states(consensus in distinct_consensus(4..=12)) {
        let model = ProfileModel::from_consensus(&consensus).unwrap();
        let path = model.decode(&consensus).unwrap();
        prop_assert_eq!(path.states(), all_matches(consensus.len()));
    }

    #[test]
    fn consensus_decodes_with_eager_template(consensus in distinct_consensus(2..=13)) {
        let template = ConsensusTemplate {
            random_to_random: 0.5,
            random_to_match: 0.45,
            random_to_delete: 0.05,
            ..ConsensusTemplate::default()
        };
        let model = template.build(&consensus).unwrap();
        let path = model.decode(&consensus).unwrap();
        prop_assert_eq!(path.states(), all_matches(consensus.len()));
    }

    #[test]
    fn paths_are_well_formed(consensus in "[ACGT]{2,8}", query in "[acgtxACGTX -]{0,40}") {
        let model = ProfileModel::from_consensus(consensus.as_bytes()).unwrap();
        let cleaned = clean_sequence(query.as_bytes());
        let path = model.decode(&query).unwrap();

        prop_assert_eq!(path.len(), cleaned.len());
        for &state in &path {
            prop_assert!(state.exists_in(model.model_size()));
            prop_assert!(!matches!(state, StateLabel::Delete(_)));
        }
        prop_assert_eq!(model.decode(&query).unwrap(), path);
    }

    #[test]
    fn segments_respect_threshold(consensus in "[ACGT]{2,8}", query in "[ACGTX]{0,60}", minimum in 0usize..6) {
        let model = ProfileModel::from_consensus(consensus.as_bytes()).unwrap();
        let path = model.decode(&query).unwrap();

        let config = DecodeConfig::new().with_minimum_matches(minimum);
        let matches = model.find_matches_with(&query, &config).unwrap();
        let threshold = if minimum == 0 { model.default_minimum_matches() } else { minimum };

        let mut covered_until = 0;
        for m in &matches {
            prop_assert!(m.match_count() >= threshold);
            prop_assert!(m.start() >= covered_until);
            prop_assert!(m.states().iter().all(|s| !s.is_random()));
            prop_assert_eq!(m.states(), &path.states()[m.start()..m.end()]);
            prop_assert!(m.end() == path.len() || path[m.end()].is_random());
            covered_until = m.end();
        }

        // With no threshold every non-random label belongs to some segment
        let everything = motif_hmm::phmm::segment_path(path.states(), query.as_bytes(), 0);
        let covered: usize = everything.iter().map(PatternMatch::len).sum();
        prop_assert_eq!(covered, path.iter().filter(|s| !s.is_random()).count());
    }
}
