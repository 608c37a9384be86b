use motif_hmm::prelude::*;

fn two_position_model() -> ProfileModel {
    let emissions = MatchEmissions::new().with(1, b'A', 1.0).with(2, b'B', 1.0);
    let transitions = TransitionProbabilities::parse_entries([
        ("R", "R", 0.9),
        ("R", "M1", 0.05),
        ("R", "D1", 0.05),
        ("M1", "I1", 0.3),
        ("M1", "M2", 0.6),
        ("M1", "D2", 0.1),
        ("D1", "M2", 0.9),
        ("D1", "D2", 0.1),
        ("M2", "R", 0.9),
        ("D2", "R", 1.0),
    ])
    .unwrap();
    ProfileModel::new(emissions, transitions).unwrap()
}

#[test]
fn matches_align_with_their_parts() {
    let model = two_position_model();
    let config = DecodeConfig::new().with_minimum_matches(1);
    let matches = model.find_matches_with(b"xy-ab zw xyab", &config).unwrap();

    assert_eq!(matches.len(), 2);
    let parts: Vec<_> = matches.into_iter().map(PatternMatch::into_parts).collect();
    assert_eq!(parts[0], (vec![StateLabel::Match(1), StateLabel::Match(2)], (2, b"AB".to_vec())));
    assert_eq!(parts[1], (vec![StateLabel::Match(1), StateLabel::Match(2)], (8, b"AB".to_vec())));
}

#[test]
fn paths_cover_the_cleaned_query() {
    let model = ProfileModel::from_consensus(b"HELLO").unwrap();
    let query = b"xx hello, world! hell0 HELO";
    let path = model.decode(query).unwrap();
    assert_eq!(path.len(), clean_sequence(query).len());
    assert!(path.iter().all(|s| !matches!(s, StateLabel::Delete(_))));
}

#[test]
fn one_model_many_threads() {
    let model = ProfileModel::from_consensus(b"ACGTAC").unwrap();
    let queries: [&[u8]; 4] = [b"TTTACGTACTTT", b"ZZACGTACZZ", b"QQQQACGTACQQ", b"ACGTACNNACGTAC"];
    let expected: Vec<_> = queries.iter().map(|q| model.clone().decode(q).unwrap()).collect();

    std::thread::scope(|s| {
        let handles: Vec<_> = queries
            .iter()
            .map(|&q| {
                let model = &model;
                s.spawn(move || {
                    (0..10)
                        .map(|_| model.decode(q).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for (handle, expected) in handles.into_iter().zip(&expected) {
            for path in handle.join().unwrap() {
                assert_eq!(&path, expected);
            }
        }
    });

    assert_eq!(model.cached_alphabets(), 4);
}

#[cfg(feature = "rand")]
#[test]
fn planted_motifs_are_found() {
    const MOTIF: &[u8] = b"KLMNPQRS";

    let model = ProfileModel::from_consensus(MOTIF).unwrap();
    for seed in 0..20 {
        let (seq, starts) = rand_sequence_with_motifs(b"ACGT", MOTIF, 300, 4, seed);
        let matches = model.find_matches(&seq).unwrap();

        let found: Vec<_> = matches.iter().map(PatternMatch::start).collect();
        assert_eq!(found, starts, "seed {seed}");
        for m in &matches {
            assert_eq!(m.symbols(), MOTIF);
            assert_eq!(m.match_count(), MOTIF.len());
        }
    }
}

#[cfg(feature = "rand")]
#[test]
fn background_only() {
    let model = ProfileModel::from_consensus(b"KLMNPQRS").unwrap();
    let seq = rand_sequence(b"ACGT", 1000, 3);
    let path = model.decode(&seq).unwrap();
    assert!(path.iter().all(|s| s.is_random()));
    assert!(model.find_matches(&seq).unwrap().is_empty());
}
