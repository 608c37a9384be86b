use motif_hmm::prelude::*;

fn main() -> Result<(), PhmmError> {
    const UNIT: &[u8] = b"CAGTTC";

    // Tandem runs of the repeat unit, with one mutated copy in the middle run
    let (mut seq, starts) = rand_sequence_with_motifs(b"ACGT", &UNIT.repeat(3), 600, 5, 2024);
    seq[starts[2] + UNIT.len() + 2] = b'A';

    let template = ConsensusTemplate {
        last_match_to_first: 0.5,
        last_match_to_random: 0.5,
        ..ConsensusTemplate::default()
    };
    let model = template.build(UNIT)?;

    let config = DecodeConfig::new().with_minimum_matches(UNIT.len());
    for m in model.find_matches_with(&seq, &config)? {
        let copies = m.match_count() as f64 / UNIT.len() as f64;
        println!("{:>5}..{:<5} {:.1} copies  {}", m.start(), m.end(), copies, String::from_utf8_lossy(m.symbols()));
    }

    println!("Planted runs start at {starts:?}");
    Ok(())
}
