use motif_hmm::prelude::*;
use std::env;

fn main() -> Result<(), PhmmError> {
    let args: Vec<String> = env::args().collect();

    let (consensus, sequence) = if args.len() == 3 {
        (args[1].clone(), args[2].clone())
    } else {
        ("ACGTAC".to_owned(), "ttgacgtacgg tacgtcacttt acgtaacgcc ggtacgagt".to_owned())
    };

    let model = ProfileModel::from_consensus(consensus.as_bytes())?;
    let cleaned = clean_sequence(sequence.as_bytes());
    let path = model.decode(&cleaned)?;

    if path.is_empty() {
        println!("No path was found.");
        return Ok(());
    }

    println!("\nSequence of length {} aligned to predicted states:\n", cleaned.len());
    print!("{}", AlignedPath::new(&cleaned, path.states()));

    let matches = model.find_matches(&cleaned)?;
    for (i, m) in matches.iter().enumerate() {
        println!("\nMatch {}:", i + 1);
        print!("{m}");
    }
    println!("Found {} matches in total.", matches.len());

    Ok(())
}
