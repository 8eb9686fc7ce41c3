use eyre::Result;
use multalign_alignment_rs::Aligner;

use super::*;

const FRAGMENTS: [&str; 4] = [
    "MKTAYIAKQRQISFVKSHFSRQLE",
    "MKTAYIAKQRQIWDSFVKSHFSRQLE",
    "GSHMKTAYIAKQRQISF",
    "HFSRQLEERLGLIEVQ",
];

#[test]
fn test_identity() -> Result<()> {
    let aligner = aligner(-4.0);
    for sequence in FRAGMENTS {
        let results = aligner.align_pair(sequence, sequence)?;
        ensure_consistent(&[sequence, sequence], &results);
        assert_eq!(results.len(), 1);

        let alignment = results[0].alignment();
        assert!(alignment.is_gapless());
        assert_eq!(alignment.len(), sequence.len());
        assert!(alignment.conservation_line().chars().all(|x| x == '*'));
    }
    Ok(())
}

#[test]
fn test_symmetry() -> Result<()> {
    let aligner = aligner(-4.0);
    for (ind, a) in FRAGMENTS.into_iter().enumerate() {
        for b in FRAGMENTS[ind + 1..].iter().copied() {
            let forward = aligner.align_pair(a, b)?;
            let backward = aligner.align_pair(b, a)?;
            ensure_consistent(&[a, b], &forward);
            ensure_consistent(&[b, a], &backward);

            assert_eq!(forward[0].score(), backward[0].score());
            assert_eq!(forward.len(), backward.len());
        }
    }
    Ok(())
}

#[test]
fn test_three_fragments() -> Result<()> {
    let sequences = ["GSHMKTAYIAK", "MKTAYIAKQR", "HMKTWYIAK"];
    let results = aligner(-4.0).align_multiple(&sequences)?;
    ensure_consistent(&sequences, &results);

    // Gapped columns can only appear inside the alignment
    for result in &results {
        let alignment = result.alignment();
        if !alignment.is_empty() {
            assert!(alignment.column(0).unwrap().iter().all(|x| x.is_some()));
            let last = alignment.column(alignment.len() - 1).unwrap();
            assert!(last.iter().all(|x| x.is_some()));
        }
    }
    Ok(())
}

#[test]
fn test_wavefront_fill() -> Result<()> {
    let sequential = aligner(-4.0);
    let parallel = Aligner::builder(blosum62(-4.0)).set_threads(4)?.build();

    let workload: [&[&str]; 3] = [
        &FRAGMENTS[..2],
        &["GSHMKTAYIAK", "MKTAYIAKQR", "HMKTWYIAK"],
        &["MKVLA", "MKV", "KVL", "MVA"],
    ];
    for sequences in workload {
        let expected = sequential.align_multiple(sequences)?;
        let actual = parallel.par_align_multiple(sequences)?;
        assert_eq!(expected, actual);
    }

    // Depth 1 with a pool still works
    let results = parallel.par_align_multiple(&["MKVLA"])?;
    assert_eq!(rendered(&results), vec![vec!["MKVLA"]]);
    Ok(())
}

#[test]
fn test_budget() -> Result<()> {
    let sequences = ["GSHMKTAYIAK", "MKTAYIAKQR", "HMKTWYIAK"];
    // 12 * 11 * 10 cells, 8 moves per cell
    let required = 12 * 11 * 10 * 8;

    let aligner = Aligner::builder(blosum62(-4.0))
        .set_budget(required)?
        .build();
    assert!(aligner.align_multiple(&sequences).is_ok());

    let aligner = Aligner::builder(blosum62(-4.0))
        .set_budget(required - 1)?
        .build();
    assert!(aligner.align_multiple(&sequences).is_err());

    assert!(Aligner::builder(blosum62(-4.0)).set_budget(0).is_err());
    Ok(())
}
