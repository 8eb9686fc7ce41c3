use eyre::Result;
use multalign_alignment_rs::scoring::{Profile, Profiled, SubstitutionMatrix, SumOfPairs};
use multalign_alignment_rs::Aligner;

use super::*;

struct Workload<'a> {
    sequences: Vec<&'a str>,
    score: f64,
    alignments: Vec<Vec<&'a str>>,
}

fn ensure(aligner: &Aligner<Scorer>, w: Workload<'_>) -> Result<()> {
    let results = aligner.align_multiple(&w.sequences)?;
    ensure_consistent(&w.sequences, &results);

    assert_eq!(*results[0].score(), w.score);
    let mut alignments = rendered(&results);
    alignments.sort();
    assert_eq!(alignments, w.alignments);
    Ok(())
}

#[test]
fn test_identical_pair() -> Result<()> {
    let aligner = aligner(-4.0);
    ensure(
        &aligner,
        Workload {
            sequences: vec!["MKVLA", "MKVLA"],
            score: 22.0,
            alignments: vec![vec!["MKVLA", "MKVLA"]],
        },
    )
}

#[test]
fn test_identical_triple() -> Result<()> {
    let aligner = aligner(-4.0);
    ensure(
        &aligner,
        Workload {
            sequences: vec!["MKVLA", "MKVLA", "MKVLA"],
            score: 22.0,
            alignments: vec![vec!["MKVLA", "MKVLA", "MKVLA"]],
        },
    )
}

#[test]
fn test_protein_fragments() -> Result<()> {
    let aligner = aligner(-4.0);
    // N-termini of the human hemoglobin alpha and beta chains
    let (alpha, beta) = ("VLSPADKTNVKAAWGKVGAHAGEYGA", "VHLTPEEKSAVTALWGKVNVDEVGGE");
    let (alpha_row, beta_row) = ("V-LSPADKTNVKAAWGKVGA-HAGEYGA", "VHLTPEEKSAVTALWGKVNVDEVG--GE");

    ensure(
        &aligner,
        Workload {
            sequences: vec![alpha, beta],
            score: 48.0,
            alignments: vec![vec![alpha_row, beta_row]],
        },
    )?;
    ensure(
        &aligner,
        Workload {
            sequences: vec![beta, alpha],
            score: 48.0,
            alignments: vec![vec![beta_row, alpha_row]],
        },
    )?;

    let results = aligner.align_pair(alpha, beta)?;
    let alignment = results[0].alignment();
    assert!(alignment.len() > alpha.len().max(beta.len()));
    assert!(alignment.rows().iter().all(|row| row.gaps() > 0));
    Ok(())
}

#[test]
fn test_inner_gap() -> Result<()> {
    // Non-dyadic gap score, must be reproduced exactly during backtracking
    let aligner = aligner(-0.3);
    ensure(
        &aligner,
        Workload {
            sequences: vec!["ACGT", "AGT"],
            score: ((4.0f64 + -0.3) + 6.0) + 5.0,
            alignments: vec![vec!["ACGT", "A-GT"]],
        },
    )
}

#[test]
fn test_single_sequence() -> Result<()> {
    let aligner = aligner(-4.0);
    ensure(
        &aligner,
        Workload {
            sequences: vec!["MKVLA"],
            score: 0.0,
            alignments: vec![vec!["MKVLA"]],
        },
    )
}

#[test]
fn test_empty_member() -> Result<()> {
    let sequences = ["MKV", "", "MV"];
    let results = aligner(-4.0).align_multiple(&sequences)?;
    ensure_consistent(&sequences, &results);

    // All columns have a gap: 3 ways to place "MV" under "MKV", all of them trimmed away
    assert_eq!(results.len(), 3);
    for result in &results {
        assert_eq!(*result.score(), -12.0);
        assert!(result.alignment().is_empty());
        assert_eq!(result.alignment().depth(), 3);
    }
    Ok(())
}

#[test]
fn test_all_empty() -> Result<()> {
    let sequences = ["", ""];
    let results = aligner(-4.0).align_multiple(&sequences)?;
    assert_eq!(results.len(), 1);
    assert_eq!(*results[0].score(), 0.0);
    assert!(results[0].alignment().is_empty());
    assert_eq!(results[0].alignment().depth(), 2);

    let none: [&str; 0] = [];
    assert!(aligner(-4.0).align_multiple(&none)?.is_empty());
    Ok(())
}

#[test]
fn test_flank_trimming() -> Result<()> {
    let trimmed = aligner(-1.0).align_pair("MKVLA", "MKV")?;
    assert_eq!(trimmed.len(), 1);
    assert_eq!(*trimmed[0].score(), 12.0);
    assert_eq!(rendered(&trimmed), vec![vec!["MKV", "MKV"]]);
    for row in trimmed[0].alignment().rows() {
        assert_eq!(row.range(), &(0..3));
    }

    let full = Aligner::builder(blosum62(-1.0))
        .set_trim_flanks(false)
        .build()
        .align_pair("MKVLA", "MKV")?;
    assert_eq!(full.len(), 1);
    assert_eq!(*full[0].score(), 12.0);
    assert_eq!(rendered(&full), vec![vec!["MKVLA", "MKV--"]]);
    let rows = full[0].alignment().rows();
    assert_eq!(rows[0].range(), &(0..5));
    assert_eq!(rows[1].range(), &(0..3));
    assert_eq!(full[0].alignment().conservation_line(), "***--");
    Ok(())
}

#[test]
fn test_profile_block() -> Result<()> {
    let aligner = Aligner::new(SumOfPairs::new(
        Profiled::new(SubstitutionMatrix::<f64>::blosum62()?),
        -1.0,
    ));
    // Five identical profile positions: W fits any of them, P fits none
    let block = vec![Profile::uniform([b'W', b'C'])?; 5];
    let sequence: Vec<_> = b"PPWPP".iter().copied().map(Profile::singleton).collect();

    let results = aligner.align_pair(&sequence, &block)?;
    // Every interleaving of the 8 gapped columns around the W column is a distinct path
    assert_eq!(results.len(), 126);

    let mut offsets = Vec::new();
    for result in &results {
        // W/W = 11 and W/C = -2 with equal weights, plus 8 gapped columns
        assert_eq!(*result.score(), -3.5);

        let alignment = result.alignment();
        assert_eq!(alignment.depth(), 2);
        assert_eq!(alignment.len(), 1);
        assert_eq!(alignment.rows()[0].range(), &(2..3));
        offsets.push(alignment.rows()[1].range().start);
    }
    offsets.sort();
    offsets.dedup();
    assert_eq!(offsets, vec![0, 1, 2, 3, 4]);
    Ok(())
}

#[test]
fn test_profile_offsets() -> Result<()> {
    let aligner = Aligner::new(SumOfPairs::new(
        Profiled::new(SubstitutionMatrix::<f64>::blosum62()?),
        -4.0,
    ));
    let column = vec![Profile::uniform([b'W', b'Y'])?];

    let workload = [("WWWWW", 5), ("FWYHW", 2), ("MKVLA", 1)];
    for (sequence, expected) in workload {
        let sequence: Vec<_> = sequence.bytes().map(Profile::singleton).collect();
        let results = aligner.align_pair(&sequence, &column)?;
        assert_eq!(results.len(), expected);

        let score = *results[0].score();
        let mut starts = Vec::new();
        for result in &results {
            assert_eq!(*result.score(), score);

            let alignment = result.alignment();
            assert_eq!(alignment.depth(), 2);
            assert_eq!(alignment.len(), 1);
            assert_eq!(alignment.rows()[1].range(), &(0..1));
            starts.push(alignment.rows()[0].range().start);
        }
        starts.sort();
        starts.dedup();
        assert_eq!(starts.len(), expected);
    }

    // W/W = 11 and W/Y = 2 with equal weights, plus 4 gapped columns
    let sequence: Vec<_> = b"WWWWW".iter().copied().map(Profile::singleton).collect();
    let results = aligner.align_pair(&sequence, &column)?;
    assert_eq!(*results[0].score(), -9.5);
    Ok(())
}
