use multalign_alignment_rs::scoring::{SubstitutionMatrix, SumOfPairs};
use multalign_alignment_rs::{Aligner, ScoredAlignment};

mod properties;
mod scenarios;

pub type Scorer = SumOfPairs<SubstitutionMatrix<f64>>;

pub fn blosum62(gap: f64) -> Scorer {
    SumOfPairs::new(SubstitutionMatrix::blosum62().unwrap(), gap)
}

pub fn aligner(gap: f64) -> Aligner<Scorer> {
    Aligner::new(blosum62(gap))
}

/// Shared invariants of any reported result set for byte sequences.
pub fn ensure_consistent(sequences: &[&str], results: &[ScoredAlignment<f64, u8>]) {
    assert!(!results.is_empty());
    let score = *results[0].score();

    for result in results {
        // Every path reproduces the final cell bit for bit
        assert_eq!(result.score().to_bits(), score.to_bits());

        let alignment = result.alignment();
        assert_eq!(alignment.depth(), sequences.len());
        for (row, sequence) in alignment.rows().iter().zip(sequences) {
            assert_eq!(row.len(), alignment.len());

            let residues: Vec<u8> = row.residues().copied().collect();
            assert_eq!(residues, sequence.as_bytes()[row.range().clone()].to_vec());
        }
    }
}

pub fn rendered(results: &[ScoredAlignment<f64, u8>]) -> Vec<Vec<String>> {
    results.iter().map(|x| x.alignment().to_text('-')).collect()
}
