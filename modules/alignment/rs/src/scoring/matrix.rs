use derive_getters::Getters;
use eyre::{ensure, eyre, Result};

use super::symbols;
use super::Score;

/// Residue substitution scores over a byte alphabet. Lookups are case-insensitive and
/// residues outside of the alphabet score the matrix minimum.
#[derive(Clone, PartialEq, Debug, Getters)]
pub struct SubstitutionMatrix<S: Score> {
    name: String,
    alphabet: Vec<u8>,
    #[getter(skip)]
    index: [Option<u8>; 256],
    #[getter(skip)]
    scores: Vec<S>,
    #[getter(skip)]
    worst: S,
}

impl<S: Score> SubstitutionMatrix<S> {
    /// Builds a matrix from row-major scores, `scores[i * n + j]` is the score of `alphabet[i]`
    /// aligned against `alphabet[j]`. The matrix must be symmetric.
    pub fn new(name: impl Into<String>, alphabet: &[u8], scores: Vec<S>) -> Result<Self> {
        let size = alphabet.len();
        ensure!(
            (1..=u8::MAX as usize).contains(&size),
            "Substitution matrix alphabet must have between 1 and 255 residues, got {size}"
        );
        ensure!(
            scores.len() == size * size,
            "Expected {} substitution scores for {size} residues, got {}",
            size * size,
            scores.len()
        );

        let mut index = [None; 256];
        for (ind, residue) in alphabet.iter().enumerate() {
            let residue = residue.to_ascii_uppercase();
            ensure!(
                index[residue as usize].is_none(),
                "Residue '{}' is listed twice in the substitution matrix alphabet",
                residue as char
            );
            index[residue as usize] = Some(ind as u8);
            index[residue.to_ascii_lowercase() as usize] = Some(ind as u8);
        }

        for i in 0..size {
            for j in 0..i {
                ensure!(
                    scores[i * size + j] == scores[j * size + i],
                    "Substitution matrix must be symmetric: {}/{} scores {:?} and {:?}",
                    alphabet[i] as char,
                    alphabet[j] as char,
                    scores[i * size + j],
                    scores[j * size + i]
                );
            }
        }

        let worst = scores.iter().copied().fold(S::infinity(), S::min);
        Ok(Self {
            name: name.into(),
            alphabet: alphabet.to_vec(),
            index,
            scores,
            worst,
        })
    }

    /// BLOSUM62 as distributed by NCBI.
    pub fn blosum62() -> Result<Self> {
        let scores = BLOSUM62
            .iter()
            .map(|x| num::cast::<i8, S>(*x).ok_or_else(|| eyre!("Failed to convert {x} to a score")))
            .collect::<Result<Vec<_>>>()?;
        Self::new("BLOSUM62", BLOSUM62_ALPHABET, scores)
    }

    /// Score of two residues if both of them are in the alphabet.
    pub fn get(&self, a: u8, b: u8) -> Option<S> {
        let (i, j) = (self.index[a as usize]?, self.index[b as usize]?);
        Some(self.scores[i as usize * self.alphabet.len() + j as usize])
    }
}

impl<S: Score> symbols::Scorer for SubstitutionMatrix<S> {
    type Score = S;
    type Symbol = u8;

    #[inline(always)]
    fn score(&self, a: &Self::Symbol, b: &Self::Symbol) -> Self::Score {
        self.get(*a, *b).unwrap_or(self.worst)
    }
}

const BLOSUM62_ALPHABET: &[u8] = b"ARNDCQEGHILKMFPSTWYVBZX*";

#[rustfmt::skip]
const BLOSUM62: [i8; 24 * 24] = [
//   A   R   N   D   C   Q   E   G   H   I   L   K   M   F   P   S   T   W   Y   V   B   Z   X   *
     4, -1, -2, -2,  0, -1, -1,  0, -2, -1, -1, -1, -1, -2, -1,  1,  0, -3, -2,  0, -2, -1,  0, -4, // A
    -1,  5,  0, -2, -3,  1,  0, -2,  0, -3, -2,  2, -1, -3, -2, -1, -1, -3, -2, -3, -1,  0, -1, -4, // R
    -2,  0,  6,  1, -3,  0,  0,  0,  1, -3, -3,  0, -2, -3, -2,  1,  0, -4, -2, -3,  3,  0, -1, -4, // N
    -2, -2,  1,  6, -3,  0,  2, -1, -1, -3, -4, -1, -3, -3, -1,  0, -1, -4, -3, -3,  4,  1, -1, -4, // D
     0, -3, -3, -3,  9, -3, -4, -3, -3, -1, -1, -3, -1, -2, -3, -1, -1, -2, -2, -1, -3, -3, -2, -4, // C
    -1,  1,  0,  0, -3,  5,  2, -2,  0, -3, -2,  1,  0, -3, -1,  0, -1, -2, -1, -2,  0,  3, -1, -4, // Q
    -1,  0,  0,  2, -4,  2,  5, -2,  0, -3, -3,  1, -2, -3, -1,  0, -1, -3, -2, -2,  1,  4, -1, -4, // E
     0, -2,  0, -1, -3, -2, -2,  6, -2, -4, -4, -2, -3, -3, -2,  0, -2, -2, -3, -3, -1, -2, -1, -4, // G
    -2,  0,  1, -1, -3,  0,  0, -2,  8, -3, -3, -1, -2, -1, -2, -1, -2, -2,  2, -3,  0,  0, -1, -4, // H
    -1, -3, -3, -3, -1, -3, -3, -4, -3,  4,  2, -3,  1,  0, -3, -2, -1, -3, -1,  3, -3, -3, -1, -4, // I
    -1, -2, -3, -4, -1, -2, -3, -4, -3,  2,  4, -2,  2,  0, -3, -2, -1, -2, -1,  1, -4, -3, -1, -4, // L
    -1,  2,  0, -1, -3,  1,  1, -2, -1, -3, -2,  5, -1, -3, -1,  0, -1, -3, -2, -2,  0,  1, -1, -4, // K
    -1, -1, -2, -3, -1,  0, -2, -3, -2,  1,  2, -1,  5,  0, -2, -1, -1, -1, -1,  1, -3, -1, -1, -4, // M
    -2, -3, -3, -3, -2, -3, -3, -3, -1,  0,  0, -3,  0,  6, -4, -2, -2,  1,  3, -1, -3, -3, -1, -4, // F
    -1, -2, -2, -1, -3, -1, -1, -2, -2, -3, -3, -1, -2, -4,  7, -1, -1, -4, -3, -2, -2, -1, -2, -4, // P
     1, -1,  1,  0, -1,  0,  0,  0, -1, -2, -2,  0, -1, -2, -1,  4,  1, -3, -2, -2,  0,  0,  0, -4, // S
     0, -1,  0, -1, -1, -1, -1, -2, -2, -1, -1, -1, -1, -2, -1,  1,  5, -2, -2,  0, -1, -1,  0, -4, // T
    -3, -3, -4, -4, -2, -2, -3, -2, -2, -3, -2, -3, -1,  1, -4, -3, -2, 11,  2, -3, -4, -3, -2, -4, // W
    -2, -2, -2, -3, -2, -1, -2, -3,  2, -1, -1, -2, -1,  3, -3, -2, -2,  2,  7, -1, -3, -2, -1, -4, // Y
     0, -3, -3, -3, -1, -2, -2, -3, -3,  3,  1, -2,  1, -1, -2, -2,  0, -3, -1,  4, -3, -2, -1, -4, // V
    -2, -1,  3,  4, -3,  0,  1, -1,  0, -3, -4,  0, -3, -3, -2,  0, -1, -4, -3, -3,  4,  1, -1, -4, // B
    -1,  0,  0,  1, -3,  3,  4, -2,  0, -3, -3,  1, -1, -3, -1,  0, -1, -3, -2, -2,  1,  4, -1, -4, // Z
     0, -1, -1, -1, -2, -1, -1, -1, -1, -1, -1, -1, -1, -1, -2,  0,  0, -2, -1, -1, -1, -1, -1, -4, // X
    -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4,  1, // *
];
