/// `Conservation` summarizes a single alignment column.
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Conservation {
    /// At least one sequence has a gap in the column (-)
    Gapped,
    /// All sequences have a residue, but not the same one (.)
    Variable,
    /// All sequences carry the identical residue (*)
    Identical,
}

impl Conservation {
    /// Classifies a column, `None` marks a gap.
    pub fn classify<Symbol: PartialEq>(column: &[Option<&Symbol>]) -> Self {
        if column.iter().any(|x| x.is_none()) {
            return Conservation::Gapped;
        }
        let mut residues = column.iter().flatten();
        match residues.next() {
            Some(first) if residues.all(|x| x == first) => Conservation::Identical,
            _ => Conservation::Variable,
        }
    }

    /// Returns true if every sequence has a residue in the column.
    pub fn is_gapless(&self) -> bool {
        matches!(self, Conservation::Variable | Conservation::Identical)
    }

    /// Returns the symbol representation of the column class.
    pub fn symbol(&self) -> char {
        match self {
            Conservation::Gapped => '-',
            Conservation::Variable => '.',
            Conservation::Identical => '*',
        }
    }
}

impl TryFrom<char> for Conservation {
    type Error = ();

    /// Tries to convert a character into a `Conservation`.
    /// Returns an error if the character does not represent a valid column class.
    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '-' => Ok(Conservation::Gapped),
            '.' => Ok(Conservation::Variable),
            '*' => Ok(Conservation::Identical),
            _ => Err(()),
        }
    }
}
