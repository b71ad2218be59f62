use super::ids::ResidueId;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Chemical elements that can appear in scaffolds and tailoring fragments.
///
/// The set covers the organic subset of the line notation plus hydrogen, which is
/// enough for every residue template and every fragment spliced in by a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    Hydrogen,
    Boron,
    Carbon,
    Nitrogen,
    Oxygen,
    Fluorine,
    Phosphorus,
    Sulfur,
    Chlorine,
    Bromine,
    Iodine,
}

impl Element {
    /// Returns the canonical element symbol (e.g. `"C"`, `"Cl"`).
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Hydrogen => "H",
            Self::Boron => "B",
            Self::Carbon => "C",
            Self::Nitrogen => "N",
            Self::Oxygen => "O",
            Self::Fluorine => "F",
            Self::Phosphorus => "P",
            Self::Sulfur => "S",
            Self::Chlorine => "Cl",
            Self::Bromine => "Br",
            Self::Iodine => "I",
        }
    }

    /// Maximum number of bonds this element accepts when a fragment is spliced onto it.
    ///
    /// # Return
    ///
    /// Returns `Some(valence)` for carbon, nitrogen, oxygen and sulfur, the only
    /// elements that can act as functionalization targets, otherwise `None`.
    pub fn max_valence(self) -> Option<u8> {
        match self {
            Self::Carbon => Some(4),
            Self::Nitrogen => Some(3),
            Self::Oxygen => Some(2),
            Self::Sulfur => Some(2),
            _ => None,
        }
    }

    /// Whether this element may be written without brackets in the line notation.
    pub fn is_organic_subset(self) -> bool {
        !matches!(self, Self::Hydrogen)
    }

    /// Whether this element has a lowercase aromatic form in the line notation.
    pub fn can_be_aromatic(self) -> bool {
        matches!(
            self,
            Self::Boron | Self::Carbon | Self::Nitrogen | Self::Oxygen | Self::Phosphorus | Self::Sulfur
        )
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown element symbol: '{0}'")]
pub struct ParseElementError(pub String);

impl FromStr for Element {
    type Err = ParseElementError;

    /// Parses an element symbol. Lowercase aromatic symbols (`c`, `n`, `o`, `s`, `p`, `b`)
    /// map to their element; aromaticity itself is tracked on the atom.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "H" => Ok(Self::Hydrogen),
            "B" | "b" => Ok(Self::Boron),
            "C" | "c" => Ok(Self::Carbon),
            "N" | "n" => Ok(Self::Nitrogen),
            "O" | "o" => Ok(Self::Oxygen),
            "F" => Ok(Self::Fluorine),
            "P" | "p" => Ok(Self::Phosphorus),
            "S" | "s" => Ok(Self::Sulfur),
            "Cl" => Ok(Self::Chlorine),
            "Br" => Ok(Self::Bromine),
            "I" => Ok(Self::Iodine),
            _ => Err(ParseElementError(s.to_string())),
        }
    }
}

/// Orbital hybridization inferred from an atom's incident bonds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hybridization {
    Sp,
    Sp2,
    Sp3,
}

/// A single atom in a molecular graph.
///
/// Atoms carry no coordinates; connectivity lives in the owning
/// [`Molecule`](super::molecule::Molecule).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    /// The chemical element.
    pub element: Element,
    /// Formal charge in elementary charge units.
    pub charge: i8,
    /// Whether the atom was written in its aromatic (lowercase) form.
    pub aromatic: bool,
    /// Explicit hydrogen count carried over from a bracket atom such as `[nH]`.
    pub hydrogens: u8,
    /// The residue this atom belongs to, if any.
    pub residue_id: Option<ResidueId>,
}

impl Atom {
    pub fn new(element: Element) -> Self {
        Self {
            element,
            charge: 0,
            aromatic: false,
            hydrogens: 0,
            residue_id: None,
        }
    }

    pub fn aromatic(element: Element) -> Self {
        Self {
            aromatic: true,
            ..Self::new(element)
        }
    }

    pub fn with_charge(mut self, charge: i8) -> Self {
        self.charge = charge;
        self
    }

    pub fn with_hydrogens(mut self, hydrogens: u8) -> Self {
        self.hydrogens = hydrogens;
        self
    }

    pub fn is(&self, element: Element) -> bool {
        self.element == element
    }
}
