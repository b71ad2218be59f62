use phf::{Map, phf_map};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Building blocks that a substrate-binding domain can load onto an assembly line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub enum Monomer {
    Alanine,
    Arginine,
    Asparagine,
    AsparticAcid,
    Cysteine,
    GlutamicAcid,
    Glutamine,
    Glycine,
    Histidine,
    Isoleucine,
    Leucine,
    Lysine,
    Methionine,
    Phenylalanine,
    Proline,
    Serine,
    Threonine,
    Tryptophan,
    Tyrosine,
    Valine,
    Ornithine,
    Hydroxyphenylglycine,
    Dihydroxyphenylglycine,
    BetaHydroxytyrosine,
    Malonyl,
    Methylmalonyl,
}

static MONOMER_CODES: Map<&'static str, Monomer> = phf_map! {
    "A" => Monomer::Alanine, "Ala" => Monomer::Alanine,
    "R" => Monomer::Arginine, "Arg" => Monomer::Arginine,
    "N" => Monomer::Asparagine, "Asn" => Monomer::Asparagine,
    "D" => Monomer::AsparticAcid, "Asp" => Monomer::AsparticAcid,
    "C" => Monomer::Cysteine, "Cys" => Monomer::Cysteine,
    "E" => Monomer::GlutamicAcid, "Glu" => Monomer::GlutamicAcid,
    "Q" => Monomer::Glutamine, "Gln" => Monomer::Glutamine,
    "G" => Monomer::Glycine, "Gly" => Monomer::Glycine,
    "H" => Monomer::Histidine, "His" => Monomer::Histidine,
    "I" => Monomer::Isoleucine, "Ile" => Monomer::Isoleucine,
    "L" => Monomer::Leucine, "Leu" => Monomer::Leucine,
    "K" => Monomer::Lysine, "Lys" => Monomer::Lysine,
    "M" => Monomer::Methionine, "Met" => Monomer::Methionine,
    "F" => Monomer::Phenylalanine, "Phe" => Monomer::Phenylalanine,
    "P" => Monomer::Proline, "Pro" => Monomer::Proline,
    "S" => Monomer::Serine, "Ser" => Monomer::Serine,
    "T" => Monomer::Threonine, "Thr" => Monomer::Threonine,
    "W" => Monomer::Tryptophan, "Trp" => Monomer::Tryptophan,
    "Y" => Monomer::Tyrosine, "Tyr" => Monomer::Tyrosine,
    "V" => Monomer::Valine, "Val" => Monomer::Valine,
    "Orn" => Monomer::Ornithine,
    "Hpg" => Monomer::Hydroxyphenylglycine,
    "Dpg" => Monomer::Dihydroxyphenylglycine,
    "Bht" => Monomer::BetaHydroxytyrosine,
    "Mal" => Monomer::Malonyl,
    "MeMal" => Monomer::Methylmalonyl,
};

impl Monomer {
    /// The three-letter (or short) code, e.g. `"Ser"`, `"MeMal"`.
    pub fn code(self) -> &'static str {
        match self {
            Self::Alanine => "Ala",
            Self::Arginine => "Arg",
            Self::Asparagine => "Asn",
            Self::AsparticAcid => "Asp",
            Self::Cysteine => "Cys",
            Self::GlutamicAcid => "Glu",
            Self::Glutamine => "Gln",
            Self::Glycine => "Gly",
            Self::Histidine => "His",
            Self::Isoleucine => "Ile",
            Self::Leucine => "Leu",
            Self::Lysine => "Lys",
            Self::Methionine => "Met",
            Self::Phenylalanine => "Phe",
            Self::Proline => "Pro",
            Self::Serine => "Ser",
            Self::Threonine => "Thr",
            Self::Tryptophan => "Trp",
            Self::Tyrosine => "Tyr",
            Self::Valine => "Val",
            Self::Ornithine => "Orn",
            Self::Hydroxyphenylglycine => "Hpg",
            Self::Dihydroxyphenylglycine => "Dpg",
            Self::BetaHydroxytyrosine => "Bht",
            Self::Malonyl => "Mal",
            Self::Methylmalonyl => "MeMal",
        }
    }

    /// Whether this monomer is a polyketide extender unit rather than an amino acid.
    pub fn is_extender_unit(self) -> bool {
        matches!(self, Self::Malonyl | Self::Methylmalonyl)
    }

    /// Whether the side chain carries a free hydroxyl group.
    pub fn bears_hydroxyl(self) -> bool {
        matches!(
            self,
            Self::Serine
                | Self::Threonine
                | Self::Tyrosine
                | Self::Hydroxyphenylglycine
                | Self::Dihydroxyphenylglycine
                | Self::BetaHydroxytyrosine
        )
    }

    /// Whether the side chain is a phenol that oxidative aryl coupling can use.
    pub fn is_phenolic(self) -> bool {
        matches!(
            self,
            Self::Tyrosine
                | Self::Hydroxyphenylglycine
                | Self::Dihydroxyphenylglycine
                | Self::BetaHydroxytyrosine
        )
    }

    pub fn is_serine_or_threonine(self) -> bool {
        matches!(self, Self::Serine | Self::Threonine)
    }
}

impl fmt::Display for Monomer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown monomer code: '{0}'")]
pub struct ParseMonomerError(pub String);

impl FromStr for Monomer {
    type Err = ParseMonomerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MONOMER_CODES
            .get(s.trim())
            .copied()
            .ok_or_else(|| ParseMonomerError(s.to_string()))
    }
}

impl TryFrom<String> for Monomer {
    type Error = ParseMonomerError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
