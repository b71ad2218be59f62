use super::monomer::Monomer;
use serde::Deserialize;
use std::fmt;

/// Closed set of enzyme-domain types known to the tailoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub enum DomainType {
    // --- Modular assembly-line domains ---
    Adenylation,
    Acyltransferase,
    Condensation,
    Heterocyclization,
    Ketoreductase,
    Dehydratase,
    Enoylreductase,
    NMethyltransferase,
    CMethyltransferase,
    OMethyltransferase,

    // --- Standalone tailoring enzymes ---
    Sulfotransferase,
    Carbamoyltransferase,
    Chlorination,
    Formyltransferase,
    Glycosyltransferase,

    // --- Glycopeptide cytochrome P450 crosslinking enzymes ---
    P450A,
    P450B,
    P450C,
    P450D,

    // --- Ribosomal peptide enzymes ---
    Precursor,
    LanB,
    LazB,
    LanC,
    LanM,
    ProcA,
    LanKC,
    LanD,
    ElxO,
    MdnD,
    PaeN,
    PatG,
    YmF,
    AlbE,
    AlbF,
    AsparagineSynthase,
    LassoPrecursor,
    SkfH,
    BdbB,
    AlbA,
    LazE,
    LazF,
    LazC,
    LazCb,
    McbB,
    McbC,
    McbD,
    PatD,
}

impl DomainType {
    /// Every domain type, in declaration order.
    pub const ALL: [DomainType; 47] = [
        Self::Adenylation,
        Self::Acyltransferase,
        Self::Condensation,
        Self::Heterocyclization,
        Self::Ketoreductase,
        Self::Dehydratase,
        Self::Enoylreductase,
        Self::NMethyltransferase,
        Self::CMethyltransferase,
        Self::OMethyltransferase,
        Self::Sulfotransferase,
        Self::Carbamoyltransferase,
        Self::Chlorination,
        Self::Formyltransferase,
        Self::Glycosyltransferase,
        Self::P450A,
        Self::P450B,
        Self::P450C,
        Self::P450D,
        Self::Precursor,
        Self::LanB,
        Self::LazB,
        Self::LanC,
        Self::LanM,
        Self::ProcA,
        Self::LanKC,
        Self::LanD,
        Self::ElxO,
        Self::MdnD,
        Self::PaeN,
        Self::PatG,
        Self::YmF,
        Self::AlbE,
        Self::AlbF,
        Self::AsparagineSynthase,
        Self::LassoPrecursor,
        Self::SkfH,
        Self::BdbB,
        Self::AlbA,
        Self::LazE,
        Self::LazF,
        Self::LazC,
        Self::LazCb,
        Self::McbB,
        Self::McbC,
        Self::McbD,
        Self::PatD,
    ];

    /// Whether this domain selects the building block of its module.
    pub fn is_substrate_binding(self) -> bool {
        matches!(
            self,
            Self::Adenylation | Self::Acyltransferase | Self::Precursor
        )
    }
}

impl fmt::Display for DomainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A candidate building block predicted for a substrate-binding domain.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Substrate {
    pub monomer: Monomer,
    pub score: f64,
}

impl Substrate {
    pub fn new(monomer: Monomer, score: f64) -> Self {
        Self { monomer, score }
    }
}

/// An identified sequence feature with an enzymatic or binding function.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Domain {
    /// The closed-set type tag.
    pub kind: DomainType,
    /// Start of the feature within its open reading frame.
    #[serde(default)]
    pub start: usize,
    /// End of the feature within its open reading frame.
    #[serde(default)]
    pub end: usize,
    /// Confidence score reported by the domain caller.
    #[serde(default)]
    pub score: f64,
    /// Candidate substrates, best first.
    #[serde(default)]
    substrates: Vec<Substrate>,
    /// Names of the closest characterized homologs, best first.
    #[serde(default)]
    pub homologs: Vec<String>,
}

impl Domain {
    pub fn new(kind: DomainType) -> Self {
        Self {
            kind,
            start: 0,
            end: 0,
            score: 0.0,
            substrates: Vec::new(),
            homologs: Vec::new(),
        }
    }

    pub fn with_range(mut self, start: usize, end: usize) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    /// Sets the candidate substrates, ranking them by descending score.
    ///
    /// Ties keep their given order.
    pub fn with_substrates(mut self, mut substrates: Vec<Substrate>) -> Self {
        substrates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        self.substrates = substrates;
        self
    }

    pub fn with_homolog(mut self, name: impl Into<String>) -> Self {
        self.homologs.push(name.into());
        self
    }

    /// Ranked substrates, best first.
    pub fn substrates(&self) -> &[Substrate] {
        &self.substrates
    }

    /// The highest-ranked substrate, if any was predicted.
    pub fn top_substrate(&self) -> Option<&Substrate> {
        self.substrates.first()
    }
}
