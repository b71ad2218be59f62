use super::domain::{Domain, DomainType, Substrate};
use super::monomer::{Monomer, ParseMonomerError};
use serde::Deserialize;

/// Coarse classification of a backbone module by how it loads its building block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum ModuleType {
    /// A nonribosomal module loading an amino acid.
    Adenylation,
    /// A polyketide module loading an acyl extender unit.
    Acyltransferase,
    /// One residue of a ribosomally synthesized precursor peptide.
    Ribosomal,
}

/// One backbone position: a substrate-binding domain plus any embedded domains.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Module {
    pub kind: ModuleType,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub domains: Vec<Domain>,
}

fn default_active() -> bool {
    true
}

impl Module {
    pub fn new(kind: ModuleType, domains: Vec<Domain>) -> Self {
        Self {
            kind,
            active: true,
            domains,
        }
    }

    /// Builds a module around one substrate-binding domain predicting `monomer`.
    pub fn with_monomer(kind: ModuleType, monomer: Monomer) -> Self {
        let binding = match kind {
            ModuleType::Adenylation => DomainType::Adenylation,
            ModuleType::Acyltransferase => DomainType::Acyltransferase,
            ModuleType::Ribosomal => DomainType::Precursor,
        };
        let domain = Domain::new(binding).with_substrates(vec![Substrate::new(monomer, 100.0)]);
        Self::new(kind, vec![domain])
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domains.push(domain);
        self
    }

    /// The domain that selects this module's building block.
    pub fn scaffold_domain(&self) -> Option<&Domain> {
        self.domains.iter().find(|d| d.kind.is_substrate_binding())
    }

    /// The top-ranked monomer of the scaffold domain.
    pub fn top_substrate(&self) -> Option<Monomer> {
        self.scaffold_domain()
            .and_then(Domain::top_substrate)
            .map(|s| s.monomer)
    }

    /// Whether the module's top substrate is one of `allowed`.
    pub fn is_one_of(&self, allowed: &[Monomer]) -> bool {
        self.top_substrate().is_some_and(|m| allowed.contains(&m))
    }

    pub fn contains(&self, kind: DomainType) -> bool {
        self.domains.iter().any(|d| d.kind == kind)
    }

    /// Whether this exact domain is embedded in the module.
    pub fn contains_domain(&self, domain: &Domain) -> bool {
        self.domains.iter().any(|d| d == domain)
    }
}

/// An ordered, immutable sequence of modules describing one linear candidate chain.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Backbone {
    /// Identity used when attributing discarded branches.
    pub label: String,
    modules: Vec<Module>,
}

impl Backbone {
    pub fn new(label: impl Into<String>, modules: Vec<Module>) -> Self {
        Self {
            label: label.into(),
            modules,
        }
    }

    /// Builds a ribosomal backbone from a one-letter peptide sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ParseMonomerError`] for any character that is not a one-letter
    /// amino acid code.
    pub fn from_peptide(label: impl Into<String>, sequence: &str) -> Result<Self, ParseMonomerError> {
        let modules = sequence
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .map(|c| {
                c.to_string()
                    .parse::<Monomer>()
                    .map(|m| Module::with_monomer(ModuleType::Ribosomal, m))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(label, modules))
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn module(&self, position: usize) -> Option<&Module> {
        self.modules.get(position)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn top_substrate(&self, position: usize) -> Option<Monomer> {
        self.module(position).and_then(Module::top_substrate)
    }

    /// Positions whose top substrate is one of `allowed`, in backbone order.
    pub fn positions_of(&self, allowed: &[Monomer]) -> Vec<usize> {
        self.modules
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_one_of(allowed))
            .map(|(i, _)| i)
            .collect()
    }

    /// The position of the module that embeds `domain`, if any.
    pub fn position_of_domain(&self, domain: &Domain) -> Option<usize> {
        self.modules.iter().position(|m| m.contains_domain(domain))
    }
}
