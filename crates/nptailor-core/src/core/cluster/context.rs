use super::domain::{Domain, DomainType};
use super::sugar::Sugar;
use serde::Deserialize;

/// Broad biosynthetic family assigned to a cluster upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum ClusterFamily {
    Nonribosomal,
    TypeIPolyketide,
    Ribosomal,
}

/// Finer ribosomal peptide class assigned to a cluster upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum ClusterType {
    Lantipeptide,
    LinearAzolePeptide,
    LassoPeptide,
    Sactipeptide,
    Cyanobactin,
    Linaridin,
}

/// Read-only queries about the cluster a backbone came from.
///
/// Implemented upstream; the engine only consults it for cross-domain gating.
pub trait ClusterContext {
    /// Every enzyme domain detected in the cluster, in detection order.
    fn domains(&self) -> &[Domain];

    fn families(&self) -> &[ClusterFamily];

    fn types(&self) -> &[ClusterType];

    /// Alternative sugar sets the cluster can supply, one sugar per glycosylation
    /// in domain order.
    fn sugar_combinations(&self) -> &[Vec<Sugar>] {
        &[]
    }

    /// Whether the cluster contains at least one domain of `kind`.
    fn contains(&self, kind: DomainType) -> bool {
        self.domains().iter().any(|d| d.kind == kind)
    }

    fn is_family(&self, family: ClusterFamily) -> bool {
        self.families().contains(&family)
    }

    fn is_type(&self, cluster_type: ClusterType) -> bool {
        self.types().contains(&cluster_type)
    }
}

/// In-memory cluster description.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Cluster {
    #[serde(default)]
    pub domains: Vec<Domain>,
    #[serde(default)]
    pub families: Vec<ClusterFamily>,
    #[serde(default)]
    pub types: Vec<ClusterType>,
    #[serde(default)]
    pub sugars: Vec<Vec<Sugar>>,
}

impl Cluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domains.push(domain);
        self
    }

    /// Adds a bare domain of each given type.
    pub fn with_domains(mut self, kinds: &[DomainType]) -> Self {
        self.domains.extend(kinds.iter().map(|&k| Domain::new(k)));
        self
    }

    pub fn with_family(mut self, family: ClusterFamily) -> Self {
        self.families.push(family);
        self
    }

    pub fn with_type(mut self, cluster_type: ClusterType) -> Self {
        self.types.push(cluster_type);
        self
    }

    pub fn with_sugars(mut self, sugars: Vec<Sugar>) -> Self {
        self.sugars.push(sugars);
        self
    }
}

impl ClusterContext for Cluster {
    fn domains(&self) -> &[Domain] {
        &self.domains
    }

    fn families(&self) -> &[ClusterFamily] {
        &self.families
    }

    fn types(&self) -> &[ClusterType] {
        &self.types
    }

    fn sugar_combinations(&self) -> &[Vec<Sugar>] {
        &self.sugars
    }
}
