use super::annotators::AnnotatorKind;
use super::config::TailoringConfig;
use super::plan::SubstrateSet;
use super::progress::ProgressReporter;
use crate::core::cluster::backbone::Backbone;
use crate::core::cluster::context::ClusterContext;
use crate::core::cluster::domain::Domain;
use tracing::trace;

/// Read-only inputs shared by every phase of a tailoring run.
pub struct TailoringContext<'a, C>
where
    C: ClusterContext + Sync + ?Sized,
{
    pub cluster: &'a C,
    pub config: &'a TailoringConfig,
    pub reporter: &'a ProgressReporter<'a>,
}

impl<C> Clone for TailoringContext<'_, C>
where
    C: ClusterContext + Sync + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for TailoringContext<'_, C> where C: ClusterContext + Sync + ?Sized {}

impl<'a, C> TailoringContext<'a, C>
where
    C: ClusterContext + Sync + ?Sized,
{
    pub fn new(
        cluster: &'a C,
        config: &'a TailoringConfig,
        reporter: &'a ProgressReporter<'a>,
    ) -> Self {
        Self {
            cluster,
            config,
            reporter,
        }
    }

    /// Candidate sites of every tailoring domain of the cluster on `backbone`, in
    /// cluster domain order. Domains without an annotator are left out.
    pub fn annotate(&self, backbone: &Backbone) -> Vec<(Domain, Vec<SubstrateSet>)> {
        self.cluster
            .domains()
            .iter()
            .filter_map(|domain| {
                let Some(annotator) = AnnotatorKind::for_domain(domain.kind) else {
                    trace!(domain = %domain.kind, "Domain has no annotator, skipping.");
                    return None;
                };
                let sets = annotator.enumerate(domain, backbone, self.cluster, self.config);
                Some((domain.clone(), sets))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cluster::context::Cluster;
    use crate::core::cluster::domain::DomainType;

    #[test]
    fn annotate_keeps_domain_order_and_skips_untailored_domains() {
        let cluster = Cluster::new().with_domains(&[
            DomainType::MdnD,
            DomainType::Adenylation,
            DomainType::LanB,
        ]);
        let config = TailoringConfig::default();
        let reporter = ProgressReporter::new();
        let context = TailoringContext::new(&cluster, &config, &reporter);
        let backbone = Backbone::from_peptide("core", "SAT").unwrap();

        let annotated = context.annotate(&backbone);
        let kinds: Vec<DomainType> = annotated.iter().map(|(d, _)| d.kind).collect();
        assert_eq!(kinds, vec![DomainType::MdnD, DomainType::LanB]);
        assert_eq!(annotated[0].1, vec![SubstrateSet::of(&[0])]);
    }
}
