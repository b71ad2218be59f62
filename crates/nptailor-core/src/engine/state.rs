use super::error::Discard;
use super::plan::{PlanCombination, ReactionPlan};
use super::reactions;
use crate::core::cluster::backbone::Backbone;
use crate::core::io::smiles;
use crate::core::models::scaffold::Scaffold;
use tracing::{trace, warn};

/// Lifecycle of one branch. `Failed` and `Completed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchState {
    /// Sites are known; the branch has no scaffold of its own yet.
    Enumerated,
    /// The branch owns a copy of the backbone's scaffold.
    Combined,
    /// About to run the plan at this index.
    Executing(usize),
    Failed,
    Completed,
}

/// A scaffold that survived every reaction of its combination.
#[derive(Debug, Clone)]
pub struct TailoredScaffold {
    pub backbone: String,
    pub scaffold: Scaffold,
    /// Plans applied, in execution order.
    pub applied: Vec<ReactionPlan>,
}

impl TailoredScaffold {
    pub fn smiles(&self) -> String {
        smiles::write(self.scaffold.molecule())
    }
}

/// One plan combination applied to its own copy of a backbone's scaffold.
pub struct Branch<'a> {
    backbone: &'a Backbone,
    template: &'a Scaffold,
    combination: &'a PlanCombination,
    state: BranchState,
}

impl<'a> Branch<'a> {
    pub fn new(
        backbone: &'a Backbone,
        template: &'a Scaffold,
        combination: &'a PlanCombination,
    ) -> Self {
        Self {
            backbone,
            template,
            combination,
            state: BranchState::Enumerated,
        }
    }

    pub fn state(&self) -> BranchState {
        self.state
    }

    fn transition(&mut self, next: BranchState) {
        trace!(backbone = %self.backbone.label, from = ?self.state, to = ?next, "Branch transition.");
        self.state = next;
    }

    /// Executes the combination in order.
    ///
    /// The first failing reaction ends the branch. Its partially edited scaffold is
    /// dropped and the failure is returned as a [`Discard`] naming that plan.
    pub fn run(&mut self) -> Result<TailoredScaffold, Discard> {
        let combination = self.combination;
        let mut scaffold = self.template.clone();
        self.transition(BranchState::Combined);
        self.transition(BranchState::Executing(0));

        while let BranchState::Executing(index) = self.state {
            let Some(plan) = combination.plans().get(index) else {
                self.transition(BranchState::Completed);
                break;
            };
            match reactions::execute(plan, &mut scaffold, self.backbone) {
                Ok(()) => self.transition(BranchState::Executing(index + 1)),
                Err(error) => {
                    self.transition(BranchState::Failed);
                    warn!(
                        backbone = %self.backbone.label,
                        domain = %plan.domain.kind,
                        substrates = %plan.substrates,
                        error = %error,
                        "Discarding branch."
                    );
                    return Err(Discard {
                        backbone: self.backbone.label.clone(),
                        domain: plan.domain.kind,
                        substrates: plan.substrates.clone(),
                        error,
                    });
                }
            }
        }

        Ok(TailoredScaffold {
            backbone: self.backbone.label.clone(),
            scaffold,
            applied: combination.plans().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chemistry::builder::build_scaffold;
    use crate::core::cluster::domain::{Domain, DomainType};
    use crate::engine::error::ReactionError;
    use crate::engine::plan::SubstrateSet;
    use crate::engine::reactions::ReactionKind;

    fn plan(kind: DomainType, positions: &[usize]) -> ReactionPlan {
        let reaction = ReactionKind::for_domain(kind).unwrap();
        ReactionPlan::new(Domain::new(kind), SubstrateSet::of(positions), reaction)
    }

    #[test]
    fn empty_combination_completes_with_untouched_scaffold() {
        let backbone = Backbone::from_peptide("core", "SAT").unwrap();
        let template = build_scaffold(&backbone).unwrap();
        let combination = PlanCombination::default();
        let mut branch = Branch::new(&backbone, &template, &combination);
        assert_eq!(branch.state(), BranchState::Enumerated);

        let tailored = branch.run().unwrap();
        assert_eq!(branch.state(), BranchState::Completed);
        assert_eq!(tailored.backbone, "core");
        assert!(tailored.applied.is_empty());
        assert_eq!(tailored.smiles(), smiles::write(template.molecule()));
    }

    #[test]
    fn failing_reaction_discards_branch_and_leaves_template_intact() {
        let backbone = Backbone::from_peptide("core", "SAT").unwrap();
        let template = build_scaffold(&backbone).unwrap();
        let before = smiles::write(template.molecule());
        let combination = PlanCombination::new(vec![
            plan(DomainType::MdnD, &[0]),
            plan(DomainType::LazB, &[0]),
        ]);
        let mut branch = Branch::new(&backbone, &template, &combination);

        let discard = branch.run().unwrap_err();
        assert_eq!(branch.state(), BranchState::Failed);
        assert_eq!(discard.backbone, "core");
        assert_eq!(discard.domain, DomainType::MdnD);
        assert_eq!(discard.substrates, SubstrateSet::of(&[0]));
        assert!(matches!(
            discard.error,
            ReactionError::InvalidSubstrateStructure(_)
        ));
        assert_eq!(smiles::write(template.molecule()), before);
    }

    #[test]
    fn successful_branch_reports_plans_in_execution_order() {
        let backbone = Backbone::from_peptide("core", "SAT").unwrap();
        let template = build_scaffold(&backbone).unwrap();
        let combination = PlanCombination::new(vec![
            plan(DomainType::MdnD, &[0]),
            plan(DomainType::LazB, &[2]),
        ]);
        let tailored = Branch::new(&backbone, &template, &combination)
            .run()
            .unwrap();
        let kinds: Vec<ReactionKind> = tailored.applied.iter().map(|p| p.reaction).collect();
        assert_eq!(
            kinds,
            vec![ReactionKind::LanthipeptideDehydration, ReactionKind::NAcetylation]
        );
        assert_ne!(tailored.smiles(), smiles::write(template.molecule()));
    }
}
