use crate::core::chemistry::builder::build_scaffold;
use crate::core::cluster::backbone::Backbone;
use crate::core::cluster::context::ClusterContext;
use crate::core::models::scaffold::Scaffold;
use crate::engine::combinator;
use crate::engine::config::TailoringConfig;
use crate::engine::context::TailoringContext;
use crate::engine::error::{Discard, EngineError};
use crate::engine::plan::PlanCombination;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::{Branch, TailoredScaffold};
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Upper bound on branches executed between two checks of the scaffold ceiling.
const EXECUTION_CHUNK: usize = 256;

#[derive(Debug, Clone, Default)]
pub struct TailoringResult {
    /// Surviving scaffolds, in backbone order and then combination order.
    pub scaffolds: Vec<TailoredScaffold>,
    pub discards: Vec<Discard>,
    /// Set when any ceiling cut the search or the output short.
    pub truncated: bool,
}

/// A backbone whose scaffold was built, with its accepted plan combinations.
struct PreparedBackbone<'b> {
    backbone: &'b Backbone,
    scaffold: Scaffold,
    combinations: Vec<PlanCombination>,
}

/// Runs the tailoring search over `backbones` for one cluster.
///
/// Backbones whose scaffold cannot be built are skipped with a warning. Failed
/// combinations are reported in [`TailoringResult::discards`] and never abort the
/// run. Execution stops once `max_scaffolds` branches have survived, so later
/// combinations are neither run nor reported.
///
/// # Errors
///
/// Returns [`EngineError::Config`] if `config` fails validation.
#[instrument(skip_all, name = "tailoring_workflow")]
pub fn run<C>(
    backbones: &[Backbone],
    cluster: &C,
    config: &TailoringConfig,
    reporter: &ProgressReporter,
) -> Result<TailoringResult, EngineError>
where
    C: ClusterContext + Sync + ?Sized,
{
    config.validate()?;
    let context = TailoringContext::new(cluster, config, reporter);
    info!(
        backbones = backbones.len(),
        domains = cluster.domains().len(),
        "Starting tailoring workflow."
    );

    // === Phase 1: Scaffold construction ===
    let built = build_scaffolds(backbones, &context);

    // === Phase 2 & 3: Site annotation and plan combination ===
    let (prepared, truncated) = combine_plans(built, &context);

    // === Phase 4: Branch execution ===
    let (outcomes, stopped_early) = execute_branches(&prepared, &context);

    // === Phase 5: Collection ===
    let mut result = collect(outcomes, &context);
    result.truncated |= truncated || stopped_early;

    info!(
        scaffolds = result.scaffolds.len(),
        discards = result.discards.len(),
        truncated = result.truncated,
        "Tailoring workflow complete."
    );
    Ok(result)
}

#[instrument(skip_all, name = "scaffold_construction_task")]
fn build_scaffolds<'b, C>(
    backbones: &'b [Backbone],
    context: &TailoringContext<C>,
) -> Vec<(&'b Backbone, Scaffold)>
where
    C: ClusterContext + Sync + ?Sized,
{
    let reporter = context.reporter;
    reporter.report(Progress::PhaseStart {
        name: "Scaffold Construction",
    });
    reporter.report(Progress::TaskStart {
        total_steps: backbones.len() as u64,
    });

    let built: Vec<(&Backbone, Scaffold)> = backbones
        .iter()
        .filter_map(|backbone| {
            let outcome = match build_scaffold(backbone) {
                Ok(scaffold) => Some((backbone, scaffold)),
                Err(e) => {
                    warn!(backbone = %backbone.label, error = %e, "Skipping backbone.");
                    reporter.report(Progress::BackboneSkipped {
                        backbone: backbone.label.clone(),
                        reason: e.to_string(),
                    });
                    None
                }
            };
            reporter.report(Progress::TaskIncrement);
            outcome
        })
        .collect();

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    info!(
        built = built.len(),
        skipped = backbones.len() - built.len(),
        "Scaffold construction complete."
    );
    built
}

#[instrument(skip_all, name = "plan_combination_task")]
fn combine_plans<'b, C>(
    built: Vec<(&'b Backbone, Scaffold)>,
    context: &TailoringContext<C>,
) -> (Vec<PreparedBackbone<'b>>, bool)
where
    C: ClusterContext + Sync + ?Sized,
{
    let reporter = context.reporter;
    reporter.report(Progress::PhaseStart {
        name: "Plan Combination",
    });
    reporter.report(Progress::TaskStart {
        total_steps: built.len() as u64,
    });

    let mut truncated = false;
    let prepared: Vec<PreparedBackbone> = built
        .into_iter()
        .map(|(backbone, scaffold)| {
            let candidates = context.annotate(backbone);
            let set = combinator::combine(
                &candidates,
                context.cluster.sugar_combinations(),
                &context.config.limits,
            );
            debug!(
                backbone = %backbone.label,
                domains = candidates.len(),
                combinations = set.combinations.len(),
                truncated = set.truncated,
                "Backbone combined."
            );
            if set.truncated {
                truncated = true;
                reporter.report(Progress::CombinationsTruncated {
                    backbone: backbone.label.clone(),
                });
            }
            reporter.report(Progress::TaskIncrement);
            PreparedBackbone {
                backbone,
                scaffold,
                combinations: set.combinations,
            }
        })
        .collect();

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    let total: usize = prepared.iter().map(|p| p.combinations.len()).sum();
    info!(combinations = total, truncated, "Plan combination complete.");
    (prepared, truncated)
}

/// Runs branches in combination order, a chunk at a time, until the work is done
/// or `max_scaffolds` branches have survived.
///
/// Returns the outcomes of the branches that ran, in order, and whether any work
/// was left unexecuted.
#[instrument(skip_all, name = "branch_execution_task")]
fn execute_branches<C>(
    prepared: &[PreparedBackbone],
    context: &TailoringContext<C>,
) -> (Vec<Result<TailoredScaffold, Discard>>, bool)
where
    C: ClusterContext + Sync + ?Sized,
{
    let reporter = context.reporter;
    let max_scaffolds = context.config.limits.max_scaffolds;
    reporter.report(Progress::PhaseStart {
        name: "Branch Execution",
    });

    let work: Vec<(&PreparedBackbone, &PlanCombination)> = prepared
        .iter()
        .flat_map(|p| p.combinations.iter().map(move |c| (p, c)))
        .collect();
    reporter.report(Progress::TaskStart {
        total_steps: work.len() as u64,
    });

    let run_one = |&(p, combination): &(&PreparedBackbone, &PlanCombination)| {
        let outcome = Branch::new(p.backbone, &p.scaffold, combination).run();
        if let Err(discard) = &outcome {
            reporter.report_discard(discard);
        }
        reporter.report(Progress::TaskIncrement);
        outcome
    };

    let mut outcomes: Vec<Result<TailoredScaffold, Discard>> = Vec::with_capacity(work.len());
    let mut survivors = 0;
    let mut next = 0;
    while next < work.len() && survivors < max_scaffolds {
        let size = (max_scaffolds - survivors).clamp(1, EXECUTION_CHUNK);
        let chunk = &work[next..(next + size).min(work.len())];

        #[cfg(not(feature = "parallel"))]
        let iterator = chunk.iter();

        #[cfg(feature = "parallel")]
        let iterator = chunk.par_iter();

        let executed: Vec<Result<TailoredScaffold, Discard>> = iterator.map(run_one).collect();
        survivors += executed.iter().filter(|o| o.is_ok()).count();
        next += chunk.len();
        outcomes.extend(executed);
    }

    let stopped_early = next < work.len();
    if stopped_early {
        debug!(
            executed = next,
            remaining = work.len() - next,
            max_scaffolds,
            "Scaffold ceiling reached; skipping remaining branches."
        );
        reporter.report(Progress::ScaffoldLimitReached {
            produced: survivors,
        });
    }

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    (outcomes, stopped_early)
}

fn collect<C>(
    outcomes: Vec<Result<TailoredScaffold, Discard>>,
    context: &TailoringContext<C>,
) -> TailoringResult
where
    C: ClusterContext + Sync + ?Sized,
{
    let mut result = TailoringResult::default();
    for outcome in outcomes {
        match outcome {
            Ok(scaffold) => result.scaffolds.push(scaffold),
            Err(discard) => result.discards.push(discard),
        }
    }

    let max_scaffolds = context.config.limits.max_scaffolds;
    if result.scaffolds.len() > max_scaffolds {
        debug!(
            produced = result.scaffolds.len(),
            max_scaffolds, "Truncating scaffold list."
        );
        result.scaffolds.truncate(max_scaffolds);
        result.truncated = true;
    }
    result
}
