use super::error::Discard;
use crate::core::cluster::domain::DomainType;

/// Events emitted while a tailoring run advances.
///
/// Phase and task events frame each stage of the run. The remaining variants
/// report search outcomes a caller may want to surface without parsing logs.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    /// No scaffold could be built for a backbone; it takes no further part.
    BackboneSkipped { backbone: String, reason: String },
    /// A backbone produced more plan combinations than the ceilings admit.
    CombinationsTruncated { backbone: String },
    /// A branch failed at a plan of `domain` and its scaffold was dropped.
    BranchDiscarded {
        backbone: String,
        domain: DomainType,
        reason: String,
    },
    /// Execution stopped early after `produced` scaffolds survived.
    ScaffoldLimitReached { produced: usize },
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    pub fn report_discard(&self, discard: &Discard) {
        if self.callback.is_some() {
            self.report(Progress::BranchDiscarded {
                backbone: discard.backbone.clone(),
                domain: discard.domain,
                reason: discard.error.to_string(),
            });
        }
    }
}
