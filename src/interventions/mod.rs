pub mod evaluator;
pub mod rules;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{InterventionTemplate, Priority};
use crate::eligibility::{ReasonFn, RecordPredicate};
use crate::records::ClaimRecord;
use crate::regions::RegionProfile;

pub type PriorityFn = fn(&ClaimRecord, &RegionProfile) -> Priority;

#[derive(Clone, Copy)]
pub struct InterventionRule {
    pub trigger_name: &'static str,
    pub template_id: &'static str,
    pub trigger: RecordPredicate,
    pub priority: PriorityFn,
    pub reason: ReasonFn,
}

impl fmt::Debug for InterventionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterventionRule")
            .field("trigger_name", &self.trigger_name)
            .field("template_id", &self.template_id)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InterventionMatch {
    pub intervention: InterventionTemplate,
    pub priority: Priority,
    pub reason: String,
}

/// Ordered rule list; order is the tie-break between equal priorities.
#[derive(Debug, Clone)]
pub struct InterventionRuleSet {
    rules: Vec<InterventionRule>,
}

impl InterventionRuleSet {
    pub fn new(rules: Vec<InterventionRule>) -> Self {
        Self { rules }
    }

    pub fn standard() -> Self {
        Self::new(rules::standard_rules())
    }

    pub fn rules(&self) -> &[InterventionRule] {
        &self.rules
    }

    pub fn evaluate(
        &self,
        record: &ClaimRecord,
        templates: &[InterventionTemplate],
        regions: &RegionProfile,
    ) -> Vec<InterventionMatch> {
        evaluator::evaluate_interventions(self, record, templates, regions)
    }
}
