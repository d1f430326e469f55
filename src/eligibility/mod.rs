pub mod evaluator;
pub mod rules;

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::SchemeDefinition;
use crate::error::EngineError;
use crate::records::ClaimRecord;
use crate::regions::RegionProfile;

pub type RecordPredicate = fn(&ClaimRecord, &RegionProfile) -> bool;
pub type ScoreFn = fn(&ClaimRecord, &RegionProfile) -> u8;
pub type ReasonFn = fn(&ClaimRecord, &RegionProfile) -> String;

#[derive(Clone, Copy)]
pub struct EligibilityRule {
    pub scheme_id: &'static str,
    pub predicate: RecordPredicate,
    pub score: ScoreFn,
    pub reason: ReasonFn,
}

impl fmt::Debug for EligibilityRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EligibilityRule")
            .field("scheme_id", &self.scheme_id)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchemeMatch {
    pub scheme: SchemeDefinition,
    pub match_score: u8,
    pub band: MatchBand,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchBand {
    High,
    Medium,
    Low,
}

impl MatchBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => Self::High,
            70..=89 => Self::Medium,
            _ => Self::Low,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EligibilityRuleSet {
    rules: Vec<EligibilityRule>,
}

impl EligibilityRuleSet {
    pub fn new(rules: Vec<EligibilityRule>) -> Result<Self, EngineError> {
        let mut seen = BTreeSet::new();
        for rule in &rules {
            if !seen.insert(rule.scheme_id) {
                return Err(EngineError::DuplicateRule(rule.scheme_id.to_string()));
            }
        }
        Ok(Self { rules })
    }

    pub fn standard() -> Self {
        Self {
            rules: rules::standard_rules(),
        }
    }

    pub fn rules(&self) -> &[EligibilityRule] {
        &self.rules
    }

    pub fn by_scheme(&self, scheme_id: &str) -> Option<&EligibilityRule> {
        self.rules.iter().find(|rule| rule.scheme_id == scheme_id)
    }

    pub fn evaluate(
        &self,
        record: &ClaimRecord,
        schemes: &[SchemeDefinition],
        regions: &RegionProfile,
    ) -> Vec<SchemeMatch> {
        evaluator::evaluate_schemes(self, record, schemes, regions)
    }
}
