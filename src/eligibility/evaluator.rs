use tracing::debug;

use crate::catalog::SchemeDefinition;
use crate::eligibility::{EligibilityRule, EligibilityRuleSet, MatchBand, SchemeMatch};
use crate::records::ClaimRecord;
use crate::regions::RegionProfile;

pub const MAX_MATCH_SCORE: u8 = 100;

/// Eligible schemes in descending score order. Equal scores keep catalog order.
pub fn evaluate_schemes(
    rule_set: &EligibilityRuleSet,
    record: &ClaimRecord,
    schemes: &[SchemeDefinition],
    regions: &RegionProfile,
) -> Vec<SchemeMatch> {
    let mut matches = Vec::with_capacity(schemes.len());
    for scheme in schemes {
        let Some(rule) = rule_set.by_scheme(&scheme.id) else {
            debug!(scheme = %scheme.id, "no eligibility rule registered, skipping");
            continue;
        };
        if let Some(matched) = evaluate_rule(rule, scheme, record, regions) {
            matches.push(matched);
        }
    }
    matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    matches
}

pub fn evaluate_rule(
    rule: &EligibilityRule,
    scheme: &SchemeDefinition,
    record: &ClaimRecord,
    regions: &RegionProfile,
) -> Option<SchemeMatch> {
    if !(rule.predicate)(record, regions) {
        return None;
    }
    let match_score = (rule.score)(record, regions).min(MAX_MATCH_SCORE);
    Some(SchemeMatch {
        scheme: scheme.clone(),
        match_score,
        band: MatchBand::from_score(match_score),
        reason: (rule.reason)(record, regions),
    })
}
