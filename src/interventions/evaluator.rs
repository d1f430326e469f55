use tracing::debug;

use crate::catalog::InterventionTemplate;
use crate::interventions::{InterventionMatch, InterventionRuleSet};
use crate::records::ClaimRecord;
use crate::regions::RegionProfile;

/// Fired interventions by descending priority rank, stable on rule order.
pub fn evaluate_interventions(
    rule_set: &InterventionRuleSet,
    record: &ClaimRecord,
    templates: &[InterventionTemplate],
    regions: &RegionProfile,
) -> Vec<InterventionMatch> {
    let mut matches = Vec::new();
    for rule in rule_set.rules() {
        if !(rule.trigger)(record, regions) {
            continue;
        }
        let Some(template) = templates.iter().find(|t| t.id == rule.template_id) else {
            debug!(
                trigger = rule.trigger_name,
                template = rule.template_id,
                "intervention template missing from catalog, skipping"
            );
            continue;
        };
        matches.push(InterventionMatch {
            intervention: template.clone(),
            priority: (rule.priority)(record, regions),
            reason: (rule.reason)(record, regions),
        });
    }
    matches.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()));
    matches
}
