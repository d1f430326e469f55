use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::records::{validate_record, ClaimRecord, ClaimStatus, ClaimType};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClaimSummary {
    pub total_claims: usize,
    pub approved_claims: usize,
    pub pending_claims: usize,
    pub rejected_claims: usize,
    pub individual_claims: usize,
    pub community_claims: usize,
    pub total_area_ha: f64,
    pub claims_by_state: BTreeMap<String, usize>,
}

impl ClaimSummary {
    pub fn from_records(records: &[&ClaimRecord]) -> Self {
        let mut summary = Self {
            total_claims: records.len(),
            ..Self::default()
        };
        for record in records {
            match record.claim_status {
                ClaimStatus::Approved => summary.approved_claims += 1,
                ClaimStatus::Pending => summary.pending_claims += 1,
                ClaimStatus::Rejected => summary.rejected_claims += 1,
                ClaimStatus::Other(_) => {}
            }
            if record.claim_type == ClaimType::IndividualForestRights {
                summary.individual_claims += 1;
            } else if record.claim_type.is_community() {
                summary.community_claims += 1;
            }
            if validate_record(record).is_ok() {
                summary.total_area_ha += record.area;
            }
            *summary
                .claims_by_state
                .entry(record.state.clone())
                .or_insert(0) += 1;
        }
        summary
    }

    pub fn unclassified_claims(&self) -> usize {
        self.total_claims
            .saturating_sub(self.approved_claims + self.pending_claims + self.rejected_claims)
    }
}
