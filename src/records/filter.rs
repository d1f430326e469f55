use serde::{Deserialize, Serialize};

use crate::records::{ClaimRecord, ClaimStatus, ClaimType};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecordFilter {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub claim_type: Option<ClaimType>,
    #[serde(default)]
    pub claim_status: Option<ClaimStatus>,
}

impl RecordFilter {
    pub fn is_empty(&self) -> bool {
        self.state.is_none() && self.claim_type.is_none() && self.claim_status.is_none()
    }

    pub fn matches(&self, record: &ClaimRecord) -> bool {
        if let Some(state) = &self.state {
            if &record.state != state {
                return false;
            }
        }
        if let Some(claim_type) = &self.claim_type {
            if &record.claim_type != claim_type {
                return false;
            }
        }
        if let Some(status) = &self.claim_status {
            if &record.claim_status != status {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, records: Vec<&'a ClaimRecord>) -> Vec<&'a ClaimRecord> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}
