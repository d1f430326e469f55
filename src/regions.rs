use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::RegionConfig;
use crate::records::normalize::normalize_text;
use crate::records::ClaimRecord;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegionProfile {
    pub water_scarce_villages: BTreeSet<String>,
    pub groundwater_trigger_villages: BTreeSet<String>,
    pub water_stressed_states: BTreeSet<String>,
    pub drought_priority_states: BTreeSet<String>,
}

impl RegionProfile {
    pub fn from_config(config: &RegionConfig) -> Self {
        Self {
            water_scarce_villages: normalized_set(&config.water_scarce_villages),
            groundwater_trigger_villages: normalized_set(&config.groundwater_trigger_villages),
            water_stressed_states: normalized_set(&config.water_stressed_states),
            drought_priority_states: normalized_set(&config.drought_priority_states),
        }
    }

    pub fn is_water_scarce_village(&self, record: &ClaimRecord) -> bool {
        self.water_scarce_villages.contains(&record.village)
    }

    pub fn is_groundwater_trigger_village(&self, record: &ClaimRecord) -> bool {
        self.groundwater_trigger_villages.contains(&record.village)
    }

    pub fn is_water_stressed_state(&self, record: &ClaimRecord) -> bool {
        self.water_stressed_states.contains(&record.state)
    }

    pub fn is_drought_priority_state(&self, record: &ClaimRecord) -> bool {
        self.drought_priority_states.contains(&record.state)
    }
}

fn normalized_set(names: &[String]) -> BTreeSet<String> {
    names
        .iter()
        .map(|name| normalize_text(name))
        .filter(|name| !name.is_empty())
        .collect()
}
