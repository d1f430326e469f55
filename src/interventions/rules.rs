use crate::catalog::defaults::{
    CLIMATE_RESILIENT_CROPS, DIGITAL_LITERACY, GROUNDWATER_RECHARGING, SUSTAINABLE_HARVESTING,
};
use crate::catalog::Priority;
use crate::interventions::InterventionRule;
use crate::records::ClaimRecord;
use crate::regions::RegionProfile;

pub fn standard_rules() -> Vec<InterventionRule> {
    vec![
        InterventionRule {
            trigger_name: "water_scarcity",
            template_id: GROUNDWATER_RECHARGING,
            trigger: water_scarcity,
            priority: high,
            reason: water_scarcity_reason,
        },
        InterventionRule {
            trigger_name: "community_claim",
            template_id: SUSTAINABLE_HARVESTING,
            trigger: community_claim,
            priority: medium,
            reason: community_claim_reason,
        },
        InterventionRule {
            trigger_name: "approved_individual",
            template_id: CLIMATE_RESILIENT_CROPS,
            trigger: approved_individual,
            priority: approved_individual_priority,
            reason: approved_individual_reason,
        },
        InterventionRule {
            trigger_name: "universal",
            template_id: DIGITAL_LITERACY,
            trigger: always,
            priority: medium,
            reason: digital_literacy_reason,
        },
    ]
}

fn always(_: &ClaimRecord, _: &RegionProfile) -> bool {
    true
}

fn high(_: &ClaimRecord, _: &RegionProfile) -> Priority {
    Priority::High
}

fn medium(_: &ClaimRecord, _: &RegionProfile) -> Priority {
    Priority::Medium
}

fn water_scarcity(record: &ClaimRecord, regions: &RegionProfile) -> bool {
    regions.is_water_stressed_state(record) || regions.is_groundwater_trigger_village(record)
}

fn water_scarcity_reason(record: &ClaimRecord, regions: &RegionProfile) -> String {
    if regions.is_water_stressed_state(record) {
        format!("Low water table recorded across {}", record.state)
    } else {
        format!("{} has a depleted groundwater table", record.village)
    }
}

fn community_claim(record: &ClaimRecord, _: &RegionProfile) -> bool {
    record.claim_type.is_community()
}

fn community_claim_reason(record: &ClaimRecord, _: &RegionProfile) -> String {
    format!(
        "{} holders managing {:.2} ha benefit from sustainable use practices",
        record.claim_type, record.area
    )
}

fn approved_individual(record: &ClaimRecord, _: &RegionProfile) -> bool {
    record.is_approved_individual()
}

fn approved_individual_priority(record: &ClaimRecord, regions: &RegionProfile) -> Priority {
    if regions.is_drought_priority_state(record) {
        Priority::High
    } else {
        Priority::Medium
    }
}

fn approved_individual_reason(record: &ClaimRecord, regions: &RegionProfile) -> String {
    if regions.is_drought_priority_state(record) {
        format!("{} shows increasing drought patterns", record.state)
    } else {
        format!(
            "Approved individual holding of {:.2} ha can adopt drought-resistant varieties",
            record.area
        )
    }
}

fn digital_literacy_reason(_: &ClaimRecord, _: &RegionProfile) -> String {
    "Digital access speeds up scheme enrolment and market price discovery".to_string()
}
