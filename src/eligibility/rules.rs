use crate::catalog::defaults::{JAL_JEEVAN_MISSION, MGNREGA, PM_KISAN, VAN_DHAN_YOJANA};
use crate::eligibility::EligibilityRule;
use crate::records::{ClaimRecord, ClaimStatus};
use crate::regions::RegionProfile;

pub const PM_KISAN_AREA_THRESHOLD_HA: f64 = 1.0;
pub const VAN_DHAN_AREA_THRESHOLD_HA: f64 = 10.0;

pub fn standard_rules() -> Vec<EligibilityRule> {
    vec![
        EligibilityRule {
            scheme_id: PM_KISAN,
            predicate: pm_kisan_eligible,
            score: pm_kisan_score,
            reason: pm_kisan_reason,
        },
        EligibilityRule {
            scheme_id: JAL_JEEVAN_MISSION,
            predicate: always,
            score: water_access_score,
            reason: water_access_reason,
        },
        EligibilityRule {
            scheme_id: MGNREGA,
            predicate: employment_eligible,
            score: employment_score,
            reason: employment_reason,
        },
        EligibilityRule {
            scheme_id: VAN_DHAN_YOJANA,
            predicate: forest_produce_eligible,
            score: forest_produce_score,
            reason: forest_produce_reason,
        },
    ]
}

fn always(_: &ClaimRecord, _: &RegionProfile) -> bool {
    true
}

fn pm_kisan_eligible(record: &ClaimRecord, _: &RegionProfile) -> bool {
    record.is_approved_individual()
}

fn pm_kisan_score(record: &ClaimRecord, _: &RegionProfile) -> u8 {
    if record.area > PM_KISAN_AREA_THRESHOLD_HA {
        95
    } else {
        85
    }
}

fn pm_kisan_reason(record: &ClaimRecord, _: &RegionProfile) -> String {
    if record.area > PM_KISAN_AREA_THRESHOLD_HA {
        format!(
            "High priority: approved individual forest right holder with {:.2} ha, above the {PM_KISAN_AREA_THRESHOLD_HA} ha holding threshold",
            record.area
        )
    } else {
        format!(
            "Medium priority: approved individual forest right holder with a smaller holding of {:.2} ha",
            record.area
        )
    }
}

fn water_access_score(record: &ClaimRecord, regions: &RegionProfile) -> u8 {
    if regions.is_water_scarce_village(record) {
        98
    } else {
        80
    }
}

fn water_access_reason(record: &ClaimRecord, regions: &RegionProfile) -> String {
    if regions.is_water_scarce_village(record) {
        format!(
            "Urgent: {} is a water-scarce village with low groundwater levels",
            record.village
        )
    } else {
        "Standard priority: every household is eligible for a functional tap connection"
            .to_string()
    }
}

/// Equivalent to "not Rejected" over the known statuses; unrecognised
/// statuses are excluded.
fn employment_eligible(record: &ClaimRecord, _: &RegionProfile) -> bool {
    matches!(
        record.claim_status,
        ClaimStatus::Approved | ClaimStatus::Pending
    )
}

// Community claims score lower here; product owners have not confirmed the intent.
fn employment_score(record: &ClaimRecord, _: &RegionProfile) -> u8 {
    if record.claim_type.is_community() {
        75
    } else {
        85
    }
}

fn employment_reason(record: &ClaimRecord, _: &RegionProfile) -> String {
    if record.claim_type.is_community() {
        format!(
            "{} claim ({}) can draw on guaranteed employment for forest conservation work",
            record.claim_type, record.claim_status
        )
    } else {
        format!(
            "Claimant ({} claim) can draw on guaranteed employment for land development",
            record.claim_status
        )
    }
}

fn forest_produce_eligible(record: &ClaimRecord, _: &RegionProfile) -> bool {
    record.claim_type.is_community()
}

fn forest_produce_score(record: &ClaimRecord, _: &RegionProfile) -> u8 {
    if record.area > VAN_DHAN_AREA_THRESHOLD_HA {
        90
    } else {
        70
    }
}

fn forest_produce_reason(record: &ClaimRecord, _: &RegionProfile) -> String {
    if record.area > VAN_DHAN_AREA_THRESHOLD_HA {
        format!(
            "High priority: {:.2} ha community forest area, above {VAN_DHAN_AREA_THRESHOLD_HA} ha, suits sustainable harvesting",
            record.area
        )
    } else {
        format!(
            "Medium priority: {:.2} ha community forest with potential for value addition to forest produce",
            record.area
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegionConfig;
    use crate::records::ClaimType;

    fn regions() -> RegionProfile {
        RegionProfile::from_config(&RegionConfig::default())
    }

    fn record(claim_type: ClaimType, status: ClaimStatus, area: f64) -> ClaimRecord {
        ClaimRecord::new("T-1", "t", claim_type, status, area).with_location(
            "Jharkhand",
            "Gumla",
            "Bishunpur",
        )
    }

    #[test]
    fn pm_kisan_needs_exact_approved_individual_claim() {
        let r = regions();
        let approved = record(ClaimType::IndividualForestRights, ClaimStatus::Approved, 2.0);
        assert!(pm_kisan_eligible(&approved, &r));
        assert_eq!(pm_kisan_score(&approved, &r), 95);

        let at_threshold = record(ClaimType::IndividualForestRights, ClaimStatus::Approved, 1.0);
        assert_eq!(pm_kisan_score(&at_threshold, &r), 85);

        let pending = record(ClaimType::IndividualForestRights, ClaimStatus::Pending, 2.0);
        assert!(!pm_kisan_eligible(&pending, &r));
        let community = record(ClaimType::CommunityForestRights, ClaimStatus::Approved, 2.0);
        assert!(!pm_kisan_eligible(&community, &r));
    }

    #[test]
    fn water_access_scores_scarce_villages_higher() {
        let r = regions();
        let mut rec = record(ClaimType::IndividualForestRights, ClaimStatus::Rejected, 0.5);
        assert!(always(&rec, &r));
        assert_eq!(water_access_score(&rec, &r), 80);
        rec.village = "Malkangiri".to_string();
        assert_eq!(water_access_score(&rec, &r), 98);
        assert!(water_access_reason(&rec, &r).contains("Malkangiri"));
    }

    #[test]
    fn employment_scores_community_claims_lower() {
        let r = regions();
        let community = record(
            ClaimType::CommunityForestResourceRights,
            ClaimStatus::Pending,
            3.0,
        );
        assert!(employment_eligible(&community, &r));
        assert_eq!(employment_score(&community, &r), 75);

        let individual = record(ClaimType::IndividualForestRights, ClaimStatus::Pending, 3.0);
        assert_eq!(employment_score(&individual, &r), 85);

        let rejected = record(ClaimType::IndividualForestRights, ClaimStatus::Rejected, 3.0);
        assert!(!employment_eligible(&rejected, &r));
    }

    #[test]
    fn forest_produce_threshold_is_strictly_above_ten() {
        let r = regions();
        let ten = record(ClaimType::CommunityForestRights, ClaimStatus::Pending, 10.0);
        assert!(forest_produce_eligible(&ten, &r));
        assert_eq!(forest_produce_score(&ten, &r), 70);
        let large = record(ClaimType::CommunityForestRights, ClaimStatus::Pending, 10.5);
        assert_eq!(forest_produce_score(&large, &r), 90);
        assert!(forest_produce_reason(&large, &r).contains("10.50 ha"));
    }

    #[test]
    fn unknown_labels_fail_every_field_predicate() {
        let r = regions();
        let odd_type = record(
            ClaimType::Other("Community Grazing Rights".to_string()),
            ClaimStatus::Approved,
            20.0,
        );
        assert!(!pm_kisan_eligible(&odd_type, &r));
        assert!(!forest_produce_eligible(&odd_type, &r));

        let odd_status = record(
            ClaimType::IndividualForestRights,
            ClaimStatus::Other("Under Appeal".to_string()),
            2.0,
        );
        assert!(!pm_kisan_eligible(&odd_status, &r));
        assert!(!employment_eligible(&odd_status, &r));
    }
}
