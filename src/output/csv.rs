use anyhow::Result;

use crate::access::BulkEntry;
use crate::eligibility::SchemeMatch;
use crate::interventions::InterventionMatch;
use crate::records::ClaimRecord;

pub fn schemes_to_csv(matches: &[SchemeMatch]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["scheme_id", "scheme", "match_score", "band", "reason"])?;
    for m in matches {
        writer.write_record([
            m.scheme.id.clone(),
            m.scheme.name.clone(),
            m.match_score.to_string(),
            format!("{:?}", m.band).to_lowercase(),
            m.reason.clone(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn interventions_to_csv(matches: &[InterventionMatch]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["intervention_id", "intervention", "category", "priority", "reason"])?;
    for m in matches {
        writer.write_record([
            m.intervention.id.clone(),
            m.intervention.name.clone(),
            m.intervention.category.to_string(),
            m.priority.to_string(),
            m.reason.clone(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn records_to_csv(records: &[&ClaimRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "id",
        "name",
        "state",
        "district",
        "village",
        "claim_type",
        "claim_status",
        "area_ha",
        "approval_date",
    ])?;
    for r in records {
        writer.write_record([
            r.id.clone(),
            r.name.clone(),
            r.state.clone(),
            r.district.clone(),
            r.village.clone(),
            r.claim_type.label().to_string(),
            r.claim_status.label().to_string(),
            format!("{:.2}", r.area),
            r.approval_date.map(|d| d.to_string()).unwrap_or_default(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn bulk_to_csv(entries: &[BulkEntry]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["record_id", "kind", "id", "name", "score_or_priority", "error"])?;
    for entry in entries {
        let Some(result) = &entry.result else {
            writer.write_record([
                entry.record_id.as_str(),
                "error",
                "",
                "",
                "",
                entry.error.as_deref().unwrap_or_default(),
            ])?;
            continue;
        };
        for m in &result.schemes {
            writer.write_record([
                entry.record_id.clone(),
                "scheme".to_string(),
                m.scheme.id.clone(),
                m.scheme.name.clone(),
                m.match_score.to_string(),
                String::new(),
            ])?;
        }
        for m in &result.interventions {
            writer.write_record([
                entry.record_id.clone(),
                "intervention".to_string(),
                m.intervention.id.clone(),
                m.intervention.name.clone(),
                m.priority.to_string(),
                String::new(),
            ])?;
        }
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{ClaimStatus, ClaimType};

    #[test]
    fn records_csv_has_header_and_rows() {
        let record = ClaimRecord::new(
            "FRA-1",
            "Sukru, Majhi",
            ClaimType::IndividualForestRights,
            ClaimStatus::Approved,
            2.5,
        )
        .with_location("Odisha", "Koraput", "Koraput");
        let csv = records_to_csv(&[&record]).unwrap();
        let mut lines = csv.lines();
        assert!(lines.next().unwrap().starts_with("id,name,state"));
        let row = lines.next().unwrap();
        assert!(row.contains("\"Sukru, Majhi\""));
        assert!(row.contains("2.50"));
    }

    #[test]
    fn failed_bulk_entry_is_one_error_row() {
        let entries = vec![BulkEntry {
            record_id: "BAD".to_string(),
            result: None,
            error: Some("bad area".to_string()),
        }];
        let csv = bulk_to_csv(&entries).unwrap();
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.contains("BAD,error,,,,bad area"));
    }
}
