use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::access::{BulkEntry, GuardedRecommendation, LookupStatus};
use crate::catalog::{InterventionTemplate, Priority, SchemeDefinition};
use crate::eligibility::{MatchBand, SchemeMatch};
use crate::interventions::InterventionMatch;
use crate::records::ClaimRecord;
use crate::summary::ClaimSummary;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn score_cell(score: u8) -> Cell {
    let cell = Cell::new(score.to_string());
    match MatchBand::from_score(score) {
        MatchBand::High => cell.fg(Color::Green),
        MatchBand::Medium => cell.fg(Color::Yellow),
        MatchBand::Low => cell.fg(Color::Red),
    }
}

fn priority_cell(priority: Priority) -> Cell {
    let cell = Cell::new(priority.to_string());
    match priority {
        Priority::High => cell.fg(Color::Red),
        Priority::Medium => cell.fg(Color::Yellow),
        Priority::Low => cell,
    }
}

pub fn render_schemes_table(matches: &[SchemeMatch]) -> String {
    let mut table = new_table();
    table.set_header(vec!["Rank", "Scheme", "Score", "Benefits", "Reason"]);
    for (idx, m) in matches.iter().enumerate() {
        table.add_row(Row::from(vec![
            Cell::new((idx + 1).to_string()),
            Cell::new(&m.scheme.name),
            score_cell(m.match_score),
            Cell::new(&m.scheme.benefits),
            Cell::new(&m.reason),
        ]));
    }
    table.to_string()
}

pub fn render_interventions_table(matches: &[InterventionMatch]) -> String {
    let mut table = new_table();
    table.set_header(vec!["Rank", "Intervention", "Category", "Priority", "Reason"]);
    for (idx, m) in matches.iter().enumerate() {
        table.add_row(Row::from(vec![
            Cell::new((idx + 1).to_string()),
            Cell::new(&m.intervention.name),
            Cell::new(m.intervention.category.to_string()),
            priority_cell(m.priority),
            Cell::new(&m.reason),
        ]));
    }
    table.to_string()
}

pub fn render_recommendation(outcome: &GuardedRecommendation) -> String {
    if outcome.status == LookupStatus::NoRecordFound {
        return "No claim record found for this account.".to_string();
    }
    let mut out = String::new();
    if let Some(id) = &outcome.record_id {
        out.push_str(&format!("Claim {id}\n"));
    }
    out.push_str("Eligible schemes\n");
    out.push_str(&render_schemes_table(&outcome.result.schemes));
    out.push_str("\nRecommended interventions\n");
    out.push_str(&render_interventions_table(&outcome.result.interventions));
    out
}

pub fn render_records_table(records: &[&ClaimRecord]) -> String {
    let mut table = new_table();
    table.set_header(vec![
        "ID", "Name", "State", "District", "Village", "Type", "Status", "Area (ha)",
    ]);
    for r in records {
        table.add_row(vec![
            r.id.clone(),
            r.name.clone(),
            r.state.clone(),
            r.district.clone(),
            r.village.clone(),
            r.claim_type.label().to_string(),
            r.claim_status.label().to_string(),
            format!("{:.2}", r.area),
        ]);
    }
    table.to_string()
}

pub fn render_bulk_table(entries: &[BulkEntry]) -> String {
    let mut table = new_table();
    table.set_header(vec!["Record", "Top Scheme", "Score", "Top Intervention", "Status"]);
    for entry in entries {
        let Some(result) = &entry.result else {
            table.add_row(Row::from(vec![
                Cell::new(&entry.record_id),
                Cell::new("-"),
                Cell::new("-"),
                Cell::new("-"),
                Cell::new(entry.error.as_deref().unwrap_or("error")).fg(Color::Red),
            ]));
            continue;
        };
        let (scheme, score) = result
            .schemes
            .first()
            .map(|m| (Cell::new(&m.scheme.name), score_cell(m.match_score)))
            .unwrap_or_else(|| (Cell::new("-"), Cell::new("-")));
        let intervention = result
            .interventions
            .first()
            .map(|m| m.intervention.name.as_str())
            .unwrap_or("-");
        table.add_row(Row::from(vec![
            Cell::new(&entry.record_id),
            scheme,
            score,
            Cell::new(intervention),
            Cell::new("ok").fg(Color::Green),
        ]));
    }
    table.to_string()
}

pub fn render_summary_table(summary: &ClaimSummary) -> String {
    let mut table = new_table();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Total claims".to_string(), summary.total_claims.to_string()]);
    table.add_row(vec!["Approved".to_string(), summary.approved_claims.to_string()]);
    table.add_row(vec!["Pending".to_string(), summary.pending_claims.to_string()]);
    table.add_row(vec!["Rejected".to_string(), summary.rejected_claims.to_string()]);
    if summary.unclassified_claims() > 0 {
        table.add_row(vec![
            "Other status".to_string(),
            summary.unclassified_claims().to_string(),
        ]);
    }
    table.add_row(vec!["Individual".to_string(), summary.individual_claims.to_string()]);
    table.add_row(vec!["Community".to_string(), summary.community_claims.to_string()]);
    table.add_row(vec![
        "Total area (ha)".to_string(),
        format!("{:.2}", summary.total_area_ha),
    ]);
    for (state, count) in &summary.claims_by_state {
        table.add_row(vec![format!("  {state}"), count.to_string()]);
    }
    table.to_string()
}

pub fn render_catalog_tables(
    schemes: &[SchemeDefinition],
    interventions: &[InterventionTemplate],
) -> String {
    let mut schemes_table = new_table();
    schemes_table.set_header(vec!["ID", "Scheme", "Benefits"]);
    for s in schemes {
        schemes_table.add_row(vec![s.id.clone(), s.name.clone(), s.benefits.clone()]);
    }

    let mut interventions_table = new_table();
    interventions_table.set_header(vec!["ID", "Intervention", "Category", "Default Priority"]);
    for t in interventions {
        interventions_table.add_row(Row::from(vec![
            Cell::new(&t.id),
            Cell::new(&t.name),
            Cell::new(t.category.to_string()),
            priority_cell(t.priority),
        ]));
    }

    format!("Schemes\n{schemes_table}\nInterventions\n{interventions_table}")
}
