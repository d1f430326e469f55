use crate::error::EngineError;
use crate::records::ClaimRecord;

pub fn normalize_text(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn normalize_record(record: &mut ClaimRecord) {
    record.id = normalize_text(&record.id);
    record.name = normalize_text(&record.name);
    record.state = normalize_text(&record.state);
    record.district = normalize_text(&record.district);
    record.village = normalize_text(&record.village);
}

pub fn validate_record(record: &ClaimRecord) -> Result<(), EngineError> {
    if record.id.trim().is_empty() {
        return Err(EngineError::InvalidRecord("record id is empty".to_string()));
    }
    if !record.area.is_finite() || record.area < 0.0 {
        return Err(EngineError::InvalidRecord(format!(
            "record {} has invalid area {}",
            record.id, record.area
        )));
    }
    if let Some(coords) = &record.coordinates {
        let lat_ok = coords.lat.is_finite() && (-90.0..=90.0).contains(&coords.lat);
        let lng_ok = coords.lng.is_finite() && (-180.0..=180.0).contains(&coords.lng);
        if !lat_ok || !lng_ok {
            return Err(EngineError::InvalidRecord(format!(
                "record {} has out-of-range coordinates ({}, {})",
                record.id, coords.lat, coords.lng
            )));
        }
    }
    Ok(())
}
