use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::catalog::defaults::{builtin_interventions, builtin_schemes};
use crate::catalog::schema::{InterventionTemplate, SchemeDefinition};
use crate::config::{expand_tilde, CatalogConfig};
use crate::engine::Catalogs;
use crate::records::{normalize_record, ClaimRecord};

const DEMO_RECORDS: &str = include_str!("../../data/records.json");

#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    records: Vec<ClaimRecord>,
    schemes: Option<Vec<SchemeDefinition>>,
    interventions: Option<Vec<InterventionTemplate>>,
}

impl CatalogStore {
    pub fn new(
        mut records: Vec<ClaimRecord>,
        schemes: Option<Vec<SchemeDefinition>>,
        interventions: Option<Vec<InterventionTemplate>>,
    ) -> Result<Self> {
        for record in &mut records {
            normalize_record(record);
        }
        ensure_unique_ids("record", records.iter().map(|r| r.id.as_str()))?;
        if let Some(schemes) = &schemes {
            ensure_unique_ids("scheme", schemes.iter().map(|s| s.id.as_str()))?;
        }
        if let Some(interventions) = &interventions {
            ensure_unique_ids("intervention", interventions.iter().map(|i| i.id.as_str()))?;
        }
        Ok(Self {
            records,
            schemes,
            interventions,
        })
    }

    pub fn builtin() -> Result<Self> {
        let records: Vec<ClaimRecord> =
            serde_json::from_str(DEMO_RECORDS).context("failed parsing bundled demo records")?;
        Self::new(
            records,
            Some(builtin_schemes()),
            Some(builtin_interventions()),
        )
    }

    pub fn load(config: &CatalogConfig) -> Result<Self> {
        let records: Vec<ClaimRecord> = if config.records_path.trim().is_empty() {
            serde_json::from_str(DEMO_RECORDS).context("failed parsing bundled demo records")?
        } else {
            read_json(&expand_tilde(&config.records_path))?
        };

        let schemes = if !config.schemes_path.trim().is_empty() {
            Some(read_json(&expand_tilde(&config.schemes_path))?)
        } else if config.builtin_schemes {
            Some(builtin_schemes())
        } else {
            None
        };

        let interventions = if !config.interventions_path.trim().is_empty() {
            Some(read_json(&expand_tilde(&config.interventions_path))?)
        } else if config.builtin_interventions {
            Some(builtin_interventions())
        } else {
            None
        };

        let store = Self::new(records, schemes, interventions)?;
        info!(
            records = store.records.len(),
            schemes = store.schemes.as_ref().map(Vec::len).unwrap_or(0),
            interventions = store.interventions.as_ref().map(Vec::len).unwrap_or(0),
            fingerprint = %store.fingerprint(),
            "catalog loaded"
        );
        Ok(store)
    }

    pub fn records(&self) -> &[ClaimRecord] {
        &self.records
    }

    pub fn record(&self, id: &str) -> Option<&ClaimRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn schemes(&self) -> Option<&[SchemeDefinition]> {
        self.schemes.as_deref()
    }

    pub fn interventions(&self) -> Option<&[InterventionTemplate]> {
        self.interventions.as_deref()
    }

    pub fn catalogs(&self) -> Catalogs<'_> {
        Catalogs {
            schemes: self.schemes(),
            interventions: self.interventions(),
        }
    }

    pub fn fingerprint(&self) -> String {
        let canonical =
            serde_json::to_string(&(&self.schemes, &self.interventions)).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed reading catalog file: {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("failed parsing catalog file: {}", path.display()))
}

fn ensure_unique_ids<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            bail!("duplicate {kind} id in catalog: {id}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{ClaimStatus, ClaimType};

    #[test]
    fn builtin_catalog_has_demo_records_and_tables() {
        let store = CatalogStore::builtin().expect("builtin catalog should load");
        assert!(!store.records().is_empty());
        assert_eq!(store.schemes().map(<[_]>::len), Some(4));
        assert_eq!(store.interventions().map(<[_]>::len), Some(4));
        assert!(store.record("FRA-OD-001").is_some());
    }

    #[test]
    fn rejects_duplicate_record_ids() {
        let record = ClaimRecord::new(
            "X",
            "x",
            ClaimType::IndividualForestRights,
            ClaimStatus::Pending,
            1.0,
        );
        let err = CatalogStore::new(vec![record.clone(), record], None, None)
            .expect_err("duplicates must be rejected");
        assert!(err.to_string().contains("duplicate record id"));
    }

    #[test]
    fn fingerprint_tracks_table_contents() {
        let a = CatalogStore::builtin().unwrap();
        let b = CatalogStore::builtin().unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());

        let mut schemes = builtin_schemes();
        schemes.pop();
        let c = CatalogStore::new(Vec::new(), Some(schemes), Some(builtin_interventions()))
            .unwrap();
        assert_ne!(a.fingerprint(), c.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }

    #[test]
    fn load_without_builtins_leaves_tables_absent() {
        let config = CatalogConfig {
            builtin_schemes: false,
            builtin_interventions: false,
            ..CatalogConfig::default()
        };
        let store = CatalogStore::load(&config).unwrap();
        assert!(store.schemes().is_none());
        assert!(store.interventions().is_none());
        assert!(!store.records().is_empty());
    }
}
