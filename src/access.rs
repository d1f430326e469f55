use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::CatalogStore;
use crate::engine::{RecommendationEngine, RecommendationResult};
use crate::error::EngineError;
use crate::records::{ClaimRecord, RecordFilter};
use crate::summary::ClaimSummary;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Beneficiary,
}

impl FromStr for Role {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" | "administrator" => Ok(Self::Admin),
            "user" | "beneficiary" => Ok(Self::Beneficiary),
            _ => Err(EngineError::UnauthorizedRole(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Caller {
    pub role: String,
    #[serde(default)]
    pub owner_record_id: Option<String>,
}

impl Caller {
    pub fn admin() -> Self {
        Self {
            role: "admin".to_string(),
            owner_record_id: None,
        }
    }

    pub fn beneficiary(owner_record_id: Option<&str>) -> Self {
        Self {
            role: "beneficiary".to_string(),
            owner_record_id: owner_record_id.map(str::to_string),
        }
    }

    pub fn role(&self) -> Result<Role, EngineError> {
        Role::from_str(&self.role)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordView<'a> {
    All(Vec<&'a ClaimRecord>),
    Own(&'a ClaimRecord),
    NoRecordFound,
}

impl<'a> RecordView<'a> {
    pub fn status(&self) -> LookupStatus {
        match self {
            Self::NoRecordFound => LookupStatus::NoRecordFound,
            Self::All(_) | Self::Own(_) => LookupStatus::Evaluated,
        }
    }

    pub fn records(&self) -> Vec<&'a ClaimRecord> {
        match self {
            Self::All(records) => records.clone(),
            Self::Own(record) => vec![*record],
            Self::NoRecordFound => Vec::new(),
        }
    }
}

pub fn resolve_view<'a>(
    caller: &Caller,
    records: &'a [ClaimRecord],
) -> Result<RecordView<'a>, EngineError> {
    match caller.role()? {
        Role::Admin => Ok(RecordView::All(records.iter().collect())),
        Role::Beneficiary => {
            let owned = caller
                .owner_record_id
                .as_deref()
                .and_then(|owner| records.iter().find(|r| r.id == owner));
            Ok(owned.map_or(RecordView::NoRecordFound, RecordView::Own))
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LookupStatus {
    Evaluated,
    NoRecordFound,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GuardedRecommendation {
    pub status: LookupStatus,
    pub record_id: Option<String>,
    #[serde(flatten)]
    pub result: RecommendationResult,
}

impl GuardedRecommendation {
    pub fn no_record_found() -> Self {
        Self {
            status: LookupStatus::NoRecordFound,
            record_id: None,
            result: RecommendationResult::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BulkEntry {
    pub record_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<RecommendationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct AccessGuard<'a> {
    store: &'a CatalogStore,
    engine: &'a RecommendationEngine,
}

impl<'a> AccessGuard<'a> {
    pub fn new(store: &'a CatalogStore, engine: &'a RecommendationEngine) -> Self {
        Self { store, engine }
    }

    pub fn view(&self, caller: &Caller) -> Result<RecordView<'a>, EngineError> {
        resolve_view(caller, self.store.records())
    }

    pub fn visible_records(
        &self,
        caller: &Caller,
        filter: &RecordFilter,
    ) -> Result<Vec<&'a ClaimRecord>, EngineError> {
        Ok(filter.apply(self.view(caller)?.records()))
    }

    /// Single evaluation. Administrators pick `record_id`; beneficiaries
    /// always get their own record, and `NoRecordFound` if they have none
    /// or ask for someone else's.
    pub fn recommend(
        &self,
        caller: &Caller,
        record_id: Option<&str>,
    ) -> Result<GuardedRecommendation, EngineError> {
        let record = match self.view(caller)? {
            RecordView::All(records) => match record_id {
                Some(id) => records
                    .into_iter()
                    .find(|r| r.id == id)
                    .ok_or_else(|| {
                        EngineError::InvalidRecord(format!("no claim record with id {id}"))
                    })?,
                None => {
                    return Err(EngineError::InvalidRecord("no record selected".to_string()))
                }
            },
            RecordView::Own(record) => {
                if record_id.is_some_and(|id| id != record.id) {
                    debug!(requested = ?record_id, "beneficiary requested a record outside their view");
                    return Ok(GuardedRecommendation::no_record_found());
                }
                record
            }
            RecordView::NoRecordFound => return Ok(GuardedRecommendation::no_record_found()),
        };

        let result = self.engine.recommend(Some(record), self.store.catalogs())?;
        Ok(GuardedRecommendation {
            status: LookupStatus::Evaluated,
            record_id: Some(record.id.clone()),
            result,
        })
    }

    /// Administrators only. Invalid records become error entries; catalog
    /// misconfiguration aborts the batch.
    pub fn recommend_bulk(
        &self,
        caller: &Caller,
        filter: &RecordFilter,
    ) -> Result<Vec<BulkEntry>, EngineError> {
        if caller.role()? != Role::Admin {
            return Err(EngineError::UnauthorizedRole(caller.role.clone()));
        }
        let records = self.visible_records(caller, filter)?;
        let catalogs = self.store.catalogs();
        let mut entries = Vec::with_capacity(records.len());
        for record in records {
            match self.engine.recommend(Some(record), catalogs) {
                Ok(result) => entries.push(BulkEntry {
                    record_id: record.id.clone(),
                    result: Some(result),
                    error: None,
                }),
                Err(EngineError::InvalidRecord(reason)) => {
                    warn!(record = %record.id, %reason, "skipping invalid record in bulk run");
                    entries.push(BulkEntry {
                        record_id: record.id.clone(),
                        result: None,
                        error: Some(reason),
                    });
                }
                Err(other) => return Err(other),
            }
        }
        Ok(entries)
    }

    pub fn summary(&self, caller: &Caller) -> Result<ClaimSummary, EngineError> {
        Ok(ClaimSummary::from_records(&self.view(caller)?.records()))
    }
}
