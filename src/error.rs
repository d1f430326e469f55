use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Schemes,
    Interventions,
}

impl Display for CatalogKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Schemes => write!(f, "schemes"),
            Self::Interventions => write!(f, "interventions"),
        }
    }
}

/// A beneficiary without a claim is not an error; see
/// [`crate::access::LookupStatus::NoRecordFound`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid claim record: {0}")]
    InvalidRecord(String),
    #[error("{0} catalog was not supplied")]
    MissingCatalog(CatalogKind),
    #[error("role is not authorized: {0}")]
    UnauthorizedRole(String),
    #[error("more than one eligibility rule registered for scheme {0}")]
    DuplicateRule(String),
}

impl EngineError {
    pub fn is_operator_fault(&self) -> bool {
        matches!(self, Self::MissingCatalog(_) | Self::DuplicateRule(_))
    }
}
