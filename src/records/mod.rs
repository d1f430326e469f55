pub mod filter;
pub mod normalize;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use filter::RecordFilter;
pub use normalize::{normalize_record, validate_record};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRecord {
    pub id: String,
    pub name: String,
    pub state: String,
    pub district: String,
    pub village: String,
    pub claim_type: ClaimType,
    pub claim_status: ClaimStatus,
    pub area: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl ClaimRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        claim_type: ClaimType,
        claim_status: ClaimStatus,
        area: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            state: String::new(),
            district: String::new(),
            village: String::new(),
            claim_type,
            claim_status,
            area,
            approval_date: None,
            coordinates: None,
        }
    }

    pub fn with_location(
        mut self,
        state: impl Into<String>,
        district: impl Into<String>,
        village: impl Into<String>,
    ) -> Self {
        self.state = state.into();
        self.district = district.into();
        self.village = village.into();
        self
    }

    pub fn with_approval_date(mut self, date: NaiveDate) -> Self {
        self.approval_date = Some(date);
        self
    }

    pub fn with_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.coordinates = Some(Coordinates { lat, lng });
        self
    }

    pub fn is_approved_individual(&self) -> bool {
        self.claim_type == ClaimType::IndividualForestRights
            && self.claim_status == ClaimStatus::Approved
    }
}

/// Labels outside the known set are kept verbatim in `Other` and never
/// satisfy a predicate that inspects the claim type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClaimType {
    IndividualForestRights,
    CommunityForestRights,
    CommunityForestResourceRights,
    Other(String),
}

impl ClaimType {
    pub const KNOWN: [ClaimType; 3] = [
        ClaimType::IndividualForestRights,
        ClaimType::CommunityForestRights,
        ClaimType::CommunityForestResourceRights,
    ];

    pub fn label(&self) -> &str {
        match self {
            Self::IndividualForestRights => "Individual Forest Rights",
            Self::CommunityForestRights => "Community Forest Rights",
            Self::CommunityForestResourceRights => "Community Forest Resource Rights",
            Self::Other(label) => label,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    pub fn is_community(&self) -> bool {
        self.is_known() && self.label().contains("Community")
    }
}

impl Display for ClaimType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<String> for ClaimType {
    fn from(value: String) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|known| known.label() == value.trim())
            .unwrap_or(Self::Other(value))
    }
}

impl From<ClaimType> for String {
    fn from(value: ClaimType) -> Self {
        value.label().to_string()
    }
}

impl FromStr for ClaimType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        let parsed = match normalized.as_str() {
            "individual forest rights" | "individual" | "ifr" => Self::IndividualForestRights,
            "community forest rights" | "community" | "cfr" => Self::CommunityForestRights,
            "community forest resource rights" | "community resource" | "cfrr" => {
                Self::CommunityForestResourceRights
            }
            _ => Self::Other(s.trim().to_string()),
        };
        Ok(parsed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClaimStatus {
    Approved,
    Pending,
    Rejected,
    Other(String),
}

impl ClaimStatus {
    pub fn label(&self) -> &str {
        match self {
            Self::Approved => "Approved",
            Self::Pending => "Pending",
            Self::Rejected => "Rejected",
            Self::Other(label) => label,
        }
    }
}

impl Display for ClaimStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<String> for ClaimStatus {
    fn from(value: String) -> Self {
        match value.trim() {
            "Approved" => Self::Approved,
            "Pending" => Self::Pending,
            "Rejected" => Self::Rejected,
            _ => Self::Other(value),
        }
    }
}

impl From<ClaimStatus> for String {
    fn from(value: ClaimStatus) -> Self {
        value.label().to_string()
    }
}

impl FromStr for ClaimStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = match s.trim().to_ascii_lowercase().as_str() {
            "approved" => Self::Approved,
            "pending" => Self::Pending,
            "rejected" => Self::Rejected,
            _ => Self::Other(s.trim().to_string()),
        };
        Ok(parsed)
    }
}
