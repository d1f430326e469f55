use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchemeDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub benefits: String,
}

impl SchemeDefinition {
    pub fn new(id: &str, name: &str, description: &str, benefits: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            benefits: benefits.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InterventionTemplate {
    pub id: String,
    pub category: InterventionCategory,
    pub name: String,
    pub description: String,
    /// Default label; the firing rule decides the effective priority.
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum InterventionCategory {
    Water,
    Forestry,
    Agriculture,
    Education,
    Livelihood,
    #[serde(other)]
    Other,
}

impl Display for InterventionCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Water => "Water",
            Self::Forestry => "Forestry",
            Self::Agriculture => "Agriculture",
            Self::Education => "Education",
            Self::Livelihood => "Livelihood",
            Self::Other => "Other",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Error)]
#[error("unknown priority: {0}")]
pub struct PriorityParseError(pub String);

impl FromStr for Priority {
    type Err = PriorityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(PriorityParseError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_rank_orders_high_first() {
        assert!(Priority::High.rank() > Priority::Medium.rank());
        assert!(Priority::Medium.rank() > Priority::Low.rank());
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn unknown_category_deserializes_as_other() {
        let template: InterventionTemplate = serde_json::from_str(
            r#"{"id":"INT9","category":"Health","name":"Clinic","description":"d","priority":"Low"}"#,
        )
        .expect("template should parse");
        assert_eq!(template.category, InterventionCategory::Other);
        assert_eq!(template.priority, Priority::Low);
    }
}
