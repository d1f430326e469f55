use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{InterventionTemplate, SchemeDefinition};
use crate::eligibility::{EligibilityRuleSet, SchemeMatch};
use crate::error::{CatalogKind, EngineError};
use crate::interventions::{InterventionMatch, InterventionRuleSet};
use crate::records::{validate_record, ClaimRecord};
use crate::regions::RegionProfile;

#[derive(Debug, Clone, Copy, Default)]
pub struct Catalogs<'a> {
    pub schemes: Option<&'a [SchemeDefinition]>,
    pub interventions: Option<&'a [InterventionTemplate]>,
}

impl<'a> Catalogs<'a> {
    pub fn new(schemes: &'a [SchemeDefinition], interventions: &'a [InterventionTemplate]) -> Self {
        Self {
            schemes: Some(schemes),
            interventions: Some(interventions),
        }
    }

    pub fn require(
        &self,
    ) -> Result<(&'a [SchemeDefinition], &'a [InterventionTemplate]), EngineError> {
        let schemes = self
            .schemes
            .ok_or(EngineError::MissingCatalog(CatalogKind::Schemes))?;
        let interventions = self
            .interventions
            .ok_or(EngineError::MissingCatalog(CatalogKind::Interventions))?;
        Ok((schemes, interventions))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResult {
    pub schemes: Vec<SchemeMatch>,
    pub interventions: Vec<InterventionMatch>,
}

impl RecommendationResult {
    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty() && self.interventions.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    eligibility: EligibilityRuleSet,
    interventions: InterventionRuleSet,
    regions: RegionProfile,
}

impl RecommendationEngine {
    pub fn new(
        eligibility: EligibilityRuleSet,
        interventions: InterventionRuleSet,
        regions: RegionProfile,
    ) -> Self {
        Self {
            eligibility,
            interventions,
            regions,
        }
    }

    pub fn standard(regions: RegionProfile) -> Self {
        Self::new(
            EligibilityRuleSet::standard(),
            InterventionRuleSet::standard(),
            regions,
        )
    }

    pub fn regions(&self) -> &RegionProfile {
        &self.regions
    }

    pub fn eligibility(&self) -> &EligibilityRuleSet {
        &self.eligibility
    }

    pub fn intervention_rules(&self) -> &InterventionRuleSet {
        &self.interventions
    }

    /// Pure: repeated calls on the same inputs return identical results.
    pub fn recommend(
        &self,
        record: Option<&ClaimRecord>,
        catalogs: Catalogs<'_>,
    ) -> Result<RecommendationResult, EngineError> {
        let record =
            record.ok_or_else(|| EngineError::InvalidRecord("no record supplied".to_string()))?;
        validate_record(record)?;
        let (schemes, templates) = catalogs.require()?;

        let result = RecommendationResult {
            schemes: self.eligibility.evaluate(record, schemes, &self.regions),
            interventions: self.interventions.evaluate(record, templates, &self.regions),
        };
        debug!(
            record = %record.id,
            schemes = result.schemes.len(),
            interventions = result.interventions.len(),
            "recommendation evaluated"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::defaults::{builtin_interventions, builtin_schemes};
    use crate::config::RegionConfig;
    use crate::records::{ClaimStatus, ClaimType};

    fn engine() -> RecommendationEngine {
        RecommendationEngine::standard(RegionProfile::from_config(&RegionConfig::default()))
    }

    fn record() -> ClaimRecord {
        ClaimRecord::new(
            "FRA-1",
            "Sukru",
            ClaimType::IndividualForestRights,
            ClaimStatus::Approved,
            2.5,
        )
        .with_location("Odisha", "Koraput", "Koraput")
    }

    #[test]
    fn absent_record_is_invalid() {
        let schemes = builtin_schemes();
        let interventions = builtin_interventions();
        let err = engine()
            .recommend(None, Catalogs::new(&schemes, &interventions))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidRecord(_)));
    }

    #[test]
    fn malformed_record_is_invalid() {
        let schemes = builtin_schemes();
        let interventions = builtin_interventions();
        let mut bad = record();
        bad.area = f64::INFINITY;
        let err = engine()
            .recommend(Some(&bad), Catalogs::new(&schemes, &interventions))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidRecord(_)));
    }

    #[test]
    fn missing_catalogs_are_reported_by_kind() {
        let schemes = builtin_schemes();
        let interventions = builtin_interventions();
        let rec = record();

        let err = engine()
            .recommend(Some(&rec), Catalogs::default())
            .unwrap_err();
        assert_eq!(err, EngineError::MissingCatalog(CatalogKind::Schemes));

        let only_schemes = Catalogs {
            schemes: Some(&schemes),
            interventions: None,
        };
        let err = engine().recommend(Some(&rec), only_schemes).unwrap_err();
        assert_eq!(err, EngineError::MissingCatalog(CatalogKind::Interventions));

        let only_interventions = Catalogs {
            schemes: None,
            interventions: Some(&interventions),
        };
        assert!(engine().recommend(Some(&rec), only_interventions).is_err());
    }

    #[test]
    fn repeated_calls_serialize_identically() {
        let schemes = builtin_schemes();
        let interventions = builtin_interventions();
        let rec = record();
        let engine = engine();
        let first = engine
            .recommend(Some(&rec), Catalogs::new(&schemes, &interventions))
            .unwrap();
        let second = engine
            .recommend(Some(&rec), Catalogs::new(&schemes, &interventions))
            .unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_eq!(rec, record());
    }

    #[test]
    fn result_serializes_with_presentation_keys() {
        let schemes = builtin_schemes();
        let interventions = builtin_interventions();
        let result = engine()
            .recommend(Some(&record()), Catalogs::new(&schemes, &interventions))
            .unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["schemes"][0]["matchScore"], 98);
        assert_eq!(json["schemes"][0]["scheme"]["id"], "SCH002");
        assert_eq!(json["interventions"][0]["priority"], "High");
    }

    #[test]
    fn empty_catalogs_yield_empty_result() {
        let result = engine()
            .recommend(Some(&record()), Catalogs::new(&[], &[]))
            .unwrap();
        assert!(result.is_empty());
    }
}
