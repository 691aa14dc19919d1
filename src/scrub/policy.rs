//! Scrub policy
//!
//! A [`Policy`] declares which entity types are in scope per flow
//! [`Direction`], the confidence thresholds that gate detections, and the
//! anonymization strategy applied per type. It is constructed once from a
//! raw configuration mapping, validated fallibly, and immutable thereafter,
//! so it can be shared read-only across concurrent scrub calls.

use crate::domain::errors::PolicyError;
use crate::scrub::anonymizer::StrategyKind;
use crate::scrub::model::EntityType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Which way text is flowing across the trust boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Toward a model or analysis path
    Inbound,
    /// Out to a user, export, or log
    Outbound,
}

impl Direction {
    /// Parse a direction string as used on the CLI and in policy files.
    pub fn parse(s: &str) -> Result<Self, PolicyError> {
        match s.to_lowercase().as_str() {
            "inbound" => Ok(Self::Inbound),
            "outbound" => Ok(Self::Outbound),
            other => Err(PolicyError::Malformed(format!(
                "direction must be inbound or outbound, got {other}"
            ))),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inbound => f.write_str("inbound"),
            Self::Outbound => f.write_str("outbound"),
        }
    }
}

/// Declarative, direction-aware anonymization policy.
///
/// Built once via [`Policy::from_value`] (a `from_dict`-style constructor)
/// or [`Policy::from_toml_str`]; invalid configurations are rejected at
/// construction time, never at scrub time.
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    inbound_entities: HashSet<EntityType>,
    outbound_entities: HashSet<EntityType>,
    confidence_threshold: f32,
    threshold_overrides: HashMap<EntityType, f32>,
    strategy_overrides: HashMap<EntityType, StrategyKind>,
    priority_overrides: HashMap<EntityType, u8>,
}

/// Default global confidence threshold when the policy document omits one.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.5;

impl Policy {
    /// Build a policy from a raw JSON-style configuration mapping.
    ///
    /// Recognized keys: `inbound_entities`, `outbound_entities`,
    /// `confidence_threshold`, `threshold_overrides`, `strategy_overrides`,
    /// `priority_overrides`. Unknown keys, unknown entity-type strings,
    /// duplicate entries, and thresholds outside [0, 1] are all rejected.
    pub fn from_value(value: &Value) -> Result<Self, PolicyError> {
        let map = value
            .as_object()
            .ok_or_else(|| PolicyError::Malformed("policy document must be a mapping".into()))?;

        for key in map.keys() {
            match key.as_str() {
                "inbound_entities"
                | "outbound_entities"
                | "confidence_threshold"
                | "threshold_overrides"
                | "strategy_overrides"
                | "priority_overrides" => {}
                other => return Err(PolicyError::UnknownField(other.to_string())),
            }
        }

        let inbound_entities =
            Self::parse_entity_list(map.get("inbound_entities"), "inbound_entities")?;
        let outbound_entities =
            Self::parse_entity_list(map.get("outbound_entities"), "outbound_entities")?;

        let confidence_threshold = match map.get("confidence_threshold") {
            None => DEFAULT_CONFIDENCE_THRESHOLD,
            Some(v) => Self::parse_threshold(v)?,
        };

        let mut threshold_overrides = HashMap::new();
        if let Some(v) = map.get("threshold_overrides") {
            let overrides = v.as_object().ok_or_else(|| {
                PolicyError::Malformed("threshold_overrides must be a mapping".into())
            })?;
            for (name, raw) in overrides {
                let entity = EntityType::parse(name)?;
                threshold_overrides.insert(entity, Self::parse_threshold(raw)?);
            }
        }

        let mut strategy_overrides = HashMap::new();
        if let Some(v) = map.get("strategy_overrides") {
            let overrides = v.as_object().ok_or_else(|| {
                PolicyError::Malformed("strategy_overrides must be a mapping".into())
            })?;
            for (name, raw) in overrides {
                let entity = EntityType::parse(name)?;
                let strategy = raw
                    .as_str()
                    .ok_or_else(|| {
                        PolicyError::Malformed(format!("strategy for {name} must be a string"))
                    })
                    .and_then(StrategyKind::parse)?;
                strategy_overrides.insert(entity, strategy);
            }
        }

        let mut priority_overrides = HashMap::new();
        if let Some(v) = map.get("priority_overrides") {
            let overrides = v.as_object().ok_or_else(|| {
                PolicyError::Malformed("priority_overrides must be a mapping".into())
            })?;
            for (name, raw) in overrides {
                let entity = EntityType::parse(name)?;
                let priority = raw.as_u64().filter(|p| *p <= u8::MAX as u64).ok_or_else(|| {
                    PolicyError::Malformed(format!("priority for {name} must be an integer 0-255"))
                })?;
                priority_overrides.insert(entity, priority as u8);
            }
        }

        Ok(Self {
            inbound_entities,
            outbound_entities,
            confidence_threshold,
            threshold_overrides,
            strategy_overrides,
            priority_overrides,
        })
    }

    /// Build a policy from a TOML document with the same schema as
    /// [`Policy::from_value`].
    pub fn from_toml_str(content: &str) -> Result<Self, PolicyError> {
        let raw: toml::Value = toml::from_str(content)
            .map_err(|e| PolicyError::Malformed(format!("TOML parse error: {e}")))?;
        let json = serde_json::to_value(raw)
            .map_err(|e| PolicyError::Malformed(format!("policy conversion failed: {e}")))?;
        Self::from_value(&json)
    }

    fn parse_entity_list(
        value: Option<&Value>,
        field: &'static str,
    ) -> Result<HashSet<EntityType>, PolicyError> {
        let mut set = HashSet::new();
        let Some(value) = value else {
            return Ok(set);
        };
        let list = value
            .as_array()
            .ok_or_else(|| PolicyError::Malformed(format!("{field} must be a list of strings")))?;
        for item in list {
            let name = item
                .as_str()
                .ok_or_else(|| PolicyError::Malformed(format!("{field} entries must be strings")))?;
            let entity = EntityType::parse(name)?;
            if !set.insert(entity) {
                return Err(PolicyError::DuplicateEntityType {
                    entity: name.to_string(),
                    field,
                });
            }
        }
        Ok(set)
    }

    fn parse_threshold(value: &Value) -> Result<f32, PolicyError> {
        let raw = value
            .as_f64()
            .ok_or_else(|| PolicyError::Malformed("threshold must be a number".into()))?;
        if !(0.0..=1.0).contains(&raw) {
            return Err(PolicyError::ThresholdOutOfRange(raw));
        }
        Ok(raw as f32)
    }

    /// Entity types in scope for the given direction.
    pub fn entities_for(&self, direction: Direction) -> &HashSet<EntityType> {
        match direction {
            Direction::Inbound => &self.inbound_entities,
            Direction::Outbound => &self.outbound_entities,
        }
    }

    /// Global default confidence threshold.
    pub fn confidence_threshold(&self) -> f32 {
        self.confidence_threshold
    }

    /// Effective threshold for a type: the per-type override if present,
    /// else the global default.
    pub fn effective_threshold(&self, entity_type: EntityType) -> f32 {
        self.threshold_overrides
            .get(&entity_type)
            .copied()
            .unwrap_or(self.confidence_threshold)
    }

    /// Strategy applied to a type; tag substitution unless overridden.
    pub fn strategy_for(&self, entity_type: EntityType) -> StrategyKind {
        self.strategy_overrides
            .get(&entity_type)
            .copied()
            .unwrap_or(StrategyKind::Tag)
    }

    /// Overlap-resolution priority for a type; the documented default
    /// ladder unless overridden.
    pub fn priority_of(&self, entity_type: EntityType) -> u8 {
        self.priority_overrides
            .get(&entity_type)
            .copied()
            .unwrap_or_else(|| entity_type.default_priority())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_minimal() {
        let policy = Policy::from_value(&json!({
            "inbound_entities": ["LAW_FIRM", "EMAIL_ADDRESS"],
            "confidence_threshold": 0.8
        }))
        .unwrap();

        assert!(policy
            .entities_for(Direction::Inbound)
            .contains(&EntityType::LawFirm));
        assert!(policy.entities_for(Direction::Outbound).is_empty());
        assert_eq!(policy.confidence_threshold(), 0.8);
    }

    #[test]
    fn test_unknown_entity_type_rejected() {
        let err = Policy::from_value(&json!({
            "inbound_entities": ["FAVORITE_COLOR"]
        }))
        .unwrap_err();
        assert_eq!(err, PolicyError::UnknownEntityType("FAVORITE_COLOR".into()));
    }

    #[test]
    fn test_duplicate_entity_rejected() {
        let err = Policy::from_value(&json!({
            "outbound_entities": ["PERSON", "PERSON"]
        }))
        .unwrap_err();
        assert!(matches!(err, PolicyError::DuplicateEntityType { .. }));
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let err = Policy::from_value(&json!({ "confidence_threshold": 1.2 })).unwrap_err();
        assert_eq!(err, PolicyError::ThresholdOutOfRange(1.2));

        let err = Policy::from_value(&json!({ "confidence_threshold": -0.1 })).unwrap_err();
        assert!(matches!(err, PolicyError::ThresholdOutOfRange(_)));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = Policy::from_value(&json!({ "entities": ["PERSON"] })).unwrap_err();
        assert_eq!(err, PolicyError::UnknownField("entities".into()));
    }

    #[test]
    fn test_non_mapping_rejected() {
        assert!(Policy::from_value(&json!(["PERSON"])).is_err());
    }

    #[test]
    fn test_effective_threshold_override() {
        let policy = Policy::from_value(&json!({
            "inbound_entities": ["PERSON", "BAR_LICENSE"],
            "confidence_threshold": 0.6,
            "threshold_overrides": { "BAR_LICENSE": 0.9 }
        }))
        .unwrap();

        assert_eq!(policy.effective_threshold(EntityType::Person), 0.6);
        assert_eq!(policy.effective_threshold(EntityType::BarLicense), 0.9);
    }

    #[test]
    fn test_strategy_default_and_override() {
        let policy = Policy::from_value(&json!({
            "outbound_entities": ["PERSON", "BAR_LICENSE"],
            "strategy_overrides": { "BAR_LICENSE": "mask", "PERSON": "hash" }
        }))
        .unwrap();

        assert_eq!(policy.strategy_for(EntityType::BarLicense), StrategyKind::Mask);
        assert_eq!(policy.strategy_for(EntityType::Person), StrategyKind::HashToken);
        assert_eq!(policy.strategy_for(EntityType::LawFirm), StrategyKind::Tag);
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let err = Policy::from_value(&json!({
            "strategy_overrides": { "PERSON": "rot13" }
        }))
        .unwrap_err();
        assert_eq!(err, PolicyError::UnknownStrategy("rot13".into()));
    }

    #[test]
    fn test_priority_override() {
        let policy = Policy::from_value(&json!({
            "priority_overrides": { "ORGANIZATION": 99 }
        }))
        .unwrap();
        assert_eq!(policy.priority_of(EntityType::Organization), 99);
        assert_eq!(
            policy.priority_of(EntityType::LawFirm),
            EntityType::LawFirm.default_priority()
        );
    }

    #[test]
    fn test_from_toml_str() {
        let policy = Policy::from_toml_str(
            r#"
inbound_entities = ["LAW_FIRM"]
outbound_entities = ["LAW_FIRM", "COURT_CASE"]
confidence_threshold = 0.7

[strategy_overrides]
LAW_FIRM = "hash"
"#,
        )
        .unwrap();

        assert_eq!(policy.confidence_threshold(), 0.7);
        assert_eq!(policy.strategy_for(EntityType::LawFirm), StrategyKind::HashToken);
        assert_eq!(policy.entities_for(Direction::Outbound).len(), 2);
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!(Direction::parse("inbound").unwrap(), Direction::Inbound);
        assert_eq!(Direction::parse("OUTBOUND").unwrap(), Direction::Outbound);
        assert!(Direction::parse("sideways").is_err());
    }
}
