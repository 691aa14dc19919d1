//! Pattern library for entity detection
//!
//! Rules are declared in TOML (embedded default, or an external file) and
//! compiled once into a [`PatternRegistry`]. Each rule yields a fixed or
//! context-adjusted confidence, not merely true/false: a cue found near the
//! match promotes the score, and a structural validator can drop a match
//! outright (card numbers failing the Luhn check).

use crate::domain::errors::RecognizerError;
use crate::scrub::model::EntityType;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Embedded default pattern library.
const DEFAULT_PATTERNS: &str = include_str!("../../../patterns/legal_patterns.toml");

/// Minimal always-available baseline: contact and financial identifiers
/// only. Used when the full library cannot be loaded, so the engine
/// degrades rather than failing open.
const BASELINE_PATTERNS: &str = r#"
[rules.email_address]
entity_type = "EMAIL_ADDRESS"
confidence = 0.95
patterns = ['[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}']

[rules.ip_address]
entity_type = "IP_ADDRESS"
confidence = 0.9
patterns = ['\b(?:(?:25[0-5]|2[0-4]\d|1\d{2}|[1-9]?\d)\.){3}(?:25[0-5]|2[0-4]\d|1\d{2}|[1-9]?\d)\b']

[rules.phone_nanp]
entity_type = "PHONE_NUMBER"
confidence = 0.85
patterns = [
    '\(\d{3}\)\s?\d{3}[-.]\d{4}\b',
    '\b\d{3}[-.]\d{3}[-.]\d{4}\b',
]

[rules.credit_card]
entity_type = "CREDIT_CARD"
confidence = 0.95
patterns = ['\b(?:\d{4}[ -]?){3}\d{2,4}\b']
validator = "luhn"

[rules.uk_nino]
entity_type = "UK_NINO"
confidence = 0.8
patterns = ['\b[A-CEGHJ-PR-TW-Z]{2}\s?\d{2}\s?\d{2}\s?\d{2}\s?[A-D]\b']

[rules.us_ssn]
entity_type = "US_SSN"
confidence = 0.88
patterns = ['\b\d{3}-\d{2}-\d{4}\b']
"#;

/// Rule definition as parsed from TOML.
#[derive(Debug, Clone, Deserialize)]
struct RuleDefinition {
    entity_type: String,
    confidence: f32,
    patterns: Vec<String>,
    context_cues: Option<Vec<String>>,
    context_window: Option<usize>,
    cue_confidence: Option<f32>,
    validator: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PatternLibrary {
    rules: HashMap<String, RuleDefinition>,
}

/// A compiled regex, standard engine first, fancy engine when the pattern
/// needs look-around.
#[derive(Debug)]
pub enum Matcher {
    Std(regex::Regex),
    Fancy(fancy_regex::Regex),
}

impl Matcher {
    fn compile(pattern: &str) -> Result<Self, RecognizerError> {
        match regex::Regex::new(pattern) {
            Ok(re) => Ok(Self::Std(re)),
            Err(_) => fancy_regex::Regex::new(pattern)
                .map(Self::Fancy)
                .map_err(|e| {
                    RecognizerError::PatternLibrary(format!("invalid regex {pattern:?}: {e}"))
                }),
        }
    }

    /// Byte ranges of all non-overlapping matches. Fancy-engine errors on
    /// pathological input are logged and the remainder of that scan skipped.
    pub fn matches(&self, text: &str) -> Vec<(usize, usize)> {
        match self {
            Self::Std(re) => re.find_iter(text).map(|m| (m.start(), m.end())).collect(),
            Self::Fancy(re) => {
                let mut out = Vec::new();
                for m in re.find_iter(text) {
                    match m {
                        Ok(m) => out.push((m.start(), m.end())),
                        Err(e) => {
                            tracing::warn!(error = %e, "fancy-regex scan failed, skipping rest of input");
                            break;
                        }
                    }
                }
                out
            }
        }
    }
}

/// Cue words that promote a match's confidence when found nearby.
#[derive(Debug, Clone)]
pub struct ContextCue {
    cues: Vec<String>,
    window: usize,
    confidence: f32,
}

impl ContextCue {
    /// True if any cue occurs within `window` bytes before the match start
    /// or after the match end (case-insensitive).
    pub fn present_near(&self, text: &str, start: usize, end: usize) -> bool {
        let from = start.saturating_sub(self.window);
        let to = (end + self.window).min(text.len());
        // Clamp to char boundaries so slicing cannot panic on multibyte text.
        let from = (0..=from).rev().find(|i| text.is_char_boundary(*i)).unwrap_or(0);
        let to = (to..=text.len()).find(|i| text.is_char_boundary(*i)).unwrap_or(text.len());
        let neighborhood = text[from..to].to_lowercase();
        self.cues.iter().any(|cue| neighborhood.contains(&cue.to_lowercase()))
    }

    /// Confidence assigned when a cue is present.
    pub fn confidence(&self) -> f32 {
        self.confidence
    }
}

/// Structural validators applied to matched text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    /// Luhn checksum over the digits of the match
    Luhn,
}

impl Validator {
    fn parse(name: &str) -> Result<Self, RecognizerError> {
        match name {
            "luhn" => Ok(Self::Luhn),
            other => Err(RecognizerError::PatternLibrary(format!(
                "unknown validator: {other}"
            ))),
        }
    }

    /// True if the matched text passes the check.
    pub fn accepts(&self, matched: &str) -> bool {
        match self {
            Self::Luhn => luhn_valid(matched),
        }
    }
}

fn luhn_valid(text: &str) -> bool {
    let digits: Vec<u32> = text.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() < 12 {
        return false;
    }
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

/// A compiled detection rule.
#[derive(Debug)]
pub struct CompiledRule {
    pub name: String,
    pub entity_type: EntityType,
    pub matchers: Vec<Matcher>,
    pub confidence: f32,
    pub cue: Option<ContextCue>,
    pub validator: Option<Validator>,
}

/// Compiled pattern rule set.
#[derive(Debug)]
pub struct PatternRegistry {
    rules: Vec<CompiledRule>,
}

impl PatternRegistry {
    /// Load and compile a pattern library from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RecognizerError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            RecognizerError::PatternLibrary(format!(
                "failed to read pattern library {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Compile a pattern library from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, RecognizerError> {
        let library: PatternLibrary = toml::from_str(content)
            .map_err(|e| RecognizerError::PatternLibrary(format!("TOML parse error: {e}")))?;

        let mut rules = Vec::with_capacity(library.rules.len());
        for (name, def) in library.rules {
            if !(0.0..=1.0).contains(&def.confidence) {
                return Err(RecognizerError::PatternLibrary(format!(
                    "rule {name}: confidence {} outside [0, 1]",
                    def.confidence
                )));
            }
            let entity_type = EntityType::parse(&def.entity_type).map_err(|e| {
                RecognizerError::PatternLibrary(format!("rule {name}: {e}"))
            })?;

            let mut matchers = Vec::with_capacity(def.patterns.len());
            for pattern in &def.patterns {
                matchers.push(Matcher::compile(pattern).map_err(|e| {
                    RecognizerError::PatternLibrary(format!("rule {name}: {e}"))
                })?);
            }

            let cue = match def.context_cues {
                Some(cues) if !cues.is_empty() => Some(ContextCue {
                    cues,
                    window: def.context_window.unwrap_or(48),
                    confidence: def.cue_confidence.unwrap_or(def.confidence),
                }),
                _ => None,
            };

            let validator = def.validator.as_deref().map(Validator::parse).transpose()?;

            rules.push(CompiledRule {
                name,
                entity_type,
                matchers,
                confidence: def.confidence,
                cue,
                validator,
            });
        }

        // TOML tables deserialize into a HashMap; sort so scan order is
        // the documented lexical rule order, not hash order.
        rules.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(Self { rules })
    }

    /// The embedded default library.
    pub fn default_patterns() -> Result<Self, RecognizerError> {
        Self::from_toml(DEFAULT_PATTERNS)
    }

    /// The minimal always-available baseline set.
    pub fn baseline_patterns() -> Result<Self, RecognizerError> {
        Self::from_toml(BASELINE_PATTERNS)
    }

    /// All compiled rules in scan order.
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Entity types this rule set can produce, sorted and deduplicated.
    pub fn entity_types(&self) -> Vec<EntityType> {
        let mut types: Vec<EntityType> = self.rules.iter().map(|r| r.entity_type).collect();
        types.sort();
        types.dedup();
        types
    }
}
