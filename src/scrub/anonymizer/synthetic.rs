//! Synthetic replacement strategy

use super::{AnonymizerStrategy, StrategyKind};
use crate::scrub::model::{EntitySpan, EntityType};
use rand::seq::SliceRandom;
use rand::Rng;

const GIVEN_NAMES: [&str; 8] = [
    "Alex", "Morgan", "Jordan", "Casey", "Riley", "Quinn", "Avery", "Cameron",
];

const SURNAMES: [&str; 8] = [
    "Calloway", "Whitfield", "Marsh", "Okafor", "Lindqvist", "Barrera", "Tanaka", "Drummond",
];

const ORG_WORDS: [&str; 8] = [
    "Meridian", "Northgate", "Bluepeak", "Harborview", "Stonebridge", "Vantage", "Crestline",
    "Summit",
];

const ORG_SUFFIXES: [&str; 4] = ["Group", "Holdings", "Partners", "Co"];

/// Substitutes a plausible but unrelated value of the same syntactic
/// shape. Values are drawn from fixed fictional inventories plus fresh
/// randomness, never from the original text, so the output cannot be
/// derived back to the original.
pub struct SyntheticStrategy;

impl SyntheticStrategy {
    /// Create a new synthetic strategy.
    pub fn new() -> Self {
        Self
    }

    fn person(rng: &mut impl Rng) -> String {
        format!(
            "{} {}",
            GIVEN_NAMES.choose(rng).unwrap(),
            SURNAMES.choose(rng).unwrap()
        )
    }

    fn organization(rng: &mut impl Rng) -> String {
        format!(
            "{} {}",
            ORG_WORDS.choose(rng).unwrap(),
            ORG_SUFFIXES.choose(rng).unwrap()
        )
    }

    fn value_for(entity_type: EntityType) -> String {
        let mut rng = rand::thread_rng();
        match entity_type {
            EntityType::Person => Self::person(&mut rng),
            EntityType::LegalProfessional => format!("{}, Esq.", Self::person(&mut rng)),
            EntityType::Organization => Self::organization(&mut rng),
            EntityType::LawFirm => format!(
                "{} & {} LLP",
                SURNAMES.choose(&mut rng).unwrap(),
                SURNAMES.choose(&mut rng).unwrap()
            ),
            EntityType::OpposingParty => format!(
                "{} v. {}",
                Self::organization(&mut rng),
                Self::organization(&mut rng)
            ),
            EntityType::EmailAddress => format!(
                "{}.{}@example.net",
                GIVEN_NAMES.choose(&mut rng).unwrap().to_lowercase(),
                SURNAMES.choose(&mut rng).unwrap().to_lowercase()
            ),
            // 555-01xx is the reserved fictional NANP exchange.
            EntityType::PhoneNumber => {
                format!("(555) 01{:02}-{:04}", rng.gen_range(0..100), rng.gen_range(0..10000))
            }
            EntityType::CreditCard => Self::luhn_card(&mut rng),
            // 192.0.2.0/24 is reserved for documentation.
            EntityType::IpAddress => format!("192.0.2.{}", rng.gen_range(1..255)),
            // 900-series area numbers are never issued.
            EntityType::UsSsn => format!("9{:02}-{:02}-{:04}", rng.gen_range(0..100), rng.gen_range(10..100), rng.gen_range(0..10000)),
            // QQ is an invalid NINO prefix.
            EntityType::UkNino => format!("QQ {:02} {:02} {:02} C", rng.gen_range(10..100), rng.gen_range(10..100), rng.gen_range(10..100)),
            EntityType::CourtCase => {
                format!("9:{:02}-cv-{:05}", rng.gen_range(10..100), rng.gen_range(0..100000))
            }
            EntityType::BarLicense => format!("Bar No. {:06}", rng.gen_range(0..1000000)),
            EntityType::LegalCitation => {
                format!("{} F.3d {}", rng.gen_range(100..1000), rng.gen_range(1..1500))
            }
            // Confidentiality markers have no meaningful synthetic shape;
            // fall back to the tag form.
            EntityType::ConfidentialLegal => format!("[{}]", entity_type.label()),
        }
    }

    /// Random 16-digit number with a valid Luhn check digit, prefixed with
    /// the reserved test IIN.
    fn luhn_card(rng: &mut impl Rng) -> String {
        let mut digits: Vec<u32> = Vec::with_capacity(16);
        // 9999 is not an issued IIN range.
        digits.extend([9, 9, 9, 9]);
        for _ in 0..11 {
            digits.push(rng.gen_range(0..10));
        }

        let sum: u32 = digits
            .iter()
            .rev()
            .enumerate()
            .map(|(i, &d)| {
                // Positions counted from the right, with the check digit
                // still missing, so even indices here double.
                if i % 2 == 0 {
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
        digits.push((10 - (sum % 10)) % 10);

        digits
            .chunks(4)
            .map(|chunk| chunk.iter().map(|d| d.to_string()).collect::<String>())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl AnonymizerStrategy for SyntheticStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Synthetic
    }

    fn replacement(&self, span: &EntitySpan) -> String {
        Self::value_for(span.entity_type)
    }
}

impl Default for SyntheticStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrub::model::RecognizerSource;

    fn span(entity_type: EntityType, text: &str) -> EntitySpan {
        EntitySpan::new(
            entity_type,
            0,
            text.len(),
            text,
            0.9,
            RecognizerSource::Pattern("test".into()),
        )
        .unwrap()
    }

    #[test]
    fn test_email_shape() {
        let value = SyntheticStrategy::new()
            .replacement(&span(EntityType::EmailAddress, "real.person@firm.com"));
        assert!(value.contains('@'));
        assert!(value.ends_with("example.net"));
        assert!(!value.contains("real.person"));
    }

    #[test]
    fn test_phone_uses_fictional_exchange() {
        let value =
            SyntheticStrategy::new().replacement(&span(EntityType::PhoneNumber, "(415) 555-1234"));
        assert!(value.starts_with("(555) 01"));
    }

    #[test]
    fn test_card_is_luhn_valid() {
        for _ in 0..20 {
            let value = SyntheticStrategy::new()
                .replacement(&span(EntityType::CreditCard, "4532 0151 1283 0366"));
            let digits: Vec<u32> = value.chars().filter_map(|c| c.to_digit(10)).collect();
            assert_eq!(digits.len(), 16);
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
            assert_eq!(sum % 10, 0);
        }
    }

    #[test]
    fn test_person_not_derived_from_original() {
        let value =
            SyntheticStrategy::new().replacement(&span(EntityType::Person, "Jennifer Martinez"));
        assert!(!value.contains("Jennifer"));
        assert!(!value.contains("Martinez"));
    }

    #[test]
    fn test_docket_shape() {
        let value =
            SyntheticStrategy::new().replacement(&span(EntityType::CourtCase, "1:23-cv-12345"));
        assert!(value.starts_with("9:"));
        assert!(value.contains("-cv-"));
    }
}
