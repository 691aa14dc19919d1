//! Entity data model
//!
//! Core types shared by every stage of the scrub pipeline: the closed
//! [`EntityType`] enumeration, the located/typed/scored [`EntitySpan`], and
//! the [`RecognizerSource`] provenance tag used for audit and tie-breaking.

use crate::domain::errors::{PolicyError, RecognizerError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Categories of sensitive information the engine can detect.
///
/// The set is closed: new entity families are added by extending this enum
/// and implementing a recognizer for them, not by registering arbitrary
/// callables at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    /// Personal names (generic)
    Person,
    /// Organizations and companies (generic)
    Organization,
    /// Law firms (name plus corporate suffix such as LLP/LLC)
    LawFirm,
    /// Court case identifiers (docket numbers, case numbers)
    CourtCase,
    /// Attorneys, judges, and other legal professionals
    LegalProfessional,
    /// Bar license numbers
    BarLicense,
    /// Legal citations (reporters, statutes)
    LegalCitation,
    /// Privilege and confidentiality markers
    ConfidentialLegal,
    /// Case-caption party pairs ("A v. B")
    OpposingParty,
    /// Email addresses
    EmailAddress,
    /// Telephone numbers
    PhoneNumber,
    /// Payment card numbers
    CreditCard,
    /// IP addresses
    IpAddress,
    /// United States Social Security Numbers
    UsSsn,
    /// United Kingdom National Insurance Numbers
    UkNino,
}

impl EntityType {
    /// Every entity type, in declaration order.
    pub const ALL: [EntityType; 15] = [
        Self::Person,
        Self::Organization,
        Self::LawFirm,
        Self::CourtCase,
        Self::LegalProfessional,
        Self::BarLicense,
        Self::LegalCitation,
        Self::ConfidentialLegal,
        Self::OpposingParty,
        Self::EmailAddress,
        Self::PhoneNumber,
        Self::CreditCard,
        Self::IpAddress,
        Self::UsSsn,
        Self::UkNino,
    ];

    /// Label used in tag-substitution output, e.g. `[LAW_FIRM]`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Organization => "ORGANIZATION",
            Self::LawFirm => "LAW_FIRM",
            Self::CourtCase => "COURT_CASE",
            Self::LegalProfessional => "LEGAL_PROFESSIONAL",
            Self::BarLicense => "BAR_LICENSE",
            Self::LegalCitation => "LEGAL_CITATION",
            Self::ConfidentialLegal => "CONFIDENTIAL_LEGAL",
            Self::OpposingParty => "OPPOSING_PARTY",
            Self::EmailAddress => "EMAIL_ADDRESS",
            Self::PhoneNumber => "PHONE_NUMBER",
            Self::CreditCard => "CREDIT_CARD",
            Self::IpAddress => "IP_ADDRESS",
            Self::UsSsn => "US_SSN",
            Self::UkNino => "UK_NINO",
        }
    }

    /// Parse an entity-type string as used in policy configuration.
    ///
    /// Unknown strings are rejected so that malformed policies fail at
    /// construction, never at scrub time.
    pub fn parse(s: &str) -> Result<Self, PolicyError> {
        match s.to_uppercase().as_str() {
            "PERSON" => Ok(Self::Person),
            "ORGANIZATION" | "ORG" => Ok(Self::Organization),
            "LAW_FIRM" => Ok(Self::LawFirm),
            "COURT_CASE" => Ok(Self::CourtCase),
            "LEGAL_PROFESSIONAL" => Ok(Self::LegalProfessional),
            "BAR_LICENSE" => Ok(Self::BarLicense),
            "LEGAL_CITATION" => Ok(Self::LegalCitation),
            "CONFIDENTIAL_LEGAL" => Ok(Self::ConfidentialLegal),
            "OPPOSING_PARTY" => Ok(Self::OpposingParty),
            "EMAIL_ADDRESS" | "EMAIL" => Ok(Self::EmailAddress),
            "PHONE_NUMBER" | "PHONE" => Ok(Self::PhoneNumber),
            "CREDIT_CARD" => Ok(Self::CreditCard),
            "IP_ADDRESS" => Ok(Self::IpAddress),
            "US_SSN" | "SSN" => Ok(Self::UsSsn),
            "UK_NINO" | "NINO" => Ok(Self::UkNino),
            _ => Err(PolicyError::UnknownEntityType(s.to_string())),
        }
    }

    /// Default precedence used as the final tie-breaker during overlap
    /// resolution. Higher wins.
    ///
    /// Legal-specific types outrank the generic NER types, which outrank
    /// contact and financial identifiers: a LEGAL_PROFESSIONAL match on
    /// "Judge Williams" should beat a generic PERSON match over the same
    /// span, and a full LAW_FIRM match should beat a partial ORGANIZATION
    /// match contained within it. Policies may override this per type.
    pub fn default_priority(&self) -> u8 {
        match self {
            Self::LawFirm
            | Self::CourtCase
            | Self::LegalProfessional
            | Self::BarLicense
            | Self::LegalCitation
            | Self::ConfidentialLegal
            | Self::OpposingParty => 30,
            Self::Person | Self::Organization => 20,
            Self::EmailAddress
            | Self::PhoneNumber
            | Self::CreditCard
            | Self::IpAddress
            | Self::UsSsn
            | Self::UkNino => 10,
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which recognizer produced a span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum RecognizerSource {
    /// A pattern rule, identified by its rule name.
    Pattern(String),
    /// The deep entity-recognition backend, identified by backend name.
    Model(String),
}

impl fmt::Display for RecognizerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(rule) => write!(f, "pattern:{rule}"),
            Self::Model(backend) => write!(f, "model:{backend}"),
        }
    }
}

/// A located, typed, scored match in the scanned text.
///
/// Offsets are byte positions into the original buffer, as a half-open
/// interval `[start, end)`. The matched text is an owned copy so that spans
/// can outlive the source buffer without lifetime ambiguity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpan {
    /// Category of the match
    pub entity_type: EntityType,
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive), always greater than `start`
    pub end: usize,
    /// The exact matched substring
    pub text: String,
    /// Confidence in [0.0, 1.0]
    pub score: f32,
    /// Recognizer that produced the span
    pub source: RecognizerSource,
}

impl EntitySpan {
    /// Create a span, rejecting zero-length or inverted intervals.
    ///
    /// The score is clamped into [0.0, 1.0].
    pub fn new(
        entity_type: EntityType,
        start: usize,
        end: usize,
        text: impl Into<String>,
        score: f32,
        source: RecognizerSource,
    ) -> Result<Self, RecognizerError> {
        if start >= end {
            return Err(RecognizerError::InvalidSpan { start, end });
        }
        Ok(Self {
            entity_type,
            start,
            end,
            text: text.into(),
            score: score.clamp(0.0, 1.0),
            source,
        })
    }

    /// Span length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True if the half-open intervals intersect.
    pub fn overlaps(&self, other: &EntitySpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}
