//! Deep entity-recognition backend
//!
//! The optional capability behind the model-based recognizer. Loading is
//! fallible and resolved once at registry construction: a missing or
//! corrupt model file makes the backend unavailable, it never surfaces as
//! a fault during a later scrub call.
//!
//! The bundled implementation is a lexicon tagger: given-name/surname and
//! organization-keyword lists drive PERSON/ORGANIZATION detection over
//! capitalized token runs. The [`NerBackend`] trait is the seam where a
//! heavier model runtime would plug in.

use crate::domain::errors::RecognizerError;
use crate::scrub::model::{EntitySpan, EntityType, RecognizerSource};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Embedded default lexicon.
const DEFAULT_LEXICON: &str = include_str!("../../../patterns/ner_lexicon.toml");

/// Lowercase connectors allowed inside an organization run, so that
/// "University of Chicago" tags as one entity.
const CONNECTORS: [&str; 5] = ["of", "for", "and", "de", "la"];

/// Longest contiguous capitalized run considered a single entity.
const MAX_RUN_TOKENS: usize = 4;

/// A deep entity-recognition backend.
///
/// `recognize` takes `&mut self` because model runtimes are typically
/// stateful and not re-entrant; the model recognizer serializes calls
/// through a mutex held only across this inference step.
pub trait NerBackend: Send {
    /// Backend name, recorded as span provenance.
    fn name(&self) -> &str;

    /// Tag the text, returning PERSON/ORGANIZATION spans with
    /// backend-reported confidences.
    fn recognize(&mut self, text: &str) -> Result<Vec<EntitySpan>, RecognizerError>;
}

#[derive(Debug, Deserialize)]
struct LexiconFile {
    given_names: Vec<String>,
    surnames: Vec<String>,
    org_keywords: Vec<String>,
}

/// Lexicon-driven tagger over capitalized token runs.
#[derive(Debug)]
pub struct LexiconNerBackend {
    given_names: HashSet<String>,
    surnames: HashSet<String>,
    org_keywords: HashSet<String>,
}

struct Token {
    start: usize,
    end: usize,
    lower: String,
    capitalized: bool,
}

/// Split into alphabetic word tokens with byte offsets.
fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if !c.is_alphabetic() {
            continue;
        }
        let mut end = start + c.len_utf8();
        while let Some(&(i, nc)) = chars.peek() {
            if nc.is_alphabetic() || nc == '\'' || nc == '-' {
                end = i + nc.len_utf8();
                chars.next();
            } else {
                break;
            }
        }
        let word = &text[start..end];
        tokens.push(Token {
            start,
            end,
            lower: word.to_lowercase(),
            capitalized: word.chars().next().is_some_and(|c| c.is_uppercase()),
        });
    }

    tokens
}

impl LexiconNerBackend {
    /// Load a lexicon from a TOML file on disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RecognizerError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            RecognizerError::BackendUnavailable(format!(
                "failed to read lexicon {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Load the embedded default lexicon.
    pub fn embedded() -> Result<Self, RecognizerError> {
        Self::from_toml(DEFAULT_LEXICON)
    }

    /// Parse a lexicon from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, RecognizerError> {
        let file: LexiconFile = toml::from_str(content)
            .map_err(|e| RecognizerError::BackendUnavailable(format!("lexicon parse error: {e}")))?;

        if file.given_names.is_empty() && file.surnames.is_empty() && file.org_keywords.is_empty() {
            return Err(RecognizerError::BackendUnavailable("empty lexicon".into()));
        }

        let lower = |words: Vec<String>| -> HashSet<String> {
            words.into_iter().map(|w| w.to_lowercase()).collect()
        };

        Ok(Self {
            given_names: lower(file.given_names),
            surnames: lower(file.surnames),
            org_keywords: lower(file.org_keywords),
        })
    }

    /// Extend an organization run from `i`: capitalized tokens, with single
    /// connector words allowed between capitalized neighbors. Returns the
    /// end token index (exclusive) if the run names an organization.
    fn org_run(&self, text: &str, tokens: &[Token], i: usize) -> Option<usize> {
        let mut words = 1usize;
        let mut has_keyword = self.org_keywords.contains(&tokens[i].lower);
        let mut j = i + 1;

        while j < tokens.len() && words < MAX_RUN_TOKENS {
            if &text[tokens[j - 1].end..tokens[j].start] != " " {
                break;
            }
            if tokens[j].capitalized {
                has_keyword |= self.org_keywords.contains(&tokens[j].lower);
                words += 1;
                j += 1;
            } else if CONNECTORS.contains(&tokens[j].lower.as_str())
                && tokens.get(j + 1).is_some_and(|t| t.capitalized)
                && &text[tokens[j].end..tokens[j + 1].start] == " "
            {
                has_keyword |= self.org_keywords.contains(&tokens[j + 1].lower);
                words += 1;
                j += 2;
            } else {
                break;
            }
        }

        has_keyword.then_some(j)
    }

    /// Extend a contiguous capitalized run from `i` and classify it as a
    /// person. Returns (end token index, score) on a hit.
    fn person_run(&self, text: &str, tokens: &[Token], i: usize) -> (usize, Option<f32>) {
        let mut j = i + 1;
        while j < tokens.len()
            && j - i < MAX_RUN_TOKENS
            && tokens[j].capitalized
            && &text[tokens[j - 1].end..tokens[j].start] == " "
        {
            j += 1;
        }

        let len = j - i;
        let score = if self.given_names.contains(&tokens[i].lower) {
            Some(if len >= 2 { 0.85 } else { 0.6 })
        } else if len >= 2 && self.surnames.contains(&tokens[j - 1].lower) {
            Some(0.75)
        } else {
            None
        };

        (j, score)
    }
}

impl NerBackend for LexiconNerBackend {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn recognize(&mut self, text: &str) -> Result<Vec<EntitySpan>, RecognizerError> {
        let tokens = tokenize(text);
        let mut spans = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            if !tokens[i].capitalized {
                i += 1;
                continue;
            }

            if let Some(end_idx) = self.org_run(text, &tokens, i) {
                let start = tokens[i].start;
                let end = tokens[end_idx - 1].end;
                let words = end_idx - i;
                let score = if words >= 2 { 0.8 } else { 0.65 };
                if let Ok(span) = EntitySpan::new(
                    EntityType::Organization,
                    start,
                    end,
                    &text[start..end],
                    score,
                    RecognizerSource::Model(self.name().to_string()),
                ) {
                    spans.push(span);
                }
                i = end_idx;
                continue;
            }

            let (end_idx, person_score) = self.person_run(text, &tokens, i);
            if let Some(score) = person_score {
                let start = tokens[i].start;
                let end = tokens[end_idx - 1].end;
                if let Ok(span) = EntitySpan::new(
                    EntityType::Person,
                    start,
                    end,
                    &text[start..end],
                    score,
                    RecognizerSource::Model(self.name().to_string()),
                ) {
                    spans.push(span);
                }
            }
            i = end_idx;
        }

        Ok(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> LexiconNerBackend {
        LexiconNerBackend::embedded().unwrap()
    }

    #[test]
    fn test_embedded_lexicon_loads() {
        let b = backend();
        assert!(b.given_names.contains("jennifer"));
        assert!(b.org_keywords.contains("university"));
    }

    #[test]
    fn test_load_missing_file_is_unavailable() {
        let err = LexiconNerBackend::load("/nonexistent/lexicon.toml").unwrap_err();
        assert!(matches!(err, RecognizerError::BackendUnavailable(_)));
    }

    #[test]
    fn test_corrupt_lexicon_is_unavailable() {
        let err = LexiconNerBackend::from_toml("given_names = 3").unwrap_err();
        assert!(matches!(err, RecognizerError::BackendUnavailable(_)));
    }

    #[test]
    fn test_empty_lexicon_is_unavailable() {
        let err = LexiconNerBackend::from_toml(
            "given_names = []\nsurnames = []\norg_keywords = []",
        )
        .unwrap_err();
        assert!(matches!(err, RecognizerError::BackendUnavailable(_)));
    }

    #[test]
    fn test_person_from_given_name_run() {
        let spans = backend()
            .recognize("Deposition of Jennifer Martinez continued")
            .unwrap();
        let person = spans
            .iter()
            .find(|s| s.entity_type == EntityType::Person)
            .unwrap();
        assert_eq!(person.text, "Jennifer Martinez");
        assert!(person.score >= 0.85);
    }

    #[test]
    fn test_person_from_surname() {
        let spans = backend().recognize("Judge Williams presiding").unwrap();
        let person = spans
            .iter()
            .find(|s| s.entity_type == EntityType::Person)
            .unwrap();
        assert_eq!(person.text, "Judge Williams");
        assert_eq!(person.score, 0.75);
    }

    #[test]
    fn test_org_with_connector() {
        let spans = backend()
            .recognize("filed by the University of Chicago yesterday")
            .unwrap();
        let org = spans
            .iter()
            .find(|s| s.entity_type == EntityType::Organization)
            .unwrap();
        assert_eq!(org.text, "University of Chicago");
    }

    #[test]
    fn test_org_keyword_run() {
        let spans = backend().recognize("account at First National Bank closed").unwrap();
        let org = spans
            .iter()
            .find(|s| s.entity_type == EntityType::Organization)
            .unwrap();
        assert_eq!(org.text, "First National Bank");
        assert_eq!(org.score, 0.8);
    }

    #[test]
    fn test_no_entities_in_plain_text() {
        let spans = backend()
            .recognize("the quick brown fox jumps over the lazy dog")
            .unwrap();
        assert!(spans.is_empty());
    }

    #[test]
    fn test_offsets_match_text() {
        let text = "Counsel Jennifer Martinez met First National Bank officers";
        let spans = backend().recognize(text).unwrap();
        for span in &spans {
            assert_eq!(&text[span.start..span.end], span.text);
        }
        assert!(spans.iter().any(|s| s.entity_type == EntityType::Organization));
    }
}
