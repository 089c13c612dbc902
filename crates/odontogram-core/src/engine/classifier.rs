//! Treatment text classifier.
//!
//! Maps a treatment's free-text type and description to the tooth condition
//! it leaves behind. Keyword groups are tested in precedence order and the
//! first group with a matching keyword wins:
//!
//! 1. extracted  (pencabutan, cabut)
//! 2. root_canal (saluran akar, endodontik)
//! 3. crown      (mahkota, crown)
//! 4. filled     (tambal, penambalan, tambalan)
//! 5. decayed    (karies, berlubang)
//!
//! Anything else (scaling, braces, check-ups) is `healthy`.

use serde::{Deserialize, Serialize};

use crate::models::{Condition, Treatment};

/// One keyword group of the classification table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRule {
    /// Condition assigned when any keyword matches
    pub condition: Condition,
    /// Lowercase substrings to look for
    pub keywords: Vec<String>,
}

/// Keyword classifier for treatments.
#[derive(Debug, Clone)]
pub struct Classifier {
    /// Keyword groups, highest precedence first
    rules: Vec<KeywordRule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    /// Create a new classifier with the default keyword table.
    pub fn new() -> Self {
        Self {
            rules: Self::default_rules(),
        }
    }

    /// Classify a treatment by its type and description.
    pub fn classify(&self, treatment: &Treatment) -> Condition {
        self.classify_text(
            treatment.treatment_type.as_deref(),
            treatment.description.as_deref(),
        )
    }

    /// Classify raw type/description text. Matching is case-insensitive.
    pub fn classify_text(&self, treatment_type: Option<&str>, description: Option<&str>) -> Condition {
        // Newline-joined so a keyword cannot straddle the two fields
        let text = format!(
            "{}\n{}",
            treatment_type.unwrap_or_default(),
            description.unwrap_or_default()
        )
        .to_lowercase();

        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|keyword| text.contains(keyword.as_str())))
            .map(|rule| rule.condition)
            .unwrap_or(Condition::Healthy)
    }

    /// Add a keyword to a condition's group.
    ///
    /// A condition with no group yet gets one at the lowest precedence.
    pub fn add_keyword(&mut self, condition: Condition, keyword: &str) {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return;
        }

        match self.rules.iter_mut().find(|rule| rule.condition == condition) {
            Some(rule) => {
                if !rule.keywords.contains(&keyword) {
                    rule.keywords.push(keyword);
                }
            }
            None => self.rules.push(KeywordRule {
                condition,
                keywords: vec![keyword],
            }),
        }
    }

    /// The keyword table, highest precedence first.
    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    /// Default keyword table.
    fn default_rules() -> Vec<KeywordRule> {
        fn rule(condition: Condition, keywords: &[&str]) -> KeywordRule {
            KeywordRule {
                condition,
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            }
        }

        vec![
            rule(Condition::Extracted, &["pencabutan", "cabut"]),
            rule(Condition::RootCanal, &["saluran akar", "endodontik"]),
            rule(Condition::Crown, &["mahkota", "crown"]),
            rule(Condition::Filled, &["tambal", "penambalan", "tambalan"]),
            rule(Condition::Decayed, &["karies", "berlubang"]),
        ]
    }
}
