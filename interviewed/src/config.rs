//! Question bank and signature rule tables.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::questions::default_questions;
use crate::types::{InterviewError, InterviewQuestion, Result};

/// Configuration for interviews.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InterviewConfig {
    /// Questions, in asking order
    pub questions: Vec<InterviewQuestion>,
    /// Keyword tables used to derive signatures
    pub signature: SignatureRules,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            questions: default_questions(),
            signature: SignatureRules::default(),
        }
    }
}

impl InterviewConfig {
    /// Load config from YAML.
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> std::result::Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Check that the question bank is usable.
    pub fn validate(&self) -> Result<()> {
        if self.questions.is_empty() {
            return Err(InterviewError::ConfigError("question bank is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for question in &self.questions {
            if !seen.insert(question.id.as_str()) {
                return Err(InterviewError::ConfigError(format!(
                    "duplicate question id '{}'",
                    question.id
                )));
            }
            if question.follow_up_triggers.iter().any(|t| t.trigger.trim().is_empty()) {
                return Err(InterviewError::ConfigError(format!(
                    "question '{}' has a blank trigger",
                    question.id
                )));
            }
        }

        self.signature.validate()
    }
}

/// A label that applies when any of its keywords appears.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub label: String,
    pub keywords: Vec<String>,
}

impl KeywordRule {
    pub fn new(label: &str, keywords: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Check whether lowercase `text` contains any keyword.
    pub fn matches(&self, text: &str) -> bool {
        self.keywords
            .iter()
            .any(|k| text.contains(k.to_lowercase().as_str()))
    }
}

/// Ordered keyword rules with a fallback label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelTable {
    pub rules: Vec<KeywordRule>,
    /// Used when no rule matches
    pub fallback: String,
}

impl LabelTable {
    pub fn new(rules: Vec<KeywordRule>, fallback: &str) -> Self {
        Self {
            rules,
            fallback: fallback.to_string(),
        }
    }

    /// Every matching label, or the fallback alone.
    pub fn all_matches(&self, text: &str) -> Vec<String> {
        let labels: Vec<String> = self
            .rules
            .iter()
            .filter(|r| r.matches(text))
            .map(|r| r.label.clone())
            .collect();

        if labels.is_empty() {
            vec![self.fallback.clone()]
        } else {
            labels
        }
    }

    /// First matching label in rule order, or the fallback.
    pub fn first_match(&self, text: &str) -> String {
        self.rules
            .iter()
            .find(|r| r.matches(text))
            .map(|r| r.label.clone())
            .unwrap_or_else(|| self.fallback.clone())
    }
}

/// Binary environment classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentRule {
    /// Label when a solitude keyword matches
    pub solitude: KeywordRule,
    /// Label otherwise
    pub otherwise: String,
}

impl EnvironmentRule {
    pub fn classify(&self, text: &str) -> String {
        if self.solitude.matches(text) {
            self.solitude.label.clone()
        } else {
            self.otherwise.clone()
        }
    }
}

/// Adds a benefit direction when a label is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitRule {
    /// Label that must be present
    pub when: String,
    /// Direction added
    pub add: String,
}

/// Benefit directions: fixed seeds plus label-conditional additions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitTable {
    pub seed: Vec<String>,
    pub rules: Vec<BenefitRule>,
}

impl BenefitTable {
    pub fn new(seed: &[&str], rules: &[(&str, &str)]) -> Self {
        Self {
            seed: seed.iter().map(|s| s.to_string()).collect(),
            rules: rules
                .iter()
                .map(|(when, add)| BenefitRule {
                    when: when.to_string(),
                    add: add.to_string(),
                })
                .collect(),
        }
    }

    pub fn directions(&self, labels: &[String]) -> Vec<String> {
        let mut directions = self.seed.clone();
        directions.extend(
            self.rules
                .iter()
                .filter(|r| labels.contains(&r.when))
                .map(|r| r.add.clone()),
        );
        directions
    }
}

/// Fixed values for dimensions whose answers are not yet interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placeholders {
    pub growing_edge: String,
    pub integrated_wounds: Vec<String>,
    pub vision: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            growing_edge: "emergent".to_string(),
            integrated_wounds: vec!["resilience".to_string()],
            vision: "toward-coherence".to_string(),
        }
    }
}

/// Keyword tables for signature derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureRules {
    /// Hunger labels (all that match)
    pub hunger: LabelTable,
    /// Gift labels (all that match)
    pub gift: LabelTable,
    /// Movement pattern (first match)
    pub movement: LabelTable,
    /// Affinity labels (all that match)
    pub affinity: LabelTable,
    /// Activation environment
    pub environment: EnvironmentRule,
    /// Environment anti-patterns (all that match, no fallback)
    pub anti_patterns: Vec<KeywordRule>,
    /// Keyed on hunger labels
    pub would_benefit_from: BenefitTable,
    /// Keyed on gift labels
    pub could_benefit: BenefitTable,
    pub placeholders: Placeholders,
}

impl SignatureRules {
    /// Every keyword rule, across all tables.
    pub fn keyword_rules(&self) -> impl Iterator<Item = &KeywordRule> {
        self.hunger
            .rules
            .iter()
            .chain(&self.gift.rules)
            .chain(&self.movement.rules)
            .chain(&self.affinity.rules)
            .chain(std::iter::once(&self.environment.solitude))
            .chain(&self.anti_patterns)
    }

    /// Reject blank keywords, which would match every answer.
    pub fn validate(&self) -> Result<()> {
        for rule in self.keyword_rules() {
            if rule.keywords.is_empty() {
                return Err(InterviewError::ConfigError(format!(
                    "rule '{}' has no keywords",
                    rule.label
                )));
            }
            if rule.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(InterviewError::ConfigError(format!(
                    "rule '{}' has a blank keyword",
                    rule.label
                )));
            }
        }
        Ok(())
    }
}

impl Default for SignatureRules {
    fn default() -> Self {
        Self {
            hunger: LabelTable::new(
                vec![
                    KeywordRule::new("connection", &["connect", "belong", "community"]),
                    KeywordRule::new("meaning", &["meaning", "purpose", "why"]),
                    KeywordRule::new("mastery", &["learn", "master", "skill"]),
                    KeywordRule::new("creation", &["create", "build", "make"]),
                ],
                "undefined-hunger",
            ),
            gift: LabelTable::new(
                vec![
                    KeywordRule::new("listening", &["listen", "hear", "understand"]),
                    KeywordRule::new("seeing-patterns", &["see", "pattern", "notice"]),
                    KeywordRule::new("building", &["build", "create", "make"]),
                    KeywordRule::new("teaching", &["teach", "guide", "show"]),
                ],
                "latent-gift",
            ),
            movement: LabelTable::new(
                vec![
                    KeywordRule::new("stepping-back", &["walk", "space", "away"]),
                    KeywordRule::new("dialogue", &["talk", "ask", "discuss"]),
                    KeywordRule::new("persistence", &["push", "persist", "force"]),
                    KeywordRule::new("waiting", &["wait", "sit", "patience"]),
                ],
                "undefined-movement",
            ),
            affinity: LabelTable::new(
                vec![
                    KeywordRule::new("complexity", &["complex", "hard", "knot"]),
                    KeywordRule::new("human-systems", &["people", "human", "social"]),
                    KeywordRule::new("creative", &["creative", "art", "design"]),
                ],
                "generalist",
            ),
            environment: EnvironmentRule {
                solitude: KeywordRule::new("solitude", &["alone", "quiet"]),
                otherwise: "collaboration".to_string(),
            },
            anti_patterns: vec![
                KeywordRule::new("chaotic environments", &["noise", "chaos"]),
                KeywordRule::new("artificial urgency", &["pressure", "deadline"]),
            ],
            would_benefit_from: BenefitTable::new(
                &["resonant peers"],
                &[("mastery", "mentors"), ("connection", "community")],
            ),
            could_benefit: BenefitTable::new(
                &["those with aligned vision"],
                &[("teaching", "seekers"), ("listening", "those processing")],
            ),
            placeholders: Placeholders::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = InterviewConfig::default();
        assert_eq!(config.questions.len(), 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let mut config = InterviewConfig::default();
        let first = config.questions[0].clone();
        config.questions.push(first);
        assert!(matches!(config.validate(), Err(InterviewError::ConfigError(_))));
    }

    #[test]
    fn test_validate_rejects_blank_keyword() {
        let mut config = InterviewConfig::default();
        config.signature.hunger.rules[0].keywords.push(String::new());
        assert!(matches!(config.validate(), Err(InterviewError::ConfigError(_))));

        let mut config = InterviewConfig::default();
        config.signature.environment.solitude.keywords = vec!["  ".to_string()];
        assert!(config.validate().is_err());

        let mut config = InterviewConfig::default();
        config.signature.anti_patterns[1].keywords.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = InterviewConfig::from_yaml(
            "signature:\n  placeholders:\n    growing_edge: rooted\n",
        )
        .unwrap();

        let defaults = SignatureRules::default();
        assert_eq!(config.signature.placeholders.growing_edge, "rooted");
        assert_eq!(config.signature.placeholders.vision, "toward-coherence");
        assert_eq!(config.signature.hunger, defaults.hunger);
        assert_eq!(config.signature.anti_patterns, defaults.anti_patterns);
        assert_eq!(config.questions.len(), 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_label_table_modes() {
        let table = SignatureRules::default().movement;
        assert_eq!(table.first_match("i walk, then talk"), "stepping-back");
        assert_eq!(table.first_match("nothing helps"), "undefined-movement");

        let hunger = SignatureRules::default().hunger;
        assert_eq!(
            hunger.all_matches("to belong and to learn"),
            vec!["connection".to_string(), "mastery".to_string()]
        );
        assert_eq!(hunger.all_matches("quiet"), vec!["undefined-hunger".to_string()]);
    }

    #[test]
    fn test_benefit_table() {
        let table = SignatureRules::default().would_benefit_from;
        let directions = table.directions(&["connection".to_string()]);
        assert_eq!(directions, vec!["resonant peers", "community"]);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = InterviewConfig::default();
        let yaml = config.to_yaml().unwrap();
        let parsed = InterviewConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.questions.len(), 8);
        assert_eq!(parsed.signature, config.signature);
        assert_eq!(
            parsed.questions[2].follow_up_triggers,
            config.questions[2].follow_up_triggers
        );
    }
}
