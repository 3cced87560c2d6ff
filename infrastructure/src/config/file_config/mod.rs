//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod display;
mod gemini;
mod logging;
mod trial;

pub use display::{FileOutputConfig, FileReplConfig};
pub use gemini::FileGeminiConfig;
pub use logging::FileLoggingConfig;
pub use trial::FileTrialConfig;

use serde::{Deserialize, Serialize};
use trial_domain::{ConfigIssue, ConfigIssueCode, Severity};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Reasoning service settings
    pub gemini: FileGeminiConfig,
    /// Trial rules
    pub trial: FileTrialConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Transcript logging
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (field, value) in [
            ("gemini.model", &self.gemini.model),
            ("gemini.api_key_env", &self.gemini.api_key_env),
            ("gemini.base_url", &self.gemini.base_url),
        ] {
            if value.trim().is_empty() {
                issues.push(ConfigIssue {
                    severity: Severity::Error,
                    code: ConfigIssueCode::EmptyValue {
                        field: field.to_string(),
                    },
                    message: format!("{field} must not be empty"),
                });
            }
        }

        if self.gemini.timeout_secs == Some(0) {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::OutOfRange {
                    field: "gemini.timeout_secs".to_string(),
                },
                message: "gemini.timeout_secs = 0 would fail every request; remove it to disable the timeout"
                    .to_string(),
            });
        }

        issues.extend(self.trial.to_rules().1);

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trial_domain::{OutputFormat, RoundCapPolicy};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[gemini]
api_key_env = "GEMINI_API_KEY"
model = "gemini-2.5-flash"
timeout_secs = 90

[trial]
max_rounds = 5
initial_score = 80
round_cap = "advisory"

[output]
format = "json"
color = false

[repl]
show_progress = false
history_file = "~/.local/share/consistency-trial/history.txt"

[logging]
transcript_file = "trial.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gemini.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert_eq!(config.gemini.timeout_secs, Some(90));
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
        assert!(!config.repl.show_progress);
        assert_eq!(config.logging.transcript_file.as_deref(), Some("trial.jsonl"));

        let (rules, issues) = config.trial.to_rules();
        assert!(issues.is_empty());
        assert_eq!(rules.max_rounds, 5);
        assert_eq!(rules.initial_score, 80);
        assert_eq!(rules.round_cap, RoundCapPolicy::Advisory);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[trial]
max_rounds = 3
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.trial.max_rounds, 3);
        // Defaults should apply
        assert_eq!(config.trial.initial_score, 100);
        assert_eq!(config.gemini.api_key_env, "API_KEY");
        assert!(config.output.color);
        assert!(config.repl.show_progress);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_empty());
    }

    #[test]
    fn test_validate_reports_empty_model() {
        let mut config = FileConfig::default();
        config.gemini.model = " ".to_string();
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert_eq!(
            issues[0].code,
            ConfigIssueCode::EmptyValue {
                field: "gemini.model".to_string()
            }
        );
    }
}
