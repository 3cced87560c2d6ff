//! Trial rules from TOML (`[trial]` section)

use serde::{Deserialize, Serialize};
use trial_domain::{
    ConfigIssue, ConfigIssueCode, DEFAULT_MAX_ROUNDS, INITIAL_SCORE, RoundCapPolicy, Severity,
    TrialRules,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTrialConfig {
    /// Rounds before the final report is due
    pub max_rounds: u32,
    /// Starting score
    pub initial_score: i64,
    /// "enforced" or "advisory"
    pub round_cap: String,
}

impl Default for FileTrialConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            initial_score: INITIAL_SCORE,
            round_cap: RoundCapPolicy::default().as_str().to_string(),
        }
    }
}

impl FileTrialConfig {
    /// Convert to domain rules, reporting anything that had to be replaced.
    pub fn to_rules(&self) -> (TrialRules, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        let round_cap = match self.round_cap.parse::<RoundCapPolicy>() {
            Ok(policy) => policy,
            Err(_) => {
                issues.push(ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::InvalidEnumValue {
                        field: "trial.round_cap".to_string(),
                        value: self.round_cap.clone(),
                        valid_values: vec!["enforced".to_string(), "advisory".to_string()],
                    },
                    message: format!(
                        "trial.round_cap: unknown value '{}', falling back to 'enforced'",
                        self.round_cap
                    ),
                });
                RoundCapPolicy::Enforced
            }
        };

        if self.max_rounds == 0 {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::OutOfRange {
                    field: "trial.max_rounds".to_string(),
                },
                message: "trial.max_rounds must be at least 1".to_string(),
            });
        }

        if self.initial_score <= 0 {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::OutOfRange {
                    field: "trial.initial_score".to_string(),
                },
                message: "trial.initial_score must be positive; a trial at 0 is already over"
                    .to_string(),
            });
        }

        let rules = TrialRules::default()
            .with_max_rounds(self.max_rounds)
            .with_initial_score(self.initial_score)
            .with_round_cap(round_cap);

        (rules, issues)
    }
}
