//! `[output]` and `[repl]` sections: how the trial is shown at the terminal

use serde::{Deserialize, Serialize};
use trial_domain::OutputFormat;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// `text` or `json`; unset means text unless `--output` says otherwise
    pub format: Option<OutputFormat>,
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

impl FileOutputConfig {
    /// The effective format: a command-line choice wins over the file.
    pub fn resolve_format(&self, from_cli: Option<OutputFormat>) -> OutputFormat {
        from_cli.or(self.format).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Spinner while the Court deliberates; `false` prints plain lines instead
    pub show_progress: bool,
    /// Readline history; `~/` is expanded by the REPL
    pub history_file: Option<String>,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}
