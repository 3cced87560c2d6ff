//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["trial.toml", ".trial.toml"];

/// Environment variables with this prefix override file values,
/// e.g. `TRIAL_GEMINI__MODEL=gemini-2.5-flash`.
const ENV_PREFIX: &str = "TRIAL_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `TRIAL_*` environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./trial.toml` or `./.trial.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/consistency-trial/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load a single file over the defaults, ignoring every other source
    pub fn load_file(path: &Path) -> Result<FileConfig, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// `$XDG_CONFIG_HOME/consistency-trial/config.toml`, or the platform
    /// equivalent
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("consistency-trial").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");
        println!("  [     ] Environment: {}*", ENV_PREFIX);

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./trial.toml or ./.trial.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.trial.max_rounds, 7);
        assert_eq!(config.gemini.api_key_env, "API_KEY");
    }

    #[test]
    fn test_global_config_path_names_the_app() {
        if let Some(path) = ConfigLoader::global_config_path() {
            assert!(path.to_string_lossy().contains("consistency-trial"));
        }
    }

    #[test]
    fn test_load_file_merges_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[trial]\nround_cap = \"advisory\"\n\n[gemini]\nmodel = \"m\"").unwrap();

        let config = ConfigLoader::load_file(file.path()).unwrap();
        assert_eq!(config.trial.round_cap, "advisory");
        assert_eq!(config.trial.max_rounds, 7);
        assert_eq!(config.gemini.model, "m");
        assert_eq!(config.gemini.api_key_env, "API_KEY");
    }

    #[test]
    fn test_env_overrides_explicit_file() {
        figment::Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file(
                "custom.toml",
                "[gemini]\nmodel = \"from-file\"\napi_key_env = \"COURT_KEY\"\n\n[trial]\nmax_rounds = 5",
            )?;
            jail.set_env("TRIAL_GEMINI__MODEL", "from-env");

            let config = ConfigLoader::load(Some(&PathBuf::from("custom.toml"))).map_err(|e| *e)?;
            assert_eq!(config.gemini.model, "from-env");
            assert_eq!(config.gemini.api_key_env, "COURT_KEY");
            assert_eq!(config.trial.max_rounds, 5);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_overrides_project_file() {
        figment::Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file(
                "trial.toml",
                "[gemini]\nmodel = \"from-project\"\n\n[trial]\ninitial_score = 90",
            )?;
            jail.create_file("custom.toml", "[gemini]\nmodel = \"from-explicit\"")?;

            assert_eq!(
                ConfigLoader::project_config_path(),
                Some(PathBuf::from("trial.toml"))
            );
            let config = ConfigLoader::load(Some(&PathBuf::from("custom.toml"))).map_err(|e| *e)?;
            assert_eq!(config.gemini.model, "from-explicit");
            assert_eq!(config.trial.initial_score, 90);
            assert_eq!(config.trial.max_rounds, 7);
            Ok(())
        });
    }

    #[test]
    fn test_hidden_project_file_is_found() {
        figment::Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file(".trial.toml", "[trial]\nround_cap = \"advisory\"")?;

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.trial.round_cap, "advisory");
            Ok(())
        });
    }

    #[test]
    fn test_load_file_rejects_bad_types() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[trial]\nmax_rounds = \"seven\"").unwrap();
        assert!(ConfigLoader::load_file(file.path()).is_err());
    }
}
