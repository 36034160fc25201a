//! Loader for `lead-scout` configuration with YAML + environment overlays.
//!
//! Sources are merged in order, later ones winning:
//! 1. the embedded defaults (`default.yaml`), where secrets point at
//!    `${TAVILY_API_KEY}`, `${GEMINI_API_KEY}`, `${GMAIL_EMAIL}` and
//!    `${GMAIL_APP_PASSWORD}`
//! 2. an optional YAML file
//! 3. `SCOUT__SECTION__KEY` environment variables
//!
//! `${VAR}` placeholders in the YAML layers are expanded once, before the
//! environment overlay is applied. Substituted text and overlay values are
//! taken verbatim, so a secret containing `$` survives untouched. Anything
//! left unresolved is reported by [`ScoutConfig::validate`].
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use scout_common::observability::LogFormat;
use serde::Deserialize;
use serde_json::Value;

const DEFAULT_YAML: &str = include_str!("default.yaml");

/// File picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "lead-scout.yaml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Source(#[from] config::ConfigError),

    #[error("configuration file not found: {0}")]
    MissingFile(PathBuf),

    #[error("invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Which branch of the tool is about to run; decides the required secrets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    LeadScan,
    Contact,
}

impl Mode {
    /// `"contact"` selects the contact relay; anything else is a lead scan.
    pub fn from_form_type(form_type: &str) -> Self {
        if form_type.trim() == "contact" {
            Mode::Contact
        } else {
            Mode::LeadScan
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoutConfig {
    pub search: SearchConfig,
    pub llm: LlmConfig,
    pub extraction: ExtractionConfig,
    pub mail: MailConfig,
    pub logging: LoggingConfig,
    /// Dotted key → placeholder that had no matching variable at load time.
    #[serde(skip)]
    unresolved: BTreeMap<String, Unresolved>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Unresolved {
    /// The value as it stood after expansion.
    left: String,
    vars: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub endpoint: String,
    pub api_key: String,
    pub max_results: u32,
    pub search_depth: String,
    pub timeout_secs: u64,
    pub retries: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_output_tokens: Option<u32>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    pub expected_leads: usize,
    pub strict_count: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub report_sender_name: String,
    pub contact_sender_name: String,
    pub contact_recipient: String,
    pub booking_url: String,
    pub signature_name: String,
    pub company_name: String,
    pub attachment_name: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
    #[serde(default)]
    pub directory: Option<PathBuf>,
    pub stderr: bool,
    pub filter: String,
}

impl ScoutConfig {
    /// Collect every required value that is blank or still holds an
    /// unresolved placeholder. Contact mode only needs the mail account.
    pub fn validate(&self, mode: Mode) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        self.require(&mut problems, "mail.username", &self.mail.username);
        self.require(&mut problems, "mail.password", &self.mail.password);
        self.require(&mut problems, "mail.smtp_host", &self.mail.smtp_host);
        self.require(&mut problems, "mail.contact_recipient", &self.mail.contact_recipient);
        if self.mail.smtp_port == 0 {
            problems.push("mail.smtp_port must be non-zero".to_string());
        }

        if mode == Mode::LeadScan {
            self.require(&mut problems, "search.api_key", &self.search.api_key);
            self.require(&mut problems, "llm.api_key", &self.llm.api_key);
            self.require(&mut problems, "llm.model", &self.llm.model);
            if self.search.max_results == 0 {
                problems.push("search.max_results must be at least 1".to_string());
            }
            if self.extraction.expected_leads == 0 {
                problems.push("extraction.expected_leads must be at least 1".to_string());
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems))
        }
    }

    fn require(&self, problems: &mut Vec<String>, key: &str, value: &str) {
        if value.trim().is_empty() {
            problems.push(format!("{key} is empty"));
            return;
        }
        // An overlay that replaced the value also cleared the placeholder.
        if let Some(u) = self.unresolved.get(key).filter(|u| u.left == value) {
            problems.push(format!(
                "{key} references unset variable(s): {}",
                u.vars.join(", ")
            ));
        }
    }
}

/// Expand `$VAR` / `${VAR}` in every string, one pass, recording keys whose
/// placeholders name unset variables. Substituted values are not rescanned.
fn expand_env_in_value(
    v: &mut Value,
    key: &mut String,
    unresolved: &mut BTreeMap<String, Unresolved>,
) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut vars = Vec::new();
                let expanded = shellexpand::env_with_context_no_errors(s.as_str(), |name: &str| {
                    let found = std::env::var(name).ok();
                    if found.is_none() {
                        vars.push(name.to_string());
                    }
                    found
                })
                .into_owned();
                if !vars.is_empty() {
                    unresolved.insert(
                        key.clone(),
                        Unresolved {
                            left: expanded.clone(),
                            vars,
                        },
                    );
                }
                *s = expanded;
            }
        }
        Value::Array(arr) => {
            for (i, item) in arr.iter_mut().enumerate() {
                let len = key.len();
                key.push_str(&format!("[{i}]"));
                expand_env_in_value(item, key, unresolved);
                key.truncate(len);
            }
        }
        Value::Object(obj) => {
            for (name, item) in obj.iter_mut() {
                let len = key.len();
                if !key.is_empty() {
                    key.push('.');
                }
                key.push_str(name);
                expand_env_in_value(item, key, unresolved);
                key.truncate(len);
            }
        }
        _ => {}
    }
}

/// Builder over the `config` crate wiring (embedded defaults, YAML, env).
pub struct ScoutConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for ScoutConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoutConfigLoader {
    /// Start from the embedded defaults.
    ///
    /// ```
    /// use scout_config::ScoutConfigLoader;
    ///
    /// let cfg = ScoutConfigLoader::new()
    ///     .with_yaml_str("search:\n  max_results: 5")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(cfg.search.max_results, 5);
    /// assert_eq!(cfg.mail.smtp_port, 587);
    /// ```
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_YAML, FileFormat::Yaml));
        Self { builder }
    }

    /// Attach a YAML file that must exist.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self.builder.add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a YAML file that is merged only when present.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Merge an inline YAML snippet.
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, FileFormat::Yaml));
        self
    }

    /// Explicit path if given (it must exist), otherwise `lead-scout.yaml`
    /// in the working directory when present.
    pub fn with_cli_path(self, path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) if !p.exists() => Err(ConfigError::MissingFile(p.to_path_buf())),
            Some(p) => Ok(self.with_file(p)),
            None => Ok(self.with_optional_file(DEFAULT_CONFIG_FILE)),
        }
    }

    /// Expand `${VAR}` placeholders in the YAML layers, apply the `SCOUT__`
    /// environment overlay on top and deserialize into [`ScoutConfig`].
    pub fn load(self) -> Result<ScoutConfig, ConfigError> {
        let mut v: Value = self.builder.build()?.try_deserialize()?;
        let mut unresolved = BTreeMap::new();
        expand_env_in_value(&mut v, &mut String::new(), &mut unresolved);

        // Re-read through `config` so overlay strings such as "20" still
        // convert into numeric and boolean fields.
        let expanded = serde_json::to_string(&v)
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        let mut typed = Config::builder()
            .add_source(File::from_str(&expanded, FileFormat::Json))
            .add_source(
                Environment::with_prefix("SCOUT")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize::<ScoutConfig>()?;
        typed.unresolved = unresolved;

        Ok(typed)
    }
}
