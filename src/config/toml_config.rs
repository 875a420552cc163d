use crate::adapters::superjob::TOKEN_ENV;
use crate::adapters::{HeadHunterSettings, SuperJobSettings};
use crate::domain::model::FoundFrom;
use crate::utils::error::{Result, SalaryError};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_required_field, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// HeadHunter
    Hh,
    /// SuperJob
    Sj,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub languages: Vec<String>,
    /// Sources to query, in report order.
    pub sources: Vec<SourceKind>,
    pub found_from: FoundFrom,
    pub request_timeout_seconds: Option<u64>,
    pub headhunter: HeadHunterSettings,
    pub superjob: SuperJobSettings,
}

impl Default for Settings {
    fn default() -> Self {
        let languages = [
            "Python",
            "Java",
            "JavaScript",
            "TypeScript",
            "C#",
            "C++",
            "PHP",
            "Go",
            "Ruby",
            "Kotlin",
            "Swift",
            "Scala",
        ];
        Self {
            languages: languages.iter().map(|l| l.to_string()).collect(),
            sources: vec![SourceKind::Hh, SourceKind::Sj],
            found_from: FoundFrom::default(),
            request_timeout_seconds: None,
            headhunter: HeadHunterSettings::default(),
            superjob: SuperJobSettings::default(),
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SalaryError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unset variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| SalaryError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Takes the SuperJob key from `SUPERJOB_TOKEN` when the file did not
    /// provide a usable one.
    pub fn fill_token_from_env(&mut self) {
        let unresolved = match &self.superjob.token {
            None => true,
            Some(token) => token.trim().is_empty() || token.starts_with("${"),
        };
        if unresolved {
            self.superjob.token = std::env::var(TOKEN_ENV).ok().filter(|t| !t.trim().is_empty());
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }

    pub fn uses(&self, kind: SourceKind) -> bool {
        self.sources.contains(&kind)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        for language in &self.languages {
            validate_non_empty_string("languages", language)?;
        }

        if self.sources.is_empty() {
            return Err(SalaryError::ConfigValidationError {
                field: "sources".to_string(),
                message: "at least one source must be selected".to_string(),
            });
        }

        if let Some(timeout) = self.request_timeout_seconds {
            validate_range("request_timeout_seconds", timeout, 1, 600)?;
        }

        if self.uses(SourceKind::Hh) {
            validate_url("headhunter.endpoint", &self.headhunter.endpoint)?;
            validate_range("headhunter.per_page", self.headhunter.per_page, 1, 100)?;
            validate_non_empty_string("headhunter.user_agent", &self.headhunter.user_agent)?;
        }

        if self.uses(SourceKind::Sj) {
            validate_url("superjob.endpoint", &self.superjob.endpoint)?;
            validate_range("superjob.per_page", self.superjob.per_page, 1, 100)?;
            let token = validate_required_field("superjob.token", &self.superjob.token)?;
            validate_non_empty_string("superjob.token", token)?;
        }

        Ok(())
    }
}
