use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// The ledger backend the dashboard talks to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Backend running on this machine with its default port.
    #[default]
    Local,
    /// Any other backend, addressed by its base URL.
    Custom { api_url: String },
}

impl Environment {
    /// Returns the base URL of the backend, without a trailing slash.
    pub fn api_url(&self) -> String {
        match self {
            Environment::Local => "http://localhost:5000".to_string(),
            Environment::Custom { api_url } => api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Picks the environment from an explicit URL, then the named environment, then a saved URL.
    pub fn resolve(
        cli_url: Option<String>,
        env_name: Option<String>,
        saved_url: Option<String>,
    ) -> Environment {
        if let Some(api_url) = cli_url {
            return Environment::Custom { api_url };
        }
        if let Some(env) = env_name.and_then(|name| name.parse::<Environment>().ok()) {
            return env;
        }
        match saved_url {
            Some(api_url) if !api_url.trim().is_empty() => Environment::Custom { api_url },
            _ => Environment::default(),
        }
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            lower if lower.starts_with("http://") || lower.starts_with("https://") => {
                Ok(Environment::Custom {
                    api_url: trimmed.to_string(),
                })
            }
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.api_url())
    }
}
