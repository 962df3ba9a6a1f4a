use crate::api::error::ApiError;
use crate::workers::exporter::ExportError;
use crate::workers::refresher::RefreshError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify_api_error(&self, error: &ApiError) -> LogLevel {
        match error {
            // Non-critical: Temporary server issues
            ApiError::Http { status, .. } if *status == 429 => LogLevel::Debug,
            ApiError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Critical: Auth, malformed responses
            ApiError::Http { status, .. } if *status == 401 => LogLevel::Error,
            ApiError::Http { status, .. } if *status == 403 => LogLevel::Error,
            ApiError::Decode(_) => LogLevel::Error,

            // Network issues - usually temporary
            _ => LogLevel::Warn,
        }
    }

    pub fn classify_refresh_error(&self, error: &RefreshError) -> LogLevel {
        match error {
            RefreshError::Required { source, .. } => self.classify_api_error(source),
            RefreshError::Timeout(_) => LogLevel::Warn,
            RefreshError::Interrupted => LogLevel::Error,
        }
    }

    pub fn classify_export_error(&self, error: &ExportError) -> LogLevel {
        match error {
            ExportError::Transport(source) => self.classify_api_error(source),
            ExportError::Rejected { .. } => LogLevel::Warn,
            ExportError::Save { .. } => LogLevel::Error,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> ApiError {
        ApiError::Http {
            status,
            message: String::new(),
        }
    }

    #[test]
    fn rate_limiting_is_quiet_and_auth_is_loud() {
        let classifier = ErrorClassifier::new();
        assert_eq!(classifier.classify_api_error(&http(429)), LogLevel::Debug);
        assert_eq!(classifier.classify_api_error(&http(502)), LogLevel::Warn);
        assert_eq!(classifier.classify_api_error(&http(401)), LogLevel::Error);
        assert_eq!(classifier.classify_api_error(&http(404)), LogLevel::Warn);
    }

    #[test]
    fn refresh_errors_inherit_the_resource_level() {
        let classifier = ErrorClassifier::new();
        let error = RefreshError::Required {
            resource: crate::workers::refresher::Resource::Statistics,
            source: http(403),
        };
        assert_eq!(classifier.classify_refresh_error(&error), LogLevel::Error);
        assert_eq!(
            classifier.classify_refresh_error(&RefreshError::Interrupted),
            LogLevel::Error
        );
    }
}
