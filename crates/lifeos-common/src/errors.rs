use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Errors that end the `lifeos` process.
#[derive(Debug, thiserror::Error)]
pub enum LifeOsError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("model.temperature must be 0.0-2.0".into());
        assert_eq!(
            err.to_string(),
            "config validation error: model.temperature must be 0.0-2.0"
        );
    }

    #[test]
    fn lifeos_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: LifeOsError = config_err.into();
        assert!(matches!(err, LifeOsError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn lifeos_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: LifeOsError = io_err.into();
        assert!(matches!(err, LifeOsError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }
}
