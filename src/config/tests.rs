//! Configuration Tests
//!
//! Parses argument vectors directly. Assumes no `GITA_*` variables are set in the
//! test environment.

#[cfg(test)]
mod tests {
    use crate::config::{Config, OracleBackend};
    use clap::Parser;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["gita-advisor"]).unwrap();

        assert_eq!(config.bind.port(), 8000);
        assert_eq!(config.data_path.to_str(), Some("data/verses.json"));
        assert_eq!(config.oracle_backend, OracleBackend::Local);
        assert_eq!(config.retry_attempts, 3);
        assert!(!config.verbose);
    }

    #[test]
    fn test_remote_backend_flags() {
        let config = Config::try_parse_from([
            "gita-advisor",
            "--oracle-backend",
            "remote",
            "--inference-url",
            "http://localhost:9000/models",
            "--timeout-secs",
            "5",
            "--retry-attempts",
            "2",
        ])
        .unwrap();

        assert_eq!(config.oracle_backend, OracleBackend::Remote);

        let settings = config.remote_settings();
        assert_eq!(settings.base_url, "http://localhost:9000/models");
        assert_eq!(
            settings.emotion_model,
            "j-hartmann/emotion-english-distilroberta-base"
        );
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.attempts, 2);
    }

    #[test]
    fn test_invalid_bind_address_rejected() {
        let result = Config::try_parse_from(["gita-advisor", "--bind", "not-an-address"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_retry_attempts_rejected() {
        let result = Config::try_parse_from(["gita-advisor", "--retry-attempts", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let result = Config::try_parse_from(["gita-advisor", "--oracle-backend", "gpu"]);
        assert!(result.is_err());
    }
}
