//! Integration tests for carrier configuration

use std::collections::HashMap;

use carrier_request_sdk::config::{
    ENV_ACCEPT_LANGUAGE, ENV_BASE_URL, ENV_PASSWORD, ENV_TIMEOUT_SECONDS, ENV_USERNAME,
};
use carrier_request_sdk::{CarrierConfig, ConfigError, CredentialProvider};

mod env_tests {
    use super::*;

    fn lookup<'a>(vars: &'a HashMap<&str, &str>) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| vars.get(name).map(|v| v.to_string())
    }

    #[test]
    fn test_full_environment() {
        let vars = HashMap::from([
            (ENV_BASE_URL, "https://express.api.dhl.com/mydhlapi/test/"),
            (ENV_USERNAME, "apiuser"),
            (ENV_PASSWORD, "s3cret"),
            (ENV_TIMEOUT_SECONDS, " 12 "),
            (ENV_ACCEPT_LANGUAGE, "eng"),
        ]);
        let config = CarrierConfig::from_env_with(lookup(&vars)).unwrap();
        assert_eq!(
            config,
            CarrierConfig::test()
                .with_credentials("apiuser", "s3cret")
                .with_timeout(12)
                .with_accept_language("eng")
        );
    }

    #[test]
    fn test_missing_base_url() {
        let vars = HashMap::from([(ENV_USERNAME, "apiuser"), (ENV_PASSWORD, "s3cret")]);
        let err = CarrierConfig::from_env_with(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVariable(ref name) if name == ENV_BASE_URL));
    }

    #[test]
    fn test_empty_credentials_are_allowed() {
        let vars = HashMap::from([
            (ENV_BASE_URL, "http://localhost"),
            (ENV_USERNAME, ""),
            (ENV_PASSWORD, ""),
        ]);
        let config = CarrierConfig::from_env_with(lookup(&vars)).unwrap();
        let credentials = CredentialProvider::credentials(&config).unwrap();
        assert_eq!(credentials.authorization_header(), "Basic Og==");
    }
}

#[cfg(feature = "config-file")]
mod file_tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_file_with_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
base_url = "https://express.api.dhl.com/mydhlapi/"
username = "apiuser"
password = "s3cret"
"#
        )
        .unwrap();

        let config = CarrierConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "https://express.api.dhl.com/mydhlapi/");
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.accept_language, "ara");
    }

    #[test]
    fn test_from_toml_str_overrides() {
        let config = CarrierConfig::from_toml_str(
            r#"
base_url = "http://localhost:9000"
timeout_seconds = 0
accept_language = "deu"
"#,
        )
        .unwrap();
        assert_eq!(config.timeout(), None);
        assert_eq!(config.accept_language, "deu");
        assert_eq!(config.username, "");
    }

    #[test]
    fn test_missing_base_url_is_parse_error() {
        let err = CarrierConfig::from_toml_str("username = \"apiuser\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CarrierConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
