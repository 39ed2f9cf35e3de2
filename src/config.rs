use std::env;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),
}

/// Environment-provided deployment configuration.
///
/// Read once at startup and passed into the handlers through `AppState`,
/// never from inside request processing. A missing value fails the cold
/// start with a clear error instead of surfacing mid-request.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// AWS region the S3 and DynamoDB clients are bound to.
    pub region: String,
    /// Bucket receiving uploaded listing files.
    pub bucket_name: String,
    /// DynamoDB table holding listing records.
    pub table_name: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            region: require("AWS_REGION")?,
            bucket_name: require("HOTEL_BUCKET_NAME")?,
            table_name: env::var("HOTEL_TABLE_NAME").unwrap_or_else(|_| "Hotels".to_string()),
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Guards against parallel tests stomping on shared process environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_from_env_complete() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::set_var("AWS_REGION", "eu-west-1");
        env::set_var("HOTEL_BUCKET_NAME", "hotel-uploads");
        env::remove_var("HOTEL_TABLE_NAME");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.bucket_name, "hotel-uploads");
        assert_eq!(config.table_name, "Hotels");

        env::remove_var("AWS_REGION");
        env::remove_var("HOTEL_BUCKET_NAME");
    }

    #[test]
    fn test_from_env_missing_bucket() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::set_var("AWS_REGION", "eu-west-1");
        env::remove_var("HOTEL_BUCKET_NAME");

        let result = AppConfig::from_env();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("HOTEL_BUCKET_NAME"));

        env::remove_var("AWS_REGION");
    }

    #[test]
    fn test_from_env_table_override() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::set_var("AWS_REGION", "eu-west-1");
        env::set_var("HOTEL_BUCKET_NAME", "hotel-uploads");
        env::set_var("HOTEL_TABLE_NAME", "HotelsStaging");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.table_name, "HotelsStaging");

        env::remove_var("AWS_REGION");
        env::remove_var("HOTEL_BUCKET_NAME");
        env::remove_var("HOTEL_TABLE_NAME");
    }
}
