//! Environment configuration for different deployment stages

use std::env;
use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion};
use catalog_storage::store::DEFAULT_CATALOG_KEY;

/// Default session validity: 30 days
const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Application environment configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses `LocalStack` and a local Redis)
    Development,
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Shared admin password checked at login
    ///
    /// # Panics
    ///
    /// Panics if the `ADMIN_PASSWORD` environment variable is not set outside development
    #[must_use]
    pub fn admin_password(&self) -> String {
        match self {
            Self::Production | Self::Staging => env::var("ADMIN_PASSWORD")
                .expect("ADMIN_PASSWORD environment variable is not set"),
            Self::Development => {
                env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin".to_string())
            }
        }
    }

    /// HMAC secret used to sign session tokens
    ///
    /// # Panics
    ///
    /// Panics if the `SESSION_SECRET` environment variable is not set outside development
    #[must_use]
    pub fn session_secret(&self) -> String {
        match self {
            Self::Production | Self::Staging => env::var("SESSION_SECRET")
                .expect("SESSION_SECRET environment variable is not set"),
            Self::Development => env::var("SESSION_SECRET")
                .unwrap_or_else(|_| "things-catalog-development-secret".to_string()),
        }
    }

    /// How long an issued session token stays valid
    #[must_use]
    pub fn session_ttl(&self) -> Duration {
        let secs = env::var("SESSION_TTL_SECS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_SESSION_TTL_SECS);

        Duration::from_secs(secs)
    }

    /// Redis connection URL
    ///
    /// # Panics
    ///
    /// Panics if the `REDIS_URL` environment variable is not set outside development
    #[must_use]
    pub fn redis_url(&self) -> String {
        match self {
            Self::Production | Self::Staging => {
                env::var("REDIS_URL").expect("REDIS_URL environment variable is not set")
            }
            Self::Development => {
                env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
            }
        }
    }

    /// Redis key holding the catalog
    #[must_use]
    pub fn catalog_key(&self) -> String {
        env::var("CATALOG_KEY").unwrap_or_else(|_| DEFAULT_CATALOG_KEY.to_string())
    }

    /// Returns the S3 bucket name for the environment
    ///
    /// # Panics
    ///
    /// Panics if the `S3_BUCKET_NAME` environment variable is not set outside development
    #[must_use]
    pub fn s3_bucket(&self) -> String {
        match self {
            Self::Production | Self::Staging => {
                env::var("S3_BUCKET_NAME").expect("S3_BUCKET_NAME environment variable is not set")
            }
            Self::Development => {
                env::var("S3_BUCKET_NAME").unwrap_or_else(|_| "things-images".to_string())
            }
        }
    }

    /// Base URL under which uploaded images are publicly served, without a trailing slash
    ///
    /// # Panics
    ///
    /// Panics if the `IMAGE_PUBLIC_BASE_URL` environment variable is not set outside development
    #[must_use]
    pub fn image_public_base_url(&self) -> String {
        let base_url = match self {
            Self::Production | Self::Staging => env::var("IMAGE_PUBLIC_BASE_URL")
                .expect("IMAGE_PUBLIC_BASE_URL environment variable is not set"),
            Self::Development => env::var("IMAGE_PUBLIC_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:4566/{}", self.s3_bucket())),
        };

        base_url.trim_end_matches('/').to_string()
    }

    /// Whether to show API docs
    #[must_use]
    pub const fn show_api_docs(&self) -> bool {
        matches!(self, Self::Development | Self::Staging)
    }

    /// Returns the endpoint URL to use for AWS services
    #[must_use]
    pub const fn override_aws_endpoint_url(&self) -> Option<&str> {
        match self {
            // Regular AWS endpoints for production and staging
            Self::Production | Self::Staging => None,
            // LocalStack endpoint for development
            Self::Development => Some("http://localhost:4566"),
        }
    }

    /// AWS configuration with retry and timeout settings
    pub async fn aws_config(&self) -> aws_config::SdkConfig {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_initial_backoff(Duration::from_millis(50));

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(30))
            .build();

        let mut config_builder = aws_config::load_defaults(BehaviorVersion::latest())
            .await
            .to_builder()
            .retry_config(retry_config)
            .timeout_config(timeout_config);

        if let Some(endpoint_url) = self.override_aws_endpoint_url() {
            config_builder = config_builder.endpoint_url(endpoint_url);
        }

        config_builder.build()
    }

    /// AWS S3 service configuration
    pub async fn s3_client_config(&self) -> aws_sdk_s3::Config {
        let aws_config = self.aws_config().await;
        let s3_config: aws_sdk_s3::Config = (&aws_config).into();
        let mut builder = s3_config.to_builder();

        // LocalStack only serves path-style bucket addressing
        if matches!(self, Self::Development) {
            builder.set_force_path_style(Some(true));
        }

        builder.build()
    }
}
