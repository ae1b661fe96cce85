//! Bridge configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PAYPAL_CLIENT_ID` - PayPal REST app client ID
//! - `PAYPAL_CLIENT_SECRET` - PayPal REST app client secret
//! - `SHOPIFY_STORE` - Shopify store domain (e.g., your-store.myshopify.com)
//! - `SHOPIFY_ADMIN_TOKEN` - Admin API access token (custom app, `shpat_...`)
//! - `ALLOWED_ORIGINS` - Comma-separated storefront origins allowed to call the API
//!
//! ## Optional
//! - `PAYPAL_ENV` - `sandbox` or `live` (default: sandbox)
//! - `SHOPIFY_API_VERSION` - Admin API version (default: 2025-01)
//! - `BRIDGE_HOST` - Bind address (default: 127.0.0.1)
//! - `BRIDGE_PORT` - Listen port (default: 3000)
//! - `UPSTREAM_TIMEOUT_SECS` - Timeout for PayPal/Shopify calls (default: 30)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 0.1)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

const PAYPAL_SANDBOX_API: &str = "https://api-m.sandbox.paypal.com";
const PAYPAL_LIVE_API: &str = "https://api-m.paypal.com";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Bridge application configuration.
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Serialized origins (`scheme://host[:port]`) allowed to call the API
    pub allowed_origins: Vec<String>,
    /// Timeout applied to every upstream HTTP call
    pub upstream_timeout: Duration,
    /// PayPal REST API configuration
    pub paypal: PayPalConfig,
    /// Shopify Admin API configuration
    pub shopify: ShopifyAdminConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "production", "staging")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// PayPal deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayPalEnvironment {
    #[default]
    Sandbox,
    Live,
}

impl PayPalEnvironment {
    /// REST API base URL for this environment.
    #[must_use]
    pub const fn api_base(self) -> &'static str {
        match self {
            Self::Sandbox => PAYPAL_SANDBOX_API,
            Self::Live => PAYPAL_LIVE_API,
        }
    }
}

impl std::str::FromStr for PayPalEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Self::Sandbox),
            "live" | "production" => Ok(Self::Live),
            other => Err(format!("expected 'sandbox' or 'live', got '{other}'")),
        }
    }
}

/// PayPal REST API configuration.
///
/// Implements `Debug` manually to redact the client secret.
#[derive(Clone)]
pub struct PayPalConfig {
    /// REST app client ID
    pub client_id: String,
    /// REST app client secret
    pub client_secret: SecretString,
    /// Sandbox or live
    pub environment: PayPalEnvironment,
    /// API base URL (derived from `environment`)
    pub api_base: Url,
}

impl std::fmt::Debug for PayPalConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayPalConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("environment", &self.environment)
            .field("api_base", &self.api_base.as_str())
            .finish()
    }
}

/// Shopify Admin API configuration.
///
/// Implements `Debug` manually to redact the HIGH PRIVILEGE access token.
#[derive(Clone)]
pub struct ShopifyAdminConfig {
    /// Shopify store domain (e.g., your-store.myshopify.com)
    pub store: String,
    /// Shopify API version (e.g., 2025-01)
    pub api_version: String,
    /// Admin API access token
    pub access_token: SecretString,
    /// Store base URL (`https://{store}`)
    pub base_url: Url,
}

impl std::fmt::Debug for ShopifyAdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyAdminConfig")
            .field("store", &self.store)
            .field("api_version", &self.api_version)
            .field("access_token", &"[REDACTED]")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl ShopifyAdminConfig {
    /// Admin GraphQL endpoint for the configured store and API version.
    ///
    /// # Errors
    ///
    /// Returns an error if the API version produces an invalid URL path.
    pub fn graphql_endpoint(&self) -> Result<Url, url::ParseError> {
        self.base_url
            .join(&format!("admin/api/{}/graphql.json", self.api_version))
    }
}

impl BridgeConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("BRIDGE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("BRIDGE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("BRIDGE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("BRIDGE_PORT".to_string(), e.to_string()))?;
        let allowed_origins = parse_allowed_origins(&get_required_env("ALLOWED_ORIGINS")?)?;
        let upstream_timeout = get_env_or_default("UPSTREAM_TIMEOUT_SECS", "30")
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| {
                ConfigError::InvalidEnvVar("UPSTREAM_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        let paypal = PayPalConfig::from_env()?;
        let shopify = ShopifyAdminConfig::from_env()?;

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.1);

        Ok(Self {
            host,
            port,
            allowed_origins,
            upstream_timeout,
            paypal,
            shopify,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether a browser `Origin` header value is on the allow-list.
    #[must_use]
    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|allowed| allowed == origin)
    }
}

impl PayPalConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let environment = get_env_or_default("PAYPAL_ENV", "sandbox")
            .parse::<PayPalEnvironment>()
            .map_err(|e| ConfigError::InvalidEnvVar("PAYPAL_ENV".to_string(), e))?;
        let api_base = Url::parse(environment.api_base())
            .map_err(|e| ConfigError::InvalidEnvVar("PAYPAL_ENV".to_string(), e.to_string()))?;

        Ok(Self {
            client_id: get_required_env("PAYPAL_CLIENT_ID")?,
            client_secret: get_validated_secret("PAYPAL_CLIENT_SECRET")?,
            environment,
            api_base,
        })
    }
}

impl ShopifyAdminConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let store = get_required_env("SHOPIFY_STORE")?;
        let base_url = store_base_url(&store)?;

        Ok(Self {
            store,
            api_version: get_env_or_default("SHOPIFY_API_VERSION", "2025-01"),
            access_token: get_validated_secret("SHOPIFY_ADMIN_TOKEN")?,
            base_url,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Build `https://{store}/` from a bare shop domain.
fn store_base_url(store: &str) -> Result<Url, ConfigError> {
    let store = store.trim().trim_end_matches('/');
    if store.is_empty() || store.contains("://") || store.contains('/') {
        return Err(ConfigError::InvalidEnvVar(
            "SHOPIFY_STORE".to_string(),
            "expected a bare domain such as your-store.myshopify.com".to_string(),
        ));
    }
    Url::parse(&format!("https://{store}/"))
        .map_err(|e| ConfigError::InvalidEnvVar("SHOPIFY_STORE".to_string(), e.to_string()))
}

/// Parse a comma-separated list of origins into their serialized form.
///
/// Each entry must be a tuple origin (`http(s)://host[:port]`); paths and
/// trailing slashes are dropped so entries compare equal to browser `Origin`
/// headers.
fn parse_allowed_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    let mut origins = Vec::new();

    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let url = Url::parse(entry).map_err(|e| {
            ConfigError::InvalidEnvVar("ALLOWED_ORIGINS".to_string(), format!("{entry}: {e}"))
        })?;
        let origin = url.origin();
        if !origin.is_tuple() {
            return Err(ConfigError::InvalidEnvVar(
                "ALLOWED_ORIGINS".to_string(),
                format!("{entry}: not an http(s) origin"),
            ));
        }
        let serialized = origin.ascii_serialization();
        if !origins.contains(&serialized) {
            origins.push(serialized);
        }
    }

    if origins.is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            "ALLOWED_ORIGINS".to_string(),
            "at least one origin is required".to_string(),
        ));
    }

    Ok(origins)
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Real API credentials are long random strings
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use the credential issued by the provider."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}
