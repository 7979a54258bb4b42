//! Process configuration, read from the environment (and `.env`, via `dotenvy`).

use crate::pricing::PricingRules;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} has an invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
    #[error("{0} and {1} must be set together")]
    Incomplete(&'static str, &'static str),
}

/// Credentials of the administrator created at startup.
#[derive(Clone, PartialEq)]
pub struct AdminSeed {
    pub email: String,
    pub token: String,
}

impl std::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("email", &self.email)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, PartialEq)]
pub struct Config {
    pub addr: SocketAddr,
    /// Root directory for uploaded files.
    pub storage_dir: PathBuf,
    /// URL prefix the storage directory is served under.
    pub public_prefix: String,
    pub channel_capacity: usize,
    pub stripe_secret_key: Option<String>,
    pub currency: String,
    pub pricing: PricingRules,
    pub admin: Option<AdminSeed>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("storage_dir", &self.storage_dir)
            .field("public_prefix", &self.public_prefix)
            .field("channel_capacity", &self.channel_capacity)
            .field("stripe", &self.stripe_secret_key.is_some())
            .field("currency", &self.currency)
            .field("pricing", &self.pricing)
            .field("admin", &self.admin)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            storage_dir: PathBuf::from("storage"),
            public_prefix: "/storage".to_string(),
            channel_capacity: 32,
            stripe_secret_key: None,
            currency: "usd".to_string(),
            pricing: PricingRules::default(),
            admin: None,
        }
    }
}

fn parse<T>(name: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
            reason: "must be a non-negative number".into(),
        })
    }
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source. Unset variables take their
    /// defaults; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        let channel_capacity = parse(
            "STOREFRONT_CHANNEL_CAPACITY",
            get("STOREFRONT_CHANNEL_CAPACITY"),
            defaults.channel_capacity,
        )?;
        if channel_capacity == 0 {
            return Err(ConfigError::Invalid {
                name: "STOREFRONT_CHANNEL_CAPACITY",
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }

        let pricing = PricingRules {
            shipping_threshold: non_negative(
                "STOREFRONT_SHIPPING_THRESHOLD",
                parse(
                    "STOREFRONT_SHIPPING_THRESHOLD",
                    get("STOREFRONT_SHIPPING_THRESHOLD"),
                    defaults.pricing.shipping_threshold,
                )?,
            )?,
            shipping_fee: non_negative(
                "STOREFRONT_SHIPPING_FEE",
                parse(
                    "STOREFRONT_SHIPPING_FEE",
                    get("STOREFRONT_SHIPPING_FEE"),
                    defaults.pricing.shipping_fee,
                )?,
            )?,
            tax_rate: non_negative(
                "STOREFRONT_TAX_RATE",
                parse(
                    "STOREFRONT_TAX_RATE",
                    get("STOREFRONT_TAX_RATE"),
                    defaults.pricing.tax_rate,
                )?,
            )?,
        };

        let admin = match (get("STOREFRONT_ADMIN_EMAIL"), get("STOREFRONT_ADMIN_TOKEN")) {
            (Some(email), Some(token)) => Some(AdminSeed { email, token }),
            (None, None) => None,
            _ => {
                return Err(ConfigError::Incomplete(
                    "STOREFRONT_ADMIN_EMAIL",
                    "STOREFRONT_ADMIN_TOKEN",
                ))
            }
        };

        let mut public_prefix = get("STOREFRONT_PUBLIC_PREFIX").unwrap_or(defaults.public_prefix);
        if !public_prefix.starts_with('/') {
            public_prefix.insert(0, '/');
        }
        let public_prefix = public_prefix.trim_end_matches('/').to_string();

        Ok(Self {
            addr: parse("STOREFRONT_ADDR", get("STOREFRONT_ADDR"), defaults.addr)?,
            storage_dir: get("STOREFRONT_STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_dir),
            public_prefix,
            channel_capacity,
            stripe_secret_key: get("STRIPE_SECRET_KEY"),
            currency: get("STOREFRONT_CURRENCY")
                .map(|c| c.to_lowercase())
                .unwrap_or(defaults.currency),
            pricing,
            admin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(load(&[]).unwrap(), Config::default());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("STOREFRONT_ADDR", "0.0.0.0:9000"),
            ("STOREFRONT_PUBLIC_PREFIX", "media/"),
            ("STOREFRONT_TAX_RATE", "0.2"),
            ("STOREFRONT_CURRENCY", "EUR"),
            ("STOREFRONT_ADMIN_EMAIL", "root@example.com"),
            ("STOREFRONT_ADMIN_TOKEN", "secret"),
        ])
        .unwrap();
        assert_eq!(config.addr.port(), 9000);
        assert_eq!(config.public_prefix, "/media");
        assert_eq!(config.pricing.tax_rate, 0.2);
        assert_eq!(config.currency, "eur");
        assert_eq!(config.admin.unwrap().email, "root@example.com");
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let err = load(&[("STOREFRONT_CHANNEL_CAPACITY", "lots")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "STOREFRONT_CHANNEL_CAPACITY",
                ..
            }
        ));
        assert!(load(&[("STOREFRONT_SHIPPING_FEE", "-1")]).is_err());
        assert_eq!(
            load(&[("STOREFRONT_ADMIN_TOKEN", "secret")]).unwrap_err(),
            ConfigError::Incomplete("STOREFRONT_ADMIN_EMAIL", "STOREFRONT_ADMIN_TOKEN")
        );
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = load(&[
            ("STRIPE_SECRET_KEY", "sk_test_123"),
            ("STOREFRONT_ADMIN_EMAIL", "root@example.com"),
            ("STOREFRONT_ADMIN_TOKEN", "secret"),
        ])
        .unwrap();
        let printed = format!("{config:?}");
        assert!(!printed.contains("sk_test_123"));
        assert!(!printed.contains("secret"));
    }
}
