//! Runtime configuration.
//!
//! Load order: built-in defaults, then an optional YAML file, then
//! `FRAMESCOPE_*` environment variables. CLI flags are applied last by the
//! binary.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{CoreError, CoreResult};
use crate::message::{CastId, FarcasterNetwork, SignerIdentity, HASH_LENGTH};

pub const ENV_FID: &str = "FRAMESCOPE_FID";
pub const ENV_NETWORK: &str = "FRAMESCOPE_NETWORK";
pub const ENV_TIMEOUT_SECS: &str = "FRAMESCOPE_TIMEOUT_SECS";

const DEFAULT_FID: u64 = 2;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

fn default_fid() -> u64 {
    DEFAULT_FID
}

fn default_network() -> FarcasterNetwork {
    FarcasterNetwork::Mainnet
}

fn default_cast_hash() -> String {
    "0".repeat(HASH_LENGTH * 2)
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    format!("framescope/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// fid simulated clicks are signed as
    #[serde(default = "default_fid")]
    pub fid: u64,
    #[serde(default = "default_network")]
    pub network: FarcasterNetwork,
    /// Author fid of the placeholder cast every click refers to
    #[serde(default = "default_fid")]
    pub cast_fid: u64,
    /// Hex hash of the placeholder cast
    #[serde(default = "default_cast_hash")]
    pub cast_hash: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fid: default_fid(),
            network: default_network(),
            cast_fid: default_fid(),
            cast_hash: default_cast_hash(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Defaults, overlaid with `path` when given, then with the environment.
    pub fn load(path: Option<&Path>) -> CoreResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> CoreResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Self::from_yaml_str(&content)
    }

    /// Applies `FRAMESCOPE_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> CoreResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_FID) {
            self.fid = raw
                .trim()
                .parse()
                .map_err(|_| CoreError::Config(format!("{} must be a number, got '{}'", ENV_FID, raw)))?;
        }
        if let Some(raw) = lookup(ENV_NETWORK) {
            self.network = raw.trim().parse().map_err(CoreError::Config)?;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw.trim().parse().map_err(|_| {
                CoreError::Config(format!("{} must be a number, got '{}'", ENV_TIMEOUT_SECS, raw))
            })?;
        }
        Ok(())
    }

    pub fn identity(&self) -> SignerIdentity {
        SignerIdentity {
            fid: self.fid,
            network: self.network,
        }
    }

    /// The placeholder cast every simulated click refers to.
    pub fn cast_id(&self) -> CoreResult<CastId> {
        let hash = hex::decode(self.cast_hash.trim_start_matches("0x"))
            .map_err(|e| CoreError::hex("cast_hash", e))?;
        Ok(CastId {
            fid: self.cast_fid,
            hash,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// HTTP client shared by previews and simulated clicks.
    ///
    /// Redirects are not followed: a redirecting frame hands its body and
    /// `Location` back to the caller untouched.
    pub fn http_client(&self) -> CoreResult<reqwest::Client> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout())
            .user_agent(self.user_agent.clone())
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_preview_identity() {
        let config = Config::default();
        assert_eq!(config.fid, 2);
        assert_eq!(config.network, FarcasterNetwork::Mainnet);
        let cast = config.cast_id().unwrap();
        assert_eq!(cast.fid, 2);
        assert_eq!(cast.hash, vec![0u8; 20]);
    }

    #[test]
    fn yaml_fills_missing_fields_with_defaults() {
        let config = Config::from_yaml_str("fid: 99\nnetwork: testnet\n").unwrap();
        assert_eq!(config.fid, 99);
        assert_eq!(config.network, FarcasterNetwork::Testnet);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn yaml_rejects_unknown_network() {
        assert!(matches!(
            Config::from_yaml_str("network: moon\n"),
            Err(CoreError::ConfigFile(_))
        ));
    }

    #[test]
    fn env_overrides_apply() {
        let vars: HashMap<&str, &str> = [(ENV_FID, "7"), (ENV_NETWORK, "devnet")].into_iter().collect();
        let mut config = Config::default();
        config
            .apply_env(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.fid, 7);
        assert_eq!(config.network, FarcasterNetwork::Devnet);
    }

    #[test]
    fn bad_env_value_is_an_error() {
        let mut config = Config::default();
        let result = config.apply_env(|key| (key == ENV_TIMEOUT_SECS).then(|| "soon".to_string()));
        assert!(matches!(result, Err(CoreError::Config(_))));
    }

    #[test]
    fn bad_cast_hash_is_an_error() {
        let config = Config {
            cast_hash: "not-hex".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.cast_id(), Err(CoreError::InvalidHex { .. })));
    }
}
