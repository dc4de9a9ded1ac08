use std::time::Duration;

use searchdash::{DashboardClient, RankProviderKind, RankSettings};
use tracing::warn;

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

/// Server settings read from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub rank: RankSettings,
    pub timeout: Option<Duration>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let provider = var("RANK_PROVIDER").and_then(|p| match p.parse::<RankProviderKind>() {
            Ok(kind) => Some(kind),
            Err(e) => {
                warn!(error = %e, "ignoring RANK_PROVIDER");
                None
            }
        });

        let timeout = var("SEARCHDASH_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|s| *s > 0)
            .map(Duration::from_secs);

        Self {
            bind_addr: var("SEARCHDASH_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string()),
            rank: RankSettings {
                provider,
                web_search_key: var("WEB_SEARCH_API_KEY"),
                web_search_cx: var("WEB_SEARCH_CX"),
                serp_api_key: var("SERP_API_KEY"),
            },
            timeout,
        }
    }

    pub fn build_client(&self) -> searchdash::Result<DashboardClient> {
        let mut builder = DashboardClient::builder().rank_settings(self.rank.clone());
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ServerConfig::from_lookup(lookup(&[]));
        assert_eq!(config.bind_addr, DEFAULT_BIND);
        assert!(config.rank.provider.is_none());
        assert!(config.timeout.is_none());
    }

    #[test]
    fn reads_provider_and_keys() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("RANK_PROVIDER", "serpapi"),
            ("SERP_API_KEY", "k"),
            ("SEARCHDASH_TIMEOUT_SECS", "15"),
        ]));
        assert_eq!(config.rank.provider, Some(RankProviderKind::SerpData));
        assert_eq!(config.rank.serp_api_key.as_deref(), Some("k"));
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn unknown_provider_is_left_unset() {
        let config = ServerConfig::from_lookup(lookup(&[("RANK_PROVIDER", "bing")]));
        assert!(config.rank.provider.is_none());
    }

    #[test]
    fn blank_values_are_unset() {
        let config = ServerConfig::from_lookup(lookup(&[("WEB_SEARCH_API_KEY", "  ")]));
        assert!(config.rank.web_search_key.is_none());
    }
}
