use std::env;
use std::str::FromStr;
use std::time::Duration;

use log::warn;
use uuid::Uuid;

use crate::blockchain::{DIFF_MAX, DIFF_MIN, DEFAULT_DIFFICULTY, Difficulty};

/// Node settings read from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub node_id: String,
    pub difficulty: Difficulty,
    /// Seed peers registered at startup.
    pub peers: Vec<String>,
    pub peer_timeout: Duration,
    /// Run conflict resolution on this period; `None` = only on request.
    pub resolve_interval: Option<Duration>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_or(&lookup, "PORT", 8080u16);

        let node_id = lookup("NODE_ID")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string());

        let requested = parse_or(&lookup, "DIFFICULTY", DEFAULT_DIFFICULTY);
        let clamped = requested.clamp(DIFF_MIN, DIFF_MAX);
        if clamped != requested {
            warn!("DIFFICULTY={requested} out of range, using {clamped}");
        }

        let peers = lookup("PEERS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let peer_timeout = Duration::from_secs(parse_or(&lookup, "PEER_TIMEOUT_SECS", 5u64).max(1));
        let resolve_interval = match parse_or(&lookup, "RESOLVE_INTERVAL_SECS", 0u64) {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        Self {
            host,
            port,
            node_id,
            difficulty: Difficulty::new(clamped),
            peers,
            peer_timeout,
            resolve_interval,
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{key}={raw:?} is not valid, using the default");
            default
        }),
    }
}
