use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use chrono_tz::Tz;
use sipledger_core::constants::DEFAULT_BUSINESS_TZ_NAME;
use sipledger_core::utils::time_utils::parse_timezone;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub scheduler_enabled: bool,
    pub run_interval: Duration,
    pub batch_timeout: Duration,
    /// Zone whose calendar date decides which SIPs are due
    pub business_tz: Tz,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_u64(key: &str, default: u64) -> u64 {
    env_or(key, &default.to_string()).parse().unwrap_or(default)
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = env_or("SIP_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid SIP_LISTEN_ADDR")?;
        let db_path = env_or("SIP_DB_PATH", "./db/sip-ledger.db");
        let cors_allow = env_or("SIP_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let scheduler_enabled = !matches!(
            env_or("SIP_SCHEDULER_ENABLED", "true")
                .to_ascii_lowercase()
                .as_str(),
            "false" | "0" | "no" | "off"
        );
        let business_tz = parse_timezone(&env_or("SIP_TIMEZONE", DEFAULT_BUSINESS_TZ_NAME))
            .context("Invalid SIP_TIMEZONE")?;

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(env_u64("SIP_REQUEST_TIMEOUT_MS", 30_000)),
            scheduler_enabled,
            run_interval: Duration::from_secs(env_u64("SIP_RUN_INTERVAL_SECS", 3_600).max(1)),
            batch_timeout: Duration::from_secs(env_u64("SIP_BATCH_TIMEOUT_SECS", 600)),
            business_tz,
        })
    }
}
