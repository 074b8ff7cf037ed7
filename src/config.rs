use std::env;
use thiserror::Error;
use serenity::model::id::{ChannelId, GuildId};

use crate::api::quickchart::QuickChartClient;
use crate::api::vang_today::GoldPriceClient;
use crate::models::instrument::Instrument;
use crate::services::daily_service::Destination;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),

    #[error("{name} is not a valid Discord ID: {value}")]
    InvalidId { name: &'static str, value: String },

    #[error("DAILY_INSTRUMENT is not a known gold type: {0}")]
    InvalidInstrument(String),
}

/// Settings read from the environment (and `.env`) at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub destination: Destination,
    pub gold_api_url: String,
    pub quickchart_url: String,
    pub daily_instrument: Instrument,
    pub command_prefix: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let or_default = |name: &str, default: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let discord_token = required("DISCORD_TOKEN")?;
        let guild_id = parse_id("DEFAULT_GUILD_ID", &required("DEFAULT_GUILD_ID")?)?;
        let channel_id = parse_id("CHANNEL_ID", &required("CHANNEL_ID")?)?;

        let instrument_code = or_default("DAILY_INSTRUMENT", "SJ9999").trim().to_uppercase();
        let daily_instrument = instrument_code
            .parse::<Instrument>()
            .map_err(|_| ConfigError::InvalidInstrument(instrument_code.clone()))?;

        Ok(Self {
            discord_token,
            destination: Destination {
                guild_id: GuildId::new(guild_id),
                channel_id: ChannelId::new(channel_id),
            },
            gold_api_url: or_default("GOLD_API_URL", GoldPriceClient::DEFAULT_BASE_URL),
            quickchart_url: or_default("QUICKCHART_URL", QuickChartClient::DEFAULT_BASE_URL),
            daily_instrument,
            command_prefix: or_default("COMMAND_PREFIX", "!"),
        })
    }
}

/// Discord snowflakes are non-zero u64
fn parse_id(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .ok_or_else(|| ConfigError::InvalidId { name, value: value.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    const BASE: [(&str, &str); 3] = [
        ("DISCORD_TOKEN", "token"),
        ("DEFAULT_GUILD_ID", "111"),
        ("CHANNEL_ID", "222"),
    ];

    #[test]
    fn test_defaults() {
        let config = load(&BASE).unwrap();
        assert_eq!(config.destination.guild_id.get(), 111);
        assert_eq!(config.destination.channel_id.get(), 222);
        assert_eq!(config.gold_api_url, "https://www.vang.today/api/prices");
        assert_eq!(config.quickchart_url, "https://quickchart.io");
        assert_eq!(config.daily_instrument, Instrument::SjcRing);
        assert_eq!(config.command_prefix, "!");
    }

    #[test]
    fn test_missing_token() {
        let err = load(&BASE[1..]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DISCORD_TOKEN")));
    }

    #[test]
    fn test_invalid_ids() {
        let mut vars = BASE.to_vec();
        vars[2] = ("CHANNEL_ID", "general");
        assert!(matches!(load(&vars), Err(ConfigError::InvalidId { name: "CHANNEL_ID", .. })));

        vars[2] = ("CHANNEL_ID", "0");
        assert!(matches!(load(&vars), Err(ConfigError::InvalidId { .. })));
    }

    #[test]
    fn test_daily_instrument_validated() {
        let mut vars = BASE.to_vec();
        vars.push(("DAILY_INSTRUMENT", "dohnl"));
        assert_eq!(load(&vars).unwrap().daily_instrument, Instrument::DojiHanoi);

        vars.pop();
        vars.push(("DAILY_INSTRUMENT", "SILVER"));
        assert!(matches!(load(&vars), Err(ConfigError::InvalidInstrument(_))));
    }
}
