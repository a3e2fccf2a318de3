use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::models::BoardSize;

#[derive(Debug, Clone)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub board: BoardConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone)]
pub struct DictionaryConfig {
    /// Local path or http(s) URL of a newline-delimited word list
    pub source: String,
    pub http_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub size: BoardSize,
}

#[derive(Debug, Clone)]
pub struct UiConfig {
    pub notice_duration_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the configuration from any variable lookup
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let dictionary = DictionaryConfig {
            source: var("DICTIONARY_SOURCE")
                .unwrap_or_else(|| "./words.txt".to_string()),
            http_timeout_secs: var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .parse()
                .context("HTTP_TIMEOUT_SECS must be a number")?,
        };

        let sides = var("BOARD_SIDES")
            .unwrap_or_else(|| "4".to_string())
            .parse()
            .context("BOARD_SIDES must be a number")?;
        let letters_per_side = var("BOARD_LETTERS_PER_SIDE")
            .unwrap_or_else(|| "3".to_string())
            .parse()
            .context("BOARD_LETTERS_PER_SIDE must be a number")?;
        let board = BoardConfig {
            size: BoardSize::new(sides, letters_per_side)
                .context("BOARD_SIDES and BOARD_LETTERS_PER_SIDE do not describe a playable board")?,
        };

        let ui = UiConfig {
            notice_duration_ms: var("NOTICE_DURATION_MS")
                .unwrap_or_else(|| "2500".to_string())
                .parse()
                .unwrap_or(2500),
        };

        Ok(Config {
            dictionary,
            board,
            ui,
        })
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.ui.notice_duration_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.dictionary.http_timeout_secs)
    }
}
