use std::env;

use crate::models::validation::MINUTES_PER_DAY;
use crate::services::conflict::DEFAULT_BUFFER_MINUTES;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub conflict_buffer_minutes: i64,
    pub seed_demo_data: bool,
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            conflict_buffer_minutes: parse_buffer(env::var("CONFLICT_BUFFER_MINUTES").ok()),
            seed_demo_data: env::var("SEED_DEMO_DATA")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_else(|_| vec!["http://localhost:3000".to_string()]),
        }
    }
}

/// Buffer in minutes, bounded to one day. Anything else falls back to the default.
fn parse_buffer(raw: Option<String>) -> i64 {
    let Some(raw) = raw else {
        return DEFAULT_BUFFER_MINUTES;
    };
    match raw.trim().parse::<i64>() {
        Ok(m) if (0..=MINUTES_PER_DAY).contains(&m) => m,
        _ => {
            tracing::warn!(
                value = %raw,
                fallback = DEFAULT_BUFFER_MINUTES,
                "CONFLICT_BUFFER_MINUTES must be 0..={MINUTES_PER_DAY}"
            );
            DEFAULT_BUFFER_MINUTES
        }
    }
}

fn parse_flag(v: &str) -> bool {
    !matches!(
        v.trim().to_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

fn parse_origins(v: &str) -> Vec<String> {
    v.split(',')
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
        .map(|o| o.to_string())
        .collect()
}
