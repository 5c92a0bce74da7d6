use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Reminder interval. Only the four preset values are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BreakInterval {
    Minutes30,
    #[default]
    Minutes60,
    Minutes90,
    Minutes120,
}

impl BreakInterval {
    pub const ALL: [BreakInterval; 4] = [
        BreakInterval::Minutes30,
        BreakInterval::Minutes60,
        BreakInterval::Minutes90,
        BreakInterval::Minutes120,
    ];

    pub fn minutes(self) -> u32 {
        match self {
            BreakInterval::Minutes30 => 30,
            BreakInterval::Minutes60 => 60,
            BreakInterval::Minutes90 => 90,
            BreakInterval::Minutes120 => 120,
        }
    }

    pub fn from_minutes(minutes: u32) -> AppResult<Self> {
        Self::ALL
            .into_iter()
            .find(|i| i.minutes() == minutes)
            .ok_or(AppError::InvalidInterval(minutes))
    }

    pub fn as_duration(self) -> chrono::Duration {
        chrono::Duration::minutes(self.minutes() as i64)
    }

    pub fn label(self) -> &'static str {
        match self {
            BreakInterval::Minutes30 => "30 minutes",
            BreakInterval::Minutes60 => "1 hour",
            BreakInterval::Minutes90 => "1.5 hours",
            BreakInterval::Minutes120 => "2 hours",
        }
    }
}

/// Break reminder preferences, stored as `{"enabled": bool, "interval": n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawBreakSettings", into = "RawBreakSettings")]
pub struct BreakSettings {
    pub enabled: bool,
    pub interval: BreakInterval,
}

#[derive(Serialize, Deserialize)]
struct RawBreakSettings {
    #[serde(default)]
    enabled: Option<bool>,
    #[serde(default)]
    interval: Option<u32>,
}

impl From<RawBreakSettings> for BreakSettings {
    fn from(raw: RawBreakSettings) -> Self {
        Self {
            enabled: raw.enabled.unwrap_or(false),
            interval: raw
                .interval
                .and_then(|m| BreakInterval::from_minutes(m).ok())
                .unwrap_or_default(),
        }
    }
}

impl From<BreakSettings> for RawBreakSettings {
    fn from(s: BreakSettings) -> Self {
        Self {
            enabled: Some(s.enabled),
            interval: Some(s.interval.minutes()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_preset_intervals_are_accepted() {
        assert_eq!(BreakInterval::from_minutes(90).unwrap().minutes(), 90);
        assert!(matches!(
            BreakInterval::from_minutes(45),
            Err(AppError::InvalidInterval(45))
        ));
    }

    #[test]
    fn lenient_decoding_falls_back_to_defaults() {
        let s: BreakSettings = serde_json::from_str(r#"{"enabled":true}"#).unwrap();
        assert!(s.enabled);
        assert_eq!(s.interval, BreakInterval::Minutes60);

        let s: BreakSettings = serde_json::from_str(r#"{"interval":0}"#).unwrap();
        assert!(!s.enabled);
        assert_eq!(s.interval, BreakInterval::Minutes60);

        let s: BreakSettings = serde_json::from_str(r#"{"enabled":false,"interval":30}"#).unwrap();
        assert_eq!(s.interval, BreakInterval::Minutes30);
    }

    #[test]
    fn encodes_interval_as_minutes() {
        let s = BreakSettings {
            enabled: true,
            interval: BreakInterval::Minutes120,
        };
        assert_eq!(
            serde_json::to_string(&s).unwrap(),
            r#"{"enabled":true,"interval":120}"#
        );
    }
}
