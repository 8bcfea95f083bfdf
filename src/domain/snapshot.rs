use serde::Serialize;
use serde_json::{Error as JsonError, Map, Value};
use snafu::prelude::*;

use crate::domain::entity::{Mode, ModeDuration, SessionCounter};
use crate::domain::timer::{ModeProgress, Settings};

/// Store key of the persisted record. Bump the version suffix whenever the
/// record layout changes incompatibly.
pub const SNAPSHOT_KEY: &str = "pomodoroSettingsV3";

/// The part of the timer that survives a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub settings: Settings,
    pub sessions: SessionCounter,
    pub progress: ModeProgress,
}

impl Snapshot {
    /// Serialize the snapshot into the persisted JSON record.
    ///
    /// # Errors
    ///
    /// This function will return an error if serialization fails.
    pub fn encode(&self) -> Result<String, EncodeSnapshotError> {
        serde_json::to_string(&SnapshotRecord::from(self)).context(SerializeSnafu)
    }

    /// Parse a persisted JSON record. Fields that are missing or malformed
    /// individually fall back to their defaults.
    ///
    /// # Errors
    ///
    /// This function will return an error if the text is not a JSON object.
    pub fn decode(raw: &str) -> Result<Self, DecodeSnapshotError> {
        let value: Value = serde_json::from_str(raw).context(SyntaxSnafu)?;
        let Value::Object(fields) = value else {
            return NotAnObjectSnafu.fail();
        };
        Ok(Self::from_fields(&fields))
    }

    /// Like [`Snapshot::decode`], but an absent or unreadable record yields
    /// the defaults.
    pub fn decode_or_default(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            tracing::info!("No saved state, using defaults");
            return Self::default();
        };

        match Self::decode(raw) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(
                    err = %snafu::Report::from_error(&err),
                    "Discarding malformed saved state"
                );
                Self::default()
            }
        }
    }

    fn from_fields(fields: &Map<String, Value>) -> Self {
        let defaults = Settings::default();
        let duration = |hours: &str, minutes: &str, fallback: ModeDuration| {
            ModeDuration::new(
                small_integer(fields.get(hours)).unwrap_or(fallback.hours()),
                small_integer(fields.get(minutes)).unwrap_or(fallback.minutes()),
            )
        };

        let settings = Settings {
            work: duration("workH", "workM", defaults.work),
            short_break: duration("breakH", "breakM", defaults.short_break),
            long_break: duration("longH", "longM", defaults.long_break),
            auto_switch: fields
                .get("autoSwitch")
                .and_then(Value::as_bool)
                .unwrap_or(defaults.auto_switch),
        };

        let sessions = small_integer(fields.get("sessionsCompleted"))
            .map(SessionCounter::new)
            .unwrap_or_default();

        let progress = match fields.get("modeProgress") {
            Some(Value::Object(entries)) => Mode::ALL
                .into_iter()
                .map(|mode| (mode, integer(entries.get(mode.id()))))
                .collect(),
            _ => ModeProgress::default(),
        };

        Self {
            settings,
            sessions,
            progress,
        }
    }
}

/// Read a non-negative integer stored either as a JSON number or as a string
/// of digits.
fn integer(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn small_integer(value: Option<&Value>) -> Option<u32> {
    integer(value).and_then(|value| u32::try_from(value).ok())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotRecord {
    work_h: String,
    work_m: String,
    break_h: String,
    break_m: String,
    long_h: String,
    long_m: String,
    auto_switch: bool,
    sessions_completed: u32,
    mode_progress: ProgressRecord,
}

#[derive(Debug, Serialize)]
struct ProgressRecord {
    work: Option<u64>,
    #[serde(rename = "short-break")]
    short_break: Option<u64>,
    #[serde(rename = "long-break")]
    long_break: Option<u64>,
}

impl From<&Snapshot> for SnapshotRecord {
    fn from(value: &Snapshot) -> Self {
        let Settings {
            work,
            short_break,
            long_break,
            auto_switch,
        } = value.settings;

        Self {
            work_h: work.hours().to_string(),
            work_m: work.minutes().to_string(),
            break_h: short_break.hours().to_string(),
            break_m: short_break.minutes().to_string(),
            long_h: long_break.hours().to_string(),
            long_m: long_break.minutes().to_string(),
            auto_switch,
            sessions_completed: value.sessions.count(),
            mode_progress: ProgressRecord {
                work: value.progress.get(Mode::Work),
                short_break: value.progress.get(Mode::ShortBreak),
                long_break: value.progress.get(Mode::LongBreak),
            },
        }
    }
}

/// An error type of serializing a [`Snapshot`].
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum EncodeSnapshotError {
    #[snafu(display("Could not serialize the snapshot"))]
    Serialize { source: JsonError },
}

/// An error type of reading a persisted [`Snapshot`].
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum DecodeSnapshotError {
    #[snafu(display("Saved state is not valid JSON"))]
    Syntax { source: JsonError },
    #[snafu(display("Saved state is not a JSON object"))]
    NotAnObject,
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn snapshot_encode_layout() {
        let snapshot = Snapshot {
            settings: Settings {
                work: ModeDuration::new(1, 5),
                short_break: ModeDuration::from_minutes(7),
                long_break: ModeDuration::from_minutes(20),
                auto_switch: true,
            },
            sessions: SessionCounter::new(2),
            progress: [(Mode::ShortBreak, Some(120))].into_iter().collect(),
        };

        let value: Value = serde_json::from_str(&snapshot.encode().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "workH": "1",
                "workM": "5",
                "breakH": "0",
                "breakM": "7",
                "longH": "0",
                "longM": "20",
                "autoSwitch": true,
                "sessionsCompleted": 2,
                "modeProgress": {
                    "work": null,
                    "short-break": 120,
                    "long-break": null
                }
            })
        );
    }

    #[test]
    fn snapshot_roundtrip() {
        let snapshot = Snapshot {
            settings: Settings {
                work: ModeDuration::new(0, 50),
                short_break: ModeDuration::new(0, 10),
                long_break: ModeDuration::new(2, 0),
                auto_switch: true,
            },
            sessions: SessionCounter::new(3),
            progress: [(Mode::Work, Some(61)), (Mode::LongBreak, Some(3))]
                .into_iter()
                .collect(),
        };

        let raw = snapshot.encode().unwrap();
        assert_eq!(Snapshot::decode(&raw).unwrap(), snapshot);
    }

    #[test]
    fn snapshot_decode_malformed_fields_use_defaults() {
        let raw = json!({
            "workH": "",
            "workM": "abc",
            "breakH": 1,
            "breakM": " 3 ",
            "autoSwitch": "yes",
            "sessionsCompleted": -4,
            "modeProgress": {
                "work": "90",
                "short-break": "soon",
                "long-break": 12.5
            }
        })
        .to_string();

        let snapshot = Snapshot::decode(&raw).unwrap();
        assert_eq!(snapshot.settings.work, ModeDuration::from_minutes(25));
        assert_eq!(snapshot.settings.short_break, ModeDuration::new(1, 3));
        assert_eq!(snapshot.settings.long_break, ModeDuration::from_minutes(15));
        assert!(!snapshot.settings.auto_switch);
        assert_eq!(snapshot.sessions.count(), 0);
        assert_eq!(snapshot.progress.get(Mode::Work), Some(90));
        assert_eq!(snapshot.progress.get(Mode::ShortBreak), None);
        assert_eq!(snapshot.progress.get(Mode::LongBreak), None);
    }

    #[test]
    fn snapshot_decode_empty_object() {
        assert_eq!(Snapshot::decode("{}").unwrap(), Snapshot::default());
    }

    #[test]
    fn snapshot_decode_errors() {
        assert!(matches!(
            Snapshot::decode("{not json"),
            Err(DecodeSnapshotError::Syntax { .. })
        ));
        assert!(matches!(
            Snapshot::decode("[1, 2]"),
            Err(DecodeSnapshotError::NotAnObject)
        ));
    }

    #[test]
    fn snapshot_decode_or_default() {
        assert_eq!(Snapshot::decode_or_default(None), Snapshot::default());
        assert_eq!(Snapshot::decode_or_default(Some("???")), Snapshot::default());

        let raw = json!({ "sessionsCompleted": 2 }).to_string();
        assert_eq!(Snapshot::decode_or_default(Some(&raw)).sessions.count(), 2);
    }
}
