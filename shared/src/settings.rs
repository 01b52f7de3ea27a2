//! User settings, their storage layout and the popup → page messages that change them.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};
use thiserror::Error;

/// Storage key for the daily hour target (stored as a decimal string)
pub const HOURS_PER_DAY_KEY: &str = "workdayHours";
/// Storage key for the "works on October 12" flag
pub const WORKING_BREED_DAY_KEY: &str = "workingBreedDay";

pub const DEFAULT_WORKDAY_HOURS: u32 = 8;
/// Response code the page sends back once a message has been applied
pub const RESPONSE_OK: u16 = 200;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("malformed settings message: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unknown settings message type '{0}'")]
    UnknownType(String),
    #[error("settings message '{0}' has no value")]
    MissingValue(String),
    #[error("workday hours must be a positive whole number, got '{0}'")]
    InvalidHours(String),
    #[error("expected true/false, got '{0}'")]
    InvalidFlag(String),
}

/// Settings the balance depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Hours the user is expected to work per day
    pub workday_hours: u32,
    /// User works the regional holiday on October 12
    pub working_breed_day: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            workday_hours: DEFAULT_WORKDAY_HOURS,
            working_breed_day: false,
        }
    }
}

impl Configuration {
    /// Build a configuration from whatever storage returned, falling back to
    /// defaults for missing or unusable values
    pub fn from_stored(stored: &StoredSettings) -> Self {
        let workday_hours = stored
            .workday_hours
            .as_ref()
            .and_then(|value| parse_hours_value(value).ok())
            .unwrap_or(DEFAULT_WORKDAY_HOURS);
        let working_breed_day = stored
            .working_breed_day
            .as_ref()
            .and_then(Value::as_bool)
            .unwrap_or(false);

        Self { workday_hours, working_breed_day }
    }

    /// Return the configuration with the message's value applied
    pub fn apply(self, message: &SettingsMessage) -> Self {
        match *message {
            SettingsMessage::HoursPerDayUpdated(hours) => Self { workday_hours: hours, ..self },
            SettingsMessage::WorkingBreedDay(working) => Self { working_breed_day: working, ..self },
        }
    }
}

/// Raw result of a storage read; values are untyped because older versions
/// stored hours both as numbers and strings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredSettings {
    #[serde(rename = "workdayHours", default)]
    pub workday_hours: Option<Value>,
    #[serde(rename = "workingBreedDay", default)]
    pub working_breed_day: Option<Value>,
}

/// Parse the hours typed into the popup
pub fn parse_workday_hours(text: &str) -> Result<u32, SettingsError> {
    match text.trim().parse::<u32>() {
        Ok(hours) if hours > 0 => Ok(hours),
        _ => Err(SettingsError::InvalidHours(text.to_string())),
    }
}

fn parse_hours_value(value: &Value) -> Result<u32, SettingsError> {
    match value {
        Value::String(text) => parse_workday_hours(text),
        Value::Number(number) => number
            .as_u64()
            .filter(|hours| *hours > 0)
            .and_then(|hours| u32::try_from(hours).ok())
            .ok_or_else(|| SettingsError::InvalidHours(number.to_string())),
        other => Err(SettingsError::InvalidHours(other.to_string())),
    }
}

const HOURS_PER_DAY_UPDATED: &str = "HOURS_PER_DAY_UPDATED";
const WORKING_BREED_DAY: &str = "WORKING_BREED_DAY";

/// A single settings change sent from the popup to the page.
///
/// On the wire: `{"type": "HOURS_PER_DAY_UPDATED", "value": "8"}` or
/// `{"type": "WORKING_BREED_DAY", "value": true}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsMessage {
    HoursPerDayUpdated(u32),
    WorkingBreedDay(bool),
}

#[derive(Serialize, Deserialize)]
struct RawSettingsMessage {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
}

impl Serialize for SettingsMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = match *self {
            Self::HoursPerDayUpdated(hours) => Value::String(hours.to_string()),
            Self::WorkingBreedDay(working) => Value::Bool(working),
        };
        RawSettingsMessage { kind: self.message_type().to_string(), value: Some(value) }.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SettingsMessage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawSettingsMessage::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<RawSettingsMessage> for SettingsMessage {
    type Error = SettingsError;

    fn try_from(raw: RawSettingsMessage) -> Result<Self, Self::Error> {
        let value = raw
            .value
            .ok_or_else(|| SettingsError::MissingValue(raw.kind.clone()))?;

        match raw.kind.as_str() {
            HOURS_PER_DAY_UPDATED => Ok(Self::HoursPerDayUpdated(parse_hours_value(&value)?)),
            WORKING_BREED_DAY => value
                .as_bool()
                .map(Self::WorkingBreedDay)
                .ok_or_else(|| SettingsError::InvalidFlag(value.to_string())),
            _ => Err(SettingsError::UnknownType(raw.kind.clone())),
        }
    }
}

impl SettingsMessage {
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        let raw: RawSettingsMessage = serde_json::from_str(text)?;
        Self::try_from(raw)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn message_type(&self) -> &'static str {
        match self {
            Self::HoursPerDayUpdated(_) => HOURS_PER_DAY_UPDATED,
            Self::WorkingBreedDay(_) => WORKING_BREED_DAY,
        }
    }

    pub fn storage_key(&self) -> &'static str {
        match self {
            Self::HoursPerDayUpdated(_) => HOURS_PER_DAY_KEY,
            Self::WorkingBreedDay(_) => WORKING_BREED_DAY_KEY,
        }
    }

    /// The object to hand to storage so the value survives a reload
    pub fn storage_entry(&self) -> Value {
        match *self {
            Self::HoursPerDayUpdated(hours) => json!({ HOURS_PER_DAY_KEY: hours.to_string() }),
            Self::WorkingBreedDay(working) => json!({ WORKING_BREED_DAY_KEY: working }),
        }
    }
}

/// Acknowledgement sent back to the popup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsResponse {
    #[serde(rename = "responseCode")]
    pub response_code: u16,
}

impl SettingsResponse {
    pub fn ok() -> Self {
        Self { response_code: RESPONSE_OK }
    }

    pub fn is_success(&self) -> bool {
        self.response_code == RESPONSE_OK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(hours: Option<Value>, breed: Option<Value>) -> StoredSettings {
        StoredSettings { workday_hours: hours, working_breed_day: breed }
    }

    #[test]
    fn test_defaults_when_storage_empty() {
        let config = Configuration::from_stored(&StoredSettings::default());
        assert_eq!(config, Configuration { workday_hours: 8, working_breed_day: false });
    }

    #[test]
    fn test_stored_hours_string_or_number() {
        assert_eq!(Configuration::from_stored(&stored(Some(json!("7")), None)).workday_hours, 7);
        assert_eq!(Configuration::from_stored(&stored(Some(json!(6)), None)).workday_hours, 6);
    }

    #[test]
    fn test_stored_garbage_falls_back() {
        for bad in [json!("abc"), json!("0"), json!(0), json!(-4), json!(null), json!(true)] {
            let config = Configuration::from_stored(&stored(Some(bad), Some(json!("yes"))));
            assert_eq!(config, Configuration::default());
        }
    }

    #[test]
    fn test_stored_settings_from_storage_object() {
        let parsed: StoredSettings =
            serde_json::from_str(r#"{"workdayHours":"6","workingBreedDay":true}"#).unwrap();
        let config = Configuration::from_stored(&parsed);
        assert_eq!(config, Configuration { workday_hours: 6, working_breed_day: true });
    }

    #[test]
    fn test_message_wire_format() {
        let hours = SettingsMessage::HoursPerDayUpdated(7).to_json().unwrap();
        assert_eq!(hours, r#"{"type":"HOURS_PER_DAY_UPDATED","value":"7"}"#);

        let flag = SettingsMessage::WorkingBreedDay(true).to_json().unwrap();
        assert_eq!(flag, r#"{"type":"WORKING_BREED_DAY","value":true}"#);
    }

    #[test]
    fn test_message_decoding() {
        assert_eq!(
            SettingsMessage::from_json(r#"{"type":"HOURS_PER_DAY_UPDATED","value":"6"}"#).unwrap(),
            SettingsMessage::HoursPerDayUpdated(6)
        );
        assert_eq!(
            SettingsMessage::from_json(r#"{"type":"HOURS_PER_DAY_UPDATED","value":6}"#).unwrap(),
            SettingsMessage::HoursPerDayUpdated(6)
        );
        assert_eq!(
            SettingsMessage::from_json(r#"{"type":"WORKING_BREED_DAY","value":false}"#).unwrap(),
            SettingsMessage::WorkingBreedDay(false)
        );
    }

    #[test]
    fn test_message_decoding_errors() {
        assert!(matches!(
            SettingsMessage::from_json(r#"{"type":"SOMETHING_ELSE","value":1}"#),
            Err(SettingsError::UnknownType(kind)) if kind == "SOMETHING_ELSE"
        ));
        assert!(matches!(
            SettingsMessage::from_json(r#"{"type":"HOURS_PER_DAY_UPDATED"}"#),
            Err(SettingsError::MissingValue(_))
        ));
        assert!(matches!(
            SettingsMessage::from_json(r#"{"type":"HOURS_PER_DAY_UPDATED","value":"0"}"#),
            Err(SettingsError::InvalidHours(_))
        ));
        assert!(matches!(
            SettingsMessage::from_json(r#"{"type":"WORKING_BREED_DAY","value":"yes"}"#),
            Err(SettingsError::InvalidFlag(_))
        ));
        assert!(matches!(SettingsMessage::from_json("not json"), Err(SettingsError::Malformed(_))));
    }

    #[test]
    fn test_apply_message() {
        let config = Configuration::default()
            .apply(&SettingsMessage::HoursPerDayUpdated(6))
            .apply(&SettingsMessage::WorkingBreedDay(true));
        assert_eq!(config, Configuration { workday_hours: 6, working_breed_day: true });
    }

    #[test]
    fn test_storage_entries() {
        assert_eq!(
            SettingsMessage::HoursPerDayUpdated(6).storage_entry(),
            json!({"workdayHours": "6"})
        );
        assert_eq!(
            SettingsMessage::WorkingBreedDay(true).storage_entry(),
            json!({"workingBreedDay": true})
        );
        assert_eq!(SettingsMessage::WorkingBreedDay(true).storage_key(), WORKING_BREED_DAY_KEY);
    }

    #[test]
    fn test_parse_workday_hours() {
        assert_eq!(parse_workday_hours(" 7 ").unwrap(), 7);
        assert!(parse_workday_hours("").is_err());
        assert!(parse_workday_hours("7.5").is_err());
        assert!(parse_workday_hours("0").is_err());
    }

    #[test]
    fn test_response() {
        let response: SettingsResponse = serde_json::from_str(r#"{"responseCode":200}"#).unwrap();
        assert!(response.is_success());
        assert_eq!(serde_json::to_string(&SettingsResponse::ok()).unwrap(), r#"{"responseCode":200}"#);
    }
}
