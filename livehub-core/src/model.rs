//! Records served by the dashboard API
//!
//! Shapes are owned by the backend, so decoding is lenient per field: a
//! field of the wrong type reads as missing instead of rejecting the
//! record. Scalars (`id`, `name`, `number`, `round`, stat counters...)
//! arrive as either JSON numbers or strings and are held as strings. A
//! record without a usable `id` gets an empty one.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::filter::Searchable;

/// Placeholder shown for any missing value
pub const PLACEHOLDER: &str = "—";

/// Placeholder for a missing country in the directory listing
pub const COUNTRY_PLACEHOLDER: &str = "N/A";

/// Driver summary as listed by `GET /drivers`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    #[serde(default, deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub team: Option<String>,
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub number: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub headshot: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub driver_spline_url: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub car_spline_url: Option<String>,
}

/// Career counters from `GET /drivers/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverStats {
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub podiums: Option<String>,
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub wins: Option<String>,
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub starts: Option<String>,
}

/// Lazily fetched detail, merged over the summary record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverDetail {
    #[serde(default, deserialize_with = "de_lenient")]
    pub stats: Option<DriverStats>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub driver_spline_url: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub car_spline_url: Option<String>,
}

/// Outcome of a completed event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceResult {
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub winner: Option<String>,
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub time: Option<String>,
}

/// Grand Prix weekend from `/events/upcoming` or `/events/recent`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default, deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub round: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "de_lenient")]
    pub result: Option<RaceResult>,
}

/// Schedule payload: both event lists, always fetched together
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLists {
    pub upcoming: Vec<Event>,
    pub recent: Vec<Event>,
}

/// Non-empty value or the placeholder
pub fn or_placeholder(value: Option<&str>) -> &str {
    non_empty(value).unwrap_or(PLACEHOLDER)
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl Driver {
    /// Summary with nothing but an id, for drivers not in the listing
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            team: None,
            country: None,
            number: None,
            headshot: None,
            driver_spline_url: None,
            car_spline_url: None,
        }
    }

    pub fn display_name(&self) -> &str {
        or_placeholder(self.name.as_deref())
    }

    pub fn display_team(&self) -> &str {
        or_placeholder(self.team.as_deref())
    }

    /// Country as shown in the directory (`N/A` when missing)
    pub fn display_country(&self) -> &str {
        non_empty(self.country.as_deref()).unwrap_or(COUNTRY_PLACEHOLDER)
    }

    /// `#44` style badge, if the driver has a number
    pub fn number_badge(&self) -> Option<String> {
        non_empty(self.number.as_deref()).map(|n| format!("#{}", n))
    }
}

impl Searchable for Driver {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            self.name.as_deref(),
            self.team.as_deref(),
            self.country.as_deref(),
            self.number.as_deref(),
        ]
    }
}

impl Event {
    pub fn display_name(&self) -> &str {
        or_placeholder(self.name.as_deref())
    }

    pub fn display_round(&self) -> &str {
        or_placeholder(self.round.as_deref())
    }

    pub fn display_location(&self) -> &str {
        or_placeholder(self.location.as_deref())
    }
}

impl RaceResult {
    pub fn display_winner(&self) -> &str {
        or_placeholder(self.winner.as_deref())
    }

    pub fn display_time(&self) -> &str {
        or_placeholder(self.time.as_deref())
    }
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn de_opt_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(scalar_to_string))
}

/// Strings only; anything else reads as missing
fn de_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Nested record that reads as missing when it does not decode
fn de_lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(|v| serde_json::from_value(v).ok()))
}

/// Scalar id; missing, null or structured ids become empty
fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer).map(scalar_to_string)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_driver_numeric_fields_become_strings() {
        let driver: Driver = serde_json::from_value(json!({
            "id": 1, "name": "Max", "team": "RB", "country": "NL", "number": 1
        }))
        .unwrap();

        assert_eq!(driver.id, "1");
        assert_eq!(driver.number.as_deref(), Some("1"));
        assert_eq!(driver.number_badge().as_deref(), Some("#1"));
        assert_eq!(driver.headshot, None);
    }

    #[test]
    fn test_driver_fallbacks() {
        let driver: Driver = serde_json::from_value(json!({"id": "ham", "team": ""})).unwrap();

        assert_eq!(driver.display_team(), PLACEHOLDER);
        assert_eq!(driver.display_country(), COUNTRY_PLACEHOLDER);
        assert_eq!(driver.number_badge(), None);
        assert_eq!(Driver::from_id("ham"), Driver { team: None, ..driver });
    }

    #[test]
    fn test_driver_survives_odd_fields() {
        let driver: Driver = serde_json::from_value(json!({
            "id": 1, "name": "Max", "country": 31, "team": {"name": "RB"},
            "headshot": 7, "driverSplineUrl": "https://scene/max"
        }))
        .unwrap();

        assert_eq!(driver.country.as_deref(), Some("31"));
        assert_eq!(driver.display_team(), PLACEHOLDER);
        assert_eq!(driver.headshot, None);
        assert_eq!(driver.driver_spline_url.as_deref(), Some("https://scene/max"));
    }

    #[test]
    fn test_missing_or_structured_id_is_empty() {
        let driver: Driver = serde_json::from_value(json!({"name": "Nobody"})).unwrap();
        assert_eq!(driver.id, "");
        assert_eq!(driver.display_name(), "Nobody");

        let driver: Driver = serde_json::from_value(json!({"id": [1]})).unwrap();
        assert_eq!(driver.id, "");

        let event: Event =
            serde_json::from_value(json!({"name": "Monaco Grand Prix", "round": 8})).unwrap();
        assert_eq!(event.id, "");
        assert_eq!(event.display_round(), "8");
    }

    #[test]
    fn test_malformed_nested_records_read_as_missing() {
        let detail: DriverDetail = serde_json::from_value(json!({
            "stats": "n/a",
            "carSplineUrl": "https://scene/car"
        }))
        .unwrap();
        assert_eq!(detail.stats, None);
        assert_eq!(detail.car_spline_url.as_deref(), Some("https://scene/car"));

        let event: Event = serde_json::from_value(json!({
            "id": "mon", "result": [1, 2], "startDate": 20250525
        }))
        .unwrap();
        assert_eq!(event.result, None);
        assert_eq!(event.start_date, None);
    }

    #[test]
    fn test_detail_camel_case_fields() {
        let detail: DriverDetail = serde_json::from_value(json!({
            "stats": {"podiums": 98, "wins": "54", "starts": null},
            "driverSplineUrl": "https://scene/driver",
            "unknown": true
        }))
        .unwrap();

        let stats = detail.stats.unwrap();
        assert_eq!(stats.podiums.as_deref(), Some("98"));
        assert_eq!(stats.wins.as_deref(), Some("54"));
        assert_eq!(stats.starts, None);
        assert_eq!(detail.driver_spline_url.as_deref(), Some("https://scene/driver"));
        assert_eq!(detail.car_spline_url, None);
    }

    #[test]
    fn test_event_with_result() {
        let event: Event = serde_json::from_value(json!({
            "id": "bah-2025",
            "name": "Bahrain Grand Prix",
            "round": 1,
            "startDate": "2025-02-28",
            "endDate": "2025-03-02",
            "result": {"winner": "Oscar Piastri", "time": "1:35:39.435"}
        }))
        .unwrap();

        assert_eq!(event.display_round(), "1");
        assert_eq!(event.display_location(), PLACEHOLDER);
        let result = event.result.unwrap();
        assert_eq!(result.display_winner(), "Oscar Piastri");
    }
}
