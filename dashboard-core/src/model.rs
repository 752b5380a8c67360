use serde::Deserialize;
use serde_json::{Map, Value};

/// One raw provider response, kept unmodified between capture and archival.
///
/// The full JSON object is retained so the archived copy preserves every
/// field the provider sent, not just the ones the dashboard renders.
#[derive(Debug, Clone)]
pub struct WeatherReading {
    raw: Map<String, Value>,
}

/// Typed view over the fields the dashboard renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingSummary {
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub condition: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwBody {
    main: OwMain,
    weather: Vec<OwWeather>,
}

impl WeatherReading {
    pub fn new(raw: Map<String, Value>) -> Self {
        Self { raw }
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    /// Extract the rendered fields, or `None` when the response does not
    /// have the expected shape.
    pub fn summary(&self) -> Option<ReadingSummary> {
        let body: OwBody = serde_json::from_value(Value::Object(self.raw.clone())).ok()?;

        let condition = body
            .weather
            .first()
            .map(|w| w.description.clone())
            .unwrap_or_else(|| "Unknown".to_string());

        Some(ReadingSummary {
            temperature_c: body.main.temp,
            feels_like_c: body.main.feels_like,
            humidity_pct: body.main.humidity,
            condition,
        })
    }

    /// The reading with a capture stamp added, serialized as UTF-8 JSON text.
    /// The original fields are left untouched.
    pub fn stamped_json(&self, timestamp: &str) -> serde_json::Result<String> {
        let mut stamped = self.raw.clone();
        stamped.insert("timestamp".to_string(), Value::String(timestamp.to_string()));
        serde_json::to_string(&stamped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nairobi_reading() -> WeatherReading {
        let raw = serde_json::from_str(
            r#"{"main":{"temp":22.5,"feels_like":21.0,"humidity":60},"weather":[{"description":"clear sky"}]}"#,
        )
        .expect("fixture must parse");
        WeatherReading::new(raw)
    }

    #[test]
    fn summary_extracts_rendered_fields() {
        let summary = nairobi_reading().summary().expect("summary must exist");

        assert_eq!(summary.temperature_c, 22.5);
        assert_eq!(summary.feels_like_c, 21.0);
        assert_eq!(summary.humidity_pct, 60);
        assert_eq!(summary.condition, "clear sky");
    }

    #[test]
    fn summary_is_none_for_unexpected_shape() {
        let raw = serde_json::from_str(r#"{"cod":"404","message":"city not found"}"#)
            .expect("fixture must parse");
        let reading = WeatherReading::new(raw);

        assert!(reading.summary().is_none());
    }

    #[test]
    fn empty_reading_reports_empty() {
        assert!(WeatherReading::new(Map::new()).is_empty());
        assert!(!nairobi_reading().is_empty());
    }

    #[test]
    fn stamped_json_adds_timestamp_and_keeps_fields() {
        let stamped = nairobi_reading()
            .stamped_json("2026-08-26-12-00-00")
            .expect("serialization must succeed");

        let parsed: Map<String, Value> =
            serde_json::from_str(&stamped).expect("stamped body must be JSON");

        assert_eq!(
            parsed.get("timestamp"),
            Some(&Value::String("2026-08-26-12-00-00".to_string()))
        );
        assert_eq!(parsed["main"]["temp"], 22.5);
        assert_eq!(parsed["weather"][0]["description"], "clear sky");
    }

    #[test]
    fn stamping_does_not_mutate_the_reading() {
        let reading = nairobi_reading();

        reading
            .stamped_json("2026-08-26-12-00-00")
            .expect("serialization must succeed");

        assert!(!reading.raw().contains_key("timestamp"));
        assert_eq!(reading.raw().len(), 2);
    }
}
