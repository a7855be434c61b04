//! Turning a weather payload into the rounded reading shown to users.
//!
//! The headline number is the "feels like" temperature rounded to the nearest
//! multiple of five. The gap between the real and rounded value drives the tint.

use serde_json::Value;

/// How far the real feel sits from the rounded headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempDelta {
    /// Within one degree.
    Neutral,
    Higher,
    HigherStrong,
    Lower,
    LowerStrong,
}

impl TempDelta {
    const STRONG: f64 = 2.5;

    pub fn classify(real: f64, rounded: f64) -> Self {
        let diff = (real - rounded).abs();
        if diff < 1.0 {
            TempDelta::Neutral
        } else if real > rounded {
            if diff >= Self::STRONG {
                TempDelta::HigherStrong
            } else {
                TempDelta::Higher
            }
        } else if diff >= Self::STRONG {
            TempDelta::LowerStrong
        } else {
            TempDelta::Lower
        }
    }
}

/// Round to the nearest multiple of five, halves toward positive infinity.
///
/// `-12.5` rounds to `-10` and `12.5` to `15`.
pub fn round_to_five(value: f64) -> f64 {
    ((value / 5.0) + 0.5).floor() * 5.0
}

/// Emoji for an OpenWeather condition group (`weather[0].main`).
pub fn condition_emoji(condition: &str) -> &'static str {
    match condition {
        "Clear" => "☀️",
        "Clouds" => "☁️",
        "Rain" => "🌧️",
        "Drizzle" => "🌦️",
        "Thunderstorm" => "⛈️",
        "Snow" => "❄️",
        "Mist" | "Fog" | "Haze" | "Dust" | "Smoke" => "🌫️",
        "Tornado" => "🌪️",
        "Squall" => "💨",
        _ => "🌡️",
    }
}

/// Capitalize the first letter of every space-separated word.
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// What the front-end displays for one weather payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundedReading {
    pub location: String,
    pub condition: String,
    pub description: String,
    pub real_feel: f64,
    pub rounded: f64,
    pub delta: TempDelta,
}

impl RoundedReading {
    /// Extract a reading from a current-weather payload.
    ///
    /// Returns `None` when any of `main.feels_like`, `weather[0].main`,
    /// `weather[0].description` or `name` is missing.
    pub fn from_weather(payload: &Value) -> Option<Self> {
        let real_feel = payload.pointer("/main/feels_like")?.as_f64()?;
        let condition = payload.pointer("/weather/0/main")?.as_str()?;
        let description = payload.pointer("/weather/0/description")?.as_str()?;
        let location = payload.get("name")?.as_str()?;

        let rounded = round_to_five(real_feel);
        Some(Self {
            location: location.to_string(),
            condition: condition.to_string(),
            description: title_case(description),
            real_feel,
            rounded,
            delta: TempDelta::classify(real_feel, rounded),
        })
    }

    pub fn emoji(&self) -> &'static str {
        condition_emoji(&self.condition)
    }

    /// `"<emoji> <location>"`.
    pub fn headline(&self) -> String {
        format!("{} {}", self.emoji(), self.location)
    }

    /// The rounded temperature, e.g. `"15°"`.
    pub fn rounded_label(&self) -> String {
        format!("{}°", self.rounded)
    }

    /// The real feel with one decimal and the description, e.g. `"13.6° Light Rain"`.
    pub fn real_feel_label(&self) -> String {
        format!("{:.1}° {}", self.real_feel, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(feels_like: f64) -> Value {
        json!({
            "name": "New York",
            "main": { "temp": 14.2, "feels_like": feels_like },
            "weather": [{ "main": "Rain", "description": "light rain" }]
        })
    }

    #[test]
    fn test_round_to_five() {
        assert_eq!(round_to_five(13.6), 15.0);
        assert_eq!(round_to_five(12.4), 10.0);
        assert_eq!(round_to_five(12.5), 15.0);
        assert_eq!(round_to_five(-3.0), -5.0);
        assert_eq!(round_to_five(0.4), 0.0);
        assert_eq!(format!("{}", round_to_five(-0.4)), "0");
    }

    #[test]
    fn test_round_negative_halves_toward_positive() {
        assert_eq!(round_to_five(-12.5), -10.0);
        assert_eq!(format!("{}", round_to_five(-2.5)), "0");
        assert_eq!(round_to_five(-7.6), -10.0);
        assert_eq!(TempDelta::classify(-12.5, round_to_five(-12.5)), TempDelta::LowerStrong);
    }

    #[test]
    fn test_reading_below_freezing() {
        let reading = RoundedReading::from_weather(&payload(-12.5)).unwrap();
        assert_eq!(reading.rounded_label(), "-10°");
        assert_eq!(reading.delta, TempDelta::LowerStrong);
    }

    #[test]
    fn test_classify_delta() {
        assert_eq!(TempDelta::classify(15.5, 15.0), TempDelta::Neutral);
        assert_eq!(TempDelta::classify(16.5, 15.0), TempDelta::Higher);
        assert_eq!(TempDelta::classify(17.4, 15.0), TempDelta::Higher);
        assert_eq!(TempDelta::classify(12.5, 10.0), TempDelta::HigherStrong);
        assert_eq!(TempDelta::classify(13.6, 15.0), TempDelta::Lower);
        assert_eq!(TempDelta::classify(12.6, 15.0), TempDelta::Lower);
        assert_eq!(TempDelta::classify(7.5, 10.0), TempDelta::LowerStrong);
    }

    #[test]
    fn test_condition_emoji() {
        assert_eq!(condition_emoji("Clear"), "☀️");
        assert_eq!(condition_emoji("Haze"), "🌫️");
        assert_eq!(condition_emoji("Ash"), "🌡️");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("light rain"), "Light Rain");
        assert_eq!(title_case("overcast clouds"), "Overcast Clouds");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_reading_from_weather() {
        let reading = RoundedReading::from_weather(&payload(13.6)).unwrap();
        assert_eq!(reading.rounded, 15.0);
        assert_eq!(reading.delta, TempDelta::Lower);
        assert_eq!(reading.headline(), "🌧️ New York");
        assert_eq!(reading.rounded_label(), "15°");
        assert_eq!(reading.real_feel_label(), "13.6° Light Rain");
    }

    #[test]
    fn test_reading_missing_fields() {
        assert!(RoundedReading::from_weather(&json!({ "name": "Nowhere" })).is_none());
        assert!(RoundedReading::from_weather(&json!({ "error": "Location not found" })).is_none());
    }
}
