use rand::seq::SliceRandom;

use crate::shared::entities::WeatherReport;

const WEATHER_TABLE: [WeatherReport; 4] = [
    WeatherReport {
        temperature_c: 22,
        condition: "Sunny",
        humidity_pct: 45,
        location: "New York",
        wind: "12 km/h",
        uv_index: "6",
    },
    WeatherReport {
        temperature_c: 18,
        condition: "Cloudy",
        humidity_pct: 65,
        location: "London",
        wind: "8 km/h",
        uv_index: "3",
    },
    WeatherReport {
        temperature_c: 9,
        condition: "Rainy",
        humidity_pct: 80,
        location: "Seattle",
        wind: "15 km/h",
        uv_index: "2",
    },
    WeatherReport {
        temperature_c: 25,
        condition: "Clear",
        humidity_pct: 30,
        location: "Los Angeles",
        wind: "5 km/h",
        uv_index: "8",
    },
];

const QUOTES: [(&str, &str); 5] = [
    (
        "The only way to do great work is to love what you do.",
        "Steve Jobs",
    ),
    (
        "Innovation distinguishes between a leader and a follower.",
        "Steve Jobs",
    ),
    (
        "Your time is limited, don't waste it living someone else's life.",
        "Steve Jobs",
    ),
    (
        "The future belongs to those who believe in the beauty of their dreams.",
        "Eleanor Roosevelt",
    ),
    (
        "The best way to predict the future is to create it.",
        "Abraham Lincoln",
    ),
];

const HEADLINES: [&str; 4] = [
    "Tech Giants Unveil Breakthrough in AI Ethics",
    "Global Markets Surge as Inflation Concerns Ease",
    "Sustainable Energy Project Launched in Major City",
    "Space Agency Announces New Mission to Mars",
];

pub fn pick_weather() -> WeatherReport {
    WEATHER_TABLE
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(WEATHER_TABLE[0])
}

pub fn pick_quote() -> (&'static str, &'static str) {
    QUOTES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(QUOTES[0])
}

pub fn pick_headline() -> &'static str {
    HEADLINES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(HEADLINES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_stay_inside_the_tables() {
        for _ in 0..20 {
            let report = pick_weather();
            assert!(WEATHER_TABLE
                .iter()
                .any(|w| w.location == report.location
                    && w.temperature_c == report.temperature_c
                    && w.condition == report.condition));
            let (text, author) = pick_quote();
            assert!(QUOTES.contains(&(text, author)));
            assert!(HEADLINES.contains(&pick_headline()));
        }
    }
}
