//! Terminal rendering of a current-weather lookup.

use colored::{Color, ColoredString, Colorize};
use weather_core::{ConditionKind, CurrentWeather, Units};

/// Which terminal colour each condition kind is drawn in.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    entries: [(ConditionKind, Color); 7],
}

impl Palette {
    pub const STANDARD: Palette = Palette {
        entries: [
            (ConditionKind::Thunderstorm, Color::Red),
            (ConditionKind::Drizzle, Color::Cyan),
            (ConditionKind::Rain, Color::Blue),
            (ConditionKind::Snow, Color::BrightWhite),
            (ConditionKind::Atmosphere, Color::Magenta),
            (ConditionKind::Clear, Color::Yellow),
            (ConditionKind::Cloudy, Color::White),
        ],
    };

    /// `None` means the terminal's default colour.
    pub fn colour_for(&self, kind: ConditionKind) -> Option<Color> {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, colour)| *colour)
    }

    fn paint(&self, kind: ConditionKind, text: &str) -> ColoredString {
        match self.colour_for(kind) {
            Some(colour) => text.color(colour),
            None => text.normal(),
        }
    }
}

/// Render the multi-line report printed by `weather <city>`.
pub fn render(weather: &CurrentWeather, units: Units, palette: &Palette) -> String {
    let condition = weather.primary_condition();
    let kind = ConditionKind::from_code(condition.id);
    let description = palette.paint(kind, &capitalize(&condition.description));

    let name = format!("Name: {}", weather.name);
    let name = name.as_str().reversed();
    let label = "Weather Data".cyan();
    let glyph = units.temperature_glyph();

    let lat = &weather.coord.lat;
    let lon = &weather.coord.lon;
    let temp = &weather.main.temp;
    let feels = &weather.main.feels_like;
    let humidity = &weather.main.humidity;
    let pressure = &weather.main.pressure;

    format!(
        "\n{name}\n\
         Coordinates (Latitude/Longitude): {lat}/{lon}\n\
         {label}:\n\
         \tDescription: {description}\n\
         \tTemperature: {temp}{glyph}\n\
         \tTemperature feels like: {feels}{glyph}\n\
         \tHumidity: {humidity}%\n\
         \tPressure: {pressure} hPa\n"
    )
}

/// Upper-case the first character, lower-case the rest.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
