//! Emoji vocabulary and the free-text classifier.
//!
//! Weather providers report conditions and moon phases as free text
//! ("Light Rain Showers", "Waxing Gibbous (96% of full)"). The tables below
//! map known label fragments to glyphs; classification is substring based,
//! so several rules may match the same input. Matching is deterministic:
//! when more than one label matches, the longest one wins, so
//! "Thunderstorms and Rain" resolves to ⛈ rather than ☔.

/// Glyphs for weather condition texts. A rule matches when the condition
/// text ends with its label.
pub const CONDITION_RULES: &[(&str, &str)] = &[
    ("Drizzle", "🌦"),
    ("Rain", "☔"),
    ("Snow", "🌨"),
    ("Snow Grains", "🌨"),
    ("Ice Crystals", "🌨"),
    ("Ice Pellets", "🌨"),
    ("Hail", "🌧"),
    ("Mist", "🌫"),
    ("Fog", "🌫"),
    ("Fog Patches", "🌫"),
    ("Smoke", "🌪"),
    ("Volcanic Ash", "🌪"),
    ("Widespread Dust", "🏜"),
    ("Sand", "🏜"),
    ("Haze", "🌫"),
    ("Spray", "🌦"),
    ("Dust Whirls", "🏜"),
    ("Sandstorm", "🏜"),
    ("Low Drifting Snow", "🌨"),
    ("Low Drifting Widespread Dust", "🏜"),
    ("Low Drifting Sand", "🏜"),
    ("Blowing Snow", "🌬❄"),
    ("Blowing Widespread Dust", "🌬🏜"),
    ("Blowing Sand", "🌬🏜"),
    ("Rain Mist", "🌦"),
    ("Rain Showers", "☔"),
    ("Snow Showers", "🌨"),
    ("Snow Blowing Snow Mist", "🌬🌨"),
    ("Ice Pellet Showers", "🌨☄"),
    ("Hail Showers", "🌧"),
    ("Small Hail Showers", "🌧"),
    ("Thunderstorm", "🌩"),
    ("Thunderstorms and Rain", "⛈"),
    ("Thunderstorms and Snow", "🌩🌨"),
    ("Thunderstorms and Ice Pellets", "🌩☄"),
    ("Thunderstorms with Hail", "⛈"),
    ("Thunderstorms with Small Hail", "⛈"),
    ("Freezing Drizzle", "🌨"),
    ("Freezing Rain", "🌨"),
    ("Freezing Fog", "🌫"),
    ("Patches of Fog", "🌫"),
    ("Shallow Fog", "🌫"),
    ("Partial Fog", "🌫"),
    ("Overcast", "☁"),
    ("Clear", "🌞"),
    ("Partly Cloudy", "🌤"),
    ("Mostly Cloudy", "🌥"),
    ("Scattered Clouds", "⛅"),
    ("Small Hail", "🌧"),
    ("Squalls", "🌊"),
    ("Funnel Cloud", "🌪"),
    ("Unknown Precipitation", "🌧❔"),
    ("Unknown", "❔"),
];

/// Glyphs for moon phase texts. A rule matches when the phase text starts
/// with its label.
pub const MOON_RULES: &[(&str, &str)] = &[
    ("New", "🌚"),
    ("Waxing Crescent", "🌙"),
    ("First Quarter", "🌛"),
    ("Waxing Gibbous", "🌔"),
    ("Full", "🌝"),
    ("Waning Gibbous", "🌖"),
    ("Last Quarter", "🌜"),
    ("Waning Crescent", "🌘"),
];

/// Map a condition text to its glyph, or `""` when nothing matches.
pub fn condition_emoji(condition: &str) -> &'static str {
    longest_match(CONDITION_RULES, |label| condition.ends_with(label))
}

/// Map a moon phase text to its glyph, or `""` when nothing matches.
pub fn moon_emoji(phase: &str) -> &'static str {
    longest_match(MOON_RULES, |label| phase.starts_with(label))
}

fn longest_match(
    rules: &'static [(&'static str, &'static str)],
    matches: impl Fn(&str) -> bool,
) -> &'static str {
    rules
        .iter()
        .filter(|(label, _)| matches(label))
        .max_by_key(|(label, _)| label.len())
        .map(|(_, glyph)| *glyph)
        .unwrap_or("")
}
