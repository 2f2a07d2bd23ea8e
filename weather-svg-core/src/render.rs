//! Literal `{name}` substitution over the SVG template.

use crate::{Error, error::Result};

/// Speech-bubble width per weekday, sized to fit the day name.
pub const DAY_BUBBLE_WIDTHS: &[(&str, u32)] = &[
    ("Monday", 235),
    ("Tuesday", 235),
    ("Wednesday", 260),
    ("Thursday", 245),
    ("Friday", 220),
    ("Saturday", 245),
    ("Sunday", 230),
];

pub fn day_bubble_width(day: &str) -> Result<u32> {
    DAY_BUBBLE_WIDTHS
        .iter()
        .find(|(name, _)| *name == day)
        .map(|(_, width)| *width)
        .ok_or_else(|| Error::config(format!("No day bubble width for unrecognized day '{day}'")))
}

/// Everything one render pass fills in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    pub deg_f: i64,
    pub deg_c: i64,
    pub weather_emoji: String,
    pub ps_time: String,
    pub today_day: String,
    pub day_bubble_width: u32,
}

impl RenderContext {
    /// Placeholder names paired with their replacement text.
    pub fn placeholders(&self) -> [(&'static str, String); 6] {
        [
            ("degF", self.deg_f.to_string()),
            ("degC", self.deg_c.to_string()),
            ("weatherEmoji", self.weather_emoji.clone()),
            ("psTime", self.ps_time.clone()),
            ("todayDay", self.today_day.clone()),
            ("dayBubbleWidth", self.day_bubble_width.to_string()),
        ]
    }
}

/// Replaces every `{name}` for the six known names. Anything else, including unknown
/// placeholders, passes through untouched.
pub fn render(template: &str, context: &RenderContext) -> String {
    context.placeholders().iter().fold(template.to_string(), |text, (name, value)| {
        text.replace(&format!("{{{name}}}"), value)
    })
}
