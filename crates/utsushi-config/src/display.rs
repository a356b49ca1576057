use serde::{Deserialize, Serialize};
use utsushi_types::geometry::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};
use utsushi_types::{Color, DisplayStyle};

fn default_background() -> String {
    "#FFFFFF".to_string()
}

fn default_foreground() -> String {
    "#000000".to_string()
}

fn default_font_family() -> String {
    "SimSun".to_string()
}

fn default_font_size() -> u32 {
    14
}

fn default_opacity() -> f32 {
    0.7
}

fn default_width() -> i32 {
    400
}

fn default_height() -> i32 {
    200
}

/// Raw result window settings as written by the user
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_foreground")]
    pub foreground: String,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    /// Default result window width when no geometry was remembered
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            foreground: default_foreground(),
            font_family: default_font_family(),
            font_size: default_font_size(),
            opacity: default_opacity(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl DisplayConfig {
    /// Validate into a typed style, substituting defaults for invalid entries
    pub fn style(&self) -> DisplayStyle {
        let defaults = DisplayStyle::default();

        let background = parse_color("background", &self.background, defaults.background);
        let foreground = parse_color("foreground", &self.foreground, defaults.foreground);

        let font_family = if self.font_family.trim().is_empty() {
            tracing::warn!("display.font_family is empty, using {}", defaults.font_family);
            defaults.font_family
        } else {
            self.font_family.clone()
        };

        let font_size = if self.font_size == 0 {
            tracing::warn!("display.font_size must be positive, using {}", defaults.font_size);
            defaults.font_size
        } else {
            self.font_size
        };

        let opacity = if (0.0..=1.0).contains(&self.opacity) {
            self.opacity
        } else {
            tracing::warn!(
                "display.opacity {} out of range 0..1, using {}",
                self.opacity,
                defaults.opacity
            );
            defaults.opacity
        };

        DisplayStyle {
            background,
            foreground,
            font_family,
            font_size,
            opacity,
        }
    }

    /// Default window size, clamped to the minimum
    pub fn default_size(&self) -> (i32, i32) {
        (self.width.max(MIN_WINDOW_WIDTH), self.height.max(MIN_WINDOW_HEIGHT))
    }
}

fn parse_color(field: &str, value: &str, fallback: Color) -> Color {
    value.parse().unwrap_or_else(|e| {
        tracing::warn!("display.{}: {}, using {}", field, e, fallback);
        fallback
    })
}
