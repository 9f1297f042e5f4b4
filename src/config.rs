//! Tool defaults parsed from environment variables.

use crate::error::ToolError;

pub const DEFAULT_MIN_SHAPE_SIZE: f64 = 5.0;
pub const DEFAULT_STROKE_COLOR: &str = "#000000";
pub const DEFAULT_FILL_COLOR: &str = "transparent";
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;
pub const DEFAULT_OPACITY: f64 = 1.0;

/// Style applied to newly drawn shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStyle {
    pub stroke_color: String,
    pub fill_color: String,
    pub stroke_width: f64,
    pub opacity: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: DEFAULT_STROKE_COLOR.to_string(),
            fill_color: DEFAULT_FILL_COLOR.to_string(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            opacity: DEFAULT_OPACITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolConfig {
    /// A drawn shape with both sides below this is discarded as a click.
    pub min_shape_size: f64,
    pub style: ShapeStyle,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self { min_shape_size: DEFAULT_MIN_SHAPE_SIZE, style: ShapeStyle::default() }
    }
}

impl ToolConfig {
    /// Build typed tool config from environment variables.
    ///
    /// Optional:
    /// - `TOOL_MIN_SHAPE_SIZE`: default 5
    /// - `TOOL_STROKE_COLOR`: default `#000000`
    /// - `TOOL_FILL_COLOR`: default `transparent`
    /// - `TOOL_STROKE_WIDTH`: default 2
    /// - `TOOL_OPACITY`: default 1, must lie in `0..=1`
    pub fn from_env() -> Result<Self, ToolError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(_) => None,
        })
    }

    /// Same as [`ToolConfig::from_env`] but reading keys through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ToolError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let min_shape_size = parse_f64(&lookup, "TOOL_MIN_SHAPE_SIZE", DEFAULT_MIN_SHAPE_SIZE)?;
        if min_shape_size < 0.0 {
            return Err(ToolError::ConfigParse(format!("TOOL_MIN_SHAPE_SIZE must be >= 0, got {min_shape_size}")));
        }

        let stroke_width = parse_f64(&lookup, "TOOL_STROKE_WIDTH", DEFAULT_STROKE_WIDTH)?;
        let opacity = parse_f64(&lookup, "TOOL_OPACITY", DEFAULT_OPACITY)?;
        if !(0.0..=1.0).contains(&opacity) {
            return Err(ToolError::ConfigParse(format!("TOOL_OPACITY must be within 0..=1, got {opacity}")));
        }

        let style = ShapeStyle {
            stroke_color: lookup("TOOL_STROKE_COLOR").unwrap_or_else(|| DEFAULT_STROKE_COLOR.to_string()),
            fill_color: lookup("TOOL_FILL_COLOR").unwrap_or_else(|| DEFAULT_FILL_COLOR.to_string()),
            stroke_width,
            opacity,
        };

        Ok(Self { min_shape_size, style })
    }
}

fn parse_f64<F>(lookup: &F, key: &str, default: f64) -> Result<f64, ToolError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ToolError::ConfigParse(format!("invalid {key}: {raw}"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
