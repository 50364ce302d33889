#![forbid(unsafe_code)]

//! Widget configuration.
//!
//! [`HeatmapOptions`] is built once at render start and passed by reference to
//! every component. Nothing in the workspace mutates it after construction; a
//! re-render builds fresh layout and interaction state from the same value.
//!
//! # Environment Variables
//! - `HEATGRID_FONT_FAMILY` (string, applied to every region font)
//! - `HEATGRID_FONT_SIZE` (f64, axis label font size)
//! - `HEATGRID_ANIM_DURATION` (u32 milliseconds)
//! - `HEATGRID_SHOW_GRID` (f64 spacing, or `off`)
//! - `HEATGRID_XAXIS_LOCATION` = top|bottom
//! - `HEATGRID_YAXIS_LOCATION` = left|right
//! - `HEATGRID_XAXIS_HIDDEN` / `HEATGRID_YAXIS_HIDDEN` (bool)
//! - `HEATGRID_PADDING` / `HEATGRID_OUTER_PADDING` (f64 pixels)

use std::env;
use std::fmt;

const ENV_FONT_FAMILY: &str = "HEATGRID_FONT_FAMILY";
const ENV_FONT_SIZE: &str = "HEATGRID_FONT_SIZE";
const ENV_ANIM_DURATION: &str = "HEATGRID_ANIM_DURATION";
const ENV_SHOW_GRID: &str = "HEATGRID_SHOW_GRID";
const ENV_XAXIS_LOCATION: &str = "HEATGRID_XAXIS_LOCATION";
const ENV_YAXIS_LOCATION: &str = "HEATGRID_YAXIS_LOCATION";
const ENV_XAXIS_HIDDEN: &str = "HEATGRID_XAXIS_HIDDEN";
const ENV_YAXIS_HIDDEN: &str = "HEATGRID_YAXIS_HIDDEN";
const ENV_PADDING: &str = "HEATGRID_PADDING";
const ENV_OUTER_PADDING: &str = "HEATGRID_OUTER_PADDING";

/// Font family, size and colour for one region.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontSpec {
    pub family: String,
    /// Size in pixels.
    pub size: f64,
    pub color: String,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            color: "#000".to_string(),
        }
    }

    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new("sans-serif", 12.0)
    }
}

/// Where the column labels are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum XAxisLocation {
    Top,
    #[default]
    Bottom,
}

impl XAxisLocation {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }
}

/// Where the row labels are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum YAxisLocation {
    Left,
    #[default]
    Right,
}

impl YAxisLocation {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// An auxiliary label column drawn left of the colormap, one value per row.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideColumn {
    pub header: String,
    pub values: Vec<String>,
}

impl SideColumn {
    pub fn new(header: impl Into<String>, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            header: header.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Flat option map for one widget render.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeatmapOptions {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub footer: Option<String>,
    pub title_font: FontSpec,
    pub subtitle_font: FontSpec,
    pub footer_font: FontSpec,
    /// Lines kept when wrapping title, subtitle and footer.
    pub text_max_lines: usize,

    pub xaxis_hidden: bool,
    pub yaxis_hidden: bool,
    pub xaxis_location: XAxisLocation,
    pub yaxis_location: YAxisLocation,
    pub xaxis_title: Option<String>,
    pub yaxis_title: Option<String>,
    pub axis_font: FontSpec,
    pub axis_title_font: FontSpec,
    /// Rotation of column labels in degrees.
    pub xaxis_angle: f64,
    /// Gap between the colormap edge and the axis labels.
    pub axis_label_padding: f64,

    pub row_dendrogram: bool,
    pub col_dendrogram: bool,
    pub dendrogram_size: f64,

    pub left_columns: Vec<SideColumn>,
    pub side_column_font: FontSpec,

    /// Colours of the legend ramp; `None` hides the legend.
    pub legend_colors: Option<Vec<String>>,
    pub legend_left_space: f64,
    pub legend_bar_width: f64,
    pub legend_label_padding: f64,
    pub legend_font: FontSpec,

    /// Transition duration in milliseconds.
    pub anim_duration: u32,
    /// Grid line spacing in pixels; `None` draws no grid.
    pub show_grid: Option<f64>,

    /// Gap between adjacent layout rows/columns.
    pub padding: f64,
    /// Margin between the canvas edge and the outermost rows/columns.
    pub outer_padding: f64,
}

impl Default for HeatmapOptions {
    fn default() -> Self {
        Self {
            title: None,
            subtitle: None,
            footer: None,
            title_font: FontSpec::new("sans-serif", 18.0),
            subtitle_font: FontSpec::new("sans-serif", 14.0),
            footer_font: FontSpec::new("sans-serif", 11.0),
            text_max_lines: 3,
            xaxis_hidden: false,
            yaxis_hidden: false,
            xaxis_location: XAxisLocation::Bottom,
            yaxis_location: YAxisLocation::Right,
            xaxis_title: None,
            yaxis_title: None,
            axis_font: FontSpec::new("sans-serif", 11.0),
            axis_title_font: FontSpec::new("sans-serif", 13.0),
            xaxis_angle: 60.0,
            axis_label_padding: 3.0,
            row_dendrogram: false,
            col_dendrogram: false,
            dendrogram_size: 60.0,
            left_columns: Vec::new(),
            side_column_font: FontSpec::new("sans-serif", 11.0),
            legend_colors: None,
            legend_left_space: 10.0,
            legend_bar_width: 16.0,
            legend_label_padding: 4.0,
            legend_font: FontSpec::new("sans-serif", 10.0),
            anim_duration: 500,
            show_grid: None,
            padding: 5.0,
            outer_padding: 5.0,
        }
    }
}

/// Configuration parse diagnostics (env + validation).
#[derive(Debug, Clone)]
pub struct ConfigParse {
    pub options: HeatmapOptions,
    pub errors: Vec<ConfigError>,
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl HeatmapOptions {
    /// Defaults overlaid with environment variables.
    #[must_use]
    pub fn from_env() -> HeatmapOptions {
        Self::from_env_with_diagnostics().options
    }

    /// Defaults overlaid with environment variables, with diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> ConfigParse {
        Self::default().apply_env_with(|key| env::var(key).ok())
    }

    /// Overlay values from `get` onto `self`.
    ///
    /// Unparseable values are skipped and reported; the rest still apply.
    pub fn apply_env_with<F>(mut self, mut get: F) -> ConfigParse
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut errors = Vec::new();

        if let Some(value) = get(ENV_FONT_FAMILY) {
            let family = value.trim();
            if family.is_empty() {
                errors.push(ConfigError::new("font_family", value, "must not be empty"));
            } else {
                for font in self.fonts_mut() {
                    font.family = family.to_string();
                }
            }
        }

        if let Some(value) = get(ENV_FONT_SIZE) {
            match parse_f64(&value) {
                Some(parsed) => self.axis_font.size = parsed,
                None => errors.push(ConfigError::new("axis_font.size", value, "expected number")),
            }
        }

        if let Some(value) = get(ENV_ANIM_DURATION) {
            match value.trim().parse::<u32>() {
                Ok(parsed) => self.anim_duration = parsed,
                Err(_) => errors.push(ConfigError::new(
                    "anim_duration",
                    value,
                    "expected milliseconds as unsigned integer",
                )),
            }
        }

        if let Some(value) = get(ENV_SHOW_GRID) {
            match value.trim().to_ascii_lowercase().as_str() {
                "off" | "none" | "false" | "0" => self.show_grid = None,
                other => match parse_f64(other) {
                    Some(parsed) => self.show_grid = Some(parsed),
                    None => errors.push(ConfigError::new(
                        "show_grid",
                        value,
                        "expected spacing in pixels or off",
                    )),
                },
            }
        }

        if let Some(value) = get(ENV_XAXIS_LOCATION) {
            match XAxisLocation::parse(&value) {
                Some(parsed) => self.xaxis_location = parsed,
                None => errors.push(ConfigError::new("xaxis_location", value, "expected top|bottom")),
            }
        }

        if let Some(value) = get(ENV_YAXIS_LOCATION) {
            match YAxisLocation::parse(&value) {
                Some(parsed) => self.yaxis_location = parsed,
                None => errors.push(ConfigError::new("yaxis_location", value, "expected left|right")),
            }
        }

        if let Some(value) = get(ENV_XAXIS_HIDDEN) {
            match parse_bool(&value) {
                Some(parsed) => self.xaxis_hidden = parsed,
                None => errors.push(ConfigError::new(
                    "xaxis_hidden",
                    value,
                    "expected bool (1/0/true/false)",
                )),
            }
        }

        if let Some(value) = get(ENV_YAXIS_HIDDEN) {
            match parse_bool(&value) {
                Some(parsed) => self.yaxis_hidden = parsed,
                None => errors.push(ConfigError::new(
                    "yaxis_hidden",
                    value,
                    "expected bool (1/0/true/false)",
                )),
            }
        }

        if let Some(value) = get(ENV_PADDING) {
            match parse_f64(&value) {
                Some(parsed) => self.padding = parsed,
                None => errors.push(ConfigError::new("padding", value, "expected number")),
            }
        }

        if let Some(value) = get(ENV_OUTER_PADDING) {
            match parse_f64(&value) {
                Some(parsed) => self.outer_padding = parsed,
                None => errors.push(ConfigError::new("outer_padding", value, "expected number")),
            }
        }

        if let Err(mut violations) = self.validate() {
            errors.append(&mut violations);
        }

        ConfigParse {
            options: self,
            errors,
        }
    }

    /// Parse options from a JSON object; missing keys take their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        validate_font("title_font", &self.title_font, &mut errors);
        validate_font("subtitle_font", &self.subtitle_font, &mut errors);
        validate_font("footer_font", &self.footer_font, &mut errors);
        validate_font("axis_font", &self.axis_font, &mut errors);
        validate_font("axis_title_font", &self.axis_title_font, &mut errors);
        validate_font("side_column_font", &self.side_column_font, &mut errors);
        validate_font("legend_font", &self.legend_font, &mut errors);
        validate_non_negative("padding", self.padding, &mut errors);
        validate_non_negative("outer_padding", self.outer_padding, &mut errors);
        validate_non_negative("axis_label_padding", self.axis_label_padding, &mut errors);
        validate_non_negative("dendrogram_size", self.dendrogram_size, &mut errors);
        validate_non_negative("legend_left_space", self.legend_left_space, &mut errors);
        validate_non_negative("legend_bar_width", self.legend_bar_width, &mut errors);
        validate_non_negative("legend_label_padding", self.legend_label_padding, &mut errors);
        if !self.xaxis_angle.is_finite() || self.xaxis_angle.abs() > 180.0 {
            errors.push(ConfigError::new(
                "xaxis_angle",
                self.xaxis_angle.to_string(),
                "must be within [-180, 180]",
            ));
        }
        if self.text_max_lines == 0 {
            errors.push(ConfigError::new("text_max_lines", "0", "must be >= 1"));
        }
        if let Some(spacing) = self.show_grid
            && !(spacing.is_finite() && spacing > 0.0)
        {
            errors.push(ConfigError::new(
                "show_grid",
                spacing.to_string(),
                "spacing must be > 0",
            ));
        }
        if let Some(colors) = &self.legend_colors
            && colors.is_empty()
        {
            errors.push(ConfigError::new(
                "legend_colors",
                "[]",
                "must list at least one colour or be absent",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn fonts_mut(&mut self) -> [&mut FontSpec; 7] {
        [
            &mut self.title_font,
            &mut self.subtitle_font,
            &mut self.footer_font,
            &mut self.axis_font,
            &mut self.axis_title_font,
            &mut self.side_column_font,
            &mut self.legend_font,
        ]
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[inline]
fn parse_f64(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn validate_font(field: &'static str, font: &FontSpec, errors: &mut Vec<ConfigError>) {
    if !(font.size.is_finite() && font.size > 0.0) {
        errors.push(ConfigError::new(field, font.size.to_string(), "size must be > 0"));
    }
    if font.family.trim().is_empty() {
        errors.push(ConfigError::new(field, "", "family must not be empty"));
    }
}

fn validate_non_negative(field: &'static str, value: f64, errors: &mut Vec<ConfigError>) {
    if !(value.is_finite() && value >= 0.0) {
        errors.push(ConfigError::new(field, value.to_string(), "must be >= 0"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl FnMut(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_validate() {
        assert_eq!(HeatmapOptions::default().validate(), Ok(()));
    }

    #[test]
    fn env_overrides_apply() {
        let parse = HeatmapOptions::default().apply_env_with(lookup(&[
            (ENV_XAXIS_LOCATION, "top"),
            (ENV_YAXIS_LOCATION, "LEFT"),
            (ENV_ANIM_DURATION, "250"),
            (ENV_SHOW_GRID, "4"),
            (ENV_YAXIS_HIDDEN, "yes"),
            (ENV_FONT_FAMILY, "Helvetica"),
        ]));
        assert!(parse.errors.is_empty(), "{:?}", parse.errors);
        let opts = parse.options;
        assert_eq!(opts.xaxis_location, XAxisLocation::Top);
        assert_eq!(opts.yaxis_location, YAxisLocation::Left);
        assert_eq!(opts.anim_duration, 250);
        assert_eq!(opts.show_grid, Some(4.0));
        assert!(opts.yaxis_hidden);
        assert_eq!(opts.title_font.family, "Helvetica");
        assert_eq!(opts.legend_font.family, "Helvetica");
    }

    #[test]
    fn bad_env_values_are_reported_not_applied() {
        let parse = HeatmapOptions::default().apply_env_with(lookup(&[
            (ENV_XAXIS_LOCATION, "middle"),
            (ENV_PADDING, "wide"),
            (ENV_XAXIS_HIDDEN, "maybe"),
        ]));
        let fields: Vec<_> = parse.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["xaxis_location", "xaxis_hidden", "padding"]);
        assert_eq!(parse.options.xaxis_location, XAxisLocation::Bottom);
        assert_eq!(parse.options.padding, 5.0);
    }

    #[test]
    fn show_grid_off() {
        let mut base = HeatmapOptions::default();
        base.show_grid = Some(2.0);
        let parse = base.apply_env_with(lookup(&[(ENV_SHOW_GRID, "off")]));
        assert_eq!(parse.options.show_grid, None);
    }

    #[test]
    fn validate_collects_every_violation() {
        let opts = HeatmapOptions {
            padding: -1.0,
            legend_colors: Some(Vec::new()),
            xaxis_angle: 270.0,
            axis_font: FontSpec::new("", 0.0),
            ..HeatmapOptions::default()
        };
        let errors = opts.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"padding"));
        assert!(fields.contains(&"legend_colors"));
        assert!(fields.contains(&"xaxis_angle"));
        assert_eq!(fields.iter().filter(|f| **f == "axis_font").count(), 2);
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::new("padding", "-1", "must be >= 0");
        assert_eq!(err.to_string(), "padding=-1 (must be >= 0)");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn from_json_fills_defaults() {
        let opts = HeatmapOptions::from_json(
            r##"{"title": "Expression", "legend_colors": ["#fff", "#f00"], "xaxis_location": "top"}"##,
        )
        .unwrap();
        assert_eq!(opts.title.as_deref(), Some("Expression"));
        assert_eq!(
            opts.legend_colors,
            Some(vec!["#fff".to_string(), "#f00".to_string()])
        );
        assert_eq!(opts.xaxis_location, XAxisLocation::Top);
        assert_eq!(opts.padding, HeatmapOptions::default().padding);
    }
}
