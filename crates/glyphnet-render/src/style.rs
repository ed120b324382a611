//! Resolved drawing styles.
//!
//! The cascade is: built-in defaults, then the object-level style, then the
//! per-geometric-shape override. Backends only ever see the resolved result.

use glyphnet_core::model::{CurveStyle, ShapeStyle, StyleOverride, TextStyle};

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
    pub dash_array: Vec<f64>,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            color: "black".to_string(),
            width: 1.0,
            dash_array: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    pub color: String,
}

impl Default for Fill {
    fn default() -> Self {
        Self {
            color: "white".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HAnchor {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VAnchor {
    Top,
    #[default]
    Center,
    Bottom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub color: String,
    pub family: String,
    pub size: f64,
    pub style: String,
    pub weight: String,
    pub h_anchor: HAnchor,
    pub v_anchor: VAnchor,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            color: "black".to_string(),
            family: "monospace".to_string(),
            size: 12.0,
            style: "normal".to_string(),
            weight: "normal".to_string(),
            h_anchor: HAnchor::Center,
            v_anchor: VAnchor::Center,
        }
    }
}

/// Object-level shape style over the defaults.
pub fn resolve_shape_style(style: Option<&ShapeStyle>) -> (Stroke, Fill) {
    let mut stroke = Stroke::default();
    let mut fill = Fill::default();
    if let Some(style) = style {
        if let Some(color) = &style.stroke_color {
            stroke.color = color.clone();
        }
        if let Some(width) = style.stroke_width {
            stroke.width = width;
        }
        if let Some(dash) = &style.stroke_dash_array {
            stroke.dash_array = dash.clone();
        }
        if let Some(color) = &style.fill_color {
            fill.color = color.clone();
        }
    }
    (stroke, fill)
}

/// Per-shape override over an already resolved object style.
pub fn apply_override(stroke: &mut Stroke, fill: &mut Fill, over: &StyleOverride) {
    if let Some(color) = &over.stroke_color {
        stroke.color = color.clone();
    }
    if let Some(width) = over.stroke_width {
        stroke.width = width;
    }
    if let Some(dash) = &over.stroke_dash_array {
        stroke.dash_array = dash.clone();
    }
    if let Some(color) = &over.fill_color {
        fill.color = color.clone();
    }
}

pub fn resolve_curve_style(style: Option<&CurveStyle>) -> Stroke {
    let mut stroke = Stroke::default();
    if let Some(style) = style {
        if let Some(color) = &style.stroke_color {
            stroke.color = color.clone();
        }
        if let Some(width) = style.stroke_width {
            stroke.width = width;
        }
        if let Some(dash) = &style.stroke_dash_array {
            stroke.dash_array = dash.clone();
        }
    }
    stroke
}

pub fn resolve_text_style(style: Option<&TextStyle>) -> Font {
    let mut font = Font::default();
    let Some(style) = style else {
        return font;
    };
    if let Some(color) = &style.stroke_color {
        font.color = color.clone();
    }
    if let Some(family) = &style.font_family {
        font.family = family.clone();
    }
    if let Some(size) = style.font_size {
        font.size = size;
    }
    if let Some(font_style) = &style.font_style {
        font.style = font_style.clone();
    }
    if let Some(weight) = &style.font_weight {
        font.weight = weight.clone();
    }
    if let Some(anchor) = &style.h_text_anchor {
        font.h_anchor = match anchor.as_str() {
            "start" => HAnchor::Left,
            "end" => HAnchor::Right,
            _ => HAnchor::Center,
        };
    }
    if let Some(anchor) = &style.v_text_anchor {
        font.v_anchor = match anchor.as_str() {
            "top" => VAnchor::Top,
            "bottom" => VAnchor::Bottom,
            _ => VAnchor::Center,
        };
    }
    font
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_black_on_white() {
        let (stroke, fill) = resolve_shape_style(None);
        assert_eq!(stroke.color, "black");
        assert_eq!(stroke.width, 1.0);
        assert!(stroke.dash_array.is_empty());
        assert_eq!(fill.color, "white");
    }

    #[test]
    fn object_style_overrides_defaults_and_shape_override_wins() {
        let object = ShapeStyle {
            stroke_color: Some("#335577".to_string()),
            stroke_width: Some(2.0),
            fill_color: Some("#eeeeee".to_string()),
            ..Default::default()
        };
        let (mut stroke, mut fill) = resolve_shape_style(Some(&object));
        assert_eq!(stroke.color, "#335577");
        assert_eq!(fill.color, "#eeeeee");

        let over = StyleOverride {
            stroke_color: Some("red".to_string()),
            ..Default::default()
        };
        apply_override(&mut stroke, &mut fill, &over);
        assert_eq!(stroke.color, "red");
        // Untouched properties keep the object level.
        assert_eq!(stroke.width, 2.0);
        assert_eq!(fill.color, "#eeeeee");
    }

    #[test]
    fn text_anchors_map_onto_the_backend_vocabulary() {
        let style = TextStyle {
            h_text_anchor: Some("start".to_string()),
            v_text_anchor: Some("middle".to_string()),
            ..Default::default()
        };
        let font = resolve_text_style(Some(&style));
        assert_eq!(font.h_anchor, HAnchor::Left);
        assert_eq!(font.v_anchor, VAnchor::Center);
        assert_eq!(font.family, "monospace");
        assert_eq!(font.size, 12.0);
    }
}
