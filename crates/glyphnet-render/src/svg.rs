//! Built-in SVG backend: buffers primitives per layer and emits a standalone
//! `<svg>` document.

use crate::scene::{DrawBackend, EllipseSpec, Placement, RectSpec, TextSpec};
use crate::style::{Fill, Font, HAnchor, Stroke, VAnchor};
use glyphnet_core::geom::Point;
use glyphnet_core::model::{CurveSegment, Extents};
use std::fmt::Write as _;

#[derive(Debug, Default)]
pub struct SvgBackend {
    background: Option<String>,
    elements: Vec<(u8, u8, String)>,
}

impl SvgBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits the document. Elements sort by (layer, sublayer), stable within
    /// a layer.
    pub fn finish(mut self, extents: &Extents) -> String {
        self.elements.sort_by_key(|(layer, sublayer, _)| (*layer, *sublayer));
        let width = extents.max_x - extents.min_x;
        let height = extents.max_y - extents.min_y;
        let mut out = String::new();
        let _ = writeln!(
            &mut out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
            fmt(extents.min_x),
            fmt(extents.min_y),
            fmt(width.max(1.0)),
            fmt(height.max(1.0))
        );
        if let Some(color) = &self.background {
            let _ = writeln!(
                &mut out,
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
                fmt(extents.min_x),
                fmt(extents.min_y),
                fmt(width.max(1.0)),
                fmt(height.max(1.0)),
                escape(color)
            );
        }
        for (_, _, element) in &self.elements {
            out.push_str(element);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }

    fn push(&mut self, placement: Placement, element: String) {
        self.elements
            .push((placement.layer, placement.sublayer, element));
    }
}

impl DrawBackend for SvgBackend {
    fn draw_background(&mut self, color: &str) {
        self.background = Some(color.to_string());
    }

    fn draw_rounded_rectangle(
        &mut self,
        rect: RectSpec,
        stroke: &Stroke,
        fill: &Fill,
        placement: Placement,
    ) {
        let element = format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" ry="{}" fill="{}" stroke="{}" stroke-width="{}"{}{}/>"#,
            fmt(rect.x),
            fmt(rect.y),
            fmt(rect.width),
            fmt(rect.height),
            fmt(rect.corner_radius_x),
            fmt(rect.corner_radius_y),
            escape(&fill.color),
            escape(&stroke.color),
            fmt(stroke.width),
            dash_attr(stroke),
            transform_attr(placement),
        );
        self.push(placement, element);
    }

    fn draw_ellipse(
        &mut self,
        ellipse: EllipseSpec,
        stroke: &Stroke,
        fill: &Fill,
        placement: Placement,
    ) {
        let element = format!(
            r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}" fill="{}" stroke="{}" stroke-width="{}"{}{}/>"#,
            fmt(ellipse.cx),
            fmt(ellipse.cy),
            fmt(ellipse.rx),
            fmt(ellipse.ry),
            escape(&fill.color),
            escape(&stroke.color),
            fmt(stroke.width),
            dash_attr(stroke),
            transform_attr(placement),
        );
        self.push(placement, element);
    }

    fn draw_polygon(
        &mut self,
        points: &[Point],
        stroke: &Stroke,
        fill: &Fill,
        placement: Placement,
    ) {
        let mut list = String::new();
        for (index, point) in points.iter().enumerate() {
            if index > 0 {
                list.push(' ');
            }
            let _ = write!(&mut list, "{},{}", fmt(point.x), fmt(point.y));
        }
        let element = format!(
            r#"<polygon points="{}" fill="{}" stroke="{}" stroke-width="{}"{}{}/>"#,
            list,
            escape(&fill.color),
            escape(&stroke.color),
            fmt(stroke.width),
            dash_attr(stroke),
            transform_attr(placement),
        );
        self.push(placement, element);
    }

    fn draw_curve(&mut self, curve: &[CurveSegment], stroke: &Stroke, placement: Placement) {
        let Some(first) = curve.first() else {
            return;
        };
        let mut d = format!("M {} {}", fmt(first.start_x), fmt(first.start_y));
        for segment in curve {
            let b1x = segment.base_point1_x.unwrap_or(segment.start_x);
            let b1y = segment.base_point1_y.unwrap_or(segment.start_y);
            let b2x = segment.base_point2_x.unwrap_or(segment.end_x);
            let b2y = segment.base_point2_y.unwrap_or(segment.end_y);
            let _ = write!(
                &mut d,
                " C {} {}, {} {}, {} {}",
                fmt(b1x),
                fmt(b1y),
                fmt(b2x),
                fmt(b2y),
                fmt(segment.end_x),
                fmt(segment.end_y)
            );
        }
        let element = format!(
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}"{}{}/>"#,
            d,
            escape(&stroke.color),
            fmt(stroke.width),
            dash_attr(stroke),
            transform_attr(placement),
        );
        self.push(placement, element);
    }

    fn draw_text(&mut self, text: TextSpec<'_>, font: &Font, placement: Placement) {
        let (x, anchor) = match font.h_anchor {
            HAnchor::Left => (text.x, "start"),
            HAnchor::Center => (text.x + 0.5 * text.width, "middle"),
            HAnchor::Right => (text.x + text.width, "end"),
        };
        let (y, baseline) = match font.v_anchor {
            VAnchor::Top => (text.y, "hanging"),
            VAnchor::Center => (text.y + 0.5 * text.height, "central"),
            VAnchor::Bottom => (text.y + text.height, "text-top"),
        };
        let element = format!(
            r#"<text x="{}" y="{}" text-anchor="{}" dominant-baseline="{}" font-family="{}" font-size="{}" font-style="{}" font-weight="{}" fill="{}"{}>{}</text>"#,
            fmt(x),
            fmt(y),
            anchor,
            baseline,
            escape(&font.family),
            fmt(font.size),
            escape(&font.style),
            escape(&font.weight),
            escape(&font.color),
            transform_attr(placement),
            escape(text.text),
        );
        self.push(placement, element);
    }

    fn draw_image(&mut self, href: &str, rect: RectSpec, placement: Placement) {
        let element = format!(
            r#"<image href="{}" x="{}" y="{}" width="{}" height="{}"{}/>"#,
            escape(href),
            fmt(rect.x),
            fmt(rect.y),
            fmt(rect.width),
            fmt(rect.height),
            transform_attr(placement),
        );
        self.push(placement, element);
    }
}

fn transform_attr(placement: Placement) -> String {
    if placement.offset_x == 0.0 && placement.offset_y == 0.0 && placement.slope == 0.0 {
        return String::new();
    }
    let degrees = placement.slope.to_degrees();
    format!(
        r#" transform="translate({} {}) rotate({})""#,
        fmt(placement.offset_x),
        fmt(placement.offset_y),
        fmt(degrees)
    )
}

fn dash_attr(stroke: &Stroke) -> String {
    if stroke.dash_array.is_empty() {
        return String::new();
    }
    let list = stroke
        .dash_array
        .iter()
        .map(|v| fmt(*v))
        .collect::<Vec<_>>()
        .join(" ");
    format!(r#" stroke-dasharray="{list}""#)
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Formats a coordinate with up to three decimals, trailing zeros trimmed.
fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut r = (v * 1000.0).round() / 1000.0;
    if r.abs() < 0.0005 {
        r = 0.0;
    }
    let mut s = format!("{r:.3}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    s
}
