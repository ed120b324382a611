//! Layered scene assembly.
//!
//! Walks a canonical network, resolves the style cascade and all geometry,
//! and hands finished primitives to a [`DrawBackend`]. Layer order is fixed;
//! backends are free to buffer and reorder.

use crate::style::{self, Fill, Font, Stroke};
use glyphnet_core::geom::{self, Point};
use glyphnet_core::model::{
    BoundingBox, CurveSegment, EdgeFeatures, Features, GraphicalObject, Network, Reaction, RelAbs,
    ShapeKind, Species, TextGlyph,
};

/// Fixed z-order of the scene.
pub mod layer {
    pub const COMPARTMENT: u8 = 0;
    pub const COMPARTMENT_TEXT: u8 = 1;
    pub const EDGE: u8 = 2;
    pub const LINE_ENDING: u8 = 3;
    pub const REACTION: u8 = 4;
    pub const SPECIES: u8 = 5;
    pub const TEXT: u8 = 6;
    pub const EXTRA: u8 = 7;
    pub const EXTRA_TEXT: u8 = 8;
}

/// Where a primitive lands: z-order plus an optional rotation expressed as an
/// offset + slope pair (line endings rotate around their anchor point).
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    pub offset_x: f64,
    pub offset_y: f64,
    pub slope: f64,
    pub layer: u8,
    pub sublayer: u8,
}

impl Placement {
    pub fn on_layer(layer: u8) -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            slope: 0.0,
            layer,
            sublayer: 0,
        }
    }

    pub fn rotated(offset: Point, slope: f64, layer: u8) -> Self {
        Self {
            offset_x: offset.x,
            offset_y: offset.y,
            slope,
            layer,
            sublayer: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RectSpec {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub corner_radius_x: f64,
    pub corner_radius_y: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EllipseSpec {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct TextSpec<'a> {
    pub text: &'a str,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Primitive hooks. Every call receives already-resolved geometry and style;
/// the default body ignores the primitive so backends implement only what
/// they support.
pub trait DrawBackend {
    fn draw_background(&mut self, _color: &str) {}

    fn draw_rounded_rectangle(
        &mut self,
        _rect: RectSpec,
        _stroke: &Stroke,
        _fill: &Fill,
        _placement: Placement,
    ) {
    }

    fn draw_ellipse(
        &mut self,
        _ellipse: EllipseSpec,
        _stroke: &Stroke,
        _fill: &Fill,
        _placement: Placement,
    ) {
    }

    fn draw_polygon(
        &mut self,
        _points: &[Point],
        _stroke: &Stroke,
        _fill: &Fill,
        _placement: Placement,
    ) {
    }

    fn draw_curve(&mut self, _curve: &[CurveSegment], _stroke: &Stroke, _placement: Placement) {}

    fn draw_text(&mut self, _text: TextSpec<'_>, _font: &Font, _placement: Placement) {}

    fn draw_image(&mut self, _href: &str, _rect: RectSpec, _placement: Placement) {}
}

pub struct Scene<'a, B: DrawBackend> {
    network: &'a Network,
    backend: &'a mut B,
}

impl<'a, B: DrawBackend> Scene<'a, B> {
    pub fn new(network: &'a Network, backend: &'a mut B) -> Self {
        Self { network, backend }
    }

    /// Walks the whole network in layer order.
    pub fn render(&mut self) {
        if let Some(color) = &self.network.background_color {
            self.backend.draw_background(color);
        }
        for compartment in &self.network.compartments {
            self.add_compartment(compartment);
        }
        for species in &self.network.species {
            self.add_species(species);
        }
        for reaction in &self.network.reactions {
            self.add_reaction(reaction);
        }
        for object in &self.network.additional_graphical_objects {
            self.add_additional_graphical_object(object);
        }
    }

    pub fn add_compartment(&mut self, compartment: &GraphicalObject) {
        if let Some(features) = &compartment.features {
            self.add_shape(features, Placement::on_layer(layer::COMPARTMENT));
        }
        self.add_texts(&compartment.texts, layer::COMPARTMENT_TEXT);
    }

    pub fn add_species(&mut self, species: &Species) {
        if let Some(features) = &species.object.features {
            self.add_shape(features, Placement::on_layer(layer::SPECIES));
        }
        self.add_texts(&species.object.texts, layer::TEXT);
    }

    /// A reaction draws its own marker (curve or box), its label, and then
    /// every connecting edge with its line endings.
    pub fn add_reaction(&mut self, reaction: &Reaction) {
        if let Some(features) = &reaction.object.features {
            if let Some(curve) = &features.curve {
                let stroke = style::resolve_curve_style(features.graphical_curve.as_ref());
                self.backend
                    .draw_curve(curve, &stroke, Placement::on_layer(layer::REACTION));
            } else if features.bounding_box.is_some() {
                self.add_shape(features, Placement::on_layer(layer::REACTION));
            }
        }
        self.add_texts(&reaction.object.texts, layer::TEXT);
        for edge in &reaction.species_references {
            if let Some(features) = &edge.features {
                self.add_edge(features);
            }
        }
    }

    pub fn add_additional_graphical_object(&mut self, object: &GraphicalObject) {
        if let Some(features) = &object.features {
            self.add_shape(features, Placement::on_layer(layer::EXTRA));
        }
        self.add_texts(&object.texts, layer::EXTRA_TEXT);
    }

    fn add_edge(&mut self, features: &EdgeFeatures) {
        if let Some(curve) = &features.curve {
            let stroke = style::resolve_curve_style(features.graphical_curve.as_ref());
            self.backend
                .draw_curve(curve, &stroke, Placement::on_layer(layer::EDGE));
        }
        self.add_line_endings(features);
    }

    fn add_line_endings(&mut self, features: &EdgeFeatures) {
        let Some(heads) = features
            .graphical_curve
            .as_ref()
            .and_then(|c| c.heads.as_ref())
        else {
            return;
        };
        if let Some(name) = &heads.start {
            let anchor = features.start_point.map(|p| geom::point(p.x, p.y));
            let slope = features
                .start_slope
                .unwrap_or_else(|| curve_fallback_slope(features, true));
            self.add_line_ending(name, anchor, slope);
        }
        if let Some(name) = &heads.end {
            let anchor = features.end_point.map(|p| geom::point(p.x, p.y));
            let slope = features
                .end_slope
                .unwrap_or_else(|| curve_fallback_slope(features, false));
            self.add_line_ending(name, anchor, slope);
        }
    }

    fn add_line_ending(&mut self, name: &str, anchor: Option<Point>, slope: f64) {
        let Some(ending) = self.network.line_endings.iter().find(|le| le.id == name) else {
            return;
        };
        let Some(anchor) = anchor else {
            return;
        };
        let Some(features) = &ending.features else {
            return;
        };
        let slope = if ending.enable_rotation { slope } else { 0.0 };
        self.add_shape(
            features,
            Placement::rotated(anchor, slope, layer::LINE_ENDING),
        );
    }

    /// Resolves one shape stack against its bounding box and the style
    /// cascade, then calls the matching primitive per geometric shape. With
    /// no shape list, the bounding box draws as a plain rectangle.
    fn add_shape(&mut self, features: &Features, placement: Placement) {
        let Some(bbox) = features.bounding_box else {
            return;
        };
        let placement = nudge_along_slope(placement);
        let (stroke, fill) = style::resolve_shape_style(features.graphical_shape.as_ref());
        let shapes = features
            .graphical_shape
            .as_ref()
            .map(|s| s.geometric_shapes.as_slice())
            .unwrap_or_default();
        if shapes.is_empty() {
            self.backend.draw_rounded_rectangle(
                RectSpec {
                    x: bbox.x,
                    y: bbox.y,
                    width: bbox.width,
                    height: bbox.height,
                    corner_radius_x: 0.0,
                    corner_radius_y: 0.0,
                },
                &stroke,
                &fill,
                placement,
            );
            return;
        }
        for (index, shape) in shapes.iter().enumerate() {
            let mut stroke = stroke.clone();
            let mut fill = fill.clone();
            style::apply_override(&mut stroke, &mut fill, &shape.style);
            let placement = Placement {
                sublayer: index as u8,
                ..placement
            };
            match &shape.kind {
                ShapeKind::Rectangle {
                    x,
                    y,
                    width,
                    height,
                    rx,
                    ry,
                    ratio,
                } => {
                    let rect = resolve_rectangle(&bbox, x, y, width, height, rx, ry, *ratio);
                    self.backend
                        .draw_rounded_rectangle(rect, &stroke, &fill, placement);
                }
                ShapeKind::Ellipse { cx, cy, rx, ry, ratio } => {
                    let ellipse = resolve_ellipse(&bbox, cx, cy, rx, ry, *ratio);
                    self.backend.draw_ellipse(ellipse, &stroke, &fill, placement);
                }
                ShapeKind::Polygon { vertices } => {
                    let points: Vec<Point> = vertices
                        .iter()
                        .map(|v| {
                            geom::point(
                                bbox.x + v.render_point_x.resolve(bbox.width),
                                bbox.y + v.render_point_y.resolve(bbox.height),
                            )
                        })
                        .collect();
                    self.backend.draw_polygon(&points, &stroke, &fill, placement);
                }
                ShapeKind::Image {
                    href,
                    x,
                    y,
                    width,
                    height,
                } => {
                    let Some(href) = href else {
                        continue;
                    };
                    let rect = resolve_rectangle(&bbox, x, y, width, height, &None, &None, None);
                    self.backend.draw_image(href, rect, placement);
                }
            }
        }
    }

    fn add_texts(&mut self, texts: &[TextGlyph], layer: u8) {
        for glyph in texts {
            let Some(features) = &glyph.features else {
                continue;
            };
            let (Some(text), Some(bbox)) = (&features.plain_text, features.bounding_box) else {
                continue;
            };
            let font = style::resolve_text_style(features.graphical_text.as_ref());
            self.backend.draw_text(
                TextSpec {
                    text,
                    x: bbox.x,
                    y: bbox.y,
                    width: bbox.width,
                    height: bbox.height,
                },
                &font,
                Placement::on_layer(layer),
            );
        }
    }
}

/// Convenience: walk `network` into `backend` in one call.
pub fn render_network<B: DrawBackend>(network: &Network, backend: &mut B) {
    Scene::new(network, backend).render();
}

/// Rotated glyphs are pushed slightly along their slope so they sit on the
/// curve end rather than on the anchor point itself.
fn nudge_along_slope(mut placement: Placement) -> Placement {
    if (placement.offset_x != 0.0 || placement.offset_y != 0.0) && placement.slope != 0.0 {
        placement.offset_x += 1.5 * placement.slope.cos();
        placement.offset_y += 1.5 * placement.slope.sin();
    }
    placement
}

fn curve_fallback_slope(features: &EdgeFeatures, at_start: bool) -> f64 {
    let Some(curve) = &features.curve else {
        return 0.0;
    };
    let segment = if at_start { curve.first() } else { curve.last() };
    let Some(segment) = segment else {
        return 0.0;
    };
    geom::level_slope(
        geom::point(segment.start_x, segment.start_y),
        geom::point(segment.end_x, segment.end_y),
    )
}

#[allow(clippy::too_many_arguments)]
fn resolve_rectangle(
    bbox: &BoundingBox,
    x: &Option<RelAbs>,
    y: &Option<RelAbs>,
    width: &Option<RelAbs>,
    height: &Option<RelAbs>,
    rx: &Option<RelAbs>,
    ry: &Option<RelAbs>,
    ratio: Option<f64>,
) -> RectSpec {
    let mut out = RectSpec {
        x: bbox.x,
        y: bbox.y,
        width: bbox.width,
        height: bbox.height,
        corner_radius_x: 0.0,
        corner_radius_y: 0.0,
    };
    if let Some(x) = x {
        out.x += x.resolve(bbox.width);
    }
    if let Some(y) = y {
        out.y += y.resolve(bbox.height);
    }
    if let Some(width) = width {
        out.width = width.resolve(bbox.width);
    }
    if let Some(height) = height {
        out.height = height.resolve(bbox.height);
    }
    if let Some(ratio) = ratio {
        if ratio > 0.0 {
            if bbox.width / bbox.height <= ratio {
                out.width = bbox.width;
                out.height = bbox.width / ratio;
                out.y += 0.5 * (bbox.height - out.height);
            } else {
                out.height = bbox.height;
                out.width = ratio * bbox.height;
                out.x += 0.5 * (bbox.width - out.width);
            }
        }
    }
    let radius_span = 0.5 * (bbox.width + bbox.height);
    if let Some(rx) = rx {
        out.corner_radius_x = rx.resolve(radius_span);
    }
    if let Some(ry) = ry {
        out.corner_radius_y = ry.resolve(radius_span);
    }
    out
}

fn resolve_ellipse(
    bbox: &BoundingBox,
    cx: &Option<RelAbs>,
    cy: &Option<RelAbs>,
    rx: &Option<RelAbs>,
    ry: &Option<RelAbs>,
    ratio: Option<f64>,
) -> EllipseSpec {
    let mut out = EllipseSpec {
        cx: bbox.x,
        cy: bbox.y,
        rx: 0.5 * bbox.width,
        ry: 0.5 * bbox.height,
    };
    if let Some(cx) = cx {
        out.cx += cx.resolve(bbox.width);
    }
    if let Some(cy) = cy {
        out.cy += cy.resolve(bbox.height);
    }
    if let Some(rx) = rx {
        out.rx = rx.resolve(bbox.width);
    }
    if let Some(ry) = ry {
        out.ry = ry.resolve(bbox.height);
    }
    if let Some(ratio) = ratio {
        if ratio > 0.0 {
            if bbox.width / bbox.height <= ratio {
                out.rx = 0.5 * bbox.width;
                out.ry = 0.5 * bbox.width / ratio;
            } else {
                out.ry = 0.5 * bbox.height;
                out.rx = 0.5 * ratio * bbox.height;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphnet_core::model::{
        CurveHeads, CurveStyle, Extents, GeometricShape, LineEnding, PolygonVertex, ShapeStyle,
        SpeciesReference, StyleOverride, TextFeatures,
    };

    #[derive(Default)]
    struct Recorder {
        rects: Vec<(RectSpec, Stroke, Fill, u8)>,
        ellipses: Vec<(EllipseSpec, u8)>,
        polygons: Vec<(Vec<Point>, u8)>,
        curves: Vec<(usize, Stroke, u8)>,
        texts: Vec<(String, u8)>,
        line_ending_placements: Vec<Placement>,
    }

    impl DrawBackend for Recorder {
        fn draw_rounded_rectangle(
            &mut self,
            rect: RectSpec,
            stroke: &Stroke,
            fill: &Fill,
            placement: Placement,
        ) {
            if placement.layer == layer::LINE_ENDING {
                self.line_ending_placements.push(placement);
            }
            self.rects
                .push((rect, stroke.clone(), fill.clone(), placement.layer));
        }

        fn draw_ellipse(
            &mut self,
            ellipse: EllipseSpec,
            _stroke: &Stroke,
            _fill: &Fill,
            placement: Placement,
        ) {
            self.ellipses.push((ellipse, placement.layer));
        }

        fn draw_polygon(
            &mut self,
            points: &[Point],
            _stroke: &Stroke,
            _fill: &Fill,
            placement: Placement,
        ) {
            self.polygons.push((points.to_vec(), placement.layer));
        }

        fn draw_curve(&mut self, curve: &[CurveSegment], stroke: &Stroke, placement: Placement) {
            self.curves.push((curve.len(), stroke.clone(), placement.layer));
        }

        fn draw_text(&mut self, text: TextSpec<'_>, _font: &Font, placement: Placement) {
            self.texts.push((text.text.to_string(), placement.layer));
        }
    }

    fn bbox(x: f64, y: f64, width: f64, height: f64) -> BoundingBox {
        BoundingBox {
            x,
            y,
            width,
            height,
        }
    }

    fn boxed(bb: BoundingBox) -> Features {
        Features {
            bounding_box: Some(bb),
            ..Default::default()
        }
    }

    #[test]
    fn bare_bounding_box_draws_as_a_plain_rectangle_on_its_layer() {
        let network = Network {
            species: vec![Species {
                object: GraphicalObject {
                    id: "g1".to_string(),
                    features: Some(boxed(bbox(10.0, 20.0, 60.0, 36.0))),
                    ..Default::default()
                },
                compartment: None,
            }],
            extents: Extents::default(),
            ..Default::default()
        };
        let mut recorder = Recorder::default();
        render_network(&network, &mut recorder);
        assert_eq!(recorder.rects.len(), 1);
        let (rect, stroke, fill, layer_index) = &recorder.rects[0];
        assert_eq!(rect.x, 10.0);
        assert_eq!(rect.corner_radius_x, 0.0);
        assert_eq!(stroke.color, "black");
        assert_eq!(fill.color, "white");
        assert_eq!(*layer_index, layer::SPECIES);
    }

    #[test]
    fn shape_override_beats_object_style() {
        let features = Features {
            bounding_box: Some(bbox(0.0, 0.0, 100.0, 50.0)),
            graphical_shape: Some(ShapeStyle {
                stroke_color: Some("blue".to_string()),
                fill_color: Some("#fafafa".to_string()),
                geometric_shapes: vec![GeometricShape {
                    style: StyleOverride {
                        stroke_color: Some("red".to_string()),
                        ..Default::default()
                    },
                    kind: ShapeKind::Rectangle {
                        x: None,
                        y: None,
                        width: None,
                        height: None,
                        rx: Some(RelAbs { abs: 4.0, rel: 0.0 }),
                        ry: None,
                        ratio: None,
                    },
                }],
                ..Default::default()
            }),
            ..Default::default()
        };
        let network = Network {
            compartments: vec![GraphicalObject {
                id: "c1".to_string(),
                features: Some(features),
                ..Default::default()
            }],
            ..Default::default()
        };
        let mut recorder = Recorder::default();
        render_network(&network, &mut recorder);
        let (rect, stroke, fill, _) = &recorder.rects[0];
        assert_eq!(stroke.color, "red");
        assert_eq!(fill.color, "#fafafa");
        assert_eq!(rect.corner_radius_x, 4.0);
    }

    #[test]
    fn polygon_vertices_resolve_against_the_owner_box() {
        let features = Features {
            bounding_box: Some(bbox(10.0, 10.0, 20.0, 10.0)),
            graphical_shape: Some(ShapeStyle {
                geometric_shapes: vec![GeometricShape {
                    style: StyleOverride::default(),
                    kind: ShapeKind::Polygon {
                        vertices: vec![
                            PolygonVertex {
                                render_point_x: RelAbs { abs: 0.0, rel: 0.0 },
                                render_point_y: RelAbs { abs: 0.0, rel: 0.0 },
                            },
                            PolygonVertex {
                                render_point_x: RelAbs {
                                    abs: 0.0,
                                    rel: 100.0,
                                },
                                render_point_y: RelAbs {
                                    abs: 0.0,
                                    rel: 50.0,
                                },
                            },
                        ],
                    },
                }],
                ..Default::default()
            }),
            ..Default::default()
        };
        let network = Network {
            additional_graphical_objects: vec![GraphicalObject {
                id: "x1".to_string(),
                features: Some(features),
                ..Default::default()
            }],
            ..Default::default()
        };
        let mut recorder = Recorder::default();
        render_network(&network, &mut recorder);
        let (points, layer_index) = &recorder.polygons[0];
        assert_eq!(points[0], geom::point(10.0, 10.0));
        assert_eq!(points[1], geom::point(30.0, 15.0));
        assert_eq!(*layer_index, layer::EXTRA);
    }

    #[test]
    fn edges_draw_their_curves_and_rotated_line_endings() {
        let arrow = LineEnding {
            id: "arrow".to_string(),
            enable_rotation: true,
            features: Some(boxed(bbox(-6.0, -3.0, 6.0, 6.0))),
        };
        let edge_features = EdgeFeatures {
            start_point: None,
            end_point: Some(glyphnet_core::model::LayoutPoint { x: 50.0, y: 20.0 }),
            start_slope: None,
            end_slope: Some(std::f64::consts::FRAC_PI_2),
            curve: Some(vec![CurveSegment {
                start_x: 0.0,
                start_y: 0.0,
                end_x: 50.0,
                end_y: 20.0,
                ..Default::default()
            }]),
            graphical_curve: Some(CurveStyle {
                stroke_color: Some("#222222".to_string()),
                heads: Some(CurveHeads {
                    start: None,
                    end: Some("arrow".to_string()),
                }),
                ..Default::default()
            }),
        };
        let network = Network {
            line_endings: vec![arrow],
            reactions: vec![Reaction {
                object: GraphicalObject {
                    id: "r1".to_string(),
                    features: Some(boxed(bbox(20.0, 5.0, 10.0, 10.0))),
                    ..Default::default()
                },
                species_references: vec![SpeciesReference {
                    id: "e1".to_string(),
                    features: Some(edge_features),
                    ..Default::default()
                }],
            }],
            ..Default::default()
        };
        let mut recorder = Recorder::default();
        render_network(&network, &mut recorder);
        // Reaction box + edge curve + line ending rect.
        let edge_curves: Vec<_> = recorder
            .curves
            .iter()
            .filter(|(_, _, l)| *l == layer::EDGE)
            .collect();
        assert_eq!(edge_curves.len(), 1);
        assert_eq!(edge_curves[0].1.color, "#222222");
        assert_eq!(recorder.line_ending_placements.len(), 1);
        let placement = recorder.line_ending_placements[0];
        assert_eq!(placement.slope, std::f64::consts::FRAC_PI_2);
        // The glyph is nudged along its slope off the anchor point.
        assert!((placement.offset_y - 21.5).abs() < 1e-9);
    }

    #[test]
    fn disabled_rotation_draws_the_ending_flat() {
        let bar = LineEnding {
            id: "bar".to_string(),
            enable_rotation: false,
            features: Some(boxed(bbox(-2.0, -6.0, 2.0, 12.0))),
        };
        let edge_features = EdgeFeatures {
            end_point: Some(glyphnet_core::model::LayoutPoint { x: 10.0, y: 10.0 }),
            end_slope: Some(1.0),
            graphical_curve: Some(CurveStyle {
                heads: Some(CurveHeads {
                    start: None,
                    end: Some("bar".to_string()),
                }),
                ..Default::default()
            }),
            ..Default::default()
        };
        let network = Network {
            line_endings: vec![bar],
            reactions: vec![Reaction {
                object: GraphicalObject {
                    id: "r1".to_string(),
                    ..Default::default()
                },
                species_references: vec![SpeciesReference {
                    id: "e1".to_string(),
                    features: Some(edge_features),
                    ..Default::default()
                }],
            }],
            ..Default::default()
        };
        let mut recorder = Recorder::default();
        render_network(&network, &mut recorder);
        assert_eq!(recorder.line_ending_placements.len(), 1);
        let placement = recorder.line_ending_placements[0];
        assert_eq!(placement.slope, 0.0);
        // No rotation means no nudge either.
        assert_eq!(placement.offset_x, 10.0);
        assert_eq!(placement.offset_y, 10.0);
    }

    #[test]
    fn ellipse_ratio_locks_the_radii_to_the_box() {
        let features = Features {
            bounding_box: Some(bbox(0.0, 0.0, 40.0, 10.0)),
            graphical_shape: Some(ShapeStyle {
                geometric_shapes: vec![GeometricShape {
                    style: StyleOverride::default(),
                    kind: ShapeKind::Ellipse {
                        cx: Some(RelAbs { abs: 0.0, rel: 50.0 }),
                        cy: Some(RelAbs { abs: 0.0, rel: 50.0 }),
                        rx: None,
                        ry: None,
                        ratio: Some(2.0),
                    },
                }],
                ..Default::default()
            }),
            ..Default::default()
        };
        let network = Network {
            compartments: vec![GraphicalObject {
                id: "c1".to_string(),
                features: Some(features),
                ..Default::default()
            }],
            ..Default::default()
        };
        let mut recorder = Recorder::default();
        render_network(&network, &mut recorder);
        let (ellipse, layer_index) = recorder.ellipses[0];
        assert_eq!(ellipse.cx, 20.0);
        assert_eq!(ellipse.cy, 5.0);
        // width/height = 4 > ratio 2: the height bounds the ellipse.
        assert_eq!(ellipse.ry, 5.0);
        assert_eq!(ellipse.rx, 10.0);
        assert_eq!(layer_index, layer::COMPARTMENT);
    }

    #[test]
    fn texts_need_both_a_string_and_a_box() {
        let network = Network {
            species: vec![Species {
                object: GraphicalObject {
                    id: "g1".to_string(),
                    features: Some(boxed(bbox(0.0, 0.0, 10.0, 10.0))),
                    texts: vec![
                        TextGlyph {
                            id: "t1".to_string(),
                            features: Some(TextFeatures {
                                plain_text: Some("atp_c".to_string()),
                                bounding_box: Some(bbox(0.0, 0.0, 60.0, 36.0)),
                                graphical_text: None,
                            }),
                        },
                        TextGlyph {
                            id: "t2".to_string(),
                            features: Some(TextFeatures {
                                plain_text: Some("orphan".to_string()),
                                bounding_box: None,
                                graphical_text: None,
                            }),
                        },
                    ],
                    ..Default::default()
                },
                compartment: None,
            }],
            ..Default::default()
        };
        let mut recorder = Recorder::default();
        render_network(&network, &mut recorder);
        assert_eq!(recorder.texts.len(), 1);
        assert_eq!(recorder.texts[0], ("atp_c".to_string(), layer::TEXT));
    }
}
