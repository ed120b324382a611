//! Canonical network-layout model.
//!
//! These records are the exchange shape with the upstream layout engine:
//! compartments, species, reactions, connecting edges, text labels, and the
//! overall extents. Field names on the wire are the original camelCase ones
//! (`referenceId`, `boundingBox`, `basePoint1X`, ...).

use serde::{Deserialize, Serialize};

/// One canonical document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub compartments: Vec<Compartment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub species: Vec<Species>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reactions: Vec<Reaction>,
    /// Named line-ending glyphs referenced by edge curve heads.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line_endings: Vec<LineEnding>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_graphical_objects: Vec<GraphicalObject>,
    #[serde(default)]
    pub extents: Extents,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extents {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// Base record shared by compartments, species, reactions, and extra objects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphicalObject {
    pub id: String,
    /// Link to the underlying biological entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Features>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub texts: Vec<TextGlyph>,
}

impl GraphicalObject {
    /// A record takes part in translation only when it carries both an id and
    /// a reference id.
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty() && self.reference_id.is_some()
    }
}

pub type Compartment = GraphicalObject;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Species {
    #[serde(flatten)]
    pub object: GraphicalObject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compartment: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    #[serde(flatten)]
    pub object: GraphicalObject,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub species_references: Vec<SpeciesReference>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Features {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<Vec<CurveSegment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphical_shape: Option<ShapeStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphical_curve: Option<CurveStyle>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One cubic segment of a connecting curve. Base points may be absent per
/// axis; consumers fall back to the segment's own endpoints.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveSegment {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_point1_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_point1_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_point2_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_point2_y: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextGlyph {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<TextFeatures>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFeatures {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphical_text: Option<TextStyle>,
}

/// Connecting edge between a species glyph and a reaction glyph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesReference {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    #[serde(default)]
    pub role: Role,
    /// Reference id of the species taking part in the reaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    /// Reference id of the owning reaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species_glyph_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction_glyph_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<EdgeFeatures>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeFeatures {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_point: Option<LayoutPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_point: Option<LayoutPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_slope: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_slope: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<Vec<CurveSegment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphical_curve: Option<CurveStyle>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

/// Role of an edge. The four metabolite roles take part in the mass flow;
/// everything else (modifiers, activators, ...) renders as a regulator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Substrate,
    Reactant,
    Product,
    SideProduct,
    #[default]
    Modifier,
    Other(String),
}

impl Role {
    pub fn is_consumed(&self) -> bool {
        matches!(self, Role::Substrate | Role::Reactant)
    }

    pub fn is_produced(&self) -> bool {
        matches!(self, Role::Product | Role::SideProduct)
    }

    /// True for the roles exported as Escher metabolites.
    pub fn is_metabolite(&self) -> bool {
        self.is_consumed() || self.is_produced()
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "substrate" => Role::Substrate,
            "reactant" => Role::Reactant,
            "product" => Role::Product,
            "sideproduct" => Role::SideProduct,
            "modifier" => Role::Modifier,
            _ => Role::Other(value),
        }
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        match value {
            Role::Substrate => "substrate".to_string(),
            Role::Reactant => "reactant".to_string(),
            Role::Product => "product".to_string(),
            Role::SideProduct => "sideproduct".to_string(),
            Role::Modifier => "modifier".to_string(),
            Role::Other(raw) => raw,
        }
    }
}

/// Shape style attached to a graphical object, optionally refined per
/// geometric shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_dash_array: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub geometric_shapes: Vec<GeometricShape>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_dash_array: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heads: Option<CurveHeads>,
}

/// Names of the line endings drawn at the two ends of an edge curve.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveHeads {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h_text_anchor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v_text_anchor: Option<String>,
}

/// A coordinate with an absolute part plus a part relative to the owner box
/// (percent).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RelAbs {
    #[serde(default)]
    pub abs: f64,
    #[serde(default)]
    pub rel: f64,
}

impl RelAbs {
    /// Resolves against a box span: absolute part plus `rel` percent of the
    /// span.
    pub fn resolve(&self, span: f64) -> f64 {
        self.abs + 0.01 * self.rel * span
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometricShape {
    #[serde(flatten)]
    pub style: StyleOverride,
    #[serde(flatten)]
    pub kind: ShapeKind,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_dash_array: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "camelCase")]
pub enum ShapeKind {
    #[serde(rename_all = "camelCase")]
    Rectangle {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        x: Option<RelAbs>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        y: Option<RelAbs>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<RelAbs>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<RelAbs>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rx: Option<RelAbs>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ry: Option<RelAbs>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ratio: Option<f64>,
    },
    #[serde(rename_all = "camelCase")]
    Ellipse {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cx: Option<RelAbs>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cy: Option<RelAbs>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rx: Option<RelAbs>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ry: Option<RelAbs>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ratio: Option<f64>,
    },
    #[serde(rename_all = "camelCase")]
    Polygon {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        vertices: Vec<PolygonVertex>,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        href: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        x: Option<RelAbs>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        y: Option<RelAbs>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<RelAbs>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<RelAbs>,
    },
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonVertex {
    pub render_point_x: RelAbs,
    pub render_point_y: RelAbs,
}

/// Named glyph drawn at an edge endpoint (arrow heads, inhibition bars, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineEnding {
    pub id: String,
    /// When false, the glyph is drawn unrotated regardless of the edge slope.
    #[serde(default = "default_true")]
    pub enable_rotation: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Features>,
}

fn default_true() -> bool {
    true
}

/// Prefixes identifiers that would be invalid in the canonical model.
/// Identifiers must not start with a digit.
pub fn sanitize_id(raw: &str) -> String {
    if raw.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        format!("_{raw}")
    } else {
        raw.to_string()
    }
}
