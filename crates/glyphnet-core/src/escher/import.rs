//! Escher map -> canonical layout.
//!
//! One pass builds the compartment and the nodes, a second pass attaches
//! reactions and reconstructs their edges. Escher does not record edge roles
//! and splits multi-input/output reactions through junction nodes, so roles
//! are inferred from segment direction plus the primary-node set, and
//! junction chains are collapsed back onto their owning reaction.
//!
//! Translation is best effort: nothing here fails on malformed content.
//! Every dropped item lands in [`ImportDiagnostics`].

use crate::error::Result;
use crate::escher::{EscherMap, EscherNode, EscherNodeType, EscherReaction, EscherSegment};
use crate::geom::{self, Point};
use crate::model::{
    BoundingBox, CurveSegment, EdgeFeatures, Extents, Features, GraphicalObject, LayoutPoint,
    Network, Reaction, Role, Species, SpeciesReference, TextFeatures, TextGlyph, sanitize_id,
};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

/// Id of the synthetic compartment spanning the canvas.
pub const DEFAULT_COMPARTMENT_ID: &str = "default_compartment";

const TEXT_H_PADDING: f64 = 20.0;
const TEXT_V_PADDING: f64 = -20.0;

/// Result of one import pass.
#[derive(Debug)]
pub struct Import {
    pub network: Network,
    pub diagnostics: ImportDiagnostics,
}

/// Items the best-effort policy dropped instead of reporting as errors.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ImportDiagnostics {
    pub skipped: Vec<Skipped>,
}

impl ImportDiagnostics {
    pub fn is_empty(&self) -> bool {
        self.skipped.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Skipped {
    /// Reaction or map area the item belongs to.
    pub context: String,
    /// Node key or segment key.
    pub item: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    UnresolvedEndpoint,
    SelfLoop,
    NoReactionSide,
    UnknownNodeType,
    MissingReaction,
}

/// Parses and imports Escher JSON text.
pub fn import_json_str(text: &str) -> Result<Import> {
    Ok(import_map(&EscherMap::from_json_str(text)?))
}

/// Imports a parsed Escher map. Infallible; see [`ImportDiagnostics`].
pub fn import_map(map: &EscherMap) -> Import {
    let mut pass = ImportPass::default();
    pass.extract_extents(map);
    pass.extract_nodes(map);
    pass.extract_reactions(map);
    pass.into_import()
}

#[derive(Default)]
struct ImportPass {
    extents: Extents,
    species: IndexMap<String, Species>,
    reactions: IndexMap<String, Reaction>,
    /// Metabolite nodes flagged primary; drives role inference.
    primary: FxHashSet<String>,
    /// Junction id -> owning reaction id, bound by the first reaction that
    /// references the junction.
    junctions: FxHashMap<String, Option<String>>,
    diagnostics: ImportDiagnostics,
}

impl ImportPass {
    fn extract_extents(&mut self, map: &EscherMap) {
        let canvas = map.body().canvas;
        self.extents = Extents {
            min_x: canvas.x,
            min_y: canvas.y,
            max_x: canvas.x + canvas.width,
            max_y: canvas.y + canvas.height,
        };
    }

    fn extract_nodes(&mut self, map: &EscherMap) {
        for (key, node) in &map.body().nodes {
            match &node.node_type {
                Some(EscherNodeType::Metabolite) => self.add_metabolite(key, node),
                Some(EscherNodeType::Midmarker) => self.add_midmarker(key, node),
                Some(EscherNodeType::Multimarker) => {
                    self.junctions.insert(sanitize_id(key), None);
                }
                Some(EscherNodeType::Other(_)) | None => {
                    self.skip("nodes", key, SkipReason::UnknownNodeType);
                }
            }
        }
    }

    fn add_metabolite(&mut self, key: &str, node: &EscherNode) {
        let id = sanitize_id(key);
        let primary = node.node_is_primary == Some(true);
        let default_size = geom::metabolite_size(primary);
        let width = node.width.unwrap_or(default_size.width);
        let height = node.height.unwrap_or(default_size.height);
        let (cx, cy) = (node.x.unwrap_or_default(), node.y.unwrap_or_default());
        let bounding_box = BoundingBox {
            x: cx - 0.5 * width,
            y: cy - 0.5 * height,
            width,
            height,
        };
        let texts = match &node.bigg_id {
            Some(bigg_id) => vec![label_glyph(
                &id,
                bigg_id,
                node.label_x.unwrap_or(cx + TEXT_H_PADDING),
                node.label_y.unwrap_or(cy + TEXT_V_PADDING),
                geom::size(width, height),
            )],
            None => Vec::new(),
        };
        if primary {
            self.primary.insert(id.clone());
        }
        self.species.insert(
            id.clone(),
            Species {
                object: GraphicalObject {
                    id,
                    reference_id: node.bigg_id.as_deref().map(sanitize_id),
                    features: Some(boxed(bounding_box)),
                    texts,
                },
                compartment: Some(DEFAULT_COMPARTMENT_ID.to_string()),
            },
        );
    }

    fn add_midmarker(&mut self, key: &str, node: &EscherNode) {
        let id = sanitize_id(key);
        let width = node.width.unwrap_or(geom::MARKER_SIZE.width);
        let height = node.height.unwrap_or(geom::MARKER_SIZE.height);
        let bounding_box = BoundingBox {
            x: node.x.unwrap_or_default() - 0.5 * width,
            y: node.y.unwrap_or_default() - 0.5 * height,
            width,
            height,
        };
        self.reactions.insert(
            id.clone(),
            Reaction {
                object: GraphicalObject {
                    id,
                    reference_id: None,
                    features: Some(boxed(bounding_box)),
                    texts: Vec::new(),
                },
                species_references: Vec::new(),
            },
        );
    }

    fn extract_reactions(&mut self, map: &EscherMap) {
        for (key, entry) in &map.body().reactions {
            let Some(reaction_id) = self.find_reaction_id(key, entry) else {
                self.skip("reactions", key, SkipReason::MissingReaction);
                continue;
            };

            // Bind every junction this reaction touches before resolving any
            // endpoint; first reaction observed wins.
            for segment in entry.segments.values() {
                for endpoint in [&segment.from_node_id, &segment.to_node_id] {
                    if let Some(owner) = self.junctions.get_mut(&sanitize_id(endpoint)) {
                        if owner.is_none() {
                            *owner = Some(reaction_id.clone());
                        }
                    }
                }
            }

            if let Some(reaction) = self.reactions.get_mut(&reaction_id) {
                reaction.object.reference_id = entry.bigg_id.as_deref().map(sanitize_id);
                if let Some(bigg_id) = &entry.bigg_id {
                    let center = reaction
                        .object
                        .features
                        .as_ref()
                        .map(geom::features_center)
                        .unwrap_or_else(|| geom::point(0.0, 0.0));
                    reaction.object.texts = vec![label_glyph(
                        &reaction_id,
                        bigg_id,
                        entry.label_x.unwrap_or(center.x + TEXT_H_PADDING),
                        entry.label_y.unwrap_or(center.y + TEXT_V_PADDING),
                        geom::marker_label_size(),
                    )];
                }
            }

            let mut edges = Vec::new();
            for (segment_key, segment) in &entry.segments {
                if let Some(edge) = self.build_edge(key, &reaction_id, segment_key, segment) {
                    edges.push(edge);
                }
            }
            if let Some(reaction) = self.reactions.get_mut(&reaction_id) {
                reaction.species_references.extend(edges);
            }
        }
    }

    /// Locates the reaction record for one Escher reaction entry: direct id
    /// match first, then any segment endpoint naming a known reaction.
    fn find_reaction_id(&self, key: &str, entry: &EscherReaction) -> Option<String> {
        let direct = sanitize_id(key);
        if self.reactions.contains_key(&direct) {
            return Some(direct);
        }
        for segment in entry.segments.values() {
            for endpoint in [&segment.from_node_id, &segment.to_node_id] {
                let id = sanitize_id(endpoint);
                if self.reactions.contains_key(&id) {
                    return Some(id);
                }
            }
        }
        None
    }

    /// Resolves a segment endpoint to a species or reaction node id,
    /// following junction owners. Bounded by the junction count; an unbound
    /// junction resolves to nothing.
    fn resolve_endpoint(&self, raw: &str) -> Option<String> {
        let mut id = sanitize_id(raw);
        let mut hops = 0usize;
        loop {
            if self.species.contains_key(&id) || self.reactions.contains_key(&id) {
                return Some(id);
            }
            match self.junctions.get(&id) {
                Some(Some(owner)) if hops < self.junctions.len().max(1) => {
                    id = owner.clone();
                    hops += 1;
                }
                _ => return None,
            }
        }
    }

    fn build_edge(
        &mut self,
        context: &str,
        reaction_id: &str,
        segment_key: &str,
        segment: &EscherSegment,
    ) -> Option<SpeciesReference> {
        let Some(from) = self.resolve_endpoint(&segment.from_node_id) else {
            self.skip(context, segment_key, SkipReason::UnresolvedEndpoint);
            return None;
        };
        let Some(to) = self.resolve_endpoint(&segment.to_node_id) else {
            self.skip(context, segment_key, SkipReason::UnresolvedEndpoint);
            return None;
        };
        if from == to {
            self.skip(context, segment_key, SkipReason::SelfLoop);
            return None;
        }
        let (species_side, reaction_first) = if from == reaction_id {
            (to.clone(), true)
        } else if to == reaction_id {
            (from.clone(), false)
        } else {
            self.skip(context, segment_key, SkipReason::NoReactionSide);
            return None;
        };

        let primary = self.primary.contains(&species_side);
        let role = match (reaction_first, primary) {
            (true, true) => Role::Product,
            (true, false) => Role::SideProduct,
            (false, true) => Role::Substrate,
            (false, false) => Role::Modifier,
        };

        let from_center = self.node_center(&from);
        let to_center = self.node_center(&to);
        let geometry = segment_geometry(
            from_center,
            to_center,
            segment,
            self.stand_off(&from, &species_side, &role),
            self.stand_off(&to, &species_side, &role),
        );

        let segment_id = sanitize_id(segment_key);
        Some(SpeciesReference {
            id: format!("{reaction_id}_{segment_id}"),
            reference_id: Some(segment_id),
            role,
            species: self
                .species
                .get(&species_side)
                .and_then(|s| s.object.reference_id.clone()),
            reaction: self
                .reactions
                .get(reaction_id)
                .and_then(|r| r.object.reference_id.clone()),
            species_glyph_id: Some(species_side),
            reaction_glyph_id: Some(reaction_id.to_string()),
            features: Some(geometry),
        })
    }

    /// Stand-off radius at one segment end: the species' default radius when
    /// the species sits at that end, twice the marker radius at the reaction
    /// end of a modifier edge, zero otherwise.
    fn stand_off(&self, end_node: &str, species_side: &str, role: &Role) -> f64 {
        if end_node == species_side {
            if self.species.contains_key(end_node) {
                let primary = self.primary.contains(end_node);
                return geom::radius(geom::metabolite_size(primary));
            }
            return 0.0;
        }
        if *role == Role::Modifier {
            return 2.0 * geom::radius(geom::MARKER_SIZE);
        }
        0.0
    }

    fn node_center(&self, id: &str) -> Point {
        let features = self
            .species
            .get(id)
            .map(|s| &s.object)
            .or_else(|| self.reactions.get(id).map(|r| &r.object))
            .and_then(|object| object.features.as_ref());
        match features {
            Some(features) => geom::features_center(features),
            None => geom::point(0.0, 0.0),
        }
    }

    fn skip(&mut self, context: &str, item: &str, reason: SkipReason) {
        tracing::debug!(context, item, ?reason, "dropping escher item");
        self.diagnostics.skipped.push(Skipped {
            context: context.to_string(),
            item: item.to_string(),
            reason,
        });
    }

    fn into_import(self) -> Import {
        let compartment = default_compartment(&self.extents);
        let network = Network {
            compartments: vec![compartment],
            species: self.species.into_values().collect(),
            reactions: self.reactions.into_values().collect(),
            extents: self.extents,
            ..Default::default()
        };
        Import {
            network,
            diagnostics: self.diagnostics,
        }
    }
}

fn boxed(bounding_box: BoundingBox) -> Features {
    Features {
        bounding_box: Some(bounding_box),
        ..Default::default()
    }
}

/// Label glyph reconstructed from a stored label anchor. The anchor is the
/// text center shifted by the fixed padding, so the box is the anchor minus
/// half the box minus the padding (the exact inverse of the export offset).
fn label_glyph(
    owner_id: &str,
    text: &str,
    label_x: f64,
    label_y: f64,
    box_size: geom::Size,
) -> TextGlyph {
    TextGlyph {
        id: format!("{owner_id}_text_glyph"),
        features: Some(TextFeatures {
            plain_text: Some(text.to_string()),
            bounding_box: Some(BoundingBox {
                x: label_x - 0.5 * box_size.width - TEXT_H_PADDING,
                y: label_y - 0.5 * box_size.height - TEXT_V_PADDING,
                width: box_size.width,
                height: box_size.height,
            }),
            graphical_text: None,
        }),
    }
}

fn default_compartment(extents: &Extents) -> GraphicalObject {
    let bounding_box = BoundingBox {
        x: extents.min_x,
        y: extents.min_y,
        width: extents.max_x - extents.min_x,
        height: extents.max_y - extents.min_y,
    };
    GraphicalObject {
        id: DEFAULT_COMPARTMENT_ID.to_string(),
        reference_id: Some(DEFAULT_COMPARTMENT_ID.to_string()),
        features: Some(boxed(bounding_box)),
        texts: vec![TextGlyph {
            id: format!("{DEFAULT_COMPARTMENT_ID}_text_glyph"),
            features: Some(TextFeatures {
                plain_text: Some(DEFAULT_COMPARTMENT_ID.to_string()),
                bounding_box: Some(bounding_box),
                graphical_text: None,
            }),
        }],
    }
}

/// Reconstructs the Bezier geometry of one edge.
///
/// Missing base points fall back to the opposite end's boundary point when
/// that end resolves first, else to the opposite center; the boundary point
/// at each end is the center pushed outward along the end slope by the
/// stand-off radius.
fn segment_geometry(
    from_center: Point,
    to_center: Point,
    segment: &EscherSegment,
    from_radius: f64,
    to_radius: f64,
) -> EdgeFeatures {
    let b1 = segment.b1.map(|p| geom::point(p.x, p.y));
    let b2 = segment.b2.map(|p| geom::point(p.x, p.y));

    let (b1, b2, start, end, start_slope, end_slope) = match (b1, b2) {
        (Some(b1), Some(b2)) => {
            let (start_slope, start) = anchor(from_center, b1, from_radius);
            let (end_slope, end) = anchor(to_center, b2, to_radius);
            (b1, b2, start, end, start_slope, end_slope)
        }
        (Some(b1), None) => {
            let (start_slope, start) = anchor(from_center, b1, from_radius);
            let (end_slope, end) = anchor(to_center, start, to_radius);
            (b1, start, start, end, start_slope, end_slope)
        }
        (None, Some(b2)) => {
            let (end_slope, end) = anchor(to_center, b2, to_radius);
            let (start_slope, start) = anchor(from_center, end, from_radius);
            (end, b2, start, end, start_slope, end_slope)
        }
        (None, None) => {
            let (start_slope, start) = anchor(from_center, to_center, from_radius);
            let (end_slope, end) = anchor(to_center, from_center, to_radius);
            (to_center, from_center, start, end, start_slope, end_slope)
        }
    };

    EdgeFeatures {
        start_point: Some(LayoutPoint {
            x: start.x,
            y: start.y,
        }),
        end_point: Some(LayoutPoint { x: end.x, y: end.y }),
        start_slope: Some(start_slope),
        end_slope: Some(end_slope),
        curve: Some(vec![CurveSegment {
            start_x: start.x,
            start_y: start.y,
            end_x: end.x,
            end_y: end.y,
            base_point1_x: Some(b1.x),
            base_point1_y: Some(b1.y),
            base_point2_x: Some(b2.x),
            base_point2_y: Some(b2.y),
        }]),
        graphical_curve: None,
    }
}

/// Slope from the base point toward the center, and the boundary point at
/// `radius` back along that slope.
fn anchor(center: Point, base: Point, radius: f64) -> (f64, Point) {
    let slope = geom::slope(base, center);
    let point = geom::point(
        center.x - radius * slope.cos(),
        center.y - radius * slope.sin(),
    );
    (slope, point)
}
