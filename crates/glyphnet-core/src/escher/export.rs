//! Canonical layout -> Escher map.
//!
//! Records are fed one at a time (`add_species`, `add_reaction`); `finish`
//! resolves primary flags and assembles the map. State is scoped to one
//! exporter instance and never survives `finish`.

use crate::escher::{
    Canvas, EscherGene, EscherMap, EscherMetabolite, EscherNode, EscherNodeType, EscherPoint,
    EscherReaction, EscherSegment, MapBody, MapMetadata,
};
use crate::geom;
use crate::model::{
    EdgeFeatures, Extents, Features, Network, Reaction, Species, SpeciesReference, TextGlyph,
};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;

/// Fixed margin added around the extents when deriving the canvas.
const CANVAS_MARGIN: f64 = 75.0;

/// Fixed label offset from a text glyph's center.
const TEXT_H_PADDING: f64 = 20.0;
const TEXT_V_PADDING: f64 = -20.0;

#[derive(Debug, Default)]
pub struct EscherExporter {
    nodes: IndexMap<String, EscherNode>,
    reactions: IndexMap<String, EscherReaction>,
    /// Species glyphs seen as a modifier anywhere; demoted in `finish`.
    demoted: FxHashSet<String>,
    extra_texts: Vec<serde_json::Value>,
}

impl EscherExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translates one whole network.
    pub fn export_network(network: &Network) -> EscherMap {
        let mut exporter = Self::new();
        for species in &network.species {
            exporter.add_species(species);
        }
        for reaction in &network.reactions {
            exporter.add_reaction(reaction);
        }
        exporter.finish(&network.extents)
    }

    /// No-op unless the record carries both an id and a reference id.
    pub fn add_species(&mut self, species: &Species) {
        let object = &species.object;
        if !object.is_valid() {
            return;
        }
        let mut node = EscherNode {
            bigg_id: object.reference_id.clone(),
            node_is_primary: Some(true),
            node_type: Some(EscherNodeType::Metabolite),
            ..Default::default()
        };
        apply_node_features(&mut node, object.features.as_ref(), object.texts.first());
        self.nodes.insert(object.id.clone(), node);
    }

    /// Adds the reaction's marker nodes and its reaction record.
    ///
    /// Modifier edges are noted for demotion even when the record itself is
    /// rejected as invalid.
    pub fn add_reaction(&mut self, reaction: &Reaction) {
        for edge in &reaction.species_references {
            if !edge.role.is_metabolite() {
                if let Some(glyph) = &edge.species_glyph_id {
                    self.demoted.insert(glyph.clone());
                }
            }
        }

        let object = &reaction.object;
        if !object.is_valid() {
            return;
        }

        let center = object.features.as_ref().map(geom::features_center);
        self.nodes
            .insert(object.id.clone(), marker_node(EscherNodeType::Midmarker, center));

        let edges = &reaction.species_references;
        let inputs = edges.iter().filter(|e| !e.role.is_produced()).count();
        let outputs = edges.iter().filter(|e| e.role.is_produced()).count();
        if inputs > 1 {
            self.nodes.insert(
                format!("{}.start", object.id),
                marker_node(EscherNodeType::Multimarker, center),
            );
        }
        if outputs > 1 {
            self.nodes.insert(
                format!("{}.end", object.id),
                marker_node(EscherNodeType::Multimarker, center),
            );
        }

        let mut record = EscherReaction {
            bigg_id: object.reference_id.clone(),
            // Not carried by the canonical model; not inferred.
            reversibility: false,
            metabolites: metabolites(edges),
            genes: self.genes(edges),
            segments: segments(edges),
            ..Default::default()
        };
        if let Some(text) = object.texts.first() {
            apply_label(
                &mut record.name,
                &mut record.label_x,
                &mut record.label_y,
                text,
            );
        }
        self.reactions.insert(object.id.clone(), record);
    }

    /// Applies the modifier demotions and assembles the `[metadata, body]`
    /// map. The canvas is the extents padded by a fixed margin.
    pub fn finish(mut self, extents: &Extents) -> EscherMap {
        for id in &self.demoted {
            if let Some(node) = self.nodes.get_mut(id) {
                node.node_is_primary = Some(false);
            }
        }
        let canvas = Canvas {
            x: extents.min_x - CANVAS_MARGIN,
            y: extents.min_y - CANVAS_MARGIN,
            width: extents.max_x - extents.min_x + 2.0 * CANVAS_MARGIN,
            height: extents.max_y - extents.min_y + 2.0 * CANVAS_MARGIN,
        };
        EscherMap(
            MapMetadata::default(),
            MapBody {
                canvas,
                nodes: self.nodes,
                reactions: self.reactions,
                text_labels: self.extra_texts,
            },
        )
    }

    /// Resolves a gene name against the nodes created so far. A species added
    /// later never fills the name retroactively.
    fn find_node_name(&self, bigg_id: &str) -> String {
        for node in self.nodes.values() {
            if node.bigg_id.as_deref() == Some(bigg_id) {
                if let Some(name) = &node.name {
                    return name.clone();
                }
            }
        }
        String::new()
    }

    fn genes(&self, edges: &[SpeciesReference]) -> Vec<EscherGene> {
        edges
            .iter()
            .filter(|edge| !edge.role.is_metabolite())
            .filter_map(|edge| {
                let species = edge.species.as_ref()?;
                Some(EscherGene {
                    bigg_id: species.clone(),
                    name: self.find_node_name(species),
                })
            })
            .collect()
    }
}

fn marker_node(node_type: EscherNodeType, center: Option<geom::Point>) -> EscherNode {
    EscherNode {
        node_type: Some(node_type),
        x: center.map(|c| c.x),
        y: center.map(|c| c.y),
        ..Default::default()
    }
}

fn apply_node_features(
    node: &mut EscherNode,
    features: Option<&Features>,
    text: Option<&TextGlyph>,
) {
    if let Some(features) = features {
        let center = geom::features_center(features);
        node.x = Some(center.x);
        node.y = Some(center.y);
    }
    if let Some(text) = text {
        apply_label(&mut node.name, &mut node.label_x, &mut node.label_y, text);
    }
}

fn apply_label(
    name: &mut Option<String>,
    label_x: &mut Option<f64>,
    label_y: &mut Option<f64>,
    text: &TextGlyph,
) {
    let Some(features) = &text.features else {
        return;
    };
    let center = geom::text_features_center(features);
    *name = features.plain_text.clone();
    *label_x = Some(center.x + TEXT_H_PADDING);
    *label_y = Some(center.y + TEXT_V_PADDING);
}

fn metabolites(edges: &[SpeciesReference]) -> Vec<EscherMetabolite> {
    edges
        .iter()
        .filter(|edge| edge.role.is_metabolite())
        .filter_map(|edge| {
            let species = edge.species.as_ref()?;
            Some(EscherMetabolite {
                bigg_id: species.clone(),
                coefficient: if edge.role.is_consumed() { -1.0 } else { 1.0 },
            })
        })
        .collect()
}

fn segments(edges: &[SpeciesReference]) -> IndexMap<String, EscherSegment> {
    let mut out = IndexMap::new();
    for edge in edges {
        let Some(segment_id) = &edge.reference_id else {
            continue;
        };
        let species_glyph = edge.species_glyph_id.clone().unwrap_or_default();
        let reaction_glyph = edge.reaction_glyph_id.clone().unwrap_or_default();
        // Product-ward edges point reaction -> species; everything else
        // species -> reaction.
        let (from_node_id, to_node_id) = if edge.role.is_produced() {
            (reaction_glyph, species_glyph)
        } else {
            (species_glyph, reaction_glyph)
        };
        out.insert(
            segment_id.clone(),
            EscherSegment {
                from_node_id,
                to_node_id,
                b1: Some(segment_b1(edge.features.as_ref())),
                b2: Some(segment_b2(edge.features.as_ref())),
            },
        );
    }
    out
}

/// First control point: the first curve segment's base point 1, falling back
/// per axis to the segment's own start.
fn segment_b1(features: Option<&EdgeFeatures>) -> EscherPoint {
    let Some(first) = features
        .and_then(|f| f.curve.as_ref())
        .and_then(|curve| curve.first())
    else {
        return EscherPoint::default();
    };
    EscherPoint {
        x: first.base_point1_x.unwrap_or(first.start_x),
        y: first.base_point1_y.unwrap_or(first.start_y),
    }
}

/// Second control point: the last curve segment's base point 2, falling back
/// per axis to the segment's own end.
fn segment_b2(features: Option<&EdgeFeatures>) -> EscherPoint {
    let Some(last) = features
        .and_then(|f| f.curve.as_ref())
        .and_then(|curve| curve.last())
    else {
        return EscherPoint::default();
    };
    EscherPoint {
        x: last.base_point2_x.unwrap_or(last.end_x),
        y: last.base_point2_y.unwrap_or(last.end_y),
    }
}
