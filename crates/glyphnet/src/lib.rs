#![forbid(unsafe_code)]

//! `glyphnet` translates between a canonical reaction-network layout model
//! and the Escher map exchange format.
//!
//! Escher does not record edge roles and splits multi-input/output reactions
//! through synthetic junction nodes, so the import side infers roles from
//! connectivity and the primary-node set, and the export side synthesizes the
//! junctions back. Both directions are best effort: malformed content is
//! dropped and surfaced through diagnostics, never raised.
//!
//! # Features
//!
//! - `render`: enable the drawing-backend boundary (`glyphnet::render`) with
//!   the built-in SVG backend

pub use glyphnet_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use glyphnet_render::scene::{
        DrawBackend, EllipseSpec, Placement, RectSpec, Scene, TextSpec, layer, render_network,
    };
    pub use glyphnet_render::style::{Fill, Font, HAnchor, Stroke, VAnchor};
    pub use glyphnet_render::svg::SvgBackend;
    pub use glyphnet_render::render_svg;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facade_round_trips_a_minimal_map() {
        let text = r#"[
            {"map_name": "m", "map_id": "", "map_description": "", "homepage": ""},
            {"canvas": {"x": 0.0, "y": 0.0, "width": 100.0, "height": 100.0},
             "nodes": {"g1": {"bigg_id": "atp_c", "node_is_primary": true,
                              "node_type": "metabolite", "x": 50.0, "y": 50.0}},
             "reactions": {}, "text_labels": []}
        ]"#;
        let import = import_json_str(text).unwrap();
        assert_eq!(import.network.species.len(), 1);
        let map = EscherExporter::export_network(&import.network);
        assert_eq!(map.body().nodes["g1"].bigg_id.as_deref(), Some("atp_c"));
    }
}
