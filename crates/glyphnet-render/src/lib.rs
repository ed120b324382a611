#![forbid(unsafe_code)]

//! Drawing-backend boundary for the canonical network model.
//!
//! The scene walker resolves style cascades and curve/line-ending geometry;
//! backends implement the primitive hooks in [`scene::DrawBackend`]. Walking
//! a scene never fails: records missing geometry are simply not drawn.

pub mod scene;
pub mod style;
pub mod svg;

pub use scene::{
    DrawBackend, EllipseSpec, Placement, RectSpec, Scene, TextSpec, layer, render_network,
};
pub use style::{Fill, Font, HAnchor, Stroke, VAnchor};
pub use svg::SvgBackend;

use glyphnet_core::model::Network;

/// Renders a network to a standalone SVG document with the built-in backend.
pub fn render_svg(network: &Network) -> String {
    let mut backend = SvgBackend::new();
    render_network(network, &mut backend);
    backend.finish(&network.extents)
}
