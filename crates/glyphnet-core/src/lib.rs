#![forbid(unsafe_code)]

//! Canonical reaction-network layout model + Escher map translator (headless).
//!
//! Design goals:
//! - structurally correct, geometrically consistent translation in both
//!   directions over one identifier space
//! - best-effort imports: malformed content is dropped and surfaced through
//!   diagnostics, never raised
//! - deterministic, testable outputs

pub mod error;
pub mod escher;
pub mod geom;
pub mod model;

pub use error::{Error, Result};
pub use escher::export::EscherExporter;
pub use escher::import::{
    DEFAULT_COMPARTMENT_ID, Import, ImportDiagnostics, SkipReason, Skipped, import_json_str,
    import_map,
};
pub use escher::{EscherMap, MapBody, MapMetadata, valid_output_name};
pub use model::Network;
