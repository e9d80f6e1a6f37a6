#![forbid(unsafe_code)]

//! Layout and SVG rendering for sketchflow diagrams.
//!
//! The pipeline is `DiagramDef -> DiagramLayout -> SVG string`:
//! [`layout_diagram`] positions nodes/edges/groups (flow diagrams go through
//! the `wapiti` layered layout service, sequence diagrams are pure
//! arithmetic), and [`render_svg`] draws the result in one of three themes.
//!
//! Rendering is deterministic: the sketchy geometry draws from a seeded RNG
//! that is re-seeded at the start of every render, so equal inputs produce
//! byte-identical SVG.

pub mod flow;
pub mod model;
pub mod rng;
pub mod sequence;
pub mod svg;
pub mod text;
pub mod theme;

use sketchflow_core::DiagramDef;

use crate::model::{LayoutResult, SequenceLayoutResult};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("layout failed: {message}")]
    Layout { message: String },
    /// Reserved: the built-in renderers have no failing paths.
    #[error("render failed: {message}")]
    Render { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone)]
pub enum DiagramLayout {
    Flow(LayoutResult),
    Sequence(SequenceLayoutResult),
}

pub fn layout_diagram(def: &DiagramDef) -> Result<DiagramLayout> {
    match def {
        DiagramDef::Flow(flow) => Ok(DiagramLayout::Flow(flow::layout_flow(flow)?)),
        DiagramDef::Sequence(seq) => {
            Ok(DiagramLayout::Sequence(sequence::layout_sequence(seq)?))
        }
    }
}

pub fn render_svg(def: &DiagramDef) -> Result<String> {
    match layout_diagram(def)? {
        DiagramLayout::Flow(layout) => {
            let DiagramDef::Flow(flow) = def else {
                unreachable!("flow layout from flow definition");
            };
            Ok(svg::render_flow_svg(&layout, flow))
        }
        DiagramLayout::Sequence(layout) => {
            let DiagramDef::Sequence(seq) = def else {
                unreachable!("sequence layout from sequence definition");
            };
            Ok(svg::render_sequence_svg(&layout, seq))
        }
    }
}
