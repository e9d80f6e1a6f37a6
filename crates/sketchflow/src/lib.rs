#![forbid(unsafe_code)]

//! `sketchflow` turns declarative flow/sequence diagram definitions into
//! self-contained, deterministic SVG (and optionally PNG) documents.
//!
//! The single entry point is [`generate`]: validate a raw JSON value,
//! compute the layout, render. Equal inputs yield byte-identical SVG.
//!
//! # Features
//!
//! - `raster` (default): enable PNG output via pure-Rust SVG rasterization

#[cfg(feature = "raster")]
pub mod raster;

pub use sketchflow_core::{
    parse, ArrowDirection, DiagramDef, EdgeDef, EdgeStyle, FlowDiagramDef, FlowDirection,
    GroupDef, MessageDef, NodeDef, NodeShape, ParticipantDef, SequenceDiagramDef, Theme,
};
pub use sketchflow_render::{layout_diagram, DiagramLayout};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] sketchflow_core::Error),
    #[error(transparent)]
    Render(#[from] sketchflow_render::Error),
    #[cfg(feature = "raster")]
    #[error(transparent)]
    Png(#[from] raster::PngError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy)]
pub struct GenerateOptions {
    /// Also rasterise the SVG to PNG.
    pub png: bool,
    /// Raster scale factor; only meaningful together with `png`.
    pub scale: f32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            png: false,
            scale: 2.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Generated {
    pub svg: String,
    pub png: Option<Vec<u8>>,
}

/// Validates `input` against the diagram schema and renders it.
pub fn generate_sync(input: &serde_json::Value, options: &GenerateOptions) -> Result<Generated> {
    let diagram = sketchflow_core::parse(input)?;
    generate_diagram_sync(&diagram, options)
}

/// Renders an already-validated definition (skips the schema step).
pub fn generate_diagram_sync(diagram: &DiagramDef, options: &GenerateOptions) -> Result<Generated> {
    let svg = sketchflow_render::render_svg(diagram)?;

    #[cfg(feature = "raster")]
    let png = if options.png {
        Some(raster::svg_to_png(&svg, options.scale)?)
    } else {
        None
    };
    #[cfg(not(feature = "raster"))]
    let png = {
        if options.png {
            return Err(Error::Render(sketchflow_render::Error::Render {
                message: "PNG output requires the `raster` feature".to_string(),
            }));
        }
        None
    };

    Ok(Generated { svg, png })
}

/// Renders the SVG document alone.
pub fn render_svg(diagram: &DiagramDef) -> Result<String> {
    Ok(sketchflow_render::render_svg(diagram)?)
}

pub async fn generate(input: &serde_json::Value, options: &GenerateOptions) -> Result<Generated> {
    // This async API is runtime-agnostic: generation is CPU-bound and does
    // not perform I/O. It executes synchronously and does not yield.
    generate_sync(input, options)
}

pub async fn generate_diagram(
    diagram: &DiagramDef,
    options: &GenerateOptions,
) -> Result<Generated> {
    // Runtime-agnostic, see `generate`.
    generate_diagram_sync(diagram, options)
}

pub async fn render_svg_async(diagram: &DiagramDef) -> Result<String> {
    // Runtime-agnostic, see `generate`.
    render_svg(diagram)
}
