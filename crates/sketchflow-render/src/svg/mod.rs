//! SVG document assembly and shared emission helpers.
//!
//! The renderers append elements to a plain `String`; this module wraps the
//! body in the document frame (root `<svg>`, white background, optional
//! title banner). Coordinates are always written with one decimal place to
//! keep diffs quiet and output byte-stable.

mod edges;
mod groups;
mod sequence;
mod shapes;
mod sketch;

use std::fmt::Write as _;

use sketchflow_core::{FlowDiagramDef, SequenceDiagramDef};

use crate::model::{LayoutResult, SequenceLayoutResult};
use crate::rng::SketchRng;
use crate::theme::ThemeConfig;

/// Vertical room reserved for the title banner.
const TITLE_OFFSET: f64 = 40.0;

pub fn render_flow_svg(layout: &LayoutResult, def: &FlowDiagramDef) -> String {
    let theme = ThemeConfig::of(def.style);
    let mut rng = SketchRng::new();

    let mut body = String::new();
    for group in &layout.groups {
        groups::render_group(&mut body, group, theme, &mut rng);
    }
    for (index, node) in layout.nodes.iter().enumerate() {
        shapes::render_node(&mut body, node, index, theme, &mut rng);
    }
    for edge in &layout.edges {
        edges::render_edge(&mut body, edge, theme, &mut rng);
    }

    document(layout.width, layout.height, def.title.as_deref(), theme, &body)
}

pub fn render_sequence_svg(layout: &SequenceLayoutResult, def: &SequenceDiagramDef) -> String {
    let theme = ThemeConfig::of(def.style);
    let mut rng = SketchRng::new();

    let mut body = String::new();
    sequence::render_sequence_body(&mut body, layout, theme, &mut rng);

    document(layout.width, layout.height, def.title.as_deref(), theme, &body)
}

fn document(
    width: f64,
    height: f64,
    title: Option<&str>,
    theme: &ThemeConfig,
    body: &str,
) -> String {
    let total_height = height + if title.is_some() { TITLE_OFFSET } else { 0.0 };

    let mut out = String::with_capacity(body.len() + 512);
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}" font-family="{ff}">"#,
        w = fmt(width),
        h = fmt(total_height),
        ff = theme.font_family,
    );
    let _ = write!(
        out,
        r##"<rect x="0.0" y="0.0" width="{}" height="{}" fill="#ffffff"/>"##,
        fmt(width),
        fmt(total_height),
    );

    match title {
        Some(title) => {
            let _ = write!(
                out,
                r##"<text x="{}" y="24.0" font-size="18.0" font-weight="bold" text-anchor="middle" fill="#333333">{}</text>"##,
                fmt(width / 2.0),
                escape_xml(title),
            );
            out.push_str(r#"<g transform="translate(0, 40.0)">"#);
            out.push_str(body);
            out.push_str("</g>");
        }
        None => out.push_str(body),
    }

    out.push_str("</svg>");
    out
}

/// One-decimal coordinate formatting (`toFixed(1)` semantics).
pub(crate) fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0.0".to_string();
    }
    let s = format!("{v:.1}");
    if s == "-0.0" { "0.0".to_string() } else { s }
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
