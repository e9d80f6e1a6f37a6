#![forbid(unsafe_code)]

//! SVG to PNG rasterisation (pure Rust, `usvg` + `resvg` + `tiny-skia`).

pub const DEFAULT_SCALE: f32 = 2.0;

#[derive(Debug, thiserror::Error)]
pub enum PngError {
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("failed to encode PNG")]
    PngEncode,
}

pub type Result<T> = std::result::Result<T, PngError>;

pub fn svg_to_png(svg: &str, scale: f32) -> Result<Vec<u8>> {
    let mut opt = usvg::Options::default();
    // Text output depends on the fonts available; system fonts keep this
    // best-effort without vendoring a font.
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = "Arial".to_string();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| PngError::SvgParse)?;
    let size = tree.size();
    let width_px = (size.width() * scale).ceil().max(1.0) as u32;
    let height_px = (size.height() * scale).ceil().max(1.0) as u32;

    let mut pixmap =
        tiny_skia::Pixmap::new(width_px, height_px).ok_or(PngError::PixmapAlloc)?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    pixmap.encode_png().map_err(|_| PngError::PngEncode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svg_to_png_produces_png_signature() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10" width="10" height="10"><rect width="10" height="10" fill="black"/></svg>"#;
        let bytes = svg_to_png(svg, 1.0).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    }

    #[test]
    fn scale_doubles_the_pixel_dimensions() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10" width="10" height="10"><rect width="10" height="10" fill="black"/></svg>"#;
        let one = svg_to_png(svg, 1.0).unwrap();
        let two = svg_to_png(svg, 2.0).unwrap();
        // Width lives in bytes 16..20 of the IHDR chunk.
        let width = |png: &[u8]| u32::from_be_bytes([png[16], png[17], png[18], png[19]]);
        assert_eq!(width(&one), 10);
        assert_eq!(width(&two), 20);
    }

    #[test]
    fn garbage_input_reports_a_parse_error() {
        assert!(matches!(
            svg_to_png("not svg at all", 1.0),
            Err(PngError::SvgParse)
        ));
    }
}
