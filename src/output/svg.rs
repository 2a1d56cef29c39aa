//! SVG output encoder.
//!
//! Vector output for the chart panels of the HTML report.

use crate::color::Rgba;
use base64::{engine::general_purpose::STANDARD, Engine};
use std::fmt::Write as FmtWrite;

/// SVG encoder for vector output.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    /// SVG width
    width: u32,
    /// SVG height
    height: u32,
    /// Background color (None for transparent)
    background: Option<Rgba>,
    /// SVG elements
    elements: Vec<SvgElement>,
}

/// An SVG element.
///
/// Field names are self-documenting and match SVG attribute names.
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Rectangle
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgba,
        stroke: Option<Rgba>,
        stroke_width: f32,
    },
    /// Line
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Rgba,
        stroke_width: f32,
    },
    /// Path (SVG path data)
    Path {
        d: String,
        fill: Option<Rgba>,
        stroke: Option<Rgba>,
        stroke_width: f32,
    },
    /// Text
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
    },
}

/// Text anchor position for SVG text alignment.
#[derive(Debug, Clone, Copy, Default)]
#[allow(missing_docs)]
pub enum TextAnchor {
    /// Align text start at position (left-aligned for LTR)
    #[default]
    Start,
    /// Center text at position
    Middle,
    /// Align text end at position (right-aligned for LTR)
    End,
}

impl Default for SvgEncoder {
    fn default() -> Self {
        Self::new(640, 400)
    }
}

impl SvgEncoder {
    /// Create a new SVG encoder with given dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, background: Some(Rgba::WHITE), elements: Vec::new() }
    }

    /// Set background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Add a rectangle.
    #[must_use]
    pub fn rect(mut self, x: f32, y: f32, width: f32, height: f32, fill: Rgba) -> Self {
        self.elements.push(SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke: None,
            stroke_width: 1.0,
        });
        self
    }

    /// Add a rectangle with stroke.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn rect_outlined(
        mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgba,
        stroke: Rgba,
        stroke_width: f32,
    ) -> Self {
        self.elements.push(SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke: Some(stroke),
            stroke_width,
        });
        self
    }

    /// Add a line.
    #[must_use]
    pub fn line(
        mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Rgba,
        stroke_width: f32,
    ) -> Self {
        self.elements.push(SvgElement::Line { x1, y1, x2, y2, stroke, stroke_width });
        self
    }

    /// Add an SVG path.
    #[must_use]
    pub fn path(
        mut self,
        d: &str,
        fill: Option<Rgba>,
        stroke: Option<Rgba>,
        stroke_width: f32,
    ) -> Self {
        self.elements.push(SvgElement::Path { d: d.to_string(), fill, stroke, stroke_width });
        self
    }

    /// Add text.
    #[must_use]
    pub fn text(self, x: f32, y: f32, text: &str, font_size: f32, fill: Rgba) -> Self {
        self.text_anchored(x, y, text, font_size, fill, TextAnchor::Start)
    }

    /// Add text with anchor.
    #[must_use]
    pub fn text_anchored(
        mut self,
        x: f32,
        y: f32,
        text: &str,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
    ) -> Self {
        self.elements.push(SvgElement::Text {
            x,
            y,
            text: text.to_string(),
            font_size,
            fill,
            anchor,
        });
        self
    }

    /// Render to SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(4096);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        );

        if let Some(bg) = self.background {
            let _ = writeln!(
                svg,
                r#"  <rect width="100%" height="100%" fill="{}"/>"#,
                rgba_to_css(&bg)
            );
        }

        for element in &self.elements {
            let _ = writeln!(svg, "  {}", element_to_svg(element));
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Render as a `data:` URI suitable for an `<img src>`.
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        format!("data:image/svg+xml;base64,{}", STANDARD.encode(self.render()))
    }
}

/// Escape XML special characters in text and attribute values.
#[must_use]
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Convert RGBA to CSS color string.
fn rgba_to_css(color: &Rgba) -> String {
    if color.a == 255 {
        format!("rgb({},{},{})", color.r, color.g, color.b)
    } else {
        format!("rgba({},{},{},{:.3})", color.r, color.g, color.b, f32::from(color.a) / 255.0)
    }
}

fn stroke_attr(stroke: Option<Rgba>, stroke_width: f32) -> String {
    stroke
        .map(|s| format!(r#" stroke="{}" stroke-width="{stroke_width}""#, rgba_to_css(&s)))
        .unwrap_or_default()
}

/// Convert an SVG element to its string representation.
fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Rect { x, y, width, height, fill, stroke, stroke_width } => {
            format!(
                r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{}"{}/>"#,
                rgba_to_css(fill),
                stroke_attr(*stroke, *stroke_width)
            )
        }
        SvgElement::Line { x1, y1, x2, y2, stroke, stroke_width } => {
            format!(
                r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="{stroke_width}"/>"#,
                rgba_to_css(stroke)
            )
        }
        SvgElement::Path { d, fill, stroke, stroke_width } => {
            let fill_attr = fill.map(|f| rgba_to_css(&f)).unwrap_or_else(|| "none".to_string());
            format!(
                r#"<path d="{d}" fill="{fill_attr}"{}/>"#,
                stroke_attr(*stroke, *stroke_width)
            )
        }
        SvgElement::Text { x, y, text, font_size, fill, anchor } => {
            let anchor_str = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            format!(
                r#"<text x="{x}" y="{y}" font-size="{font_size}" fill="{}" text-anchor="{anchor_str}" font-family="sans-serif">{}</text>"#,
                rgba_to_css(fill),
                escape_xml(text)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_encoder_new() {
        let svg = SvgEncoder::new(800, 600).render();

        assert!(svg.contains("width=\"800\""));
        assert!(svg.contains("height=\"600\""));
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn test_svg_rect() {
        let svg = SvgEncoder::new(100, 100).rect(10.0, 20.0, 30.0, 40.0, Rgba::ACCENT).render();

        assert!(svg.contains("<rect"));
        assert!(svg.contains("x=\"10\""));
        assert!(svg.contains("y=\"20\""));
        assert!(svg.contains("width=\"30\""));
        assert!(svg.contains("height=\"40\""));
        assert!(svg.contains("rgb(32,178,170)"));
    }

    #[test]
    fn test_svg_rect_outlined() {
        let svg = SvgEncoder::new(100, 100)
            .rect_outlined(10.0, 20.0, 30.0, 40.0, Rgba::WHITE, Rgba::BLACK, 2.0)
            .render();

        assert!(svg.contains("stroke=\"rgb(0,0,0)\""));
        assert!(svg.contains("stroke-width=\"2\""));
    }

    #[test]
    fn test_svg_line() {
        let svg = SvgEncoder::new(100, 100).line(0.0, 0.0, 100.0, 100.0, Rgba::BLACK, 2.0).render();

        assert!(svg.contains("<line"));
        assert!(svg.contains("x2=\"100\""));
        assert!(svg.contains("stroke-width=\"2\""));
    }

    #[test]
    fn test_svg_path_no_stroke() {
        let svg = SvgEncoder::new(100, 100)
            .path("M 10 10 L 90 90 Z", Some(Rgba::BLACK), None, 0.0)
            .render();

        assert!(svg.contains("d=\"M 10 10 L 90 90 Z\""));
        assert!(svg.contains("fill=\"rgb(0,0,0)\""));
        assert!(!svg.contains("stroke="));
    }

    #[test]
    fn test_svg_text_escaping() {
        let svg = SvgEncoder::new(100, 100)
            .text(10.0, 50.0, "<script>alert('xss')</script> & \"q\"", 12.0, Rgba::BLACK)
            .render();

        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&lt;script&gt;"));
        assert!(svg.contains("&amp;"));
        assert!(svg.contains("&quot;"));
    }

    #[test]
    fn test_svg_text_anchored_middle() {
        let svg = SvgEncoder::new(100, 100)
            .text_anchored(50.0, 50.0, "Centro", 12.0, Rgba::BLACK, TextAnchor::Middle)
            .render();

        assert!(svg.contains("text-anchor=\"middle\""));
    }

    #[test]
    fn test_svg_transparent_background() {
        let svg = SvgEncoder::new(100, 100).background(None).render();
        assert_eq!(svg.matches("<rect").count(), 0);
    }

    #[test]
    fn test_svg_rgba_alpha() {
        let css = rgba_to_css(&Rgba::new(255, 0, 0, 128));
        assert!(css.contains("rgba"));
        assert!(css.contains("0.502"));
    }

    #[test]
    fn test_svg_data_uri() {
        let uri = SvgEncoder::new(10, 10).to_data_uri();
        assert!(uri.starts_with("data:image/svg+xml;base64,"));

        let decoded = STANDARD.decode(uri.trim_start_matches("data:image/svg+xml;base64,")).unwrap();
        assert!(String::from_utf8(decoded).unwrap().starts_with("<svg"));
    }
}
