//! Output encoders (SVG figures, HTML report).

pub mod figure;
pub mod html;
mod svg;

pub use html::{render_html, HtmlReport};
pub use svg::{escape_xml, SvgElement, SvgEncoder, TextAnchor};
