use crate::models::chart::ScreenPoint;
use crate::models::settings::Rgb;

use super::canvas::{Anchor, Canvas};

const FONT_FAMILY: &str = "Arial, Helvetica, sans-serif";
const FONT_SIZE: i32 = 12;

/// A canvas that serialises to a standalone SVG document.
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    width: i32,
    height: i32,
    title: Option<String>,
    body: String,
}

impl SvgCanvas {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            title: None,
            body: String::new(),
        }
    }

    /// Set the document `<title>` (shown as the tooltip / tab name by viewers).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Close the document and return its text.
    pub fn finish(self) -> String {
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            w = self.width,
            h = self.height
        );
        if let Some(title) = &self.title {
            out.push_str(&format!("<title>{}</title>\n", escape(title)));
        }
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

impl Canvas for SvgCanvas {
    fn fill_rect(&mut self, origin: ScreenPoint, width: i32, height: i32, color: Rgb) {
        self.body.push_str(&format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{width}\" height=\"{height}\" fill=\"{}\"/>\n",
            origin.x,
            origin.y,
            color.to_hex()
        ));
    }

    fn line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Rgb) {
        self.body.push_str(&format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\"/>\n",
            from.x,
            from.y,
            to.x,
            to.y,
            color.to_hex()
        ));
    }

    fn text(&mut self, at: ScreenPoint, text: &str, anchor: Anchor, color: Rgb) {
        let anchor = match anchor {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        };
        self.body.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" text-anchor=\"{anchor}\" font-family=\"{FONT_FAMILY}\" font-size=\"{FONT_SIZE}\" fill=\"{}\">{}</text>\n",
            at.x,
            at.y,
            color.to_hex(),
            escape(text)
        ));
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
