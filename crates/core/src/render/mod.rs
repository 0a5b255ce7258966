pub mod canvas;
pub mod renderer;
pub mod svg;

use crate::errors::CoreError;
use crate::models::chart::{ChartTab, LoadFailure, ScreenPoint};
use crate::models::settings::ChartGeometry;

use canvas::{Anchor, Canvas};
use renderer::ChartRenderer;
use svg::SvgCanvas;

/// Anything that can paint itself onto a canvas of a given geometry.
pub trait Renderable {
    fn draw(&self, canvas: &mut dyn Canvas, geometry: &ChartGeometry) -> Result<(), CoreError>;
}

impl Renderable for ChartTab {
    fn draw(&self, canvas: &mut dyn Canvas, geometry: &ChartGeometry) -> Result<(), CoreError> {
        ChartRenderer::new(*geometry).draw(canvas, &self.series, self.range)
    }
}

/// Plain centred text shown instead of the charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub message: String,
}

impl MessageView {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<&LoadFailure> for MessageView {
    fn from(failure: &LoadFailure) -> Self {
        Self::new(failure.to_string())
    }
}

impl Renderable for MessageView {
    fn draw(&self, canvas: &mut dyn Canvas, geometry: &ChartGeometry) -> Result<(), CoreError> {
        canvas.fill_rect(
            ScreenPoint::new(0, 0),
            geometry.width,
            geometry.height,
            geometry.background,
        );
        canvas.text(
            ScreenPoint::new(geometry.width / 2, geometry.height / 2),
            &self.message,
            Anchor::Middle,
            geometry.foreground,
        );
        Ok(())
    }
}

/// Render a view into a complete SVG document.
pub fn render_svg(
    view: &dyn Renderable,
    geometry: &ChartGeometry,
    title: &str,
) -> Result<String, CoreError> {
    let mut canvas = SvgCanvas::new(geometry.width, geometry.height).with_title(title);
    view.draw(&mut canvas, geometry)?;
    Ok(canvas.finish())
}
