use crate::foundation::core::{Point, Rgb8};

/// Stroke end-cap shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LineCap {
    Butt,
    Round,
}

/// One endpoint of a gradient-stroked line: position, straight-alpha color,
/// and that endpoint's own opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub pos: Point,
    pub color: Rgb8,
    pub opacity: f64,
}

/// The engine's drawing contract.
///
/// Coordinates handed to [`Surface::stroke_gradient_line`] are in layout
/// units; implementations that back a high-density store are expected to
/// apply the scale passed to [`Surface::resize`] themselves (the canvas
/// `ctx.scale(dpr, dpr)` idiom). Every frame starts with [`Surface::clear`]
/// and consists only of gradient strokes; there is no retained scene.
pub trait Surface {
    /// Size the backing store to `physical_width × physical_height` pixels
    /// and adopt `scale` as the layout→physical factor.
    fn resize(&mut self, physical_width: u32, physical_height: u32, scale: f64);

    /// Clear the whole surface to transparent.
    fn clear(&mut self);

    /// Stroke a straight line from `from.pos` to `to.pos` with a two-point
    /// linear gradient between the endpoint colors/opacities.
    fn stroke_gradient_line(&mut self, from: GradientStop, to: GradientStop, width: f64, cap: LineCap);
}
