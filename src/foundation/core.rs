pub use kurbo::{Point, Rect, Vec2};

/// Display size of the drawing surface in layout units (CSS pixels).
///
/// All engine geometry (lattice cells, obstacles, segment positions) lives
/// in this coordinate space. The backing store is `display × scale` and is a
/// concern of the [`crate::render::surface::Surface`] implementation only.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    /// Width in layout units.
    pub width: f64,
    /// Height in layout units.
    pub height: f64,
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Return `true` when the surface has no drawable area.
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Return `true` when `(x, y)` lies inside `[0, width) × [0, height)`.
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= 0.0 && x < self.width && y >= 0.0 && y < self.height
    }
}

/// Where the surface sits on screen and how dense its pixels are.
///
/// Reported by the host's [`crate::layout::LayoutProbe`]; the engine uses the
/// origin to convert screen-space content boxes into surface-local
/// coordinates and the scale to size the backing store.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Screen-space position of the surface's top-left corner.
    pub origin: Point,
    /// Display size in layout units.
    pub size: SurfaceSize,
    /// Device pixel ratio (`>= 1.0` on typical displays).
    pub scale: f64,
}

impl Viewport {
    /// Backing-store width in physical pixels.
    pub fn physical_width(self) -> u32 {
        (self.size.width * self.scale).round().max(0.0) as u32
    }

    /// Backing-store height in physical pixels.
    pub fn physical_height(self) -> u32 {
        (self.size.height * self.scale).round().max(0.0) as u32
    }
}

/// Straight-alpha RGB color; opacity travels separately alongside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Per-channel linear blend toward `other` with factor `t` in `[0, 1]`.
    pub fn mix(self, other: Rgb8, t: f64) -> Rgb8 {
        fn ch(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }
        Rgb8::new(
            ch(self.r, other.r, t),
            ch(self.g, other.g, t),
            ch(self.b, other.b, t),
        )
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Premultiply a straight-alpha color with a normalized opacity.
    pub fn from_color(color: Rgb8, opacity: f64) -> Self {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::from_straight_rgba(color.r, color.g, color.b, a)
    }
}
