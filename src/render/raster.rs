use crate::anim::lerp;
use crate::foundation::core::Rgba8Premul;
use crate::foundation::math::mul_div255;
use crate::render::surface::{GradientStop, LineCap, Surface};

/// Software implementation of [`Surface`] over a premultiplied RGBA8 buffer.
///
/// Strokes are rasterized directly: every pixel near a segment gets the
/// endpoint-interpolated color at its projection onto the segment, scaled by
/// a one-pixel coverage feather, and composited premul-over onto the buffer.
/// Headless tests and demos render through this; interactive hosts usually
/// bring their own `Surface` instead.
#[derive(Clone, Debug)]
pub struct CpuSurface {
    width: u32,
    height: u32,
    scale: f64,
    data: Vec<u8>,
}

impl CpuSurface {
    pub fn new(physical_width: u32, physical_height: u32, scale: f64) -> Self {
        let mut surface = Self {
            width: 0,
            height: 0,
            scale: 1.0,
            data: Vec::new(),
        };
        surface.resize(physical_width, physical_height, scale);
        surface
    }

    /// Backing-store width in physical pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Backing-store height in physical pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Premultiplied RGBA8 bytes, tightly packed, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Read one pixel. Out-of-bounds reads return transparent.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8Premul {
        if x >= self.width || y >= self.height {
            return Rgba8Premul::transparent();
        }
        let i = ((y as usize * self.width as usize) + x as usize) * 4;
        Rgba8Premul {
            r: self.data[i],
            g: self.data[i + 1],
            b: self.data[i + 2],
            a: self.data[i + 3],
        }
    }

    fn blend(&mut self, x: i64, y: i64, src: Rgba8Premul) {
        if src.a == 0 || x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height)
        {
            return;
        }
        let i = ((y as usize * self.width as usize) + x as usize) * 4;
        let px = &mut self.data[i..i + 4];
        let inv = 255u16 - u16::from(src.a);
        px[0] = src.r.saturating_add(mul_div255(u16::from(px[0]), inv));
        px[1] = src.g.saturating_add(mul_div255(u16::from(px[1]), inv));
        px[2] = src.b.saturating_add(mul_div255(u16::from(px[2]), inv));
        px[3] = src.a.saturating_add(mul_div255(u16::from(px[3]), inv));
    }
}

impl Surface for CpuSurface {
    fn resize(&mut self, physical_width: u32, physical_height: u32, scale: f64) {
        self.width = physical_width;
        self.height = physical_height;
        self.scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        self.data = vec![0; physical_width as usize * physical_height as usize * 4];
    }

    fn clear(&mut self) {
        self.data.fill(0);
    }

    fn stroke_gradient_line(
        &mut self,
        from: GradientStop,
        to: GradientStop,
        width: f64,
        cap: LineCap,
    ) {
        if self.width == 0 || self.height == 0 || width <= 0.0 {
            return;
        }

        let s = self.scale;
        let ax = from.pos.x * s;
        let ay = from.pos.y * s;
        let bx = to.pos.x * s;
        let by = to.pos.y * s;
        let half = (width * s) / 2.0;

        let dx = bx - ax;
        let dy = by - ay;
        let len2 = dx * dx + dy * dy;
        if len2 == 0.0 && cap == LineCap::Butt {
            return;
        }

        let reach = half + 1.0;
        let x0 = ((ax.min(bx) - reach).floor().max(0.0)) as i64;
        let y0 = ((ay.min(by) - reach).floor().max(0.0)) as i64;
        let x1 = ((ax.max(bx) + reach).ceil()).min(f64::from(self.width) - 1.0) as i64;
        let y1 = ((ay.max(by) + reach).ceil()).min(f64::from(self.height) - 1.0) as i64;

        for py in y0..=y1 {
            for px in x0..=x1 {
                let cx = px as f64 + 0.5;
                let cy = py as f64 + 0.5;
                let t_raw = if len2 > 0.0 {
                    ((cx - ax) * dx + (cy - ay) * dy) / len2
                } else {
                    0.0
                };
                if cap == LineCap::Butt && !(0.0..=1.0).contains(&t_raw) {
                    continue;
                }
                let t = t_raw.clamp(0.0, 1.0);
                let nx = ax + dx * t;
                let ny = ay + dy * t;
                let d = ((cx - nx) * (cx - nx) + (cy - ny) * (cy - ny)).sqrt();
                let coverage = (half + 0.5 - d).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }

                let color = from.color.mix(to.color, t);
                let opacity = lerp(from.opacity, to.opacity, t).clamp(0.0, 1.0);
                let src = Rgba8Premul::from_color(color, opacity * coverage);
                self.blend(px, py, src);
            }
        }
    }
}
