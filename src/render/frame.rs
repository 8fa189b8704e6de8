use crate::config::{ColorRamp, EngineOpts};
use crate::foundation::core::Rgb8;
use crate::render::surface::{GradientStop, LineCap, Surface};
use crate::snake::MazeSnake;

/// Phase speed of the traveling color wave, radians per millisecond.
const COLOR_WAVE_SPEED: f64 = 0.003;

/// Sample the body color at segment `index` of `total` at time `time_ms`.
///
/// A sine wave travels along the body; its value picks a point on the
/// three-stop ramp, so a band of brightness appears to flow head-ward.
pub fn wave_color(ramp: &ColorRamp, index: usize, total: usize, time_ms: f64) -> Rgb8 {
    let along = index as f64 / total.max(1) as f64;
    let wave = (along * std::f64::consts::TAU + time_ms * COLOR_WAVE_SPEED).sin();
    let t = (wave + 1.0) / 2.0;

    if t < 0.5 {
        ramp.dark.mix(ramp.mid, t * 2.0)
    } else {
        ramp.mid.mix(ramp.bright, (t - 0.5) * 2.0)
    }
}

/// Draw one frame: clear, then every snake as gradient-stroked segment
/// pairs in entity order. Strokes never need to z-composite, so plain
/// draw order suffices.
pub fn draw_frame(surface: &mut dyn Surface, snakes: &[MazeSnake], opts: &EngineOpts, now_ms: f64) {
    surface.clear();
    for snake in snakes {
        draw_snake(surface, snake, opts, now_ms);
    }
}

fn draw_snake(surface: &mut dyn Surface, snake: &MazeSnake, opts: &EngineOpts, now_ms: f64) {
    let segs = snake.segments();
    let total = segs.len();
    for (i, pair) in segs.windows(2).enumerate() {
        let from = GradientStop {
            pos: (pair[0].x, pair[0].y).into(),
            color: wave_color(&opts.ramp, i, total, now_ms),
            opacity: pair[0].opacity,
        };
        let to = GradientStop {
            pos: (pair[1].x, pair[1].y).into(),
            color: wave_color(&opts.ramp, i + 1, total, now_ms),
            opacity: pair[1].opacity,
        };
        surface.stroke_gradient_line(from, to, opts.stroke_width, LineCap::Round);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::SurfaceSize;
    use crate::foundation::math::Rng64;
    use crate::obstacle::ObstacleField;

    struct RecordingSurface {
        clears: usize,
        strokes: Vec<(GradientStop, GradientStop, f64, LineCap)>,
    }

    impl RecordingSurface {
        fn new() -> Self {
            Self {
                clears: 0,
                strokes: Vec::new(),
            }
        }
    }

    impl Surface for RecordingSurface {
        fn resize(&mut self, _w: u32, _h: u32, _scale: f64) {}

        fn clear(&mut self) {
            self.clears += 1;
        }

        fn stroke_gradient_line(
            &mut self,
            from: GradientStop,
            to: GradientStop,
            width: f64,
            cap: LineCap,
        ) {
            self.strokes.push((from, to, width, cap));
        }
    }

    fn ramp() -> ColorRamp {
        ColorRamp::default()
    }

    #[test]
    fn wave_hits_ramp_stops_at_sine_extremes() {
        let r = ramp();
        // index 0, so phase is time-driven alone: sin = -1 at 3π/2.
        let dark_t = 1.5 * std::f64::consts::PI / COLOR_WAVE_SPEED;
        assert_eq!(wave_color(&r, 0, 8, dark_t), r.dark);
        // sin = +1 at π/2.
        let bright_t = 0.5 * std::f64::consts::PI / COLOR_WAVE_SPEED;
        assert_eq!(wave_color(&r, 0, 8, bright_t), r.bright);
        // sin = 0 at phase 0 lands exactly on the middle stop.
        assert_eq!(wave_color(&r, 0, 8, 0.0), r.mid);
    }

    #[test]
    fn wave_stays_within_ramp_channel_bounds() {
        let r = ramp();
        for i in 0..16 {
            for t in [0.0, 123.0, 999.0, 5000.0] {
                let c = wave_color(&r, i, 16, t);
                assert!(c.r >= r.dark.r.min(r.bright.r));
                assert!(c.g >= r.dark.g && c.g <= r.bright.g);
                assert!(c.b >= r.dark.b.min(r.bright.b));
            }
        }
    }

    #[test]
    fn draw_frame_clears_then_strokes_each_adjacent_pair() {
        let opts = EngineOpts {
            min_len: 5,
            len_spread: 0,
            ..EngineOpts::default()
        };
        let size = SurfaceSize::new(500.0, 500.0);
        let field = ObstacleField::new(opts.padding);
        let mut rng = Rng64::new(7);
        let mut snake = crate::snake::MazeSnake::with_origin(&opts, 200.0, 200.0, &mut rng);
        for _ in 0..40 {
            snake.update(100.0, size, &field, &opts, &mut rng);
        }
        assert_eq!(snake.segments().len(), 5);

        let mut surface = RecordingSurface::new();
        draw_frame(&mut surface, std::slice::from_ref(&snake), &opts, 0.0);
        assert_eq!(surface.clears, 1);
        assert_eq!(surface.strokes.len(), 4);
        for (_, _, width, cap) in &surface.strokes {
            assert_eq!(*width, opts.stroke_width);
            assert_eq!(*cap, LineCap::Round);
        }
    }

    #[test]
    fn single_segment_snake_draws_nothing() {
        let opts = EngineOpts::default();
        let mut rng = Rng64::new(7);
        let snake = crate::snake::MazeSnake::with_origin(&opts, 0.0, 0.0, &mut rng);
        let mut surface = RecordingSurface::new();
        draw_frame(&mut surface, std::slice::from_ref(&snake), &opts, 0.0);
        assert_eq!(surface.clears, 1);
        assert!(surface.strokes.is_empty());
    }
}
