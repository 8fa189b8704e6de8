use crate::anim::{Ease, lerp};
use crate::config::EngineOpts;
use crate::foundation::core::SurfaceSize;
use crate::foundation::math::Rng64;
use crate::grid::Heading;
use crate::obstacle::ObstacleField;

/// Fraction of overall fade progress across which per-segment fade starts
/// are staggered from tail to head.
const FADE_STAGGER: f64 = 0.7;
/// Remaining fraction over which one segment ramps its opacity to zero.
const FADE_WINDOW: f64 = 0.3;

/// Life-cycle phase of a [`MazeSnake`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Stage {
    Growing,
    Traveling,
    Fading,
    Dead,
}

/// One joint of a snake's body.
///
/// `x`/`y` is the drawn position; it eases from the position the segment was
/// created at toward the lattice-aligned target and snaps there on arrival.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub x: f64,
    pub y: f64,
    pub(crate) start_x: f64,
    pub(crate) start_y: f64,
    pub target_x: f64,
    pub target_y: f64,
    /// Interpolation progress in `[0, 1]`; 1 means arrived.
    pub progress: f64,
    /// Straight opacity in `[0, 1]`, driven by the stage envelope.
    pub opacity: f64,
}

impl Segment {
    fn settled(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            start_x: x,
            start_y: y,
            target_x: x,
            target_y: y,
            progress: 1.0,
            opacity: 0.0,
        }
    }

    fn extending(from: Segment, target_x: f64, target_y: f64) -> Self {
        Self {
            x: from.x,
            y: from.y,
            start_x: from.x,
            start_y: from.y,
            target_x,
            target_y,
            progress: 0.0,
            opacity: 0.0,
        }
    }
}

/// One autonomous maze path: grows cell by cell around obstacles, dwells
/// with a breathing pulse, then fades out tail-first.
#[derive(Clone, Debug)]
pub struct MazeSnake {
    segments: Vec<Segment>,
    target_len: usize,
    heading: Heading,
    stage: Stage,
    age_ms: f64,
    since_growth_ms: f64,
    stuck: u32,
}

impl MazeSnake {
    /// Spawn at a random lattice cell, retrying up to
    /// [`EngineOpts::spawn_attempts`] times to find an obstacle-free one.
    ///
    /// When the budget runs out the last candidate is accepted as-is: an
    /// occupied spawn degrades the avoidance visually, it never fails.
    pub fn spawn(
        opts: &EngineOpts,
        size: SurfaceSize,
        field: &ObstacleField,
        rng: &mut Rng64,
    ) -> Self {
        let cols = ((size.width / opts.cell_size).floor() as usize).max(1);
        let rows = ((size.height / opts.cell_size).floor() as usize).max(1);
        let mut x = 0.0;
        let mut y = 0.0;
        for _ in 0..opts.spawn_attempts {
            x = rng.next_index(cols) as f64 * opts.cell_size;
            y = rng.next_index(rows) as f64 * opts.cell_size;
            if !field.collides(x, y) {
                break;
            }
        }
        Self::with_origin(opts, x, y, rng)
    }

    /// Place a snake at a specific lattice cell.
    pub fn with_origin(opts: &EngineOpts, x: f64, y: f64, rng: &mut Rng64) -> Self {
        let target_len = opts.min_len + rng.next_index(opts.len_spread);
        let heading = Heading::ALL[rng.next_index(Heading::ALL.len())];
        Self {
            segments: vec![Segment::settled(x, y)],
            target_len,
            heading,
            stage: Stage::Growing,
            age_ms: 0.0,
            since_growth_ms: 0.0,
            stuck: 0,
        }
    }

    /// Advance the snake by `dt_ms` milliseconds.
    pub fn update(
        &mut self,
        dt_ms: f64,
        size: SurfaceSize,
        field: &ObstacleField,
        opts: &EngineOpts,
        rng: &mut Rng64,
    ) {
        self.age_ms += dt_ms;
        self.advance_interpolation(dt_ms, opts);

        match self.stage {
            Stage::Growing => self.update_growing(dt_ms, size, field, opts, rng),
            Stage::Traveling => {
                let pulse =
                    (self.age_ms * opts.pulse_freq).sin() * opts.pulse_amplitude + opts.base_opacity;
                for seg in &mut self.segments {
                    seg.opacity = pulse;
                }
                if self.age_ms >= opts.travel_ms {
                    self.enter(Stage::Fading);
                }
            }
            Stage::Fading => {
                let overall = self.age_ms / opts.fade_ms;
                let n = self.segments.len() as f64;
                for (i, seg) in self.segments.iter_mut().enumerate() {
                    let start = (i as f64 / n) * FADE_STAGGER;
                    let local = ((overall - start) / FADE_WINDOW).max(0.0);
                    seg.opacity = (opts.base_opacity * (1.0 - local)).max(0.0);
                }
                if self.age_ms >= opts.fade_ms {
                    self.stage = Stage::Dead;
                }
            }
            Stage::Dead => {}
        }
    }

    fn advance_interpolation(&mut self, dt_ms: f64, opts: &EngineOpts) {
        for seg in &mut self.segments {
            if seg.progress >= 1.0 {
                continue;
            }
            seg.progress = (seg.progress + opts.interp_speed * dt_ms).min(1.0);
            if seg.progress >= 1.0 {
                seg.x = seg.target_x;
                seg.y = seg.target_y;
            } else {
                let t = Ease::InOutQuad.apply(seg.progress);
                seg.x = lerp(seg.start_x, seg.target_x, t);
                seg.y = lerp(seg.start_y, seg.target_y, t);
            }
        }
    }

    fn update_growing(
        &mut self,
        dt_ms: f64,
        size: SurfaceSize,
        field: &ObstacleField,
        opts: &EngineOpts,
        rng: &mut Rng64,
    ) {
        self.since_growth_ms += dt_ms;

        for seg in &mut self.segments {
            if seg.opacity < opts.base_opacity {
                seg.opacity = (seg.opacity + dt_ms / opts.fade_in_ms).min(opts.base_opacity);
            }
        }

        if self.since_growth_ms >= opts.growth_interval_ms {
            if self.segments.len() < self.target_len {
                self.try_grow(size, field, opts, rng);
            }
            self.since_growth_ms = 0.0;
        }

        if self.stage == Stage::Growing && self.segments.len() >= self.target_len {
            self.enter(Stage::Traveling);
        }
    }

    fn try_grow(
        &mut self,
        size: SurfaceSize,
        field: &ObstacleField,
        opts: &EngineOpts,
        rng: &mut Rng64,
    ) {
        let Some(head) = self.segments.last().copied() else {
            return;
        };

        match Self::pick_heading(
            head.target_x,
            head.target_y,
            self.heading,
            size,
            field,
            opts.cell_size,
            rng,
        ) {
            Some(dir) => {
                self.heading = dir;
                let off = dir.offset(opts.cell_size);
                let tx = head.target_x + off.x;
                let ty = head.target_y + off.y;
                self.segments.push(Segment::extending(head, tx, ty));
                self.stuck = 0;

                // Occasional extra turn keeps paths maze-like instead of
                // corridor-straight; it only re-aims the heading, the extra
                // cell is not consumed until the next growth tick.
                if rng.chance(opts.steer_chance)
                    && let Some(alt) = Self::pick_heading(
                        tx,
                        ty,
                        self.heading,
                        size,
                        field,
                        opts.cell_size,
                        rng,
                    )
                {
                    self.heading = alt;
                }
            }
            None => {
                self.stuck += 1;
                if self.stuck >= opts.stuck_limit {
                    tracing::debug!(segments = self.segments.len(), "snake stuck, growth abandoned");
                    self.enter(Stage::Traveling);
                }
            }
        }
    }

    /// Choose the next heading from `(from_x, from_y)`.
    ///
    /// The three non-reverse headings are tried in shuffled order; the exact
    /// reverse is a last resort, and `None` means every neighbor cell is out
    /// of bounds or obstructed.
    fn pick_heading(
        from_x: f64,
        from_y: f64,
        current: Heading,
        size: SurfaceSize,
        field: &ObstacleField,
        cell_size: f64,
        rng: &mut Rng64,
    ) -> Option<Heading> {
        let mut forward = current.forward_candidates();
        rng.shuffle(&mut forward);
        for dir in forward {
            let off = dir.offset(cell_size);
            if Self::cell_free(from_x + off.x, from_y + off.y, size, field) {
                return Some(dir);
            }
        }

        let rev = current.reverse();
        let off = rev.offset(cell_size);
        if Self::cell_free(from_x + off.x, from_y + off.y, size, field) {
            return Some(rev);
        }
        None
    }

    fn cell_free(x: f64, y: f64, size: SurfaceSize, field: &ObstacleField) -> bool {
        size.contains(x, y) && !field.collides(x, y)
    }

    fn enter(&mut self, stage: Stage) {
        self.stage = stage;
        self.age_ms = 0.0;
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn target_len(&self) -> usize {
        self.target_len
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn is_dead(&self) -> bool {
        self.stage == Stage::Dead
    }
}
