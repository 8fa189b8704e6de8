use crate::config::EngineOpts;
use crate::foundation::core::SurfaceSize;
use crate::foundation::error::MazevineResult;
use crate::foundation::math::Rng64;
use crate::layout::LayoutProbe;
use crate::obstacle::ObstacleField;
use crate::render::frame::draw_frame;
use crate::render::surface::Surface;
use crate::scheduler::Population;

/// One independent animation instance.
///
/// The engine owns all mutable animation state (the live snake pool, the
/// obstacle field, the random source and the clocks), so several engines can
/// run side by side in one process without interfering. It is driven
/// entirely by the host: `start`, then one `tick` per animation frame with a
/// monotonic millisecond timestamp, `on_resize` whenever the surface
/// container changes, and `stop` to quiesce. All calls must come from the
/// same logical thread; a tick runs to completion synchronously and the
/// engine holds no locks.
pub struct Engine {
    opts: EngineOpts,
    probe: Box<dyn LayoutProbe>,
    field: ObstacleField,
    population: Population,
    rng: Rng64,
    size: SurfaceSize,
    running: bool,
    last_tick_ms: Option<f64>,
    since_refresh_ms: f64,
}

impl Engine {
    /// Build an engine against a host layout probe.
    ///
    /// Fails only on invalid options; nothing is sampled or drawn until
    /// [`Engine::start`].
    pub fn new(probe: Box<dyn LayoutProbe>, opts: EngineOpts) -> MazevineResult<Self> {
        opts.validate()?;
        let field = ObstacleField::new(opts.padding);
        let rng = Rng64::new(opts.seed);
        Ok(Self {
            opts,
            probe,
            field,
            population: Population::new(),
            rng,
            size: SurfaceSize::new(0.0, 0.0),
            running: false,
            last_tick_ms: None,
            since_refresh_ms: 0.0,
        })
    }

    /// Size the surface, take the initial obstacle sample, and begin
    /// accepting ticks. Calling `start` on a running engine is a no-op.
    pub fn start(&mut self, surface: &mut dyn Surface) {
        if self.running {
            return;
        }
        self.apply_viewport(surface);
        self.rebuild_obstacles();
        self.last_tick_ms = None;
        self.running = true;
        tracing::debug!(width = self.size.width, height = self.size.height, "engine started");
    }

    /// Stop accepting ticks. Idempotent, and safe to call before `start`
    /// has ever run; host teardown may occur before full spin-up.
    ///
    /// Live snakes are kept; a later `start` resumes them where they were.
    pub fn stop(&mut self) {
        self.running = false;
        self.last_tick_ms = None;
    }

    /// React to a container resize: re-size the backing store at the
    /// current pixel density and re-sample obstacles, whose surface-local
    /// coordinates are stale after any resize.
    pub fn on_resize(&mut self, surface: &mut dyn Surface) {
        self.apply_viewport(surface);
        self.rebuild_obstacles();
    }

    /// Re-sample the obstacle set immediately and reset the periodic
    /// refresh deadline. Called from `tick` on the refresh cadence; hosts
    /// with their own timers may call it directly between frames.
    pub fn rebuild_obstacles(&mut self) {
        self.field.rebuild(self.probe.as_ref(), &self.opts.selectors);
        self.since_refresh_ms = 0.0;
    }

    /// Advance one animation frame.
    ///
    /// `now_ms` is a host-supplied monotonic millisecond timestamp; the
    /// first tick after `start` establishes the reference point and renders
    /// a zero-delta frame. Ticks on a stopped engine do nothing.
    #[tracing::instrument(skip(self, surface))]
    pub fn tick(&mut self, now_ms: f64, surface: &mut dyn Surface) {
        if !self.running {
            return;
        }
        let dt_ms = match self.last_tick_ms {
            Some(prev) => (now_ms - prev).max(0.0),
            None => 0.0,
        };
        self.last_tick_ms = Some(now_ms);

        // Layout can change without a resize (dynamic content); absorb it
        // on a fixed cadence.
        self.since_refresh_ms += dt_ms;
        if self.since_refresh_ms >= self.opts.obstacle_refresh_ms {
            self.rebuild_obstacles();
        }

        self.population
            .tick(dt_ms, self.size, &self.field, &self.opts, &mut self.rng);
        draw_frame(surface, self.population.snakes(), &self.opts, now_ms);
    }

    fn apply_viewport(&mut self, surface: &mut dyn Surface) {
        let vp = self.probe.viewport();
        surface.resize(vp.physical_width(), vp.physical_height(), vp.scale);
        self.size = vp.size;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn opts(&self) -> &EngineOpts {
        &self.opts
    }

    /// Current live population (read-only).
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Currently published obstacle field (read-only).
    pub fn obstacles(&self) -> &ObstacleField {
        &self.field
    }

    /// Surface display size as of the last start/resize.
    pub fn surface_size(&self) -> SurfaceSize {
        self.size
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("running", &self.running)
            .field("size", &self.size)
            .field("live", &self.population.len())
            .field("obstacles", &self.field.len())
            .finish()
    }
}
