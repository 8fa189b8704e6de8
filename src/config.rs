use crate::foundation::core::Rgb8;
use crate::foundation::error::{MazevineError, MazevineResult};
use crate::grid::DEFAULT_CELL_SIZE;
use crate::layout::ContentSelector;
use crate::obstacle::DEFAULT_PADDING;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Three-stop color ramp the traveling color wave samples through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ColorRamp {
    pub dark: Rgb8,
    pub mid: Rgb8,
    pub bright: Rgb8,
}

impl Default for ColorRamp {
    fn default() -> Self {
        // Dark forest green -> medium green -> bright emerald.
        Self {
            dark: Rgb8::new(6, 78, 59),
            mid: Rgb8::new(16, 120, 95),
            bright: Rgb8::new(16, 185, 129),
        }
    }
}

/// Every tunable of the engine, with defaults matching the stock animation.
///
/// Construct with `EngineOpts::default()` and override fields, or load from
/// JSON via [`EngineOpts::from_reader`] / [`EngineOpts::from_path`]. Values
/// are validated once when the [`crate::engine::Engine`] is built.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineOpts {
    /// Lattice pitch in layout units.
    pub cell_size: f64,
    /// Keep-out margin added around every content box.
    pub padding: f64,
    /// Live-entity cap.
    pub max_snakes: usize,
    /// Milliseconds between spawn attempts.
    pub spawn_interval_ms: f64,
    /// Milliseconds between periodic obstacle re-scans.
    pub obstacle_refresh_ms: f64,
    /// Milliseconds between growth ticks of a growing snake.
    pub growth_interval_ms: f64,
    /// Dwell time in the traveling stage.
    pub travel_ms: f64,
    /// Duration of the tail-first fade-out.
    pub fade_ms: f64,
    /// Ramp time for new-segment fade-in while growing.
    pub fade_in_ms: f64,
    /// Interpolation progress gained per millisecond.
    pub interp_speed: f64,
    /// Baseline segment opacity.
    pub base_opacity: f64,
    /// Amplitude of the traveling-stage opacity pulse.
    pub pulse_amplitude: f64,
    /// Angular frequency of the opacity pulse, radians per millisecond.
    pub pulse_freq: f64,
    /// Minimum target length in segments.
    pub min_len: usize,
    /// Random spread added to `min_len` (target length is
    /// `min_len..min_len + len_spread`).
    pub len_spread: usize,
    /// Probability of re-steering immediately after a successful growth.
    pub steer_chance: f64,
    /// Spawn-point retries before accepting an occupied cell.
    pub spawn_attempts: u32,
    /// Consecutive failed growth ticks before giving up on growing.
    pub stuck_limit: u32,
    /// Stroke width of drawn segments, in layout units.
    pub stroke_width: f64,
    /// Color ramp for the traveling color wave.
    pub ramp: ColorRamp,
    /// Content classes sampled into the obstacle set.
    pub selectors: Vec<ContentSelector>,
    /// Seed for the engine's random source.
    pub seed: u64,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            padding: DEFAULT_PADDING,
            max_snakes: 5,
            spawn_interval_ms: 2000.0,
            obstacle_refresh_ms: 2000.0,
            growth_interval_ms: 600.0,
            travel_ms: 3000.0,
            fade_ms: 2000.0,
            fade_in_ms: 500.0,
            interp_speed: 0.003,
            base_opacity: 0.7,
            pulse_amplitude: 0.15,
            pulse_freq: 0.002,
            min_len: 6,
            len_spread: 8,
            steer_chance: 0.2,
            spawn_attempts: 50,
            stuck_limit: 5,
            stroke_width: 3.0,
            ramp: ColorRamp::default(),
            selectors: ContentSelector::ALL.to_vec(),
            seed: 0,
        }
    }
}

impl EngineOpts {
    /// Parse options from a JSON reader. Absent fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> MazevineResult<Self> {
        let opts: EngineOpts = serde_json::from_reader(r)
            .map_err(|e| MazevineError::validation(format!("parse engine options JSON: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Parse options from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> MazevineResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            MazevineError::validation(format!("open engine options '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Validate static invariants.
    pub fn validate(&self) -> MazevineResult<()> {
        fn positive(name: &str, v: f64) -> MazevineResult<()> {
            if v > 0.0 && v.is_finite() {
                Ok(())
            } else {
                Err(MazevineError::validation(format!("{name} must be > 0")))
            }
        }

        positive("cell_size", self.cell_size)?;
        positive("spawn_interval_ms", self.spawn_interval_ms)?;
        positive("obstacle_refresh_ms", self.obstacle_refresh_ms)?;
        positive("growth_interval_ms", self.growth_interval_ms)?;
        positive("travel_ms", self.travel_ms)?;
        positive("fade_ms", self.fade_ms)?;
        positive("fade_in_ms", self.fade_in_ms)?;
        positive("interp_speed", self.interp_speed)?;
        positive("stroke_width", self.stroke_width)?;
        if !(self.padding >= 0.0 && self.padding.is_finite()) {
            return Err(MazevineError::validation("padding must be >= 0"));
        }
        if !(self.base_opacity > 0.0 && self.base_opacity <= 1.0) {
            return Err(MazevineError::validation("base_opacity must be in (0, 1]"));
        }
        if !(self.pulse_amplitude >= 0.0 && self.pulse_amplitude.is_finite()) {
            return Err(MazevineError::validation("pulse_amplitude must be >= 0"));
        }
        positive("pulse_freq", self.pulse_freq)?;
        if !(0.0..=1.0).contains(&self.steer_chance) {
            return Err(MazevineError::validation("steer_chance must be in [0, 1]"));
        }
        if self.max_snakes == 0 {
            return Err(MazevineError::validation("max_snakes must be >= 1"));
        }
        if self.min_len == 0 {
            return Err(MazevineError::validation("min_len must be >= 1"));
        }
        if self.spawn_attempts == 0 {
            return Err(MazevineError::validation("spawn_attempts must be >= 1"));
        }
        if self.stuck_limit == 0 {
            return Err(MazevineError::validation("stuck_limit must be >= 1"));
        }
        if self.selectors.is_empty() {
            return Err(MazevineError::validation("selectors must not be empty"));
        }
        Ok(())
    }
}
