use crate::config::EngineOpts;
use crate::foundation::core::SurfaceSize;
use crate::foundation::math::Rng64;
use crate::obstacle::ObstacleField;
use crate::snake::MazeSnake;

/// Bounded pool of live snakes.
///
/// The population is the exclusive owner of every [`MazeSnake`]: it spawns
/// them at a fixed cadence while under the cap and drops them once their
/// stage reaches `Dead`. Nothing outside ever removes an entity.
#[derive(Clone, Debug, Default)]
pub struct Population {
    snakes: Vec<MazeSnake>,
    since_spawn_ms: f64,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance every live snake, cull the dead, then spawn if the cadence
    /// and cap allow it.
    pub fn tick(
        &mut self,
        dt_ms: f64,
        size: SurfaceSize,
        field: &ObstacleField,
        opts: &EngineOpts,
        rng: &mut Rng64,
    ) {
        for snake in &mut self.snakes {
            snake.update(dt_ms, size, field, opts, rng);
        }
        let before = self.snakes.len();
        self.snakes.retain(|s| !s.is_dead());
        if self.snakes.len() < before {
            tracing::debug!(culled = before - self.snakes.len(), "culled dead snakes");
        }

        self.since_spawn_ms += dt_ms;
        if self.since_spawn_ms >= opts.spawn_interval_ms && self.snakes.len() < opts.max_snakes {
            self.snakes.push(MazeSnake::spawn(opts, size, field, rng));
            self.since_spawn_ms = 0.0;
            tracing::debug!(live = self.snakes.len(), "spawned snake");
        }
    }

    pub fn snakes(&self) -> &[MazeSnake] {
        &self.snakes
    }

    pub fn len(&self) -> usize {
        self.snakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snakes.is_empty()
    }

    /// Drop every live snake.
    pub fn clear(&mut self) {
        self.snakes.clear();
        self.since_spawn_ms = 0.0;
    }
}
