//! Mazevine is a decorative background animation engine: autonomous maze
//! paths that grow cell by cell across a lattice, dwell with a breathing
//! pulse, and fade out tail-first, steering around the live bounding boxes
//! of on-screen content so strokes never cross readable text or controls.
//!
//! The crate is host-agnostic. A host supplies:
//!
//! - a drawing surface implementing [`Surface`] (or uses the built-in
//!   software [`CpuSurface`]),
//! - a [`LayoutProbe`] answering live content-geometry queries,
//! - one [`Engine::tick`] call per animation frame with a monotonic
//!   millisecond timestamp, plus [`Engine::on_resize`] notifications.
//!
//! Everything else (obstacle sampling, the per-entity life-cycle state
//! machine, spawn scheduling, rendering) happens inside the engine.
#![forbid(unsafe_code)]

mod foundation;

pub mod anim;
pub mod config;
pub mod engine;
pub mod grid;
pub mod layout;
pub mod obstacle;
pub mod render;
pub mod scheduler;
pub mod snake;

pub use crate::foundation::core::{
    Point, Rect, Rgb8, Rgba8Premul, SurfaceSize, Vec2, Viewport,
};
pub use crate::foundation::error::{MazevineError, MazevineResult};
pub use crate::foundation::math::Rng64;

pub use crate::anim::Ease;
pub use crate::config::{ColorRamp, EngineOpts};
pub use crate::engine::Engine;
pub use crate::grid::{DEFAULT_CELL_SIZE, Heading};
pub use crate::layout::{ContentBox, ContentSelector, LayoutProbe};
pub use crate::obstacle::{DEFAULT_PADDING, Obstacle, ObstacleField};
pub use crate::render::frame::wave_color;
pub use crate::render::raster::CpuSurface;
pub use crate::render::surface::{GradientStop, LineCap, Surface};
pub use crate::scheduler::Population;
pub use crate::snake::{MazeSnake, Segment, Stage};
