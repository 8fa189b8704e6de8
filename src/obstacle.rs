use crate::foundation::core::{Point, Rect, SurfaceSize};
use crate::layout::{ContentBox, ContentSelector, LayoutProbe};

/// Default margin added around every content box, in layout units.
pub const DEFAULT_PADDING: f64 = 20.0;

/// A padded keep-out rectangle in surface-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
}

impl Obstacle {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }

    /// Convert a screen-space content box into a padded surface-local
    /// obstacle.
    pub fn from_content_box(b: ContentBox, surface_origin: Point, padding: f64) -> Self {
        let x = b.left - surface_origin.x - padding;
        let y = b.top - surface_origin.y - padding;
        let w = b.width + padding * 2.0;
        let h = b.height + padding * 2.0;
        Self {
            rect: Rect::new(x, y, x + w, y + h),
        }
    }

    /// Inclusive-bounds point test.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.rect.x0 && x <= self.rect.x1 && y >= self.rect.y0 && y <= self.rect.y1
    }
}

/// The published keep-out set, rebuilt wholesale from the live layout.
///
/// Consumers only ever call [`ObstacleField::collides`]; nothing outside the
/// field mutates it, and every rebuild replaces the previous set entirely.
#[derive(Clone, Debug)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    padding: f64,
}

impl ObstacleField {
    pub fn new(padding: f64) -> Self {
        Self {
            obstacles: Vec::new(),
            padding,
        }
    }

    /// Build a field from precomputed obstacles, bypassing layout sampling.
    ///
    /// Intended for hosts that already know their keep-out geometry and for
    /// tests that need shapes the mis-measurement filter would reject.
    pub fn with_obstacles(padding: f64, obstacles: Vec<Obstacle>) -> Self {
        Self { obstacles, padding }
    }

    /// Re-sample the host layout and replace the published set.
    ///
    /// Rectangles that lie fully right of or below the surface, have a
    /// non-positive dimension, or are at least as large as the surface in
    /// either dimension are dropped silently; mis-measured elements degrade
    /// the avoidance, never fail it.
    #[tracing::instrument(skip(self, probe))]
    pub fn rebuild(&mut self, probe: &dyn LayoutProbe, selectors: &[ContentSelector]) {
        let vp = probe.viewport();
        let size = vp.size;
        self.obstacles.clear();
        for b in probe.content_boxes(selectors) {
            let ob = Obstacle::from_content_box(b, vp.origin, self.padding);
            if Self::plausible(ob, size) {
                self.obstacles.push(ob);
            }
        }
        tracing::debug!(count = self.obstacles.len(), "obstacle set rebuilt");
    }

    fn plausible(ob: Obstacle, size: SurfaceSize) -> bool {
        let w = ob.rect.width();
        let h = ob.rect.height();
        ob.rect.x0 < size.width
            && ob.rect.y0 < size.height
            && w > 0.0
            && h > 0.0
            && w < size.width
            && h < size.height
    }

    /// `true` iff `(x, y)` lies within any published obstacle.
    ///
    /// Called many times per spawn attempt and per direction search; it is a
    /// plain scan over the published set with no allocation.
    pub fn collides(&self, x: f64, y: f64) -> bool {
        self.obstacles.iter().any(|ob| ob.contains(x, y))
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }
}
