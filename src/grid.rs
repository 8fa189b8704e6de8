use crate::foundation::core::Vec2;

/// Default lattice pitch in layout units.
pub const DEFAULT_CELL_SIZE: f64 = 100.0;

/// One of the four cardinal movement directions on the lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Heading {
    Right,
    Left,
    Down,
    Up,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::Right, Heading::Left, Heading::Down, Heading::Up];

    /// Unit step vector on the lattice.
    pub fn step(self) -> (i32, i32) {
        match self {
            Self::Right => (1, 0),
            Self::Left => (-1, 0),
            Self::Down => (0, 1),
            Self::Up => (0, -1),
        }
    }

    /// The exact opposite heading.
    pub fn reverse(self) -> Heading {
        match self {
            Self::Right => Self::Left,
            Self::Left => Self::Right,
            Self::Down => Self::Up,
            Self::Up => Self::Down,
        }
    }

    /// Step vector scaled to one lattice cell.
    pub fn offset(self, cell_size: f64) -> Vec2 {
        let (dx, dy) = self.step();
        Vec2::new(f64::from(dx) * cell_size, f64::from(dy) * cell_size)
    }

    /// The three headings that do not immediately backtrack.
    pub fn forward_candidates(self) -> [Heading; 3] {
        let rev = self.reverse();
        let mut out = [self; 3];
        let mut i = 0;
        for h in Self::ALL {
            if h != rev {
                out[i] = h;
                i += 1;
            }
        }
        out
    }
}
