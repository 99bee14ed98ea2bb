use rand::Rng;
use strum::{EnumCount, FromRepr, VariantArray};

/// Absolute cell coordinates in a [`GridWorld`]
pub type Point = (i32, i32);

/// A relative displacement between two cells
pub type Offset = (i32, i32);

/// One of the four single-step movement directions
///
/// The discriminants double as action indices: a Q-value row and the
/// [`DELTAS`] table are both indexed in this order.
#[derive(EnumCount, FromRepr, VariantArray, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

/// Unit displacement per [`Direction`], indexed by discriminant
pub const DELTAS: [Offset; Direction::COUNT] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

impl Direction {
    pub const fn delta(self) -> Offset {
        DELTAS[self as usize]
    }
}

/// What a registered mover is, for perception and capture queries
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoverKind {
    Hunter,
    Target,
}

/// A positioned entity registered in a [`GridWorld`] for the current episode
#[derive(Clone, Copy, Debug)]
struct Mover {
    kind: MoverKind,
    pos: Point,
}

impl Mover {
    /// Attempt a single step, committing only if the candidate cell is in
    /// bounds; walls neither wrap nor bounce
    fn step(&mut self, direction: Direction, width: i32, height: i32) {
        let (dx, dy) = direction.delta();
        let candidate = (self.pos.0 + dx, self.pos.1 + dy);
        if in_bounds(candidate, width, height) {
            self.pos = candidate;
        }
    }
}

fn in_bounds((x, y): Point, width: i32, height: i32) -> bool {
    (0..width).contains(&x) && (0..height).contains(&y)
}

/// Handle to a registered mover
///
/// Invalidated when the world is [`reset`](GridWorld::reset); using a stale
/// handle afterward panics on the registry index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoverId(usize);

/// A bounded discrete 2D grid holding the movers of the current episode
///
/// The world owns mover state only for the episode in progress; agents keep
/// [`MoverId`] handles and pass the world explicitly into every perception,
/// movement, and capture call.
pub struct GridWorld {
    width: i32,
    height: i32,
    movers: Vec<Mover>,
}

impl GridWorld {
    /// Create an empty world of the given dimensions
    ///
    /// **Panics** if either dimension is not positive
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Self {
            width,
            height,
            movers: Vec::new(),
        }
    }

    pub const fn width(&self) -> i32 {
        self.width
    }

    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Register a mover at `pos`, preserving registration order
    ///
    /// No uniqueness check is made; two movers may share a cell.
    ///
    /// **Panics** if `pos` is out of bounds
    pub fn add_mover(&mut self, kind: MoverKind, pos: Point) -> MoverId {
        assert!(
            in_bounds(pos, self.width, self.height),
            "mover position {:?} is outside the {}x{} grid",
            pos,
            self.width,
            self.height,
        );
        self.movers.push(Mover { kind, pos });
        MoverId(self.movers.len() - 1)
    }

    /// Step a registered mover one cell, clamped at the walls
    pub fn step_mover(&mut self, id: MoverId, direction: Direction) {
        let (width, height) = (self.width, self.height);
        self.movers[id.0].step(direction, width, height);
    }

    pub fn position(&self, id: MoverId) -> Point {
        self.movers[id.0].pos
    }

    pub fn mover_count(&self) -> usize {
        self.movers.len()
    }

    /// Relative offset of the target as seen from `origin`, or `None` if it
    /// lies outside the `(rx, ry)` perception window
    ///
    /// Only the first registered target is consulted; exactly one registered
    /// target is a documented precondition.
    ///
    /// **Panics** if no target is registered — a fatal configuration error
    pub fn perceive(&self, origin: Point, (rx, ry): (i32, i32)) -> Option<Offset> {
        let target = self
            .movers
            .iter()
            .find(|m| m.kind == MoverKind::Target)
            .expect("perception queried with no registered target");
        let offset = (target.pos.0 - origin.0, target.pos.1 - origin.1);
        (offset.0.abs() <= rx && offset.1.abs() <= ry).then_some(offset)
    }

    /// Whether any hunter currently shares a cell with any target
    pub fn is_caught(&self) -> bool {
        self.movers
            .iter()
            .filter(|m| m.kind == MoverKind::Hunter)
            .any(|h| {
                self.movers
                    .iter()
                    .any(|t| t.kind == MoverKind::Target && t.pos == h.pos)
            })
    }

    /// Clear the mover registry, invalidating all outstanding handles
    pub fn reset(&mut self) {
        self.movers.clear();
    }

    /// Sample a uniformly random in-bounds cell
    pub fn random_point(&self, rng: &mut impl Rng) -> Point {
        (rng.gen_range(0..self.width), rng.gen_range(0..self.height))
    }
}
