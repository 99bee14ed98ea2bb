use crate::grid::Offset;

/// The rectangular window of relative offsets a hunter can observe
///
/// A window of range `(rx, ry)` sees every offset with `|dx| <= rx` and
/// `|dy| <= ry`, and encodes each as a row-major state id; one extra
/// sentinel id stands for "target outside the window."
#[derive(Clone, Copy, Debug)]
pub struct PerceptionWindow {
    rx: i32,
    ry: i32,
}

impl PerceptionWindow {
    /// **Panics** if either range component is negative
    pub fn new(rx: i32, ry: i32) -> Self {
        assert!(rx >= 0 && ry >= 0, "perception range must be non-negative");
        Self { rx, ry }
    }

    pub const fn range(&self) -> (i32, i32) {
        (self.rx, self.ry)
    }

    /// Total state count: one id per visible offset plus the sentinel
    pub const fn states(&self) -> usize {
        ((2 * self.rx + 1) * (2 * self.ry + 1)) as usize + 1
    }

    /// The reserved id for "target not visible"
    pub const fn sentinel(&self) -> usize {
        self.states() - 1
    }

    /// Encode an observation as a state id
    ///
    /// `None` maps to the sentinel; `(dx, dy)` maps row-major to
    /// `(dx + rx) * (2·ry + 1) + (dy + ry)`. Over the window's offsets plus
    /// `None` this is a bijection onto `[0, states())`.
    pub fn state_id(&self, seen: Option<Offset>) -> usize {
        match seen {
            Some((dx, dy)) => {
                debug_assert!(dx.abs() <= self.rx && dy.abs() <= self.ry);
                ((dx + self.rx) * (2 * self.ry + 1) + (dy + self.ry)) as usize
            }
            None => self.sentinel(),
        }
    }
}

/// The observation a hunter acts on for one step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Percept {
    /// Relative target offset, or `None` if nothing is visible or remembered
    pub seen: Option<Offset>,
    /// Whether `seen` was substituted from memory rather than freshly observed
    pub guessed: bool,
}

/// Strategy deciding which observation a hunter acts on and whether the step
/// is eligible for a Q-update
///
/// `fresh` is the raw perception query result; the returned [`Percept`]
/// carries the observation actually used. A `guessed` percept means the step
/// exploits possibly-stale information and must not be reinforced.
pub trait Perception {
    fn observe(&mut self, fresh: Option<Offset>) -> Percept;
}

/// Acts only on fresh observations; never guesses
#[derive(Default)]
pub struct Direct;

impl Perception for Direct {
    fn observe(&mut self, fresh: Option<Offset>) -> Percept {
        Percept {
            seen: fresh,
            guessed: false,
        }
    }
}

/// Substitutes the last sighting when the target is out of view
///
/// Fresh sightings are remembered and used as-is. When nothing is visible,
/// the stale offset (or nothing, if the target was never seen) is used
/// instead and the step is flagged as a guess. The remembered offset always
/// equals the observation actually used.
#[derive(Default)]
pub struct ShortTermMemory {
    last: Option<Offset>,
}

impl Perception for ShortTermMemory {
    fn observe(&mut self, fresh: Option<Offset>) -> Percept {
        let guessed = fresh.is_none();
        if !guessed {
            self.last = fresh;
        }
        Percept {
            seen: self.last,
            guessed,
        }
    }
}
