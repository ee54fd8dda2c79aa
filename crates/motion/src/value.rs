//! Shared animated scalars.
//!
//! An [`AnimatedValue`] is owned by whoever created it (a screen, an
//! engine). Schedulers only ever hold a [`WeakValue`], so once the owner is
//! dropped, frames for that value go nowhere and the transition winds down.

use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};

/// A named scalar driven by transitions.
///
/// Cloning shares the same cell: every clone observes the same value.
#[derive(Clone)]
pub struct AnimatedValue {
    name: &'static str,
    cell: Rc<Cell<f64>>,
}

impl AnimatedValue {
    /// Create a value resting at `initial`.
    #[must_use]
    pub fn new(name: &'static str, initial: f64) -> Self {
        Self {
            name,
            cell: Rc::new(Cell::new(initial)),
        }
    }

    /// Name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> f64 {
        self.cell.get()
    }

    /// Snap to `value` immediately.
    pub fn set(&self, value: f64) {
        self.cell.set(value);
    }

    /// Non-owning handle for schedulers.
    #[must_use]
    pub fn downgrade(&self) -> WeakValue {
        WeakValue {
            name: self.name,
            cell: Rc::downgrade(&self.cell),
        }
    }
}

impl fmt::Debug for AnimatedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimatedValue")
            .field("name", &self.name)
            .field("value", &self.get())
            .finish()
    }
}

/// Non-owning handle to an [`AnimatedValue`].
#[derive(Clone)]
pub struct WeakValue {
    name: &'static str,
    cell: Weak<Cell<f64>>,
}

impl WeakValue {
    /// Recover the value if its owner is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<AnimatedValue> {
        self.cell.upgrade().map(|cell| AnimatedValue {
            name: self.name,
            cell,
        })
    }

    /// Name of the underlying value.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether both handles point at the same value.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.cell, &other.cell)
    }
}

impl fmt::Debug for WeakValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakValue")
            .field("name", &self.name)
            .field("alive", &(self.cell.strong_count() > 0))
            .finish()
    }
}

/// Map `value` from the `input` range onto the `output` range.
///
/// Values outside `input` extrapolate linearly. A zero-width input range maps
/// everything to the start of `output`.
///
/// ```rust
/// use motion::interpolate;
///
/// assert_eq!(interpolate(0.5, (0.0, 1.0), (0.0, 360.0)), 180.0);
/// assert_eq!(interpolate(1.0, (0.0, 1.0), (50.0, 0.0)), 0.0);
/// ```
#[must_use]
pub fn interpolate(value: f64, input: (f64, f64), output: (f64, f64)) -> f64 {
    let (in_start, in_end) = input;
    let (out_start, out_end) = output;
    let span = in_end - in_start;
    if span.abs() < f64::EPSILON {
        return out_start;
    }
    let t = (value - in_start) / span;
    out_start + t * (out_end - out_start)
}
