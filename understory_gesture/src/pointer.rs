// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Active pointer bookkeeping: per-pointer movement tracking plus a primary id.
//!
//! ## Usage
//!
//! 1) Call [`PointerSet::press`] when a pointer goes down; it becomes primary.
//! 2) On each move, call [`PointerRecord::update`] on the record from
//!    [`PointerSet::get_mut`] to get the movement delta since the last update.
//! 3) Call [`PointerSet::release`] when the pointer goes up or leaves; the
//!    primary role moves to the first remaining pointer.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_gesture::pointer::PointerSet;
//!
//! let mut pointers = PointerSet::new();
//! pointers.press(1, Point::new(10.0, 20.0), 0.0);
//! pointers.press(2, Point::new(50.0, 20.0), 5.0);
//! assert_eq!(pointers.primary(), Some(2));
//!
//! let delta = pointers.get_mut(1).unwrap().update(Point::new(15.0, 25.0));
//! assert_eq!(delta, Vec2::new(5.0, 5.0));
//!
//! pointers.release(2);
//! assert_eq!(pointers.primary(), Some(1));
//! ```

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::input::PointerId;

/// Inline capacity of the pointer set; two-finger gestures never spill.
const INLINE_POINTERS: usize = 4;

/// One pointer that is currently down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerRecord {
    /// Pointer identifier.
    pub id: PointerId,
    /// Last observed screen position.
    pub position: Point,
    /// Unsigned movement accumulated along each axis since the press.
    pub travel: Vec2,
    /// Host timestamp of the press, in milliseconds.
    pub pressed_at: f64,
}

impl PointerRecord {
    /// Creates a record for a pointer pressed at `position`.
    #[must_use]
    pub const fn new(id: PointerId, position: Point, pressed_at: f64) -> Self {
        Self {
            id,
            position,
            travel: Vec2::ZERO,
            pressed_at,
        }
    }

    /// Moves to `position`, accumulating travel, and returns the delta since
    /// the last position.
    pub fn update(&mut self, position: Point) -> Vec2 {
        let delta = self.reposition(position);
        self.travel += Vec2::new(delta.x.abs(), delta.y.abs());
        delta
    }

    /// Moves to `position` without accumulating travel and returns the delta.
    pub fn reposition(&mut self, position: Point) -> Vec2 {
        let delta = position - self.position;
        self.position = position;
        delta
    }
}

/// Insertion-ordered set of active pointers with a designated primary.
///
/// Lookups scan linearly; the set holds a handful of pointers at most.
#[derive(Clone, Debug, Default)]
pub struct PointerSet {
    records: SmallVec<[PointerRecord; INLINE_POINTERS]>,
    primary: Option<PointerId>,
}

impl PointerSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active pointers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no pointer is down.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Active pointers in press order.
    #[must_use]
    pub fn records(&self) -> &[PointerRecord] {
        &self.records
    }

    /// The primary pointer id, if any pointer is down.
    #[must_use]
    pub fn primary(&self) -> Option<PointerId> {
        self.primary
    }

    /// Makes `id` the primary pointer if it is active.
    pub fn set_primary(&mut self, id: PointerId) {
        if self.contains(id) {
            self.primary = Some(id);
        }
    }

    /// Returns `true` if `id` is active.
    #[must_use]
    pub fn contains(&self, id: PointerId) -> bool {
        self.index_of(id).is_some()
    }

    /// Returns the record for `id`.
    #[must_use]
    pub fn get(&self, id: PointerId) -> Option<&PointerRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Returns the record for `id` mutably.
    pub fn get_mut(&mut self, id: PointerId) -> Option<&mut PointerRecord> {
        self.records.iter_mut().find(|r| r.id == id)
    }

    /// First active pointer whose id differs from `id`.
    #[must_use]
    pub fn first_other(&self, id: PointerId) -> Option<&PointerRecord> {
        self.records.iter().find(|r| r.id != id)
    }

    /// Records a press and makes it primary.
    ///
    /// Pressing an id that is already active restarts its record in place, so
    /// ids stay unique and the press order is kept.
    pub fn press(&mut self, id: PointerId, position: Point, pressed_at: f64) {
        let record = PointerRecord::new(id, position, pressed_at);
        match self.index_of(id) {
            Some(index) => self.records[index] = record,
            None => self.records.push(record),
        }
        self.primary = Some(id);
    }

    /// Removes `id` and returns its record.
    ///
    /// When the released pointer was primary, the first remaining pointer
    /// becomes primary, or none if the set is now empty.
    pub fn release(&mut self, id: PointerId) -> Option<PointerRecord> {
        let removed = self.index_of(id).map(|index| self.records.remove(index));
        if self.primary == Some(id) {
            self.primary = self.records.first().map(|r| r.id);
        }
        removed
    }

    /// Removes every pointer.
    pub fn clear(&mut self) {
        self.records.clear();
        self.primary = None;
    }

    fn index_of(&self, id: PointerId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }
}
