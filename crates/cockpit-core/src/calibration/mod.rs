//! Overlay calibration: a four-corner region plus a button anchor, captured
//! in the background image's natural pixel space.

mod editor;
mod frame;
pub mod store;

pub use editor::{CalibrationEditor, ClickOutcome, COMPLETE_HINT, IDLE_HINT, parse_coordinate};
pub use frame::ImageFrame;
pub use store::{CalibrationStore, KeyValueStore, MemoryStore, STORAGE_KEY, StoreError};

use serde::{Deserialize, Serialize};

pub const DEFAULT_LABEL: &str = "Start Engine";
pub const DEFAULT_QUADRILATERAL: [Point; 4] = [
    Point::new(400.0, 50.0),
    Point::new(1500.0, 50.0),
    Point::new(1400.0, 950.0),
    Point::new(500.0, 950.0),
];
pub const DEFAULT_ANCHOR: Point = Point::new(950.0, 500.0);

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Quadrilateral corners in capture order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Corner {
    A,
    B,
    C,
    D,
}

impl Corner {
    pub const ALL: [Corner; 4] = [Self::A, Self::B, Self::C, Self::D];

    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }

    const fn next(self) -> Option<Self> {
        match self {
            Self::A => Some(Self::B),
            Self::B => Some(Self::C),
            Self::C => Some(Self::D),
            Self::D => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CalibrationConfig {
    pub quadrilateral: [Point; 4],
    pub anchor: Point,
    pub label: String,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            quadrilateral: DEFAULT_QUADRILATERAL,
            anchor: DEFAULT_ANCHOR,
            label: DEFAULT_LABEL.to_string(),
        }
    }
}

impl CalibrationConfig {
    /// Restore default geometry. The label is left alone.
    pub fn reset_geometry(&mut self) {
        self.quadrilateral = DEFAULT_QUADRILATERAL;
        self.anchor = DEFAULT_ANCHOR;
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PickProgress {
    /// No pick sequence was running.
    Ignored,
    /// Point stored; waiting for the next corner.
    Next(Corner),
    /// Corner D stored; the sequence is over.
    Complete,
}

/// Ordered four-click capture.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PickSession {
    #[default]
    Inactive,
    Picking(Corner),
}

impl PickSession {
    /// Begin at corner A. A sequence already underway is not restarted.
    pub fn start(&mut self) -> bool {
        match self {
            Self::Inactive => {
                *self = Self::Picking(Corner::A);
                true
            }
            Self::Picking(_) => false,
        }
    }

    pub fn submit(&mut self, quadrilateral: &mut [Point; 4], point: Point) -> PickProgress {
        let Self::Picking(corner) = *self else {
            return PickProgress::Ignored;
        };

        quadrilateral[corner.index()] = point;
        match corner.next() {
            Some(next) => {
                *self = Self::Picking(next);
                PickProgress::Next(next)
            }
            None => {
                *self = Self::Inactive;
                PickProgress::Complete
            }
        }
    }

    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Picking(_))
    }
}
