//! Static display metadata for the four quadrants.

use serde::Serialize;

use crate::enums::Quadrant;

/// Label and ordering for one quadrant. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuadrantInfo {
    pub id: Quadrant,
    pub title: &'static str,
    pub subtitle: &'static str,
}

/// Board layout, in display order.
pub const QUADRANTS: [QuadrantInfo; 4] = [
    QuadrantInfo {
        id: Quadrant::Q1,
        title: "Do First",
        subtitle: "Urgent & Important",
    },
    QuadrantInfo {
        id: Quadrant::Q2,
        title: "Schedule",
        subtitle: "Not Urgent & Important",
    },
    QuadrantInfo {
        id: Quadrant::Q3,
        title: "Delegate",
        subtitle: "Urgent & Not Important",
    },
    QuadrantInfo {
        id: Quadrant::Q4,
        title: "Eliminate",
        subtitle: "Not Urgent & Not Important",
    },
];

impl Quadrant {
    #[must_use]
    pub const fn info(self) -> &'static QuadrantInfo {
        match self {
            Self::Q1 => &QUADRANTS[0],
            Self::Q2 => &QUADRANTS[1],
            Self::Q3 => &QUADRANTS[2],
            Self::Q4 => &QUADRANTS[3],
        }
    }
}
