//! Cursor-relative heading navigation.
//!
//! Everything here is a pure computation over a line-ordered heading slice;
//! moving the cursor is left to the caller (see [`crate::actions`]).

use crate::parser::HeadingRecord;

/// Direction of a relative heading jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub fn offset(self) -> isize {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

/// What happens when a jump runs off either end of the heading list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Stay put.
    Stop,
    /// Land on the document's first line, or on `last_line` going forward.
    Clamp { last_line: usize },
}

impl BoundaryPolicy {
    pub fn from_setting(include_boundaries: bool, last_line: usize) -> Self {
        if include_boundaries {
            BoundaryPolicy::Clamp { last_line }
        } else {
            BoundaryPolicy::Stop
        }
    }
}

/// Index of the heading the cursor currently sits under.
///
/// This is the greatest index whose `start_line` is at or before `line`, or
/// `None` when the cursor is above the first heading.
///
/// # Arguments
///
/// * `headings` - Headings in ascending `start_line` order
/// * `line` - 0-based cursor line
pub fn nearest_heading_index(headings: &[HeadingRecord], line: usize) -> Option<usize> {
    headings
        .partition_point(|h| h.start_line <= line)
        .checked_sub(1)
}

/// Line to move to for a previous/next heading jump, or `None` for a no-op.
///
/// Going backward from inside a section body (past the heading's own
/// markup) lands on that section's heading first; a second press, now on
/// the heading line, moves on to the heading before it.
///
/// # Arguments
///
/// * `headings` - Headings of one document in ascending `start_line` order
/// * `cursor_line` - 0-based line the cursor is on
/// * `direction` - Which way to jump
/// * `policy` - What to do past the first or last heading
///
/// # Returns
///
/// The 0-based target line, or `None` when the cursor should stay put.
pub fn relative_heading(
    headings: &[HeadingRecord],
    cursor_line: usize,
    direction: Direction,
    policy: BoundaryPolicy,
) -> Option<usize> {
    if headings.is_empty() {
        return None;
    }

    let target = match nearest_heading_index(headings, cursor_line) {
        Some(nearest) => {
            let offset = match direction {
                Direction::Previous if cursor_line > headings[nearest].end_line => 0,
                _ => direction.offset(),
            };
            nearest as isize + offset
        }
        // Above the first heading: only a clamping policy treats the document
        // start as a virtual heading at index -1.
        None => match policy {
            BoundaryPolicy::Stop => return None,
            BoundaryPolicy::Clamp { .. } => -1 + direction.offset(),
        },
    };

    if target < 0 {
        return match policy {
            BoundaryPolicy::Stop => None,
            BoundaryPolicy::Clamp { .. } => Some(0),
        };
    }
    match headings.get(target as usize) {
        Some(heading) => Some(heading.start_line),
        None => match policy {
            BoundaryPolicy::Stop => None,
            BoundaryPolicy::Clamp { last_line } => Some(last_line),
        },
    }
}
