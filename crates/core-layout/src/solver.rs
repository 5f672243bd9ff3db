//! The four-phase constraint solver: fixed sizes, then minimums, then
//! proportional fill, then a max-cap post-process.
//!
//! Phases run in this fixed order, each only touching slots the previous
//! phases left unassigned. `Max` is deliberately not a sizing phase of its
//! own - it only clips whatever a slot already received, which can leave
//! span unallocated if a `Max` slot was never also a `Fill` target. That is
//! the documented behavior, not a bug: redistributing the clipped remainder
//! would require another pass this solver intentionally does not make.

use core_geometry::Rect;

use crate::constraint::Constraint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub direction: Direction,
    pub constraints: Vec<Constraint>,
    pub margin_h: u16,
    pub margin_v: u16,
}

impl Layout {
    pub fn new(direction: Direction, constraints: Vec<Constraint>) -> Self {
        Self { direction, constraints, margin_h: 0, margin_v: 0 }
    }

    pub fn horizontal(constraints: Vec<Constraint>) -> Self {
        Self::new(Direction::Horizontal, constraints)
    }

    pub fn vertical(constraints: Vec<Constraint>) -> Self {
        Self::new(Direction::Vertical, constraints)
    }

    pub fn margin(mut self, margin: u16) -> Self {
        self.margin_h = margin;
        self.margin_v = margin;
        self
    }

    pub fn margin_hv(mut self, h: u16, v: u16) -> Self {
        self.margin_h = h;
        self.margin_v = v;
        self
    }
}

/// Resolve `layout` against `area`, returning one `Rect` per constraint, in
/// the same order the constraints were given.
pub fn split(layout: &Layout, area: Rect) -> Vec<Rect> {
    let working = area.shrink_hv(layout.margin_h, layout.margin_v);
    let n = layout.constraints.len();
    if n == 0 || working.is_empty() {
        return vec![Rect::ZERO; n];
    }

    let span: u32 = match layout.direction {
        Direction::Horizontal => u32::from(working.width),
        Direction::Vertical => u32::from(working.height),
    };

    let mut sizes = vec![0u32; n];
    let mut assigned = vec![false; n];
    let mut remaining = span;

    // Phase 1: fixed-size constraints (Length/Percentage/Ratio).
    for (i, c) in layout.constraints.iter().enumerate() {
        if let Some(intended) = c.fixed_size(span) {
            let size = intended.min(remaining);
            sizes[i] = size;
            assigned[i] = true;
            remaining -= size;
        }
    }

    // Phase 2: minimums, first-come-first-served against what's left.
    for (i, c) in layout.constraints.iter().enumerate() {
        if assigned[i] {
            continue;
        }
        if let Constraint::Min(n) = c {
            let n = u32::from(*n);
            if n <= remaining {
                sizes[i] = n;
                assigned[i] = true;
                remaining -= n;
            }
        }
    }

    // Phase 3: fill, proportional to priority with remainder distributed
    // left-to-right among the fill slots.
    let fill_indices: Vec<usize> = layout
        .constraints
        .iter()
        .enumerate()
        .filter(|(i, c)| !assigned[*i] && matches!(c, Constraint::Fill(_)))
        .map(|(i, _)| i)
        .collect();
    if !fill_indices.is_empty() {
        let total_priority: u64 = fill_indices
            .iter()
            .map(|&i| match layout.constraints[i] {
                Constraint::Fill(p) => u64::from(p.max(1)),
                _ => unreachable!(),
            })
            .sum();
        let total_priority = total_priority.max(1);
        let mut distributed = 0u32;
        for &i in &fill_indices {
            let priority = match layout.constraints[i] {
                Constraint::Fill(p) => u64::from(p.max(1)),
                _ => unreachable!(),
            };
            let share = (u64::from(remaining) * priority / total_priority) as u32;
            sizes[i] = share;
            distributed += share;
        }
        let mut leftover = remaining - distributed;
        let mut idx = 0;
        while leftover > 0 && !fill_indices.is_empty() {
            sizes[fill_indices[idx % fill_indices.len()]] += 1;
            leftover -= 1;
            idx += 1;
        }
    }

    // Phase 4: Max caps as a post-process; excess is simply returned to the
    // unallocated pool rather than redistributed.
    for (i, c) in layout.constraints.iter().enumerate() {
        if let Constraint::Max(n) = c {
            let n = u32::from(*n);
            if sizes[i] > n {
                sizes[i] = n;
            }
        }
    }

    let mut rects = Vec::with_capacity(n);
    let mut cursor = match layout.direction {
        Direction::Horizontal => working.x,
        Direction::Vertical => working.y,
    };
    for &size in &sizes {
        let size = size.min(u32::from(u16::MAX)) as u16;
        let rect = match layout.direction {
            Direction::Horizontal => Rect::new(cursor, working.y, size, working.height),
            Direction::Vertical => Rect::new(working.x, cursor, working.width, size),
        };
        rects.push(rect);
        cursor = cursor.saturating_add(size);
    }
    rects
}
