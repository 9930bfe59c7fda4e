//! Integer line walk used to sample points along an edge
//!
//! Midpoint-error stepping: the dominant axis advances every step and the
//! minor axis advances whenever the accumulated error reaches the dominant
//! delta. Both endpoints are truncated towards zero before walking, so the
//! walk starts and ends on the pixels that contain them.

use glam::{I64Vec2, Vec2};

/// Iterator over the pixel positions from `start` to `end`, inclusive.
///
/// Yields exactly `max(|dx|, |dy|) + 1` points, where the deltas are taken
/// between the truncated endpoints.
#[derive(Debug, Clone)]
pub struct LineWalk {
    pos: I64Vec2,
    /// Step taken every iteration (dominant axis only)
    major_step: I64Vec2,
    /// Extra step taken when the error overflows (minor axis only)
    minor_step: I64Vec2,
    den: u64,
    num: u64,
    num_add: u64,
    remaining: usize,
}

impl LineWalk {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        let start = start.as_i64vec2();
        let end = end.as_i64vec2();
        let delta_x = start.x.abs_diff(end.x);
        let delta_y = start.y.abs_diff(end.y);
        let sign_x = if end.x >= start.x { 1 } else { -1 };
        let sign_y = if end.y >= start.y { 1 } else { -1 };

        let (major_step, minor_step, den, num_add) = if delta_x >= delta_y {
            (I64Vec2::new(sign_x, 0), I64Vec2::new(0, sign_y), delta_x, delta_y)
        } else {
            (I64Vec2::new(0, sign_y), I64Vec2::new(sign_x, 0), delta_y, delta_x)
        };

        Self {
            pos: start,
            major_step,
            minor_step,
            den,
            num: den / 2,
            num_add,
            remaining: usize::try_from(den).unwrap_or(usize::MAX).saturating_add(1),
        }
    }

    /// Number of samples the walk produces in total
    pub fn sample_count(start: Vec2, end: Vec2) -> usize {
        Self::new(start, end).remaining
    }
}

impl Iterator for LineWalk {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let current = self.pos;

        // Never step past the end pixel
        if self.remaining > 0 {
            // num < den and num_add <= den, so neither side can wrap
            let headroom = self.den - self.num_add;
            if self.num >= headroom {
                self.num -= headroom;
                self.pos += self.minor_step;
            } else {
                self.num += self.num_add;
            }
            self.pos += self.major_step;
        }

        Some(current.as_vec2())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for LineWalk {}
