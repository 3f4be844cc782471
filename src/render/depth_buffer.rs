//! Per-pixel nearest-depth storage.
//!
//! Cells hold `1/z` of the nearest surface written so far. Larger values are
//! nearer; `0.0` means nothing has been drawn (infinitely far). The buffer
//! uses the same centered addressing as [`Canvas`](crate::canvas::Canvas).

use crate::canvas::Point2;

pub struct DepthBuffer {
    values: Vec<f32>,
    width: u32,
    height: u32,
}

impl DepthBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        debug_assert!(width > 0 && height > 0, "depth buffer dimensions must be non-zero");
        Self {
            values: vec![0.0; (width * height) as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index_of(&self, point: Point2) -> Option<usize> {
        let x = (self.width / 2) as i32 + point.x;
        let y = (self.height / 2) as i32 - point.y - 1;
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return None;
        }
        Some(x as usize + y as usize * self.width as usize)
    }

    /// Stores `inv_z` if it is strictly nearer than the current value.
    ///
    /// Returns `true` when the value was written. Off-buffer points and ties
    /// return `false`; the first writer of a given depth wins.
    #[inline]
    pub fn test_and_set(&mut self, point: Point2, inv_z: f32) -> bool {
        let Some(idx) = self.index_of(point) else {
            return false;
        };
        if self.values[idx] < inv_z {
            self.values[idx] = inv_z;
            return true;
        }
        false
    }

    /// Stored `1/z` at `point`, or `None` when off-buffer.
    pub fn get(&self, point: Point2) -> Option<f32> {
        self.index_of(point).map(|idx| self.values[idx])
    }

    /// Resets every cell to "nothing drawn".
    pub fn clear(&mut self) {
        self.values.fill(0.0);
    }
}
