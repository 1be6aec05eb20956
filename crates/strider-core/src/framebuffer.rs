//! Heap-backed framebuffer with per-pixel change detection.
//!
//! The engine redraws the whole screen on every event, but most frames only
//! change a few numbers. Drawing into this RAM buffer first means only the
//! rectangle containing changed pixels is pushed to the real display, in a
//! single `fill_contiguous` call.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

/// Inclusive pixel bounds touched since the last flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Damage {
    left: usize,
    top: usize,
    right: usize,
    bottom: usize,
}

impl Damage {
    fn at(x: usize, y: usize) -> Self {
        Self {
            left: x,
            top: y,
            right: x,
            bottom: y,
        }
    }

    fn include(&mut self, x: usize, y: usize) {
        self.left = self.left.min(x);
        self.right = self.right.max(x);
        self.top = self.top.min(y);
        self.bottom = self.bottom.max(y);
    }

    fn width(&self) -> usize {
        self.right - self.left + 1
    }

    fn area(&self) -> Rectangle {
        Rectangle::new(
            Point::new(self.left as i32, self.top as i32),
            Size::new(self.width() as u32, (self.bottom - self.top + 1) as u32),
        )
    }
}

/// Framebuffer implementing `DrawTarget<Color = Rgb565>` for any screen size.
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb565>,
    damage: Option<Damage>,
}

impl FrameBuffer {
    /// Allocate a framebuffer of `size` filled with black pixels.
    pub fn new(size: Size) -> Self {
        let width = size.width as usize;
        let height = size.height as usize;
        Self {
            width,
            height,
            pixels: vec![Rgb565::BLACK; width * height],
            damage: None,
        }
    }

    /// Color at `point`, or `None` outside the buffer.
    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        self.index(point.x, point.y).map(|idx| self.pixels[idx])
    }

    /// Region changed since the last flush, if any.
    pub fn dirty_area(&self) -> Option<Rectangle> {
        self.damage.as_ref().map(Damage::area)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }

    /// Store `color` at an in-bounds pixel, widening the damage when it differs.
    fn put(&mut self, x: usize, y: usize, color: Rgb565) {
        let slot = &mut self.pixels[y * self.width + x];
        if *slot == color {
            return;
        }
        *slot = color;
        match self.damage.as_mut() {
            Some(damage) => damage.include(x, y),
            None => self.damage = Some(Damage::at(x, y)),
        }
    }

    /// Push the damaged region to `display` as one contiguous fill and
    /// clear the damage. Does nothing when no pixel changed.
    pub fn flush<D>(&mut self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(damage) = self.damage.take() else {
            return Ok(());
        };

        let area = damage.area();
        debug!(
            "Flushing {}x{} region at {:?}",
            area.size.width, area.size.height, area.top_left
        );

        let stride = self.width;
        let span = damage.width();
        let rows = &self.pixels;
        let colors = (damage.top..=damage.bottom).flat_map(move |y| {
            let start = y * stride + damage.left;
            rows[start..start + span].iter().copied()
        });

        display.fill_contiguous(&area, colors)
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let Some(idx) = self.index(coord.x, coord.y) {
                self.put(idx % self.width, idx / self.width, color);
            }
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        // Colors are consumed row-major over the whole area, including the
        // pixels that fall outside the buffer.
        let mut colors = colors.into_iter();
        for row in 0..area.size.height as i32 {
            for col in 0..area.size.width as i32 {
                let Some(color) = colors.next() else {
                    return Ok(());
                };
                let (x, y) = (area.top_left.x + col, area.top_left.y + row);
                if let Some(idx) = self.index(x, y) {
                    self.put(idx % self.width, idx / self.width, color);
                }
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clipped = area.intersection(&self.bounding_box());
        let Some(bottom_right) = clipped.bottom_right() else {
            return Ok(());
        };

        for y in clipped.top_left.y as usize..=bottom_right.y as usize {
            for x in clipped.top_left.x as usize..=bottom_right.x as usize {
                self.put(x, y, color);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        for y in 0..self.height {
            for x in 0..self.width {
                self.put(x, y, color);
            }
        }
        Ok(())
    }
}
