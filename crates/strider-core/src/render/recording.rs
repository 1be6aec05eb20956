//! Canvas double that records every call.

extern crate alloc;

use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::String;

use crate::layout::TextSlot;
use crate::render::{ArcSpec, Canvas};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        rect: Rectangle,
        color: Rgb565,
    },
    Circle {
        center: Point,
        radius: u32,
        color: Rgb565,
    },
    Line {
        from: Point,
        to: Point,
        width: u32,
        color: Rgb565,
    },
    Arc {
        arc: ArcSpec,
        color: Rgb565,
    },
    Text {
        text: String<32>,
        slot: TextSlot,
        color: Rgb565,
    },
}

#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t == needle)
    }

    pub fn arcs(&self) -> impl Iterator<Item = (&ArcSpec, Rgb565)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Arc { arc, color } => Some((arc, *color)),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (Point, Point, u32, Rgb565)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Line {
                from,
                to,
                width,
                color,
            } => Some((*from, *to, *width, *color)),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = (Rectangle, Rgb565)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Rect { rect, color } => Some((*rect, *color)),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    type Error = Infallible;

    fn fill_rect(&mut self, rect: Rectangle, color: Rgb565) -> Result<(), Infallible> {
        self.ops.push(DrawOp::Rect { rect, color });
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, radius: u32, color: Rgb565) -> Result<(), Infallible> {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            color,
        });
        Ok(())
    }

    fn draw_line(
        &mut self,
        from: Point,
        to: Point,
        width: u32,
        color: Rgb565,
    ) -> Result<(), Infallible> {
        self.ops.push(DrawOp::Line {
            from,
            to,
            width,
            color,
        });
        Ok(())
    }

    fn fill_arc(&mut self, arc: ArcSpec, color: Rgb565) -> Result<(), Infallible> {
        self.ops.push(DrawOp::Arc { arc, color });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, slot: &TextSlot, color: Rgb565) -> Result<(), Infallible> {
        let mut owned = String::new();
        owned.push_str(text).ok();
        self.ops.push(DrawOp::Text {
            text: owned,
            slot: *slot,
            color,
        });
        Ok(())
    }
}
