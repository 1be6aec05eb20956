//! Rendering of a [`LayoutFrame`](crate::layout::LayoutFrame) through the
//! [`Canvas`] primitives.

mod canvas;
pub mod gauge;
pub mod screen;
pub mod text;

#[cfg(test)]
pub(crate) mod recording;

pub use canvas::{ArcSpec, Canvas, EgCanvas, clock_point};
