//! Rendering module
//!
//! The simulation never draws. A `Renderer` is a retained-mode canvas: items
//! are created once, then moved, re-texted or deleted through handles the
//! renderer hands out. `Scene` owns the mapping from simulation ids to those
//! handles.

pub mod scene;
pub mod shapes;
pub mod terminal;

use std::fmt::Debug;
use std::io;

use glam::Vec2;

use crate::sim::Aabb;

pub use scene::Scene;
pub use shapes::{Anchor, Color, ShapeStyle, Tag, TextStyle};
pub use terminal::{Cell, ItemId, TerminalCanvas};

/// Retained-mode drawing capability
pub trait Renderer {
    /// Renderer-assigned identity of a drawn item
    type Handle: Copy + Eq + Debug;

    fn create_rect(&mut self, bounds: Aabb, style: ShapeStyle, tag: Tag) -> Self::Handle;

    fn move_rect(&mut self, handle: Self::Handle, bounds: Aabb);

    fn create_text(&mut self, at: Vec2, content: &str, style: TextStyle, tag: Tag)
    -> Self::Handle;

    fn set_text(&mut self, handle: Self::Handle, content: &str);

    fn delete(&mut self, handle: Self::Handle);

    /// Delete every item carrying `tag`
    fn delete_tag(&mut self, tag: Tag);

    /// Push the current picture to the output
    fn present(&mut self) -> io::Result<()>;
}
