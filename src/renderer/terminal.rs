//! Terminal canvas backend
//!
//! Items live in field coordinates (400x400). `present` rasterizes them into
//! the terminal grid, sampling each cell at its center, and writes the grid
//! with queued crossterm commands. Items paint in creation order; text is
//! painted last, over whatever rectangle is underneath.

use std::collections::BTreeMap;
use std::io::{self, Write};

use crossterm::{cursor, queue, style};
use glam::Vec2;

use super::Renderer;
use super::shapes::{Anchor, Color, ShapeStyle, Tag, TextStyle};
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::sim::Aabb;

/// Handle of an item on a `TerminalCanvas`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u32);

#[derive(Debug, Clone)]
enum ItemKind {
    Rect {
        bounds: Aabb,
        style: ShapeStyle,
    },
    Text {
        at: Vec2,
        content: String,
        style: TextStyle,
    },
}

#[derive(Debug, Clone)]
struct Item {
    kind: ItemKind,
    tag: Tag,
}

/// One terminal character cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::White,
            bg: Color::Black,
        }
    }
}

pub struct TerminalCanvas<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    next_id: u32,
    /// Keyed by creation order, which is paint order
    items: BTreeMap<ItemId, Item>,
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            cols: cols.max(1),
            rows: rows.max(1),
            next_id: 0,
            items: BTreeMap::new(),
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn insert(&mut self, kind: ItemKind, tag: Tag) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.insert(id, Item { kind, tag });
        id
    }

    /// Field units per cell on each axis
    fn cell_size(&self) -> Vec2 {
        Vec2::new(
            FIELD_WIDTH / self.cols as f32,
            FIELD_HEIGHT / self.rows as f32,
        )
    }

    /// Current picture as a grid of cells (row-major)
    pub fn rasterize(&self) -> Vec<Vec<Cell>> {
        let cols = self.cols as usize;
        let rows = self.rows as usize;
        let cell = self.cell_size();
        let mut grid = vec![vec![Cell::default(); cols]; rows];

        for item in self.items.values() {
            if let ItemKind::Rect { bounds, style } = &item.kind {
                for (r, row) in grid.iter_mut().enumerate() {
                    let y = (r as f32 + 0.5) * cell.y;
                    if y < bounds.min.y || y >= bounds.max.y {
                        continue;
                    }
                    for (c, out) in row.iter_mut().enumerate() {
                        let x = (c as f32 + 0.5) * cell.x;
                        if x >= bounds.min.x && x < bounds.max.x {
                            out.bg = style.fill;
                            out.ch = ' ';
                        }
                    }
                }
            }
        }

        for item in self.items.values() {
            if let ItemKind::Text { at, content, style } = &item.kind {
                let row = (at.y / cell.y).floor();
                if row < 0.0 || row >= rows as f32 {
                    continue;
                }
                let len = content.chars().count() as i64;
                let anchor_col = (at.x / cell.x).floor() as i64;
                let start = match style.anchor {
                    Anchor::Center => anchor_col - len / 2,
                    Anchor::NorthWest => anchor_col,
                    Anchor::NorthEast => anchor_col - len,
                };
                let line = &mut grid[row as usize];
                for (i, ch) in content.chars().enumerate() {
                    let col = start + i as i64;
                    if col < 0 || col >= cols as i64 {
                        continue;
                    }
                    let out = &mut line[col as usize];
                    out.ch = ch;
                    out.fg = style.color;
                }
            }
        }

        grid
    }
}

impl<W: Write> Renderer for TerminalCanvas<W> {
    type Handle = ItemId;

    fn create_rect(&mut self, bounds: Aabb, style: ShapeStyle, tag: Tag) -> ItemId {
        self.insert(ItemKind::Rect { bounds, style }, tag)
    }

    fn move_rect(&mut self, handle: ItemId, bounds: Aabb) {
        match self.items.get_mut(&handle).map(|i| &mut i.kind) {
            Some(ItemKind::Rect { bounds: b, .. }) => *b = bounds,
            _ => log::warn!("move_rect on unknown rectangle {:?}", handle),
        }
    }

    fn create_text(&mut self, at: Vec2, content: &str, style: TextStyle, tag: Tag) -> ItemId {
        self.insert(
            ItemKind::Text {
                at,
                content: content.to_string(),
                style,
            },
            tag,
        )
    }

    fn set_text(&mut self, handle: ItemId, content: &str) {
        match self.items.get_mut(&handle).map(|i| &mut i.kind) {
            Some(ItemKind::Text { content: c, .. }) => {
                c.clear();
                c.push_str(content);
            }
            _ => log::warn!("set_text on unknown text {:?}", handle),
        }
    }

    fn delete(&mut self, handle: ItemId) {
        self.items.remove(&handle);
    }

    fn delete_tag(&mut self, tag: Tag) {
        self.items.retain(|_, item| item.tag != tag);
    }

    fn present(&mut self) -> io::Result<()> {
        let grid = self.rasterize();

        for (r, row) in grid.iter().enumerate() {
            queue!(self.out, cursor::MoveTo(0, r as u16))?;
            let mut colors = None;
            for cell in row {
                if colors != Some((cell.fg, cell.bg)) {
                    queue!(
                        self.out,
                        style::SetForegroundColor(cell.fg.into()),
                        style::SetBackgroundColor(cell.bg.into())
                    )?;
                    colors = Some((cell.fg, cell.bg));
                }
                queue!(self.out, style::Print(cell.ch))?;
            }
        }

        queue!(self.out, style::ResetColor)?;
        self.out.flush()
    }
}
