//! Presentational vocabulary shared by the scene and the backends

/// Named palette (the original canvas colors plus text colors)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    SkyBlue,
    SaddleBrown,
    Green,
    Brown,
    Red,
    Black,
    White,
}

impl Color {
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::SkyBlue => (135, 206, 235),
            Color::SaddleBrown => (139, 69, 19),
            Color::Green => (0, 128, 0),
            Color::Brown => (165, 42, 42),
            Color::Red => (255, 0, 0),
            Color::Black => (0, 0, 0),
            Color::White => (255, 255, 255),
        }
    }
}

impl From<Color> for crossterm::style::Color {
    fn from(color: Color) -> Self {
        let (r, g, b) = color.rgb();
        crossterm::style::Color::Rgb { r, g, b }
    }
}

/// Fill style for rectangles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeStyle {
    pub fill: Color,
}

impl ShapeStyle {
    pub fn filled(fill: Color) -> Self {
        Self { fill }
    }
}

/// Which point of the text the position refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    Center,
    NorthWest,
    NorthEast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub color: Color,
    /// Point size (backends without fonts ignore it)
    pub size: u16,
    pub anchor: Anchor,
}

impl TextStyle {
    pub fn new(color: Color, size: u16, anchor: Anchor) -> Self {
        Self {
            color,
            size,
            anchor,
        }
    }
}

/// Group label for bulk deletion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Background,
    Player,
    Obstacle,
    Hud,
    Banner,
}
