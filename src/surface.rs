//! The 2D paint surface the kaleidoscope draws onto.
//!
//! [`Surface`] is the only drawing seam. [`DrawList`] records commands so the
//! GPU renderer can batch them and tests can inspect them; the software
//! [`RasterSurface`](crate::raster::RasterSurface) paints pixels directly.

use glam::Vec2;

use crate::color::Color;

/// A 2D paint surface with pixel coordinates, origin top-left, y down.
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    /// Clear the whole surface to its background.
    fn clear(&mut self);

    /// Fill an axis-aligned rectangle whose top-left corner is `origin`.
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color);

    /// Stroke a 1px line segment.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color);
}

/// One recorded drawing operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillRect { origin: Vec2, size: Vec2, color: Color },
    StrokeLine { from: Vec2, to: Vec2, color: Color },
}

/// A surface that records commands instead of painting.
///
/// `clear` drops everything recorded so far, so after a frame the list holds
/// exactly what that frame drew.
#[derive(Debug, Clone)]
pub struct DrawList {
    width: f32,
    height: f32,
    background: Color,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(width: f32, height: f32, background: Color) -> Self {
        Self {
            width,
            height,
            background,
            commands: Vec::new(),
        }
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Rectangles recorded since the last clear.
    pub fn rects(&self) -> impl Iterator<Item = (Vec2, Vec2, Color)> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            DrawCommand::FillRect { origin, size, color } => Some((origin, size, color)),
            _ => None,
        })
    }

    /// Lines recorded since the last clear.
    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2, Color)> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            DrawCommand::StrokeLine { from, to, color } => Some((from, to, color)),
            _ => None,
        })
    }
}

impl Surface for DrawList {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::FillRect { origin, size, color });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.commands.push(DrawCommand::StrokeLine { from, to, color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_list_records_in_order() {
        let mut list = DrawList::new(100.0, 80.0, Color::WHITE);
        list.stroke_line(Vec2::ZERO, Vec2::ONE, Color::BLACK);
        list.fill_rect(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), Color::BLACK);

        assert_eq!(list.commands().len(), 2);
        assert_eq!(list.lines().count(), 1);
        assert_eq!(list.rects().next().map(|r| r.0), Some(Vec2::new(1.0, 2.0)));
    }

    #[test]
    fn test_clear_resets_recording() {
        let mut list = DrawList::new(100.0, 80.0, Color::WHITE);
        list.fill_rect(Vec2::ZERO, Vec2::ONE, Color::BLACK);
        list.clear();

        assert_eq!(list.commands(), &[DrawCommand::Clear]);
        assert_eq!(list.width(), 100.0);
        assert_eq!(list.height(), 80.0);
    }
}
