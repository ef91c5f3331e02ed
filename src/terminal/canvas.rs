// Rasterizes a DrawList onto a ratatui buffer

use crate::asset_loader::Atlas;
use crate::input_handler::{CursorStyle, Point, Rect};
use crate::render::{Color, DrawCommand, TextAlign};
use ratatui::buffer::{Buffer, Cell};
use ratatui::layout::Rect as CellRect;
use ratatui::style::{Color as TermColor, Modifier};

const DESKTOP: Color = Color::rgb(0, 128, 128);
const DESKTOP_PATTERN: Color = Color::rgb(0, 112, 112);

/// Maps render space onto a grid of terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    render: (i32, i32),
    area: CellRect,
}

impl Viewport {
    pub fn new(render: (i32, i32), area: CellRect) -> Self {
        Self { render, area }
    }

    pub fn area(&self) -> CellRect {
        self.area
    }

    // floored so negative coordinates land left of or above the grid
    fn col(&self, x: i32) -> i64 {
        (x as i64 * self.area.width as i64).div_euclid(self.render.0.max(1) as i64)
    }

    fn row(&self, y: i32) -> i64 {
        (y as i64 * self.area.height as i64).div_euclid(self.render.1.max(1) as i64)
    }

    /// Cells covered by `rect`. Anything with a positive size covers at
    /// least one cell. None when it falls entirely outside the grid.
    pub fn cells(&self, rect: Rect) -> Option<CellRect> {
        if rect.width <= 0 || rect.height <= 0 {
            return None;
        }
        let (w, h) = (self.area.width as i64, self.area.height as i64);

        let x0 = self.col(rect.x);
        let y0 = self.row(rect.y);
        let x1 = self.col(rect.x + rect.width).max(x0 + 1);
        let y1 = self.row(rect.y + rect.height).max(y0 + 1);

        let (x0, x1) = (x0.clamp(0, w), x1.clamp(0, w));
        let (y0, y1) = (y0.clamp(0, h), y1.clamp(0, h));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        Some(CellRect::new(
            self.area.x + x0 as u16,
            self.area.y + y0 as u16,
            (x1 - x0) as u16,
            (y1 - y0) as u16,
        ))
    }

    /// Render-space point at the center of a terminal cell
    pub fn to_render(&self, column: u16, row: u16) -> Point {
        let c = column.saturating_sub(self.area.x) as i64;
        let r = row.saturating_sub(self.area.y) as i64;
        let cols = self.area.width.max(1) as i64;
        let rows = self.area.height.max(1) as i64;
        Point::new(
            ((2 * c + 1) * self.render.0 as i64 / (2 * cols)) as i32,
            ((2 * r + 1) * self.render.1 as i64 / (2 * rows)) as i32,
        )
    }

    /// Cell under a render-space point
    pub fn cell_at(&self, p: Point) -> Option<(u16, u16)> {
        let c = self.col(p.x);
        let r = self.row(p.y);
        if c < 0 || r < 0 || c >= self.area.width as i64 || r >= self.area.height as i64 {
            return None;
        }
        Some((self.area.x + c as u16, self.area.y + r as u16))
    }
}

fn term(c: Color) -> TermColor {
    TermColor::Rgb(c.r, c.g, c.b)
}

/// Translucent colors are blended with whatever background the cell has
fn blend_bg(cell: &mut Cell, color: Color) {
    if color.a == 255 {
        cell.set_bg(term(color));
        return;
    }
    let below = match cell.bg {
        TermColor::Rgb(r, g, b) => Color::rgb(r, g, b),
        _ => Color::rgb(0, 0, 0),
    };
    cell.set_bg(term(color.over(below)));
}

fn for_each_cell(buf: &mut Buffer, area: CellRect, mut f: impl FnMut(&mut Cell)) {
    let area = area.intersection(buf.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                f(cell);
            }
        }
    }
}

/// Write `text` from `(x, y)` without touching cell backgrounds
fn put_str(buf: &mut Buffer, x: u16, y: u16, max: u16, text: &str, fg: Color, bold: bool) {
    for (i, ch) in text.chars().take(max as usize).enumerate() {
        if let Some(cell) = buf.cell_mut((x + i as u16, y)) {
            cell.set_char(ch).set_fg(term(fg));
            if bold {
                cell.modifier.insert(Modifier::BOLD);
            }
        }
    }
}

/// Greedy word wrap. Words longer than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            let needed = if line.is_empty() {
                word.len()
            } else {
                line.chars().count() + 1 + word.len()
            };
            if needed > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.extend(word);
        }
        lines.push(line);
    }
    lines
}

/// Paint `draws` in order onto `buf`
pub fn paint(buf: &mut Buffer, viewport: &Viewport, atlas: &Atlas, draws: &[DrawCommand]) {
    for draw in draws {
        match draw {
            DrawCommand::Background { tiled } => {
                let tiled = *tiled;
                for_each_cell(buf, viewport.area(), |cell| {
                    cell.reset();
                    cell.set_bg(term(DESKTOP));
                    if tiled {
                        cell.set_char('░').set_fg(term(DESKTOP_PATTERN));
                    }
                });
            }
            DrawCommand::FillRect { rect, color } => {
                let Some(area) = viewport.cells(*rect) else {
                    continue;
                };
                let solid = color.a == 255;
                for_each_cell(buf, area, |cell| {
                    if solid {
                        cell.set_char(' ');
                        cell.modifier = Modifier::empty();
                    }
                    blend_bg(cell, *color);
                });
            }
            DrawCommand::OutlineRect { rect, color } => {
                let Some(area) = viewport.cells(*rect) else {
                    continue;
                };
                outline(buf, area, *color);
            }
            DrawCommand::Text {
                rect,
                text,
                color,
                bold,
                wrap,
                align,
            } => {
                let Some(area) = viewport.cells(*rect) else {
                    continue;
                };
                let lines = if *wrap {
                    wrap_text(text, area.width as usize)
                } else {
                    text.lines().take(1).map(str::to_string).collect()
                };
                for (i, line) in lines.iter().take(area.height as usize).enumerate() {
                    let len = line.chars().count().min(area.width as usize) as u16;
                    let x = match align {
                        TextAlign::Left => area.x,
                        TextAlign::Right => area.right() - len,
                    };
                    put_str(buf, x, area.y + i as u16, area.width, line, *color, *bold);
                }
            }
            DrawCommand::Texture { id, x, y } => {
                let Some(area) = viewport.cells(id.rect_at(*x, *y)) else {
                    continue;
                };
                let sprite = atlas.get(*id);
                for_each_cell(buf, area, |cell| {
                    cell.set_char(' ');
                    cell.set_bg(term(sprite.bg));
                });
                let len = sprite.glyph.chars().count().min(area.width as usize) as u16;
                let gx = area.x + (area.width - len) / 2;
                let gy = area.y + area.height / 2;
                put_str(buf, gx, gy, area.width, sprite.glyph, sprite.fg, false);
            }
        }
    }
}

fn outline(buf: &mut Buffer, area: CellRect, color: Color) {
    let (l, t) = (area.left(), area.top());
    let (r, b) = (area.right() - 1, area.bottom() - 1);
    for y in t..=b {
        for x in l..=r {
            let ch = match (x == l, x == r, y == t, y == b) {
                (true, _, true, _) => '┌',
                (_, true, true, _) => '┐',
                (true, _, _, true) => '└',
                (_, true, _, true) => '┘',
                (_, _, true, _) | (_, _, _, true) => '─',
                (true, _, _, _) | (_, true, _, _) => '│',
                _ => continue,
            };
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(ch).set_fg(term(color));
            }
        }
    }
}

/// Pointer glyph for the cursor style of this frame
pub fn draw_cursor(buf: &mut Buffer, viewport: &Viewport, pointer: Point, style: CursorStyle) {
    let Some((x, y)) = viewport.cell_at(pointer) else {
        return;
    };
    let glyph = match style {
        CursorStyle::Default => '▸',
        CursorStyle::Move => '✥',
        CursorStyle::ResizeNwse => '⇲',
    };
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_char(glyph).set_fg(TermColor::White);
        cell.modifier.insert(Modifier::BOLD);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use crate::render::TextureId;

    // 64x48 cells over the default 512x384 render space: 8 units per cell
    fn viewport() -> Viewport {
        Viewport::new((512, 384), CellRect::new(0, 0, 64, 48))
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_cell_mapping() {
        let vp = viewport();
        assert_eq!(vp.cells(Rect::new(16, 8, 40, 16)), Some(CellRect::new(2, 1, 5, 2)));
        // thinner than a cell still shows
        assert_eq!(vp.cells(Rect::new(16, 8, 2, 2)), Some(CellRect::new(2, 1, 1, 1)));
        // partly off-screen gets clipped
        assert_eq!(vp.cells(Rect::new(-16, 0, 32, 8)), Some(CellRect::new(0, 0, 2, 1)));
        assert_eq!(vp.cells(Rect::new(-4, 0, 12, 8)), Some(CellRect::new(0, 0, 1, 1)));
        assert_eq!(vp.cells(Rect::new(-12, 0, 8, 8)), None);
        assert_eq!(vp.cells(Rect::new(600, 0, 10, 10)), None);
        assert_eq!(vp.cells(Rect::new(0, 0, 0, 10)), None);
    }

    #[test]
    fn test_pointer_maps_to_cell_center() {
        let vp = viewport();
        assert_eq!(vp.to_render(0, 0), Point::new(4, 4));
        assert_eq!(vp.to_render(10, 3), Point::new(84, 28));
        assert_eq!(vp.cell_at(Point::new(84, 28)), Some((10, 3)));
        assert_eq!(vp.cell_at(Point::new(-1, 0)), None);
        assert_eq!(vp.cell_at(Point::new(3, -7)), None);
        assert_eq!(vp.cell_at(Point::new(0, 0)), Some((0, 0)));
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("hello world", 5), vec!["hello", "world"]);
        assert_eq!(wrap_text("a b c", 3), vec!["a b", "c"]);
        assert_eq!(wrap_text("one\ntwo", 10), vec!["one", "two"]);
        assert_eq!(wrap_text("abcdefg", 3), vec!["abc", "def", "g"]);
    }

    #[test]
    fn test_paint_text_and_fill() {
        let vp = viewport();
        let atlas = Atlas::load(&Theme::default());
        let mut buf = Buffer::empty(vp.area());
        let draws = vec![
            DrawCommand::Background { tiled: false },
            DrawCommand::FillRect {
                rect: Rect::new(8, 8, 80, 16),
                color: Color::rgb(10, 20, 30),
            },
            DrawCommand::Text {
                rect: Rect::new(8, 8, 80, 16),
                text: "hi there".into(),
                color: Color::rgb(255, 255, 255),
                bold: false,
                wrap: true,
                align: TextAlign::Left,
            },
        ];
        paint(&mut buf, &vp, &atlas, &draws);

        assert!(row_text(&buf, 1).starts_with(" hi there "));
        assert_eq!(buf[(1, 1)].bg, TermColor::Rgb(10, 20, 30));
        assert_eq!(buf[(0, 0)].bg, term(DESKTOP));
    }

    #[test]
    fn test_right_aligned_text() {
        let vp = viewport();
        let atlas = Atlas::load(&Theme::default());
        let mut buf = Buffer::empty(vp.area());
        let draws = vec![DrawCommand::Text {
            rect: Rect::new(0, 0, 512, 8),
            text: "12:00".into(),
            color: Color::rgb(0, 0, 0),
            bold: false,
            wrap: false,
            align: TextAlign::Right,
        }];
        paint(&mut buf, &vp, &atlas, &draws);
        assert!(row_text(&buf, 0).ends_with("12:00"));
    }

    #[test]
    fn test_shadow_blends_over_background() {
        let vp = viewport();
        let atlas = Atlas::load(&Theme::default());
        let mut buf = Buffer::empty(vp.area());
        let draws = vec![
            DrawCommand::Background { tiled: true },
            DrawCommand::FillRect {
                rect: Rect::new(0, 0, 8, 8),
                color: Color::rgba(0, 0, 0, 128),
            },
        ];
        paint(&mut buf, &vp, &atlas, &draws);
        assert_eq!(buf[(0, 0)].bg, TermColor::Rgb(0, 63, 63));
        // the wallpaper pattern shows through
        assert_eq!(buf[(0, 0)].symbol(), "░");
    }

    #[test]
    fn test_texture_glyph_is_centered() {
        let vp = viewport();
        let atlas = Atlas::load(&Theme::default());
        let mut buf = Buffer::empty(vp.area());
        // 48x16 start button at (8, 0) -> cells 1..7, rows 0..2
        let draws = vec![DrawCommand::Texture {
            id: TextureId::StartButton { pressed: false },
            x: 8,
            y: 0,
        }];
        paint(&mut buf, &vp, &atlas, &draws);
        assert_eq!(&row_text(&buf, 1)[..8], " Start  ");
    }

    #[test]
    fn test_cursor_glyph() {
        let vp = viewport();
        let mut buf = Buffer::empty(vp.area());
        draw_cursor(&mut buf, &vp, Point::new(84, 28), CursorStyle::Move);
        assert_eq!(buf[(10, 3)].symbol(), "✥");
    }

    #[test]
    fn test_cursor_off_grid_is_not_drawn() {
        let vp = viewport();
        let mut buf = Buffer::empty(vp.area());
        draw_cursor(&mut buf, &vp, Point::new(-3, 10), CursorStyle::Default);
        assert_eq!(buf[(0, 1)].symbol(), " ");
    }
}
