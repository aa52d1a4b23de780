use crate::config::{Color, Config};
use crate::entity::Rect;
use crate::renderer::{Renderer, TextAnchor};
use crossterm::{
    cursor, execute, queue,
    style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, Write};

/// Rows kept below the court for the controls line.
const INFO_ROWS: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    bg: Color,
    glyph: Option<(char, Color)>,
}

/// Terminal-cell framebuffer with the court scaled to fit.
#[derive(Debug, Clone)]
struct Canvas {
    cols: u16,
    rows: u16,
    scale_x: f32,
    scale_y: f32,
    cells: Vec<Cell>,
}

impl Canvas {
    fn new(cols: u16, rows: u16, field_width: f32, field_height: f32) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            scale_x: cols as f32 / field_width,
            scale_y: rows as f32 / field_height,
            cells: vec![
                Cell {
                    bg: Color::BLACK,
                    glyph: None,
                };
                cols as usize * rows as usize
            ],
        }
    }

    fn fill(&mut self, color: Color) {
        for cell in &mut self.cells {
            *cell = Cell {
                bg: color,
                glyph: None,
            };
        }
    }

    fn cell_mut(&mut self, col: i32, row: i32) -> Option<&mut Cell> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        let index = row as usize * self.cols as usize + col as usize;
        self.cells.get_mut(index)
    }

    fn cell(&self, col: u16, row: u16) -> Cell {
        self.cells[row as usize * self.cols as usize + col as usize]
    }

    /// Cell span covering `[start, start + len)`, never empty.
    fn span(start: f32, len: f32, scale: f32) -> (i32, i32) {
        const EPSILON: f32 = 1e-3;
        let first = (start * scale + EPSILON).floor() as i32;
        let last = ((start + len) * scale - EPSILON).ceil() as i32;
        (first, last.max(first + 1))
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let (c0, c1) = Self::span(rect.x, rect.width, self.scale_x);
        let (r0, r1) = Self::span(rect.y, rect.height, self.scale_y);
        for row in r0..r1 {
            for col in c0..c1 {
                if let Some(cell) = self.cell_mut(col, row) {
                    cell.bg = color;
                }
            }
        }
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color) {
        let (c0, c1) = Self::span(x - radius, radius * 2.0, self.scale_x);
        let (r0, r1) = Self::span(y - radius, radius * 2.0, self.scale_y);
        for row in r0..r1 {
            for col in c0..c1 {
                let cx = (col as f32 + 0.5) / self.scale_x;
                let cy = (row as f32 + 0.5) / self.scale_y;
                if (cx - x).powi(2) + (cy - y).powi(2) <= radius * radius {
                    if let Some(cell) = self.cell_mut(col, row) {
                        cell.bg = color;
                    }
                }
            }
        }

        // Small balls still get the cell holding their centre.
        let (col, row) = (
            (x * self.scale_x).floor() as i32,
            (y * self.scale_y).floor() as i32,
        );
        if let Some(cell) = self.cell_mut(col, row) {
            cell.bg = color;
        }
    }

    fn draw_text(&mut self, text: &str, anchor: TextAnchor, color: Color) {
        let (x, y) = match anchor {
            TextAnchor::TopCenter { x, y } | TextAnchor::Center { x, y } => (x, y),
        };
        let len = text.chars().count() as i32;
        let row = (y * self.scale_y).floor() as i32;
        let first = (x * self.scale_x).floor() as i32 - len / 2;

        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = self.cell_mut(first + i as i32, row) {
                cell.glyph = Some((ch, color));
            }
        }
    }
}

fn term_color(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

pub struct CliRenderer {
    canvas: Canvas,
    field_width: f32,
    field_height: f32,
    foreground: Color,
    controls: String,
    active: bool,
}

impl CliRenderer {
    pub fn new() -> Self {
        let config = Config::default();
        Self {
            canvas: Canvas::new(1, 1, config.field_width, config.field_height),
            field_width: config.field_width,
            field_height: config.field_height,
            foreground: config.foreground,
            controls: String::new(),
            active: false,
        }
    }

    /// Rebuild the canvas if the terminal changed size.
    fn fit_to_terminal(&mut self, stdout: &mut io::Stdout) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        let rows = rows.saturating_sub(INFO_ROWS);
        if cols != self.canvas.cols || rows.max(1) != self.canvas.rows {
            self.canvas = Canvas::new(cols, rows, self.field_width, self.field_height);
            queue!(stdout, terminal::Clear(ClearType::All))?;
        }
        Ok(())
    }

    fn draw_info(&self, stdout: &mut io::Stdout) -> io::Result<()> {
        queue!(
            stdout,
            cursor::MoveTo(0, self.canvas.rows),
            ResetColor,
            SetForegroundColor(term_color(self.foreground)),
            Print(&self.controls),
            ResetColor
        )?;
        Ok(())
    }
}

impl Default for CliRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for CliRenderer {
    fn init(&mut self, config: &Config) -> io::Result<()> {
        self.field_width = config.field_width;
        self.field_height = config.field_height;
        self.foreground = config.foreground;
        self.controls = format!(
            "{} | Left: W/S  Right: Up/Down  Quit: Q/Esc | first to {}",
            config.caption, config.winning_score
        );

        terminal::enable_raw_mode()?;
        // From here on cleanup (or drop) must restore the terminal.
        self.active = true;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::SetTitle(&config.caption),
            terminal::Clear(ClearType::All),
            cursor::Hide
        )?;
        self.fit_to_terminal(&mut stdout)?;
        stdout.flush()
    }

    fn clear(&mut self, color: Color) -> io::Result<()> {
        let mut stdout = io::stdout();
        self.fit_to_terminal(&mut stdout)?;
        self.canvas.fill(color);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> io::Result<()> {
        self.canvas.fill_rect(rect, color);
        Ok(())
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color) -> io::Result<()> {
        self.canvas.fill_circle(x, y, radius, color);
        Ok(())
    }

    fn draw_text(&mut self, text: &str, anchor: TextAnchor, color: Color) -> io::Result<()> {
        self.canvas.draw_text(text, anchor, color);
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();

        let mut current: Option<Cell> = None;
        for row in 0..self.canvas.rows {
            queue!(stdout, cursor::MoveTo(0, row))?;
            for col in 0..self.canvas.cols {
                let cell = self.canvas.cell(col, row);
                if current.map(|c| c.bg) != Some(cell.bg) {
                    queue!(stdout, SetBackgroundColor(term_color(cell.bg)))?;
                }
                match cell.glyph {
                    Some((ch, fg)) => {
                        queue!(stdout, SetForegroundColor(term_color(fg)), Print(ch))?;
                    }
                    None => queue!(stdout, Print(' '))?,
                }
                current = Some(cell);
            }
        }

        self.draw_info(&mut stdout)?;

        stdout.flush()
    }

    fn cleanup(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let mut stdout = io::stdout();
        execute!(
            stdout,
            cursor::Show,
            terminal::LeaveAlternateScreen,
            ResetColor
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl Drop for CliRenderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
