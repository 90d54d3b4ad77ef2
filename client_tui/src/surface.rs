//! Cell-grid drawing backend. The simulation draws in 800x600 court
//! pixels; this maps those onto whatever terminal rectangle the layout
//! hands us. Terminal cells are roughly twice as tall as wide, which
//! the independent x/y scale factors absorb for free.

use game_core::render::Surface;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};

pub struct CellSurface<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    scale_x: f32,
    scale_y: f32,
}

impl<'a> CellSurface<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect, court_w: f32, court_h: f32) -> Self {
        Self {
            buf,
            area,
            scale_x: f32::from(area.width.max(1)) / court_w,
            scale_y: f32::from(area.height.max(1)) / court_h,
        }
    }

    fn to_cell(&self, x: f32, y: f32) -> (u16, u16) {
        let cx = self.area.x + ((x * self.scale_x) as u16).min(self.area.width.saturating_sub(1));
        let cy = self.area.y + ((y * self.scale_y) as u16).min(self.area.height.saturating_sub(1));
        (cx, cy)
    }

    fn paint(&mut self, cx: u16, cy: u16, symbol: &str, color: Color) {
        if let Some(cell) = self.buf.cell_mut((cx, cy)) {
            cell.set_symbol(symbol);
            cell.set_fg(color);
        }
    }
}

impl Surface for CellSurface<'_> {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let (x0, y0) = self.to_cell(x, y);
        let (x1, y1) = self.to_cell(x + w, y + h);
        for cy in y0..=y1 {
            for cx in x0..=x1 {
                self.paint(cx, cy, "█", Color::Green);
            }
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32) {
        // A ball is one cell at terminal resolution
        let (ccx, ccy) = self.to_cell(cx - r, cy - r);
        self.paint(ccx, ccy, "●", Color::White);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let (x0, y0) = self.to_cell(x, y);
        let (x1, y1) = self.to_cell(x + w - 1.0, y + h - 1.0);
        for cx in x0..=x1 {
            self.paint(cx, y0, "─", Color::Cyan);
            self.paint(cx, y1, "─", Color::Cyan);
        }
        for cy in y0..=y1 {
            self.paint(x0, cy, "│", Color::Cyan);
            self.paint(x1, cy, "│", Color::Cyan);
        }
        self.paint(x0, y0, "┌", Color::Cyan);
        self.paint(x1, y0, "┐", Color::Cyan);
        self.paint(x0, y1, "└", Color::Cyan);
        self.paint(x1, y1, "┘", Color::Cyan);
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32) {
        // Centered on x, in court coordinates
        let (cx, cy) = self.to_cell(x, y);
        let half = (text.chars().count() / 2) as u16;
        let start = cx.saturating_sub(half).max(self.area.x);
        self.buf.set_string(
            start,
            cy,
            text,
            Style::default().fg(Color::White),
        );
    }
}
