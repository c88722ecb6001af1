// rust/engine/src/engine/render.rs
#![forbid(unsafe_code)]

use std::str::FromStr;

use crate::engine::block::Rect;
use crate::engine::error::PlatformerError;

pub type Rgb = [u8; 3];

pub const GREY: Rgb = [30, 30, 30];
pub const WHITE: Rgb = [255, 255, 255];
pub const ORANGE: Rgb = [255, 125, 0];
pub const PURPLE: Rgb = [153, 0, 204];
pub const BLUE: Rgb = [57, 155, 216];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameRect {
    pub rect: Rect,
    pub color: Rgb,
    /// Cell glyph for the ASCII view.
    pub glyph: char,
}

/**
 * Owned snapshot of everything a drawing surface needs after `reset`/`step`.
 *
 * Rectangles are copies; mutating a frame never touches simulation state.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub width: i32,
    pub height: i32,
    pub background: Rgb,
    pub rects: Vec<FrameRect>,
    pub player: FrameRect,
    /// One-line status shown under the ASCII view.
    pub status: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// Text view for terminals.
    Human,
    /// `height x width x 3` bytes.
    RgbArray,
}

impl FromStr for RenderMode {
    type Err = PlatformerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" => Ok(RenderMode::Human),
            "rgb_array" => Ok(RenderMode::RgbArray),
            other => Err(PlatformerError::InvalidRenderMode(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Rendered {
    Text(String),
    Pixels {
        width: usize,
        height: usize,
        /// Row-major RGB.
        data: Vec<u8>,
    },
}

impl Frame {
    pub fn render(&self, mode: RenderMode, cell_w: i32, cell_h: i32) -> Rendered {
        match mode {
            RenderMode::Human => Rendered::Text(self.to_ascii(cell_w, cell_h)),
            RenderMode::RgbArray => {
                let (width, height, data) = self.to_rgb();
                Rendered::Pixels {
                    width,
                    height,
                    data,
                }
            }
        }
    }

    /// One character per `cell_w x cell_h` pixel cell; the player is drawn last.
    pub fn to_ascii(&self, cell_w: i32, cell_h: i32) -> String {
        let cols = (self.width / cell_w.max(1)).max(0) as usize;
        let rows = (self.height / cell_h.max(1)).max(0) as usize;
        let mut cells = vec![vec![' '; cols]; rows];

        for fr in self.rects.iter().chain(std::iter::once(&self.player)) {
            paint_cells(&mut cells, &fr.rect, fr.glyph, cell_w.max(1), cell_h.max(1));
        }

        let border = format!("+{}+\n", "-".repeat(cols));
        let mut s = String::with_capacity((cols + 3) * (rows + 3) + self.status.len());
        s.push_str(&border);
        for row in &cells {
            s.push('|');
            s.extend(row.iter());
            s.push_str("|\n");
        }
        s.push_str(&border);
        s.push_str(&self.status);
        s.push('\n');
        s
    }

    /// Rasterizes into `(width, height, data)`, clipping rectangles to the frame.
    pub fn to_rgb(&self) -> (usize, usize, Vec<u8>) {
        let width = self.width.max(0) as usize;
        let height = self.height.max(0) as usize;
        let mut data = Vec::with_capacity(width * height * 3);
        for _ in 0..width * height {
            data.extend_from_slice(&self.background);
        }

        for fr in self.rects.iter().chain(std::iter::once(&self.player)) {
            let x0 = fr.rect.left().clamp(0, self.width);
            let x1 = fr.rect.right().clamp(0, self.width);
            let y0 = fr.rect.top().clamp(0, self.height);
            let y1 = fr.rect.bottom().clamp(0, self.height);
            for y in y0..y1 {
                for x in x0..x1 {
                    let i = (y as usize * width + x as usize) * 3;
                    data[i..i + 3].copy_from_slice(&fr.color);
                }
            }
        }

        (width, height, data)
    }
}

fn paint_cells(cells: &mut [Vec<char>], rect: &Rect, glyph: char, cell_w: i32, cell_h: i32) {
    let rows = cells.len() as i32;
    let cols = cells.first().map_or(0, Vec::len) as i32;

    // Cells touched by the rectangle, clipped to the view.
    let c0 = rect.left().div_euclid(cell_w).max(0);
    let c1 = (rect.right() - 1).div_euclid(cell_w).min(cols - 1);
    let r0 = rect.top().div_euclid(cell_h).max(0);
    let r1 = (rect.bottom() - 1).div_euclid(cell_h).min(rows - 1);

    for r in r0..=r1 {
        for c in c0..=c1 {
            cells[r as usize][c as usize] = glyph;
        }
    }
}
