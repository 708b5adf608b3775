//! Character-cell surface for the decorative scene.

use skycard_core::{
    Element, Surface,
    scene::{Offset, RayOrientation},
};

/// Approximate pixel size of one terminal cell, used to place elements whose
/// offsets carry a pixel component.
const PX_PER_COL: f64 = 10.0;
const PX_PER_ROW: f64 = 20.0;

const CLOUD_MAX_DELAY_SECS: f64 = 5.0;
const RAY_SPAN_PX: f64 = 150.0;

/// Keeps the element descriptions and rasterizes them on demand.
#[derive(Debug, Clone)]
pub struct TerminalSky {
    width: usize,
    height: usize,
    elements: Vec<Element>,
}

impl TerminalSky {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width: width.max(1), height: height.max(1), elements: Vec::new() }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn render(&self) -> String {
        let mut grid = vec![vec![' '; self.width]; self.height];

        for element in &self.elements {
            self.paint(&mut grid, element);
        }

        let border = format!("+{}+", "-".repeat(self.width));
        let mut out = vec![border.clone()];
        out.extend(grid.into_iter().map(|row| format!("|{}|", String::from_iter(row))));
        out.push(border);
        out.join("\n")
    }

    fn paint(&self, grid: &mut [Vec<char>], element: &Element) {
        let mut put = |row: isize, col: isize, ch: char| {
            let (Ok(r), Ok(c)) = (usize::try_from(row), usize::try_from(col)) else {
                return;
            };
            if r < self.height && c < self.width {
                grid[r][c] = ch;
            }
        };

        match *element {
            Element::Cloud { width_px, top_pct, delay_secs, .. } => {
                let row = self.row_at(Offset::percent(top_pct));
                let start = (delay_secs / CLOUD_MAX_DELAY_SECS * self.width as f64) as isize;
                let len = ((width_px / PX_PER_COL) as isize / 2).max(3);
                put(row, start, '(');
                for i in 1..len {
                    put(row, start + i, '~');
                }
                put(row, start + len, ')');
            }
            Element::Raindrop { left_pct, delay_secs, duration_secs } => {
                let col = (left_pct / 100.0 * self.width as f64) as isize;
                let row = (delay_secs / duration_secs * self.height as f64) as isize;
                put(row, col, '\'');
            }
            Element::Sun { top, right } => put(self.row_at(top), self.col_from_right(right), 'O'),
            Element::SunRay { orientation: RayOrientation::Horizontal, top, right } => {
                let (row, end) = (self.row_at(top), self.col_from_right(right));
                for i in 0..(RAY_SPAN_PX / PX_PER_COL) as isize {
                    put(row, end - i, '-');
                }
            }
            Element::SunRay { orientation: RayOrientation::Vertical, top, right } => {
                let (start, col) = (self.row_at(top), self.col_from_right(right));
                for i in 0..(RAY_SPAN_PX / PX_PER_ROW) as isize {
                    put(start + i, col, '|');
                }
            }
            Element::Moon { top, right } => put(self.row_at(top), self.col_from_right(right), 'C'),
        }
    }

    fn row_at(&self, top: Offset) -> isize {
        (top.percent / 100.0 * self.height as f64 + top.px / PX_PER_ROW) as isize
    }

    fn col_from_right(&self, right: Offset) -> isize {
        let from_right = right.percent / 100.0 * self.width as f64 + right.px / PX_PER_COL;
        self.width as isize - 1 - from_right as isize
    }
}

impl Surface for TerminalSky {
    fn clear(&mut self) {
        self.elements.clear();
    }

    fn append(&mut self, element: Element) {
        self.elements.push(element);
    }
}
