use crate::font::bitmap::GlyphBitmap;

/// On/off matrix produced from a run of glyph bitmaps, before painting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl RenderedGrid {
    pub fn new(width: usize, height: usize, cells: Vec<bool>) -> Self {
        assert_eq!(width * height, cells.len());
        Self { width, height, cells }
    }

    /// Lay bitmaps side by side with one "off" column between neighbours.
    ///
    /// All bitmaps must be `height` rows tall; an empty run yields an empty
    /// grid.
    pub fn compose<'a, I>(height: usize, bitmaps: I) -> Self
    where
        I: IntoIterator<Item = &'a GlyphBitmap>,
    {
        let bitmaps: Vec<&GlyphBitmap> = bitmaps.into_iter().collect();
        if bitmaps.is_empty() {
            return Self::default();
        }

        let width =
            bitmaps.iter().map(|bitmap| bitmap.width()).sum::<usize>() + bitmaps.len() - 1;
        let mut cells = Vec::with_capacity(width * height);

        for y in 0..height {
            for (index, bitmap) in bitmaps.iter().enumerate() {
                debug_assert_eq!(bitmap.height(), height);
                if index > 0 {
                    cells.push(false);
                }
                cells.extend_from_slice(bitmap.row(y));
            }
        }

        Self::new(width, height, cells)
    }

    /// Frame the grid with one "off" cell on every side. An empty grid stays
    /// empty.
    pub fn with_border(self) -> Self {
        if self.is_empty() {
            return self;
        }

        let width = self.width + 2;
        let height = self.height + 2;
        let mut cells = Vec::with_capacity(width * height);

        cells.resize(width, false);
        for row in self.rows() {
            cells.push(false);
            cells.extend_from_slice(row);
            cells.push(false);
        }
        cells.resize(width * height, false);

        Self::new(width, height, cells)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.chunks(self.width.max(1))
    }

    /// Substitute `inner` for "on" cells and `outer` for "off" cells, rows
    /// joined by `\n` without a trailing newline.
    pub fn paint(&self, inner: &str, outer: &str) -> String {
        let longest = inner.len().max(outer.len());
        let mut output = String::with_capacity(self.cells.len() * longest + self.height);

        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                output.push('\n');
            }
            for &on in row {
                output.push_str(if on { inner } else { outer });
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn bitmap(rows: &[&str]) -> GlyphBitmap {
        GlyphBitmap::parse(rows).unwrap()
    }

    #[test]
    fn compose_inserts_single_gap_columns() {
        let a = bitmap(&["##", "#."]);
        let b = bitmap(&["#", "#"]);
        let grid = RenderedGrid::compose(2, [&a, &b, &a]);

        assert_eq!(grid.width(), 2 + 1 + 1 + 1 + 2);
        assert_eq!(grid.paint("#", "."), "##.#.##\n#..#.#.");
    }

    #[test]
    fn compose_single_bitmap_has_no_gap() {
        let a = bitmap(&["#.#"]);
        let grid = RenderedGrid::compose(1, [&a]);
        assert_eq!(grid.paint("#", "."), "#.#");
    }

    #[test]
    fn compose_nothing_is_empty() {
        let grid = RenderedGrid::compose(5, std::iter::empty());
        assert!(grid.is_empty());
        assert_eq!(grid.paint("#", "."), "");
    }

    #[test]
    fn border_frames_every_side() {
        let a = bitmap(&["#", "#"]);
        let grid = RenderedGrid::compose(2, [&a]).with_border();

        assert_eq!((grid.width(), grid.height()), (3, 4));
        assert_eq!(grid.paint("#", "."), "...\n.#.\n.#.\n...");
        assert_eq!(grid.get(1, 1), Some(true));
        assert_eq!(grid.get(3, 0), None);
    }

    #[test]
    fn border_on_empty_grid_stays_empty() {
        let grid = RenderedGrid::default().with_border();
        assert!(grid.is_empty());
        assert_eq!(grid.paint("X", "Y"), "");
    }

    #[test]
    fn paint_accepts_multi_char_glyphs() {
        let a = bitmap(&["#."]);
        let grid = RenderedGrid::compose(1, [&a]);
        assert_eq!(grid.paint("🟥", "🤍"), "🟥🤍");
    }
}
