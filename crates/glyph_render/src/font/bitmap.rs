/// Block-art shape of a single character.
///
/// Cells are stored row-major, `true` marks an "on" cell that is painted with
/// the inner glyph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphBitmap {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("row {row} is {found} cells wide, expected {expected}")]
pub struct RaggedRow {
    pub row: usize,
    pub expected: usize,
    pub found: usize,
}

impl GlyphBitmap {
    pub fn new(width: usize, height: usize, cells: Vec<bool>) -> Self {
        assert_eq!(width * height, cells.len());
        Self { width, height, cells }
    }

    /// Parse text art where `#` is an "on" cell and any other char is "off".
    pub fn parse(rows: &[&str]) -> Result<Self, RaggedRow> {
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut cells = Vec::with_capacity(width * rows.len());

        for (index, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(RaggedRow { row: index, expected: width, found });
            }
            cells.extend(row.chars().map(|ch| ch == '#'));
        }

        Ok(Self::new(width, rows.len(), cells))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn row(&self, y: usize) -> &[bool] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    pub fn is_on(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y * self.width + x]
    }
}
