mod font;
mod grid;

pub use font::{
    bitmap::{GlyphBitmap, RaggedRow},
    standard::{standard, STANDARD_HEIGHT},
    table::GlyphTable,
};
pub use grid::RenderedGrid;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("glyph table height must be at least one row")]
    ZeroHeight,
    #[error("glyph {ch:?} has {found} rows, table expects {expected}")]
    RowCount { ch: char, expected: usize, found: usize },
    #[error("glyph {ch:?}: {source}")]
    Bitmap {
        ch: char,
        #[source]
        source: RaggedRow,
    },
    #[error("glyph {ch:?} has no columns")]
    EmptyGlyph { ch: char },
    #[error("glyph key {ch:?} is not lowercase")]
    NotLowercase { ch: char },
    #[error("glyph {ch:?} is defined more than once")]
    Duplicate { ch: char },
}

/// The four inputs of a single render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderRequest {
    pub input_text: String,
    /// Painted on "on" cells.
    pub inner_glyph: String,
    /// Painted on "off" cells, gaps and border included.
    pub outer_glyph: String,
    pub with_border: bool,
}

impl RenderRequest {
    pub fn new(
        input_text: impl Into<String>,
        inner_glyph: impl Into<String>,
        outer_glyph: impl Into<String>,
        with_border: bool,
    ) -> Self {
        Self {
            input_text: input_text.into(),
            inner_glyph: inner_glyph.into(),
            outer_glyph: outer_glyph.into(),
            with_border,
        }
    }
}

/// Renders text as block letters over a borrowed glyph table.
///
/// Characters the table does not define are dropped. Text without a single
/// known character renders to an empty string, border or not.
#[derive(Clone, Copy, Debug)]
pub struct GlyphRenderer<'a> {
    table: &'a GlyphTable,
}

impl Default for GlyphRenderer<'static> {
    fn default() -> Self {
        Self::new(standard())
    }
}

impl<'a> GlyphRenderer<'a> {
    pub fn new(table: &'a GlyphTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a GlyphTable {
        self.table
    }

    pub fn render(&self, request: &RenderRequest) -> String {
        self.render_grid(&request.input_text, request.with_border)
            .paint(&request.inner_glyph, &request.outer_glyph)
    }

    pub fn render_grid(&self, text: &str, with_border: bool) -> RenderedGrid {
        let grid = RenderedGrid::compose(self.table.height(), self.table.glyphs_for(text));
        if with_border {
            grid.with_border()
        } else {
            grid
        }
    }
}

pub fn render(
    text: &str,
    table: &GlyphTable,
    inner_glyph: &str,
    outer_glyph: &str,
    with_border: bool,
) -> String {
    GlyphRenderer::new(table).render_grid(text, with_border).paint(inner_glyph, outer_glyph)
}
