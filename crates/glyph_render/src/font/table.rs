use std::collections::HashMap;

use super::bitmap::GlyphBitmap;
use crate::TableError;

/// Lookup from a lowercase character to its bitmap.
///
/// Every bitmap shares the table height; the constructor refuses anything
/// else, so rendering never has to check.
#[derive(Clone, Debug)]
pub struct GlyphTable {
    height: usize,
    glyphs: HashMap<char, GlyphBitmap>,
}

impl GlyphTable {
    pub fn new<I>(height: usize, entries: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (char, GlyphBitmap)>,
    {
        if height == 0 {
            return Err(TableError::ZeroHeight);
        }

        let mut glyphs = HashMap::new();
        for (ch, bitmap) in entries {
            if !is_lowercase_key(ch) {
                return Err(TableError::NotLowercase { ch });
            }
            if bitmap.height() != height {
                return Err(TableError::RowCount { ch, expected: height, found: bitmap.height() });
            }
            if bitmap.width() == 0 {
                return Err(TableError::EmptyGlyph { ch });
            }
            if glyphs.insert(ch, bitmap).is_some() {
                return Err(TableError::Duplicate { ch });
            }
        }

        Ok(Self { height, glyphs })
    }

    /// Build a table from `#`-art rows, see [`GlyphBitmap::parse`].
    pub fn from_art<'a, I>(height: usize, entries: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (char, &'a [&'a str])>,
    {
        let bitmaps = entries
            .into_iter()
            .map(|(ch, rows)| {
                GlyphBitmap::parse(rows)
                    .map(|bitmap| (ch, bitmap))
                    .map_err(|source| TableError::Bitmap { ch, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(height, bitmaps)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn get(&self, ch: char) -> Option<&GlyphBitmap> {
        self.glyphs.get(&ch)
    }

    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch)
    }

    /// Defined characters in ascending order.
    pub fn chars(&self) -> Vec<char> {
        let mut chars: Vec<char> = self.glyphs.keys().copied().collect();
        chars.sort_unstable();
        chars
    }

    /// Bitmaps for `text` after lowercasing, unknown characters skipped.
    pub fn glyphs_for<'t>(&'t self, text: &'t str) -> impl Iterator<Item = &'t GlyphBitmap> + 't {
        text.chars().flat_map(char::to_lowercase).filter_map(move |ch| self.glyphs.get(&ch))
    }

    /// Unbordered grid width `text` renders to, gap columns included.
    pub fn text_width(&self, text: &str) -> usize {
        let (width, count) = self
            .glyphs_for(text)
            .fold((0usize, 0usize), |(width, count), bitmap| (width + bitmap.width(), count + 1));
        width + count.saturating_sub(1)
    }
}

fn is_lowercase_key(ch: char) -> bool {
    let mut lower = ch.to_lowercase();
    lower.next() == Some(ch) && lower.next().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RaggedRow;

    fn square(ch: char, size: usize) -> (char, GlyphBitmap) {
        (ch, GlyphBitmap::new(size, size, vec![true; size * size]))
    }

    #[test]
    fn rejects_mismatched_height() {
        let err = GlyphTable::new(3, [square('a', 3), square('b', 2)]).unwrap_err();
        assert_eq!(err, TableError::RowCount { ch: 'b', expected: 3, found: 2 });
    }

    #[test]
    fn rejects_uppercase_keys() {
        let err = GlyphTable::new(2, [square('A', 2)]).unwrap_err();
        assert_eq!(err, TableError::NotLowercase { ch: 'A' });
    }

    #[test]
    fn rejects_zero_width_and_zero_height() {
        let blank = ('x', GlyphBitmap::new(0, 2, Vec::new()));
        assert_eq!(GlyphTable::new(2, [blank]).unwrap_err(), TableError::EmptyGlyph { ch: 'x' });
        assert_eq!(GlyphTable::new(0, [square('a', 1)]).unwrap_err(), TableError::ZeroHeight);
    }

    #[test]
    fn rejects_duplicates() {
        let err = GlyphTable::new(2, [square('a', 2), square('a', 2)]).unwrap_err();
        assert_eq!(err, TableError::Duplicate { ch: 'a' });
    }

    #[test]
    fn from_art_reports_ragged_glyph() {
        let rows: &[&str] = &["##", "#"];
        let err = GlyphTable::from_art(2, [('q', rows)]).unwrap_err();
        assert_eq!(
            err,
            TableError::Bitmap { ch: 'q', source: RaggedRow { row: 1, expected: 2, found: 1 } }
        );
    }

    #[test]
    fn non_letter_keys_are_accepted() {
        let table = GlyphTable::new(1, [square('1', 1), square('!', 1), square(' ', 1)]).unwrap();
        assert_eq!(table.chars(), vec![' ', '!', '1']);
    }

    #[test]
    fn text_width_counts_gaps_between_known_chars() {
        let table = GlyphTable::new(3, [square('a', 3), square('b', 3)]).unwrap();
        assert_eq!(table.text_width(""), 0);
        assert_eq!(table.text_width("a"), 3);
        assert_eq!(table.text_width("aB"), 7);
        assert_eq!(table.text_width("a?b?"), 7);
    }
}
