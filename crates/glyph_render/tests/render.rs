use glyph_render::{render, standard, GlyphRenderer, GlyphTable, RenderRequest};
use pretty_assertions::assert_eq;

fn two_letter_table() -> GlyphTable {
    let a: &[&str] = &[".#.", "#.#", "###", "#.#", "#.#"];
    let b: &[&str] = &["##.", "#.#", "##.", "#.#", "##."];
    GlyphTable::from_art(5, [('a', a), ('b', b)]).unwrap()
}

#[test]
fn two_three_wide_glyphs_render_seven_wide() {
    let table = two_letter_table();
    let output = render("ab", &table, "#", ".", false);

    let expected = [".#..##.", "#.#.#.#", "###.##.", "#.#.#.#", "#.#.##."].join("\n");
    assert_eq!(output, expected);
    assert!(output.lines().all(|line| line.chars().count() == 7));
    assert_eq!(output.lines().count(), 5);
}

#[test]
fn unknown_characters_are_dropped() {
    let table = two_letter_table();
    assert_eq!(render("a1b", &table, "#", ".", true), render("ab", &table, "#", ".", true));
    assert_eq!(render("?a!", &table, "#", ".", false), render("a", &table, "#", ".", false));
}

#[test]
fn empty_input_renders_nothing() {
    let table = two_letter_table();
    assert_eq!(render("", &table, "X", "Y", false), "");
}

#[test]
fn only_unknown_characters_render_nothing_even_with_border() {
    let table = two_letter_table();
    assert_eq!(render("", &table, "X", "Y", true), "");
    assert_eq!(render("123", &table, "X", "Y", true), "");
}

#[test]
fn uppercase_input_matches_lowercase() {
    let table = two_letter_table();
    assert_eq!(render("AB", &table, "#", ".", true), render("ab", &table, "#", ".", true));
}

#[test]
fn standard_font_with_border() {
    let renderer = GlyphRenderer::new(standard());
    let request = RenderRequest::new("Hi", "#", ".", true);

    let expected = [
        ".........",
        ".#.#.###.",
        ".#.#..#..",
        ".###..#..",
        ".#.#..#..",
        ".#.#.###.",
        ".........",
    ]
    .join("\n");
    assert_eq!(renderer.render(&request), expected);
}

#[test]
fn default_renderer_uses_standard_font() {
    let request = RenderRequest::new("HELLO", "🟥", "🤍", true);
    let output = GlyphRenderer::default().render(&request);

    let width = standard().text_width("HELLO") + 2;
    assert_eq!(output.lines().count(), standard().height() + 2);
    assert!(output.lines().all(|line| line.chars().count() == width));
    assert!(output.lines().next().unwrap().chars().all(|ch| ch == '🤍'));
}

#[test]
fn render_grid_matches_painted_output() {
    let renderer = GlyphRenderer::new(standard());
    let grid = renderer.render_grid("ok", false);

    assert_eq!(grid.height(), 5);
    assert_eq!(grid.width(), standard().text_width("ok"));
    assert_eq!(grid.paint("#", "."), render("ok", standard(), "#", ".", false));
}
