//! End-to-end pipeline behavior, including the two ordering quirks the
//! renderer keeps on purpose. Tests marked "known limitation" pin output
//! that a conformant Markdown processor would reject; changing them means
//! consciously changing the renderer's contract.

use huddle_core::markdown::{preprocess, render};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("hello")]
#[case("plain words only")]
fn test_plain_text_renders_as_single_paragraph(#[case] input: &str) {
    assert_eq!(render(input), format!("<p>{input}</p>"));
}

#[test]
fn test_bold_and_italic_wrap_in_paragraph() {
    assert_eq!(render("**bold**"), "<p><strong>bold</strong></p>");
    assert_eq!(render("*italic*"), "<p><em>italic</em></p>");
}

#[test]
fn test_heading_is_not_paragraph_wrapped() {
    assert_eq!(render("# Title"), "<h1>Title</h1>");
}

#[test]
fn test_escaping_is_applied_exactly_once() {
    let html = render("<script>alert('x')</script>");
    assert!(!html.contains("<script>"));
    assert_eq!(html, "<p>&lt;script&gt;alert('x')&lt;/script&gt;</p>");
}

#[test]
fn test_rendering_unchanged_input_is_byte_identical() {
    let source = "# Agenda\n\n- item one\n- item two\n\n> said someone $x$";
    assert_eq!(render(source), render(source));
}

#[test]
fn test_adjacent_unordered_items_share_one_container() {
    assert_eq!(render("- a\n- b"), "<ul><li>a</li><li>b</li></ul>");
}

#[test]
fn test_adjacent_ordered_items_share_one_container() {
    assert_eq!(render("1. a\n2. b"), "<ol><li>a</li><li>b</li></ol>");
}

#[test]
fn test_unordered_and_ordered_lists_stay_independent() {
    assert_eq!(
        render("- a\n1. b"),
        "<ul><li>a</li></ul><br><ol><li>b</li></ol>"
    );
}

#[test]
fn test_blockquote_line() {
    assert_eq!(render("> wisdom"), "<blockquote>wisdom</blockquote>");
}

#[test]
fn test_link_renders_inside_paragraph() {
    assert_eq!(
        render("see [docs](https://example.com)"),
        "<p>see <a href=\"https://example.com\">docs</a></p>"
    );
}

#[test]
fn test_blank_line_splits_paragraphs() {
    assert_eq!(render("first\n\nsecond"), "<p>first</p><p>second</p>");
}

#[test]
fn test_single_newline_becomes_line_break() {
    assert_eq!(render("a\nb"), "<p>a<br>b</p>");
}

#[test]
fn test_mixed_document_shape() {
    let html = render("# Plan\nintro\n- one\n- two");
    assert_eq!(
        html,
        "<h1>Plan</h1><br>intro<br><ul><li>one</li><li>two</li></ul>"
    );
}

// Known limitation: paragraph boundaries are inserted even when the
// block-leading document never gets the outer wrap, so the tags come
// out unbalanced.
#[test]
fn test_block_leading_document_gets_unbalanced_paragraph_tags() {
    assert_eq!(render("# Title\n\nintro"), "<h1>Title</h1></p><p>intro");
}

// Known limitation: inline code runs before fenced code, so the inline
// pass eats the fence markers and no <pre> block is ever produced.
#[test]
fn test_fenced_code_is_fragmented_by_inline_code_pass() {
    let html = render("```\nlet x = 1;\n```");
    assert!(!html.contains("<pre>"));
    assert_eq!(
        html,
        "<p><code></code>`<br>let x = 1;<br><code></code>`</p>"
    );
}

// Known limitation: the generic `- ` pass consumes task-list lines before
// the task patterns run, so no checkbox markup is ever produced.
#[test]
fn test_task_list_lines_render_as_plain_list_items() {
    assert_eq!(render("- [x] done"), "<ul><li>[x] done</li></ul>");
    assert!(!render("- [ ] open").contains("checkbox"));
}

// Known limitation: the math wrappers are injected before the renderer
// runs, so its escape stage entity-encodes them; the math source itself
// stays visible with its delimiters consumed by the preprocessor.
#[test]
fn test_math_wrappers_are_escaped_by_the_renderer() {
    let html = render(&preprocess("$x^2$"));
    assert_eq!(
        html,
        "<p>&lt;span class=\"latex-inline\"&gt;x^2&lt;/span&gt;</p>"
    );
}

#[test]
fn test_lone_dollar_survives_both_transforms() {
    assert_eq!(render(&preprocess("costs $5")), "<p>costs $5</p>");
}

#[test]
fn test_block_math_crosses_lines_through_both_transforms() {
    let html = render(&preprocess("$$a\nb$$"));
    assert_eq!(
        html,
        "<p>&lt;div class=\"latex-block\"&gt;a<br>b&lt;/div&gt;</p>"
    );
}

#[test]
fn test_malformed_markdown_degrades_without_errors() {
    // Unclosed constructs degrade to whatever the substitution chain leaves
    // behind, never an error. An unclosed `**` is read by the italic pass
    // as an empty `*…*` span.
    assert_eq!(render("**unclosed"), "<p><em></em>unclosed</p>");
    assert_eq!(render("[label](no-close"), "<p>[label](no-close</p>");
    assert_eq!(render("#heading without space"), "<p>#heading without space</p>");
}
