/*!
 * Markdown rendering pipeline.
 *
 * The renderer is a fixed, ordered list of small pure string transforms
 * ("stages"). [`render`] folds the input through every stage in order and
 * returns the final HTML string. The order is load-bearing: it mirrors the
 * substitution chain of the app this engine replaces, including two quirks
 * kept on purpose:
 *
 * - fenced code blocks are matched *after* inline code, so the inline pass
 *   fragments the fence markers before the fence pattern can see them;
 * - task-list items are matched *after* the generic `- ` list pass, which
 *   has already consumed every candidate line.
 *
 * Both quirks are pinned by tests (`tests/render_pipeline.rs`) so that a
 * future fix is a conscious decision rather than an accident of reordering.
 *
 * Math spans are handled by [`preprocess`], which runs on the raw source
 * *before* [`render`]. Because the renderer escapes `&`, `<` and `>` as its
 * first stage, the wrapper tags injected by the preprocessor come out
 * entity-encoded; that interaction is part of the preserved behavior.
 */

pub mod math;
pub mod stages;

pub use math::preprocess;

/// Render markdown source to HTML by folding it through every pipeline
/// stage in order.
pub fn render(source: &str) -> String {
    stages::PIPELINE
        .iter()
        .fold(source.to_string(), |text, stage| (stage.apply)(&text))
}
