//! Math span preprocessing.
//!
//! Runs on the raw source *before* the rendering pipeline. The block pass
//! must run first: an inline scan over `$$x$$` would otherwise latch onto
//! the inner dollars and mis-parse the span. A `$` that never pairs up is
//! left alone by both passes and survives the renderer untouched.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\$\$(.+?)\$\$").unwrap());
static INLINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$([^$\n]+)\$").unwrap());

/// Wrap `$$…$$` spans (may cross lines) in a `latex-block` container, then
/// `$…$` spans (single line, no `$` inside) in a `latex-inline` container.
pub fn preprocess(source: &str) -> String {
    let text = BLOCK_RE.replace_all(source, |caps: &Captures| {
        format!("<div class=\"latex-block\">{}</div>", &caps[1])
    });
    INLINE_RE
        .replace_all(&text, |caps: &Captures| {
            format!("<span class=\"latex-inline\">{}</span>", &caps[1])
        })
        .into_owned()
}
