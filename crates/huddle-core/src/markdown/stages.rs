//! The individual pipeline stages, in execution order.
//!
//! Every stage is a pure `fn(&str) -> String`; [`PIPELINE`] is the single
//! source of truth for their order. Patterns are compiled once in statics.

use regex::Regex;
use std::sync::LazyLock;

/// One step of the rendering pipeline: a named, pure string transform.
pub struct Stage {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

/// Every stage in execution order. Reordering entries changes rendering
/// semantics; see the module docs for the two orderings kept buggy on
/// purpose.
pub const PIPELINE: [Stage; 13] = [
    Stage { name: "escape", apply: escape },
    Stage { name: "headers", apply: headers },
    Stage { name: "bold", apply: bold },
    Stage { name: "italic", apply: italic },
    Stage { name: "inline-code", apply: inline_code },
    Stage { name: "fenced-code", apply: fenced_code },
    Stage { name: "links", apply: links },
    Stage { name: "blockquotes", apply: blockquotes },
    Stage { name: "unordered-lists", apply: unordered_lists },
    Stage { name: "ordered-lists", apply: ordered_lists },
    Stage { name: "task-lists", apply: task_lists },
    Stage { name: "line-breaks", apply: line_breaks },
    Stage { name: "paragraphs", apply: paragraphs },
];

static H3_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^### (.*)$").unwrap());
static H2_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^## (.*)$").unwrap());
static H1_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^# (.*)$").unwrap());
static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static INLINE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.*?)`").unwrap());
static FENCED_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```(.*?)```").unwrap());
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").unwrap());
static BLOCKQUOTE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^&gt; (.*)$").unwrap());
static UL_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^- (.*)$").unwrap());
static OL_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\d+\. (.*)$").unwrap());
static LI_LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^(<li>.*</li>)$").unwrap());
static UL_JOIN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</ul>\s*<ul>").unwrap());
static OL_JOIN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</ol>\s*<ol>").unwrap());
static TASK_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^- \[ \] (.*)$").unwrap());
static TASK_DONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^- \[x\] (.*)$").unwrap());
static PARA_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:<br>){2,}").unwrap());

/// Stage 1: entity-encode `&`, `<` and `>` exactly once, before anything
/// else can inject markup.
fn escape(input: &str) -> String {
    html_escape::encode_text(input).into_owned()
}

/// Stage 2: line-anchored headers, longest prefix first so `### ` lines are
/// consumed before the `## ` and `# ` patterns can see them.
fn headers(input: &str) -> String {
    let text = H3_RE.replace_all(input, "<h3>$1</h3>");
    let text = H2_RE.replace_all(&text, "<h2>$1</h2>");
    H1_RE.replace_all(&text, "<h1>$1</h1>").into_owned()
}

/// Stage 3: `**bold**`, non-greedy, same line. Runs before italic so a
/// `**` pair is never split into two `*` matches.
fn bold(input: &str) -> String {
    BOLD_RE.replace_all(input, "<strong>$1</strong>").into_owned()
}

/// Stage 4: `*italic*`, non-greedy, same line.
fn italic(input: &str) -> String {
    ITALIC_RE.replace_all(input, "<em>$1</em>").into_owned()
}

/// Stage 5: `` `code` `` spans, non-greedy, same line.
fn inline_code(input: &str) -> String {
    INLINE_CODE_RE
        .replace_all(input, "<code>$1</code>")
        .into_owned()
}

/// Stage 6: ```` ``` ```` fences, non-greedy across lines. Runs after stage
/// 5, which has already fragmented the fence markers into empty code spans
/// plus stray backticks, so this pattern does not fire on ordinary input.
/// That ordering is preserved deliberately; do not move this stage.
fn fenced_code(input: &str) -> String {
    FENCED_CODE_RE
        .replace_all(input, "<pre><code>$1</code></pre>")
        .into_owned()
}

/// Stage 7: `[label](url)` anchors. The url is taken verbatim, no scheme
/// validation.
fn links(input: &str) -> String {
    LINK_RE
        .replace_all(input, "<a href=\"$2\">$1</a>")
        .into_owned()
}

/// Stage 8: per-line blockquotes. The pattern matches the escaped form
/// `&gt; ` because stage 1 has already run.
fn blockquotes(input: &str) -> String {
    BLOCKQUOTE_RE
        .replace_all(input, "<blockquote>$1</blockquote>")
        .into_owned()
}

/// Stage 9: `- ` items become `<li>`, each wrapped in its own `<ul>`, then
/// adjacent `</ul><ul>` pairs (and the whitespace between them) collapse so
/// consecutive items share one container.
fn unordered_lists(input: &str) -> String {
    let text = UL_ITEM_RE.replace_all(input, "<li>$1</li>");
    let text = LI_LINE_RE.replace_all(&text, "<ul>$1</ul>");
    UL_JOIN_RE.replace_all(&text, "").into_owned()
}

/// Stage 10: `1. ` items, same wrap-and-collapse scheme as stage 9 but with
/// `<ol>`. Lines stage 9 already converted start with `<ul>` by now and are
/// not reconverted.
fn ordered_lists(input: &str) -> String {
    let text = OL_ITEM_RE.replace_all(input, "<li>$1</li>");
    let text = LI_LINE_RE.replace_all(&text, "<ol>$1</ol>");
    OL_JOIN_RE.replace_all(&text, "").into_owned()
}

/// Stage 11: task-list items. Runs after stage 9, which has already
/// consumed every `- `-prefixed line, so in the full pipeline these
/// patterns never fire; the stage still works in isolation and stays here
/// to preserve the original ordering. Do not move it ahead of stage 9.
fn task_lists(input: &str) -> String {
    let text = TASK_OPEN_RE.replace_all(
        input,
        "<li class=\"task\"><input type=\"checkbox\" disabled> $1</li>",
    );
    TASK_DONE_RE
        .replace_all(
            &text,
            "<li class=\"task\"><input type=\"checkbox\" checked disabled> $1</li>",
        )
        .into_owned()
}

/// Stage 12: every remaining newline becomes an explicit `<br>`.
fn line_breaks(input: &str) -> String {
    input.replace('\n', "<br>")
}

/// Stage 13: runs of two or more `<br>` become paragraph boundaries; the
/// whole document is wrapped in a single `<p>` unless it already starts
/// with a block-level tag.
fn paragraphs(input: &str) -> String {
    let text = PARA_BREAK_RE.replace_all(input, "</p><p>");
    if starts_with_block_tag(&text) {
        text.into_owned()
    } else {
        format!("<p>{text}</p>")
    }
}

fn starts_with_block_tag(html: &str) -> bool {
    const BLOCK_TAGS: [&str; 6] = ["<h1>", "<h2>", "<h3>", "<ul>", "<ol>", "<blockquote>"];
    BLOCK_TAGS.iter().any(|tag| html.starts_with(tag))
}
