//! The editor controller: one object owning the buffer, the active tab and
//! the draft slot, constructed once per editing session and driven by the
//! frontend's event handlers.

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::drafts::DraftSlot;
use crate::markdown::{preprocess, render};
use crate::notice::Notice;

use super::actions::ToolbarAction;
use super::document::Document;
use super::slash;

/// Which editor pane is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Write,
    Preview,
}

/// Host platform. Only relabels the modifier key in UI hints; never a
/// functional branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    Mac,
    #[default]
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::Mac
        } else {
            Platform::Other
        }
    }

    pub fn modifier_label(&self) -> &'static str {
        match self {
            Platform::Mac => "Cmd",
            Platform::Other => "Ctrl",
        }
    }
}

/// Shown in the preview pane when rendering panics.
pub const RENDER_FAILURE_HTML: &str = "<p class=\"render-error\">Preview cannot be rendered.</p>";

/// Markdown editor controller.
///
/// Turns user intents (toolbar actions, slash tokens, tab switches, draft
/// save/load) into buffer edits, preview refreshes and notices. All
/// operations are total: selections clamp, unknown slash tokens no-op, and
/// a panicking render is caught and replaced with a placeholder.
pub struct Editor {
    document: Document,
    tab: Tab,
    platform: Platform,
    drafts: Box<dyn DraftSlot>,
    preview_html: String,
}

impl Editor {
    pub fn new(drafts: Box<dyn DraftSlot>, platform: Platform) -> Self {
        Self {
            document: Document::new(),
            tab: Tab::default(),
            platform,
            drafts,
            preview_html: String::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// "Cmd" on mac, "Ctrl" everywhere else; for shortcut hints only.
    pub fn modifier_hint(&self) -> &'static str {
        self.platform.modifier_label()
    }

    /// Last rendered preview; refreshed by every buffer-mutating operation
    /// and again whenever the preview tab is entered.
    pub fn preview_html(&self) -> &str {
        &self.preview_html
    }

    /// Switch panes. Entering the preview always re-renders, so the pane
    /// can never show HTML from a stale buffer.
    pub fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        if tab == Tab::Preview {
            self.refresh_preview();
        }
    }

    pub fn refresh_preview(&mut self) {
        let source = self.document.text().to_string();
        self.preview_html = guarded(move || render(&preprocess(&source)));
    }

    /// Run a toolbar action. Formatting kinds splice their template into
    /// the buffer and reposition the caret; control kinds route to the
    /// draft logic or a hint. Returns a notice for the frontend to toast,
    /// when there is something to say.
    pub fn insert_formatting(&mut self, action: ToolbarAction) -> Option<Notice> {
        match action {
            ToolbarAction::SaveLoad => return self.save_or_load_draft(),
            ToolbarAction::SlashMenu => {
                let tokens: Vec<&str> = slash::SLASH_COMMANDS
                    .iter()
                    .map(|command| command.token)
                    .collect();
                return Some(Notice::info(format!(
                    "Slash commands: /{}",
                    tokens.join(", /")
                )));
            }
            ToolbarAction::FullEditor => return None,
            _ => {}
        }

        let selection = self.document.selection();
        let selected = self.document.selected_text().to_string();
        let insertion = action.insertion(&selected)?;
        self.document.replace_selection(&insertion.text);

        let caret = selection.start as isize
            + insertion.text.chars().count() as isize
            + insertion.cursor_offset;
        self.document.set_caret(caret.max(0) as usize);
        self.refresh_preview();
        None
    }

    /// Expand a `/token` sitting immediately before the caret. Returns
    /// whether an expansion happened; unknown tokens and active selections
    /// are a no-op.
    pub fn handle_slash_token(&mut self) -> bool {
        if !self.document.selection().is_caret() {
            return false;
        }
        let caret = self.document.selection().start;
        let Some((range, token)) = slash::token_before_caret(self.document.text(), caret) else {
            return false;
        };
        let Some(command) = slash::lookup(&token) else {
            return false;
        };
        self.document.set_selection(range.start, range.end);
        self.document.replace_selection(command.expansion);
        self.refresh_preview();
        true
    }

    /// The save/load toolbar action: a non-empty buffer saves (overwriting
    /// the single slot), an empty buffer loads, and a missing slot is
    /// reported rather than silently ignored.
    pub fn save_or_load_draft(&mut self) -> Option<Notice> {
        if self.document.is_empty() {
            match self.drafts.load() {
                Ok(Some(text)) => {
                    self.document = Document::with_text(text);
                    self.refresh_preview();
                    Some(Notice::success("Draft loaded."))
                }
                Ok(None) => Some(Notice::warning("No saved draft to load.")),
                Err(err) => Some(Notice::error(format!("Could not load draft: {err}"))),
            }
        } else {
            match self.drafts.save(self.document.text()) {
                Ok(()) => Some(Notice::success("Draft saved.")),
                Err(err) => Some(Notice::error(format!("Could not save draft: {err}"))),
            }
        }
    }
}

/// Render boundary: a panic anywhere in the pipeline must not take the app
/// down, it degrades to a static placeholder.
fn guarded<F>(render_fn: F) -> String
where
    F: FnOnce() -> String,
{
    catch_unwind(AssertUnwindSafe(render_fn))
        .unwrap_or_else(|_| RENDER_FAILURE_HTML.to_string())
}
