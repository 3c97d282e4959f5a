use std::ops::Range;

/// Selection inside a [`Document`], in character offsets.
///
/// `start == end` is a collapsed caret. Constructors normalize so that
/// `start <= end` always holds; clamping to the buffer happens in the
/// document's setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    /// Collapsed selection at `offset`.
    pub fn caret(offset: usize) -> Self {
        Self { start: offset, end: offset }
    }

    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.is_caret()
    }
}

impl From<Range<usize>> for Selection {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Editable text buffer with a tracked selection.
///
/// Offsets are character positions, not bytes, so frontends can move the
/// caret per keypress without thinking about UTF-8 boundaries. Every setter
/// clamps to the buffer bounds; out-of-range input can never panic.
#[derive(Debug, Clone, Default)]
pub struct Document {
    text: String,
    selection: Selection,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document holding `text` with the caret at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.chars().count();
        Self {
            text,
            selection: Selection::caret(end),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Buffer length in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Set the selection, clamping both ends to the buffer and swapping
    /// them when reversed.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        let len = self.char_len();
        self.selection = Selection::new(start.min(len), end.min(len));
    }

    pub fn set_caret(&mut self, offset: usize) {
        self.set_selection(offset, offset);
    }

    pub fn select_all(&mut self) {
        self.selection = Selection::new(0, self.char_len());
    }

    /// Text under the selection; empty for a caret.
    pub fn selected_text(&self) -> &str {
        let start = self.byte_at(self.selection.start);
        let end = self.byte_at(self.selection.end);
        &self.text[start..end]
    }

    /// Replace the selection with `replacement` and collapse the caret to
    /// the end of the replaced range.
    pub fn replace_selection(&mut self, replacement: &str) {
        let Selection { start, end } = self.selection;
        let byte_start = self.byte_at(start);
        let byte_end = self.byte_at(end);
        self.text.replace_range(byte_start..byte_end, replacement);
        self.selection = Selection::caret(start + replacement.chars().count());
    }

    /// Insert at the caret, replacing the selection when one is active.
    pub fn insert(&mut self, text: &str) {
        self.replace_selection(text);
    }

    /// Delete the selection, or the character before the caret.
    pub fn delete_backward(&mut self) {
        if !self.selection.is_caret() {
            self.replace_selection("");
            return;
        }
        let caret = self.selection.start;
        if caret == 0 {
            return;
        }
        let byte_start = self.byte_at(caret - 1);
        let byte_end = self.byte_at(caret);
        self.text.replace_range(byte_start..byte_end, "");
        self.selection = Selection::caret(caret - 1);
    }

    pub fn move_left(&mut self) {
        let target = self.selection.start.saturating_sub(if self.selection.is_caret() { 1 } else { 0 });
        self.set_caret(target);
    }

    pub fn move_right(&mut self) {
        if self.selection.is_caret() {
            self.set_caret(self.selection.end + 1);
        } else {
            self.set_caret(self.selection.end);
        }
    }

    pub fn move_to_start(&mut self) {
        self.set_caret(0);
    }

    pub fn move_to_end(&mut self) {
        self.set_caret(self.char_len());
    }

    fn byte_at(&self, char_offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_offset)
            .map(|(index, _)| index)
            .unwrap_or(self.text.len())
    }
}
