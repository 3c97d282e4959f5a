//! Toolbar actions and their insertion templates.

/// Text to splice into the buffer plus the relative caret adjustment.
///
/// `cursor_offset` is 0 when real text was wrapped (caret lands after the
/// insertion) and negative when a placeholder was inserted (caret lands
/// right after the prefix so the placeholder can be overtyped).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub text: String,
    pub cursor_offset: isize,
}

/// Every action the editor toolbar knows about. Formatting kinds carry an
/// insertion template; the last three are control kinds that insert
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    Heading,
    Bold,
    Italic,
    Quote,
    Code,
    Link,
    UnorderedList,
    OrderedList,
    TaskList,
    Mention,
    SaveLoad,
    SlashMenu,
    FullEditor,
}

impl ToolbarAction {
    pub const ALL: [ToolbarAction; 13] = [
        ToolbarAction::Heading,
        ToolbarAction::Bold,
        ToolbarAction::Italic,
        ToolbarAction::Quote,
        ToolbarAction::Code,
        ToolbarAction::Link,
        ToolbarAction::UnorderedList,
        ToolbarAction::OrderedList,
        ToolbarAction::TaskList,
        ToolbarAction::Mention,
        ToolbarAction::SaveLoad,
        ToolbarAction::SlashMenu,
        ToolbarAction::FullEditor,
    ];

    /// Template parts for formatting kinds: (prefix, placeholder, suffix).
    /// Control kinds return `None`.
    pub fn template(&self) -> Option<(&'static str, &'static str, &'static str)> {
        match self {
            ToolbarAction::Heading => Some(("# ", "heading text", "")),
            ToolbarAction::Bold => Some(("**", "bold text", "**")),
            ToolbarAction::Italic => Some(("*", "italic text", "*")),
            ToolbarAction::Quote => Some(("> ", "quoted text", "")),
            ToolbarAction::Code => Some(("`", "code", "`")),
            ToolbarAction::Link => Some(("[", "link text", "](url)")),
            ToolbarAction::UnorderedList => Some(("- ", "list item", "")),
            ToolbarAction::OrderedList => Some(("1. ", "list item", "")),
            ToolbarAction::TaskList => Some(("- [ ] ", "task item", "")),
            ToolbarAction::Mention => Some(("@", "username", "")),
            ToolbarAction::SaveLoad | ToolbarAction::SlashMenu | ToolbarAction::FullEditor => None,
        }
    }

    /// Compute what to insert for this action given the selected text
    /// (empty when the caret is collapsed). `None` for control kinds.
    pub fn insertion(&self, selected: &str) -> Option<Insertion> {
        let (prefix, placeholder, suffix) = self.template()?;
        if selected.is_empty() {
            Some(Insertion {
                text: format!("{prefix}{placeholder}{suffix}"),
                cursor_offset: -((placeholder.chars().count() + suffix.chars().count()) as isize),
            })
        } else {
            Some(Insertion {
                text: format!("{prefix}{selected}{suffix}"),
                cursor_offset: 0,
            })
        }
    }

    /// Display label for toolbar buttons and help lines.
    pub fn label(&self) -> &'static str {
        match self {
            ToolbarAction::Heading => "Heading",
            ToolbarAction::Bold => "Bold",
            ToolbarAction::Italic => "Italic",
            ToolbarAction::Quote => "Quote",
            ToolbarAction::Code => "Code",
            ToolbarAction::Link => "Link",
            ToolbarAction::UnorderedList => "Bullet List",
            ToolbarAction::OrderedList => "Numbered List",
            ToolbarAction::TaskList => "Task List",
            ToolbarAction::Mention => "Mention",
            ToolbarAction::SaveLoad => "Save/Load Draft",
            ToolbarAction::SlashMenu => "Slash Commands",
            ToolbarAction::FullEditor => "Full Editor",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_bold_placeholder_insertion_and_offset() {
        let insertion = ToolbarAction::Bold.insertion("").unwrap();
        assert_eq!(insertion.text, "**bold text**");
        // Caret must land right after the opening marker: the insertion is
        // 13 chars and the caret belongs at +2.
        assert_eq!(insertion.cursor_offset, -11);
    }

    #[test]
    fn test_bold_wraps_selection_with_zero_offset() {
        let insertion = ToolbarAction::Bold.insertion("word").unwrap();
        assert_eq!(insertion.text, "**word**");
        assert_eq!(insertion.cursor_offset, 0);
    }

    #[rstest]
    #[case(ToolbarAction::Heading, "# heading text")]
    #[case(ToolbarAction::Italic, "*italic text*")]
    #[case(ToolbarAction::Quote, "> quoted text")]
    #[case(ToolbarAction::Code, "`code`")]
    #[case(ToolbarAction::Link, "[link text](url)")]
    #[case(ToolbarAction::UnorderedList, "- list item")]
    #[case(ToolbarAction::OrderedList, "1. list item")]
    #[case(ToolbarAction::TaskList, "- [ ] task item")]
    #[case(ToolbarAction::Mention, "@username")]
    fn test_placeholder_templates(#[case] action: ToolbarAction, #[case] expected: &str) {
        assert_eq!(action.insertion("").unwrap().text, expected);
    }

    #[test]
    fn test_placeholder_offset_skips_placeholder_and_suffix() {
        // [link text](url): caret should land right after "[", which is
        // 16 chars of insertion minus 9 of placeholder minus 6 of suffix.
        let insertion = ToolbarAction::Link.insertion("").unwrap();
        assert_eq!(insertion.cursor_offset, -15);
    }

    #[test]
    fn test_control_kinds_have_no_template() {
        assert_eq!(ToolbarAction::SaveLoad.insertion(""), None);
        assert_eq!(ToolbarAction::SlashMenu.insertion("sel"), None);
        assert_eq!(ToolbarAction::FullEditor.insertion(""), None);
    }

    #[test]
    fn test_every_action_has_a_label() {
        for action in ToolbarAction::ALL {
            assert!(!action.label().is_empty());
        }
    }
}
