/*!
 * Editor core.
 *
 * The editing system is built around one explicit controller object per
 * session rather than ambient state:
 *
 * - [`Document`] owns the buffer and a clamped, char-offset [`Selection`];
 *   every mutation keeps `start <= end <= len` true.
 * - [`ToolbarAction`] is the closed set of toolbar kinds; each formatting
 *   kind carries its insertion template and cursor-offset rule.
 * - [`slash`] maps `/token` words typed before the caret to literal
 *   snippet expansions.
 * - [`Editor`] wires the above to the preview pipeline and the draft slot,
 *   and hands [`crate::notice::Notice`]s back to the frontend instead of
 *   performing IO or UI work itself.
 */

pub mod actions;
pub mod document;
pub mod editor;
pub mod slash;

pub use actions::{Insertion, ToolbarAction};
pub use document::{Document, Selection};
pub use editor::{Editor, Platform, RENDER_FAILURE_HTML, Tab};
pub use slash::{SLASH_COMMANDS, SlashCommand};
