//! Application state: the current screen, the room directory, the editor
//! controller and the transient UI bits (toasts, confirmation modal).
//!
//! All state transitions live here so they can be tested without a
//! terminal; `ui` only reads this struct and draws.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use huddle_config::{Config, Session};
use huddle_core::{
    ActivityKind, Editor, FileDraftSlot, Notice, NoticeLevel, Platform, Room, RoomDraft, RoomId,
    RoomStore, Tab, ToolbarAction, schedule,
};
use ratatui::widgets::ListState;

/// How long a toast stays visible.
pub const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
    CreateRoom,
    RoomDetail,
    Editor,
}

/// A notice plus its on-screen deadline.
pub struct Toast {
    pub notice: Notice,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Email,
}

#[derive(Debug)]
pub struct LoginForm {
    pub username: String,
    pub email: String,
    pub focus: LoginField,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            focus: LoginField::Username,
        }
    }
}

impl LoginForm {
    pub fn field_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Email => &mut self.email,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Email,
            LoginField::Email => LoginField::Username,
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateField {
    Name,
    Activity,
    Location,
    Date,
    Time,
    MaxParticipants,
    Description,
}

impl CreateField {
    pub const ALL: [CreateField; 7] = [
        CreateField::Name,
        CreateField::Activity,
        CreateField::Location,
        CreateField::Date,
        CreateField::Time,
        CreateField::MaxParticipants,
        CreateField::Description,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CreateField::Name => "Room Name",
            CreateField::Activity => "Activity Type",
            CreateField::Location => "Location",
            CreateField::Date => "Date (YYYY-MM-DD)",
            CreateField::Time => "Time (HH:MM)",
            CreateField::MaxParticipants => "Max Participants",
            CreateField::Description => "Description",
        }
    }
}

/// Buffer-backed create-room form. Values stay as typed text until submit,
/// when they are parsed into a `RoomDraft`.
#[derive(Debug)]
pub struct CreateRoomForm {
    pub name: String,
    pub activity: usize,
    pub location: String,
    pub date: String,
    pub time: String,
    pub max_participants: String,
    pub description: String,
    pub focus: CreateField,
}

impl Default for CreateRoomForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            activity: 0,
            location: String::new(),
            date: String::new(),
            time: String::new(),
            max_participants: String::new(),
            description: String::new(),
            focus: CreateField::Name,
        }
    }
}

impl CreateRoomForm {
    pub fn activity_kind(&self) -> ActivityKind {
        ActivityKind::ALL[self.activity % ActivityKind::ALL.len()]
    }

    pub fn next_activity(&mut self) {
        self.activity = (self.activity + 1) % ActivityKind::ALL.len();
    }

    pub fn previous_activity(&mut self) {
        self.activity = (self.activity + ActivityKind::ALL.len() - 1) % ActivityKind::ALL.len();
    }

    pub fn focus_next(&mut self) {
        let i = CreateField::ALL
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0);
        self.focus = CreateField::ALL[(i + 1) % CreateField::ALL.len()];
    }

    pub fn focus_previous(&mut self) {
        let i = CreateField::ALL
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0);
        self.focus = CreateField::ALL[(i + CreateField::ALL.len() - 1) % CreateField::ALL.len()];
    }

    /// The typed value of a text field; `None` while the activity selector
    /// has focus (it cycles with arrow keys instead).
    pub fn field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            CreateField::Name => Some(&mut self.name),
            CreateField::Activity => None,
            CreateField::Location => Some(&mut self.location),
            CreateField::Date => Some(&mut self.date),
            CreateField::Time => Some(&mut self.time),
            CreateField::MaxParticipants => Some(&mut self.max_participants),
            CreateField::Description => Some(&mut self.description),
        }
    }

    pub fn field_value(&self, field: CreateField) -> String {
        match field {
            CreateField::Name => self.name.clone(),
            CreateField::Activity => self.activity_kind().label().to_string(),
            CreateField::Location => self.location.clone(),
            CreateField::Date => self.date.clone(),
            CreateField::Time => self.time.clone(),
            CreateField::MaxParticipants => self.max_participants.clone(),
            CreateField::Description => self.description.clone(),
        }
    }

    /// Validate the form and turn it into a draft, or explain what is
    /// wrong with one user-facing message.
    pub fn to_draft(&self, host: &str) -> Result<RoomDraft, String> {
        let name = self.name.trim();
        let location = self.location.trim();
        if name.is_empty() || location.is_empty() {
            return Err("Please fill in all fields.".to_string());
        }

        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| "Date must be in YYYY-MM-DD format.".to_string())?;
        let time = NaiveTime::parse_from_str(self.time.trim(), "%H:%M")
            .map_err(|_| "Time must be in HH:MM format.".to_string())?;
        let max_participants: usize = self
            .max_participants
            .trim()
            .parse()
            .ok()
            .filter(|n| (2..=20).contains(n))
            .ok_or_else(|| "Max participants must be a number between 2 and 20.".to_string())?;

        Ok(RoomDraft {
            name: name.to_string(),
            activity: self.activity_kind(),
            host: host.to_string(),
            location: location.to_string(),
            date,
            time,
            max_participants,
            description: self.description.trim().to_string(),
        })
    }
}

pub struct App {
    pub screen: Screen,
    pub session: Option<Session>,
    pub rooms: RoomStore,
    pub filter: Option<ActivityKind>,
    pub room_list_state: ListState,
    pub login: LoginForm,
    pub create: CreateRoomForm,
    pub editor: Editor,
    /// When set, the next key picks a toolbar action instead of typing.
    pub toolbar_menu: bool,
    pub detail_room_id: Option<RoomId>,
    pub confirm_delete: Option<RoomId>,
    pub toasts: Vec<Toast>,
    pub should_quit: bool,
    session_path: PathBuf,
}

impl App {
    pub fn new(
        config: &Config,
        session_path: PathBuf,
        session: Option<Session>,
        today: NaiveDate,
    ) -> Self {
        let drafts = FileDraftSlot::new(config.data_path.join("draft.md"));
        let mut app = Self {
            screen: if session.is_some() {
                Screen::Dashboard
            } else {
                Screen::Login
            },
            session,
            rooms: RoomStore::with_sample_rooms(today),
            filter: None,
            room_list_state: ListState::default(),
            login: LoginForm::default(),
            create: CreateRoomForm::default(),
            editor: Editor::new(Box::new(drafts), Platform::current()),
            toolbar_menu: false,
            detail_room_id: None,
            confirm_delete: None,
            toasts: Vec::new(),
            should_quit: false,
            session_path,
        };

        if !app.rooms.is_empty() {
            app.room_list_state.select(Some(0));
        }
        app
    }

    // --- notices -----------------------------------------------------

    pub fn notify(&mut self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => log::error!("{}", notice.message),
            NoticeLevel::Warning => log::warn!("{}", notice.message),
            _ => log::info!("{}", notice.message),
        }
        self.toasts.push(Toast {
            notice,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    pub fn expire_toasts(&mut self, now: Instant) {
        self.toasts.retain(|toast| toast.expires_at > now);
    }

    // --- room listing ------------------------------------------------

    pub fn visible_rooms(&self) -> Vec<&Room> {
        self.rooms.list(self.filter)
    }

    pub fn filter_label(&self) -> &'static str {
        match self.filter {
            Some(kind) => kind.label(),
            None => "All Activities",
        }
    }

    /// Advance the filter: all kinds in turn, then back to "all".
    pub fn cycle_filter(&mut self) {
        self.filter = match self.filter {
            None => Some(ActivityKind::ALL[0]),
            Some(kind) => ActivityKind::ALL
                .iter()
                .position(|k| *k == kind)
                .and_then(|i| ActivityKind::ALL.get(i + 1))
                .copied(),
        };
        self.clamp_room_selection();
    }

    pub fn next_room(&mut self) {
        let len = self.visible_rooms().len();
        if len == 0 {
            return;
        }
        let i = match self.room_list_state.selected() {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.room_list_state.select(Some(i));
    }

    pub fn previous_room(&mut self) {
        let len = self.visible_rooms().len();
        if len == 0 {
            return;
        }
        let i = match self.room_list_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.room_list_state.select(Some(i));
    }

    pub fn selected_room(&self) -> Option<&Room> {
        let index = self.room_list_state.selected()?;
        self.visible_rooms().get(index).copied()
    }

    fn clamp_room_selection(&mut self) {
        let len = self.visible_rooms().len();
        if len == 0 {
            self.room_list_state.select(None);
        } else {
            let i = self.room_list_state.selected().unwrap_or(0).min(len - 1);
            self.room_list_state.select(Some(i));
        }
    }

    /// Header line with the wall clock and the next upcoming room.
    pub fn clock_line(&self, now: NaiveDateTime) -> String {
        let clock = format!(
            "{} {}",
            schedule::format_date(now.date()),
            schedule::format_time(now.time())
        );
        match self.rooms.next_upcoming(now) {
            Some(room) => format!(
                "{clock} | Next: {} ({})",
                room.name,
                schedule::relative_to(now, room.starts_at())
            ),
            None => format!("{clock} | No upcoming rooms"),
        }
    }

    // --- auth --------------------------------------------------------

    pub fn submit_login(&mut self) {
        let username = self.login.username.trim().to_string();
        let email = self.login.email.trim().to_string();
        if username.is_empty() || email.is_empty() {
            self.notify(Notice::warning("Please enter a username and email."));
            return;
        }

        let session = Session::new(username, email);
        if let Err(err) = session.save_to_path(&self.session_path) {
            log::warn!("Failed to persist session: {err}");
            self.notify(Notice::error("Could not save the session."));
        }
        self.notify(Notice::success(format!("Welcome, {}!", session.username)));
        self.session = Some(session);
        self.login = LoginForm::default();
        self.screen = Screen::Dashboard;
    }

    pub fn logout(&mut self) {
        if let Err(err) = Session::clear_at_path(&self.session_path) {
            log::warn!("Failed to remove session file: {err}");
        }
        self.session = None;
        self.screen = Screen::Login;
        self.notify(Notice::info("You have been logged out."));
    }

    /// The logged-in username, or a "login first" warning.
    fn current_username(&mut self) -> Option<String> {
        match &self.session {
            Some(session) => Some(session.username.clone()),
            None => {
                self.notify(Notice::warning("Please login first"));
                None
            }
        }
    }

    // --- room flows ----------------------------------------------------

    pub fn open_detail(&mut self) {
        if let Some(id) = self.selected_room().map(|room| room.id) {
            self.detail_room_id = Some(id);
            self.screen = Screen::RoomDetail;
        }
    }

    pub fn detail_room(&self) -> Option<&Room> {
        self.detail_room_id.and_then(|id| self.rooms.get(id))
    }

    pub fn close_detail(&mut self) {
        self.detail_room_id = None;
        self.screen = Screen::Dashboard;
    }

    pub fn join_detail_room(&mut self) {
        let Some(username) = self.current_username() else {
            return;
        };
        let Some(id) = self.detail_room_id else {
            return;
        };
        match self.rooms.join(id, &username) {
            Ok(()) => self.notify(Notice::success("Successfully joined the room!")),
            Err(err) => self.notify(Notice::warning(capitalize(&err.to_string()))),
        }
    }

    pub fn leave_detail_room(&mut self) {
        let Some(username) = self.current_username() else {
            return;
        };
        let Some(id) = self.detail_room_id else {
            return;
        };
        match self.rooms.leave(id, &username) {
            Ok(()) => self.notify(Notice::info("You have left the room.")),
            Err(err) => self.notify(Notice::warning(capitalize(&err.to_string()))),
        }
    }

    pub fn request_delete(&mut self) {
        self.confirm_delete = self.detail_room_id;
    }

    pub fn confirm_pending_delete(&mut self) {
        let Some(id) = self.confirm_delete.take() else {
            return;
        };
        let Some(username) = self.current_username() else {
            return;
        };
        match self.rooms.delete(id, &username) {
            Ok(_) => {
                self.notify(Notice::success("Room deleted successfully."));
                self.close_detail();
                self.clamp_room_selection();
            }
            Err(err) => self.notify(Notice::warning(capitalize(&err.to_string()))),
        }
    }

    pub fn cancel_pending_delete(&mut self) {
        self.confirm_delete = None;
    }

    pub fn submit_create_form(&mut self) {
        let Some(username) = self.current_username() else {
            return;
        };
        match self.create.to_draft(&username) {
            Ok(draft) => {
                self.rooms.create(draft);
                self.notify(Notice::success("Room created successfully!"));
                self.create = CreateRoomForm::default();
                self.screen = Screen::Dashboard;
                self.clamp_room_selection();
            }
            Err(message) => self.notify(Notice::warning(message)),
        }
    }

    // --- editor --------------------------------------------------------

    pub fn run_toolbar_action(&mut self, action: ToolbarAction) {
        if let Some(notice) = self.editor.insert_formatting(action) {
            self.notify(notice);
        }
    }

    fn toggle_preview(&mut self) {
        let next = match self.editor.tab() {
            Tab::Write => Tab::Preview,
            Tab::Preview => Tab::Write,
        };
        self.editor.switch_tab(next);
    }

    // --- key dispatch --------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) {
        // The confirmation modal swallows everything until answered.
        if self.confirm_delete.is_some() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.confirm_pending_delete(),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.cancel_pending_delete()
                }
                _ => {}
            }
            return;
        }

        match self.screen {
            Screen::Login => self.handle_login_key(key),
            Screen::Dashboard => self.handle_dashboard_key(key),
            Screen::CreateRoom => self.handle_create_key(key),
            Screen::RoomDetail => self.handle_detail_key(key),
            Screen::Editor => self.handle_editor_key(key),
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Down | KeyCode::Up => self.login.toggle_focus(),
            KeyCode::Enter => self.submit_login(),
            KeyCode::Backspace => {
                self.login.field_mut().pop();
            }
            KeyCode::Char(c) => self.login.field_mut().push(c),
            _ => {}
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.next_room(),
            KeyCode::Up | KeyCode::Char('k') => self.previous_room(),
            KeyCode::Enter => self.open_detail(),
            KeyCode::Char('f') => self.cycle_filter(),
            KeyCode::Char('n') => self.screen = Screen::CreateRoom,
            KeyCode::Char('e') => self.screen = Screen::Editor,
            KeyCode::Char('o') => self.logout(),
            _ => {}
        }
    }

    fn handle_create_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.create = CreateRoomForm::default();
                self.screen = Screen::Dashboard;
            }
            KeyCode::Tab | KeyCode::Down => self.create.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.create.focus_previous(),
            KeyCode::Enter => self.submit_create_form(),
            KeyCode::Left if self.create.focus == CreateField::Activity => {
                self.create.previous_activity()
            }
            KeyCode::Right if self.create.focus == CreateField::Activity => {
                self.create.next_activity()
            }
            KeyCode::Backspace => {
                if let Some(field) = self.create.field_mut() {
                    field.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.create.field_mut() {
                    field.push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.close_detail(),
            KeyCode::Char('j') => self.join_detail_room(),
            KeyCode::Char('l') => self.leave_detail_room(),
            KeyCode::Char('d') => self.request_delete(),
            _ => {}
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        if self.toolbar_menu {
            self.toolbar_menu = false;
            if let Some(action) = toolbar_menu_action(key.code) {
                self.run_toolbar_action(action);
            }
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // The preview pane is read-only.
        if self.editor.tab() == Tab::Preview {
            match key.code {
                KeyCode::Esc => self.screen = Screen::Dashboard,
                KeyCode::Char('p') if ctrl => self.editor.switch_tab(Tab::Write),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.screen = Screen::Dashboard,
            KeyCode::Char('b') if ctrl => self.run_toolbar_action(ToolbarAction::Bold),
            KeyCode::Char('i') if ctrl => self.run_toolbar_action(ToolbarAction::Italic),
            KeyCode::Char('k') if ctrl => self.run_toolbar_action(ToolbarAction::Link),
            KeyCode::Char('s') if ctrl => self.run_toolbar_action(ToolbarAction::SaveLoad),
            KeyCode::Char('t') if ctrl => self.toolbar_menu = true,
            KeyCode::Char('p') if ctrl => self.toggle_preview(),
            KeyCode::Char('a') if ctrl => self.editor.document_mut().select_all(),
            KeyCode::Tab => {
                // Tab expands a slash token when one sits before the
                // caret; otherwise it indents.
                if !self.editor.handle_slash_token() {
                    self.editor.document_mut().insert("    ");
                }
            }
            KeyCode::Enter => self.editor.document_mut().insert("\n"),
            KeyCode::Backspace => self.editor.document_mut().delete_backward(),
            KeyCode::Left => self.editor.document_mut().move_left(),
            KeyCode::Right => self.editor.document_mut().move_right(),
            KeyCode::Home => self.editor.document_mut().move_to_start(),
            KeyCode::End => self.editor.document_mut().move_to_end(),
            KeyCode::Char(c) if !ctrl => self.editor.document_mut().insert(&c.to_string()),
            _ => {}
        }
    }
}

/// Second key of the Ctrl+T toolbar menu. Every toolbar action is
/// reachable from here, including the ones without a direct shortcut.
fn toolbar_menu_action(code: KeyCode) -> Option<ToolbarAction> {
    match code {
        KeyCode::Char('h') => Some(ToolbarAction::Heading),
        KeyCode::Char('b') => Some(ToolbarAction::Bold),
        KeyCode::Char('i') => Some(ToolbarAction::Italic),
        KeyCode::Char('q') => Some(ToolbarAction::Quote),
        KeyCode::Char('c') => Some(ToolbarAction::Code),
        KeyCode::Char('k') => Some(ToolbarAction::Link),
        KeyCode::Char('u') => Some(ToolbarAction::UnorderedList),
        KeyCode::Char('o') => Some(ToolbarAction::OrderedList),
        KeyCode::Char('t') => Some(ToolbarAction::TaskList),
        KeyCode::Char('m') => Some(ToolbarAction::Mention),
        KeyCode::Char('s') => Some(ToolbarAction::SaveLoad),
        KeyCode::Char('/') => Some(ToolbarAction::SlashMenu),
        KeyCode::Char('f') => Some(ToolbarAction::FullEditor),
        _ => None,
    }
}

/// Room rule errors read as sentences in toasts.
fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 21).unwrap()
    }

    fn app_in(temp: &TempDir, session: Option<Session>) -> App {
        let config = Config {
            data_path: temp.path().to_path_buf(),
        };
        App::new(
            &config,
            temp.path().join("session.toml"),
            session,
            today(),
        )
    }

    fn logged_in_app(temp: &TempDir) -> App {
        app_in(temp, Some(Session::new("carol", "carol@example.com")))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn last_toast(app: &App) -> &Notice {
        &app.toasts.last().unwrap().notice
    }

    #[test]
    fn test_starts_on_login_without_session() {
        let temp = TempDir::new().unwrap();
        assert_eq!(app_in(&temp, None).screen, Screen::Login);
        assert_eq!(logged_in_app(&temp).screen, Screen::Dashboard);
    }

    #[test]
    fn test_login_persists_session_and_greets() {
        let temp = TempDir::new().unwrap();
        let mut app = app_in(&temp, None);
        app.login.username = "alice".to_string();
        app.login.email = "alice@example.com".to_string();

        app.submit_login();

        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(app.session.as_ref().unwrap().username, "alice");
        assert_eq!(last_toast(&app).message, "Welcome, alice!");
        assert!(temp.path().join("session.toml").exists());
    }

    #[test]
    fn test_login_requires_both_fields() {
        let temp = TempDir::new().unwrap();
        let mut app = app_in(&temp, None);
        app.login.username = "alice".to_string();

        app.submit_login();

        assert_eq!(app.screen, Screen::Login);
        assert_eq!(last_toast(&app).level, NoticeLevel::Warning);
    }

    #[test]
    fn test_logout_clears_session_file() {
        let temp = TempDir::new().unwrap();
        let mut app = app_in(&temp, None);
        app.login.username = "alice".to_string();
        app.login.email = "alice@example.com".to_string();
        app.submit_login();

        app.logout();

        assert_eq!(app.screen, Screen::Login);
        assert!(app.session.is_none());
        assert!(!temp.path().join("session.toml").exists());
        assert_eq!(last_toast(&app).message, "You have been logged out.");
    }

    #[test]
    fn test_join_and_leave_flow() {
        let temp = TempDir::new().unwrap();
        let mut app = logged_in_app(&temp);
        app.open_detail();
        assert_eq!(app.screen, Screen::RoomDetail);

        app.join_detail_room();
        assert_eq!(last_toast(&app).message, "Successfully joined the room!");

        app.join_detail_room();
        assert_eq!(last_toast(&app).level, NoticeLevel::Warning);
        assert_eq!(
            last_toast(&app).message,
            "You have already joined this room"
        );

        app.leave_detail_room();
        assert_eq!(last_toast(&app).message, "You have left the room.");
    }

    #[test]
    fn test_room_actions_require_login() {
        let temp = TempDir::new().unwrap();
        let mut app = app_in(&temp, None);
        app.detail_room_id = Some(1);

        app.join_detail_room();

        assert_eq!(last_toast(&app).message, "Please login first");
        assert_eq!(last_toast(&app).level, NoticeLevel::Warning);
    }

    #[test]
    fn test_delete_needs_confirmation_and_host() {
        let temp = TempDir::new().unwrap();
        let mut app = logged_in_app(&temp);
        app.open_detail();
        let rooms_before = app.rooms.len();

        app.request_delete();
        assert!(app.confirm_delete.is_some());

        // Answering "n" keeps the room.
        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.rooms.len(), rooms_before);
        assert!(app.confirm_delete.is_none());

        // Confirming as a non-host is refused by the store.
        app.request_delete();
        app.handle_key(key(KeyCode::Char('y')));
        assert_eq!(app.rooms.len(), rooms_before);
        assert_eq!(last_toast(&app).level, NoticeLevel::Warning);
    }

    #[test]
    fn test_host_can_delete_after_confirming() {
        let temp = TempDir::new().unwrap();
        let mut app = app_in(&temp, Some(Session::new("Alice Wang", "alice@example.com")));
        // The chess room is hosted by Alice Wang and listed first.
        app.open_detail();
        app.request_delete();

        app.handle_key(key(KeyCode::Char('y')));

        assert_eq!(app.rooms.len(), 1);
        assert_eq!(last_toast(&app).message, "Room deleted successfully.");
        assert_eq!(app.screen, Screen::Dashboard);
    }

    #[test]
    fn test_filter_cycles_through_all_kinds_and_back() {
        let temp = TempDir::new().unwrap();
        let mut app = logged_in_app(&temp);
        assert_eq!(app.filter_label(), "All Activities");

        let mut seen = Vec::new();
        for _ in 0..ActivityKind::ALL.len() {
            app.cycle_filter();
            seen.push(app.filter);
        }
        assert!(seen.iter().all(|f| f.is_some()));

        app.cycle_filter();
        assert_eq!(app.filter, None);
    }

    #[test]
    fn test_filter_narrows_visible_rooms() {
        let temp = TempDir::new().unwrap();
        let mut app = logged_in_app(&temp);
        assert_eq!(app.visible_rooms().len(), 2);

        app.filter = Some(ActivityKind::Sports);
        app.clamp_room_selection();

        let visible = app.visible_rooms();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Basketball Pickup Game");
    }

    #[test]
    fn test_create_form_validation_messages() {
        let form = CreateRoomForm::default();
        assert_eq!(
            form.to_draft("carol"),
            Err("Please fill in all fields.".to_string())
        );

        let mut form = CreateRoomForm {
            name: "Movie Night".to_string(),
            location: "Common Room".to_string(),
            date: "next friday".to_string(),
            ..CreateRoomForm::default()
        };
        assert_eq!(
            form.to_draft("carol"),
            Err("Date must be in YYYY-MM-DD format.".to_string())
        );

        form.date = "2026-08-30".to_string();
        form.time = "19:00".to_string();
        form.max_participants = "50".to_string();
        assert_eq!(
            form.to_draft("carol"),
            Err("Max participants must be a number between 2 and 20.".to_string())
        );
    }

    #[test]
    fn test_submitting_a_valid_form_creates_the_room() {
        let temp = TempDir::new().unwrap();
        let mut app = logged_in_app(&temp);
        app.screen = Screen::CreateRoom;
        app.create.name = "Movie Night".to_string();
        app.create.location = "Common Room".to_string();
        app.create.date = "2026-08-30".to_string();
        app.create.time = "19:00".to_string();
        app.create.max_participants = "12".to_string();

        app.submit_create_form();

        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(last_toast(&app).message, "Room created successfully!");
        let newest = app.visible_rooms()[0];
        assert_eq!(newest.name, "Movie Night");
        assert_eq!(newest.participants, vec!["carol"]);
    }

    #[test]
    fn test_toasts_expire() {
        let temp = TempDir::new().unwrap();
        let mut app = logged_in_app(&temp);
        app.notify(Notice::info("hello"));
        assert_eq!(app.toasts.len(), 1);

        app.expire_toasts(Instant::now());
        assert_eq!(app.toasts.len(), 1);

        app.expire_toasts(Instant::now() + TOAST_TTL + Duration::from_secs(1));
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn test_editor_shortcut_inserts_bold_template() {
        let temp = TempDir::new().unwrap();
        let mut app = logged_in_app(&temp);
        app.screen = Screen::Editor;

        app.handle_key(ctrl('b'));

        assert_eq!(app.editor.document().text(), "**bold text**");
    }

    #[test]
    fn test_toolbar_menu_reaches_actions_without_shortcuts() {
        let temp = TempDir::new().unwrap();
        let mut app = logged_in_app(&temp);
        app.screen = Screen::Editor;

        app.handle_key(ctrl('t'));
        assert!(app.toolbar_menu);
        app.handle_key(key(KeyCode::Char('q')));

        assert!(!app.toolbar_menu);
        assert_eq!(app.editor.document().text(), "> quoted text");
    }

    #[test]
    fn test_tab_expands_slash_token_in_editor() {
        let temp = TempDir::new().unwrap();
        let mut app = logged_in_app(&temp);
        app.screen = Screen::Editor;
        app.editor.document_mut().insert("see /math");

        app.handle_key(key(KeyCode::Tab));

        assert_eq!(app.editor.document().text(), "see $E = mc^2$");
    }

    #[test]
    fn test_preview_pane_ignores_typing() {
        let temp = TempDir::new().unwrap();
        let mut app = logged_in_app(&temp);
        app.screen = Screen::Editor;
        app.editor.document_mut().insert("# Notes");

        app.handle_key(ctrl('p'));
        assert_eq!(app.editor.tab(), Tab::Preview);
        assert_eq!(app.editor.preview_html(), "<h1>Notes</h1>");

        app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(app.editor.document().text(), "# Notes");
    }

    #[test]
    fn test_clock_line_counts_down_to_next_room() {
        let temp = TempDir::new().unwrap();
        let app = logged_in_app(&temp);
        // Sample chess room starts tomorrow at 14:00.
        let now = today().and_hms_opt(14, 0, 0).unwrap();

        let line = app.clock_line(now);

        assert!(line.contains("Next: Chess Tournament"));
        assert!(line.contains("in 1 day"));
    }
}
