use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tracing::info;

use crate::catalog::{Catalog, ReturnOutcome};
use crate::models::{BookId, BookStatus};

use super::forms::{AddForm, IssueField, IssueForm, ReturnForm};
use super::helpers::{centered_rect, pad_column, surface_error};
use super::screens::BooksScreen;

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Column widths of the book table.
const ID_WIDTH: usize = 10;
const TITLE_WIDTH: usize = 40;
/// Rows skipped by PageUp / PageDown on the book list.
const PAGE_STEP: isize = 5;
/// Menu entries in display order: key and label.
const MENU_OPTIONS: &[(char, &str)] = &[
    ('D', "Display Books"),
    ('I', "Issue Book"),
    ('A', "Add Book"),
    ('R', "Return Book"),
    ('Q', "Quit"),
];

/// High-level navigation states.
enum Screen {
    Menu,
    Books(BooksScreen),
}

/// Modal forms layered over the current screen.
enum Mode {
    Normal,
    Issuing(IssueForm),
    Adding(AddForm),
    Returning(ReturnForm),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state: the catalog plus whatever the operator is
/// looking at or typing.
pub struct App {
    catalog: Catalog,
    library_name: String,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(catalog: Catalog, library_name: impl Into<String>) -> Self {
        Self {
            catalog,
            library_name: library_name.into(),
            screen: Screen::Menu,
            mode: Mode::Normal,
            status: None,
        }
    }

    /// Show a startup problem (such as an unreadable book list) in the footer.
    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.set_status(notice, StatusKind::Error);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current footer message, if any.
    pub fn notice(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    /// Apply one key press. Returns `true` once the operator asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::Issuing(form) => self.handle_issue(code, form),
            Mode::Adding(form) => self.handle_add(code, form),
            Mode::Returning(form) => self.handle_return(code, form),
        };

        exit
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        let len = self.catalog.len();
        if let Screen::Books(ref mut books) = self.screen {
            match code {
                KeyCode::Up => books.move_selection(-1, len),
                KeyCode::Down => books.move_selection(1, len),
                KeyCode::PageUp => books.move_selection(-PAGE_STEP, len),
                KeyCode::PageDown => books.move_selection(PAGE_STEP, len),
                KeyCode::Home => books.selected = 0,
                KeyCode::End => books.selected = len.saturating_sub(1),
                KeyCode::Esc => {
                    self.screen = Screen::Menu;
                    self.clear_status();
                }
                _ => return self.handle_command(code, exit),
            }
            return Mode::Normal;
        }

        match code {
            KeyCode::Esc => {
                self.clear_status();
                Mode::Normal
            }
            _ => self.handle_command(code, exit),
        }
    }

    /// Single-letter menu commands, valid on every screen.
    fn handle_command(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        let KeyCode::Char(ch) = code else {
            return Mode::Normal;
        };

        match ch.to_ascii_lowercase() {
            'd' => {
                self.clear_status();
                let mut books = BooksScreen::default();
                books.ensure_in_bounds(self.catalog.len());
                self.screen = Screen::Books(books);
                Mode::Normal
            }
            'i' => {
                self.clear_status();
                Mode::Issuing(IssueForm::for_book(self.selected_id()))
            }
            'a' => {
                self.clear_status();
                Mode::Adding(AddForm::default())
            }
            'r' => {
                self.clear_status();
                Mode::Returning(ReturnForm::for_book(self.selected_id()))
            }
            'q' => {
                *exit = true;
                Mode::Normal
            }
            _ => {
                self.set_status(
                    "Invalid input. Please enter one of the options: D, I, A, R, or Q.",
                    StatusKind::Error,
                );
                Mode::Normal
            }
        }
    }

    fn handle_issue(&mut self, code: KeyCode, mut form: IssueForm) -> Mode {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Issue cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_issue(&form) {
                Ok(()) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Mode::Issuing(form)
        } else {
            Mode::Normal
        }
    }

    fn handle_add(&mut self, code: KeyCode, mut form: AddForm) -> Mode {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Add book cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_new_book(&form) {
                Ok(()) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Mode::Adding(form)
        } else {
            Mode::Normal
        }
    }

    fn handle_return(&mut self, code: KeyCode, mut form: ReturnForm) -> Mode {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Return cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_return(&form) {
                Ok(()) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Mode::Returning(form)
        } else {
            Mode::Normal
        }
    }

    fn save_issue(&mut self, form: &IssueForm) -> Result<()> {
        let (id, lender) = form.parse_inputs()?;
        let record = self.catalog.issue(id, &lender)?;
        self.focus_book(id);
        self.set_status(
            format!(
                "Book '{}' (ID: {id}) issued to {}.",
                record.title, record.lender_name
            ),
            StatusKind::Info,
        );
        Ok(())
    }

    fn save_new_book(&mut self, form: &AddForm) -> Result<()> {
        let (id, record) = self.catalog.add(&form.title)?;
        self.focus_book(id);
        self.set_status(
            format!("Book '{}' (ID: {id}) has been added.", record.title),
            StatusKind::Info,
        );
        Ok(())
    }

    fn save_return(&mut self, form: &ReturnForm) -> Result<()> {
        let id = form.parse_inputs()?;
        let outcome = self.catalog.return_book(id)?;
        self.focus_book(id);
        let message = match outcome {
            ReturnOutcome::Returned(record) => {
                format!("Book '{}' (ID: {id}) returned and now available.", record.title)
            }
            ReturnOutcome::Recovered(_) => {
                format!("Unknown status for book ID {id}. Reset to available.")
            }
        };
        self.set_status(message, StatusKind::Info);
        Ok(())
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Menu => self.draw_menu(frame, content_area),
            Screen::Books(books) => self.draw_books(frame, content_area, books),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::Issuing(form) => self.draw_issue_form(frame, area, form),
            Mode::Adding(form) => self.draw_add_form(frame, area, form),
            Mode::Returning(form) => self.draw_return_form(frame, area, form),
            Mode::Normal => {}
        }
    }

    fn draw_menu(&self, frame: &mut Frame, area: Rect) {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);

        let mut lines = vec![
            Line::from(Span::styled(
                format!("WELCOME TO {}", self.library_name.to_uppercase()),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("{} books in the catalog", self.catalog.len())),
            Line::from(""),
        ];
        for (key, label) in MENU_OPTIONS {
            lines.push(Line::from(vec![
                Span::raw("Press "),
                Span::styled(format!("[{key}]"), key_style),
                Span::raw(format!(" to {label}")),
            ]));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Library Catalog");
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
    }

    fn draw_books(&self, frame: &mut Frame, area: Rect, books: &BooksScreen) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("List of Books in {}", self.library_name));

        if self.catalog.is_empty() {
            let message = Paragraph::new("No books yet. Press 'A' to add one.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);

        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let header = Line::from(Span::styled(
            format!(
                "{}{}{}",
                pad_column("ID", ID_WIDTH),
                pad_column("Title", TITLE_WIDTH),
                "Status"
            ),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(header), rows[0]);

        let items: Vec<ListItem> = self
            .catalog
            .list()
            .map(|(id, title, status)| {
                ListItem::new(Line::from(vec![
                    Span::raw(pad_column(&id.to_string(), ID_WIDTH)),
                    Span::raw(pad_column(title, TITLE_WIDTH)),
                    Span::styled(status.to_string(), status_style(status)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(Some(books.selected));
        frame.render_stateful_widget(list, rows[1], &mut state);

        self.draw_book_detail(frame, chunks[1], books);
    }

    fn draw_book_detail(&self, frame: &mut Frame, area: Rect, books: &BooksScreen) {
        let block = Block::default().borders(Borders::ALL).title("Details");
        let label_style = Style::default().fg(Color::Gray);

        let lines = match books
            .current_id(&self.catalog)
            .and_then(|id| self.catalog.get(id).map(|record| (id, record)))
        {
            Some((id, record)) => {
                let mut lines = vec![
                    Line::from(Span::styled(
                        record.title.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(vec![
                        Span::styled("ID: ", label_style),
                        Span::raw(id.to_string()),
                    ]),
                    Line::from(vec![
                        Span::styled("Status: ", label_style),
                        Span::styled(record.status.to_string(), status_style(record.status)),
                    ]),
                ];
                if record.status == BookStatus::Issued {
                    lines.push(Line::from(vec![
                        Span::styled("Lender: ", label_style),
                        Span::raw(record.lender_name.clone()),
                    ]));
                    lines.push(Line::from(vec![
                        Span::styled("Issued: ", label_style),
                        Span::raw(record.issue_date_display()),
                    ]));
                }
                lines
            }
            None => vec![Line::from("No book selected.")],
        };

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match (&self.screen, &self.mode) {
            (_, Mode::Issuing(_)) => Line::from(vec![
                Span::styled("[Tab]", key_style),
                Span::raw(" Switch Field   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Issue   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (_, Mode::Adding(_)) | (_, Mode::Returning(_)) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Save   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (Screen::Books(_), Mode::Normal) => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Navigate   "),
                Span::styled("[I]", key_style),
                Span::raw(" Issue   "),
                Span::styled("[R]", key_style),
                Span::raw(" Return   "),
                Span::styled("[A]", key_style),
                Span::raw(" Add   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Menu   "),
                Span::styled("[Q]", key_style),
                Span::raw(" Quit"),
            ]),
            (Screen::Menu, Mode::Normal) => Line::from(vec![
                Span::styled("[D/I/A/R]", key_style),
                Span::raw(" Choose   "),
                Span::styled("[Q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }

    fn draw_issue_form(&self, frame: &mut Frame, area: Rect, form: &IssueForm) {
        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Issue Book").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line("Book ID", IssueField::BookId),
            form.build_line("Lender", IssueField::Lender),
            Line::from(""),
        ];
        lines.push(form_hint(form.error.as_deref(), "Enter to issue • Tab to switch • Esc to cancel"));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let (prefix, row) = match form.active {
            IssueField::BookId => ("Book ID: ", 0),
            IssueField::Lender => ("Lender: ", 1),
        };
        let cursor_x = inner.x + prefix.len() as u16 + form.value_len(form.active) as u16;
        frame.set_cursor_position((cursor_x, inner.y + row));
    }

    fn draw_add_form(&self, frame: &mut Frame, area: Rect, form: &AddForm) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Book").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            form.build_line(),
            Line::from(""),
            form_hint(form.error.as_deref(), "Enter to save • Esc to cancel"),
        ];
        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let cursor_x = inner.x + "Title: ".len() as u16 + form.value_len() as u16;
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn draw_return_form(&self, frame: &mut Frame, area: Rect, form: &ReturnForm) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Return Book").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            form.build_line(),
            Line::from(""),
            form_hint(form.error.as_deref(), "Enter to return • Esc to cancel"),
        ];
        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let cursor_x = inner.x + "Book ID: ".len() as u16 + form.book_id.len() as u16;
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    /// Book highlighted on the list screen, if that screen is showing.
    fn selected_id(&self) -> Option<BookId> {
        match &self.screen {
            Screen::Books(books) => books.current_id(&self.catalog),
            Screen::Menu => None,
        }
    }

    fn focus_book(&mut self, id: BookId) {
        if let Screen::Books(ref mut books) = self.screen {
            books.focus(&self.catalog, id);
        }
    }

    pub(crate) fn log_exit(&self) {
        info!(books = self.catalog.len(), "catalog session closed");
    }

    /// Printed once the terminal is restored after a normal quit.
    pub(crate) fn farewell(&self) -> String {
        format!("Thank you for using the {} catalog. Goodbye!", self.library_name)
    }
}

fn status_style(status: BookStatus) -> Style {
    match status {
        BookStatus::Available => Style::default().fg(Color::Green),
        BookStatus::Issued => Style::default().fg(Color::Yellow),
    }
}

/// Error text when the last submit failed, otherwise the key hint.
fn form_hint(error: Option<&str>, hint: &str) -> Line<'static> {
    match error {
        Some(error) => Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::Gray),
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tempfile::TempDir;

    use super::*;
    use crate::store::TitleStore;

    fn app_with(titles: &[&str]) -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        let store = TitleStore::new(dir.path().join("list_of_books.txt"));
        fs::write(store.path(), titles.join("\n")).unwrap();
        let loaded = store.load().unwrap();
        let catalog = Catalog::with_titles(store, loaded);
        (dir, App::new(catalog, "Test Library"))
    }

    fn press(app: &mut App, keys: &str) {
        for ch in keys.chars() {
            assert!(!app.handle_key(KeyCode::Char(ch)));
        }
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn status_text(app: &App) -> &str {
        app.status.as_ref().map(|s| s.text.as_str()).unwrap_or("")
    }

    #[test]
    fn quit_is_case_insensitive() {
        let (_dir, mut app) = app_with(&["Dune"]);
        assert!(app.handle_key(KeyCode::Char('Q')));
        let (_dir, mut app) = app_with(&["Dune"]);
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn farewell_names_the_library() {
        let (_dir, app) = app_with(&[]);
        assert_eq!(
            app.farewell(),
            "Thank you for using the Test Library catalog. Goodbye!"
        );
    }

    #[test]
    fn unknown_command_shows_options() {
        let (_dir, mut app) = app_with(&["Dune"]);
        press(&mut app, "x");
        assert!(status_text(&app).contains("D, I, A, R, or Q"));
        assert!(matches!(app.mode, Mode::Normal));
    }

    #[test]
    fn issue_flow_from_menu() {
        let (_dir, mut app) = app_with(&["Dune", "1984"]);
        press(&mut app, "i101");
        app.handle_key(KeyCode::Tab);
        press(&mut app, "Alice");
        app.handle_key(KeyCode::Enter);

        assert!(matches!(app.mode, Mode::Normal));
        let record = app.catalog().get(BookId::from(101)).unwrap();
        assert_eq!(record.status, BookStatus::Issued);
        assert_eq!(record.lender_name, "Alice");
        assert_eq!(status_text(&app), "Book 'Dune' (ID: 101) issued to Alice.");
    }

    #[test]
    fn failed_issue_keeps_form_open_for_correction() {
        let (_dir, mut app) = app_with(&["Dune"]);
        press(&mut app, "i999");
        app.handle_key(KeyCode::Tab);
        press(&mut app, "Bob");
        app.handle_key(KeyCode::Enter);

        match &app.mode {
            Mode::Issuing(form) => {
                assert_eq!(
                    form.error.as_deref(),
                    Some("Book ID 999 not found in the catalog.")
                );
            }
            _ => panic!("issue form should stay open"),
        }

        app.handle_key(KeyCode::Tab);
        for _ in 0..3 {
            app.handle_key(KeyCode::Backspace);
        }
        press(&mut app, "101");
        app.handle_key(KeyCode::Enter);
        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(
            app.catalog().get(BookId::from(101)).unwrap().lender_name,
            "Bob"
        );
    }

    #[test]
    fn already_issued_reports_current_lender() {
        let (_dir, mut app) = app_with(&["Dune"]);
        press(&mut app, "i101");
        app.handle_key(KeyCode::Tab);
        press(&mut app, "Alice");
        app.handle_key(KeyCode::Enter);

        press(&mut app, "i101");
        app.handle_key(KeyCode::Tab);
        press(&mut app, "Bob");
        app.handle_key(KeyCode::Enter);

        assert!(matches!(app.mode, Mode::Issuing(_)));
        assert!(status_text(&app).contains("already issued to Alice"));
        app.handle_key(KeyCode::Esc);
        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(status_text(&app), "Issue cancelled.");
    }

    #[test]
    fn blank_lender_is_rejected() {
        let (_dir, mut app) = app_with(&["Dune"]);
        press(&mut app, "i101");
        app.handle_key(KeyCode::Tab);
        app.handle_key(KeyCode::Enter);

        assert_eq!(status_text(&app), "Lender name cannot be blank.");
        assert_eq!(
            app.catalog().get(BookId::from(101)).unwrap().status,
            BookStatus::Available
        );
    }

    #[test]
    fn add_flow_appends_title() {
        let (dir, mut app) = app_with(&["Dune"]);
        press(&mut app, "aFoundation");
        app.handle_key(KeyCode::Enter);

        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(
            status_text(&app),
            "Book 'Foundation' (ID: 102) has been added."
        );
        let contents = fs::read_to_string(dir.path().join("list_of_books.txt")).unwrap();
        assert_eq!(contents, "Dune\nFoundation\n");
    }

    #[test]
    fn blank_title_keeps_add_form_open() {
        let (_dir, mut app) = app_with(&["Dune"]);
        press(&mut app, "a");
        app.handle_key(KeyCode::Enter);

        assert!(matches!(app.mode, Mode::Adding(_)));
        assert_eq!(status_text(&app), "Book title cannot be blank.");
        assert_eq!(app.catalog().len(), 1);
    }

    #[test]
    fn return_prefills_selected_book_on_list_screen() {
        let (_dir, mut app) = app_with(&["Dune", "1984"]);
        press(&mut app, "d");
        app.handle_key(KeyCode::Down);
        press(&mut app, "i");
        press(&mut app, "Carol");
        app.handle_key(KeyCode::Enter);
        assert_eq!(
            app.catalog().get(BookId::from(102)).unwrap().lender_name,
            "Carol"
        );

        press(&mut app, "r");
        app.handle_key(KeyCode::Enter);
        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(
            app.catalog().get(BookId::from(102)).unwrap().status,
            BookStatus::Available
        );
        assert_eq!(
            status_text(&app),
            "Book '1984' (ID: 102) returned and now available."
        );
    }

    #[test]
    fn returning_available_book_is_reported() {
        let (_dir, mut app) = app_with(&["Dune"]);
        press(&mut app, "r101");
        app.handle_key(KeyCode::Enter);

        assert!(matches!(app.mode, Mode::Returning(_)));
        assert_eq!(
            status_text(&app),
            "Book ID 101 is already in the library (available)."
        );
    }

    #[test]
    fn escape_leaves_book_list() {
        let (_dir, mut app) = app_with(&["Dune"]);
        press(&mut app, "D");
        assert!(matches!(app.screen, Screen::Books(_)));
        assert!(!app.handle_key(KeyCode::Esc));
        assert!(matches!(app.screen, Screen::Menu));
    }

    #[test]
    fn menu_renders_library_name_and_options() {
        let (_dir, app) = app_with(&["Dune"]);
        let screen = render(&app);
        assert!(screen.contains("WELCOME TO TEST LIBRARY"));
        assert!(screen.contains("Press [D] to Display Books"));
        assert!(screen.contains("Press [Q] to Quit"));
    }

    #[test]
    fn book_list_renders_status_and_details() {
        let (_dir, mut app) = app_with(&["Dune", "1984"]);
        press(&mut app, "i101");
        app.handle_key(KeyCode::Tab);
        press(&mut app, "Alice");
        app.handle_key(KeyCode::Enter);
        press(&mut app, "d");

        let screen = render(&app);
        assert!(screen.contains("List of Books in Test Library"));
        assert!(screen.contains("issued"));
        assert!(screen.contains("available"));
        assert!(screen.contains("Lender: Alice"));
    }

    #[test]
    fn startup_notice_is_shown() {
        let (_dir, app) = app_with(&[]);
        let app = app.with_notice("could not read book list");
        let screen = render(&app);
        assert!(screen.contains("could not read book list"));
    }
}
