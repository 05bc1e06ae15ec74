use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use log::info;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::config::Settings;
use crate::store::RecordStore;

use super::forms::{ItemField, ItemForm, RemoveForm, SortChoice, SortMenu};
use super::helpers::{centered_rect, key_hints, numbered_line, surface_error};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Rows skipped by PageUp / PageDown in the listing.
const PAGE_STEP: isize = 5;
const EMPTY_MESSAGE: &str = "Survival backpack is empty.";
const INVALID_OPTION: &str = "Invalid option.";

/// Entries of the main menu, in display order.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MenuOption {
    AddItem,
    RemoveItem,
    ListItems,
    Organize,
    Exit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 5] = [
        MenuOption::AddItem,
        MenuOption::RemoveItem,
        MenuOption::ListItems,
        MenuOption::Organize,
        MenuOption::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuOption::AddItem => "Add item",
            MenuOption::RemoveItem => "Remove item",
            MenuOption::ListItems => "List items",
            MenuOption::Organize => "Organize backpack (sort)",
            MenuOption::Exit => "Exit",
        }
    }

    /// Options are numbered from 1.
    pub fn from_digit(digit: char) -> Option<Self> {
        let index = digit.to_digit(10)? as usize;
        index
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx).copied())
    }
}

/// High-level navigation states.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Screen {
    Menu,
    Listing,
}

/// Popups layered over the current screen.
enum Mode {
    Normal,
    AddingItem(ItemForm),
    RemovingItem(RemoveForm),
    ChoosingSort(SortMenu),
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

/// Central application state: the record store plus everything the menu needs
/// between key presses.
pub struct App {
    store: RecordStore,
    settings: Settings,
    screen: Screen,
    mode: Mode,
    menu_selected: usize,
    list_selected: usize,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self {
            store: RecordStore::new(),
            settings,
            screen: Screen::Menu,
            mode: Mode::Normal,
            menu_selected: 0,
            list_selected: 0,
            status: None,
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Text currently shown in the footer status line, if any.
    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    /// True while a popup (form or sort chooser) is open.
    pub fn has_popup(&self) -> bool {
        !matches!(self.mode, Mode::Normal)
    }

    /// Process one key press. Returns `true` once the user asked to exit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::AddingItem(form) => self.handle_add_item(code, form),
            Mode::RemovingItem(form) => self.handle_remove_item(code, form),
            Mode::ChoosingSort(menu) => self.handle_choose_sort(code, menu),
        };

        exit
    }

    /// Release every record held by the store. Called once the event loop is
    /// over; returns how many records were dropped.
    pub fn shutdown(&mut self) -> usize {
        let released = self.store.clear();
        info!("event=app_exit module=ui records_released={released}");
        released
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match self.screen {
            Screen::Menu => match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    *exit = true;
                    Mode::Normal
                }
                KeyCode::Up => {
                    self.move_menu(-1);
                    Mode::Normal
                }
                KeyCode::Down => {
                    self.move_menu(1);
                    Mode::Normal
                }
                KeyCode::Enter => self.activate(MenuOption::ALL[self.menu_selected], exit),
                KeyCode::Char(ch) if ch.is_ascii_digit() => match MenuOption::from_digit(ch) {
                    Some(option) => {
                        self.menu_selected = MenuOption::ALL
                            .iter()
                            .position(|candidate| *candidate == option)
                            .unwrap_or(0);
                        self.activate(option, exit)
                    }
                    None => {
                        self.set_status(INVALID_OPTION, StatusKind::Error);
                        Mode::Normal
                    }
                },
                _ => Mode::Normal,
            },
            Screen::Listing => match code {
                KeyCode::Char('q') => {
                    *exit = true;
                    Mode::Normal
                }
                KeyCode::Esc | KeyCode::Backspace => {
                    self.clear_status();
                    self.screen = Screen::Menu;
                    Mode::Normal
                }
                KeyCode::Up => {
                    self.move_list(-1);
                    Mode::Normal
                }
                KeyCode::Down => {
                    self.move_list(1);
                    Mode::Normal
                }
                KeyCode::PageUp => {
                    self.move_list(-PAGE_STEP);
                    Mode::Normal
                }
                KeyCode::PageDown => {
                    self.move_list(PAGE_STEP);
                    Mode::Normal
                }
                KeyCode::Home => {
                    self.list_selected = 0;
                    Mode::Normal
                }
                KeyCode::End => {
                    self.list_selected = self.store.len().saturating_sub(1);
                    Mode::Normal
                }
                KeyCode::Char('+') => {
                    self.clear_status();
                    Mode::AddingItem(ItemForm::default())
                }
                KeyCode::Char('-') => {
                    self.clear_status();
                    match self.store.get(self.list_selected) {
                        Some(record) => Mode::RemovingItem(RemoveForm::with_name(&record.name)),
                        None => {
                            self.set_status("No item selected to remove.", StatusKind::Error);
                            Mode::Normal
                        }
                    }
                }
                KeyCode::Char('o') | KeyCode::Char('O') => {
                    self.clear_status();
                    Mode::ChoosingSort(SortMenu::default())
                }
                _ => Mode::Normal,
            },
        }
    }

    fn activate(&mut self, option: MenuOption, exit: &mut bool) -> Mode {
        self.clear_status();
        match option {
            MenuOption::AddItem => Mode::AddingItem(ItemForm::default()),
            MenuOption::RemoveItem => Mode::RemovingItem(RemoveForm::default()),
            MenuOption::ListItems => {
                self.open_listing();
                Mode::Normal
            }
            MenuOption::Organize => Mode::ChoosingSort(SortMenu::default()),
            MenuOption::Exit => {
                self.set_status("Exiting...", StatusKind::Info);
                *exit = true;
                Mode::Normal
            }
        }
    }

    fn handle_add_item(&mut self, code: KeyCode, mut form: ItemForm) -> Mode {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Add item cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_new_item(&form) {
                Ok(_) => keep_open = false,
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
            Mode::AddingItem(form)
        } else {
            Mode::Normal
        }
    }

    fn handle_remove_item(&mut self, code: KeyCode, mut form: RemoveForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Removal cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter => {
                self.perform_remove(&form);
                Mode::Normal
            }
            KeyCode::Backspace => {
                form.backspace();
                Mode::RemovingItem(form)
            }
            KeyCode::Char(ch) => {
                form.push_char(ch);
                Mode::RemovingItem(form)
            }
            _ => Mode::RemovingItem(form),
        }
    }

    fn handle_choose_sort(&mut self, code: KeyCode, mut menu: SortMenu) -> Mode {
        match code {
            KeyCode::Esc => {
                self.apply_sort(SortChoice::Cancel);
                Mode::Normal
            }
            KeyCode::Up => {
                menu.move_selection(-1);
                Mode::ChoosingSort(menu)
            }
            KeyCode::Down => {
                menu.move_selection(1);
                Mode::ChoosingSort(menu)
            }
            KeyCode::Enter => {
                self.apply_sort(menu.current());
                Mode::Normal
            }
            KeyCode::Char(ch) if ch.is_ascii_digit() => match SortChoice::from_digit(ch) {
                Some(choice) => {
                    self.apply_sort(choice);
                    Mode::Normal
                }
                None => {
                    self.set_status(INVALID_OPTION, StatusKind::Error);
                    Mode::ChoosingSort(menu)
                }
            },
            _ => Mode::ChoosingSort(menu),
        }
    }

    fn save_new_item(&mut self, form: &ItemForm) -> Result<()> {
        let record = form.parse_inputs(self.settings.field_limit)?;
        let message = format!("Item '{}' added to the backpack.", record.name);
        self.store.insert(record);
        self.list_selected = 0;
        self.set_status(message, StatusKind::Info);
        Ok(())
    }

    fn perform_remove(&mut self, form: &RemoveForm) {
        let name = form.key();
        match self.store.remove(name) {
            Some(removed) => {
                self.clamp_list_selection();
                self.set_status(
                    format!("Item '{}' removed from the backpack!", removed.name),
                    StatusKind::Info,
                );
            }
            None => {
                self.set_status(
                    format!("Item '{name}' not found in the backpack."),
                    StatusKind::Error,
                );
            }
        }
    }

    fn apply_sort(&mut self, choice: SortChoice) {
        let message = match choice {
            SortChoice::ByName => {
                self.store.sort_by_name();
                "Backpack organized by name (alphabetical)."
            }
            SortChoice::ByPriority => {
                self.store.sort_by_priority();
                "Backpack organized by priority."
            }
            SortChoice::Cancel => {
                self.set_status("Sorting cancelled.", StatusKind::Info);
                return;
            }
        };
        self.open_listing();
        self.set_status(message, StatusKind::Info);
    }

    fn open_listing(&mut self) {
        self.screen = Screen::Listing;
        self.list_selected = 0;
    }

    fn move_menu(&mut self, offset: isize) {
        let last = MenuOption::ALL.len() as isize - 1;
        self.menu_selected = (self.menu_selected as isize + offset).clamp(0, last) as usize;
    }

    fn move_list(&mut self, offset: isize) {
        if self.store.is_empty() {
            return;
        }
        let last = self.store.len() as isize - 1;
        self.list_selected = (self.list_selected as isize + offset).clamp(0, last) as usize;
    }

    fn clamp_list_selection(&mut self) {
        if self.list_selected >= self.store.len() {
            self.list_selected = self.store.len().saturating_sub(1);
        }
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

    pub fn draw(&self, frame: &mut Frame) {
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

        match self.screen {
            Screen::Menu => self.draw_menu(frame, content_area),
            Screen::Listing => self.draw_listing(frame, content_area),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingItem(form) => self.draw_item_form(frame, area, form),
            Mode::RemovingItem(form) => self.draw_remove_form(frame, area, form),
            Mode::ChoosingSort(menu) => self.draw_sort_menu(frame, area, menu),
            Mode::Normal => {}
        }
    }

    fn draw_menu(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Escape Plan / Survival Backpack");
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let mut lines: Vec<Line> = MenuOption::ALL
            .iter()
            .enumerate()
            .map(|(idx, option)| numbered_line(idx + 1, option.label(), idx == self.menu_selected))
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("{} item(s) packed", self.store.len()),
            Style::default().fg(Color::Gray),
        )));

        let paragraph = Paragraph::new(lines).alignment(Alignment::Left);
        frame.render_widget(paragraph, inner);
    }

    fn draw_listing(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Items in the backpack");

        if self.store.is_empty() {
            let message = Paragraph::new(EMPTY_MESSAGE)
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let items: Vec<ListItem> = self
            .store
            .list()
            .map(|record| ListItem::new(record.to_string()))
            .collect();
        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

        let mut state = ListState::default();
        state.select(Some(self.list_selected));
        frame.render_stateful_widget(list, area, &mut state);
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
        match (&self.screen, &self.mode) {
            (_, Mode::AddingItem(_)) => key_hints(&[
                ("Tab", "Next field"),
                ("Enter", "Save"),
                ("Esc", "Cancel"),
            ]),
            (_, Mode::RemovingItem(_)) => key_hints(&[("Enter", "Remove"), ("Esc", "Cancel")]),
            (_, Mode::ChoosingSort(_)) => key_hints(&[
                ("1-3", "Choose"),
                ("Enter", "Confirm"),
                ("Esc", "Cancel"),
            ]),
            (Screen::Menu, Mode::Normal) => key_hints(&[
                ("1-5", "Choose"),
                ("↑↓", "Navigate"),
                ("Enter", "Select"),
                ("q", "Quit"),
            ]),
            (Screen::Listing, Mode::Normal) => key_hints(&[
                ("↑↓", "Navigate"),
                ("+", "Add"),
                ("-", "Remove"),
                ("o", "Organize"),
                ("Esc", "Menu"),
            ]),
        }
    }

    fn draw_item_form(&self, frame: &mut Frame, area: Rect, form: &ItemForm) {
        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Item").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line(ItemField::Name),
            form.build_line(ItemField::Category),
            form.build_line(ItemField::Priority),
            Line::from(""),
        ];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let field = form.active;
        let prefix = format!("{}: ", field.label()).len() as u16;
        frame.set_cursor_position((
            inner.x + prefix + form.value_len(field) as u16,
            inner.y + field.row(),
        ));
    }

    fn draw_remove_form(&self, frame: &mut Frame, area: Rect, form: &RemoveForm) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Remove Item").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            form.build_line(),
            Line::from(""),
            Line::from(Span::styled(
                "The first item with exactly this name is removed.",
                Style::default().fg(Color::Gray),
            )),
        ];
        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let prefix = "Name: ".len() as u16;
        frame.set_cursor_position((
            inner.x + prefix + form.name.chars().count() as u16,
            inner.y,
        ));
    }

    fn draw_sort_menu(&self, frame: &mut Frame, area: Rect, menu: &SortMenu) {
        let popup_area = centered_rect(50, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("How do you want to sort?")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines: Vec<Line> = SortChoice::ALL
            .iter()
            .enumerate()
            .map(|(idx, choice)| numbered_line(idx + 1, choice.label(), idx == menu.selected))
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch));
        }
    }

    fn add_item(app: &mut App, name: &str, category: &str, priority: &str) {
        app.handle_key(KeyCode::Char('1'));
        type_text(app, name);
        app.handle_key(KeyCode::Tab);
        type_text(app, category);
        app.handle_key(KeyCode::Tab);
        type_text(app, priority);
        app.handle_key(KeyCode::Enter);
    }

    #[test]
    fn menu_digits_map_to_options() {
        assert_eq!(MenuOption::from_digit('1'), Some(MenuOption::AddItem));
        assert_eq!(MenuOption::from_digit('5'), Some(MenuOption::Exit));
        assert_eq!(MenuOption::from_digit('0'), None);
        assert_eq!(MenuOption::from_digit('6'), None);
    }

    #[test]
    fn menu_selection_is_clamped() {
        let mut app = App::new(Settings::default());
        app.handle_key(KeyCode::Up);
        assert_eq!(app.menu_selected, 0);
        for _ in 0..10 {
            app.handle_key(KeyCode::Down);
        }
        assert_eq!(app.menu_selected, MenuOption::ALL.len() - 1);
    }

    #[test]
    fn enter_on_exit_entry_quits() {
        let mut app = App::new(Settings::default());
        for _ in 0..4 {
            app.handle_key(KeyCode::Down);
        }
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(app.status_text(), Some("Exiting..."));
    }

    #[test]
    fn failed_save_keeps_form_open_with_error() {
        let mut app = App::new(Settings::default());
        add_item(&mut app, "Al3x", "Tool", "1");

        assert!(app.store().is_empty());
        match &app.mode {
            Mode::AddingItem(form) => assert_eq!(
                form.error.as_deref(),
                Some("Name must contain only letters and spaces.")
            ),
            _ => panic!("expected the add form to stay open"),
        }
    }

    #[test]
    fn typing_after_error_clears_it() {
        let mut app = App::new(Settings::default());
        add_item(&mut app, "Al3x", "Tool", "1");
        app.handle_key(KeyCode::Char('2'));
        match &app.mode {
            Mode::AddingItem(form) => assert!(form.error.is_none()),
            _ => panic!("expected the add form to stay open"),
        }
    }

    #[test]
    fn listing_remove_prefills_selected_name() {
        let mut app = App::new(Settings::default());
        add_item(&mut app, "Rope", "Tool", "3");
        add_item(&mut app, "Knife", "Tool", "1");
        app.handle_key(KeyCode::Char('3'));
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Char('-'));

        match &app.mode {
            Mode::RemovingItem(form) => assert_eq!(form.name, "Rope"),
            _ => panic!("expected the remove popup"),
        }
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.store().len(), 1);
        assert_eq!(app.list_selected, 0);
    }

    #[test]
    fn remove_from_empty_listing_reports_error() {
        let mut app = App::new(Settings::default());
        app.handle_key(KeyCode::Char('3'));
        app.handle_key(KeyCode::Char('-'));
        assert!(!app.has_popup());
        assert_eq!(app.status_text(), Some("No item selected to remove."));
    }
}
