//! State of the interactive preview: a menu of entries on the left, the lazily
//! produced contents of the selected entry on the right.

use std::collections::HashMap;

use arboard::Clipboard;
use tracing::{debug, info, trace, warn};

use crate::domain::{HELP_TEXT, Message, ViewError};
use crate::table::TableData;

pub const HELP_KEY: &str = "help";
const HELP_MENU: &str = "?";

/// Contents shown for an entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Table(TableData),
    Text(String),
}

/// Computes the contents of an entry from its key.
pub type ContentProducer<'a> = Box<dyn Fn(&str) -> Content + 'a>;

/// Called with the header and the selected row when a content row is activated.
pub type SelectedFunc<'a> = Box<dyn FnMut(&[String], &[String]) -> Result<(), ViewError> + 'a>;

pub struct PreviewEntry<'a> {
    pub key: String,
    pub menu: String,
    pub contents: ContentProducer<'a>,
}

impl<'a> PreviewEntry<'a> {
    pub fn new(
        key: impl Into<String>,
        menu: impl Into<String>,
        contents: impl Fn(&str) -> Content + 'a,
    ) -> Self {
        Self {
            key: key.into(),
            menu: menu.into(),
            contents: Box::new(contents),
        }
    }

    fn help() -> Self {
        Self::new(HELP_KEY, HELP_MENU, |_| Content::Text(HELP_TEXT.to_string()))
    }
}

/// Contents already produced during this session, by entry key.
///
/// Entries are never evicted: the cache lives as long as the preview.
#[derive(Debug, Default)]
pub struct ContentCache {
    entries: HashMap<String, Content>,
}

impl ContentCache {
    /// Returns the cached contents of `key`, producing them on first use.
    pub fn get_or_load(&mut self, key: &str, producer: &dyn Fn(&str) -> Content) -> &Content {
        if !self.entries.contains_key(key) {
            debug!("Loading contents for {key}");
            let content = producer(key);
            self.entries.insert(key.to_string(), content);
        } else {
            trace!("Serving cached contents for {key}");
        }
        &self.entries[key]
    }

    pub fn get(&self, key: &str) -> Option<&Content> {
        self.entries.get(key)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Listing,
    DetailShown(String),
    Exited,
}

/// What the contents pane shows.
pub enum Pane<'m> {
    Text(&'m str),
    Table(&'m TableData),
}

/// Snapshot of everything the UI draws.
pub struct UIData<'m> {
    pub menu: Vec<&'m str>,
    pub menu_cursor: usize,
    pub detail_focused: bool,
    pub pane: Pane<'m>,
    pub detail_cursor: usize,
    pub footer_text: &'m str,
    pub status_message: &'m str,
}

pub struct Preview<'a> {
    entries: Vec<PreviewEntry<'a>>,
    cache: ContentCache,
    pub status: Status,
    menu_cursor: usize,
    detail_cursor: usize,
    footer_text: String,
    status_message: String,
    selected_func: Option<SelectedFunc<'a>>,
    clipboard: Option<Clipboard>,
}

impl<'a> Preview<'a> {
    /// A preview over `entries`, preceded by the help entry.
    pub fn new(entries: Vec<PreviewEntry<'a>>) -> Self {
        let mut preview = Self {
            entries: Vec::with_capacity(entries.len() + 1),
            cache: ContentCache::default(),
            status: Status::Listing,
            menu_cursor: 0,
            detail_cursor: 0,
            footer_text: String::new(),
            status_message: String::new(),
            selected_func: None,
            clipboard: None,
        };
        preview.entries.push(PreviewEntry::help());
        preview.entries.extend(entries);
        preview
    }

    pub fn with_footer_text(mut self, text: impl Into<String>) -> Self {
        self.footer_text = text.into();
        self
    }

    pub fn with_selected_func(
        mut self,
        func: impl FnMut(&[String], &[String]) -> Result<(), ViewError> + 'a,
    ) -> Self {
        self.selected_func = Some(Box::new(func));
        self
    }

    #[cfg(test)]
    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    #[cfg(test)]
    pub fn menu_cursor(&self) -> usize {
        self.menu_cursor
    }

    #[cfg(test)]
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn update(&mut self, message: Message) {
        trace!("Update: Status {:?}, Message {:?}", self.status, message);
        match self.status {
            Status::Listing => match message {
                Message::Quit => self.quit(),
                Message::MoveUp => self.move_menu_up(),
                Message::MoveDown => self.move_menu_down(),
                Message::MoveBeginning => self.menu_cursor = 0,
                Message::MoveEnd => self.menu_cursor = self.entries.len() - 1,
                Message::Enter => self.select(self.menu_cursor),
                Message::Help => self.show_help(),
                Message::Exit | Message::CopyRow => {}
            },
            Status::DetailShown(_) => match message {
                Message::Quit => self.quit(),
                Message::MoveUp => self.detail_cursor = self.detail_cursor.saturating_sub(1),
                Message::MoveDown => self.move_detail_down(),
                Message::MoveBeginning => self.detail_cursor = 0,
                Message::MoveEnd => self.detail_cursor = self.detail_rows().saturating_sub(1),
                Message::Enter => self.activate(),
                Message::CopyRow => self.copy_row(),
                Message::Help => self.show_help(),
                Message::Exit => self.status = Status::Listing,
            },
            Status::Exited => {}
        }
    }

    pub fn quit(&mut self) {
        self.status = Status::Exited;
    }

    /// Shows the entry at `idx`, producing its contents on first visit.
    pub fn select(&mut self, idx: usize) {
        let Some(entry) = self.entries.get(idx) else {
            return;
        };
        self.menu_cursor = idx;
        self.cache.get_or_load(&entry.key, &*entry.contents);
        self.detail_cursor = 0;
        self.status_message.clear();
        self.status = Status::DetailShown(entry.key.clone());
    }

    fn show_help(&mut self) {
        self.select(0);
    }

    fn move_menu_up(&mut self) {
        self.menu_cursor = self.menu_cursor.saturating_sub(1);
    }

    fn move_menu_down(&mut self) {
        if self.menu_cursor + 1 < self.entries.len() {
            self.menu_cursor += 1;
        }
    }

    fn move_detail_down(&mut self) {
        if self.detail_cursor + 1 < self.detail_rows() {
            self.detail_cursor += 1;
        }
    }

    fn current_content(&self) -> Option<&Content> {
        match &self.status {
            Status::DetailShown(key) => self.cache.get(key),
            _ => self
                .entries
                .get(self.menu_cursor)
                .and_then(|e| self.cache.get(&e.key)),
        }
    }

    /// Number of data rows (header excluded) in the shown table.
    fn detail_rows(&self) -> usize {
        match self.current_content() {
            Some(Content::Table(data)) => data.len().saturating_sub(1),
            _ => 0,
        }
    }

    fn selected_row(&self) -> Option<(&[String], &[String])> {
        match self.current_content() {
            Some(Content::Table(data)) => {
                let header = data.first()?;
                let row = data.get(self.detail_cursor + 1)?;
                Some((header, row))
            }
            _ => None,
        }
    }

    fn activate(&mut self) {
        let Some((header, row)) = self.selected_row() else {
            return;
        };
        let (header, row) = (header.to_vec(), row.to_vec());
        if let Some(func) = self.selected_func.as_mut() {
            match func(&header, &row) {
                Ok(_) => info!("Activated row {:?}", row.first()),
                Err(e) => {
                    warn!("Row action failed: {e}");
                    self.status_message = e.to_string();
                }
            }
        }
    }

    fn wrap_cell_content(c: &str) -> String {
        let needs_escaping = c.contains('"');
        let needs_wrapping = c.chars().any(|c| c == ' ' || c == '\t' || c == ',');
        let mut out = String::from(c);

        if needs_escaping {
            out = out.replace('"', "\"\"");
        }
        if needs_wrapping {
            out = format!("\"{out}\"");
        }
        out
    }

    fn copy_row(&mut self) {
        let Some((_, row)) = self.selected_row() else {
            return;
        };
        let content = row
            .iter()
            .map(|c| Self::wrap_cell_content(c))
            .collect::<Vec<String>>()
            .join(",");

        let copied = match self.clipboard.as_mut() {
            Some(clipboard) => clipboard.set_text(content),
            None => Clipboard::new().and_then(|mut clipboard| {
                let res = clipboard.set_text(content);
                self.clipboard = Some(clipboard);
                res
            }),
        };
        match copied {
            Ok(_) => {
                trace!("Copied row content to clipboard.");
                self.status_message = "Copied row to clipboard".to_string();
            }
            Err(e) => {
                trace!("Error copying to clipboard: {:?}", e);
                self.status_message = ViewError::from(e).to_string();
            }
        }
    }

    pub fn get_uidata(&self) -> UIData<'_> {
        let pane = match self.current_content() {
            Some(Content::Table(data)) => Pane::Table(data),
            Some(Content::Text(text)) => Pane::Text(text),
            None => Pane::Text(HELP_TEXT),
        };
        UIData {
            menu: self.entries.iter().map(|e| e.menu.as_str()).collect(),
            menu_cursor: self.menu_cursor,
            detail_focused: matches!(self.status, Status::DetailShown(_)),
            pane,
            detail_cursor: self.detail_cursor,
            footer_text: &self.footer_text,
            status_message: &self.status_message,
        }
    }
}
