use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Text},
    widgets::{Block, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap},
};
use tracing::{debug, trace};

use crate::controller::Controller;
use crate::domain::{MAX_COL_WIDTH, TVConfig, ViewError};
use crate::model::{Pane, Preview, Status, UIData};
use crate::table::TableView;

pub const SIDEBAR_PERCENT: u16 = 30;
pub const FOOTER_HEIGHT: u16 = 1;

/// Restores the terminal when dropped, on every exit path out of the event loop.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        ratatui::restore();
        trace!("Terminal restored");
    }
}

#[derive(Debug, Default)]
pub struct TableUI {
    menu_state: ListState,
    table_state: TableState,
}

impl TableUI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the preview until the user quits.
    pub fn run(&mut self, preview: &mut Preview<'_>, cfg: &TVConfig) -> Result<(), ViewError> {
        let controller = Controller::new(cfg);
        let mut terminal = ratatui::try_init()?;
        let _guard = TerminalGuard;
        debug!("Starting preview event loop");

        while preview.status != Status::Exited {
            terminal.draw(|f| self.draw(preview, f))?;
            if let Some(message) = controller.handle_event()? {
                preview.update(message);
            }
        }
        Ok(())
    }

    pub fn draw(&mut self, preview: &Preview<'_>, frame: &mut Frame) {
        let uidata = preview.get_uidata();
        let [main, footer] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(FOOTER_HEIGHT)])
                .areas(frame.area());
        let [sidebar, contents] = Layout::horizontal([
            Constraint::Percentage(SIDEBAR_PERCENT),
            Constraint::Fill(1),
        ])
        .areas(main);

        self.draw_menu(&uidata, frame, sidebar);
        match uidata.pane {
            Pane::Text(text) => Self::draw_text(text, frame, contents),
            Pane::Table(data) => self.draw_table(&uidata, data, frame, contents),
        }
        Self::draw_footer(&uidata, frame, footer);
    }

    fn draw_menu(&mut self, uidata: &UIData, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = uidata.menu.iter().map(|m| ListItem::new(*m)).collect();
        let highlight = if uidata.detail_focused {
            Style::new().bold()
        } else {
            Style::new().reversed()
        };
        let list = List::new(items)
            .block(Block::bordered().title(" Sprints "))
            .highlight_style(highlight);

        self.menu_state.select(Some(uidata.menu_cursor));
        frame.render_stateful_widget(list, area, &mut self.menu_state);
    }

    fn draw_text(text: &str, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(Text::raw(text))
            .block(Block::bordered())
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn draw_table(&mut self, uidata: &UIData, data: &[Vec<String>], frame: &mut Frame, area: Rect) {
        let Some((header, rows)) = data.split_first() else {
            return Self::draw_text("", frame, area);
        };
        if rows.is_empty() {
            return Self::draw_text("Nothing to show here.", frame, area);
        }

        let widths = TableView::new()
            .with_max_col_width(MAX_COL_WIDTH)
            .column_widths(data)
            .into_iter()
            .map(|w| Constraint::Length(w as u16));

        let header = Row::new(header.iter().map(|h| Cell::from(h.as_str()))).style(Style::new().bold());
        let rows = rows
            .iter()
            .map(|r| Row::new(r.iter().map(|c| Cell::from(c.as_str()))));
        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .block(Block::bordered())
            .row_highlight_style(Style::new().reversed());

        if uidata.detail_focused {
            self.table_state.select(Some(uidata.detail_cursor));
        } else {
            self.table_state.select(None);
        }
        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn draw_footer(uidata: &UIData, frame: &mut Frame, area: Rect) {
        let mut spans = vec![uidata.footer_text.dim()];
        if !uidata.status_message.is_empty() {
            spans.push("  ".into());
            spans.push(uidata.status_message.yellow());
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
