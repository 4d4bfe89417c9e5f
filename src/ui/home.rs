use super::{key_hint, title_style};
use crate::models::HomeEntry;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

fn draw_title(f: &mut Frame, area: Rect, title: &str) {
    let title = Paragraph::new(title)
        .style(title_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn selectable_items<'a>(labels: impl Iterator<Item = String>, selected: usize) -> Vec<ListItem<'a>> {
    labels
        .enumerate()
        .map(|(i, label)| {
            let style = if i == selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let marker = if i == selected { "> " } else { "  " };
            ListItem::new(format!("{}{}", marker, label)).style(style)
        })
        .collect()
}

pub fn draw_home(f: &mut Frame, selected: usize, bank_loaded: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_title(f, chunks[0], "N-400 Interview Practice");

    let mut items = selectable_items(
        HomeEntry::ALL.iter().map(|entry| entry.label().to_string()),
        selected,
    );
    if !bank_loaded {
        items.push(ListItem::new(""));
        items.push(
            ListItem::new("No questions loaded. Check the --data path and the log file.").style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
        );
    }
    let menu = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title("Practice"),
    );
    f.render_widget(menu, chunks[1]);

    let mut spans = Vec::new();
    spans.extend(key_hint("↑/↓", " Navigate  "));
    spans.extend(key_hint("Enter", " Select  "));
    spans.extend(key_hint("q/Esc", " Quit"));
    let help = Paragraph::new(vec![Line::from(spans)])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

pub fn draw_glossary_menu(f: &mut Frame, categories: &[u32], selected: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_title(f, chunks[0], "Glossary");

    let items: Vec<ListItem> = if categories.is_empty() {
        vec![ListItem::new("No glossary categories").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        selectable_items(
            categories.iter().map(|id| format!("Category {}", id)),
            selected,
        )
    };
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title("Categories"),
    );
    f.render_widget(list, chunks[1]);

    let mut spans = Vec::new();
    spans.extend(key_hint("↑/↓", " Navigate  "));
    spans.extend(key_hint("Enter", " Start  "));
    spans.extend(key_hint("Esc", " Back"));
    let help = Paragraph::new(vec![Line::from(spans)])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
