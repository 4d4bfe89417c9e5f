use super::{key_hint, title_style};
use crate::bank::QuestionBank;
use crate::models::{Mode, QuestionItem};
use crate::ui::layout::calculate_bookmarks_chunks;
use crate::utils::truncate_string;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs},
};

fn bookmark_label(mode: Mode, identifier: &str, bank: &QuestionBank) -> String {
    if mode != Mode::Glossary {
        return identifier.to_string();
    }
    match bank.find_glossary_entry(identifier) {
        Some(QuestionItem::Glossary(entry)) if !entry.translation.is_empty() => {
            format!("{}  {}", entry.word, entry.translation)
        }
        _ => identifier.to_string(),
    }
}

pub fn draw_bookmarks(
    f: &mut Frame,
    tab: Mode,
    identifiers: &[String],
    selected: usize,
    bank: &QuestionBank,
    speaking: bool,
) {
    let layout = calculate_bookmarks_chunks(f.area());

    let title = if speaking {
        "Bookmarks  ♪"
    } else {
        "Bookmarks"
    };
    let header = Paragraph::new(title)
        .style(title_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let titles: Vec<Line> = Mode::ALL
        .iter()
        .enumerate()
        .map(|(i, mode)| Line::from(format!("[{}] {}", i + 1, mode.title())))
        .collect();
    let selected_tab = Mode::ALL.iter().position(|mode| *mode == tab).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected_tab)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(tabs, layout.tabs_area);

    let max_width = layout.list_area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = if identifiers.is_empty() {
        vec![ListItem::new("No bookmarks yet. Press s during practice to add one.").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        identifiers
            .iter()
            .enumerate()
            .map(|(i, identifier)| {
                let label = truncate_string(&bookmark_label(tab, identifier, bank), max_width);
                if i == selected {
                    ListItem::new(Line::from(vec![
                        Span::from("> "),
                        Span::styled(
                            label,
                            Style::default()
                                .fg(Color::Yellow)
                                .add_modifier(Modifier::BOLD),
                        ),
                    ]))
                } else {
                    ListItem::new(format!("  {}", label))
                }
            })
            .collect()
    };
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(list, layout.list_area);

    let mut spans = Vec::new();
    spans.extend(key_hint("←/→", " Tab  "));
    spans.extend(key_hint("↑/↓", " Select  "));
    spans.extend(key_hint("Enter/p", " Play  "));
    spans.extend(key_hint("x", " Remove  "));
    spans.extend(key_hint("Esc", " Back"));
    let help = Paragraph::new(vec![Line::from(spans)])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}
