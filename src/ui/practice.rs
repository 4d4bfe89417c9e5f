use super::{key_hint, title_style};
use crate::models::QuestionItem;
use crate::session::SessionQueue;
use crate::ui::layout::calculate_practice_chunks;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

fn card_text(session: &SessionQueue) -> Text<'_> {
    let hint = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);

    if !session.revealed {
        let message = if session.started {
            "Hidden. Listen, then press r to reveal"
        } else {
            "Press Space to start the interview"
        };
        return Text::from(vec![Line::from(""), Line::from(Span::styled(message, hint))]);
    }

    match session.current() {
        Some(QuestionItem::Plain(prompt)) => Text::from(prompt.as_str()),
        Some(QuestionItem::Glossary(entry)) => {
            let mut text = Text::default();
            text.push_line(Line::from(Span::styled(
                entry.word.as_str(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
            if !entry.phonetic.is_empty() {
                text.push_line(Line::from(Span::styled(
                    entry.phonetic.as_str(),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            text.push_line(Line::from(entry.translation.as_str()));
            text.push_line(Line::from("─".repeat(20)));
            text.push_line(Line::from(entry.definition.as_str()));
            text
        }
        None => Text::default(),
    }
}

pub fn draw_practice(f: &mut Frame, session: &SessionQueue, bookmarked: bool, speaking: bool) {
    let layout = calculate_practice_chunks(f.area());

    let star = if bookmarked { "★" } else { "☆" };
    let progress = format!(
        "Question {} / {} - {}  {}",
        (session.cursor + 1).min(session.items.len()),
        session.items.len(),
        session.mode.title(),
        star
    );
    let header = Paragraph::new(progress)
        .style(title_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let card = Paragraph::new(card_text(session))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Card"));
    f.render_widget(card, layout.card_area);

    let status = if speaking {
        Line::from(Span::styled(
            "♪ Speaking...",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled("Audio idle", Style::default().fg(Color::DarkGray)))
    };
    let status = Paragraph::new(status)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, layout.status_area);

    let main_label = if session.started { " Next  " } else { " Start  " };
    let mut first = Vec::new();
    first.extend(key_hint("Space", main_label));
    first.extend(key_hint("r", " Reveal  "));
    first.extend(key_hint("p", " Replay  "));
    if matches!(session.current(), Some(QuestionItem::Glossary(_))) && session.revealed {
        first.extend(key_hint("d", " Definition  "));
    }
    first.extend(key_hint("s", " Star"));

    let mut second = Vec::new();
    second.extend(key_hint("R", " Restart  "));
    second.extend(key_hint("Esc", " Back  "));
    second.extend(key_hint("Ctrl+C", " Exit App"));

    let help = Paragraph::new(vec![Line::from(first), Line::from(second)])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}
