use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::Session;
use crate::events::Page;
use crate::theme::THEME;

const LIST_HINTS: &[(&str, &str)] = &[
    ("\u{2191}\u{2193}", "Navigate"),
    ("Enter", "Select"),
    ("Esc", "Back"),
    ("Ctrl+C", "Quit"),
];
const INPUT_HINTS: &[(&str, &str)] = &[("Enter", "Submit"), ("Esc", "Back"), ("Ctrl+C", "Quit")];
const LOGIN_HINTS: &[(&str, &str)] = &[("Enter", "Login"), ("Ctrl+C", "Quit")];

fn hints(page: Page) -> &'static [(&'static str, &'static str)] {
    match page {
        Page::Password => LOGIN_HINTS,
        Page::Menu | Page::Deploy | Page::SelectContract | Page::CheckTotal => LIST_HINTS,
        Page::DeployContract | Page::Airdrop | Page::Upload | Page::Confirm => INPUT_HINTS,
    }
}

/// Bottom line: busy, error or success banner, otherwise key hints.
pub struct StatusBar;

impl StatusBar {
    pub fn render(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let bg = Block::default().style(THEME.header_style());
        frame.render_widget(bg, area);

        let content = if let Some(label) = session.busy {
            Line::from(Span::styled(
                format!(" {label}"),
                Style::default()
                    .fg(THEME.warning)
                    .add_modifier(Modifier::BOLD),
            ))
        } else if let Some(ref err) = session.error_banner {
            Line::from(vec![
                Span::styled(
                    " ! ",
                    Style::default()
                        .fg(THEME.error)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(err.as_str(), Style::default().fg(THEME.warning)),
            ])
        } else if let Some(ref msg) = session.success_banner {
            Line::from(vec![
                Span::styled(" \u{2713} ", THEME.success_style().add_modifier(Modifier::BOLD)),
                Span::styled(msg.as_str(), THEME.success_style()),
            ])
        } else {
            let mut spans = vec![Span::raw(" ")];
            for (key, action) in hints(session.page) {
                spans.push(Span::styled(*key, Style::default().fg(THEME.text_accent)));
                spans.push(Span::styled(format!(":{action}  "), THEME.muted_style()));
            }
            Line::from(spans)
        };

        frame.render_widget(Paragraph::new(content).style(THEME.header_style()), area);
    }
}
