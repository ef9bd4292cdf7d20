use alloy::primitives::Address;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::events::Page;
use crate::theme::THEME;
use crate::utils;

pub struct Header {
    pub signer: Address,
}

impl Header {
    pub fn new(signer: Address) -> Self {
        Self { signer }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, page: Page) {
        let header_block = Block::default().style(THEME.header_style());
        frame.render_widget(header_block, area);

        // title | page | signer
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(14),
                Constraint::Min(0),
                Constraint::Length(24),
            ])
            .split(area);

        let title = Paragraph::new(Span::styled(
            " nft-console",
            Style::default()
                .fg(THEME.text_accent)
                .add_modifier(Modifier::BOLD),
        ))
        .style(THEME.header_style());
        frame.render_widget(title, chunks[0]);

        let page_title = Paragraph::new(Span::styled(
            page.title(),
            Style::default().fg(THEME.text),
        ))
        .style(THEME.header_style());
        frame.render_widget(page_title, chunks[1]);

        let signer = Line::from(vec![
            Span::styled("from ", THEME.muted_style()),
            Span::styled(utils::truncate_address(&self.signer), THEME.address_style()),
            Span::raw(" "),
        ]);
        let signer = Paragraph::new(signer)
            .alignment(Alignment::Right)
            .style(THEME.header_style());
        frame.render_widget(signer, chunks[2]);
    }
}
