use crate::config::TOKEN_VAR;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tui_big_text::{BigText, PixelSize};

const HINT: Style = Style::new().fg(Color::Gray);

/// A full-panel message shown in place of a view's content.
pub struct Notice {
    banner: Option<[&'static str; 2]>,
    title: Option<&'static str>,
    heading: String,
    body: Vec<String>,
    hint: &'static str,
}

impl Notice {
    pub fn missing_token() -> Self {
        Self {
            banner: Some(["TOKEN", "REQUIRED!"]),
            title: None,
            heading: "A TMDB read access token is needed to browse the catalog".to_string(),
            body: vec![
                "Create one at https://www.themoviedb.org/settings/api".to_string(),
                format!("then run: export {TOKEN_VAR}=<token> and restart"),
            ],
            hint: "(Esc)/(b) back",
        }
    }

    /// A failed request, with the error text shown as reported.
    pub fn failure(heading: &str, error: &str) -> Self {
        Self {
            banner: None,
            title: Some("Error"),
            heading: heading.to_string(),
            body: vec![error.to_string()],
            hint: "(r) retry  (Esc)/(b) back",
        }
    }

    fn lines(&self) -> Vec<Line<'_>> {
        let accent = Style::new().fg(Color::Red);
        let mut lines = vec![
            Line::default(),
            Line::styled(self.heading.as_str(), accent.add_modifier(Modifier::BOLD)),
            Line::default(),
        ];
        let body_style = if self.banner.is_some() {
            Style::new().fg(Color::White)
        } else {
            accent
        };
        lines.extend(self.body.iter().map(|text| Line::styled(text.as_str(), body_style)));
        lines.push(Line::default());
        lines.push(Line::styled(self.hint, HINT));
        lines
    }
}

pub fn render_notice(frame: &mut Frame, area: Rect, notice: &Notice) {
    let mut text_area = area;
    if let Some(banner) = notice.banner {
        let [top, rest] = Layout::vertical([Constraint::Length(8), Constraint::Min(5)]).areas(area);
        let big = BigText::builder()
            .pixel_size(PixelSize::Quadrant)
            .style(Style::new().fg(Color::Red).add_modifier(Modifier::BOLD))
            .lines(banner.map(Line::from).to_vec())
            .alignment(Alignment::Center)
            .build();
        frame.render_widget(big, top);
        text_area = rest;
    }

    let mut block = Block::default().borders(Borders::ALL);
    if let Some(title) = notice.title {
        block = block.title(title);
    }
    let paragraph = Paragraph::new(notice.lines())
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, text_area);
}
