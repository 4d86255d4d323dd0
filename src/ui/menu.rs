use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use crate::config::Theme;

/// Draws the game-over screen as a centered popup over the play area.
pub fn render_game_over_menu(frame: &mut Frame<'_>, area: Rect, score: i64, theme: &Theme) {
    let popup = centered_popup(area, 60, 40);
    frame.render_widget(Clear, popup);

    let [title_row, body_row] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(3)]).areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("GAME OVER"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.menu_title)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let body = vec![
        Line::from(format!("Score: {score}")),
        Line::from(""),
        Line::from("[Enter]/[Space] Play again"),
        Line::from("[Q]/[Esc] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.menu_footer))
            .block(Block::bordered().title(" game over ")),
        body_row,
    );
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
