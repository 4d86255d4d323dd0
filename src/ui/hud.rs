use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::config::Theme;
use crate::game::GameState;

/// Supplemental values displayed by the HUD row.
#[derive(Debug, Clone, Copy, Default)]
pub struct HudInfo {
    /// Frames per second over the last whole second, refreshed by the
    /// outer loop roughly once per second.
    pub fps: u32,
}

/// Renders the one-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &GameState,
    theme: &Theme,
    info: &HudInfo,
) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let muted = Style::default().fg(theme.menu_footer);
    let value = Style::default().fg(theme.hud_fg);

    let line = Line::from(vec![
        Span::styled(" score ", muted),
        Span::styled(state.score.to_string(), value),
        Span::styled("  length ", muted),
        Span::styled(state.snake.len().to_string(), value),
        Span::styled("  speed ", muted),
        Span::styled(format!("{:.2}", state.snake.speed), value),
        Span::styled("  fps ", muted),
        Span::styled(info.fps.to_string(), value),
        Span::raw(" "),
    ]);

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Right), hud_area);

    play_area
}
