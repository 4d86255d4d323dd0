use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::config::{
    Theme, GLYPH_FOOD, GLYPH_POISON, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD_DOWN,
    GLYPH_SNAKE_HEAD_LEFT, GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP, GLYPH_SNAKE_TAIL,
};
use crate::game::{GameState, GameStatus};
use crate::input::Direction;
use crate::snake::Position;
use crate::ui::hud::{render_hud, HudInfo};
use crate::ui::menu::render_game_over_menu;

/// Renders one full frame from immutable simulation state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, theme: &Theme, hud: &HudInfo) {
    let area = frame.area();
    let play_area = render_hud(frame, area, state, theme, hud);

    let block = Block::bordered().border_style(Style::new().fg(theme.border_fg));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_items(frame, inner, state, theme);
    render_snake(frame, inner, state, theme);

    if state.status == GameStatus::Stopped {
        render_game_over_menu(frame, play_area, state.score, theme);
    }
}

fn render_items(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let buffer = frame.buffer_mut();

    for point in state.food.iter() {
        let Some((x, y)) = logical_to_terminal(inner, *point) else {
            continue;
        };
        buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(theme.food));
    }

    for point in state.poison.iter() {
        let Some((x, y)) = logical_to_terminal(inner, *point) else {
            continue;
        };
        buffer.set_string(x, y, GLYPH_POISON, Style::new().fg(theme.poison));
    }
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let head = state.snake.head_cell(state.bounds());
    let tail = state.snake.segments().last().copied();

    let buffer = frame.buffer_mut();
    for segment in state.snake.segments() {
        let Some((x, y)) = logical_to_terminal(inner, *segment) else {
            continue;
        };

        if *segment == head {
            buffer.set_string(
                x,
                y,
                head_glyph(state.snake.heading()),
                Style::new()
                    .fg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            );
            continue;
        }

        if Some(*segment) == tail {
            buffer.set_string(x, y, GLYPH_SNAKE_TAIL, Style::new().fg(theme.snake_tail));
            continue;
        }

        buffer.set_string(x, y, GLYPH_SNAKE_BODY, Style::new().fg(theme.snake_body));
    }
}

fn head_glyph(heading: Direction) -> &'static str {
    match heading {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

/// Maps a wrapped grid position onto the terminal cell inside `inner`, or
/// `None` when the terminal is too small to show it.
fn logical_to_terminal(inner: Rect, position: Position) -> Option<(u16, u16)> {
    let x_offset = u16::try_from(position.x).ok()?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
