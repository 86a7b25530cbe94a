use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    BORDER_HALF_BLOCK, CELL_WIDTH, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD,
    GLYPH_SNAKE_TAIL, GridSize, THEME, Theme,
};
use crate::game::{Game, GameState};
use crate::snake::Position;
use crate::ui::hud::{HUD_HEIGHT, render_hud};
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Renders the full game frame from immutable state.
///
/// `started` is false while the start screen is showing.
pub fn render(frame: &mut Frame<'_>, game: &Game, started: bool) {
    let area = frame.area();
    let play_area = render_hud(frame, area, game, &THEME);
    let board_area = board_rect(play_area, game.bounds());

    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(THEME.border_fg).bg(THEME.border_bg))
        .style(Style::new().bg(THEME.play_bg));

    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_food(frame, inner, game.state(), &THEME);
    render_snake(frame, inner, game.state(), &THEME);

    if !started {
        render_start_menu(frame, board_area, &THEME);
    } else if game.is_over() {
        render_game_over_menu(frame, board_area, game.score(), game.end_reason(), &THEME);
    } else if !game.is_running() {
        render_pause_menu(frame, board_area, &THEME);
    }
}

/// Terminal size `(columns, rows)` needed to show the whole board and the HUD.
#[must_use]
pub fn min_frame_size(bounds: GridSize) -> (u16, u16) {
    let (width, height) = board_size(bounds);
    (width, height.saturating_add(HUD_HEIGHT))
}

/// Bordered board size in terminal cells.
fn board_size(bounds: GridSize) -> (u16, u16) {
    (
        bounds.width.saturating_mul(CELL_WIDTH).saturating_add(2),
        bounds.height.saturating_add(2),
    )
}

/// Centers a bordered board of `bounds` cells inside `area`, shrinking to fit.
fn board_rect(area: Rect, bounds: GridSize) -> Rect {
    let (width, height) = board_size(bounds);

    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);

    board
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let Some((x, y)) = logical_to_terminal(inner, state.bounds(), state.food.position) else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(theme.food).bg(theme.play_bg));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let snake = &state.snake;
    let last = snake.len().saturating_sub(1);

    let buffer = frame.buffer_mut();
    // Tail first so the head wins when segments share a cell.
    for (index, segment) in snake.segments().enumerate().rev() {
        let Some((x, y)) = logical_to_terminal(inner, state.bounds(), *segment) else {
            continue;
        };

        let (glyph, style) = if index == 0 {
            (
                GLYPH_SNAKE_HEAD,
                Style::new()
                    .fg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            )
        } else if index == last {
            (GLYPH_SNAKE_TAIL, Style::new().fg(theme.snake_tail))
        } else {
            (GLYPH_SNAKE_BODY, Style::new().fg(theme.snake_body))
        };

        buffer.set_string(x, y, glyph, style.bg(theme.play_bg));
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.saturating_mul(CELL_WIDTH);
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
