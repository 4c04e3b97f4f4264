use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::board::Cell;
use crate::config::{
    CELL_COLUMNS, GLYPH_BODY, GLYPH_EMPTY, GLYPH_FOOD, GLYPH_HEAD, GLYPH_WALL, PALETTE,
};
use crate::display::DisplayModel;
use crate::game::GameStatus;
use crate::snake::Position;
use crate::ui::hud::render_hud;
use crate::ui::menu::{
    render_game_over_menu, render_pause_menu, render_speed_prompt, render_start_menu,
    render_win_menu,
};
use crate::ui::prompt::SpeedPrompt;

/// Renders the full frame from the display mirror.
pub fn render(frame: &mut Frame<'_>, model: &DisplayModel, prompt: Option<&SpeedPrompt>) {
    let area = frame.area();
    let play_area = render_hud(frame, area, model);

    let board_area = centered_board(play_area, model);
    let block = Block::bordered().border_style(Style::new().fg(PALETTE.wall));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_cells(frame, inner, model);

    if let Some(prompt) = prompt {
        render_speed_prompt(frame, play_area, prompt, model.speed);
        return;
    }

    match model.status {
        GameStatus::Stopped | GameStatus::Ready => render_start_menu(frame, play_area),
        GameStatus::Paused => render_pause_menu(frame, play_area),
        GameStatus::GameOver => {
            render_game_over_menu(frame, play_area, model.length, model.notice.as_ref());
        }
        GameStatus::Won => render_win_menu(frame, play_area, model.length),
        GameStatus::Running => {}
    }
}

fn render_cells(frame: &mut Frame<'_>, inner: Rect, model: &DisplayModel) {
    let size = model.size();
    let buffer = frame.buffer_mut();

    for y in 0..i32::from(size.height) {
        for x in 0..i32::from(size.width) {
            let position = Position::new(x, y);
            let Some(cell) = model.cell(position) else {
                continue;
            };
            let Some((column, row)) = logical_to_terminal(inner, position) else {
                continue;
            };

            let (glyph, style) = cell_style(cell);
            buffer.set_string(column, row, glyph, style);
        }
    }
}

fn cell_style(cell: Cell) -> (&'static str, Style) {
    let base = Style::new().bg(PALETTE.empty_bg);
    match cell {
        Cell::Empty => (GLYPH_EMPTY, base),
        Cell::Head => (
            GLYPH_HEAD,
            base.fg(PALETTE.head).add_modifier(Modifier::BOLD),
        ),
        Cell::Body => (GLYPH_BODY, base.fg(PALETTE.body)),
        Cell::Food => (GLYPH_FOOD, base.fg(PALETTE.food).add_modifier(Modifier::BOLD)),
        Cell::Wall => (GLYPH_WALL, base.fg(PALETTE.wall)),
    }
}

/// Centres the bordered board inside `area`, clipping when it does not fit.
fn centered_board(area: Rect, model: &DisplayModel) -> Rect {
    let size = model.size();
    let width = size
        .width
        .saturating_mul(CELL_COLUMNS)
        .saturating_add(2)
        .min(area.width);
    let height = size.height.saturating_add(2).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn logical_to_terminal(inner: Rect, position: Position) -> Option<(u16, u16)> {
    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
