use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use crate::config::{MAX_TICKS_PER_SECOND, MIN_TICKS_PER_SECOND, PALETTE};
use crate::display::Notice;
use crate::ui::prompt::SpeedPrompt;

/// Draws the start screen as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_popup(area, 60, 45);
    frame.render_widget(Clear, popup);

    let [title_row, body_row] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("SNAKE"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(PALETTE.menu_title)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let body = vec![
        Line::from("[Space]/[Enter] Start"),
        Line::from("[Arrows]/[WASD] Steer"),
        Line::from("[V] Change speed"),
        Line::from("[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered()),
        body_row,
    );
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_popup(area, 60, 35);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED"),
        Line::from(""),
        Line::from("[Space] Continue"),
        Line::from("[X] Stop   [R] Reset"),
        Line::from("[V] Change speed"),
        Line::from("[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    length: usize,
    notice: Option<&Notice>,
) {
    let popup = centered_popup(area, 70, 40);
    frame.render_widget(Clear, popup);

    let cause = match notice {
        Some(notice @ Notice::Lost(_)) => notice.message(),
        _ => String::new(),
    };
    let lines = vec![
        Line::from("GAME OVER"),
        Line::from(""),
        Line::from(cause),
        Line::from(format!("Length: {length}")),
        Line::from(""),
        Line::from("[Space] Re-start"),
        Line::from("[Q] Quit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

/// Draws the full-board victory screen.
pub fn render_win_menu(frame: &mut Frame<'_>, area: Rect, length: usize) {
    let popup = centered_popup(area, 70, 40);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("BOARD CLEARED"),
        Line::from(""),
        Line::from(format!("Length: {length}")),
        Line::from(""),
        Line::from("[Space] Re-start"),
        Line::from("[Q] Quit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" you win ")),
        popup,
    );
}

/// Draws the speed entry prompt.
pub fn render_speed_prompt(frame: &mut Frame<'_>, area: Rect, prompt: &SpeedPrompt, speed: u32) {
    let popup = centered_popup(area, 60, 35);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("Change speed"),
        Line::from(format!(
            "ticks per second, {MIN_TICKS_PER_SECOND} to {MAX_TICKS_PER_SECOND} (now {speed})"
        )),
        Line::from(""),
        Line::from(format!("> {}_", prompt.input())),
        Line::from(""),
        Line::from("[Enter] Apply   [Esc] Cancel"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" speed ")),
        popup,
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
