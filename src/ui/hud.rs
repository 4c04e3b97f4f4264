use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::PALETTE;
use crate::display::DisplayModel;

const HUD_MARGIN_X: u16 = 1;
const SEPARATOR: &str = " │ ";
const ELLIPSIS: &str = "…";

/// Renders the two HUD rows and returns the remaining play area above them.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, model: &DisplayModel) -> Rect {
    let [play_area, info_area, notice_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let info_area = inset_horizontal(info_area, HUD_MARGIN_X);
    let notice_area = inset_horizontal(notice_area, HUD_MARGIN_X);

    frame.render_widget(
        Paragraph::new(info_line(model)).alignment(Alignment::Right),
        info_area,
    );

    if let Some(notice) = &model.notice {
        let text = truncate_to_width(&notice.message(), usize::from(notice_area.width));
        frame.render_widget(
            Paragraph::new(Line::from(text))
                .alignment(Alignment::Left)
                .style(Style::default().fg(PALETTE.notice)),
            notice_area,
        );
    }

    play_area
}

fn info_line(model: &DisplayModel) -> Line<'static> {
    let label = Style::default().fg(PALETTE.hud_label);
    let value = Style::default().fg(PALETTE.hud_value);

    Line::from(vec![
        Span::styled("Length: ", label),
        Span::styled(model.length.to_string(), value),
        Span::styled(SEPARATOR, label),
        Span::styled("Speed: ", label),
        Span::styled(format!("{}/s", model.speed), value),
        Span::styled(SEPARATOR, label),
        Span::styled("[Space] ", label),
        Span::styled(
            model.toggle_label(),
            value.add_modifier(Modifier::BOLD),
        ),
    ])
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let total_margin = margin.saturating_mul(2);
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(total_margin),
        height: area.height,
    }
}

/// Shortens `text` to at most `max_width` terminal columns, marking the cut.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_owned();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - ELLIPSIS.width();
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > budget {
            break;
        }
        used += ch_width;
        out.push(ch);
    }
    out.push_str(ELLIPSIS);
    out
}
