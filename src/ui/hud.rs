use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;
use crate::game::Game;

/// Rows the HUD takes below the play area.
pub const HUD_HEIGHT: u16 = 1;

const HUD_MARGIN_X: u16 = 1;
const SEPARATOR: &str = "  ";
const HINT: &str = "arrows/WASD move · P pause · Q quit";

/// Renders the one-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, game: &Game, theme: &Theme) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(HUD_HEIGHT)]).areas(area);
    let hud_area = inset_horizontal(hud_area, HUD_MARGIN_X);

    let values = info_line(game, theme);
    let values_width = line_width(&values);

    let [hint_area, values_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(values_width.min(u16::MAX as usize) as u16),
    ])
    .areas(hud_area);

    if usize::from(hint_area.width) > HINT.width() {
        frame.render_widget(
            Paragraph::new(Line::from(HINT))
                .alignment(Alignment::Left)
                .style(Style::default().fg(theme.hud_label)),
            hint_area,
        );
    }

    frame.render_widget(
        Paragraph::new(values).alignment(Alignment::Right),
        values_area,
    );

    play_area
}

fn info_line(game: &Game, theme: &Theme) -> Line<'static> {
    let interval_ms = game.tick_interval().as_millis();
    let fields = [
        ("Score", game.score().to_string()),
        ("Length", game.snake().len().to_string()),
        ("Tick", format!("{interval_ms}ms")),
    ];

    let label_style = Style::default().fg(theme.hud_label);
    let value_style = Style::default()
        .fg(theme.hud_value)
        .add_modifier(Modifier::BOLD);

    let mut spans = Vec::with_capacity(fields.len() * 3);
    for (index, (label, value)) in fields.into_iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw(SEPARATOR));
        }
        spans.push(Span::styled(format!("{label} "), label_style));
        spans.push(Span::styled(value, value_style));
    }

    Line::from(spans)
}

fn line_width(line: &Line<'_>) -> usize {
    line.spans
        .iter()
        .map(|span| span.content.as_ref().width())
        .sum()
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
