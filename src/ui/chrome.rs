use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Paragraph, Wrap};

use crate::app::{AppState, Mode};

use super::layout::UiLayout;

pub fn draw_chrome(
    frame: &mut Frame<'_>,
    layout: UiLayout,
    app: &AppState,
    page_title: &str,
    page_now: usize,
    page_total: usize,
    tour_progress: Option<(usize, usize)>,
) {
    let mode = match app.mode {
        Mode::Browse => "BROWSE",
        Mode::Tour => "TOUR",
    };

    let tour_part = match tour_progress {
        Some((now, total)) => format!(" | tour {now}/{total}"),
        None => String::new(),
    };
    let status_text = format!(
        "usher | {} | page {}/{} | {}{}",
        page_title,
        page_now,
        page_total.max(1),
        mode,
        tour_part
    );

    let status = Paragraph::new(status_text)
        .style(Style::default())
        .wrap(Wrap { trim: true });
    if app.debug_status_visible && layout.status.height >= 2 {
        let top = Rect::new(layout.status.x, layout.status.y, layout.status.width, 1);
        frame.render_widget(status, top);

        let command_id = app
            .status
            .last_action_id
            .map(|id| id.as_str())
            .unwrap_or("-");
        let message = if app.status.message.is_empty() {
            "-"
        } else {
            app.status.message.as_str()
        };
        let debug_text = format!("cmd={command_id} | msg={message} | focus={}", app.focus_index);
        let bottom = Rect::new(
            layout.status.x,
            layout.status.y + 1,
            layout.status.width,
            layout.status.height.saturating_sub(1).max(1),
        );
        let debug = Paragraph::new(debug_text)
            .style(Style::default())
            .wrap(Wrap { trim: true });
        frame.render_widget(debug, bottom);
        return;
    }

    frame.render_widget(status, layout.status);
}
