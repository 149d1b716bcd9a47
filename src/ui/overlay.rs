use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::tour::Placement;

use super::layout::centered_rect;

const NAV_HINT: &str = "[n] next  [p] back  [s] skip";
const GATED_HINT: &str = "use the highlighted control to continue";
const MIN_TOOLTIP_INNER: u16 = 12;
const MAX_TOOLTIP_INNER: u16 = 44;

/// Everything the overlay needs to render one step: resolved target
/// rectangle (`None` renders centered), display text, and progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourOverlayView {
    pub content: String,
    pub placement: Placement,
    pub target: Option<Rect>,
    pub step_number: usize,
    pub step_count: usize,
    pub gated: bool,
}

pub fn draw_tour_overlay(frame: &mut Frame<'_>, area: Rect, view: &TourOverlayView) {
    if area.width < 4 || area.height < 4 {
        return;
    }

    if let Some(target) = view.target {
        draw_spotlight(frame, area, target);
    }

    let progress = format!("step {}/{}", view.step_number, view.step_count.max(1));
    let hint = if view.gated { GATED_HINT } else { NAV_HINT };

    let content_width = UnicodeWidthStr::width(view.content.as_str()) as u16;
    let inner_width = content_width
        .max(UnicodeWidthStr::width(hint) as u16)
        .max(UnicodeWidthStr::width(progress.as_str()) as u16)
        .clamp(MIN_TOOLTIP_INNER, MAX_TOOLTIP_INNER)
        .min(area.width.saturating_sub(2));
    let content_rows = content_width.max(1).div_ceil(inner_width.max(1));
    let height = (content_rows + 4).min(area.height);
    let width = inner_width + 2;

    let popup = place_tooltip(area, view.target, view.placement, width, height);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Tour ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(2)])
        .split(inner);

    let content = Paragraph::new(view.content.clone()).wrap(Wrap { trim: true });
    frame.render_widget(content, chunks[0]);

    let footer_style = Style::default().fg(Color::DarkGray);
    let footer = Paragraph::new(vec![
        Line::styled(progress, footer_style),
        Line::styled(hint, footer_style),
    ]);
    frame.render_widget(footer, chunks[1]);
}

fn draw_spotlight(frame: &mut Frame<'_>, area: Rect, target: Rect) {
    let ring = spotlight_rect(area, target);
    if ring.width == 0 || ring.height == 0 {
        return;
    }
    let border = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    frame.render_widget(border, ring);
}

/// One-cell ring around the target, clipped to the drawable area.
fn spotlight_rect(area: Rect, target: Rect) -> Rect {
    let x = target.x.saturating_sub(1).max(area.x);
    let y = target.y.saturating_sub(1).max(area.y);
    let right = target.right().saturating_add(1).min(area.right());
    let bottom = target.bottom().saturating_add(1).min(area.bottom());
    Rect::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y))
}

/// Resolves a placement hint against the target and the available space.
/// `Auto` prefers below, falls back to above, then centers.
fn place_tooltip(
    area: Rect,
    target: Option<Rect>,
    placement: Placement,
    width: u16,
    height: u16,
) -> Rect {
    let width = width.max(1).min(area.width);
    let height = height.max(1).min(area.height);
    let Some(target) = target else {
        return centered_rect(area, width, height);
    };

    let placement = match placement {
        Placement::Auto => {
            if target.bottom().saturating_add(height) <= area.bottom() {
                Placement::Bottom
            } else if target.y >= area.y.saturating_add(height) {
                Placement::Top
            } else {
                Placement::Center
            }
        }
        other => other,
    };

    let center_x = target.x as i32 + target.width as i32 / 2 - width as i32 / 2;
    let center_y = target.y as i32 + target.height as i32 / 2 - height as i32 / 2;
    let (x, y) = match placement {
        Placement::Top => (center_x, target.y as i32 - height as i32),
        Placement::Bottom => (center_x, target.bottom() as i32),
        Placement::Left => (target.x as i32 - width as i32, center_y),
        Placement::Right => (target.right() as i32, center_y),
        Placement::Auto | Placement::Center => {
            return centered_rect(area, width, height);
        }
    };

    let max_x = (area.right() - width) as i32;
    let max_y = (area.bottom() - height) as i32;
    let x = x.clamp(area.x as i32, max_x.max(area.x as i32)) as u16;
    let y = y.clamp(area.y as i32, max_y.max(area.y as i32)) as u16;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use crate::tour::Placement;

    use super::{TourOverlayView, draw_tour_overlay, place_tooltip, spotlight_rect};

    fn view(target: Option<Rect>, placement: Placement) -> TourOverlayView {
        TourOverlayView {
            content: "Pick a starting avatar.".to_string(),
            placement,
            target,
            step_number: 1,
            step_count: 3,
            gated: false,
        }
    }

    #[test]
    fn bottom_placement_sits_under_the_target() {
        let area = Rect::new(0, 0, 80, 24);
        let target = Rect::new(10, 4, 20, 3);
        let popup = place_tooltip(area, Some(target), Placement::Bottom, 30, 6);
        assert_eq!(popup.y, target.bottom());
        assert!(popup.right() <= area.right());
    }

    #[test]
    fn auto_placement_flips_above_when_no_room_below() {
        let area = Rect::new(0, 0, 80, 24);
        let target = Rect::new(10, 20, 20, 3);
        let popup = place_tooltip(area, Some(target), Placement::Auto, 30, 6);
        assert_eq!(popup.bottom(), target.y);
    }

    #[test]
    fn missing_target_centers_the_tooltip() {
        let area = Rect::new(0, 0, 80, 24);
        let popup = place_tooltip(area, None, Placement::Bottom, 30, 6);
        assert_eq!(popup.x, 25);
        assert_eq!(popup.y, 9);
    }

    #[test]
    fn spotlight_ring_is_clipped_to_the_area() {
        let area = Rect::new(0, 0, 40, 12);
        let ring = spotlight_rect(area, Rect::new(0, 0, 40, 12));
        assert_eq!(ring, area);

        let inner = spotlight_rect(area, Rect::new(5, 5, 4, 2));
        assert_eq!(inner, Rect::new(4, 4, 6, 4));
    }

    #[test]
    fn overlay_draws_without_panicking_on_small_surfaces() {
        let backend = TestBackend::new(30, 10);
        let mut terminal = Terminal::new(backend).expect("test terminal should initialize");
        terminal
            .draw(|frame| {
                let area = Rect::new(0, 0, 30, 10);
                draw_tour_overlay(frame, area, &view(Some(Rect::new(2, 2, 8, 3)), Placement::Auto));
                draw_tour_overlay(frame, Rect::new(0, 0, 3, 2), &view(None, Placement::Center));
            })
            .expect("draw should pass");
    }
}
