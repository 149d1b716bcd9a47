use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::page::{ActivationEffect, AnchorSelector, PageId, PageSurface};

use super::CHART;

const PHYSICIAN: &str = "physician-join";
const SOAP: &str = "soap-notes";
const HERBS: &str = "order-herbs";
const RESTART: &str = "restart-tour";

// The visit panels stream in while the restart control is always there.
const WIDGETS: [(&str, usize); 4] = [(RESTART, 0), (PHYSICIAN, 1), (SOAP, 2), (HERBS, 3)];

/// The live visit: physician presence, SOAP charting, and herb orders,
/// with a restart-tour control in the footer.
pub struct ChartScreen {
    hydrated: usize,
    physician_joined: bool,
}

impl ChartScreen {
    pub fn new() -> Self {
        Self {
            hydrated: 0,
            physician_joined: false,
        }
    }

    fn max_stage() -> usize {
        WIDGETS.iter().map(|(_, stage)| *stage).max().unwrap_or(0)
    }

    fn mounted(&self, raw: &str) -> bool {
        WIDGETS
            .iter()
            .any(|(anchor, stage)| *anchor == raw && *stage <= self.hydrated)
    }

    fn rects(area: Rect) -> (Rect, Rect, Rect, Rect, Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(6),
                Constraint::Length(3),
            ])
            .split(area);
        let panels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(50),
                Constraint::Percentage(25),
            ])
            .split(rows[1]);
        (rows[0], panels[0], panels[1], panels[2], rows[2])
    }
}

impl Default for ChartScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSurface for ChartScreen {
    fn id(&self) -> PageId {
        CHART
    }

    fn title(&self) -> &'static str {
        "Visit Chart"
    }

    fn anchor_present(&self, anchor: &AnchorSelector) -> bool {
        self.mounted(anchor.as_str())
    }

    fn anchor_rect(&self, anchor: &AnchorSelector, area: Rect) -> Option<Rect> {
        if !self.mounted(anchor.as_str()) {
            return None;
        }
        let (_, physician, soap, herbs, restart) = Self::rects(area);
        match anchor.as_str() {
            PHYSICIAN => Some(physician),
            SOAP => Some(soap),
            HERBS => Some(herbs),
            RESTART => Some(restart),
            _ => None,
        }
    }

    fn on_tick(&mut self) -> bool {
        if self.hydrated >= Self::max_stage() {
            return false;
        }
        self.hydrated += 1;
        true
    }

    fn focusable(&self) -> Vec<AnchorSelector> {
        WIDGETS
            .iter()
            .filter(|(_, stage)| *stage <= self.hydrated)
            .filter_map(|(anchor, _)| AnchorSelector::parse(anchor).ok())
            .collect()
    }

    fn activate(&mut self, anchor: &AnchorSelector) -> ActivationEffect {
        match anchor.as_str() {
            PHYSICIAN if self.mounted(PHYSICIAN) => {
                self.physician_joined = true;
                ActivationEffect::None
            }
            RESTART => ActivationEffect::RestartTour,
            _ => ActivationEffect::None,
        }
    }

    fn draw(&self, frame: &mut Frame<'_>, area: Rect, focus: Option<&AnchorSelector>) {
        let (title, physician, soap, herbs, restart) = Self::rects(area);
        let focused = |raw: &str| focus.is_some_and(|anchor| anchor.as_str() == raw);

        frame.render_widget(
            Paragraph::new(self.title()).alignment(Alignment::Center),
            title,
        );

        if self.mounted(PHYSICIAN) {
            let body = if self.physician_joined {
                "Physician is in the room"
            } else {
                "Waiting for the physician"
            };
            draw_panel(frame, physician, "Physician", body, focused(PHYSICIAN));
        } else {
            draw_loading(frame, physician);
        }
        if self.mounted(SOAP) {
            draw_panel(frame, soap, "SOAP Notes", "S / O / A / P", focused(SOAP));
        } else {
            draw_loading(frame, soap);
        }
        if self.mounted(HERBS) {
            draw_panel(frame, herbs, "Herb Orders", "No orders yet", focused(HERBS));
        } else {
            draw_loading(frame, herbs);
        }

        let style = if focused(RESTART) {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default().borders(Borders::ALL).border_style(style);
        let inner = block.inner(restart);
        frame.render_widget(block, restart);
        frame.render_widget(
            Paragraph::new("Restart Tour").alignment(Alignment::Center),
            inner,
        );
    }
}

fn draw_panel(frame: &mut Frame<'_>, area: Rect, label: &str, body: &str, focused: bool) {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(style);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(body), inner);
}

fn draw_loading(frame: &mut Frame<'_>, area: Rect) {
    frame.render_widget(
        Paragraph::new("loading...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
