use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::page::{ActivationEffect, AnchorSelector, PageId, PageSurface};

use super::{CHART, INTAKE};

const SECTION1: &str = "intake-section1";
const SECTION2: &str = "intake-section2";
const SUBMIT: &str = "submit-intake";

// (anchor, hydration stage it mounts at)
const WIDGETS: [(&str, usize); 3] = [(SECTION1, 0), (SECTION2, 1), (SUBMIT, 2)];

/// Intake form: two sections that hydrate one tick apart, then a submit
/// button that starts the visit.
pub struct IntakeScreen {
    hydrated: usize,
    section1_done: bool,
    section2_done: bool,
}

impl IntakeScreen {
    pub fn new() -> Self {
        Self {
            hydrated: 0,
            section1_done: false,
            section2_done: false,
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

    fn rects(area: Rect) -> (Rect, Rect, Rect, Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(5),
                Constraint::Length(5),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);
        (rows[0], rows[1], rows[2], rows[3])
    }
}

impl Default for IntakeScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSurface for IntakeScreen {
    fn id(&self) -> PageId {
        INTAKE
    }

    fn title(&self) -> &'static str {
        "Intake"
    }

    fn anchor_present(&self, anchor: &AnchorSelector) -> bool {
        self.mounted(anchor.as_str())
    }

    fn anchor_rect(&self, anchor: &AnchorSelector, area: Rect) -> Option<Rect> {
        if !self.mounted(anchor.as_str()) {
            return None;
        }
        let (_, section1, section2, submit) = Self::rects(area);
        match anchor.as_str() {
            SECTION1 => Some(section1),
            SECTION2 => Some(section2),
            SUBMIT => Some(submit),
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
            SECTION1 => {
                self.section1_done = true;
                ActivationEffect::None
            }
            SECTION2 => {
                self.section2_done = true;
                ActivationEffect::None
            }
            SUBMIT if self.mounted(SUBMIT) => ActivationEffect::Navigate(CHART),
            _ => ActivationEffect::None,
        }
    }

    fn draw(&self, frame: &mut Frame<'_>, area: Rect, focus: Option<&AnchorSelector>) {
        let (title, section1, section2, submit) = Self::rects(area);
        let focused = |raw: &str| focus.is_some_and(|anchor| anchor.as_str() == raw);

        frame.render_widget(
            Paragraph::new(self.title()).alignment(Alignment::Center),
            title,
        );

        if self.mounted(SECTION1) {
            draw_section(
                frame,
                section1,
                "Basic info",
                self.section1_done,
                focused(SECTION1),
            );
        }
        if self.mounted(SECTION2) {
            draw_section(
                frame,
                section2,
                "One more field",
                self.section2_done,
                focused(SECTION2),
            );
        } else {
            frame.render_widget(
                Paragraph::new("loading...").style(Style::default().fg(Color::DarkGray)),
                section2,
            );
        }
        if self.mounted(SUBMIT) {
            let style = if focused(SUBMIT) {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let block = Block::default().borders(Borders::ALL).border_style(style);
            let inner = block.inner(submit);
            frame.render_widget(block, submit);
            frame.render_widget(
                Paragraph::new("Submit Intake").alignment(Alignment::Center),
                inner,
            );
        }
    }
}

fn draw_section(frame: &mut Frame<'_>, area: Rect, label: &str, done: bool, focused: bool) {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .title(if done { " complete " } else { "" })
        .borders(Borders::ALL)
        .border_style(style);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(label), inner);
}
