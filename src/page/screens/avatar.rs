use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::page::{ActivationEffect, AnchorSelector, PageId, PageSurface};

use super::{AVATAR, INTAKE};

const MALE: &str = "avatar-male";
const FEMALE: &str = "avatar-female";
const CONTINUE: &str = "continue-to-intake";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Male,
    Female,
}

/// First screen of the visit: pick an avatar, then continue to intake.
/// Everything mounts immediately; this page has no staged hydration.
pub struct AvatarScreen {
    selected: Option<Choice>,
}

impl AvatarScreen {
    pub fn new() -> Self {
        Self { selected: None }
    }

    fn rects(area: Rect) -> (Rect, Rect, Rect, Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(7),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);
        let avatars = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);
        (rows[0], avatars[0], avatars[1], rows[2])
    }
}

impl Default for AvatarScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSurface for AvatarScreen {
    fn id(&self) -> PageId {
        AVATAR
    }

    fn title(&self) -> &'static str {
        "Choose Your Avatar"
    }

    fn anchor_present(&self, anchor: &AnchorSelector) -> bool {
        matches!(anchor.as_str(), MALE | FEMALE | CONTINUE)
    }

    fn anchor_rect(&self, anchor: &AnchorSelector, area: Rect) -> Option<Rect> {
        let (_, male, female, cont) = Self::rects(area);
        match anchor.as_str() {
            MALE => Some(male),
            FEMALE => Some(female),
            CONTINUE => Some(cont),
            _ => None,
        }
    }

    fn on_tick(&mut self) -> bool {
        false
    }

    fn focusable(&self) -> Vec<AnchorSelector> {
        [MALE, FEMALE, CONTINUE]
            .iter()
            .filter_map(|raw| AnchorSelector::parse(raw).ok())
            .collect()
    }

    fn activate(&mut self, anchor: &AnchorSelector) -> ActivationEffect {
        match anchor.as_str() {
            MALE => {
                self.selected = Some(Choice::Male);
                ActivationEffect::None
            }
            FEMALE => {
                self.selected = Some(Choice::Female);
                ActivationEffect::None
            }
            CONTINUE => ActivationEffect::Navigate(INTAKE),
            _ => ActivationEffect::None,
        }
    }

    fn draw(&self, frame: &mut Frame<'_>, area: Rect, focus: Option<&AnchorSelector>) {
        let (title, male, female, cont) = Self::rects(area);
        let focused = |raw: &str| focus.is_some_and(|anchor| anchor.as_str() == raw);

        frame.render_widget(
            Paragraph::new(self.title()).alignment(Alignment::Center),
            title,
        );

        draw_choice(frame, male, "Male", focused(MALE), self.selected == Some(Choice::Male));
        draw_choice(
            frame,
            female,
            "Female",
            focused(FEMALE),
            self.selected == Some(Choice::Female),
        );

        let cont_style = if focused(CONTINUE) {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let cont_block = Block::default().borders(Borders::ALL).border_style(cont_style);
        let inner = cont_block.inner(cont);
        frame.render_widget(cont_block, cont);
        frame.render_widget(
            Paragraph::new("Continue").alignment(Alignment::Center),
            inner,
        );
    }
}

fn draw_choice(frame: &mut Frame<'_>, area: Rect, label: &str, focused: bool, selected: bool) {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .title(if selected { " chosen " } else { "" })
        .borders(Borders::ALL)
        .border_style(style);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(label).alignment(Alignment::Center), inner);
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use crate::page::{ActivationEffect, AnchorSelector, PageSurface};
    use crate::page::screens::INTAKE;

    use super::AvatarScreen;

    fn anchor(raw: &str) -> AnchorSelector {
        AnchorSelector::parse(raw).expect("anchor should parse")
    }

    #[test]
    fn all_anchors_are_present_at_mount() {
        let screen = AvatarScreen::new();
        for raw in ["avatar-male", "avatar-female", "continue-to-intake"] {
            assert!(screen.anchor_present(&anchor(raw)), "{raw} should be mounted");
        }
        assert!(!screen.anchor_present(&anchor("submit-intake")));
    }

    #[test]
    fn continue_navigates_and_choices_select() {
        let mut screen = AvatarScreen::new();
        assert_eq!(
            screen.activate(&anchor("avatar-female")),
            ActivationEffect::None
        );
        assert_eq!(
            screen.activate(&anchor("continue-to-intake")),
            ActivationEffect::Navigate(INTAKE)
        );
    }

    #[test]
    fn anchor_rects_stay_within_the_area() {
        let screen = AvatarScreen::new();
        let area = Rect::new(0, 0, 80, 24);
        for raw in ["avatar-male", "avatar-female", "continue-to-intake"] {
            let rect = screen
                .anchor_rect(&anchor(raw), area)
                .expect("anchor rect should resolve");
            assert!(rect.right() <= area.right());
            assert!(rect.bottom() <= area.bottom());
        }
    }
}
