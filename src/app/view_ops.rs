use ratatui::layout::Rect;
use ratatui::widgets::Clear;

use crate::command::focused_anchor;
use crate::error::AppResult;
use crate::page::AnchorSelector;
use crate::tour::StepTarget;
use crate::ui;
use crate::ui::TourOverlayView;

use super::core::App;
use super::terminal_session::TerminalSurface;

impl App {
    pub(super) fn render_frame(&mut self, session: &mut impl TerminalSurface) -> AppResult<()> {
        let focus = focused_anchor(&self.state, &self.site);
        let page_now = self.site.current_index() + 1;
        let page_total = self.site.page_count();

        session.draw(|frame| {
            let layout = ui::split_layout(frame.area(), self.state.debug_status_visible);
            frame.render_widget(Clear, layout.screen);
            self.site
                .current()
                .draw(frame, layout.screen, focus.as_ref());

            let overlay = self.tour_overlay_view(layout.screen);
            if let Some(view) = &overlay {
                ui::draw_tour_overlay(frame, layout.screen, view);
            }

            ui::draw_chrome(
                frame,
                layout,
                &self.state,
                self.site.current().title(),
                page_now,
                page_total,
                overlay
                    .as_ref()
                    .map(|view| (view.step_number, view.step_count)),
            );
        })?;
        Ok(())
    }

    /// Builds the overlay view for the active step. Route hops never
    /// display; a target that stopped resolving mid-step degrades to a
    /// centered tooltip instead of failing.
    pub(super) fn tour_overlay_view(&self, area: Rect) -> Option<TourOverlayView> {
        let step = self.tour.current_step()?;
        let steps = self.tour.steps_for_page(self.tour.page());
        let step_count = steps.iter().filter(|step| !step.is_route_hop()).count();

        let target = match &step.target {
            StepTarget::RouteHop(_) => return None,
            StepTarget::Centered => None,
            StepTarget::Anchor(raw) => AnchorSelector::parse(raw)
                .ok()
                .and_then(|anchor| self.site.current().anchor_rect(&anchor, area)),
        };

        Some(TourOverlayView {
            content: step.content.clone(),
            placement: step.placement,
            target,
            step_number: self.tour.step_index() + 1,
            step_count,
            gated: step.advance.is_some(),
        })
    }
}
