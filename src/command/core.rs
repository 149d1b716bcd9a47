use crate::app::AppState;
use crate::page::{AnchorSelector, SiteMap};

use super::types::{ActionId, CommandOutcome};

/// Anchor currently holding focus on the active page, if any. The stored
/// index is clamped here because hydration can change the focus order
/// between the keypress and its dispatch.
pub(crate) fn focused_anchor(state: &AppState, site: &SiteMap) -> Option<AnchorSelector> {
    let focusable = site.current().focusable();
    if focusable.is_empty() {
        return None;
    }
    let index = state.focus_index.min(focusable.len() - 1);
    focusable.into_iter().nth(index)
}

pub(crate) fn focus_next(state: &mut AppState, site: &SiteMap) -> CommandOutcome {
    shift_focus(state, site, 1, ActionId::FocusNext)
}

pub(crate) fn focus_prev(state: &mut AppState, site: &SiteMap) -> CommandOutcome {
    shift_focus(state, site, -1, ActionId::FocusPrev)
}

fn shift_focus(
    state: &mut AppState,
    site: &SiteMap,
    delta: isize,
    id: ActionId,
) -> CommandOutcome {
    let focusable = site.current().focusable();
    state.status.last_action_id = Some(id);
    if focusable.is_empty() {
        state.status.message = "nothing to focus yet".to_string();
        return CommandOutcome::Noop;
    }

    let len = focusable.len() as isize;
    let current = (state.focus_index.min(focusable.len() - 1)) as isize;
    let next = (current + delta).rem_euclid(len) as usize;
    state.focus_index = next;
    state.status.message = format!("focus -> {}", focusable[next]);
    CommandOutcome::Applied
}

pub(crate) fn next_page(state: &mut AppState, site: &mut SiteMap) -> CommandOutcome {
    state.status.last_action_id = Some(ActionId::NextPage);
    match site.next_page() {
        Some((_, to)) => {
            state.status.message = format!("page -> {to}");
            CommandOutcome::Applied
        }
        None => {
            state.status.message = "already on the last page".to_string();
            CommandOutcome::Noop
        }
    }
}

pub(crate) fn prev_page(state: &mut AppState, site: &mut SiteMap) -> CommandOutcome {
    state.status.last_action_id = Some(ActionId::PrevPage);
    match site.prev_page() {
        Some((_, to)) => {
            state.status.message = format!("page -> {to}");
            CommandOutcome::Applied
        }
        None => {
            state.status.message = "already on the first page".to_string();
            CommandOutcome::Noop
        }
    }
}

pub(crate) fn goto_page(state: &mut AppState, site: &mut SiteMap, index: usize) -> CommandOutcome {
    state.status.last_action_id = Some(ActionId::GotoPage);
    if index >= site.page_count() {
        state.status.message = format!("no page {}", index + 1);
        return CommandOutcome::Noop;
    }
    match site.goto_index(index) {
        Some((_, to)) => {
            state.status.message = format!("page -> {to}");
            CommandOutcome::Applied
        }
        None => {
            state.status.message = "already there".to_string();
            CommandOutcome::Noop
        }
    }
}
