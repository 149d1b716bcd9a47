use crate::error::{AppError, AppResult};
use crate::page::AnchorSelector;
use crate::tour::ReadinessProbe;

use super::screens::demo_pages;
use super::traits::{PageId, PageSurface};

/// Ordered collection of pages plus the cursor for the active one. The
/// sequencer asks it to navigate; it never navigates on its own.
pub struct SiteMap {
    pages: Vec<Box<dyn PageSurface>>,
    current: usize,
}

impl SiteMap {
    pub fn new(pages: Vec<Box<dyn PageSurface>>) -> AppResult<Self> {
        if pages.is_empty() {
            return Err(AppError::invalid_argument("site has no pages"));
        }
        Ok(Self { pages, current: 0 })
    }

    pub fn demo() -> Self {
        Self {
            pages: demo_pages(),
            current: 0,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn current(&self) -> &dyn PageSurface {
        self.pages[self.current].as_ref()
    }

    pub fn current_mut(&mut self) -> &mut dyn PageSurface {
        self.pages[self.current].as_mut()
    }

    pub fn current_id(&self) -> PageId {
        self.current().id()
    }

    /// 0-based position of the active page in visit order.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn find(&self, raw: &str) -> Option<PageId> {
        self.pages
            .iter()
            .map(|page| page.id())
            .find(|id| id.as_str() == raw)
    }

    /// Moves to `target` if it exists. Returns the `(from, to)` pair when
    /// the active page actually changed.
    pub fn goto(&mut self, target: PageId) -> Option<(PageId, PageId)> {
        let index = self.pages.iter().position(|page| page.id() == target)?;
        if index == self.current {
            return None;
        }
        let from = self.current_id();
        self.current = index;
        Some((from, target))
    }

    pub fn goto_index(&mut self, index: usize) -> Option<(PageId, PageId)> {
        let target = self.pages.get(index)?.id();
        self.goto(target)
    }

    pub fn next_page(&mut self) -> Option<(PageId, PageId)> {
        let index = (self.current + 1).min(self.pages.len() - 1);
        self.goto_index(index)
    }

    pub fn prev_page(&mut self) -> Option<(PageId, PageId)> {
        self.goto_index(self.current.saturating_sub(1))
    }

    /// Hydrates the active page by one stage.
    pub fn tick(&mut self) -> bool {
        self.current_mut().on_tick()
    }
}

impl ReadinessProbe for SiteMap {
    fn anchor_present(&self, anchor: &AnchorSelector) -> bool {
        self.current().anchor_present(anchor)
    }
}

#[cfg(test)]
mod tests {
    use crate::page::AnchorSelector;
    use crate::page::screens::{AVATAR, CHART, INTAKE};
    use crate::tour::ReadinessProbe;

    use super::SiteMap;

    #[test]
    fn demo_site_starts_on_avatar_and_navigates_by_id() {
        let mut site = SiteMap::demo();
        assert_eq!(site.current_id(), AVATAR);
        assert_eq!(site.page_count(), 3);

        assert_eq!(site.goto(INTAKE), Some((AVATAR, INTAKE)));
        assert_eq!(site.goto(INTAKE), None);
        assert_eq!(site.find("chart"), Some(CHART));
        assert_eq!(site.find("billing"), None);
    }

    #[test]
    fn page_stepping_clamps_at_both_ends() {
        let mut site = SiteMap::demo();
        assert_eq!(site.prev_page(), None);
        assert_eq!(site.next_page(), Some((AVATAR, INTAKE)));
        assert_eq!(site.next_page(), Some((INTAKE, CHART)));
        assert_eq!(site.next_page(), None);
    }

    #[test]
    fn probe_delegates_to_the_active_page() {
        let mut site = SiteMap::demo();
        let male = AnchorSelector::parse("avatar-male").expect("anchor should parse");
        let section2 = AnchorSelector::parse("intake-section2").expect("anchor should parse");

        assert!(site.anchor_present(&male));
        assert!(!site.anchor_present(&section2));

        site.goto(INTAKE);
        assert!(!site.anchor_present(&section2));
        assert!(site.tick());
        assert!(site.anchor_present(&section2));
    }
}
