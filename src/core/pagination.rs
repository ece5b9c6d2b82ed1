use crate::domain::model::Nanny;

pub const ITEMS_PER_PAGE: usize = 3;
pub const MAX_PAGES: usize = 1000;

/// Visible window over a derived list. Starts at one page and grows by one
/// page per `load_more`. Every `list` run builds a fresh window, so a new
/// sort option starts over at one page unless `--pages` asks for more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    visible: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            visible: ITEMS_PER_PAGE,
        }
    }
}

impl Paginator {
    /// Window after `pages - 1` load-more clicks (at least one page).
    pub fn with_pages(pages: usize) -> Self {
        let mut pager = Self::default();
        for _ in 1..pages.min(MAX_PAGES) {
            pager.load_more();
        }
        pager
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    pub fn load_more(&mut self) {
        self.visible = self.visible.saturating_add(ITEMS_PER_PAGE);
    }

    pub fn has_more(&self, total: usize) -> bool {
        total > self.visible
    }

    pub fn window<'a>(&self, list: &'a [Nanny]) -> &'a [Nanny] {
        &list[..list.len().min(self.visible)]
    }
}

/// First `pages` pages of `list`.
pub fn paginate(list: &[Nanny], pages: usize) -> &[Nanny] {
    Paginator::with_pages(pages).window(list)
}
