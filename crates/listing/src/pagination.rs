//! Compact page labels and page navigation.
//!
//! `page_labels` turns a page count into the short run of buttons shown
//! under the list; `Paginator` answers the navigation questions (where does
//! "next" go, is "previous" disabled) for a given current page.

use std::fmt;

use candidate_model::clamp_page;

/// Pages always shown from the start of the range
const LEADING_PAGES: u32 = 9;

/// One entry of the pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageToken {
    Page(u32),
    /// Stands in for an omitted range of pages
    Ellipsis,
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageToken::Page(page) => write!(f, "{}", page),
            PageToken::Ellipsis => f.write_str("…"),
        }
    }
}

/// Labels for a control over `total_pages` pages.
///
/// ## Algorithm
/// 1. Up to 9 pages: every page, no ellipsis
/// 2. Otherwise pages 1..=9, then, only when there are more than 10 pages,
///    an ellipsis followed by the last two pages
///
/// With exactly 10 pages the output stops at 9; page 10 is reachable only
/// through "next".
pub fn page_labels(total_pages: u32) -> Vec<PageToken> {
    if total_pages <= LEADING_PAGES {
        return (1..=total_pages).map(PageToken::Page).collect();
    }

    let mut tokens: Vec<PageToken> = (1..=LEADING_PAGES.min(total_pages))
        .map(PageToken::Page)
        .collect();

    if total_pages > LEADING_PAGES + 1 {
        tokens.push(PageToken::Ellipsis);
        tokens.push(PageToken::Page(total_pages - 1));
        tokens.push(PageToken::Page(total_pages));
    }

    tokens
}

/// Navigation state for the pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    current_page: u32,
    total_pages: u32,
}

impl Paginator {
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        Self {
            current_page,
            total_pages: total_pages.max(1),
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn labels(&self) -> Vec<PageToken> {
        page_labels(self.total_pages)
    }

    /// Page to switch to for a click on `target`, or `None` when the
    /// clamped target is the page already shown.
    pub fn safe_change(&self, target: u32) -> Option<u32> {
        let page = clamp_page(target, self.total_pages);
        (page != self.current_page).then_some(page)
    }

    pub fn previous(&self) -> Option<u32> {
        self.safe_change(self.current_page.saturating_sub(1))
    }

    pub fn next(&self) -> Option<u32> {
        self.safe_change(self.current_page.saturating_add(1))
    }

    pub fn previous_disabled(&self) -> bool {
        self.current_page == 1
    }

    pub fn next_disabled(&self) -> bool {
        self.current_page == self.total_pages
    }

    /// The control is only shown when there is more than one page
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }
}
