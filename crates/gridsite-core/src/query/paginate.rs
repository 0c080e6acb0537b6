// Client-side pagination over an already-filtered list.

pub const DEFAULT_PER_PAGE: usize = 10;

/// One page of a list plus the numbers a pager needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<T> {
    pub items: Vec<T>,
    /// 1-based, clamped to `1..=total_pages`.
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> PageView<T> {
    /// 1-based index of the first item on this page (0 when empty).
    pub fn start(&self) -> usize {
        if self.total_items == 0 {
            0
        } else {
            (self.page - 1) * self.per_page + 1
        }
    }

    /// 1-based index of the last item on this page.
    pub fn end(&self) -> usize {
        (self.page * self.per_page).min(self.total_items)
    }

    /// `Showing X to Y of Z results`
    pub fn summary(&self) -> String {
        format!(
            "Showing {} to {} of {} results",
            self.start(),
            self.end(),
            self.total_items
        )
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Slice `items` into page `page` of `per_page` (0 means the default).
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> PageView<T> {
    let per_page = if per_page == 0 {
        DEFAULT_PER_PAGE
    } else {
        per_page
    };
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);
    let page = page.clamp(1, total_pages.max(1));

    let items = items
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();

    PageView {
        items,
        page,
        per_page,
        total_pages,
        total_items,
    }
}
