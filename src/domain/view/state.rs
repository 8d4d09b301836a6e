//! Per-page view state and the reducer that moves it.

use crate::domain::model::SortField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header marker shown next to the sorted column.
    pub fn marker(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<F> {
    pub field: F,
    pub direction: SortDirection,
}

/// What the operator asked to see. Immutable: every change goes through [`ViewState::reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState<F> {
    pub search: String,
    pub sort: SortSpec<F>,
    /// 1-based.
    pub page: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction<F> {
    Search(String),
    /// Header click: same column flips direction, another column starts ascending.
    SortBy(F),
    SetSort(F, SortDirection),
    GoToPage(usize),
    NextPage,
    PrevPage,
}

impl<F: SortField> ViewState<F> {
    pub fn new(default_sort: F) -> Self {
        Self {
            search: String::new(),
            sort: SortSpec {
                field: default_sort,
                direction: SortDirection::Ascending,
            },
            page: 1,
        }
    }

    /// Returns the next state. `total_pages` bounds page navigation: a move outside
    /// `[1, total_pages]` leaves the page where it is.
    pub fn reduce(&self, action: ViewAction<F>, total_pages: usize) -> Self {
        let mut next = self.clone();
        match action {
            ViewAction::Search(term) => {
                next.search = term;
                next.page = 1;
            }
            ViewAction::SortBy(field) => {
                next.sort = if self.sort.field == field {
                    SortSpec {
                        field,
                        direction: self.sort.direction.flipped(),
                    }
                } else {
                    SortSpec {
                        field,
                        direction: SortDirection::Ascending,
                    }
                };
            }
            ViewAction::SetSort(field, direction) => {
                next.sort = SortSpec { field, direction };
            }
            ViewAction::GoToPage(page) => next.page = Self::bounded(self.page, page, total_pages),
            ViewAction::NextPage => {
                next.page = Self::bounded(self.page, self.page.saturating_add(1), total_pages)
            }
            ViewAction::PrevPage => {
                next.page = Self::bounded(self.page, self.page.saturating_sub(1), total_pages)
            }
        }
        next
    }

    /// Same state pinned to `page`, used after a patch shrinks the collection.
    pub fn with_page(&self, page: usize) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    fn bounded(current: usize, target: usize, total_pages: usize) -> usize {
        if target >= 1 && target <= total_pages {
            target
        } else {
            current
        }
    }
}
