//! Plain-text rendering of list pages, details and notices.

use crate::app::list_page::ListPage;
use crate::app::notifications::{NoticeKind, Notifications};
use crate::app::summary::CatalogSummary;
use crate::domain::model::{Author, Book, BookField, CatalogEntity, Genre, SortField};
use crate::domain::model::{AuthorField, GenreField};

/// Column layout of an entity's list table.
pub trait TableRow: CatalogEntity {
    /// Header label and, for sortable columns, the field it sorts by.
    fn columns() -> Vec<(&'static str, Option<Self::Field>)>;

    fn cells(&self) -> Vec<String>;
}

fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_string())
}

impl TableRow for Book {
    fn columns() -> Vec<(&'static str, Option<BookField>)> {
        BookField::all().iter().map(|f| (f.label(), Some(*f))).collect()
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            or_dash(
                self.author_name()
                    .map(str::to_string)
                    .or_else(|| self.author_ref().map(|id| format!("#{}", id))),
            ),
            or_dash(
                self.genre_name()
                    .map(str::to_string)
                    .or_else(|| self.genre_ref().map(|id| format!("#{}", id))),
            ),
            or_dash(self.publication_date.map(|d| d.format("%Y-%m-%d").to_string())),
            or_dash(self.price.map(|p| format!("{:.2}", p))),
        ]
    }
}

impl TableRow for Author {
    fn columns() -> Vec<(&'static str, Option<AuthorField>)> {
        vec![
            (AuthorField::Id.label(), Some(AuthorField::Id)),
            (AuthorField::Name.label(), Some(AuthorField::Name)),
            ("Biography", None),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.author_id.to_string(),
            self.author_name.clone(),
            truncate(&self.biography, 48),
        ]
    }
}

impl TableRow for Genre {
    fn columns() -> Vec<(&'static str, Option<GenreField>)> {
        GenreField::all().iter().map(|f| (f.label(), Some(*f))).collect()
    }

    fn cells(&self) -> Vec<String> {
        vec![self.genre_id.to_string(), self.genre_name.clone()]
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let head: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", head)
}

fn print_rows(rows: &[Vec<String>]) {
    let columns = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|c| {
            rows.iter()
                .filter_map(|r| r.get(c))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();
    for row in rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .collect();
        println!("{}", line.join("  ").trim_end());
    }
}

/// Prints the current page of `page` with checkbox, sort marker and pagination footer.
pub fn print_page<E: TableRow>(page: &ListPage<E>) {
    let view = page.view();
    let sort = page.view_state().sort;

    let select_all = if page.all_selected() { "[x]" } else { "[ ]" };
    let mut header = vec![select_all.to_string()];
    for (label, field) in E::columns() {
        match field {
            Some(f) if f == sort.field => header.push(format!("{} {}", label, sort.direction.marker())),
            _ => header.push(label.to_string()),
        }
    }

    let mut rows = vec![header];
    for record in &view.items {
        let mark = if page.selection().contains(record.id()) {
            "[x]"
        } else {
            "[ ]"
        };
        let mut row = vec![mark.to_string()];
        row.extend(record.cells());
        rows.push(row);
    }
    print_rows(&rows);

    if view.total_items == 0 {
        println!("No {} found.", E::KIND.plural());
    }
    println!(
        "Page {} of {} ({} {})",
        view.page,
        view.total_pages,
        view.total_items,
        E::KIND.plural()
    );
}

pub fn print_book_details(book: &Book) {
    let rows = vec![
        vec!["Id".to_string(), book.id.to_string()],
        vec!["Title".to_string(), book.title.clone()],
        vec![
            "Author".to_string(),
            or_dash(book.author_name().map(str::to_string)),
        ],
        vec![
            "Genre".to_string(),
            or_dash(book.genre_name().map(str::to_string)),
        ],
        vec![
            "Published".to_string(),
            or_dash(book.publication_date.map(|d| d.format("%Y-%m-%d").to_string())),
        ],
        vec![
            "Price".to_string(),
            or_dash(book.price.map(|p| format!("{:.2}", p))),
        ],
        vec!["Image".to_string(), or_dash(book.image_url.clone())],
    ];
    print_rows(&rows);
}

pub fn print_author_profile(author: &Author) {
    println!("{} (#{})", author.author_name, author.author_id);
    if let Some(url) = &author.image_url {
        println!("Image: {}", url);
    }
    if !author.biography.is_empty() {
        println!();
        println!("{}", author.biography);
    }
}

pub fn print_genre(genre: &Genre) {
    println!("{} (#{})", genre.genre_name, genre.genre_id);
}

pub fn print_summary(summary: &CatalogSummary) {
    println!("Welcome to the catalog admin.");
    print_rows(&[
        vec!["Books".to_string(), summary.books.to_string()],
        vec!["Authors".to_string(), summary.authors.to_string()],
        vec!["Genres".to_string(), summary.genres.to_string()],
    ]);
}

/// Prints and clears pending notices on stderr.
pub fn print_notices(notices: &mut Notifications) {
    for notice in notices.drain() {
        match notice.kind {
            NoticeKind::Success => eprintln!("success: {}", notice.message),
            NoticeKind::Error => eprintln!("error: {}", notice.message),
        }
    }
}
