use clap::{Args, Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;

fn page_size_arg(raw: &str) -> Result<NonZeroUsize, String> {
    crate::infra::config::parse_page_size(raw).map_err(|e| e.to_string())
}

#[derive(Parser, Debug)]
#[command(name = "catalog-admin", author, version, about = "Manage books, authors and genres of the catalog service", long_about = None)]
pub struct Cli {
    /// Base URL of the catalog service (overrides CATALOG_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Rows per list page (overrides CATALOG_PAGE_SIZE)
    #[arg(long, global = true, value_parser = page_size_arg)]
    pub page_size: Option<NonZeroUsize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Collection sizes at a glance
    Summary,
    /// Manage books
    #[command(subcommand)]
    Books(BookCommand),
    /// Manage authors
    #[command(subcommand)]
    Authors(AuthorCommand),
    /// Manage genres
    #[command(subcommand)]
    Genres(GenreCommand),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Case-insensitive substring matched against the title or name
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Column to sort by
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Page to show (1-based)
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,
}

#[derive(Args, Debug, Clone, Default)]
pub struct DeleteArgs {
    /// Ids to delete
    #[arg(required_unless_present = "matching")]
    pub ids: Vec<String>,

    /// Delete every record whose title/name matches this search term
    #[arg(long, conflicts_with = "ids")]
    pub matching: Option<String>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct BookFieldArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub price: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub publication_date: Option<String>,
    #[arg(long)]
    pub author_id: Option<String>,
    #[arg(long)]
    pub genre_id: Option<String>,
    /// Cover image file to upload
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct AuthorFieldArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub biography: Option<String>,
    /// Portrait file to upload (add only)
    #[arg(long)]
    pub image: Option<PathBuf>,
    /// Portrait URL (edit only)
    #[arg(long)]
    pub image_url: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GenreFieldArgs {
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum BookCommand {
    /// List books (one page)
    List(ListArgs),
    /// Book details with author and genre
    Show { id: String },
    /// Add a book
    Add(BookFieldArgs),
    /// Edit a book; omitted fields keep their current value
    Edit {
        id: String,
        #[command(flatten)]
        fields: BookFieldArgs,
    },
    /// Delete books
    Delete(DeleteArgs),
}

#[derive(Subcommand, Debug)]
pub enum AuthorCommand {
    /// List authors (one page)
    List(ListArgs),
    /// Author profile
    Show { id: String },
    /// Add an author
    Add(AuthorFieldArgs),
    /// Edit an author; omitted fields keep their current value
    Edit {
        id: String,
        #[command(flatten)]
        fields: AuthorFieldArgs,
    },
    /// Delete authors
    Delete(DeleteArgs),
}

#[derive(Subcommand, Debug)]
pub enum GenreCommand {
    /// List genres (one page)
    List(ListArgs),
    /// Genre details
    Show { id: String },
    /// Add a genre
    Add(GenreFieldArgs),
    /// Rename a genre
    Edit {
        id: String,
        #[command(flatten)]
        fields: GenreFieldArgs,
    },
    /// Delete genres
    Delete(DeleteArgs),
}
