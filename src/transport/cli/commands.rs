//! Command handlers: each one mounts the matching page or form, runs it once, and prints.

use crate::app::editor;
use crate::app::forms::{load_image, AuthorForm, BookForm, BookFormOptions, GenreForm};
use crate::app::list_page::{ListPage, LoadOutcome};
use crate::app::notifications::Notifications;
use crate::app::summary::CatalogSummary;
use crate::domain::model::{Author, Book, CatalogEntity, EntityId, Genre, SortField};
use crate::domain::view::{SortDirection, ViewAction};
use crate::infra::config::Settings;
use crate::infra::http::{CatalogClient, EntityService};
use crate::transport::cli::args::{
    AuthorCommand, AuthorFieldArgs, BookCommand, BookFieldArgs, Cli, Command, DeleteArgs,
    GenreCommand, ListArgs,
};
use crate::transport::cli::render::{self, TableRow};
use anyhow::anyhow;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Runs one command. `Ok(false)` means the command ran but the service reported a failure.
pub async fn run(cli: Cli, mut settings: Settings) -> anyhow::Result<bool> {
    if let Some(url) = cli.api_url {
        settings.api_base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(size) = cli.page_size {
        settings.page_size = size;
    }

    let client = Arc::new(CatalogClient::with_settings(&settings)?);
    tracing::debug!(base_url = client.base_url(), "catalog client ready");

    match cli.command {
        Command::Summary => summary(&client, &settings).await,
        Command::Books(cmd) => books(client, &settings, cmd).await,
        Command::Authors(cmd) => authors(client, &settings, cmd).await,
        Command::Genres(cmd) => genres(client, &settings, cmd).await,
    }
}

async fn summary(client: &CatalogClient, settings: &Settings) -> anyhow::Result<bool> {
    let mut notices = Notifications::new(settings.notice_ttl);
    match CatalogSummary::load(client, client, client).await {
        Ok(summary) => {
            render::print_summary(&summary);
            Ok(true)
        }
        Err(e) => {
            notices.error(e.notice_text("Failed to load the catalog"));
            render::print_notices(&mut notices);
            Ok(false)
        }
    }
}

async fn books(
    client: Arc<CatalogClient>,
    settings: &Settings,
    cmd: BookCommand,
) -> anyhow::Result<bool> {
    let mut notices = Notifications::new(settings.notice_ttl);
    let ok = match cmd {
        BookCommand::List(args) => return list::<Book>(client, settings, args).await,
        BookCommand::Delete(args) => return delete::<Book>(client, settings, args).await,
        BookCommand::Show { id } => {
            match editor::load_one::<Book>(client.as_ref(), &EntityId::new(id), &mut notices).await {
                Ok(book) => {
                    render::print_book_details(&book);
                    true
                }
                Err(_) => false,
            }
        }
        BookCommand::Add(fields) => {
            let Some(options) = book_options(&client, &mut notices).await else {
                render::print_notices(&mut notices);
                return Ok(false);
            };
            let mut form = BookForm::default();
            apply_book_fields(&mut form, &fields).await?;
            let draft = form.validate(Some(&options))?;
            editor::submit_create::<Book>(client.as_ref(), &draft, &mut notices)
                .await
                .is_ok()
        }
        BookCommand::Edit { id, fields } => {
            let id = EntityId::new(id);
            match editor::load_one::<Book>(client.as_ref(), &id, &mut notices).await {
                Ok(book) => {
                    let Some(options) = book_options(&client, &mut notices).await else {
                        render::print_notices(&mut notices);
                        return Ok(false);
                    };
                    let mut form = BookForm::from_book(&book);
                    apply_book_fields(&mut form, &fields).await?;
                    let draft = form.validate(Some(&options))?;
                    editor::submit_update::<Book>(client.as_ref(), &id, &draft, &mut notices)
                        .await
                        .is_ok()
                }
                Err(_) => false,
            }
        }
    };
    render::print_notices(&mut notices);
    Ok(ok)
}

/// Author and genre pickers for the book form. A failed fetch becomes an error notice.
async fn book_options(client: &CatalogClient, notices: &mut Notifications) -> Option<BookFormOptions> {
    match BookFormOptions::load(client, client).await {
        Ok(options) => Some(options),
        Err(e) => {
            tracing::warn!("book form options failed to load: {}", e);
            notices.error(e.notice_text("Failed to load authors or genres"));
            None
        }
    }
}

async fn apply_book_fields(form: &mut BookForm, fields: &BookFieldArgs) -> anyhow::Result<()> {
    if let Some(v) = &fields.title {
        form.title = v.clone();
    }
    if let Some(v) = &fields.price {
        form.price = v.clone();
    }
    if let Some(v) = &fields.publication_date {
        form.publication_date = v.clone();
    }
    if let Some(v) = &fields.author_id {
        form.author_id = v.clone();
    }
    if let Some(v) = &fields.genre_id {
        form.genre_id = v.clone();
    }
    if let Some(path) = &fields.image {
        form.image = Some(load_image(path).await?);
    }
    Ok(())
}

async fn authors(
    client: Arc<CatalogClient>,
    settings: &Settings,
    cmd: AuthorCommand,
) -> anyhow::Result<bool> {
    let mut notices = Notifications::new(settings.notice_ttl);
    let ok = match cmd {
        AuthorCommand::List(args) => return list::<Author>(client, settings, args).await,
        AuthorCommand::Delete(args) => return delete::<Author>(client, settings, args).await,
        AuthorCommand::Show { id } => {
            match editor::load_one::<Author>(client.as_ref(), &EntityId::new(id), &mut notices)
                .await
            {
                Ok(author) => {
                    render::print_author_profile(&author);
                    true
                }
                Err(_) => false,
            }
        }
        AuthorCommand::Add(fields) => {
            let mut form = AuthorForm::default();
            apply_author_fields(&mut form, &fields).await?;
            let draft = form.validate()?;
            editor::submit_create::<Author>(client.as_ref(), &draft, &mut notices)
                .await
                .is_ok()
        }
        AuthorCommand::Edit { id, fields } => {
            let id = EntityId::new(id);
            match editor::load_one::<Author>(client.as_ref(), &id, &mut notices).await {
                Ok(author) => {
                    let mut form = AuthorForm::from_author(&author);
                    apply_author_fields(&mut form, &fields).await?;
                    let draft = form.validate()?;
                    editor::submit_update::<Author>(client.as_ref(), &id, &draft, &mut notices)
                        .await
                        .is_ok()
                }
                Err(_) => false,
            }
        }
    };
    render::print_notices(&mut notices);
    Ok(ok)
}

async fn apply_author_fields(form: &mut AuthorForm, fields: &AuthorFieldArgs) -> anyhow::Result<()> {
    if let Some(v) = &fields.name {
        form.author_name = v.clone();
    }
    if let Some(v) = &fields.biography {
        form.biography = v.clone();
    }
    if let Some(v) = &fields.image_url {
        form.image_url = Some(v.clone());
    }
    if let Some(path) = &fields.image {
        form.image = Some(load_image(path).await?);
    }
    Ok(())
}

async fn genres(
    client: Arc<CatalogClient>,
    settings: &Settings,
    cmd: GenreCommand,
) -> anyhow::Result<bool> {
    let mut notices = Notifications::new(settings.notice_ttl);
    let ok = match cmd {
        GenreCommand::List(args) => return list::<Genre>(client, settings, args).await,
        GenreCommand::Delete(args) => return delete::<Genre>(client, settings, args).await,
        GenreCommand::Show { id } => {
            match editor::load_one::<Genre>(client.as_ref(), &EntityId::new(id), &mut notices)
                .await
            {
                Ok(genre) => {
                    render::print_genre(&genre);
                    true
                }
                Err(_) => false,
            }
        }
        GenreCommand::Add(fields) => {
            let form = GenreForm {
                genre_name: fields.name.unwrap_or_default(),
            };
            let draft = form.validate()?;
            editor::submit_create::<Genre>(client.as_ref(), &draft, &mut notices)
                .await
                .is_ok()
        }
        GenreCommand::Edit { id, fields } => {
            let id = EntityId::new(id);
            match editor::load_one::<Genre>(client.as_ref(), &id, &mut notices).await {
                Ok(genre) => {
                    let mut form = GenreForm::from_genre(&genre);
                    if let Some(name) = fields.name {
                        form.genre_name = name;
                    }
                    let draft = form.validate()?;
                    editor::submit_update::<Genre>(client.as_ref(), &id, &draft, &mut notices)
                        .await
                        .is_ok()
                }
                Err(_) => false,
            }
        }
    };
    render::print_notices(&mut notices);
    Ok(ok)
}

/// Mounts the list page, loads the collection, and returns `None` when the load failed.
async fn mount<E>(client: Arc<CatalogClient>, settings: &Settings) -> Option<ListPage<E>>
where
    E: CatalogEntity,
    CatalogClient: EntityService<E>,
{
    let service: Arc<dyn EntityService<E>> = client;
    let mut page = ListPage::with_settings(service, settings);
    match page.load().await {
        LoadOutcome::Applied { .. } => Some(page),
        LoadOutcome::Failed | LoadOutcome::Discarded => {
            render::print_notices(page.notices());
            None
        }
    }
}

/// Mounts the list page and applies the `list` arguments: sort first, then the search (which
/// starts over on page 1), then the requested page. `Ok(None)` means the collection failed to
/// load and its notice has been printed.
pub async fn open_list<E>(
    client: Arc<CatalogClient>,
    settings: &Settings,
    args: &ListArgs,
) -> anyhow::Result<Option<ListPage<E>>>
where
    E: CatalogEntity,
    CatalogClient: EntityService<E>,
{
    let field = match &args.sort {
        Some(name) => E::Field::parse(name).ok_or_else(|| {
            let known: Vec<&str> = E::Field::all().iter().map(|f| f.name()).collect();
            anyhow!("unknown sort column {:?} (expected one of: {})", name, known.join(", "))
        })?,
        None => E::DEFAULT_SORT,
    };
    let direction = if args.desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };

    let Some(mut page) = mount::<E>(client, settings).await else {
        return Ok(None);
    };

    page.dispatch(ViewAction::SetSort(field, direction));
    page.dispatch(ViewAction::Search(args.search.clone()));
    if args.page != 1 {
        page.dispatch(ViewAction::GoToPage(args.page));
        if page.view_state().page != args.page {
            tracing::warn!(
                requested = args.page,
                total_pages = page.view().total_pages,
                "page out of range, showing page {}",
                page.view_state().page
            );
        }
    }

    Ok(Some(page))
}

async fn list<E>(client: Arc<CatalogClient>, settings: &Settings, args: ListArgs) -> anyhow::Result<bool>
where
    E: TableRow,
    CatalogClient: EntityService<E>,
{
    let Some(mut page) = open_list::<E>(client, settings, &args).await? else {
        return Ok(false);
    };
    render::print_page(&page);
    render::print_notices(page.notices());
    Ok(true)
}

async fn confirm(question: &str) -> anyhow::Result<bool> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(format!("{} [y/N] ", question).as_bytes()).await?;
    stdout.flush().await?;

    let mut answer = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut answer)
        .await?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

async fn delete<E>(client: Arc<CatalogClient>, settings: &Settings, args: DeleteArgs) -> anyhow::Result<bool>
where
    E: TableRow,
    CatalogClient: EntityService<E>,
{
    let Some(mut page) = mount::<E>(client, settings).await else {
        return Ok(false);
    };

    match &args.matching {
        Some(term) => {
            page.dispatch(ViewAction::Search(term.clone()));
            page.toggle_select_all();
        }
        None => {
            let ids: BTreeSet<EntityId> = args.ids.iter().map(|id| EntityId::new(id.trim())).collect();
            for id in &ids {
                if !page.toggle_selected(id) {
                    eprintln!("warning: {} {} not found, skipping", E::KIND.singular(), id);
                }
            }
        }
    }

    let selected = page.selection().len();
    if selected == 0 {
        eprintln!("Nothing to delete.");
        return Ok(false);
    }

    if !args.yes {
        let question = format!(
            "Are you sure you want to delete the selected {} {}?",
            selected,
            E::KIND.plural()
        );
        if !confirm(&question).await? {
            eprintln!("Cancelled.");
            return Ok(true);
        }
    }

    let report = page.delete_selected().await;
    render::print_page(&page);
    render::print_notices(page.notices());
    Ok(report.is_complete_success())
}
