use blogdesk_api_types::EntityId;
use serde::Serialize;

use crate::application::error::AppError;
use crate::application::form::{FormModal, SubmitOutcome};
use crate::application::list_view::{ListStatus, ListView};
use crate::application::page::{DeleteOutcome, PageContainer};
use crate::application::queries::ListQuery;
use crate::application::session::Session;
use crate::config::{Assignment, ResourceAction};
use crate::domain::resource::Resource;
use crate::presentation::{print, render_grid};

use super::CliError;

pub async fn handle<R: Resource>(session: &Session, action: ResourceAction) -> Result<(), CliError> {
    match action {
        ResourceAction::List {
            page,
            page_size,
            search,
        } => list::<R>(session, page, page_size, search).await,
        ResourceAction::Get { id } => get::<R>(session, id).await,
        ResourceAction::Dropdown { keyword } => dropdown::<R>(session, keyword).await,
        ResourceAction::Create { set } => {
            let mut page = session.page::<R>();
            page.open_new().await;
            save(&mut page, &set).await
        }
        ResourceAction::Update { id, set } => {
            let mut page = session.page::<R>();
            page.open_edit(id).await?;
            save(&mut page, &set).await
        }
        ResourceAction::Delete { id } => delete::<R>(session, id).await,
    }
}

async fn list<R: Resource>(
    session: &Session,
    page: u32,
    page_size: Option<u32>,
    search: Option<String>,
) -> Result<(), CliError> {
    let page_size = page_size.unwrap_or_else(|| session.settings().ui.page_size.get());
    let query = ListQuery::new(page, page_size, search.unwrap_or_default());
    let mut view = ListView::<R>::at(session.queries(), query);
    view.mount().await;

    println!("{}", render_grid(&view.grid()));
    match view.status() {
        ListStatus::Error { message } => Err(CliError::Failed(message.clone())),
        _ => Ok(()),
    }
}

async fn get<R: Resource>(session: &Session, id: EntityId) -> Result<(), CliError> {
    let entity = session
        .queries::<R>()
        .get_by_id(Some(id))
        .await?
        .ok_or_else(|| AppError::unexpected(format!("{} {id} was not returned", R::KIND.name())))?;
    print_json(&entity)
}

async fn dropdown<R: Resource>(session: &Session, keyword: Option<String>) -> Result<(), CliError> {
    let options = session
        .queries::<R>()
        .dropdown(keyword.as_deref().unwrap_or_default())
        .await?;
    print_json(&options)
}

async fn save<R: Resource>(
    page: &mut PageContainer<R>,
    assignments: &[Assignment],
) -> Result<(), CliError> {
    let form = page
        .form_mut()
        .ok_or_else(|| AppError::unexpected("form is not open"))?;
    apply(form, assignments)?;

    match page.submit_form().await {
        Some(SubmitOutcome::Saved(entity)) => print_json(&entity),
        Some(SubmitOutcome::Invalid(errors)) => {
            eprintln!("{} is invalid:", R::KIND.name());
            for line in print::validation_lines(&errors) {
                eprintln!("{line}");
            }
            Err(CliError::Invalid(errors))
        }
        Some(SubmitOutcome::Failed(err)) => Err(err.into()),
        None => Err(AppError::unexpected("form is not open").into()),
    }
}

fn apply<R: Resource>(form: &mut FormModal<R>, assignments: &[Assignment]) -> Result<(), CliError> {
    for Assignment { field, value } in assignments {
        form.assign(field, value).map_err(AppError::from)?;
    }
    Ok(())
}

async fn delete<R: Resource>(session: &Session, id: EntityId) -> Result<(), CliError> {
    let mut page = session.page::<R>();
    page.request_delete(id);
    match page.confirm_delete().await {
        DeleteOutcome::Deleted(_) | DeleteOutcome::Idle => Ok(()),
        DeleteOutcome::Failed { error, .. } => Err(error.into()),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", print::json(value)?);
    Ok(())
}
