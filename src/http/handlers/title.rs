use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    auth::Caller,
    db::title_not_found,
    errors::{AppError, FieldErrors},
    http::extract::{AppJson, AppQuery},
    models::{
        NewTitle, Page, SearchQuery, Title, TitlePayload,
        title::{last_page, search_terms},
    },
    policy::{Operation, Policy},
    state::AppState,
    validation::validate_title,
};

/// Validates the payload and resolves its platform reference.
async fn checked_title(state: &AppState, payload: TitlePayload) -> Result<NewTitle, AppError> {
    let new_title = validate_title(payload)?;

    if state.store.get_platform(new_title.platform_id).await?.is_none() {
        return Err(FieldErrors::single(
            "platform",
            format!(
                "Invalid pk \"{}\" - object does not exist.",
                new_title.platform_id
            ),
        )
        .into());
    }

    Ok(new_title)
}

pub async fn list_titles_handler(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<Title>>, AppError> {
    Policy::AdminOrReadOnly.authorize(caller.identity(), None, Operation::Safe)?;

    let titles = state.store.list_titles().await.map_err(|e| {
        tracing::error!("Error retrieving titles: {}", e);
        e
    })?;

    tracing::info!("Retrieved {} titles", titles.len());
    Ok(Json(titles))
}

pub async fn search_titles_handler(
    State(state): State<AppState>,
    caller: Caller,
    AppQuery(query): AppQuery<SearchQuery>,
) -> Result<Json<Page<Title>>, AppError> {
    Policy::AdminOrReadOnly.authorize(caller.identity(), None, Operation::Safe)?;

    let page = query.page.unwrap_or(1);
    if page == 0 {
        return Err(AppError::NotFound("Invalid page.".into()));
    }

    let page_size = state.config.search_page_size;
    let terms = search_terms(query.search.as_deref());

    let (titles, count) = state
        .store
        .search_titles(&terms, page, page_size)
        .await
        .map_err(|e| {
            tracing::error!("Error searching titles: {}", e);
            e
        })?;

    if page > last_page(count, page_size) {
        return Err(AppError::NotFound("Invalid page.".into()));
    }

    tracing::info!(
        "Search {:?} matched {} titles, serving page {}",
        terms,
        count,
        page
    );
    Ok(Json(Page::new(titles, count, page, page_size)))
}

pub async fn create_title_handler(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<AppJson<TitlePayload>, AppError>,
) -> Result<(StatusCode, Json<Title>), AppError> {
    Policy::AdminOrReadOnly.authorize(caller.identity(), None, Operation::Unsafe)?;
    let AppJson(payload) = payload?;
    let new_title = checked_title(&state, payload).await?;

    let title = state.store.create_title(new_title).await.map_err(|e| {
        tracing::error!("Error creating title: {}", e);
        e
    })?;

    tracing::info!("Title created with ID: {}", title.id);
    Ok((StatusCode::CREATED, Json(title)))
}

pub async fn get_title_handler(
    Path(title_id): Path<i64>,
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Title>, AppError> {
    Policy::AdminOrReadOnly.authorize(caller.identity(), None, Operation::Safe)?;

    let title = state
        .store
        .get_title(title_id)
        .await?
        .ok_or_else(title_not_found)?;

    Ok(Json(title))
}

pub async fn update_title_handler(
    Path(title_id): Path<i64>,
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<AppJson<TitlePayload>, AppError>,
) -> Result<Json<Title>, AppError> {
    Policy::AdminOrReadOnly.authorize(caller.identity(), None, Operation::Unsafe)?;
    let AppJson(payload) = payload?;

    if state.store.get_title(title_id).await?.is_none() {
        return Err(title_not_found());
    }
    let new_title = checked_title(&state, payload).await?;

    let title = state
        .store
        .update_title(title_id, new_title)
        .await
        .map_err(|e| {
            tracing::error!("Error updating title {}: {}", title_id, e);
            e
        })?
        .ok_or_else(title_not_found)?;

    tracing::info!("Title {} updated", title_id);
    Ok(Json(title))
}

pub async fn delete_title_handler(
    Path(title_id): Path<i64>,
    State(state): State<AppState>,
    caller: Caller,
) -> Result<StatusCode, AppError> {
    Policy::AdminOrReadOnly.authorize(caller.identity(), None, Operation::Unsafe)?;

    let deleted = state.store.delete_title(title_id).await.map_err(|e| {
        tracing::error!("Error deleting title {}: {}", title_id, e);
        e
    })?;

    if !deleted {
        return Err(title_not_found());
    }

    tracing::info!("Title {} deleted", title_id);
    Ok(StatusCode::NO_CONTENT)
}
