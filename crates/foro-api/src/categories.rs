use axum::{
    Form, Json,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tracing::{debug, warn};

use foro_types::api::{CategoryPage, HomePage, NewCategoryForm, NewCategoryPage};

use crate::error::ApiError;
use crate::forms;
use crate::state::{AppState, with_db};

pub const DUPLICATE_CATEGORY: &str = "Ya existe una categoría con ese nombre.";

pub async fn home(State(state): State<AppState>) -> Result<Json<HomePage>, ApiError> {
    let categories = with_db(&state, |db| db.list_categories()).await?;
    Ok(Json(HomePage { categories }))
}

pub async fn new_category_form() -> Json<NewCategoryPage> {
    Json(NewCategoryPage::default())
}

/// A duplicate name re-displays the form with an error instead of failing
/// the request.
pub async fn create_category(
    State(state): State<AppState>,
    Form(form): Form<NewCategoryForm>,
) -> Result<Response, ApiError> {
    let name = forms::required("nombre", form.nombre)?;
    let description = forms::optional(form.descripcion);

    match with_db(&state, move |db| db.create_category(&name, description.as_deref())).await {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(ApiError::Duplicate(msg)) => {
            warn!("Rejected category: {}", msg);
            Ok(Json(NewCategoryPage {
                error: Some(DUPLICATE_CATEGORY.to_string()),
            })
            .into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn show_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> Result<Json<CategoryPage>, ApiError> {
    debug!("Showing category {}", category_id);

    let (category, topics) = with_db(&state, move |db| {
        let category = db.get_category(category_id)?;
        let topics = db.list_topics_by_category(category_id)?;
        Ok((category, topics))
    })
    .await?;

    debug!("Category {} has {} topics", category_id, topics.len());
    Ok(Json(CategoryPage { category, topics }))
}
