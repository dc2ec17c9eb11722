use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use tracing::debug;

use foro_types::api::NewMessageForm;

use crate::error::ApiError;
use crate::forms;
use crate::state::{AppState, with_db};

pub async fn create_message(
    State(state): State<AppState>,
    Path(topic_id): Path<i64>,
    Form(form): Form<NewMessageForm>,
) -> Result<Redirect, ApiError> {
    debug!("New message submitted for topic {}", topic_id);

    let topic = with_db(&state, move |db| db.get_topic(topic_id)).await?;

    let author = forms::required("autor", form.autor)?;
    let body = forms::required("contenido", form.contenido)?;

    with_db(&state, move |db| {
        let user = db.find_or_create_user(&author)?;
        db.create_message(&body, &user, &topic)
    })
    .await?;

    Ok(Redirect::to(&format!("/tema/{}", topic_id)))
}
