use axum::{
    Form, Json,
    extract::{Path, State},
    response::Redirect,
};
use tracing::debug;

use foro_types::api::{NewTopicForm, NewTopicPage, TopicPage};

use crate::error::ApiError;
use crate::forms;
use crate::state::{AppState, with_db};

pub async fn new_topic_form(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> Result<Json<NewTopicPage>, ApiError> {
    let category = with_db(&state, move |db| db.get_category(category_id)).await?;
    Ok(Json(NewTopicPage { category }))
}

/// Resolves the author by name (creating the user on first post) and opens
/// a topic in the category.
pub async fn create_topic(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
    Form(form): Form<NewTopicForm>,
) -> Result<Redirect, ApiError> {
    debug!("New topic submitted for category {}", category_id);

    // Unknown category is a 404 even when the form is also incomplete.
    let category = with_db(&state, move |db| db.get_category(category_id)).await?;

    let author = forms::required("autor", form.autor)?;
    let title = forms::required("titulo", form.titulo)?;
    let body = forms::required("contenido", form.contenido)?;

    with_db(&state, move |db| {
        let user = db.find_or_create_user(&author)?;
        db.create_topic(&title, &body, &user, &category)
    })
    .await?;

    Ok(Redirect::to(&format!("/categoria/{}", category_id)))
}

pub async fn show_topic(
    State(state): State<AppState>,
    Path(topic_id): Path<i64>,
) -> Result<Json<TopicPage>, ApiError> {
    debug!("Showing topic {}", topic_id);

    let page = with_db(&state, move |db| {
        let topic = db.get_topic(topic_id)?;
        let category = db.get_category(topic.category_id)?;
        let messages = db.list_messages_by_topic(topic_id)?;
        Ok(TopicPage {
            topic,
            category,
            messages,
        })
    })
    .await?;

    Ok(Json(page))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use foro_db::Database;
    use foro_types::api::{CategoryPage, NewTopicPage, TopicPage};

    use crate::test_support::{app, app_with, get, json, location, post_form};

    fn app_with_category() -> axum::Router {
        let db = Database::open_in_memory().unwrap();
        db.create_category("General", Some("de todo")).unwrap();
        app_with(db)
    }

    #[tokio::test]
    async fn form_carries_the_category() {
        let app = app_with_category();
        let page: NewTopicPage = json(get(&app, "/categoria/1/nuevo_tema").await).await;
        assert_eq!(page.category.name, "General");
    }

    #[tokio::test]
    async fn form_for_unknown_category_is_not_found() {
        let app = app();
        assert_eq!(get(&app, "/categoria/3/nuevo_tema").await.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn posting_to_unknown_category_is_not_found() {
        let app = app();
        let response = post_form(&app, "/categoria/3/nuevo_tema", "autor=ana&titulo=a&contenido=b").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn topic_is_created_and_listed_under_category() {
        let app = app_with_category();

        let response = post_form(&app, "/categoria/1/nuevo_tema", "autor=ana&titulo=Hola&contenido=Mundo").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/categoria/1");

        let page: CategoryPage = json(get(&app, "/categoria/1").await).await;
        assert_eq!(page.topics.len(), 1);
        assert_eq!(page.topics[0].title, "Hola");
        assert_eq!(page.topics[0].body, "Mundo");
        assert_eq!(page.topics[0].author_username, "ana");
    }

    #[tokio::test]
    async fn missing_title_is_bad_request_and_creates_nothing() {
        let app = app_with_category();

        let response = post_form(&app, "/categoria/1/nuevo_tema", "autor=ana&contenido=Mundo").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let page: CategoryPage = json(get(&app, "/categoria/1").await).await;
        assert!(page.topics.is_empty());
    }

    #[tokio::test]
    async fn topic_title_and_body_are_stored_as_submitted() {
        let app = app_with_category();

        // titulo=" Hola ", contenido="Mundo\n\n"
        post_form(&app, "/categoria/1/nuevo_tema", "autor=ana&titulo=+Hola+&contenido=Mundo%0A%0A").await;

        let page: TopicPage = json(get(&app, "/tema/1").await).await;
        assert_eq!(page.topic.title, " Hola ");
        assert_eq!(page.topic.body, "Mundo\n\n");
    }

    #[tokio::test]
    async fn topic_page_shows_category_and_empty_thread() {
        let app = app_with_category();
        post_form(&app, "/categoria/1/nuevo_tema", "autor=ana&titulo=Hola&contenido=Mundo").await;

        let page: TopicPage = json(get(&app, "/tema/1").await).await;
        assert_eq!(page.topic.title, "Hola");
        assert_eq!(page.category.name, "General");
        assert!(page.messages.is_empty());
    }

    #[tokio::test]
    async fn non_numeric_id_is_rejected() {
        let app = app_with_category();
        assert!(get(&app, "/tema/abc").await.status().is_client_error());
    }
}
