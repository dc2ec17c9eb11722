use serde::{Deserialize, Serialize};

use crate::models::{Category, Message, Topic};

// -- Form submissions --
//
// Every field is an `Option` so a missing field reaches the handler's
// validation step instead of failing inside the extractor.

#[derive(Debug, Deserialize)]
pub struct NewCategoryForm {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewTopicForm {
    pub autor: Option<String>,
    pub titulo: Option<String>,
    pub contenido: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewMessageForm {
    pub autor: Option<String>,
    pub contenido: Option<String>,
}

// -- Pages --

#[derive(Debug, Serialize, Deserialize)]
pub struct HomePage {
    pub categories: Vec<Category>,
}

/// Category creation form. `error` is set when a submission was rejected.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct NewCategoryPage {
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryPage {
    pub category: Category,
    pub topics: Vec<Topic>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewTopicPage {
    pub category: Category,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TopicPage {
    pub topic: Topic,
    pub category: Category,
    pub messages: Vec<Message>,
}
