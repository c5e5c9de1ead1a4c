use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use askama::Template;

use crate::application::forms::FormErrors;
use crate::application::pagination::Page;
use crate::domain::error::DomainError;
use crate::domain::group::Group;
use crate::domain::post::Post;
use crate::domain::user::User;

pub fn render<T: Template>(template: T, status: StatusCode) -> Result<HttpResponse, DomainError> {
    let body = template
        .render()
        .map_err(|err| DomainError::Internal(format!("template rendering failed: {err}")))?;
    Ok(HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body))
}

/// The rendered 404 page, with a plain-text fallback should the template
/// itself fail.
pub fn not_found_page() -> HttpResponse {
    match render(NotFoundTemplate, StatusCode::NOT_FOUND) {
        Ok(response) => response,
        Err(_) => HttpResponse::NotFound()
            .content_type("text/plain; charset=utf-8")
            .body("404 Not Found"),
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub page: Page<Post>,
}

#[derive(Template)]
#[template(path = "group_list.html")]
pub struct GroupListTemplate {
    pub group: Group,
    pub page: Page<Post>,
}

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub author: User,
    pub page: Page<Post>,
}

#[derive(Template)]
#[template(path = "post_detail.html")]
pub struct PostDetailTemplate {
    pub title: String,
    pub post: Post,
}

/// Serves both the create and the edit flow; `is_edit` switches the
/// heading and the submit label, `action` the target route.
#[derive(Template)]
#[template(path = "create_post.html")]
pub struct PostFormTemplate {
    pub form: PostFormView,
    pub errors: FormErrors,
    pub groups: Vec<Group>,
    pub is_edit: bool,
    pub action: String,
}

pub struct PostFormView {
    pub text: String,
    pub group_id: Option<i64>,
}

impl PostFormView {
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            group_id: None,
        }
    }

    pub fn new(text: String, group_id: Option<i64>) -> Self {
        Self { text, group_id }
    }

    pub fn from_post(post: &Post) -> Self {
        Self {
            text: post.text.clone(),
            group_id: post.group_id,
        }
    }

    pub fn is_selected(&self, id: &i64) -> bool {
        self.group_id == Some(*id)
    }
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub username: String,
}

#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignupTemplate {
    pub errors: FormErrors,
    pub username: String,
    pub email: String,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate;
