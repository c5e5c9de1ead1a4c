use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::info;

use crate::application::forms::{FormErrors, PostForm};
use crate::application::post_service::PostService;
use crate::domain::error::DomainError;
use crate::presentation::identity::AuthenticatedUser;
use crate::presentation::views::{
    self, GroupListTemplate, IndexTemplate, PostDetailTemplate, PostFormTemplate, PostFormView,
    ProfileTemplate,
};

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

pub async fn index(
    service: web::Data<PostService>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, DomainError> {
    let page = service.recent_posts(query.page.as_deref()).await?;
    views::render(IndexTemplate { page }, StatusCode::OK)
}

pub async fn group_list(
    service: web::Data<PostService>,
    slug: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, DomainError> {
    let (group, page) = service.group_posts(&slug, query.page.as_deref()).await?;
    views::render(GroupListTemplate { group, page }, StatusCode::OK)
}

pub async fn profile(
    service: web::Data<PostService>,
    username: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, DomainError> {
    let (author, page) = service.author_posts(&username, query.page.as_deref()).await?;
    views::render(ProfileTemplate { author, page }, StatusCode::OK)
}

pub async fn post_detail(
    service: web::Data<PostService>,
    id: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    let post = service.get_post(*id).await?;
    views::render(
        PostDetailTemplate {
            title: post.preview_title(),
            post,
        },
        StatusCode::OK,
    )
}

pub async fn create_form(
    service: web::Data<PostService>,
    _user: AuthenticatedUser,
) -> Result<HttpResponse, DomainError> {
    let groups = service.list_groups().await?;
    views::render(
        PostFormTemplate {
            form: PostFormView::empty(),
            errors: FormErrors::default(),
            groups,
            is_edit: false,
            action: "/create/".to_string(),
        },
        StatusCode::OK,
    )
}

pub async fn create_submit(
    service: web::Data<PostService>,
    user: AuthenticatedUser,
    form: web::Form<PostForm>,
) -> Result<HttpResponse, DomainError> {
    let mut errors = FormErrors::default();
    let cleaned = form.clean(&mut errors);
    if let Some(group_id) = cleaned.group_id {
        if service.find_group(group_id).await?.is_none() {
            errors.add("group", "Select a valid group.");
        }
    }

    if !errors.is_empty() {
        let groups = service.list_groups().await?;
        return views::render(
            PostFormTemplate {
                form: PostFormView::new(form.text.clone(), cleaned.group_id),
                errors,
                groups,
                is_edit: false,
                action: "/create/".to_string(),
            },
            StatusCode::OK,
        );
    }

    // Authorship comes from the session, never from the submission.
    let post = service
        .create_post(user.id, cleaned.text, cleaned.group_id)
        .await?;
    info!(post_id = post.id, author = %user.username, "post created");
    Ok(redirect(&format!("/profile/{}/", user.username)))
}

pub async fn edit_form(
    service: web::Data<PostService>,
    user: AuthenticatedUser,
    id: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    let post = service.get_post(*id).await?;
    if post.author_id != user.id {
        return Ok(redirect(&post_detail_url(post.id)));
    }

    let groups = service.list_groups().await?;
    views::render(
        PostFormTemplate {
            form: PostFormView::from_post(&post),
            errors: FormErrors::default(),
            groups,
            is_edit: true,
            action: edit_url(post.id),
        },
        StatusCode::OK,
    )
}

pub async fn edit_submit(
    service: web::Data<PostService>,
    user: AuthenticatedUser,
    id: web::Path<i64>,
    form: web::Form<PostForm>,
) -> Result<HttpResponse, DomainError> {
    let post = service.get_post(*id).await?;
    if post.author_id != user.id {
        return Ok(redirect(&post_detail_url(post.id)));
    }

    let mut errors = FormErrors::default();
    let cleaned = form.clean(&mut errors);
    if let Some(group_id) = cleaned.group_id {
        if service.find_group(group_id).await?.is_none() {
            errors.add("group", "Select a valid group.");
        }
    }

    if !errors.is_empty() {
        let groups = service.list_groups().await?;
        return views::render(
            PostFormTemplate {
                form: PostFormView::new(form.text.clone(), cleaned.group_id),
                errors,
                groups,
                is_edit: true,
                action: edit_url(post.id),
            },
            StatusCode::OK,
        );
    }

    let updated = service
        .update_post(post.id, cleaned.text, cleaned.group_id)
        .await?;
    info!(post_id = updated.id, author = %user.username, "post updated");
    Ok(redirect(&post_detail_url(updated.id)))
}

fn post_detail_url(id: i64) -> String {
    format!("/posts/{id}/")
}

fn edit_url(id: i64) -> String {
    format!("/posts/{id}/edit/")
}

pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}
