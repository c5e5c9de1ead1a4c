use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use tracing::info;

use crate::application::auth_service::AuthService;
use crate::application::forms::{FormErrors, LoginForm, SignupForm};
use crate::domain::error::DomainError;
use crate::presentation::handlers::posts::redirect;
use crate::presentation::middleware::SESSION_COOKIE;
use crate::presentation::views::{self, LoginTemplate, SignupTemplate};

pub async fn signup_form() -> Result<HttpResponse, DomainError> {
    views::render(
        SignupTemplate {
            errors: FormErrors::default(),
            username: String::new(),
            email: String::new(),
        },
        StatusCode::OK,
    )
}

pub async fn signup_submit(
    service: web::Data<AuthService>,
    form: web::Form<SignupForm>,
) -> Result<HttpResponse, DomainError> {
    let mut errors = FormErrors::default();
    let cleaned = form.clean(&mut errors);

    if errors.is_empty() {
        match service
            .register(cleaned.username, cleaned.email, cleaned.password)
            .await
        {
            Ok(user) => {
                info!(user_id = %user.id, username = %user.username, "user signed up");
                return Ok(redirect("/auth/login/"));
            }
            Err(DomainError::UserAlreadyExists(message)) => errors.add("username", message),
            Err(other) => return Err(other),
        }
    }

    views::render(
        SignupTemplate {
            errors,
            username: form.username.clone(),
            email: form.email.clone(),
        },
        StatusCode::OK,
    )
}

pub async fn login_form() -> Result<HttpResponse, DomainError> {
    views::render(
        LoginTemplate {
            error: None,
            username: String::new(),
        },
        StatusCode::OK,
    )
}

pub async fn login_submit(
    service: web::Data<AuthService>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, DomainError> {
    match service.login(form.username.trim(), &form.password).await {
        Ok(token) => {
            info!(username = %form.username, "user logged in");
            let cookie = Cookie::build(SESSION_COOKIE, token)
                .path("/")
                .http_only(true)
                .finish();
            Ok(HttpResponse::Found()
                .insert_header((actix_web::http::header::LOCATION, "/"))
                .cookie(cookie)
                .finish())
        }
        Err(DomainError::Unauthorized) => views::render(
            LoginTemplate {
                error: Some("Invalid username or password.".to_string()),
                username: form.username.clone(),
            },
            StatusCode::OK,
        ),
        Err(other) => Err(other),
    }
}

pub async fn logout() -> HttpResponse {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();
    HttpResponse::Found()
        .insert_header((actix_web::http::header::LOCATION, "/"))
        .cookie(cookie)
        .finish()
}
