use actix_web::{HttpResponse, web};

use crate::presentation::handlers::{auth, posts};
use crate::presentation::views;

/// The routing table: every (method, path pattern) → handler pair in one
/// place. Numeric segments are regex-guarded so non-numeric ids fall
/// through to the 404 page instead of a parse failure.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(posts::index))
        .route("/group/{slug}/", web::get().to(posts::group_list))
        .route("/profile/{username}/", web::get().to(posts::profile))
        .route("/posts/{id:\\d+}/", web::get().to(posts::post_detail))
        .service(
            web::resource("/create/")
                .route(web::get().to(posts::create_form))
                .route(web::post().to(posts::create_submit)),
        )
        .service(
            web::resource("/posts/{id:\\d+}/edit/")
                .route(web::get().to(posts::edit_form))
                .route(web::post().to(posts::edit_submit)),
        )
        .service(
            web::resource("/auth/signup/")
                .route(web::get().to(auth::signup_form))
                .route(web::post().to(auth::signup_submit)),
        )
        .service(
            web::resource("/auth/login/")
                .route(web::get().to(auth::login_form))
                .route(web::post().to(auth::login_submit)),
        )
        .route("/auth/logout/", web::get().to(auth::logout))
        .default_service(web::route().to(not_found));
}

async fn not_found() -> HttpResponse {
    views::not_found_page()
}
