use std::sync::Arc;

use actix_web::middleware::DefaultHeaders;
use actix_web::{App, HttpServer, web};
use tracing::info;

use microblog_server::application::auth_service::AuthService;
use microblog_server::application::post_service::PostService;
use microblog_server::data::group_repository::{GroupRepository, PostgresGroupRepository};
use microblog_server::data::post_repository::{PostRepository, PostgresPostRepository};
use microblog_server::data::user_repository::{PostgresUserRepository, UserRepository};
use microblog_server::infrastructure::config::AppConfig;
use microblog_server::infrastructure::database::{create_pool, run_migrations};
use microblog_server::infrastructure::logging::init_logging;
use microblog_server::infrastructure::security::SessionKeys;
use microblog_server::presentation::middleware::{RequestTrace, SessionMiddleware};
use microblog_server::presentation::routes;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env()?;
    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await?;

    let posts: Arc<dyn PostRepository> = Arc::new(PostgresPostRepository::new(pool.clone()));
    let groups: Arc<dyn GroupRepository> = Arc::new(PostgresGroupRepository::new(pool.clone()));
    let users: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));

    let auth_service = AuthService::new(
        Arc::clone(&users),
        SessionKeys::new(config.session_secret.clone()),
    );
    let post_service = PostService::new(posts, groups, users);

    info!(host = %config.host, port = config.port, "starting http server");

    let session_keys = auth_service.keys().clone();
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(post_service.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .wrap(SessionMiddleware::new(session_keys.clone()))
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer")),
            )
            .wrap(RequestTrace)
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
