mod config;
mod context;
mod core;
mod database;
mod error;
mod handlers;
mod impls;
mod middlewares;
pub mod request;
pub mod response;

use actix_files::Files;
use actix_web::web::{delete, get, post, put, resource, scope, Data};
use actix_web::{middleware::Logger, App, HttpServer};
use env_logger::Env;
use log::info;
use sqlx::postgres::PgPoolOptions;

use config::Config;
use database::sqlx::PgSqlxManager;
use impls::uploaders::url::FILES_ROUTE;
use middlewares::jwt::JWTMiddleware;

#[actix_web::main]
async fn main() -> Result<(), error::Error> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = Config::from_env()?;
    let pool = PgPoolOptions::new().max_connections(config.db_max_connections).connect(&config.database_url).await?;
    sqlx::migrate!().run(&pool).await?;
    std::fs::create_dir_all(&config.upload_path)?;
    info!("listening on {}", config.bind_addr);
    let bind_addr = config.bind_addr.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(JWTMiddleware::new(config.jwt_secret.clone()))
            .wrap(Logger::default())
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(PgSqlxManager::new(pool.clone())))
            .app_data(Data::new(config.clone()))
            .service(Files::new(FILES_ROUTE, &config.upload_path))
            .service(resource("login").route(post().to(handlers::login)))
            .service(
                resource("voting-form")
                    .route(get().to(handlers::voting::form))
                    .route(post().to(handlers::voting::submit)),
            )
            .service(
                scope("voting-system")
                    .route("", get().to(handlers::report::list))
                    .route("/{question_id}", get().to(handlers::report::detail)),
            )
            .service(
                resource("settings")
                    .route(get().to(handlers::settings::detail))
                    .route(put().to(handlers::settings::update)),
            )
            .service(
                scope("questions")
                    .route("", get().to(handlers::question::list))
                    .route("", post().to(handlers::question::create))
                    .service(
                        scope("{question_id}")
                            .route("", get().to(handlers::question::detail))
                            .route("", put().to(handlers::question::update))
                            .route("", delete().to(handlers::question::delete))
                            .route("votes", get().to(handlers::question::votes)),
                    ),
            )
            .service(
                scope("answers")
                    .route("", get().to(handlers::answer::list))
                    .route("", post().to(handlers::answer::create))
                    .service(
                        scope("{answer_id}")
                            .route("", get().to(handlers::answer::detail))
                            .route("", put().to(handlers::answer::update))
                            .route("", delete().to(handlers::answer::delete)),
                    ),
            )
            .service(resource("votes/{vote_id}").route(get().to(handlers::vote::detail)))
            .service(
                scope("upload").route("", post().to(handlers::upload::create)).service(
                    resource("{file_id}")
                        .route(get().to(handlers::upload::detail))
                        .route(delete().to(handlers::upload::delete)),
                ),
            )
    })
    .bind(bind_addr)?
    .run()
    .await?;
    Ok(())
}
