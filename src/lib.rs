use actix_web::{http, web, App, HttpResponse, HttpServer};
use actix_web::dev::Server;
use actix_web::error::InternalError;
use tracing_actix_web::TracingLogger;
use std::net::TcpListener;
use actix_cors::Cors;

pub mod config;
mod routes;
mod handlers;
pub mod models;
pub mod telemetry;
pub mod tournament;
pub mod utils;
use crate::routes::init_routes;
use crate::config::settings::TournamentSettings;
use crate::models::common::ApiResponse;
use crate::tournament::{TournamentInputValidator, TournamentService};

pub fn run(
    listener: TcpListener,
    tournament_settings: TournamentSettings,
    allowed_origins: Vec<String>,
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer
    let input_validator = web::Data::new(TournamentInputValidator::new(tournament_settings));
    let tournament_service = web::Data::new(TournamentService::new());

    let server = HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![
                http::header::ACCEPT,
                http::header::CONTENT_TYPE,
            ])
            .max_age(3600);
        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        // Malformed bodies (unknown bracketType, missing fields) get the same envelope as engine errors
        let json_config = web::JsonConfig::default().error_handler(|err, _req| {
            let detail = err.to_string();
            tracing::warn!("Rejected request body: {}", detail);
            let response = HttpResponse::BadRequest()
                .json(ApiResponse::<()>::error_with_message("Invalid request body", detail));
            InternalError::from_response(err, response).into()
        });

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(json_config)
            .app_data(input_validator.clone())
            .app_data(tournament_service.clone())
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
