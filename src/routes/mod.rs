use actix_web::web;

pub mod backend_health;
pub mod tournament;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health);

    cfg.service(
        web::scope("/tournament")
            .service(tournament::compute_standings)
            .service(tournament::generate_seeding)
            .service(tournament::validate_bracket)
            .service(tournament::report_winner)
            .service(tournament::generate_schedule)
            .service(tournament::assign_teams)
            .service(tournament::generate_bracket)
    );
}
