// Route exports
pub mod matches;
pub mod search;

pub use search::AppState;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(search::configure)
            .configure(matches::configure),
    );
}
