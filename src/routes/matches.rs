use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::filters::refine_matches;
use crate::models::{
    ErrorResponse, Event, FindPackageMatchesRequest, FindPackageMatchesResponse,
    RefineMatchesRequest, RefineMatchesResponse,
};
use crate::routes::search::AppState;

/// Configure match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/matches/find", web::post().to(find_matches))
        .route("/matches/refine", web::post().to(refine));
}

/// Find packages compatible with an event
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "event": {
///     "budget": 5000,
///     "guestCount": 120,
///     "latitude": 34.05,
///     "longitude": -118.24,
///     "eventType": "wedding"
///   }
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindPackageMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "invalid_event".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let event: Event = req.into_inner().event.into();

    // Candidate packages come from the record store; the matcher applies
    // the exact eligibility and scoring rules
    let packages = match state
        .catalog
        .packages_near(event.latitude, event.longitude, state.max_match_distance_miles)
        .await
    {
        Ok(packages) => packages,
        Err(e) => {
            tracing::error!("Failed to fetch candidate packages: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "catalog_unavailable".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    tracing::debug!("Fetched {} candidate packages", packages.len());

    let result = state.matcher.match_packages(packages, &event);

    tracing::info!(
        "Returning {} matches (from {} candidates)",
        result.matches.len(),
        result.total_candidates
    );

    HttpResponse::Ok().json(FindPackageMatchesResponse {
        matches: result.matches,
        total_candidates: result.total_candidates,
    })
}

/// Refine an already-scored match list with range filters
///
/// POST /api/v1/matches/refine
///
/// Filter-only: scores are passed through untouched.
async fn refine(req: web::Json<RefineMatchesRequest>) -> impl Responder {
    let request = req.into_inner();
    let refined = refine_matches(request.matches, &request.filters);

    HttpResponse::Ok().json(RefineMatchesResponse {
        count: refined.len(),
        matches: refined,
    })
}
