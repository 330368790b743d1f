//! Axum route for the relationship radar.

use axum::routing::get;
use axum::Router;

use super::handlers::{get_insights, RadarAppState};

/// Routes under /api.
pub fn radar_routes() -> Router<RadarAppState> {
    Router::new().route("/relationship-radar", get(get_insights))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radar_routes_build() {
        let _routes = radar_routes();
    }
}
