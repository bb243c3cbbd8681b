pub mod bookings;
pub mod flights;
pub mod panels;
pub mod session;

use axum::Router;
use std::sync::Arc;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(session::routes())
        .merge(panels::routes())
        .merge(flights::routes())
        .merge(bookings::routes())
}
