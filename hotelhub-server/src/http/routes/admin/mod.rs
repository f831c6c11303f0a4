//! Back-office endpoints under `/admin`
//!
//! Catalog content with images arrives as `multipart/form-data`; menu
//! displays are nested JSON. Partial updates reject a request carrying
//! no fields before anything is written.

use std::sync::Arc;

use axum::Router;

use crate::http::server::AppState;

pub mod bookings;
pub mod contacts;
pub mod events;
pub mod menu_displays;
pub mod menus;
pub mod occasions;
pub mod services;
pub mod team_members;

/// All admin routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(services::router())
        .merge(team_members::router())
        .merge(events::router())
        .merge(bookings::router())
        .merge(contacts::router())
        .merge(occasions::router())
        .merge(menus::router())
        .merge(menu_displays::router())
}
