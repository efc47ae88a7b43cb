use actix_web::web;

pub mod health;
pub mod matches;
pub mod realtime;

/// Register every route. `main.rs` and the route tests share this.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.configure(health::configure_routes);

    // Lobby listing and snapshots: /api/matches/**
    cfg.service(web::scope("/api/matches").configure(matches::configure_routes));

    // Websocket upgrade: /ws
    cfg.configure(realtime::configure_routes);
}
