mod get_user_profile;

use actix_web::web;
use get_user_profile::get_user_profile_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/user/{user_id}/profile",
        web::get().to(get_user_profile_controller),
    );
}
