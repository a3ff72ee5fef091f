mod create_transaction;
mod get_user_transactions;

use actix_web::web;
use create_transaction::create_transaction_controller;
use get_user_transactions::get_user_transactions_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/user/{user_id}/transactions",
        web::post().to(create_transaction_controller),
    );
    cfg.route(
        "/user/{user_id}/transactions",
        web::get().to(get_user_transactions_controller),
    );
}
