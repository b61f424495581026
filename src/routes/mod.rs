pub mod auth;
pub mod boards;
pub mod columns;
pub mod health;
pub mod tasks;

use actix_web::web;

/// Registers every API route. Mounted under `/api` behind the auth gate;
/// the gate itself exempts the register/login paths.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::register)
            .service(auth::login)
            .service(auth::me),
    )
    .service(boards::get_boards)
    .service(boards::create_board)
    .service(boards::get_board)
    .service(boards::update_board)
    .service(boards::delete_board)
    .service(columns::get_columns)
    .service(columns::create_column)
    .service(columns::get_column)
    .service(columns::update_column)
    .service(columns::delete_column)
    .service(tasks::get_tasks)
    .service(tasks::create_task)
    .service(tasks::get_task)
    .service(tasks::update_task)
    .service(tasks::delete_task);
}
