#[macro_use]
extern crate rocket;

use log::info;
use rocket::fairing::AdHoc;
use std::env;

use othello_engine::bot::Bot;
use othello_engine::config::Config;
use othello_engine::debug_logger::DebugLogger;

mod handler;

#[launch]
async fn rocket() -> _ {
    // Hosting services usually hand out the port in `PORT`, while Rocket reads
    // `ROCKET_PORT`. Forward it when present.
    if let Ok(port) = env::var("PORT") {
        env::set_var("ROCKET_PORT", &port);
    }

    // Default to 'info' logging unless `RUST_LOG` is already set
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    info!("Starting Othello engine server...");

    // Load configuration once at startup
    let config = Config::load_or_default();
    info!(
        "Search depth {}, alpha-beta {}",
        config.search.depth,
        if config.search.alpha_beta { "on" } else { "off" }
    );

    let logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path).await;
    let bot = Bot::new(config, logger);

    rocket::build()
        .manage(bot)
        .attach(AdHoc::on_response("Server ID Middleware", |_, res| {
            Box::pin(async move {
                res.set_raw_header("Server", "othello-engine");
            })
        }))
        .mount(
            "/",
            routes![
                handler::index,
                handler::legal_moves,
                handler::flips,
                handler::apply,
                handler::get_move
            ],
        )
}
