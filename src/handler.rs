// HTTP handler bindings for the Othello engine endpoints
//
// Thin wrappers that bind Rocket routes to the Bot's methods. Handlers:
// - Deserialize incoming JSON requests
// - Extract the Bot instance from Rocket's managed state
// - Delegate to Bot methods
// - Serialize responses

use rocket::http::Status;
use rocket::serde::json::Json;
use serde_json::{json, Value};

use othello_engine::bot::Bot;
use othello_engine::types::{CellRequest, PositionRequest};

/// GET / endpoint
/// Returns engine metadata
#[get("/")]
pub fn index(bot: &rocket::State<Bot>) -> Json<Value> {
    Json(bot.info())
}

/// POST /legal-moves endpoint
/// Lists the cells the side to move may play, in discovery order
#[post("/legal-moves", format = "json", data = "<req>")]
pub fn legal_moves(bot: &rocket::State<Bot>, req: Json<PositionRequest>) -> Json<Value> {
    Json(bot.legal_moves(&req.board, req.side))
}

/// POST /flips endpoint
/// Lists the discs a move would flip; empty when the move is illegal
#[post("/flips", format = "json", data = "<req>")]
pub fn flips(bot: &rocket::State<Bot>, req: Json<CellRequest>) -> Json<Value> {
    Json(bot.flips(&req.board, req.side, req.cell))
}

/// POST /apply endpoint
/// Returns the board after the move, or 422 when the move is illegal
#[post("/apply", format = "json", data = "<req>")]
pub fn apply(bot: &rocket::State<Bot>, req: Json<CellRequest>) -> (Status, Json<Value>) {
    match bot.apply(&req.board, req.side, req.cell) {
        Ok(response) => (Status::Ok, Json(response)),
        Err(e) => (
            Status::UnprocessableEntity,
            Json(json!({ "error": e.to_string() })),
        ),
    }
}

/// POST /move endpoint
/// Searches the position and returns the chosen move
#[post("/move", format = "json", data = "<req>")]
pub async fn get_move(bot: &rocket::State<Bot>, req: Json<PositionRequest>) -> Json<Value> {
    let response = bot.get_move(&req.board, req.side).await;

    Json(response)
}
