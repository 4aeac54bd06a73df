mod app_state;
mod http_handlers;
mod ws_handler;

pub use app_state::*;
pub use http_handlers::*;
pub use ws_handler::*;
