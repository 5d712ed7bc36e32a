//! HTTP / WebSocket handlers.

mod http;
mod websocket;

pub use http::{create_session, get_room_detail, health_check};
pub use websocket::websocket_handler;
