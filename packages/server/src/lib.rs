//! Live planning-poker session server.
//!
//! Participants join a room over WebSocket, vote on a rows x columns matrix,
//! reveal the votes together and start new rounds. Every state change is
//! broadcast to the room as a full snapshot.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
