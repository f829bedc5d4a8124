//! Companion HTTP API.
//!
//! - `GET /get-subscription?address=` returns the enrollment record bound to
//!   an address.
//! - `GET /task?address=` issues a task code, subject to the cooldown.
//! - `POST /verifytask {"address"}` verifies the task and credits the reward.
//!
//! Every request acts as a private-context invocation of the enrollment
//! workflow. Errors are `{"error": "<message>"}` bodies.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::RpcError;
pub use server::{cors_layer, router, RpcServer, RpcState};
