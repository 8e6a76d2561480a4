/// HTTP API layer
///
/// Everything that talks to the PixShare backend lives here:
/// - The client wrapper itself (client.rs)
/// - Request/response types shared with the server (models.rs)
/// - The error taxonomy for failed calls (error.rs)

pub mod client;
pub mod error;
pub mod models;
