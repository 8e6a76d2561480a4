/// UI building blocks
///
/// Pure view code: these modules turn state into widgets and emit
/// messages back to the update loop. No state lives here.

pub mod auth;
pub mod gallery;
pub mod upload;
