/// State management module
///
/// This module owns everything the UI renders from:
/// - The authenticated session and its durable store (session.rs)
/// - The image list for the active visibility scope (gallery.rs)
/// - Shared data structures and upload validation (data.rs)

pub mod data;
pub mod gallery;
pub mod session;
