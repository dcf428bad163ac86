mod health;
mod links;

pub use health::health_handler;
pub use links::{create_link_handler, get_link_handler, preview_handler, redirect_handler};
