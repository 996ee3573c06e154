//! Lambda handler and response construction

pub mod context;
pub mod handler;
pub mod helpers;

// Re-export the main handler for convenience
pub use handler::{BodyEncoder, JsonEncoder, RequestHandler, function_handler};
