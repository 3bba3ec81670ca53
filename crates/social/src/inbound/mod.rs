mod http;
mod model;
pub mod router;
pub mod state;
