pub mod router;
pub mod types;
pub mod handlers {
    pub mod common;
    pub mod execute;
    pub mod health;
    pub mod sales;
    pub mod session;
}

pub use router::{create_router, ApiDoc};
pub use types::AppState;
