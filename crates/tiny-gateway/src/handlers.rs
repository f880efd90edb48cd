pub mod api;
pub mod health;
pub mod url;

pub use api::api_description_handler;
pub use health::health_handler;
pub use url::{
    create_handler, delete_handler, expand_handler, follow_handler, list_handler, update_handler,
};
