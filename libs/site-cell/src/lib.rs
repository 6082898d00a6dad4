pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::SiteError;
pub use router::site_routes;
pub use services::SiteService;
