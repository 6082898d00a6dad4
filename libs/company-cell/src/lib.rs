pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::CompanyError;
pub use router::company_routes;
pub use services::CompanyService;
