pub mod company;

pub use company::CompanyService;
