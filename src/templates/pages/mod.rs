pub mod home;
pub mod listings;
pub mod report;

pub use home::home_page;
pub use listings::listings_page;
pub use report::report_page;
