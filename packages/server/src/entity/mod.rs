pub mod application;
pub mod bookmark;
pub mod category;
pub mod comment;
pub mod company;
pub mod company_category;
pub mod user;
