pub mod application;
pub mod bookmark;
pub mod category;
pub mod comment;
pub mod company;
pub mod comparison;
pub mod main_listing;
pub mod shared;
pub mod user;
