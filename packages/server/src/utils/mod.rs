pub mod company;
pub mod hash;
pub mod jwt;
