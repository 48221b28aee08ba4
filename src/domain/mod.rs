pub mod bill;
pub mod business;
pub mod notification;
pub mod product;
pub mod sale;
pub mod user;
