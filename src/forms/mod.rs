pub mod bills;
pub mod businesses;
pub mod notifications;
pub mod products;
