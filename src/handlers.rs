pub mod analytics;
pub mod businesses;
pub mod categories;
pub mod health;
pub mod industries;
pub mod logs;
