pub mod initdb;
pub mod migrate_and_serve;
pub mod seed_catalog;
pub mod serve;

pub use initdb::init_database;
pub use migrate_and_serve::migrate_and_serve;
pub use seed_catalog::seed_catalog;
pub use serve::serve;
