pub mod errors;
pub mod periods;
