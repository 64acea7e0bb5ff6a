// Core business logic module
pub mod plant;
