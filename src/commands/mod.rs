// Command handlers module
pub mod dashboard;
pub mod report;
pub mod snapshot;

// Re-exports for cleaner imports
pub use dashboard::execute as dashboard;
pub use report::execute as report;
pub use snapshot::execute as snapshot;
