// Library module for namesweep
// Re-exports modules for use in integration tests and the binary

pub mod sweep;
