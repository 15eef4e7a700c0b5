/// Greedy per-household distribution pass with displacement.
pub mod allocator;
/// Post-hoc bill aggregation from consumption records.
pub mod billing;
pub mod engine;
/// Minute-slot price timeline with per-household capacity accounting.
pub mod ledger;
pub mod types;
