/// CSV summary export of consumption records.
pub mod export;
