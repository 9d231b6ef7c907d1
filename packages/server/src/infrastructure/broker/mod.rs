//! Topic Broker の実装

mod inmemory;

pub use inmemory::InMemoryTopicBroker;
