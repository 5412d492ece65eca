pub mod counter_store;
