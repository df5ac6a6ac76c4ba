pub mod forwarder;
pub mod registry;
