pub mod gateway;

pub use gateway::MetadataGateway;
