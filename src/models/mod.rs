pub mod component;
pub mod component_config;
pub mod endpoint;

// Re-export commonly used types
pub use component::{
    ComponentDoc, Configurations, ConnectionReference, Dependencies, EnvVariable, ServiceReference,
};
pub use component_config::ComponentConfigDoc;
pub use endpoint::{Endpoint, EndpointType, EndpointsDoc, NetworkVisibility};
