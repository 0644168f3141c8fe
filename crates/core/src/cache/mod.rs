mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{resource_key, ALL_RESOURCES_KEY, RESOURCE_EVENTS_CHANNEL};
pub use serialization::{
    deserialize_resource, deserialize_resources, serialize_resource, serialize_resources,
    SerializationError,
};
pub use traits::{Cache, EventPublisher};
