//! Pure functions for serializing/deserializing resources to/from cache bytes.
//!
//! The cache stores JSON so cached values stay human-readable and easy to
//! inspect with redis-cli. The same codec is used in both directions, so
//! `deserialize(serialize(x)) == x` holds for a single resource and for a
//! homogeneous list.

use thiserror::Error;

use crate::resource::Resource;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a resource to JSON bytes.
pub fn serialize_resource(resource: &Resource) -> Result<Vec<u8>> {
    serde_json::to_vec(resource).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a resource.
pub fn deserialize_resource(bytes: &[u8]) -> Result<Resource> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

/// Serializes a slice of resources to JSON bytes.
pub fn serialize_resources(resources: &[Resource]) -> Result<Vec<u8>> {
    serde_json::to_vec(resources).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a vector of resources.
pub fn deserialize_resources(bytes: &[u8]) -> Result<Vec<Resource>> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
