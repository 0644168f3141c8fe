use uuid::Uuid;

/// Cache key holding the serialized full collection of resources.
///
/// The cached blob is always the unpaginated set; pagination is applied
/// against the store only when this key is cold.
pub const ALL_RESOURCES_KEY: &str = "all_resources";

/// Pub/sub channel carrying resource mutation events.
pub const RESOURCE_EVENTS_CHANNEL: &str = "channel:resources";

/// Returns the cache key for a single resource.
pub fn resource_key(resource_id: Uuid) -> String {
    format!("resource_{}", resource_id)
}
