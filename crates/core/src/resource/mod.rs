mod error;
mod events;
mod types;

pub use error::ValidationError;
pub use events::ResourceEvent;
pub use types::{NewResource, Resource, ResourcePatch};
