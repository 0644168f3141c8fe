mod resource;

pub use resource::{CreateResource, UpdateResource};
