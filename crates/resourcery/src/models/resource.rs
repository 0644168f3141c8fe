use serde::Deserialize;

use resourcery_core::resource::{NewResource, ResourcePatch, ValidationError};

/// Request payload for creating a resource.
///
/// Unknown JSON fields are ignored rather than rejected. Validation runs
/// before any store access.
#[derive(Debug, Deserialize)]
pub struct CreateResource {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl CreateResource {
    /// Validates the payload and converts it into store input.
    pub fn into_new(self) -> Result<NewResource, ValidationError> {
        let title = self.title.ok_or(ValidationError::MissingField("title"))?;
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyField("title"));
        }

        let content = self
            .content
            .ok_or(ValidationError::MissingField("content"))?;
        if content.trim().is_empty() {
            return Err(ValidationError::EmptyField("content"));
        }

        Ok(NewResource { title, content })
    }
}

/// Request payload for partially updating a resource.
///
/// Absent fields are left unchanged; a payload with no fields at all is
/// rejected before any store access.
#[derive(Debug, Deserialize)]
pub struct UpdateResource {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl UpdateResource {
    /// Validates the payload and converts it into a store patch.
    pub fn into_patch(self) -> Result<ResourcePatch, ValidationError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(ValidationError::EmptyField("title"));
            }
        }

        let patch = ResourcePatch {
            title: self.title,
            content: self.content,
        };
        if patch.is_empty() {
            return Err(ValidationError::EmptyUpdate);
        }
        Ok(patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_title() {
        let payload: CreateResource = serde_json::from_str(r#"{"content": "c"}"#).unwrap();
        assert_eq!(
            payload.into_new(),
            Err(ValidationError::MissingField("title"))
        );
    }

    #[test]
    fn create_requires_content() {
        let payload: CreateResource = serde_json::from_str(r#"{"title": "t"}"#).unwrap();
        assert_eq!(
            payload.into_new(),
            Err(ValidationError::MissingField("content"))
        );
    }

    #[test]
    fn create_rejects_blank_title() {
        let payload: CreateResource =
            serde_json::from_str(r#"{"title": "   ", "content": "c"}"#).unwrap();
        assert_eq!(payload.into_new(), Err(ValidationError::EmptyField("title")));
    }

    #[test]
    fn create_accepts_valid_payload() {
        let payload: CreateResource =
            serde_json::from_str(r#"{"title": "t", "content": "c"}"#).unwrap();
        let new = payload.into_new().unwrap();
        assert_eq!(new.title, "t");
        assert_eq!(new.content, "c");
    }

    #[test]
    fn create_ignores_unknown_fields() {
        let payload: CreateResource =
            serde_json::from_str(r#"{"title": "t", "content": "c", "owner": "x"}"#).unwrap();
        assert!(payload.into_new().is_ok());
    }

    #[test]
    fn update_rejects_empty_payload() {
        let payload: UpdateResource = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(payload.into_patch(), Err(ValidationError::EmptyUpdate));
    }

    #[test]
    fn update_accepts_partial_payload() {
        let payload: UpdateResource = serde_json::from_str(r#"{"title": "new"}"#).unwrap();
        let patch = payload.into_patch().unwrap();
        assert_eq!(patch.title.as_deref(), Some("new"));
        assert!(patch.content.is_none());
    }

    #[test]
    fn update_ignores_unknown_fields() {
        let payload: UpdateResource =
            serde_json::from_str(r#"{"title": "new", "owner": "x"}"#).unwrap();
        assert!(payload.into_patch().is_ok());
    }

    #[test]
    fn update_rejects_blank_title() {
        let payload: UpdateResource = serde_json::from_str(r#"{"title": ""}"#).unwrap();
        assert_eq!(payload.into_patch(), Err(ValidationError::EmptyField("title")));
    }
}
