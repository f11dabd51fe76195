use serde::Deserialize;

use crate::error::AppError;
use crate::posts::repo_types::PostChanges;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub category: Option<String>,
}

fn require_non_empty(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

impl CreatePostRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require_non_empty("title", &self.title)?;
        require_non_empty("content", &self.content)
    }
}

impl UpdatePostRequest {
    pub fn into_changes(self) -> Result<PostChanges, AppError> {
        if let Some(title) = &self.title {
            require_non_empty("title", title)?;
        }
        if let Some(content) = &self.content {
            require_non_empty("content", content)?;
        }
        Ok(PostChanges {
            title: self.title,
            content: self.content,
            excerpt: self.excerpt,
            category: self.category,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_title_is_rejected() {
        let req = CreatePostRequest {
            title: "   ".into(),
            content: "body".into(),
            excerpt: None,
            category: None,
        };
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn partial_update_keeps_absent_fields_none() {
        let changes = UpdatePostRequest {
            title: None,
            content: Some("new body".into()),
            excerpt: None,
            category: Some("rust".into()),
        }
        .into_changes()
        .unwrap();
        assert!(changes.title.is_none());
        assert_eq!(changes.content.as_deref(), Some("new body"));
        assert_eq!(changes.category.as_deref(), Some("rust"));

        let empty_content = UpdatePostRequest {
            title: None,
            content: Some(String::new()),
            excerpt: None,
            category: None,
        };
        assert!(empty_content.into_changes().is_err());
    }
}
