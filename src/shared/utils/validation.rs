use crate::shared::errors::AppError;

pub struct Validator;

impl Validator {
    pub fn validate_list_title(title: &str) -> Result<(), AppError> {
        if title.trim().is_empty() {
            return Err(AppError::ValidationError(
                "List title cannot be empty".to_string(),
            ));
        }
        if title.chars().count() > 255 {
            return Err(AppError::ValidationError(
                "List title too long (max 255 characters)".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_position(position: i32) -> Result<(), AppError> {
        if position < 0 {
            return Err(AppError::ValidationError(
                "Position cannot be negative".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_search_query(query: &str) -> Result<(), AppError> {
        if query.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Search query cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_page(page: u32) -> Result<(), AppError> {
        if page == 0 {
            return Err(AppError::ValidationError(
                "Page numbers start at 1".to_string(),
            ));
        }
        Ok(())
    }
}
