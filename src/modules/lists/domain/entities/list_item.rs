use crate::shared::errors::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Opaque anime payload stored with a list item.
///
/// The only structure this layer relies on is a top-level `id` (number or
/// non-empty string) identifying the anime upstream; everything else is display
/// metadata owned by the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct AnimePayload(Value);

impl AnimePayload {
    pub fn new(value: Value) -> Result<Self, AppError> {
        Self::try_from(value)
    }

    /// Normalized upstream id, the uniqueness key inside a list.
    ///
    /// Matches PostgreSQL's `anime ->> 'id'`, so `42` and `"42"` collide.
    pub fn anime_key(&self) -> String {
        match &self.0["id"] {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl TryFrom<Value> for AnimePayload {
    type Error = AppError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Some(object) = value.as_object() else {
            return Err(AppError::ValidationError(
                "Anime payload must be a JSON object".to_string(),
            ));
        };

        match object.get("id") {
            Some(Value::Number(_)) => Ok(Self(value)),
            Some(Value::String(s)) if !s.trim().is_empty() => Ok(Self(value)),
            _ => Err(AppError::ValidationError(
                "Anime payload requires a numeric or non-empty string 'id'".to_string(),
            )),
        }
    }
}

impl From<AnimePayload> for Value {
    fn from(payload: AnimePayload) -> Self {
        payload.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub id: Uuid,
    pub list_id: Uuid,
    pub anime: AnimePayload,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

impl ListItem {
    pub fn new(list_id: Uuid, anime: AnimePayload, position: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            list_id,
            anime,
            position,
            created_at: Utc::now(),
        }
    }

    pub fn anime_key(&self) -> String {
        self.anime.anime_key()
    }
}

/// Partial update of a list item. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    pub anime: Option<AnimePayload>,
    pub position: Option<i32>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        self.anime.is_none() && self.position.is_none()
    }
}
