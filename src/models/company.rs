use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,
    pub company_name: String,
    pub email: Option<String>,
    pub is_approved: bool,
    pub active: bool,
    pub image_link: Option<String>,
    pub registration_date: Option<DateTime<Utc>>,
}
