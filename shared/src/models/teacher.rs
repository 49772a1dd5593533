//! Teacher profile model

use crate::util::null_as_zero;
use serde::{Deserialize, Serialize};

/// Account details embedded in a teacher profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherUser {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Teacher profile as returned by `GET /api/teachers/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherProfile {
    pub id: String,
    /// Populated user reference; the backend resolves it before responding
    #[serde(rename = "userId")]
    pub user: TeacherUser,
    #[serde(default)]
    pub specialization: Option<String>,
    /// Contracted rate per lesson in VND
    #[serde(default, deserialize_with = "null_as_zero")]
    pub salary_per_lesson: i64,
}
