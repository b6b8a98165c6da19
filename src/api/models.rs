use std::path::Path;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An uploaded academic resource, read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: i64,
    pub subject: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub username: String,
}

/// Account role sent on registration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[default]
    #[serde(rename = "ROLE_STUDENT")]
    Student,
    #[serde(rename = "ROLE_TEACHER")]
    Teacher,
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "student" | "role_student" => Ok(Role::Student),
            "teacher" | "role_teacher" => Ok(Role::Teacher),
            other => Err(format!("unknown role '{other}' (expected student or teacher)")),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Payload of a successful login
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    pub token: String,
}

/// A file ready to be sent as the `file` part of an upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub mime_type: String,
    pub data: Bytes,
}

impl UploadFile {
    /// Build an upload part, guessing the MIME type from the file name.
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_guess::from_path(&file_name)
            .first()
            .map(|m| m.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        Self {
            file_name,
            mime_type,
            data: data.into(),
        }
    }

    /// Read a file from disk into an upload part.
    pub async fn from_path(path: &Path) -> Result<Self, std::io::Error> {
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, data))
    }

    pub fn byte_size(&self) -> u64 {
        self.data.len() as u64
    }
}
