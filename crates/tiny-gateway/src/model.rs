use serde::{Deserialize, Serialize};

/// Form body of `POST /api/tiny`. An empty `id` asks for a generated one.
#[derive(Debug, Default, Deserialize)]
pub struct CreateForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub url: String,
}

/// Form body of `POST /api/tiny/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateForm {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    pub const OK: Self = Self { status: "ok" };
}
