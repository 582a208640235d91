use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub email: String,
    pub company_name: String,
    #[serde(skip_serializing, default)]
    pub password: String,
}
