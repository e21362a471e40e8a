use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct User {
    pub username: String,
    #[serde(rename = "_id")]
    pub user_id: Uuid,
}

impl User {
    pub fn new(username: String) -> Self {
        Self {
            username,
            user_id: Uuid::new_v4(),
        }
    }
}
