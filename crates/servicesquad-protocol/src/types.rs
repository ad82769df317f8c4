use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Authenticated volunteer as returned by `/login`, `/signup` and `/check_session`.
///
/// Only `id` and `username` are interpreted by the client. Every other field the
/// backend sends is kept in `profile` so the value round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    pub id: i64,
    pub username: String,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl UserData {
    /// Look up a profile field the backend attached, e.g. `first_name`.
    pub fn profile_str(&self, key: &str) -> Option<&str> {
        self.profile.get(key).and_then(Value::as_str)
    }
}

/// Organization listing entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationData {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub opportunities: Vec<OpportunityData>,
}

/// Volunteering opportunity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityData {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub remote_or_online: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub dates: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub organization_id: Option<i64>,
}

/// Error payload the backend attaches to non-2xx responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_keeps_unknown_fields() {
        let body = json!({
            "id": 7,
            "username": "volunteer7",
            "first_name": "Ada",
            "hours_wanted": 12
        });

        let user: UserData = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.profile_str("first_name"), Some("Ada"));
        assert_eq!(serde_json::to_value(&user).unwrap(), body);
    }

    #[test]
    fn organization_tolerates_missing_fields() {
        let org: OrganizationData = serde_json::from_value(json!({
            "id": 3,
            "name": "Food Bank",
            "opportunities": [{ "id": 9, "title": "Sort donations" }]
        }))
        .unwrap();

        assert_eq!(org.website, None);
        assert_eq!(org.opportunities.len(), 1);
        assert_eq!(org.opportunities[0].title, "Sort donations");
    }
}
