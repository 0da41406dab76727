//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`; these wrappers mirror their wire
//! shape so the adapter layer owns the framework dependency. They derive
//! `Serialize` only so utoipa can read the serde renames.

use serde::Serialize;
use utoipa::ToSchema;

/// Stable machine-readable error codes.
#[derive(Serialize, ToSchema)]
#[schema(as = ErrorCode)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCodeSchema {
    /// The request failed, including failed store queries.
    InvalidRequest,
    /// No valid session.
    Unauthorized,
    /// Unexpected server failure.
    InternalError,
}

/// Error payload returned by every endpoint.
#[derive(Serialize, ToSchema)]
#[schema(as = Error)]
#[serde(rename_all = "camelCase")]
pub struct ErrorSchema {
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    #[schema(example = "relation \"users\" does not exist")]
    message: String,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    details: Option<serde_json::Value>,
}

/// Self-described gender.
#[derive(Serialize, ToSchema)]
#[schema(as = Gender)]
#[serde(rename_all = "lowercase")]
pub enum GenderSchema {
    Male,
    Female,
    Other,
}

/// Safe-field projection of a user.
#[derive(Serialize, ToSchema)]
#[schema(as = UserProfile)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileSchema {
    #[serde(rename = "_id")]
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: uuid::Uuid,
    #[schema(example = "Ada")]
    first_name: String,
    #[schema(example = "Lovelace")]
    last_name: Option<String>,
    photo_url: Option<String>,
    #[schema(minimum = 0, maximum = 255)]
    age: Option<u8>,
    gender: Option<GenderSchema>,
    about: Option<String>,
    skills: Vec<String>,
}

/// Connection request status.
#[derive(Serialize, ToSchema)]
#[schema(as = ConnectionStatus)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatusSchema {
    Requested,
    Interested,
    Accepted,
    Rejected,
}

/// Pending request with the requester's profile joined in.
#[derive(Serialize, ToSchema)]
#[schema(as = ReceivedRequest)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedRequestSchema {
    #[serde(rename = "_id")]
    id: uuid::Uuid,
    /// `null` when the requester has no stored profile.
    from_user_id: Option<UserProfileSchema>,
    to_user_id: uuid::Uuid,
    status: ConnectionStatusSchema,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

/// Explore badge.
#[derive(Serialize, ToSchema)]
#[schema(as = ConnectionBadge)]
#[serde(rename_all = "camelCase")]
pub enum ConnectionBadgeSchema {
    Connected,
    NotConnected,
}

/// Explore entry: profile fields plus a badge.
#[derive(Serialize, ToSchema)]
#[schema(as = ExploreEntry)]
pub struct ExploreEntrySchema {
    #[serde(flatten)]
    profile: UserProfileSchema,
    status: ConnectionBadgeSchema,
}

/// Body of `GET /user/requests/received`.
#[derive(Serialize, ToSchema)]
#[schema(as = ReceivedRequestsResponse)]
pub struct ReceivedRequestsResponseSchema {
    #[schema(example = "Data fetched successfully")]
    message: String,
    data: Vec<ReceivedRequestSchema>,
}

/// Body of `GET /user/connections` and `GET /feed`.
#[derive(Serialize, ToSchema)]
#[schema(as = ProfilesResponse)]
pub struct ProfilesResponseSchema {
    data: Vec<UserProfileSchema>,
}

/// Body of `GET /explore`.
#[derive(Serialize, ToSchema)]
#[schema(as = ExploreResponse)]
pub struct ExploreResponseSchema {
    data: Vec<ExploreEntrySchema>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn profile_schema_uses_wire_field_names() {
        assert_eq!(UserProfileSchema::name(), "UserProfile");
        let json = schema_json::<UserProfileSchema>();
        for field in ["_id", "firstName", "photoUrl", "skills"] {
            assert!(json.contains(field), "missing {field}");
        }
        assert!(!json.contains("email"));
    }

    #[test]
    fn badge_schema_lists_both_states() {
        let json = schema_json::<ConnectionBadgeSchema>();
        assert!(json.contains("connected"));
        assert!(json.contains("notConnected"));
    }

    #[test]
    fn error_code_schema_matches_domain_codes() {
        let json = schema_json::<ErrorCodeSchema>();
        for code in ["invalid_request", "unauthorized", "internal_error"] {
            assert!(json.contains(code), "missing {code}");
        }
    }
}
