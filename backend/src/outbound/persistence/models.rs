//! Internal Diesel row structs and their conversion to domain types.
//!
//! Rows select the safe profile projection only; credentials never leave the
//! database.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use tracing::warn;
use uuid::Uuid;

use crate::domain::{ConnectionRequest, ConnectionStatus, Gender, UserId, UserProfile};

use super::schema::{connection_requests, users};

/// Safe-field projection of the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProfileRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: Option<String>,
    pub photo_url: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub about: Option<String>,
    pub skills: Vec<String>,
}

impl From<ProfileRow> for UserProfile {
    fn from(row: ProfileRow) -> Self {
        let age = row.age.and_then(|age| match u8::try_from(age) {
            Ok(age) => Some(age),
            Err(_) => {
                warn!(user_id = %row.id, age, "age out of range, omitting");
                None
            }
        });
        let gender = row.gender.as_deref().and_then(|raw| match raw.parse::<Gender>() {
            Ok(gender) => Some(gender),
            Err(err) => {
                warn!(user_id = %row.id, value = %err.0, "unrecognised gender, omitting");
                None
            }
        });

        Self {
            id: UserId::from_uuid(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            photo_url: row.photo_url,
            age,
            gender,
            about: row.about,
            skills: row.skills,
        }
    }
}

/// Row struct for reading from the connection_requests table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = connection_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ConnectionRequestRow {
    pub id: Uuid,
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ConnectionRequestRow> for ConnectionRequest {
    type Error = String;

    fn try_from(row: ConnectionRequestRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<ConnectionStatus>()
            .map_err(|err| format!("request {} has unknown status {:?}", row.id, err.0))?;
        Ok(Self {
            id: row.id,
            from_user_id: UserId::from_uuid(row.from_user_id),
            to_user_id: UserId::from_uuid(row.to_user_id),
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn profile_row() -> ProfileRow {
        ProfileRow {
            id: Uuid::new_v4(),
            first_name: "Ada".into(),
            last_name: Some("Lovelace".into()),
            photo_url: None,
            age: Some(36),
            gender: Some("female".into()),
            about: None,
            skills: vec!["analysis".into()],
        }
    }

    #[rstest]
    fn profile_row_converts_safe_fields(profile_row: ProfileRow) {
        let id = profile_row.id;
        let profile = UserProfile::from(profile_row);

        assert_eq!(profile.id.as_uuid(), &id);
        assert_eq!(profile.first_name, "Ada");
        assert_eq!(profile.age, Some(36));
        assert_eq!(profile.gender, Some(Gender::Female));
        assert_eq!(profile.skills, vec!["analysis".to_owned()]);
    }

    #[rstest]
    #[case(Some(-1), Some("robot"))]
    #[case(Some(300), Some(""))]
    fn out_of_range_values_are_omitted(
        mut profile_row: ProfileRow,
        #[case] age: Option<i32>,
        #[case] gender: Option<&str>,
    ) {
        profile_row.age = age;
        profile_row.gender = gender.map(str::to_owned);
        let profile = UserProfile::from(profile_row);

        assert_eq!(profile.age, None);
        assert_eq!(profile.gender, None);
    }

    #[rstest]
    fn request_row_with_unknown_status_is_rejected() {
        let now = Utc::now();
        let row = ConnectionRequestRow {
            id: Uuid::new_v4(),
            from_user_id: Uuid::new_v4(),
            to_user_id: Uuid::new_v4(),
            status: "ignored".into(),
            created_at: now,
            updated_at: now,
        };

        let err = ConnectionRequest::try_from(row).expect_err("unknown status");
        assert!(err.contains("ignored"));
    }

    #[rstest]
    fn request_row_converts_status() {
        let now = Utc::now();
        let (from, to) = (Uuid::new_v4(), Uuid::new_v4());
        let row = ConnectionRequestRow {
            id: Uuid::new_v4(),
            from_user_id: from,
            to_user_id: to,
            status: "accepted".into(),
            created_at: now,
            updated_at: now,
        };

        let request = ConnectionRequest::try_from(row).expect("valid row");
        assert_eq!(request.status, ConnectionStatus::Accepted);
        assert_eq!(request.from_user_id.as_uuid(), &from);
        assert_eq!(request.to_user_id.as_uuid(), &to);
    }
}
