//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the connection and discovery endpoints, the health
//! probes, the schema wrappers from `inbound::http::schemas` and the session
//! cookie security scheme. Swagger UI serves it in debug builds and the
//! `openapi-dump` binary prints it for tooling.

use crate::inbound::http::schemas::{
    ConnectionBadgeSchema, ConnectionStatusSchema, ErrorCodeSchema, ErrorSchema,
    ExploreEntrySchema, ExploreResponseSchema, GenderSchema, ProfilesResponseSchema,
    ReceivedRequestSchema, ReceivedRequestsResponseSchema, UserProfileSchema,
};
use crate::inbound::http::session_config::SESSION_COOKIE_NAME;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Session cookie issued by the account service at login.",
            ))),
        );
    }
}

/// OpenAPI document for the connection feed API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Connection feed API",
        description = "Read-only views over a user's connection requests, connections and discovery lists.",
        license(
            name = "ISC",
            url = "https://opensource.org/license/isc-license-txt"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::connections::received_requests,
        crate::inbound::http::connections::connections,
        crate::inbound::http::connections::explore,
        crate::inbound::http::connections::feed,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        GenderSchema,
        UserProfileSchema,
        ConnectionStatusSchema,
        ReceivedRequestSchema,
        ConnectionBadgeSchema,
        ExploreEntrySchema,
        ReceivedRequestsResponseSchema,
        ProfilesResponseSchema,
        ExploreResponseSchema,
    )),
    tags(
        (name = "connections", description = "Requests and established connections"),
        (name = "discovery", description = "Explore list and feed"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn object_fields(doc: &utoipa::openapi::OpenApi, name: &str) -> Vec<String> {
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(name).expect("schema registered") {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected object schema for {name}"),
        }
    }

    #[rstest]
    #[case("/user/requests/received")]
    #[case("/user/connections")]
    #[case("/explore")]
    #[case("/feed")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn profile_schema_exposes_safe_fields_only() {
        let fields = object_fields(&ApiDoc::openapi(), "UserProfile");
        for field in ["_id", "firstName", "lastName", "photoUrl", "age", "gender", "about", "skills"] {
            assert!(fields.iter().any(|f| f == field), "missing {field}");
        }
        assert!(!fields.iter().any(|f| f == "email" || f == "password"));
    }

    #[rstest]
    fn error_schema_has_code_and_message() {
        let fields = object_fields(&ApiDoc::openapi(), "Error");
        assert!(fields.iter().any(|f| f == "code"));
        assert!(fields.iter().any(|f| f == "message"));
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
