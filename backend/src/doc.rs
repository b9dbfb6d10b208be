//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every user record route and the health probes,
//! together with the schema wrappers from
//! [`crate::inbound::http::schemas`]. The document is served by Swagger UI
//! at `/api-docs` and printed by the `openapi-dump` binary.

use crate::inbound::http::schemas::{
    ErrorMessageSchema, FieldErrorSchema, NewUserSchema, UserPatchSchema, UserSchema,
    ValidationFailureSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User service API",
        description = "Create, read, update, delete and list user records."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        NewUserSchema,
        UserPatchSchema,
        ErrorMessageSchema,
        FieldErrorSchema,
        ValidationFailureSchema
    )),
    tags(
        (name = "users", description = "User record management"),
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

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/v1/users")]
    #[case("/v1/users/{id}")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn document_lists_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn user_schema_has_record_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let user = schemas.get("User").expect("User schema");
        for field in ["id", "name", "email", "age"] {
            assert_object_schema_has_field(user, field);
        }
    }

    #[rstest]
    fn validation_failure_schema_has_details() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let failure = schemas
            .get("ValidationFailure")
            .expect("ValidationFailure schema");
        assert_object_schema_has_field(failure, "message");
        assert_object_schema_has_field(failure, "details");
    }
}
