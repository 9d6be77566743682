use crate::api::handlers::{health, signup};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "matricola",
        description = "Enrollment-based account signup service",
    ),
    paths(
        health::health,
        signup::initiate_signup,
        signup::complete_signup,
    ),
    components(schemas(
        signup::InitiateSignupRequest,
        signup::CompleteSignupRequest,
        signup::MessageResponse,
        signup::ErrorResponse,
    )),
    tags(
        (name = "signup", description = "Enrollment verification and account creation"),
        (name = "health", description = "Service health")
    )
)]
struct ApiDoc;

/// `OpenAPI` document for the served routes.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_signup_paths() {
        let doc = openapi();
        assert!(doc.paths.paths.contains_key("/functions/initiate-signup"));
        assert!(doc.paths.paths.contains_key("/functions/complete-signup"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
