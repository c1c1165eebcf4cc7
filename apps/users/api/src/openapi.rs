use utoipa::OpenApi;

/// Service-level metadata; paths come from the domain documents.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users Service",
        version = "1.0.0",
        description = "Resource for managing Users",
        contact(
            name = "Eric Lau",
            email = "eric.devtt@gmail.com",
            url = "https://github.com/EricLau1"
        ),
        license(name = "MIT", url = "http://mit.org")
    ),
    components(schemas(axum_helpers::ErrorResponse))
)]
struct ServiceInfo;

/// Document served at `/apidocs.json`.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = ServiceInfo::openapi();
        doc.merge(domain_users::handlers::ApiDoc::openapi());
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_carries_service_info_and_user_paths() {
        let doc = ApiDoc::openapi();

        assert_eq!(doc.info.title, "Users Service");
        assert_eq!(doc.info.version, "1.0.0");
        assert_eq!(
            doc.info.license.as_ref().map(|l| l.name.as_str()),
            Some("MIT")
        );
        assert!(doc.paths.paths.contains_key("/v1/users"));
        assert!(doc.paths.paths.contains_key("/v1/users/{id}/password"));

        let tags = doc.tags.unwrap_or_default();
        assert!(tags.iter().any(|t| t.name == "users"));
    }
}
