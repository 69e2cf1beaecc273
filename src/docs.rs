use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::resources::controller::retrieve_public_info,
        crate::modules::resources::controller::retrieve_secret_info,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Resources", description = "Read-only informational resources")
    ),
    info(
        title = "Doe Resource Server",
        version = "0.1.0",
        description = "OAuth2 resource server exposing read-only resources behind RSA-signed bearer tokens.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
