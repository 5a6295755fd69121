use crate::utils::error::AppError;
use crate::utils::jwt::AuthenticatedUser;
use indexmap::IndexMap;
use okapi::openapi3::SchemaObject;
use rocket_okapi::gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::RefOr;
use rocket_okapi::okapi::openapi3::{MediaType, Response, Responses};
use rocket_okapi::request::{OpenApiFromRequest, RequestHeaderInput};
use rocket_okapi::response::OpenApiResponderInner;
use rocket_okapi::swagger_ui::SwaggerUIConfig;

pub fn swagger_ui() -> SwaggerUIConfig {
    SwaggerUIConfig {
        url: "/api/openapi.json".to_string(),
        ..Default::default()
    }
}

// Documented example for one error status, rendered exactly as the responder sends it
fn error_response(description: &str, example: AppError) -> RefOr<Response> {
    let mut content = IndexMap::new();
    content.insert(
        "application/json".to_string(),
        MediaType {
            schema: Some(SchemaObject::default()),
            example: Some(example.body()),
            ..Default::default()
        },
    );
    RefOr::Object(Response {
        description: description.to_string(),
        content,
        ..Default::default()
    })
}

impl OpenApiResponderInner for AppError {
    fn responses(_gen: &mut OpenApiGenerator) -> rocket_okapi::Result<Responses> {
        let examples = [
            ("Invalid input", AppError::ValidationError("Expected 2 passengers, got 1".into())),
            ("Missing or expired token", AppError::AuthError("Missing bearer token".into())),
            ("Unknown or foreign resource", AppError::NotFound("Booking not found".into())),
            ("State conflict", AppError::Conflict("Booking is cancelled and cannot be paid".into())),
            ("Malformed body", AppError::Unprocessable("Malformed request body".into())),
            ("Storage failure", AppError::DatabaseError("connection refused".into())),
        ];

        let mut responses = Responses::default();
        for (description, example) in examples {
            responses.responses.insert(
                example.status().code.to_string(),
                error_response(description, example),
            );
        }
        Ok(responses)
    }
}

// The bearer token is read from the Authorization header; nothing to add to the operation.
impl<'a> OpenApiFromRequest<'a> for AuthenticatedUser {
    fn from_request_input(
        _gen: &mut OpenApiGenerator,
        _name: String,
        _required: bool,
    ) -> rocket_okapi::Result<RequestHeaderInput> {
        Ok(RequestHeaderInput::None)
    }
}
