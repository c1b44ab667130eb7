use axum::{
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use hypertext::Rendered;

pub fn bad_request(html: Rendered<String>) -> StandardResponse {
    Err(FailureResponse::BadRequest(html))
}

pub fn server_error(html: Rendered<String>) -> StandardResponse {
    Err(FailureResponse::ServerError(html))
}

pub fn success(html: Rendered<String>) -> StandardResponse {
    Ok(SuccessResponse::Success(html))
}

pub fn download(
    file_name: &'static str,
    content_type: &'static str,
    bytes: Vec<u8>,
) -> StandardResponse {
    Ok(SuccessResponse::Download {
        file_name,
        content_type,
        bytes,
    })
}

pub type StandardResponse = Result<SuccessResponse, FailureResponse>;

#[derive(Debug)]
pub enum SuccessResponse {
    Success(Rendered<String>),
    Download {
        file_name: &'static str,
        content_type: &'static str,
        bytes: Vec<u8>,
    },
}

#[derive(Debug)]
pub enum FailureResponse {
    BadRequest(Rendered<String>),
    ServerError(Rendered<String>),
}

impl IntoResponse for SuccessResponse {
    fn into_response(self) -> Response {
        match self {
            SuccessResponse::Success(html) => {
                Html(html.into_inner()).into_response()
            }
            SuccessResponse::Download {
                file_name,
                content_type,
                bytes,
            } => (
                [
                    (header::CONTENT_TYPE, content_type.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{file_name}\""),
                    ),
                ],
                bytes,
            )
                .into_response(),
        }
    }
}

impl IntoResponse for FailureResponse {
    fn into_response(self) -> Response {
        let (status, html) = match self {
            FailureResponse::BadRequest(html) => (StatusCode::BAD_REQUEST, html),
            FailureResponse::ServerError(html) => {
                (StatusCode::INTERNAL_SERVER_ERROR, html)
            }
        };
        (status, Html(html.into_inner())).into_response()
    }
}
