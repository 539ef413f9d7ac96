use std::fmt;
use std::fmt::Display;
use std::str::FromStr;

use http::status::StatusCode;
use leptos::prelude::*;
use leptos::{component, view, IntoView};
use leptos::server_fn::codec::JsonEncoding;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::icons::{InternalErrorIcon, InvalidRequestIcon, NetworkErrorIcon, NotFoundIcon};

const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong.";
const BAD_REQUEST_MESSAGE: &str = "Sorry, we didn't understand your request.";
const UNAVAILABLE_MESSAGE: &str = "Sorry, we've got noise on the line.";
const NOT_FOUND_MESSAGE: &str = "There's nothing here";

#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppError {
    CommunicationError(ServerFnErrorErr),
    InvalidPageRequest(String),
    InternalServerError(String),
    NotFound,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::CommunicationError(error) => match error {
                ServerFnErrorErr::Args(_) | ServerFnErrorErr::MissingArg(_) | ServerFnErrorErr::Serialization(_) | ServerFnErrorErr::Deserialization(_) => StatusCode::BAD_REQUEST,
                ServerFnErrorErr::Registration(_) | ServerFnErrorErr::Request(_) | ServerFnErrorErr::Response(_) => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::InvalidPageRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            AppError::CommunicationError(error) => match error {
                ServerFnErrorErr::Args(_) | ServerFnErrorErr::MissingArg(_) |
                ServerFnErrorErr::Serialization(_) | ServerFnErrorErr::Deserialization(_) => String::from(BAD_REQUEST_MESSAGE),
                ServerFnErrorErr::Registration(_) | ServerFnErrorErr::Request(_) | ServerFnErrorErr::Response(_) => String::from(UNAVAILABLE_MESSAGE),
                _ => String::from(INTERNAL_ERROR_MESSAGE),
            },
            AppError::InvalidPageRequest(_) => String::from(BAD_REQUEST_MESSAGE),
            AppError::InternalServerError(_) => String::from(INTERNAL_ERROR_MESSAGE),
            AppError::NotFound => String::from(NOT_FOUND_MESSAGE),
        }
    }

    /// Constructs a new [`AppError::InternalServerError`] from some other type.
    pub fn new(msg: impl ToString) -> Self {
        Self::InternalServerError(msg.to_string())
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", serde_json::to_string(self).unwrap_or_default())
    }
}

impl FromStr for AppError {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}

impl FromServerFnError for AppError {
    type Encoder = JsonEncoding;

    fn from_server_fn_error(error: ServerFnErrorErr) -> Self {
        match error {
            ServerFnErrorErr::ServerError(message) => serde_json::from_str(message.as_str()).unwrap_or(AppError::InternalServerError(message.clone())),
            _ => AppError::CommunicationError(error),
        }
    }
}

#[component]
pub fn AppErrorIcon(
    app_error: AppError,
) -> impl IntoView {
    match app_error {
        AppError::CommunicationError(error) => match error {
            ServerFnErrorErr::Args(_) | ServerFnErrorErr::MissingArg(_) => view! { <InvalidRequestIcon/> }.into_any(),
            ServerFnErrorErr::Registration(_) | ServerFnErrorErr::Request(_) | ServerFnErrorErr::Response(_) => view! { <NetworkErrorIcon/> }.into_any(),
            _ => view! { <InternalErrorIcon/> }.into_any(),
        },
        AppError::InvalidPageRequest(_) => view! { <InvalidRequestIcon/> }.into_any(),
        AppError::InternalServerError(_) => view! { <InternalErrorIcon/> }.into_any(),
        AppError::NotFound => view! { <NotFoundIcon/> }.into_any(),
    }
}

/// Displays an error
#[component]
pub fn ErrorDisplay(
    error: AppError
) -> impl IntoView {
    let error_string = error.to_string();
    let status_code =  error.status_code().as_u16();
    let user_message = error.user_message();

    log::error!("Caught error, status_code: {status_code}, error message: {error_string}");
    view! {
        <div class="w-full flex items-center gap-2 justify-center">
            <AppErrorIcon app_error=error/>
            <div class="flex flex-col">
                <h2 class="text-2xl">{status_code}</h2>
                <h3 class="text-xl">{user_message}</h3>
            </div>
        </div>
    }.into_any()
}

#[cfg(test)]
mod tests {
    use crate::errors::{AppError, BAD_REQUEST_MESSAGE, INTERNAL_ERROR_MESSAGE, NOT_FOUND_MESSAGE, UNAVAILABLE_MESSAGE};
    use http::StatusCode;
    use leptos::prelude::{FromServerFnError, ServerFnErrorErr};
    use std::str::FromStr;

    #[test]
    fn test_app_error_status_code() {
        let test_string = String::from("test");
        let server_fn_error = ServerFnErrorErr::ServerError(String::from("test"));
        let args_error = ServerFnErrorErr::Args(String::from("test"));
        let request_error = ServerFnErrorErr::Request(String::from("test"));
        let deserialization_error = ServerFnErrorErr::Deserialization(String::from("test"));
        assert_eq!(AppError::CommunicationError(server_fn_error).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(AppError::CommunicationError(args_error).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::CommunicationError(deserialization_error).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::CommunicationError(request_error).status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(AppError::InvalidPageRequest(test_string.clone()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InternalServerError(test_string.clone()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_app_error_user_message() {
        let test_string = String::from("test");
        let server_fn_error = ServerFnErrorErr::ServerError(String::from("test"));
        let missing_arg_error = ServerFnErrorErr::MissingArg(String::from("test"));
        let response_error = ServerFnErrorErr::Response(String::from("test"));
        assert_eq!(AppError::CommunicationError(server_fn_error).user_message(), String::from(INTERNAL_ERROR_MESSAGE));
        assert_eq!(AppError::CommunicationError(missing_arg_error).user_message(), String::from(BAD_REQUEST_MESSAGE));
        assert_eq!(AppError::CommunicationError(response_error).user_message(), String::from(UNAVAILABLE_MESSAGE));
        assert_eq!(AppError::InvalidPageRequest(test_string.clone()).user_message(), String::from(BAD_REQUEST_MESSAGE));
        assert_eq!(AppError::InternalServerError(test_string).user_message(), String::from(INTERNAL_ERROR_MESSAGE));
        assert_eq!(AppError::NotFound.user_message(), String::from(NOT_FOUND_MESSAGE));
    }

    #[test]
    fn test_app_error_new() {
        let test_str = "test";
        assert_eq!(AppError::new(test_str), AppError::InternalServerError(String::from(test_str)));
    }

    #[test]
    fn test_app_error_display_and_from_string() {
        let test_string = String::from("test");
        let server_fn_error = ServerFnErrorErr::MissingArg(test_string.clone());
        assert_eq!(
            AppError::from_str(AppError::CommunicationError(server_fn_error.clone()).to_string().as_str()).expect("AppError should be convert to string and back"),
            AppError::CommunicationError(server_fn_error)
        );
        assert_eq!(
            AppError::from_str(AppError::InvalidPageRequest(test_string.clone()).to_string().as_str()).expect("AppError should be convert to string and back"),
            AppError::InvalidPageRequest(test_string.clone())
        );
        assert_eq!(
            AppError::from_str(AppError::NotFound.to_string().as_str()).expect("AppError should be convert to string and back"),
            AppError::NotFound
        );
        assert!(AppError::from_str("invalid").is_err());
    }

    #[test]
    fn test_app_error_from_server_fn_error() {
        let serialized = AppError::InvalidPageRequest(String::from("limit")).to_string();
        assert_eq!(
            AppError::from_server_fn_error(ServerFnErrorErr::ServerError(serialized)),
            AppError::InvalidPageRequest(String::from("limit"))
        );
        assert_eq!(
            AppError::from_server_fn_error(ServerFnErrorErr::ServerError(String::from("raw"))),
            AppError::InternalServerError(String::from("raw"))
        );
        assert_eq!(
            AppError::from_server_fn_error(ServerFnErrorErr::Request(String::from("offline"))),
            AppError::CommunicationError(ServerFnErrorErr::Request(String::from("offline")))
        );
    }
}
