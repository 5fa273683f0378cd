use aws_smithy_runtime_api::client::result::SdkError;
use aws_smithy_types::error::display::DisplayErrorContext;
use aws_smithy_types::error::metadata::ProvideErrorMetadata;

use inventory_core::contract::ClassifiedError;

const AUTH_CODES: &[&str] = &[
    "AccessDenied",
    "AccessDeniedException",
    "AuthFailure",
    "UnauthorizedOperation",
    "UnrecognizedClientException",
    "InvalidClientTokenId",
    "ExpiredToken",
    "ExpiredTokenException",
    "SignatureDoesNotMatch",
    "MissingAuthenticationToken",
];

const THROTTLE_CODES: &[&str] = &[
    "Throttling",
    "ThrottlingException",
    "TooManyRequestsException",
    "RequestLimitExceeded",
    "RequestThrottled",
    "SlowDown",
    "PriorRequestNotComplete",
];

const NOT_AVAILABLE_CODES: &[&str] = &[
    "OptInRequired",
    "SubscriptionRequiredException",
    "UnsupportedOperation",
];

/// Funnels any SDK failure into the classified form attached to adapter
/// outcomes. Transport timeouts map to `Timeout`, unparseable responses to
/// `Malformed`, service error codes to their family; anything else is
/// `Unknown` with the backend message preserved verbatim.
pub fn classify_sdk_error<E, R>(err: SdkError<E, R>) -> ClassifiedError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + 'static,
{
    let is_timeout = matches!(&err, SdkError::TimeoutError(_))
        || matches!(&err, SdkError::DispatchFailure(failure) if failure.is_timeout());
    let is_response_parse = matches!(&err, SdkError::ResponseError(_));

    let code = err.code().map(str::to_string);
    let message = err.message().map(str::to_string);
    let rendered = format!("{}", DisplayErrorContext(err));

    if is_timeout {
        return ClassifiedError::Timeout(rendered);
    }
    if is_response_parse {
        return ClassifiedError::Malformed(rendered);
    }
    classify_code(code.as_deref().unwrap_or(""), message.unwrap_or(rendered))
}

/// Pure service-code classifier. `Unknown` keeps the message untouched so
/// the backend's own wording reaches diagnostics.
pub fn classify_code(code: &str, message: String) -> ClassifiedError {
    let detail = if code.is_empty() {
        message.clone()
    } else {
        format!("{code}: {message}")
    };

    if AUTH_CODES.contains(&code) {
        ClassifiedError::AuthFailure(detail)
    } else if THROTTLE_CODES.contains(&code) {
        ClassifiedError::Throttled(detail)
    } else if NOT_AVAILABLE_CODES.contains(&code) {
        ClassifiedError::NotAvailable(detail)
    } else {
        ClassifiedError::Unknown(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_denied_is_an_auth_failure() {
        let error = classify_code("AccessDenied", "not authorized to perform".to_string());
        assert!(matches!(error, ClassifiedError::AuthFailure(_)));
        assert_eq!(error.to_string(), "backend rejected credentials or permissions: AccessDenied: not authorized to perform");
    }

    #[test]
    fn throttling_family_is_classified_as_throttled() {
        for code in ["Throttling", "RequestLimitExceeded", "SlowDown"] {
            let error = classify_code(code, "rate exceeded".to_string());
            assert!(matches!(error, ClassifiedError::Throttled(_)), "{code}");
        }
    }

    #[test]
    fn opt_in_required_is_not_available() {
        let error = classify_code("OptInRequired", "region not opted in".to_string());
        assert!(matches!(error, ClassifiedError::NotAvailable(_)));
    }

    #[test]
    fn unrecognized_code_preserves_the_message_verbatim() {
        let error = classify_code(
            "InvalidParameterValue",
            "Value (x) for parameter y is invalid".to_string(),
        );
        assert_eq!(
            error,
            ClassifiedError::Unknown("Value (x) for parameter y is invalid".to_string())
        );
    }

    #[test]
    fn missing_code_is_unknown() {
        let error = classify_code("", "connection reset by peer".to_string());
        assert_eq!(
            error,
            ClassifiedError::Unknown("connection reset by peer".to_string())
        );
    }
}
