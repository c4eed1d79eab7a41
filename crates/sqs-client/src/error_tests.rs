//! Tests for error types.

use super::*;

#[test]
fn test_not_found_detection() {
    assert!(SqsError::Service {
        code: "404".to_string(),
        message: "Not Found".to_string(),
    }
    .is_not_found());

    assert!(!SqsError::Service {
        code: "400".to_string(),
        message: "Bad Request".to_string(),
    }
    .is_not_found());

    assert!(!SqsError::QueueNotFound {
        name: "test".to_string(),
    }
    .is_not_found());
}

#[test]
fn test_client_error_range() {
    for code in ["400", "404", "403", "499"] {
        assert!(SqsError::Service {
            code: code.to_string(),
            message: String::new(),
        }
        .is_client_error());
    }

    for code in ["399", "500", "503", "200"] {
        assert!(!SqsError::Service {
            code: code.to_string(),
            message: String::new(),
        }
        .is_client_error());
    }

    // Symbolic codes from embedded <Error> elements never match the range.
    assert!(!SqsError::Service {
        code: "AWS.SimpleQueueService.NonExistentQueue".to_string(),
        message: "Queue does not exist".to_string(),
    }
    .is_client_error());

    assert!(!SqsError::Transport {
        message: "connection refused".to_string(),
    }
    .is_client_error());
}

#[test]
fn test_error_display() {
    let err = SqsError::Service {
        code: "AccessDenied".to_string(),
        message: "Access to the resource is denied".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Service error AccessDenied: Access to the resource is denied"
    );

    let err = SqsError::QueueNotFound {
        name: "mytestqueue".to_string(),
    };
    assert_eq!(err.to_string(), "Found no queue named 'mytestqueue'");

    let err = SqsError::Configuration {
        message: "env variable $AMAZON_SECRET_ACCESS_KEY is not set".to_string(),
    };
    assert!(err.to_string().starts_with("Configuration error:"));
}
