//! Tests for request signing.
//!
//! The known-answer vectors were computed with an independent HMAC-SHA1
//! implementation over the documented canonical string.

use super::*;

const DATE: &str = "Wed, 01 Feb 2006 00:00:00 GMT";
const CONTENT_TYPE: &str = "text/plain";

fn signer_with_key(secret: &str) -> Signer {
    Signer::new(Credentials::new("AKID", secret).unwrap())
}

#[test]
fn test_known_answer_get_root() {
    let signer = signer_with_key("secretkey");

    let header = signer
        .authorization_header(Method::Get, "/", DATE, CONTENT_TYPE)
        .unwrap();

    assert_eq!(header, "AWS AKID:G9BcT4yBcaDq3WOkAdZT2ADpB6o=");
}

#[test]
fn test_known_answer_get_front_with_query() {
    let signer = signer_with_key("secretkey");

    let header = signer
        .authorization_header(
            Method::Get,
            "/A8G4MQ0QhFjhDfk3b9TcRb/testQueue/front?VisibilityTimeout=0&NumberOfMessages=255",
            DATE,
            CONTENT_TYPE,
        )
        .unwrap();

    assert_eq!(header, "AWS AKID:PkF8sOK/IuIQqmBjHPFDK/6ayrM=");
}

#[test]
fn test_known_answer_put_back() {
    let signer = signer_with_key("secretkey");

    let header = signer
        .authorization_header(
            Method::Put,
            "/A8G4MQ0QhFjhDfk3b9TcRb/testQueue/back",
            DATE,
            CONTENT_TYPE,
        )
        .unwrap();

    assert_eq!(header, "AWS AKID:GDOXfeCD6+z69WFQvEEFlQyaDlo=");
}

/// The query string never participates in the signature.
#[test]
fn test_query_string_is_stripped() {
    let signer = signer_with_key("secretkey");

    let bare = signer
        .authorization_header(Method::Get, "/", DATE, CONTENT_TYPE)
        .unwrap();
    let with_query = signer
        .authorization_header(Method::Get, "/?QueueNamePrefix=ab", DATE, CONTENT_TYPE)
        .unwrap();

    assert_eq!(bare, with_query);
}

/// Identical inputs always produce identical output.
#[test]
fn test_signing_is_deterministic() {
    let signer = signer_with_key("secretkey");

    let first = signer
        .authorization_header(Method::Delete, "/acct/q/id-1", DATE, CONTENT_TYPE)
        .unwrap();
    let second = signer
        .authorization_header(Method::Delete, "/acct/q/id-1", DATE, CONTENT_TYPE)
        .unwrap();

    assert_eq!(first, second);
}

/// Changing any single input changes the signature.
#[test]
fn test_each_input_affects_signature() {
    let signer = signer_with_key("secretkey");
    let base = signer
        .authorization_header(Method::Get, "/acct/q", DATE, CONTENT_TYPE)
        .unwrap();

    let other_method = signer
        .authorization_header(Method::Put, "/acct/q", DATE, CONTENT_TYPE)
        .unwrap();
    assert_ne!(base, other_method);

    let other_path = signer
        .authorization_header(Method::Get, "/acct/q2", DATE, CONTENT_TYPE)
        .unwrap();
    assert_ne!(base, other_path);

    let other_date = signer
        .authorization_header(
            Method::Get,
            "/acct/q",
            "Thu, 02 Feb 2006 00:00:00 GMT",
            CONTENT_TYPE,
        )
        .unwrap();
    assert_ne!(base, other_date);

    let other_key = signer_with_key("otherkey")
        .authorization_header(Method::Get, "/acct/q", DATE, CONTENT_TYPE)
        .unwrap();
    assert_ne!(base, other_key);
}

/// The header carries the key id and a base64 SHA-1 digest (20 bytes).
#[test]
fn test_header_shape() {
    let signer = signer_with_key("secretkey");

    let header = signer
        .authorization_header(Method::Get, "/", DATE, CONTENT_TYPE)
        .unwrap();

    let value = header.strip_prefix("AWS AKID:").unwrap();
    let digest = STANDARD.decode(value).unwrap();
    assert_eq!(digest.len(), 20);
}
