//! End-to-end tests for the sqs-client-cli binary.

use assert_cmd::Command;
use predicates::prelude::*;
use sqs_client::config::{ENV_ACCESS_KEY_ID, ENV_SECRET_ACCESS_KEY};
use wiremock::matchers::{body_string, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// The binary with a clean credential environment.
fn cli() -> Command {
    let mut cmd = Command::cargo_bin("sqs-client-cli").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove(ENV_ACCESS_KEY_ID)
        .env_remove(ENV_SECRET_ACCESS_KEY);
    cmd
}

/// The binary pointed at a mock server, with credentials set.
fn cli_against(server: &MockServer) -> Command {
    let mut cmd = cli();
    cmd.env(ENV_ACCESS_KEY_ID, "AKID")
        .env(ENV_SECRET_ACCESS_KEY, "secretkey")
        .args(["-H", &server.address().to_string(), "--no-https"]);
    cmd
}

// ============================================================================
// Argument surface
// ============================================================================

/// Verify the help text names the commands and their short aliases.
#[test]
fn test_help_lists_commands() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list-queues")
                .and(predicate::str::contains("put-message"))
                .and(predicate::str::contains("flush-queue"))
                .and(predicate::str::contains("lq"))
                .and(predicate::str::contains("pm")),
        );
}

#[test]
fn test_version_flag() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

/// Verify an unknown subcommand is a usage error.
#[test]
fn test_unknown_subcommand() {
    cli().arg("frobnicate").assert().failure().code(2);
}

/// Verify delete-message rejects a missing message id at parse time.
#[test]
fn test_delete_message_missing_id_is_usage_error() {
    cli()
        .args(["delete-message", "testQueue"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("MESSAGE_ID"));
}

// ============================================================================
// Credential handling
// ============================================================================

/// Verify missing credentials exit with the configuration code before any
/// network traffic.
#[test]
fn test_missing_credentials_exit_code() {
    cli()
        .arg("list-queues")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("AMAZON_ACCESS_KEY_ID"));
}

// ============================================================================
// End-to-end against a scripted server
// ============================================================================

/// Verify list-queues prints one queue name per line.
#[tokio::test(flavor = "multi_thread")]
async fn test_list_queues_text_output() {
    // Arrange
    let server = MockServer::start().await;
    let host = server.address().to_string();
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "<ListQueuesResponse>\
             <QueueUrl>http://{host}/A8G4MQ0QhFjhDfk3b9TcRb/abcFoo</QueueUrl>\
             <QueueUrl>http://{host}/A8G4MQ0QhFjhDfk3b9TcRb/abcBar</QueueUrl>\
             </ListQueuesResponse>"
        )))
        .mount(&server)
        .await;

    // Act / Assert
    cli_against(&server)
        .arg("list-queues")
        .assert()
        .success()
        .stdout(predicate::str::diff("abcFoo\nabcBar\n"));
}

/// Verify the JSON output carries the queue fields.
#[tokio::test(flavor = "multi_thread")]
async fn test_list_queues_json_output() {
    // Arrange
    let server = MockServer::start().await;
    let host = server.address().to_string();
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("QueueNamePrefix", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "<ListQueuesResponse>\
             <QueueUrl>http://{host}/A8G4MQ0QhFjhDfk3b9TcRb/abcFoo</QueueUrl>\
             </ListQueuesResponse>"
        )))
        .mount(&server)
        .await;

    // Act / Assert
    cli_against(&server)
        .args(["--format", "json", "list-queues", "abc"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"name\": \"abcFoo\"")
                .and(predicate::str::contains("\"path\": \"/A8G4MQ0QhFjhDfk3b9TcRb/abcFoo\"")),
        );
}

/// Verify put-message reads the body from stdin, encodes it when asked,
/// and prints the assigned id.
#[tokio::test(flavor = "multi_thread")]
async fn test_put_message_from_stdin_with_base64() {
    // Arrange: "hello queue" base64-encoded, trailing newline stripped.
    let server = MockServer::start().await;
    let host = server.address().to_string();
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("QueueNamePrefix", "testQueue"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "<ListQueuesResponse>\
             <QueueUrl>http://{host}/A8G4MQ0QhFjhDfk3b9TcRb/testQueue</QueueUrl>\
             </ListQueuesResponse>"
        )))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/A8G4MQ0QhFjhDfk3b9TcRb/testQueue/back"))
        .and(body_string("aGVsbG8gcXVldWU="))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<SendMessageResponse><MessageId>msg-1</MessageId></SendMessageResponse>",
        ))
        .mount(&server)
        .await;

    // Act / Assert
    cli_against(&server)
        .args(["-b", "put-message", "testQueue"])
        .write_stdin("hello queue\n")
        .assert()
        .success()
        .stdout(predicate::str::diff("msg-1\n"));
}

/// Verify get-message with an id prints the decoded body.
#[tokio::test(flavor = "multi_thread")]
async fn test_get_message_decodes_body() {
    // Arrange
    let server = MockServer::start().await;
    let host = server.address().to_string();
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "<ListQueuesResponse>\
             <QueueUrl>http://{host}/A8G4MQ0QhFjhDfk3b9TcRb/testQueue</QueueUrl>\
             </ListQueuesResponse>"
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/A8G4MQ0QhFjhDfk3b9TcRb/testQueue/msg-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<ReceiveMessageResponse><Message>\
             <MessageId>msg-1</MessageId>\
             <MessageBody>aGVsbG8gcXVldWU=</MessageBody>\
             </Message></ReceiveMessageResponse>",
        ))
        .mount(&server)
        .await;

    // Act / Assert
    cli_against(&server)
        .args(["-b", "get-message", "testQueue", "msg-1"])
        .assert()
        .success()
        .stdout(predicate::str::diff("hello queue\n"));
}

/// Verify a service failure surfaces with the library exit code.
#[tokio::test(flavor = "multi_thread")]
async fn test_service_error_exit_code() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    // Act / Assert
    cli_against(&server)
        .arg("list-queues")
        .assert()
        .failure()
        .code(2);
}
