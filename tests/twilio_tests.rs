use std::time::Duration;

use farewatch::adapter::twilio::{Channel, TwilioConfig, TwilioCredentials, TwilioSender};
use farewatch::error::NotifyError;
use farewatch::infrastructure::config::http::HttpConfig;
use farewatch::port::MessageSender;
use farewatch::testkit::http::{StubResponse, StubServer};
use tokio_test::{assert_err, assert_ok};

fn credentials() -> TwilioCredentials {
    TwilioCredentials {
        account_sid: "AC123".into(),
        auth_token: "secret".into(),
        from: "+14155238886".into(),
        to: "+595981000000".into(),
    }
}

fn sender(server: &StubServer, channel: Channel, timeout_ms: u64) -> TwilioSender {
    let config = TwilioConfig {
        base_url: server.url(),
        channel,
        http: HttpConfig {
            timeout_ms,
            connect_timeout_ms: 1_000,
        },
    };
    TwilioSender::new(&config, credentials())
}

#[tokio::test]
async fn whatsapp_message_is_posted_with_basic_auth() {
    let server = StubServer::start(vec![StubResponse::json(
        201,
        r#"{"sid": "SM9f2c", "status": "queued", "body": "hi"}"#,
    )])
    .await;

    let receipt = assert_ok!(
        sender(&server, Channel::Whatsapp, 5_000)
            .send("Low price alert! Only $95")
            .await
    );

    assert_eq!(receipt.id, "SM9f2c");
    assert_eq!(receipt.status, "queued");

    let requests = server.requests();
    let sent = &requests[0];
    assert_eq!(sent.method, "POST");
    assert_eq!(sent.path(), "/2010-04-01/Accounts/AC123/Messages.json");
    // base64("AC123:secret")
    assert_eq!(sent.header("authorization"), Some("Basic QUMxMjM6c2VjcmV0"));
    assert_eq!(
        sent.form_param("To").as_deref(),
        Some("whatsapp:+595981000000")
    );
    assert_eq!(
        sent.form_param("From").as_deref(),
        Some("whatsapp:+14155238886")
    );
    assert_eq!(
        sent.form_param("Body").as_deref(),
        Some("Low price alert! Only $95")
    );
}

#[tokio::test]
async fn sms_numbers_are_sent_unprefixed() {
    let server =
        StubServer::start(vec![StubResponse::json(201, r#"{"sid": "SM1", "status": "queued"}"#)])
            .await;

    sender(&server, Channel::Sms, 5_000).send("hello").await.unwrap();

    let sent = &server.requests()[0];
    assert_eq!(sent.form_param("To").as_deref(), Some("+595981000000"));
    assert_eq!(sent.form_param("From").as_deref(), Some("+14155238886"));
}

#[tokio::test]
async fn rejection_carries_twilio_message_and_code() {
    let server = StubServer::start(vec![StubResponse::json(
        400,
        r#"{"code": 21211, "message": "The 'To' number is not a valid phone number.", "status": 400}"#,
    )])
    .await;

    let err = sender(&server, Channel::Whatsapp, 5_000)
        .send("hello")
        .await
        .unwrap_err();

    match err {
        NotifyError::Rejected { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("not a valid phone number"), "{message}");
            assert!(message.contains("21211"), "{message}");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn unexpected_success_body_is_a_decode_error() {
    let server = StubServer::start(vec![StubResponse::json(201, r#"{"unexpected": true}"#)]).await;

    let err = sender(&server, Channel::Sms, 5_000)
        .send("hello")
        .await
        .unwrap_err();

    assert!(matches!(err, NotifyError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn slow_api_times_out() {
    let server = StubServer::start(vec![
        StubResponse::json(201, r#"{"sid": "SM1", "status": "queued"}"#)
            .delayed(Duration::from_secs(2)),
    ])
    .await;

    let err = sender(&server, Channel::Sms, 100)
        .send("hello")
        .await
        .unwrap_err();

    assert!(matches!(err, NotifyError::Timeout), "{err:?}");
}

#[tokio::test]
async fn verify_account_reads_status() {
    let server = StubServer::start(vec![StubResponse::json(
        200,
        r#"{"sid": "AC123", "friendly_name": "Fare alerts", "status": "active"}"#,
    )])
    .await;

    let account = sender(&server, Channel::Whatsapp, 5_000)
        .verify_account()
        .await
        .unwrap();

    assert_eq!(account.name, "Fare alerts");
    assert_eq!(account.status, "active");
    let sent = &server.requests()[0];
    assert_eq!(sent.method, "GET");
    assert_eq!(sent.path(), "/2010-04-01/Accounts/AC123.json");
}

#[tokio::test]
async fn verify_account_surfaces_bad_credentials() {
    let server = StubServer::start(vec![StubResponse::json(
        401,
        r#"{"code": 20003, "message": "Authenticate", "status": 401}"#,
    )])
    .await;

    let err = assert_err!(sender(&server, Channel::Whatsapp, 5_000).verify_account().await);

    assert!(matches!(err, NotifyError::Rejected { status: 401, .. }));
}
