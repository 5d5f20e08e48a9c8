// Integration tests for the Akismet client against a mock HTTP server

use mockito::{Matcher, Mock, Server, ServerGuard};

use askbot_setup::models::spam_check::{RequestMeta, Requester, Verdict};
use askbot_setup::services::akismet_client::{AkismetClient, AkismetError};

const TEXT: &str = "hello foobar";
const API_KEY: &str = "foobar";
const APP_URL: &str = "http://askbot.com/";
const BLOG: &str = "http://askbot.com/questions/";
const USER_AGENT: &str = "user_agent_string";
const USER_IP: &str = "0.0.0.0";
const COMMENT_AUTHOR: &str = "bob";
const COMMENT_AUTHOR_EMAIL: &str = "bob@example.com";

fn client(server: &ServerGuard) -> AkismetClient {
    AkismetClient::new(API_KEY, APP_URL).with_base_url(server.url())
}

fn anon_request() -> RequestMeta {
    RequestMeta::anonymous(USER_IP, USER_AGENT)
}

fn auth_request() -> RequestMeta {
    RequestMeta::authenticated(
        USER_IP,
        USER_AGENT,
        Requester::new("Request User", "request@example.com"),
    )
}

async fn mock_verify_key(server: &mut ServerGuard, body: &str) -> Mock {
    server
        .mock("POST", "/1.1/verify-key")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("key".into(), API_KEY.into()),
            Matcher::UrlEncoded("blog".into(), BLOG.into()),
        ]))
        .with_status(200)
        .with_body(body)
        .create_async()
        .await
}

fn common_fields() -> Vec<Matcher> {
    vec![
        Matcher::UrlEncoded("comment_content".into(), TEXT.into()),
        Matcher::UrlEncoded("user_ip".into(), USER_IP.into()),
        Matcher::UrlEncoded("user_agent".into(), USER_AGENT.into()),
        Matcher::UrlEncoded("blog".into(), BLOG.into()),
    ]
}

#[tokio::test]
async fn test_anon_user_no_author() {
    let mut server = Server::new_async().await;
    let verify = mock_verify_key(&mut server, "valid").await;
    // exact body: the author fields must be absent, not empty
    let check = server
        .mock("POST", "/1.1/comment-check")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::Exact(
            "comment_content=hello+foobar&user_ip=0.0.0.0&user_agent=user_agent_string&blog=http%3A%2F%2Faskbot.com%2Fquestions%2F"
                .to_string(),
        ))
        .with_status(200)
        .with_body("false")
        .create_async()
        .await;

    let verdict = client(&server).check_spam(TEXT, &anon_request(), None).await.unwrap();

    verify.assert_async().await;
    check.assert_async().await;
    assert_eq!(verdict, Verdict::Ham);
}

#[tokio::test]
async fn test_anon_user_with_author() {
    let mut server = Server::new_async().await;
    let _verify = mock_verify_key(&mut server, "valid").await;
    let mut fields = common_fields();
    fields.push(Matcher::UrlEncoded("comment_author".into(), COMMENT_AUTHOR.into()));
    fields.push(Matcher::UrlEncoded("comment_author_email".into(), COMMENT_AUTHOR_EMAIL.into()));
    let check = server
        .mock("POST", "/1.1/comment-check")
        .match_body(Matcher::AllOf(fields))
        .with_status(200)
        .with_body("false")
        .create_async()
        .await;

    let author = Requester::new(COMMENT_AUTHOR, COMMENT_AUTHOR_EMAIL);
    let verdict = client(&server)
        .check_spam(TEXT, &anon_request(), Some(&author))
        .await
        .unwrap();

    check.assert_async().await;
    assert!(!verdict.is_spam());
}

#[tokio::test]
async fn test_auth_user_no_author() {
    let mut server = Server::new_async().await;
    let _verify = mock_verify_key(&mut server, "valid").await;
    let mut fields = common_fields();
    fields.push(Matcher::UrlEncoded("comment_author".into(), "Request User".into()));
    fields.push(Matcher::UrlEncoded("comment_author_email".into(), "request@example.com".into()));
    let check = server
        .mock("POST", "/1.1/comment-check")
        .match_body(Matcher::AllOf(fields))
        .with_status(200)
        .with_body("false")
        .create_async()
        .await;

    client(&server).check_spam(TEXT, &auth_request(), None).await.unwrap();

    check.assert_async().await;
}

#[tokio::test]
async fn test_auth_user_with_author() {
    let mut server = Server::new_async().await;
    let _verify = mock_verify_key(&mut server, "valid").await;
    let mut fields = common_fields();
    fields.push(Matcher::UrlEncoded("comment_author".into(), COMMENT_AUTHOR.into()));
    fields.push(Matcher::UrlEncoded("comment_author_email".into(), COMMENT_AUTHOR_EMAIL.into()));
    let check = server
        .mock("POST", "/1.1/comment-check")
        .match_body(Matcher::AllOf(fields))
        .with_status(200)
        .with_body("true")
        .create_async()
        .await;

    let author = Requester::new(COMMENT_AUTHOR, COMMENT_AUTHOR_EMAIL);
    let verdict = client(&server)
        .check_spam(TEXT, &auth_request(), Some(&author))
        .await
        .unwrap();

    check.assert_async().await;
    assert_eq!(verdict, Verdict::Spam);
}

#[tokio::test]
async fn test_key_is_verified_once_per_client() {
    let mut server = Server::new_async().await;
    let verify = mock_verify_key(&mut server, "valid").await;
    let check = server
        .mock("POST", "/1.1/comment-check")
        .with_status(200)
        .with_body("false")
        .expect(2)
        .create_async()
        .await;

    let client = client(&server);
    client.check_spam(TEXT, &anon_request(), None).await.unwrap();
    client.check_spam(TEXT, &anon_request(), None).await.unwrap();

    verify.assert_async().await;
    check.assert_async().await;
}

#[tokio::test]
async fn test_invalid_key_skips_comment_check() {
    let mut server = Server::new_async().await;
    let _verify = mock_verify_key(&mut server, "invalid").await;
    let check = server
        .mock("POST", "/1.1/comment-check")
        .expect(0)
        .create_async()
        .await;

    let result = client(&server).check_spam(TEXT, &anon_request(), None).await;

    check.assert_async().await;
    assert!(matches!(result, Err(AkismetError::InvalidKey)));
}

#[tokio::test]
async fn test_unexpected_body_is_error() {
    let mut server = Server::new_async().await;
    let _verify = mock_verify_key(&mut server, "valid").await;
    let _check = server
        .mock("POST", "/1.1/comment-check")
        .with_status(200)
        .with_header("X-akismet-debug-help", "Empty \"user_ip\" value")
        .with_body("invalid")
        .create_async()
        .await;

    let result = client(&server).check_spam(TEXT, &anon_request(), None).await;

    match result {
        Err(AkismetError::UnexpectedResponse { body, .. }) => assert_eq!(body, "invalid"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_carries_debug_help() {
    let mut server = Server::new_async().await;
    let _verify = server
        .mock("POST", "/1.1/verify-key")
        .with_status(500)
        .with_header("X-akismet-debug-help", "try later")
        .with_body("oops")
        .create_async()
        .await;

    let result = client(&server).verify_key().await;

    match result {
        Err(AkismetError::UnexpectedResponse { status, debug_help, .. }) => {
            assert_eq!(status, 500);
            assert_eq!(debug_help.as_deref(), Some("try later"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_transport_failure_propagates() {
    let client = AkismetClient::new(API_KEY, APP_URL).with_base_url("http://127.0.0.1:9");
    let result = client.check_spam(TEXT, &anon_request(), None).await;
    assert!(matches!(result, Err(AkismetError::RequestFailed(_))));
}
