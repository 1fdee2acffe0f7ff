use super::*;

#[test]
fn test_request_serializes_without_optionals() {
    let req = CdpRequest {
        id: 7,
        method: "Runtime.evaluate".to_string(),
        params: None,
        session_id: None,
    };
    let json = serde_json::to_string(&req).unwrap();
    assert!(json.contains("\"id\":7"));
    assert!(json.contains("Runtime.evaluate"));
    assert!(!json.contains("params"));
    assert!(!json.contains("sessionId"));
}

#[test]
fn test_request_serializes_session_id() {
    let req = CdpRequest {
        id: 1,
        method: "Page.reload".to_string(),
        params: Some(serde_json::json!({"ignoreCache": false})),
        session_id: Some("SES".to_string()),
    };
    let json = serde_json::to_string(&req).unwrap();
    assert!(json.contains("\"sessionId\":\"SES\""));
    assert!(json.contains("ignoreCache"));
}

#[test]
fn test_parse_response() {
    let msg: CdpMessage = serde_json::from_str(
        r#"{"id":3,"result":{"result":{"type":"boolean","value":true}}}"#,
    )
    .unwrap();
    assert_eq!(msg.id, Some(3));
    assert!(msg.result.is_some());
    assert!(msg.error.is_none());
    assert!(msg.method.is_none());
}

#[test]
fn test_parse_error_response() {
    let msg: CdpMessage =
        serde_json::from_str(r#"{"id":4,"error":{"code":-32000,"message":"boom"}}"#).unwrap();
    let err = msg.error.unwrap();
    assert_eq!(err.code, -32000);
    assert_eq!(err.message, "boom");
}

#[test]
fn test_parse_event() {
    let msg: CdpMessage = serde_json::from_str(
        r#"{"method":"Page.frameNavigated","params":{},"sessionId":"SES"}"#,
    )
    .unwrap();
    assert!(msg.id.is_none());
    assert_eq!(msg.method.as_deref(), Some("Page.frameNavigated"));
    assert_eq!(msg.session_id.as_deref(), Some("SES"));
}

#[test]
fn test_parse_browser_version() {
    let v: BrowserVersion = serde_json::from_str(
        r#"{"Browser":"Chrome/131.0","Protocol-Version":"1.3","webSocketDebuggerUrl":"ws://127.0.0.1:9222/devtools/browser/abc"}"#,
    )
    .unwrap();
    assert_eq!(v.browser, "Chrome/131.0");
    assert!(v.web_socket_debugger_url.starts_with("ws://"));
}

#[test]
fn test_parse_page_info() {
    let p: PageInfo = serde_json::from_str(
        r#"{"id":"T1","type":"page","title":"Game","url":"https://lichess.org/abcd1234"}"#,
    )
    .unwrap();
    assert_eq!(p.id, "T1");
    assert_eq!(p.page_type, "page");
    assert_eq!(p.url, "https://lichess.org/abcd1234");
}

#[test]
fn test_key_event_type_wire_names() {
    assert_eq!(
        serde_json::to_string(&KeyEventType::KeyDown).unwrap(),
        "\"keyDown\""
    );
    assert_eq!(
        serde_json::to_string(&KeyEventType::KeyUp).unwrap(),
        "\"keyUp\""
    );
}
