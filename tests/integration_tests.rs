//! Integration tests for agent-chat.
//! Each test runs a throw-away agent on a loopback port.

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode, header};
    use axum::response::IntoResponse;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{Value, json};

    use agent_chat::chat::ChatView;
    use agent_chat::{AGENT_ERROR_TEXT, Agent, AgentClient, Message, NO_RESPONSE_TEXT};

    type Seen = Arc<Mutex<Vec<(Option<String>, Value)>>>;

    async fn serve(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock agent");
        let addr = listener.local_addr().expect("Failed to read local address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock agent failed");
        });
        addr
    }

    fn client_for(addr: SocketAddr) -> AgentClient {
        AgentClient::with_options(Some(&format!("http://{addr}")), Some(Duration::from_secs(10)))
            .expect("Failed to create client")
    }

    /// Answers like the reference agent: `{"response": ...}` for a query,
    /// 400 with an `error` field otherwise.
    async fn arithmetic_agent(
        State(seen): State<Seen>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> impl IntoResponse {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        seen.lock().unwrap().push((content_type, body.clone()));
        match body.get("query").and_then(Value::as_str) {
            Some("What is 2+2?") => (StatusCode::OK, Json(json!({"response": "4"}))),
            Some(q) if !q.is_empty() => (StatusCode::OK, Json(json!({}))),
            _ => (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "No query provided"})),
            ),
        }
    }

    async fn arithmetic_server() -> (SocketAddr, Seen) {
        let seen: Seen = Arc::default();
        let app = Router::new()
            .route("/query", post(arithmetic_agent))
            .with_state(Arc::clone(&seen));
        (serve(app).await, seen)
    }

    #[tokio::test]
    async fn question_answered_end_to_end() {
        let (addr, seen) = arithmetic_server().await;
        let view = ChatView::new(client_for(addr));

        view.set_draft("What is 2+2?");
        let pending = view.submit().expect("non-empty draft should submit");
        assert_eq!(view.messages(), vec![Message::user("What is 2+2?")]);

        let reply = pending.await;
        assert_eq!(reply, Message::bot("4"));
        assert_eq!(
            view.messages(),
            vec![Message::user("What is 2+2?"), Message::bot("4")]
        );
        assert_eq!(view.draft(), "");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0.as_deref(), Some("application/json"));
        assert_eq!(seen[0].1, json!({"query": "What is 2+2?"}));
    }

    #[tokio::test]
    async fn reply_without_response_field() {
        let (addr, _) = arithmetic_server().await;
        let view = ChatView::new(client_for(addr));

        view.set_draft("Tell me a joke");
        let reply = view.submit().unwrap().await;
        assert_eq!(reply.text(), NO_RESPONSE_TEXT);
    }

    #[tokio::test]
    async fn error_status_is_not_an_error() {
        let (addr, _) = arithmetic_server().await;
        let client = client_for(addr);

        let body = client.query("").await.expect("a JSON body is a reply");
        assert_eq!(body, json!({"error": "No query provided"}));
    }

    #[tokio::test]
    async fn blank_draft_sends_nothing() {
        let (addr, seen) = arithmetic_server().await;
        let view = ChatView::new(client_for(addr));

        view.set_draft("  ");
        assert!(view.submit().is_none());
        assert_eq!(view.message_count(), 0);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_json_reply_is_an_error() {
        let app = Router::new().route("/query", post(|| async { "<html>oops</html>" }));
        let addr = serve(app).await;
        let client = client_for(addr);

        let err = client.query("hello").await.unwrap_err();
        assert!(err.is_serialization(), "unexpected error: {err}");

        let view = ChatView::new(client);
        view.set_draft("hello");
        let reply = view.submit().unwrap().await;
        assert_eq!(reply.text(), AGENT_ERROR_TEXT);
        assert_eq!(view.draft(), "");
    }

    #[tokio::test]
    async fn unreachable_agent_is_an_error() {
        // Bind and release a port so nothing is listening on it.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let view = ChatView::new(client_for(addr));
        view.set_draft("hello?");
        let reply = view.submit().unwrap().await;
        assert_eq!(reply.text(), AGENT_ERROR_TEXT);
        assert_eq!(
            view.messages(),
            vec![Message::user("hello?"), Message::bot(AGENT_ERROR_TEXT)]
        );
    }

    #[tokio::test]
    async fn slow_agent_times_out_when_configured() {
        let app = Router::new().route(
            "/query",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({"response": "too late"}))
            }),
        );
        let addr = serve(app).await;
        let client = AgentClient::with_options(
            Some(&format!("http://{addr}")),
            Some(Duration::from_millis(200)),
        )
        .unwrap();

        let err = client.query("hello").await.unwrap_err();
        assert!(err.is_timeout(), "unexpected error: {err}");
    }
}
