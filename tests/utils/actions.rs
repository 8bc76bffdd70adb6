use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

use super::setup::TestSetup;

/// A registered member as seen by the client
#[derive(Debug, Clone)]
pub struct Member {
    pub id: i64,
    pub token: String,
}

impl TestSetup {
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    pub async fn register(&self, signature: &str) -> Member {
        let body = json!({
            "fullName": format!("Autora {}", signature),
            "age": 29,
            "birthday": "21/03",
            "faceClaim": "Florence Pugh",
            "signature": signature,
            "facebookLink": "https://facebook.com/autora",
            "motivation": "Escribir para entenderme"
        });
        let (status, session) = self.send("POST", "/api/register", None, Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "register {}: {}", signature, session);

        Member {
            id: session["user"]["id"].as_i64().unwrap(),
            token: session["token"].as_str().unwrap().to_string(),
        }
    }

    pub async fn submit_activity(
        &self,
        member: &Member,
        activity_type: &str,
        words: i64,
        responses: Option<i64>,
    ) -> (StatusCode, Value) {
        let mut body = json!({
            "name": "Entrada del diario",
            "date": "2024-09-10",
            "words": words,
            "type": activity_type,
            "arista": "mapa_del_inconsciente",
            "album": "Diario de los sueños"
        });
        if let Some(responses) = responses {
            body["responses"] = json!(responses);
        }
        self.send("POST", "/api/activities", Some(&member.token), Some(body))
            .await
    }

    pub async fn current_user(&self, member: &Member) -> Value {
        let (status, user) = self.send("GET", "/api/user", Some(&member.token), None).await;
        assert_eq!(status, StatusCode::OK);
        user
    }

    pub async fn rankings(&self, member: &Member, metric: &str) -> Value {
        let uri = format!("/api/rankings/{}", metric);
        let (status, leaderboard) = self.send("GET", &uri, Some(&member.token), None).await;
        assert_eq!(status, StatusCode::OK);
        leaderboard
    }
}
