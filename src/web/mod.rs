mod assets;

use std::{
    convert::Infallible,
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        Html, IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::{net::TcpListener, sync::broadcast};
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};

use crate::{
    model::{FilterSet, Tier},
    session::{MapSession, Marker},
};

#[derive(Clone, Serialize)]
pub struct ScenarioInfo {
    pub key: String,
    pub name: String,
    pub description: Option<String>,
}

/// Everything the browser needs to draw one view of the map.
#[derive(Clone, Serialize)]
pub struct StateEnvelope {
    pub scenario: String,
    pub scenarios: Vec<ScenarioInfo>,
    pub filters: FilterSet,
    pub changed: usize,
    pub markers: Vec<Marker>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Clone)]
struct AppState {
    session: Arc<Mutex<MapSession>>,
    broadcaster: broadcast::Sender<String>,
}

impl AppState {
    fn envelope(&self) -> StateEnvelope {
        let session = self.session.lock().expect("session lock poisoned");
        let frame = session.frame();
        let scenarios = session
            .scenarios()
            .values()
            .map(|scenario| ScenarioInfo {
                key: scenario.id.clone(),
                name: scenario.name.clone(),
                description: scenario.description.clone(),
            })
            .collect();
        StateEnvelope {
            scenario: frame.scenario,
            scenarios,
            filters: frame.filters,
            changed: frame.changed.len(),
            markers: frame.markers,
            generated_at: Utc::now(),
        }
    }

    fn broadcast(&self, envelope: &StateEnvelope) {
        if let Ok(payload) = serde_json::to_string(envelope) {
            let _ = self.broadcaster.send(payload);
        }
    }
}

pub struct WebServerConfig {
    pub session: MapSession,
    pub host: String,
    pub port: u16,
}

pub async fn run(config: WebServerConfig) -> Result<()> {
    let WebServerConfig {
        session,
        host,
        port,
    } = config;

    let (tx, _) = broadcast::channel::<String>(64);
    let state = Arc::new(AppState {
        session: Arc::new(Mutex::new(session)),
        broadcaster: tx,
    });

    let router = Router::new()
        .route("/", get(index))
        .route("/styles.css", get(styles))
        .route("/app.js", get(script))
        .route("/api/state", get(current_state))
        .route("/api/select/:key", post(select_scenario))
        .route("/api/filter/:tier", post(toggle_filter))
        .route("/api/events", get(stream_events))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("invalid address");

    println!(
        "[web] Living Map UI live at http://{}:{} (Ctrl+C to stop)",
        host, port
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    println!("[web] Shutting down...");
}

async fn index() -> Html<&'static str> {
    Html(assets::INDEX_HTML)
}

async fn styles() -> impl IntoResponse {
    Response::builder()
        .header(header::CONTENT_TYPE, "text/css; charset=utf-8")
        .body(assets::STYLES_CSS.to_string())
        .unwrap()
}

async fn script() -> impl IntoResponse {
    Response::builder()
        .header(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )
        .body(assets::APP_JS.to_string())
        .unwrap()
}

async fn current_state(State(state): State<Arc<AppState>>) -> Json<StateEnvelope> {
    Json(state.envelope())
}

async fn select_scenario(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<StateEnvelope>, (StatusCode, String)> {
    {
        let mut session = state.session.lock().expect("session lock poisoned");
        session
            .select(&key)
            .map_err(|err| (StatusCode::NOT_FOUND, err.to_string()))?;
    }
    let envelope = state.envelope();
    state.broadcast(&envelope);
    Ok(Json(envelope))
}

async fn toggle_filter(
    State(state): State<Arc<AppState>>,
    Path(tier): Path<String>,
) -> Result<Json<StateEnvelope>, (StatusCode, String)> {
    let tier = Tier::from_slug(&tier)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("unknown tier '{tier}'")))?;
    {
        let mut session = state.session.lock().expect("session lock poisoned");
        session.toggle_filter(tier);
    }
    let envelope = state.envelope();
    state.broadcast(&envelope);
    Ok(Json(envelope))
}

async fn stream_events(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.broadcaster.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|msg| match msg {
        Ok(payload) => Some(Ok(Event::default().data(payload))),
        Err(_) => None,
    });
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(2))
            .text("keep-alive"),
    )
}
