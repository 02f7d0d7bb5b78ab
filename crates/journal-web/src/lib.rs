//! Public HTTP surface for the journal.
//!
//! Serves the two timelines (as a host page and as the JSON the widget
//! loads), the detail fragments shown in info bubbles, and the admin API
//! behind Basic auth. Backed by any [`JournalStore`].

pub mod auth;
pub mod error;
pub mod html;
pub mod templates;

pub use error::Error;

use std::{
  path::{Path as FsPath, PathBuf},
  sync::Arc,
};

use axum::{
  Json, Router,
  extract::{Path, State},
  middleware,
  response::Html,
  routing::get,
};
use journal_core::{
  RecordId,
  detail::{ModelType, lookup},
  projection::{LineType, PrivacyPolicy, TimelineEnvelope, project},
  store::JournalStore,
};
use serde::Deserialize;
use tower_http::{services::ServeDir, trace::TraceLayer};

use auth::{AuthConfig, require_admin};
use error::Result;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `JOURNAL_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                String,
  #[serde(default = "default_port")]
  pub port:                u16,
  #[serde(default = "default_store_path")]
  pub store_path:          PathBuf,
  /// Served at `/static` when set. Meant for development.
  #[serde(default)]
  pub static_dir:          Option<PathBuf>,
  /// Keep private activities off the diary timeline.
  #[serde(default)]
  pub hide_private:        bool,
  pub admin_username:      String,
  pub admin_password_hash: String,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8000 }

fn default_store_path() -> PathBuf { PathBuf::from("journal.sqlite3") }

impl ServerConfig {
  /// Load from a TOML file (which may be absent) overlaid with `JOURNAL_*`
  /// environment variables. A leading `~/` in `store_path` is expanded.
  pub fn load(path: &FsPath) -> Result<Self, config::ConfigError> {
    Self::from_source(config::File::from(path).required(false))
  }

  fn from_source<T>(source: T) -> Result<Self, config::ConfigError>
  where
    T: config::Source + Send + Sync + 'static,
  {
    let mut cfg: Self = config::Config::builder()
      .add_source(source)
      .add_source(config::Environment::with_prefix("JOURNAL"))
      .build()?
      .try_deserialize()?;
    cfg.store_path = expand_tilde(&cfg.store_path);
    Ok(cfg)
  }

  pub fn privacy(&self) -> PrivacyPolicy {
    PrivacyPolicy::from_hide_private(self.hide_private)
  }

  pub fn auth(&self) -> AuthConfig {
    AuthConfig {
      username:      self.admin_username.clone(),
      password_hash: self.admin_password_hash.clone(),
    }
  }
}

/// Expand a leading `~/` to the user's home directory.
fn expand_tilde(path: &FsPath) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: JournalStore> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
  pub auth:   Arc<AuthConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application [`Router`].
///
/// Page routes answer with and without the trailing slash.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: JournalStore + Clone + 'static,
{
  let admin = journal_api::api_router(state.store.clone()).layer(
    middleware::from_fn_with_state(state.auth.clone(), require_admin),
  );
  let static_dir = state.config.static_dir.clone();

  let mut app = Router::new()
    .route("/timeline/{line_type}/",       get(timeline_page::<S>))
    .route("/timeline/{line_type}",        get(timeline_page::<S>))
    .route("/timeline_json/{line_type}/",  get(timeline_json::<S>))
    .route("/timeline_json/{line_type}",   get(timeline_json::<S>))
    .route("/details/{model_type}/{id}/",  get(details::<S>))
    .route("/details/{model_type}/{id}",   get(details::<S>))
    .with_state(state)
    .nest("/admin", admin);

  if let Some(dir) = static_dir {
    app = app.nest_service("/static", ServeDir::new(dir));
  }

  app.layer(TraceLayer::new_for_http())
}

// ─── Handlers ────────────────────────────────────────────────────────────────

/// `GET /timeline/{line_type}/`
async fn timeline_page<S>(
  State(_state): State<AppState<S>>,
  Path(line_type): Path<String>,
) -> Result<Html<String>>
where
  S: JournalStore + Clone + 'static,
{
  let line = LineType::from(line_type.as_str());
  let today = chrono::Local::now().date_naive();
  Ok(Html(templates::timeline_page(line, today)?))
}

/// `GET /timeline_json/{line_type}/`
async fn timeline_json<S>(
  State(state): State<AppState<S>>,
  Path(line_type): Path<String>,
) -> Result<Json<TimelineEnvelope>>
where
  S: JournalStore + Clone + 'static,
{
  let line = LineType::from(line_type.as_str());
  let envelope =
    project(state.store.as_ref(), line, state.config.privacy()).await?;
  Ok(Json(envelope))
}

/// `GET /details/{model_type}/{id}/`
///
/// An unsupported type is a 400. An id that cannot name any record of a
/// supported type is a 404, like any other missing record.
async fn details<S>(
  State(state): State<AppState<S>>,
  Path((model_type, id)): Path<(String, String)>,
) -> Result<Html<String>>
where
  S: JournalStore + Clone + 'static,
{
  let model = ModelType::resolve(&model_type)?;
  let Ok(id) = id.parse::<RecordId>() else {
    return Err(Error::NotFound(format!("{} {id} not found", model.name())));
  };
  let detail = lookup(state.store.as_ref(), &model_type, id).await?;
  Ok(Html(templates::detail(&detail)?))
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
  };
  use base64::Engine as _;
  use base64::engine::general_purpose::STANDARD as B64;
  use chrono::NaiveDate;
  use journal_core::{
    fields::{DateTimeBound, Rateable, Rating, SummaryAndNotes},
    record::{Activity, ActivityKind, BikeRide, Entry, Mood, Period},
  };
  use journal_store_sqlite::SqliteStore;
  use serde_json::Value;
  use tower::ServiceExt as _;

  use super::*;

  async fn make_state(password: &str, hide_private: bool) -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let hash  = auth::hash_password(password).unwrap();

    AppState {
      store:  Arc::new(store),
      config: Arc::new(ServerConfig {
        host:                default_host(),
        port:                default_port(),
        store_path:          PathBuf::from(":memory:"),
        static_dir:          None,
        hide_private,
        admin_username:      "dirk".to_string(),
        admin_password_hash: hash.clone(),
      }),
      auth:   Arc::new(AuthConfig {
        username:      "dirk".to_string(),
        password_hash: hash,
      }),
    }
  }

  fn date(s: &str) -> NaiveDate { s.parse().unwrap() }

  async fn seed(store: &SqliteStore) {
    let entry = store
      .insert(Entry {
        text:        SummaryAndNotes::new("Long day"),
        date:        date("2010-07-05"),
        mood:        Mood::Good,
        user:        "dirk".into(),
        media:       vec![],
        consumables: vec![],
      })
      .await
      .unwrap();
    let mut ride = Activity {
      text:     SummaryAndNotes::new("Up Mt. Hamilton"),
      rating:   Rateable::new(Rating::Excellent),
      entry_id: entry.id,
      duration: Some(5),
      private:  false,
      kind:     ActivityKind::BikeRide(BikeRide {
        distance:      60,
        average_speed: 14.2,
        climbing:      4400,
        solo:          false,
      }),
    };
    store.insert(ride.clone()).await.unwrap();
    ride.text = SummaryAndNotes::new("Secret ride");
    ride.private = true;
    store.insert(ride).await.unwrap();
    store
      .insert(Period {
        text:         SummaryAndNotes::new("Lived in Boston"),
        start:        DateTimeBound::on(date("2010-01-01")),
        latest_start: DateTimeBound::default(),
        earliest_end: DateTimeBound::on(date("2012-06-01")),
        end:          DateTimeBound::default(),
      })
      .await
      .unwrap();
  }

  async fn get(state: AppState<SqliteStore>, uri: &str) -> Response {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    router(state).oneshot(req).await.unwrap()
  }

  async fn body_string(resp: Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  // ── Timeline JSON ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn life_json_contains_only_life_types() {
    let state = make_state("secret", false).await;
    seed(&state.store).await;

    let resp = get(state, "/timeline_json/life/").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let ct = resp.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap();
    assert!(ct.starts_with("application/json"), "Content-Type: {ct}");

    let json: Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(json["dateTimeFormat"], "iso8601");
    assert_eq!(json["wiki-url"], "");
    let events = json["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    let period = &events[0];
    assert_eq!(period["classname"], "Period");
    assert_eq!(period["start"], "2010-01-01");
    assert_eq!(period["end"], "2100-01-01");
    assert_eq!(period["earliestEnd"], "2012-06-01");
    assert_eq!(period["durationEvent"], true);
  }

  #[tokio::test]
  async fn unknown_line_type_falls_back_to_diary() {
    let state = make_state("secret", false).await;
    seed(&state.store).await;

    let resp = get(state, "/timeline_json/whatever/").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = serde_json::from_str(&body_string(resp).await).unwrap();
    let classes: Vec<&str> = json["events"]
      .as_array()
      .unwrap()
      .iter()
      .map(|e| e["classname"].as_str().unwrap())
      .collect();
    assert_eq!(classes, ["BikeRide", "BikeRide", "Entry"]);
  }

  #[tokio::test]
  async fn hide_private_is_honoured() {
    let state = make_state("secret", true).await;
    seed(&state.store).await;

    let resp = get(state, "/timeline_json/diary/").await;
    let json: Value = serde_json::from_str(&body_string(resp).await).unwrap();
    let titles: Vec<&str> = json["events"]
      .as_array()
      .unwrap()
      .iter()
      .map(|e| e["title"].as_str().unwrap())
      .collect();
    assert_eq!(titles, ["BikeRide: Up Mt. Hamilton", "Long day"]);
  }

  // ── Details ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn details_render_fragment() {
    let state = make_state("secret", false).await;
    seed(&state.store).await;

    let resp = get(state, "/details/BikeRide/1/").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let ct = resp.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap();
    assert!(ct.starts_with("text/html"), "Content-Type: {ct}");
    let html = body_string(resp).await;
    assert!(html.contains("BikeRide: Up Mt. Hamilton"), "body: {html}");
  }

  #[tokio::test]
  async fn details_unknown_type_is_400() {
    let state = make_state("secret", false).await;
    let resp  = get(state, "/details/Nonexistent/1/").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn details_non_timeline_type_is_400() {
    let state = make_state("secret", false).await;
    let resp  = get(state, "/details/Consumable/1/").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn details_missing_record_is_404() {
    let state = make_state("secret", false).await;
    seed(&state.store).await;
    for uri in [
      "/details/Entry/999/",
      "/details/Entry/-1/",
      "/details/Entry/abc/",
      "/details/Entry/99999999999999999999/",
    ] {
      let resp = get(state.clone(), uri).await;
      assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
    }

    // The type is checked before the id.
    let resp = get(state.clone(), "/details/Consumable/abc/").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // A bike ride is not a social event.
    let resp = get(state, "/details/SocialEvent/1/").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn routes_answer_without_trailing_slash() {
    let state = make_state("secret", false).await;
    seed(&state.store).await;

    let resp = get(state.clone(), "/timeline_json/life").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(json["events"][0]["classname"], "Period");

    let resp = get(state.clone(), "/timeline/diary").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains("data-line-type=\"diary\""));

    let resp = get(state.clone(), "/details/BikeRide/1").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = get(state, "/details/Entry/abc").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Timeline page ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn timeline_page_carries_line_type() {
    let state = make_state("secret", false).await;
    let resp  = get(state, "/timeline/life/").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_string(resp).await;
    assert!(html.contains("data-line-type=\"life\""));
    assert!(html.contains("data-events-url=\"/timeline_json/life/\""));
  }

  // ── Admin ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn admin_requires_credentials() {
    let state = make_state("secret", false).await;
    let resp  = get(state, "/admin/entries").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));
  }

  #[tokio::test]
  async fn admin_with_credentials_lists_records() {
    let state = make_state("secret", false).await;
    seed(&state.store).await;

    let auth = format!("Basic {}", B64.encode("dirk:secret"));
    let req = Request::builder()
      .uri("/admin/activities?type=BikeRide")
      .header(header::AUTHORIZATION, auth)
      .body(Body::empty())
      .unwrap();
    let resp = router(state).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json: Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 2);
  }

  // ── Configuration ───────────────────────────────────────────────────────────

  fn toml(text: &'static str) -> config::File<config::FileSourceString, config::FileFormat> {
    config::File::from_str(text, config::FileFormat::Toml)
  }

  #[test]
  fn config_fills_defaults() {
    let cfg = ServerConfig::from_source(toml(
      "admin_username = \"dirk\"\nadmin_password_hash = \"x\"\n",
    ))
    .unwrap();
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 8000);
    assert_eq!(cfg.store_path, PathBuf::from("journal.sqlite3"));
    assert!(cfg.static_dir.is_none());
    assert_eq!(cfg.privacy(), PrivacyPolicy::ShowPrivate);
    assert_eq!(cfg.auth().username, "dirk");
  }

  #[test]
  fn config_requires_admin_credentials() {
    assert!(ServerConfig::from_source(toml("port = 9000\n")).is_err());
  }

  #[test]
  fn missing_config_file_is_not_an_error_by_itself() {
    let err = ServerConfig::load(FsPath::new("/nonexistent/journal.toml")).unwrap_err();
    assert!(err.to_string().contains("admin_username"), "{err}");
  }

  #[test]
  fn store_path_tilde_is_expanded() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(
      expand_tilde(FsPath::new("~/journal.sqlite3")),
      PathBuf::from(home).join("journal.sqlite3")
    );
    assert_eq!(
      expand_tilde(FsPath::new("/var/journal.sqlite3")),
      PathBuf::from("/var/journal.sqlite3")
    );
  }
}
