#![allow(dead_code)]

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use pokenotes::application::SessionGate;
use pokenotes::infrastructure::{HttpApi, SqliteStore};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

/// Token the fake server hands out and accepts
pub const VALID_TOKEN: &str = "abc";
pub const TRAINER_EMAIL: &str = "a@b.com";
pub const TRAINER_PASSWORD: &str = "password1";
/// Login for this user answers 503 "maintenance"
pub const MAINTENANCE_EMAIL: &str = "nurse@joy.center";

/// In-memory state of the fake REST API
pub struct FakeState {
    users: Mutex<HashMap<String, String>>,
    notes: Mutex<BTreeMap<i64, Value>>,
    next_id: Mutex<i64>,
    seen_auth: Mutex<Vec<String>>,
}

impl FakeState {
    fn seeded() -> Self {
        let mut notes = BTreeMap::new();
        notes.insert(
            1,
            json!({ "id": 1, "titulo": "Catch Pikachu", "descripcion": "<p>Viridian Forest</p>", "completada": false }),
        );
        notes.insert(
            2,
            json!({ "id": 2, "titulo": "Beat Brock", "descripcion": "Use water types", "completada": true }),
        );
        Self {
            users: Mutex::new(HashMap::from([(
                TRAINER_EMAIL.to_string(),
                TRAINER_PASSWORD.to_string(),
            )])),
            notes: Mutex::new(notes),
            next_id: Mutex::new(3),
            seen_auth: Mutex::new(Vec::new()),
        }
    }

    /// Authorization headers received by the notes endpoints, in order
    pub fn seen_auth(&self) -> Vec<String> {
        self.seen_auth.lock().unwrap().clone()
    }

    pub fn note_ids(&self) -> Vec<i64> {
        self.notes.lock().unwrap().keys().copied().collect()
    }
}

/// Handle to a fake API running on a random local port
pub struct FakeApi {
    pub address: String,
    pub state: web::Data<FakeState>,
}

impl FakeApi {
    pub fn client(&self) -> HttpApi {
        HttpApi::new(&self.address, Duration::from_secs(5)).expect("Failed to build client")
    }
}

#[derive(Deserialize)]
struct AuthBody {
    username: String,
    password: String,
}

async fn login(state: web::Data<FakeState>, body: web::Json<AuthBody>) -> HttpResponse {
    if body.username == MAINTENANCE_EMAIL {
        return HttpResponse::ServiceUnavailable().body("maintenance");
    }
    let users = state.users.lock().unwrap();
    match users.get(&body.username) {
        Some(password) if *password == body.password => {
            HttpResponse::Ok().json(json!({ "token": VALID_TOKEN }))
        }
        _ => HttpResponse::Unauthorized().body("Invalid credentials"),
    }
}

async fn register(state: web::Data<FakeState>, body: web::Json<AuthBody>) -> HttpResponse {
    let mut users = state.users.lock().unwrap();
    if users.contains_key(&body.username) {
        return HttpResponse::UnprocessableEntity().json(json!({ "error": "User already exists" }));
    }
    users.insert(body.username.clone(), body.password.clone());
    HttpResponse::Created().finish()
}

/// Records the Authorization header; `Err` with a 401 response when invalid
fn check_auth(state: &FakeState, req: &HttpRequest) -> Result<(), HttpResponse> {
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    state.seen_auth.lock().unwrap().push(header.clone());
    if header == format!("Bearer {}", VALID_TOKEN) {
        Ok(())
    } else {
        Err(HttpResponse::Unauthorized().body("Token invalido"))
    }
}

async fn list_notes(state: web::Data<FakeState>, req: HttpRequest) -> HttpResponse {
    if let Err(resp) = check_auth(&state, &req) {
        return resp;
    }
    let notes: Vec<Value> = state.notes.lock().unwrap().values().cloned().collect();
    HttpResponse::Ok().json(notes)
}

async fn get_note(state: web::Data<FakeState>, req: HttpRequest, id: web::Path<i64>) -> HttpResponse {
    if let Err(resp) = check_auth(&state, &req) {
        return resp;
    }
    match state.notes.lock().unwrap().get(&id.into_inner()) {
        Some(note) => HttpResponse::Ok().json(note),
        None => HttpResponse::NotFound().json(json!({ "error": "Tarea no encontrada" })),
    }
}

async fn create_note(
    state: web::Data<FakeState>,
    req: HttpRequest,
    body: web::Json<Map<String, Value>>,
) -> HttpResponse {
    if let Err(resp) = check_auth(&state, &req) {
        return resp;
    }
    let mut fields = body.into_inner();
    if fields.get("titulo").and_then(Value::as_str).unwrap_or_default().is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "El titulo es obligatorio" }));
    }
    let mut next_id = state.next_id.lock().unwrap();
    let id = *next_id;
    *next_id += 1;
    fields.insert("id".to_string(), json!(id));
    let note = Value::Object(fields);
    state.notes.lock().unwrap().insert(id, note.clone());
    HttpResponse::Created().json(note)
}

async fn update_note(
    state: web::Data<FakeState>,
    req: HttpRequest,
    id: web::Path<i64>,
    body: web::Json<Map<String, Value>>,
) -> HttpResponse {
    if let Err(resp) = check_auth(&state, &req) {
        return resp;
    }
    let mut notes = state.notes.lock().unwrap();
    let Some(Value::Object(note)) = notes.get_mut(&id.into_inner()) else {
        return HttpResponse::NotFound().json(json!({ "error": "Tarea no encontrada" }));
    };
    for (key, value) in body.into_inner() {
        note.insert(key, value);
    }
    HttpResponse::Ok().json(Value::Object(note.clone()))
}

async fn delete_note(state: web::Data<FakeState>, req: HttpRequest, id: web::Path<i64>) -> HttpResponse {
    if let Err(resp) = check_auth(&state, &req) {
        return resp;
    }
    match state.notes.lock().unwrap().remove(&id.into_inner()) {
        Some(_) => HttpResponse::NoContent().finish(),
        None => HttpResponse::NotFound().json(json!({ "error": "Tarea no encontrada" })),
    }
}

/// Start the fake API on a random port of the current runtime
pub async fn spawn_fake_api() -> FakeApi {
    pokenotes::util::testing::init_test_setup().expect("Failed to initialize test setup");

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let state = web::Data::new(FakeState::seeded());

    let app_state = state.clone();
    let server = HttpServer::new(move || {
        App::new().app_data(app_state.clone()).service(
            web::scope("/api")
                .route("/auth/login", web::post().to(login))
                .route("/auth/register", web::post().to(register))
                .route("/tareas", web::get().to(list_notes))
                .route("/tareas", web::post().to(create_note))
                .route("/tareas/{id}", web::get().to(get_note))
                .route("/tareas/{id}", web::put().to(update_note))
                .route("/tareas/{id}", web::delete().to(delete_note)),
        )
    })
    .workers(1)
    .listen(listener)
    .expect("Failed to listen")
    .run();
    let _ = tokio::spawn(server);

    FakeApi {
        address: format!("http://127.0.0.1:{}/api", port),
        state,
    }
}

/// Session store in a temporary directory
pub struct TestStore {
    _temp_dir: TempDir,
    pub store: Rc<SqliteStore>,
}

impl TestStore {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temporary directory");
        let store = SqliteStore::open(temp_dir.path().join("session.sqlite3"))
            .expect("Failed to open session store");
        Self {
            _temp_dir: temp_dir,
            store: Rc::new(store),
        }
    }

    pub fn session(&self) -> SessionGate<Rc<SqliteStore>> {
        SessionGate::new(self.store.clone())
    }
}
