//! In-process portal backend for the integration tests.
//!
//! Issues HS256 tokens, enforces the consent rules on record reads, records
//! every request it receives and can be told to fail specific paths.

#![allow(dead_code)]

use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Duration, Utc};
use consentgate_client::{ApiClient, AuthFailureDetection, ClientConfig, Session};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const SECRET: &[u8] = b"consentgate-test-secret";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path and query exactly as sent
    pub uri: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub accept: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    role: String,
    exp: usize,
}

#[derive(Debug, Clone)]
struct User {
    id: u64,
    email: String,
    password: String,
    role: String,
}

#[derive(Debug, Clone)]
struct Patient {
    id: u64,
    public_id: String,
    owner: String,
    pointers: Vec<Value>,
}

#[derive(Debug, Clone)]
struct Consent {
    id: u64,
    patient_id: u64,
    patient_public_id: String,
    grantee_email: String,
    scope: String,
    expires_at: DateTime<Utc>,
    revoked: bool,
    created_at: DateTime<Utc>,
}

impl Consent {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "patient_id": self.patient_id,
            "patient_public_id": self.patient_public_id,
            "grantee_email": self.grantee_email,
            "scope": self.scope,
            "expires_at": self.expires_at.to_rfc3339(),
            "revoked": self.revoked,
            "created_at": self.created_at.to_rfc3339(),
        })
    }

    fn covers(&self, scope: &str, now: DateTime<Utc>) -> bool {
        !self.revoked && now <= self.expires_at && (self.scope == "all" || self.scope == scope)
    }
}

#[derive(Default)]
struct Db {
    next_id: u64,
    users: HashMap<String, User>,
    patients: HashMap<String, Patient>,
    consents: Vec<Consent>,
    hospital_selection: HashMap<String, Value>,
    provider_selection: HashMap<String, Value>,
    fixed_token: Option<String>,
    static_tokens: HashMap<String, String>,
    failures: HashMap<String, (u16, String)>,
    requests: Vec<RecordedRequest>,
}

impl Db {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

type Shared = Arc<Mutex<Db>>;
type Reply = Result<Json<Value>, (StatusCode, Json<Value>)>;

fn reject(status: StatusCode, detail: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "detail": detail })))
}

pub struct MockBackend {
    pub base_url: String,
    db: Shared,
}

impl MockBackend {
    /// Start a backend on a random port
    pub async fn start() -> Self {
        let db: Shared = Arc::new(Mutex::new(Db::default()));
        let app = router(db.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            db,
        }
    }

    pub fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::default();
        config.api.base_url = self.base_url.clone();
        config.api.timeout_secs = 5;
        config
    }

    /// Client over a fresh in-memory session
    pub fn client(&self) -> ApiClient {
        self.client_with(Session::in_memory(), AuthFailureDetection::Status)
    }

    pub fn client_with(&self, session: Session, detection: AuthFailureDetection) -> ApiClient {
        let mut config = self.config();
        config.auth.failure_detection = detection;
        ApiClient::new(&config, session).unwrap()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.db.lock().unwrap().requests.clone()
    }

    /// Most recent request whose path starts with `prefix`
    pub fn last_request(&self, prefix: &str) -> Option<RecordedRequest> {
        self.requests()
            .into_iter()
            .rev()
            .find(|r| r.uri.starts_with(prefix))
    }

    /// Answer every request to `path` with `status` and the raw `body`
    pub fn fail(&self, path: &str, status: u16, body: &str) {
        self.db
            .lock()
            .unwrap()
            .failures
            .insert(path.to_string(), (status, body.to_string()));
    }

    pub fn clear_failures(&self) {
        self.db.lock().unwrap().failures.clear();
    }

    /// Login and register hand out `token` instead of a signed JWT
    pub fn use_fixed_token(&self, token: &str) {
        self.db.lock().unwrap().fixed_token = Some(token.to_string());
    }

    pub fn seed_user(&self, email: &str, password: &str, role: &str) {
        let mut db = self.db.lock().unwrap();
        let id = db.next_id();
        db.users.insert(
            email.to_string(),
            User {
                id,
                email: email.to_string(),
                password: password.to_string(),
                role: role.to_string(),
            },
        );
    }

    pub fn consent_revoked(&self, consent_id: &str) -> Option<bool> {
        let db = self.db.lock().unwrap();
        db.consents
            .iter()
            .find(|c| c.id.to_string() == consent_id)
            .map(|c| c.revoked)
    }
}

fn router(db: Shared) -> Router {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/patients", post(create_patient))
        .route("/patients/{pid}/pointers", post(add_pointer))
        .route(
            "/patients/{pid}/consents",
            post(grant_consent).get(list_patient_consents),
        )
        .route("/patients/{pid}/records", get(patient_records))
        .route("/consents/{id}/revoke", post(revoke_consent))
        .route("/me/consents", get(my_consents))
        .route("/me/patient", post(self_register))
        .route("/me/records", get(my_records))
        .route("/me/pointers", post(add_my_pointer))
        .route("/me/catalog", post(create_from_catalog))
        .route("/cms/hospitals", get(cms_hospitals))
        .route("/cms/providers", get(cms_providers))
        .route(
            "/me/hospital-selection",
            get(get_hospital_selection).put(put_hospital_selection),
        )
        .route(
            "/me/provider-selection",
            get(get_provider_selection)
                .put(put_provider_selection)
                .delete(delete_provider_selection),
        )
        .layer(axum::middleware::from_fn_with_state(db.clone(), record))
        .with_state(db)
}

/// Records the request, then applies any injected failure for its path
async fn record(State(db): State<Shared>, request: Request, next: Next) -> Response {
    // Nothing borrowed from the request may live across the await below
    let failure = {
        let headers = request.headers();
        let recorded = RecordedRequest {
            method: request.method().to_string(),
            uri: request
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str().to_string())
                .unwrap_or_default(),
            authorization: header_value(headers, "authorization"),
            content_type: header_value(headers, "content-type"),
            accept: header_value(headers, "accept"),
        };
        let mut db = db.lock().unwrap();
        db.requests.push(recorded);
        db.failures.get(request.uri().path()).cloned()
    };
    if let Some((status, body)) = failure {
        let status = StatusCode::from_u16(status).unwrap();
        return (status, body).into_response();
    }

    next.run(request).await
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn issue_token(db: &mut Db, user: &User) -> String {
    if let Some(token) = db.fixed_token.clone() {
        db.static_tokens.insert(token.clone(), user.email.clone());
        return token;
    }
    let claims = Claims {
        sub: user.email.clone(),
        role: user.role.clone(),
        exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
    };
    jsonwebtoken::encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET)).unwrap()
}

/// Resolve the bearer token to a user
fn authenticate(db: &Db, headers: &HeaderMap) -> Result<User, (StatusCode, Json<Value>)> {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "Not authenticated"))?;

    let email = match db.static_tokens.get(token) {
        Some(email) => email.clone(),
        None => {
            jsonwebtoken::decode::<Claims>(
                token,
                &DecodingKey::from_secret(SECRET),
                &Validation::default(),
            )
            .map_err(|_| reject(StatusCode::UNAUTHORIZED, "Invalid token"))?
            .claims
            .sub
        }
    };

    db.users
        .get(&email)
        .cloned()
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "Invalid token"))
}

fn require_role(user: &User, role: &str) -> Result<(), (StatusCode, Json<Value>)> {
    if user.role != role {
        return Err(reject(
            StatusCode::FORBIDDEN,
            &format!("{} role required", role),
        ));
    }
    Ok(())
}

#[derive(Deserialize)]
struct CredentialsBody {
    email: String,
    password: String,
    role: String,
}

async fn register(State(db): State<Shared>, Json(body): Json<CredentialsBody>) -> Reply {
    let mut db = db.lock().unwrap();
    if db.users.contains_key(&body.email) {
        return Err(reject(StatusCode::BAD_REQUEST, "Email already registered"));
    }
    let id = db.next_id();
    let user = User {
        id,
        email: body.email.clone(),
        password: body.password,
        role: body.role,
    };
    db.users.insert(body.email, user.clone());
    let token = issue_token(&mut db, &user);
    Ok(Json(json!({ "access_token": token, "token_type": "bearer" })))
}

async fn login(State(db): State<Shared>, Json(body): Json<CredentialsBody>) -> Reply {
    let mut db = db.lock().unwrap();
    let user = match db.users.get(&body.email) {
        Some(u) if u.password == body.password && u.role == body.role => u.clone(),
        _ => return Err(reject(StatusCode::UNAUTHORIZED, "Invalid credentials")),
    };
    let token = issue_token(&mut db, &user);
    Ok(Json(json!({ "access_token": token, "token_type": "bearer" })))
}

async fn me(State(db): State<Shared>, headers: HeaderMap) -> Reply {
    let db = db.lock().unwrap();
    let user = authenticate(&db, &headers)?;
    Ok(Json(json!({ "id": user.id, "email": user.email, "role": user.role })))
}

fn new_patient(db: &mut Db, owner: &str) -> Patient {
    let id = db.next_id();
    let patient = Patient {
        id,
        public_id: format!("MED-{}", db.patients.len() + 1),
        owner: owner.to_string(),
        pointers: Vec::new(),
    };
    db.patients.insert(patient.public_id.clone(), patient.clone());
    patient
}

async fn create_patient(State(db): State<Shared>, headers: HeaderMap) -> Reply {
    let mut db = db.lock().unwrap();
    let user = authenticate(&db, &headers)?;
    require_role(&user, "guardian")?;
    let patient = new_patient(&mut db, &user.email);
    Ok(Json(json!({ "id": patient.id, "public_id": patient.public_id })))
}

#[derive(Deserialize)]
struct DobBody {
    dob: String,
}

async fn self_register(
    State(db): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<DobBody>,
) -> Reply {
    let mut db = db.lock().unwrap();
    let user = authenticate(&db, &headers)?;
    require_role(&user, "patient")?;
    if chrono::NaiveDate::parse_from_str(&body.dob, "%Y-%m-%d").is_err() {
        return Err(reject(StatusCode::UNPROCESSABLE_ENTITY, "Invalid date of birth"));
    }
    if let Some(existing) = db.patients.values().find(|p| p.owner == user.email) {
        return Ok(Json(json!({ "id": existing.id, "public_id": existing.public_id })));
    }
    let patient = new_patient(&mut db, &user.email);
    Ok(Json(json!({ "id": patient.id, "public_id": patient.public_id })))
}

/// Patient owned by the caller (guardian of it, or the patient account itself)
fn owned_patient<'a>(
    db: &'a mut Db,
    user: &User,
    public_id: &str,
) -> Result<&'a mut Patient, (StatusCode, Json<Value>)> {
    let patient = db
        .patients
        .get_mut(public_id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Patient not found"))?;
    if patient.owner != user.email {
        return Err(reject(StatusCode::FORBIDDEN, "Not allowed for this patient"));
    }
    Ok(patient)
}

fn own_record_id(db: &Db, user: &User) -> Result<String, (StatusCode, Json<Value>)> {
    db.patients
        .values()
        .find(|p| p.owner == user.email)
        .map(|p| p.public_id.clone())
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "No patient record for this account"))
}

fn resource_type(scope: &str) -> &'static str {
    match scope {
        "immunizations" => "Immunization",
        "allergies" => "AllergyIntolerance",
        _ => "Condition",
    }
}

fn pointer_json(scope: &str, resource_id: &str, issuer: &str, display: Option<&str>) -> Value {
    let mut resource = json!({
        "resourceType": resource_type(scope),
        "id": resource_id,
    });
    if let Some(display) = display {
        resource["code"] = json!({ "text": display });
    }
    json!({
        "id": uuid::Uuid::new_v4().to_string(),
        "issuer": issuer,
        "scope": scope,
        "resource": resource,
    })
}

#[derive(Deserialize)]
struct PointerBody {
    record_type: String,
    fhir_resource_type: String,
    fhir_resource_id: String,
    issuer: String,
}

async fn add_pointer(
    State(db): State<Shared>,
    Path(pid): Path<String>,
    headers: HeaderMap,
    Json(body): Json<PointerBody>,
) -> Reply {
    let mut db = db.lock().unwrap();
    let user = authenticate(&db, &headers)?;
    require_role(&user, "guardian")?;
    let patient = owned_patient(&mut db, &user, &pid)?;
    let mut pointer = pointer_json(&body.record_type, &body.fhir_resource_id, &body.issuer, None);
    pointer["resource"]["resourceType"] = json!(body.fhir_resource_type);
    patient.pointers.push(pointer.clone());
    Ok(Json(pointer))
}

#[derive(Deserialize)]
struct GrantBody {
    grantee_email: String,
    scope: String,
    expires_at: String,
}

async fn grant_consent(
    State(db): State<Shared>,
    Path(pid): Path<String>,
    headers: HeaderMap,
    Json(body): Json<GrantBody>,
) -> Reply {
    let mut db = db.lock().unwrap();
    let user = authenticate(&db, &headers)?;
    let patient_id = owned_patient(&mut db, &user, &pid)?.id;
    let expires_at = DateTime::parse_from_rfc3339(&body.expires_at)
        .map_err(|_| reject(StatusCode::UNPROCESSABLE_ENTITY, "Invalid expires_at"))?
        .with_timezone(&Utc);
    let id = db.next_id();
    let consent = Consent {
        id,
        patient_id,
        patient_public_id: pid,
        grantee_email: body.grantee_email,
        scope: body.scope,
        expires_at,
        revoked: false,
        created_at: Utc::now(),
    };
    db.consents.push(consent.clone());
    Ok(Json(consent.to_json()))
}

fn consents_of(db: &Db, public_id: &str) -> Value {
    Value::Array(
        db.consents
            .iter()
            .filter(|c| c.patient_public_id == public_id)
            .map(Consent::to_json)
            .collect(),
    )
}

async fn list_patient_consents(
    State(db): State<Shared>,
    Path(pid): Path<String>,
    headers: HeaderMap,
) -> Reply {
    let mut db = db.lock().unwrap();
    let user = authenticate(&db, &headers)?;
    owned_patient(&mut db, &user, &pid)?;
    Ok(Json(consents_of(&db, &pid)))
}

async fn my_consents(State(db): State<Shared>, headers: HeaderMap) -> Reply {
    let db = db.lock().unwrap();
    let user = authenticate(&db, &headers)?;
    let pid = own_record_id(&db, &user)?;
    Ok(Json(consents_of(&db, &pid)))
}

async fn revoke_consent(
    State(db): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Reply {
    let mut db = db.lock().unwrap();
    let user = authenticate(&db, &headers)?;
    let owners: HashMap<String, String> = db
        .patients
        .values()
        .map(|p| (p.public_id.clone(), p.owner.clone()))
        .collect();
    let consent = db
        .consents
        .iter_mut()
        .find(|c| c.id.to_string() == id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Consent not found"))?;
    if owners.get(&consent.patient_public_id) != Some(&user.email) {
        return Err(reject(StatusCode::FORBIDDEN, "Not allowed for this consent"));
    }
    if consent.revoked {
        return Ok(Json(json!({ "consent_id": consent.id, "status": "already_revoked" })));
    }
    consent.revoked = true;
    Ok(Json(json!({ "consent_id": consent.id, "status": "revoked" })))
}

fn records_page(patient: &Patient, scope: &str) -> Value {
    let records: Vec<Value> = patient
        .pointers
        .iter()
        .filter(|p| scope == "all" || p["scope"] == scope)
        .cloned()
        .collect();
    json!({ "patient_id": patient.public_id, "scope": scope, "records": records })
}

async fn patient_records(
    State(db): State<Shared>,
    Path(pid): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Reply {
    let db = db.lock().unwrap();
    let user = authenticate(&db, &headers)?;
    let scope = query.get("scope").cloned().unwrap_or_else(|| "all".to_string());
    let patient = db
        .patients
        .get(&pid)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Patient not found"))?;

    if patient.owner != user.email {
        let now = Utc::now();
        let allowed = db.consents.iter().any(|c| {
            c.patient_public_id == pid && c.grantee_email == user.email && c.covers(&scope, now)
        });
        if !allowed {
            return Err(reject(StatusCode::FORBIDDEN, "No active consent for this scope"));
        }
    }
    Ok(Json(records_page(patient, &scope)))
}

async fn my_records(
    State(db): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Reply {
    let db = db.lock().unwrap();
    let user = authenticate(&db, &headers)?;
    let pid = own_record_id(&db, &user)?;
    let scope = query.get("scope").cloned().unwrap_or_else(|| "all".to_string());
    Ok(Json(records_page(&db.patients[&pid], &scope)))
}

#[derive(Deserialize)]
struct MyPointerBody {
    scope: String,
    fhir_resource_id: String,
    issuer: Option<String>,
}

async fn add_my_pointer(
    State(db): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<MyPointerBody>,
) -> Reply {
    let mut db = db.lock().unwrap();
    let user = authenticate(&db, &headers)?;
    let pid = own_record_id(&db, &user)?;
    let issuer = body.issuer.unwrap_or_else(|| "Patient reported".to_string());
    let pointer = pointer_json(&body.scope, &body.fhir_resource_id, &issuer, None);
    if let Some(patient) = db.patients.get_mut(&pid) {
        patient.pointers.push(pointer.clone());
    }
    Ok(Json(pointer))
}

#[derive(Deserialize)]
struct CatalogBody {
    scope: String,
    display: String,
    issuer: Option<String>,
}

async fn create_from_catalog(
    State(db): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<CatalogBody>,
) -> Reply {
    let mut db = db.lock().unwrap();
    let user = authenticate(&db, &headers)?;
    let pid = own_record_id(&db, &user)?;
    let resource_id = uuid::Uuid::new_v4().to_string();
    let issuer = body.issuer.unwrap_or_else(|| "Patient reported".to_string());
    let pointer = pointer_json(&body.scope, &resource_id, &issuer, Some(&body.display));
    let pointer_id = pointer["id"].clone();
    if let Some(patient) = db.patients.get_mut(&pid) {
        patient.pointers.push(pointer);
    }
    Ok(Json(json!({
        "resource_type": resource_type(&body.scope),
        "resource_id": resource_id,
        "pointer_id": pointer_id,
    })))
}

fn hospitals() -> Vec<Value> {
    vec![
        json!({"name": "St. Mary Medical Center", "ccn": "140001", "address": "1 Main St", "city": "Springfield", "state": "IL", "zip": "62701", "phone": "217-555-0100"}),
        json!({"name": "Mercy General Hospital", "ccn": "050017", "city": "Sacramento", "state": "CA", "zip": "95819"}),
        json!({"name": "Mary Washington Hospital", "ccn": "490022", "city": "Fredericksburg", "state": "VA", "zip": "22401"}),
    ]
}

fn providers() -> Vec<Value> {
    vec![
        json!({"npi": "1234567890", "name": "Jane Smith", "city": "Springfield", "state": "IL", "taxonomy_desc": "Pediatrics"}),
        json!({"npi": "2345678901", "name": "John Smithers", "city": "Sacramento", "state": "CA", "taxonomy_desc": "Family Medicine"}),
        json!({"npi": "3456789012", "name": "Ana Lopez", "city": "Springfield", "state": "IL", "taxonomy_desc": "Allergy & Immunology"}),
    ]
}

fn field_matches(entry: &Value, field: &str, filter: Option<&String>) -> bool {
    match filter {
        None => true,
        Some(f) => entry[field]
            .as_str()
            .is_some_and(|v| v.to_lowercase().contains(&f.to_lowercase())),
    }
}

fn page(all: Vec<Value>, query: &HashMap<String, String>) -> Value {
    let limit: usize = query.get("limit").and_then(|v| v.parse().ok()).unwrap_or(20);
    let skip: usize = query.get("skip").and_then(|v| v.parse().ok()).unwrap_or(0);
    let count = all.len();
    let results: Vec<Value> = all.into_iter().skip(skip).take(limit).collect();
    json!({ "results": results, "count": count })
}

async fn cms_hospitals(Query(query): Query<HashMap<String, String>>) -> Reply {
    let found: Vec<Value> = hospitals()
        .into_iter()
        .filter(|h| {
            field_matches(h, "name", query.get("name"))
                && field_matches(h, "city", query.get("city"))
                && field_matches(h, "state", query.get("state"))
                && field_matches(h, "zip", query.get("zip"))
        })
        .collect();
    Ok(Json(page(found, &query)))
}

async fn cms_providers(Query(query): Query<HashMap<String, String>>) -> Reply {
    let found: Vec<Value> = providers()
        .into_iter()
        .filter(|p| {
            field_matches(p, "name", query.get("last_name"))
                && field_matches(p, "name", query.get("first_name"))
                && field_matches(p, "city", query.get("city"))
                && field_matches(p, "state", query.get("state"))
                && field_matches(p, "taxonomy_desc", query.get("taxonomy"))
        })
        .collect();
    Ok(Json(page(found, &query)))
}

async fn get_hospital_selection(State(db): State<Shared>, headers: HeaderMap) -> Reply {
    let db = db.lock().unwrap();
    let user = authenticate(&db, &headers)?;
    Ok(Json(
        db.hospital_selection
            .get(&user.email)
            .cloned()
            .unwrap_or(Value::Null),
    ))
}

async fn put_hospital_selection(
    State(db): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let mut db = db.lock().unwrap();
    let user = authenticate(&db, &headers)?;
    db.hospital_selection.insert(user.email, body.clone());
    Ok(Json(body))
}

async fn get_provider_selection(State(db): State<Shared>, headers: HeaderMap) -> Reply {
    let db = db.lock().unwrap();
    let user = authenticate(&db, &headers)?;
    Ok(Json(
        db.provider_selection
            .get(&user.email)
            .cloned()
            .unwrap_or(Value::Null),
    ))
}

async fn put_provider_selection(
    State(db): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let mut db = db.lock().unwrap();
    let user = authenticate(&db, &headers)?;
    db.provider_selection.insert(user.email, body.clone());
    Ok(Json(body))
}

async fn delete_provider_selection(State(db): State<Shared>, headers: HeaderMap) -> Reply {
    let mut db = db.lock().unwrap();
    let user = authenticate(&db, &headers)?;
    db.provider_selection.remove(&user.email);
    Ok(Json(json!({ "status": "cleared" })))
}
