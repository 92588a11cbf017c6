use actix_web::http::StatusCode;
use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer, ResponseError, Result};
use actix_files::Files;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

use crate::config::TimelineConfig;
use crate::error::LayoutError;
use crate::parser::read_appointments;
use crate::timeline::{
    build_blocks, build_day_view, slot_time_at, Appointment, AppointmentStatus, DEFAULT_DURATION_MINUTES,
};

// In-memory appointment book (persistence lives outside this service)
pub struct AppState {
    pub appointments: Mutex<Option<Vec<Appointment>>>,
    pub admin_password: String,
    pub config: TimelineConfig,
}

impl AppState {
    pub fn new(admin_password: String, config: TimelineConfig, book: Option<Vec<Appointment>>) -> Self {
        Self {
            appointments: Mutex::new(book),
            admin_password,
            config,
        }
    }

    fn book(&self) -> Result<MutexGuard<'_, Option<Vec<Appointment>>>> {
        self.appointments
            .lock()
            .map_err(|_| actix_web::error::ErrorInternalServerError("appointment book lock poisoned"))
    }
}

#[derive(Deserialize)]
pub struct SlotQuery {
    y: f64,
    date: Option<NaiveDate>,
}

// Posted appointment, `time` as raw text parsed by `TimeOfDay`
#[derive(Deserialize)]
pub struct AppointmentPayload {
    id: String,
    date: NaiveDate,
    time: String,
    #[serde(default = "default_duration")]
    duration_minutes: i32,
    #[serde(default)]
    status: AppointmentStatus,
    #[serde(default)]
    patient_name: String,
    #[serde(default)]
    visit_reason: Option<String>,
}

fn default_duration() -> i32 {
    DEFAULT_DURATION_MINUTES
}

impl TryFrom<AppointmentPayload> for Appointment {
    type Error = LayoutError;

    fn try_from(payload: AppointmentPayload) -> Result<Self, Self::Error> {
        Ok(Appointment {
            id: payload.id,
            date: payload.date,
            start: payload.time.parse()?,
            duration_minutes: payload.duration_minutes,
            status: payload.status,
            patient_name: payload.patient_name,
            visit_reason: payload.visit_reason,
        })
    }
}

#[derive(Serialize)]
pub struct SlotResponse {
    date: Option<NaiveDate>,
    time: String,
}

impl ResponseError for LayoutError {
    fn status_code(&self) -> StatusCode {
        match self {
            LayoutError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "code": self.code(),
            "error": self.to_string(),
        }))
    }
}

fn json_error(status: StatusCode, code: &str, error: String) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({
        "success": false,
        "code": code,
        "error": error,
    }))
}

// Day timeline endpoint
async fn get_day_timeline(
    date: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let date = match NaiveDate::parse_from_str(date.as_str(), "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => {
            return Ok(json_error(
                StatusCode::BAD_REQUEST,
                "INVALID_DATE",
                format!("Invalid date '{}', expected YYYY-MM-DD", date.as_str()),
            ))
        }
    };

    let book = state.book()?;
    let Some(ref appointments) = *book else {
        return Ok(json_error(
            StatusCode::NOT_FOUND,
            "NO_APPOINTMENTS",
            "No appointment book loaded".to_string(),
        ));
    };

    let view = build_day_view(appointments, date, Local::now().naive_local(), &state.config)?;
    Ok(HttpResponse::Ok().json(view))
}

// Ad-hoc layout endpoint: lays out whatever list is posted
async fn layout_appointments(
    body: web::Json<Vec<AppointmentPayload>>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let appointments = body
        .into_inner()
        .into_iter()
        .map(Appointment::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let blocks = build_blocks(&appointments, &state.config)?;
    Ok(HttpResponse::Ok().json(blocks))
}

// Clicked time slot -> whole-hour prefill for the new-appointment form
async fn slot_at(
    query: web::Query<SlotQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let time = slot_time_at(query.y, &state.config);
    Ok(HttpResponse::Ok().json(SlotResponse {
        date: query.date,
        time: time.to_string(),
    }))
}

// Admin CSV upload endpoint
async fn admin_upload(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    // Check password from header
    let password = req
        .headers()
        .get("X-Admin-Password")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if password != state.admin_password {
        warn!("rejected appointment upload with bad password");
        return Ok(json_error(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Unauthorized".to_string()));
    }

    match read_appointments(body.as_ref()) {
        Ok(appointments) => {
            let count = appointments.len();
            *state.book()? = Some(appointments);
            info!(appointments = count, "appointment book replaced by upload");

            Ok(HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "message": format!("Loaded {} appointment(s)", count),
            })))
        }
        Err(e) => Ok(json_error(
            StatusCode::BAD_REQUEST,
            "INVALID_CSV",
            format!("Failed to process CSV: {}", e),
        )),
    }
}

// HTML page handler
async fn timeline_page() -> Result<HttpResponse> {
    let html = include_str!("../templates/timeline.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

fn layout_json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = json_error(StatusCode::UNPROCESSABLE_ENTITY, "INVALID_PAYLOAD", err.to_string());
        actix_web::error::InternalError::from_response(err, response).into()
    })
}

/// API and page routes, shared by the server and the handler tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(timeline_page))
        .route("/api/upload", web::post().to(admin_upload))
        .route("/api/timeline/slot", web::get().to(slot_at))
        .service(
            web::resource("/api/timeline/layout")
                .app_data(layout_json_config())
                .route(web::post().to(layout_appointments)),
        )
        .service(web::resource("/api/timeline/{date}").route(web::get().to(get_day_timeline)));
}

pub async fn start_server(port: u16, state: AppState) -> std::io::Result<()> {
    let app_state = web::Data::new(state);
    info!(port, "starting timeline web server");

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .service(Files::new("/static", "static"))
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
