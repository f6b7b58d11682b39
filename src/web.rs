use actix_web::http::{header, StatusCode};
use actix_web::{middleware, web, App, HttpResponse, HttpServer, ResponseError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Mutex, MutexGuard};
use tracing::{info, warn};
use crate::display::{export_file_name, format_schedule_report};
use crate::error::ScheduleError;
use crate::roster::Roster;
use crate::schedule::{
    parse_count, projected_workloads, Day, EmployeeId, Schedule, TimeSlot, WorkloadPolicy,
};

/// Everything the host keeps between requests
#[derive(Debug, Default)]
pub struct Workspace {
    pub roster: Roster,
    pub policy: WorkloadPolicy,
    pub schedule: Option<Schedule>,
}

impl Workspace {
    pub fn new(roster: Roster, policy: WorkloadPolicy) -> Self {
        Self { roster, policy, schedule: None }
    }
}

/// Shared state; one lock covers the roster, requirements and last schedule
/// so a generation pass always sees a consistent snapshot
pub struct AppState {
    pub workspace: Mutex<Workspace>,
}

impl AppState {
    pub fn new(workspace: Workspace) -> Self {
        Self { workspace: Mutex::new(workspace) }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Workspace>, ApiError> {
        self.workspace.lock().map_err(|_| ApiError::LockPoisoned)
    }
}

#[derive(Debug)]
pub enum ApiError {
    Schedule(ScheduleError),
    NoSchedule,
    LockPoisoned,
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::Schedule(ScheduleError::EmptyName) => "EMPTY_NAME",
            ApiError::Schedule(ScheduleError::DuplicateName(_)) => "DUPLICATE_NAME",
            ApiError::Schedule(ScheduleError::EmptyRoster) => "EMPTY_ROSTER",
            ApiError::NoSchedule => "NO_SCHEDULE",
            ApiError::LockPoisoned => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Schedule(e) => write!(f, "{}", e),
            ApiError::NoSchedule => f.write_str("Please generate a schedule first"),
            ApiError::LockPoisoned => f.write_str("Planner state is unavailable"),
        }
    }
}

impl From<ScheduleError> for ApiError {
    fn from(e: ScheduleError) -> Self {
        ApiError::Schedule(e)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Schedule(ScheduleError::EmptyName) => StatusCode::BAD_REQUEST,
            ApiError::Schedule(ScheduleError::DuplicateName(_)) => StatusCode::CONFLICT,
            ApiError::Schedule(ScheduleError::EmptyRoster) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NoSchedule => StatusCode::NOT_FOUND,
            ApiError::LockPoisoned => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            code: self.code(),
            message: self.to_string(),
        })
    }
}

type ApiResult = Result<HttpResponse, ApiError>;

#[derive(Deserialize)]
pub struct AddEmployeeRequest {
    name: String,
}

#[derive(Deserialize)]
pub struct AvailabilityRequest {
    day: Day,
    slot: TimeSlot,
    available: bool,
}

#[derive(Deserialize)]
pub struct RequirementRequest {
    day: Day,
    slot: TimeSlot,
    /// Number or free text as typed into the form
    count: serde_json::Value,
}

#[derive(Serialize)]
pub struct RequirementResponse {
    day: Day,
    slot: TimeSlot,
    count: u8,
}

#[derive(Serialize)]
pub struct WorkloadEntry {
    id: EmployeeId,
    name: String,
    workload: usize,
}

/// Interprets a headcount field; anything that is not a number counts as 0
fn requirement_count(value: &serde_json::Value) -> i64 {
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        serde_json::Value::String(s) => parse_count(s),
        _ => 0,
    }
}

async fn list_employees(state: web::Data<AppState>) -> ApiResult {
    let workspace = state.lock()?;
    Ok(HttpResponse::Ok().json(workspace.roster.employees()))
}

async fn add_employee(
    req: web::Json<AddEmployeeRequest>,
    state: web::Data<AppState>,
) -> ApiResult {
    let mut workspace = state.lock()?;
    match workspace.roster.add_employee(&req.name) {
        Ok(employee) => Ok(HttpResponse::Created().json(employee)),
        Err(e) => {
            warn!(error = %e, "employee rejected");
            Err(e.into())
        }
    }
}

async fn delete_employee(id: web::Path<u64>, state: web::Data<AppState>) -> ApiResult {
    let mut workspace = state.lock()?;
    workspace.roster.delete_employee(EmployeeId(id.into_inner()));
    Ok(HttpResponse::NoContent().finish())
}

async fn set_availability(
    id: web::Path<u64>,
    req: web::Json<AvailabilityRequest>,
    state: web::Data<AppState>,
) -> ApiResult {
    let mut workspace = state.lock()?;
    workspace
        .roster
        .set_availability(EmployeeId(id.into_inner()), req.day, req.slot, req.available);
    Ok(HttpResponse::NoContent().finish())
}

async fn get_requirements(state: web::Data<AppState>) -> ApiResult {
    let workspace = state.lock()?;
    Ok(HttpResponse::Ok().json(workspace.roster.requirements()))
}

async fn set_requirement(
    req: web::Json<RequirementRequest>,
    state: web::Data<AppState>,
) -> ApiResult {
    let mut workspace = state.lock()?;
    let count = workspace
        .roster
        .set_requirement(req.day, req.slot, requirement_count(&req.count));
    Ok(HttpResponse::Ok().json(RequirementResponse {
        day: req.day,
        slot: req.slot,
        count,
    }))
}

async fn get_workloads(state: web::Data<AppState>) -> ApiResult {
    let workspace = state.lock()?;
    let entries: Vec<WorkloadEntry> =
        projected_workloads(workspace.roster.employees(), workspace.roster.requirements())
            .into_iter()
            .map(|(assignee, workload)| WorkloadEntry {
                id: assignee.id,
                name: assignee.name,
                workload,
            })
            .collect();
    Ok(HttpResponse::Ok().json(entries))
}

async fn generate_schedule(state: web::Data<AppState>) -> ApiResult {
    // Held for the whole pass
    let mut workspace = state.lock()?;
    let schedule = match workspace.roster.generate_schedule(workspace.policy) {
        Ok(schedule) => schedule,
        Err(e) => {
            warn!(error = %e, "schedule generation refused");
            return Err(e.into());
        }
    };
    let response = HttpResponse::Ok().json(&schedule);
    workspace.schedule = Some(schedule);
    Ok(response)
}

async fn get_schedule(state: web::Data<AppState>) -> ApiResult {
    let workspace = state.lock()?;
    let schedule = workspace.schedule.as_ref().ok_or(ApiError::NoSchedule)?;
    Ok(HttpResponse::Ok().json(schedule))
}

async fn export_schedule(state: web::Data<AppState>) -> ApiResult {
    let workspace = state.lock()?;
    let schedule = workspace.schedule.as_ref().ok_or(ApiError::NoSchedule)?;
    let file_name = export_file_name(chrono::Local::now().date_naive());
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        ))
        .body(format_schedule_report(schedule)))
}

/// Registers the API routes; shared by the server and the tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::resource("/employees")
                    .route(web::get().to(list_employees))
                    .route(web::post().to(add_employee)),
            )
            .service(web::resource("/employees/{id}").route(web::delete().to(delete_employee)))
            .service(
                web::resource("/employees/{id}/availability")
                    .route(web::put().to(set_availability)),
            )
            .service(
                web::resource("/requirements")
                    .route(web::get().to(get_requirements))
                    .route(web::put().to(set_requirement)),
            )
            .service(web::resource("/workloads").route(web::get().to(get_workloads)))
            .service(
                web::resource("/schedule")
                    .route(web::get().to(get_schedule))
                    .route(web::post().to(generate_schedule)),
            )
            .service(web::resource("/schedule/export").route(web::get().to(export_schedule))),
    );
}

pub async fn start_server(bind: &str, port: u16, workspace: Workspace) -> std::io::Result<()> {
    info!(
        bind,
        port,
        employees = workspace.roster.len(),
        policy = workspace.policy.as_str(),
        "starting web server"
    );
    let app_state = web::Data::new(AppState::new(workspace));

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind((bind, port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_requirement_count() {
        assert_eq!(requirement_count(&json!(3)), 3);
        assert_eq!(requirement_count(&json!(2.9)), 2);
        assert_eq!(requirement_count(&json!(-5)), -5);
        assert_eq!(requirement_count(&json!("7 staff")), 7);
        assert_eq!(requirement_count(&json!("none")), 0);
        assert_eq!(requirement_count(&json!(null)), 0);
        assert_eq!(requirement_count(&json!(true)), 0);
    }

    #[test]
    fn test_error_statuses() {
        assert_eq!(ApiError::from(ScheduleError::EmptyName).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(ScheduleError::DuplicateName("A".into())).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(ScheduleError::EmptyRoster).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ApiError::NoSchedule.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::NoSchedule.to_string(), "Please generate a schedule first");
    }
}
