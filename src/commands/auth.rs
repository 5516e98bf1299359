use crate::auth::{self, ApiClient, LoginRequest, RegisterRequest, Session, SessionStore};
use crate::config::AppConfig;
use crate::db::DatabaseExt;
use crate::models::Employee;
use tauri::{AppHandle, Manager};

fn api_client(app: &AppHandle) -> ApiClient {
    ApiClient::new(app.state::<AppConfig>().api_base_url.clone())
}

#[tauri::command]
pub async fn login(app: AppHandle, request: LoginRequest) -> Result<Session, String> {
    let client = api_client(&app);
    let response = client.login(&request).await.map_err(|e| e.to_string())?;

    let session = Session::from(response);
    app.state::<SessionStore>()
        .save(&session)
        .map_err(|e| e.to_string())?;

    Ok(session)
}

#[tauri::command]
pub async fn register(app: AppHandle, request: RegisterRequest) -> Result<(), String> {
    let client = api_client(&app);
    client.register(&request).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub fn logout(app: AppHandle) -> Result<(), String> {
    app.state::<SessionStore>().clear().map_err(|e| e.to_string())
}

#[tauri::command]
pub fn get_session(app: AppHandle) -> Result<Option<Session>, String> {
    app.state::<SessionStore>().load().map_err(|e| e.to_string())
}

/// Employee record of the signed-in user
#[tauri::command]
pub fn get_authenticated_employee(app: AppHandle) -> Result<Option<Employee>, String> {
    let Some(session) = app
        .state::<SessionStore>()
        .load()
        .map_err(|e| e.to_string())?
    else {
        return Ok(None);
    };

    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    auth::authenticated_employee(&conn, &session).map_err(|e| e.to_string())
}
