use std::sync::Arc;

use axum::{
    extract::{State, Extension},
    Json,
};

use shared_config::AppConfig;
use shared_database::SupabaseStore;
use shared_models::auth::Session;

use crate::models::DoctorDirectoryView;
use crate::services::DoctorDirectoryController;

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<AppConfig>>,
    session: Option<Extension<Session>>,
) -> Json<DoctorDirectoryView> {
    let session = session.map(|Extension(session)| session);
    let store = Arc::new(SupabaseStore::new(&state, session.as_ref()));

    let mut directory = DoctorDirectoryController::new(store, session.is_some());
    directory.load().await;

    Json(directory.view())
}
