use sea_orm::DatabaseConnection;

use crate::infra::db::DbUserRepository;

/// Shared application state passed to every handler via axum `State`.
///
/// Generic over the repository so tests can swap storage out.
#[derive(Clone)]
pub struct AppState<R = DbUserRepository> {
    pub users: R,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: DbUserRepository { db },
        }
    }
}
