use std::future::Future;

use crate::domain::types::{NewUser, User, UserChanges};
use crate::error::UsersServiceError;

/// Storage for the user resource.
///
/// Every method fails with [`UsersServiceError::UserNotFound`] when the id
/// matches no row and with [`UsersServiceError::Internal`] on any other
/// storage failure.
pub trait UserRepository: Send + Sync {
    fn read_user(&self, id: i64) -> impl Future<Output = Result<User, UsersServiceError>> + Send;

    /// Insert a row and return it with the id storage assigned.
    fn create_user(
        &self,
        user: &NewUser,
    ) -> impl Future<Output = Result<User, UsersServiceError>> + Send;

    fn update_user(
        &self,
        id: i64,
        changes: &UserChanges,
    ) -> impl Future<Output = Result<User, UsersServiceError>> + Send;

    fn partial_update_user(
        &self,
        id: i64,
        changes: &UserChanges,
    ) -> impl Future<Output = Result<User, UsersServiceError>> + Send;

    fn delete_user(&self, id: i64) -> impl Future<Output = Result<(), UsersServiceError>> + Send;
}
