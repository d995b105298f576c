/// Persisted user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub lastname: String,
    pub age: i32,
    pub email: String,
}

/// Fields for a user that does not exist yet; storage assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub lastname: String,
    pub age: i32,
    pub email: String,
}

/// Coalesce-style update: `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub lastname: Option<String>,
    pub age: Option<i32>,
    pub email: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.lastname.is_none() && self.age.is_none() && self.email.is_none()
    }

    /// Apply the supplied fields onto `user`, leaving the rest untouched.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name.clone_from(name);
        }
        if let Some(lastname) = &self.lastname {
            user.lastname.clone_from(lastname);
        }
        if let Some(age) = self.age {
            user.age = age;
        }
        if let Some(email) = &self.email {
            user.email.clone_from(email);
        }
    }
}
