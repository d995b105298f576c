use sea_orm::entity::prelude::*;

/// Row of the `users` table.
///
/// The table is provisioned out of band:
/// `id BIGSERIAL PRIMARY KEY, name TEXT, lastname TEXT, age INTEGER, email TEXT UNIQUE`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub lastname: String,
    pub age: i32,
    #[sea_orm(unique)]
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
