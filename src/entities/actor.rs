use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Actors and directors share one table; the role comes from which
/// junction table links them to a movie.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "actor")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub description: String,
    pub image: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::movie_director::Entity")]
    MovieDirector,
    #[sea_orm(has_many = "super::movie_actor::Entity")]
    MovieActor,
}

impl ActiveModelBehavior for ActiveModel {}
