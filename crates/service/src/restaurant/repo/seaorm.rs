use chrono::Utc;
use sea_orm::sea_query::{extension::postgres::PgExpr, Expr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Select, Set,
    Unchanged,
};
use uuid::Uuid;

use models::restaurant::{ActiveModel, Column, Entity, Model};

use crate::errors::ServiceError;
use crate::restaurant::repository::RestaurantRepository;

pub struct SeaOrmRestaurantRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmRestaurantRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn ordered() -> Select<Entity> {
    Entity::find().order_by_asc(Column::CreatedAt).order_by_asc(Column::Id)
}

/// `%term%` with LIKE metacharacters in `term` taken literally.
fn contains_pattern(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 2);
    out.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

#[async_trait::async_trait]
impl RestaurantRepository for SeaOrmRestaurantRepository {
    async fn insert(&self, r: Model) -> Result<Model, ServiceError> {
        let am = ActiveModel {
            id: Set(r.id),
            name: Set(r.name),
            cuisine: Set(r.cuisine),
            address: Set(r.address),
            city: Set(r.city),
            rating: Set(r.rating),
            menu: Set(r.menu),
            reviews: Set(r.reviews),
            version: Set(r.version),
            created_at: Set(r.created_at),
            updated_at: Set(r.updated_at),
        };
        Ok(am.insert(&self.db).await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Model>, ServiceError> {
        Ok(Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn list(&self) -> Result<Vec<Model>, ServiceError> {
        Ok(ordered().all(&self.db).await?)
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Model>, ServiceError> {
        Ok(ordered().filter(Column::Name.eq(name)).all(&self.db).await?)
    }

    async fn find_by_cuisine(&self, cuisine: &str) -> Result<Vec<Model>, ServiceError> {
        Ok(ordered().filter(Column::Cuisine.eq(cuisine)).all(&self.db).await?)
    }

    async fn find_by_location(&self, term: &str) -> Result<Vec<Model>, ServiceError> {
        let pattern = contains_pattern(term);
        let cond = Condition::any()
            .add(Expr::col((Entity, Column::Address)).ilike(pattern.as_str()))
            .add(Expr::col((Entity, Column::City)).ilike(pattern.as_str()));
        Ok(ordered().filter(cond).all(&self.db).await?)
    }

    async fn find_by_min_rating(&self, min: f64) -> Result<Vec<Model>, ServiceError> {
        Ok(ordered().filter(Column::Rating.gte(min)).all(&self.db).await?)
    }

    async fn save_versioned(&self, r: Model, expected_version: i64) -> Result<Option<Model>, ServiceError> {
        let id = r.id;
        let am = ActiveModel {
            id: Unchanged(id),
            rating: Set(r.rating),
            menu: Set(r.menu),
            reviews: Set(r.reviews),
            version: Set(expected_version + 1),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };
        let res = Entity::update_many()
            .set(am)
            .filter(Column::Id.eq(id))
            .filter(Column::Version.eq(expected_version))
            .exec(&self.db)
            .await?;
        if res.rows_affected == 0 {
            return Ok(None);
        }
        Ok(Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Model>, ServiceError> {
        let Some(existing) = Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let res = Entity::delete_by_id(id).exec(&self.db).await?;
        Ok((res.rows_affected > 0).then_some(existing))
    }
}
