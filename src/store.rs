use std::collections::HashMap;

use sea_orm::{
    ColumnTrait, DatabaseConnection, DeleteResult, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr, sea_query::OnConflict,
};

use crate::{
    entities::{
        actor, category, genre, movie, movie_actor, movie_director, movie_genre, movie_shot,
        rating, rating_star, review,
    },
    error::{StoreError, StoreResult},
    models::{
        MAX_RATING_IP, MAX_REVIEW_TEXT, MovieDetail, NewActor, NewCategory, NewGenre, NewMovie,
        NewMovieShot, NewRating, NewReview, ReviewNode,
    },
};

/// Explicit repository over the catalog schema. Deletion policies
/// (cascade vs set-null) live in the schema's foreign keys, so a single
/// row delete applies them atomically and readers never observe a
/// half-cascaded state.
#[derive(Clone)]
pub struct CatalogStore {
    db: DatabaseConnection,
}

impl CatalogStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    // --- categories ---

    pub async fn create_category(&self, new: NewCategory) -> StoreResult<category::Model> {
        require(&new.name, "category name")?;
        require_slug(&new.url, "category url")?;

        let model = category::ActiveModel {
            id: Default::default(),
            name: Set(new.name),
            description: Set(new.description),
            url: Set(new.url),
        };
        category::Entity::insert(model)
            .exec_with_returning(&self.db)
            .await
            .map_err(|err| map_write_err(err, "category"))
    }

    pub async fn get_category(&self, id: i32) -> StoreResult<category::Model> {
        category::Entity::find_by_id(id).one(&self.db).await?.ok_or(StoreError::NotFound)
    }

    /// Movies referencing the category keep living with a nulled link.
    pub async fn delete_category(&self, id: i32) -> StoreResult<()> {
        let res = category::Entity::delete_by_id(id).exec(&self.db).await?;
        ensure_deleted(res)
    }

    // --- actors (directors share the table) ---

    pub async fn create_actor(&self, new: NewActor) -> StoreResult<actor::Model> {
        require(&new.name, "actor name")?;
        if new.age < 0 {
            return Err(StoreError::validation("actor age must be non-negative"));
        }

        let model = actor::ActiveModel {
            id: Default::default(),
            name: Set(new.name),
            age: Set(new.age),
            description: Set(new.description),
            image: Set(new.image),
        };
        actor::Entity::insert(model)
            .exec_with_returning(&self.db)
            .await
            .map_err(|err| map_write_err(err, "actor"))
    }

    pub async fn get_actor(&self, id: i32) -> StoreResult<actor::Model> {
        actor::Entity::find_by_id(id).one(&self.db).await?.ok_or(StoreError::NotFound)
    }

    pub async fn delete_actor(&self, id: i32) -> StoreResult<()> {
        let res = actor::Entity::delete_by_id(id).exec(&self.db).await?;
        ensure_deleted(res)
    }

    // --- genres ---

    pub async fn create_genre(&self, new: NewGenre) -> StoreResult<genre::Model> {
        require(&new.name, "genre name")?;
        require_slug(&new.url, "genre url")?;

        let model = genre::ActiveModel {
            id: Default::default(),
            name: Set(new.name),
            description: Set(new.description),
            url: Set(new.url),
        };
        genre::Entity::insert(model)
            .exec_with_returning(&self.db)
            .await
            .map_err(|err| map_write_err(err, "genre"))
    }

    pub async fn get_genre(&self, id: i32) -> StoreResult<genre::Model> {
        genre::Entity::find_by_id(id).one(&self.db).await?.ok_or(StoreError::NotFound)
    }

    pub async fn delete_genre(&self, id: i32) -> StoreResult<()> {
        let res = genre::Entity::delete_by_id(id).exec(&self.db).await?;
        ensure_deleted(res)
    }

    // --- movies ---

    pub async fn create_movie(&self, new: NewMovie) -> StoreResult<movie::Model> {
        require(&new.title, "movie title")?;
        require_slug(&new.url, "movie url")?;
        if new.year < 0 {
            return Err(StoreError::validation("movie year must be non-negative"));
        }
        if new.budget < 0 || new.fees_in_usa < 0 || new.fees_in_world < 0 {
            return Err(StoreError::validation("money fields must be non-negative"));
        }

        let premiere: jiff::civil::Date =
            new.world_premiere.unwrap_or_else(|| jiff::Zoned::now().into());

        let model = movie::ActiveModel {
            id: Default::default(),
            title: Set(new.title),
            tagline: Set(new.tagline),
            description: Set(new.description),
            poster: Set(new.poster),
            year: Set(new.year),
            country: Set(new.country),
            world_premiere: Set(premiere.to_string()),
            budget: Set(new.budget),
            fees_in_usa: Set(new.fees_in_usa),
            fees_in_world: Set(new.fees_in_world),
            category_id: Set(new.category_id),
            url: Set(new.url),
            draft: Set(new.draft),
        };
        movie::Entity::insert(model)
            .exec_with_returning(&self.db)
            .await
            .map_err(|err| map_write_err(err, "movie"))
    }

    /// Shots, ratings, reviews and association rows go with the movie in
    /// the same statement.
    pub async fn delete_movie(&self, id: i32) -> StoreResult<()> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        ensure_deleted(res)
    }

    // --- movie shots ---

    pub async fn create_movie_shot(&self, new: NewMovieShot) -> StoreResult<movie_shot::Model> {
        require(&new.title, "shot title")?;

        let model = movie_shot::ActiveModel {
            id: Default::default(),
            title: Set(new.title),
            description: Set(new.description),
            image: Set(new.image),
            movie_id: Set(new.movie_id),
        };
        movie_shot::Entity::insert(model)
            .exec_with_returning(&self.db)
            .await
            .map_err(|err| map_write_err(err, "movie shot"))
    }

    pub async fn get_movie_shot(&self, id: i32) -> StoreResult<movie_shot::Model> {
        movie_shot::Entity::find_by_id(id).one(&self.db).await?.ok_or(StoreError::NotFound)
    }

    pub async fn delete_movie_shot(&self, id: i32) -> StoreResult<()> {
        let res = movie_shot::Entity::delete_by_id(id).exec(&self.db).await?;
        ensure_deleted(res)
    }

    // --- rating stars ---

    pub async fn create_rating_star(&self, value: i32) -> StoreResult<rating_star::Model> {
        let model = rating_star::ActiveModel { id: Default::default(), value: Set(value) };
        rating_star::Entity::insert(model)
            .exec_with_returning(&self.db)
            .await
            .map_err(|err| map_write_err(err, "rating star"))
    }

    pub async fn get_rating_star(&self, id: i32) -> StoreResult<rating_star::Model> {
        rating_star::Entity::find_by_id(id).one(&self.db).await?.ok_or(StoreError::NotFound)
    }

    /// Ratings pointing at the star are cascaded away.
    pub async fn delete_rating_star(&self, id: i32) -> StoreResult<()> {
        let res = rating_star::Entity::delete_by_id(id).exec(&self.db).await?;
        ensure_deleted(res)
    }

    // --- ratings ---

    pub async fn create_rating(&self, new: NewRating) -> StoreResult<rating::Model> {
        require(&new.ip, "rating ip")?;
        if new.ip.len() > MAX_RATING_IP {
            return Err(StoreError::validation("rating ip is longer than an IPv4 address"));
        }

        let model = rating::ActiveModel {
            id: Default::default(),
            ip: Set(new.ip),
            star_id: Set(new.star_id),
            movie_id: Set(new.movie_id),
        };
        rating::Entity::insert(model)
            .exec_with_returning(&self.db)
            .await
            .map_err(|err| map_write_err(err, "rating"))
    }

    pub async fn get_rating(&self, id: i32) -> StoreResult<rating::Model> {
        rating::Entity::find_by_id(id).one(&self.db).await?.ok_or(StoreError::NotFound)
    }

    pub async fn delete_rating(&self, id: i32) -> StoreResult<()> {
        let res = rating::Entity::delete_by_id(id).exec(&self.db).await?;
        ensure_deleted(res)
    }

    // --- reviews ---

    pub async fn create_review(&self, new: NewReview) -> StoreResult<review::Model> {
        require(&new.name, "review name")?;
        require(&new.text, "review text")?;
        if !new.email.contains('@') {
            return Err(StoreError::validation("review email is not an address"));
        }
        if new.text.chars().count() > MAX_REVIEW_TEXT {
            return Err(StoreError::validation("review text is too long"));
        }

        let model = review::ActiveModel {
            id: Default::default(),
            email: Set(new.email),
            name: Set(new.name),
            text: Set(new.text),
            parent_id: Set(new.parent_id),
            movie_id: Set(new.movie_id),
        };
        review::Entity::insert(model)
            .exec_with_returning(&self.db)
            .await
            .map_err(|err| map_write_err(err, "review"))
    }

    pub async fn get_review(&self, id: i32) -> StoreResult<review::Model> {
        review::Entity::find_by_id(id).one(&self.db).await?.ok_or(StoreError::NotFound)
    }

    /// Replies to the deleted review are detached, not removed.
    pub async fn delete_review(&self, id: i32) -> StoreResult<()> {
        let res = review::Entity::delete_by_id(id).exec(&self.db).await?;
        ensure_deleted(res)
    }

    // --- many-to-many links, idempotent both ways ---

    pub async fn link_director(&self, movie_id: i32, actor_id: i32) -> StoreResult<()> {
        let model = movie_director::ActiveModel {
            movie_id: Set(movie_id),
            actor_id: Set(actor_id),
        };
        movie_director::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    movie_director::Column::MovieId,
                    movie_director::Column::ActorId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|err| map_write_err(err, "director link"))?;
        Ok(())
    }

    pub async fn unlink_director(&self, movie_id: i32, actor_id: i32) -> StoreResult<()> {
        movie_director::Entity::delete_many()
            .filter(movie_director::Column::MovieId.eq(movie_id))
            .filter(movie_director::Column::ActorId.eq(actor_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    pub async fn link_actor(&self, movie_id: i32, actor_id: i32) -> StoreResult<()> {
        let model =
            movie_actor::ActiveModel { movie_id: Set(movie_id), actor_id: Set(actor_id) };
        movie_actor::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    movie_actor::Column::MovieId,
                    movie_actor::Column::ActorId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|err| map_write_err(err, "actor link"))?;
        Ok(())
    }

    pub async fn unlink_actor(&self, movie_id: i32, actor_id: i32) -> StoreResult<()> {
        movie_actor::Entity::delete_many()
            .filter(movie_actor::Column::MovieId.eq(movie_id))
            .filter(movie_actor::Column::ActorId.eq(actor_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    pub async fn link_genre(&self, movie_id: i32, genre_id: i32) -> StoreResult<()> {
        let model =
            movie_genre::ActiveModel { movie_id: Set(movie_id), genre_id: Set(genre_id) };
        movie_genre::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    movie_genre::Column::MovieId,
                    movie_genre::Column::GenreId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|err| map_write_err(err, "genre link"))?;
        Ok(())
    }

    pub async fn unlink_genre(&self, movie_id: i32, genre_id: i32) -> StoreResult<()> {
        movie_genre::Entity::delete_many()
            .filter(movie_genre::Column::MovieId.eq(movie_id))
            .filter(movie_genre::Column::GenreId.eq(genre_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    // --- queries used by the pages ---

    /// Every live movie in insertion order. Drafts are included; the
    /// original listing never filtered them out and that behavior is kept.
    pub async fn list_movies(&self) -> StoreResult<Vec<movie::Model>> {
        Ok(movie::Entity::find().order_by_asc(movie::Column::Id).all(&self.db).await?)
    }

    pub async fn get_movie(&self, id: i32) -> StoreResult<MovieDetail> {
        let movie = movie::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::NotFound)?;

        let category = match movie.category_id {
            Some(cid) => category::Entity::find_by_id(cid).one(&self.db).await?,
            None => None,
        };

        let director_ids: Vec<i32> = movie_director::Entity::find()
            .filter(movie_director::Column::MovieId.eq(id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| row.actor_id)
            .collect();
        let directors = self.actors_by_ids(director_ids).await?;

        let actor_ids: Vec<i32> = movie_actor::Entity::find()
            .filter(movie_actor::Column::MovieId.eq(id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| row.actor_id)
            .collect();
        let actors = self.actors_by_ids(actor_ids).await?;

        let genre_ids: Vec<i32> = movie_genre::Entity::find()
            .filter(movie_genre::Column::MovieId.eq(id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| row.genre_id)
            .collect();
        let genres = genre::Entity::find()
            .filter(genre::Column::Id.is_in(genre_ids))
            .order_by_asc(genre::Column::Id)
            .all(&self.db)
            .await?;

        let shots = movie_shot::Entity::find()
            .filter(movie_shot::Column::MovieId.eq(id))
            .order_by_asc(movie_shot::Column::Id)
            .all(&self.db)
            .await?;

        let reviews = self.review_thread(id).await?;

        Ok(MovieDetail { movie, category, directors, actors, genres, shots, reviews })
    }

    async fn actors_by_ids(&self, ids: Vec<i32>) -> StoreResult<Vec<actor::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(actor::Entity::find()
            .filter(actor::Column::Id.is_in(ids))
            .order_by_asc(actor::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Groups a movie's reviews under their thread roots. Replies at any
    /// depth land in the root's reply list, so every stored review shows
    /// up exactly once. A reply whose parent was detached counts as a
    /// root itself.
    async fn review_thread(&self, movie_id: i32) -> StoreResult<Vec<ReviewNode>> {
        let rows = review::Entity::find()
            .filter(review::Column::MovieId.eq(movie_id))
            .order_by_asc(review::Column::Id)
            .all(&self.db)
            .await?;

        let parent_of: HashMap<i32, Option<i32>> =
            rows.iter().map(|r| (r.id, r.parent_id)).collect();

        // A parent always predates its reply, so the walk terminates.
        let root_of = |id: i32| -> i32 {
            let mut current = id;
            while let Some(Some(pid)) = parent_of.get(&current) {
                if !parent_of.contains_key(pid) {
                    break;
                }
                current = *pid;
            }
            current
        };

        let mut replies: HashMap<i32, Vec<review::Model>> = HashMap::new();
        let mut roots = Vec::new();
        for row in rows {
            let root = root_of(row.id);
            if root == row.id {
                roots.push(row);
            } else {
                replies.entry(root).or_default().push(row);
            }
        }

        Ok(roots
            .into_iter()
            .map(|review| {
                let replies = replies.remove(&review.id).unwrap_or_default();
                ReviewNode { review, replies }
            })
            .collect())
    }
}

fn ensure_deleted(res: DeleteResult) -> StoreResult<()> {
    if res.rows_affected == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}

fn map_write_err(err: sea_orm::DbErr, what: &str) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            StoreError::conflict(format!("{what} url is already taken"))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            StoreError::validation(format!("{what} references a missing record"))
        }
        _ => StoreError::Db(err),
    }
}

fn require(value: &str, what: &str) -> StoreResult<()> {
    if value.trim().is_empty() {
        return Err(StoreError::validation(format!("{what} is required")));
    }
    Ok(())
}

fn require_slug(value: &str, what: &str) -> StoreResult<()> {
    require(value, what)?;
    let ok = value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !ok {
        return Err(StoreError::validation(format!(
            "{what} must be an ASCII slug (letters, digits, '-', '_')"
        )));
    }
    Ok(())
}
