use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ColumnTrait, ConnectOptions, ConnectionTrait, Database, EntityTrait, PaginatorTrait,
    QueryFilter, Statement,
};

use crate::{
    entities::{movie_actor, movie_genre},
    error::StoreError,
    models::{NewCategory, NewGenre, NewMovie, NewMovieShot, NewRating, NewReview},
    store::CatalogStore,
};

// A single pooled connection keeps the whole test on one in-memory
// database.
async fn store() -> CatalogStore {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_owned());
    opts.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.expect("connect");
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "PRAGMA foreign_keys=ON".to_string(),
    ))
    .await
    .expect("pragma");
    Migrator::up(&db, None).await.expect("migrate");
    CatalogStore::new(db)
}

fn movie(title: &str, url: &str) -> NewMovie {
    NewMovie { title: title.to_string(), url: url.to_string(), ..Default::default() }
}

fn category(name: &str, url: &str) -> NewCategory {
    NewCategory { name: name.to_string(), description: String::new(), url: url.to_string() }
}

fn review(name: &str, movie_id: i32, parent_id: Option<i32>) -> NewReview {
    NewReview {
        email: format!("{name}@example.com"),
        name: name.to_string(),
        text: "well worth watching".to_string(),
        parent_id,
        movie_id,
    }
}

#[tokio::test]
async fn create_assigns_id_and_defaults() {
    let store = store().await;
    let m = store.create_movie(movie("Test", "test")).await.expect("create");

    assert!(m.id > 0);
    assert_eq!(m.year, 2019);
    assert_eq!(m.tagline, "");
    assert_eq!(m.budget, 0);
    assert!(!m.draft);
    let today: jiff::civil::Date = jiff::Zoned::now().into();
    assert_eq!(m.world_premiere, today.to_string());
}

#[tokio::test]
async fn movie_without_title_is_rejected() {
    let store = store().await;
    let err = store.create_movie(movie("", "no-title")).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
}

#[tokio::test]
async fn duplicate_movie_url_conflicts() {
    let store = store().await;
    store.create_movie(movie("First", "same-slug")).await.expect("first");
    let err = store.create_movie(movie("Second", "same-slug")).await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));
}

#[tokio::test]
async fn duplicate_genre_url_conflicts() {
    let store = store().await;
    let genre = NewGenre {
        name: "Drama".to_string(),
        description: String::new(),
        url: "drama".to_string(),
    };
    store.create_genre(genre.clone()).await.expect("first");
    let err = store.create_genre(genre).await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));
}

#[tokio::test]
async fn category_url_is_not_unique() {
    let store = store().await;
    store.create_category(category("Films", "films")).await.expect("first");
    store.create_category(category("More films", "films")).await.expect("duplicate url allowed");
}

#[tokio::test]
async fn non_slug_url_is_rejected() {
    let store = store().await;
    let err = store.create_movie(movie("Bad slug", "not a slug!")).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
}

#[tokio::test]
async fn get_movie_unknown_id_is_not_found() {
    let store = store().await;
    let err = store.get_movie(999).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound));
}

#[tokio::test]
async fn get_movie_returns_requested_record() {
    let store = store().await;
    let created = store.create_movie(movie("Requested", "requested")).await.expect("create");
    let detail = store.get_movie(created.id).await.expect("get");
    assert_eq!(detail.movie.id, created.id);
    assert_eq!(detail.movie.title, "Requested");
}

#[tokio::test]
async fn list_movies_includes_drafts() {
    let store = store().await;
    store.create_movie(movie("Published", "published")).await.expect("create");
    store
        .create_movie(NewMovie { draft: true, ..movie("Unfinished", "unfinished") })
        .await
        .expect("create draft");

    let movies = store.list_movies().await.expect("list");
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].title, "Published");
    assert_eq!(movies[1].title, "Unfinished");
    assert!(movies[1].draft);
}

#[tokio::test]
async fn deleting_category_detaches_movies() {
    let store = store().await;
    let cat = store.create_category(category("Drama", "drama")).await.expect("category");
    let m = store
        .create_movie(NewMovie { category_id: Some(cat.id), ..movie("Test", "test") })
        .await
        .expect("movie");

    let detail = store.get_movie(m.id).await.expect("before");
    assert_eq!(detail.category.as_ref().map(|c| c.name.as_str()), Some("Drama"));

    store.delete_category(cat.id).await.expect("delete category");

    let detail = store.get_movie(m.id).await.expect("after");
    assert_eq!(detail.movie.title, "Test");
    assert!(detail.category.is_none());
    assert!(detail.movie.category_id.is_none());
}

#[tokio::test]
async fn deleting_movie_cascades_to_dependents() {
    let store = store().await;
    let m = store.create_movie(movie("Doomed", "doomed")).await.expect("movie");
    let shot = store
        .create_movie_shot(NewMovieShot {
            title: "Opening scene".to_string(),
            description: String::new(),
            image: "shots/opening.jpg".to_string(),
            movie_id: m.id,
        })
        .await
        .expect("shot");
    let star = store.create_rating_star(5).await.expect("star");
    let rating = store
        .create_rating(NewRating {
            ip: "127.0.0.1".to_string(),
            star_id: star.id,
            movie_id: m.id,
        })
        .await
        .expect("rating");
    let rev = store.create_review(review("alice", m.id, None)).await.expect("review");

    store.delete_movie(m.id).await.expect("delete movie");

    assert!(matches!(store.get_movie(m.id).await.unwrap_err(), StoreError::NotFound));
    assert!(matches!(store.get_movie_shot(shot.id).await.unwrap_err(), StoreError::NotFound));
    assert!(matches!(store.get_rating(rating.id).await.unwrap_err(), StoreError::NotFound));
    assert!(matches!(store.get_review(rev.id).await.unwrap_err(), StoreError::NotFound));
    // The star itself is independent of any one movie.
    store.get_rating_star(star.id).await.expect("star survives");
}

#[tokio::test]
async fn deleting_rating_star_cascades_to_ratings() {
    let store = store().await;
    let m = store.create_movie(movie("Rated", "rated")).await.expect("movie");
    let star = store.create_rating_star(4).await.expect("star");
    let rating = store
        .create_rating(NewRating {
            ip: "10.0.0.1".to_string(),
            star_id: star.id,
            movie_id: m.id,
        })
        .await
        .expect("rating");

    store.delete_rating_star(star.id).await.expect("delete star");

    assert!(matches!(store.get_rating(rating.id).await.unwrap_err(), StoreError::NotFound));
    store.get_movie(m.id).await.expect("movie survives");
}

#[tokio::test]
async fn duplicate_ratings_from_one_ip_are_allowed() {
    let store = store().await;
    let m = store.create_movie(movie("Voted", "voted")).await.expect("movie");
    let star = store.create_rating_star(3).await.expect("star");
    let vote = NewRating { ip: "10.0.0.9".to_string(), star_id: star.id, movie_id: m.id };

    store.create_rating(vote.clone()).await.expect("first vote");
    store.create_rating(vote).await.expect("repeat vote");
}

#[tokio::test]
async fn deleting_parent_review_detaches_replies() {
    let store = store().await;
    let m = store.create_movie(movie("Discussed", "discussed")).await.expect("movie");
    let parent = store.create_review(review("alice", m.id, None)).await.expect("parent");
    let child =
        store.create_review(review("bob", m.id, Some(parent.id))).await.expect("child");

    store.delete_review(parent.id).await.expect("delete parent");

    let child = store.get_review(child.id).await.expect("child survives");
    assert!(child.parent_id.is_none());
}

#[tokio::test]
async fn review_thread_groups_replies_under_parent() {
    let store = store().await;
    let m = store.create_movie(movie("Threaded", "threaded")).await.expect("movie");
    let parent = store.create_review(review("alice", m.id, None)).await.expect("parent");
    store.create_review(review("bob", m.id, Some(parent.id))).await.expect("reply");
    store.create_review(review("carol", m.id, None)).await.expect("second root");

    let detail = store.get_movie(m.id).await.expect("detail");
    assert_eq!(detail.reviews.len(), 2);
    assert_eq!(detail.reviews[0].review.name, "alice");
    assert_eq!(detail.reviews[0].replies.len(), 1);
    assert_eq!(detail.reviews[0].replies[0].name, "bob");
    assert!(detail.reviews[1].replies.is_empty());
}

#[tokio::test]
async fn nested_replies_stay_visible_in_thread() {
    let store = store().await;
    let m = store.create_movie(movie("Debated", "debated")).await.expect("movie");
    let root = store.create_review(review("alice", m.id, None)).await.expect("root");
    let child =
        store.create_review(review("bob", m.id, Some(root.id))).await.expect("child");
    let grandchild =
        store.create_review(review("carol", m.id, Some(child.id))).await.expect("grandchild");

    let detail = store.get_movie(m.id).await.expect("detail");
    assert_eq!(detail.reviews.len(), 1);
    let node = &detail.reviews[0];
    assert_eq!(node.review.id, root.id);
    assert_eq!(node.replies.len(), 2);
    assert_eq!(node.replies[0].id, child.id);
    assert_eq!(node.replies[1].id, grandchild.id);
}

#[tokio::test]
async fn deleting_mid_thread_review_promotes_its_replies() {
    let store = store().await;
    let m = store.create_movie(movie("Pruned", "pruned")).await.expect("movie");
    let root = store.create_review(review("alice", m.id, None)).await.expect("root");
    let child =
        store.create_review(review("bob", m.id, Some(root.id))).await.expect("child");
    let grandchild =
        store.create_review(review("carol", m.id, Some(child.id))).await.expect("grandchild");

    store.delete_review(child.id).await.expect("delete mid-thread");

    let detail = store.get_movie(m.id).await.expect("detail");
    assert_eq!(detail.reviews.len(), 2);
    assert_eq!(detail.reviews[0].review.id, root.id);
    assert!(detail.reviews[0].replies.is_empty());
    assert_eq!(detail.reviews[1].review.id, grandchild.id);
}

#[tokio::test]
async fn negative_actor_age_is_rejected() {
    let store = store().await;
    let err = store
        .create_actor(crate::models::NewActor {
            name: "Benjamin".to_string(),
            age: -1,
            description: String::new(),
            image: String::new(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
}

#[tokio::test]
async fn negative_movie_year_is_rejected() {
    let store = store().await;
    let err = store
        .create_movie(NewMovie { year: -1, ..movie("Prehistoric", "prehistoric") })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
}

#[tokio::test]
async fn negative_money_fields_are_rejected() {
    let store = store().await;
    for bad in [
        NewMovie { budget: -1, ..movie("Broke", "broke") },
        NewMovie { fees_in_usa: -1, ..movie("Flop", "flop") },
        NewMovie { fees_in_world: -1, ..movie("Bomb", "bomb") },
    ] {
        let err = store.create_movie(bad).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }
}

#[tokio::test]
async fn overlong_rating_ip_is_rejected() {
    let store = store().await;
    let m = store.create_movie(movie("Scored", "scored")).await.expect("movie");
    let star = store.create_rating_star(5).await.expect("star");
    let err = store
        .create_rating(NewRating {
            ip: "1234.5678.9.1011".to_string(),
            star_id: star.id,
            movie_id: m.id,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
}

#[tokio::test]
async fn overlong_review_text_is_rejected() {
    let store = store().await;
    let m = store.create_movie(movie("Verbose", "verbose")).await.expect("movie");
    let mut long = review("alice", m.id, None);
    long.text = "x".repeat(5001);
    let err = store.create_review(long).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
}

#[tokio::test]
async fn links_are_idempotent_and_cascade_with_movie() {
    let store = store().await;
    let m = store.create_movie(movie("Linked", "linked")).await.expect("movie");
    let a = store
        .create_actor(crate::models::NewActor {
            name: "Keanu".to_string(),
            age: 55,
            description: String::new(),
            image: "actors/keanu.jpg".to_string(),
        })
        .await
        .expect("actor");
    let g = store
        .create_genre(NewGenre {
            name: "Action".to_string(),
            description: String::new(),
            url: "action".to_string(),
        })
        .await
        .expect("genre");

    store.link_actor(m.id, a.id).await.expect("link");
    store.link_actor(m.id, a.id).await.expect("repeat link");
    store.link_director(m.id, a.id).await.expect("director link");
    store.link_genre(m.id, g.id).await.expect("genre link");

    let rows = movie_actor::Entity::find()
        .filter(movie_actor::Column::MovieId.eq(m.id))
        .count(store.db())
        .await
        .expect("count");
    assert_eq!(rows, 1);

    let detail = store.get_movie(m.id).await.expect("detail");
    assert_eq!(detail.actors.len(), 1);
    assert_eq!(detail.directors.len(), 1);
    assert_eq!(detail.genres.len(), 1);

    store.unlink_actor(m.id, a.id).await.expect("unlink");
    store.unlink_actor(m.id, a.id).await.expect("repeat unlink");
    let detail = store.get_movie(m.id).await.expect("detail");
    assert!(detail.actors.is_empty());
    // The same person still directs.
    assert_eq!(detail.directors.len(), 1);

    store.delete_movie(m.id).await.expect("delete movie");
    let leftovers = movie_genre::Entity::find()
        .filter(movie_genre::Column::MovieId.eq(m.id))
        .count(store.db())
        .await
        .expect("count");
    assert_eq!(leftovers, 0);
    store.get_actor(a.id).await.expect("actor survives");
    store.get_genre(g.id).await.expect("genre survives");
}

#[tokio::test]
async fn link_to_missing_record_is_a_validation_error() {
    let store = store().await;
    let m = store.create_movie(movie("Lonely", "lonely")).await.expect("movie");
    let err = store.link_actor(m.id, 999).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
}

#[tokio::test]
async fn delete_of_missing_record_is_not_found() {
    let store = store().await;
    assert!(matches!(store.delete_movie(42).await.unwrap_err(), StoreError::NotFound));
    assert!(matches!(store.delete_category(42).await.unwrap_err(), StoreError::NotFound));
    assert!(matches!(store.delete_review(42).await.unwrap_err(), StoreError::NotFound));
}

#[tokio::test]
async fn drama_category_scenario() {
    let store = store().await;
    let cat = store.create_category(category("Drama", "drama")).await.expect("category");
    let m = store
        .create_movie(NewMovie { category_id: Some(cat.id), ..movie("Test", "test") })
        .await
        .expect("movie");

    let detail = store.get_movie(m.id).await.expect("detail");
    assert_eq!(detail.movie.title, "Test");
    assert_eq!(detail.category.as_ref().map(|c| c.name.as_str()), Some("Drama"));

    store.delete_category(cat.id).await.expect("delete category");

    let detail = store.get_movie(m.id).await.expect("detail after");
    assert_eq!(detail.movie.title, "Test");
    assert!(detail.category.is_none());
}
