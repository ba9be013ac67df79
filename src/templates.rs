use maud::{DOCTYPE, Markup, html};

use crate::{
    entities::{actor, movie, review},
    models::{MovieDetail, ReviewNode},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

pub fn movie_list_page(movies: &[movie::Model]) -> String {
    page(
        "Movies",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-4xl mx-auto px-6 py-12" {
                    h1 class="text-3xl font-bold text-gray-900" { "Movies" }

                    @if movies.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "The catalog is empty." }
                        }
                    } @else {
                        div class="mt-10 space-y-4" {
                            @for m in movies {
                                (movie_card(m))
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn movie_detail_page(detail: &MovieDetail) -> String {
    let m = &detail.movie;
    let premiere = detail
        .premiere_date()
        .map(|d| d.strftime("%B %e, %Y").to_string())
        .unwrap_or_else(|| m.world_premiere.clone());
    page(
        &m.title,
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-4xl mx-auto px-6 py-12" {
                    a class="text-sm text-blue-600 hover:text-blue-800" href="/movies" { "All movies" }

                    div class="mt-4 bg-white shadow rounded-lg p-8" {
                        div class="flex items-start gap-6" {
                            @if !m.poster.is_empty() {
                                img class="w-40 rounded" src=(m.poster) alt=(m.title);
                            }
                            div {
                                h1 class="text-3xl font-bold text-gray-900" {
                                    (m.title)
                                    span class="ml-2 font-normal text-gray-500" { "(" (m.year) ")" }
                                }
                                @if !m.tagline.is_empty() {
                                    p class="mt-1 italic text-gray-600" { (m.tagline) }
                                }
                                @if let Some(cat) = &detail.category {
                                    p class="mt-2 text-sm text-gray-500" { "Category: " (cat.name) }
                                }
                                @if m.draft {
                                    span class="mt-2 inline-block rounded bg-yellow-100 px-2 py-1 text-xs text-yellow-800" { "draft" }
                                }
                            }
                        }

                        p class="mt-6 text-gray-700" { (m.description) }

                        dl class="mt-6 grid gap-x-8 gap-y-2 text-sm md:grid-cols-2" {
                            (fact("Country", &m.country))
                            (fact("World premiere", &premiere))
                            (fact("Budget", &usd(m.budget)))
                            (fact("Fees in USA", &usd(m.fees_in_usa)))
                            (fact("Fees in world", &usd(m.fees_in_world)))
                        }

                        (people_list("Directors", &detail.directors))
                        (people_list("Actors", &detail.actors))

                        @if !detail.genres.is_empty() {
                            div class="mt-6" {
                                h2 class="text-sm font-semibold text-gray-700" { "Genres" }
                                div class="mt-2 flex flex-wrap gap-2" {
                                    @for g in &detail.genres {
                                        span class="rounded-full bg-gray-100 px-3 py-1 text-sm text-gray-700" { (g.name) }
                                    }
                                }
                            }
                        }

                        @if !detail.shots.is_empty() {
                            div class="mt-6" {
                                h2 class="text-sm font-semibold text-gray-700" { "Shots" }
                                div class="mt-2 grid gap-4 md:grid-cols-3" {
                                    @for shot in &detail.shots {
                                        figure {
                                            img class="rounded" src=(shot.image) alt=(shot.title);
                                            figcaption class="mt-1 text-xs text-gray-500" { (shot.title) }
                                        }
                                    }
                                }
                            }
                        }
                    }

                    (review_section(&detail.reviews))
                }
            }
        },
    )
}

pub fn not_found_page() -> String {
    page(
        "Not found",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "Not found" }
                        p class="mt-4 text-gray-700" { "No such movie in the catalog." }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/movies" { "Back to the list" }
                    }
                }
            }
        },
    )
}

pub fn error_page(message: String) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "Error" }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/movies" { "Back" }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn movie_card(m: &movie::Model) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg p-6" {
            div class="flex items-start justify-between gap-4" {
                div {
                    h2 class="text-xl font-semibold text-gray-900" {
                        a class="hover:text-blue-700" href=(format!("/movies/{}", m.id)) { (m.title) }
                        span class="ml-2 font-normal text-gray-500" { "(" (m.year) ")" }
                    }
                    @if !m.tagline.is_empty() {
                        p class="mt-1 text-sm italic text-gray-600" { (m.tagline) }
                    }
                }
                @if m.draft {
                    span class="rounded bg-yellow-100 px-2 py-1 text-xs text-yellow-800" { "draft" }
                }
            }
        }
    }
}

fn fact(label: &str, value: &str) -> Markup {
    html! {
        div {
            dt class="font-semibold text-gray-700" { (label) }
            dd class="text-gray-600" { (value) }
        }
    }
}

fn usd(amount: i64) -> String {
    format!("${amount}")
}

fn people_list(label: &str, people: &[actor::Model]) -> Markup {
    html! {
        @if !people.is_empty() {
            div class="mt-6" {
                h2 class="text-sm font-semibold text-gray-700" { (label) }
                ul class="mt-2 space-y-1" {
                    @for p in people {
                        li class="text-sm text-gray-700" { (p.name) }
                    }
                }
            }
        }
    }
}

fn review_section(reviews: &[ReviewNode]) -> Markup {
    html! {
        @if !reviews.is_empty() {
            div class="mt-8" {
                h2 class="text-xl font-semibold text-gray-900" { "Reviews" }
                div class="mt-4 space-y-4" {
                    @for node in reviews {
                        div class="bg-white shadow rounded-lg p-6" {
                            (review_body(&node.review))
                            @if !node.replies.is_empty() {
                                div class="mt-4 space-y-3 border-l-4 border-gray-200 pl-4" {
                                    @for reply in &node.replies {
                                        (review_body(reply))
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn review_body(r: &review::Model) -> Markup {
    html! {
        div {
            p class="text-sm font-semibold text-gray-900" { (r.name) }
            p class="mt-1 text-sm text-gray-700" { (r.text) }
        }
    }
}
