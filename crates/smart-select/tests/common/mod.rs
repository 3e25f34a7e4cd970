#![allow(dead_code)]

use smart_select::{Models, ParseResult, PopulateSpec, Schema};

/// The blog models:
/// - `Post` with scalar, nested-object, embedded (`address`) and reference
///   (`category`) paths; `address.city.post` points back at `Post`.
/// - `Category` with a `posts` virtual back to `Post`.
pub fn blog() -> Models {
    let address = Schema::builder()
        .id_key()
        .scalar("street")
        .scalar("city.name")
        .reference("city.post", "Post");

    let post = Schema::builder()
        .scalar("_id")
        .scalar("image")
        .scalar("name")
        .scalar("date.month")
        .scalar("date.year")
        .scalar("date.time.h")
        .scalar("date.time.m")
        .scalar("date.time.s")
        .embedded("address", address)
        .reference("category", "Category")
        .scalar("__v");

    let category = Schema::builder()
        .document_keys()
        .scalar("name")
        .virtual_ref("posts", "Post");

    Models::new().with("Post", post).with("Category", category)
}

/// A single self-referencing model.
pub fn linked_list() -> Models {
    Models::new().with(
        "A",
        Schema::builder().scalar("name").reference("next", "A"),
    )
}

pub fn result(select: &[&str], populate: Vec<PopulateSpec>) -> ParseResult {
    ParseResult {
        select: strings(select),
        populate,
    }
}

pub fn spec(path: &str, select: &[&str], populate: Vec<PopulateSpec>) -> PopulateSpec {
    PopulateSpec {
        path: path.into(),
        select: strings(select),
        populate,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Compare two plans ignoring order at every level.
#[track_caller]
pub fn assert_same(actual: ParseResult, expected: ParseResult) {
    assert_eq!(actual.sorted(), expected.sorted());
}
