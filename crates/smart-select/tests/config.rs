mod common;

use common::*;
use smart_select::*;

fn configured() -> Models {
    ModelsConfig::from_yaml_str(include_str!("fixtures/blog.yaml"))
        .unwrap()
        .build()
        .unwrap()
}

#[test]
fn configured_models_match_built_models() {
    let from_config = configured();
    let from_code = blog();

    let texts = [
        "image,...",
        "date{month,year,...},...",
        "date{time{}}",
        "category{}",
        "address{}",
        "address{city{post{}}}",
        "address{city{post{address{city{post{name}}}}}}",
        "category{posts{name,...}}",
    ];
    for text in texts {
        let a = smart_select(&from_config, "Post", text).unwrap();
        let b = smart_select(&from_code, "Post", text).unwrap();
        assert_eq!(a.sorted(), b.sorted(), "{text}");
    }

    let a = smart_select(&from_config, "Category", "posts{}").unwrap();
    let b = smart_select(&from_code, "Category", "posts{}").unwrap();
    assert_eq!(a.sorted(), b.sorted());
}

#[test]
fn strict_resolver_over_configured_models() {
    let models = configured();
    let resolver = Resolver::new(&models).with_options(ResolveOptions { strict: true });

    assert_same(
        resolver.select("Post", "date{time{h}},address{city{name}}").unwrap(),
        result(&["date.time.h", "address.city.name"], vec![]),
    );

    let err = resolver.select("Post", "dat{month}").unwrap_err();
    assert!(matches!(err, SelectError::UnknownField(ref p) if p == "dat"), "{err}");

    let err = resolver.select("Post", "address{town{name}}").unwrap_err();
    assert!(matches!(err, SelectError::UnknownField(ref p) if p == "address.town"), "{err}");

    let err = resolver.select("Post", "address{city{post{dat{month}}}}").unwrap_err();
    assert!(
        matches!(err, SelectError::UnknownField(ref p) if p == "address.city.post.dat"),
        "{err}"
    );
}

#[test]
fn permissive_resolver_assumes_nested_objects() {
    let models = configured();
    assert_same(
        smart_select(&models, "Post", "dat{month}").unwrap(),
        result(&["dat.month"], vec![]),
    );
}
