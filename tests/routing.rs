
use helper::*;
use http::Method;
use pretty_assertions::assert_eq;
use router::{DefinitionError, RouterBuilder};

#[test]
fn should_match_root() {
    let router = blog_router();
    let matched = router.route("GET", "/").unwrap();
    assert_eq!(matched.handler(), "home");
    assert_eq!(matched.canonical_path(), "/");
    assert_eq!(matched.params().count(), 0);
}

#[test]
fn should_match_typed_parameter() {
    let router = blog_router();
    let matched = router.route("GET", "/posts/42").unwrap();
    assert_eq!(matched.handler(), "posts.show");
    assert_eq!(matched.params().collect::<Vec<_>>(), vec![("id", "42")]);
    assert_eq!(matched.method(), Some(&Method::GET));
}

#[test]
fn should_fall_through_to_next_route_when_pattern_fails() {
    let router = blog_router();
    let matched = router.route("GET", "/posts/hello-world").unwrap();
    assert_eq!(matched.handler(), "posts.by_slug");
    assert_eq!(matched.param("slug"), Some("hello-world"));
    assert!(router.route("GET", "/posts/Hello_World").is_none());
}

#[test]
fn should_respect_methods() {
    let router = blog_router();
    assert_eq!(router.route("POST", "/posts").unwrap().handler(), "posts.create");
    assert_eq!(router.route("GET", "/posts").unwrap().handler(), "posts.index");
    assert_eq!(router.route("head", "/posts").unwrap().handler(), "posts.index");
    assert_eq!(
        router.route("PATCH", "/posts/1").unwrap().handler(),
        "posts.update"
    );
    assert!(router.route("DELETE", "/posts/1").is_none());
    assert_eq!(router.route("", "/posts/1").unwrap().handler(), "posts.show");
    assert_eq!(
        router.route("OPTIONS", "/assets/app.js").unwrap().handler(),
        "assets"
    );
}

#[test]
fn should_fall_through_to_longer_base_path() {
    let router = blog_router();
    assert_eq!(router.route("GET", "/about").unwrap().handler(), "pages");
    assert_eq!(router.route("GET", "/posts").unwrap().handler(), "posts.index");
    assert!(router.route("GET", "/about/team").is_none());
}

#[test]
fn should_prefer_shorter_base_path() {
    let router = build_router(|builder| {
        builder
            .add_route("GET", "/{page}", "pages")
            .add_route("GET", "/posts/", "posts.index")
    });
    assert_eq!(router.route("GET", "/posts").unwrap().handler(), "pages");
    assert!(router.route("POST", "/posts").is_none());
    assert!(router.route("GET", "/posts/first").is_none());
}

#[test]
fn should_reproduce_canonical_path() {
    let router = blog_router();
    for (request, canonical) in [
        ("/posts/7/comments/3", "/posts/7/comments/3/"),
        ("/posts///7//comments/3/", "/posts/7/comments/3/"),
        ("//example.com/posts/7/comments/3", "/posts/7/comments/3/"),
        ("/posts/", "/posts/"),
        ("/posts", "/posts/"),
        ("/assets/my%20file.css?v=2", "/assets/my%20file.css"),
        ("/assets/%7Euser", "/assets/~user"),
        ("http://example.com/assets/a+b", "/assets/a%2Bb"),
    ] {
        let matched = router.route("GET", request).unwrap();
        assert_eq!(matched.canonical_path(), canonical, "{request}");
    }
}

#[test]
fn should_round_trip_canonical_path() {
    let router = blog_router();
    for request in ["/posts/7/comments/3/", "/assets/a%20b", "/about", "/posts/"] {
        let canonical = router.route("GET", request).unwrap().canonical_path();
        assert_eq!(canonical, request);
        let again = router.route("GET", &canonical).unwrap();
        assert_eq!(again.canonical_path(), canonical);
    }
}

#[test]
fn should_not_match_malformed_input() {
    let router = blog_router();
    assert!(router.route("G E T", "/").is_none());
    assert!(router.route("GET", "http://bad host/").is_none());
}

#[test]
fn should_reject_duplicate_parameters() {
    helper::setup_system();
    let error = RouterBuilder::new()
        .add_route("GET", "/ok", "ok")
        .add_route("GET", "/{id}/x/{id}", "broken")
        .build()
        .unwrap_err();
    assert!(matches!(error, DefinitionError::DuplicateParameter { .. }));
    assert_eq!(error.path(), "/{id}/x/{id}");
}

#[test]
fn should_reject_malformed_parameter() {
    helper::setup_system();
    let error = RouterBuilder::new()
        .add_route("GET", "/{id:x}y}", "broken")
        .build()
        .unwrap_err();
    assert!(matches!(error, DefinitionError::InvalidPath { .. }));
}

#[test]
fn should_be_shareable_across_threads() {
    let router = std::sync::Arc::new(blog_router());
    let handles = (0..4)
        .map(|i| {
            let router = router.clone();
            std::thread::spawn(move || {
                router
                    .route("GET", &format!("/posts/{i}"))
                    .map(|matched| matched.canonical_path())
            })
        })
        .collect::<Vec<_>>();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), Some(format!("/posts/{i}")));
    }
}
