mod common;

use std::collections::BTreeMap;

use cliq_hub_client::{Navigation, RouteAccess, RouteError, RouteTable, ViewId};
use common::{stores, FakeHub};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn home_is_eager_and_the_rest_load_on_first_visit() {
    let routes = RouteTable::new().unwrap();
    assert!(routes.is_loaded("home"));
    for name in ["login", "register", "template-detail", "upload"] {
        assert!(!routes.is_loaded(name), "{name} loaded early");
    }

    let login = routes.resolve("/login").unwrap();
    assert_eq!(login.view, ViewId::Login);
    assert!(routes.is_loaded("login"));

    routes.resolve("/login").unwrap();
    routes.resolve("/login/?next=%2Fupload").unwrap();
    assert_eq!(routes.load_count("login"), 1);
    assert_eq!(routes.load_count("home"), 1);
}

#[test]
fn every_route_surface_resolves() {
    let routes = RouteTable::new().unwrap();
    let cases = [
        ("/", ViewId::Home),
        ("/login", ViewId::Login),
        ("/register", ViewId::Register),
        ("/templates/12", ViewId::TemplateDetail),
        ("/upload", ViewId::Upload),
    ];
    for (path, view) in cases {
        assert_eq!(routes.resolve(path).unwrap().view, view, "{path}");
    }

    let paths: Vec<String> = routes.definitions().map(|d| d.display_path()).collect();
    assert_eq!(
        paths,
        ["/", "/login", "/register", "/templates/:id", "/upload"]
    );
}

#[test]
fn params_and_query_are_decoded() {
    let routes = RouteTable::new().unwrap();
    let matched = routes.resolve("/templates/ffmpeg%20gif?tab=yaml#top").unwrap();

    assert_eq!(matched.name, "template-detail");
    assert_eq!(
        matched.params,
        BTreeMap::from([("id".to_string(), "ffmpeg gif".to_string())])
    );
    assert_eq!(
        matched.query,
        BTreeMap::from([("tab".to_string(), "yaml".to_string())])
    );
    assert_eq!(matched.module.params, &["id"]);
}

#[test]
fn unknown_paths_are_not_found() {
    let routes = RouteTable::new().unwrap();
    assert_eq!(
        routes.resolve("/templates").unwrap_err(),
        RouteError::NotFound("/templates".to_string())
    );
    assert!(routes.resolve("/templates/1/edit").is_err());
}

#[test]
fn resolve_does_not_guard_upload() {
    let hub = FakeHub::new();
    let (session, _, _) = stores(&hub);
    assert!(!session.is_authenticated());

    let routes = RouteTable::new().unwrap();
    let upload = routes.resolve("/upload").unwrap();
    assert_eq!(upload.view, ViewId::Upload);
    assert_eq!(upload.access, RouteAccess::Authenticated);
}

#[tokio::test]
async fn navigate_redirects_guarded_routes_without_session() {
    let hub = FakeHub::new();
    let (session, _, _) = stores(&hub);
    let routes = RouteTable::new().unwrap();

    assert_eq!(
        routes.navigate("/upload", &session).unwrap(),
        Navigation::Redirect {
            to: "/login",
            from: "/upload".to_string()
        }
    );
    assert!(!routes.is_loaded("upload"));

    match routes.navigate("/templates/3", &session).unwrap() {
        Navigation::Render(matched) => assert_eq!(matched.view, ViewId::TemplateDetail),
        other => panic!("unexpected {other:?}"),
    }

    hub.reply_ok(json!({"token": "T", "username": "a", "id": 1}));
    assert!(session.login("a@b.com", "pw").await);

    match routes.navigate("/upload", &session).unwrap() {
        Navigation::Render(matched) => assert_eq!(matched.view, ViewId::Upload),
        other => panic!("unexpected {other:?}"),
    }
    assert!(routes.is_loaded("upload"));
}
