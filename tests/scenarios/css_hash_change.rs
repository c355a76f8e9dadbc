//! Scenario: Stylesheet Edit
//!
//! Journey: a developer changes a colour and rebuilds the app.
//!
//! Steps:
//! 1. Full build with `color: red`
//! 2. Edit the stylesheet to `color: blue`
//! 3. Run `build-app`
//!
//! Success Criteria:
//! - A new stylesheet name replaces the old one
//! - index.html references only the new name
//! - Vendor outputs are untouched

use crate::common::*;
use crate::{assert_built, assert_not_built};

fn app_css(env: &TestEnv) -> String {
    let css = env.built("css");
    let app: Vec<&String> = css.iter().filter(|n| n.starts_with("css/app-")).collect();
    assert_eq!(app.len(), 1, "expected one app stylesheet, found {css:?}");
    app[0].clone()
}

/// SCENARIO: red becomes blue
#[test]
fn scenario_css_edit_replaces_fingerprinted_stylesheet() {
    let env = TestEnv::standard();
    assert!(env.run(&["build"]).success);
    let red = app_css(&env);
    let vendor: Vec<String> = env
        .outputs()
        .into_iter()
        .filter(|n| !n.contains("/app-"))
        .collect();

    env.write("ui-src/css/app.css", "body { color: blue; }\n");
    let result = env.run(&["build-app"]);
    assert!(result.success, "build-app failed: {}", result.stderr);

    let blue = app_css(&env);
    assert_ne!(red, blue);
    assert_not_built!(env, &red);
    assert_built!(env, &blue);
    assert!(env.read(&format!("webroot/{blue}")).contains("blue"));

    let html = env.read("webroot/index.html");
    assert!(html.contains(blue.as_str()));
    assert!(!html.contains(red.as_str()));
    for name in &vendor {
        assert_built!(env, name);
        assert!(html.contains(name.as_str()), "{name} dropped from index.html");
    }
}

/// SCENARIO: reverting the edit restores the original name
#[test]
fn scenario_css_revert_restores_original_name() {
    let env = TestEnv::standard();
    assert!(env.run(&["build"]).success);
    let original = app_css(&env);

    env.write("ui-src/css/app.css", "body { color: blue; }\n");
    assert!(env.run(&["build-app"]).success);
    env.write("ui-src/css/app.css", APP_CSS);
    assert!(env.run(&["build-app"]).success);

    assert_eq!(app_css(&env), original);
}
