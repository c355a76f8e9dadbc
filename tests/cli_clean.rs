//! E2E tests for `assetpipe clean-app` and `clean-vendor`.

mod common;

use common::*;

fn built_env() -> TestEnv {
    let env = TestEnv::standard();
    let result = env.run(&["build"]);
    assert!(result.success, "build failed: {}", result.stderr);
    env
}

#[test]
fn clean_app_removes_only_app_outputs() {
    let env = built_env();

    let result = env.run(&["clean-app"]);
    assert!(result.success, "clean-app failed: {}", result.stderr);

    let outputs = env.outputs();
    assert_eq!(outputs.len(), 2, "{outputs:?}");
    assert!(outputs.iter().all(|name| !name.contains("/app-")));
    assert_built!(env, "index.html");
}

#[test]
fn clean_vendor_removes_only_vendor_outputs() {
    let env = built_env();

    let result = env.run(&["clean-vendor"]);
    assert!(result.success, "clean-vendor failed: {}", result.stderr);

    let outputs = env.outputs();
    assert_eq!(outputs.len(), 2, "{outputs:?}");
    assert!(outputs.iter().all(|name| name.contains("/app-")));
}

#[test]
fn clean_without_build_dir_succeeds() {
    let env = TestEnv::standard();

    let result = env.run(&["clean-app"]);

    assert!(result.success, "clean-app failed: {}", result.stderr);
    assert!(env.outputs().is_empty());
}

#[test]
fn clean_keeps_unrelated_files() {
    let env = built_env();
    env.write("webroot/css/theme.css", "a{}");
    env.write("webroot/robots.txt", "");

    assert!(env.run(&["clean-app"]).success);
    assert!(env.run(&["clean-vendor"]).success);

    assert_eq!(env.outputs(), vec!["css/theme.css".to_string()]);
    assert_built!(env, "robots.txt");
}

#[test]
fn clean_json_lists_deleted_files() {
    let env = built_env();

    let result = env.run(&["clean-app", "--json"]);
    assert!(result.success);

    let events = result.json_lines();
    let finished = events
        .iter()
        .find(|e| e["event"] == "task_finished")
        .expect("no task_finished event");
    assert_eq!(finished["outcome"]["kind"], "cleaned");
    assert_eq!(finished["outcome"]["deleted"].as_array().unwrap().len(), 2);
}
