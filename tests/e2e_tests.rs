//! End-to-end tests for the nuget-updater CLI
//!
//! These tests verify:
//! - A full run against a mock NuGet V3 feed prints the available updates
//! - JSON output schema
//! - Exit codes for each failure class

use assert_cmd::Command;
use mockito::{Matcher, Server, ServerGuard};
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

const PROJECT: &str = r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <TargetFramework>net48</TargetFramework>
  </PropertyGroup>
  <ItemGroup>
    <PackageReference Include="Foo" Version="1.0.0" />
  </ItemGroup>
</Project>"#;

fn binary() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_nuget-updater"));
    cmd.env_remove("NUGET_UPDATER_SOURCE").env_remove("RUST_LOG");
    cmd
}

fn create_project(content: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    fs::write(dir.path().join("App.csproj"), content).unwrap();
    dir
}

fn leaf(id: &str, version: &str, dependencies: serde_json::Value) -> serde_json::Value {
    json!({
        "catalogEntry": {
            "id": id,
            "version": version,
            "listed": true,
            "published": "2024-01-15T10:00:00+00:00",
            "dependencyGroups": dependencies
        }
    })
}

fn registration(leaves: Vec<serde_json::Value>) -> String {
    json!({ "items": [{ "@id": "page0", "items": leaves }] }).to_string()
}

/// Feed with Foo 1.0.0 -> Bar >= 2.0.0 (netstandard2.0), Foo 1.5.0 and Bar 2.0.0
fn scenario_feed() -> ServerGuard {
    let mut server = Server::new();
    let base = server.url();

    server
        .mock("GET", "/v3/index.json")
        .with_body(
            json!({
                "version": "3.0.0",
                "resources": [
                    { "@id": format!("{}/reg/", base), "@type": "RegistrationsBaseUrl/3.6.0" }
                ]
            })
            .to_string(),
        )
        .create();

    server
        .mock("GET", "/reg/foo/index.json")
        .with_body(registration(vec![
            leaf(
                "Foo",
                "1.0.0",
                json!([{
                    "targetFramework": ".NETStandard2.0",
                    "dependencies": [{ "id": "Bar", "range": "[2.0.0, )" }]
                }]),
            ),
            leaf("Foo", "1.5.0", json!([])),
        ]))
        .create();

    server
        .mock("GET", "/reg/bar/index.json")
        .with_body(registration(vec![leaf("Bar", "2.0.0", json!([]))]))
        .create();

    server
        .mock("GET", Matcher::Regex(r"^/reg/ghost/".to_string()))
        .with_status(404)
        .create();

    server
}

fn source(server: &ServerGuard) -> String {
    format!("{}/v3/index.json", server.url())
}

mod run_tests {
    use super::*;

    #[test]
    fn test_reports_available_updates() {
        let server = scenario_feed();
        let project = create_project(PROJECT);

        binary()
            .args(["--no-color", "--source", &source(&server)])
            .arg(project.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("--- Available updates ---"))
            .stdout(predicate::str::contains("Foo: 1.0.0 -> 1.5.0"))
            .stdout(predicate::str::contains("Bar:").not());
    }

    #[test]
    fn test_quiet_prints_only_update_lines() {
        let server = scenario_feed();
        let project = create_project(PROJECT);

        binary()
            .args(["-q", "--source", &source(&server)])
            .arg(project.path().join("App.csproj"))
            .assert()
            .success()
            .stdout("Foo: 1.0.0 -> 1.5.0\n");
    }

    #[test]
    fn test_verbose_logs_exploration() {
        let server = scenario_feed();
        let project = create_project(PROJECT);

        binary()
            .args(["-v", "--no-color", "--source", &source(&server)])
            .arg(project.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Resolved 2 packages"))
            .stderr(predicate::str::contains("Exploring package: Foo (1.0.0)"))
            .stderr(predicate::str::contains("Exploring package: Bar (2.0.0)"))
            .stderr(predicate::str::contains("Checking update for: Foo (1.0.0)"));
    }

    #[test]
    fn test_missing_dependency_is_warned_not_fatal() {
        let server = scenario_feed();
        let project = create_project(
            r#"<Project><ItemGroup>
    <PackageReference Include="Foo" Version="1.0.0" />
    <PackageReference Include="Ghost" Version="1.0.0" />
</ItemGroup></Project>"#,
        );

        binary()
            .args(["--no-color", "--source", &source(&server)])
            .arg(project.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Foo: 1.0.0 -> 1.5.0"))
            .stderr(predicate::str::contains("Package Ghost (1.0.0) not found."));
    }

    #[test]
    fn test_json_output_schema() {
        let server = scenario_feed();
        let project = create_project(PROJECT);

        let output = binary()
            .args(["--json", "--source", &source(&server)])
            .arg(project.path())
            .output()
            .expect("Failed to execute command");

        assert!(output.status.success());
        let json: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON");

        assert_eq!(json["resolved"]["Foo"], "1.0.0");
        assert_eq!(json["resolved"]["Bar"], "2.0.0");
        assert_eq!(json["unresolved"], json!([]));
        assert_eq!(json["updates"][0]["package_id"], "Foo");
        assert_eq!(json["updates"][0]["current_version"], "1.0.0");
        assert_eq!(json["updates"][0]["latest_version"], "1.5.0");
        assert_eq!(json["updates"][0]["published"], "2024-01-15T10:00:00Z");
    }

    #[test]
    fn test_config_file_source() {
        let server = scenario_feed();
        let project = create_project(PROJECT);
        let config = project.path().join("nuget-updater.toml");
        fs::write(&config, format!("source = \"{}\"\n", source(&server))).unwrap();

        binary()
            .arg("-q")
            .arg("--config")
            .arg(&config)
            .arg(project.path().join("App.csproj"))
            .assert()
            .success()
            .stdout("Foo: 1.0.0 -> 1.5.0\n");
    }
}

mod exit_code_tests {
    use super::*;

    #[test]
    fn test_help_and_version() {
        binary()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--source"));

        binary()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_invalid_config_exits_2() {
        let project = create_project(PROJECT);
        let config = project.path().join("bad.toml");
        fs::write(&config, "timeout_secs = \"soon\"\n").unwrap();

        binary()
            .arg("--config")
            .arg(&config)
            .arg(project.path())
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Error:"));
    }

    #[test]
    fn test_invalid_source_exits_2() {
        let project = create_project(PROJECT);

        binary()
            .args(["--source", "file:///tmp/feed"])
            .arg(project.path())
            .assert()
            .code(2);
    }

    #[test]
    fn test_missing_project_exits_3() {
        let dir = tempfile::tempdir().unwrap();

        binary()
            .arg(dir.path().join("Missing.csproj"))
            .assert()
            .code(3)
            .stderr(predicate::str::contains("project not found"));
    }

    #[test]
    fn test_directory_without_project_exits_3() {
        let dir = tempfile::tempdir().unwrap();

        binary()
            .arg(dir.path())
            .assert()
            .code(3)
            .stderr(predicate::str::contains("no project file"));
    }

    #[test]
    fn test_registry_failure_exits_4() {
        let mut server = Server::new();
        server
            .mock("GET", "/v3/index.json")
            .with_status(500)
            .create();
        let project = create_project(PROJECT);

        binary()
            .args(["--source", &source(&server)])
            .arg(project.path())
            .assert()
            .code(4);
    }

    #[test]
    fn test_vanished_package_exits_5() {
        let mut server = Server::new();
        let base = server.url();
        server
            .mock("GET", "/v3/index.json")
            .with_body(
                json!({ "resources": [
                    { "@id": format!("{}/reg/", base), "@type": "RegistrationsBaseUrl" }
                ]})
                .to_string(),
            )
            .create();
        // Only an unlisted version is left when the update check runs
        server
            .mock("GET", "/reg/foo/index.json")
            .with_body(
                json!({ "items": [{ "@id": "page0", "items": [{
                    "catalogEntry": { "id": "Foo", "version": "1.0.0", "listed": false }
                }]}]})
                .to_string(),
            )
            .create();
        let project = create_project(PROJECT);

        binary()
            .args(["--source", &source(&server)])
            .arg(project.path())
            .assert()
            .code(5)
            .stderr(predicate::str::contains("Foo"));
    }
}
