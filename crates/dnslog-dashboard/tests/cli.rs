use assert_cmd::Command;
use dnslog_api::AppState;
use dnslog_core::Dataset;
use predicates::prelude::*;
use std::net::SocketAddr;
use std::thread::JoinHandle;
use tempfile::TempDir;
use tokio::sync::oneshot;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CSV: &str = "\
,IP,Bytes,Domain
0,1.1.1.1,50000,a.example
1,2.2.2.2,200000,b.example
2,1.1.1.1,10,c.example
";

const UNREACHABLE: &str = "http://127.0.0.1:9";

/// Data service running on its own runtime for the duration of a test.
struct LiveServer {
    addr: SocketAddr,
    stop: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl LiveServer {
    fn start() -> Self {
        let (addr_tx, addr_rx) = std::sync::mpsc::channel();
        let (stop, stopped) = oneshot::channel::<()>();

        let thread = std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
                addr_tx.send(listener.local_addr().unwrap()).unwrap();
                let state = AppState::new(Dataset::from_csv_str(CSV).unwrap());
                dnslog_api::server::serve(listener, state, async move {
                    let _ = stopped.await;
                })
                .await
                .unwrap();
            });
        });

        Self {
            addr: addr_rx.recv().unwrap(),
            stop: Some(stop),
            thread: Some(thread),
        }
    }

    fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for LiveServer {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Binary with an isolated config directory.
fn dashboard(home: &TempDir, api_host: &str) -> Command {
    let mut cmd = Command::cargo_bin("dnslog-dashboard").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("API_HOST", api_host)
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

#[test]
fn test_help() {
    let home = TempDir::new().unwrap();
    dashboard(&home, UNREACHABLE)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("dashboard"))
        .stdout(predicate::str::contains("--api-host"));
}

#[test]
fn test_bytes_rejects_non_integer() {
    let home = TempDir::new().unwrap();
    dashboard(&home, UNREACHABLE)
        .args(["bytes", "abc"])
        .assert()
        .failure();
}

#[test]
fn test_scripting_command_fails_when_unreachable() {
    let home = TempDir::new().unwrap();
    dashboard(&home, UNREACHABLE)
        .args(["bytes", "10000"])
        .assert()
        .failure();
}

#[test]
fn test_dashboard_renders_error_panels_when_unreachable() {
    let home = TempDir::new().unwrap();
    dashboard(&home, UNREACHABLE)
        .args(["dashboard", "--mode", "bytes", "--threshold", "10000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unique IP"))
        .stdout(predicate::str::contains("All Data"))
        .stdout(predicate::str::contains("Bytes > 10000"))
        .stdout(predicate::str::contains("Error:"));
}

#[test]
fn test_one_failing_endpoint_only_fails_its_panel() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        let table = serde_json::json!({
            "IP": {"0": "1.1.1.1", "1": "2.2.2.2"},
            "Bytes": {"0": 50000, "1": 200_000},
            "Domain": {"0": "a.example", "1": "b.example"}
        });
        Mock::given(method("GET"))
            .and(path("/uniqueip"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(serde_json::json!({"detail": "boom"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/alldata"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&table))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/data/35000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "IP": {"0": "2.2.2.2"},
                "Bytes": {"0": 200_000},
                "Domain": {"0": "b.example"}
            })))
            .mount(&server)
            .await;
        server
    });

    let home = TempDir::new().unwrap();
    dashboard(&home, &server.uri())
        .args(["dashboard", "--mode", "bytes", "--threshold", "35000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: API error (500): boom"))
        .stdout(predicate::str::contains("a.example"))
        .stdout(predicate::str::contains("Bytes > 35000"))
        .stdout(predicate::str::contains("Number of Records: 1"));

    drop(server);
}

#[test]
fn test_config_path_and_set() {
    let home = TempDir::new().unwrap();
    dashboard(&home, UNREACHABLE)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));

    dashboard(&home, UNREACHABLE)
        .args(["config", "set", "output_format", "json"])
        .assert()
        .success();

    dashboard(&home, UNREACHABLE)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"output_format\": \"json\""));

    dashboard(&home, UNREACHABLE)
        .args(["config", "set", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_scripting_commands_against_live_service() {
    let server = LiveServer::start();
    let home = TempDir::new().unwrap();

    dashboard(&home, &server.url())
        .args(["unique", "-o", "csv"])
        .assert()
        .success()
        .stdout("uniqueips\n1.1.1.1\n2.2.2.2\n");

    let output = dashboard(&home, &server.url())
        .args(["bytes", "100000", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["IP"]["0"], "2.2.2.2");
    assert_eq!(value["Bytes"]["0"], 200_000);

    dashboard(&home, &server.url())
        .args(["ip", "1.1.1.1", "-o", "csv"])
        .assert()
        .success()
        .stdout("IP,Bytes,Domain\n1.1.1.1,50000,a.example\n1.1.1.1,10,c.example\n");
}

#[test]
fn test_dashboard_page_against_live_service() {
    let server = LiveServer::start();
    let home = TempDir::new().unwrap();

    dashboard(&home, &server.url())
        .args(["dashboard", "--mode", "ip", "--ip", "2.2.2.2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("b.example"))
        .stdout(predicate::str::contains("IP = 2.2.2.2"))
        .stdout(predicate::str::contains("Number of Records: 1"))
        .stdout(predicate::str::contains("Byte Distribution"));

    // Without a terminal the page falls back to By IP on the first unique IP.
    dashboard(&home, &server.url())
        .assert()
        .success()
        .stdout(predicate::str::contains("IP = 1.1.1.1"))
        .stdout(predicate::str::contains("Number of Records: 2"));
}
