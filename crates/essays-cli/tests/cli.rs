use std::fs;

use pretty_assertions::assert_eq;
use tokio::process::Command;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTING: &str = r#"
<html><body><font size="2" face="verdana">
<a href="hp.html">Hackers and Painters</a><br><img src="s.gif" height="5"><br>
<a href="nerds.html">Revenge of the Nerds</a><br><img src="s.gif" height="5"><br>
<a href="undated.html">Undated</a><br><img src="s.gif" height="5"><br>
</font></body></html>
"#;

const DATED: &str = r#"<html><body><font size="2" face="verdana">
May 2003<br><br>
When I finished grad school in computer science I went to art school.
</font></body></html>"#;

const UNDATED: &str = r#"<html><body><font size="2" face="verdana">
Nothing to see here.
</font></body></html>"#;

async fn mount(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/html"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn cli_archives_essays_and_writes_summary() {
    let server = MockServer::start().await;
    mount(&server, "/articles.html", LISTING).await;
    mount(&server, "/hp.html", DATED).await;
    mount(&server, "/undated.html", UNDATED).await;

    let temp = tempfile::TempDir::new().unwrap();
    let output_dir = temp.path().join("essays");
    let manifest = temp.path().join("conf").join("essays-list.txt");
    let summary_path = temp.path().join("summary.json");

    let status = Command::new(env!("CARGO_BIN_EXE_essays"))
        .arg("--origin")
        .arg(server.uri())
        .arg("--output-dir")
        .arg(&output_dir)
        .arg("--manifest")
        .arg(&manifest)
        .arg("--summary-json")
        .arg(&summary_path)
        .arg("--log-level")
        .arg("warn")
        .status()
        .await
        .unwrap();
    assert!(status.success());

    let essay = output_dir.join("1_May_2003_Hackers_and_Painters.md");
    assert!(essay.exists());
    assert_eq!(
        fs::read_to_string(&manifest).unwrap(),
        format!("{}\n", essay.display())
    );

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&summary_path).unwrap()).unwrap();
    assert_eq!(summary["listed"], 2);
    assert_eq!(summary["skipped"], serde_json::json!(["Undated"]));
    assert_eq!(summary["written"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn cli_fails_on_unreachable_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles.html"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let temp = tempfile::TempDir::new().unwrap();
    let manifest = temp.path().join("essays-list.txt");

    let output = Command::new(env!("CARGO_BIN_EXE_essays"))
        .arg("--origin")
        .arg(server.uri())
        .arg("--output-dir")
        .arg(temp.path().join("essays"))
        .arg("--manifest")
        .arg(&manifest)
        .output()
        .await
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("503"));
    assert!(!manifest.exists());
}

#[tokio::test]
async fn cli_version_carries_build_hash() {
    let output = Command::new(env!("CARGO_BIN_EXE_essays"))
        .arg("--version")
        .output()
        .await
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with(&format!("essays {} (", env!("CARGO_PKG_VERSION"))));
    assert!(stdout.trim_end().ends_with(')'));
}
