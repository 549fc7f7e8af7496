use assert_cmd::Command;
use std::fs;
use std::process::Output;

const RANKS_CSV: &str = "name,2009,2010\nAlabama,10,20\nGeorgia,10,15\nIowa,5,5\n";

fn slopegraph() -> Command {
    Command::cargo_bin("slopegraph").expect("binary builds")
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn segments_reads_csv_from_stdin() {
    let output = slopegraph()
        .arg("segments")
        .write_stdin(RANKS_CSV)
        .output()
        .expect("run");
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let segments: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("segment json");
    let segments = segments.as_array().expect("array");
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0]["observation"], 1);
    assert_eq!(segments[0]["x1"], 1);
    assert_eq!(segments[0]["x2"], 2);
    assert_eq!(segments[0]["y1"], 10.0);
    assert_eq!(segments[0]["y2"], 20.0);
    assert_eq!(segments[2]["y2"], 5.0);
}

#[test]
fn empty_and_na_cells_are_missing_values() {
    let output = slopegraph()
        .arg("segments")
        .write_stdin("name,1,2,3\nAlabama,10,,30\nGeorgia,NA,5,na\n")
        .output()
        .expect("run");
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let segments: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("segment json");
    assert_eq!(segments.as_array().expect("array").len(), 0);
}

#[test]
fn json_tables_are_accepted_with_a_flag() {
    let output = slopegraph()
        .args(["segments", "--json"])
        .write_stdin(r#"{ "row_names": ["a"], "values": [[1.0, 2.0]] }"#)
        .output()
        .expect("run");
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let segments: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("segment json");
    let segments = segments.as_array().expect("array");
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0]["y2"], 2.0);
}

#[test]
fn pretty_json_is_indented() {
    let output = slopegraph()
        .args(["segments", "--pretty"])
        .write_stdin(RANKS_CSV)
        .output()
        .expect("run");
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let text = String::from_utf8(output.stdout).expect("utf8");
    assert!(text.starts_with("[\n  {"), "unexpected start: {text:?}");
}

#[test]
fn layout_reports_scales_margins_and_drawables() {
    let output = slopegraph()
        .arg("layout")
        .write_stdin(RANKS_CSV)
        .output()
        .expect("run");
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let layout: serde_json::Value = serde_json::from_slice(&output.stdout).expect("layout json");
    assert_eq!(layout["width"], 700.0);
    assert_eq!(layout["height"], 500.0);
    assert_eq!(layout["xScale"]["domain"][0], 0.9);
    assert_eq!(layout["xScale"]["domain"][1], 2.1);
    assert_eq!(layout["segments"].as_array().expect("segments").len(), 3);
    assert!(!layout["drawables"].as_array().expect("drawables").is_empty());
}

#[test]
fn single_period_tables_fail_before_any_output() {
    let output = slopegraph()
        .arg("segments")
        .write_stdin("name,2009\nAlabama,10\n")
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(
        stderr_of(&output).contains("at least 2 period columns"),
        "stderr: {}",
        stderr_of(&output)
    );
}

#[test]
fn a_name_only_header_is_rejected() {
    let output = slopegraph()
        .arg("segments")
        .write_stdin("name\nAlabama\n")
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr_of(&output).contains("at least one period column"),
        "stderr: {}",
        stderr_of(&output)
    );
}

#[test]
fn unparseable_cells_name_their_position() {
    let output = slopegraph()
        .arg("segments")
        .write_stdin("name,2009,2010\nAlabama,10,junk\n")
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));

    let stderr = stderr_of(&output);
    assert!(stderr.contains("row 1, column 2"), "stderr: {stderr}");
    assert!(stderr.contains("\"junk\""), "stderr: {stderr}");
}

#[test]
fn unknown_flags_exit_with_usage() {
    let output = slopegraph()
        .args(["segments", "--nope"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("USAGE"));
}

#[test]
fn a_json_extension_implies_json_input() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let json_path = tmp.path().join("table.json");
    fs::write(
        &json_path,
        r#"{ "row_names": ["a"], "values": [[1.0, 2.0]] }"#,
    )
    .expect("write json");

    let output = slopegraph()
        .args(["segments", json_path.to_string_lossy().as_ref()])
        .output()
        .expect("run");
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let segments: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("segment json");
    assert_eq!(segments.as_array().expect("array").len(), 1);
}

#[test]
fn a_path_argument_reads_the_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let csv_path = tmp.path().join("ranks.csv");
    fs::write(&csv_path, RANKS_CSV).expect("write csv");

    let output = slopegraph()
        .args(["segments", csv_path.to_string_lossy().as_ref()])
        .output()
        .expect("run");
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let segments: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("segment json");
    assert_eq!(segments.as_array().expect("array").len(), 3);
}

#[test]
fn a_dash_path_reads_stdin() {
    let output = slopegraph()
        .args(["segments", "-"])
        .write_stdin(RANKS_CSV)
        .output()
        .expect("run");
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let segments: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("segment json");
    assert_eq!(segments.as_array().expect("array").len(), 3);
}

#[test]
fn render_writes_svg_to_a_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("ranks.svg");

    let output = slopegraph()
        .args(["render", "--out", out.to_string_lossy().as_ref()])
        .write_stdin(RANKS_CSV)
        .output()
        .expect("run");
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(output.stdout.is_empty());

    let svg = fs::read_to_string(&out).expect("read svg");
    assert!(svg.starts_with("<svg id=\"slopegraph\""), "unexpected svg root");
    assert!(svg.ends_with("</svg>\n"));
}

#[test]
fn render_sanitizes_the_diagram_id() {
    let output = slopegraph()
        .args(["render", "--id", "2010 state ranks"])
        .write_stdin(RANKS_CSV)
        .output()
        .expect("run");
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let svg = String::from_utf8(output.stdout).expect("utf8");
    assert!(svg.contains(r#"id="s-2010-state-ranks""#));
}

#[test]
fn config_files_shape_the_render() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config_path = tmp.path().join("config.json");
    fs::write(
        &config_path,
        r#"{ "width": 640, "height": 360, "decimals": 1 }"#,
    )
    .expect("write config");

    let output = slopegraph()
        .args(["render", "--config", config_path.to_string_lossy().as_ref()])
        .write_stdin(RANKS_CSV)
        .output()
        .expect("run");
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let svg = String::from_utf8(output.stdout).expect("utf8");
    assert!(svg.contains(r#"width="640" height="360""#));
    assert!(svg.contains(">10.0<"), "decimals not applied");
}
