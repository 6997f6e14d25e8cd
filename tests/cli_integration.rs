use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const SHEET: &str = r#"Ngày,Sản phẩm,Chi phí QC,Doanh thu,Ghi chú,Kênh,SL đơn,Chi phí VH
20/2/2024,Serum,"100.000","300.000",,,2,"10.000"
25/2/2024,Toner,"50.000","100.000",,,1,0
1/3/2024,Serum,"150.000","450.000",,,3,"15.000"
2/3/2024,Mask,"80.000","120.000",,,2,0
5/3/2024,Toner,"60.000","200.000",,,2,"5.000"
bad,row
12/3/2024,Serum,"99.000","199.000",,,1,0
"#;

struct Fixture {
    dir: tempfile::TempDir,
    sheet: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let sheet = dir.path().join("sheet.csv");
        fs::write(&sheet, SHEET).expect("write sheet");
        Fixture { dir, sheet }
    }

    fn home(&self) -> &Path {
        self.dir.path()
    }

    fn sheet(&self) -> &str {
        self.sheet.to_str().expect("utf-8 path")
    }
}

fn run_adstats(fixture: &Fixture, args: &[&str]) -> (bool, Vec<u8>, Vec<u8>) {
    let bin = std::env::var("CARGO_BIN_EXE_adstats").unwrap_or_else(|_| {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("target");
        path.push("debug");
        if cfg!(windows) {
            path.push("adstats.exe");
        } else {
            path.push("adstats");
        }
        path.to_string_lossy().into_owned()
    });
    let mut cmd = Command::new(bin);
    cmd.args(args)
        // Keep any user config out of the run
        .env("HOME", fixture.home())
        .env("XDG_CONFIG_HOME", fixture.home().join(".config"))
        .env_remove("RUST_LOG");
    let output = cmd.output().expect("run adstats");
    (output.status.success(), output.stdout, output.stderr)
}

fn run_json(fixture: &Fixture, args: &[&str]) -> Value {
    let (ok, stdout, stderr) = run_adstats(fixture, args);
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));
    serde_json::from_slice(&stdout).expect("json")
}

#[test]
fn records_json_filters_and_sorts_newest_first() {
    let fx = Fixture::new();
    let json = run_json(
        &fx,
        &[
            "records",
            "-j",
            "--file",
            fx.sheet(),
            "--since",
            "2024-03-01",
            "--until",
            "20240310",
        ],
    );
    let arr = json.as_array().expect("array output");
    assert_eq!(arr.len(), 3);
    assert_eq!(arr[0]["date"].as_str(), Some("2024-03-05"));
    assert_eq!(arr[2]["date"].as_str(), Some("2024-03-01"));
    assert_eq!(arr[2]["revenue"].as_f64(), Some(450_000.0));
    assert_eq!(arr[2]["operating_cost"].as_f64(), Some(15_000.0));
    assert_eq!(arr[2]["profit"].as_f64(), Some(285_000.0));
    assert_eq!(arr[2]["ad_cost_per_order"].as_f64(), Some(50_000.0));
}

#[test]
fn records_json_respects_product_selection_and_sort() {
    let fx = Fixture::new();
    let json = run_json(
        &fx,
        &[
            "records", "-j", "--file", fx.sheet(), "-p", "Serum", "--sort", "revenue",
        ],
    );
    let arr = json.as_array().expect("array output");
    assert_eq!(arr.len(), 3);
    assert!(arr.iter().all(|r| r["product"] == "Serum"));
    let revenues: Vec<f64> = arr.iter().filter_map(|r| r["revenue"].as_f64()).collect();
    assert_eq!(revenues, [199_000.0, 300_000.0, 450_000.0]);
}

#[test]
fn products_json_compares_with_preceding_window() {
    let fx = Fixture::new();
    let json = run_json(
        &fx,
        &[
            "products",
            "-j",
            "-C",
            "--file",
            fx.sheet(),
            "--since",
            "2024-03-01",
            "--until",
            "2024-03-10",
        ],
    );
    let arr = json.as_array().expect("array output");
    let names: Vec<&str> = arr.iter().filter_map(|p| p["product"].as_str()).collect();
    // profit descending by default
    assert_eq!(names, ["Serum", "Toner", "Mask"]);

    assert_eq!(arr[0]["comparison"]["revenue"].as_f64(), Some(300_000.0));
    assert_eq!(arr[0]["change"]["revenue"].as_f64(), Some(50.0));
    assert_eq!(arr[1]["change"]["revenue"].as_f64(), Some(100.0));
    assert!(arr[2]["comparison"].is_null());
    assert!(arr[2]["change"]["revenue"].is_null());
}

#[test]
fn totals_json_reports_window_and_cost_share() {
    let fx = Fixture::new();
    let json = run_json(
        &fx,
        &[
            "totals",
            "-j",
            "-C",
            "--file",
            fx.sheet(),
            "--since",
            "2024-03-01",
            "--until",
            "2024-03-10",
        ],
    );
    assert_eq!(json["comparison_range"]["start"].as_str(), Some("2024-02-19"));
    assert_eq!(json["comparison_range"]["end"].as_str(), Some("2024-02-29"));
    assert_eq!(json["totals"]["revenue"].as_f64(), Some(770_000.0));
    assert_eq!(json["totals"]["ad_cost"].as_f64(), Some(290_000.0));
    assert_eq!(json["totals"]["orders"].as_f64(), Some(7.0));
    assert_eq!(json["comparison"]["revenue"].as_f64(), Some(400_000.0));

    let shares = json["cost_share"].as_array().expect("cost share");
    let total: f64 = shares.iter().filter_map(|s| s["percent"].as_f64()).sum();
    assert!((total - 100.0).abs() < 1e-9);
}

#[test]
fn explicit_comparison_period() {
    let fx = Fixture::new();
    let json = run_json(
        &fx,
        &[
            "totals",
            "-j",
            "--file",
            fx.sheet(),
            "--since",
            "2024-03-01",
            "--compare-since",
            "2024-02-01",
            "--compare-until",
            "2024-02-21",
        ],
    );
    assert_eq!(json["comparison"]["revenue"].as_f64(), Some(300_000.0));
    assert_eq!(json["range"]["end"], Value::Null);
}

#[test]
fn bounds_json_lists_dates_and_products() {
    let fx = Fixture::new();
    let json = run_json(&fx, &["bounds", "-j", "--file", fx.sheet()]);
    assert_eq!(json["min_date"].as_str(), Some("2024-02-20"));
    assert_eq!(json["max_date"].as_str(), Some("2024-03-12"));
    assert_eq!(json["products"], serde_json::json!(["Mask", "Serum", "Toner"]));
}

#[test]
fn overview_table_reports_skipped_rows() {
    let fx = Fixture::new();
    let (ok, stdout, stderr) = run_adstats(&fx, &["--file", fx.sheet(), "--no-color"]);
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let out = String::from_utf8_lossy(&stdout);
    assert!(out.contains("Totals"), "{out}");
    assert!(out.contains("TOTAL"), "{out}");
    assert!(out.contains("Serum"), "{out}");
    assert!(out.contains("6 rows loaded (1 malformed rows skipped)"), "{out}");

    let err = String::from_utf8_lossy(&stderr);
    assert!(err.contains("skipping malformed row"), "{err}");
}

#[test]
fn vietnamese_locale_groups_with_dots() {
    let fx = Fixture::new();
    let (ok, stdout, stderr) = run_adstats(
        &fx,
        &[
            "records",
            "--file",
            fx.sheet(),
            "--no-color",
            "--locale",
            "vi",
            "--columns",
            "date,product,revenue",
        ],
    );
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));
    let out = String::from_utf8_lossy(&stdout);
    assert!(out.contains("450.000"), "{out}");
    assert!(!out.contains("Profit"), "{out}");
}

#[test]
fn invalid_date_exits_with_error() {
    let fx = Fixture::new();
    let (ok, _stdout, stderr) = run_adstats(&fx, &["--file", fx.sheet(), "--since", "1/3/2024"]);
    assert!(!ok, "should fail on an unparseable date");
    let err = String::from_utf8_lossy(&stderr);
    assert!(err.contains("Invalid date \"1/3/2024\""), "{err}");
}

#[test]
fn unknown_column_exits_with_error() {
    let fx = Fixture::new();
    let (ok, _stdout, stderr) =
        run_adstats(&fx, &["records", "--file", fx.sheet(), "--columns", "date,cpc"]);
    assert!(!ok);
    let err = String::from_utf8_lossy(&stderr);
    assert!(err.contains("Unknown record column \"cpc\""), "{err}");
}

#[test]
fn missing_file_exits_with_fetch_error() {
    let fx = Fixture::new();
    let missing = fx.home().join("nope.csv");
    let (ok, stdout, stderr) =
        run_adstats(&fx, &["--file", missing.to_str().expect("utf-8 path")]);
    assert!(!ok);
    assert!(stdout.is_empty());
    let err = String::from_utf8_lossy(&stderr);
    assert!(err.contains("Failed to read"), "{err}");
}

#[test]
fn config_file_supplies_locale() {
    let fx = Fixture::new();
    fs::write(fx.home().join(".adstats.toml"), "locale = \"vi\"\n").expect("write config");
    let (ok, stdout, stderr) = run_adstats(
        &fx,
        &["records", "--file", fx.sheet(), "--no-color", "--columns", "revenue"],
    );
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));
    assert!(String::from_utf8_lossy(&stdout).contains("300.000"));
}
