//! Runs the binary in SVG mode against temporary tables.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const EXPRESSION: &str = "gene\tctrl_1\tctrl_2\ttreat_1\ttreat_2
TP53\t1.2\t0.8\t-1.5\t-2.0
MYC\t-0.3\t0.1\t2.2\t2.8
GAPDH\t0.0\t0.1\t0.0\t-0.1
EGFR\t1.0\t\t-0.5\t-0.7
";

const RESULTS: &str = "gene\tlog2FC\tnlog10P\tbaseMean
TP53\t-2.1\t4.2\t120
MYC\t2.5\t6.0\t800
GAPDH\t0.1\t0.2\t5000
EGFR\t-0.4\t1.8\t60
";

fn write(dir: &TempDir, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

fn plotgeom() -> Command {
    Command::cargo_bin("plotgeom").unwrap()
}

#[test]
fn clustered_heatmap_with_groups_writes_svg() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "expr.tsv", EXPRESSION);
    let out = dir.path().join("heatmap.svg");

    plotgeom()
        .arg(&input)
        .args(["--chart", "heatmap", "--cluster-rows", "--cluster-cols"])
        .args(["--group", "control=#1f77b4:ctrl", "--group", "treated=#d62728:treat"])
        .args(["--range", "-2", "2", "--svg"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(">TP53</text>"));
    assert!(svg.contains(">control</text>"));
    assert!(svg.contains("<line"));
}

#[test]
fn volcano_labels_requested_genes() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "de.tsv", RESULTS);
    let out = dir.path().join("volcano.svg");

    plotgeom()
        .arg(&input)
        .args(["--chart", "volcano", "-x", "log2FC", "-y", "nlog10P"])
        .args(["--label", "myc", "--scale", "2", "--svg"])
        .arg(&out)
        .assert()
        .success();

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains(">MYC</text>"));
    assert!(!svg.contains(">TP53</text>"));
    assert!(svg.contains("stroke-dasharray"));
    assert_eq!(svg.matches("<circle").count(), 4);
}

#[test]
fn bar_chart_uses_the_first_column_by_default() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "de.tsv", RESULTS);
    let out = dir.path().join("bar.svg");

    plotgeom()
        .arg(&input)
        .args(["--chart", "bar", "--svg"])
        .arg(&out)
        .assert()
        .success();

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains(">log2FC</text>"));
    assert!(svg.contains(">GAPDH</text>"));
}

#[test]
fn dot_plot_without_percent_matrix_fails() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "expr.tsv", EXPRESSION);

    plotgeom()
        .arg(&input)
        .args(["--chart", "dot", "--svg"])
        .arg(dir.path().join("dot.svg"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("percent matrix"));
}

#[test]
fn missing_column_is_reported() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "de.tsv", RESULTS);

    plotgeom()
        .arg(&input)
        .args(["--chart", "scatter", "-x", "log2FC", "-y", "padj", "--svg"])
        .arg(dir.path().join("scatter.svg"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Column not found: padj"));
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().unwrap();

    plotgeom()
        .arg(dir.path().join("nope.tsv"))
        .args(["--svg"])
        .arg(dir.path().join("out.svg"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open file"));
}

#[test]
fn malformed_group_is_a_usage_error() {
    plotgeom()
        .args(["table.tsv", "--group", "no-color-here"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NAME=COLOR:TERMS"));
}
