#[test]
fn json_output_summary_snapshot() {
  test_support::init_tracing();

  let out = test_support::cmd_bin("diff2html")
    .args(["-i", "file", "-f", "json", "-o", "stdout", "--"])
    .arg(test_support::fixtures_dir().join("sample.diff"))
    .output()
    .unwrap();
  assert!(out.status.success());

  let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
  let file = &v[0];
  let lines: Vec<String> = file["blocks"][0]["lines"]
    .as_array()
    .unwrap()
    .iter()
    .map(|l| format!("{}:{}", l["type"].as_str().unwrap(), l["content"].as_str().unwrap()))
    .collect();
  let summary = serde_json::json!({
    "name": file["newName"],
    "added": file["addedLines"],
    "deleted": file["deletedLines"],
    "header": file["blocks"][0]["header"],
    "lines": lines,
  });

  insta::assert_json_snapshot!(summary, @r#"
  {
    "added": 1,
    "deleted": 1,
    "header": "@@ -1 +1 @@",
    "lines": [
      "delete:test",
      "insert:test1"
    ],
    "name": "sample.txt"
  }
  "#);
}
