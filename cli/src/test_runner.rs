use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use md2struct::{Compatibility, Conversion, ParseError, ParseOptions, Recovery};

#[derive(Debug, Deserialize)]
pub struct ExpectedWarning {
    /// Substring that must appear in the warning message.
    pub contains: String,

    /// If set, the warning's span must start on this 1-based line of the body.
    #[serde(default)]
    pub line: Option<usize>,
}

/// TOML frontmatter of a `.test.md` fixture.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureConfig {
    /// Human-readable test description.
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub compatibility: Compatibility,

    #[serde(default)]
    pub on_malformed: Recovery,

    /// Expected document as JSON. Compared structurally, so key order and
    /// whitespace do not matter.
    #[serde(default)]
    pub expect_output: Option<String>,

    /// Expected number of blocks.
    #[serde(default)]
    pub expect_blocks: Option<usize>,

    /// Expected warnings. If present (even empty), warning count and content are checked.
    #[serde(default)]
    pub expect_warnings: Option<Vec<ExpectedWarning>>,
}

impl FixtureConfig {
    fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            compatibility: self.compatibility,
            recovery: self.on_malformed,
        }
    }
}

/// Split a `.test.md` file into its TOML frontmatter and markup body.
fn parse_fixture(content: &str) -> Result<(FixtureConfig, &str), String> {
    let content = content.trim_start_matches('\u{feff}');

    let after_open = content
        .strip_prefix("---")
        .ok_or("missing opening --- frontmatter delimiter")?;
    let after_open = after_open
        .strip_prefix('\n')
        .or_else(|| after_open.strip_prefix("\r\n"))
        .unwrap_or(after_open);

    let close_pos = after_open
        .find("\n---")
        .ok_or("missing closing --- frontmatter delimiter")?;

    let toml_str = after_open[..close_pos].trim_end_matches('\r');
    let rest = &after_open[close_pos + 4..];
    let body = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .unwrap_or(rest);

    let config: FixtureConfig =
        toml::from_str(toml_str).map_err(|e| format!("TOML parse error: {}", e))?;

    Ok((config, body))
}

pub enum TestOutcome {
    Pass,
    Fail(String),
}

pub struct TestResult {
    pub path: PathBuf,
    pub description: Option<String>,
    pub outcome: TestOutcome,
}

impl TestResult {
    fn label(&self) -> &str {
        self.description.as_deref().unwrap_or_else(|| {
            self.path
                .file_name()
                .and_then(|s| s.to_str())
                .map(|s| s.trim_end_matches(".test.md"))
                .unwrap_or("?")
        })
    }
}

fn run_single_test(path: &Path) -> TestResult {
    let fail = |description: Option<String>, reason: String| TestResult {
        path: path.to_path_buf(),
        description,
        outcome: TestOutcome::Fail(reason),
    };

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => return fail(None, format!("cannot read file: {}", e)),
    };

    let (config, body) = match parse_fixture(&content) {
        Ok(pair) => pair,
        Err(e) => return fail(None, format!("frontmatter error: {}", e)),
    };

    let conversion = md2struct::Parser::new(body.to_string(), 0)
        .with_options(config.parse_options())
        .parse();

    let failure = check_output(&config, &conversion)
        .or_else(|| check_block_count(&config, &conversion))
        .or_else(|| {
            config
                .expect_warnings
                .as_deref()
                .and_then(|expected| check_warnings(body, &conversion.diagnostics, expected))
        });

    TestResult {
        path: path.to_path_buf(),
        description: config.description,
        outcome: match failure {
            Some(reason) => TestOutcome::Fail(reason),
            None => TestOutcome::Pass,
        },
    }
}

/// Compare the converted document with `expect_output`. Returns `Some(reason)` on mismatch.
fn check_output(config: &FixtureConfig, conversion: &Conversion) -> Option<String> {
    let expected_json = config.expect_output.as_deref()?;
    let expected: serde_json::Value = match serde_json::from_str(expected_json) {
        Ok(v) => v,
        Err(e) => return Some(format!("expect_output is not valid JSON: {}", e)),
    };
    let actual = match serde_json::to_value(&conversion.document) {
        Ok(v) => v,
        Err(e) => return Some(format!("cannot serialize document: {}", e)),
    };
    if actual == expected {
        None
    } else {
        Some(format!(
            "output mismatch\n  expected: {}\n  actual:   {}",
            expected, actual
        ))
    }
}

fn check_block_count(config: &FixtureConfig, conversion: &Conversion) -> Option<String> {
    let expected = config.expect_blocks?;
    let actual = conversion.document.len();
    (actual != expected).then(|| format!("expected {} block(s), got {}", expected, actual))
}

/// Convert a byte offset in `source` to a 1-based line number.
fn byte_offset_to_line(source: &str, offset: usize) -> usize {
    source[..offset.min(source.len())]
        .bytes()
        .filter(|&b| b == b'\n')
        .count()
        + 1
}

/// Check that actual warnings match expectations. Returns `Some(reason)` on mismatch.
fn check_warnings(
    source: &str,
    diagnostics: &[ParseError],
    expected: &[ExpectedWarning],
) -> Option<String> {
    let actual: Vec<&ParseError> = diagnostics.iter().filter(|d| d.is_warning()).collect();

    if actual.len() != expected.len() {
        let listed: Vec<String> = actual.iter().map(|w| format!("    - {}", w)).collect();
        return Some(format!(
            "expected {} warning(s), got {}\n  actual warnings:\n{}",
            expected.len(),
            actual.len(),
            if listed.is_empty() {
                "    (none)".to_string()
            } else {
                listed.join("\n")
            }
        ));
    }

    for (i, (warning, expectation)) in actual.iter().zip(expected).enumerate() {
        if !warning.message.contains(&expectation.contains) {
            return Some(format!(
                "warning[{}]: expected message containing \"{}\", got: {}",
                i, expectation.contains, warning.message
            ));
        }

        if let Some(expected_line) = expectation.line {
            let actual_line = byte_offset_to_line(source, warning.span.start);
            if actual_line != expected_line {
                return Some(format!(
                    "warning[{}]: expected on line {}, but span is on line {}",
                    i, expected_line, actual_line
                ));
            }
        }
    }

    None
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// Discover `.test.md` files grouped by category (subfolder relative to root).
/// Files directly in `root` get category "" (uncategorized).
fn discover_categorized(root: &Path) -> BTreeMap<String, Vec<PathBuf>> {
    let mut categories: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    collect_fixtures(root, root, &mut categories);
    for files in categories.values_mut() {
        files.sort();
    }
    categories
}

fn collect_fixtures(dir: &Path, root: &Path, out: &mut BTreeMap<String, Vec<PathBuf>>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_fixtures(&path, root, out);
            continue;
        }
        let is_fixture = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(".test.md"));
        if is_fixture {
            let category = path
                .parent()
                .and_then(|p| p.strip_prefix(root).ok())
                .map(|p| p.to_string_lossy().replace('\\', "/"))
                .unwrap_or_default();
            out.entry(category).or_default().push(path);
        }
    }
}

fn category_label(category: &str) -> &str {
    if category.is_empty() { "(root)" } else { category }
}

/// List available categories for the given test path.
pub fn list_categories(path: &Path) {
    if path.is_file() {
        eprintln!("(single file, no categories)");
        return;
    }

    let categories = discover_categorized(path);
    if categories.is_empty() {
        eprintln!("no .test.md files found in {}", path.display());
        return;
    }

    eprintln!("available categories:");
    for (cat, files) in &categories {
        eprintln!("  {} ({} tests)", category_label(cat), files.len());
    }
}

/// Keep only the requested categories (and their subfolders).
fn select_categories<'a>(
    all: &'a BTreeMap<String, Vec<PathBuf>>,
    requested: &[String],
) -> BTreeMap<&'a str, &'a Vec<PathBuf>> {
    if requested.is_empty() {
        return all.iter().map(|(k, v)| (k.as_str(), v)).collect();
    }

    let mut selected = BTreeMap::new();
    for request in requested {
        let req = request.trim_matches('/');
        let nested = format!("{}/", req);
        let mut found = false;
        for (cat, files) in all {
            if cat == req || cat.starts_with(&nested) {
                selected.insert(cat.as_str(), files);
                found = true;
            }
        }
        if !found {
            let available: Vec<&str> = all.keys().map(|k| category_label(k)).collect();
            eprintln!(
                "warning: category '{}' not found (available: {})",
                req,
                available.join(", ")
            );
        }
    }
    selected
}

// ---------------------------------------------------------------------------
// Reporting
// ---------------------------------------------------------------------------

struct Style {
    no_color: bool,
}

impl Style {
    fn paint(&self, code: &str, text: &str) -> String {
        if self.no_color {
            text.to_string()
        } else {
            format!("\x1b[{}m{}\x1b[0m", code, text)
        }
    }

    fn pass(&self) -> String {
        self.paint("32", "PASS")
    }

    fn fail(&self) -> String {
        self.paint("31", "FAIL")
    }

    fn bold(&self, text: &str) -> String {
        self.paint("1", text)
    }
}

fn print_failures(failures: &[TestResult]) {
    if failures.is_empty() {
        return;
    }
    eprintln!();
    eprintln!("failures:");
    for failure in failures {
        eprintln!();
        eprintln!("  --- {} ---", failure.path.display());
        if let TestOutcome::Fail(reason) = &failure.outcome {
            for line in reason.lines() {
                eprintln!("  {}", line);
            }
        }
    }
}

fn print_summary(style: &Style, passed: usize, failed: usize) {
    eprintln!();
    if failed == 0 {
        eprintln!("test result: {}. {} passed, 0 failed", style.paint("32", "ok"), passed);
    } else {
        eprintln!(
            "test result: {}. {} passed, {} failed (of {})",
            style.paint("31", "FAILED"),
            passed,
            failed,
            passed + failed
        );
    }
}

/// Run all `.test.md` files under `path` (or a single file).
/// If `categories` is non-empty, only run tests in those categories.
/// Returns exit code: 0 = all pass, 1 = any failure.
pub fn run_tests(path: &Path, no_color: bool, categories: &[String]) -> i32 {
    let style = Style { no_color };

    let groups: Vec<(String, Vec<PathBuf>)> = if path.is_file() {
        vec![(String::new(), vec![path.to_path_buf()])]
    } else {
        let all = discover_categorized(path);
        if all.is_empty() {
            eprintln!("no .test.md files found in {}", path.display());
            return 1;
        }
        let selected = select_categories(&all, categories);
        if selected.is_empty() {
            eprintln!("no matching categories found");
            return 1;
        }
        selected
            .into_iter()
            .map(|(cat, files)| (cat.to_string(), files.clone()))
            .collect()
    };

    let mut passed = 0usize;
    let mut failures: Vec<TestResult> = Vec::new();

    for (cat, files) in &groups {
        if !path.is_file() {
            eprintln!();
            eprintln!("{}", style.bold(category_label(cat)));
        }

        for file in files {
            let result = run_single_test(file);
            match result.outcome {
                TestOutcome::Pass => {
                    passed += 1;
                    eprintln!("  {}  {}", style.pass(), result.label());
                }
                TestOutcome::Fail(_) => {
                    eprintln!("  {}  {}", style.fail(), result.label());
                    failures.push(result);
                }
            }
        }
    }

    print_failures(&failures);
    print_summary(&style, passed, failures.len());

    if failures.is_empty() { 0 } else { 1 }
}
