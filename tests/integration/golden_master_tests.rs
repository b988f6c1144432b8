use std::fs;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use tempfile::TempDir;
use xp_doc2html::Attributes;
use xp_doc2html::Converter;
use xp_doc2html::DefaultAttributes;
use xp_doc2html::Release;

/// Golden master test configuration
struct GoldenTest {
    name: &'static str,
    input_file: &'static str,
    attributes: &'static [(&'static str, &'static str)],
}

/// Struct contains fixtures and golden paths
struct TestPaths {
    fixtures_dir: PathBuf,
    golden_dir: PathBuf,
}

/// Helper function to get test paths
fn get_test_paths() -> TestPaths {
    let root_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let fixtures_dir = root_dir.join("tests/fixtures");
    let golden_dir = root_dir.join("tests/golden");

    fs::create_dir_all(&golden_dir).unwrap();

    TestPaths {
        fixtures_dir,
        golden_dir,
    }
}

/// Drop blank lines and trailing whitespace, which the engine may vary between block elements
fn normalize(html: &str) -> Vec<&str> {
    html.lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .collect()
}

/// Run a golden master test, returns the rendered HTML
fn run_golden_test(test: &GoldenTest) -> Result<String> {
    let paths = get_test_paths();
    let out_dir = TempDir::new()?;

    let converter = Converter::new(
        &paths.fixtures_dir,
        DefaultAttributes::from_release(&Release::new("26.1.3")),
    )?;

    let input_path = paths.fixtures_dir.join(test.input_file);
    let output_name = format!("{}.html", test.name);
    let overrides: Attributes = test.attributes.iter().copied().collect();

    converter
        .convert_file(&overrides, &input_path, out_dir.path(), &output_name)
        .with_context(|| format!("Failed to convert: {}", input_path.display()))?;

    converter.shutdown();

    let actual = fs::read_to_string(out_dir.path().join(&output_name))?;

    // Golden file path
    let golden_path = paths.golden_dir.join(&output_name);

    if !golden_path.exists() {
        // Create golden file on first run
        fs::write(&golden_path, &actual)?;
        println!("✨ Created golden file: {}", golden_path.display());
        println!("   Re-run the test to perform comparison.");
        return Ok(actual);
    }

    let expected = fs::read_to_string(&golden_path)?;
    if normalize(&expected) != normalize(&actual) {
        let debug_path = golden_path.with_extension("actual.html");
        fs::write(&debug_path, &actual)?;

        anyhow::bail!(
            "Output of '{}' differs from {}. Actual output saved to: {}",
            test.name,
            golden_path.display(),
            debug_path.display()
        );
    }

    println!("✅ Golden test '{}' passed", test.name);
    Ok(actual)
}

#[test]
fn test_simple_rendering() {
    let test = GoldenTest {
        name: "simple",
        input_file: "simple.md",
        attributes: &[],
    };

    let html = run_golden_test(&test).unwrap();

    assert!(html.contains("<h1>Getting started</h1>"));
    assert!(html.contains("<code>bin/kc.sh start-dev</code>"));
    assert!(html.contains("<li>"));
}

#[test]
fn test_header_attributes_rendering() {
    let test = GoldenTest {
        name: "header",
        input_file: "header.md",
        attributes: &[],
    };

    let html = run_golden_test(&test).unwrap();

    assert!(html.contains("<h1>Keycloak 26.1.3</h1>"));
    assert!(html.contains("upgrading to Keycloak 26.1."));
    assert!(html.contains("<table>"));
    assert!(!html.contains("title: Upgrading"));
}

#[test]
fn test_include_rendering() {
    let test = GoldenTest {
        name: "include",
        input_file: "include.md",
        attributes: &[("product", "Keycloak")],
    };

    let html = run_golden_test(&test).unwrap();

    assert!(html.contains("<blockquote>"));
    assert!(html.contains("Note: Keycloak 26.1.3 requires Java 21."));
    assert!(html.contains("Unchanged {version} reference."));
}

#[test]
fn test_code_block_rendering() {
    let test = GoldenTest {
        name: "code",
        input_file: "code.md",
        attributes: &[("hostname", "sso.example.org")],
    };

    let html = run_golden_test(&test).unwrap();

    assert!(html.contains(r#"<code class="language-bash">"#));
    assert!(html.contains("--hostname={hostname}"));
    assert!(html.contains("Hostname is sso.example.org."));
}
