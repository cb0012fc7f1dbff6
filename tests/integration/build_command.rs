use predicates::prelude::*;

use crate::common::{site_project, tplpass_cmd};

#[test]
fn test_build_writes_rendered_pages() {
    let project = site_project().unwrap();

    tplpass_cmd(&project)
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("Build complete!"))
        .stdout(predicate::str::contains("2 template(s) compiled"));

    assert_eq!(project.read("dist/index.html").unwrap(), "<header>Hi</header><main>Hi</main>");
    assert_eq!(project.read("dist/about.html").unwrap(), "<p>Small and fast</p>");
}

#[test]
fn test_build_with_explicit_config_path() {
    let project = site_project().unwrap();
    let config = project.path("tplpass.toml");
    let elsewhere = tempfile::TempDir::new().unwrap();

    let mut cmd = tplpass_cmd(&project);
    cmd.current_dir(elsewhere.path()).arg("--config").arg(&config).arg("build").assert().success();

    assert!(project.path("dist/index.html").exists());
}

#[test]
fn test_quiet_build_prints_nothing() {
    let project = site_project().unwrap();

    tplpass_cmd(&project).args(["build", "--quiet"]).assert().success().stdout(predicate::str::is_empty());
}

#[test]
fn test_output_dir_override() {
    let project = site_project().unwrap();
    project
        .write_config(
            r#"
entry = "pages/*.tera"
output = "public/[name]"
data = "data/*.json"
partials = "partials"
"#,
        )
        .unwrap();

    tplpass_cmd(&project).args(["build", "--output-dir", "public"]).assert().success();

    assert!(project.path("public/about.html").exists());
}

#[test]
fn test_missing_config_fails() {
    let project = tplpass::test_utils::ProjectFixture::new().unwrap();

    tplpass_cmd(&project)
        .arg("build")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Configuration file not found").or(predicate::str::contains("tplpass.toml")));
}

#[test]
fn test_template_error_fails_the_build() {
    let project = site_project().unwrap();
    project.write("pages/broken.html.tera", "{% if %}").unwrap();

    tplpass_cmd(&project).arg("build").assert().failure().code(1);
    assert!(!project.path("dist/broken.html").exists());
}
