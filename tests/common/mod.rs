//! Common fixtures for the integration suite.

// Not every helper is used by every test file.
#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use tplpass::test_utils::ProjectFixture;

/// A small site: one page including a header partial and reading `site.json`.
pub fn site_project() -> Result<ProjectFixture> {
    let project = ProjectFixture::new()?;
    project.write("pages/index.html.tera", "{% include \"partials/header\" %}<main>{{ site.title }}</main>")?;
    project.write("pages/about.html.tera", "<p>{{ site.tagline }}</p>")?;
    project.write("partials/header.tera", "<header>{{ site.title }}</header>")?;
    project.write("data/site.json", r#"{"title": "Hi", "tagline": "Small and fast"}"#)?;
    project.write_config(
        r#"
entry = "pages/*.tera"
output = "dist/[name]"
data = "data/*.json"
partials = "partials"
"#,
    )?;
    Ok(project)
}

/// The `tplpass` binary, run from the project root.
pub fn tplpass_cmd(project: &ProjectFixture) -> Command {
    let mut cmd = Command::cargo_bin("tplpass").unwrap();
    cmd.current_dir(project.root()).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}
