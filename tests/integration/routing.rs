//! Output routing through a full pass.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tplpass::config::Options;
use tplpass::host::FsHost;
use tplpass::output::Routed;
use tplpass::pipeline::{PassOutcome, Pipeline};
use tplpass::test_utils::ProjectFixture;

#[tokio::test]
async fn test_targets_outside_output_dir_are_written_directly() -> Result<()> {
    let project = ProjectFixture::new()?;
    project.write("emails/welcome.tera", "Welcome {{ user }}")?;
    project.write("pages/home.html.tera", "home")?;

    let root = project.root().to_path_buf();
    let options = Options::new(project.root(), ["emails/*.tera", "pages/*.tera"])
        .with_data(tplpass::templating::DataSource::Inline(serde_json::json!({"user": "ada"})))
        .with_output_fn(Arc::new(move |name: &str, source: &Path| {
            if source.parent().is_some_and(|p| p.ends_with("emails")) {
                root.join("mail-out").join(format!("{name}.txt"))
            } else {
                root.join("dist").join(name)
            }
        }));
    let mut pipeline = Pipeline::new(options)?;
    let mut host = FsHost::new(project.path("dist"));

    let report = host.run_pass(&mut pipeline).await?;

    let PassOutcome::Compiled { files } = &report.outcome else {
        panic!("first pass must compile");
    };
    assert_eq!(files[0].routed, Routed::Written(project.path("mail-out/welcome.txt")));
    assert_eq!(files[1].routed, Routed::Asset("home.html".into()));

    assert_eq!(project.read("mail-out/welcome.txt")?, "Welcome ada");
    assert_eq!(report.written, [project.path("dist/home.html")]);
    assert!(!pipeline.pending_assets().contains_key("welcome.txt"));
    Ok(())
}

#[tokio::test]
async fn test_default_output_keeps_source_directory() -> Result<()> {
    let project = ProjectFixture::new()?;
    project.write("dist/a.tmpl", "A")?;
    project.write("dist/b.tmpl", "B")?;

    let mut pipeline = Pipeline::new(Options::new(project.root(), ["dist/*.tmpl"]))?;
    let mut host = FsHost::new(project.path("dist"));
    host.run_pass(&mut pipeline).await?;

    let names: Vec<_> = pipeline.pending_assets().keys().cloned().collect();
    assert_eq!(names, ["a", "b"]);
    assert_eq!(project.read("dist/a")?, "A");
    Ok(())
}
