//! Staleness gating across passes driven by the filesystem host.

use anyhow::Result;
use std::time::Duration;
use tplpass::config::Options;
use tplpass::host::FsHost;
use tplpass::pipeline::{PassOutcome, Pipeline};
use tplpass::templating::{DataSource, PartialSource};
use tplpass::test_utils::{ProjectFixture, init_test_logging};

use crate::common::site_project;

fn pipeline_for(project: &ProjectFixture) -> Result<Pipeline> {
    let options = Options::new(project.root(), ["pages/*.tera"])
        .with_output("dist/[name]")
        .with_data(DataSource::Glob("data/*.json".into()))
        .with_partials(PartialSource::Pattern("partials".into()));
    Pipeline::new(options)
}

#[tokio::test]
async fn test_unrelated_change_skips_the_pass() -> Result<()> {
    init_test_logging(None);
    let project = site_project()?;
    let styles = project.write("styles/site.css", "body {}")?;

    let mut pipeline = pipeline_for(&project)?;
    let mut host = FsHost::new(project.path("dist"));
    host.watch(&styles);

    // First pass always compiles.
    let first = host.run_pass(&mut pipeline).await?;
    assert!(matches!(first.outcome, PassOutcome::Compiled { ref files } if files.len() == 2));

    project.touch_forward("styles/site.css", Duration::from_secs(5))?;
    let second = host.run_pass(&mut pipeline).await?;
    assert_eq!(second.outcome, PassOutcome::Skipped);

    Ok(())
}

#[tokio::test]
async fn test_data_change_recompiles_with_new_values() -> Result<()> {
    init_test_logging(None);
    let project = site_project()?;
    let styles = project.write("styles/site.css", "body {}")?;

    let mut pipeline = pipeline_for(&project)?;
    let mut host = FsHost::new(project.path("dist"));
    host.watch(&styles);

    host.run_pass(&mut pipeline).await?;
    assert_eq!(project.read("dist/about.html")?, "<p>Small and fast</p>");

    project.write("data/site.json", r#"{"title": "Hi", "tagline": "Now slower"}"#)?;
    project.touch_forward("data/site.json", Duration::from_secs(5))?;
    project.touch_forward("styles/site.css", Duration::from_secs(5))?;

    let report = host.run_pass(&mut pipeline).await?;
    assert!(!report.outcome.is_skipped());
    assert_eq!(project.read("dist/about.html")?, "<p>Now slower</p>");

    Ok(())
}

#[tokio::test]
async fn test_unchanged_rebuild_is_byte_identical() -> Result<()> {
    init_test_logging(None);
    let project = site_project()?;
    let mut pipeline = pipeline_for(&project)?;
    let mut host = FsHost::new(project.path("dist"));

    host.run_pass(&mut pipeline).await?;
    let before = project.read("dist/index.html")?;

    // Nothing changed: the conservative rule still recompiles.
    let report = host.run_pass(&mut pipeline).await?;
    assert!(!report.outcome.is_skipped());
    assert_eq!(project.read("dist/index.html")?, before);

    Ok(())
}

#[tokio::test]
async fn test_host_watches_every_tracked_file() -> Result<()> {
    let project = site_project()?;
    let mut pipeline = pipeline_for(&project)?;
    let mut host = FsHost::new(project.path("dist"));

    host.run_pass(&mut pipeline).await?;

    let watched: Vec<_> = host.watched().map(|p| p.to_path_buf()).collect();
    for rel in ["pages/index.html.tera", "pages/about.html.tera", "partials/header.tera", "data/site.json"] {
        assert!(watched.contains(&project.path(rel)), "{rel} is not watched");
    }
    Ok(())
}
