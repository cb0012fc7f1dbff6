//! Lifecycle hooks observed through a full pass.

use anyhow::Result;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tplpass::config::Options;
use tplpass::hooks::Hooks;
use tplpass::host::FsHost;
use tplpass::pipeline::Pipeline;
use tplpass::templating::{PartialMap, TemplateEngine};

use crate::common::site_project;

#[tokio::test]
async fn test_before_save_result_is_what_gets_written() -> Result<()> {
    let project = site_project()?;
    let options = Options::new(project.root(), ["pages/about.html.tera"])
        .with_output("dist/[name]")
        .with_data(tplpass::templating::DataSource::Inline(json!({"tagline": "x"})))
        .with_hooks(Hooks {
            before_save: Some(Arc::new(|html: &str, _: &Path| Some(format!("<!doctype html>{html}")))),
            ..Hooks::default()
        });

    let mut pipeline = Pipeline::new(options)?;
    FsHost::new(project.path("dist")).run_pass(&mut pipeline).await?;

    assert_eq!(project.read("dist/about.html")?, "<!doctype html><p>x</p>");
    Ok(())
}

#[tokio::test]
async fn test_hook_order_across_a_pass() -> Result<()> {
    let project = site_project()?;
    let events = Arc::new(Mutex::new(Vec::<String>::new()));

    let record = |label: &'static str| {
        let events = Arc::clone(&events);
        move || events.lock().unwrap().push(label.to_string())
    };
    let (setup, partials, compile, render, save) =
        (record("setup"), record("partials"), record("compile"), record("render"), record("save"));
    let done_events = Arc::clone(&events);

    let hooks = Hooks {
        setup: Some(Arc::new(move |_: &mut TemplateEngine| setup())),
        before_add_partials: Some(Arc::new(move |_: &mut TemplateEngine, _: &PartialMap| -> Option<PartialMap> {
            partials();
            None
        })),
        before_compile: Some(Arc::new(move |_: &str| -> Option<String> {
            compile();
            None
        })),
        before_render: Some(Arc::new(move |_: &Value| -> Option<Value> {
            render();
            None
        })),
        before_save: Some(Arc::new(move |_: &str, _: &Path| -> Option<String> {
            save();
            None
        })),
        on_done: Some(Arc::new(move |target: &Path| {
            let name = target.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
            done_events.lock().unwrap().push(format!("done:{name}"));
        })),
    };

    let options = Options::new(project.root(), ["pages/about.html.tera"])
        .with_output("dist/[name]")
        .with_data(tplpass::templating::DataSource::Glob("data/*.json".into()))
        .with_partials(tplpass::templating::PartialSource::Pattern("partials".into()))
        .with_hooks(hooks);
    let mut pipeline = Pipeline::new(options)?;
    FsHost::new(project.path("dist")).run_pass(&mut pipeline).await?;

    assert_eq!(*events.lock().unwrap(), ["setup", "partials", "compile", "render", "save", "done:about.html"]);
    Ok(())
}

#[tokio::test]
async fn test_on_done_reports_resolved_targets() -> Result<()> {
    let project = site_project()?;
    let targets = Arc::new(Mutex::new(Vec::<PathBuf>::new()));
    let sink = Arc::clone(&targets);

    let options = Options::new(project.root(), ["pages/about.html.tera"])
        .with_output("dist/[name]")
        .with_data(tplpass::templating::DataSource::Glob("data/*.json".into()))
        .with_hooks(Hooks {
            on_done: Some(Arc::new(move |t: &Path| sink.lock().unwrap().push(t.to_path_buf()))),
            ..Hooks::default()
        });
    let mut pipeline = Pipeline::new(options)?;
    FsHost::new(project.path("dist")).run_pass(&mut pipeline).await?;

    assert_eq!(*targets.lock().unwrap(), [project.path("dist/about.html")]);
    Ok(())
}
