//! Partials across passes.

use anyhow::Result;
use tplpass::config::Options;
use tplpass::host::FsHost;
use tplpass::pipeline::Pipeline;
use tplpass::templating::PartialSource;
use tplpass::test_utils::ProjectFixture;

#[tokio::test]
async fn test_edited_partial_takes_effect_next_pass() -> Result<()> {
    let project = ProjectFixture::new()?;
    project.write("pages/index.html.tera", "[{% include \"partials/nav\" %}]")?;
    project.write("partials/nav.tera", "v1")?;

    let options = Options::new(project.root(), ["pages/*.tera"])
        .with_output("dist/[name]")
        .with_partials(PartialSource::Pattern("partials".into()));
    let mut pipeline = Pipeline::new(options)?;
    let mut host = FsHost::new(project.path("dist"));

    host.run_pass(&mut pipeline).await?;
    assert_eq!(project.read("dist/index.html")?, "[v1]");

    project.write("partials/nav.tera", "v2")?;
    project.touch_forward("partials/nav.tera", std::time::Duration::from_secs(5))?;
    host.run_pass(&mut pipeline).await?;
    assert_eq!(project.read("dist/index.html")?, "[v2]");
    Ok(())
}

#[tokio::test]
async fn test_nested_directories_name_by_parent() -> Result<()> {
    let project = ProjectFixture::new()?;
    project.write("layout/nav/main.tera", "nav")?;
    project.write("layout/footer.tera", "foot")?;
    project.write("pages/p.tera", "{% include \"nav/main\" %}+{% include \"layout/footer\" %}")?;

    let options = Options::new(project.root(), ["pages/*.tera"])
        .with_output("dist/[name].html")
        .with_partials(PartialSource::Pattern("layout".into()));
    let mut pipeline = Pipeline::new(options)?;
    FsHost::new(project.path("dist")).run_pass(&mut pipeline).await?;

    assert_eq!(project.read("dist/p.html")?, "nav+foot");
    Ok(())
}

#[tokio::test]
async fn test_two_pipelines_do_not_share_partials() -> Result<()> {
    let a = ProjectFixture::new()?;
    a.write("partials/x.tera", "from-a")?;
    a.write("pages/p.tera", "{% include \"partials/x\" %}")?;

    let b = ProjectFixture::new()?;
    b.write("pages/p.tera", "{% include \"partials/x\" %}")?;

    let mut with_partial = Pipeline::new(
        Options::new(a.root(), ["pages/*.tera"])
            .with_output("dist/[name]")
            .with_partials(PartialSource::Pattern("partials".into())),
    )?;
    FsHost::new(a.path("dist")).run_pass(&mut with_partial).await?;
    assert_eq!(a.read("dist/p")?, "from-a");

    let mut without = Pipeline::new(Options::new(b.root(), ["pages/*.tera"]).with_output("dist/[name]"))?;
    assert!(FsHost::new(b.path("dist")).run_pass(&mut without).await.is_err());
    Ok(())
}
