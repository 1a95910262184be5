use fabrica_core::generators;
use fabrica_core::{Factory, Template};
use fabrica_persist::{InMemoryBackend, PersistentFactory};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let author = Template::new()
        .set("persistable", true)
        .sequence("name", generators::string("author-{}"));
    let template = Template::new()
        .set("persistable", true)
        .sequence("name", generators::string("post-{}"))
        .factory("author", author);

    let mut posts = PersistentFactory::new(Factory::new(template)?, InMemoryBackend::new());

    let post = posts.make()?;
    println!("{}", serde_json::to_string_pretty(&post)?);
    println!("save order: {:?}", posts.backend().saved_names());

    Ok(())
}
