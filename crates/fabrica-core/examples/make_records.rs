use fabrica_core::generators;
use fabrica_core::{Factory, Override, Overrides, Template};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let pet = Template::new().set("name", "Rocky").set("kind", "dog");
    let template = Template::new()
        .sequence("id", generators::count(1, 1))
        .sequence("login", generators::string("user{}"))
        .set("active", true)
        .factory("pet", pet);

    let mut factory = Factory::new(template)?;

    for record in factory.many(2)? {
        println!("{}", serde_json::to_string_pretty(&record)?);
    }

    let mut overrides = Overrides::parse([("pet__name", Override::set("Toby"))])?;
    let record = factory.create_with(&mut overrides)?;
    println!("{}", serde_json::to_string_pretty(&record)?);

    Ok(())
}
