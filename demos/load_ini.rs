use ini_config::{logging, ConfigSource, IniConfig, IniOptions};

fn main() -> Result<(), ini_config::Error> {
    let path = "demos/app.ini";

    // Logging is an explicit step, separate from loading the configuration.
    logging::init_from_file(path, true)?;

    let config = IniConfig::load(&IniOptions::new(path).with_prefix("app."))?;

    let server = config.get_section("server")?;
    log::info!(
        "server listening on {}:{}",
        server.get_or("host", "0.0.0.0"),
        server.get_or("port", "80")
    );

    let database = config.get_section("database")?;
    for (key, value) in database {
        println!("database.{key} = {value}");
    }

    println!("sections: {}", config.keys().collect::<Vec<_>>().join(", "));

    Ok(())
}
