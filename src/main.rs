mod cli;

use actix_web::{App, HttpServer, web};
use cartiq::{Config, Store};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

#[actix_web::main]
async fn main() -> Result<(), std::io::Error> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let args: Vec<String> = std::env::args().collect();
    let store = Store::new(config.data_dir.clone());

    if args.len() == 1 {
        cli::run_repl(&store);
    } else if args[1] == "serve" {
        info!("Serving '{}' on {}", config.data_dir.display(), config.bind);

        let store = web::Data::new(store);
        HttpServer::new(move || App::new().app_data(store.clone()).configure(cartiq::server::config))
            .bind(config.bind)?
            .run()
            .await?;
    } else {
        cli::run_single_command(&store, &args);
    }

    Ok(())
}
