#![deny(warnings)]
#![deny(rust_2018_idioms)]

use dashboard::{App, Settings};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    let settings = Settings::new().unwrap();

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_max_level(tracing::Level::from(settings.log_level))
            .with_writer(std::io::stderr)
            .finish(),
    )
    .unwrap();

    let app = App::build(&settings).unwrap();

    app.run(tokio::io::stdin(), tokio::io::stdout())
        .await
        .unwrap();
}
