use anyhow::Context;
use tracing_subscriber::EnvFilter;
use yatube::{
    app, db, shutdown_on,
    models::groups::{Group, NewGroup},
    AppState, Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("yatube=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let db_pool = db::connect(&config.database_url, config.database_max_connections).await?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => {}
        [command, slug, title, description @ ..] if command == "create-group" => {
            let group = Group::create(
                &db_pool,
                NewGroup {
                    title: title.clone(),
                    slug: slug.clone(),
                    description: description.join(" "),
                },
            )
            .await?;
            println!("created group /group/{}/ ({})", group.slug, group);
            return Ok(());
        }
        _ => anyhow::bail!("usage: yatube [create-group <slug> <title> [description...]]"),
    }

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Couldn't bind {}", config.bind_address))?;
    tracing::info!("listening on {}", config.bind_address);

    axum::serve(listener, app(AppState::new(db_pool, config)))
        .with_graceful_shutdown(shutdown_on(tokio::signal::ctrl_c()))
        .await?;

    Ok(())
}
