/// CLI: стадия трансформации и API сервер для инференса

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use diamond_price::{
    api::{self, AppState},
    DataTransformation, TransformationConfig,
};

#[derive(Parser)]
#[command(name = "diamond-price", version, about = "Diamond price preprocessing pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Обучить трансформер на train и применить к train/test
    Train {
        #[arg(long)]
        train: PathBuf,
        #[arg(long)]
        test: PathBuf,
        /// JSON конфиг стадии трансформации
        #[arg(long)]
        config: Option<PathBuf>,
        /// Куда сохранить трансформер (перекрывает конфиг)
        #[arg(long)]
        preprocessor: Option<PathBuf>,
    },
    /// Запустить API сервер с сохранённым трансформером
    Serve {
        #[arg(long, default_value = "artifacts/preprocessor.json")]
        preprocessor: PathBuf,
        #[arg(long, default_value = "0.0.0.0:8000")]
        addr: SocketAddr,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Инициализация логирования
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match Cli::parse().command {
        Command::Train {
            train,
            test,
            config,
            preprocessor,
        } => run_train(train, test, config, preprocessor),
        Command::Serve { preprocessor, addr } => serve(preprocessor, addr).await,
    }
}

fn run_train(
    train: PathBuf,
    test: PathBuf,
    config: Option<PathBuf>,
    preprocessor: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut config = match config {
        Some(path) => TransformationConfig::from_file(&path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => TransformationConfig::default(),
    };
    if let Some(path) = preprocessor {
        config = config.with_preprocessor_path(path);
    }

    let transformation = DataTransformation::new(config);
    let output = transformation
        .initiate_data_transformation(&train, &test)
        .context("data transformation failed")?;

    tracing::info!(
        "Train array {:?}, test array {:?}, preprocessor at {}",
        output.train.dim(),
        output.test.dim(),
        output.preprocessor_path.display()
    );
    println!(
        "{} {}",
        output.preprocessor_path.display(),
        output.preprocessor.feature_names().join(",")
    );
    Ok(())
}

async fn serve(preprocessor: PathBuf, addr: SocketAddr) -> anyhow::Result<()> {
    let state = AppState::from_artifact(&preprocessor)
        .with_context(|| format!("failed to load preprocessor {}", preprocessor.display()))?;
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
