use classroom_config::Settings;
use classroom_db::{connect, indexes::ensure_indexes};
use classroom_services::ClassroomService;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "classroom-cli", version, about = "Virtual classroom maintenance tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the MongoDB indexes the classroom collections rely on.
    EnsureIndexes,
    /// Load a lesson's live classroom and run every validation on it.
    Validate { lesson_id: String },
    /// List the learners currently holding a streaming slot.
    Streaming { lesson_id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (silently ignore if missing)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = Settings::load()?;
    init_tracing(&settings);

    let db = connect(&settings).await?;

    match cli.command {
        Command::EnsureIndexes => {
            ensure_indexes(&db).await?;
            info!(db = %settings.database.name, "Indexes ensured");
        }
        Command::Validate { lesson_id } => {
            let service = ClassroomService::new(&db, &settings.streaming);
            let classroom = service.validate_classroom(&lesson_id).await?;
            let room = classroom.room.as_ref();
            println!(
                "lesson {} is valid: {} material(s), {} attendee(s)",
                classroom.id,
                room.map_or(0, |r| r.materials.len()),
                room.map_or(0, |r| r.attendee_states.len()),
            );
        }
        Command::Streaming { lesson_id } => {
            let service = ClassroomService::new(&db, &settings.streaming);
            let learners = service.streaming_learners(&lesson_id).await?;
            println!("{} learner(s) streaming", learners.len());
            for learner in learners {
                println!("{learner}");
            }
        }
    }

    Ok(())
}

fn init_tracing(settings: &Settings) {
    let json = settings.logging.json;
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.logging.filter.as_str().into()),
        )
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(|| fmt::layer()))
        .init();
}
