use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use schoolmis_cli::seeder::{self, AdminAccount, SeedAdminOutcome, SeedConfig};
use schoolmis_config::MongoConfig;
use schoolmis_db::{DocumentStore, MongoStore};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schoolmis-cli")]
#[command(about = "School MIS CLI - Administrative tools for the School MIS database", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the administrator account if it does not exist
    SeedAdmin {
        #[arg(short = 'u', long, default_value = "admin")]
        username: String,

        #[arg(short = 'p', long, env = "SEED_ADMIN_PASSWORD", default_value = "admin123")]
        password: String,

        #[arg(short = 'e', long, default_value = "admin@school.com")]
        email: String,
    },
    /// Seed the database with fake schools, levels, teachers, and students
    Seed {
        /// Number of schools to create
        #[arg(short = 's', long, default_value = "3")]
        schools: usize,

        /// Number of students per school
        #[arg(long, default_value = "20")]
        students: usize,

        /// Number of teachers per school
        #[arg(long, default_value = "4")]
        teachers: usize,
    },
    /// Delete every record except user accounts
    Clear,
    /// Show connection state and record counts
    Status,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command).await {
        eprintln!("\n❌ {e:#}");
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    let config = MongoConfig::from_env();
    let store = MongoStore::connect(&config).await?;

    if let Err(e) = store.ping().await {
        anyhow::bail!("Cannot reach MongoDB at {}: {}", config.redacted_uri(), e);
    }
    println!("🔌 Connected to {} ({})", config.redacted_uri(), store.database_name());
    if let Err(e) = store.ensure_indexes().await {
        println!("⚠️  Could not create unique indexes: {}", e);
    }

    let result = match command {
        Commands::SeedAdmin {
            username,
            password,
            email,
        } => handle_seed_admin(&store, AdminAccount { username, password, email }).await,
        Commands::Seed {
            schools,
            students,
            teachers,
        } => {
            let config = SeedConfig::new(schools)
                .with_students(students)
                .with_teachers(teachers);
            handle_seed(&store, &config).await
        }
        Commands::Clear => handle_clear(&store).await,
        Commands::Status => handle_status(&store).await,
    };

    store.shutdown().await;
    result
}

async fn handle_seed_admin(store: &dyn DocumentStore, account: AdminAccount) -> anyhow::Result<()> {
    match seeder::seed_admin(store, &account).await? {
        SeedAdminOutcome::Created => {
            println!("\n✅ Admin user created successfully!");
            println!("   Username: {}", account.username);
            println!("   Email: {}", account.email);
        }
        SeedAdminOutcome::AlreadyExists => {
            println!("ℹ️  Admin user '{}' already exists", account.username);
        }
    }
    Ok(())
}

async fn handle_seed(store: &dyn DocumentStore, config: &SeedConfig) -> anyhow::Result<()> {
    let report = seeder::seed_all(store, config).await?;
    println!(
        "   {} schools, {} levels, {} classes, {} courses, {} teachers, {} students",
        report.schools, report.levels, report.classes, report.courses, report.teachers, report.students
    );
    Ok(())
}

async fn handle_clear(store: &dyn DocumentStore) -> anyhow::Result<()> {
    println!("🗑️  Clearing records...");
    let removed = seeder::clear_all(store).await?;
    println!("✅ Removed {} records (user accounts kept)", removed);
    Ok(())
}

async fn handle_status(store: &dyn DocumentStore) -> anyhow::Result<()> {
    for (collection, count) in seeder::collection_counts(store).await? {
        println!("   {:<10} {}", collection.name(), count);
    }
    Ok(())
}
