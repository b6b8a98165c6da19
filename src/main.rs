use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use classroom_buddy::{
    api::models::Role,
    config::Config,
    screens::{
        DashboardScreen, FormState, HomeScreen, LoginScreen, MaterialScreen, Navigation,
        ProfileScreen, RegisterScreen, ScreenError, ScreenState, SubjectScreen, UploadScreen,
    },
    session::{RedbSessionStore, Session},
    AppContext,
};

#[derive(Parser)]
#[command(name = "classroom-buddy", about = "Browse and share academic materials")]
struct Cli {
    /// Keep the session in memory only (nothing is written to SESSION_DIR)
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show whether you are signed in
    Home,

    /// Sign in and store the session token
    Login {
        #[arg(long)]
        username: Option<String>,
    },

    /// Create an account
    Register {
        #[arg(long)]
        username: String,

        #[arg(long)]
        email: String,

        /// student or teacher
        #[arg(long, default_value = "student")]
        role: Role,
    },

    /// Forget the stored session token
    Logout,

    /// List subjects with their material counts
    Dashboard,

    /// List the materials of one subject
    Subject {
        /// Subject slug, e.g. computer-science
        subject_id: String,
    },

    /// Show one material, optionally saving it to disk
    Material {
        subject_id: String,

        material_id: i64,

        /// Directory to download the file into
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Upload a file under a subject
    Upload {
        subject_id: String,

        file: PathBuf,
    },

    /// Show your uploads
    Profile,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config = Config::load()?;
    info!(api = %config.api.base_url, "classroom-buddy starting");

    let session = if cli.ephemeral {
        Session::in_memory()
    } else {
        let store = RedbSessionStore::open(&config.session.dir)?;
        Session::new(Arc::new(store))
    };

    let ctx = Arc::new(AppContext::new(config, session)?);

    let ok = match cli.command {
        Commands::Home => run_home(&ctx)?,
        Commands::Login { username } => run_login(&ctx, username).await?,
        Commands::Register {
            username,
            email,
            role,
        } => run_register(&ctx, username, email, role).await?,
        Commands::Logout => run_logout(&ctx)?,
        Commands::Dashboard => run_dashboard(&ctx).await,
        Commands::Subject { subject_id } => run_subject(&ctx, subject_id).await,
        Commands::Material {
            subject_id,
            material_id,
            save,
        } => run_material(&ctx, subject_id, material_id, save).await,
        Commands::Upload { subject_id, file } => run_upload(&ctx, subject_id, file).await,
        Commands::Profile => run_profile(&ctx).await,
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

fn init_tracing() {
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    match log_format.to_lowercase().as_str() {
        "gcp" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_stackdriver::layer())
                .init();
        }
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_span_list(false)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

// ============================================================================
// Screens
// ============================================================================

fn run_home(ctx: &Arc<AppContext>) -> anyhow::Result<bool> {
    let home = HomeScreen::new(Arc::clone(ctx));
    if home.is_signed_in()? {
        println!("You are signed in.");
    } else {
        println!("You are not signed in.");
    }
    println!("Next: {}", home.primary_action()?);
    Ok(true)
}

async fn run_login(ctx: &Arc<AppContext>, username: Option<String>) -> anyhow::Result<bool> {
    let mut screen = LoginScreen::new(Arc::clone(ctx));
    println!("\"{}\"", screen.quote());

    let username = match username {
        Some(username) => username,
        None => prompt("Username: ")?,
    };
    let password = match std::env::var("CLASSROOM_BUDDY_PASSWORD") {
        Ok(password) => password,
        Err(_) => rpassword::prompt_password("Password: ")?,
    };

    screen.set_username(username);
    screen.set_password(password);

    match screen.submit().await {
        Some(next) => {
            println!("Signed in.");
            Ok(follow(ctx, next).await)
        }
        None => {
            if let Some(message) = screen.error_message() {
                eprintln!("{message}");
            }
            Ok(false)
        }
    }
}

async fn run_register(
    ctx: &Arc<AppContext>,
    username: String,
    email: String,
    role: Role,
) -> anyhow::Result<bool> {
    let mut screen = RegisterScreen::new(Arc::clone(ctx));
    println!("\"{}\"", screen.quote());

    let (password, confirm_password) = match std::env::var("CLASSROOM_BUDDY_PASSWORD") {
        Ok(password) => (password.clone(), password),
        Err(_) => (
            rpassword::prompt_password("Password: ")?,
            rpassword::prompt_password("Confirm password: ")?,
        ),
    };

    screen.edit(|form| {
        form.username = username;
        form.email = email;
        form.password = password;
        form.confirm_password = confirm_password;
        form.role = role;
    });

    let next = screen.submit().await;
    match screen.state() {
        FormState::Succeeded(message) => {
            println!("{message}");
            if let Some(next) = next {
                println!("Next: {next}");
            }
            Ok(true)
        }
        _ => {
            if let Some(message) = screen.error_message() {
                eprintln!("{message}");
            }
            Ok(false)
        }
    }
}

fn run_logout(ctx: &Arc<AppContext>) -> anyhow::Result<bool> {
    let mut screen = ProfileScreen::new(Arc::clone(ctx));
    let next = screen.logout()?;
    println!("Logged out.");
    println!("Next: {next}");
    Ok(true)
}

async fn run_dashboard(ctx: &Arc<AppContext>) -> bool {
    let mut screen = DashboardScreen::new(Arc::clone(ctx));
    screen.load().await;

    match screen.state() {
        ScreenState::Populated(summaries) => {
            println!("The Repository");
            println!();
            for summary in summaries {
                let count = summary
                    .material_count
                    .map(|c| format!("{c} Resources"))
                    .unwrap_or_else(|| "- Resources".to_string());
                println!("  {:<20} {:<18} {}", summary.subject.id, summary.subject.name, count);
                println!("  {:<20} {}", "", summary.subject.description);
            }
            true
        }
        ScreenState::Empty => {
            println!("No subjects available.");
            true
        }
        state => render_failure(state.error(), screen.redirect(), "Could not load subjects."),
    }
}

async fn run_subject(ctx: &Arc<AppContext>, subject_id: String) -> bool {
    let mut screen = SubjectScreen::new(Arc::clone(ctx), subject_id);
    screen.load().await;

    let subject = screen.subject();
    match screen.state() {
        ScreenState::Populated(materials) => {
            println!("{}", subject.name);
            println!("{}", subject.description);
            println!();
            for material in materials {
                println!(
                    "  #{:<6} {:<42} {:<6} {:<14} {}",
                    material.id,
                    material.name,
                    material.extension.as_deref().unwrap_or("-"),
                    material.uploaded_on,
                    material.owner
                );
            }
            true
        }
        ScreenState::Empty => {
            println!("{}", subject.name);
            println!("No materials have been shelved here yet.");
            true
        }
        state => render_failure(state.error(), screen.redirect(), "Could not load materials."),
    }
}

async fn run_material(
    ctx: &Arc<AppContext>,
    subject_id: String,
    material_id: i64,
    save: Option<PathBuf>,
) -> bool {
    let mut screen = MaterialScreen::new(Arc::clone(ctx), subject_id, material_id);
    screen.load().await;

    let ScreenState::Populated(view) = screen.state() else {
        return render_failure(
            screen.state().error(),
            screen.redirect(),
            "Could not load the material.",
        );
    };

    println!("{}", view.name);
    println!("  Subject:  {}", view.subject_name);
    println!("  Owner:    {}", view.owner);
    println!("  Uploaded: {}", view.uploaded_on);
    println!(
        "  Type:     {}",
        if view.is_image {
            "image"
        } else {
            view.extension.as_deref().unwrap_or("file")
        }
    );
    println!("  View:     {}", view.view_url);
    println!("  Download: {}", view.download_url);
    println!("Back: {}", screen.back());

    if let Some(dir) = save {
        match screen.save_to(&dir).await {
            Ok(path) => println!("Saved to {}", path.display()),
            Err(e) => {
                eprintln!("{}", e.user_message("Download failed."));
                return false;
            }
        }
    }
    true
}

async fn run_upload(ctx: &Arc<AppContext>, subject_id: String, file: PathBuf) -> bool {
    let mut screen = UploadScreen::new(Arc::clone(ctx));
    if let Some(next) = screen.mount() {
        return render_failure(screen.state().error(), Some(&next), "Upload failed.");
    }

    screen.set_subject(subject_id);
    screen.set_file(file);

    match screen.submit().await {
        Some(next) => {
            if let FormState::Succeeded(message) = screen.state() {
                println!("{message}");
            }
            follow(ctx, next).await
        }
        None => {
            if let Some(message) = screen.error_message() {
                eprintln!("{message}");
            }
            if let Some(next) = screen.redirect() {
                eprintln!("Next: {next}");
            }
            false
        }
    }
}

async fn run_profile(ctx: &Arc<AppContext>) -> bool {
    let mut screen = ProfileScreen::new(Arc::clone(ctx));
    screen.load().await;

    match screen.state() {
        ScreenState::Populated(profile) => {
            println!("Scholar Profile: {}", profile.username);
            println!(
                "  {} shelved across {} subject(s)",
                profile.total_shelved, profile.unique_subjects
            );
            println!();
            for material in &profile.materials {
                println!(
                    "  #{:<6} {:<42} {:<18} {}",
                    material.id, material.name, material.subject_name, material.uploaded_on
                );
            }
            true
        }
        ScreenState::Empty => {
            println!("Scholar Profile");
            println!("You have not shelved anything yet. Try `classroom-buddy upload`.");
            true
        }
        state => render_failure(state.error(), screen.redirect(), "Failed to load your materials."),
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Render the screen a successful action navigated to.
async fn follow(ctx: &Arc<AppContext>, next: Navigation) -> bool {
    match next {
        Navigation::Dashboard => run_dashboard(ctx).await,
        Navigation::Subject(subject_id) => run_subject(ctx, subject_id).await,
        other => {
            println!("Next: {other}");
            true
        }
    }
}

fn render_failure(
    error: Option<&ScreenError>,
    redirect: Option<&Navigation>,
    fallback: &str,
) -> bool {
    match error {
        Some(e) => eprintln!("{}", e.user_message(fallback)),
        None => eprintln!("{fallback}"),
    }
    if let Some(Navigation::Login) = redirect {
        eprintln!("Sign in first with `classroom-buddy login`.");
    }
    false
}

fn prompt(label: &str) -> std::io::Result<String> {
    print!("{label}");
    std::io::stdout().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
