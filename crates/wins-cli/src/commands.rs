use crate::cli::{AddArgs, Cli, Command, CredentialArgs, ImportArgs, LayoutArgs, RenderArgs};
use anyhow::{Context, Result, bail};
use spiral::svg::render_svg;
use spiral::{Milestone, SpiralScene};
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, info};
use wins_client::{
    ClientConfig, FileSessionStore, ImportReport, WinsApp, WinsResponse, default_config_path,
    load_config,
};

pub async fn run(cli: Cli) -> Result<()> {
    let config = client_config(&cli)?;
    let store = session_store(&cli)?;
    debug!(api = %config.api_base_url, session = %store.path().display(), "resolved settings");

    match cli.command {
        Command::Login(args) => login(&config, store, args).await,
        Command::Register(args) => register(&config, store, args).await,
        Command::Logout => logout(&config, store),
        Command::List(output) => list(&config, store, output.json).await,
        Command::Add(args) => add(&config, store, args).await,
        Command::Import(args) => import(&config, store, args).await,
        Command::Layout(args) => layout(&config, store, args).await,
        Command::Render(args) => render(&config, store, args).await,
    }
}

fn client_config(cli: &Cli) -> Result<ClientConfig> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    let config = load_config(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?
        .with_env_overrides()
        .with_api_url_override(cli.api_url.clone());
    config
        .validate()
        .with_context(|| format!("Invalid config in {}", path.display()))?;
    Ok(config)
}

fn session_store(cli: &Cli) -> Result<FileSessionStore> {
    match &cli.session_file {
        Some(path) => Ok(FileSessionStore::new(path)),
        None => Ok(FileSessionStore::default_location()?),
    }
}

/// App with the stored session (if any) loaded and wins fetched.
async fn open_app(config: &ClientConfig, store: FileSessionStore) -> Result<WinsApp<FileSessionStore>> {
    let mut app = WinsApp::new(config, store)?;
    app.start().await?;
    Ok(app)
}

async fn open_session(
    config: &ClientConfig,
    store: FileSessionStore,
) -> Result<WinsApp<FileSessionStore>> {
    let app = open_app(config, store).await?;
    if !app.is_authenticated() {
        bail!("Not logged in; run `wins login --email <EMAIL>` first");
    }
    Ok(app)
}

async fn login(config: &ClientConfig, store: FileSessionStore, args: CredentialArgs) -> Result<()> {
    let password = read_password(&args)?;
    let mut app = WinsApp::new(config, store)?;
    app.login(&args.email, &password).await?;
    println!(
        "Logged in as {} ({} wins)",
        args.email.trim(),
        app.milestones().len()
    );
    Ok(())
}

async fn register(config: &ClientConfig, store: FileSessionStore, args: CredentialArgs) -> Result<()> {
    let password = read_password(&args)?;
    let app = WinsApp::new(config, store)?;
    let msg = app.register(&args.email, &password).await?;
    println!("{msg}");
    Ok(())
}

fn logout(config: &ClientConfig, store: FileSessionStore) -> Result<()> {
    let mut app = WinsApp::new(config, store)?;
    app.logout()?;
    println!("Logged out");
    Ok(())
}

async fn list(config: &ClientConfig, store: FileSessionStore, json: bool) -> Result<()> {
    let app = open_session(config, store).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(app.milestones())?);
        return Ok(());
    }
    if app.milestones().is_empty() {
        println!("No wins yet");
    }
    for milestone in app.milestones() {
        println!("{}\t{}", milestone.date, milestone.desc);
    }
    Ok(())
}

async fn add(config: &ClientConfig, store: FileSessionStore, args: AddArgs) -> Result<()> {
    let mut app = open_session(config, store).await?;
    let added = app.add(&args.date, &args.desc).await?;
    println!("Added {}: {}", added.date, added.desc);
    Ok(())
}

async fn import(config: &ClientConfig, store: FileSessionStore, args: ImportArgs) -> Result<()> {
    let milestones = read_milestones(&args.input)?;
    let mut app = open_session(config, store).await?;
    let report = app.import(&milestones).await?;
    println!("{}", import_summary(&report));
    Ok(())
}

fn import_summary(report: &ImportReport) -> String {
    let mut summary = format!("added {} of {}", report.added, report.total);
    if !report.failed.is_empty() {
        let failed: Vec<String> = report.failed.iter().map(usize::to_string).collect();
        summary.push_str(&format!(" (failed: {})", failed.join(", ")));
    }
    summary
}

async fn layout(config: &ClientConfig, store: FileSessionStore, args: LayoutArgs) -> Result<()> {
    let milestones = load_milestones(config, store, args.input.as_deref()).await?;
    let scene = SpiralScene::build(&milestones, &config.scene);
    if args.output.json {
        println!("{}", serde_json::to_string_pretty(&scene)?);
    } else {
        print!("{}", describe_scene(&milestones, &scene));
    }
    Ok(())
}

async fn render(config: &ClientConfig, store: FileSessionStore, args: RenderArgs) -> Result<()> {
    let milestones = load_milestones(config, store, args.input.as_deref()).await?;
    let scene = SpiralScene::build(&milestones, &config.scene);
    let svg = render_svg(&scene, &args.svg_options());
    match &args.output {
        Some(path) => {
            std::fs::write(path, svg)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), milestones = milestones.len(), "wrote svg");
        }
        None => println!("{svg}"),
    }
    Ok(())
}

/// From `input` when given, otherwise from the backend.
async fn load_milestones(
    config: &ClientConfig,
    store: FileSessionStore,
    input: Option<&Path>,
) -> Result<Vec<Milestone>> {
    match input {
        Some(path) => read_milestones(path),
        None => {
            let app = open_session(config, store).await?;
            Ok(app.milestones().to_vec())
        }
    }
}

/// Accepts the same shapes `GET /wins` returns.
fn read_milestones(path: &Path) -> Result<Vec<Milestone>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let response: WinsResponse = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse milestones in {}", path.display()))?;
    Ok(response.into_milestones())
}

fn describe_scene(milestones: &[Milestone], scene: &SpiralScene) -> String {
    let mut out = format!("mode: {}\n", scene.mode.as_str());
    for (i, (milestone, (t, point))) in milestones
        .iter()
        .zip(scene.t_values.iter().zip(&scene.points))
        .enumerate()
    {
        out.push_str(&format!(
            "{i:>3}  {:<11}  t={t:.3}  ({:.2}, {:.2}, {:.2})  {}\n",
            milestone.date, point.x, point.y, point.z, milestone.desc
        ));
    }
    if !scene.labels.is_empty() {
        out.push_str("labels:\n");
    }
    for label in &scene.labels {
        out.push_str(&format!(
            "  {} {:?}: {}\n",
            label.date,
            label.indices,
            label.text.replace('\n', " ")
        ));
    }
    out
}

fn read_password(args: &CredentialArgs) -> Result<String> {
    if args.password_stdin {
        return read_stdin_line();
    }
    match &args.password {
        Some(password) => Ok(password.clone()),
        None => bail!("Password required: pass --password or --password-stdin"),
    }
}

fn read_stdin_line() -> Result<String> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read from stdin")?;
    let password = input.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("No password provided on stdin");
    }
    Ok(password)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spiral::{PositionMode, SceneOptions};

    fn write_input(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("wins.json");
        std::fs::write(&path, contents).expect("write");
        (dir, path)
    }

    #[test]
    fn reads_backend_shaped_file() {
        let (_dir, path) = write_input(
            r#"[{"date": "01.01", "desc": "New Year"}, {"date": "03.13", "subject": "Concert"}]"#,
        );
        let milestones = read_milestones(&path).expect("milestones");
        assert_eq!(milestones.len(), 2);
        assert_eq!(milestones[1].desc, "Concert");
    }

    #[test]
    fn reads_wrapped_file() {
        let (_dir, path) = write_input(r#"{"wins": [{"date": "05.10", "text": "DJ"}]}"#);
        let milestones = read_milestones(&path).expect("milestones");
        assert_eq!(milestones[0].desc, "DJ");
    }

    #[test]
    fn bad_file_names_the_path() {
        let (_dir, path) = write_input("not json");
        let err = read_milestones(&path).expect_err("invalid");
        assert!(err.to_string().contains("wins.json"));
    }

    #[test]
    fn describe_lists_mode_points_and_labels() {
        let milestones = vec![
            Milestone::new("01.01", "a").expect("valid"),
            Milestone::new("01.01", "b").expect("valid"),
            Milestone::new("12.31", "c").expect("valid"),
        ];
        let scene = SpiralScene::build(&milestones, &SceneOptions::default());
        assert_eq!(scene.mode, PositionMode::Chronological);

        let text = describe_scene(&milestones, &scene);
        assert!(text.starts_with("mode: chronological\n"));
        assert!(text.contains("t=1.000"));
        assert!(text.contains("01.01 [0, 1]: a; b"));
        assert!(text.contains("12.31 [2]: c"));
    }

    #[test]
    fn import_summary_lists_failures() {
        let report = ImportReport {
            total: 3,
            added: 3,
            failed: Vec::new(),
        };
        assert_eq!(import_summary(&report), "added 3 of 3");

        let report = ImportReport {
            total: 4,
            added: 2,
            failed: vec![1, 3],
        };
        assert_eq!(import_summary(&report), "added 2 of 4 (failed: 1, 3)");
    }

    #[test]
    fn password_flag_is_used() {
        let args = CredentialArgs {
            email: "a@b.c".to_string(),
            password: Some("pw".to_string()),
            password_stdin: false,
        };
        assert_eq!(read_password(&args).expect("password"), "pw");

        let args = CredentialArgs {
            password: None,
            ..args
        };
        assert!(read_password(&args).is_err());
    }
}
