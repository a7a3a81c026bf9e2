use clap::{ArgAction, Args, Parser, Subcommand};
use spiral::svg::SvgOptions;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "wins", about = "Dated wins on a 3D spiral timeline", version)]
pub struct Cli {
    /// Backend base URL (overrides the config file and WINS_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: <config dir>/wins/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Session file (default: <local data dir>/wins/session.json)
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    /// More logging on stderr (-v info, -vv debug); RUST_LOG wins when set
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and remember the session
    Login(CredentialArgs),
    /// Create an account
    Register(CredentialArgs),
    /// Forget the stored session
    Logout,
    /// List your wins
    List(OutputArgs),
    /// Add a win
    Add(AddArgs),
    /// Upload every record in a JSON file
    Import(ImportArgs),
    /// Print spiral placement for your wins or a local file
    Layout(LayoutArgs),
    /// Export the spiral as SVG
    Render(RenderArgs),
}

#[derive(Args, Debug)]
pub struct CredentialArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long, conflicts_with = "password_stdin")]
    pub password: Option<String>,
    /// Read the password from stdin
    #[arg(long)]
    pub password_stdin: bool,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// MM.DD or MM.DD-MM.DD
    pub date: String,
    pub desc: String,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON file with a list of {date, desc|subject|text} records
    #[arg(long)]
    pub input: PathBuf,
}

#[derive(Clone, Args, Debug)]
pub struct OutputArgs {
    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct LayoutArgs {
    /// JSON file with a list of {date, desc|subject|text} records
    #[arg(long)]
    pub input: Option<PathBuf>,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// JSON file with a list of {date, desc|subject|text} records
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Write the SVG here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Emphasize the label of this milestone index
    #[arg(long)]
    pub highlight: Option<usize>,
    /// Rotation around the vertical axis, degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub yaw: f64,
    /// Tilt toward the viewer, degrees
    #[arg(long, default_value_t = 15.0, allow_negative_numbers = true)]
    pub pitch: f64,
    /// Pixels per scene unit
    #[arg(long, default_value_t = 40.0)]
    pub scale: f64,
}

impl RenderArgs {
    pub fn svg_options(&self) -> SvgOptions {
        SvgOptions {
            yaw_degrees: self.yaw,
            pitch_degrees: self.pitch,
            scale: self.scale,
            highlight: self.highlight,
        }
    }
}
