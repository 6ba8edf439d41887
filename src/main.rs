use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{error, info, warn};

use silabas::app::App;
use silabas::config::{Config, SpeechBackendKind};
use silabas::event::EventHandler;
use silabas::logging;
use silabas::ui::render::render;
use silabas::ui::theme::Theme;

#[derive(Parser)]
#[command(
    name = "silabas",
    version,
    about = "Complete Spanish words syllable by syllable, then say a sentence with them"
)]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Word list JSON file to play instead of the bundled one")]
    words: Option<PathBuf>,

    #[arg(short, long, help = "Sentence generator endpoint URL")]
    endpoint: Option<String>,

    #[arg(long, help = "Never use the network; sentences come from the word list")]
    offline: bool,

    #[arg(short, long, help = "Word to start from (1-based)")]
    start: Option<usize>,

    #[arg(long, value_enum, help = "Speech capture backend")]
    speech: Option<SpeechBackendKind>,

    #[arg(long, help = "Speech recognizer program (implies --speech command)")]
    speech_command: Option<String>,

    #[arg(long, help = "Interface language (es, en)")]
    locale: Option<String>,

    #[arg(long, help = "List available themes and exit")]
    list_themes: bool,

    #[arg(long, help = "Save the effective settings to the config file")]
    save_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list_themes {
        for name in Theme::available_themes() {
            println!("{name}");
        }
        return Ok(());
    }

    let (mut config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    apply_cli(&mut config, &cli);

    if let Err(err) = logging::init(Path::new(&config.log_file)) {
        eprintln!("warning: logging disabled: {err:#}");
    }
    if let Some(err) = config_error {
        warn!(error = %err, "could not read config file, using defaults");
    }
    info!(version = env!("CARGO_PKG_VERSION"), "starting");

    rust_i18n::set_locale(&config.locale);

    if cli.save_config {
        config.save()?;
    }

    let events = EventHandler::new(Duration::from_millis(100));
    let mut app = App::new(config, events.sender())?;
    if let Some(start) = cli.start {
        app.set_start(start.saturating_sub(1));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Release events are filtered out, but asking for them keeps key
    // reporting consistent across terminals.
    let keyboard_enhanced = execute!(
        io::stdout(),
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
    )
    .is_ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &events);

    if keyboard_enhanced {
        let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        error!(error = %err, "game loop failed");
        eprintln!("Error: {err:?}");
    }
    info!("exiting");

    Ok(())
}

fn apply_cli(config: &mut Config, cli: &Cli) {
    if let Some(ref theme) = cli.theme {
        config.theme = theme.clone();
    }
    if let Some(ref words) = cli.words {
        config.words_file = Some(words.to_string_lossy().to_string());
    }
    if let Some(ref endpoint) = cli.endpoint {
        config.sentence_endpoint = endpoint.clone();
    }
    if cli.offline {
        config.offline = true;
    }
    if let Some(kind) = cli.speech {
        config.speech.backend = kind;
    }
    if let Some(ref program) = cli.speech_command {
        config.speech.backend = SpeechBackendKind::Command;
        config.speech.command = Some(program.clone());
    }
    if let Some(ref locale) = cli.locale {
        config.locale = locale.clone();
    }
    config.normalize(&silabas::available_locales());
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        let event = events.next()?;
        app.handle_event(event);

        if app.should_quit {
            return Ok(());
        }
    }
}
