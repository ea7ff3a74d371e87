use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::error::Error;
use std::io::{self, Stdout};
use study_buddy::{
    Action, App, ModelConfig, OpenRouterClient, QuestionGenerator, QuizError, Settings, logger, ui,
};
use tokio::runtime::Runtime;

type Tui = Terminal<CrosstermBackend<Stdout>>;
type Generator = QuestionGenerator<OpenRouterClient>;

fn build_generator(settings: &Settings) -> Result<Generator, QuizError> {
    settings.require_api_key()?;
    let client = OpenRouterClient::new(ModelConfig::from(settings)).map_err(QuizError::Client)?;
    if let Ok(json) = serde_json::to_string(client.config()) {
        logger::info(&format!("Model config: {}", json));
    }
    Ok(QuestionGenerator::with_max_retry(client, settings.max_retry))
}

fn run(
    terminal: &mut Tui,
    app: &mut App,
    generator: &Result<Generator, String>,
    runtime: &Runtime,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.handle_key(key) {
            Action::Quit => return Ok(()),
            Action::Generate => {
                app.begin_generation();
                terminal.draw(|f| ui::draw(f, app))?;

                let result = match generator {
                    Ok(generator) => runtime.block_on(app.generate(generator)),
                    Err(reason) => Err(QuizError::Client(reason.clone())),
                };
                app.finish_generation(result);
            }
            Action::None => {}
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let settings = Settings::from_env()?;
    logger::init(&settings.log_file);
    logger::info("Starting study-buddy");

    let runtime = Runtime::new()?;

    // Settings are fixed for the session, so a missing key is reported on every generate.
    let generator = build_generator(&settings).map_err(|e| {
        logger::error(&format!("Cannot start generation: {}", e));
        e.to_string()
    });

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(settings.results_dir.clone());
    let result = run(&mut terminal, &mut app, &generator, &runtime);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        logger::error(&format!("Terminal error: {}", e));
    }
    logger::info("Exiting study-buddy");
    Ok(result?)
}
