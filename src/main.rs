use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use arcana_match::cards::face_label;
use arcana_match::host::{present, AudioError, AudioSink, CardRenderer, Overlay, FLIP_ANIMATION_MS};
use arcana_match::{
    Card, CardId, FlipOutcome, GameConfig, MatchPhase, OverlayPrompt, SessionController, SessionState, SoundCue,
};
use clap::Parser;
use log::{debug, info};
use rustc_hash::FxHashMap;

#[derive(Parser, Debug)]
#[command(
    name = "arcana-match",
    version,
    about = "Tarot memory matching in the terminal"
)]
struct Cli {
    /// JSON game config
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,
    /// RNG seed (overrides the config)
    #[arg(short = 's', long)]
    seed: Option<u64>,
    /// Last level of the journey
    #[arg(long, value_name = "N")]
    max_level: Option<u32>,
    /// Countdown budget in seconds
    #[arg(long, value_name = "UNITS")]
    time_budget: Option<u32>,
    /// Let a bot with perfect memory play one journey
    #[arg(long)]
    auto: bool,
}

struct TerminalAudio;

impl AudioSink for TerminalAudio {
    fn play(&mut self, cue: SoundCue) -> Result<(), AudioError> {
        let sound = match cue {
            SoundCue::CardFlip => "swish",
            SoundCue::PairMatch => "chime",
            SoundCue::LevelComplete => "fanfare",
            SoundCue::GameComplete => "grand fanfare",
        };
        println!("  ~ {sound} ~");
        Ok(())
    }
}

#[derive(Default)]
struct TerminalOverlay {
    visible: Option<OverlayPrompt>,
}

impl Overlay for TerminalOverlay {
    fn show(&mut self, prompt: &OverlayPrompt) {
        println!();
        println!("  +---------------------------------------------");
        println!("  | {}", prompt.title);
        println!("  | {}", prompt.message);
        println!("  | [Enter] {}", prompt.button);
        println!("  +---------------------------------------------");
        self.visible = Some(prompt.clone());
    }

    fn hide(&mut self) {
        self.visible = None;
    }
}

/// Narrates reveals; the board itself is printed from the session state.
#[derive(Default)]
struct TerminalRenderer {
    values: FxHashMap<CardId, u32>,
}

impl CardRenderer for TerminalRenderer {
    fn clear(&mut self) {
        self.values.clear();
    }

    fn spawn(&mut self, card: &Card) {
        self.values.insert(card.id, card.value);
    }

    fn animate_flip(&mut self, card: CardId, face_up: bool) {
        if let (true, Some(&value)) = (face_up, self.values.get(&card)) {
            println!("  {} reveals {}", card, face_label(value));
        }
    }

    fn mark_matched(&mut self, first: CardId, second: CardId) {
        debug!("{first} and {second} stay face up");
    }
}

struct Terminal {
    audio: TerminalAudio,
    overlay: TerminalOverlay,
    renderer: TerminalRenderer,
}

impl Terminal {
    fn new() -> Self {
        Self {
            audio: TerminalAudio,
            overlay: TerminalOverlay::default(),
            renderer: TerminalRenderer::default(),
        }
    }

    fn present(&mut self, session: &mut SessionController) {
        present(session.drain_events(), &mut self.audio, &mut self.overlay, &mut self.renderer);
    }
}

fn print_board(session: &SessionController) {
    let state = session.state();
    println!();
    println!("  {}", session.hud());

    let header: String = (0..state.layout.cols).map(|c| format!("  {c:>2} ")).collect();
    println!("     {header}");
    for row in 0..state.layout.rows {
        let cells: String = (0..state.layout.cols)
            .map(|col| match state.card_at(row, col) {
                Some(card) if card.matched => format!(" ({:>2})", card.value),
                Some(card) if card.flipped => format!(" [{:>2}]", card.value),
                Some(_) => " [  ]".to_string(),
                None => "     ".to_string(),
            })
            .collect();
        println!("  {row:>2} {cells}");
    }
}

fn play_interactive(session: &mut SessionController, terminal: &mut Terminal) -> io::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut last = Instant::now();

    loop {
        let now = Instant::now();
        session.advance(now.duration_since(last).as_millis() as u64);
        last = now;
        terminal.present(session);

        if terminal.overlay.visible.is_none() {
            print_board(session);
            print!("  pick <row> <col>, or q to quit > ");
        } else {
            print!("  > ");
        }
        io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            return Ok(());
        };
        let line = line.trim();
        if line == "q" || line == "quit" {
            return Ok(());
        }

        if terminal.overlay.visible.is_some() {
            session.acknowledge();
            continue;
        }

        let mut parts = line.split_whitespace().map(str::parse::<u32>);
        let (Some(Ok(row)), Some(Ok(col))) = (parts.next(), parts.next()) else {
            println!("  expected two numbers, e.g. `0 2`");
            continue;
        };
        let Some(card) = session.state().card_at(row, col).map(|c| c.id) else {
            println!("  no card at {row} {col}");
            continue;
        };

        let outcome = session.click(card);
        terminal.present(session);
        let wait = match outcome {
            FlipOutcome::Mismatched { .. } => {
                print_board(session);
                session.config().mismatch_delay_ms
            }
            FlipOutcome::Matched { level_cleared: true, .. } => session.config().level_complete_delay_ms,
            _ => 0,
        };
        if wait > 0 {
            std::thread::sleep(Duration::from_millis(wait));
        }
    }
}

/// Remembers every face it has seen on the current level.
#[derive(Default)]
struct Bot {
    level: u32,
    seen: FxHashMap<CardId, u32>,
}

impl Bot {
    fn choose(&mut self, state: &SessionState) -> Option<CardId> {
        if state.current_level != self.level {
            self.level = state.current_level;
            self.seen.clear();
        }

        match state.match_phase {
            MatchPhase::OnePicked(first) => {
                let value = state.card(first)?.value;
                self.known(state, |id, v| v == value && id != first)
                    .or_else(|| self.unseen(state))
            }
            _ => self
                .known(state, |id, v| self.known(state, |other, w| other != id && w == v).is_some())
                .or_else(|| self.unseen(state)),
        }
    }

    fn known(&self, state: &SessionState, wanted: impl Fn(CardId, u32) -> bool) -> Option<CardId> {
        let mut ids: Vec<_> = self
            .seen
            .iter()
            .filter(|(id, _)| state.card(**id).is_some_and(Card::is_selectable))
            .filter(|(id, v)| wanted(**id, **v))
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids.first().copied()
    }

    fn unseen(&self, state: &SessionState) -> Option<CardId> {
        state
            .cards
            .iter()
            .filter(|c| c.is_selectable())
            .find(|c| !self.seen.contains_key(&c.id))
            .or_else(|| state.cards.iter().find(|c| c.is_selectable()))
            .map(|c| c.id)
    }

    fn remember(&mut self, state: &SessionState, card: CardId) {
        if let Some(c) = state.card(card) {
            self.seen.insert(card, c.value);
        }
    }
}

fn play_auto(session: &mut SessionController, terminal: &mut Terminal) {
    let mut bot = Bot::default();
    let step = FLIP_ANIMATION_MS;

    loop {
        terminal.present(session);

        if terminal.overlay.visible.is_some() {
            if session.state().phase.is_terminal() {
                return;
            }
            session.acknowledge();
            continue;
        }

        if session.state().input_locked() {
            session.advance(step);
            continue;
        }

        let Some(card) = bot.choose(session.state()) else {
            session.advance(step);
            continue;
        };
        let outcome = session.click(card);
        if let Some(revealed) = outcome.revealed() {
            bot.remember(session.state(), revealed);
        }
        if matches!(outcome, FlipOutcome::Mismatched { .. } | FlipOutcome::Matched { .. }) {
            terminal.present(session);
            print_board(session);
        }
        session.advance(step);
    }
}

fn load_config(cli: &Cli) -> Result<GameConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::new(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    } else if cli.config.is_none() {
        config.seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
    }
    if let Some(max_level) = cli.max_level {
        config.max_level = max_level;
    }
    if let Some(budget) = cli.time_budget {
        config.time_budget = budget;
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    info!("seed {}", config.seed);
    let mut session = SessionController::new(config)?;
    let mut terminal = Terminal::new();

    if cli.auto {
        play_auto(&mut session, &mut terminal);
    } else {
        play_interactive(&mut session, &mut terminal)?;
    }

    let state = session.state();
    println!();
    println!(
        "  Reached level {} with {} levels completed. Final score: {}",
        state.current_level,
        state.levels_completed,
        state.final_score.unwrap_or_else(|| state.compute_final_score())
    );
    info!("dealing rng: {}", serde_json::to_string(&session.rng_state())?);
    Ok(())
}
