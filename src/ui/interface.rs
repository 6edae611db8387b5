use dialoguer::{Confirm, Select};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::Config;
use crate::core::{FlipOutcome, GameEngine};
use crate::ui::components::{parse_position, position_label, Display};
use crate::ui::ThemeManager;
use crate::utils::{GameError, GameResult};

// Short pause so match/mismatch feedback is visible before the next redraw.
const FEEDBACK_DELAY_MS: u64 = 600;

#[derive(Debug, Default, Clone)]
pub struct SessionStats {
    pub games_played: u32,
    pub games_won: u32,
    pub total_moves: u32,
    pub best_moves: Option<u32>,
}

impl SessionStats {
    pub fn record_win(&mut self, moves: u32) {
        self.games_played += 1;
        self.games_won += 1;
        self.total_moves += moves;
        self.best_moves = Some(match self.best_moves {
            Some(best) => best.min(moves),
            None => moves,
        });
    }

    pub fn record_abandoned(&mut self, moves: u32) {
        self.games_played += 1;
        self.total_moves += moves;
    }
}

pub struct GameInterface {
    engine: GameEngine,
    display: Display,
    config: Config,
    session: SessionStats,
}

impl GameInterface {
    pub async fn new(config: Config) -> GameResult<Self> {
        info!("Initializing game interface");

        config.validate()?;

        let theme_manager = ThemeManager::new();
        let mut display = Display::new(theme_manager)
            .map_err(|e| GameError::configuration(format!("Failed to create display: {}", e)))?;

        // Set theme if configured
        if !display.set_theme(&config.ui.theme) {
            warn!("Unknown theme '{}', using default", config.ui.theme);
        }

        Ok(Self {
            engine: GameEngine::new(),
            display,
            config,
            session: SessionStats::default(),
        })
    }

    pub async fn run(&mut self) -> GameResult<()> {
        info!("Starting game interface");

        loop {
            match self.show_main_menu().await {
                Ok(should_continue) => {
                    if !should_continue {
                        break;
                    }
                }
                Err(e) => {
                    self.display
                        .show_error(&format!("An error occurred: {}", e))
                        .ok();
                    self.display.wait_for_enter().ok();
                }
            }
        }

        self.display.show_message("Thanks for playing!", "success").ok();

        Ok(())
    }

    pub async fn show_main_menu(&mut self) -> GameResult<bool> {
        self.display.clear_screen().ok();
        self.show_game_title()?;

        let choices = vec![
            "🎮 New Game",
            "📖 How to Play",
            "📊 Session Statistics",
            "🎨 Change Theme",
            "🚪 Exit",
        ];

        let selection = Select::new()
            .with_prompt("What would you like to do?")
            .items(&choices)
            .default(0)
            .interact()
            .map_err(|e| GameError::interface(format!("Menu selection error: {}", e)))?;

        match selection {
            0 => self.start_new_game(None).await?,
            1 => self.show_how_to_play()?,
            2 => self.show_session_statistics()?,
            3 => self.change_theme()?,
            4 => return Ok(false), // Exit
            _ => unreachable!(),
        }

        Ok(true)
    }

    fn show_game_title(&self) -> GameResult<()> {
        // ASCII art title
        let title = r#"
╔╦╗┌─┐┌┬┐┌─┐┬─┐┬ ┬  ╔╦╗┌─┐┌┬┐┌─┐┬ ┬
║║║├┤ ││││ │├┬┘└┬┘  ║║║├─┤ │ │  ├─┤
╩ ╩└─┘┴ ┴└─┘┴└─ ┴   ╩ ╩┴ ┴ ┴ └─┘┴ ┴
"#;

        self.display.show_title(title)?;
        self.display
            .show_message("Find all 8 pairs on the 4x4 grid", "info")?;
        self.display
            .show_message(&format!("Version {}", crate::VERSION), "info")?;
        println!();

        Ok(())
    }

    pub async fn start_new_game(&mut self, seed: Option<u64>) -> GameResult<()> {
        let faces = self.config.ui.card_faces.clone();
        self.engine.new_game(&faces, seed).await?;
        self.game_loop().await
    }

    async fn game_loop(&mut self) -> GameResult<()> {
        while self.engine.is_game_active() && !self.engine.is_game_won() {
            self.render_board()?;

            let input = self
                .display
                .prompt_input("Pick a card (e.g. b3), or (r)eset / (n)ew shuffle / (q)uit: ")?;

            match input.to_lowercase().as_str() {
                "" => continue,
                "r" | "reset" => self.reset_board().await?,
                "n" | "new" => {
                    let faces = self.config.ui.card_faces.clone();
                    self.engine.new_game(&faces, None).await?;
                }
                "q" | "quit" => {
                    if self.confirm_quit()? {
                        if let Some(state) = self.engine.get_game_state() {
                            self.session.record_abandoned(state.moves);
                        }
                        return Ok(());
                    }
                }
                "h" | "help" | "?" => self.show_how_to_play()?,
                other => match parse_position(other) {
                    Some(index) => self.handle_flip(index).await?,
                    None => {
                        self.display
                            .show_error(&format!("'{}' is not a grid position like b3", other))?;
                        sleep(Duration::from_millis(FEEDBACK_DELAY_MS)).await;
                    }
                },
            }
        }

        if self.engine.is_game_won() {
            self.show_win_screen()?;
        }

        Ok(())
    }

    async fn handle_flip(&mut self, index: usize) -> GameResult<()> {
        match self.engine.flip(index).await? {
            FlipOutcome::Ignored => {
                self.display
                    .show_warning("That card can't be flipped right now.")?;
                sleep(Duration::from_millis(FEEDBACK_DELAY_MS)).await;
            }
            FlipOutcome::Revealed => {}
            FlipOutcome::Matched { indices, .. } => {
                self.render_board()?;
                self.display.show_success(&format!(
                    "Match! {} and {}",
                    position_label(indices[0]),
                    position_label(indices[1])
                ))?;
                sleep(Duration::from_millis(FEEDBACK_DELAY_MS)).await;
            }
            FlipOutcome::Mismatched { indices, token } => {
                // Show both cards for the configured delay, then hide them.
                self.render_board()?;
                self.display.show_warning(&format!(
                    "No match: {} and {} — flipping back...",
                    position_label(indices[0]),
                    position_label(indices[1])
                ))?;
                sleep(Duration::from_millis(self.config.game.mismatch_delay_ms)).await;
                self.engine.resolve_mismatch(token).await?;
            }
        }

        Ok(())
    }

    async fn reset_board(&mut self) -> GameResult<()> {
        if self.config.game.reshuffle_on_reset {
            let faces = self.config.ui.card_faces.clone();
            self.engine.new_game(&faces, None).await?;
        } else {
            self.engine.reset().await?;
        }
        Ok(())
    }

    fn render_board(&mut self) -> GameResult<()> {
        self.display.clear_screen().ok();
        self.display.show_message("Memory Match", "title")?;
        self.display.show_separator()?;

        let state = self
            .engine
            .get_game_state()
            .ok_or_else(|| GameError::game("No active game".to_string()))?;

        self.display.show_grid(state)?;
        if self.config.ui.show_stats_in_header {
            self.display.show_stats(state)?;
        }

        Ok(())
    }

    fn show_win_screen(&mut self) -> GameResult<()> {
        self.render_board()?;

        let state = self
            .engine
            .get_game_state()
            .ok_or_else(|| GameError::game("No active game".to_string()))?;
        let stats = state.get_statistics();

        self.session.record_win(stats.moves);

        self.display.show_success("🎊 All pairs found! 🎊")?;
        self.display.show_message(
            &format!(
                "Finished in {} moves ({} misses) after {}",
                stats.moves,
                stats.mismatches,
                state.get_playtime_formatted()
            ),
            "stats",
        )?;
        if let Some(best) = self.session.best_moves {
            self.display
                .show_message(&format!("Session best: {} moves", best), "stats")?;
        }
        self.display.wait_for_enter()?;

        Ok(())
    }

    fn show_how_to_play(&self) -> GameResult<()> {
        self.display.clear_screen().ok();
        self.display.show_message("📖 How to Play", "title")?;
        self.display.show_separator()?;
        self.display.show_message(
            "All 16 cards start face down. Flip two cards per turn by typing",
            "info",
        )?;
        self.display.show_message(
            "their grid position (row letter + column number, e.g. b3).",
            "info",
        )?;
        self.display.show_message(
            "Matching cards stay face up; a mismatched pair flips back after",
            "info",
        )?;
        self.display
            .show_message("a short delay. Find all 8 pairs to win.", "info")?;
        println!();
        self.display
            .show_message("Commands: r = reset board, n = new shuffle, q = quit", "info")?;
        self.display.wait_for_enter()?;

        Ok(())
    }

    fn show_session_statistics(&self) -> GameResult<()> {
        self.display.clear_screen().ok();
        self.display.show_message("📊 Session Statistics", "title")?;
        self.display.show_separator()?;

        self.display.show_message(
            &format!("Games played: {}", self.session.games_played),
            "info",
        )?;
        self.display
            .show_message(&format!("Games won: {}", self.session.games_won), "info")?;
        self.display.show_message(
            &format!("Total moves: {}", self.session.total_moves),
            "info",
        )?;
        match self.session.best_moves {
            Some(best) => self
                .display
                .show_message(&format!("Best game: {} moves", best), "info")?,
            None => self.display.show_message("Best game: —", "info")?,
        }

        self.display.show_separator()?;
        self.display.wait_for_enter()?;

        Ok(())
    }

    fn change_theme(&mut self) -> GameResult<()> {
        let themes = self.display.get_available_themes();

        let selection = Select::new()
            .with_prompt("Choose theme")
            .items(&themes)
            .interact()
            .map_err(|e| GameError::interface(format!("Theme selection error: {}", e)))?;

        let selected_theme = &themes[selection];

        if self.display.set_theme(selected_theme) {
            self.display
                .show_success(&format!("Theme changed to '{}'", selected_theme))?;
        } else {
            self.display
                .show_error(&format!("Failed to set theme '{}'", selected_theme))?;
        }

        self.display.wait_for_enter()?;
        Ok(())
    }

    fn confirm_quit(&self) -> GameResult<bool> {
        let confirmed = Confirm::new()
            .with_prompt("Leave this game and return to the menu?")
            .default(false)
            .interact()
            .map_err(|e| GameError::interface(format!("Quit confirmation error: {}", e)))?;

        Ok(confirmed)
    }
}
