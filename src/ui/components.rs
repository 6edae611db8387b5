use console::Term;
use std::io::{self, Write};

use crate::core::{GameState, GRID_COLS, GRID_ROWS};
use crate::ui::ThemeManager;

const SEPARATOR_WIDTH: usize = 44;
const HIDDEN_CELL: &str = "··";

pub struct Display {
    term: Term,
    theme_manager: ThemeManager,
}

impl Display {
    pub fn new(theme_manager: ThemeManager) -> io::Result<Self> {
        Ok(Self {
            term: Term::stdout(),
            theme_manager,
        })
    }

    pub fn clear_screen(&self) -> io::Result<()> {
        self.term.clear_screen()
    }

    pub fn show_title(&self, title: &str) -> io::Result<()> {
        let styled_title = self.theme_manager.apply_style(title, "title");

        let border = "═".repeat(SEPARATOR_WIDTH);
        let styled_border = self.theme_manager.apply_style(&border, "separator");

        writeln!(io::stdout(), "{}", styled_title)?;
        writeln!(io::stdout(), "{}", styled_border)?;
        writeln!(io::stdout())?;

        Ok(())
    }

    /// Render the 4x4 grid. What a cell shows is a pure function of the
    /// card's `revealed` flag; the revealed set only picks the highlight.
    pub fn show_grid(&self, state: &GameState) -> io::Result<()> {
        let mut header = String::from("    ");
        for col in 1..=GRID_COLS {
            header.push_str(&format!("  {}  ", col));
        }
        writeln!(
            io::stdout(),
            "{}",
            self.theme_manager.apply_style(&header, "grid_label")
        )?;

        for row in 0..GRID_ROWS {
            let row_label = (b'a' + row as u8) as char;
            let mut line = format!(
                " {}  ",
                self.theme_manager
                    .apply_style(&row_label.to_string(), "grid_label")
            );

            for col in 0..GRID_COLS {
                let index = row * GRID_COLS + col;
                let (text, style) = self.cell_appearance(state, index);
                let cell = format!("[{}]", text);
                line.push_str(&format!(" {} ", self.theme_manager.apply_style(&cell, style)));
            }

            writeln!(io::stdout(), "{}", line)?;
        }
        writeln!(io::stdout())?;

        Ok(())
    }

    fn cell_appearance<'a>(&self, state: &'a GameState, index: usize) -> (&'a str, &'static str) {
        match state.deck().get(index) {
            Some(card) if !card.revealed => (HIDDEN_CELL, "card_hidden"),
            Some(card) if state.revealed().contains(&index) => (card.front.as_str(), "card_active"),
            Some(card) => (card.front.as_str(), "card_matched"),
            None => (HIDDEN_CELL, "card_hidden"),
        }
    }

    pub fn show_stats(&self, state: &GameState) -> io::Result<()> {
        let stats_text = format!(
            "Moves: {} | Pairs: {}/{} | Misses: {} | Time: {}",
            state.moves,
            state.matched_pairs,
            crate::core::PAIR_COUNT,
            state.mismatches,
            state.get_playtime_formatted()
        );

        let styled_stats = self.theme_manager.apply_style(&stats_text, "stats");
        writeln!(io::stdout(), "{}", styled_stats)?;
        writeln!(io::stdout())?;

        Ok(())
    }

    pub fn show_message(&self, message: &str, style: &str) -> io::Result<()> {
        let styled_message = self.theme_manager.apply_style(message, style);
        writeln!(io::stdout(), "{}", styled_message)?;
        Ok(())
    }

    pub fn show_error(&self, error: &str) -> io::Result<()> {
        self.show_message(&format!("❌ {}", error), "error")
    }

    pub fn show_success(&self, message: &str) -> io::Result<()> {
        self.show_message(&format!("✅ {}", message), "success")
    }

    pub fn show_warning(&self, message: &str) -> io::Result<()> {
        self.show_message(&format!("⚠️ {}", message), "warning")
    }

    pub fn show_info(&self, message: &str) -> io::Result<()> {
        self.show_message(&format!("ℹ️ {}", message), "info")
    }

    pub fn show_separator(&self) -> io::Result<()> {
        let separator = "━".repeat(SEPARATOR_WIDTH);
        let styled = self.theme_manager.apply_style(&separator, "separator");
        writeln!(io::stdout(), "{}", styled)?;
        Ok(())
    }

    pub fn prompt_input(&self, prompt: &str) -> io::Result<String> {
        let styled_prompt = self.theme_manager.apply_style(prompt, "info");
        print!("{}", styled_prompt);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }

    pub fn wait_for_enter(&self) -> io::Result<()> {
        let styled_prompt = self
            .theme_manager
            .apply_style("Press Enter to continue...", "info");
        print!("{}", styled_prompt);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(())
    }

    pub fn set_theme(&mut self, theme_name: &str) -> bool {
        self.theme_manager.set_theme(theme_name)
    }

    pub fn get_available_themes(&self) -> Vec<String> {
        self.theme_manager.list_themes()
    }
}

/// Grid label for a deck index, e.g. 0 -> "a1", 5 -> "b2".
pub fn position_label(index: usize) -> String {
    let row = (b'a' + (index / GRID_COLS) as u8) as char;
    let col = index % GRID_COLS + 1;
    format!("{}{}", row, col)
}

/// Parse a grid position like "b3" (case-insensitive) into a deck index.
pub fn parse_position(input: &str) -> Option<usize> {
    let trimmed = input.trim().to_lowercase();
    let mut chars = trimmed.chars();

    let row_char = chars.next()?;
    let col_char = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    let row = (row_char as usize).checked_sub('a' as usize)?;
    let col = col_char.to_digit(10)? as usize;
    if row >= GRID_ROWS || col == 0 || col > GRID_COLS {
        return None;
    }

    Some(row * GRID_COLS + (col - 1))
}
