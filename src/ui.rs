/**
 * The command-line user interface for playing the game.
 *
 * Version: November 2025
 */
use std::io::Write;

use colored::*;

use super::common::Result;
use super::iohelper::{prettyprint, prettyprint_colored, prompt, terminal_width};
use super::players::Player;
use super::question::{Difficulty, Question};
use super::session::{GameSummary, TurnOutcome, MAX_STREAK};
use super::weighting::AgeWeights;


/// A command typed in response to a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Reveal,
    Correct,
    Wrong,
    Next,
    Previous,
    ToggleAlarm,
    AlarmTime,
    Help,
    Quit,
    Unknown,
}


pub struct CmdUI {
    number: usize,
}


impl CmdUI {
    pub fn new() -> Self {
        Self { number: 0 }
    }

    pub fn rules(&mut self, players: &[Player], alarm_minutes: Option<u32>) -> Result<()> {
        my_print!("\n")?;
        prettyprint_colored("HOW TO PLAY", "  ", Some(Color::BrightRed), None)?;
        prettyprint("A present with an alarm clock inside goes around the table.", "  - ")?;
        prettyprint("Answer questions while you hold it.", "  - ")?;
        prettyprint(&format!("Right? Keep going (at most {}).", MAX_STREAK), "  - ")?;
        prettyprint(&format!("Wrong, or {} right? Pass the present to your left.", MAX_STREAK), "  - ")?;
        if let Some(minutes) = alarm_minutes {
            let earliest = if minutes > 2 { minutes - 2 } else { 1 };
            let message = format!(
                "The alarm goes off between {} and {} minutes. Whoever holds the present then WINS!",
                earliest, minutes,
            );
            prettyprint(&message, "  - ")?;
        }
        if players.len() > 0 {
            let names: Vec<String> = players.iter()
                .map(|p| format!("{} ({})", p.name, p.age))
                .collect();
            prettyprint(&names.join(", "), "  Players: ")?;
        }
        my_print!("\n")?;
        self.help()
    }

    pub fn help(&mut self) -> Result<()> {
        prettyprint(
            "[enter] show answer  [g] right  [f] wrong  [n] next  [b] back  \
             [p] pause/resume alarm  [t] time left  [q] quit",
            "  ",
        )
    }

    pub fn question(
        &mut self,
        question: &Question,
        player: Option<&Player>,
        streak: u32,
    ) -> Result<()> {
        self.number += 1;
        my_print!("\n")?;
        my_println!("{}", "-".repeat(terminal_width().min(60)).dimmed())?;
        if let Some(player) = player {
            my_println!(
                "  Turn: {}  Score: {}  Streak: {}/{}",
                player.name.bold(), player.score, streak, MAX_STREAK,
            )?;
        }

        let label = format!("[{}]", question.kind.to_uppercase());
        my_println!("  {} {}", color_label(&label, question.difficulty), difficulty_name(question.difficulty).dimmed())?;
        let prefix = format!("  ({}) ", self.number);
        prettyprint_colored(&question.text, &prefix, None, Some(Color::Cyan))
    }

    pub fn answer(&mut self, question: &Question) -> Result<()> {
        prettyprint_colored(&question.answer, "  Answer: ", Some(Color::Green), None)?;
        if let Some(seconds) = question.time_limit {
            my_println!("  {} {} seconds", "Time limit:".yellow(), seconds)?;
        }
        Ok(())
    }

    pub fn prompt(&mut self) -> Result<Action> {
        let response = match prompt("> ")? {
            Some(response) => response,
            None => {
                return Ok(Action::Quit);
            }
        };
        Ok(parse_action(&response))
    }

    pub fn outcome(&mut self, outcome: TurnOutcome, next: Option<&Player>) -> Result<()> {
        match outcome {
            TurnOutcome::NextQuestion => {
                return prettyprint_colored("Right!", "  ", Some(Color::Green), None);
            },
            TurnOutcome::ThreeInARow => {
                let message = format!("{} right in a row!", MAX_STREAK);
                prettyprint_colored(&message, "  ", Some(Color::Green), None)?;
            },
            TurnOutcome::Wrong => {
                prettyprint_colored("Wrong.", "  ", Some(Color::Red), None)?;
            },
        }
        match next {
            Some(player) => prettyprint(&format!("Pass the present to {}.", player.name.bold()), "  "),
            None => prettyprint("Pass the present to your left.", "  "),
        }
    }

    pub fn status(&mut self, message: &str) -> Result<()> {
        prettyprint(message, "  ")
    }

    pub fn time_left(&mut self, seconds: Option<u64>, paused: bool) -> Result<()> {
        match seconds {
            Some(seconds) => {
                let clock = format!("{}:{:02}", seconds / 60, seconds % 60);
                if paused {
                    my_println!("  Alarm: {} (paused)", clock.yellow())
                } else {
                    my_println!("  Alarm: {}", clock.yellow())
                }
            },
            None => my_println!("  There is no alarm in this game."),
        }
    }

    pub fn alarm(&mut self) -> Result<()> {
        my_print!("\n")?;
        prettyprint_colored("RRRRRRING! The alarm went off!", "  ", Some(Color::BrightRed), None)
    }

    pub fn summary(&mut self, summary: &GameSummary) -> Result<()> {
        my_print!("\n")?;
        if let Some(winner) = &summary.winner {
            my_println!("  {} {}", "Winner:".bold(), winner.name.bright_green())?;
        }

        if summary.smartest.len() > 0 && summary.smartest[0].score > 0 {
            let names: Vec<&str> = summary.smartest.iter().map(|p| p.name.as_str()).collect();
            my_println!(
                "  {} {} ({} {})",
                "Smartest:".bold(),
                names.join(" & ").cyan(),
                summary.smartest[0].score,
                if summary.smartest[0].score == 1 { "point" } else { "points" },
            )?;
        }

        my_println!(
            "  Game over at {}, {} questions shown this round.",
            summary.time_finished.format("%H:%M"),
            summary.questions_shown,
        )
    }

    pub fn weights(&mut self, age: u32, weights: &AgeWeights) -> Result<()> {
        my_println!("Age {}:", age)?;
        my_println!("  easy    {:>3.0}%", weights.easy * 100.0)?;
        my_println!("  medium  {:>3.0}%", weights.medium * 100.0)?;
        my_println!("  hard    {:>3.0}%", weights.hard * 100.0)
    }

    pub fn shown(&mut self, shown: usize, total: usize) -> Result<()> {
        my_println!("{} of {} questions shown", shown, total)
    }
}


pub fn parse_action(response: &str) -> Action {
    match response.to_lowercase().as_str() {
        "" | "a" | "answer" => Action::Reveal,
        "g" | "goed" | "y" | "right" => Action::Correct,
        "f" | "fout" | "w" | "wrong" => Action::Wrong,
        "n" | "next" | ">" => Action::Next,
        "b" | "back" | "<" => Action::Previous,
        "p" | "pause" => Action::ToggleAlarm,
        "t" | "time" => Action::AlarmTime,
        "h" | "?" | "help" => Action::Help,
        "q" | "quit" => Action::Quit,
        _ => Action::Unknown,
    }
}


fn difficulty_name(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "easy",
        Difficulty::Medium => "medium",
        Difficulty::Hard => "hard",
    }
}


fn color_label(label: &str, difficulty: Difficulty) -> ColoredString {
    match difficulty {
        Difficulty::Easy => label.on_green().white(),
        Difficulty::Medium => label.on_yellow().black(),
        Difficulty::Hard => label.on_red().white(),
    }
}
