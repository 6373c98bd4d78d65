//! Command table and command handlers.
//!
//! The table is built once by [`CommandTable::standard`] and handed to the
//! REPL by reference; nothing in here is global.

use std::collections::BTreeMap;
use std::io::Write;
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use tracing::debug;

use pokedex_core::constants::{CATCH_ROLL_FACES, CATCH_ROLL_STEP};
use pokedex_core::error::{PokedexError, Result};
use pokedex_core::traits::Catalog;
use pokedex_core::types::Pokemon;

/// What the REPL should do after a command ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CommandKind {
    Help,
    Exit,
    Map,
    MapBack,
    Explore,
    Catch,
    Inspect,
    Pokedex,
}

/// A command the user can type at the prompt.
#[derive(Clone, Debug)]
pub struct Command {
    pub name: &'static str,
    pub description: &'static str,
    kind: CommandKind,
}

/// Immutable mapping from command name to command.
#[derive(Clone, Debug)]
pub struct CommandTable {
    commands: BTreeMap<&'static str, Command>,
}

impl CommandTable {
    /// Builds the table of every built-in command.
    pub fn standard() -> Self {
        let commands = [
            Command {
                name: "help",
                description: "Display a help message.",
                kind: CommandKind::Help,
            },
            Command {
                name: "exit",
                description: "Exit the Pokedex.",
                kind: CommandKind::Exit,
            },
            Command {
                name: "map",
                description: "Explore the map. Displays the next page of area names.",
                kind: CommandKind::Map,
            },
            Command {
                name: "mapb",
                description: "Explore back the way you came. Displays the previous page of area names.",
                kind: CommandKind::MapBack,
            },
            Command {
                name: "explore",
                description: "Explore an area for Pokemon, e.g. \"explore <area name>\". Find area names with \"map\" first.",
                kind: CommandKind::Explore,
            },
            Command {
                name: "catch",
                description: "Try to catch a Pokemon, e.g. \"catch <pokemon name>\". Use \"explore\" to find names.",
                kind: CommandKind::Catch,
            },
            Command {
                name: "inspect",
                description: "See details about a caught Pokemon, e.g. \"inspect <pokemon name>\".",
                kind: CommandKind::Inspect,
            },
            Command {
                name: "pokedex",
                description: "List every Pokemon you have caught.",
                kind: CommandKind::Pokedex,
            },
        ];

        Self {
            commands: commands.into_iter().map(|c| (c.name, c)).collect(),
        }
    }

    /// Looks up a command by name.
    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Iterates commands sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }
}

/// Per-session state: pagination cursors and the caught Pokemon.
pub struct Session<'a, R: Rng> {
    catalog: &'a dyn Catalog,
    next: Option<String>,
    previous: Option<String>,
    pokedex: BTreeMap<String, Pokemon>,
    rng: R,
    show_progress: bool,
}

impl<'a, R: Rng> Session<'a, R> {
    /// Starts a session on the first page of the catalog.
    pub fn new(catalog: &'a dyn Catalog, rng: R) -> Self {
        Self {
            next: Some(catalog.first_page_url()),
            previous: None,
            catalog,
            pokedex: BTreeMap::new(),
            rng,
            show_progress: false,
        }
    }

    /// Shows a spinner on stderr while fetching.
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Returns the caught Pokemon by name.
    pub fn pokedex(&self) -> &BTreeMap<String, Pokemon> {
        &self.pokedex
    }

    /// Runs `command` with the words typed after it.
    pub async fn run(
        &mut self,
        table: &CommandTable,
        command: &Command,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<Flow> {
        match command.kind {
            CommandKind::Help => self.help(table, out),
            CommandKind::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Flow::Exit);
            }
            CommandKind::Map => self.map(out).await,
            CommandKind::MapBack => self.map_back(out).await,
            CommandKind::Explore => self.explore(first_arg(command, args)?, out).await,
            CommandKind::Catch => self.catch(first_arg(command, args)?, out).await,
            CommandKind::Inspect => self.inspect(first_arg(command, args)?, out),
            CommandKind::Pokedex => self.list_pokedex(out),
        }?;
        Ok(Flow::Continue)
    }

    fn help(&self, table: &CommandTable, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{}", "Welcome to the Pokedex!".cyan().bold())?;
        writeln!(out, "Usage:")?;
        writeln!(out)?;
        for command in table.iter() {
            writeln!(out, "{}: {}", command.name, command.description)?;
        }
        Ok(())
    }

    async fn map(&mut self, out: &mut dyn Write) -> Result<()> {
        let Some(url) = self.next.clone() else {
            writeln!(out, "you're on the last page")?;
            return Ok(());
        };
        self.show_page(&url, out).await
    }

    async fn map_back(&mut self, out: &mut dyn Write) -> Result<()> {
        let Some(url) = self.previous.clone() else {
            writeln!(out, "you're on the first page")?;
            return Ok(());
        };
        self.show_page(&url, out).await
    }

    async fn show_page(&mut self, url: &str, out: &mut dyn Write) -> Result<()> {
        let spinner = self.spinner("Loading areas...");
        let page = self.catalog.location_areas(url).await;
        spinner.finish_and_clear();
        let page = page?;

        self.next = page.next.clone();
        self.previous = page.previous.clone();

        for name in page.area_names() {
            writeln!(out, "{}", name)?;
        }
        Ok(())
    }

    async fn explore(&mut self, area: &str, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Exploring {}...", area)?;

        let spinner = self.spinner("Searching the area...");
        let names = self.catalog.explore_area(area).await;
        spinner.finish_and_clear();
        let names = names?;

        if names.is_empty() {
            writeln!(out, "No Pokemon found here.")?;
            return Ok(());
        }
        writeln!(out, "Found Pokemon:")?;
        for name in names {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }

    async fn catch(&mut self, name: &str, out: &mut dyn Write) -> Result<()> {
        if self.pokedex.contains_key(name) {
            return Err(PokedexError::AlreadyCaught(name.to_string()));
        }

        writeln!(out, "Throwing a Pokeball at {}...", name)?;

        let spinner = self.spinner("The ball is wobbling...");
        let pokemon = self.catalog.pokemon(name).await;
        spinner.finish_and_clear();
        let pokemon = pokemon?;

        let difficulty = pokemon.catch_difficulty();
        let roll = throw_roll(&mut self.rng);
        debug!(name, difficulty, roll, "Catch attempt");

        if is_caught(roll, difficulty) {
            writeln!(out, "{}", format!("{} was caught!", name).green())?;
            writeln!(out, "You may now inspect it with the inspect command.")?;
            self.pokedex.insert(name.to_string(), pokemon);
        } else {
            writeln!(out, "{}", format!("{} escaped!", name).yellow())?;
        }
        Ok(())
    }

    fn inspect(&self, name: &str, out: &mut dyn Write) -> Result<()> {
        let Some(p) = self.pokedex.get(name) else {
            writeln!(
                out,
                "{} is not in your Pokedex. You must catch a Pokemon before you can inspect it.",
                name
            )?;
            return Ok(());
        };

        writeln!(out, "Name: {}", p.name)?;
        writeln!(out, "Height: {}", p.height)?;
        writeln!(out, "Weight: {}", p.weight)?;
        writeln!(out, "Stats:")?;
        for s in &p.stats {
            writeln!(out, "  -{}: {}", s.stat.name, s.base_stat)?;
        }
        writeln!(out, "Types:")?;
        for t in &p.types {
            writeln!(out, "  - {}", t.kind.name)?;
        }
        Ok(())
    }

    fn list_pokedex(&self, out: &mut dyn Write) -> Result<()> {
        let pokedex = self.pokedex();
        if pokedex.is_empty() {
            writeln!(out, "Your Pokedex is empty. Try \"catch <pokemon name>\".")?;
            return Ok(());
        }
        writeln!(out, "Your Pokedex:")?;
        for name in pokedex.keys() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }

    fn spinner(&self, message: &'static str) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }
}

fn first_arg<'s>(command: &Command, args: &'s [String]) -> Result<&'s str> {
    args.first().map(String::as_str).ok_or_else(|| {
        PokedexError::UsageError(format!(
            "you must provide a name after the \"{0}\" command, e.g. \"{0} <name>\"",
            command.name
        ))
    })
}

/// Rolls the throw die: a multiple of [`CATCH_ROLL_STEP`] in
/// `CATCH_ROLL_STEP..=CATCH_ROLL_STEP * CATCH_ROLL_FACES`.
pub fn throw_roll<R: Rng>(rng: &mut R) -> u32 {
    CATCH_ROLL_STEP * rng.gen_range(1..=CATCH_ROLL_FACES)
}

/// A throw catches when the roll beats the capped base experience.
pub fn is_caught(roll: u32, difficulty: u32) -> bool {
    roll > difficulty
}
