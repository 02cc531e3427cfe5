use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use bragi_application::{EditorStatus, ScenarioUseCase, SceneEditor};
use bragi_core::scenario::Scenario;
use bragi_infrastructure::HttpScenarioClient;
use bragi_infrastructure::http_scenario_client::DEFAULT_SERVER_URL;

mod commands;

use commands::{COMMANDS, Command, resolve_scene};

#[derive(Parser, Debug)]
#[command(name = "bragi")]
#[command(about = "Interactive scenario and scene editor")]
struct Cli {
    /// Base URL of a running bragi-server
    #[arg(long, default_value = DEFAULT_SERVER_URL)]
    server: String,
}

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper;

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            let candidates = COMMANDS
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.to_string(),
                    replacement: cmd.to_string(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            COMMANDS
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

type LineEditor = Editor<CliHelper, DefaultHistory>;

/// REPL session: the scenario catalog plus the editor currently open, if any.
struct Session {
    usecase: ScenarioUseCase,
    listed: Vec<Scenario>,
    editor: Option<SceneEditor>,
}

impl Session {
    fn editor_mut(&mut self) -> Option<&mut SceneEditor> {
        if self.editor.is_none() {
            println!("{}", "No scenario open. Use /new or /open first.".yellow());
        }
        self.editor.as_mut()
    }

    async fn list(&mut self) {
        match self.usecase.list_scenarios().await {
            Ok(scenarios) => {
                if scenarios.is_empty() {
                    println!("{}", "No scenarios found.".dimmed());
                }
                for (i, scenario) in scenarios.iter().enumerate() {
                    println!(
                        "  {} {} {}",
                        format!("{}.", i + 1).bright_black(),
                        scenario.name.bold(),
                        format!("({})", scenario.id).dimmed()
                    );
                }
                self.listed = scenarios;
            }
            Err(e) => println!("{}", format!("Failed to load scenarios: {}", e).red()),
        }
    }

    async fn create(&mut self, name: &str) {
        match self.usecase.create_scenario(name).await {
            Ok(editor) => {
                println!(
                    "{}",
                    format!("Scenario created successfully! ({})", editor.scenario().id).green()
                );
                self.editor = Some(editor);
            }
            Err(e) => println!("{}", e.to_string().red()),
        }
    }

    async fn open(&mut self, target: &str) {
        let id = target
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.listed.get(i))
            .map(|s| s.id.clone())
            .unwrap_or_else(|| target.to_string());

        match self.usecase.open_scenario(&id).await {
            Ok(editor) => {
                println!("{}", format!("Editing '{}'", editor.scenario().name).green());
                self.editor = Some(editor);
                self.print_scenes();
            }
            Err(e) => println!("{}", e.to_string().red()),
        }
    }

    fn print_scenes(&self) {
        let Some(editor) = &self.editor else {
            println!("{}", "No scenario open.".yellow());
            return;
        };
        let scenario = editor.scenario();
        let marker = if editor.is_dirty() { " *" } else { "" };
        println!("{}{}", scenario.name.bold(), marker.yellow());
        if scenario.scenes.is_empty() {
            println!("  {}", "(no scenes)".dimmed());
        }
        for (i, scene) in scenario.scenes.iter().enumerate() {
            println!(
                "  {} {} [{}] {}",
                format!("{}.", i + 1).bright_black(),
                scene.name,
                scene.kind.to_string().cyan(),
                scene.image.as_deref().unwrap_or("no image").dimmed()
            );
        }
    }

    async fn save(&mut self) {
        let Some(editor) = self.editor.as_mut() else {
            println!("{}", "No scenario open.".yellow());
            return;
        };
        // Status is recorded on the editor either way.
        let _ = self.usecase.commit(editor).await;
        match editor.status() {
            Some(EditorStatus::Saved(message)) => println!("{}", message.green()),
            Some(EditorStatus::Failed(message)) => {
                println!("{}", format!("Save failed: {}", message).red())
            }
            None => {}
        }
    }
}

/// Runs the interactive rename: the current name is pre-filled, Enter
/// confirms, Ctrl-C / Ctrl-D abandons the edit.
fn rename(line_editor: &mut LineEditor, editor: &mut SceneEditor, scene_id: &str) {
    let current = match editor.begin_rename(scene_id) {
        Ok(pending) => pending.buffer.clone(),
        Err(e) => {
            println!("{}", e.to_string().red());
            return;
        }
    };

    match line_editor.readline_with_initial("rename> ", (current.as_str(), "")) {
        Ok(text) => {
            if let Err(e) = editor.edit_rename(text) {
                println!("{}", e.to_string().red());
            }
            editor.finish_rename();
        }
        Err(_) => {
            editor.cancel_rename();
            println!("{}", "Rename cancelled.".dimmed());
        }
    }
}

fn print_help() {
    let rows = [
        ("/list", "List saved scenarios"),
        ("/new <name>", "Create a scenario and open it"),
        ("/open <number|id>", "Open a listed scenario"),
        ("/scenes", "Show scenes of the open scenario"),
        ("/add", "Add a panoramic scene"),
        ("/delete <scene>", "Delete a scene (number or id)"),
        ("/set <scene> <name|type|image> [value]", "Change a scene field"),
        ("/rename <scene>", "Rename a scene interactively"),
        ("/save", "Save the open scenario to the server"),
        ("/quit", "Exit"),
    ];
    for (cmd, desc) in rows {
        println!("  {:<42} {}", cmd.bright_cyan(), desc);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let client = HttpScenarioClient::new(cli.server);
    println!(
        "{}",
        format!("Bragi editor connected to {}", client.base_url()).bright_yellow()
    );
    println!("{}", "Type /help for commands.".dimmed());

    let mut session = Session {
        usecase: ScenarioUseCase::new(Arc::new(client)),
        listed: Vec::new(),
        editor: None,
    };
    session.list().await;

    let mut line_editor: LineEditor = Editor::new()?;
    line_editor.set_helper(Some(CliHelper));

    loop {
        let line = match line_editor.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        if line.trim().is_empty() {
            continue;
        }
        let _ = line_editor.add_history_entry(line.as_str());

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message.yellow());
                continue;
            }
        };

        match command {
            Command::List => session.list().await,
            Command::New { name } => session.create(&name).await,
            Command::Open { target } => session.open(&target).await,
            Command::Scenes => session.print_scenes(),
            Command::Add => {
                if let Some(editor) = session.editor_mut() {
                    editor.add_scene();
                    session.print_scenes();
                }
            }
            Command::Delete { scene } => {
                if let Some(editor) = session.editor_mut() {
                    let result = match resolve_scene(editor, &scene) {
                        Some(id) => editor.delete_scene(&id).map(|_| ()),
                        None => Err(bragi_core::BragiError::not_found("Scene", scene)),
                    };
                    match result {
                        Ok(()) => session.print_scenes(),
                        Err(e) => println!("{}", e.to_string().red()),
                    }
                }
            }
            Command::Set {
                scene,
                field,
                value,
            } => {
                if let Some(editor) = session.editor_mut() {
                    let result = match resolve_scene(editor, &scene) {
                        Some(id) => editor.update_scene_field(&id, field, &value),
                        None => Err(bragi_core::BragiError::not_found("Scene", scene)),
                    };
                    match result {
                        Ok(()) => session.print_scenes(),
                        Err(e) => println!("{}", e.to_string().red()),
                    }
                }
            }
            Command::Rename { scene } => {
                if let Some(editor) = session.editor_mut() {
                    match resolve_scene(editor, &scene) {
                        Some(id) => rename(&mut line_editor, editor, &id),
                        None => println!("{}", format!("No scene '{}'", scene).red()),
                    }
                    session.print_scenes();
                }
            }
            Command::Save => session.save().await,
            Command::Help => print_help(),
            Command::Quit => break,
        }
    }

    if session.editor.as_ref().is_some_and(SceneEditor::is_dirty) {
        println!("{}", "Unsaved changes were discarded.".yellow());
    }

    Ok(())
}
