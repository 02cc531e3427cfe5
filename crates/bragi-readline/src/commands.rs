//! Slash command parsing for the REPL.

use bragi_application::{SceneEditor, SceneField};

/// Every command the REPL understands, used for completion and hints.
pub const COMMANDS: &[&str] = &[
    "/list", "/new", "/open", "/scenes", "/add", "/delete", "/set", "/rename", "/save", "/help",
    "/quit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    New { name: String },
    Open { target: String },
    Scenes,
    Add,
    Delete { scene: String },
    Set { scene: String, field: SceneField, value: String },
    Rename { scene: String },
    Save,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line. Errors carry a usage hint for the user.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head {
            "/list" => Ok(Command::List),
            "/new" => {
                // Blank names are rejected by the use case, not here.
                Ok(Command::New {
                    name: rest.to_string(),
                })
            }
            "/open" => required(rest, "/open <number|id>").map(|target| Command::Open { target }),
            "/scenes" => Ok(Command::Scenes),
            "/add" => Ok(Command::Add),
            "/delete" => required(rest, "/delete <scene>").map(|scene| Command::Delete { scene }),
            "/set" => {
                let usage = "/set <scene> <name|type|image> [value]";
                let mut parts = rest.splitn(3, char::is_whitespace);
                let scene = parts.next().filter(|s| !s.is_empty()).ok_or(usage)?;
                let field = parts
                    .next()
                    .ok_or(usage)?
                    .parse::<SceneField>()
                    .map_err(|e| e.to_string())?;
                let value = parts.next().unwrap_or("").trim().to_string();
                Ok(Command::Set {
                    scene: scene.to_string(),
                    field,
                    value,
                })
            }
            "/rename" => required(rest, "/rename <scene>").map(|scene| Command::Rename { scene }),
            "/save" => Ok(Command::Save),
            "/help" => Ok(Command::Help),
            "/quit" | "/exit" => Ok(Command::Quit),
            other => Err(format!("Unknown command '{}'. Type /help.", other)),
        }
    }
}

fn required(rest: &str, usage: &str) -> Result<String, String> {
    if rest.is_empty() {
        Err(format!("Usage: {}", usage))
    } else {
        Ok(rest.to_string())
    }
}

/// Resolves a scene reference (1-based position or identifier) to a scene id.
pub fn resolve_scene(editor: &SceneEditor, reference: &str) -> Option<String> {
    let scenes = editor.scenes();
    if let Ok(position) = reference.parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|index| scenes.get(index))
            .map(|s| s.id.clone());
    }
    scenes
        .iter()
        .find(|s| s.id == reference)
        .map(|s| s.id.clone())
}
