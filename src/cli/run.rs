use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};

use super::args::{Arguments, Command, CommonArgs, ScanCommand, TransformCommand};
use crate::config::{CONFIG_FILE_NAME, Config, default_config_json, load_config};
use crate::core::{MemorySink, Outcome, PageIndex, SourceUnit, collect_page_configs, transform};

/// What a command produced, ready to be reported.
pub enum CommandResult {
    Transform {
        outcome: Outcome,
        warnings: Vec<String>,
    },
    Scan {
        index: PageIndex,
        json: bool,
        warnings: Vec<String>,
    },
    Init {
        path: PathBuf,
    },
}

impl CommandResult {
    pub fn warnings(&self) -> &[String] {
        match self {
            Self::Transform { warnings, .. } | Self::Scan { warnings, .. } => warnings,
            Self::Init { .. } => &[],
        }
    }
}

/// Dispatch to the command handler.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Transform(cmd)) => run_transform(cmd),
        Some(Command::Scan(cmd)) => run_scan(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}

/// Load the config file and apply CLI overrides (CLI > file > defaults).
fn resolve_config(root: &Path, common: &CommonArgs) -> Result<Config> {
    let mut config = load_config(root)?.config;
    if let Some(macro_name) = &common.macro_name {
        config.macro_name = macro_name.clone();
    }
    if let Some(routes_folder) = &common.routes_folder {
        config.routes_folder = routes_folder.to_string_lossy().to_string();
    }
    config.validate()?;
    Ok(config)
}

fn run_transform(cmd: TransformCommand) -> Result<CommandResult> {
    let root = env::current_dir()?;
    let config = resolve_config(&root, &cmd.common)?;
    let options = config.macro_options();

    let code = fs::read_to_string(&cmd.file)
        .with_context(|| format!("Failed to read file: {}", cmd.file.display()))?;
    let id = match cmd.id {
        Some(id) => id,
        None if cmd.extract => format!("{}?{}", cmd.file.display(), options.macro_name()),
        None => cmd.file.display().to_string(),
    };

    let sink = MemorySink::new();
    let outcome = transform(SourceUnit::new(&id, &code), &options, &sink);

    Ok(CommandResult::Transform {
        outcome,
        warnings: sink.messages(),
    })
}

fn run_scan(cmd: ScanCommand) -> Result<CommandResult> {
    let root = env::current_dir()?;
    let config = resolve_config(&root, &cmd.common)?;
    let routes_folder = root.join(&config.routes_folder);
    if !routes_folder.is_dir() {
        bail!("Routes folder does not exist: {}", routes_folder.display());
    }

    let sink = MemorySink::new();
    let index = collect_page_configs(&routes_folder, &config, &sink);

    // Pages are processed in parallel; keep the output stable.
    let mut warnings = sink.messages();
    warnings.sort();

    Ok(CommandResult::Scan {
        index,
        json: cmd.json,
        warnings,
    })
}

fn init() -> Result<CommandResult> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_config_json()? + "\n")?;
    Ok(CommandResult::Init {
        path: config_path.to_path_buf(),
    })
}
