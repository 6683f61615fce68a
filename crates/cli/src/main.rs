use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use pincode_tui::PinCodeProps;
use pincode_types::{KeyboardType, PinSettings};
use pincode_util::SettingsStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Segmented pin code entry for the terminal.
///
/// Settings are read from the settings file (see `--settings` and
/// `PINCODE_SETTINGS_PATH`); flags override them for this run.
#[derive(Debug, Parser)]
#[command(name = "pincode", version)]
struct Cli {
    /// Settings file to read instead of the default location
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,
    /// Write the effective settings back to the settings file
    #[arg(long)]
    save: bool,
    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Number of cells
    #[arg(long)]
    code_length: Option<usize>,
    /// Cell width in columns
    #[arg(long)]
    cell_size: Option<u16>,
    /// Gap between cells in columns
    #[arg(long)]
    cell_spacing: Option<u16>,
    /// Text shown in empty cells
    #[arg(long)]
    placeholder: Option<String>,
    /// Mask filled cells
    #[arg(long)]
    password: bool,
    /// Glyph shown over filled cells in password mode
    #[arg(long)]
    mask: Option<String>,
    /// Milliseconds the last typed character stays visible in password mode
    #[arg(long, value_name = "MS")]
    mask_delay: Option<u64>,
    /// Keyboard hint forwarded to the input
    #[arg(long, value_parser = parse_keyboard_type)]
    keyboard_type: Option<KeyboardType>,
    /// Drop every non-digit character
    #[arg(long)]
    restrict_to_numbers: bool,
    /// Focus the input on start
    #[arg(long)]
    auto_focus: bool,
    /// Show the code without accepting edits
    #[arg(long)]
    read_only: bool,
    /// Caption above the cells
    #[arg(long)]
    label: Option<String>,
    /// Lay cells out right to left
    #[arg(long)]
    rtl: bool,
}

impl Cli {
    /// Layer command-line overrides on top of persisted settings.
    fn apply(&self, settings: &mut PinSettings) {
        if let Some(code_length) = self.code_length {
            settings.code_length = code_length;
        }
        if let Some(cell_size) = self.cell_size {
            settings.cell_size = cell_size;
        }
        if let Some(cell_spacing) = self.cell_spacing {
            settings.cell_spacing = cell_spacing;
        }
        if let Some(placeholder) = &self.placeholder {
            settings.placeholder = placeholder.clone();
        }
        if let Some(mask) = &self.mask {
            settings.mask = mask.clone();
        }
        if let Some(mask_delay) = self.mask_delay {
            settings.mask_delay_ms = mask_delay;
        }
        if let Some(keyboard_type) = self.keyboard_type {
            settings.keyboard_type = keyboard_type;
        }
        if let Some(label) = &self.label {
            settings.label = Some(label.clone());
        }
        settings.password |= self.password;
        settings.restrict_to_numbers |= self.restrict_to_numbers;
        settings.auto_focus |= self.auto_focus;
        settings.right_to_left |= self.rtl;
        if self.read_only {
            settings.editable = false;
        }
    }
}

fn parse_keyboard_type(raw: &str) -> Result<KeyboardType, String> {
    const ALL: [KeyboardType; 7] = [
        KeyboardType::Default,
        KeyboardType::Numeric,
        KeyboardType::NumberPad,
        KeyboardType::DecimalPad,
        KeyboardType::Phone,
        KeyboardType::Email,
        KeyboardType::Ascii,
    ];
    ALL.into_iter().find(|kind| kind.label() == raw).ok_or_else(|| {
        let known: Vec<&str> = ALL.iter().map(KeyboardType::label).collect();
        format!("unknown keyboard type '{raw}' (expected one of: {})", known.join(", "))
    })
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log_file {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("create log file {}", path.display()))?;
            let _ = builder.with_ansi(false).with_writer(Mutex::new(file)).try_init();
        }
        None => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let store = match &cli.settings {
        Some(path) => SettingsStore::at(path),
        None => SettingsStore::from_env(),
    };
    let mut settings = store
        .load()
        .with_context(|| format!("load settings from {}", store.path().display()))?;
    cli.apply(&mut settings);

    if cli.save {
        store
            .save(&settings)
            .with_context(|| format!("save settings to {}", store.path().display()))?;
        info!(path = %store.path().display(), "saved pin settings");
    }

    match pincode_tui::run(PinCodeProps::from_settings(&settings)).await? {
        Some(code) => println!("{code}"),
        None => eprintln!("no code entered"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_settings() {
        let cli = Cli::try_parse_from([
            "pincode",
            "--code-length",
            "6",
            "--password",
            "--mask-delay",
            "0",
            "--keyboard-type",
            "number-pad",
            "--read-only",
        ])
        .expect("parse flags");
        let mut settings = PinSettings::default();
        cli.apply(&mut settings);

        assert_eq!(settings.code_length, 6);
        assert!(settings.password);
        assert_eq!(settings.mask_delay_ms, 0);
        assert_eq!(settings.keyboard_type, KeyboardType::NumberPad);
        assert!(!settings.editable);
        assert_eq!(settings.mask, "*");
    }

    #[test]
    fn absent_flags_keep_persisted_values() {
        let cli = Cli::try_parse_from(["pincode"]).expect("parse flags");
        let mut settings = PinSettings {
            password: true,
            label: Some("PIN".to_string()),
            ..PinSettings::default()
        };
        cli.apply(&mut settings);
        assert!(settings.password);
        assert_eq!(settings.label.as_deref(), Some("PIN"));
    }

    #[test]
    fn unknown_keyboard_type_is_rejected() {
        let error = parse_keyboard_type("qwerty").expect_err("should reject");
        assert!(error.contains("number-pad"));
    }
}
