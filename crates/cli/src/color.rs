// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Color detection and terminal styling.
//!
//! Detection order for `--color auto`:
//! 1. NO_COLOR env var → no color
//! 2. COLOR env var → use color
//! 3. default:
//!    - If not stdout.is_tty() → no color
//!    - If CI or an agent env var is set → no color
//!    - Else → use color

use std::io::IsTerminal;

use termcolor::ColorChoice;

use crate::cli::ColorMode;

/// Resolve the color choice for stdout.
///
/// Per [no-color.org](https://no-color.org/), `NO_COLOR` set to any value
/// (including empty string) disables color.
pub fn resolve_color(mode: ColorMode) -> ColorChoice {
    match mode {
        ColorMode::Always => return ColorChoice::Always,
        ColorMode::Never => return ColorChoice::Never,
        ColorMode::Auto => {}
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorChoice::Never;
    }
    if std::env::var_os("COLOR").is_some() {
        return ColorChoice::Always;
    }
    if !std::io::stdout().is_terminal() {
        return ColorChoice::Never;
    }
    if is_agent_environment() {
        return ColorChoice::Never;
    }
    ColorChoice::Auto
}

fn is_agent_environment() -> bool {
    std::env::var_os("CLAUDE_CODE").is_some()
        || std::env::var_os("CODEX").is_some()
        || std::env::var_os("CURSOR").is_some()
        || std::env::var_os("CI").is_some()
}

/// Color scheme for report output.
pub mod scheme {
    use termcolor::{Color, ColorSpec};

    use crate::impact::ImpactLevel;

    /// Level heading and item tag.
    pub fn level(level: ImpactLevel) -> ColorSpec {
        let mut spec = ColorSpec::new();
        match level {
            ImpactLevel::Critical | ImpactLevel::EnumRemoved => {
                spec.set_fg(Some(Color::Red)).set_bold(true);
            }
            ImpactLevel::Warning => {
                spec.set_fg(Some(Color::Yellow)).set_bold(true);
            }
            ImpactLevel::EnumAdded => {
                spec.set_fg(Some(Color::Magenta));
            }
            ImpactLevel::Opportunity | ImpactLevel::Safe => {
                spec.set_fg(Some(Color::Green));
            }
            ImpactLevel::Metadata | ImpactLevel::Noise => {
                spec.set_dimmed(true);
            }
        }
        spec
    }

    /// Bold section title.
    pub fn heading() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        spec
    }

    /// Cyan file path.
    pub fn path() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan));
        spec
    }

    /// Dimmed detail text (types, signatures).
    pub fn detail() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_dimmed(true);
        spec
    }

    /// Red "BREAKING" verdict.
    pub fn breaking() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Red)).set_bold(true);
        spec
    }

    /// Green "OK" verdict.
    pub fn ok() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Green)).set_bold(true);
        spec
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
