//! Unified output formatting utilities for consistent CLI presentation.
//!
//! This module provides standardized formatting functions for all vcs-overlay output,
//! ensuring consistent colors, spacing, and message structure across commands.
//!
//! # Design Principles
//! - **Consistent color scheme**: Red for errors, blue for dialog titles, bright_black for details
//! - **Standardized spacing**: Newline before and after all command outputs

use crate::core::colors::get_colored_glyph;
use crate::core::icon_resolver::IconPlacement;
use colored::*;

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    println!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Formats and prints a success message with consistent styling
///
/// # Format
/// ```text
///
/// ✓ <message>
/// ```
pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

/// Formats and prints an informational message with consistent styling
pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

/// Formats and prints a section header with consistent styling
///
/// # Format
/// ```text
///
/// <header>:
///
/// ```
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}

/// Prints a modal message the way a dialog box would show it
///
/// # Format
/// ```text
///
/// ┌ <title>
/// │ <line 1>
/// │ <line 2>
/// └
/// ```
pub fn print_dialog(title: &str, message: &str) {
    println!("\n{} {}", "┌".bright_black(), title.blue().bold());
    for line in message.lines() {
        println!("{} {}", "│".bright_black(), line.white());
    }
    println!("{}", "└".bright_black());
}

/// One drawn icon as a single line
///
/// # Format
/// ```text
///   <glyph> <icon>  x,y w×h  [click for lock details]
/// ```
pub fn format_placement(placement: &IconPlacement) -> String {
    let rect = placement.rect;
    let mut line = format!(
        "  {} {:<24} {}",
        get_colored_glyph(placement.icon),
        format!("{:?}", placement.icon),
        format!("{},{} {}×{}", rect.x, rect.y, rect.width, rect.height).bright_black()
    );
    if placement.interactive {
        line.push_str(&format!("  {}", "[click for lock details]".bright_black()));
    }
    if let Some(tooltip) = placement.tooltip {
        for tip in tooltip.lines() {
            line.push_str(&format!("\n      {}", tip.bright_black()));
        }
    }
    line
}
