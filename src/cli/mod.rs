pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "newsdeck")]
#[command(about = "A category-driven news reader", long_about = None)]
pub struct Cli {
    /// Path to the preferences database (defaults to the platform data dir)
    #[arg(long, global = true)]
    pub db: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and print headlines for a category
    News {
        /// general, sports, entertainment, business or technology
        #[arg(default_value = "general")]
        category: String,
    },
    /// List available categories and their queries
    Categories,
    /// Show or change preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(Subcommand)]
pub enum PrefsAction {
    /// Show the resolved preferences
    Show,
    /// Set the dark mode override (stops following the device theme)
    Dark {
        /// true or false
        dark: bool,
    },
    /// Follow or stop following the device theme
    FollowDevice {
        /// true or false
        follow: bool,
    },
    /// Set the font size
    FontSize { size: u32 },
    /// Set the language code (the app ships with en, es and fr)
    Language { code: String },
    /// Enable or disable notifications
    Notifications {
        /// true or false
        enabled: bool,
    },
}
