use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use newsdeck::app::AppContext;
use newsdeck::cli::{commands, Cli, Commands, PrefsAction};
use newsdeck::config::Config;
use newsdeck::domain::Category;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let ctx = AppContext::new(cli.db, config)?;

    match cli.command {
        Commands::News { category } => {
            let category: Category = category.parse()?;
            commands::show_news(&ctx, category).await?;
        }
        Commands::Categories => {
            commands::list_categories();
        }
        Commands::Prefs { action } => match action {
            PrefsAction::Show => commands::show_prefs(&ctx)?,
            PrefsAction::Dark { dark } => commands::set_dark(&ctx, dark)?,
            PrefsAction::FollowDevice { follow } => commands::set_follow_device(&ctx, follow)?,
            PrefsAction::FontSize { size } => commands::set_font_size(&ctx, size)?,
            PrefsAction::Language { code } => commands::set_language(&ctx, &code)?,
            PrefsAction::Notifications { enabled } => commands::set_notifications(&ctx, enabled)?,
        },
    }

    Ok(())
}
