use std::sync::Arc;

use crate::app::{AppContext, NewsdeckError, Result};
use crate::domain::Category;
use crate::feed::{FeedService, FeedStatus};
use crate::prefs::{PreferenceResolver, SystemTheme};

pub async fn show_news(ctx: &AppContext, category: Category) -> Result<()> {
    let service = FeedService::new(ctx.client.clone());

    if let Some(handle) = service.select_category(category).await {
        handle
            .await
            .map_err(|e| NewsdeckError::Fetch(e.to_string()))?;
    }

    let snapshot = service.snapshot().await;

    match snapshot.status {
        FeedStatus::Failed => {
            let reason = snapshot.last_error.unwrap_or_else(|| "unknown error".into());
            eprintln!("Could not load {}: {}", category, reason);
        }
        _ => {
            if snapshot.articles.is_empty() {
                println!("No articles for {}", category);
                return Ok(());
            }

            match snapshot.last_updated {
                Some(updated) => println!(
                    "{} ({} articles, fetched {})",
                    category,
                    snapshot.articles.len(),
                    updated.format("%H:%M:%S")
                ),
                None => println!("{} ({} articles)", category, snapshot.articles.len()),
            }
            for article in &snapshot.articles {
                println!();
                println!("  {}", article.title);
                let description = article.display_description();
                if !description.is_empty() {
                    println!("  {}", description);
                }
                println!("  {}", article.url);
            }
        }
    }

    Ok(())
}

pub fn list_categories() {
    for category in Category::ALL {
        println!("{:<15} {}", category.name(), category.query());
    }
}

pub fn show_prefs(ctx: &AppContext) -> Result<()> {
    let resolver = load_resolver(ctx);
    let prefs = resolver.snapshot();

    println!("Dark mode:        {}", prefs.dark_mode);
    println!("Follow device:    {}", prefs.use_device_theme);
    println!("Font size:        {}", prefs.font_size);
    println!("Language:         {}", prefs.language);
    println!("Notifications:    {}", prefs.notifications);
    Ok(())
}

pub fn set_dark(ctx: &AppContext, dark: bool) -> Result<()> {
    let mut resolver = load_resolver(ctx);
    resolver.set_dark_mode(dark);
    println!("Dark mode: {}", resolver.dark_mode());
    Ok(())
}

pub fn set_follow_device(ctx: &AppContext, follow: bool) -> Result<()> {
    let mut resolver = load_resolver(ctx);
    if let Err(NewsdeckError::SignalUnavailable) = resolver.set_use_device_theme(follow) {
        eprintln!("Device theme unavailable; keeping the manual setting");
    }
    println!(
        "Follow device: {}, dark mode: {}",
        resolver.use_device_theme(),
        resolver.dark_mode()
    );
    Ok(())
}

pub fn set_font_size(ctx: &AppContext, size: u32) -> Result<()> {
    let mut resolver = load_resolver(ctx);
    resolver.set_font_size(size)?;
    println!("Font size: {}", resolver.font_size());
    Ok(())
}

pub fn set_language(ctx: &AppContext, code: &str) -> Result<()> {
    let mut resolver = load_resolver(ctx);
    resolver.set_language(code);
    println!("Language: {}", resolver.language());
    Ok(())
}

pub fn set_notifications(ctx: &AppContext, enabled: bool) -> Result<()> {
    let mut resolver = load_resolver(ctx);
    resolver.set_notifications(enabled);
    println!("Notifications: {}", resolver.notifications());
    Ok(())
}

fn load_resolver(ctx: &AppContext) -> PreferenceResolver {
    let mut resolver = PreferenceResolver::new(
        ctx.store.clone(),
        Arc::new(SystemTheme),
        ctx.config.theme.clone(),
    );
    resolver.load();
    resolver
}
