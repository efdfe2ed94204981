use std::sync::Arc;

use crate::app::{NewsdeckError, Result};
use crate::config::ThemeConfig;
use crate::prefs::signal::DeviceTheme;
use crate::store::Store;

pub const DEFAULT_FONT_SIZE: u32 = 16;
pub const DEFAULT_LANGUAGE: &str = "en";

const KEY_DARK_MODE: &str = "darkMode";
const KEY_USE_DEVICE_THEME: &str = "useDeviceTheme";
const KEY_FONT_SIZE: &str = "fontSize";
const KEY_LANGUAGE: &str = "language";
const KEY_NOTIFICATIONS: &str = "notifications";

/// Snapshot of the effective preferences handed to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPrefs {
    pub dark_mode: bool,
    pub use_device_theme: bool,
    pub font_size: u32,
    pub language: String,
    pub notifications: bool,
}

type Subscriber = Box<dyn Fn(&ResolvedPrefs) + Send>;

/// The preference engine.
///
/// Holds the user's theme override, the follow-device flag, and the plain
/// preferences; derives the effective dark-mode value; persists every
/// mutation and fans changes out synchronously to all subscribers.
///
/// `dark_mode` is always the *resolved* value: while `use_device_theme` is
/// true it tracks the device report, and the moment following is switched
/// off the current value becomes the user's override baseline.
pub struct PreferenceResolver {
    store: Arc<dyn Store>,
    device: Arc<dyn DeviceTheme>,
    limits: ThemeConfig,
    dark_mode: bool,
    use_device_theme: bool,
    font_size: u32,
    language: String,
    notifications: bool,
    subscribers: Vec<Subscriber>,
}

impl PreferenceResolver {
    pub fn new(store: Arc<dyn Store>, device: Arc<dyn DeviceTheme>, limits: ThemeConfig) -> Self {
        Self {
            store,
            device,
            limits,
            dark_mode: false,
            use_device_theme: true,
            font_size: DEFAULT_FONT_SIZE,
            language: DEFAULT_LANGUAGE.into(),
            notifications: true,
            subscribers: Vec::new(),
        }
    }

    /// Restore persisted preferences.
    ///
    /// Each key falls back to its default independently: one missing or
    /// malformed value never discards the rest. If following the device is
    /// restored but the device cannot report a theme, following is switched
    /// off and the user override stands.
    pub fn load(&mut self) {
        self.dark_mode = self.load_bool(KEY_DARK_MODE, false);
        self.use_device_theme = self.load_bool(KEY_USE_DEVICE_THEME, true);
        self.font_size = self.load_font_size();
        self.language = self.load_string(KEY_LANGUAGE, DEFAULT_LANGUAGE);
        self.notifications = self.load_bool(KEY_NOTIFICATIONS, true);

        if self.use_device_theme {
            match self.device.current() {
                Some(dark) => self.dark_mode = dark,
                None => {
                    tracing::warn!("device theme unavailable, keeping user override");
                    self.use_device_theme = false;
                }
            }
        }

        self.notify();
    }

    /// Set the user's explicit dark-mode override. Always succeeds and stops
    /// following the device theme.
    pub fn set_dark_mode(&mut self, dark: bool) {
        self.dark_mode = dark;
        self.use_device_theme = false;
        self.persist_bool(KEY_DARK_MODE, self.dark_mode);
        self.persist_bool(KEY_USE_DEVICE_THEME, self.use_device_theme);
        self.notify();
    }

    /// Toggle following the device theme.
    ///
    /// Turning it on snaps the resolved value to the device report. Turning
    /// it off keeps the current value as the new user baseline rather than
    /// resetting, so nothing visibly changes at the moment of the switch.
    ///
    /// Returns `SignalUnavailable` when following was requested but the
    /// device cannot report a theme; the user override stays in effect.
    pub fn set_use_device_theme(&mut self, follow: bool) -> Result<()> {
        let mut unavailable = false;
        if follow {
            match self.device.current() {
                Some(dark) => {
                    self.use_device_theme = true;
                    self.dark_mode = dark;
                }
                None => {
                    tracing::warn!("device theme unavailable, not following");
                    self.use_device_theme = false;
                    unavailable = true;
                }
            }
        } else {
            self.use_device_theme = false;
        }
        self.persist_bool(KEY_DARK_MODE, self.dark_mode);
        self.persist_bool(KEY_USE_DEVICE_THEME, self.use_device_theme);
        self.notify();

        if unavailable {
            return Err(NewsdeckError::SignalUnavailable);
        }
        Ok(())
    }

    /// Entry point for the platform's theme-change notification.
    ///
    /// Applies only while following the device; subscribers are notified
    /// before this returns, so no consumer can render a stale theme after
    /// the notification has been delivered.
    pub fn device_theme_changed(&mut self, dark: bool) {
        if !self.use_device_theme {
            return;
        }
        self.dark_mode = dark;
        self.persist_bool(KEY_DARK_MODE, self.dark_mode);
        self.notify();
    }

    pub fn set_font_size(&mut self, size: u32) -> Result<()> {
        if size < self.limits.font_size_min || size > self.limits.font_size_max {
            return Err(NewsdeckError::InvalidValue {
                field: "fontSize",
                reason: format!(
                    "{} is outside {}..={}",
                    size, self.limits.font_size_min, self.limits.font_size_max
                ),
            });
        }
        self.font_size = size;
        self.persist(KEY_FONT_SIZE, &size.to_string());
        self.notify();
        Ok(())
    }

    pub fn set_language(&mut self, code: impl Into<String>) {
        self.language = code.into();
        self.persist(KEY_LANGUAGE, &self.language);
        self.notify();
    }

    pub fn set_notifications(&mut self, enabled: bool) {
        self.notifications = enabled;
        self.persist_bool(KEY_NOTIFICATIONS, enabled);
        self.notify();
    }

    /// Register a consumer. Subscribers are invoked synchronously, in
    /// registration order, after every mutation.
    pub fn subscribe(&mut self, subscriber: impl Fn(&ResolvedPrefs) + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn snapshot(&self) -> ResolvedPrefs {
        ResolvedPrefs {
            dark_mode: self.dark_mode,
            use_device_theme: self.use_device_theme,
            font_size: self.font_size,
            language: self.language.clone(),
            notifications: self.notifications,
        }
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn use_device_theme(&self) -> bool {
        self.use_device_theme
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn notifications(&self) -> bool {
        self.notifications
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        for subscriber in &self.subscribers {
            subscriber(&snapshot);
        }
    }

    // Persistence is fire-and-forget: a failed write degrades to a log line,
    // never to a user-visible error.
    fn persist(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            tracing::warn!(key, error = %e, "failed to persist preference");
        }
    }

    fn persist_bool(&self, key: &str, value: bool) {
        self.persist(key, if value { "true" } else { "false" });
    }

    fn load_bool(&self, key: &str, default: bool) -> bool {
        match self.store.get(key) {
            Ok(Some(value)) => match value.as_str() {
                "true" => true,
                "false" => false,
                other => {
                    tracing::warn!(key, value = other, "malformed preference, using default");
                    default
                }
            },
            Ok(None) => default,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to load preference, using default");
                default
            }
        }
    }

    fn load_string(&self, key: &str, default: &str) -> String {
        match self.store.get(key) {
            Ok(Some(value)) => value,
            Ok(None) => default.into(),
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to load preference, using default");
                default.into()
            }
        }
    }

    fn load_font_size(&self) -> u32 {
        match self.store.get(KEY_FONT_SIZE) {
            Ok(Some(value)) => match value.parse::<u32>() {
                Ok(size)
                    if size >= self.limits.font_size_min && size <= self.limits.font_size_max =>
                {
                    size
                }
                _ => {
                    tracing::warn!(value = %value, "malformed font size, using default");
                    DEFAULT_FONT_SIZE
                }
            },
            Ok(None) => DEFAULT_FONT_SIZE,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load font size, using default");
                DEFAULT_FONT_SIZE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::signal::FixedTheme;
    use crate::store::SqliteStore;
    use std::sync::Mutex;

    /// Device report the test can flip mid-scenario.
    struct SharedTheme(Arc<Mutex<Option<bool>>>);

    impl DeviceTheme for SharedTheme {
        fn current(&self) -> Option<bool> {
            *self.0.lock().unwrap()
        }
    }

    fn resolver_with(device: Arc<dyn DeviceTheme>) -> PreferenceResolver {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        PreferenceResolver::new(store, device, ThemeConfig::default())
    }

    #[test]
    fn test_follows_device_by_default() {
        let mut resolver = resolver_with(Arc::new(FixedTheme::dark()));
        resolver.load();
        assert!(resolver.use_device_theme());
        assert!(resolver.dark_mode());
    }

    #[test]
    fn test_device_flip_propagates_without_user_call() {
        let report = Arc::new(Mutex::new(Some(false)));
        let mut resolver = resolver_with(Arc::new(SharedTheme(report.clone())));
        resolver.load();
        assert!(!resolver.dark_mode());

        *report.lock().unwrap() = Some(true);
        resolver.device_theme_changed(true);
        assert!(resolver.dark_mode());
    }

    #[test]
    fn test_explicit_override_stops_following() {
        let mut resolver = resolver_with(Arc::new(FixedTheme::light()));
        resolver.load();

        resolver.set_dark_mode(true);
        assert!(resolver.dark_mode());
        assert!(!resolver.use_device_theme());

        // Device flips are now ignored.
        resolver.device_theme_changed(false);
        assert!(resolver.dark_mode());
    }

    #[test]
    fn test_unfollowing_keeps_current_value_as_baseline() {
        let mut resolver = resolver_with(Arc::new(FixedTheme::dark()));
        resolver.load();
        assert!(resolver.dark_mode());

        resolver.set_use_device_theme(false).unwrap();
        assert!(resolver.dark_mode(), "resolved value becomes the override");
        assert!(!resolver.use_device_theme());
    }

    #[test]
    fn test_refollowing_snaps_to_device() {
        let mut resolver = resolver_with(Arc::new(FixedTheme::dark()));
        resolver.load();

        resolver.set_dark_mode(false);
        assert!(!resolver.dark_mode());

        resolver.set_use_device_theme(true).unwrap();
        assert!(resolver.dark_mode());
    }

    #[test]
    fn test_resolved_invariant_under_mixed_sequence() {
        let report = Arc::new(Mutex::new(Some(false)));
        let mut resolver = resolver_with(Arc::new(SharedTheme(report.clone())));
        resolver.load();

        let check = |r: &PreferenceResolver, device: Option<bool>, user: bool| {
            let expected = if r.use_device_theme() {
                device.unwrap()
            } else {
                user
            };
            assert_eq!(r.dark_mode(), expected);
        };

        check(&resolver, Some(false), false);

        *report.lock().unwrap() = Some(true);
        resolver.device_theme_changed(true);
        check(&resolver, Some(true), false);

        resolver.set_dark_mode(false);
        check(&resolver, Some(true), false);

        resolver.set_use_device_theme(true).unwrap();
        check(&resolver, Some(true), false);

        resolver.set_use_device_theme(false).unwrap();
        check(&resolver, Some(true), true);
    }

    #[test]
    fn test_device_unavailable_falls_back_to_override() {
        let mut resolver = resolver_with(Arc::new(FixedTheme::unavailable()));
        resolver.load();
        assert!(!resolver.use_device_theme());
        assert!(!resolver.dark_mode());
    }

    #[test]
    fn test_follow_request_with_unavailable_device_is_refused() {
        let mut resolver = resolver_with(Arc::new(FixedTheme::unavailable()));
        resolver.load();
        resolver.set_dark_mode(true);

        let err = resolver.set_use_device_theme(true).unwrap_err();
        assert!(matches!(err, NewsdeckError::SignalUnavailable));
        assert!(!resolver.use_device_theme());
        assert!(resolver.dark_mode(), "override untouched");
    }

    #[test]
    fn test_font_size_out_of_range_rejected() {
        let mut resolver = resolver_with(Arc::new(FixedTheme::light()));
        resolver.load();

        let err = resolver.set_font_size(99).unwrap_err();
        assert!(matches!(err, NewsdeckError::InvalidValue { .. }));
        assert_eq!(resolver.font_size(), DEFAULT_FONT_SIZE);

        resolver.set_font_size(22).unwrap();
        assert_eq!(resolver.font_size(), 22);
    }

    #[test]
    fn test_preferences_round_trip_through_store() {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let device: Arc<dyn DeviceTheme> = Arc::new(FixedTheme::light());

        let mut resolver =
            PreferenceResolver::new(store.clone(), device.clone(), ThemeConfig::default());
        resolver.load();
        resolver.set_font_size(22).unwrap();
        resolver.set_language("fr");
        resolver.set_notifications(false);
        resolver.set_dark_mode(true);

        // Simulated restart over the same store.
        let mut restored = PreferenceResolver::new(store, device, ThemeConfig::default());
        restored.load();
        assert_eq!(restored.font_size(), 22);
        assert_eq!(restored.language(), "fr");
        assert!(!restored.notifications());
        assert!(restored.dark_mode());
        assert!(!restored.use_device_theme());
    }

    #[test]
    fn test_one_corrupt_key_does_not_spoil_the_rest() {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        store.set(KEY_FONT_SIZE, "huge").unwrap();
        store.set(KEY_LANGUAGE, "es").unwrap();
        store.set(KEY_NOTIFICATIONS, "maybe").unwrap();

        let mut resolver = PreferenceResolver::new(
            store,
            Arc::new(FixedTheme::light()),
            ThemeConfig::default(),
        );
        resolver.load();

        assert_eq!(resolver.font_size(), DEFAULT_FONT_SIZE);
        assert_eq!(resolver.language(), "es");
        assert!(resolver.notifications());
    }

    #[test]
    fn test_subscribers_see_every_mutation_in_order() {
        let seen: Arc<Mutex<Vec<(bool, u32)>>> = Arc::new(Mutex::new(Vec::new()));
        let mut resolver = resolver_with(Arc::new(FixedTheme::light()));

        let sink = seen.clone();
        resolver.subscribe(move |prefs| {
            sink.lock()
                .unwrap()
                .push((prefs.dark_mode, prefs.font_size));
        });

        resolver.load();
        resolver.set_dark_mode(true);
        resolver.set_font_size(20).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(*seen, vec![(false, 16), (true, 16), (true, 20)]);
    }
}
