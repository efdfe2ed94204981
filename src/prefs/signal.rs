/// A live, externally-driven dark/light report.
///
/// The platform layer owns change delivery: when the device theme flips it
/// calls [`PreferenceResolver::device_theme_changed`](crate::prefs::PreferenceResolver::device_theme_changed)
/// with the new value. This trait only answers the point-in-time question.
pub trait DeviceTheme: Send + Sync {
    /// The device's current preference for dark mode, or `None` when the
    /// platform cannot report one.
    fn current(&self) -> Option<bool>;
}

/// Probes the `COLORFGBG` convention set by some terminal emulators.
///
/// The variable looks like `"15;0"` (foreground;background). Backgrounds
/// 0-6 and 8 are the dark half of the standard 16-color palette.
pub struct SystemTheme;

impl DeviceTheme for SystemTheme {
    fn current(&self) -> Option<bool> {
        let value = std::env::var("COLORFGBG").ok()?;
        let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
        Some(bg <= 6 || bg == 8)
    }
}

/// A fixed report, for tests and for platforms with a known theme.
#[derive(Debug, Clone, Copy)]
pub struct FixedTheme {
    pub dark: Option<bool>,
}

impl FixedTheme {
    pub fn dark() -> Self {
        Self { dark: Some(true) }
    }

    pub fn light() -> Self {
        Self { dark: Some(false) }
    }

    pub fn unavailable() -> Self {
        Self { dark: None }
    }
}

impl DeviceTheme for FixedTheme {
    fn current(&self) -> Option<bool> {
        self.dark
    }
}
