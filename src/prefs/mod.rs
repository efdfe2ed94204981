pub mod resolver;
pub mod signal;

pub use resolver::{PreferenceResolver, ResolvedPrefs};
pub use signal::{DeviceTheme, FixedTheme, SystemTheme};
