//! Feature toggle definitions.
//!
//! Each toggle is its own type; its name (and so its configuration key) is
//! the type's identifier. Declare new ones with [`feature_toggle!`] and add
//! them to [`FeatureRegistry::with_defaults`](crate::FeatureRegistry::with_defaults).

use crate::ToggleError;

/// A single named on/off switch.
///
/// `is_enabled` is evaluated on every call and never memoized, so a
/// configuration change is picked up by the next read.
pub trait FeatureToggle: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    fn is_enabled(&self) -> Result<bool, ToggleError>;
}

/// Declares a toggle type backed by a [`ToggleValueProvider`](crate::ToggleValueProvider).
///
/// ```ignore
/// feature_toggle!(
///     /// Gates the reporting endpoints
///     pub ReportsFeature
/// );
/// ```
#[macro_export]
macro_rules! feature_toggle {
    ($(#[$meta:meta])* $vis:vis $name:ident) => {
        $(#[$meta])*
        $vis struct $name {
            provider: ::std::sync::Arc<dyn $crate::ToggleValueProvider>,
        }

        impl $name {
            pub fn new(provider: ::std::sync::Arc<dyn $crate::ToggleValueProvider>) -> Self {
                Self { provider }
            }
        }

        impl $crate::FeatureToggle for $name {
            fn name(&self) -> &'static str {
                stringify!($name)
            }

            fn is_enabled(&self) -> ::std::result::Result<bool, $crate::ToggleError> {
                $crate::ToggleValueProvider::evaluate(
                    &*self.provider,
                    $crate::FeatureToggle::name(self),
                )
            }
        }
    };
}

feature_toggle!(
    /// Gates the `/api/values` resource
    pub ValuesFeature
);

feature_toggle!(
    /// Shows the navigation bar in the frontend
    pub NavigationFeature
);
