use std::{cell::RefCell, fmt, rc::Rc, time::Duration};

use anyhow::{Context, Result, bail};
use gestura_geometry::{Point, Vector};
use serde::{Deserialize, Deserializer};

use crate::{CoordinateSpace, Gesture, ModifierKey};

/// Tunables of the recognizer.
///
/// Deserializable from TOML, where durations are given in milliseconds and every field is
/// optional:
///
/// ```toml
/// drag_threshold = 10.0
/// hold_time = 800
/// wheel_zoom_factor = 1.1
/// wheel_rotate_modifier = "alt"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GestureSettings {
    /// Minimum distance a pressed pointer has to move before it is considered a drag.
    pub drag_threshold: f64,
    /// How long a pointer must be pressed without moving to be considered held.
    #[serde(deserialize_with = "millis")]
    pub hold_time: Duration,
    /// How long after a release a second press counts as a double click.
    #[serde(deserialize_with = "millis")]
    pub double_click_time: Duration,
    /// The zoom factor of one wheel step. Wheel zooming is disabled if not set.
    pub wheel_zoom_factor: Option<f64>,
    /// The rotation angle in degrees of one wheel step while the rotate modifier is held. Wheel
    /// rotation is disabled if not set.
    pub wheel_rotate_angle: Option<f64>,
    pub wheel_rotate_modifier: ModifierKey,
}

impl GestureSettings {
    pub const DEFAULT_DRAG_THRESHOLD: f64 = 15.0;
    pub const DEFAULT_HOLD_TIME: Duration = Duration::from_millis(1000);
    pub const DEFAULT_DOUBLE_CLICK_TIME: Duration = Duration::from_millis(100);

    pub fn from_toml(toml: &str) -> Result<Self> {
        let settings: Self = toml::from_str(toml).context("Failed to parse gesture settings")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.drag_threshold.is_finite() || self.drag_threshold < 0.0 {
            bail!(
                "Drag threshold must be a finite, non-negative distance, was: {}",
                self.drag_threshold
            );
        }
        if let Some(factor) = self.wheel_zoom_factor
            && (!factor.is_finite() || factor <= 0.0)
        {
            bail!("Wheel zoom factor must be finite and positive, was: {factor}");
        }
        if let Some(angle) = self.wheel_rotate_angle
            && !angle.is_finite()
        {
            bail!("Wheel rotate angle must be finite, was: {angle}");
        }
        Ok(())
    }
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            drag_threshold: Self::DEFAULT_DRAG_THRESHOLD,
            hold_time: Self::DEFAULT_HOLD_TIME,
            double_click_time: Self::DEFAULT_DOUBLE_CLICK_TIME,
            wheel_zoom_factor: None,
            wheel_rotate_angle: None,
            wheel_rotate_modifier: ModifierKey::default(),
        }
    }
}

fn millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_millis)
}

pub type PointCallback = Box<dyn FnMut(Point) -> Result<()>>;
pub type DragCallback = Box<dyn FnMut(Point, Point, Vector) -> Result<()>>;
pub type ScalarCallback = Box<dyn FnMut(Point, f64) -> Result<()>>;

/// The semantic callbacks. All are optional.
///
/// Registering `on_double_click` changes how clicks are reported: they are delayed by the double
/// click window.
#[derive(Default)]
pub struct GestureCallbacks {
    pub click: Option<PointCallback>,
    pub double_click: Option<PointCallback>,
    /// Called with the position of the press.
    pub hold: Option<PointCallback>,
    /// Called with `from`, `to`, and `to - from`.
    pub drag: Option<DragCallback>,
    /// Called with the anchor and the scale factor.
    pub zoom: Option<ScalarCallback>,
    /// Called with the anchor and the angle in degrees.
    pub rotate: Option<ScalarCallback>,
}

impl GestureCallbacks {
    #[must_use]
    pub fn on_click(mut self, f: impl FnMut(Point) -> Result<()> + 'static) -> Self {
        self.click = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_double_click(mut self, f: impl FnMut(Point) -> Result<()> + 'static) -> Self {
        self.double_click = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_hold(mut self, f: impl FnMut(Point) -> Result<()> + 'static) -> Self {
        self.hold = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_drag(mut self, f: impl FnMut(Point, Point, Vector) -> Result<()> + 'static) -> Self {
        self.drag = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_zoom(mut self, f: impl FnMut(Point, f64) -> Result<()> + 'static) -> Self {
        self.zoom = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_rotate(mut self, f: impl FnMut(Point, f64) -> Result<()> + 'static) -> Self {
        self.rotate = Some(Box::new(f));
        self
    }

    /// Routes all gestures to one function.
    #[must_use]
    pub fn all(f: impl FnMut(Gesture) -> Result<()> + 'static) -> Self {
        let f = Rc::new(RefCell::new(f));
        let route = move || {
            let f = f.clone();
            move |gesture: Gesture| (&mut *f.borrow_mut())(gesture)
        };
        let (click, double_click, hold, drag, zoom, rotate) =
            (route(), route(), route(), route(), route(), route());
        Self::default()
            .on_click(move |p| click(Gesture::Click(p)))
            .on_double_click(move |p| double_click(Gesture::DoubleClick(p)))
            .on_hold(move |p| hold(Gesture::Hold(p)))
            .on_drag(move |from, to, delta| drag(Gesture::Drag { from, to, delta }))
            .on_zoom(move |anchor, factor| zoom(Gesture::Zoom { anchor, factor }))
            .on_rotate(move |anchor, angle| rotate(Gesture::Rotate { anchor, angle }))
    }

    /// Invokes the callback matching the gesture. `None` if no callback is registered for it.
    pub(crate) fn invoke(&mut self, gesture: Gesture) -> Option<Result<()>> {
        Some(match gesture {
            Gesture::Click(p) => (self.click.as_mut()?)(p),
            Gesture::DoubleClick(p) => (self.double_click.as_mut()?)(p),
            Gesture::Hold(p) => (self.hold.as_mut()?)(p),
            Gesture::Drag { from, to, delta } => (self.drag.as_mut()?)(from, to, delta),
            Gesture::Zoom { anchor, factor } => (self.zoom.as_mut()?)(anchor, factor),
            Gesture::Rotate { anchor, angle } => (self.rotate.as_mut()?)(anchor, angle),
        })
    }
}

impl fmt::Debug for GestureCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureCallbacks")
            .field("click", &self.click.is_some())
            .field("double_click", &self.double_click.is_some())
            .field("hold", &self.hold.is_some())
            .field("drag", &self.drag.is_some())
            .field("zoom", &self.zoom.is_some())
            .field("rotate", &self.rotate.is_some())
            .finish()
    }
}

/// Everything a recognizer needs to know from its user.
#[derive(Debug, Default)]
pub struct GestureConfig {
    pub coordinates: CoordinateSpace,
    pub settings: GestureSettings,
    pub callbacks: GestureCallbacks,
}

impl GestureConfig {
    pub fn new(callbacks: GestureCallbacks) -> Self {
        Self {
            callbacks,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: GestureSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn with_coordinates(mut self, coordinates: CoordinateSpace) -> Self {
        self.coordinates = coordinates;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = GestureSettings::default();
        assert_eq!(settings.drag_threshold, 15.0);
        assert_eq!(settings.hold_time, Duration::from_secs(1));
        assert_eq!(settings.double_click_time, Duration::from_millis(100));
        assert_eq!(settings.wheel_zoom_factor, None);
        assert_eq!(settings.wheel_rotate_modifier, ModifierKey::Shift);
        assert_eq!(GestureSettings::from_toml("").unwrap(), settings);
    }

    #[test]
    fn settings_from_toml() {
        let settings = GestureSettings::from_toml(
            r#"
            drag_threshold = 4.5
            hold_time = 750
            double_click_time = 250
            wheel_zoom_factor = 1.1
            wheel_rotate_angle = 15.0
            wheel_rotate_modifier = "alt"
            "#,
        )
        .unwrap();
        assert_eq!(settings.drag_threshold, 4.5);
        assert_eq!(settings.hold_time, Duration::from_millis(750));
        assert_eq!(settings.double_click_time, Duration::from_millis(250));
        assert_eq!(settings.wheel_zoom_factor, Some(1.1));
        assert_eq!(settings.wheel_rotate_angle, Some(15.0));
        assert_eq!(settings.wheel_rotate_modifier, ModifierKey::Alt);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        assert!(GestureSettings::from_toml("drag_threshold = -1.0").is_err());
        assert!(GestureSettings::from_toml("wheel_zoom_factor = 0.0").is_err());
        assert!(GestureSettings::from_toml("hold_time = -5").is_err());
        assert!(GestureSettings::from_toml("unknown = 1").is_err());
        assert!(GestureSettings::from_toml("wheel_rotate_modifier = \"hyper\"").is_err());
    }

    #[test]
    fn invoke_routes_to_registered_callback() {
        let mut callbacks = GestureCallbacks::default().on_click(|_| Ok(()));
        assert!(callbacks.invoke(Gesture::Click(Point::ZERO)).is_some());
        assert!(callbacks.invoke(Gesture::Hold(Point::ZERO)).is_none());
        assert_eq!(
            format!("{callbacks:?}"),
            "GestureCallbacks { click: true, double_click: false, hold: false, drag: false, zoom: false, rotate: false }"
        );
    }
}
