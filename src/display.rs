// Copyright 2025 W-Helper Team
//
// SPDX-License-Identifier: GPL-3.0-only

use crate::errors::DisplayError;
use std::{collections::HashMap, future::Future};
use w_helper_zbus::{
    CurrentState, DisplayConfigProxy, LogicalMonitorConfig, MonitorAssignment, MonitorSpec,
};
use zvariant::{OwnedValue, Value};

const METHOD_TEMPORARY: u32 = 1;
const METHOD_PERSISTENT: u32 = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct DisplayMode {
    pub id:        String,
    pub width:     i32,
    pub height:    i32,
    pub refresh:   f64,
    pub current:   bool,
    pub preferred: bool,
}

impl DisplayMode {
    /// Refresh rate rounded to whole hertz.
    pub fn rate(&self) -> u32 { self.refresh.round() as u32 }

    fn same_resolution(&self, other: &DisplayMode) -> bool {
        self.width == other.width && self.height == other.height
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Monitor {
    pub spec:  MonitorSpec,
    pub modes: Vec<DisplayMode>,
}

impl Monitor {
    pub fn current_mode(&self) -> Option<&DisplayMode> { self.modes.iter().find(|mode| mode.current) }

    /// Modes sharing the resolution of the current mode, or every mode if none is current.
    fn modes_at_current_resolution(&self) -> impl Iterator<Item = &DisplayMode> {
        let current = self.current_mode();
        self.modes.iter().filter(move |mode| current.map_or(true, |c| mode.same_resolution(c)))
    }

    /// Picks the mode to switch to for `rate`, keeping the current resolution.
    ///
    /// The preferred mode wins; otherwise the refresh closest to `rate`.
    fn mode_for_rate(&self, rate: u32) -> Option<&DisplayMode> {
        let distance = |mode: &DisplayMode| (mode.refresh - f64::from(rate)).abs();
        self.modes_at_current_resolution()
            .filter(|mode| mode.rate() == rate)
            .min_by(|a, b| b.preferred.cmp(&a.preferred).then(distance(*a).total_cmp(&distance(*b))))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogicalMonitor {
    pub x:         i32,
    pub y:         i32,
    pub scale:     f64,
    pub transform: u32,
    pub primary:   bool,
    pub monitors:  Vec<MonitorSpec>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DisplayState {
    pub serial:           u32,
    pub monitors:         Vec<Monitor>,
    pub logical_monitors: Vec<LogicalMonitor>,
    pub layout_mode:      Option<u32>,
    pub supports_changing_layout_mode: bool,
}

impl DisplayState {
    pub fn from_reply((serial, monitors, logical_monitors, properties): CurrentState) -> Self {
        let monitors = monitors
            .into_iter()
            .map(|monitor| Monitor {
                spec:  monitor.spec,
                modes: monitor
                    .modes
                    .into_iter()
                    .map(|mode| DisplayMode {
                        current: flag(&mode.properties, "is-current"),
                        preferred: flag(&mode.properties, "is-preferred"),
                        id: mode.id,
                        width: mode.width,
                        height: mode.height,
                        refresh: mode.refresh_rate,
                    })
                    .collect(),
            })
            .collect();

        let logical_monitors = logical_monitors
            .into_iter()
            .map(|logical| LogicalMonitor {
                x:         logical.x,
                y:         logical.y,
                scale:     logical.scale,
                transform: logical.transform,
                primary:   logical.primary,
                monitors:  logical.monitors,
            })
            .collect();

        let layout_mode = match properties.get("layout-mode").map(|value| &**value) {
            Some(Value::U32(mode)) => Some(*mode),
            _ => None,
        };

        DisplayState {
            serial,
            monitors,
            logical_monitors,
            layout_mode,
            supports_changing_layout_mode: flag(&properties, "supports-changing-layout-mode"),
        }
    }

    fn monitor(&self, connector: &str) -> Option<&Monitor> {
        self.monitors.iter().find(|monitor| monitor.spec.connector == connector)
    }

    /// The monitor of the primary logical monitor, else the first monitor with an active mode.
    pub fn target(&self) -> Option<&Monitor> {
        self.logical_monitors
            .iter()
            .find(|logical| logical.primary)
            .and_then(|logical| logical.monitors.first())
            .and_then(|spec| self.monitor(&spec.connector))
            .or_else(|| self.monitors.iter().find(|monitor| monitor.current_mode().is_some()))
    }

    pub fn available_rates(&self) -> Vec<u32> {
        let Some(monitor) = self.target() else {
            return Vec::new();
        };

        let mut rates = monitor.modes_at_current_resolution().map(DisplayMode::rate).collect::<Vec<_>>();
        rates.sort_unstable();
        rates.dedup();
        rates
    }

    pub fn current_rate(&self) -> Option<u32> {
        self.target().and_then(Monitor::current_mode).map(DisplayMode::rate)
    }

    /// Rebuilds the whole logical monitor layout, changing only the target's mode.
    pub fn config_for_rate(&self, rate: u32) -> Result<Vec<LogicalMonitorConfig>, DisplayError> {
        let target = self.target().ok_or(DisplayError::NoMonitor)?;
        let mode = target.mode_for_rate(rate).ok_or(DisplayError::UnsupportedRate(rate))?;

        self.logical_monitors
            .iter()
            .map(|logical| {
                let monitors = logical
                    .monitors
                    .iter()
                    .map(|spec| {
                        let mode_id = if spec.connector == target.spec.connector {
                            mode.id.clone()
                        } else {
                            self.monitor(&spec.connector)
                                .and_then(Monitor::current_mode)
                                .map(|current| current.id.clone())
                                .ok_or(DisplayError::NoMonitor)?
                        };

                        Ok::<_, DisplayError>(MonitorAssignment {
                            connector: spec.connector.clone(),
                            mode_id,
                            properties: HashMap::new(),
                        })
                    })
                    .collect::<Result<Vec<_>, DisplayError>>()?;

                Ok::<_, DisplayError>(LogicalMonitorConfig {
                    x: logical.x,
                    y: logical.y,
                    scale: logical.scale,
                    transform: logical.transform,
                    primary: logical.primary,
                    monitors,
                })
            })
            .collect()
    }

    fn layout_mode_to_apply(&self) -> Option<u32> {
        self.layout_mode.filter(|_| self.supports_changing_layout_mode)
    }
}

fn flag(properties: &HashMap<String, OwnedValue>, key: &str) -> bool {
    matches!(properties.get(key).map(|value| &**value), Some(Value::Bool(true)))
}

/// Access to the compositor's monitor configuration.
pub trait DisplayBackend {
    fn current_state(&self) -> Result<DisplayState, DisplayError>;

    fn apply(
        &self,
        serial: u32,
        persistent: bool,
        logical_monitors: &[LogicalMonitorConfig],
        layout_mode: Option<u32>,
    ) -> Result<(), DisplayError>;
}

/// `org.gnome.Mutter.DisplayConfig` on the session bus.
#[derive(Clone, Copy, Debug, Default)]
pub struct MutterDisplayConfig;

impl MutterDisplayConfig {
    fn block_on<F: Future>(future: F) -> Result<F::Output, DisplayError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(DisplayError::Runtime)?;
        Ok(runtime.block_on(future))
    }
}

impl DisplayBackend for MutterDisplayConfig {
    fn current_state(&self) -> Result<DisplayState, DisplayError> {
        Self::block_on(async {
            let connection = zbus::Connection::session().await?;
            let proxy = DisplayConfigProxy::new(&connection).await?;
            let reply = proxy.get_current_state().await?;
            Ok::<_, DisplayError>(DisplayState::from_reply(reply))
        })?
    }

    fn apply(
        &self,
        serial: u32,
        persistent: bool,
        logical_monitors: &[LogicalMonitorConfig],
        layout_mode: Option<u32>,
    ) -> Result<(), DisplayError> {
        let method = if persistent { METHOD_PERSISTENT } else { METHOD_TEMPORARY };
        let mut properties = HashMap::new();
        if let Some(mode) = layout_mode {
            properties.insert("layout-mode", Value::U32(mode));
        }

        Self::block_on(async {
            let connection = zbus::Connection::session().await?;
            let proxy = DisplayConfigProxy::new(&connection).await?;
            proxy.apply_monitors_config(serial, method, logical_monitors, &properties).await?;
            Ok::<_, DisplayError>(())
        })?
    }
}

/// Refresh rate of the built-in panel.
pub struct Display<'a> {
    backend:    &'a dyn DisplayBackend,
    persistent: bool,
}

impl<'a> Display<'a> {
    pub fn new(backend: &'a dyn DisplayBackend, persistent: bool) -> Self {
        Self { backend, persistent }
    }

    fn state(&self) -> Option<DisplayState> {
        match self.backend.current_state() {
            Ok(state) => Some(state),
            Err(why) => {
                log::error!("failed to get display configuration: {}", why);
                None
            }
        }
    }

    pub fn available(&self) -> Vec<u32> {
        self.state().map(|state| state.available_rates()).unwrap_or_default()
    }

    pub fn current(&self) -> Option<u32> { self.state()?.current_rate() }

    pub fn set(&self, rate: u32) -> bool {
        log::info!("Setting refresh rate to {}Hz", rate);
        let Some(state) = self.state() else {
            return false;
        };

        let result = state.config_for_rate(rate).and_then(|config| {
            self.backend.apply(state.serial, self.persistent, &config, state.layout_mode_to_apply())
        });

        match result {
            Ok(()) => true,
            Err(why) => {
                log::error!("failed to set refresh rate: {}", why);
                false
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::{DisplayBackend, DisplayMode, DisplayState, LogicalMonitor, Monitor};
    use crate::errors::DisplayError;
    use std::cell::RefCell;
    use w_helper_zbus::{LogicalMonitorConfig, MonitorSpec};

    fn spec(connector: &str) -> MonitorSpec {
        MonitorSpec {
            connector: connector.to_owned(),
            vendor:    "BOE".to_owned(),
            product:   "0x0a1c".to_owned(),
            serial:    "0x00000000".to_owned(),
        }
    }

    fn mode(id: &str, width: i32, height: i32, refresh: f64) -> DisplayMode {
        DisplayMode { id: id.to_owned(), width, height, refresh, current: false, preferred: false }
    }

    /// A G14 panel (primary) next to an external 1080p monitor.
    pub fn g14_state() -> DisplayState {
        let mut panel_165 = mode("2560x1600@165.000", 2560, 1600, 165.000);
        panel_165.current = true;
        panel_165.preferred = true;
        let mut hdmi_60 = mode("1920x1080@60.000", 1920, 1080, 60.000);
        hdmi_60.current = true;

        DisplayState {
            serial: 7,
            monitors: vec![
                Monitor {
                    spec:  spec("eDP-1"),
                    modes: vec![
                        panel_165,
                        mode("2560x1600@120.000", 2560, 1600, 120.000),
                        mode("2560x1600@59.972", 2560, 1600, 59.972),
                        mode("2560x1600@60.002", 2560, 1600, 60.002),
                        mode("1920x1200@165.000", 1920, 1200, 165.000),
                        mode("1920x1200@144.000", 1920, 1200, 144.000),
                    ],
                },
                Monitor {
                    spec:  spec("HDMI-1"),
                    modes: vec![hdmi_60, mode("1920x1080@75.000", 1920, 1080, 75.000)],
                },
            ],
            logical_monitors: vec![
                LogicalMonitor {
                    x:         1920,
                    y:         0,
                    scale:     1.5,
                    transform: 0,
                    primary:   true,
                    monitors:  vec![spec("eDP-1")],
                },
                LogicalMonitor {
                    x:         0,
                    y:         0,
                    scale:     1.0,
                    transform: 0,
                    primary:   false,
                    monitors:  vec![spec("HDMI-1")],
                },
            ],
            layout_mode: Some(1),
            supports_changing_layout_mode: false,
        }
    }

    #[derive(Default)]
    pub struct MockDisplay {
        pub state:   Option<DisplayState>,
        pub applied: RefCell<Vec<(u32, bool, Vec<(String, String)>, Option<u32>)>>,
    }

    impl MockDisplay {
        pub fn new(state: DisplayState) -> Self { Self { state: Some(state), ..Self::default() } }
    }

    impl DisplayBackend for MockDisplay {
        fn current_state(&self) -> Result<DisplayState, DisplayError> {
            self.state.clone().ok_or(DisplayError::NoMonitor)
        }

        fn apply(
            &self,
            serial: u32,
            persistent: bool,
            logical_monitors: &[LogicalMonitorConfig],
            layout_mode: Option<u32>,
        ) -> Result<(), DisplayError> {
            let assignments = logical_monitors
                .iter()
                .flat_map(|logical| logical.monitors.iter())
                .map(|monitor| (monitor.connector.clone(), monitor.mode_id.clone()))
                .collect();
            self.applied.borrow_mut().push((serial, persistent, assignments, layout_mode));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{mock::*, *};

    #[test]
    fn available_rates_at_current_resolution() {
        let state = g14_state();
        assert_eq!(state.target().map(|m| m.spec.connector.as_str()), Some("eDP-1"));
        assert_eq!(state.available_rates(), vec![60, 120, 165]);
        assert_eq!(state.current_rate(), Some(165));
    }

    #[test]
    fn target_falls_back_to_active_monitor() {
        let mut state = g14_state();
        state.logical_monitors.iter_mut().for_each(|logical| logical.primary = false);
        state.monitors[0].modes.iter_mut().for_each(|mode| mode.current = false);

        assert_eq!(state.target().map(|m| m.spec.connector.as_str()), Some("HDMI-1"));
        assert_eq!(state.available_rates(), vec![60, 75]);
    }

    #[test]
    fn config_changes_only_target_mode() {
        let state = g14_state();
        let config = state.config_for_rate(120).unwrap();

        assert_eq!(config.len(), 2);
        assert_eq!(config[0].monitors[0].mode_id, "2560x1600@120.000");
        assert_eq!(config[0].scale, 1.5);
        assert!(config[0].primary);
        assert_eq!(config[1].monitors[0].mode_id, "1920x1080@60.000");
        assert_eq!(config[1].x, 0);
    }

    #[test]
    fn closest_mode_wins_for_rounded_rate() {
        let state = g14_state();
        let config = state.config_for_rate(60).unwrap();
        assert_eq!(config[0].monitors[0].mode_id, "2560x1600@60.002");
    }

    #[test]
    fn preferred_mode_beats_current_for_rounded_rate() {
        let mut state = g14_state();
        for mode in &mut state.monitors[0].modes {
            mode.current = mode.id == "2560x1600@60.002";
            mode.preferred = mode.id == "2560x1600@59.972";
        }

        assert_eq!(state.current_rate(), Some(60));
        let config = state.config_for_rate(60).unwrap();
        assert_eq!(config[0].monitors[0].mode_id, "2560x1600@59.972");
    }

    #[test]
    fn unavailable_rate_is_refused() {
        let state = g14_state();
        // 144Hz exists, but only at 1920x1200.
        assert!(matches!(state.config_for_rate(144), Err(DisplayError::UnsupportedRate(144))));
    }

    #[test]
    fn set_applies_through_backend() {
        let backend = MockDisplay::new(g14_state());
        let display = Display::new(&backend, true);

        assert!(display.set(120));
        assert!(!display.set(144));

        let applied = backend.applied.borrow();
        assert_eq!(applied.len(), 1);
        let (serial, persistent, assignments, layout_mode) = &applied[0];
        assert_eq!(*serial, 7);
        assert!(*persistent);
        assert_eq!(*layout_mode, None);
        assert_eq!(assignments[0], ("eDP-1".to_owned(), "2560x1600@120.000".to_owned()));
        assert_eq!(assignments[1], ("HDMI-1".to_owned(), "1920x1080@60.000".to_owned()));
    }

    #[test]
    fn layout_mode_passed_when_supported() {
        let mut state = g14_state();
        state.supports_changing_layout_mode = true;
        let backend = MockDisplay::new(state);

        assert!(Display::new(&backend, false).set(165));
        let applied = backend.applied.borrow();
        assert!(!applied[0].1);
        assert_eq!(applied[0].3, Some(1));
    }

    #[test]
    fn unknown_without_display_service() {
        let backend = MockDisplay::default();
        let display = Display::new(&backend, true);

        assert!(display.available().is_empty());
        assert_eq!(display.current(), None);
        assert!(!display.set(60));
    }
}
