// SPDX-License-Identifier: MPL-2.0

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use zvariant::{OwnedValue, Type, Value};

/// Identifies a physical monitor: connector, vendor, product, serial.
#[derive(Deserialize, Serialize, Type, Debug, Clone, PartialEq, Eq)]
pub struct MonitorSpec {
    pub connector: String,
    pub vendor:    String,
    pub product:   String,
    pub serial:    String,
}

#[derive(Deserialize, Serialize, Type, Debug)]
pub struct MonitorMode {
    pub id:               String,
    pub width:            i32,
    pub height:           i32,
    pub refresh_rate:     f64,
    pub preferred_scale:  f64,
    pub supported_scales: Vec<f64>,
    /// `is-current`, `is-preferred`, `is-interlaced`
    pub properties:       HashMap<String, OwnedValue>,
}

#[derive(Deserialize, Serialize, Type, Debug)]
pub struct Monitor {
    pub spec:       MonitorSpec,
    pub modes:      Vec<MonitorMode>,
    pub properties: HashMap<String, OwnedValue>,
}

#[derive(Deserialize, Serialize, Type, Debug)]
pub struct LogicalMonitor {
    pub x:          i32,
    pub y:          i32,
    pub scale:      f64,
    pub transform:  u32,
    pub primary:    bool,
    pub monitors:   Vec<MonitorSpec>,
    pub properties: HashMap<String, OwnedValue>,
}

/// A monitor assigned to a logical monitor in `ApplyMonitorsConfig`.
#[derive(Serialize, Type, Debug)]
pub struct MonitorAssignment {
    pub connector:  String,
    pub mode_id:    String,
    pub properties: HashMap<String, Value<'static>>,
}

#[derive(Serialize, Type, Debug)]
pub struct LogicalMonitorConfig {
    pub x:         i32,
    pub y:         i32,
    pub scale:     f64,
    pub transform: u32,
    pub primary:   bool,
    pub monitors:  Vec<MonitorAssignment>,
}

/// Reply of `GetCurrentState`: serial, monitors, logical monitors, properties.
pub type CurrentState =
    (u32, Vec<Monitor>, Vec<LogicalMonitor>, HashMap<String, OwnedValue>);

#[zbus::proxy(
    interface = "org.gnome.Mutter.DisplayConfig",
    default_service = "org.gnome.Mutter.DisplayConfig",
    default_path = "/org/gnome/Mutter/DisplayConfig"
)]
trait DisplayConfig {
    /// GetCurrentState method
    fn get_current_state(&self) -> zbus::Result<CurrentState>;

    /// ApplyMonitorsConfig method
    fn apply_monitors_config(
        &self,
        serial: u32,
        method: u32,
        logical_monitors: &[LogicalMonitorConfig],
        properties: &HashMap<&str, Value<'_>>,
    ) -> zbus::Result<()>;

    /// MonitorsChanged signal
    #[zbus(signal)]
    fn monitors_changed(&self) -> zbus::Result<()>;
}
