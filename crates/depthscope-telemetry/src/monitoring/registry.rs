// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Registry for managing resource monitors.

use depthscope_core::{FrameDepthReport, ResourceMonitor};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A thread-safe registry for resource monitors.
///
/// Clones share the same underlying list.
#[derive(Debug, Clone)]
pub struct MonitorRegistry {
    monitors: Arc<Mutex<Vec<Arc<dyn ResourceMonitor>>>>,
}

impl MonitorRegistry {
    /// Creates a new, empty monitor registry.
    pub fn new() -> Self {
        Self {
            monitors: Arc::new(Mutex::new(Vec::new())),
        }
    }

    // A monitor that panicked mid-update leaves a usable list behind.
    fn lock(&self) -> MutexGuard<'_, Vec<Arc<dyn ResourceMonitor>>> {
        self.monitors.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a new resource monitor.
    pub fn register(&self, monitor: Arc<dyn ResourceMonitor>) {
        let monitor_id = monitor.monitor_id().to_string();
        self.lock().push(monitor);
        log::info!("Registered resource monitor: {}", monitor_id);
    }

    /// Hands a frame report to every registered monitor, in registration order.
    pub fn publish(&self, report: &FrameDepthReport) {
        for monitor in self.lock().iter() {
            monitor.on_frame(report);
        }
    }

    /// Calls the `update` method on all registered monitors.
    pub fn update_all(&self) {
        for monitor in self.lock().iter() {
            monitor.update();
        }
    }

    /// Returns a clone of all registered monitors.
    pub fn get_all_monitors(&self) -> Vec<Arc<dyn ResourceMonitor>> {
        self.lock().clone()
    }

    /// Number of registered monitors.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if no monitor is registered.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Default for MonitorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
