//! BuildSession: owns the in-progress build and runs the validation engine.
//!
//! A session replaces what would otherwise be process-wide state (the
//! current stack, the current requirements, the last diagnostic message).
//! Everything a run needs is held here and every result is returned to the
//! caller instead of being written somewhere shared.
//!
//! # Run lifecycle (for beginners)
//!
//! ```text
//! add/remove/resize layers ──► run(display spec) ──► RunReport
//!                                   │
//!                                   ├─ stores the display spec
//!                                   ├─ snapshots the stack
//!                                   ├─ lcd_core::run_check(...)
//!                                   └─ marks the active level completed on pass
//! ```

use lcd_core::{
    run_check, ArchetypeId, CheckReport, DisplaySpec, InputError, LayerStack, Level,
    LevelCatalog, LevelError, PlacedLayer, Requirements, StackError,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::level_source::{LevelSource, LevelSourceError};

/// Limits applied to interactive stack edits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackLimits {
    /// Largest thickness a single layer may be resized to, in millimetres.
    pub max_layer_thickness_mm: f32,
}

impl Default for StackLimits {
    fn default() -> Self {
        Self {
            max_layer_thickness_mm: lcd_core::domain::catalog::MAX_LAYER_THICKNESS_MM,
        }
    }
}

/// Outcome of [`BuildSession::run`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// The level the build was checked against, if the catalog is non-empty.
    pub level_id: Option<u32>,
    pub display: DisplaySpec,
    #[serde(flatten)]
    pub report: CheckReport,
    /// `true` when this run marked the level completed.
    pub level_completed: bool,
}

impl RunReport {
    pub fn passed(&self) -> bool {
        self.report.verdict.passed
    }

    /// The "Display Specs" panel shown after a passing run.
    pub fn describe(&self) -> String {
        let metrics = &self.report.metrics;
        format!(
            "Type: {}\nResolution: {}x{}\nGlass: {}\nPPI: {}\nContrast ratio: {}\nThickness: {:.1}mm",
            metrics.backlight_type,
            self.display.res_width_px,
            self.display.res_height_px,
            metrics.glass_type,
            metrics.ppi,
            metrics.backlight_type.contrast_ratio(),
            metrics.thickness_mm,
        )
    }
}

/// The in-progress display build plus the level catalog it is played against.
pub struct BuildSession {
    stack: LayerStack,
    display: Option<DisplaySpec>,
    levels: LevelCatalog,
    selected_level: Option<u32>,
}

impl BuildSession {
    /// Creates a session with an empty stack and no level selected.
    pub fn new(levels: LevelCatalog, limits: StackLimits) -> Self {
        Self {
            stack: LayerStack::with_max_thickness(limits.max_layer_thickness_mm),
            display: None,
            levels,
            selected_level: None,
        }
    }

    /// Loads levels from `source` and creates a session around them.
    ///
    /// # Errors
    ///
    /// Returns the source's error, or [`LevelSourceError::InvalidCatalog`] if
    /// the levels contain duplicate ids or unsatisfiable requirements.
    pub fn from_source(source: &dyn LevelSource, limits: StackLimits) -> Result<Self, LevelSourceError> {
        let levels = source.load()?;
        let catalog = LevelCatalog::from_levels(levels)?;
        info!("loaded {} levels from {}", catalog.len(), source.describe());
        Ok(Self::new(catalog, limits))
    }

    // ── Stack edits ───────────────────────────────────────────────────────────

    /// Appends a layer at its archetype's minimum thickness.
    pub fn add_layer(&mut self, archetype: ArchetypeId) -> &PlacedLayer {
        debug!(%archetype, position = self.stack.len(), "adding layer");
        self.stack.push(archetype)
    }

    /// Removes the most recently added layer.  No-op on an empty stack.
    pub fn remove_last_layer(&mut self) -> Option<PlacedLayer> {
        let removed = self.stack.pop();
        if let Some(layer) = &removed {
            debug!(archetype = %layer.archetype, id = %layer.id, "removed last layer");
        }
        removed
    }

    /// Resizes the layer at `index`.
    ///
    /// # Errors
    ///
    /// See [`LayerStack::set_thickness`].
    pub fn set_layer_thickness(&mut self, index: usize, thickness_mm: f32) -> Result<(), StackError> {
        self.stack.set_thickness(index, thickness_mm)
    }

    /// Removes every layer.
    pub fn clear_layers(&mut self) {
        self.stack.clear();
    }

    pub fn layers(&self) -> &[PlacedLayer] {
        self.stack.layers()
    }

    pub fn layer_labels(&self) -> Vec<String> {
        self.stack.labels()
    }

    // ── Levels ────────────────────────────────────────────────────────────────

    pub fn levels(&self) -> &LevelCatalog {
        &self.levels
    }

    /// Makes level `id` the target of subsequent runs.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::UnknownLevel`] if the catalog has no such level.
    pub fn select_level(&mut self, id: u32) -> Result<(), LevelError> {
        if self.levels.get(id).is_none() {
            warn!("cannot select unknown level {id}");
            return Err(LevelError::UnknownLevel(id));
        }
        self.selected_level = Some(id);
        Ok(())
    }

    /// The selected level, or the first level when nothing is selected.
    pub fn active_level(&self) -> Option<&Level> {
        match self.selected_level {
            Some(id) => self.levels.get(id),
            None => self.levels.first(),
        }
    }

    /// Requirements of the active level; unconstrained without one.
    pub fn requirements(&self) -> Requirements {
        self.active_level()
            .map(|level| level.requirements.clone())
            .unwrap_or_default()
    }

    /// The display spec of the most recent run.
    pub fn display(&self) -> Option<&DisplaySpec> {
        self.display.as_ref()
    }

    // ── Runs ──────────────────────────────────────────────────────────────────

    /// Checks the current build against the active level.
    ///
    /// `display` replaces the spec of any previous run.  The engine works on
    /// a snapshot of the stack taken here, and a pass marks the active level
    /// completed.
    pub fn run(&mut self, display: DisplaySpec) -> RunReport {
        self.display = Some(display);

        let snapshot = self.stack.snapshot();
        let level_id = self.active_level().map(|level| level.id);
        let requirements = self.requirements();

        let report = run_check(&snapshot, &display, &requirements);

        let mut level_completed = false;
        if report.verdict.passed {
            if let Some(id) = level_id {
                level_completed = self.levels.mark_completed(id).is_ok();
            }
            info!(
                level = ?level_id,
                ppi = report.metrics.ppi,
                thickness_mm = report.metrics.thickness_mm,
                "build passed"
            );
        } else {
            info!(level = ?level_id, "build failed: {}", report.verdict.message);
        }

        RunReport {
            level_id,
            display,
            report,
            level_completed,
        }
    }

    /// Parses the four dimension fields and runs the build.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] for the first field that is not a non-negative
    /// whole number.
    /// The engine is not invoked in that case and the previous display spec
    /// is kept.
    pub fn run_raw(
        &mut self,
        size_width: &str,
        size_height: &str,
        res_width: &str,
        res_height: &str,
    ) -> Result<RunReport, InputError> {
        let display = DisplaySpec::parse(size_width, size_height, res_width, res_height)
            .map_err(|e| {
                warn!("rejected display input: {e}");
                e
            })?;
        Ok(self.run(display))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
