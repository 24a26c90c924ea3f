//! Pointer-driven editing on top of a [`Registry`].
//!
//! ```text
//! Idle --press on point-------------> DraggingPoint --release--> Idle
//! Idle --press on indicator end-----> DraggingAngle --release--> Idle
//! Idle --press elsewhere (deselect)-> Idle
//! ```
//!
//! Pointer coordinates are already in model space; the caller owns the
//! conversion from screen pixels and any redrawing. The drag target is held
//! by id, so edits made through [`Editor::registry_mut`] mid-drag cannot
//! redirect it to another minutia.

use super::{HitConfig, HitKind, Registry};
use crate::image::ImageDims;
use crate::minutia::{Minutia, MinutiaId, MinutiaKind, Quality};
use crate::util::MinutiaeResult;

/// Current pointer interaction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    DraggingPoint {
        id: MinutiaId,
    },
    DraggingAngle {
        id: MinutiaId,
    },
}

/// Fields applied to minutiae created by [`Editor::mark`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MarkDefaults {
    pub kind: MinutiaKind,
    pub quality: Quality,
    pub angle: u16,
}

impl Default for MarkDefaults {
    fn default() -> Self {
        Self {
            kind: MinutiaKind::RidgeEnding,
            quality: Quality::default(),
            angle: 0,
        }
    }
}

/// A registry plus the drag state of one interactive session.
#[derive(Clone, Debug, Default)]
pub struct Editor {
    registry: Registry,
    state: DragState,
    hit: HitConfig,
    defaults: MarkDefaults,
}

impl Editor {
    /// Creates an idle editor over `registry`.
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            ..Self::default()
        }
    }

    /// Replaces the hit-testing thresholds.
    pub fn with_hit_config(mut self, hit: HitConfig) -> Self {
        self.hit = hit;
        self
    }

    /// Returns the edited registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns the edited registry for direct changes.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Consumes the editor and returns its registry.
    pub fn into_registry(self) -> Registry {
        self.registry
    }

    /// Returns the current drag state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Returns the fields used by [`Editor::mark`].
    pub fn defaults(&self) -> &MarkDefaults {
        &self.defaults
    }

    /// Sets the kind, quality and angle used by [`Editor::mark`].
    pub fn set_defaults(&mut self, defaults: MarkDefaults) {
        self.defaults = defaults;
    }

    /// Switches to a new image; all minutiae are discarded.
    pub fn load_image(&mut self, dims: ImageDims) {
        self.registry.attach_image(dims);
        self.state = DragState::Idle;
    }

    /// Adds a minutia at `(x, y)` using the current defaults.
    pub fn mark(&mut self, x: u16, y: u16) -> MinutiaeResult<usize> {
        let d = self.defaults;
        self.add_at(Minutia::new(d.kind, x, y, d.angle, d.quality))
    }

    /// Adds a fully specified minutia.
    pub fn add_at(&mut self, minutia: Minutia) -> MinutiaeResult<usize> {
        self.registry.add(minutia)
    }

    /// Deletes the selection and returns how many minutiae were removed.
    pub fn delete_selected(&mut self) -> usize {
        self.state = DragState::Idle;
        self.registry.delete_selected()
    }

    /// Handles a pointer press; an ongoing drag is released first.
    pub fn press(&mut self, x: f64, y: f64, additive: bool) -> MinutiaeResult<HitKind> {
        self.state = DragState::Idle;
        let hit = self.registry.hit_test(x, y, &self.hit);
        match hit {
            HitKind::OnPoint(index) => {
                self.registry.select(index, additive)?;
                if let Some(id) = self.registry.id_at(index) {
                    self.state = DragState::DraggingPoint { id };
                }
            }
            HitKind::OnOrientationStart(index) | HitKind::OnOrientationEnd(index) => {
                self.registry.select(index, additive)?;
                if let Some(id) = self.registry.id_at(index) {
                    self.state = DragState::DraggingAngle { id };
                }
            }
            HitKind::Miss => self.registry.clear_selection(),
        }
        Ok(hit)
    }

    /// Handles a pointer move while the button is held.
    ///
    /// A rejected move leaves the registry and the drag state unchanged. If
    /// the dragged minutia has been deleted, the editor returns to `Idle`.
    pub fn drag_to(&mut self, x: f64, y: f64) -> MinutiaeResult<()> {
        let (id, rotate) = match self.state {
            DragState::Idle => return Ok(()),
            DragState::DraggingPoint { id } => (id, false),
            DragState::DraggingAngle { id } => (id, true),
        };
        let Some(index) = self.registry.index_of(id) else {
            self.state = DragState::Idle;
            return Ok(());
        };
        if rotate {
            let origin = self.registry.get(index).map(Minutia::position).unwrap_or_default();
            self.registry
                .rotate_by_drag(index, x - origin.x, y - origin.y)
                .map(|_| ())
        } else {
            self.registry.move_point(index, to_pixel(x), to_pixel(y))
        }
    }

    /// Ends the current drag and returns the state it was in.
    pub fn release(&mut self) -> DragState {
        std::mem::take(&mut self.state)
    }
}

fn to_pixel(v: f64) -> i64 {
    if v.is_finite() {
        v.round() as i64
    } else {
        i64::MIN
    }
}
