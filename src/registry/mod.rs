//! In-memory minutiae registry.
//!
//! The registry keeps minutiae in insertion order, which is also the record
//! order of encoded templates. Every entry gets a [`MinutiaId`] when it enters
//! the registry; ids grow monotonically and are never reused, so the entry
//! list stays sorted by id and positional indices can be recovered from ids
//! with a binary search. The selection set is keyed by id and survives
//! deletions of unrelated entries.
//!
//! Positions are validated against the attached image. Without an image, the
//! full 16-bit coordinate range is accepted.

mod editor;
mod hit;
mod selection;

pub use editor::{DragState, Editor, MarkDefaults};
pub use hit::{HitConfig, HitKind};

use crate::geometry::{angle_from_vector, distance, orientation_endpoint, Point};
use crate::image::ImageDims;
use crate::minutia::{Minutia, MinutiaId, MinutiaKind, Quality};
use crate::trace::trace_event;
use crate::util::{MinutiaeError, MinutiaeResult};
use selection::Selection;

/// Coordinate extent used when no image is attached.
const UNBOUNDED_EXTENT: u32 = u16::MAX as u32 + 1;

#[derive(Clone, Debug)]
struct Entry {
    id: MinutiaId,
    minutia: Minutia,
}

/// Field changes applied by [`Registry::update`]; `None` keeps the field.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MinutiaUpdate {
    pub kind: Option<MinutiaKind>,
    pub x: Option<u16>,
    pub y: Option<u16>,
    pub angle: Option<u16>,
    pub quality: Option<Quality>,
}

impl MinutiaUpdate {
    fn apply(&self, mut minutia: Minutia) -> Minutia {
        if let Some(kind) = self.kind {
            minutia.kind = kind;
        }
        if let Some(x) = self.x {
            minutia.x = x;
        }
        if let Some(y) = self.y {
            minutia.y = y;
        }
        if let Some(angle) = self.angle {
            minutia.angle = angle;
        }
        if let Some(quality) = self.quality {
            minutia.quality = quality;
        }
        minutia
    }
}

/// Ordered minutiae plus selection state.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    entries: Vec<Entry>,
    image: Option<ImageDims>,
    selection: Selection,
    next_id: u64,
}

impl Registry {
    /// Creates an empty registry with no image attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry bound to an image.
    pub fn with_image(dims: ImageDims) -> Self {
        Self {
            image: Some(dims),
            ..Self::default()
        }
    }

    /// Returns the attached image dimensions.
    pub fn image(&self) -> Option<ImageDims> {
        self.image
    }

    /// Attaches a new image, discarding all minutiae and the selection.
    pub fn attach_image(&mut self, dims: ImageDims) {
        self.reset();
        self.image = Some(dims);
    }

    /// Removes all minutiae and clears the selection.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.selection.clear();
    }

    /// Replaces the contents with `minutiae`, e.g. from a decoded template.
    ///
    /// Nothing changes unless every minutia is valid and inside the image.
    pub fn load<I>(&mut self, minutiae: I) -> MinutiaeResult<()>
    where
        I: IntoIterator<Item = Minutia>,
    {
        let minutiae: Vec<Minutia> = minutiae.into_iter().collect();
        for minutia in &minutiae {
            self.check_minutia(minutia)?;
        }
        self.reset();
        self.entries.reserve(minutiae.len());
        for minutia in minutiae {
            let id = self.allocate_id();
            self.entries.push(Entry { id, minutia });
        }
        trace_event!("registry_loaded", count = self.entries.len());
        Ok(())
    }

    /// Returns the number of minutiae.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the registry holds no minutiae.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the minutia at `index`.
    pub fn get(&self, index: usize) -> Option<&Minutia> {
        self.entries.get(index).map(|entry| &entry.minutia)
    }

    /// Returns the minutia with identifier `id`.
    pub fn get_by_id(&self, id: MinutiaId) -> Option<&Minutia> {
        self.index_of(id).and_then(|idx| self.get(idx))
    }

    /// Returns the identifier of the minutia at `index`.
    pub fn id_at(&self, index: usize) -> Option<MinutiaId> {
        self.entries.get(index).map(|entry| entry.id)
    }

    /// Returns the current position of the minutia with identifier `id`.
    pub fn index_of(&self, id: MinutiaId) -> Option<usize> {
        self.entries.binary_search_by_key(&id, |entry| entry.id).ok()
    }

    /// Iterates over identifiers and minutiae in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (MinutiaId, &Minutia)> + '_ {
        self.entries.iter().map(|entry| (entry.id, &entry.minutia))
    }

    /// Iterates over minutiae in order.
    pub fn minutiae(&self) -> impl ExactSizeIterator<Item = &Minutia> + '_ {
        self.entries.iter().map(|entry| &entry.minutia)
    }

    /// Appends a minutia and returns its index.
    pub fn add(&mut self, minutia: Minutia) -> MinutiaeResult<usize> {
        self.check_minutia(&minutia)?;
        let id = self.allocate_id();
        self.entries.push(Entry { id, minutia });
        let index = self.entries.len() - 1;
        trace_event!("minutia_added", index = index, x = minutia.x, y = minutia.y);
        Ok(index)
    }

    /// Applies `fields` to the minutia at `index`.
    ///
    /// Angles must already be normalized into [0, 360).
    pub fn update(&mut self, index: usize, fields: MinutiaUpdate) -> MinutiaeResult<()> {
        let current = self.entry(index)?.minutia;
        let updated = fields.apply(current);
        self.check_minutia(&updated)?;
        self.entries[index].minutia = updated;
        Ok(())
    }

    /// Removes the minutiae at `indices` and returns how many were removed.
    ///
    /// All indices refer to positions before the call; duplicates are
    /// ignored. Nothing is removed if any index is out of range.
    pub fn delete(&mut self, indices: &[usize]) -> MinutiaeResult<usize> {
        let mut order = indices.to_vec();
        order.sort_unstable_by(|a, b| b.cmp(a));
        order.dedup();
        if let Some(&index) = order.first() {
            self.entry(index)?;
        }
        for &index in &order {
            let entry = self.entries.remove(index);
            self.selection.remove(entry.id);
        }
        trace_event!("minutiae_deleted", count = order.len());
        Ok(order.len())
    }

    /// Removes every selected minutia and returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        let before = self.entries.len();
        let selection = &self.selection;
        self.entries.retain(|entry| !selection.contains(entry.id));
        self.selection.clear();
        let removed = before - self.entries.len();
        trace_event!("minutiae_deleted", count = removed);
        removed
    }

    /// Moves the minutia at `index`, keeping kind, angle and quality.
    pub fn move_point(&mut self, index: usize, x: i64, y: i64) -> MinutiaeResult<()> {
        self.entry(index)?;
        let (x, y) = self.check_position(x, y)?;
        let minutia = &mut self.entries[index].minutia;
        minutia.x = x;
        minutia.y = y;
        Ok(())
    }

    /// Points the minutia at `index` along `(dx, dy)` and returns the new angle.
    ///
    /// `(dx, dy)` runs from the minutia to the pointer in screen orientation.
    /// A zero vector keeps the current angle.
    pub fn rotate_by_drag(&mut self, index: usize, dx: f64, dy: f64) -> MinutiaeResult<u16> {
        let minutia = &mut self.entry_mut(index)?.minutia;
        if dx != 0.0 || dy != 0.0 {
            minutia.angle = angle_from_vector(dx, dy);
        }
        Ok(minutia.angle)
    }

    /// Returns the index of the minutia closest to `(x, y)`.
    ///
    /// Ties go to the lowest index.
    pub fn find_nearest(&self, x: f64, y: f64) -> Option<usize> {
        let query = Point::new(x, y);
        let mut best: Option<(usize, f64)> = None;
        for (idx, entry) in self.entries.iter().enumerate() {
            let dist = distance(query, entry.minutia.position());
            match best {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best = Some((idx, dist)),
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Tests `(x, y)` against the nearest minutia and its orientation indicator.
    pub fn hit_test(&self, x: f64, y: f64, cfg: &HitConfig) -> HitKind {
        let Some(index) = self.find_nearest(x, y) else {
            return HitKind::Miss;
        };
        let minutia = &self.entries[index].minutia;
        let query = Point::new(x, y);
        let origin = minutia.position();
        let dist = distance(query, origin);
        if dist <= cfg.point_radius {
            return HitKind::OnPoint(index);
        }
        if dist <= cfg.orientation_radius {
            return HitKind::OnOrientationStart(index);
        }
        let tip = orientation_endpoint(origin, minutia.angle, cfg.indicator_length);
        if distance(query, tip) <= cfg.orientation_radius {
            return HitKind::OnOrientationEnd(index);
        }
        HitKind::Miss
    }

    /// Selects the minutia at `index`, keeping the rest of the selection when
    /// `additive` is set.
    pub fn select(&mut self, index: usize, additive: bool) -> MinutiaeResult<()> {
        let id = self.entry(index)?.id;
        self.selection.select(id, additive);
        Ok(())
    }

    /// Flips the selection state of `index`; returns whether it is now selected.
    pub fn toggle(&mut self, index: usize) -> MinutiaeResult<bool> {
        let id = self.entry(index)?.id;
        Ok(self.selection.toggle(id))
    }

    /// Deselects everything.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Returns true if the minutia at `index` is selected.
    pub fn is_selected(&self, index: usize) -> bool {
        self.id_at(index)
            .is_some_and(|id| self.selection.contains(id))
    }

    /// Returns the selected indices in ascending order.
    pub fn selected(&self) -> Vec<usize> {
        self.selection
            .iter()
            .filter_map(|id| self.index_of(id))
            .collect()
    }

    /// Returns the number of selected minutiae.
    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    /// Returns the identifiers of the selected minutiae.
    pub fn selected_ids(&self) -> Vec<MinutiaId> {
        self.selection.iter().collect()
    }

    fn allocate_id(&mut self) -> MinutiaId {
        let id = MinutiaId(self.next_id);
        self.next_id += 1;
        id
    }

    fn entry(&self, index: usize) -> MinutiaeResult<&Entry> {
        self.entries
            .get(index)
            .ok_or(MinutiaeError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    fn entry_mut(&mut self, index: usize) -> MinutiaeResult<&mut Entry> {
        let len = self.entries.len();
        self.entries
            .get_mut(index)
            .ok_or(MinutiaeError::IndexOutOfRange { index, len })
    }

    fn check_position(&self, x: i64, y: i64) -> MinutiaeResult<(u16, u16)> {
        if let Some(dims) = self.image {
            dims.check(x, y)?;
        }
        match (u16::try_from(x), u16::try_from(y)) {
            (Ok(px), Ok(py)) => Ok((px, py)),
            _ => Err(MinutiaeError::OutOfBounds {
                x,
                y,
                width: UNBOUNDED_EXTENT,
                height: UNBOUNDED_EXTENT,
            }),
        }
    }

    fn check_minutia(&self, minutia: &Minutia) -> MinutiaeResult<()> {
        self.check_position(i64::from(minutia.x), i64::from(minutia.y))?;
        minutia.validate()
    }
}
