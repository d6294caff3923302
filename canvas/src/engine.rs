use crate::camera::{Camera, Point};
use crate::config::{ConfigError, SnapSettings};
use crate::consts::{NEW_RECT_CELLS_HIGH, NEW_RECT_CELLS_WIDE};
use crate::doc::{DocStore, ObjectId, PlacedObject};
use crate::fit::{AspectAdjust, FitAnchor, ImageFrame, ObjectFit, aspect_corrected};
use crate::grid::{ceil_to_cells, snap_grid};
use crate::input::{InputState, Key, Modifiers, TransformEvent, UiState};
use crate::paste::{PasteMode, SelectionShim, compute_paste_position, group_relative};
use crate::snap;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from event handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ObjectCreated(PlacedObject),
    ObjectUpdated(PlacedObject),
    ObjectDeleted { id: ObjectId },
    RenderNeeded,
}

/// Grid placement engine state.
///
/// Owns the scene store and hands the current [`SnapSettings`] to each snap
/// handler by value, so a settings change never lands mid-correction.
pub struct EngineCore {
    pub doc: DocStore,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    settings: SnapSettings,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            doc: DocStore::new(),
            camera: Camera::default(),
            ui: UiState::default(),
            input: InputState::default(),
            settings: SnapSettings::default(),
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with validated settings.
    pub fn with_settings(settings: SnapSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self { settings, ..Self::default() })
    }

    // --- Settings ---

    /// The settings the next handler invocation will see.
    #[must_use]
    pub fn settings(&self) -> SnapSettings {
        self.settings
    }

    /// Replace the settings. Invalid settings are rejected and the old ones kept.
    pub fn set_settings(&mut self, settings: SnapSettings) -> Result<(), ConfigError> {
        settings.validate()?;
        tracing::debug!(?settings, "snap settings replaced");
        self.settings = settings;
        Ok(())
    }

    // --- Transform events ---

    /// An object is being resized by `event.corner`; snap its dragged edges.
    pub fn on_scaling(&mut self, event: TransformEvent) -> Vec<Action> {
        let settings = self.settings;
        let Some(obj) = self.doc.get_mut(&event.target) else {
            return Vec::new();
        };
        self.input = InputState::Scaling { id: event.target, corner: event.corner };
        if snap::correct_scaling(obj, event.corner, &settings) {
            vec![Action::ObjectUpdated(obj.clone()), Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// An object moved by a drag delta; snap it now unless snapping is deferred.
    pub fn on_moving(&mut self, target: ObjectId) -> Vec<Action> {
        let settings = self.settings;
        let Some(obj) = self.doc.get_mut(&target) else {
            return Vec::new();
        };
        self.input = InputState::Moving { id: target };
        if snap::on_moving(obj, &settings) {
            vec![Action::ObjectUpdated(obj.clone()), Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// The gesture on `target` was released; apply any deferred snap.
    pub fn on_modified(&mut self, target: ObjectId) -> Vec<Action> {
        let settings = self.settings;
        if self.input.target() == Some(target) {
            if let Some(corner) = self.input.active_corner() {
                tracing::debug!(id = %target, %corner, "resize gesture ended");
            }
            self.input = InputState::Idle;
        }
        let Some(obj) = self.doc.get_mut(&target) else {
            return Vec::new();
        };
        if snap::on_modified(obj, &settings) {
            vec![Action::ObjectUpdated(obj.clone()), Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    // --- Object lifecycle ---

    /// Spawn a default-sized rectangle at the grid point nearest the screen
    /// position `at` and select it.
    pub fn add_rect(&mut self, at: Point) -> Vec<Action> {
        let g = self.settings.granularity;
        let at = self.camera.screen_to_world(at);
        let obj = PlacedObject::rect(
            snap_grid(at.x, g),
            snap_grid(at.y, g),
            NEW_RECT_CELLS_WIDE * g,
            NEW_RECT_CELLS_HIGH * g,
        );
        self.spawn(obj)
    }

    /// Spawn an image frame sized to whole cells around the picture and select it.
    pub fn add_image(&mut self, at: Point, natural_width: f64, natural_height: f64, fit: ObjectFit) -> Vec<Action> {
        let g = self.settings.granularity;
        let at = self.camera.screen_to_world(at);
        let obj = PlacedObject::image(
            snap_grid(at.x, g),
            snap_grid(at.y, g),
            ceil_to_cells(natural_width, g),
            ceil_to_cells(natural_height, g),
            ImageFrame::new(natural_width, natural_height, fit),
        );
        self.spawn(obj)
    }

    fn spawn(&mut self, mut obj: PlacedObject) -> Vec<Action> {
        obj.z_index = self.doc.next_z();
        tracing::debug!(id = %obj.id, kind = ?obj.kind, left = obj.left, top = obj.top, "object added");
        self.ui.selection = vec![obj.id];
        self.doc.insert(obj.clone());
        vec![Action::ObjectCreated(obj), Action::RenderNeeded]
    }

    /// Clone the selection one grid cell away in the configured paste direction.
    ///
    /// The clones replace the selection.
    pub fn duplicate_selection(&mut self) -> Vec<Action> {
        let g = self.settings.granularity;
        let direction = self.settings.paste_direction;
        let sources: Vec<PlacedObject> = self.ui.selection.iter().filter_map(|id| self.doc.get(id)).cloned().collect();

        let placed: Vec<(PlacedObject, Point)> = match sources.as_slice() {
            [] => return Vec::new(),
            [single] => {
                let shim = SelectionShim::of(single);
                let pos = compute_paste_position(direction, &shim, Point::new(single.left, single.top), g, PasteMode::Single);
                vec![(single.clone(), pos)]
            }
            many => {
                let Some(shim) = SelectionShim::bounding(many.iter().map(PlacedObject::bounding_box)) else {
                    return Vec::new();
                };
                many.iter()
                    .map(|src| {
                        let rel = group_relative(Point::new(src.left, src.top), &shim);
                        (src.clone(), compute_paste_position(direction, &shim, rel, g, PasteMode::Selection))
                    })
                    .collect()
            }
        };

        let mut z = self.doc.next_z();
        let mut actions = Vec::with_capacity(placed.len() + 1);
        let mut new_selection = Vec::with_capacity(placed.len());
        for (src, pos) in placed {
            let mut copy = src.duplicate();
            copy.left = snap_grid(pos.x, g);
            copy.top = snap_grid(pos.y, g);
            copy.z_index = z;
            z += 1;
            new_selection.push(copy.id);
            self.doc.insert(copy.clone());
            actions.push(Action::ObjectCreated(copy));
        }
        tracing::debug!(count = new_selection.len(), %direction, "selection duplicated");
        self.ui.selection = new_selection;
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Remove every selected object and clear the selection.
    pub fn delete_selection(&mut self) -> Vec<Action> {
        let mut actions: Vec<Action> = std::mem::take(&mut self.ui.selection)
            .into_iter()
            .filter_map(|id| self.doc.remove(&id))
            .map(|obj| Action::ObjectDeleted { id: obj.id })
            .collect();
        if actions.is_empty() {
            return actions;
        }
        if let Some(target) = self.input.target()
            && self.doc.get(&target).is_none()
        {
            self.input = InputState::Idle;
        }
        tracing::debug!(count = actions.len(), "selection deleted");
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Image frames ---

    /// Move the picture inside an image frame to a new anchor.
    pub fn set_fit_anchor(&mut self, id: &ObjectId, anchor: FitAnchor) -> Vec<Action> {
        self.update_image(id, |frame| frame.anchor = anchor)
    }

    /// Nudge the picture inside an image frame by a free offset, applied after anchoring.
    pub fn set_fit_offset(&mut self, id: &ObjectId, offset: Point) -> Vec<Action> {
        self.update_image(id, |frame| frame.offset = offset)
    }

    /// Switch an image frame between contain and cover.
    pub fn set_object_fit(&mut self, id: &ObjectId, fit: ObjectFit) -> Vec<Action> {
        self.update_image(id, |frame| frame.fit = fit)
    }

    fn update_image<F>(&mut self, id: &ObjectId, edit: F) -> Vec<Action>
    where
        F: FnOnce(&mut ImageFrame),
    {
        let Some(obj) = self.doc.get_mut(id) else {
            return Vec::new();
        };
        let Some(frame) = obj.image.as_mut() else {
            return Vec::new();
        };
        edit(frame);
        vec![Action::ObjectUpdated(obj.clone()), Action::RenderNeeded]
    }

    /// Resize one side of an image frame to match the picture's aspect ratio.
    pub fn scale_to_aspect_ratio(&mut self, id: &ObjectId, adjust: AspectAdjust) -> Vec<Action> {
        let Some(obj) = self.doc.get_mut(id) else {
            return Vec::new();
        };
        let Some(frame) = obj.image else {
            return Vec::new();
        };
        let (width, height) = aspect_corrected(obj.width, obj.height, frame.natural_width, frame.natural_height, adjust);
        obj.width = width;
        obj.height = height;
        vec![Action::ObjectUpdated(obj.clone()), Action::RenderNeeded]
    }

    // --- Selection / keys ---

    /// Replace the selection, dropping ids that are not in the store.
    pub fn select(&mut self, ids: &[ObjectId]) {
        self.ui.selection = ids.iter().copied().filter(|id| self.doc.get(id).is_some()).collect();
    }

    /// Hotkeys: Delete/Backspace removes the selection, Ctrl/Cmd+D duplicates it.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        match key.0.as_str() {
            "Delete" | "Backspace" => self.delete_selection(),
            "d" | "D" if modifiers.command() => self.duplicate_selection(),
            _ => Vec::new(),
        }
    }

    // --- Viewport ---

    /// Pan the view by a screen-space delta.
    pub fn pan(&mut self, dx: f64, dy: f64) -> Vec<Action> {
        self.camera.pan_by(dx, dy);
        vec![Action::RenderNeeded]
    }

    /// Return the view to the origin.
    pub fn reset_view(&mut self) -> Vec<Action> {
        self.camera.reset();
        vec![Action::RenderNeeded]
    }

    // --- Queries ---

    /// The currently selected objects.
    #[must_use]
    pub fn selection(&self) -> &[ObjectId] {
        &self.ui.selection
    }

    /// Look up an object by ID.
    #[must_use]
    pub fn object(&self, id: &ObjectId) -> Option<&PlacedObject> {
        self.doc.get(id)
    }
}
