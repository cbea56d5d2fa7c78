use crate::bounds::BoundingBox;
use crate::camera::Camera;
use crate::catalog::{find_model, ModelDescriptor};
use crate::controls::{ControlState, GestureSurface, InteractionController, OrbitController};
use crate::error::{LoadError, SessionError};
use crate::framer::{ModelFramer, NormalizedPlacement};
use crate::gestures::GestureFrame;
use glam::Mat4;

#[derive(Clone, Debug)]
pub struct LoadedAsset<S> {
    pub root: S,
    pub bounds: BoundingBox,
}

impl<S> LoadedAsset<S> {
    pub fn new(root: S, bounds: BoundingBox) -> Self {
        Self { root, bounds }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionMode {
    #[default]
    Idle,
    Interacting,
}

impl InteractionMode {
    pub fn is_interacting(self) -> bool {
        self == InteractionMode::Interacting
    }
}

/// Identifies the selection a pending load belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    index: usize,
}

impl LoadTicket {
    pub fn index(&self) -> usize {
        self.index
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LoadOutcome {
    Applied(NormalizedPlacement),
    Stale,
    /// Previous asset and selection stay in place.
    Failed,
}

pub struct ViewerSession<S> {
    catalog: Vec<ModelDescriptor>,
    selected: Option<usize>,
    generation: u64,
    asset: Option<LoadedAsset<S>>,
    displayed: Option<usize>,
    asset_revision: u64,
    placement: NormalizedPlacement,
    framer: ModelFramer,
    camera: Camera,
    controller: OrbitController,
    mode: InteractionMode,
}

impl<S> ViewerSession<S> {
    pub fn new(catalog: Vec<ModelDescriptor>, framer: ModelFramer, aspect: f32) -> Self {
        let mut camera = Camera::perspective(aspect);
        let mut controller = OrbitController::new();
        framer.frame_camera(&mut camera);
        framer.configure_controls(&mut controller);
        Self {
            catalog,
            selected: None,
            generation: 0,
            asset: None,
            displayed: None,
            asset_revision: 0,
            placement: NormalizedPlacement::IDENTITY,
            framer,
            camera,
            controller,
            mode: InteractionMode::Idle,
        }
    }

    pub fn catalog(&self) -> &[ModelDescriptor] {
        &self.catalog
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&ModelDescriptor> {
        self.selected.and_then(|i| self.catalog.get(i))
    }

    /// Loads still in flight for an earlier selection become stale.
    pub fn select_model(
        &mut self,
        index: usize,
        surface: &mut dyn GestureSurface,
    ) -> Result<LoadTicket, SessionError> {
        let descriptor = self
            .catalog
            .get(index)
            .ok_or(SessionError::UnknownIndex(index))?;
        log::info!("[session] select {} ({})", descriptor.name, descriptor.source_path);
        self.generation += 1;
        self.selected = Some(index);
        self.force_idle(surface);
        Ok(LoadTicket {
            generation: self.generation,
            index,
        })
    }

    pub fn select_by_name(
        &mut self,
        name: &str,
        surface: &mut dyn GestureSurface,
    ) -> Result<LoadTicket, SessionError> {
        let index = find_model(&self.catalog, name)
            .ok_or_else(|| SessionError::UnknownName(name.to_string()))?;
        self.select_model(index, surface)
    }

    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation && Some(ticket.index) == self.selected
    }

    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<LoadedAsset<S>, LoadError>,
        surface: &mut dyn GestureSurface,
    ) -> LoadOutcome {
        if !self.is_current(&ticket) {
            let name = self.catalog.get(ticket.index).map_or("?", |m| m.name);
            log::info!("[session] dropping stale load of {}", name);
            return LoadOutcome::Stale;
        }
        let asset = match result {
            Ok(asset) => asset,
            Err(e) => {
                let name = self.catalog.get(ticket.index).map_or("?", |m| m.name);
                log::error!("[session] error loading model {}: {}", name, e);
                self.selected = self.displayed;
                return LoadOutcome::Failed;
            }
        };

        let (placement, state) =
            self.framer
                .frame_asset(&asset.bounds, &mut self.camera, &mut self.controller);
        self.placement = placement;
        self.asset = Some(asset);
        self.displayed = Some(ticket.index);
        self.asset_revision += 1;
        self.mode = InteractionMode::Idle;
        surface.set_gesture_capture(false);
        log::info!(
            "[session] applied placement scale={:.4} translation=({:.3},{:.3},{:.3}) distance={:?}",
            placement.scale,
            placement.translation.x,
            placement.translation.y,
            placement.translation.z,
            state.distance_bounds
        );
        LoadOutcome::Applied(placement)
    }

    pub fn toggle_interaction(&mut self, surface: &mut dyn GestureSurface) -> InteractionMode {
        self.mode = match self.mode {
            InteractionMode::Idle => InteractionMode::Interacting,
            InteractionMode::Interacting => InteractionMode::Idle,
        };
        let on = self.mode.is_interacting();
        self.controller.set_enabled(on);
        surface.set_gesture_capture(on);
        log::info!("[session] interaction={:?}", self.mode);
        self.mode
    }

    fn force_idle(&mut self, surface: &mut dyn GestureSurface) {
        self.mode = InteractionMode::Idle;
        self.framer.configure_controls(&mut self.controller);
        surface.set_gesture_capture(false);
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn apply_gesture(&mut self, gesture: &GestureFrame, viewport_h: f32) {
        if !self.mode.is_interacting() || gesture.is_empty() {
            return;
        }
        self.controller
            .apply_gesture(gesture, viewport_h, &self.camera);
    }

    /// Returns whether the camera moved.
    pub fn tick(&mut self, dt_sec: f32) -> bool {
        self.controller.update(&mut self.camera, dt_sec)
    }

    pub fn reset_view(&mut self) {
        self.framer.frame_camera(&mut self.camera);
        self.controller.reset();
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.set_aspect(aspect);
    }

    pub fn asset(&self) -> Option<&LoadedAsset<S>> {
        self.asset.as_ref()
    }

    /// Catalog index of the asset on screen.
    pub fn displayed_index(&self) -> Option<usize> {
        self.displayed
    }

    pub fn asset_revision(&self) -> u64 {
        self.asset_revision
    }

    pub fn placement(&self) -> NormalizedPlacement {
        self.placement
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.placement.matrix()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn controller(&self) -> &OrbitController {
        &self.controller
    }

    pub fn control_state(&self) -> ControlState {
        self.controller.control_state()
    }

    pub fn framer(&self) -> &ModelFramer {
        &self.framer
    }
}
