use std::time::Duration;

use tracing::debug;

use crate::error::StageResult;
use crate::interaction::{
    EventHandler, EventKind, InteractionManager, NativeInput, TargetElement,
};
use crate::math::Point;
use crate::render::{Canvas2d, CanvasRenderer, RenderPass};
use crate::scene::{NodeId, Scene};

use super::StageConfig;

/// Scene, renderer and interaction manager wired to one canvas.
///
/// The scene's root node is the stage; everything added under it is drawn
/// by [`Stage::render`] and receives input from [`Stage::handle_input`].
#[derive(Debug)]
pub struct Stage<C: Canvas2d> {
    config: StageConfig,
    scene: Scene,
    renderer: CanvasRenderer<C>,
    interaction: InteractionManager,
}

impl<C: Canvas2d> Stage<C> {
    /// Validates `config` and sizes `canvas` to the viewport.
    pub fn new(canvas: C, config: StageConfig) -> StageResult<Self> {
        config.validate()?;
        let mut renderer = CanvasRenderer::new(canvas, config.renderer_options())?;
        renderer.resize(config.viewport.width, config.viewport.height)?;

        let mut interaction = InteractionManager::new(config.interaction.clone())?;
        interaction.set_view(
            renderer.canvas().width(),
            renderer.canvas().height(),
            config.resolution,
        );

        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            resolution = config.resolution,
            "stage created"
        );
        Ok(Self {
            config,
            scene: Scene::new(),
            renderer,
            interaction,
        })
    }

    #[must_use]
    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.scene.root()
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    #[must_use]
    pub fn renderer(&self) -> &CanvasRenderer<C> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut CanvasRenderer<C> {
        &mut self.renderer
    }

    #[must_use]
    pub fn interaction(&self) -> &InteractionManager {
        &self.interaction
    }

    pub fn interaction_mut(&mut self) -> &mut InteractionManager {
        &mut self.interaction
    }

    /// Registers a stage-level listener.
    pub fn on(&mut self, kind: EventKind, handler: EventHandler) {
        self.interaction.on(kind, handler);
    }

    pub fn set_target_element(&mut self, element: Option<TargetElement>) {
        self.interaction.set_target_element(element);
    }

    pub fn render(&mut self) -> StageResult<()> {
        let root = self.scene.root();
        self.renderer.render(&mut self.scene, root)
    }

    pub fn render_with(&mut self, pass: RenderPass) -> StageResult<()> {
        let root = self.scene.root();
        self.renderer.render_with(&mut self.scene, root, pass)
    }

    /// Resizes the logical viewport and the backing canvas.
    pub fn resize(&mut self, width: u32, height: u32) -> StageResult<()> {
        self.renderer.resize(width, height)?;
        self.config.viewport.width = width;
        self.config.viewport.height = height;
        self.interaction.set_view(
            self.renderer.canvas().width(),
            self.renderer.canvas().height(),
            self.renderer.resolution(),
        );
        Ok(())
    }

    /// Refreshes world transforms, then dispatches `input`.
    pub fn handle_input(&mut self, input: &NativeInput, now: Duration) -> StageResult<()> {
        let root = self.scene.root();
        self.scene.update_transform(root)?;
        self.interaction
            .handle_input(&mut self.scene, root, input, now)
    }

    /// Advances host time for wheel gesture tracking.
    pub fn tick(&mut self, now: Duration) -> bool {
        self.interaction.tick(now)
    }

    /// Topmost interactive node under the stage point.
    pub fn hit_test(&mut self, point: Point) -> StageResult<Option<NodeId>> {
        let root = self.scene.root();
        self.scene.update_transform(root)?;
        Ok(self.interaction.hit_test(&self.scene, point, root))
    }

    #[must_use]
    pub fn into_parts(self) -> (Scene, CanvasRenderer<C>, InteractionManager) {
        (self.scene, self.renderer, self.interaction)
    }
}
