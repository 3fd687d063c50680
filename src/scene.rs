use crate::{
    camera::Camera,
    config::RenderSettings,
    error::{Error, Result},
    mesh::Mesh,
    renderer::RenderSystem,
    shading::RenderMode,
};
use vek::Vec3;

/// The set of meshes being rendered, grouped into scenes that can be switched between.
///
/// A mesh may belong to any number of scenes. Only the meshes of the current scene are updated and rendered.
#[derive(Debug)]
pub struct SceneGraph {
    meshes: Vec<Mesh>,
    scenes: Vec<Vec<usize>>,
    current: usize,
    camera: Camera,
    settings: RenderSettings,
}

impl SceneGraph {
    pub fn new(mut camera: Camera, settings: RenderSettings) -> Self {
        camera.set_convention(settings.render_system.convention());
        Self {
            meshes: Vec::new(),
            scenes: Vec::new(),
            current: 0,
            camera,
            settings,
        }
    }

    /// Create a scene graph whose camera sits at `origin` and is configured from `settings`.
    pub fn from_settings(origin: Vec3<f32>, settings: RenderSettings) -> Self {
        let camera = Camera::new(origin, [settings.width, settings.height], settings.fov_degrees)
            .with_planes(settings.near, settings.far);
        Self::new(camera, settings)
    }

    /// Add a new, empty scene, returning its index.
    pub fn add_scene(&mut self) -> usize {
        self.scenes.push(Vec::new());
        self.scenes.len() - 1
    }

    /// Add a mesh to the given scene, returning the mesh's index.
    pub fn add_mesh(&mut self, mesh: Mesh, scene: usize) -> Result<usize> {
        let count = self.scenes.len();
        let scene_meshes = self
            .scenes
            .get_mut(scene)
            .ok_or(Error::UnknownScene { scene, count })?;
        let index = self.meshes.len();
        self.meshes.push(mesh);
        scene_meshes.push(index);
        Ok(index)
    }

    /// Add an already-added mesh to another scene.
    pub fn share_mesh(&mut self, mesh: usize, scene: usize) -> Result<()> {
        let count = self.scenes.len();
        if mesh >= self.meshes.len() {
            return Err(Error::UnknownMesh {
                mesh,
                count: self.meshes.len(),
            });
        }
        self.scenes
            .get_mut(scene)
            .ok_or(Error::UnknownScene { scene, count })?
            .push(mesh);
        Ok(())
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    pub fn current_scene(&self) -> usize {
        self.current
    }

    /// The meshes of the current scene, in the order they were added.
    pub fn current_meshes(&self) -> impl Iterator<Item = &Mesh> + '_ {
        let meshes = &self.meshes;
        self.scenes
            .get(self.current)
            .into_iter()
            .flatten()
            .map(move |&i| &meshes[i])
    }

    pub fn next_scene(&mut self) {
        if !self.scenes.is_empty() {
            self.current = (self.current + 1) % self.scenes.len();
            log::info!("Scene {} / {}", self.current + 1, self.scenes.len());
        }
    }

    pub fn previous_scene(&mut self) {
        if !self.scenes.is_empty() {
            self.current = self.current.checked_sub(1).unwrap_or(self.scenes.len() - 1);
            log::info!("Scene {} / {}", self.current + 1, self.scenes.len());
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Change the output resolution of the camera.
    pub fn set_resolution(&mut self, width: usize, height: usize) {
        self.settings.width = width;
        self.settings.height = height;
        self.camera.set_resolution(width, height);
    }

    /// Advance the meshes of the current scene by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        let speed = if self.settings.rotate_objects {
            self.settings.rotation_speed
        } else {
            0.0
        };
        let meshes = &mut self.meshes;
        if let Some(scene) = self.scenes.get(self.current) {
            for &i in scene {
                meshes[i].update(dt, speed);
            }
        }
    }

    /// Run the camera transform over every mesh of the current scene.
    pub fn transform_current_scene(&mut self) {
        let transform = self.camera.screen_transform();
        let meshes = &mut self.meshes;
        if let Some(scene) = self.scenes.get(self.current) {
            for &i in scene {
                meshes[i].update_screen_space(&transform);
            }
        }
    }

    /// Switch to the next render mode. Only the software path has render modes, so this does nothing while the
    /// hardware system is active.
    pub fn cycle_render_mode(&mut self) -> RenderMode {
        if self.settings.render_system == RenderSystem::Hardware {
            log::info!("Render mode cannot be changed while the hardware system is active");
        } else {
            self.settings.render_mode = self.settings.render_mode.next();
            log::info!("Render mode changed to {:?}", self.settings.render_mode);
        }
        self.settings.render_mode
    }

    pub fn toggle_rotation(&mut self) -> bool {
        self.settings.rotate_objects = !self.settings.rotate_objects;
        log::info!("Object rotation {}", if self.settings.rotate_objects { "on" } else { "off" });
        self.settings.rotate_objects
    }

    /// Switch between the software and hardware systems, moving the camera to the new system's coordinate
    /// convention.
    pub fn toggle_render_system(&mut self) -> RenderSystem {
        self.settings.render_system = self.settings.render_system.next();
        self.camera.set_convention(self.settings.render_system.convention());
        log::info!("Render system changed to {:?}", self.settings.render_system);
        self.settings.render_system
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{convention::CoordinateConvention, material::MaterialId, vertex::VertexInput};
    use vek::Vec2;

    fn triangle() -> Mesh {
        let vertices = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]
            .iter()
            .map(|&[x, y]| VertexInput::new(Vec3::new(x, y, 0.0), Vec2::zero(), Vec3::unit_z()))
            .collect();
        Mesh::new(vertices, vec![0, 1, 2], MaterialId(0)).unwrap()
    }

    fn graph() -> SceneGraph {
        SceneGraph::from_settings(Vec3::new(0.0, 0.0, 5.0), RenderSettings::default())
    }

    #[test]
    fn meshes_need_a_scene() {
        let mut g = graph();
        assert!(matches!(g.add_mesh(triangle(), 0), Err(Error::UnknownScene { scene: 0, count: 0 })));
        let s = g.add_scene();
        assert_eq!(g.add_mesh(triangle(), s).unwrap(), 0);
        assert_eq!(g.current_meshes().count(), 1);
    }

    #[test]
    fn scene_switching_wraps() {
        let mut g = graph();
        let a = g.add_scene();
        let b = g.add_scene();
        g.add_mesh(triangle(), a).unwrap();
        let shared = g.add_mesh(triangle(), b).unwrap();
        g.share_mesh(shared, a).unwrap();

        assert_eq!(g.current_meshes().count(), 2);
        g.next_scene();
        assert_eq!(g.current_scene(), b);
        assert_eq!(g.current_meshes().count(), 1);
        g.next_scene();
        assert_eq!(g.current_scene(), a);
        g.previous_scene();
        assert_eq!(g.current_scene(), b);
    }

    #[test]
    fn update_rotates_only_current_scene_when_enabled() {
        let mut g = graph();
        let a = g.add_scene();
        let b = g.add_scene();
        let in_a = g.add_mesh(triangle(), a).unwrap();
        let in_b = g.add_mesh(triangle(), b).unwrap();

        g.update(1.0);
        assert!((g.meshes()[in_a].rotation() - 0.5).abs() < 1e-6);
        assert_eq!(g.meshes()[in_b].rotation(), 0.0);

        assert!(!g.toggle_rotation());
        g.update(1.0);
        assert!((g.meshes()[in_a].rotation() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn render_system_toggle_switches_convention() {
        let mut g = graph();
        assert_eq!(g.camera().convention(), &CoordinateConvention::SOFTWARE);
        assert_eq!(g.cycle_render_mode(), RenderMode::Depth);

        assert_eq!(g.toggle_render_system(), RenderSystem::Hardware);
        assert_eq!(g.camera().convention(), &CoordinateConvention::DIRECTX);
        // Render modes are frozen on the hardware path
        assert_eq!(g.cycle_render_mode(), RenderMode::Depth);
    }

    #[test]
    fn transform_fills_screen_space_vertices() {
        let mut g = graph();
        let s = g.add_scene();
        g.add_mesh(triangle(), s).unwrap();
        g.transform_current_scene();
        assert_eq!(g.current_meshes().next().unwrap().screen_space_vertices().len(), 3);
    }
}
