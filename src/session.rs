use tracing::{debug, info, warn};

use crate::config::ShadingMode;
use crate::error::{Result, SceneError};
use crate::ingestion::{self, ModelSource};
use crate::render::{RendererBackend, SceneView};
use crate::scene::{
    AddLight, Axis, Channel, Light, LightField, LightSet, ModelRegistry, SceneStore,
};

/// Translation slider units per scene unit.
pub const TRANSLATION_STEP: f32 = 0.01;
/// Full scale of the light colour sliders.
pub const COLOR_SLIDER_MAX: f32 = 255.0;

/// One user action, carrying its target and the raw widget value.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    PlaceModel { model: usize },
    SelectShading(ShadingMode),
    AddLight,
    /// `slider` is in hundredths of a scene unit.
    SetTranslation { key: String, axis: Axis, slider: f32 },
    SetRotation { key: String, axis: Axis, degrees: f32 },
    /// Uniform scale on all three axes.
    SetScale { key: String, value: f32 },
    SetDiffuse { key: String, part: usize, channel: Channel, value: f32 },
    SetShininess { key: String, part: usize, value: f32 },
    SetLightPosition { light: usize, axis: Axis, value: f32 },
    /// `slider` is in [0, 255].
    SetLightColor { light: usize, channel: Channel, slider: f32 },
    SetLightIntensity { light: usize, value: f32 },
    ImportScene { text: String },
}

impl Command {
    /// The scalar a slider command carries.
    fn value(&self) -> Option<f32> {
        match self {
            Command::SetTranslation { slider, .. } | Command::SetLightColor { slider, .. } => {
                Some(*slider)
            }
            Command::SetRotation { degrees, .. } => Some(*degrees),
            Command::SetScale { value, .. }
            | Command::SetDiffuse { value, .. }
            | Command::SetShininess { value, .. }
            | Command::SetLightPosition { value, .. }
            | Command::SetLightIntensity { value, .. } => Some(*value),
            Command::PlaceModel { .. }
            | Command::SelectShading(_)
            | Command::AddLight
            | Command::ImportScene { .. } => None,
        }
    }

    /// Whether a successful dispatch changes the exported scene text.
    fn touches_instances(&self) -> bool {
        matches!(
            self,
            Command::PlaceModel { .. }
                | Command::SetTranslation { .. }
                | Command::SetRotation { .. }
                | Command::SetScale { .. }
                | Command::SetDiffuse { .. }
                | Command::SetShininess { .. }
                | Command::ImportScene { .. }
        )
    }
}

/// What a dispatched command did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Placed(String),
    ShadingSelected(ShadingMode),
    LightAdded(usize),
    /// The light cap was reached; nothing changed.
    LightRejected,
    InstanceUpdated(String),
    LightUpdated(usize),
    Imported(usize),
}

/// Result of [`Session::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub outcome: Outcome,
    /// Fresh scene export after commands that change instances.
    pub scene_json: Option<String>,
}

/// All mutable viewer state for one session.
#[derive(Debug)]
pub struct Session {
    registry: ModelRegistry,
    lights: LightSet,
    store: SceneStore,
    shading: ShadingMode,
    focus: Option<usize>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Empty session with one default light.
    pub fn new() -> Self {
        let mut lights = LightSet::new();
        lights.add(Light::default());
        Self {
            registry: ModelRegistry::new(),
            lights,
            store: SceneStore::new(),
            shading: ShadingMode::default(),
            focus: None,
        }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn lights(&self) -> &LightSet {
        &self.lights
    }

    pub fn store(&self) -> &SceneStore {
        &self.store
    }

    pub fn shading(&self) -> ShadingMode {
        self.shading
    }

    /// Model shown in the focus viewport: the last one loaded successfully.
    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    /// Load and register a model. On success it also takes the focus.
    pub fn load_model(
        &mut self,
        source: &dyn ModelSource,
        backend: &mut dyn RendererBackend,
        name: &str,
        path: &str,
    ) -> Result<usize> {
        let loaded = ingestion::load_model(source, backend, name, path)?;
        let index = self.registry.register(loaded);
        self.focus = Some(index);
        Ok(index)
    }

    /// Apply one command through the owning component's update contract.
    ///
    /// Non-finite slider values are rejected before anything changes.
    pub fn dispatch(&mut self, command: Command) -> Result<Dispatch> {
        debug!(?command, "Dispatching");
        if let Some(value) = command.value().filter(|v| !v.is_finite()) {
            return Err(SceneError::InvalidValue(format!("{value} in {command:?}")));
        }
        let touches_instances = command.touches_instances();

        let outcome = match command {
            Command::PlaceModel { model } => {
                Outcome::Placed(self.store.place(&mut self.registry, model)?)
            }
            Command::SelectShading(mode) => {
                self.shading = mode;
                info!(%mode, "Shading mode selected");
                Outcome::ShadingSelected(mode)
            }
            Command::AddLight => match self.lights.add(Light::default()) {
                AddLight::Added(index) => Outcome::LightAdded(index),
                AddLight::Rejected => {
                    warn!("{}", SceneError::LightCapExceeded);
                    Outcome::LightRejected
                }
            },
            Command::SetTranslation { key, axis, slider } => {
                self.store.update(&key, |inst| {
                    inst.translation[axis.index()] = slider * TRANSLATION_STEP;
                })?;
                Outcome::InstanceUpdated(key)
            }
            Command::SetRotation { key, axis, degrees } => {
                self.store.update(&key, |inst| {
                    inst.rotation[axis.index()] = degrees.to_radians();
                })?;
                Outcome::InstanceUpdated(key)
            }
            Command::SetScale { key, value } => {
                self.store.update(&key, |inst| inst.scale = [value; 3])?;
                Outcome::InstanceUpdated(key)
            }
            Command::SetDiffuse {
                key,
                part,
                channel,
                value,
            } => {
                self.store
                    .update(&key, |inst| {
                        inst.materials
                            .get_mut(part)
                            .map(|m| m.diffuse[channel.index()] = value)
                    })?
                    .ok_or_else(|| SceneError::NotFound(format!("part {part} of {key}")))?;
                Outcome::InstanceUpdated(key)
            }
            Command::SetShininess { key, part, value } => {
                self.store
                    .update(&key, |inst| {
                        inst.materials.get_mut(part).map(|m| m.shininess = value)
                    })?
                    .ok_or_else(|| SceneError::NotFound(format!("part {part} of {key}")))?;
                Outcome::InstanceUpdated(key)
            }
            Command::SetLightPosition { light, axis, value } => {
                self.lights
                    .update(light, LightField::Position(axis), value)?;
                Outcome::LightUpdated(light)
            }
            Command::SetLightColor {
                light,
                channel,
                slider,
            } => {
                self.lights
                    .update(light, LightField::Color(channel), slider / COLOR_SLIDER_MAX)?;
                Outcome::LightUpdated(light)
            }
            Command::SetLightIntensity { light, value } => {
                self.lights.update(light, LightField::Intensity, value)?;
                Outcome::LightUpdated(light)
            }
            Command::ImportScene { text } => {
                Outcome::Imported(self.store.import_state(&mut self.registry, &text)?)
            }
        };

        let scene_json = if touches_instances {
            Some(self.store.export_state()?)
        } else {
            None
        };
        Ok(Dispatch {
            outcome,
            scene_json,
        })
    }

    pub fn export_scene(&self) -> Result<String> {
        self.store.export_state()
    }

    /// Borrow everything a frame reads.
    pub fn view(&self) -> SceneView<'_> {
        SceneView {
            registry: &self.registry,
            store: &self.store,
            lights: &self.lights,
            shading: self.shading,
            focus: self.focus,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::ingestion::MemorySource;
    use crate::render::RecordingBackend;
    use crate::scene::MAX_LIGHTS;

    const TRI_OBJ: &str = "mtllib tri.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl m\nf 1 2 3\n";
    const TRI_MTL: &str = "newmtl m\nKd 0.2 0.4 0.6\n";

    fn source() -> MemorySource {
        MemorySource::new()
            .with_file("tri.obj", TRI_OBJ)
            .with_file("tri.mtl", TRI_MTL)
    }

    fn session_with_model() -> (Session, RecordingBackend) {
        let mut backend = RecordingBackend::new();
        let mut session = Session::new();
        session
            .load_model(&source(), &mut backend, "Tri", "tri.obj")
            .unwrap();
        (session, backend)
    }

    fn place(session: &mut Session) -> String {
        match session.dispatch(Command::PlaceModel { model: 0 }).unwrap().outcome {
            Outcome::Placed(key) => key,
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn new_session_has_one_light() {
        let session = Session::new();
        assert_eq!(session.lights().len(), 1);
        assert_eq!(session.shading(), ShadingMode::Phong);
        assert!(session.focus().is_none());
        assert!(session.store().is_empty());
    }

    #[test]
    fn last_successful_load_takes_focus() {
        let (mut session, mut backend) = session_with_model();
        assert_eq!(session.focus(), Some(0));

        session
            .load_model(&source(), &mut backend, "Tri", "tri.obj")
            .unwrap();
        assert_eq!(session.focus(), Some(1));

        assert!(
            session
                .load_model(&source(), &mut backend, "Gone", "gone.obj")
                .is_err()
        );
        assert_eq!(session.focus(), Some(1));
        assert_eq!(session.registry().len(), 2);
    }

    #[test]
    fn place_returns_key_and_export() {
        let (mut session, _backend) = session_with_model();
        let result = session.dispatch(Command::PlaceModel { model: 0 }).unwrap();
        assert_eq!(result.outcome, Outcome::Placed("Tri1".into()));
        let json = result.scene_json.unwrap();
        assert!(json.contains("\"Tri1\""));
        assert_eq!(session.registry().get(0).unwrap().instances(), 1);
    }

    #[test]
    fn place_unknown_model_fails() {
        let mut session = Session::new();
        let err = session
            .dispatch(Command::PlaceModel { model: 3 })
            .unwrap_err();
        assert!(matches!(err, SceneError::NotFound(_)));
    }

    #[test]
    fn slider_units_are_converted() {
        let (mut session, _backend) = session_with_model();
        let key = place(&mut session);

        session
            .dispatch(Command::SetTranslation {
                key: key.clone(),
                axis: Axis::Y,
                slider: 150.0,
            })
            .unwrap();
        session
            .dispatch(Command::SetRotation {
                key: key.clone(),
                axis: Axis::Z,
                degrees: 90.0,
            })
            .unwrap();
        session
            .dispatch(Command::SetScale {
                key: key.clone(),
                value: 2.5,
            })
            .unwrap();

        let inst = session.store().get(&key).unwrap();
        assert_abs_diff_eq!(inst.translation[1], 1.5, epsilon = 1e-6);
        assert_abs_diff_eq!(inst.rotation[2], std::f32::consts::FRAC_PI_2, epsilon = 1e-6);
        assert_eq!(inst.scale, [2.5; 3]);
    }

    #[test]
    fn material_edits_touch_only_one_instance() {
        let (mut session, _backend) = session_with_model();
        let first = place(&mut session);
        let second = place(&mut session);

        session
            .dispatch(Command::SetDiffuse {
                key: first.clone(),
                part: 0,
                channel: Channel::Green,
                value: 0.9,
            })
            .unwrap();
        session
            .dispatch(Command::SetShininess {
                key: first.clone(),
                part: 0,
                value: 12.0,
            })
            .unwrap();

        let a = &session.store().get(&first).unwrap().materials[0];
        let b = &session.store().get(&second).unwrap().materials[0];
        assert_eq!(a.diffuse[1], 0.9);
        assert_eq!(a.shininess, 12.0);
        assert_eq!(b.diffuse, [0.2, 0.4, 0.6, 1.0]);
        assert_eq!(b.shininess, 400.0);
        let base = &session.registry().get(0).unwrap().parts()[0].material;
        assert_eq!(base.diffuse, [0.2, 0.4, 0.6, 1.0]);
    }

    #[test]
    fn bad_part_or_key_is_not_found() {
        let (mut session, _backend) = session_with_model();
        let key = place(&mut session);
        let err = session
            .dispatch(Command::SetShininess {
                key,
                part: 4,
                value: 1.0,
            })
            .unwrap_err();
        assert!(matches!(err, SceneError::NotFound(_)));

        let err = session
            .dispatch(Command::SetScale {
                key: "Nope1".into(),
                value: 1.0,
            })
            .unwrap_err();
        assert!(matches!(err, SceneError::NotFound(_)));
    }

    #[test]
    fn non_finite_slider_values_are_rejected() {
        let (mut session, _backend) = session_with_model();
        let key = place(&mut session);
        let before = session.export_scene().unwrap();

        let commands = [
            Command::SetScale {
                key: key.clone(),
                value: f32::INFINITY,
            },
            Command::SetTranslation {
                key: key.clone(),
                axis: Axis::X,
                slider: f32::NAN,
            },
            Command::SetRotation {
                key: key.clone(),
                axis: Axis::Y,
                degrees: f32::NEG_INFINITY,
            },
            Command::SetDiffuse {
                key: key.clone(),
                part: 0,
                channel: Channel::Red,
                value: f32::NAN,
            },
            Command::SetShininess {
                key: key.clone(),
                part: 0,
                value: f32::INFINITY,
            },
            Command::SetLightIntensity {
                light: 0,
                value: f32::NAN,
            },
        ];
        for command in commands {
            let err = session.dispatch(command).unwrap_err();
            assert!(matches!(err, SceneError::InvalidValue(_)));
        }

        let after = session.export_scene().unwrap();
        assert_eq!(after, before);
        let imported = session
            .dispatch(Command::ImportScene { text: after })
            .unwrap();
        assert_eq!(imported.outcome, Outcome::Imported(1));
        assert_eq!(session.lights().get(0).unwrap().intensity, 1.0);
    }

    #[test]
    fn add_light_until_rejected() {
        let mut session = Session::new();
        for expected in 1..MAX_LIGHTS {
            let result = session.dispatch(Command::AddLight).unwrap();
            assert_eq!(result.outcome, Outcome::LightAdded(expected));
            assert!(result.scene_json.is_none());
        }
        let result = session.dispatch(Command::AddLight).unwrap();
        assert_eq!(result.outcome, Outcome::LightRejected);
        assert_eq!(session.lights().len(), MAX_LIGHTS);
    }

    #[test]
    fn light_sliders_update_flat_arrays() {
        let mut session = Session::new();
        session
            .dispatch(Command::SetLightColor {
                light: 0,
                channel: Channel::Red,
                slider: 51.0,
            })
            .unwrap();
        session
            .dispatch(Command::SetLightPosition {
                light: 0,
                axis: Axis::X,
                value: -4.0,
            })
            .unwrap();
        session
            .dispatch(Command::SetLightIntensity {
                light: 0,
                value: 0.5,
            })
            .unwrap();

        let snap = session.lights().snapshot();
        assert_abs_diff_eq!(snap.colors[0], 0.2, epsilon = 1e-6);
        assert_eq!(snap.positions[0], -4.0);
        assert_eq!(snap.intensities, &[0.5]);

        let err = session
            .dispatch(Command::SetLightIntensity {
                light: 3,
                value: 1.0,
            })
            .unwrap_err();
        assert!(matches!(err, SceneError::LightOutOfRange(3)));
    }

    #[test]
    fn shading_selection_is_visible_to_view() {
        let mut session = Session::new();
        let result = session
            .dispatch(Command::SelectShading(ShadingMode::Toon))
            .unwrap();
        assert_eq!(result.outcome, Outcome::ShadingSelected(ShadingMode::Toon));
        assert_eq!(session.view().shading, ShadingMode::Toon);
    }

    #[test]
    fn import_round_trip_through_commands() {
        let (mut session, _backend) = session_with_model();
        let key = place(&mut session);
        session
            .dispatch(Command::SetScale {
                key: key.clone(),
                value: 3.0,
            })
            .unwrap();
        let exported = session.export_scene().unwrap();

        let result = session
            .dispatch(Command::ImportScene {
                text: exported.clone(),
            })
            .unwrap();
        assert_eq!(result.outcome, Outcome::Imported(1));
        assert_eq!(result.scene_json, Some(exported));
        // Import re-increments the counter, so the next key moves on.
        assert_eq!(session.registry().get(0).unwrap().instances(), 2);
        assert_eq!(place(&mut session), "Tri3");
    }

    #[test]
    fn failed_import_keeps_state() {
        let (mut session, _backend) = session_with_model();
        let key = place(&mut session);
        let before = session.export_scene().unwrap();

        let err = session
            .dispatch(Command::ImportScene {
                text: "{\"X1\": {\"modelIndex\": 9}}".into(),
            })
            .unwrap_err();
        assert!(matches!(err, SceneError::ImportFormat(_)));
        assert_eq!(session.export_scene().unwrap(), before);
        assert!(session.store().contains(&key));
    }
}
