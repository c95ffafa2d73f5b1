//! Light intents: edits the host queues during its update phase and the
//! engine applies in one batch before rendering.

use glam::{Vec3, Vec4};

use super::{Light, LightId, LightRegistry};
use crate::error::EngineError;

/// A single queued edit to the light registry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightCommand {
    /// Register a new light. Its id is returned by `execute`.
    Add(Light),
    Remove(LightId),
    SetEnabled(LightId, bool),
    ToggleEnabled(LightId),
    SetPosition(LightId, Vec3),
    SetColor(LightId, Vec4),
    SetPower(LightId, f32),
    /// Clamped to `MIN_DECAY`.
    SetDecay(LightId, f32),
    /// Spot lights only. Wrapped into [0, 2π).
    SetSpotRotation(LightId, f32),
    /// Spot lights only.
    SetSpotDirectionZ(LightId, f32),
    /// Spot lights only. Clamped to `MIN_BEAM_WIDTH`.
    SetSpotBeamWidth(LightId, f32),
}

/// Apply one command. Returns the new id for `Add`, `None` otherwise.
pub fn execute(
    registry: &mut LightRegistry,
    cmd: &LightCommand,
) -> Result<Option<LightId>, EngineError> {
    match *cmd {
        LightCommand::Add(light) => return Ok(Some(registry.add(light))),
        LightCommand::Remove(id) => {
            registry.remove(id).ok_or(EngineError::UnknownLight(id))?;
        }
        LightCommand::SetEnabled(id, enabled) => light_mut(registry, id)?.enabled = enabled,
        LightCommand::ToggleEnabled(id) => {
            let light = light_mut(registry, id)?;
            light.enabled = !light.enabled;
        }
        LightCommand::SetPosition(id, position) => light_mut(registry, id)?.position = position,
        LightCommand::SetColor(id, color) => light_mut(registry, id)?.color = color,
        LightCommand::SetPower(id, power) => light_mut(registry, id)?.power = power,
        LightCommand::SetDecay(id, decay) => light_mut(registry, id)?.set_decay(decay),
        LightCommand::SetSpotRotation(id, theta) => cone_mut(registry, id)?.set_rotation(theta),
        LightCommand::SetSpotDirectionZ(id, z) => cone_mut(registry, id)?.set_direction_z(z),
        LightCommand::SetSpotBeamWidth(id, exponent) => {
            cone_mut(registry, id)?.set_beam_width(exponent)
        }
    }
    Ok(None)
}

fn light_mut(registry: &mut LightRegistry, id: LightId) -> Result<&mut Light, EngineError> {
    registry.get_mut(id).ok_or(EngineError::UnknownLight(id))
}

fn cone_mut(
    registry: &mut LightRegistry,
    id: LightId,
) -> Result<&mut super::SpotCone, EngineError> {
    light_mut(registry, id)?
        .cone_mut()
        .ok_or(EngineError::NotASpotLight(id))
}
