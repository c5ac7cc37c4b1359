use crate::{
    animation::seeded::EffectRng,
    composition::model::EditConfig,
    effects::transitions::{TransitionTiming, parse_transition},
    foundation::error::FlowcutResult,
    scene::{SceneEnv, SceneSetup},
    timeline::composer::{Timeline, TimelineBuilder, TransitionDef},
};

/// Validate `config` and build its immutable timeline.
///
/// Every construction-time check runs here: asset references, sfx roles, curve breakpoints,
/// scene and transition durations. Once this returns `Ok`, rendering any frame cannot fail.
pub fn build_timeline(config: &EditConfig) -> FlowcutResult<Timeline> {
    config.validate()?;

    let env = SceneEnv {
        fps: config.fps,
        canvas: config.canvas,
        rng: EffectRng::new(config.seed),
    };
    let mut builder = TimelineBuilder::new(config.fps, config.canvas, env.rng);

    for (i, spec) in config.scenes.iter().enumerate() {
        if i > 0 {
            let t = &config.transitions[i - 1];
            builder = builder.transition(TransitionDef {
                id: format!("{}_to_{}", config.scenes[i - 1].id, spec.id),
                duration_frames: t.duration_frames,
                kind: parse_transition(t)?,
                timing: TransitionTiming::from_ease(t.ease),
            });
        }
        let setup = SceneSetup {
            id: spec.id.clone(),
            duration_frames: spec.duration_frames,
            footage: spec.footage.clone(),
            trim_start_sec: spec.trim_start_sec,
            sfx: spec.sfx.clone(),
        };
        builder = builder.scene(spec.kind.build(setup, env)?);
    }

    builder.build()
}

#[cfg(test)]
#[path = "../../tests/unit/composition/build.rs"]
mod tests;
