//! Cast a skill in the sandbox and report what happened.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use skill_core::{ActorId, SkillError, Transform, Vec3};
use skill_runtime::{CueScope, Simulation};
use tracing::{error, info};

use super::{ContentArgs, resolve};

/// Collision radius of every sandbox character.
const CHARACTER_RADIUS: f32 = 20.0;

/// Cast a skill at a row of target dummies
#[derive(Parser)]
pub struct Cast {
    /// Skill id (e.g., Fireball)
    #[arg(value_name = "SKILL")]
    skill: String,

    /// Support ids to link, in order
    #[arg(short, long = "support", value_name = "SUPPORT")]
    supports: Vec<String>,

    /// Number of target dummies in front of the caster
    #[arg(short, long, default_value_t = 3)]
    targets: u32,

    /// Distance between neighbouring targets
    #[arg(long, default_value_t = 200.0)]
    spacing: f32,

    /// Frames to simulate after the cast
    #[arg(short, long, env = "SKILL_SIM_FRAMES", default_value_t = 120)]
    frames: u32,

    /// Seconds per frame
    #[arg(long, env = "SKILL_SIM_DT", default_value_t = 1.0 / 30.0)]
    dt: f32,

    #[command(flatten)]
    content: ContentArgs,
}

impl Cast {
    pub fn execute(self) -> Result<()> {
        if self.dt <= 0.0 {
            anyhow::bail!("--dt must be positive, got {}", self.dt);
        }

        let catalog = self.content.load()?;
        let (definition, _) = resolve(&catalog, &self.skill, &self.supports)?;

        let mut sim = Simulation::builder()
            .config(catalog.config().clone())
            .registry(Arc::clone(catalog.classes()))
            .build()?;

        let caster = spawn(&mut sim, "caster", Vec3::ZERO)?;
        {
            let component = sim
                .world_mut()
                .ability_component_mut(caster)
                .context("Caster has no ability component")?;
            component.equip_skill(Arc::clone(&definition));
            for id in &self.supports {
                let support = catalog
                    .support(id)
                    .with_context(|| format!("Unknown support: {id}"))?;
                if !component.link_support(&definition.skill_id, Arc::clone(support)) {
                    anyhow::bail!("Support {id} is already linked");
                }
            }
        }

        let targets = (1..=self.targets)
            .map(|i| {
                let x = i as f32 * self.spacing;
                spawn(&mut sim, &format!("dummy{i}"), Vec3::new(x, 0.0, 0.0))
            })
            .collect::<Result<Vec<_>>>()?;

        let report = sim.cast(caster, &definition).map_err(|e| {
            error!(code = e.error_code(), severity = %e.severity(), "{e}");
            anyhow::Error::new(e).context(format!("Failed to cast {}", self.skill))
        })?;
        info!(
            skill = %report.spec.skill_id,
            final_damage = report.spec.final_damage,
            carriers = report.execution.carriers().count(),
            "cast"
        );

        let stepped = sim.run(self.frames, self.dt);

        println!("Skill:    {}", report.spec.skill_id);
        println!("Supports: [{}]", self.supports.join(", "));
        println!("Damage:   {:.2}", report.spec.final_damage);
        println!(
            "Carriers: {} spawned, {} alive after {} frames ({:.2}s)",
            report.execution.carriers().count(),
            sim.carriers().len(),
            stepped,
            sim.elapsed()
        );

        println!("\nTargets:");
        for target in &targets {
            let health = sim
                .world()
                .ability_component(*target)
                .map_or(0.0, |c| c.attributes().health());
            let location = sim
                .world()
                .actor(*target)
                .map_or(Vec3::ZERO, |a| a.transform.location);
            println!("  {target}  x={:>7.1}  health {:>6.1}", location.x, health);
        }

        let cues = sim.world().cue_log().events();
        let net = cues.iter().filter(|e| e.scope == CueScope::Net).count();
        println!("\nCues: {} local, {} net", cues.len() - net, net);

        sim.shutdown();
        Ok(())
    }
}

fn spawn(sim: &mut Simulation, name: &str, location: Vec3) -> Result<ActorId> {
    let world = sim.world_mut();
    let actor = world.spawn_character(name, Transform::at(location), CHARACTER_RADIUS);
    if !world.add_ability_component(actor) {
        anyhow::bail!("Failed to attach ability component to {name}");
    }
    Ok(actor)
}
