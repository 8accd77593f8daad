//! Build and print a skill spec.

use anyhow::{Context, Result};
use clap::Parser;
use skill_core::{ClassId, SkillDefinition, SkillSpec, SpecField, build_spec};
use strum::IntoEnumIterator;

use super::{ContentArgs, resolve};

/// Build a skill spec with supports and print it
#[derive(Parser)]
pub struct Inspect {
    /// Skill id (e.g., Fireball)
    #[arg(value_name = "SKILL")]
    skill: String,

    /// Support ids to link, in order
    #[arg(short, long = "support", value_name = "SUPPORT")]
    supports: Vec<String>,

    /// Print the wire record as hex
    #[arg(long)]
    wire: bool,

    #[command(flatten)]
    content: ContentArgs,
}

impl Inspect {
    pub fn execute(self) -> Result<()> {
        let catalog = self.content.load()?;
        let (definition, patches) = resolve(&catalog, &self.skill, &self.supports)?;
        let spec = build_spec(&definition, &patches);

        print_spec(&spec);
        print_presentation(&definition);

        let bytes = spec.to_wire().context("Failed to encode spec")?;
        let digest = spec.digest().context("Failed to digest spec")?;
        println!("\nWire record: {} bytes", bytes.len());
        println!("Digest:      {}", hex::encode(digest));
        if self.wire {
            println!("{}", hex::encode(&bytes));
        }
        Ok(())
    }
}

/// Host-facing data that stays on the definition.
fn print_presentation(definition: &SkillDefinition) {
    if let Some(damage_type) = &definition.damage_type {
        println!("  damage type      {damage_type}");
    }
    for (point, cue) in definition.cues.authored() {
        println!("  cue {point:<12} {cue}");
    }
}

fn print_spec(spec: &SkillSpec) {
    println!("Skill: {}", spec.skill_id);
    for field in SpecField::iter() {
        println!("  {:<16} {:>10.2}", field.as_ref(), spec.field(field));
    }
    println!("  summon_count     {:>10}", spec.summon_count);

    let optional = |class: &Option<ClassId>| {
        class.as_ref().map_or_else(|| "-".to_owned(), |c| c.to_string())
    };
    println!("  projectile       {}", optional(&spec.projectile_class));
    println!("  area             {}", optional(&spec.area_class));
    println!("  minion           {}", optional(&spec.minion_class));
    println!("  damage effect    {}", optional(&spec.damage_effect));

    let tags: Vec<&str> = spec.tags.iter().map(|t| t.as_str()).collect();
    println!("  tags             [{}]", tags.join(", "));
    let handlers: Vec<&str> = spec.handlers.iter().map(|h| h.as_str()).collect();
    println!("  handlers         [{}]", handlers.join(", "));
    for param in spec.custom_params.iter() {
        println!("  param {:<24} {}", param.key, param.value);
    }
}
