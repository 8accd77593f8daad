//! List loaded content.

use anyhow::Result;
use clap::Parser;
use skill_core::ClassKind;

use super::ContentArgs;

const KINDS: [ClassKind; 6] = [
    ClassKind::Ability,
    ClassKind::Projectile,
    ClassKind::AreaEffect,
    ClassKind::Minion,
    ClassKind::Effect,
    ClassKind::Handler,
];

/// List skills, supports and classes
#[derive(Parser)]
pub struct List {
    #[command(flatten)]
    content: ContentArgs,

    /// Also list registered classes by kind
    #[arg(long)]
    classes: bool,
}

impl List {
    pub fn execute(self) -> Result<()> {
        let catalog = self.content.load()?;

        println!("Skills:");
        for skill in catalog.skills() {
            let carriers: Vec<String> = [
                &skill.projectile_class,
                &skill.area_class,
                &skill.minion_class,
            ]
            .into_iter()
            .flatten()
            .map(|c| c.to_string())
            .collect();
            println!(
                "  {:<16} damage {:>6.1}  cost {:>5.1}  carriers [{}]",
                skill.skill_id,
                skill.base_damage,
                skill.cost,
                carriers.join(", ")
            );
        }

        println!("\nSupports:");
        for support in catalog.supports() {
            println!("  {:<24} {}", support.support_id, support.display_name);
        }

        if self.classes {
            println!("\nClasses:");
            for kind in KINDS {
                let ids: Vec<String> = catalog
                    .classes()
                    .classes_of(kind)
                    .map(|c| c.to_string())
                    .collect();
                println!("  {:<12} {}", kind.as_ref(), ids.join(", "));
            }
        }
        Ok(())
    }
}
