use super::SkillSpec;

/// Numeric spec fields a patch may modify.
///
/// Authored content names fields by their display form (`FinalDamage`);
/// parsing is case-insensitive.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpecField {
    FinalDamage,
    Cooldown,
    ResourceCost,
    CastTime,
    AreaRadius,
    ProjectileSpeed,
    MaxRange,
    Lifetime,
}

impl SkillSpec {
    pub fn field(&self, field: SpecField) -> f32 {
        match field {
            SpecField::FinalDamage => self.final_damage,
            SpecField::Cooldown => self.cooldown,
            SpecField::ResourceCost => self.resource_cost,
            SpecField::CastTime => self.cast_time,
            SpecField::AreaRadius => self.area_radius,
            SpecField::ProjectileSpeed => self.projectile_speed,
            SpecField::MaxRange => self.max_range,
            SpecField::Lifetime => self.lifetime,
        }
    }

    pub fn field_mut(&mut self, field: SpecField) -> &mut f32 {
        match field {
            SpecField::FinalDamage => &mut self.final_damage,
            SpecField::Cooldown => &mut self.cooldown,
            SpecField::ResourceCost => &mut self.resource_cost,
            SpecField::CastTime => &mut self.cast_time,
            SpecField::AreaRadius => &mut self.area_radius,
            SpecField::ProjectileSpeed => &mut self.projectile_speed,
            SpecField::MaxRange => &mut self.max_range,
            SpecField::Lifetime => &mut self.lifetime,
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn every_field_round_trips_through_its_name() {
        for field in SpecField::iter() {
            let parsed: SpecField = field.as_ref().parse().expect("field name parses");
            assert_eq!(parsed, field);
        }
        assert_eq!("finaldamage".parse::<SpecField>().ok(), Some(SpecField::FinalDamage));
        assert!("Damage".parse::<SpecField>().is_err());
    }

    #[test]
    fn accessor_table_addresses_distinct_fields() {
        let mut spec = SkillSpec::default();
        for (i, field) in SpecField::iter().enumerate() {
            *spec.field_mut(field) = i as f32;
        }
        for (i, field) in SpecField::iter().enumerate() {
            assert_eq!(spec.field(field), i as f32);
        }
    }
}
