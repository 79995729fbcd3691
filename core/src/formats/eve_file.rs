//! Enchant profile codec (enchant.txt)

use std::path::Path;

use crate::constants::{DamageModifier, MAX_WAVE};
use crate::error::{FormatError, Result};
use crate::fixed_point::{
    damage_modifier_from_letter, damage_modifier_to_letter, fixed8_8_to_float, float_to_fixed8_8,
};
use crate::formats::text_writer::{LabeledWriter, format_bool, format_float};
use crate::scanner::TokenScanner;
use crate::types::{
    AddKind, DamageType, EnchantSet, EveRecord, MissileTreatment, damage_type_letter,
};

mod tag {
    use crate::idsz::Idsz;

    pub const AMOU: Idsz = Idsz::new(b"AMOU");
    pub const TYPE: Idsz = Idsz::new(b"TYPE");
    pub const TIME: Idsz = Idsz::new(b"TIME");
    pub const FACE: Idsz = Idsz::new(b"FACE");
    pub const SEND: Idsz = Idsz::new(b"SEND");
    pub const STAY: Idsz = Idsz::new(b"STAY");
    pub const OVER: Idsz = Idsz::new(b"OVER");
    pub const DEAD: Idsz = Idsz::new(b"DEAD");
    pub const CKUR: Idsz = Idsz::new(b"CKUR");
    pub const DARK: Idsz = Idsz::new(b"DARK");
}

/// Defense is stored with the opposite sign. Subtracting from zero keeps
/// an unset value from being written as `-0`.
fn flip_defense(value: f32) -> f32 {
    0.0 - value
}

fn read_int_set(s: &mut TokenScanner<'_>, context: &str) -> Result<EnchantSet<i32>> {
    s.skip_to_colon(false, context)?;
    let enabled = s.read_bool();
    Ok(EnchantSet::new(enabled, s.read_int()))
}

fn read_bool_set(s: &mut TokenScanner<'_>, context: &str) -> Result<EnchantSet<bool>> {
    s.skip_to_colon(false, context)?;
    let enabled = s.read_bool();
    Ok(EnchantSet::new(enabled, s.read_bool()))
}

pub fn decode(data: &[u8]) -> Result<EveRecord> {
    let mut s = TokenScanner::new(data);
    let mut eve = EveRecord::default();

    eve.retarget = s.next_bool("retarget")?;
    eve.override_ = s.next_bool("override")?;
    eve.remove_overridden = s.next_bool("remove overridden")?;
    eve.kill_target_on_end = s.next_bool("kill target on end")?;
    eve.poof_on_end = s.next_bool("poof on end")?;

    eve.lifetime = s.next_int("lifetime")?;
    eve.end_message = s.next_int("end message")?;

    eve.owner_mana = float_to_fixed8_8(s.next_float("owner mana")?);
    eve.target_mana = float_to_fixed8_8(s.next_float("target mana")?);
    eve.end_if_cant_pay = s.next_bool("end if can't pay")?;
    eve.owner_life = float_to_fixed8_8(s.next_float("owner life")?);
    eve.target_life = float_to_fixed8_8(s.next_float("target life")?);

    eve.required_damage_type = s.next_damage_type("required damage type")?;
    eve.require_target_damage_type = s.next_damage_type("require target damage type")?;
    eve.removed_by_idsz = s.next_idsz("remove by IDSZ")?;

    s.skip_to_colon(false, "set damage type")?;
    let enabled = s.read_bool();
    eve.set_damage_type = EnchantSet::new(enabled, s.read_damage_type());
    eve.set_jump_count = read_int_set(&mut s, "set number of jumps")?;
    eve.set_life_bar_color = read_int_set(&mut s, "set life bar color")?;
    eve.set_mana_bar_color = read_int_set(&mut s, "set mana bar color")?;

    for damage in DamageType::ALL {
        s.skip_to_colon(false, damage.name())?;
        let enabled = s.read_bool();
        let modifier = damage_modifier_from_letter(s.read_char().unwrap_or('F'));
        eve.set_damage_modifier[damage.index()] = EnchantSet::new(enabled, modifier);
        eve.resist_add[damage.index()] = s.read_float();
    }

    eve.set_flashing_and = read_int_set(&mut s, "set flashing and")?;
    eve.set_light_blend = read_int_set(&mut s, "set light blend")?;
    eve.set_alpha_blend = read_int_set(&mut s, "set alpha blend")?;
    eve.set_sheen = read_int_set(&mut s, "set sheen")?;
    eve.set_fly_height = read_int_set(&mut s, "set fly to height")?;
    eve.set_walk_on_water = read_bool_set(&mut s, "set walk on water")?;
    eve.set_see_invisible = read_bool_set(&mut s, "set see invisible")?;

    s.skip_to_colon(false, "set missile treatment")?;
    let enabled = s.read_bool();
    eve.set_missile_treatment = EnchantSet::new(enabled, MissileTreatment::from_letter(s.read_char()));

    s.skip_to_colon(false, "set cost per missile")?;
    let enabled = s.read_bool();
    eve.set_missile_cost = EnchantSet::new(enabled, s.read_float());

    // only the switch is read, morphing and channeling always mean "on"
    eve.set_morph = EnchantSet::new(s.next_bool("set morph")?, true);
    eve.set_channel = EnchantSet::new(s.next_bool("set channel")?, true);

    for kind in AddKind::ALL {
        let value = s.next_float(kind.label())?;
        eve.add[kind as usize] = if kind == AddKind::Defense {
            flip_defense(value)
        } else {
            value
        };
    }

    while s.skip_to_colon(true, "expansion")? {
        let idsz = s.read_idsz();
        let value = s.read_int();
        match idsz {
            tag::AMOU => eve.contspawn_amount = value,
            tag::TYPE => eve.contspawn_lpip = value,
            tag::TIME => eve.contspawn_delay = value,
            tag::FACE => eve.contspawn_facing_add = value,
            tag::SEND => eve.end_sound_index = value.clamp(-1, MAX_WAVE),
            tag::STAY => eve.stay_if_no_owner = value != 0,
            tag::OVER => eve.spawn_overlay = value != 0,
            tag::DEAD => eve.stay_if_target_dead = value != 0,
            tag::CKUR => eve.see_kurses = value,
            tag::DARK => eve.darkvision = value,
            other => log::debug!("Ignoring enchant expansion {other} {value}"),
        }
    }

    eve.loaded = true;
    Ok(eve)
}

fn set_line<T: std::fmt::Display>(w: &mut LabeledWriter, label: &str, enabled: bool, value: T) {
    w.line(label, format!("{} {}", format_bool(enabled), value));
}

pub fn encode(eve: &EveRecord) -> String {
    let mut w = LabeledWriter::new();

    w.comment("Enchant profile")
        .bool("Retarget", eve.retarget)
        .bool("Override", eve.override_)
        .bool("Remove overridden", eve.remove_overridden)
        .bool("Kill target on end", eve.kill_target_on_end)
        .bool("Poof on end", eve.poof_on_end);

    w.blank().comment("Duration")
        .int("Time in seconds", eve.lifetime)
        .int("End message", eve.end_message);

    w.blank().comment("Drains")
        .float("Owner mana", fixed8_8_to_float(eve.owner_mana))
        .float("Target mana", fixed8_8_to_float(eve.target_mana))
        .bool("End if can't pay", eve.end_if_cant_pay)
        .float("Owner life", fixed8_8_to_float(eve.owner_life))
        .float("Target life", fixed8_8_to_float(eve.target_life));

    w.blank().comment("Requirements")
        .char("Required damage type", damage_type_letter(eve.required_damage_type))
        .char(
            "Require target damage type",
            damage_type_letter(eve.require_target_damage_type),
        )
        .idsz("Remove by IDSZ", eve.removed_by_idsz);

    w.blank().comment("Set values");
    set_line(
        &mut w,
        "Set damage type",
        eve.set_damage_type.enabled,
        damage_type_letter(eve.set_damage_type.value),
    );
    for (label, set) in [
        ("Set number of jumps", eve.set_jump_count),
        ("Set life bar color", eve.set_life_bar_color),
        ("Set mana bar color", eve.set_mana_bar_color),
    ] {
        set_line(&mut w, label, set.enabled, set.value);
    }
    for damage in DamageType::ALL {
        let set: EnchantSet<DamageModifier> = eve.set_damage_modifier[damage.index()];
        set_line(
            &mut w,
            &format!("Set {} modifier", damage.name().to_lowercase()),
            set.enabled,
            format!(
                "{} {}",
                damage_modifier_to_letter(set.value),
                format_float(eve.resist_add[damage.index()])
            ),
        );
    }
    for (label, set) in [
        ("Set flashing AND", eve.set_flashing_and),
        ("Set light blend", eve.set_light_blend),
        ("Set alpha blend", eve.set_alpha_blend),
        ("Set sheen", eve.set_sheen),
        ("Set fly to height", eve.set_fly_height),
    ] {
        set_line(&mut w, label, set.enabled, set.value);
    }
    for (label, set) in [
        ("Set walk on water", eve.set_walk_on_water),
        ("Set see invisible", eve.set_see_invisible),
    ] {
        set_line(&mut w, label, set.enabled, format_bool(set.value));
    }
    set_line(
        &mut w,
        "Set missile treatment",
        eve.set_missile_treatment.enabled,
        eve.set_missile_treatment.value.letter(),
    );
    set_line(
        &mut w,
        "Set cost per missile",
        eve.set_missile_cost.enabled,
        format_float(eve.set_missile_cost.value),
    );
    w.bool("Set morph", eve.set_morph.enabled)
        .bool("Set channel", eve.set_channel.enabled);

    w.blank().comment("Add values");
    for kind in AddKind::ALL {
        let value = eve.add_value(kind);
        let value = if kind == AddKind::Defense {
            flip_defense(value)
        } else {
            value
        };
        w.float(kind.label(), value);
    }

    w.blank().comment("Expansions");
    if eve.contspawn_amount != 0 {
        w.expansion(tag::AMOU, eve.contspawn_amount);
    }
    if eve.contspawn_lpip != -1 {
        w.expansion(tag::TYPE, eve.contspawn_lpip);
    }
    if eve.contspawn_delay != 0 {
        w.expansion(tag::TIME, eve.contspawn_delay);
    }
    if eve.contspawn_facing_add != 0 {
        w.expansion(tag::FACE, eve.contspawn_facing_add);
    }
    if eve.end_sound_index != -1 {
        w.expansion(tag::SEND, eve.end_sound_index);
    }
    if eve.stay_if_no_owner {
        w.expansion(tag::STAY, 1);
    }
    if eve.spawn_overlay {
        w.expansion(tag::OVER, 1);
    }
    if eve.stay_if_target_dead {
        w.expansion(tag::DEAD, 1);
    }
    if eve.see_kurses != 0 {
        w.expansion(tag::CKUR, eve.see_kurses);
    }
    if eve.darkvision != 0 {
        w.expansion(tag::DARK, eve.darkvision);
    }

    w.finish()
}

pub fn load(path: impl AsRef<Path>) -> Result<EveRecord> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| FormatError::io(path, e))?;
    let eve = decode(&data)?;
    log::debug!("Loaded enchant profile from {}", path.display());
    Ok(eve)
}

pub fn save(path: impl AsRef<Path>, eve: &EveRecord) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, encode(eve)).map_err(|e| FormatError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::idsz::Idsz;

    fn sample() -> EveRecord {
        let mut eve = EveRecord {
            retarget: true,
            lifetime: 30,
            end_message: 4,
            owner_mana: float_to_fixed8_8(-1.5),
            target_life: float_to_fixed8_8(0.25),
            required_damage_type: Some(DamageType::Fire),
            removed_by_idsz: Idsz::new(b"HEAL"),
            set_damage_type: EnchantSet::new(true, Some(DamageType::Ice)),
            set_sheen: EnchantSet::new(true, 12),
            set_walk_on_water: EnchantSet::new(true, true),
            set_missile_treatment: EnchantSet::new(true, MissileTreatment::Reflect),
            set_missile_cost: EnchantSet::new(true, 1.5),
            set_morph: EnchantSet::new(true, true),
            contspawn_amount: 2,
            contspawn_lpip: 3,
            end_sound_index: 7,
            spawn_overlay: true,
            darkvision: 2,
            ..Default::default()
        };
        eve.set_damage_modifier[DamageType::Zap.index()] =
            EnchantSet::new(true, DamageModifier::CHARGE);
        eve.resist_add[DamageType::Zap.index()] = 0.5;
        eve.add[AddKind::Defense as usize] = 20.0;
        eve.add[AddKind::Strength as usize] = -2.0;
        eve
    }

    #[test]
    fn roundtrip() {
        let eve = sample();
        let mut decoded = decode(encode(&eve).as_bytes()).unwrap();
        assert!(decoded.loaded);
        decoded.loaded = false;
        assert_eq!(decoded, eve);
    }

    #[test]
    fn defense_is_sign_inverted_on_disk() {
        let text = encode(&sample());
        let line = text.lines().find(|l| l.starts_with("Defense")).unwrap();
        assert!(line.ends_with(": -20"));
        assert!(!text.contains("-0\n"));
    }

    #[test]
    fn morph_value_is_always_true() {
        let mut eve = EveRecord::default();
        eve.set_morph = EnchantSet::new(false, false);
        let decoded = decode(encode(&eve).as_bytes()).unwrap();
        assert_eq!(decoded.set_morph, EnchantSet::new(false, true));
        assert_eq!(decoded.set_channel, EnchantSet::new(false, true));
    }

    #[test]
    fn end_sound_is_clamped_and_unknown_tags_ignored() {
        let mut text = encode(&EveRecord::default());
        text.push_str(": [SEND] 99\n: [ZZZZ] 5\n: [STAY] 1\n");
        let decoded = decode(text.as_bytes()).unwrap();
        assert_eq!(decoded.end_sound_index, MAX_WAVE);
        assert!(decoded.stay_if_no_owner);
    }

    #[test]
    fn add_yes_no_is_derived_after_decode() {
        let decoded = decode(encode(&sample()).as_bytes()).unwrap();
        assert!(decoded.add_yes_no(AddKind::Defense));
        assert!(decoded.add_yes_no(AddKind::Strength));
        assert!(!decoded.add_yes_no(AddKind::Life));
    }
}
