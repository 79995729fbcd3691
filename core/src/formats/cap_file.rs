//! Character profile codec (data.txt).
//!
//! The fixed fields come first in a strict order, then any number of
//! `: [IDSZ] value` expansion lines. Expansions the codec does not know
//! are kept in the skills map so nothing a newer tool wrote is lost.

use std::path::Path;

use crate::constants::{
    IDSZ_COUNT, MAX_BASE_LEVEL, MAX_SKIN, MeshFx, ModelFlags, NO_HIDE, SLOT_LEFT, SLOT_RIGHT,
    SOUND_FOOTFALL, SOUND_JUMP,
};
use crate::error::{FormatError, Result};
use crate::fixed_point::{
    damage_modifier_from_letter, damage_modifier_to_letter, fixed8_8_to_float, float_to_fixed8_8,
    invert_defense,
};
use crate::formats::text_writer::{LabeledWriter, format_float};
use crate::idsz::Idsz;
use crate::scanner::TokenScanner;
use crate::string_operations::decode_optional_name;
use crate::types::{
    BloodKind, CapRecord, DamageType, Gender, STAT_NAMES, WeaponAction, XP_NAMES,
    damage_type_letter,
};

const UV_SCALE: f32 = 65535.0;
const EXPERIENCE_SCALE: f32 = 256.0;

const IDSZ_LABELS: [&str; IDSZ_COUNT] = [
    "Parent ID",
    "Type ID",
    "Skill ID",
    "Special ID",
    "Hate group ID",
    "Vulnerability ID",
];

mod tag {
    use crate::idsz::Idsz;

    pub const DRES: Idsz = Idsz::new(b"DRES");
    pub const GOLD: Idsz = Idsz::new(b"GOLD");
    pub const STUK: Idsz = Idsz::new(b"STUK");
    pub const PACK: Idsz = Idsz::new(b"PACK");
    pub const VAMP: Idsz = Idsz::new(b"VAMP");
    pub const DRAW: Idsz = Idsz::new(b"DRAW");
    pub const RANG: Idsz = Idsz::new(b"RANG");
    pub const HIDE: Idsz = Idsz::new(b"HIDE");
    pub const EQUI: Idsz = Idsz::new(b"EQUI");
    pub const SQUA: Idsz = Idsz::new(b"SQUA");
    pub const ICON: Idsz = Idsz::new(b"ICON");
    pub const SHAD: Idsz = Idsz::new(b"SHAD");
    pub const SKIN: Idsz = Idsz::new(b"SKIN");
    pub const CONT: Idsz = Idsz::new(b"CONT");
    pub const STAT: Idsz = Idsz::new(b"STAT");
    pub const LEVL: Idsz = Idsz::new(b"LEVL");
    pub const PLAT: Idsz = Idsz::new(b"PLAT");
    pub const RIPP: Idsz = Idsz::new(b"RIPP");
    pub const VALU: Idsz = Idsz::new(b"VALU");
    pub const LIFE: Idsz = Idsz::new(b"LIFE");
    pub const MANA: Idsz = Idsz::new(b"MANA");
    pub const BOOK: Idsz = Idsz::new(b"BOOK");
    pub const FAST: Idsz = Idsz::new(b"FAST");
    pub const STRD: Idsz = Idsz::new(b"STRD");
    pub const INTD: Idsz = Idsz::new(b"INTD");
    pub const WISD: Idsz = Idsz::new(b"WISD");
    pub const DEXD: Idsz = Idsz::new(b"DEXD");
    pub const MODL: Idsz = Idsz::new(b"MODL");
}

const MODEL_LETTERS: [(char, ModelFlags); 5] = [
    ('S', ModelFlags::BUMP_SIZE),
    ('B', ModelFlags::BUMP_SIZE_BIG),
    ('H', ModelFlags::BUMP_HEIGHT),
    ('C', ModelFlags::NO_BACKFACE_CULL),
    ('T', ModelFlags::TRANSPARENT_SKIN),
];

/// Negative values clear the override.
fn skin_slot(value: i32) -> Option<usize> {
    usize::try_from(value).ok().map(|v| v % MAX_SKIN)
}

pub fn decode(data: &[u8]) -> Result<CapRecord> {
    let mut s = TokenScanner::new(data);
    let mut cap = CapRecord::default();

    cap.classname = decode_optional_name(&s.next_name("class name")?);
    cap.uniform_lit = s.next_bool("uniform light")?;
    cap.ammo_max = s.next_int("ammo max")?;
    cap.ammo = s.next_int("ammo")?;
    cap.gender = Gender::from_letter(s.next_char("gender")?);

    for (stat, name) in cap.stats.iter_mut().zip(STAT_NAMES) {
        stat.value = s.next_range(name)?;
        stat.per_level = s.next_range(name)?;
    }

    cap.size = s.next_float("size")?;
    cap.size_per_level = s.next_float("size per level")?;
    cap.shadow_size = s.next_int("shadow size")?;
    cap.bump_size = s.next_int("bump size")?;
    cap.bump_height = s.next_int("bump height")?;
    cap.bump_dampen = s.next_float("bump dampen")?;
    cap.weight = s.next_int("weight")?;
    cap.jump_power = s.next_float("jump power")?;
    cap.jump_count = s.next_int("jump count")?;
    cap.anim_speed_sneak = s.next_float("sneak speed")?;
    cap.anim_speed_walk = s.next_float("walk speed")?;
    cap.anim_speed_run = s.next_float("run speed")?;
    cap.fly_height = s.next_int("fly height")?;

    cap.flash_and = s.next_int("flash and")?;
    cap.alpha = s.next_int("alpha")?;
    cap.light = s.next_int("light")?;
    cap.transfer_blend = s.next_bool("transfer blend")?;
    cap.sheen = s.next_int("sheen")?;
    cap.enviro = s.next_bool("enviro map")?;
    cap.uoff_vel = (s.next_float("texture x add")? * UV_SCALE).round() as i32;
    cap.voff_vel = (s.next_float("texture y add")? * UV_SCALE).round() as i32;
    cap.sticky_butt = s.next_bool("sticky butt")?;

    cap.invictus = s.next_bool("invictus")?;
    cap.iframe_facing = s.next_int("iframe facing")?;
    cap.iframe_angle = s.next_int("iframe angle")?;
    cap.nframe_facing = s.next_int("nframe facing")?;
    cap.nframe_angle = s.next_int("nframe angle")?;
    // an angle of 1 is how old files spell "none"
    if cap.nframe_angle == 1 {
        cap.nframe_angle = 0;
    }

    s.skip_to_colon(false, "skin defense")?;
    for defense in cap.defense.iter_mut() {
        *defense = invert_defense(s.read_int());
    }
    for damage in DamageType::ALL {
        s.skip_to_colon(false, damage.name())?;
        for resist in cap.damage_resistance[damage.index()].iter_mut() {
            *resist = s.read_float();
        }
    }
    for damage in DamageType::ALL {
        s.skip_to_colon(false, damage.name())?;
        for modifier in cap.damage_modifier[damage.index()].iter_mut() {
            *modifier = damage_modifier_from_letter(s.read_char().unwrap_or('F'));
        }
    }
    s.skip_to_colon(false, "acceleration")?;
    for accel in cap.max_accel.iter_mut() {
        *accel = s.read_float();
    }

    cap.experience_for_level[0] = 0;
    for level in 1..MAX_BASE_LEVEL {
        cap.experience_for_level[level] = s.next_int("experience for level")?;
    }
    cap.experience = s
        .next_range("starting experience")?
        .scaled(1.0 / EXPERIENCE_SCALE);
    cap.experience_worth = s.next_int("experience worth")?;
    cap.experience_exchange = s.next_float("experience exchange")?;
    for (rate, name) in cap.experience_rate.iter_mut().zip(XP_NAMES) {
        *rate = s.next_float(name)?;
    }

    for (idsz, name) in cap.idsz.iter_mut().zip(IDSZ_LABELS) {
        *idsz = s.next_idsz(name)?;
    }

    cap.is_item = s.next_bool("is item")?;
    cap.is_mount = s.next_bool("is mount")?;
    cap.is_stackable = s.next_bool("is stackable")?;
    cap.name_known = s.next_bool("name known")?;
    cap.usage_known = s.next_bool("usage known")?;
    cap.can_carry_to_next_module = s.next_bool("exportable")?;
    cap.needs_skill_id_to_use = s.next_bool("requires skill")?;
    cap.platform = s.next_bool("is platform")?;
    cap.can_grab_money = s.next_bool("collects money")?;
    cap.can_open_stuff = s.next_bool("can open stuff")?;

    cap.damage_target_damage_type = s.next_damage_type("damage target type")?;
    cap.weapon_action = WeaponAction::from_letter(s.next_char("weapon action")?);

    cap.attached_prt_amount = s.next_int("attached particle amount")?;
    cap.attached_prt_reaffirm_damage_type = s.next_damage_type("reaffirm damage type")?;
    cap.attached_prt_lpip = s.next_int("attached particle")?;

    cap.slot_valid[SLOT_LEFT] = s.next_bool("left grip")?;
    cap.slot_valid[SLOT_RIGHT] = s.next_bool("right grip")?;
    cap.attack_attached = s.next_bool("attack attached")?;
    cap.attack_lpip = s.next_int("attack particle")?;

    cap.gopoof_prt_amount = s.next_int("poof amount")?;
    cap.gopoof_prt_facing_add = s.next_int("poof facing add")?;
    cap.gopoof_prt_lpip = s.next_int("poof particle")?;

    cap.blood = BloodKind::from_letter(s.next_char("blood")?);
    cap.blood_lpip = s.next_int("blood particle")?;

    cap.water_walk = s.next_bool("water walk")?;
    cap.dampen = s.next_float("dampen")?;

    cap.life_heal = float_to_fixed8_8(s.next_float("life heal")?);
    cap.mana_cost = float_to_fixed8_8(s.next_float("mana cost")?);
    cap.life_return = s.next_int("life return")?;
    cap.stopped_by = MeshFx::from_bits_retain((s.next_int("stopped by")? & 0xFF) as u8)
        | MeshFx::IMPASSABLE;

    for name in cap.skin_name.iter_mut() {
        *name = decode_optional_name(&s.next_name("skin name")?);
    }
    for cost in cap.skin_cost.iter_mut() {
        *cost = s.next_int("skin cost")?;
    }
    cap.str_bonus = s.next_float("strength dampen")?;

    cap.rider_cannot_attack = !s.next_bool("rider can attack")?;
    cap.can_be_dazed = s.next_bool("can be dazed")?;
    cap.can_be_grogged = s.next_bool("can be grogged")?;

    // legacy life and mana add, no longer used
    s.skip_to_colon(false, "life add")?;
    s.skip_to_colon(false, "mana add")?;

    cap.can_see_invisible = s.next_bool("see invisible")?;
    cap.kurse_chance = s.next_int("kurse chance")?;
    cap.sound_index[SOUND_FOOTFALL] = s.next_int("footfall sound")?;
    cap.sound_index[SOUND_JUMP] = s.next_int("jump sound")?;

    cap.apply_derived_defaults();

    while s.skip_to_colon(true, "expansion")? {
        let idsz = s.read_idsz();
        apply_expansion(&mut cap, idsz, &mut s);
    }

    cap.loaded = true;
    Ok(cap)
}

fn apply_expansion(cap: &mut CapRecord, idsz: Idsz, s: &mut TokenScanner<'_>) {
    match idsz {
        tag::LIFE => cap.life_spawn = float_to_fixed8_8(s.read_float()),
        tag::MANA => cap.mana_spawn = float_to_fixed8_8(s.read_float()),
        tag::STRD => cap.str_bonus = s.read_float(),
        tag::INTD => cap.int_bonus = s.read_float(),
        tag::WISD => cap.wis_bonus = s.read_float(),
        tag::DEXD => cap.dex_bonus = s.read_float(),
        tag::MODL => {
            for c in s.read_name().chars() {
                if let Some((_, flag)) = MODEL_LETTERS
                    .iter()
                    .find(|(letter, _)| letter.eq_ignore_ascii_case(&c))
                {
                    cap.model_flags |= *flag;
                }
            }
        }
        _ => {
            let value = s.read_int();
            match idsz {
                tag::DRES => {
                    if (0..32).contains(&value) {
                        cap.skin_dressy |= 1 << value;
                    }
                }
                tag::GOLD => cap.money = value,
                tag::STUK => cap.resist_bump_spawn = value != 1,
                tag::PACK => cap.is_too_big = value == 0,
                tag::VAMP => cap.reflect = value == 0,
                tag::DRAW => cap.always_draw = value != 0,
                tag::RANG => cap.is_ranged = value != 0,
                tag::HIDE => cap.hide_state = value,
                tag::EQUI => cap.is_equipment = value != 0,
                tag::SQUA => cap.bump_size_big = cap.bump_size as f32 * 2.0,
                tag::ICON => cap.draw_icon = value != 0,
                tag::SHAD => cap.force_shadow = value != 0,
                tag::SKIN => cap.skin_override = skin_slot(value),
                tag::CONT => cap.content_override = value,
                tag::STAT => cap.state_override = value,
                tag::LEVL => cap.level_override = value,
                tag::PLAT => cap.can_use_platforms = value != 0,
                tag::RIPP => cap.ripple = value != 0,
                tag::VALU => cap.is_valuable = value,
                tag::BOOK => cap.spell_effect_type = skin_slot(value),
                tag::FAST => cap.attack_fast = value != 0,
                _ => {
                    cap.skills.insert(idsz, value);
                }
            }
        }
    }
}

fn flag(value: bool) -> i32 {
    value as i32
}

pub fn encode(cap: &CapRecord) -> String {
    let mut w = LabeledWriter::new();

    w.comment("Character profile")
        .name("Class name", &cap.classname)
        .bool("Uniform light", cap.uniform_lit)
        .int("Maximum ammo", cap.ammo_max)
        .int("Current ammo", cap.ammo)
        .char("Gender ( Male, Female, Other, Random )", cap.gender.letter());

    w.blank().comment("Stats");
    for (stat, name) in cap.stats.iter().zip(STAT_NAMES) {
        w.range(name, stat.value)
            .range(&format!("{name} up"), stat.per_level);
    }

    w.blank().comment("Physics")
        .float("Size", cap.size)
        .float("Size up", cap.size_per_level)
        .int("Shadow size", cap.shadow_size)
        .int("Bump size", cap.bump_size)
        .int("Bump height", cap.bump_height)
        .float("Bump dampen", cap.bump_dampen)
        .int("Weight", cap.weight)
        .float("Jump power", cap.jump_power)
        .int("Number of jumps", cap.jump_count)
        .float("Sneak speed", cap.anim_speed_sneak)
        .float("Walk speed", cap.anim_speed_walk)
        .float("Run speed", cap.anim_speed_run)
        .int("Fly to height", cap.fly_height);

    w.blank().comment("Graphics")
        .int("Flashing AND", cap.flash_and)
        .int("Alpha blending", cap.alpha)
        .int("Light blending", cap.light)
        .bool("Transfer blending", cap.transfer_blend)
        .int("Sheen", cap.sheen)
        .bool("Phong mapping", cap.enviro)
        .float("Texture X add", cap.uoff_vel as f32 / UV_SCALE)
        .float("Texture Y add", cap.voff_vel as f32 / UV_SCALE)
        .bool("Sticky butt", cap.sticky_butt);

    w.blank().comment("Invulnerability")
        .bool("Invictus", cap.invictus)
        .int("NonI facing", cap.iframe_facing)
        .int("NonI angle", cap.iframe_angle)
        .int("I facing", cap.nframe_facing)
        .int("I angle", cap.nframe_angle);

    w.blank().comment("Skin defense")
        .values("Base defense", cap.defense.iter().map(|&d| invert_defense(d as i32)));
    for damage in DamageType::ALL {
        w.values(
            &format!("{} resist", damage.name()),
            cap.damage_resistance[damage.index()]
                .iter()
                .map(|&r| format_float(r)),
        );
    }
    for damage in DamageType::ALL {
        w.values(
            &format!("{} modifier", damage.name()),
            cap.damage_modifier[damage.index()]
                .iter()
                .map(|&m| damage_modifier_to_letter(m)),
        );
    }
    w.values(
        "Acceleration",
        cap.max_accel.iter().map(|&a| format_float(a)),
    );

    w.blank().comment("Experience and level data");
    for level in 1..MAX_BASE_LEVEL {
        w.int(
            &format!("EXP for level {level}"),
            cap.experience_for_level[level],
        );
    }
    w.range("Starting experience", cap.experience.scaled(EXPERIENCE_SCALE))
        .int("Experience worth", cap.experience_worth)
        .float("Experience exchange", cap.experience_exchange);
    for (rate, name) in cap.experience_rate.iter().zip(XP_NAMES) {
        w.float(name, *rate);
    }

    w.blank().comment("IDSZ identification tags");
    for (idsz, name) in cap.idsz.iter().zip(IDSZ_LABELS) {
        w.idsz(name, *idsz);
    }

    w.blank().comment("Item and damage flags")
        .bool("Is an item", cap.is_item)
        .bool("Is a mount", cap.is_mount)
        .bool("Is stackable", cap.is_stackable)
        .bool("Name known", cap.name_known)
        .bool("Usage known", cap.usage_known)
        .bool("Is exportable", cap.can_carry_to_next_module)
        .bool("Requires skill ID to use", cap.needs_skill_id_to_use)
        .bool("Is platform", cap.platform)
        .bool("Collects money", cap.can_grab_money)
        .bool("Can open stuff", cap.can_open_stuff);

    w.blank().comment("Other item and damage stuff")
        .char(
            "Damage target type",
            damage_type_letter(cap.damage_target_damage_type),
        )
        .char("Weapon action", cap.weapon_action.letter());

    w.blank().comment("Particle attachments")
        .int("Attached particle amount", cap.attached_prt_amount)
        .char(
            "Reaffirm damage type",
            damage_type_letter(cap.attached_prt_reaffirm_damage_type),
        )
        .int("Particle type", cap.attached_prt_lpip);

    w.blank().comment("Character hands")
        .bool("Left valid grip", cap.slot_valid[SLOT_LEFT])
        .bool("Right valid grip", cap.slot_valid[SLOT_RIGHT]);

    w.blank().comment("Particle spawning on attack")
        .bool("Attack attached", cap.attack_attached)
        .int("Attack particle", cap.attack_lpip);

    w.blank().comment("Particle spawning for poof")
        .int("Poof amount", cap.gopoof_prt_amount)
        .int("Facing add", cap.gopoof_prt_facing_add)
        .int("Poof particle", cap.gopoof_prt_lpip);

    w.blank().comment("Particle spawning for blood")
        .char("Blood valid", cap.blood.letter())
        .int("Blood particle", cap.blood_lpip);

    w.blank().comment("Movement")
        .bool("Waterwalking", cap.water_walk)
        .float("Bounce dampen", cap.dampen);

    w.blank().comment("Healing, costs and skins")
        .float("Life healing", fixed8_8_to_float(cap.life_heal))
        .float("Mana cost", fixed8_8_to_float(cap.mana_cost))
        .int("Life return", cap.life_return)
        .int("Stopped by", cap.stopped_by.bits() as i32);
    for (skin, name) in cap.skin_name.iter().enumerate() {
        w.name(&format!("Skin {skin} name"), name);
    }
    for (skin, cost) in cap.skin_cost.iter().enumerate() {
        w.int(&format!("Skin {skin} cost"), *cost);
    }
    // the fixed slot is deprecated; the value travels in STRD
    w.float("STR dampen", 0.0);

    w.blank().comment("Rider and status")
        .bool("No rider attacks", !cap.rider_cannot_attack)
        .bool("Can be dazed", cap.can_be_dazed)
        .bool("Can be grogged", cap.can_be_grogged)
        .int("NOT USED", 0)
        .int("NOT USED", 0)
        .bool("Can see invisible", cap.can_see_invisible)
        .int("Chance of kursed", cap.kurse_chance)
        .int("Footfall sound", cap.sound_index[SOUND_FOOTFALL])
        .int("Jump sound", cap.sound_index[SOUND_JUMP]);

    w.blank().comment("Expansions");
    encode_expansions(&mut w, cap);

    w.finish()
}

fn encode_expansions(w: &mut LabeledWriter, cap: &CapRecord) {
    for skin in (0..32).filter(|&n| cap.skin_dressy & (1u32 << n) != 0) {
        w.expansion(tag::DRES, skin);
    }
    if cap.money != 0 {
        w.expansion(tag::GOLD, cap.money);
    }
    if cap.resist_bump_spawn {
        w.expansion(tag::STUK, 0);
    }
    if cap.is_too_big {
        w.expansion(tag::PACK, 0);
    }
    if !cap.reflect {
        w.expansion(tag::VAMP, 1);
    }
    if cap.always_draw {
        w.expansion(tag::DRAW, 1);
    }
    if cap.is_ranged {
        w.expansion(tag::RANG, 1);
    }
    if cap.hide_state != NO_HIDE {
        w.expansion(tag::HIDE, cap.hide_state);
    }
    if cap.is_equipment {
        w.expansion(tag::EQUI, 1);
    }
    if cap.bump_size > 0 && cap.bump_size_big >= cap.bump_size as f32 * 2.0 {
        w.expansion(tag::SQUA, 1);
    }
    if cap.draw_icon != cap.usage_known {
        w.expansion(tag::ICON, flag(cap.draw_icon));
    }
    if cap.force_shadow {
        w.expansion(tag::SHAD, 1);
    }
    // ripple defaults to `!is_item`
    if cap.ripple == cap.is_item {
        w.expansion(tag::RIPP, flag(cap.ripple));
    }
    if cap.is_valuable != -1 {
        w.expansion(tag::VALU, cap.is_valuable);
    }
    if let Some(book) = cap.spell_effect_type {
        w.expansion(tag::BOOK, book);
    }
    if cap.attack_fast {
        w.expansion(tag::FAST, 1);
    }
    if cap.str_bonus > 0.0 {
        w.expansion(tag::STRD, format_float(cap.str_bonus));
    }
    if cap.int_bonus != 0.0 {
        w.expansion(tag::INTD, format_float(cap.int_bonus));
    }
    if cap.wis_bonus != 0.0 {
        w.expansion(tag::WISD, format_float(cap.wis_bonus));
    }
    if cap.dex_bonus != 0.0 {
        w.expansion(tag::DEXD, format_float(cap.dex_bonus));
    }
    if !cap.model_flags.is_empty() {
        let letters: String = MODEL_LETTERS
            .iter()
            .filter(|(_, f)| cap.model_flags.contains(*f))
            .map(|(letter, _)| *letter)
            .collect();
        w.expansion(tag::MODL, letters);
    }

    w.expansion(tag::PLAT, flag(cap.can_use_platforms));
    if let Some(skin) = cap.skin_override {
        w.expansion(tag::SKIN, skin);
    }
    w.expansion(tag::CONT, cap.content_override)
        .expansion(tag::STAT, cap.state_override)
        .expansion(tag::LEVL, cap.level_override)
        .expansion(tag::LIFE, format_float(fixed8_8_to_float(cap.life_spawn)))
        .expansion(tag::MANA, format_float(fixed8_8_to_float(cap.mana_spawn)));

    for (idsz, level) in cap.skills.iter() {
        w.expansion(idsz, level);
    }
}

pub fn load(path: impl AsRef<Path>) -> Result<CapRecord> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| FormatError::io(path, e))?;
    let cap = decode(&data)?;
    log::debug!(
        "Loaded character profile '{}' from {} ({} skills)",
        cap.classname,
        path.display(),
        cap.skills.len()
    );
    Ok(cap)
}

pub fn save(path: impl AsRef<Path>, cap: &CapRecord) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, encode(cap)).map_err(|e| FormatError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DAMAGE_COUNT, DamageModifier, XP_COUNT};

    #[test]
    fn default_record_roundtrips() {
        let mut cap = CapRecord::default();
        cap.apply_derived_defaults();
        let decoded = decode(encode(&cap).as_bytes()).unwrap();

        assert!(decoded.loaded);
        assert_eq!(decoded.classname, "");
        assert_eq!(decoded.skills.len(), 0);
        assert_eq!(decoded.hide_state, NO_HIDE);
        assert_eq!(decoded.stopped_by, MeshFx::IMPASSABLE);
        assert!(decoded.reflect);
    }

    #[test]
    fn expansions_override_derived_defaults() {
        let mut cap = CapRecord {
            is_item: true,
            usage_known: true,
            bump_size: 20,
            ..Default::default()
        };
        cap.apply_derived_defaults();
        cap.ripple = true;
        cap.draw_icon = false;
        cap.bump_size_big = 40.0;

        let text = encode(&cap);
        assert!(text.contains(": [RIPP] 1"));
        assert!(text.contains(": [ICON] 0"));
        assert!(text.contains(": [SQUA] 1"));

        let decoded = decode(text.as_bytes()).unwrap();
        assert!(decoded.ripple);
        assert!(!decoded.draw_icon);
        assert_eq!(decoded.bump_size_big, 40.0);
    }

    #[test]
    fn default_ripple_writes_no_tag() {
        let mut cap = CapRecord {
            is_item: true,
            ..Default::default()
        };
        cap.apply_derived_defaults();
        assert!(!encode(&cap).contains("[RIPP]"));
    }

    #[test]
    fn skin_and_book_take_modulo_and_negative_clears() {
        assert_eq!(skin_slot(6), Some(2));
        assert_eq!(skin_slot(0), Some(0));
        assert_eq!(skin_slot(-1), None);
    }

    #[test]
    fn modifiers_and_model_letters_survive() {
        let mut cap = CapRecord::default();
        cap.apply_derived_defaults();
        cap.damage_modifier[DamageType::Fire.index()][2] = DamageModifier::INVERT;
        cap.damage_modifier[DamageType::Zap.index()][0] = DamageModifier::INVICTUS;
        cap.model_flags = ModelFlags::BUMP_HEIGHT | ModelFlags::TRANSPARENT_SKIN;

        let text = encode(&cap);
        assert!(text.contains(": [MODL] HT"));

        let decoded = decode(text.as_bytes()).unwrap();
        assert_eq!(decoded.damage_modifier, cap.damage_modifier);
        assert_eq!(decoded.model_flags, cap.model_flags);
    }

    #[test]
    fn truncated_file_is_fatal() {
        let text = encode(&CapRecord::default());
        let cut = &text.as_bytes()[..text.len() / 3];
        assert!(matches!(
            decode(cut),
            Err(FormatError::MissingDelimiter { .. })
        ));
    }

    #[test]
    fn nframe_angle_one_reads_as_zero() {
        let mut cap = CapRecord::default();
        cap.nframe_angle = 1;
        let decoded = decode(encode(&cap).as_bytes()).unwrap();
        assert_eq!(decoded.nframe_angle, 0);
    }

    #[test]
    fn uv_speed_keeps_its_integer() {
        let mut cap = CapRecord::default();
        cap.uoff_vel = 12345;
        cap.voff_vel = -65535;
        let decoded = decode(encode(&cap).as_bytes()).unwrap();
        assert_eq!(decoded.uoff_vel, 12345);
        assert_eq!(decoded.voff_vel, -65535);
    }

    #[test]
    fn xp_counts_line_up() {
        assert_eq!(XP_NAMES.len(), XP_COUNT);
        assert_eq!(DamageType::ALL.len(), DAMAGE_COUNT);
    }
}
